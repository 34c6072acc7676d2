#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use flower_engine::simulation::{Engine, EngineBackend, EngineParams, PaletteSource};
use flower_engine::{DrawTarget, FlowerResult, MemoryView, Raster, Vec2};

#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    Init(EngineParams),
    BuildPalette { radius: f32, particle_count: u32, dt: f32 },
    Release,
    Step(f32),
    Draw { width: u32, height: u32, x: i32, y: i32 },
    Finish,
}

pub type EventLog = Rc<RefCell<Vec<Event>>>;

pub fn log() -> EventLog {
    Rc::new(RefCell::new(Vec::new()))
}

/// Engine with fixed particles; stepping only records `dt`.
pub struct RecordingEngine {
    positions: Vec<Vec2>,
    indices: Vec<u32>,
    log: EventLog,
}

impl Engine for RecordingEngine {
    fn step(&mut self, dt: f32) {
        self.log.borrow_mut().push(Event::Step(dt));
    }

    fn particle_count(&self) -> usize {
        self.positions.len()
    }

    fn view(&self) -> MemoryView<'_> {
        MemoryView::new(&self.positions, &self.indices).unwrap()
    }
}

pub struct RecordingPalette {
    colors: Vec<u32>,
    log: EventLog,
}

impl PaletteSource for RecordingPalette {
    fn colors(&self) -> &[u32] {
        &self.colors
    }

    fn release(self) {
        self.log.borrow_mut().push(Event::Release);
    }
}

pub struct RecordingBackend {
    pub log: EventLog,
    pub colors: Vec<u32>,
    /// `(position, color index)` per particle; `None` puts every particle at
    /// the center with index 0.
    pub particles: Option<Vec<(Vec2, u32)>>,
}

impl RecordingBackend {
    pub fn new(log: &EventLog, colors: &[u32]) -> Self {
        Self {
            log: log.clone(),
            colors: colors.to_vec(),
            particles: None,
        }
    }

    pub fn with_particles(mut self, particles: &[(Vec2, u32)]) -> Self {
        self.particles = Some(particles.to_vec());
        self
    }
}

impl EngineBackend for RecordingBackend {
    type Engine = RecordingEngine;
    type Palette = RecordingPalette;

    fn init(&self, params: &EngineParams) -> FlowerResult<RecordingEngine> {
        self.log.borrow_mut().push(Event::Init(*params));
        let particles = self.particles.clone().unwrap_or_else(|| {
            let center = Vec2::new(params.center_x, params.center_y);
            vec![(center, 0); params.particle_count as usize]
        });
        Ok(RecordingEngine {
            positions: particles.iter().map(|p| p.0).collect(),
            indices: particles.iter().map(|p| p.1).collect(),
            log: self.log.clone(),
        })
    }

    fn build_palette(&self, radius: f32, particle_count: u32, dt: f32) -> RecordingPalette {
        self.log.borrow_mut().push(Event::BuildPalette { radius, particle_count, dt });
        RecordingPalette {
            colors: self.colors.clone(),
            log: self.log.clone(),
        }
    }
}

/// Logs blits instead of compositing them.
pub struct RecordingTarget {
    pub width: u32,
    pub height: u32,
    pub log: EventLog,
}

impl RecordingTarget {
    pub fn new(log: &EventLog, width: u32, height: u32) -> Self {
        Self { width, height, log: log.clone() }
    }
}

impl DrawTarget for RecordingTarget {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn draw_image(&mut self, image: &Raster, x: i32, y: i32) {
        self.log.borrow_mut().push(Event::Draw {
            width: image.width(),
            height: image.height(),
            x,
            y,
        });
    }

    fn finish_frame(&mut self) {
        self.log.borrow_mut().push(Event::Finish);
    }
}
