//! AnimationLoop - step, then render, once per scheduled frame
//!
//! Logical time advances by the same `dt` every frame no matter how late the
//! frame fires. Who calls the frame (requestAnimationFrame, a timer, a test)
//! is a `FrameScheduler`.

use std::time::Duration;

use tracing::{debug, info};

use crate::error::FlowerResult;
use crate::render::frame::DrawTarget;
use crate::simulation::Engine;

use super::context::RenderContext;
use super::perf::{FrameStats, PerfTimer};

const PERF_LOG_INTERVAL: u32 = 300;

/// Fixed-step logical clock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameClock {
    dt: f32,
    frames: u64,
}

impl FrameClock {
    pub fn new(dt: f32) -> Self {
        Self { dt, frames: 0 }
    }

    /// Count one frame and return the step to simulate.
    pub fn advance(&mut self) -> f32 {
        self.frames += 1;
        self.dt
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Logical seconds elapsed.
    pub fn elapsed(&self) -> f64 {
        self.frames as f64 * self.dt as f64
    }
}

/// Drives a frame callback until the host stops it.
pub trait FrameScheduler {
    fn run(self, frame: Box<dyn FnMut()>) -> FlowerResult<()>;
}

/// Calls the frame on the current thread with a fixed pause in between.
/// Native only; wasm hosts use the requestAnimationFrame scheduler.
#[derive(Clone, Copy, Debug)]
pub struct FixedCadence {
    interval: Duration,
    frames: Option<u64>,
}

impl FixedCadence {
    /// `frames: None` runs forever.
    pub fn new(interval: Duration, frames: Option<u64>) -> Self {
        Self { interval, frames }
    }

    /// `frames` back-to-back frames with no pause.
    pub fn unpaced(frames: u64) -> Self {
        Self::new(Duration::ZERO, Some(frames))
    }
}

impl FrameScheduler for FixedCadence {
    fn run(self, mut frame: Box<dyn FnMut()>) -> FlowerResult<()> {
        let mut done = 0u64;
        while self.frames.map_or(true, |limit| done < limit) {
            frame();
            done += 1;
            if !self.interval.is_zero() {
                std::thread::sleep(self.interval);
            }
        }
        Ok(())
    }
}

pub struct AnimationLoop<E: Engine, T: DrawTarget> {
    context: RenderContext<E>,
    target: T,
    clock: FrameClock,
    stats: Option<FrameStats>,
}

impl<E: Engine, T: DrawTarget> AnimationLoop<E, T> {
    pub fn new(context: RenderContext<E>, target: T) -> Self {
        let clock = FrameClock::new(context.dt());
        Self {
            context,
            target,
            clock,
            stats: None,
        }
    }

    /// Turn per-frame timing on or off. Turning it on starts from zero.
    pub fn set_perf(&mut self, enabled: bool) {
        match (&mut self.stats, enabled) {
            (Some(stats), true) => stats.reset(),
            (None, true) => self.stats = Some(FrameStats::default()),
            (_, false) => self.stats = None,
        }
    }

    pub fn with_perf(mut self, enabled: bool) -> Self {
        self.set_perf(enabled);
        self
    }

    /// One frame: advance the engine by `dt`, then render the new state.
    /// Returns the number of sprites drawn.
    pub fn frame(&mut self) -> usize {
        let step_timer = self.stats.as_ref().map(|_| PerfTimer::start());
        let dt = self.clock.advance();
        self.context.step(dt);
        let step_ms = step_timer.map_or(0.0, |t| t.elapsed_ms());

        let render_timer = self.stats.as_ref().map(|_| PerfTimer::start());
        let drawn = self.context.render(&mut self.target);

        if let (Some(stats), Some(timer)) = (self.stats.as_mut(), render_timer) {
            stats.record(step_ms, timer.elapsed_ms(), drawn, self.clock.elapsed());
            if stats.frames % PERF_LOG_INTERVAL == 0 {
                debug!(
                    frames = stats.frames,
                    step_ms = stats.step_ms,
                    render_ms = stats.render_ms,
                    "frame perf"
                );
            }
        }
        drawn
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn stats(&self) -> Option<&FrameStats> {
        self.stats.as_ref()
    }

    pub fn context(&self) -> &RenderContext<E> {
        &self.context
    }

    pub fn target(&self) -> &T {
        &self.target
    }
}

impl<E, T> AnimationLoop<E, T>
where
    E: Engine + 'static,
    T: DrawTarget + 'static,
{
    /// Hand the loop to `scheduler`. Never returns early on its own; how long
    /// it runs is up to the scheduler.
    pub fn run<S: FrameScheduler>(mut self, scheduler: S) -> FlowerResult<()> {
        info!(
            dt = self.clock.dt(),
            particles = self.context.params().particle_count,
            "animation loop started"
        );
        scheduler.run(Box::new(move || {
            self.frame();
        }))
    }
}
