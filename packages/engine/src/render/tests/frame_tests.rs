use super::*;
use crate::domain::color::{abgr_alpha, Rgb};
use crate::domain::vec2::Vec2;
use crate::simulation::PaletteSource;

const RED: u32 = 0xff0000;
const BLUE: u32 = 0x0000ff;
const BACKDROP: Rgb = Rgb::new(0x33, 0x33, 0x33);

struct Colors(Vec<u32>);

impl PaletteSource for Colors {
    fn colors(&self) -> &[u32] {
        &self.0
    }

    fn release(self) {}
}

fn renderer(width: u32, height: u32) -> FrameRenderer {
    FrameRenderer::new(
        SpriteCache::build(Colors(vec![RED, BLUE]), 5.0),
        Backdrop::build(width, height, BACKDROP),
    )
}

/// Records every draw as (width, height, x, y).
#[derive(Default)]
struct Recorder {
    draws: Vec<(u32, u32, i32, i32)>,
    finished: u32,
}

impl DrawTarget for Recorder {
    fn size(&self) -> (u32, u32) {
        (64, 48)
    }

    fn draw_image(&mut self, image: &Raster, x: i32, y: i32) {
        self.draws.push((image.width(), image.height(), x, y));
    }

    fn finish_frame(&mut self) {
        self.finished += 1;
    }
}

#[test]
fn backdrop_first_and_exactly_once() {
    let r = renderer(64, 48);
    let positions = [Vec2::new(10.0, 10.0), Vec2::new(20.0, 20.0), Vec2::new(30.0, 30.0)];
    let view = MemoryView::new(&positions, &[0, 1, 0]).unwrap();

    let mut target = Recorder::default();
    let drawn = r.render(&mut target, &view);

    assert_eq!(drawn, 3);
    assert_eq!(target.draws[0], (64, 48, 0, 0));
    let full_surface = target.draws.iter().filter(|d| d.0 == 64 && d.1 == 48).count();
    assert_eq!(full_surface, 1);
    assert_eq!(target.draws.len(), 4);
    assert_eq!(target.finished, 1);
}

#[test]
fn sprites_drawn_in_descending_index_order_centered() {
    let r = renderer(64, 48);
    let positions = [Vec2::new(10.7, 10.2), Vec2::new(20.0, 21.0), Vec2::new(30.0, 32.9)];
    let view = MemoryView::new(&positions, &[0, 1, 0]).unwrap();

    let mut target = Recorder::default();
    r.render(&mut target, &view);

    let origins: Vec<(i32, i32)> = target.draws[1..].iter().map(|d| (d.2, d.3)).collect();
    // floor(pos) - threshold - 1
    assert_eq!(origins, vec![(24, 26), (14, 15), (4, 4)]);
    assert!(target.draws[1..].iter().all(|d| d.0 == 12 && d.1 == 12));
}

#[test]
fn lower_index_wins_overlap() {
    let r = renderer(64, 48);
    // Particle 0 red, particle 1 blue, centers 3px apart.
    let positions = [Vec2::new(20.0, 20.0), Vec2::new(23.0, 20.0)];
    let view = MemoryView::new(&positions, &[0, 1]).unwrap();

    let mut surface = Raster::new(64, 48);
    r.render(&mut surface, &view);

    for x in 20..=23 {
        let px = surface.pixel(x, 20).unwrap();
        assert_eq!(Rgb::from_abgr(px), Rgb::from_packed(RED), "pixel ({x}, 20)");
        assert_eq!(abgr_alpha(px), 255);
    }
    // Beyond particle 0's disc only particle 1 is visible.
    assert_eq!(Rgb::from_abgr(surface.pixel(26, 20).unwrap()), Rgb::from_packed(BLUE));
}

#[test]
fn swapping_indices_swaps_the_winner() {
    let r = renderer(64, 48);
    let positions = [Vec2::new(23.0, 20.0), Vec2::new(20.0, 20.0)];
    let view = MemoryView::new(&positions, &[1, 0]).unwrap();

    let mut surface = Raster::new(64, 48);
    r.render(&mut surface, &view);
    assert_eq!(Rgb::from_abgr(surface.pixel(21, 20).unwrap()), Rgb::from_packed(BLUE));
}

#[test]
fn backdrop_clears_previous_frame() {
    let r = renderer(64, 48);
    let mut surface = Raster::new(64, 48);

    let first = [Vec2::new(20.0, 20.0)];
    r.render(&mut surface, &MemoryView::new(&first, &[0]).unwrap());
    let moved = [Vec2::new(50.0, 30.0)];
    r.render(&mut surface, &MemoryView::new(&moved, &[0]).unwrap());

    assert_eq!(surface.pixel(20, 20), Some(BACKDROP.to_abgr(255)));
    assert_eq!(Rgb::from_abgr(surface.pixel(50, 30).unwrap()), Rgb::from_packed(RED));
    assert!(surface.is_opaque());
}

#[test]
fn particles_off_surface_are_clipped() {
    let r = renderer(64, 48);
    let positions = [Vec2::new(-3.0, 2.0), Vec2::new(500.0, 500.0)];
    let view = MemoryView::new(&positions, &[0, 1]).unwrap();

    let mut surface = Raster::new(64, 48);
    assert_eq!(r.render(&mut surface, &view), 2);
    assert_eq!(Rgb::from_abgr(surface.pixel(0, 2).unwrap()), Rgb::from_packed(RED));
}

#[test]
#[should_panic(expected = "out of range")]
fn color_index_past_bucket_count_is_fatal() {
    let r = renderer(64, 48);
    let positions = [Vec2::new(10.0, 10.0)];
    let view = MemoryView::new(&positions, &[2]).unwrap();
    r.render(&mut Raster::new(64, 48), &view);
}
