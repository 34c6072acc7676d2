mod common;

use common::{Event, RecordingBackend, RecordingTarget};
use flower_engine::domain::color::abgr_alpha;
use flower_engine::simulation::EngineParams;
use flower_engine::{
    AnimationLoop, FixedCadence, FlowerBackend, FlowerError, Raster, RenderContext, Rgb,
    SceneConfig, Vec2,
};

const RED: u32 = 0xff0000;
const GREEN: u32 = 0x00ff00;
const BLUE: u32 = 0x0000ff;
const WHITE: u32 = 0xffffff;

fn config(particle_count: u32) -> SceneConfig {
    SceneConfig {
        particle_count,
        ..SceneConfig::default()
    }
}

#[test]
fn reference_scene_starts_engine_with_derived_geometry() {
    let log = common::log();
    let backend = RecordingBackend::new(&log, &[RED]);
    let ctx = RenderContext::new(&backend, &SceneConfig::default(), (800, 600)).unwrap();

    let expected = EngineParams {
        particle_count: 15_000,
        radius: 283.0,
        threshold: 5.0,
        center_x: 400.0,
        center_y: 300.0,
        dt: 1.0 / 60.0,
    };
    assert_eq!(
        *log.borrow(),
        vec![
            Event::Init(expected),
            Event::BuildPalette { radius: 283.0, particle_count: 15_000, dt: 1.0 / 60.0 },
            Event::Release,
        ]
    );
    assert_eq!(ctx.geometry().lower_boundary, 600.0);
    assert_eq!(ctx.backdrop().size(), (800, 600));
}

#[test]
fn four_color_palette_gives_four_sprites_and_one_release() {
    let log = common::log();
    let backend = RecordingBackend::new(&log, &[RED, GREEN, BLUE, WHITE]);
    let ctx = RenderContext::new(&backend, &config(10), (200, 200)).unwrap();

    let sprites = ctx.sprites();
    assert_eq!(sprites.len(), 4);
    assert_eq!(log.borrow().iter().filter(|e| **e == Event::Release).count(), 1);

    for (i, packed) in [RED, GREEN, BLUE, WHITE].into_iter().enumerate() {
        let sprite = sprites.sprite(i as u32);
        assert_eq!((sprite.width(), sprite.height()), (12, 12));
        let center = sprite.pixel(6, 6).unwrap();
        assert_eq!(Rgb::from_abgr(center), Rgb::from_packed(packed));
        assert_eq!(abgr_alpha(center), 255);
    }
}

#[test]
fn each_frame_is_one_step_then_one_render() {
    let log = common::log();
    let backend = RecordingBackend::new(&log, &[RED, BLUE]);
    let ctx = RenderContext::new(&backend, &config(3), (100, 80)).unwrap();
    log.borrow_mut().clear();

    let target = RecordingTarget::new(&log, 100, 80);
    AnimationLoop::new(ctx, target).run(FixedCadence::unpaced(3)).unwrap();

    let dt = 1.0 / 60.0;
    let backdrop = Event::Draw { width: 100, height: 80, x: 0, y: 0 };
    // Every particle sits at the center, so each sprite lands at 50-6, 40-6.
    let particle = Event::Draw { width: 12, height: 12, x: 44, y: 34 };
    let frame = [
        Event::Step(dt),
        backdrop,
        particle.clone(),
        particle.clone(),
        particle,
        Event::Finish,
    ];
    let expected: Vec<Event> = frame.iter().cloned().cycle().take(3 * frame.len()).collect();
    assert_eq!(*log.borrow(), expected);
}

#[test]
fn lower_index_wins_overlaps() {
    let log = common::log();
    let backend = RecordingBackend::new(&log, &[RED, BLUE])
        .with_particles(&[(Vec2::new(20.0, 20.0), 0), (Vec2::new(24.0, 20.0), 1)]);
    let ctx = RenderContext::new(&backend, &config(2), (40, 40)).unwrap();

    let mut surface = Raster::new(40, 40);
    assert_eq!(ctx.render(&mut surface), 2);

    let shared = surface.pixel(22, 20).unwrap();
    assert_eq!(Rgb::from_abgr(shared), Rgb::from_packed(RED));
    let blue_only = surface.pixel(27, 20).unwrap();
    assert_eq!(Rgb::from_abgr(blue_only), Rgb::from_packed(BLUE));
    let backdrop = surface.pixel(0, 0).unwrap();
    assert_eq!(Rgb::from_abgr(backdrop), Rgb::from_packed(0x333333));
    assert!(surface.is_opaque());
}

#[test]
#[should_panic(expected = "out of range")]
fn color_index_beyond_palette_is_fatal() {
    let log = common::log();
    let backend = RecordingBackend::new(&log, &[RED, GREEN, BLUE, WHITE])
        .with_particles(&[(Vec2::new(20.0, 20.0), 4)]);
    let ctx = RenderContext::new(&backend, &config(1), (40, 40)).unwrap();

    let mut surface = Raster::new(40, 40);
    ctx.render(&mut surface);
}

#[test]
fn surface_too_small_fails_before_engine_init() {
    let log = common::log();
    let backend = RecordingBackend::new(&log, &[RED]);
    let err = RenderContext::new(&backend, &SceneConfig::default(), (10, 600))
        .err()
        .unwrap();

    assert!(matches!(err, FlowerError::SurfaceTooSmall { width: 10, height: 600, .. }));
    assert!(log.borrow().is_empty());
}

#[test]
fn engine_with_wrong_particle_count_is_rejected() {
    let log = common::log();
    let backend = RecordingBackend::new(&log, &[RED])
        .with_particles(&[(Vec2::new(1.0, 1.0), 0)]);
    let err = RenderContext::new(&backend, &config(5), (100, 100)).err().unwrap();

    assert!(matches!(err, FlowerError::Config(_)));
}

#[test]
fn bundled_engine_runs_end_to_end() {
    let config = config(500);
    let ctx = RenderContext::new(&FlowerBackend, &config, (200, 150)).unwrap();
    let buckets = ctx.sprites().len();
    assert_eq!(buckets as u32, ctx.engine().color_count());

    let mut animation = AnimationLoop::new(ctx, Raster::new(200, 150)).with_perf(true);
    for _ in 0..30 {
        assert_eq!(animation.frame(), 500);
        let view = animation.context().engine().shared_view();
        assert_eq!(view.find_out_of_range(buckets), None);
    }

    assert_eq!(animation.clock().frames(), 30);
    assert!((animation.clock().elapsed() - 0.5).abs() < 1e-6);
    assert_eq!(animation.context().engine().frame(), 30);

    let stats = animation.stats().unwrap();
    assert_eq!(stats.frames(), 30);
    assert_eq!(stats.sprites_drawn(), 500);
    assert!(stats.step_ms() >= 0.0 && stats.render_ms() >= 0.0);

    let backdrop = Rgb::from_packed(config.backdrop_color);
    let surface = animation.target();
    assert_eq!(surface.pixel(0, 0).map(Rgb::from_abgr), Some(backdrop));
    // Slow particles are still near the center.
    assert_ne!(surface.pixel(100, 75).map(Rgb::from_abgr), Some(backdrop));
}

#[test]
#[should_panic(expected = "draw target size differs")]
fn target_larger_than_backdrop_is_fatal() {
    let ctx = RenderContext::new(&FlowerBackend, &config(500), (200, 150)).unwrap();
    let mut animation = AnimationLoop::new(ctx, Raster::new(400, 300));
    animation.frame();
}
