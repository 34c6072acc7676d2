//! RenderContext - everything one running scene owns
//!
//! Replaces the loose globals a browser demo would keep on `window`: the
//! engine handle, the sprite cache, the backdrop and the derived geometry all
//! live here and are built in one go.

use tracing::info;

use crate::config::{SceneConfig, SceneGeometry};
use crate::error::{FlowerError, FlowerResult};
use crate::render::backdrop::Backdrop;
use crate::render::frame::{DrawTarget, FrameRenderer};
use crate::render::sprite_cache::SpriteCache;
use crate::simulation::{Engine, EngineBackend, EngineParams};

pub struct RenderContext<E: Engine> {
    engine: E,
    renderer: FrameRenderer,
    geometry: SceneGeometry,
    params: EngineParams,
}

impl<E: Engine> RenderContext<E> {
    /// Start the engine for a `width x height` surface and build the sprites
    /// and backdrop. The palette is released before this returns.
    pub fn new<B>(backend: &B, config: &SceneConfig, surface: (u32, u32)) -> FlowerResult<Self>
    where
        B: EngineBackend<Engine = E>,
    {
        config.validate()?;
        let (width, height) = surface;
        let geometry = SceneGeometry::derive(config, width, height)?;
        let params = EngineParams::from_scene(config, &geometry);

        info!(
            width,
            height,
            radius = params.radius,
            center_x = params.center_x,
            center_y = params.center_y,
            particles = params.particle_count,
            "starting engine"
        );
        let engine = backend.init(&params)?;
        if engine.particle_count() != params.particle_count as usize {
            return Err(FlowerError::Config(format!(
                "engine reports {} particles, requested {}",
                engine.particle_count(),
                params.particle_count
            )));
        }

        let palette = backend.build_palette(params.radius, params.particle_count, params.dt);
        let sprites = SpriteCache::build(palette, config.threshold);
        let backdrop = Backdrop::build(width, height, config.backdrop());

        Ok(Self {
            engine,
            renderer: FrameRenderer::new(sprites, backdrop),
            geometry,
            params,
        })
    }

    pub fn step(&mut self, dt: f32) {
        self.engine.step(dt);
    }

    /// Draw the current engine state. Returns the number of sprites drawn.
    ///
    /// Panics if `target` is not the surface size the backdrop was built for:
    /// pixels outside the backdrop would never be cleared.
    pub fn render<T: DrawTarget + ?Sized>(&self, target: &mut T) -> usize {
        assert_eq!(
            target.size(),
            self.backdrop().size(),
            "draw target size differs from the surface the scene was built for"
        );
        let view = self.engine.view();
        assert_eq!(
            view.len(),
            self.params.particle_count as usize,
            "engine view length changed after init"
        );
        self.renderer.render(target, &view)
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn sprites(&self) -> &SpriteCache {
        self.renderer.sprites()
    }

    pub fn backdrop(&self) -> &Backdrop {
        self.renderer.backdrop()
    }

    pub fn geometry(&self) -> &SceneGeometry {
        &self.geometry
    }

    pub fn params(&self) -> &EngineParams {
        &self.params
    }

    pub fn dt(&self) -> f32 {
        self.params.dt
    }
}
