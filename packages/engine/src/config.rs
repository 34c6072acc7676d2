//! Scene configuration and the geometry derived from the surface size.
//!
//! All fields default, so `{}` is a valid config and a host only overrides
//! what it needs:
//!
//! ```
//! use flower_engine::SceneConfig;
//!
//! let config = SceneConfig::from_json(r#"{ "particle_count": 2000 }"#).unwrap();
//! assert_eq!(config.particle_count, 2000);
//! assert_eq!(config.threshold, 5.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::color::Rgb;
use crate::domain::vec2::Vec2;
use crate::error::{FlowerError, FlowerResult};

pub const DEFAULT_PARTICLE_COUNT: u32 = 15_000;
pub const DEFAULT_THRESHOLD: f32 = 5.0;
pub const DEFAULT_DT: f32 = 1.0 / 60.0;
pub const DEFAULT_MARGIN_DIVISOR: f32 = 50.0;
pub const DEFAULT_BACKDROP_COLOR: u32 = 0x33_33_33;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Fixed for the life of the engine; shared arrays never resize.
    pub particle_count: u32,
    /// Particle draw radius in pixels; sprites are `2 * threshold + 2` square.
    pub threshold: f32,
    /// Logical timestep advanced once per frame.
    pub dt: f32,
    /// Outer margin is `min(width, height) / margin_divisor`.
    pub margin_divisor: f32,
    /// Packed `0xRRGGBB`.
    pub backdrop_color: u32,
    /// Viewport pixels not given to the canvas.
    pub inset_width: u32,
    pub inset_height: u32,
    pub perf_metrics: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            threshold: DEFAULT_THRESHOLD,
            dt: DEFAULT_DT,
            margin_divisor: DEFAULT_MARGIN_DIVISOR,
            backdrop_color: DEFAULT_BACKDROP_COLOR,
            inset_width: 30,
            inset_height: 100,
            perf_metrics: false,
        }
    }
}

impl SceneConfig {
    pub fn from_json(json: &str) -> FlowerResult<Self> {
        let config: SceneConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> FlowerResult<()> {
        if self.particle_count == 0 {
            return Err(FlowerError::Config("particle_count must be at least 1".into()));
        }
        if !(self.threshold.is_finite() && self.threshold > 0.0) {
            return Err(FlowerError::Config(format!(
                "threshold must be positive, got {}",
                self.threshold
            )));
        }
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(FlowerError::Config(format!("dt must be positive, got {}", self.dt)));
        }
        if !(self.margin_divisor.is_finite() && self.margin_divisor > 2.0) {
            return Err(FlowerError::Config(format!(
                "margin_divisor must be greater than 2, got {}",
                self.margin_divisor
            )));
        }
        Ok(())
    }

    pub fn backdrop(&self) -> Rgb {
        Rgb::from_packed(self.backdrop_color)
    }

    /// Canvas size for a viewport, after insets.
    pub fn surface_size(&self, viewport_width: u32, viewport_height: u32) -> (u32, u32) {
        (
            viewport_width.saturating_sub(self.inset_width),
            viewport_height.saturating_sub(self.inset_height),
        )
    }
}

/// Radii and center fixed once from the surface size at startup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneGeometry {
    pub width: u32,
    pub height: u32,
    /// `min(width, height)`
    pub lower_boundary: f32,
    /// Outer disc: `lower_boundary / 2 - lower_boundary / margin_divisor`.
    pub big_radius: f32,
    /// Boundary fed to the engine, one particle radius inside the disc.
    pub engine_radius: f32,
    pub center: Vec2,
}

impl SceneGeometry {
    pub fn derive(config: &SceneConfig, width: u32, height: u32) -> FlowerResult<Self> {
        let lower_boundary = width.min(height) as f32;
        let big_radius = lower_boundary / 2.0 - lower_boundary / config.margin_divisor;
        let engine_radius = big_radius - config.threshold;

        if engine_radius <= 0.0 {
            return Err(FlowerError::SurfaceTooSmall {
                width,
                height,
                threshold: config.threshold,
            });
        }

        Ok(Self {
            width,
            height,
            lower_boundary,
            big_radius,
            engine_radius,
            center: Vec2::new(width as f32 / 2.0, height as f32 / 2.0),
        })
    }
}
