//! Palette - the engine's ordered bucket colors
//!
//! One color per simulation step of the slowest particle's trip from the
//! center to the boundary. Bucket 0 (center) is hot red from the inward
//! bounce; the last bucket (rim) is cool blue from the outward bounce:
//!
//! ```text
//! color(t) = OUT * exp(-0.75 * (T - t)) + IN * exp(-0.55 * t)
//! ```

use tracing::debug;

use crate::domain::color::{Rgb, Tint};

use super::backend::PaletteSource;

const IN_BOUNCE_COL: Tint = Tint::new(1.0, 0.0, 0.0);
const OUT_BOUNCE_COL: Tint = Tint::new(0.0, 0.7, 1.0);
const OUT_DECAY: f32 = 0.75;
const IN_DECAY: f32 = 0.55;

/// Upper bound on bucket count; very small particle counts would otherwise
/// ask for hundreds of thousands of sprites.
pub const MAX_BUCKETS: usize = 4096;

pub struct Palette {
    colors: Box<[u32]>,
}

impl Palette {
    pub fn new(boundary_radius: f32, particle_count: u32, dt: f32) -> Self {
        let count = Self::bucket_count(boundary_radius, particle_count, dt);
        let big_t = count as f32 * dt;

        let colors: Box<[u32]> = (0..count)
            .map(|step| {
                let t = step as f32 * dt;
                let blue_alpha = (-OUT_DECAY * (big_t - t)).exp();
                let red_alpha = (-IN_DECAY * t).exp();
                let mixed = OUT_BOUNCE_COL * blue_alpha + IN_BOUNCE_COL * red_alpha;
                Rgb::from(mixed).packed()
            })
            .collect();

        debug!(count, "palette built");
        Self { colors }
    }

    /// `ceil(v_min * boundary_radius / dt)` with `v_min = 100 / N`,
    /// clamped to `1..=MAX_BUCKETS`.
    pub fn bucket_count(boundary_radius: f32, particle_count: u32, dt: f32) -> usize {
        let v_min = 100.0 / particle_count.max(1) as f32;
        let raw = (v_min * boundary_radius / dt).ceil();
        if raw.is_finite() {
            (raw.max(1.0) as usize).min(MAX_BUCKETS)
        } else {
            MAX_BUCKETS
        }
    }

    pub fn colors(&self) -> &[u32] {
        &self.colors
    }

    pub fn color_count(&self) -> usize {
        self.colors.len()
    }
}

impl PaletteSource for Palette {
    fn colors(&self) -> &[u32] {
        &self.colors
    }

    fn release(self) {
        debug!(count = self.colors.len(), "palette released");
    }
}
