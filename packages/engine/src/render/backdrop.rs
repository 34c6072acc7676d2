//! Backdrop - static scenery rendered once, blitted whole every frame.
//!
//! The blit doubles as the frame clear. Anything that does not change per
//! frame belongs here rather than in the per-frame draw list.

use tracing::debug;

use crate::domain::color::Rgb;
use crate::render::raster::Raster;

pub struct Backdrop {
    raster: Raster,
}

impl Backdrop {
    /// Opaque flat fill the size of the output surface.
    pub fn build(width: u32, height: u32, color: Rgb) -> Self {
        debug!(width, height, color = %color.css(), "backdrop built");
        Self {
            raster: Raster::filled(width, height, color),
        }
    }

    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    pub fn size(&self) -> (u32, u32) {
        (self.raster.width(), self.raster.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backdrop_is_opaque_and_surface_sized() {
        let b = Backdrop::build(80, 60, Rgb::from_packed(0x333333));
        assert_eq!(b.size(), (80, 60));
        assert!(b.raster().is_opaque());
        assert_eq!(b.raster().pixel(79, 59), Some(Rgb::new(0x33, 0x33, 0x33).to_abgr(255)));
    }
}
