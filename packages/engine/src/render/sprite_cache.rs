//! SpriteCache - one pre-rendered disc per engine color bucket
//!
//! Built once at startup from the engine's palette, in palette order, so the
//! value `i` in the color-index array selects sprite `i`. The palette is
//! consumed and released as soon as its colors are read.

use tracing::{debug, info};

use crate::domain::color::Rgb;
use crate::render::raster::Raster;
use crate::simulation::PaletteSource;

pub struct SpriteCache {
    sprites: Box<[Raster]>,
    colors: Box<[Rgb]>,
    threshold: f32,
    side: u32,
}

impl SpriteCache {
    /// Square side for a particle radius: `2 * threshold + 2`, truncated to
    /// whole pixels.
    pub fn side_for(threshold: f32) -> u32 {
        (threshold * 2.0 + 2.0) as u32
    }

    pub fn build<P: PaletteSource>(palette: P, threshold: f32) -> Self {
        let colors: Box<[Rgb]> = palette
            .colors()
            .iter()
            .map(|&packed| Rgb::from_packed(packed))
            .collect();
        debug!(buckets = colors.len(), "palette read, releasing");
        palette.release();

        let side = Self::side_for(threshold);
        let center = side as f32 / 2.0;
        let sprites: Box<[Raster]> = colors
            .iter()
            .map(|&color| {
                let mut sprite = Raster::new(side, side);
                sprite.fill_disc(center, center, threshold, color);
                sprite
            })
            .collect();

        info!(buckets = sprites.len(), side, "sprite cache built");

        Self {
            sprites,
            colors,
            threshold,
            side,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    /// Sprite for a color bucket.
    ///
    /// Panics when `bucket` is not below `len()`: the engine broke its contract.
    #[inline]
    pub fn sprite(&self, bucket: u32) -> &Raster {
        match self.sprites.get(bucket as usize) {
            Some(sprite) => sprite,
            None => panic!(
                "color index {} out of range for {} sprite buckets",
                bucket,
                self.sprites.len()
            ),
        }
    }

    pub fn color(&self, bucket: u32) -> Option<Rgb> {
        self.colors.get(bucket as usize).copied()
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    pub fn side(&self) -> u32 {
        self.side
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn iter(&self) -> impl Iterator<Item = &Raster> {
        self.sprites.iter()
    }
}
