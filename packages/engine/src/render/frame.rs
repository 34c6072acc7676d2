//! FrameRenderer - backdrop blit, then every particle's cached sprite
//!
//! Draw order is the only overlap rule (no depth buffer): particles are drawn
//! from index N-1 down to 0, so a lower index always paints over a higher one.

use crate::render::backdrop::Backdrop;
use crate::render::memory_view::MemoryView;
use crate::render::raster::Raster;
use crate::render::sprite_cache::SpriteCache;

/// Something frames can be composited onto.
pub trait DrawTarget {
    fn size(&self) -> (u32, u32);

    /// Composite `image` with its top-left corner at `(x, y)`.
    fn draw_image(&mut self, image: &Raster, x: i32, y: i32);

    /// Called once after the last draw of a frame.
    fn finish_frame(&mut self) {}
}

impl DrawTarget for Raster {
    fn size(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    #[inline]
    fn draw_image(&mut self, image: &Raster, x: i32, y: i32) {
        self.blit(image, x, y);
    }
}

pub struct FrameRenderer {
    sprites: SpriteCache,
    backdrop: Backdrop,
}

impl FrameRenderer {
    pub fn new(sprites: SpriteCache, backdrop: Backdrop) -> Self {
        Self { sprites, backdrop }
    }

    pub fn sprites(&self) -> &SpriteCache {
        &self.sprites
    }

    pub fn backdrop(&self) -> &Backdrop {
        &self.backdrop
    }

    /// Top-left corner that centers a sprite on `(x, y)`.
    #[inline]
    fn sprite_origin(&self, x: f32, y: f32) -> (i32, i32) {
        let offset = self.sprites.threshold() + 1.0;
        ((x - offset).floor() as i32, (y - offset).floor() as i32)
    }

    /// Draw one frame. Returns the number of sprites drawn.
    pub fn render<T: DrawTarget + ?Sized>(&self, target: &mut T, view: &MemoryView<'_>) -> usize {
        target.draw_image(self.backdrop.raster(), 0, 0);

        for i in (0..view.len()).rev() {
            let sprite = self.sprites.sprite(view.color_index(i));
            let (x, y) = self.sprite_origin(view.x(i), view.y(i));
            target.draw_image(sprite, x, y);
        }

        target.finish_frame();
        view.len()
    }
}

#[cfg(test)]
#[path = "tests/frame_tests.rs"]
mod tests;
