//! Raster - ABGR pixel buffer for software compositing
//!
//! Pixels are `u32` ABGR (little-endian bytes [R,G,B,A]), the same layout the
//! browser's `ImageData` expects, so a finished frame goes to the canvas as a
//! byte cast with no conversion pass.

use crate::domain::color::{abgr_alpha, Rgb};

pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
    // Every pixel has alpha 255; blits become row copies.
    opaque: bool,
}

impl Raster {
    /// Fully transparent raster.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; (width as usize) * (height as usize)],
            opaque: false,
        }
    }

    /// Fully opaque raster filled with `color`.
    pub fn filled(width: u32, height: u32, color: Rgb) -> Self {
        Self {
            width,
            height,
            pixels: vec![color.to_abgr(255); (width as usize) * (height as usize)],
            opaque: true,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 { self.width }

    #[inline]
    pub fn height(&self) -> u32 { self.height }

    #[inline]
    pub fn is_opaque(&self) -> bool { self.opaque }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Pixel bytes in RGBA order, ready for `ImageData`.
    pub fn as_rgba_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + x as usize
    }

    /// ABGR pixel at `(x, y)`, `None` outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x < self.width && y < self.height {
            Some(self.pixels[self.index(x, y)])
        } else {
            None
        }
    }

    /// Anti-aliased filled disc.
    ///
    /// Coverage per pixel is `radius + 0.5 - distance(pixel center, center)`,
    /// clamped to 0..1, which gives a one-pixel soft edge like a canvas `arc` fill.
    /// Pixels are overwritten, not blended; meant for drawing into a fresh raster.
    pub fn fill_disc(&mut self, cx: f32, cy: f32, radius: f32, color: Rgb) {
        let x0 = (cx - radius - 1.0).floor().max(0.0) as u32;
        let y0 = (cy - radius - 1.0).floor().max(0.0) as u32;
        let x1 = ((cx + radius + 1.0).ceil().max(0.0) as u32).min(self.width);
        let y1 = ((cy + radius + 1.0).ceil().max(0.0) as u32).min(self.height);

        for y in y0..y1 {
            let dy = y as f32 + 0.5 - cy;
            for x in x0..x1 {
                let dx = x as f32 + 0.5 - cx;
                let dist = (dx * dx + dy * dy).sqrt();
                let coverage = (radius + 0.5 - dist).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    let alpha = (coverage * 255.0).round() as u8;
                    let idx = self.index(x, y);
                    self.pixels[idx] = color.to_abgr(alpha);
                }
            }
        }
        self.opaque = false;
    }

    /// Source-over composite of `src` with its top-left corner at `(x, y)`.
    /// Parts outside this raster are clipped.
    pub fn blit(&mut self, src: &Raster, x: i32, y: i32) {
        let dst_x0 = x.max(0);
        let dst_y0 = y.max(0);
        let dst_x1 = (x + src.width as i32).min(self.width as i32);
        let dst_y1 = (y + src.height as i32).min(self.height as i32);
        if dst_x0 >= dst_x1 || dst_y0 >= dst_y1 {
            return;
        }

        let row_len = (dst_x1 - dst_x0) as usize;
        let src_x0 = (dst_x0 - x) as u32;

        for dy in dst_y0..dst_y1 {
            let src_y = (dy - y) as u32;
            let s = src.index(src_x0, src_y);
            let d = self.index(dst_x0 as u32, dy as u32);
            let src_row = &src.pixels[s..s + row_len];
            let dst_row = &mut self.pixels[d..d + row_len];

            if src.opaque {
                dst_row.copy_from_slice(src_row);
            } else {
                for (dp, &sp) in dst_row.iter_mut().zip(src_row) {
                    *dp = source_over(sp, *dp);
                }
            }
        }

        // "over" never lowers alpha, so an opaque destination stays opaque;
        // a transparent one only becomes opaque under a full opaque cover.
        let covers_all = dst_x0 == 0
            && dst_y0 == 0
            && dst_x1 == self.width as i32
            && dst_y1 == self.height as i32;
        if src.opaque && covers_all {
            self.opaque = true;
        }
    }
}

/// Straight-alpha "over" on ABGR pixels.
#[inline]
fn source_over(src: u32, dst: u32) -> u32 {
    let sa = abgr_alpha(src) as u32;
    if sa == 255 {
        return src;
    }
    if sa == 0 {
        return dst;
    }
    let da = abgr_alpha(dst) as u32;
    if da == 255 {
        let s = Rgb::from_abgr(src);
        let d = Rgb::from_abgr(dst);
        return Rgb::new(
            blend_channel(s.r, d.r, sa),
            blend_channel(s.g, d.g, sa),
            blend_channel(s.b, d.b, sa),
        )
        .to_abgr(255);
    }

    // General case: out_a = sa + da * (1 - sa)
    let dw = da * (255 - sa) / 255;
    let out_a = sa + dw;
    if out_a == 0 {
        return 0;
    }
    let s = Rgb::from_abgr(src);
    let d = Rgb::from_abgr(dst);
    let mix = |sc: u8, dc: u8| ((sc as u32 * sa + dc as u32 * dw) / out_a) as u8;
    Rgb::new(mix(s.r, d.r), mix(s.g, d.g), mix(s.b, d.b)).to_abgr(out_a as u8)
}

/// Blend one channel over an opaque destination.
/// `(x + 1 + (x >> 8)) >> 8` stands in for `x / 255`.
#[inline]
fn blend_channel(src: u8, dst: u8, alpha: u32) -> u8 {
    let result = src as u32 * alpha + dst as u32 * (255 - alpha);
    ((result + 1 + (result >> 8)) >> 8) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = Rgb::new(255, 0, 0);
    const GREY: Rgb = Rgb::new(0x33, 0x33, 0x33);

    #[test]
    fn disc_is_solid_inside_and_clear_outside() {
        let mut r = Raster::new(12, 12);
        r.fill_disc(6.0, 6.0, 5.0, RED);

        assert_eq!(r.pixel(6, 6), Some(RED.to_abgr(255)));
        assert_eq!(r.pixel(5, 5), Some(RED.to_abgr(255)));
        assert_eq!(r.pixel(0, 0), Some(0));
        assert_eq!(r.pixel(11, 11), Some(0));
        assert!(!r.is_opaque());
    }

    #[test]
    fn disc_edge_is_partially_covered() {
        let mut r = Raster::new(12, 12);
        r.fill_disc(6.0, 6.0, 5.0, RED);

        let edge = (0..12)
            .filter_map(|x| r.pixel(x, 6))
            .map(abgr_alpha)
            .filter(|&a| a > 0 && a < 255)
            .count();
        assert!(edge > 0, "expected soft edge pixels on the center row");
    }

    #[test]
    fn opaque_blit_copies_and_clips() {
        let mut dst = Raster::new(4, 4);
        let src = Raster::filled(3, 3, GREY);
        dst.blit(&src, -1, -1);

        assert_eq!(dst.pixel(0, 0), Some(GREY.to_abgr(255)));
        assert_eq!(dst.pixel(1, 1), Some(GREY.to_abgr(255)));
        assert_eq!(dst.pixel(2, 2), Some(0));
        assert!(!dst.is_opaque());
    }

    #[test]
    fn full_cover_makes_destination_opaque() {
        let mut dst = Raster::new(4, 3);
        dst.blit(&Raster::filled(4, 3, GREY), 0, 0);
        assert!(dst.is_opaque());
        assert!(dst.pixels().iter().all(|&p| p == GREY.to_abgr(255)));
    }

    #[test]
    fn blit_fully_outside_is_a_no_op() {
        let mut dst = Raster::filled(4, 4, GREY);
        let mut src = Raster::new(2, 2);
        src.fill_disc(1.0, 1.0, 1.0, RED);
        dst.blit(&src, 10, 10);
        dst.blit(&src, -5, 0);
        assert!(dst.pixels().iter().all(|&p| p == GREY.to_abgr(255)));
    }

    #[test]
    fn half_alpha_blends_over_opaque() {
        let out = source_over(Rgb::new(255, 0, 0).to_abgr(128), Rgb::new(0, 0, 0).to_abgr(255));
        let c = Rgb::from_abgr(out);
        assert_eq!(abgr_alpha(out), 255);
        assert!((127..=129).contains(&c.r), "r = {}", c.r);
        assert_eq!(c.g, 0);
    }

    #[test]
    fn transparent_source_leaves_destination() {
        let dst = GREY.to_abgr(255);
        assert_eq!(source_over(0, dst), dst);
    }

    #[test]
    fn rgba_bytes_alias_pixels() {
        let r = Raster::filled(2, 1, Rgb::new(1, 2, 3));
        assert_eq!(r.as_rgba_bytes(), &[1, 2, 3, 255, 1, 2, 3, 255]);
    }
}
