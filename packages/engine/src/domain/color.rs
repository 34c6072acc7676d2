//! Color formats
//!
//! - `Rgb`:  packed 24-bit `0xRRGGBB`, the palette's wire format
//! - `Tint`: float channels in 0..1, used while mixing palette gradients
//! - ABGR `u32`: raster pixel format (little-endian bytes [R,G,B,A]) so a frame
//!   can be handed to `ImageData` without swizzling

use std::ops::{Add, Mul};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Unpack `0xRRGGBB`; bits above 24 are ignored.
    pub const fn from_packed(v: u32) -> Self {
        Self {
            r: (v >> 16) as u8,
            g: ((v >> 8) & 0xff) as u8,
            b: (v & 0xff) as u8,
        }
    }

    pub const fn packed(self) -> u32 {
        (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// Six lowercase hex digits, zero padded.
    pub fn hex(self) -> String {
        format!("{:06x}", self.packed())
    }

    pub fn css(self) -> String {
        format!("#{}", self.hex())
    }

    #[inline]
    pub const fn to_abgr(self, alpha: u8) -> u32 {
        (alpha as u32) << 24 | (self.b as u32) << 16 | (self.g as u32) << 8 | self.r as u32
    }

    #[inline]
    pub const fn from_abgr(pixel: u32) -> Self {
        Self {
            r: pixel as u8,
            g: (pixel >> 8) as u8,
            b: (pixel >> 16) as u8,
        }
    }
}

#[inline]
pub const fn abgr_alpha(pixel: u32) -> u8 {
    (pixel >> 24) as u8
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tint {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Tint {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

impl Mul<f32> for Tint {
    type Output = Tint;

    fn mul(self, rhs: f32) -> Tint {
        Tint {
            r: self.r * rhs,
            g: self.g * rhs,
            b: self.b * rhs,
        }
    }
}

impl Add for Tint {
    type Output = Tint;

    fn add(self, rhs: Tint) -> Tint {
        Tint {
            r: self.r + rhs.r,
            g: self.g + rhs.g,
            b: self.b + rhs.b,
        }
    }
}

/// `floor(255 * c)` per channel; float-to-int `as` saturates, so sums above 1 clamp to 255.
impl From<Tint> for Rgb {
    fn from(c: Tint) -> Self {
        Rgb {
            r: (255.0 * c.r).floor() as u8,
            g: (255.0 * c.g).floor() as u8,
            b: (255.0 * c.b).floor() as u8,
        }
    }
}
