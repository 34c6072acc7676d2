//! Value types shared by the engine and the renderer.

pub mod color;
pub mod vec2;
