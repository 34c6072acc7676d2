//! Errors for the setup path.
//!
//! The per-frame path has no recoverable errors: a bad color index or a
//! relocated view is a broken engine contract and panics.

use thiserror::Error;

pub type FlowerResult<T> = Result<T, FlowerError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlowerError {
    /// A config value is outside its valid range.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Config JSON could not be parsed.
    #[error("config parse error: {0}")]
    Json(String),

    /// The surface leaves no room for the simulation disc.
    #[error("surface {width}x{height} too small for threshold {threshold}")]
    SurfaceTooSmall {
        width: u32,
        height: u32,
        threshold: f32,
    },

    /// A view offset does not satisfy the element type's alignment.
    #[error("view `{name}` at byte offset {offset} is not aligned to {align} bytes")]
    Misaligned {
        name: &'static str,
        offset: usize,
        align: usize,
    },

    /// A view would extend past the end of linear memory.
    #[error("view `{name}` spans bytes {start}..{end} but linear memory holds {memory_len}")]
    OutOfBounds {
        name: &'static str,
        start: usize,
        end: usize,
        memory_len: usize,
    },

    /// Position and color-index arrays disagree on the particle count.
    #[error("view length mismatch: {positions} positions vs {indices} color indices")]
    LengthMismatch { positions: usize, indices: usize },

    /// Browser glue failed (missing canvas, context, ...).
    #[error("host error: {0}")]
    Host(String),
}

impl From<serde_json::Error> for FlowerError {
    fn from(e: serde_json::Error) -> Self {
        FlowerError::Json(e.to_string())
    }
}
