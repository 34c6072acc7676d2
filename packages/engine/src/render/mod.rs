//! Renderer side of the shared-memory boundary. Never writes engine state.

pub mod backdrop;
pub mod frame;
pub mod memory_view;
pub mod raster;
pub mod sprite_cache;

pub use backdrop::Backdrop;
pub use frame::{DrawTarget, FrameRenderer};
pub use memory_view::{MemoryView, ViewAnchor, ViewLayout};
pub use raster::Raster;
pub use sprite_cache::SpriteCache;
