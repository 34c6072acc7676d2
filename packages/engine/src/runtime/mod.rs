//! Runtime - wires an engine and the renderer into a running scene.

pub mod animation;
pub mod context;
pub mod perf;

pub use animation::{AnimationLoop, FixedCadence, FrameClock, FrameScheduler};
pub use context::RenderContext;
pub use perf::FrameStats;
