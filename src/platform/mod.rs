//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time/ticks
//! - Input events
//! - Surface sizing
//! - Page lifecycle (back/forward cache)
//! - Storage (LocalStorage on web)

pub mod input;
pub mod lifecycle;
pub mod storage;
pub mod surface;
pub mod time;

pub use input::{Command, command_for_code};
pub use lifecycle::LoopAction;
pub use storage::{KeyValueStore, MemoryStore};
pub use surface::SurfaceSize;
pub use time::FrameClock;
