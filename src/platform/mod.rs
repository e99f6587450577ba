//! Platform abstraction layer
//!
//! Native-only pieces the interactive render mode needs:
//! - Window creation and event pumping
//! - Frame pacing

pub mod time;
pub mod window;

pub use time::FrameClock;
pub use window::Display;
