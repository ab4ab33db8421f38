//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (keys/clicks → logical commands)
//! - Wall-clock timestamps
//! - A scripted autopilot for headless runs
//!
//! Storage lives in `crate::persistence`.

pub mod autopilot;
pub mod input;
pub mod time;

pub use autopilot::Autopilot;
pub use input::{Command, InputQueue};
pub use time::{Clock, FixedClock, SystemClock};
