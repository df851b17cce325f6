//! Platform abstraction layer
//!
//! The outside world as the simulation sees it:
//! - Time: frame pacing against a swappable time source
//! - Input: raw key events turned into per-tick control signals

pub mod input;
pub mod time;

pub use input::{DemoInput, InputSource, InputState, Key, KeyEvent, ScriptedInput};
pub use time::{FrameClock, ManualClock, TimeSource, WallClock};
