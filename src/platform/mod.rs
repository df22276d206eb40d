//! Platform abstraction layer
//!
//! Handles the outside world for the simulation:
//! - Time/ticks (pausable timer over a clock)
//! - Input events (terminal keys to game commands)
//! - Terminal raw mode and alternate screen

pub mod input;
pub mod terminal;
pub mod time;

pub use input::{InputEvent, map_event};
pub use terminal::TerminalGuard;
pub use time::{Clock, ManualClock, SystemClock, Timer};
