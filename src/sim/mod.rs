//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time comes in as millisecond timestamps, never read from a clock
//! - Seeded RNG only
//! - Stable iteration order (pipes sorted by x)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod level;
pub mod player;
pub mod score;
pub mod state;

pub use collision::{Rect, check_collision};
pub use level::{Level, Pipe, generate};
pub use player::{Player, WingFrame};
pub use score::current_score;
pub use state::{Camera, GameEvent, GamePhase};
