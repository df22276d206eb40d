//! Flappy Clone - a side-scrolling reflex game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, level generation)
//! - `game`: Session state machine, camera and scoring
//! - `platform`: Timer and input abstraction
//! - `renderer`: Terminal rendering
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod error;
pub mod game;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{GameError, Result};
pub use game::{Control, Game};
pub use highscores::{HighScoreFile, ScoreTracker};
pub use settings::Settings;
pub use tuning::Tuning;
