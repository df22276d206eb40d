//! Session phase, camera and the cues the simulation emits

use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start screen, waiting for the first flap
    NotStarted,
    /// Active gameplay
    Playing,
    /// Game is paused (timer frozen)
    Paused,
    /// Player crashed, waiting for restart or quit
    Dead,
}

/// Discrete happenings the simulation reports to the outside (audio, logging)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player flapped
    Flap,
    /// Player passed a pipe
    Point,
    /// Player hit a pipe
    Hit,
    /// Player died (pipe or floor)
    Die,
    /// A new best score was recorded
    NewHighScore(u32),
}

/// The visible window onto the world. Only scrolls horizontally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Camera {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Camera {
    /// Camera at the world origin, sized to the screen
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            x: 0,
            y: 0,
            w: tuning.screen_width,
            h: tuning.screen_height,
        }
    }

    /// Keep the player at a fixed screen column
    pub fn follow(&mut self, collider: &Rect, tuning: &Tuning) {
        self.x = collider.x - tuning.player_camera_offset;
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }
}
