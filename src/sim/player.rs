//! The bird: vertical kinematics, tilt, wing animation and collision
//!
//! The player moves right at the scroll speed while gravity pulls it down.
//! A flap replaces the vertical velocity with a fixed upward impulse and
//! snaps the bird's nose up; once the flap's air time runs out the bird
//! starts to tilt into a nose dive.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, check_collision};
use super::level::Pipe;
use super::score::current_score;
use super::state::GameEvent;
use crate::tuning::Tuning;

/// Wing sprite to show this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WingFrame {
    Up,
    Neutral,
    Down,
}

impl WingFrame {
    /// Pick the wing frame from the time since the last flap.
    ///
    /// The flap animation runs up, neutral, down, neutral twice. Anything past
    /// the eighth frame rests on neutral.
    pub fn from_elapsed(since_flap_ms: u64, frame_duration_ms: u64) -> Self {
        match since_flap_ms / frame_duration_ms.max(1) {
            0 | 4 => WingFrame::Up,
            2 | 6 => WingFrame::Down,
            _ => WingFrame::Neutral,
        }
    }
}

/// The player-controlled bird
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// World position of the top-left corner (px)
    pos: DVec2,
    /// Velocity (px/s); x is the constant scroll speed
    vel: DVec2,
    /// Tilt in degrees, clockwise positive
    rotation: f64,
    /// Current tilt speed (deg/s)
    rotation_speed: f64,
    alive: bool,
    last_move_ms: u64,
    last_flap_ms: u64,
    collider: Rect,
    score: u32,
    frame: WingFrame,
}

impl Player {
    /// Spawn a player at the start column, vertically centered
    pub fn new(tuning: &Tuning, now_ms: u64) -> Self {
        let pos = DVec2::new(
            tuning.player_camera_offset as f64,
            (tuning.screen_height / 2 - tuning.player_height / 2) as f64,
        );
        let mut player = Self {
            pos,
            vel: DVec2::new(tuning.camera_velocity, 0.0),
            rotation: 0.0,
            rotation_speed: tuning.rotation_speed,
            alive: true,
            last_move_ms: now_ms,
            last_flap_ms: now_ms,
            collider: Rect::new(0, 0, tuning.player_width, tuning.player_height),
            score: 0,
            frame: WingFrame::Up,
        };
        player.shift_collider();
        player
    }

    pub fn pos(&self) -> DVec2 {
        self.pos
    }

    pub fn vel(&self) -> DVec2 {
        self.vel
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn rotation_speed(&self) -> f64 {
        self.rotation_speed
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn collider(&self) -> Rect {
        self.collider
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn frame(&self) -> WingFrame {
        self.frame
    }

    /// Apply a flap impulse. The caller only forwards flaps while alive and unpaused.
    pub fn flap(&mut self, now_ms: u64, tuning: &Tuning, events: &mut Vec<GameEvent>) {
        self.vel.y = -tuning.flap_height;
        // Fast snap back toward neutral
        self.rotation_speed = tuning.flap_rotation_speed;
        self.rotation = tuning.rotation_after_flap;
        self.last_flap_ms = now_ms;
        events.push(GameEvent::Flap);
    }

    /// Whether the collider overlaps either half of a pipe
    pub fn collides_with(&self, pipe: &Pipe) -> bool {
        check_collision(&self.collider, &pipe.top()) || check_collision(&self.collider, &pipe.bottom())
    }

    /// Advance the player to `now_ms`. Returns whether it is still alive.
    pub fn update(
        &mut self,
        pipes: &[Pipe],
        now_ms: u64,
        tuning: &Tuning,
        events: &mut Vec<GameEvent>,
    ) -> bool {
        let dt = now_ms.saturating_sub(self.last_move_ms) as f64 / 1000.0;

        self.pos.x += self.vel.x * dt;
        self.pos.y += tuning.gravity * dt * dt + self.vel.y * dt;
        self.vel.y += tuning.gravity * dt;

        self.update_rotation(now_ms, dt, tuning);
        self.shift_collider();

        if self.alive && pipes.iter().any(|pipe| self.collides_with(pipe)) {
            self.alive = false;
            events.push(GameEvent::Hit);
            events.push(GameEvent::Die);
        }

        // Ceiling is solid, floor is lethal
        if self.pos.y < 0.0 {
            self.pos.y = 0.0;
        }
        if self.pos.y + tuning.player_height as f64 > tuning.screen_height as f64 && self.alive {
            self.alive = false;
            events.push(GameEvent::Die);
        }

        self.shift_collider();
        self.last_move_ms = now_ms;

        let score = current_score(self.pos.x, pipes);
        if score > self.score {
            events.push(GameEvent::Point);
        }
        self.score = score;

        self.frame = WingFrame::from_elapsed(
            now_ms.saturating_sub(self.last_flap_ms),
            tuning.frame_duration_ms,
        );

        self.alive
    }

    fn update_rotation(&mut self, now_ms: u64, dt: f64, tuning: &Tuning) {
        if now_ms.saturating_sub(self.last_flap_ms) > tuning.flap_air_time_ms {
            self.rotation += self.rotation_speed * dt;
        }

        if self.rotation < tuning.rotation_after_flap {
            self.rotation = tuning.rotation_after_flap;
            self.rotation_speed = 0.0;
        }
        if self.rotation > tuning.max_rotation {
            self.rotation = tuning.max_rotation;
        }

        self.rotation_speed += tuning.rotation_speed * dt;
    }

    fn shift_collider(&mut self) {
        self.collider.x = self.pos.x as i32;
        self.collider.y = self.pos.y as i32;
    }
}
