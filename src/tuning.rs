//! Data-driven game balance
//!
//! Every dimension, speed and spacing in the game scales off a single base
//! unit (the length of the bird sprite). The values are computed once at
//! startup and handed to every component by reference.

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

/// Default base unit in pixels
pub const DEFAULT_UNIT: i32 = 68;

/// Largest base unit whose derived world still fits in `i32` pixels
pub const MAX_UNIT: i32 = 4096;

/// Immutable game configuration derived from the base unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    /// Base unit (bird length, px)
    pub unit: i32,

    // === World ===
    pub screen_width: i32,
    pub screen_height: i32,
    /// Horizontal scroll speed (px/s)
    pub camera_velocity: f64,
    /// Downward acceleration (px/s²)
    pub gravity: f64,

    // === Player ===
    pub player_width: i32,
    pub player_height: i32,
    /// Upward velocity applied by a flap (px/s)
    pub flap_height: f64,
    /// Rate at which the nose-dive rotation speeds up (deg/s²)
    pub rotation_speed: f64,
    /// Rotation speed right after a flap (deg/s)
    pub flap_rotation_speed: f64,
    /// Angle the bird snaps to on a flap (deg)
    pub rotation_after_flap: f64,
    /// Steepest nose-down angle (deg)
    pub max_rotation: f64,
    /// Duration of one wing animation frame (ms)
    pub frame_duration_ms: u64,
    /// Time after a flap before the bird starts to tilt down (ms)
    pub flap_air_time_ms: u64,
    /// Distance between the left edge of the camera and the player
    pub player_camera_offset: i32,

    // === Level ===
    pub num_obstacles: usize,
    /// Width of one ground block (and of a pipe)
    pub block_width: i32,
    /// Vertical gap between the top and bottom pipe
    pub pipe_gap: i32,
    pub pipe_min_height: i32,
    pub pipe_max_height: i32,
    /// Empty "warmup" distance before the first pipe
    pub starting_offset: i32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self::from_unit(DEFAULT_UNIT)
    }
}

impl Tuning {
    /// Derive every value from the base unit
    ///
    /// Out-of-range units saturate instead of overflowing; [`Tuning::validate`]
    /// rejects them.
    pub fn from_unit(unit: i32) -> Self {
        let screen_height = unit.saturating_mul(11);
        let pipe_gap = (unit as f64 * 2.5) as i32;
        let frame_duration_ms = 60;

        Self {
            unit,
            screen_width: unit.saturating_mul(7),
            screen_height,
            camera_velocity: unit as f64 * 2.0,
            gravity: 10.5 * unit as f64,

            player_width: unit,
            player_height: unit.saturating_mul(24) / 34,
            flap_height: (unit as f64 * 4.35) as i32 as f64,
            rotation_speed: 500.0,
            flap_rotation_speed: -500.0,
            rotation_after_flap: -22.0,
            max_rotation: 90.0,
            frame_duration_ms,
            flap_air_time_ms: frame_duration_ms * 8,
            player_camera_offset: unit.saturating_mul(2),

            num_obstacles: 1024,
            block_width: unit,
            pipe_gap,
            pipe_min_height: unit,
            pipe_max_height: screen_height / 2 - pipe_gap / 2,
            starting_offset: unit.saturating_mul(15),
        }
    }

    /// Derive and validate, for units read from user settings
    pub fn try_from_unit(unit: i32) -> Result<Self> {
        let tuning = Self::from_unit(unit);
        tuning.validate()?;
        Ok(tuning)
    }

    /// Horizontal distance between consecutive pipes
    #[inline]
    pub fn pipe_stride(&self) -> i32 {
        self.block_width.saturating_mul(3)
    }

    /// Right edge of the last pipe, if the level fits in `i32` pixels
    fn level_extent(&self) -> Option<i32> {
        let pipes = i32::try_from(self.num_obstacles).ok()?;
        pipes
            .checked_mul(self.block_width.checked_mul(3)?)?
            .checked_add(self.starting_offset)?
            .checked_add(self.block_width)
    }

    /// Reject configurations the level generator or the player cannot work with
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_UNIT).contains(&self.unit) {
            return Err(GameError::InvalidTuning(format!(
                "base unit must be in 1..={}, got {}",
                MAX_UNIT, self.unit
            )));
        }
        if self.pipe_min_height > self.pipe_max_height {
            return Err(GameError::InvalidTuning(format!(
                "pipe height range is empty ({}..={})",
                self.pipe_min_height, self.pipe_max_height
            )));
        }
        if self.num_obstacles == 0 {
            return Err(GameError::InvalidTuning(
                "level must contain at least one obstacle".to_string(),
            ));
        }
        if self.level_extent().is_none() {
            return Err(GameError::InvalidTuning(format!(
                "{} pipes of width {} do not fit in the world",
                self.num_obstacles, self.block_width
            )));
        }
        if self.screen_height.checked_add(self.pipe_gap).is_none() {
            return Err(GameError::InvalidTuning(format!(
                "screen height {} is too large",
                self.screen_height
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let t = Tuning::default();
        assert_eq!(t.screen_width, 476);
        assert_eq!(t.screen_height, 748);
        assert_eq!(t.player_height, 48);
        assert_eq!(t.flap_height, 295.0);
        assert_eq!(t.pipe_gap, 170);
        assert_eq!(t.pipe_max_height, 289);
        assert_eq!(t.starting_offset, 1020);
        assert_eq!(t.flap_air_time_ms, 480);
        assert_eq!(t.pipe_stride(), 204);
        assert!(t.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_units() {
        assert!(Tuning::from_unit(0).validate().is_err());

        let mut t = Tuning::default();
        t.pipe_min_height = t.pipe_max_height + 1;
        assert!(matches!(t.validate(), Err(GameError::InvalidTuning(_))));

        let mut t = Tuning::default();
        t.num_obstacles = 0;
        assert!(t.validate().is_err());
    }

    #[test]
    fn test_oversized_unit_is_rejected() {
        // Large enough to overflow the level or the screen size
        for unit in [1_000_000, 300_000_000, i32::MAX] {
            let t = Tuning::from_unit(unit);
            assert!(matches!(t.validate(), Err(GameError::InvalidTuning(_))), "unit {unit}");
            assert!(Tuning::try_from_unit(unit).is_err());
        }
        assert!(Tuning::try_from_unit(MAX_UNIT).is_ok());
        assert!(Tuning::try_from_unit(-5).is_err());
    }

    #[test]
    fn test_level_must_fit_in_world() {
        let mut t = Tuning::default();
        t.num_obstacles = 20_000_000;
        assert!(matches!(t.validate(), Err(GameError::InvalidTuning(_))));

        let mut t = Tuning::default();
        t.block_width = i32::MAX / 2;
        assert!(t.validate().is_err());
    }
}
