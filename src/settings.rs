//! Game settings and preferences
//!
//! Persisted as JSON next to the executable's working directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::tuning::{DEFAULT_UNIT, Tuning};

/// Default settings file name
pub const SETTINGS_FILE: &str = "flappy.json";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base unit every dimension scales off
    pub unit: i32,
    /// Fixed level seed (random per run when absent)
    pub seed: Option<u64>,
    /// Play sound cues
    pub sound: bool,
    /// Where the best score is kept
    pub highscore_path: PathBuf,
    /// Target frame duration in milliseconds
    pub frame_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            unit: DEFAULT_UNIT,
            seed: None,
            sound: true,
            highscore_path: PathBuf::from("highscore.hs"),
            frame_ms: 16,
        }
    }
}

impl Settings {
    /// Tuning derived from the configured base unit
    pub fn tuning(&self) -> Result<Tuning> {
        Tuning::try_from_unit(self.unit)
    }

    /// Load settings, falling back to defaults when the file is missing or malformed
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GameError;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join("nope.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);

        let settings = Settings {
            seed: Some(7),
            sound: false,
            ..Default::default()
        };
        settings.save(&path).unwrap();

        assert_eq!(Settings::load(&path), settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, r#"{ "unit": 34 }"#).unwrap();

        let settings = Settings::load(&path);
        assert_eq!(settings.unit, 34);
        assert!(settings.sound);
        assert_eq!(settings.tuning().unwrap().screen_height, 374);
    }

    #[test]
    fn test_malformed_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, "not json").unwrap();
        assert_eq!(Settings::load(&path), Settings::default());
    }

    #[test]
    fn test_huge_unit_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, r#"{ "unit": 300000000 }"#).unwrap();

        let settings = Settings::load(&path);
        assert!(matches!(settings.tuning(), Err(GameError::InvalidTuning(_))));
    }
}
