//! Best-score tracking
//!
//! The best score lives in a plain text file holding one decimal integer.
//! It is read once at startup and overwritten when a run ends with a new best.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::sim::Player;

/// The on-disk highscore file
#[derive(Debug, Clone)]
pub struct HighScoreFile {
    path: PathBuf,
}

impl HighScoreFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored best score. Missing or unparseable files read as 0.
    pub fn load(&self) -> u32 {
        match fs::read_to_string(&self.path) {
            Ok(text) => text.trim().parse().unwrap_or_else(|_| {
                log::warn!("Ignoring malformed highscore file {}", self.path.display());
                0
            }),
            Err(_) => {
                log::info!("No highscore found, starting fresh");
                0
            }
        }
    }

    /// Overwrite the file with `score`
    pub fn save(&self, score: u32) -> io::Result<()> {
        fs::write(&self.path, score.to_string())
    }
}

/// Current and best score for a session
#[derive(Debug, Clone)]
pub struct ScoreTracker {
    current: u32,
    max: u32,
    file: Option<HighScoreFile>,
}

impl ScoreTracker {
    /// Tracker backed by a highscore file
    pub fn open(file: HighScoreFile) -> Self {
        let max = file.load();
        log::info!("Best score: {}", max);
        Self {
            current: 0,
            max,
            file: Some(file),
        }
    }

    /// Tracker that never touches the disk
    pub fn in_memory(max: u32) -> Self {
        Self {
            current: 0,
            max,
            file: None,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    /// Start counting a new run from zero. The best score carries over.
    pub fn reset(&mut self) {
        self.current = 0;
    }

    /// Sync with the player after a move.
    ///
    /// Records a new best once the player is dead; returns it if one was set.
    pub fn update(&mut self, player: &Player) -> Option<u32> {
        self.current = player.score();
        if player.is_alive() || self.current <= self.max {
            return None;
        }

        self.max = self.current;
        log::info!("New best score: {}", self.max);
        if let Some(file) = &self.file {
            if let Err(e) = file.save(self.max) {
                log::warn!("Could not save highscore to {}: {}", file.path().display(), e);
            }
        }
        Some(self.max)
    }
}
