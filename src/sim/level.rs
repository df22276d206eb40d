//! Pipes and procedural level generation
//!
//! A level is a fixed-length run of gap obstacles spaced evenly along the
//! x axis. Heights are drawn from a seeded PCG so a seed fully determines the
//! level.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::state::Camera;
use crate::tuning::Tuning;

/// A gap obstacle: one rectangle above the gap, one below
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pipe {
    top: Rect,
    bottom: Rect,
}

impl Pipe {
    /// Build a pipe from its top rectangle; the bottom one fills the rest of
    /// the screen below the gap.
    pub fn new(x: i32, y: i32, w: i32, h: i32, tuning: &Tuning) -> Self {
        let top = Rect::new(x, y, w, h);
        let bottom_y = top.bottom() + tuning.pipe_gap;
        let bottom = Rect::new(x, bottom_y, w, tuning.screen_height - bottom_y);
        Self { top, bottom }
    }

    #[inline]
    pub fn top(&self) -> Rect {
        self.top
    }

    #[inline]
    pub fn bottom(&self) -> Rect {
        self.bottom
    }

    /// Horizontal start of the pipe
    #[inline]
    pub fn x(&self) -> i32 {
        self.top.x
    }

    /// Whether any part of the pipe falls inside the camera's horizontal span
    pub fn is_visible(&self, camera: &Camera) -> bool {
        self.top.x >= camera.x - self.top.w && self.top.x <= camera.x + camera.w
    }
}

/// An ordered run of pipes, left to right
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    seed: u64,
    pipes: Vec<Pipe>,
}

impl Level {
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn pipes(&self) -> &[Pipe] {
        &self.pipes
    }

    pub fn len(&self) -> usize {
        self.pipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pipes.is_empty()
    }

    /// Pipes overlapping the camera, in order
    pub fn visible<'a>(&'a self, camera: &'a Camera) -> impl Iterator<Item = &'a Pipe> + 'a {
        self.pipes.iter().filter(move |p| p.is_visible(camera))
    }
}

/// Generate a level. `None` seeds from the wall clock for normal play.
pub fn generate(tuning: &Tuning, seed: Option<u64>) -> Level {
    let seed = seed.unwrap_or_else(time_seed);
    let mut rng = Pcg32::seed_from_u64(seed);

    let mut pipes = Vec::with_capacity(tuning.num_obstacles);
    let mut x = tuning.starting_offset;
    for _ in 0..tuning.num_obstacles {
        let height = rng.random_range(tuning.pipe_min_height..=tuning.pipe_max_height);
        pipes.push(Pipe::new(x, 0, tuning.block_width, height, tuning));
        x += tuning.pipe_stride();
    }

    log::debug!("Generated level: {} pipes, seed {}", pipes.len(), seed);
    Level { seed, pipes }
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
