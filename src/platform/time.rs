//! Game time
//!
//! The simulation consumes millisecond timestamps from a pausable timer so
//! that time spent paused never reaches the physics step.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// A monotonic millisecond source
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Wall-clock time since construction
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

/// Pausable stopwatch over a [`Clock`]
#[derive(Debug, Clone)]
pub struct Timer<C: Clock> {
    clock: C,
    started: bool,
    paused: bool,
    /// Clock reading when the timer (virtually) started
    start_ms: u64,
    /// Elapsed time frozen at the moment of pausing
    paused_ms: u64,
}

impl<C: Clock> Timer<C> {
    /// A stopped timer
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            started: false,
            paused: false,
            start_ms: 0,
            paused_ms: 0,
        }
    }

    pub fn start(&mut self) {
        if !self.started {
            self.start_ms = self.clock.now_ms();
            self.started = true;
        }
    }

    pub fn stop(&mut self) {
        self.started = false;
        self.paused = false;
        self.start_ms = 0;
        self.paused_ms = 0;
    }

    pub fn pause(&mut self) {
        if self.started && !self.paused {
            self.paused_ms = self.clock.now_ms().saturating_sub(self.start_ms);
            self.start_ms = 0;
            self.paused = true;
        }
    }

    pub fn unpause(&mut self) {
        if self.started && self.paused {
            self.start_ms = self.clock.now_ms().saturating_sub(self.paused_ms);
            self.paused_ms = 0;
            self.paused = false;
        }
    }

    /// Stop and start again from zero
    pub fn reset(&mut self) {
        self.stop();
        self.start();
    }

    pub fn elapsed_ms(&self) -> u64 {
        match (self.started, self.paused) {
            (false, _) => 0,
            (true, true) => self.paused_ms,
            (true, false) => self.clock.now_ms().saturating_sub(self.start_ms),
        }
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }
}
