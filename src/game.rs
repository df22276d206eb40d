//! Session orchestration
//!
//! Owns the level, the player, the camera, the timer and the score tracker,
//! and runs the session state machine:
//!
//! ```text
//! NotStarted --flap--> Playing <--pause--> Paused
//!                         |
//!                       death
//!                         v
//!                       Dead --flap/restart--> Playing (fresh level + player)
//! ```
//!
//! Quit is accepted in every phase. In `Dead`, the pause key quits as well.

use std::vec::Drain;

use crate::error::{GameError, Result};
use crate::highscores::ScoreTracker;
use crate::platform::{Clock, InputEvent, Timer};
use crate::sim::{Camera, GameEvent, GamePhase, Level, Pipe, Player, generate};
use crate::tuning::Tuning;

/// What the frontend should do after handling an input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// A running game session
pub struct Game<C: Clock> {
    tuning: Tuning,
    /// Fixed level seed; a fresh random level per run when `None`
    seed: Option<u64>,
    phase: GamePhase,
    level: Level,
    player: Player,
    camera: Camera,
    timer: Timer<C>,
    scores: ScoreTracker,
    /// Cues not yet picked up by the frontend
    events: Vec<GameEvent>,
}

impl<C: Clock> Game<C> {
    /// Set up a session on the title screen
    pub fn new(tuning: Tuning, seed: Option<u64>, clock: C, scores: ScoreTracker) -> Result<Self> {
        tuning.validate()?;

        let level = generate(&tuning, seed);
        if level.is_empty() {
            return Err(GameError::EmptyLevel);
        }
        log::info!("Created level with {} pipes (seed {})", level.len(), level.seed());

        // The clock runs from construction but stays frozen until the first flap
        let mut timer = Timer::new(clock);
        timer.start();
        timer.pause();

        let player = Player::new(&tuning, timer.elapsed_ms());
        let camera = Camera::new(&tuning);

        Ok(Self {
            tuning,
            seed,
            phase: GamePhase::NotStarted,
            level,
            player,
            camera,
            timer,
            scores,
            events: Vec::new(),
        })
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn score(&self) -> u32 {
        self.scores.current()
    }

    pub fn best_score(&self) -> u32 {
        self.scores.max()
    }

    /// Game time in milliseconds (frozen while paused)
    pub fn elapsed_ms(&self) -> u64 {
        self.timer.elapsed_ms()
    }

    /// Pipes currently in view
    pub fn visible_pipes(&self) -> impl Iterator<Item = &Pipe> + '_ {
        self.level.visible(&self.camera)
    }

    /// Nothing advances on the title and game-over screens, so the frontend
    /// can block until the next input arrives.
    pub fn wants_blocking_input(&self) -> bool {
        matches!(self.phase, GamePhase::NotStarted | GamePhase::Dead)
    }

    /// Take the cues produced since the last call
    pub fn drain_events(&mut self) -> Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    /// Apply one input command
    pub fn handle_input(&mut self, input: InputEvent) -> Control {
        match (self.phase, input) {
            (_, InputEvent::Quit) => return Control::Quit,

            (GamePhase::NotStarted, InputEvent::Flap) => self.start(),

            (GamePhase::Playing, InputEvent::PauseToggle) => self.pause(),
            (GamePhase::Paused, InputEvent::PauseToggle) => self.unpause(),
            (GamePhase::Playing, InputEvent::Flap) if self.player.is_alive() => {
                let now = self.timer.elapsed_ms();
                self.player.flap(now, &self.tuning, &mut self.events);
            }

            (GamePhase::Dead, InputEvent::Flap | InputEvent::Restart) => self.restart(),
            (GamePhase::Dead, InputEvent::PauseToggle) => return Control::Quit,

            _ => {}
        }
        Control::Continue
    }

    /// Advance one frame: move the player, follow with the camera, keep score
    pub fn update(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }

        let now = self.timer.elapsed_ms();
        let alive = self
            .player
            .update(self.level.pipes(), now, &self.tuning, &mut self.events);
        self.camera.follow(&self.player.collider(), &self.tuning);

        if let Some(best) = self.scores.update(&self.player) {
            self.events.push(GameEvent::NewHighScore(best));
        }

        if !alive {
            log::info!(
                "Player died at {} ms with score {} (best {})",
                now,
                self.scores.current(),
                self.scores.max()
            );
            self.set_phase(GamePhase::Dead);
        }
    }

    fn start(&mut self) {
        self.timer.unpause();
        log::info!("Game started");
        self.set_phase(GamePhase::Playing);
    }

    fn pause(&mut self) {
        self.timer.pause();
        self.set_phase(GamePhase::Paused);
    }

    fn unpause(&mut self) {
        self.timer.unpause();
        self.set_phase(GamePhase::Playing);
    }

    /// Replace the level, player and camera and restart the clock
    fn restart(&mut self) {
        self.level = generate(&self.tuning, self.seed);
        self.timer.reset();
        self.player = Player::new(&self.tuning, self.timer.elapsed_ms());
        self.camera = Camera::new(&self.tuning);
        self.scores.reset();
        log::info!("Restarted with level seed {}", self.level.seed());
        self.set_phase(GamePhase::Playing);
    }

    fn set_phase(&mut self, phase: GamePhase) {
        log::debug!("Phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::ManualClock;

    const TICK_MS: u64 = 16;
    const SEED: u64 = 2024;

    fn new_game(tuning: Tuning) -> (Game<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let game = Game::new(tuning, Some(SEED), clock.clone(), ScoreTracker::in_memory(0)).unwrap();
        (game, clock)
    }

    fn started_game() -> (Game<ManualClock>, ManualClock) {
        let (mut game, clock) = new_game(Tuning::default());
        assert_eq!(game.handle_input(InputEvent::Flap), Control::Continue);
        assert_eq!(game.phase(), GamePhase::Playing);
        (game, clock)
    }

    #[test]
    fn test_waits_on_title_screen() {
        let (mut game, clock) = new_game(Tuning::default());
        assert_eq!(game.phase(), GamePhase::NotStarted);
        assert!(game.wants_blocking_input());

        let spawn = game.player().pos();
        clock.advance(1000);
        game.update();
        assert_eq!(game.player().pos(), spawn);
        assert_eq!(game.elapsed_ms(), 0);

        // Only a flap starts the game
        game.handle_input(InputEvent::PauseToggle);
        game.handle_input(InputEvent::Restart);
        assert_eq!(game.phase(), GamePhase::NotStarted);

        game.handle_input(InputEvent::Flap);
        assert_eq!(game.phase(), GamePhase::Playing);
        assert!(!game.wants_blocking_input());
        // Starting does not flap
        assert_eq!(game.drain_events().count(), 0);
    }

    #[test]
    fn test_quit_from_any_phase() {
        let (mut game, _clock) = new_game(Tuning::default());
        assert_eq!(game.handle_input(InputEvent::Quit), Control::Quit);

        let (mut game, _clock) = started_game();
        assert_eq!(game.handle_input(InputEvent::Quit), Control::Quit);
        game.handle_input(InputEvent::PauseToggle);
        assert_eq!(game.handle_input(InputEvent::Quit), Control::Quit);
    }

    #[test]
    fn test_invalid_tuning_is_fatal() {
        let clock = ManualClock::new();
        let result = Game::new(Tuning::from_unit(0), None, clock, ScoreTracker::in_memory(0));
        assert!(matches!(result, Err(GameError::InvalidTuning(_))));

        // Would overflow the pipe positions
        let clock = ManualClock::new();
        let result = Game::new(Tuning::from_unit(1_000_000), None, clock, ScoreTracker::in_memory(0));
        assert!(matches!(result, Err(GameError::InvalidTuning(_))));
    }

    #[test]
    fn test_camera_tracks_player() {
        let (mut game, clock) = started_game();
        for _ in 0..10 {
            clock.advance(TICK_MS);
            game.update();
            let collider = game.player().collider();
            assert_eq!(game.camera().x, collider.x - game.tuning().player_camera_offset);
            assert_eq!(game.camera().y, 0);
        }
        assert!(game.camera().x > 0);
    }

    #[test]
    fn test_pause_freezes_simulation() {
        let (mut game, clock) = started_game();
        clock.advance(TICK_MS);
        game.update();
        let before = game.player().pos();

        game.handle_input(InputEvent::PauseToggle);
        assert_eq!(game.phase(), GamePhase::Paused);
        assert!(!game.wants_blocking_input());

        // Flaps and frames while paused do nothing
        clock.advance(5000);
        game.handle_input(InputEvent::Flap);
        game.update();
        assert_eq!(game.player().pos(), before);
        assert_eq!(game.drain_events().count(), 0);

        game.handle_input(InputEvent::PauseToggle);
        assert_eq!(game.phase(), GamePhase::Playing);
        clock.advance(TICK_MS);
        game.update();

        // Only the 16 ms after unpausing count
        let dx = game.player().pos().x - before.x;
        assert!((dx - game.tuning().camera_velocity * 0.016).abs() < 1e-9);
    }

    #[test]
    fn test_flap_is_forwarded_while_playing() {
        let (mut game, clock) = started_game();
        clock.advance(TICK_MS);
        game.handle_input(InputEvent::Flap);
        assert_eq!(game.player().vel().y, -game.tuning().flap_height);
        assert_eq!(game.drain_events().collect::<Vec<_>>(), vec![GameEvent::Flap]);
    }

    #[test]
    fn test_falls_to_death_on_first_floor_crossing() {
        let (mut game, clock) = started_game();
        let floor = game.tuning().screen_height as f64;
        let height = game.tuning().player_height as f64;

        let mut ticks = 0;
        while game.phase() == GamePhase::Playing {
            clock.advance(TICK_MS);
            game.update();
            ticks += 1;

            let crossed = game.player().pos().y + height > floor;
            assert_eq!(game.player().is_alive(), !crossed, "tick {ticks}");
            assert!(ticks < 1000);
        }

        assert_eq!(game.phase(), GamePhase::Dead);
        assert!(game.wants_blocking_input());
        assert_eq!(game.drain_events().collect::<Vec<_>>(), vec![GameEvent::Die]);
        assert_eq!(game.best_score(), 0);

        // Nothing moves once dead
        let pos = game.player().pos();
        clock.advance(TICK_MS);
        game.update();
        assert_eq!(game.player().pos(), pos);
    }

    #[test]
    fn test_restart_after_death() {
        let (mut game, clock) = started_game();
        while game.phase() == GamePhase::Playing {
            clock.advance(TICK_MS);
            game.update();
        }
        let old_level = game.level().clone();

        game.handle_input(InputEvent::Restart);
        assert_eq!(game.phase(), GamePhase::Playing);
        assert!(game.player().is_alive());
        assert_eq!(game.player().pos(), Player::new(game.tuning(), 0).pos());
        assert_eq!(game.camera().x, 0);
        assert_eq!(game.elapsed_ms(), 0);
        assert_eq!(game.score(), 0);
        // Fixed seed regenerates the same layout
        assert_eq!(game.level(), &old_level);

        clock.advance(TICK_MS);
        game.update();
        assert!(game.player().pos().x > 136.0);
    }

    #[test]
    fn test_pause_key_quits_when_dead() {
        let (mut game, clock) = started_game();
        while game.phase() == GamePhase::Playing {
            clock.advance(TICK_MS);
            game.update();
        }
        assert_eq!(game.handle_input(InputEvent::PauseToggle), Control::Quit);
    }

    #[test]
    fn test_new_best_recorded_on_death() {
        // First pipe already behind the spawn column
        let tuning = Tuning {
            starting_offset: 0,
            ..Tuning::default()
        };
        let (mut game, clock) = new_game(tuning);
        game.handle_input(InputEvent::Flap);

        let mut events = Vec::new();
        while game.phase() == GamePhase::Playing {
            clock.advance(TICK_MS);
            game.update();
            events.extend(game.drain_events());
        }

        let best = game.best_score();
        assert!(best >= 1);
        assert_eq!(best, game.score());
        assert!(events.contains(&GameEvent::Point));
        assert_eq!(events.last(), Some(&GameEvent::NewHighScore(best)));
        assert_eq!(
            events.iter().filter(|e| matches!(e, GameEvent::NewHighScore(_))).count(),
            1
        );
    }

    #[test]
    fn test_visible_pipes_follow_camera() {
        let (mut game, clock) = started_game();
        assert_eq!(game.visible_pipes().count(), 0);

        // Fly until the first pipe scrolls into view, flapping to stay up
        for i in 0..400 {
            clock.advance(TICK_MS);
            if i % 20 == 0 {
                game.handle_input(InputEvent::Flap);
            }
            game.update();
            if game.visible_pipes().count() > 0 {
                break;
            }
        }
        let camera = *game.camera();
        assert!(game.visible_pipes().all(|p| p.is_visible(&camera)));
        assert!(game.visible_pipes().count() > 0);
    }
}
