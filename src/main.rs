//! Flappy Clone entry point
//!
//! Sets up logging, settings and the terminal, then runs the game loop.

use std::io::{Stdout, Write, stdout};
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{event, terminal};

use flappy_clone::audio::AudioManager;
use flappy_clone::platform::{SystemClock, TerminalGuard, map_event};
use flappy_clone::renderer::Renderer;
use flappy_clone::settings::SETTINGS_FILE;
use flappy_clone::{Control, Game, HighScoreFile, Result, ScoreTracker, Settings};

fn main() {
    env_logger::init();
    log::info!("Flappy Clone starting...");

    if let Err(e) = run() {
        log::error!("Startup failed: {}", e);
        eprintln!("flappy-clone: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let settings = Settings::load(Path::new(SETTINGS_FILE));
    let tuning = settings.tuning()?;
    let scores = ScoreTracker::open(HighScoreFile::new(&settings.highscore_path));

    // Build the game before touching the terminal so config errors print cleanly
    let mut game = Game::new(tuning, settings.seed, SystemClock::new(), scores)?;

    let mut out = stdout();
    let result = {
        let _term = TerminalGuard::enter(stdout())?;
        game_loop(&mut game, &settings, &mut out)
    };

    log::info!("Best score: {}", game.best_score());
    result
}

fn game_loop(game: &mut Game<SystemClock>, settings: &Settings, out: &mut Stdout) -> Result<()> {
    let (cols, rows) = terminal::size()?;
    let tuning = game.tuning();
    let mut renderer = Renderer::new(cols, rows, tuning.screen_width, tuning.screen_height);
    let mut audio = AudioManager::open(!settings.sound);
    let frame_dur = Duration::from_millis(settings.frame_ms.max(1));

    loop {
        let frame_start = Instant::now();

        renderer.draw(game);
        renderer.present(out)?;

        // Title and game-over screens wait for a key; gameplay only polls
        let mut pending = Vec::new();
        if game.wants_blocking_input() {
            pending.push(event::read()?);
        } else {
            while event::poll(Duration::ZERO)? {
                pending.push(event::read()?);
            }
        }

        for ev in &pending {
            if let event::Event::Resize(c, r) = *ev {
                renderer.resize(c, r);
            }
            if let Some(input) = map_event(ev) {
                if game.handle_input(input) == Control::Quit {
                    return Ok(());
                }
            }
        }

        game.update();
        audio.play_events(game.drain_events());
        out.flush()?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_dur {
            thread::sleep(frame_dur - elapsed);
        }
    }
}
