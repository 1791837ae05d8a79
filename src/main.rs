//! Terminal Castle Drop runner.
//!
//! Owns the clock and the terminal: renders snapshots, forwards key presses
//! to the engine, ticks it on the level-derived interval, and pushes finished
//! scores into the high-score store.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event};

use castle_drop::core::Game;
use castle_drop::input::{map_key, UiAction};
use castle_drop::scores::{JsonScoreStore, ScoreStore};
use castle_drop::term::{GameView, Hud, TerminalRenderer, Viewport};
use castle_drop::types::GamePhase;

/// Poll interval while no game is running.
const IDLE_POLL_MS: u64 = 250;

const DEFAULT_SCORE_FILE: &str = "castle-drop-scores.json";

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let score_path = std::env::var("CASTLE_DROP_SCORES")
        .unwrap_or_else(|_| DEFAULT_SCORE_FILE.to_string());
    let mut store = JsonScoreStore::new(score_path);

    let mut game = Game::new(time_seed());
    let view = GameView::default();

    let mut high_scores = Vec::new();
    let mut notice = refresh_scores(&store, &mut high_scores);

    let mut last_tick = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let hud = Hud {
            high_scores: &high_scores,
            notice: notice.as_deref(),
        };
        let fb = view.render(&game.snapshot(), hud, Viewport::new(w, h));
        term.draw(&fb)?;

        // Input with timeout until the next tick.
        let tick_duration = if game.phase() == GamePhase::Running {
            Duration::from_millis(game.tick_interval_ms() as u64)
        } else {
            Duration::from_millis(IDLE_POLL_MS)
        };
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                match map_key(&key) {
                    Some(UiAction::Quit) => return Ok(()),
                    Some(UiAction::Start) => {
                        if game.phase() != GamePhase::Running {
                            // Restart the clock so the old countdown cannot
                            // tick the fresh board early.
                            last_tick = Instant::now();
                            game.start();
                        }
                    }
                    Some(UiAction::Command(command)) => {
                        game.handle_command(command);
                    }
                    None => {}
                }
            }
        }

        // Tick.
        if game.phase() == GamePhase::Running && last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            game.tick();

            if let Some(event) = game.take_lock_event() {
                if event.game_over {
                    // A store failure is surfaced in the HUD; the game result
                    // itself is never affected.
                    notice = match store.save_score(game.score()) {
                        Ok(()) => refresh_scores(&store, &mut high_scores),
                        Err(err) => Some(format!("score save failed: {err:#}")),
                    };
                }
            }
        }
    }
}

fn refresh_scores(store: &JsonScoreStore, high_scores: &mut Vec<u32>) -> Option<String> {
    match store.scores() {
        Ok(scores) => {
            *high_scores = scores;
            None
        }
        Err(err) => Some(format!("score load failed: {err:#}")),
    }
}

fn time_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(1)
}
