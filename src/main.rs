//! Emoji Match Demo
//!
//! Spawns a session and plays the full level progression through it with
//! a scripted perfect player, logging every milestone. The player knows
//! the boards by mirroring the session's deterministic seed, so the demo
//! exercises the real async path: the reveal delay between a completed
//! pair and its resolution, and the display timer ticks. Pass a path to
//! a JSON level file as the first argument to play a custom sequence.

use std::fs;

use anyhow::Context;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use emoji_match::game::engine::{new_game, resolve, select};
use emoji_match::game::events::GameEvent;
use emoji_match::game::level::LevelSequence;
use emoji_match::game::state::GameState;
use emoji_match::session::{self, SessionConfig, SessionEvent};
use emoji_match::{GamePhase, REVEAL_DELAY_MS, VERSION};

/// Seed for the demo session; fixed so demo runs are reproducible.
const DEMO_SEED: u64 = 12345;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Emoji Match Engine v{}", VERSION);
    info!("Reveal delay: {} ms", REVEAL_DELAY_MS);

    let levels = match std::env::args().nth(1) {
        Some(path) => {
            let json = fs::read_to_string(&path)
                .with_context(|| format!("reading level file {path}"))?;
            let levels = LevelSequence::from_json_str(&json)
                .with_context(|| format!("parsing level file {path}"))?;
            info!("Loaded {} levels from {}", levels.len(), path);
            levels
        }
        None => LevelSequence::standard(),
    };

    demo_game(levels).await
}

/// Play every level through a spawned session with perfect recall.
async fn demo_game(levels: LevelSequence) -> anyhow::Result<()> {
    info!("=== Starting Demo Game ===");
    info!("Session seed: {}", DEMO_SEED);

    let config = SessionConfig {
        levels: levels.clone(),
        ..SessionConfig::default()
    };
    let (handle, mut events) = session::spawn(config, DEMO_SEED);
    info!("Session {} spawned", handle.id());

    // The session's boards are reproducible from the shared seed, so the
    // player keeps a mirror and always selects a known pair.
    let (mut mirror, _) = new_game(&levels, DEMO_SEED);

    while mirror.phase == GamePhase::Playing {
        let (i, j) = next_pair(&mirror);
        select(&mut mirror, &levels, i);
        select(&mut mirror, &levels, j);
        resolve(&mut mirror, &levels, 0, 0);

        handle.select(i).await?;
        handle.select(j).await?;

        // Wait out the reveal delay: the pair has resolved once it scores
        loop {
            let event = events
                .recv()
                .await
                .context("session ended before the game completed")?;
            let scored = matches!(
                event,
                SessionEvent::Game(GameEvent::ScoreChanged { .. })
            );
            log_event(&event);
            if scored {
                break;
            }
        }
    }

    // Completion events arrive, then the session closes its channel
    while let Some(event) = events.recv().await {
        log_event(&event);
    }
    Ok(())
}

/// Find two concealed tiles holding the same symbol.
fn next_pair(state: &GameState) -> (usize, usize) {
    let down = state.board.face_down_indices();
    for (pos, &i) in down.iter().enumerate() {
        for &j in &down[pos + 1..] {
            if state.board.tiles()[i].symbol == state.board.tiles()[j].symbol {
                return (i, j);
            }
        }
    }
    unreachable!("a playing board always holds at least one concealed pair");
}

fn log_event(event: &SessionEvent) {
    match event {
        SessionEvent::TimerTick { seconds } => {
            debug!("{}s elapsed", seconds);
        }
        SessionEvent::Game(GameEvent::LevelLoaded { level, side }) => {
            info!("Level {} loaded: {}x{} board", level, side, side);
        }
        SessionEvent::Game(GameEvent::LevelComplete {
            level,
            level_moves,
            level_seconds,
            score,
        }) => {
            info!(
                "Level {} complete: {} moves, {}s, score {}",
                level, level_moves, level_seconds, score
            );
        }
        SessionEvent::Game(GameEvent::GameComplete {
            total_moves,
            total_score,
            total_seconds,
        }) => {
            info!(
                "All levels complete! {} moves, {} points, {}s",
                total_moves, total_score, total_seconds
            );
        }
        SessionEvent::Game(_) => {}
    }
}
