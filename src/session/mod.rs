//! Session Controller
//!
//! Owns one [`GameState`] and drives it from a command channel on a single
//! tokio task. This is the only place wall-clock time exists: the 700ms
//! reveal delay, the per-level and per-session elapsed anchors, and the
//! 1-second display timer.
//!
//! The reveal delay is a deadline inside the task's `select!` loop, never
//! a blocking sleep: commands (notably restart) stay serviceable while a
//! comparison is pending, and clearing the deadline is all cancellation
//! takes. A cancelled resolution can therefore never fire against the
//! next board.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::time::{interval, sleep_until, Instant};
use tracing::{debug, info};
use uuid::Uuid;

use crate::game::engine;
use crate::game::events::GameEvent;
use crate::game::level::LevelSequence;
use crate::{REVEAL_DELAY_MS, TIMER_TICK_SECS};

/// Commands a presentation layer sends into a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// Select the tile at `index`.
    Select {
        /// Slot index of the tile.
        index: usize,
    },
    /// Reset to level 0, discarding any pending comparison.
    Restart,
    /// End the session. No further events are emitted.
    Quit,
}

/// Notifications a session emits toward the presentation layer.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    /// An engine event (tile flips, counters, completions).
    Game(GameEvent),
    /// Display timer: whole seconds since session start (or last restart).
    TimerTick {
        /// Elapsed whole seconds.
        seconds: u64,
    },
}

/// Session errors surfaced to callers of [`SessionHandle`].
#[derive(Debug, Error)]
pub enum SessionError {
    /// The session task has ended (quit, game complete, or receiver gone).
    #[error("session is closed")]
    Closed,
}

/// Configuration for a session.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// The level progression to play.
    pub levels: LevelSequence,
    /// Observation window between a completed pair and its resolution.
    pub reveal_delay: Duration,
    /// Cadence of the display timer.
    pub timer_tick: Duration,
    /// Capacity of the outbound event channel.
    pub event_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            levels: LevelSequence::standard(),
            reveal_delay: Duration::from_millis(REVEAL_DELAY_MS),
            timer_tick: Duration::from_secs(TIMER_TICK_SECS),
            event_capacity: 256,
        }
    }
}

/// Handle for driving a running session.
#[derive(Clone, Debug)]
pub struct SessionHandle {
    id: Uuid,
    commands: mpsc::Sender<Command>,
}

impl SessionHandle {
    /// Unique id of this session.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Send a raw command.
    pub async fn send(&self, command: Command) -> Result<(), SessionError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| SessionError::Closed)
    }

    /// Select the tile at `index`.
    pub async fn select(&self, index: usize) -> Result<(), SessionError> {
        self.send(Command::Select { index }).await
    }

    /// Restart from level 0.
    pub async fn restart(&self) -> Result<(), SessionError> {
        self.send(Command::Restart).await
    }

    /// End the session.
    pub async fn quit(&self) -> Result<(), SessionError> {
        self.send(Command::Quit).await
    }
}

/// Spawn a session task.
///
/// Returns the command handle and the event stream. The task ends when
/// `Quit` arrives, the game completes, the handle is dropped, or the
/// event receiver is dropped; the event channel closing is the
/// termination signal for consumers.
pub fn spawn(config: SessionConfig, session_seed: u64) -> (SessionHandle, mpsc::Receiver<SessionEvent>) {
    let id = Uuid::new_v4();
    let (command_tx, command_rx) = mpsc::channel(64);
    let (event_tx, event_rx) = mpsc::channel(config.event_capacity);

    tokio::spawn(run(id, config, session_seed, command_rx, event_tx));

    (
        SessionHandle {
            id,
            commands: command_tx,
        },
        event_rx,
    )
}

/// The session event loop.
async fn run(
    id: Uuid,
    config: SessionConfig,
    session_seed: u64,
    mut commands: mpsc::Receiver<Command>,
    events: mpsc::Sender<SessionEvent>,
) {
    info!(session = %id, seed = session_seed, "session started");

    let (mut state, initial) = engine::new_game(&config.levels, session_seed);
    if !forward(&events, initial).await {
        return;
    }

    let mut session_started = Instant::now();
    let mut level_started = session_started;
    // Deadline of the scheduled comparison, if one is pending
    let mut deadline: Option<Instant> = None;
    let mut ticker = interval(config.timer_tick);

    loop {
        tokio::select! {
            maybe_command = commands.recv() => {
                match maybe_command {
                    None | Some(Command::Quit) => {
                        info!(session = %id, "session quit");
                        break;
                    }
                    Some(Command::Select { index }) => {
                        let result = engine::select(&mut state, &config.levels, index);
                        if result.comparison_pending {
                            deadline = Some(Instant::now() + config.reveal_delay);
                        }
                        if !forward(&events, result.events).await {
                            break;
                        }
                    }
                    Some(Command::Restart) => {
                        // Discards any scheduled resolution with the old board
                        deadline = None;
                        let restart_events = engine::restart(&mut state, &config.levels);
                        session_started = Instant::now();
                        level_started = session_started;
                        ticker.reset();
                        debug!(session = %id, "session restarted");
                        if !forward(&events, restart_events).await {
                            break;
                        }
                    }
                }
            }

            _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                deadline = None;
                let result = engine::resolve(
                    &mut state,
                    &config.levels,
                    level_started.elapsed().as_secs(),
                    session_started.elapsed().as_secs(),
                );
                if result.level_complete {
                    level_started = Instant::now();
                }
                let game_complete = result.game_complete;
                if !forward(&events, result.events).await {
                    break;
                }
                if game_complete {
                    info!(session = %id, score = state.score, "game complete");
                    break;
                }
            }

            _ = ticker.tick() => {
                let tick = SessionEvent::TimerTick {
                    seconds: session_started.elapsed().as_secs(),
                };
                if events.send(tick).await.is_err() {
                    break;
                }
            }
        }
    }

    info!(session = %id, "session closed");
}

/// Forward engine events to the consumer. Returns false once the receiver
/// is gone.
async fn forward(events: &mpsc::Sender<SessionEvent>, batch: Vec<GameEvent>) -> bool {
    for event in batch {
        if events.send(SessionEvent::Game(event)).await.is_err() {
            return false;
        }
    }
    true
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::board::TileFace;
    use crate::game::level::LevelSpec;
    use crate::game::state::{GamePhase, GameState};
    use tokio::time::timeout;

    const SEED: u64 = 424242;

    fn test_config(reveal_delay_ms: u64) -> SessionConfig {
        SessionConfig {
            levels: LevelSequence::new(vec![
                LevelSpec::new(2, ["a", "b"]),
                LevelSpec::new(2, ["c", "d"]),
            ])
            .unwrap(),
            reveal_delay: Duration::from_millis(reveal_delay_ms),
            timer_tick: Duration::from_secs(60),
            event_capacity: 256,
        }
    }

    /// Mirror of the session's internal board, from the shared seed.
    fn mirror_state(config: &SessionConfig) -> GameState {
        let (state, _) = engine::new_game(&config.levels, SEED);
        state
    }

    fn matching_pair(state: &GameState) -> (usize, usize) {
        let tiles = state.board.tiles();
        for i in 0..tiles.len() {
            for j in i + 1..tiles.len() {
                if tiles[i].face == TileFace::Down
                    && tiles[j].face == TileFace::Down
                    && tiles[i].symbol == tiles[j].symbol
                {
                    return (i, j);
                }
            }
        }
        panic!("no pair available");
    }

    async fn next_game_event(rx: &mut mpsc::Receiver<SessionEvent>) -> GameEvent {
        loop {
            let event = timeout(Duration::from_secs(2), rx.recv())
                .await
                .expect("timed out waiting for session event")
                .expect("session closed unexpectedly");
            match event {
                SessionEvent::Game(event) => return event,
                SessionEvent::TimerTick { .. } => continue,
            }
        }
    }

    #[tokio::test]
    async fn test_reveal_is_immediate_and_match_is_delayed() {
        let config = test_config(20);
        let (handle, mut rx) = spawn(config.clone(), SEED);

        assert!(matches!(
            next_game_event(&mut rx).await,
            GameEvent::LevelLoaded { level: 1, side: 2 }
        ));

        let (i, j) = matching_pair(&mirror_state(&config));
        handle.select(i).await.unwrap();
        handle.select(j).await.unwrap();

        // Reveals and the move counter arrive ahead of the resolution
        assert!(matches!(
            next_game_event(&mut rx).await,
            GameEvent::TileRevealed { .. }
        ));
        assert!(matches!(
            next_game_event(&mut rx).await,
            GameEvent::TileRevealed { .. }
        ));
        assert_eq!(
            next_game_event(&mut rx).await,
            GameEvent::MovesChanged { moves: 1 }
        );
        assert!(matches!(
            next_game_event(&mut rx).await,
            GameEvent::TileMatched { .. }
        ));
        assert!(matches!(
            next_game_event(&mut rx).await,
            GameEvent::TileMatched { .. }
        ));
        assert_eq!(
            next_game_event(&mut rx).await,
            GameEvent::ScoreChanged { score: 10 }
        );

        handle.quit().await.unwrap();
    }

    #[tokio::test]
    async fn test_restart_cancels_pending_resolution() {
        // Long delay so restart lands well inside the window
        let config = test_config(300);
        let (handle, mut rx) = spawn(config.clone(), SEED);

        let (i, j) = matching_pair(&mirror_state(&config));
        handle.select(i).await.unwrap();
        handle.select(j).await.unwrap();
        handle.restart().await.unwrap();

        // Give a cancelled resolution ample time to (wrongly) fire
        tokio::time::sleep(Duration::from_millis(500)).await;

        let mut drained = Vec::new();
        while let Ok(event) = rx.try_recv() {
            drained.push(event);
        }

        let mut saw_restart = false;
        for event in &drained {
            if let SessionEvent::Game(game_event) = event {
                assert!(
                    !matches!(
                        game_event,
                        GameEvent::TileMatched { .. } | GameEvent::TileHidden { .. }
                    ),
                    "stale resolution fired after restart: {game_event:?}"
                );
                if matches!(game_event, GameEvent::ScoreChanged { score: 0 }) {
                    saw_restart = true;
                }
            }
        }
        assert!(saw_restart, "restart events missing: {drained:?}");

        // The new board accepts selections normally
        handle.select(0).await.unwrap();
        handle.quit().await.unwrap();
    }

    #[tokio::test]
    async fn test_quit_closes_event_channel() {
        let config = test_config(20);
        let (handle, mut rx) = spawn(config, SEED);

        next_game_event(&mut rx).await; // LevelLoaded
        handle.quit().await.unwrap();

        // Drain until the channel closes
        let closed = timeout(Duration::from_secs(2), async {
            while rx.recv().await.is_some() {}
        })
        .await;
        assert!(closed.is_ok());

        // Further commands fail
        assert!(matches!(
            handle.select(0).await,
            Err(SessionError::Closed)
        ));
    }

    #[tokio::test]
    async fn test_game_complete_terminates_session() {
        let config = test_config(5);
        let (handle, mut rx) = spawn(config.clone(), SEED);

        // Play both levels with perfect memory, mirroring the boards
        let mut mirror = mirror_state(&config);
        while mirror.phase == GamePhase::Playing {
            let (i, j) = matching_pair(&mirror);
            engine::select(&mut mirror, &config.levels, i);
            engine::select(&mut mirror, &config.levels, j);
            engine::resolve(&mut mirror, &config.levels, 0, 0);

            handle.select(i).await.unwrap();
            handle.select(j).await.unwrap();

            // Wait until this pair's resolution scored
            while !matches!(
                next_game_event(&mut rx).await,
                GameEvent::ScoreChanged { .. }
            ) {}
        }

        // The final events arrive, then the session task ends
        let mut saw_game_complete = false;
        let drained = timeout(Duration::from_secs(2), async {
            while let Some(event) = rx.recv().await {
                if let SessionEvent::Game(GameEvent::GameComplete {
                    total_moves,
                    total_score,
                    ..
                }) = event
                {
                    assert_eq!(total_moves, 4);
                    assert_eq!(total_score, 40);
                    saw_game_complete = true;
                }
            }
        })
        .await;
        assert!(drained.is_ok());
        assert!(saw_game_complete);
    }

    #[tokio::test]
    async fn test_timer_ticks_flow() {
        let config = SessionConfig {
            timer_tick: Duration::from_millis(10),
            ..test_config(20)
        };
        let (handle, mut rx) = spawn(config, SEED);

        let mut ticks = 0;
        let deadline = Instant::now() + Duration::from_millis(500);
        while ticks < 3 && Instant::now() < deadline {
            if let Ok(Some(event)) = timeout(Duration::from_millis(100), rx.recv()).await {
                if matches!(event, SessionEvent::TimerTick { .. }) {
                    ticks += 1;
                }
            }
        }
        assert!(ticks >= 3, "expected repeated timer ticks, got {ticks}");

        handle.quit().await.unwrap();
    }
}
