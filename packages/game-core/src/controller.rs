//! Async driver around the session reducer.

use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::protocol::{Move, PlayRequest};
use crate::relay_client::RelayClient;
use crate::session::{reduce, GameEvent, GameSession};

/// Default pause between the relay's answer and revealing it.
pub const DEFAULT_THINKING_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Cosmetic wait before a successful result is shown. Zero disables it.
    pub thinking_delay: Duration,
    /// Bearer token sent with every move, if the relay requires one.
    pub token: Option<String>,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            thinking_delay: DEFAULT_THINKING_DELAY,
            token: None,
        }
    }
}

/// Owns one game session and publishes every change to subscribers.
///
/// Methods take `&self`, so a controller can be shared between an input task
/// and a render task. Overlapping submissions are safe: only the response to
/// the most recent one is applied.
pub struct GameController<C> {
    client: C,
    config: ControllerConfig,
    state: watch::Sender<GameSession>,
}

impl<C: RelayClient> GameController<C> {
    pub fn new(client: C, config: ControllerConfig) -> Self {
        let (state, _) = watch::channel(GameSession::new());
        Self {
            client,
            config,
            state,
        }
    }

    pub fn snapshot(&self) -> GameSession {
        self.state.borrow().clone()
    }

    /// Receiver notified after every state change.
    pub fn subscribe(&self) -> watch::Receiver<GameSession> {
        self.state.subscribe()
    }

    pub fn start_session(&self) -> GameSession {
        self.dispatch(GameEvent::Start)
    }

    /// Start over after a finished game. Ignored while a game is running.
    pub fn restart(&self) -> GameSession {
        self.dispatch(GameEvent::Restart)
    }

    /// Play one round and return the session once it is settled.
    pub async fn submit_move(&self, player_move: Move) -> GameSession {
        let state = self.dispatch(GameEvent::Submit(player_move));
        let Some(ticket) = state.pending_ticket() else {
            debug!(player_move = %player_move, "move ignored, game is over");
            return state;
        };

        let request = PlayRequest { player_move };
        match self.client.play(request, self.config.token.as_deref()).await {
            Ok(outcome) => {
                info!(
                    ticket,
                    player_move = %player_move,
                    ai_move = %outcome.ai_move,
                    result = ?outcome.result,
                    "round answered"
                );
                if !self.config.thinking_delay.is_zero() {
                    tokio::time::sleep(self.config.thinking_delay).await;
                }
                self.dispatch(GameEvent::Resolved { ticket, outcome })
            }
            Err(e) => {
                warn!(ticket, error = %e, "error contacting relay");
                self.dispatch(GameEvent::Failed {
                    ticket,
                    reason: e.to_string(),
                })
            }
        }
    }

    fn dispatch(&self, event: GameEvent) -> GameSession {
        self.state.send_if_modified(|current| {
            let next = reduce(current.clone(), event);
            if next == *current {
                false
            } else {
                *current = next;
                true
            }
        });
        self.snapshot()
    }
}
