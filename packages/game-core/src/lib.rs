//! Client-side core of the Rock-Paper-Scissors game.
//!
//! The game is modelled as an explicit [`GameSession`] value driven by a pure
//! reducer ([`session::reduce`]). [`GameController`] wraps the reducer with the
//! one asynchronous step in the game: asking the relay for the AI's answer.

#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod controller;
pub mod error;
pub mod protocol;
pub mod relay_client;
pub mod score;
pub mod session;

pub use controller::{ControllerConfig, GameController};
pub use error::ClientError;
pub use protocol::{Move, PlayOutcome, PlayRequest, RoundResult, Side};
pub use relay_client::{HttpRelayClient, RelayClient};
pub use score::{ScoreBoard, WIN_THRESHOLD};
pub use session::{reduce, GameEvent, GameSession, Phase, RoundTicket};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
