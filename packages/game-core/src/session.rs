//! Game round state machine.
//!
//! All transitions go through [`reduce`], a pure `(state, event) -> state`
//! function. Whether the game is over, and who won, is always derived from
//! the [`ScoreBoard`] and never stored.

use serde::Serialize;

use crate::protocol::{Move, PlayOutcome, RoundResult, Side};
use crate::score::ScoreBoard;

/// Identifies the submission a relay response belongs to.
pub type RoundTicket = u64;

pub const THINKING_MESSAGE: &str = "Hmm... thinking...";
pub const ERROR_RESULT_TEXT: &str = "Error contacting AI server.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Fresh session, no move submitted yet.
    Idle,
    /// A move was submitted and the relay has not answered.
    AwaitingResult,
    /// The last round finished (or failed) and its result is displayed.
    RoundResolved,
    /// One side reached the win threshold.
    GameOver,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    Start,
    Submit(Move),
    Resolved {
        ticket: RoundTicket,
        outcome: PlayOutcome,
    },
    Failed {
        ticket: RoundTicket,
        reason: String,
    },
    Restart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RoundStatus {
    Idle,
    Awaiting(RoundTicket),
    Resolved,
}

/// Everything the UI needs to render one frame of the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    player_move: Option<Move>,
    ai_move: Option<Move>,
    result_text: String,
    ai_message: String,
    last_error: Option<String>,
    score: ScoreBoard,
    status: RoundStatus,
    last_ticket: RoundTicket,
}

impl GameSession {
    pub fn new() -> Self {
        Self {
            player_move: None,
            ai_move: None,
            result_text: String::new(),
            ai_message: String::new(),
            last_error: None,
            score: ScoreBoard::default(),
            status: RoundStatus::Idle,
            last_ticket: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.score.is_over() {
            return Phase::GameOver;
        }
        match self.status {
            RoundStatus::Idle => Phase::Idle,
            RoundStatus::Awaiting(_) => Phase::AwaitingResult,
            RoundStatus::Resolved => Phase::RoundResolved,
        }
    }

    pub fn is_over(&self) -> bool {
        self.score.is_over()
    }

    pub fn winner(&self) -> Option<Side> {
        self.score.winner()
    }

    pub fn score(&self) -> ScoreBoard {
        self.score
    }

    pub fn player_move(&self) -> Option<Move> {
        self.player_move
    }

    pub fn ai_move(&self) -> Option<Move> {
        self.ai_move
    }

    pub fn result_text(&self) -> &str {
        &self.result_text
    }

    pub fn ai_message(&self) -> &str {
        &self.ai_message
    }

    /// Cause of the most recent failed round, cleared by the next submission.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Ticket of the submission currently waiting for the relay.
    pub fn pending_ticket(&self) -> Option<RoundTicket> {
        match self.status {
            RoundStatus::Awaiting(ticket) => Some(ticket),
            _ => None,
        }
    }

    fn is_pending(&self, ticket: RoundTicket) -> bool {
        !self.is_over() && self.pending_ticket() == Some(ticket)
    }

    fn start(&mut self) {
        // Tickets keep counting across restarts so that a response issued
        // before the restart can never match a round started after it.
        let last_ticket = self.last_ticket;
        *self = Self::new();
        self.last_ticket = last_ticket;
    }

    fn submit(&mut self, player_move: Move) {
        if self.is_over() {
            return;
        }
        self.last_ticket += 1;
        self.player_move = Some(player_move);
        self.ai_move = None;
        self.result_text.clear();
        self.ai_message = THINKING_MESSAGE.to_string();
        self.last_error = None;
        self.status = RoundStatus::Awaiting(self.last_ticket);
    }

    fn resolve(&mut self, ticket: RoundTicket, outcome: PlayOutcome) {
        if !self.is_pending(ticket) {
            return;
        }
        self.ai_move = Some(outcome.ai_move);
        self.score.record(outcome.result);
        self.result_text = result_text(outcome.result).to_string();
        self.ai_message = if outcome.message.trim().is_empty() {
            fallback_ai_message(outcome.result).to_string()
        } else {
            outcome.message
        };
        self.status = RoundStatus::Resolved;
    }

    fn fail(&mut self, ticket: RoundTicket, reason: String) {
        if !self.is_pending(ticket) {
            return;
        }
        self.ai_move = None;
        self.result_text = ERROR_RESULT_TEXT.to_string();
        self.ai_message.clear();
        self.last_error = Some(reason);
        self.status = RoundStatus::Resolved;
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply one event to a session.
///
/// Events that are invalid for the current phase leave the state unchanged:
/// submissions after the game is over, restarts before it is over, and
/// responses whose ticket is not the one currently pending.
pub fn reduce(mut state: GameSession, event: GameEvent) -> GameSession {
    match event {
        GameEvent::Start => state.start(),
        GameEvent::Restart => {
            if state.is_over() {
                state.start();
            }
        }
        GameEvent::Submit(player_move) => state.submit(player_move),
        GameEvent::Resolved { ticket, outcome } => state.resolve(ticket, outcome),
        GameEvent::Failed { ticket, reason } => state.fail(ticket, reason),
    }
    state
}

pub fn result_text(result: RoundResult) -> &'static str {
    match result {
        RoundResult::Win => "You Win! 🎉",
        RoundResult::Lose => "You Lose! 😞",
        RoundResult::Draw => "It's a Draw! 🤝",
    }
}

fn fallback_ai_message(result: RoundResult) -> &'static str {
    match result {
        RoundResult::Win => "Okay, you got me! I'm learning...",
        RoundResult::Lose => "I'm getting the hang of this! 🔥",
        RoundResult::Draw => "Interesting... I see what you're doing.",
    }
}
