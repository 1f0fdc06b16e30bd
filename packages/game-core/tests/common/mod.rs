#![allow(dead_code)]

// tests/common/mod.rs
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use game_core::{ClientError, Move, PlayOutcome, PlayRequest, RelayClient, RoundResult};

#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// One scripted relay answer, optionally delayed.
pub struct Scripted {
    pub delay: Duration,
    pub reply: Result<PlayOutcome, ClientError>,
}

/// In-process relay double answering from a script, in call order.
#[derive(Default)]
pub struct StubRelay {
    script: Mutex<VecDeque<Scripted>>,
    calls: Mutex<Vec<(PlayRequest, Option<String>)>>,
}

impl StubRelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(self, result: RoundResult) -> Self {
        self.answer_after(Duration::ZERO, result)
    }

    pub fn answer_after(self, delay: Duration, result: RoundResult) -> Self {
        self.script.lock().unwrap().push_back(Scripted {
            delay,
            reply: Ok(outcome(result)),
        });
        self
    }

    pub fn fail(self, error: ClientError) -> Self {
        self.script.lock().unwrap().push_back(Scripted {
            delay: Duration::ZERO,
            reply: Err(error),
        });
        self
    }

    pub fn calls(&self) -> Vec<(PlayRequest, Option<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RelayClient for StubRelay {
    async fn play(
        &self,
        request: PlayRequest,
        token: Option<&str>,
    ) -> Result<PlayOutcome, ClientError> {
        self.calls
            .lock()
            .unwrap()
            .push((request, token.map(str::to_string)));
        let next = self.script.lock().unwrap().pop_front();
        let Some(scripted) = next else {
            return Err(ClientError::Transport("script exhausted".to_string()));
        };
        if !scripted.delay.is_zero() {
            tokio::time::sleep(scripted.delay).await;
        }
        scripted.reply
    }
}

/// An AI answer consistent with `result` for a player throwing rock.
pub fn outcome(result: RoundResult) -> PlayOutcome {
    let ai_move = match result {
        RoundResult::Win => Move::Scissors,
        RoundResult::Lose => Move::Paper,
        RoundResult::Draw => Move::Rock,
    };
    PlayOutcome {
        ai_move,
        result,
        message: format!("stub {result:?}"),
    }
}
