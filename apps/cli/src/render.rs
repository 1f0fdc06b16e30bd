use std::io::Write;

use game_core::{GameSession, Move, Phase, Side, WIN_THRESHOLD};
use tokio::sync::watch;

fn hand(player_move: Option<Move>) -> &'static str {
    match player_move {
        Some(Move::Rock) => "✊ rock",
        Some(Move::Paper) => "✋ paper",
        Some(Move::Scissors) => "✌️ scissors",
        None => "…",
    }
}

/// Text shown after every state change.
pub fn render(session: &GameSession) -> String {
    let score = session.score();
    let mut lines = vec![format!(
        "Score  You {}  AI {}  Draws {}   round {} (first to {WIN_THRESHOLD})",
        score.player,
        score.ai,
        score.draws,
        score.rounds_played()
    )];

    match session.phase() {
        Phase::Idle => lines.push("Choose rock, paper or scissors.".to_string()),
        Phase::AwaitingResult => {
            lines.push(format!("You: {}   AI: …", hand(session.player_move())));
            lines.push(session.ai_message().to_string());
        }
        Phase::RoundResolved | Phase::GameOver => {
            lines.push(format!(
                "You: {}   AI: {}",
                hand(session.player_move()),
                hand(session.ai_move())
            ));
            lines.push(session.result_text().to_string());
            if !session.ai_message().is_empty() {
                lines.push(format!("AI says: {}", session.ai_message()));
            }
            if let Some(error) = session.last_error() {
                lines.push(format!("({error})"));
            }
        }
    }

    match session.winner() {
        Some(Side::Player) => {
            lines.push("🏆 You won the game! Type 'restart' to play again.".to_string())
        }
        Some(Side::Ai) => {
            lines.push("🤖 The AI won the game. Type 'restart' to play again.".to_string())
        }
        None => {}
    }

    lines.join("\n")
}

/// Print every published session until the controller goes away, then
/// hand the writer back.
pub async fn follow<W: Write>(mut updates: watch::Receiver<GameSession>, mut out: W) -> W {
    while updates.changed().await.is_ok() {
        let session = updates.borrow_and_update().clone();
        if writeln!(out, "{}\n", render(&session)).is_err() {
            break;
        }
    }
    out
}
