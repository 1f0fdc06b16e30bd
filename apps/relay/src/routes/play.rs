use std::time::Instant;

use actix_web::http::header::ContentType;
use actix_web::{web, HttpMessage, HttpRequest, HttpResponse};
use game_core::{Move, PlayRequest};
use serde::Deserialize;
use tracing::{error, info};

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::{Caller, ValidatedJson};
use crate::middleware::RoundAudit;
use crate::state::app_state::AppState;

/// Incoming body. The move stays a string here so an unknown move is an
/// `INVALID_MOVE` validation error rather than a generic JSON error. Only the
/// exact lowercase spellings are accepted.
#[derive(Debug, Deserialize)]
pub struct PlayBody {
    #[serde(rename = "move")]
    pub player_move: String,
}

/// `POST /play`: validate, forward to the AI service, relay its answer.
///
/// `Caller` is extracted first so an unauthenticated request is rejected
/// before its body is read or anything is forwarded.
async fn play(
    caller: Caller,
    body: ValidatedJson<PlayBody>,
    app_state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let PlayBody { player_move } = body.into_inner();

    let player_move = Move::from_wire(&player_move).ok_or_else(|| {
        AppError::invalid(
            ErrorCode::InvalidMove,
            format!("Invalid move '{player_move}'. Expected one of: rock, paper, scissors"),
        )
    })?;

    info!(caller = %caller.subject(), player_move = %player_move, "received move");

    let started = Instant::now();
    let answer = app_state.ai.play(&PlayRequest { player_move }).await;
    req.extensions_mut().insert(RoundAudit {
        caller: Some(caller.subject().to_string()),
        player_move: Some(player_move),
        ai_move: answer.as_ref().ok().map(|relayed| relayed.outcome.ai_move),
        upstream_latency: Some(started.elapsed()),
    });

    let relayed = answer.map_err(|e| {
        error!(error = %e, "AI service call failed");
        AppError::from(e)
    })?;

    info!(
        ai_move = %relayed.outcome.ai_move,
        result = ?relayed.outcome.result,
        "AI answered"
    );

    Ok(HttpResponse::Ok()
        .insert_header(ContentType::json())
        .body(relayed.body))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/play", web::post().to(play));
}
