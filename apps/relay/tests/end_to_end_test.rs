//! Game client ↔ relay ↔ stub AI over real sockets.

mod common;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, App, HttpServer};
use common::{ai_at, ai_for, ai_reply, jwt_policy, valid_token};
use game_core::{
    ControllerConfig, GameController, HttpRelayClient, Move, Phase, RoundResult, ScoreBoard, Side,
};
use httpmock::prelude::*;
use relay::middleware::{RequestTrace, StructuredLogger, TraceSpan};
use relay::routes;
use relay::state::AppState;

/// Start the relay on an ephemeral port and return its address.
fn spawn_relay(state: AppState) -> SocketAddr {
    let data = web::Data::new(state);
    let server = HttpServer::new(move || {
        App::new()
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("bind relay");

    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());
    addr
}

fn controller_for(addr: SocketAddr, token: Option<String>) -> GameController<HttpRelayClient> {
    let client = HttpRelayClient::new(&format!("http://{addr}"), Duration::from_secs(5))
        .expect("build relay client");
    GameController::new(
        client,
        ControllerConfig {
            thinking_delay: Duration::ZERO,
            token,
        },
    )
}

#[actix_web::test]
async fn authenticated_win_scores_for_the_player() {
    let ai_server = MockServer::start_async().await;
    let ai = ai_server
        .mock_async(|when, then| {
            when.method(POST).path("/play");
            then.status(200)
                .json_body(ai_reply("scissors", "win", "x"));
        })
        .await;
    let addr = spawn_relay(AppState::new(jwt_policy(), ai_for(&ai_server)));
    let game = controller_for(addr, Some(valid_token()));
    game.start_session();

    let state = game.submit_move(Move::Rock).await;

    assert_eq!(state.result_text(), game_core::session::result_text(RoundResult::Win));
    assert_eq!(
        state.score(),
        ScoreBoard {
            player: 1,
            ai: 0,
            draws: 0
        }
    );
    assert_eq!(state.ai_message(), "x");
    ai.assert_hits_async(1).await;
}

#[actix_web::test]
async fn missing_token_leaves_score_untouched() {
    let ai_server = MockServer::start_async().await;
    let ai = ai_server
        .mock_async(|when, then| {
            when.method(POST).path("/play");
            then.status(200)
                .json_body(ai_reply("scissors", "win", "x"));
        })
        .await;
    let addr = spawn_relay(AppState::new(jwt_policy(), ai_for(&ai_server)));
    let game = controller_for(addr, None);
    game.start_session();

    let state = game.submit_move(Move::Rock).await;

    assert_eq!(state.score(), ScoreBoard::default());
    assert!(state.last_error().is_some());
    ai.assert_hits_async(0).await;
}

#[actix_web::test]
async fn ai_outage_surfaces_as_error_and_keeps_score() {
    let ai_server = MockServer::start_async().await;
    let addr = spawn_relay(AppState::without_auth(ai_for(&ai_server)));
    let _outage = ai_server
        .mock_async(|when, then| {
            when.method(POST).path("/play");
            then.status(503);
        })
        .await;
    let game = controller_for(addr, None);
    game.start_session();

    let state = game.submit_move(Move::Paper).await;

    assert_eq!(state.phase(), Phase::RoundResolved);
    assert_eq!(state.result_text(), game_core::session::ERROR_RESULT_TEXT);
    assert_eq!(state.score(), ScoreBoard::default());
}

#[actix_web::test]
async fn three_wins_end_the_game() {
    let ai_server = MockServer::start_async().await;
    let _ai = ai_server
        .mock_async(|when, then| {
            when.method(POST).path("/play");
            then.status(200)
                .json_body(ai_reply("rock", "win", "again?"));
        })
        .await;
    let addr = spawn_relay(AppState::without_auth(ai_for(&ai_server)));
    let game = controller_for(addr, None);
    game.start_session();

    for _ in 0..3 {
        game.submit_move(Move::Paper).await;
    }
    let state = game.snapshot();

    assert!(state.is_over());
    assert_eq!(state.phase(), Phase::GameOver);
    assert_eq!(state.winner(), Some(Side::Player));
    assert_eq!(
        state.score(),
        ScoreBoard {
            player: 3,
            ai: 0,
            draws: 0
        }
    );

    let after = game.restart();
    assert_eq!(after.score(), ScoreBoard::default());
    assert!(!after.is_over());
}

#[actix_web::test]
async fn unreachable_ai_keeps_client_score() {
    // Nothing listens on port 9, so the relay's upstream call is refused.
    let addr = spawn_relay(AppState::without_auth(Arc::new(ai_at("http://127.0.0.1:9"))));
    let game = controller_for(addr, None);
    game.start_session();

    let state = game.submit_move(Move::Rock).await;

    assert_eq!(state.phase(), Phase::RoundResolved);
    assert_eq!(state.score(), ScoreBoard::default());
    assert_eq!(state.result_text(), game_core::session::ERROR_RESULT_TEXT);
    let error = state.last_error().expect("failure should be recorded");
    assert!(error.contains("502"), "unexpected error: {error}");
}
