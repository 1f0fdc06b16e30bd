mod common;

use std::sync::Arc;
use std::time::Duration;

use common::StubRelay;
use game_core::session::{ERROR_RESULT_TEXT, THINKING_MESSAGE};
use game_core::{
    ClientError, ControllerConfig, GameController, Move, Phase, RoundResult, ScoreBoard, Side,
};

fn instant_config() -> ControllerConfig {
    ControllerConfig {
        thinking_delay: Duration::ZERO,
        token: None,
    }
}

fn controller(relay: StubRelay) -> GameController<StubRelay> {
    GameController::new(relay, instant_config())
}

#[tokio::test]
async fn winning_round_increments_player_only() {
    let game = controller(StubRelay::new().answer(RoundResult::Win));
    game.start_session();

    let state = game.submit_move(Move::Rock).await;

    assert_eq!(state.phase(), Phase::RoundResolved);
    assert_eq!(state.player_move(), Some(Move::Rock));
    assert_eq!(state.ai_move(), Some(Move::Scissors));
    assert_eq!(
        state.score(),
        ScoreBoard {
            player: 1,
            ai: 0,
            draws: 0
        }
    );
    assert!(!state.result_text().is_empty());
}

#[tokio::test]
async fn each_result_touches_exactly_one_counter() {
    for (result, expected) in [
        (RoundResult::Win, (1, 0, 0)),
        (RoundResult::Lose, (0, 1, 0)),
        (RoundResult::Draw, (0, 0, 1)),
    ] {
        let game = controller(StubRelay::new().answer(result));
        let score = game.submit_move(Move::Paper).await.score();
        assert_eq!(
            (score.player, score.ai, score.draws),
            expected,
            "unexpected score for {result:?}"
        );
    }
}

#[tokio::test]
async fn three_wins_from_fresh_session_end_the_game() {
    let game = controller(
        StubRelay::new()
            .answer(RoundResult::Win)
            .answer(RoundResult::Win)
            .answer(RoundResult::Win),
    );
    game.start_session();

    for _ in 0..3 {
        game.submit_move(Move::Rock).await;
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
}

#[tokio::test]
async fn moves_after_game_over_never_reach_the_relay() {
    let relay = StubRelay::new()
        .answer(RoundResult::Lose)
        .answer(RoundResult::Lose)
        .answer(RoundResult::Lose)
        .answer(RoundResult::Win);
    let game = controller(relay);
    for _ in 0..3 {
        game.submit_move(Move::Rock).await;
    }
    let over = game.snapshot();
    assert_eq!(over.winner(), Some(Side::Ai));

    let after = game.submit_move(Move::Scissors).await;
    assert_eq!(after, over);
}

#[tokio::test]
async fn relay_failure_keeps_score_and_allows_retry() {
    let game = controller(
        StubRelay::new()
            .answer(RoundResult::Draw)
            .fail(ClientError::Upstream { status: 502 })
            .answer(RoundResult::Win),
    );

    game.submit_move(Move::Rock).await;
    let failed = game.submit_move(Move::Rock).await;
    assert_eq!(failed.result_text(), ERROR_RESULT_TEXT);
    assert_eq!(failed.ai_move(), None);
    assert_eq!(
        failed.score(),
        ScoreBoard {
            player: 0,
            ai: 0,
            draws: 1
        }
    );
    assert!(failed.last_error().unwrap_or_default().contains("502"));

    let retried = game.submit_move(Move::Rock).await;
    assert_eq!(retried.score().player, 1);
    assert_eq!(retried.last_error(), None);
}

#[tokio::test]
async fn restart_resets_a_finished_game() {
    let game = controller(
        StubRelay::new()
            .answer(RoundResult::Win)
            .answer(RoundResult::Draw)
            .answer(RoundResult::Win)
            .answer(RoundResult::Win),
    );
    for _ in 0..4 {
        game.submit_move(Move::Rock).await;
    }
    assert!(game.snapshot().is_over());

    let state = game.restart();
    assert_eq!(state.score(), ScoreBoard::default());
    assert!(!state.is_over());
    assert_eq!(state.winner(), None);
    assert_eq!(state.phase(), Phase::Idle);
}

#[tokio::test]
async fn token_is_forwarded_with_each_move() {
    let relay = Arc::new(
        StubRelay::new()
            .answer(RoundResult::Draw)
            .answer(RoundResult::Win),
    );
    let config = ControllerConfig {
        thinking_delay: Duration::ZERO,
        token: Some("abc.def.ghi".to_string()),
    };
    let game = GameController::new(Arc::clone(&relay), config);

    game.submit_move(Move::Paper).await;
    game.submit_move(Move::Scissors).await;

    let calls = relay.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].0.player_move, Move::Paper);
    assert_eq!(calls[1].0.player_move, Move::Scissors);
    assert!(calls
        .iter()
        .all(|(_, token)| token.as_deref() == Some("abc.def.ghi")));
}

#[tokio::test]
async fn overlapping_submissions_apply_only_the_latest() {
    // First answer is slow, second is fast: the late win must be discarded.
    let relay = StubRelay::new()
        .answer_after(Duration::from_millis(100), RoundResult::Win)
        .answer(RoundResult::Lose);
    let game = Arc::new(controller(relay));

    let slow = {
        let game = Arc::clone(&game);
        tokio::spawn(async move { game.submit_move(Move::Rock).await })
    };
    tokio::time::sleep(Duration::from_millis(20)).await;
    game.submit_move(Move::Paper).await;
    slow.await.expect("slow submission task panicked");

    let state = game.snapshot();
    assert_eq!(
        state.score(),
        ScoreBoard {
            player: 0,
            ai: 1,
            draws: 0
        }
    );
    assert_eq!(state.player_move(), Some(Move::Paper));
}

#[tokio::test(start_paused = true)]
async fn thinking_delay_holds_back_the_result() {
    let config = ControllerConfig {
        thinking_delay: Duration::from_millis(1500),
        token: None,
    };
    let game = Arc::new(GameController::new(
        StubRelay::new().answer(RoundResult::Win),
        config,
    ));
    let mut updates = game.subscribe();

    let round = {
        let game = Arc::clone(&game);
        tokio::spawn(async move { game.submit_move(Move::Rock).await })
    };

    updates.changed().await.expect("controller dropped");
    {
        let thinking = updates.borrow_and_update();
        assert_eq!(thinking.phase(), Phase::AwaitingResult);
        assert_eq!(thinking.ai_message(), THINKING_MESSAGE);
    }

    let state = round.await.expect("round task panicked");
    assert_eq!(state.score().player, 1);
    assert_eq!(state.phase(), Phase::RoundResolved);
}
