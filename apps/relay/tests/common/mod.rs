#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, SystemTime};

use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::header;
use actix_web::{test, web, App, Error as ActixError};
use httpmock::MockServer;
use relay::middleware::{RequestTrace, StructuredLogger, TraceSpan};
use relay::state::{AppState, AuthPolicy, JwtPolicy};
use relay::upstream::HttpAiService;
use relay::{mint_hs256_token, routes};
use serde_json::Value;

pub const SECRET: &[u8] = b"test_secret_key_for_testing_purposes_only";
pub const ISSUER: &str = "https://id.rps.test/";
pub const AUDIENCE: &str = "rps-relay";

#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

pub fn jwt_policy() -> AuthPolicy {
    AuthPolicy::Jwt(JwtPolicy::hs256(SECRET, ISSUER, AUDIENCE))
}

/// A token the [`jwt_policy`] accepts.
pub fn valid_token() -> String {
    mint_hs256_token(SECRET, "player-1", ISSUER, AUDIENCE, 900, SystemTime::now())
        .expect("mint test token")
}

/// AI client pointed at a mock server.
pub fn ai_for(server: &MockServer) -> Arc<HttpAiService> {
    Arc::new(ai_at(&server.base_url()))
}

pub fn ai_at(base_url: &str) -> HttpAiService {
    HttpAiService::new(base_url, Duration::from_millis(500)).expect("build AI client")
}

/// Relay app with the production routes and the request middleware stack.
pub async fn create_test_app(
    state: AppState,
) -> impl Service<actix_http::Request, Response = ServiceResponse<BoxBody>, Error = ActixError> {
    test::init_service(
        App::new()
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await
}

/// `POST /play` with a JSON body and optional bearer token.
pub fn play_request(body: &Value, token: Option<&str>) -> actix_http::Request {
    let mut req = test::TestRequest::post().uri("/play").set_json(body);
    if let Some(token) = token {
        req = req.insert_header((header::AUTHORIZATION, format!("Bearer {token}")));
    }
    req.to_request()
}

pub fn ai_reply(ai_move: &str, result: &str, message: &str) -> Value {
    serde_json::json!({ "ai_move": ai_move, "result": result, "message": message })
}
