use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use relay::config::{auth_policy_from_env, RelayConfig};
use relay::middleware::cors::cors_middleware;
use relay::middleware::request_trace::RequestTrace;
use relay::middleware::structured_logger::StructuredLogger;
use relay::middleware::trace_span::TraceSpan;
use relay::routes;
use relay::state::app_state::AppState;
use relay::upstream::HttpAiService;
use tracing::info;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Configuration comes from the process environment only; source env
    // files before starting (e.g. set -a; . ./.env; set +a).
    let config = RelayConfig::from_env().unwrap_or_else(|e| {
        eprintln!("❌ {e}");
        std::process::exit(1);
    });

    telemetry::init_tracing(config.log_format);

    let auth = auth_policy_from_env().unwrap_or_else(|e| {
        eprintln!("❌ {e}");
        std::process::exit(1);
    });

    let ai = HttpAiService::new(&config.ai_service_url, config.ai_timeout).unwrap_or_else(|e| {
        eprintln!("❌ Failed to build AI service client: {e}");
        std::process::exit(1);
    });

    println!(
        "🚀 Starting RPS relay on http://{}:{}",
        config.host, config.port
    );
    info!(
        ai_service = %ai.play_url(),
        ai_timeout_ms = config.ai_timeout.as_millis() as u64,
        auth = auth.mode(),
        "relay configured"
    );

    let data = web::Data::new(AppState::new(auth, Arc::new(ai)));

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
