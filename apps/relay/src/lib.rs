#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod auth;
pub mod config;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod trace_ctx;
pub mod upstream;

pub use auth::{mint_hs256_token, verify_access_token, Claims};
pub use config::{auth_policy_from_env, RelayConfig};
pub use error::AppError;
pub use errors::ErrorCode;
pub use extractors::{Caller, ValidatedJson};
pub use middleware::{cors_middleware, RequestTrace, StructuredLogger, TraceSpan};
pub use state::{AppState, AuthPolicy, JwtPolicy};
pub use upstream::{AiService, HttpAiService, RelayedOutcome, UpstreamError};

#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
