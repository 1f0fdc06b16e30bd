//! Client for the external AI move-selection service.

pub mod ai_service;

pub use ai_service::{AiService, HttpAiService, RelayedOutcome, UpstreamError};
