use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use game_core::{PlayOutcome, PlayRequest};
use reqwest::Client;
use thiserror::Error;
use tracing::debug;

/// Why the AI service could not produce an answer.
///
/// Messages may contain addresses and other connection details; they are
/// meant for logs only.
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("timed out after {0:?}")]
    Timeout(Duration),
    #[error("AI service responded with status {0}")]
    Status(u16),
    #[error("AI service response violates contract: {0}")]
    Contract(String),
}

/// The AI's answer: decoded for logging, raw for relaying unchanged.
#[derive(Debug, Clone)]
pub struct RelayedOutcome {
    pub outcome: PlayOutcome,
    pub body: Bytes,
}

#[async_trait]
pub trait AiService: Send + Sync {
    async fn play(&self, request: &PlayRequest) -> Result<RelayedOutcome, UpstreamError>;
}

/// [`AiService`] reached over HTTP at `<base_url>/play`.
#[derive(Debug, Clone)]
pub struct HttpAiService {
    client: Client,
    play_url: String,
    timeout: Duration,
}

impl HttpAiService {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| UpstreamError::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            play_url: format!("{}/play", base_url.trim_end_matches('/')),
            timeout,
        })
    }

    pub fn play_url(&self) -> &str {
        &self.play_url
    }

    fn transport_error(&self, e: reqwest::Error) -> UpstreamError {
        if e.is_timeout() {
            UpstreamError::Timeout(self.timeout)
        } else {
            UpstreamError::Transport(e.to_string())
        }
    }
}

#[async_trait]
impl AiService for HttpAiService {
    async fn play(&self, request: &PlayRequest) -> Result<RelayedOutcome, UpstreamError> {
        debug!(url = %self.play_url, "forwarding move to AI service");
        let response = self
            .client
            .post(&self.play_url)
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(|e| self.transport_error(e))?;
        let outcome = serde_json::from_slice::<PlayOutcome>(&body)
            .map_err(|e| UpstreamError::Contract(e.to_string()))?;

        Ok(RelayedOutcome { outcome, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_url_joins_base() {
        let service = HttpAiService::new("http://127.0.0.1:5000/", Duration::from_secs(1)).unwrap();
        assert_eq!(service.play_url(), "http://127.0.0.1:5000/play");
    }
}
