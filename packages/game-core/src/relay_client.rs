//! HTTP access to the move relay.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::ClientError;
use crate::protocol::{PlayOutcome, PlayRequest};

/// Anything able to answer a player's move with the AI's move.
#[async_trait]
pub trait RelayClient: Send + Sync {
    async fn play(
        &self,
        request: PlayRequest,
        token: Option<&str>,
    ) -> Result<PlayOutcome, ClientError>;
}

#[async_trait]
impl<T: RelayClient + ?Sized> RelayClient for Arc<T> {
    async fn play(
        &self,
        request: PlayRequest,
        token: Option<&str>,
    ) -> Result<PlayOutcome, ClientError> {
        (**self).play(request, token).await
    }
}

/// Subset of the relay's Problem Details body used for error messages.
#[derive(Debug, Deserialize)]
struct ProblemBody {
    #[serde(default)]
    detail: String,
}

/// [`RelayClient`] talking to a relay over HTTP.
#[derive(Debug, Clone)]
pub struct HttpRelayClient {
    client: Client,
    play_url: String,
}

impl HttpRelayClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            play_url: format!("{}/play", base_url.trim_end_matches('/')),
        }
    }

    pub fn play_url(&self) -> &str {
        &self.play_url
    }
}

#[async_trait]
impl RelayClient for HttpRelayClient {
    async fn play(
        &self,
        request: PlayRequest,
        token: Option<&str>,
    ) -> Result<PlayOutcome, ClientError> {
        let mut builder = self.client.post(&self.play_url).json(&request);
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }

        debug!(url = %self.play_url, player_move = %request.player_move, "posting move to relay");
        let response = builder.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response.json::<PlayOutcome>().await?);
        }

        warn!(status = status.as_u16(), "relay rejected move");
        match status {
            StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
            StatusCode::BAD_REQUEST => {
                let detail = response
                    .json::<ProblemBody>()
                    .await
                    .map(|p| p.detail)
                    .unwrap_or_default();
                Err(ClientError::validation(detail))
            }
            other => Err(ClientError::Upstream {
                status: other.as_u16(),
            }),
        }
    }
}
