use thiserror::Error;

/// Errors surfaced by the game client.
///
/// None of them is fatal to a session: the controller turns every variant
/// into a failed round and the player may simply try again.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Unauthorized: relay rejected the credentials")]
    Unauthorized,
    #[error("Relay responded with status {status}")]
    Upstream { status: u16 },
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Invalid relay response: {0}")]
    Decode(String),
}

impl ClientError {
    pub fn validation(detail: impl Into<String>) -> Self {
        Self::Validation(detail.into())
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else {
            ClientError::Transport(e.to_string())
        }
    }
}
