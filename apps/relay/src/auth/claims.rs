//! Claims carried by identity-provider access tokens.

use serde::{Deserialize, Serialize};

/// `aud` may be a single string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (the player's identity at the provider)
    pub sub: String,
    pub iss: String,
    pub aud: Audience,
    /// Expiry (seconds since epoch)
    pub exp: i64,
    /// Issued-at (seconds since epoch)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}
