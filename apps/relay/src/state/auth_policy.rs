use std::fmt;

use jsonwebtoken::{Algorithm, DecodingKey};

use crate::error::AppError;

/// How `POST /play` callers are authenticated.
#[derive(Debug, Clone, Default)]
pub enum AuthPolicy {
    /// Every caller is accepted anonymously.
    #[default]
    Disabled,
    /// A bearer token verified against `JwtPolicy` is required.
    Jwt(JwtPolicy),
}

impl AuthPolicy {
    pub fn mode(&self) -> &'static str {
        match self {
            AuthPolicy::Disabled => "disabled",
            AuthPolicy::Jwt(_) => "jwt",
        }
    }
}

/// Verification settings for tokens issued by the identity provider.
#[derive(Clone)]
pub struct JwtPolicy {
    pub algorithm: Algorithm,
    pub decoding_key: DecodingKey,
    pub issuer: String,
    pub audience: String,
}

impl JwtPolicy {
    /// Shared-secret (HS256) verification.
    pub fn hs256(
        secret: impl AsRef<[u8]>,
        issuer: impl Into<String>,
        audience: impl Into<String>,
    ) -> Self {
        Self {
            algorithm: Algorithm::HS256,
            decoding_key: DecodingKey::from_secret(secret.as_ref()),
            issuer: issuer.into(),
            audience: audience.into(),
        }
    }

    /// Public-key (RS256) verification from a PEM-encoded key.
    pub fn rs256_pem(
        pem: &[u8],
        issuer: impl Into<String>,
        audience: impl Into<String>,
    ) -> Result<Self, AppError> {
        let decoding_key = DecodingKey::from_rsa_pem(pem)
            .map_err(|e| AppError::config(format!("invalid RSA public key PEM: {e}")))?;
        Ok(Self {
            algorithm: Algorithm::RS256,
            decoding_key,
            issuer: issuer.into(),
            audience: audience.into(),
        })
    }
}

impl fmt::Debug for JwtPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtPolicy")
            .field("algorithm", &self.algorithm)
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish_non_exhaustive()
    }
}
