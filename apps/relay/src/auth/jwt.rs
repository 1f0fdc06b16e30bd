use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, EncodingKey, Header, Validation};
use tracing::debug;

use super::claims::{Audience, Claims};
use crate::error::AppError;
use crate::state::auth_policy::JwtPolicy;

/// Verify signature, expiry, issuer and audience of an access token.
///
/// Errors:
/// - Expired token → `AppError::UnauthorizedExpiredJwt`
/// - Anything else (bad signature, wrong `iss`/`aud`, malformed) →
///   `AppError::UnauthorizedInvalidJwt`
pub fn verify_access_token(token: &str, policy: &JwtPolicy) -> Result<Claims, AppError> {
    // Pin the algorithm so an HS256 token can never pass as RS256 or vice versa.
    let mut validation = Validation::new(policy.algorithm);
    validation.set_issuer(&[policy.issuer.as_str()]);
    validation.set_audience(&[policy.audience.as_str()]);
    validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);

    decode::<Claims>(token, &policy.decoding_key, &validation)
        .map(|data| data.claims)
        .map_err(|e| {
            debug!(reason = ?e.kind(), "token rejected");
            match e.kind() {
                ErrorKind::ExpiredSignature => AppError::unauthorized_expired_jwt(),
                _ => AppError::unauthorized_invalid_jwt(),
            }
        })
}

/// Mint an HS256 token, for local development and tests against an
/// HS256-configured relay.
pub fn mint_hs256_token(
    secret: &[u8],
    sub: &str,
    issuer: &str,
    audience: &str,
    ttl_secs: i64,
    now: SystemTime,
) -> Result<String, AppError> {
    let iat = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AppError::internal("Failed to get current time"))?
        .as_secs() as i64;

    let claims = Claims {
        sub: sub.to_string(),
        iss: issuer.to_string(),
        aud: Audience::One(audience.to_string()),
        exp: iat + ttl_secs,
        iat: Some(iat),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
}
