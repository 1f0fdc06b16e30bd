//! Error codes for the relay API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the `code` field of
//! Problem Details responses.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication
    /// Missing or malformed Bearer token
    UnauthorizedMissingBearer,
    /// Token failed signature, issuer or audience checks
    UnauthorizedInvalidJwt,
    /// Token has expired
    UnauthorizedExpiredJwt,

    // Request Validation
    /// Move is not rock, paper or scissors
    InvalidMove,
    /// Body could not be read or parsed
    BadRequest,

    // Upstream
    /// AI service unreachable, failing, or violating the response contract
    UpstreamUnavailable,

    // System Errors
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Canonical string for this code, as it appears in HTTP responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UnauthorizedMissingBearer => "UNAUTHORIZED_MISSING_BEARER",
            Self::UnauthorizedInvalidJwt => "UNAUTHORIZED_INVALID_JWT",
            Self::UnauthorizedExpiredJwt => "UNAUTHORIZED_EXPIRED_JWT",
            Self::InvalidMove => "INVALID_MOVE",
            Self::BadRequest => "BAD_REQUEST",
            Self::UpstreamUnavailable => "UPSTREAM_UNAVAILABLE",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }

    pub const ALL: [ErrorCode; 8] = [
        Self::UnauthorizedMissingBearer,
        Self::UnauthorizedInvalidJwt,
        Self::UnauthorizedExpiredJwt,
        Self::InvalidMove,
        Self::BadRequest,
        Self::UpstreamUnavailable,
        Self::Internal,
        Self::ConfigError,
    ];
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_error_code_strings() {
        assert_eq!(
            ErrorCode::UnauthorizedMissingBearer.as_str(),
            "UNAUTHORIZED_MISSING_BEARER"
        );
        assert_eq!(ErrorCode::InvalidMove.as_str(), "INVALID_MOVE");
        assert_eq!(
            ErrorCode::UpstreamUnavailable.as_str(),
            "UPSTREAM_UNAVAILABLE"
        );
        assert_eq!(format!("{}", ErrorCode::ConfigError), "CONFIG_ERROR");
    }

    #[test]
    fn test_codes_are_unique_screaming_snake() {
        let mut seen = HashSet::new();
        for code in ErrorCode::ALL {
            let s = code.as_str();
            assert!(seen.insert(s), "Duplicate error code string: {s}");
            assert!(
                s.chars().all(|c| c.is_ascii_uppercase() || c == '_'),
                "{s} is not SCREAMING_SNAKE_CASE"
            );
        }
    }
}
