//! Relay configuration read from the process environment.

use std::env;
use std::time::Duration;

use crate::error::AppError;
use crate::state::auth_policy::{AuthPolicy, JwtPolicy};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_AI_SERVICE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_AI_TIMEOUT_MS: u64 = 5000;

/// Shape of the relay's log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per event, for log shippers.
    #[default]
    Json,
    /// Human-readable lines for local runs.
    Pretty,
}

impl LogFormat {
    fn parse(raw: &str) -> Result<Self, AppError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" | "text" => Ok(LogFormat::Pretty),
            other => Err(AppError::config(format!(
                "LOG_FORMAT must be 'json' or 'pretty', got '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    pub host: String,
    pub port: u16,
    pub ai_service_url: String,
    pub ai_timeout: Duration,
    pub log_format: LogFormat,
}

impl RelayConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source; unset and empty are equivalent.
    pub fn from_vars<F>(var: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| var(key).filter(|v| !v.trim().is_empty());

        let host = var("RELAY_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match var("RELAY_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
                AppError::config(format!("RELAY_PORT must be a valid port number, got '{raw}'"))
            })?,
            None => DEFAULT_PORT,
        };

        let ai_service_url =
            var("AI_SERVICE_URL").unwrap_or_else(|| DEFAULT_AI_SERVICE_URL.to_string());
        if !(ai_service_url.starts_with("http://") || ai_service_url.starts_with("https://")) {
            return Err(AppError::config(format!(
                "AI_SERVICE_URL must be an http(s) URL, got '{ai_service_url}'"
            )));
        }

        let timeout_ms = match var("AI_SERVICE_TIMEOUT_MS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                AppError::config(format!(
                    "AI_SERVICE_TIMEOUT_MS must be a number of milliseconds, got '{raw}'"
                ))
            })?,
            None => DEFAULT_AI_TIMEOUT_MS,
        };

        let log_format = match var("LOG_FORMAT") {
            Some(raw) => LogFormat::parse(&raw)?,
            None => LogFormat::default(),
        };

        Ok(Self {
            host,
            port,
            ai_service_url,
            ai_timeout: Duration::from_millis(timeout_ms),
            log_format,
        })
    }
}

/// Read the authentication policy from the environment.
pub fn auth_policy_from_env() -> Result<AuthPolicy, AppError> {
    auth_policy_from_vars(|key| env::var(key).ok())
}

pub fn auth_policy_from_vars<F>(var: F) -> Result<AuthPolicy, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |key: &str| var(key).filter(|v| !v.trim().is_empty());

    let mode = var("AUTH_MODE").unwrap_or_else(|| "disabled".to_string());
    match mode.trim().to_ascii_lowercase().as_str() {
        "disabled" | "none" | "off" => Ok(AuthPolicy::Disabled),
        "jwt" => {
            let issuer = must(&var, "AUTH_ISSUER")?;
            let audience = must(&var, "AUTH_AUDIENCE")?;
            let policy = match (var("AUTH_JWT_SECRET"), var("AUTH_JWT_PUBLIC_KEY_PEM")) {
                (Some(secret), None) => JwtPolicy::hs256(secret.as_bytes(), issuer, audience),
                (None, Some(path)) => {
                    let pem = std::fs::read(&path).map_err(|e| {
                        AppError::config(format!("cannot read AUTH_JWT_PUBLIC_KEY_PEM '{path}': {e}"))
                    })?;
                    JwtPolicy::rs256_pem(&pem, issuer, audience)?
                }
                (Some(_), Some(_)) => {
                    return Err(AppError::config(
                        "set only one of AUTH_JWT_SECRET and AUTH_JWT_PUBLIC_KEY_PEM",
                    ))
                }
                (None, None) => {
                    return Err(AppError::config(
                        "AUTH_MODE=jwt requires AUTH_JWT_SECRET or AUTH_JWT_PUBLIC_KEY_PEM",
                    ))
                }
            };
            Ok(AuthPolicy::Jwt(policy))
        }
        other => Err(AppError::config(format!(
            "AUTH_MODE must be 'disabled' or 'jwt', got '{other}'"
        ))),
    }
}

fn must<F>(var: &F, key: &str) -> Result<String, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    var(key).ok_or_else(|| AppError::config(format!("{key} must be set when AUTH_MODE=jwt")))
}
