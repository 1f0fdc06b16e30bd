use std::future::Future;
use std::ops::Deref;
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use bytes::BytesMut;
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use serde_json::Error as JsonError;
use tracing::debug;

use crate::error::AppError;
use crate::errors::ErrorCode;

/// Upper bound on accepted request bodies. A move is a few bytes.
const MAX_BODY_BYTES: usize = 4 * 1024;

/// JSON extractor reporting parse failures as Problem Details (400,
/// `BAD_REQUEST`) instead of actix's plain-text default.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> FromRequest for ValidatedJson<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(_req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let mut payload = payload.take();

        Box::pin(async move {
            let mut body = BytesMut::new();
            while let Some(chunk) = payload.next().await {
                let chunk = chunk.map_err(|e| {
                    debug!(error = %e, "failed to read request body chunk");
                    AppError::bad_request(ErrorCode::BadRequest, "Failed to read request body")
                })?;
                if body.len() + chunk.len() > MAX_BODY_BYTES {
                    return Err(AppError::bad_request(
                        ErrorCode::BadRequest,
                        "Request body too large",
                    ));
                }
                body.extend_from_slice(&chunk);
            }

            let parsed = serde_json::from_slice::<T>(&body).map_err(|e| {
                debug!(error = %e, body_size = body.len(), "JSON parsing failed");
                AppError::bad_request(ErrorCode::BadRequest, classify_json_error(&e))
            })?;

            Ok(ValidatedJson(parsed))
        })
    }
}

/// Sanitized, client-facing description of a JSON error.
fn classify_json_error(error: &JsonError) -> String {
    match error.classify() {
        serde_json::error::Category::Syntax => {
            format!("Invalid JSON at line {}", error.line())
        }
        serde_json::error::Category::Eof => "Invalid JSON: unexpected end of input".to_string(),
        serde_json::error::Category::Data => {
            "Invalid JSON: wrong types or missing fields".to_string()
        }
        serde_json::error::Category::Io => "Invalid JSON: I/O error while reading body".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    #[allow(dead_code)]
    struct Body {
        #[serde(rename = "move")]
        player_move: String,
    }

    #[test]
    fn test_classify_json_error_syntax() {
        let error = serde_json::from_str::<Body>(r#"{"move": }"#).unwrap_err();
        assert!(classify_json_error(&error).contains("line 1"));
    }

    #[test]
    fn test_classify_json_error_eof() {
        let error = serde_json::from_str::<Body>(r#"{"move": "rock""#).unwrap_err();
        assert!(classify_json_error(&error).contains("unexpected end of input"));
    }

    #[test]
    fn test_classify_json_error_data() {
        let error = serde_json::from_str::<Body>(r#"{"move": 7}"#).unwrap_err();
        assert!(classify_json_error(&error).contains("wrong types"));

        let error = serde_json::from_str::<Body>(r#"{}"#).unwrap_err();
        assert!(classify_json_error(&error).contains("missing fields"));
    }
}
