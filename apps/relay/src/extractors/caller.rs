use std::future::Future;
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{web, FromRequest, HttpRequest};
use tracing::warn;

use crate::auth::claims::Claims;
use crate::auth::jwt::verify_access_token;
use crate::error::AppError;
use crate::state::app_state::AppState;
use crate::state::auth_policy::AuthPolicy;

/// Who is calling, as decided by the configured [`AuthPolicy`].
///
/// With auth disabled every request yields `Anonymous`. With JWT auth the
/// extractor fails with a 401 unless a valid bearer token is present, so a
/// handler taking `Caller` never runs for unauthenticated requests.
#[derive(Debug, Clone)]
pub enum Caller {
    Anonymous,
    Authenticated(Claims),
}

impl Caller {
    pub fn subject(&self) -> &str {
        match self {
            Caller::Anonymous => "anonymous",
            Caller::Authenticated(claims) => &claims.sub,
        }
    }
}

impl FromRequest for Caller {
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let app_state = req
                .app_data::<web::Data<AppState>>()
                .ok_or_else(|| AppError::internal("AppState not found"))?;

            let policy = match &app_state.auth {
                AuthPolicy::Disabled => return Ok(Caller::Anonymous),
                AuthPolicy::Jwt(policy) => policy,
            };

            let token = bearer_token(&req).inspect_err(|_| {
                warn!(path = %req.path(), "missing or malformed bearer token");
            })?;

            let claims = verify_access_token(token, policy).inspect_err(|e| {
                warn!(path = %req.path(), error = %e, "bearer token rejected");
            })?;

            Ok(Caller::Authenticated(claims))
        })
    }
}

/// Parse `Authorization: Bearer <token>`.
fn bearer_token(req: &HttpRequest) -> Result<&str, AppError> {
    let auth_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(AppError::unauthorized_missing_bearer)?
        .to_str()
        .map_err(|_| AppError::unauthorized_missing_bearer())?;

    let mut parts = auth_value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => Ok(token),
        _ => Err(AppError::unauthorized_missing_bearer()),
    }
}
