use std::future::{ready, Ready};
use std::time::{Duration, Instant};

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::{Error as ActixError, HttpMessage};
use futures_util::future::LocalBoxFuture;
use game_core::Move;
use tracing::{error, info, warn};

use super::request_trace::TraceId;
use crate::trace_ctx::UNKNOWN_TRACE_ID;

/// What `POST /play` did with a round, left in the request extensions by the
/// handler and reported on the `request_completed` event.
#[derive(Debug, Clone, Default)]
pub struct RoundAudit {
    pub caller: Option<String>,
    pub player_move: Option<Move>,
    pub ai_move: Option<Move>,
    pub upstream_latency: Option<Duration>,
}

/// Emits one `request_completed` event per request.
///
/// Level follows the status class: error for 5xx, warn for 4xx, info
/// otherwise. Relayed rounds also carry caller, both moves and the time spent
/// waiting on the AI service.
pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

struct Completed {
    method: String,
    path: String,
    trace_id: String,
    status: StatusCode,
    elapsed: Duration,
    audit: RoundAudit,
}

impl Completed {
    fn emit(&self) {
        let method = self.method.as_str();
        let path = self.path.as_str();
        let trace_id = self.trace_id.as_str();
        let status = self.status.as_u16();
        let duration_us = self.elapsed.as_micros() as u64;
        let caller = self.audit.caller.as_deref();
        let player_move = self.audit.player_move.map(Move::as_str);
        let ai_move = self.audit.ai_move.map(Move::as_str);
        let upstream_ms = self.audit.upstream_latency.map(|d| d.as_millis() as u64);

        macro_rules! completed {
            ($level:ident) => {
                $level!(
                    http.method = method,
                    url.path = path,
                    http.status_code = status,
                    duration_us,
                    trace_id,
                    caller,
                    player_move,
                    ai_move,
                    upstream_ms,
                    "request_completed"
                )
            };
        }

        if self.status.is_server_error() {
            completed!(error);
        } else if self.status.is_client_error() {
            completed!(warn);
        } else {
            completed!(info);
        }
    }
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().to_string();
        let path = req.path().to_string();
        let trace_id = req
            .extensions()
            .get::<TraceId>()
            .map(|id| id.0.clone())
            .unwrap_or_else(|| UNKNOWN_TRACE_ID.to_string());

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;

            let (status, audit) = match &result {
                Ok(res) => (
                    res.status(),
                    res.request()
                        .extensions()
                        .get::<RoundAudit>()
                        .cloned()
                        .unwrap_or_default(),
                ),
                Err(err) => (err.as_response_error().status_code(), RoundAudit::default()),
            };

            Completed {
                method,
                path,
                trace_id,
                status,
                elapsed: start.elapsed(),
                audit,
            }
            .emit();

            result
        })
    }
}
