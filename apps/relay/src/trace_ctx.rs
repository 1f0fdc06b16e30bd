//! Task-local trace id for the request being handled.
//!
//! `RequestTrace` opens the scope; error responses and log lines read it
//! back without threading the request through every call.

use tokio::task_local;

task_local! {
    static TRACE_ID: String;
}

pub const UNKNOWN_TRACE_ID: &str = "unknown";

/// Trace id of the current request, or `"unknown"` outside a request.
pub fn trace_id() -> String {
    TRACE_ID
        .try_with(Clone::clone)
        .unwrap_or_else(|_| UNKNOWN_TRACE_ID.to_string())
}

/// Run `future` with `trace_id` as the current trace id.
pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: std::future::Future<Output = R>,
{
    TRACE_ID.scope(trace_id, future).await
}

/// Synchronous counterpart of [`with_trace_id`], for work done while a
/// service call is being set up.
pub fn sync_with_trace_id<F, R>(trace_id: String, f: F) -> R
where
    F: FnOnce() -> R,
{
    TRACE_ID.sync_scope(trace_id, f)
}
