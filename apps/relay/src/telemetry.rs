use relay::config::LogFormat;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Used when `RUST_LOG` is unset. Upstream HTTP internals stay quiet; the
/// relay's own events and the request log stay at info.
const DEFAULT_FILTER: &str = "info,relay=info,actix_web=info,actix_server=warn,reqwest=warn,hyper=warn";

pub fn init_tracing(format: LogFormat) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // Exactly one of the two layers is installed.
    let (json, pretty) = match format {
        LogFormat::Json => (
            Some(
                fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_current_span(true)
                    .with_span_list(false)
                    .with_target(false),
            ),
            None,
        ),
        LogFormat::Pretty => (None, Some(fmt::layer().compact().with_target(false))),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json)
        .with(pretty)
        .init();
}
