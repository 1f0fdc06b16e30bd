//! One tracing subscriber per test binary.
//!
//! `TEST_LOG` (falling back to `RUST_LOG`, then `warn`) picks the filter.
//! `TEST_LOG_FORMAT=json` switches to the relay's production line format,
//! handy when checking which fields a `request_completed` event carries.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

fn filter() -> EnvFilter {
    ["TEST_LOG", "RUST_LOG"]
        .iter()
        .find_map(|key| std::env::var(key).ok())
        .map(EnvFilter::new)
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

fn wants_json() -> bool {
    std::env::var("TEST_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"))
}

/// Install the test subscriber. Idempotent; an already installed global
/// subscriber is left alone.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let (json, text) = if wants_json() {
            (
                Some(fmt::layer().json().flatten_event(true).with_test_writer()),
                None,
            )
        } else {
            (None, Some(fmt::layer().without_time().with_test_writer()))
        };

        tracing_subscriber::registry()
            .with(filter())
            .with(json)
            .with(text)
            .try_init()
            .ok();
    });
}
