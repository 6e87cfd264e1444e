use std::time::Duration;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Environment variable selecting the log output format (`json` or `text`)
pub const LOG_FORMAT_VAR: &str = "SKOO_LOG_FORMAT";

/// Install the global tracing subscriber.
///
/// The filter comes from `RUST_LOG` and defaults to `info`. Output is JSON
/// lines when `SKOO_LOG_FORMAT=json`, human-readable text otherwise. Calling
/// this twice is harmless; the second subscriber is ignored.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var(LOG_FORMAT_VAR).is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    let result =
        if json { builder.json().flatten_event(true).try_init() } else { builder.try_init() };

    if let Err(err) = result {
        warn!(error = %err, "tracing subscriber already installed");
    }
}

/// Log the outcome of a handler with structured fields.
///
/// `handler` is a stable route identifier (e.g. `"copilot::run"`); callers
/// must not put user data in it.
#[inline]
pub fn log_handler_execution(handler: &str, elapsed: Duration, success: bool) {
    let duration_ms = duration_ms(elapsed);

    if success {
        info!(handler, duration_ms, "handler_execution_success");
    } else {
        warn!(handler, duration_ms, "handler_execution_failure");
    }
}

/// Whole milliseconds in `elapsed`, saturating at `u64::MAX`.
pub fn duration_ms(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}
