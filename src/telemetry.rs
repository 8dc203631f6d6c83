//! Telemetry initialization (tracing/tracing-subscriber).
//!
//! - LOG_LEVEL controls the filter (e.g. "debug" or detailed directives like
//!   "info,catalog=debug,mathhub_backend=debug,tower_http=info").
//! - LOG_FORMAT selects "pretty" (default) or "json" structured logs.

use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| {
        EnvFilter::new("info,catalog=debug,progress=debug,mathhub_backend=debug,tower_http=info,axum=info")
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    // JSON vs pretty decided up front; the two builders are distinct types.
    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => builder.json().init(),
        _ => builder.init(),
    }
}
