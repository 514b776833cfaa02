//! Tracing subscriber setup.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Builds the filter from `RUST_LOG`-style directives, falling back to INFO
/// when none are given. Invalid directives are skipped.
pub fn env_filter(directives: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(directives.unwrap_or_default())
}

/// Installs the global subscriber, writing to stderr. Call after `.env` has
/// been loaded so a `RUST_LOG` set there is honored.
pub fn init() {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(directives.as_deref()))
        .with_writer(std::io::stderr)
        .init();
}
