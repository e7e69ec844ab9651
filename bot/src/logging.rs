//! Development-time tracing for debugging the bot.
//!
//! # Separation of Concerns
//!
//! - **Tracing (this module)**: Dev diagnostics via `RUST_LOG`, output to stderr.
//!   Not persisted, not part of the bot's product output.
//!
//! - **Journal (`io/journal`)**: Product log in `logs/YYYY-MM-DD.log`.
//!   Always written, unaffected by `RUST_LOG`.
//!
//! Timestamps are left off stderr; the journal already carries them.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset. Keeps stderr quiet so the operator
/// console on stdout stays readable.
const DEFAULT_FILTER: &str = "warn";

/// Filter for the given `RUST_LOG` value. Unset, blank, or unparseable
/// directives fall back to [`DEFAULT_FILTER`] instead of aborting startup.
fn build_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the stderr subscriber. Call once, before the banner.
///
/// ```bash
/// RUST_LOG=agent_bot::cycle=debug agent-bot --root work
/// ```
pub fn init() {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact();

    tracing_subscriber::registry()
        .with(build_filter(directives.as_deref()))
        .with(layer)
        .init();
}
