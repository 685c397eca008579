//! Shared `tracing` setup for the binaries.
//!
//! Logs go to stderr so they never interleave with menu text or JSON on
//! stdout. `RUST_LOG` overrides the per-binary default filter and
//! `TICKERDESK_LOG_JSON` switches to JSON lines.

use tracing_subscriber::{fmt, EnvFilter};

/// Initialise the global subscriber. `default_filter` applies when
/// `RUST_LOG` is unset or unparsable.
pub fn init(default_filter: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    let json_logging = std::env::var("TICKERDESK_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }
}
