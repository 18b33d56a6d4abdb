//! Diagnostic tracing for the agent process.
//!
//! Two separate streams exist:
//!
//! - **Tracing (this module)**: what the agent is doing internally (config
//!   lookups, rotation decisions, loop ticks). Filtered by `RUST_LOG`, printed
//!   to stderr, never persisted.
//! - **Line logging ([`crate::io::line_logger`])**: the agent's own log file
//!   under the user cache directory, mirrored to stdout. Always written and
//!   unaffected by `RUST_LOG`.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "warn";
const VERBOSE_FILTER: &str = "warn,launch_agent=debug";

/// Install the stderr tracing subscriber.
///
/// `RUST_LOG` wins when set. Otherwise the filter is `warn`, or
/// `launch_agent=debug` when `verbose` is requested on the command line.
///
/// ```bash
/// RUST_LOG=launch_agent=trace launch-agent loop
/// ```
pub fn init(verbose: bool) {
    let fallback = if verbose {
        VERBOSE_FILTER
    } else {
        DEFAULT_FILTER
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}
