//! observability
//!
//! Tracing initialization for the binary.
//!
//! Logs go to stderr so they never interleave with a formula's stdout.
//! `RUST_LOG` takes precedence over the level picked from the CLI flags.

use tracing_subscriber::{prelude::*, EnvFilter};

use crate::ui::output::Verbosity;

/// Default filter directive for a verbosity level.
pub fn default_directive(verbosity: Verbosity) -> &'static str {
    match verbosity {
        Verbosity::Quiet => "formula_runner=error",
        Verbosity::Normal => "formula_runner=warn",
        Verbosity::Debug => "formula_runner=debug",
    }
}

/// Install the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init_tracing(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .try_init();
}
