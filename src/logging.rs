//! Log output for simulation runs.
//!
//! The core emits `tracing` events:
//! - TRACE: every tested cell and detector roll (very verbose)
//! - DEBUG: sweep boundaries and the best-cell estimate of each trial
//! - INFO: batch start and finish
//!
//! `RUST_LOG` overrides the level passed to [`init_logging`], e.g.
//! `RUST_LOG=subsearch::strategy=trace`.

use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging at `level` ("trace", "debug", "info", "warn", "error")
/// unless `RUST_LOG` is set. Safe to call more than once; later calls are
/// no-ops.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("{}={}", env!("CARGO_CRATE_NAME"), level).into());

    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .try_init();
}
