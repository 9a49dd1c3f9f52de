//! Shared environment setup for the simulation binaries.
//!
//! Consolidates the `RAYON_NUM_THREADS` read and the `SUBSEARCH_*`
//! configuration overrides.

use crate::config::SearchConfig;
use crate::error::ConfigError;

/// Read `RAYON_NUM_THREADS` (fallback `OMP_NUM_THREADS`, default: all cores).
/// Builds the rayon global thread pool, tolerating one that already exists.
/// Returns the pool's thread count.
pub fn init_rayon_threads() -> usize {
    let requested: Option<usize> = std::env::var("RAYON_NUM_THREADS")
        .or_else(|_| std::env::var("OMP_NUM_THREADS"))
        .ok()
        .and_then(|s| s.parse().ok());
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = requested {
        builder = builder.num_threads(n);
    }
    builder.build_global().ok(); // May fail if already initialized
    let num_threads = rayon::current_num_threads();
    tracing::info!(num_threads, "rayon thread pool ready");
    num_threads
}

/// Configuration from `SUBSEARCH_*` variables. Exits with a message on
/// malformed values, like every other startup failure in the binaries.
pub fn search_config_or_exit() -> SearchConfig {
    match SearchConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => exit_config_error(&e),
    }
}

pub fn exit_config_error(e: &ConfigError) -> ! {
    eprintln!("Configuration error: {}", e);
    std::process::exit(2);
}
