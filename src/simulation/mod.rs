//! Trial execution and Monte Carlo aggregation.
//!
//! - [`trial`]: one target placement, sweep-retry loop until detection
//! - [`engine`]: N trials of one strategy (parallel or sequential)
//! - [`statistics`]: serializable summaries and the two-strategy comparison

pub mod engine;
pub mod statistics;
pub mod trial;

// Re-export commonly used items
pub use engine::{
    simulate_batch, simulate_batch_outcomes, simulate_batch_outcomes_sequential,
    simulate_batch_sequential, summarize, SimulationResult,
};
pub use statistics::{compare_strategies, percentile, BatchSummary, StrategyComparison};
pub use trial::{
    run_sweep, run_trial, run_trial_with_target, search_until_found, SearchOutcome, TrialOutcome,
};
