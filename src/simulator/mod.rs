//! Headless balance simulator for Monte Carlo analysis.
//!
//! Runs many seeded playthroughs to analyze:
//! - Credit income and upgrade pacing
//! - Combo and chain frequency
//! - Autoroll unlock timing
//! - Prestige and luck gain rates
//!
//! Every run drives a real `GameSession` (src/core/session.rs) with fixed
//! time steps, so simulation results match real gameplay behavior.

mod config;
mod report;
mod run_stats;
mod runner;

pub use config::SimConfig;
pub use report::SimReport;
pub use run_stats::RunStats;
pub use runner::{run_simulation, simulate_single_run};
