//! Autoroll: unattended rolling under a cooldown.

pub mod logic;
pub mod scheduler;
pub mod types;

pub use logic::*;
pub use scheduler::{AutorollMode, AutorollScheduler, RollBatch, SchedulerState, SingleRollTimer};
pub use types::AutorollConfig;
