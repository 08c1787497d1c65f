//! Roll resolution and the statistics it maintains.

pub mod resolver;
pub mod stats;

pub use resolver::{
    critical_chance, reroll_with_token, resolve_roll, ResolvedRoll, RollMultipliers, RollOutcome,
};
pub use stats::{GameStats, RecentRoll};
