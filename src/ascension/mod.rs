//! Ascension: stardust and resonance production unlocked by prestiging.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::{
    ascension_tier_cost, ascension_unlock_cost, AscensionDie, AscensionState, Focus,
    ProductionRates,
};
