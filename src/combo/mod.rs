//! Combo detection, payout multipliers and chain tracking.

pub mod chain;
pub mod detect;
pub mod types;

pub use chain::chain_multiplier;
pub use detect::{combo_multiplier, detect_combo};
pub use types::{ComboChainStats, ComboHistoryEntry, ComboKind, ComboResult, SecondaryCombo};
