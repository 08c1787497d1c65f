//! Dice slots: unlocking, levelling and their production multipliers.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::{die_multiplier, Die};
