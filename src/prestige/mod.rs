//! Prestige: luck points, the luck shop and the soft reset.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
