//! Arbitrary-precision currency.
//!
//! Every currency-typed value in the economy (credits, stardust, resonance,
//! costs) is a [`Credits`]. Native floats are only used for bounded
//! multipliers and for display.

pub mod credits;
pub mod format;

pub use credits::{Credits, ParseCreditsError};
pub use format::{format_credits, NumberFormat};
