//! Combo chain bookkeeping.
//!
//! A chain link is a combo on the roll immediately after the previous combo
//! (by roll index). A combo after a gap restarts the chain at 1; a roll with
//! no combo drops it to 0.

use super::types::{ComboChainStats, ComboHistoryEntry, ComboResult};
use crate::core::constants::{CHAIN_BONUS_PER_LINK, COMBO_HISTORY_LEN};

impl ComboChainStats {
    /// Records roll `roll_index` and returns the chain length after it.
    pub fn record(&mut self, roll_index: u64, combo: Option<&ComboResult>) -> u32 {
        let Some(combo) = combo else {
            self.current = 0;
            return 0;
        };

        let continues = self.current > 0
            && self.last_combo_roll > 0
            && self.last_combo_roll + 1 == roll_index;
        self.current = if continues { self.current + 1 } else { 1 };
        self.best = self.best.max(self.current);
        self.last_combo_roll = roll_index;

        if self.history.len() >= COMBO_HISTORY_LEN {
            self.history.pop_back();
        }
        self.history.push_front(ComboHistoryEntry {
            roll: roll_index,
            kind: combo.kind,
            chain: self.current,
        });
        self.current
    }
}

/// Payout multiplier for a chain length: +10% per link beyond the first.
pub fn chain_multiplier(current: u32) -> f64 {
    if current <= 1 {
        return 1.0;
    }
    1.0 + CHAIN_BONUS_PER_LINK * (current - 1) as f64
}
