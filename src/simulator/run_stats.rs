//! Per-run statistics.

use crate::numeric::Credits;
use crate::roll::RollOutcome;
use serde::Serialize;

/// Statistics for a single simulated playthrough.
///
/// Counters span prestige resets; the game's own `GameStats` do not.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunStats {
    pub seed: Option<u64>,
    pub total_rolls: u64,
    pub manual_rolls: u64,
    pub auto_rolls: u64,
    pub combos: u64,
    pub critical_rolls: u64,
    pub best_chain: u32,
    /// Roll income plus achievement rewards.
    pub total_earned: Credits,
    pub final_credits: Credits,
    pub purchases: u64,
    pub prestiges: u64,
    pub luck_gained: u64,
    pub achievements_unlocked: usize,
    pub dice_unlocked: usize,
    pub autoroll_level: u32,
}

impl RunStats {
    pub fn record_roll(&mut self, outcome: &RollOutcome) {
        self.total_rolls += 1;
        if outcome.combo.is_some() {
            self.combos += 1;
        }
        if outcome.is_critical {
            self.critical_rolls += 1;
        }
        self.best_chain = self.best_chain.max(outcome.chain);
        self.total_earned += outcome.credits_earned + outcome.reward_credits;
    }

    pub fn combo_rate(&self) -> f64 {
        if self.total_rolls == 0 {
            0.0
        } else {
            self.combos as f64 / self.total_rolls as f64
        }
    }
}
