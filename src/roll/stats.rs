//! Lifetime roll statistics.

use crate::combo::{ComboChainStats, ComboKind};
use crate::core::constants::RECENT_ROLLS_LEN;
use crate::numeric::Credits;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};

/// One entry of the recent-rolls ring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentRoll {
    pub roll: u64,
    pub faces: Vec<u8>,
    pub credits: Credits,
    pub combo: Option<ComboKind>,
    #[serde(default)]
    pub critical: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameStats {
    pub total_rolls: u64,
    pub best_roll: Credits,
    pub best_roll_faces: Vec<u8>,
    pub total_earned: Credits,
    pub last_roll_credits: Credits,
    pub total_combos: u64,
    /// Primary combo counts by kind.
    pub combo_counts: BTreeMap<ComboKind, u64>,
    pub multi_combos: u64,
    pub critical_rolls: u64,
    /// Most-recent-first, bounded to `RECENT_ROLLS_LEN`.
    pub recent_rolls: VecDeque<RecentRoll>,
    pub combo_chain: ComboChainStats,
}

impl GameStats {
    /// Folds one resolved roll into the totals. `total_rolls` and the chain
    /// are advanced by the resolver before this is called.
    pub fn record_roll(&mut self, entry: RecentRoll, multi_combo: bool) {
        self.total_earned += entry.credits;
        self.last_roll_credits = entry.credits;
        if entry.credits > self.best_roll {
            self.best_roll = entry.credits;
            self.best_roll_faces = entry.faces.clone();
        }
        if let Some(kind) = entry.combo {
            self.total_combos += 1;
            *self.combo_counts.entry(kind).or_insert(0) += 1;
            if multi_combo {
                self.multi_combos += 1;
            }
        }
        if entry.critical {
            self.critical_rolls += 1;
        }

        self.recent_rolls.push_front(entry);
        self.recent_rolls.truncate(RECENT_ROLLS_LEN);
    }

    pub fn combo_count(&self, kind: ComboKind) -> u64 {
        self.combo_counts.get(&kind).copied().unwrap_or(0)
    }
}
