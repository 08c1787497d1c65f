//! Die slot data.

use crate::core::constants::{DIE_LEVEL_MULT_STEP, DIE_MILESTONE_LEVELS};
use crate::numeric::Credits;
use serde::{Deserialize, Serialize};

/// One die slot. `id` doubles as the slot's production weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Die {
    pub id: u8,
    pub unlocked: bool,
    pub level: u32,
    /// Always `die_multiplier(level)`; stored for display and snapshots.
    pub multiplier: Credits,
    #[serde(default)]
    pub animation_level: u32,
    pub current_face: u8,
    /// Mid-animation flag owned by the UI (transient).
    #[serde(skip)]
    pub is_rolling: bool,
}

impl Die {
    pub fn locked(id: u8) -> Self {
        Self {
            id,
            unlocked: false,
            level: 0,
            multiplier: die_multiplier(0),
            animation_level: 0,
            current_face: 1,
            is_rolling: false,
        }
    }

    pub fn starter(id: u8) -> Self {
        let mut die = Self::locked(id);
        die.unlock();
        die
    }

    /// Unlocks at level 1.
    pub fn unlock(&mut self) {
        self.unlocked = true;
        self.set_level(1);
    }

    pub fn set_level(&mut self, level: u32) {
        self.level = level;
        self.multiplier = die_multiplier(level);
    }
}

/// Production multiplier for a die level.
///
/// `(1 + 0.5 × (level − 1)) × 2^(level / 25)`; zero for a locked (level 0)
/// die. Non-decreasing in level.
pub fn die_multiplier(level: u32) -> Credits {
    if level == 0 {
        return Credits::ZERO;
    }
    let linear = Credits::from_f64(1.0 + DIE_LEVEL_MULT_STEP * (level - 1) as f64);
    let milestones = level / DIE_MILESTONE_LEVELS;
    linear * Credits::from(2u64).pow(milestones as f64)
}
