//! Ascension types: the second meta layer.

use crate::core::constants::{
    ASCENSION_DICE_COUNT, ASCENSION_MAX_TIER, ASCENSION_TIER_BASE_COST,
    ASCENSION_TIER_COST_GROWTH, ASCENSION_UNLOCK_COSTS,
};
use crate::numeric::Credits;
use serde::{Deserialize, Serialize};

/// Where an ascension die's output goes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Focus {
    /// Everything becomes stardust.
    #[default]
    Stardust,
    /// Part of the output is diverted into resonance.
    Resonance,
}

impl Focus {
    pub fn name(&self) -> &'static str {
        match self {
            Focus::Stardust => "Stardust",
            Focus::Resonance => "Resonance",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AscensionDie {
    pub id: u8,
    pub unlocked: bool,
    pub tier: u32,
    #[serde(default)]
    pub focus: Focus,
}

impl AscensionDie {
    pub fn locked(id: u8) -> Self {
        Self {
            id,
            unlocked: false,
            tier: 0,
            focus: Focus::Stardust,
        }
    }

    /// Next tier, or `None` when locked or maxed.
    pub fn next_tier(&self) -> Option<u32> {
        if !self.unlocked || self.tier >= ASCENSION_MAX_TIER {
            return None;
        }
        Some(self.tier + 1)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AscensionState {
    pub unlocked: bool,
    pub stardust: Credits,
    pub resonance: Credits,
    pub dice: Vec<AscensionDie>,
    /// Wall-clock ms of the last applied production tick.
    pub last_tick: i64,
    /// Production ticks applied so far.
    pub total_cycles: u64,
}

impl Default for AscensionState {
    fn default() -> Self {
        Self {
            unlocked: false,
            stardust: Credits::ZERO,
            resonance: Credits::ZERO,
            dice: (1..=ASCENSION_DICE_COUNT as u8)
                .map(AscensionDie::locked)
                .collect(),
            last_tick: 0,
            total_cycles: 0,
        }
    }
}

impl AscensionState {
    pub fn die(&self, id: u8) -> Option<&AscensionDie> {
        self.dice.iter().find(|d| d.id == id)
    }

    pub fn die_mut(&mut self, id: u8) -> Option<&mut AscensionDie> {
        self.dice.iter_mut().find(|d| d.id == id)
    }

    pub fn unlocked_dice(&self) -> impl Iterator<Item = &AscensionDie> {
        self.dice.iter().filter(|d| d.unlocked)
    }
}

/// Per-second output of all unlocked ascension dice.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProductionRates {
    pub stardust_per_sec: f64,
    pub resonance_per_sec: f64,
}

/// Stardust to unlock ascension die `id`.
pub fn ascension_unlock_cost(id: u8) -> Option<Credits> {
    let index = (id as usize).checked_sub(1)?;
    ASCENSION_UNLOCK_COSTS.get(index).map(|&c| Credits::from(c))
}

/// Stardust to go from `tier` to `tier + 1`: `floor(50 × 2.5^tier)`.
pub fn ascension_tier_cost(tier: u32) -> Credits {
    (Credits::from_f64(ASCENSION_TIER_BASE_COST)
        * Credits::from_f64(ASCENSION_TIER_COST_GROWTH).pow(tier as f64))
    .floor()
}
