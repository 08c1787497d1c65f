use crate::core::constants::*;
use serde::{Deserialize, Serialize};

/// Unattended rolling settings. Level 0 means autoroll is still locked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutorollConfig {
    pub enabled: bool,
    pub level: u32,
    /// Seconds between rolls; always `cooldown_for_level(level)`.
    pub cooldown: f64,
    /// Use the batch scheduler when the cooldown is below the threshold.
    pub dynamic_batch: bool,
    pub batch_threshold_ms: f64,
    pub max_rolls_per_tick: u32,
    /// Outcomes per batch a UI should animate.
    pub animation_budget: u32,
}

impl Default for AutorollConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: 0,
            cooldown: AUTOROLL_BASE_COOLDOWN,
            dynamic_batch: true,
            batch_threshold_ms: DEFAULT_BATCH_THRESHOLD_MS,
            max_rolls_per_tick: DEFAULT_MAX_ROLLS_PER_TICK,
            animation_budget: DEFAULT_ANIMATION_BUDGET,
        }
    }
}

impl AutorollConfig {
    pub fn is_unlocked(&self) -> bool {
        self.level > 0
    }

    /// Enabled and unlocked.
    pub fn is_active(&self) -> bool {
        self.enabled && self.is_unlocked()
    }
}
