//! Achievement types and data structures.

use crate::combo::ComboResult;
use crate::core::game_state::GameState;
use crate::numeric::Credits;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

/// Achievement categories for grouping in a browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AchievementCategory {
    Rolling,
    Combos,
    Wealth,
    Progression,
}

impl AchievementCategory {
    /// All categories in display order.
    pub const ALL: [AchievementCategory; 4] = [
        AchievementCategory::Rolling,
        AchievementCategory::Combos,
        AchievementCategory::Wealth,
        AchievementCategory::Progression,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AchievementCategory::Rolling => "Rolling",
            AchievementCategory::Combos => "Combos",
            AchievementCategory::Wealth => "Wealth",
            AchievementCategory::Progression => "Progression",
        }
    }
}

/// Unique identifier for each achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AchievementId {
    // Rolling
    FirstRoll,
    RollerI,   // 100 rolls
    RollerII,  // 1,000 rolls
    RollerIII, // 10,000 rolls
    RollerIV,  // 100,000 rolls
    LuckyStrike,
    CriticalMass, // 100 critical rolls
    HighRoller,

    // Combos
    FirstCombo,
    TripleThreat,
    FourOfAKind,
    FiveOfAKind,
    SixOfAKind,
    PerfectFlush,
    DoubleTrouble,
    ChainV,
    ChainX,
    ComboCollectorI,  // 100 combos
    ComboCollectorII, // 1,000 combos

    // Wealth
    Thousandaire,
    Millionaire,
    Billionaire,
    Trillionaire,
    BigWin, // single roll >= 1M

    // Progression
    FullSet,
    AutoPilot,
    FirstPrestige,
    PrestigeV,
    PrestigeXX,
    Ascended,
}

/// One-time reward granted on unlock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AchievementReward {
    None,
    /// Credited once, right after the unlocking roll.
    Credits(u64),
    /// Permanent multiplier on every later roll.
    Multiplier(f64),
}

/// Everything a predicate may inspect after a roll.
#[derive(Debug, Clone, Copy)]
pub struct AchievementContext<'a> {
    pub state: &'a GameState,
    /// Credits earned by the roll being evaluated.
    pub final_credits: Credits,
    pub combo: Option<&'a ComboResult>,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AchievementError {
    #[error("value undefined: {0}")]
    Undefined(&'static str),

    #[error("predicate failed: {0}")]
    Failed(String),
}

pub type AchievementCheck = fn(&AchievementContext<'_>) -> Result<bool, AchievementError>;

/// Static definition of an achievement.
pub struct AchievementDef {
    pub id: AchievementId,
    pub name: &'static str,
    pub description: &'static str,
    pub category: AchievementCategory,
    pub reward: AchievementReward,
    pub check: AchievementCheck,
}

impl fmt::Debug for AchievementDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AchievementDef")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("category", &self.category)
            .field("reward", &self.reward)
            .finish()
    }
}

/// Unlocked achievements. Unlocking is monotonic.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AchievementState {
    pub unlocked: BTreeSet<AchievementId>,
    /// Ids unlocked by the most recent evaluation.
    #[serde(skip)]
    pub newly_unlocked: Vec<AchievementId>,
}

impl AchievementState {
    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.unlocked.contains(&id)
    }

    pub fn unlocked_count(&self) -> usize {
        self.unlocked.len()
    }

    /// Unlock percentage (0.0 - 100.0).
    pub fn unlock_percentage(&self) -> f32 {
        use super::data::ALL_ACHIEVEMENTS;

        let total = ALL_ACHIEVEMENTS.len();
        if total == 0 {
            return 0.0;
        }
        (self.unlocked_count() as f32 / total as f32) * 100.0
    }

    /// (unlocked, total) for a category.
    pub fn count_by_category(&self, category: AchievementCategory) -> (usize, usize) {
        use super::data::ALL_ACHIEVEMENTS;

        let in_category: Vec<_> = ALL_ACHIEVEMENTS
            .iter()
            .filter(|a| a.category == category)
            .collect();
        let unlocked = in_category
            .iter()
            .filter(|a| self.is_unlocked(a.id))
            .count();
        (unlocked, in_category.len())
    }
}
