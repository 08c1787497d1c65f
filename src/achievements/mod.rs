//! Achievement system.
//!
//! Achievements are static predicates evaluated after every roll. Unlocks
//! are monotonic and may grant a one-time credit payout or a permanent
//! roll multiplier.

pub mod data;
pub mod logic;
pub mod types;

pub use data::{get_achievement_def, get_achievements_by_category, ALL_ACHIEVEMENTS};
pub use logic::{achievement_multiplier, evaluate_achievements, unlock_achievements};
pub use types::{
    AchievementCategory, AchievementContext, AchievementDef, AchievementError, AchievementId,
    AchievementReward, AchievementState,
};
