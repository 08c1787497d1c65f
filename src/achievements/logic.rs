//! Achievement evaluation and reward application.

use super::data::{get_achievement_def, ALL_ACHIEVEMENTS};
use super::types::{
    AchievementContext, AchievementDef, AchievementId, AchievementReward, AchievementState,
};
use crate::numeric::Credits;
use tracing::{info, warn};

/// Runs every not-yet-unlocked predicate in `defs` and returns the ids that
/// now pass, in definition order.
///
/// A predicate that errors is logged and counted as not unlocked; it never
/// stops evaluation of the rest.
pub fn evaluate_achievements(
    defs: &[AchievementDef],
    ctx: &AchievementContext<'_>,
    state: &AchievementState,
) -> Vec<AchievementId> {
    let mut passed = Vec::new();
    for def in defs {
        if state.is_unlocked(def.id) {
            continue;
        }
        match (def.check)(ctx) {
            Ok(true) => passed.push(def.id),
            Ok(false) => {}
            Err(e) => warn!(achievement = def.name, error = %e, "achievement check failed"),
        }
    }
    passed
}

/// Marks `ids` unlocked and returns the one-time credit rewards they grant.
///
/// `newly_unlocked` is replaced with the ids that were actually new.
pub fn unlock_achievements(state: &mut AchievementState, ids: &[AchievementId]) -> Credits {
    state.newly_unlocked.clear();
    let mut reward = Credits::ZERO;
    for &id in ids {
        if !state.unlocked.insert(id) {
            continue;
        }
        state.newly_unlocked.push(id);
        if let Some(def) = get_achievement_def(id) {
            info!(achievement = def.name, "achievement unlocked");
            if let AchievementReward::Credits(amount) = def.reward {
                reward += Credits::from(amount);
            }
        }
    }
    reward
}

/// Product of every unlocked multiplier reward (1.0 with none).
pub fn achievement_multiplier(state: &AchievementState) -> f64 {
    ALL_ACHIEVEMENTS
        .iter()
        .filter(|def| state.is_unlocked(def.id))
        .filter_map(|def| match def.reward {
            AchievementReward::Multiplier(m) if m.is_finite() && m > 0.0 => Some(m),
            _ => None,
        })
        .product()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::achievements::types::{AchievementCategory, AchievementError};
    use crate::core::game_state::GameState;

    fn ctx(state: &GameState) -> AchievementContext<'_> {
        AchievementContext {
            state,
            final_credits: Credits::ZERO,
            combo: None,
        }
    }

    static FAULTY: &[AchievementDef] = &[
        AchievementDef {
            id: AchievementId::FirstRoll,
            name: "broken",
            description: "always errors",
            category: AchievementCategory::Rolling,
            reward: AchievementReward::None,
            check: |_| Err(AchievementError::Failed("boom".to_string())),
        },
        AchievementDef {
            id: AchievementId::RollerI,
            name: "fine",
            description: "always passes",
            category: AchievementCategory::Rolling,
            reward: AchievementReward::Credits(7),
            check: |_| Ok(true),
        },
    ];

    #[test]
    fn test_failing_predicate_does_not_block_others() {
        let state = GameState::new(0);
        let passed = evaluate_achievements(FAULTY, &ctx(&state), &AchievementState::default());
        assert_eq!(passed, vec![AchievementId::RollerI]);
    }

    #[test]
    fn test_high_roller_undefined_before_first_roll() {
        let state = GameState::new(0);
        let passed =
            evaluate_achievements(ALL_ACHIEVEMENTS, &ctx(&state), &AchievementState::default());
        assert!(!passed.contains(&AchievementId::HighRoller));
        assert!(!passed.contains(&AchievementId::FirstRoll));
    }

    #[test]
    fn test_unlocked_ids_are_skipped() {
        let mut state = GameState::new(0);
        state.stats.total_rolls = 1;
        let mut achievements = AchievementState::default();
        achievements.unlocked.insert(AchievementId::FirstRoll);
        let passed = evaluate_achievements(ALL_ACHIEVEMENTS, &ctx(&state), &achievements);
        assert!(!passed.contains(&AchievementId::FirstRoll));
    }

    #[test]
    fn test_unlock_grants_credit_rewards_once() {
        let mut achievements = AchievementState::default();
        let reward = unlock_achievements(
            &mut achievements,
            &[AchievementId::FirstRoll, AchievementId::FirstCombo],
        );
        assert_eq!(reward, Credits::from(35u64));
        assert_eq!(achievements.newly_unlocked.len(), 2);

        let again = unlock_achievements(&mut achievements, &[AchievementId::FirstRoll]);
        assert_eq!(again, Credits::ZERO);
        assert!(achievements.newly_unlocked.is_empty());
    }

    #[test]
    fn test_achievement_multiplier() {
        let mut achievements = AchievementState::default();
        assert_eq!(achievement_multiplier(&achievements), 1.0);
        achievements.unlocked.insert(AchievementId::FirstRoll);
        assert_eq!(achievement_multiplier(&achievements), 1.0);
        achievements.unlocked.insert(AchievementId::Ascended);
        assert_eq!(achievement_multiplier(&achievements), 1.5);
    }
}
