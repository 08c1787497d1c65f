//! Single-roll resolution pipeline.
//!
//! A roll draws one face per unlocked die, sums `multiplier × face × id`,
//! then applies in order: combo, chain, luck, shop, resonance, achievement
//! and critical factors. Stats, chain and achievements are folded into the
//! returned state; the input state is never touched.

use super::stats::RecentRoll;
use crate::achievements::{
    achievement_multiplier, evaluate_achievements, unlock_achievements, AchievementContext,
    AchievementId, ALL_ACHIEVEMENTS,
};
use crate::ascension::resonance_multiplier;
use crate::combo::{chain_multiplier, combo_multiplier, detect_combo, ComboResult};
use crate::core::config::EconomyConfig;
use crate::core::constants::CRIT_CHANCE_PER_LEVEL;
use crate::core::game_state::GameState;
use crate::core::rng::FaceSource;
use crate::numeric::Credits;
use crate::prestige::{luck_multiplier, shop_multiplier, CRITICAL_INSIGHT};
use tracing::debug;

/// What one roll produced, for callers that animate or log it.
#[derive(Debug, Clone, PartialEq)]
pub struct RollOutcome {
    /// 1-based index of this roll.
    pub roll_index: u64,
    /// Faces of the unlocked dice in id order.
    pub faces: Vec<u8>,
    /// `Σ multiplier × face × id` before any factor.
    pub base_credits: Credits,
    /// Net credits from the roll itself.
    pub credits_earned: Credits,
    /// One-time achievement rewards credited after the roll.
    pub reward_credits: Credits,
    pub combo: Option<ComboResult>,
    /// Chain length after this roll (0 without a combo).
    pub chain: u32,
    pub is_critical: bool,
    pub new_achievements: Vec<AchievementId>,
}

#[derive(Debug, Clone)]
pub struct ResolvedRoll {
    pub state: GameState,
    pub outcome: RollOutcome,
}

/// State-wide factors applied after combo and chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RollMultipliers {
    pub luck: f64,
    pub shop: f64,
    pub resonance: f64,
    pub achievement: f64,
}

impl RollMultipliers {
    pub fn for_state(state: &GameState) -> Self {
        Self {
            luck: luck_multiplier(state.prestige.luck_points),
            shop: shop_multiplier(&state.prestige),
            resonance: resonance_multiplier(&state.ascension),
            achievement: achievement_multiplier(&state.achievements),
        }
    }

    pub fn apply(&self, credits: Credits) -> Credits {
        credits
            .mul_f64(self.luck)
            .mul_f64(self.shop)
            .mul_f64(self.resonance)
            .mul_f64(self.achievement)
    }
}

/// Probability that a roll is critical, clamped to `[0, 1]`.
pub fn critical_chance(state: &GameState, economy: &EconomyConfig) -> f64 {
    let insight = state.prestige.shop_level(CRITICAL_INSIGHT) as f64;
    (economy.critical_chance + CRIT_CHANCE_PER_LEVEL * insight).clamp(0.0, 1.0)
}

/// Resolves one roll against `state`.
pub fn resolve_roll<S: FaceSource + ?Sized>(
    state: &GameState,
    economy: &EconomyConfig,
    source: &mut S,
) -> ResolvedRoll {
    let multipliers = RollMultipliers::for_state(state);
    let crit_chance = critical_chance(state, economy);
    let mut next = state.clone();

    let mut faces = Vec::with_capacity(next.dice.len());
    let mut base = Credits::ZERO;
    for die in next.dice.iter_mut().filter(|d| d.unlocked) {
        let face = source.roll_face();
        die.current_face = face;
        faces.push(face);
        base += die.multiplier * Credits::from(face as u64) * Credits::from(die.id as u64);
    }

    let combo = detect_combo(&faces);
    let roll_index = next.stats.total_rolls + 1;
    next.stats.total_rolls = roll_index;
    let chain = next.stats.combo_chain.record(roll_index, combo.as_ref());

    let mut credits = base;
    if let Some(c) = &combo {
        credits = credits
            .mul_f64(combo_multiplier(c))
            .mul_f64(chain_multiplier(chain));
    }
    credits = multipliers.apply(credits);

    let is_critical = crit_chance > 0.0 && source.roll_chance() < crit_chance;
    if is_critical {
        credits = credits.mul_f64(economy.critical_multiplier);
    }

    next.credits += credits;
    next.stats.record_roll(
        RecentRoll {
            roll: roll_index,
            faces: faces.clone(),
            credits,
            combo: combo.as_ref().map(|c| c.kind),
            critical: is_critical,
        },
        combo.as_ref().is_some_and(|c| c.is_multi_combo),
    );

    let new_achievements = {
        let ctx = AchievementContext {
            state: &next,
            final_credits: credits,
            combo: combo.as_ref(),
        };
        evaluate_achievements(ALL_ACHIEVEMENTS, &ctx, &next.achievements)
    };
    let reward_credits = unlock_achievements(&mut next.achievements, &new_achievements);
    next.credits += reward_credits;

    debug!(
        roll = roll_index,
        credits = %credits,
        combo = ?combo.as_ref().map(|c| c.kind),
        chain,
        critical = is_critical,
        "roll resolved"
    );

    ResolvedRoll {
        state: next,
        outcome: RollOutcome {
            roll_index,
            faces,
            base_credits: base,
            credits_earned: credits,
            reward_credits,
            combo,
            chain,
            is_critical,
            new_achievements,
        },
    }
}

/// Spends one reroll token on an extra roll. `None` without tokens.
pub fn reroll_with_token<S: FaceSource + ?Sized>(
    state: &GameState,
    economy: &EconomyConfig,
    source: &mut S,
) -> Option<ResolvedRoll> {
    if state.prestige.consumables.reroll_tokens == 0 {
        return None;
    }
    let mut spent = state.clone();
    spent.prestige.consumables.reroll_tokens -= 1;
    Some(resolve_roll(&spent, economy, source))
}
