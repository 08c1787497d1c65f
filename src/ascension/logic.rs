//! Ascension unlock, upgrade and production logic.

use super::types::{
    ascension_tier_cost, ascension_unlock_cost, AscensionState, Focus, ProductionRates,
};
use crate::core::constants::*;
use crate::core::game_state::GameState;
use crate::numeric::Credits;
use crate::prestige::PrestigeState;
use tracing::{debug, info};

pub fn can_unlock_ascension(state: &GameState) -> bool {
    !state.ascension.unlocked && state.prestige.total_prestiges >= ASCENSION_PRESTIGE_THRESHOLD
}

/// Opens ascension with die 1 unlocked and the tick clock started at `now_ms`.
pub fn unlock_ascension(state: &GameState, now_ms: i64) -> Option<GameState> {
    if !can_unlock_ascension(state) {
        return None;
    }
    let mut next = state.clone();
    next.ascension.unlocked = true;
    next.ascension.last_tick = now_ms;
    next.ascension.die_mut(1)?.unlocked = true;
    info!(prestiges = state.prestige.total_prestiges, "ascension unlocked");
    Some(next)
}

pub fn unlock_ascension_die(state: &GameState, id: u8) -> Option<GameState> {
    if !state.ascension.unlocked || state.ascension.die(id)?.unlocked {
        return None;
    }
    let cost = ascension_unlock_cost(id)?;
    if state.ascension.stardust < cost {
        return None;
    }
    let mut next = state.clone();
    next.ascension.stardust -= cost;
    next.ascension.die_mut(id)?.unlocked = true;
    Some(next)
}

pub fn upgrade_ascension_die(state: &GameState, id: u8) -> Option<GameState> {
    let die = state.ascension.die(id)?;
    let tier = die.next_tier()?;
    let cost = ascension_tier_cost(die.tier);
    if state.ascension.stardust < cost {
        return None;
    }
    let mut next = state.clone();
    next.ascension.stardust -= cost;
    next.ascension.die_mut(id)?.tier = tier;
    Some(next)
}

/// Changes a die's focus. `None` if locked or already focused that way.
pub fn set_ascension_focus(state: &GameState, id: u8, focus: Focus) -> Option<GameState> {
    let die = state.ascension.die(id)?;
    if !die.unlocked || die.focus == focus {
        return None;
    }
    let mut next = state.clone();
    next.ascension.die_mut(id)?.focus = focus;
    Some(next)
}

/// `1 + luck × 0.01 + prestiges × 0.02`.
pub fn synergy_boost(prestige: &PrestigeState) -> f64 {
    1.0 + prestige.luck_points as f64 * ASCENSION_SYNERGY_PER_LUCK
        + prestige.total_prestiges as f64 * ASCENSION_SYNERGY_PER_PRESTIGE
}

/// Current per-second output. Zero while ascension is locked.
pub fn production_rates(state: &GameState) -> ProductionRates {
    let ascension = &state.ascension;
    if !ascension.unlocked {
        return ProductionRates::default();
    }
    let synergy = synergy_boost(&state.prestige);

    ascension
        .unlocked_dice()
        .fold(ProductionRates::default(), |mut rates, die| {
            let output =
                ASCENSION_BASE_RATE * (1.0 + ASCENSION_TIER_GROWTH * die.tier as f64) * synergy;
            match die.focus {
                Focus::Stardust => rates.stardust_per_sec += output,
                Focus::Resonance => {
                    rates.stardust_per_sec += output * (1.0 - RESONANCE_SHARE);
                    rates.resonance_per_sec += output * RESONANCE_SHARE * RESONANCE_YIELD;
                }
            }
            rates
        })
}

/// Roll multiplier from resonance: `min(1 + resonance × 0.02, 10)`, 1 while
/// locked.
pub fn resonance_multiplier(ascension: &AscensionState) -> f64 {
    if !ascension.unlocked {
        return 1.0;
    }
    let resonance = ascension.resonance.to_f64();
    if !resonance.is_finite() {
        return RESONANCE_MULT_CAP;
    }
    (1.0 + resonance * RESONANCE_MULT_PER_POINT).min(RESONANCE_MULT_CAP)
}

/// Accrues production for the time since `last_tick`.
///
/// `None` while locked or when less than `min_tick_ms` has passed; the
/// clock is left alone so short ticks accumulate. A clock that went
/// backwards re-anchors `last_tick` without producing.
pub fn tick_ascension(state: &GameState, now_ms: i64, min_tick_ms: u64) -> Option<GameState> {
    let ascension = &state.ascension;
    if !ascension.unlocked {
        return None;
    }
    let elapsed = now_ms.saturating_sub(ascension.last_tick);
    if elapsed < 0 {
        let mut next = state.clone();
        next.ascension.last_tick = now_ms;
        return Some(next);
    }
    if (elapsed as u64) < min_tick_ms {
        return None;
    }

    let seconds = elapsed as f64 / 1000.0;
    let rates = production_rates(state);
    let mut next = state.clone();
    next.ascension.stardust += Credits::from_f64(rates.stardust_per_sec * seconds);
    next.ascension.resonance += Credits::from_f64(rates.resonance_per_sec * seconds);
    next.ascension.last_tick = now_ms;
    next.ascension.total_cycles += 1;
    debug!(elapsed_ms = elapsed, ?rates, "ascension tick");
    Some(next)
}
