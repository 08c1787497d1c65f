//! Die purchase transitions and cost getters.

use super::types::Die;
use crate::core::constants::*;
use crate::core::game_state::GameState;
use crate::numeric::Credits;
use tracing::info;

/// Credits needed to unlock die `id`, `None` for an unknown slot.
pub fn unlock_cost(id: u8) -> Option<Credits> {
    let index = (id as usize).checked_sub(1)?;
    DIE_UNLOCK_COSTS.get(index).map(|&c| Credits::from(c))
}

/// `floor(10 × id² × 1.15^(level − 1))`.
pub fn level_up_cost(die: &Die) -> Credits {
    let id = die.id as f64;
    let base = Credits::from_f64(DIE_LEVEL_BASE_COST * id * id);
    let growth = Credits::from_f64(DIE_LEVEL_COST_GROWTH).pow(die.level.saturating_sub(1) as f64);
    (base * growth).floor()
}

/// `100 × 10^animation_level`, `None` once maxed.
pub fn animation_upgrade_cost(die: &Die) -> Option<Credits> {
    if die.animation_level >= DIE_ANIMATION_MAX_LEVEL {
        return None;
    }
    Some(Credits::from(DIE_ANIMATION_BASE_COST) * Credits::from(10u64).pow(die.animation_level as f64))
}

/// Unlocks die `id`. `None` if unknown, already unlocked or unaffordable.
pub fn unlock_die(state: &GameState, id: u8) -> Option<GameState> {
    let die = state.die(id)?;
    if die.unlocked {
        return None;
    }
    let cost = unlock_cost(id)?;
    let mut next = state.clone();
    if !next.try_spend(cost) {
        return None;
    }
    next.die_mut(id)?.unlock();
    info!(die = id, "die unlocked");
    Some(next)
}

/// Levels die `id` up by one. `None` if locked or unaffordable.
pub fn level_up_die(state: &GameState, id: u8) -> Option<GameState> {
    let die = state.die(id)?;
    if !die.unlocked {
        return None;
    }
    let cost = level_up_cost(die);
    let level = die.level + 1;
    let mut next = state.clone();
    if !next.try_spend(cost) {
        return None;
    }
    next.die_mut(id)?.set_level(level);
    Some(next)
}

/// Cosmetic animation upgrade. `None` if locked, maxed or unaffordable.
pub fn upgrade_die_animation(state: &GameState, id: u8) -> Option<GameState> {
    let die = state.die(id)?;
    if !die.unlocked {
        return None;
    }
    let cost = animation_upgrade_cost(die)?;
    let mut next = state.clone();
    if !next.try_spend(cost) {
        return None;
    }
    next.die_mut(id)?.animation_level += 1;
    Some(next)
}

/// Sum of every unlocked die's weight, for "expected roll" displays.
pub fn production_weight(state: &GameState) -> Credits {
    state
        .unlocked_dice()
        .map(|d| d.multiplier * Credits::from(d.id as u64))
        .sum()
}
