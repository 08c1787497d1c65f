//! Autoroll purchase and settings transitions.

use super::types::AutorollConfig;
use crate::core::constants::*;
use crate::core::game_state::GameState;
use crate::numeric::Credits;
use tracing::info;

/// `max(2.0 × 0.85^(level − 1), 0.01)` seconds; level 0 uses the base.
pub fn cooldown_for_level(level: u32) -> f64 {
    let steps = level.saturating_sub(1) as i32;
    (AUTOROLL_BASE_COOLDOWN * AUTOROLL_COOLDOWN_DECAY.powi(steps)).max(AUTOROLL_MIN_COOLDOWN)
}

/// Cooldown in ms, or `None` when it is not a positive finite number.
pub fn cooldown_ms(config: &AutorollConfig) -> Option<f64> {
    let ms = config.cooldown * 1000.0;
    (ms.is_finite() && ms > 0.0).then_some(ms)
}

/// Price of the next level: the unlock price at level 0, then
/// `floor(250 × 1.6^(level − 1))`. `None` at max level.
pub fn autoroll_upgrade_cost(level: u32) -> Option<Credits> {
    if level >= AUTOROLL_MAX_LEVEL {
        return None;
    }
    if level == 0 {
        return Some(Credits::from(AUTOROLL_UNLOCK_COST));
    }
    let growth = Credits::from_f64(AUTOROLL_UPGRADE_GROWTH).pow((level - 1) as f64);
    Some((Credits::from_f64(AUTOROLL_UPGRADE_BASE_COST) * growth).floor())
}

/// Unlocks (and enables) autoroll, or buys the next level.
pub fn upgrade_autoroll(state: &GameState) -> Option<GameState> {
    let cost = autoroll_upgrade_cost(state.autoroll.level)?;
    let mut next = state.clone();
    if !next.try_spend(cost) {
        return None;
    }
    let autoroll = &mut next.autoroll;
    if autoroll.level == 0 {
        autoroll.enabled = true;
        info!("autoroll unlocked");
    }
    autoroll.level += 1;
    autoroll.cooldown = cooldown_for_level(autoroll.level);
    Some(next)
}

/// Flips `enabled`. `None` while locked.
pub fn toggle_autoroll(state: &GameState) -> Option<GameState> {
    if !state.autoroll.is_unlocked() {
        return None;
    }
    let mut next = state.clone();
    next.autoroll.enabled = !next.autoroll.enabled;
    Some(next)
}

/// `None` if dynamic batching is already in the requested state.
pub fn set_dynamic_batch(state: &GameState, enabled: bool) -> Option<GameState> {
    if state.autoroll.dynamic_batch == enabled {
        return None;
    }
    let mut next = state.clone();
    next.autoroll.dynamic_batch = enabled;
    Some(next)
}

/// Updates the batch limits. Rejects a zero roll cap or a negative or
/// non-finite threshold.
pub fn configure_batching(
    state: &GameState,
    max_rolls_per_tick: u32,
    batch_threshold_ms: f64,
    animation_budget: u32,
) -> Option<GameState> {
    if max_rolls_per_tick == 0 || !batch_threshold_ms.is_finite() || batch_threshold_ms < 0.0 {
        return None;
    }
    let mut next = state.clone();
    next.autoroll.max_rolls_per_tick = max_rolls_per_tick;
    next.autoroll.batch_threshold_ms = batch_threshold_ms;
    next.autoroll.animation_budget = animation_budget;
    Some(next)
}
