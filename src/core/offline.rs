//! Offline progression.
//!
//! Replays the autoroll rolls that would have happened while the game was
//! closed through the normal roll pipeline, so chains, achievements and
//! multipliers interact exactly as in live play. Ascension production for
//! the same window is accrued by a single time-based tick.

use super::config::EconomyConfig;
use super::game_state::GameState;
use super::rng::FaceSource;
use crate::achievements::AchievementId;
use crate::ascension::tick_ascension;
use crate::autoroll::cooldown_ms;
use crate::numeric::Credits;
use crate::roll::{resolve_roll, ResolvedRoll};
use tracing::info;

/// Report of offline progression results
#[derive(Debug, Default, Clone, PartialEq)]
pub struct OfflineReport {
    /// Wall-clock time since the last save.
    pub elapsed_ms: i64,
    /// Portion of `elapsed_ms` that was replayed after the offline cap.
    pub replayed_ms: i64,
    pub rolls_performed: u64,
    pub credits_before: Credits,
    pub credits_after: Credits,
    pub combos: u64,
    pub critical_rolls: u64,
    pub best_chain: u32,
    pub achievements_unlocked: Vec<AchievementId>,
    pub stardust_gained: Credits,
}

impl OfflineReport {
    pub fn credits_gained(&self) -> Credits {
        self.credits_after - self.credits_before
    }
}

/// Number of autoroll rolls `elapsed_ms` pays for, or 0 when autoroll is
/// inactive or its cooldown unusable.
pub fn offline_roll_count(state: &GameState, elapsed_ms: i64) -> u64 {
    if !state.autoroll.is_active() || elapsed_ms <= 0 {
        return 0;
    }
    match cooldown_ms(&state.autoroll) {
        Some(cooldown) => (elapsed_ms as f64 / cooldown).floor() as u64,
        None => 0,
    }
}

/// Applies offline progress up to `now_ms` and stamps the save timestamp.
pub fn process_offline_progress<S: FaceSource + ?Sized>(
    state: &GameState,
    now_ms: i64,
    economy: &EconomyConfig,
    source: &mut S,
) -> (GameState, OfflineReport) {
    let elapsed_ms = now_ms.saturating_sub(state.last_save_timestamp);
    let mut next = state.clone();
    let mut report = OfflineReport {
        elapsed_ms,
        credits_before: state.credits,
        credits_after: state.credits,
        ..OfflineReport::default()
    };

    if elapsed_ms <= 0 {
        next.last_save_timestamp = now_ms;
        return (next, report);
    }

    let cap_ms = economy.max_offline_seconds.saturating_mul(1000) as i64;
    let replayed_ms = elapsed_ms.min(cap_ms.max(0));
    report.replayed_ms = replayed_ms;

    let rolls = offline_roll_count(&next, replayed_ms);
    for _ in 0..rolls {
        let ResolvedRoll { state: rolled, outcome } = resolve_roll(&next, economy, source);
        next = rolled;
        if outcome.combo.is_some() {
            report.combos += 1;
        }
        if outcome.is_critical {
            report.critical_rolls += 1;
        }
        report.best_chain = report.best_chain.max(outcome.chain);
        report.achievements_unlocked.extend(outcome.new_achievements);
    }
    report.rolls_performed = rolls;

    let stardust_before = next.ascension.stardust;
    if let Some(ticked) = tick_ascension(&next, now_ms, economy.ascension_min_tick_ms) {
        next = ticked;
    }
    report.stardust_gained = next.ascension.stardust - stardust_before;

    for die in &mut next.dice {
        die.is_rolling = false;
    }
    next.achievements.newly_unlocked = report.achievements_unlocked.clone();
    next.last_save_timestamp = now_ms;
    report.credits_after = next.credits;

    if rolls > 0 {
        info!(
            elapsed_ms,
            rolls,
            credits = %report.credits_gained(),
            "offline progress applied"
        );
    }
    (next, report)
}
