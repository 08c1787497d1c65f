//! Main simulation runner.
//!
//! Each run drives a real [`GameSession`] with injected timestamps, so the
//! simulator exercises the exact roll pipeline, autoroll scheduling and
//! prestige rules the game uses. Statistics are tracked externally from the
//! roll outcomes the session reports.

use super::config::SimConfig;
use super::report::SimReport;
use super::run_stats::RunStats;
use crate::autoroll::{autoroll_upgrade_cost, upgrade_autoroll};
use crate::core::game_state::GameState;
use crate::core::rng::{FaceSource, RandomFaces};
use crate::core::session::GameSession;
use crate::dice::{level_up_cost, level_up_die, unlock_cost, unlock_die};
use crate::numeric::Credits;
use crate::prestige::{
    buy_prestige_upgrade, can_buy_prestige_upgrade, can_prestige, item_cost, ShopItemKind,
    SHOP_ITEMS,
};
use crate::save::MemoryStorage;
use tracing::{debug, info};

/// Upper bound on purchases per tick.
const MAX_PURCHASES_PER_TICK: u32 = 100;

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let seed = config.seed.map(|seed| seed.wrapping_add(run_idx as u64));
        let source = match seed {
            Some(seed) => RandomFaces::seeded(seed),
            None => RandomFaces::from_entropy(),
        };

        let mut run_stats = simulate_single_run(config, source);
        run_stats.seed = seed;
        debug!(
            run = run_idx + 1,
            rolls = run_stats.total_rolls,
            earned = %run_stats.total_earned,
            prestiges = run_stats.prestiges,
            "run finished"
        );
        all_runs.push(run_stats);
    }

    info!(runs = config.num_runs, "simulation complete");
    SimReport::from_runs(all_runs, config.duration_seconds)
}

/// Something the simulated player can buy with credits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Purchase {
    UnlockDie(u8),
    LevelDie(u8),
    Autoroll,
}

/// The cheapest purchase the player can afford right now.
fn cheapest_purchase(state: &GameState) -> Option<Purchase> {
    let mut options: Vec<(Purchase, Credits)> = Vec::new();
    for die in &state.dice {
        if die.unlocked {
            options.push((Purchase::LevelDie(die.id), level_up_cost(die)));
        } else if let Some(cost) = unlock_cost(die.id) {
            options.push((Purchase::UnlockDie(die.id), cost));
        }
    }
    if let Some(cost) = autoroll_upgrade_cost(state.autoroll.level) {
        options.push((Purchase::Autoroll, cost));
    }
    options
        .into_iter()
        .filter(|(_, cost)| *cost <= state.credits)
        .min_by(|a, b| a.1.cmp(&b.1))
        .map(|(purchase, _)| purchase)
}

fn buy(state: &GameState, purchase: Purchase) -> Option<GameState> {
    match purchase {
        Purchase::UnlockDie(id) => unlock_die(state, id),
        Purchase::LevelDie(id) => level_up_die(state, id),
        Purchase::Autoroll => upgrade_autoroll(state),
    }
}

/// Greedily buys the cheapest affordable upgrade until nothing fits.
fn buy_upgrades<F: FaceSource>(session: &mut GameSession<F, MemoryStorage>, now_ms: i64) -> u64 {
    let mut bought = 0;
    for _ in 0..MAX_PURCHASES_PER_TICK {
        let Some(purchase) = cheapest_purchase(session.state()) else {
            break;
        };
        if !session.apply(now_ms, |state| buy(state, purchase)) {
            break;
        }
        bought += 1;
    }
    bought
}

/// Spends luck on the cheapest permanent shop upgrade until none is affordable.
fn buy_shop_upgrades<F: FaceSource>(
    session: &mut GameSession<F, MemoryStorage>,
    now_ms: i64,
) -> u64 {
    let mut bought = 0;
    for _ in 0..MAX_PURCHASES_PER_TICK {
        let prestige = &session.state().prestige;
        let cheapest = SHOP_ITEMS
            .iter()
            .filter(|item| matches!(item.kind, ShopItemKind::Upgrade))
            .filter(|item| can_buy_prestige_upgrade(prestige, item.key))
            .min_by_key(|item| item_cost(item, prestige.shop_level(item.key)));
        let Some(item) = cheapest else {
            break;
        };
        let key = item.key;
        if !session.apply(now_ms, |state| buy_prestige_upgrade(state, key)) {
            break;
        }
        bought += 1;
    }
    bought
}

/// Simulate one playthrough from a fresh game.
pub fn simulate_single_run<F: FaceSource>(config: &SimConfig, source: F) -> RunStats {
    let mut session = GameSession::new(
        GameState::new(0),
        config.economy.clone(),
        source,
        MemoryStorage::new(),
        0,
    );
    let tick_ms = config.tick_ms.max(1) as i64;
    let mut stats = RunStats::default();
    let mut now_ms = 0i64;

    for _ in 0..config.total_ticks() {
        now_ms += tick_ms;

        for _ in 0..config.manual_rolls_per_tick {
            let outcome = session.roll();
            stats.record_roll(&outcome);
            stats.manual_rolls += 1;
        }

        let report = session.tick(now_ms);
        for outcome in &report.outcomes {
            stats.record_roll(outcome);
            stats.auto_rolls += 1;
        }

        if config.simulate_prestige && can_prestige(session.state()) {
            let gain = session.prestige(now_ms);
            stats.prestiges += 1;
            stats.luck_gained += gain;
            stats.purchases += buy_shop_upgrades(&mut session, now_ms);
        }

        stats.purchases += buy_upgrades(&mut session, now_ms);
    }

    let (state, _) = session.shutdown(now_ms);
    stats.final_credits = state.credits;
    stats.achievements_unlocked = state.achievements.unlocked_count();
    stats.dice_unlocked = state.unlocked_dice_count();
    stats.autoroll_level = state.autoroll.level;
    stats
}
