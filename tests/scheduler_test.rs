//! Integration test: autoroll scheduling through the session
//!
//! Covers batch backpressure, interleaving with manual rolls, mode switches
//! and reconfiguration while running.

use luckroll::autoroll::{
    configure_batching, set_dynamic_batch, toggle_autoroll, AutorollMode, AutorollScheduler,
};
use luckroll::save::MemoryStorage;
use luckroll::{EconomyConfig, GameSession, GameState, ScriptedFaces};

/// 500 ms cooldown with a 1 s batch threshold, so batching is selected.
fn fast_state(max_rolls: u32) -> GameState {
    let mut state = GameState::new(0);
    state.autoroll.enabled = true;
    state.autoroll.level = 5;
    state.autoroll.cooldown = 0.5;
    state.autoroll.batch_threshold_ms = 1_000.0;
    state.autoroll.max_rolls_per_tick = max_rolls;
    state
}

fn fast_session(max_rolls: u32) -> GameSession<ScriptedFaces, MemoryStorage> {
    GameSession::new(
        fast_state(max_rolls),
        EconomyConfig::default(),
        ScriptedFaces::new(vec![1, 2, 3]),
        MemoryStorage::new(),
        0,
    )
}

#[test]
fn test_backlog_is_processed_across_ticks() {
    let mut session = fast_session(3);
    assert_eq!(session.mode(), AutorollMode::Batch);

    let first = session.tick(5_000);
    assert_eq!(first.outcomes.len(), 3);
    assert_eq!(first.pending_rolls, 7);

    let second = session.tick(5_050);
    let indices: Vec<u64> = second.outcomes.iter().map(|o| o.roll_index).collect();
    assert_eq!(indices, vec![4, 5, 6]);
    assert_eq!(second.pending_rolls, 4);
    assert_eq!(session.state().stats.total_rolls, 6);
}

#[test]
fn test_manual_rolls_interleave_without_lost_updates() {
    let mut session = fast_session(1_000);
    session.roll();
    session.roll();

    let report = session.tick(1_000);
    let indices: Vec<u64> = report.outcomes.iter().map(|o| o.roll_index).collect();
    assert_eq!(indices, vec![3, 4]);
    assert_eq!(session.state().stats.total_rolls, 4);
    assert_eq!(session.state().stats.recent_rolls[0].roll, 4);
}

#[test]
fn test_toggle_off_drops_partial_progress() {
    let mut session = fast_session(1_000);
    assert!(session.tick(400).outcomes.is_empty());

    assert!(session.apply(400, toggle_autoroll));
    assert_eq!(session.mode(), AutorollMode::Off);
    assert!(session.tick(1_000).outcomes.is_empty());

    assert!(session.apply(1_000, toggle_autoroll));
    assert_eq!(session.mode(), AutorollMode::Batch);
    assert!(session.tick(1_400).outcomes.is_empty());
    assert_eq!(session.tick(1_500).outcomes.len(), 1);
}

#[test]
fn test_single_mode_fires_once_per_cooldown() {
    let mut session = fast_session(1_000);
    assert!(session.apply(0, |state| set_dynamic_batch(state, false)));
    assert_eq!(session.mode(), AutorollMode::Single);

    assert_eq!(session.tick(5_000).outcomes.len(), 1);
    assert!(session.tick(5_400).outcomes.is_empty());
    assert_eq!(session.tick(5_500).outcomes.len(), 1);
}

#[test]
fn test_reconfigure_while_running_keeps_time() {
    let mut session = fast_session(1_000);
    assert!(session.tick(400).outcomes.is_empty());

    assert!(session.apply(700, |state| configure_batching(state, 2, 1_000.0, 8)));
    assert_eq!(session.mode(), AutorollMode::Batch);

    let report = session.tick(1_200);
    assert_eq!(report.outcomes.len(), 2);
    assert_eq!(report.pending_rolls, 0);
}

#[test]
fn test_animation_budget_keeps_latest_outcomes() {
    let state = fast_state(1_000);
    let mut scheduler = AutorollScheduler::default();
    scheduler.start(0);
    let batch = scheduler
        .tick_with_delta(
            5_000.0,
            &state,
            &EconomyConfig::default(),
            &mut ScriptedFaces::new(vec![2]),
        )
        .unwrap();

    assert_eq!(batch.processed, 10);
    let animated: Vec<u64> = batch.animated(4).iter().map(|o| o.roll_index).collect();
    assert_eq!(animated, vec![7, 8, 9, 10]);
    assert_eq!(batch.animated(50).len(), 10);
}
