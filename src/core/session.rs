//! Authoritative game driver.
//!
//! A [`GameSession`] owns the single current [`GameState`]. Every mutation
//! reads that state, computes a new one through a pure transition and
//! replaces it whole, so a manual roll and an autoroll batch can never
//! operate on stale copies of each other.

use super::config::EconomyConfig;
use super::constants::SAVE_KEY;
use super::game_state::GameState;
use super::offline::{process_offline_progress, OfflineReport};
use super::rng::FaceSource;
use crate::ascension::tick_ascension;
use crate::autoroll::{AutorollMode, AutorollScheduler, SingleRollTimer};
use crate::prestige::{luck_gain, perform_prestige_reset};
use crate::roll::{reroll_with_token, resolve_roll, RollOutcome};
use crate::save::{export_share_string, import_share_string, load_state, SaveError, Storage};
use tracing::{debug, info, warn};

/// Wall-clock milliseconds since the Unix epoch.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// What one [`GameSession::tick`] did.
#[derive(Debug, Clone, Default)]
pub struct TickReport {
    pub outcomes: Vec<RollOutcome>,
    /// Rolls still queued in the batch accumulator.
    pub pending_rolls: u64,
    pub ascension_ticked: bool,
    pub saved: bool,
}

pub struct GameSession<F: FaceSource, S: Storage> {
    state: GameState,
    economy: EconomyConfig,
    source: F,
    storage: S,
    scheduler: AutorollScheduler,
    single: SingleRollTimer,
    mode: AutorollMode,
    last_autosave_ms: i64,
}

impl<F: FaceSource, S: Storage> GameSession<F, S> {
    pub fn new(state: GameState, economy: EconomyConfig, source: F, storage: S, now_ms: i64) -> Self {
        let mut session = Self {
            state,
            economy,
            source,
            storage,
            scheduler: AutorollScheduler::default(),
            single: SingleRollTimer::default(),
            mode: AutorollMode::Off,
            last_autosave_ms: now_ms,
        };
        session.sync_autoroll(now_ms);
        session
    }

    /// Loads the stored game (or starts fresh) and applies offline progress.
    pub fn load(
        economy: EconomyConfig,
        mut source: F,
        storage: S,
        now_ms: i64,
    ) -> (Self, OfflineReport) {
        let stored = match storage.read(SAVE_KEY) {
            Some(json) => load_state(&json, now_ms),
            None => {
                info!("no save found, starting a new game");
                GameState::new(now_ms)
            }
        };
        let (state, report) = process_offline_progress(&stored, now_ms, &economy, &mut source);
        (Self::new(state, economy, source, storage, now_ms), report)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn economy(&self) -> &EconomyConfig {
        &self.economy
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn mode(&self) -> AutorollMode {
        self.mode
    }

    /// One manual roll.
    pub fn roll(&mut self) -> RollOutcome {
        let resolved = resolve_roll(&self.state, &self.economy, &mut self.source);
        self.state = resolved.state;
        resolved.outcome
    }

    /// One roll paid for with a reroll token.
    pub fn reroll(&mut self) -> Option<RollOutcome> {
        let resolved = reroll_with_token(&self.state, &self.economy, &mut self.source)?;
        self.state = resolved.state;
        Some(resolved.outcome)
    }

    /// Applies a pure transition. Returns false (state untouched) when the
    /// transition rejects.
    pub fn apply<T>(&mut self, now_ms: i64, transition: T) -> bool
    where
        T: FnOnce(&GameState) -> Option<GameState>,
    {
        match transition(&self.state) {
            Some(next) => {
                self.state = next;
                self.sync_autoroll(now_ms);
                true
            }
            None => false,
        }
    }

    /// Performs a prestige reset and returns the luck awarded.
    pub fn prestige(&mut self, now_ms: i64) -> u64 {
        let gain = luck_gain(&self.state);
        self.state = perform_prestige_reset(&self.state, now_ms);
        self.sync_autoroll(now_ms);
        gain
    }

    /// Drives autoroll in its current mode, the ascension tick and autosave.
    pub fn tick(&mut self, now_ms: i64) -> TickReport {
        let mut report = TickReport::default();

        match self.mode {
            AutorollMode::Batch => {
                if let Some(batch) =
                    self.scheduler
                        .poll(now_ms, &self.state, &self.economy, &mut self.source)
                {
                    self.state = batch.state;
                    report.pending_rolls = batch.pending_rolls;
                    report.outcomes = batch.outcomes;
                }
            }
            AutorollMode::Single => {
                if let Some(resolved) =
                    self.single
                        .poll(now_ms, &self.state, &self.economy, &mut self.source)
                {
                    self.state = resolved.state;
                    report.outcomes.push(resolved.outcome);
                }
            }
            AutorollMode::Off => {}
        }

        if let Some(next) = tick_ascension(&self.state, now_ms, self.economy.ascension_min_tick_ms) {
            self.state = next;
            report.ascension_ticked = true;
        }

        let interval_ms = self.economy.autosave_interval_seconds.saturating_mul(1000) as i64;
        if now_ms - self.last_autosave_ms >= interval_ms {
            self.save(now_ms);
            report.saved = true;
        }
        report
    }

    /// Snapshots the current state to storage.
    pub fn save(&mut self, now_ms: i64) {
        self.state.last_save_timestamp = now_ms;
        self.storage.save(SAVE_KEY, &self.state);
        self.last_autosave_ms = now_ms;
        debug!(now_ms, "game saved");
    }

    pub fn export_share_string(&self) -> Result<String, SaveError> {
        export_share_string(&self.state)
    }

    /// Replaces the game with an imported one. On error nothing changes.
    pub fn import_share_string(&mut self, share: &str, now_ms: i64) -> Result<(), SaveError> {
        match import_share_string(share) {
            Ok(imported) => {
                self.state = imported;
                self.state.last_save_timestamp = now_ms;
                if self.state.ascension.unlocked {
                    self.state.ascension.last_tick = now_ms;
                }
                self.sync_autoroll(now_ms);
                info!("save imported");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "rejected share string");
                Err(e)
            }
        }
    }

    /// Saves one last time and hands back the final state.
    pub fn shutdown(mut self, now_ms: i64) -> (GameState, S) {
        self.save(now_ms);
        (self.state, self.storage)
    }

    /// Starts, stops or reconfigures the autoroll drivers to match the
    /// current config.
    fn sync_autoroll(&mut self, now_ms: i64) {
        let desired = AutorollMode::select(&self.state.autoroll);
        let max_rolls = self.state.autoroll.max_rolls_per_tick;

        if desired == self.mode {
            if desired == AutorollMode::Batch && self.scheduler.max_rolls_per_tick() != max_rolls {
                self.scheduler
                    .reconfigure(max_rolls, self.scheduler.min_interval_ms(), now_ms);
            }
            return;
        }

        match self.mode {
            AutorollMode::Batch => self.scheduler.stop(),
            AutorollMode::Single => self.single.stop(),
            AutorollMode::Off => {}
        }
        match desired {
            AutorollMode::Batch => {
                self.scheduler
                    .reconfigure(max_rolls, self.scheduler.min_interval_ms(), now_ms);
                self.scheduler.start(now_ms);
            }
            AutorollMode::Single => self.single.start(now_ms),
            AutorollMode::Off => {}
        }
        debug!(from = ?self.mode, to = ?desired, "autoroll mode changed");
        self.mode = desired;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autoroll::{set_dynamic_batch, upgrade_autoroll};
    use crate::core::rng::ScriptedFaces;
    use crate::dice::level_up_die;
    use crate::numeric::Credits;
    use crate::save::MemoryStorage;

    fn session(state: GameState) -> GameSession<ScriptedFaces, MemoryStorage> {
        GameSession::new(
            state,
            EconomyConfig::default(),
            ScriptedFaces::new(vec![2, 5, 3]),
            MemoryStorage::new(),
            0,
        )
    }

    fn with_credits(amount: u64) -> GameState {
        let mut state = GameState::new(0);
        state.credits = Credits::from(amount);
        state
    }

    #[test]
    fn test_manual_roll_replaces_state() {
        let mut s = session(GameState::new(0));
        let outcome = s.roll();
        assert_eq!(outcome.roll_index, 1);
        assert_eq!(s.state().stats.total_rolls, 1);
    }

    #[test]
    fn test_rejected_action_leaves_state() {
        let mut s = session(GameState::new(0));
        let before = s.state().clone();
        assert!(!s.apply(0, |st| level_up_die(st, 1)));
        assert_eq!(s.state(), &before);
    }

    #[test]
    fn test_unlocking_autoroll_starts_single_mode() {
        let mut s = session(with_credits(100));
        assert_eq!(s.mode(), AutorollMode::Off);
        assert!(s.apply(0, upgrade_autoroll));
        assert_eq!(s.mode(), AutorollMode::Single);

        // 2 s cooldown: nothing at 1 s, one roll at 2 s
        assert!(s.tick(1_000).outcomes.is_empty());
        assert_eq!(s.tick(2_000).outcomes.len(), 1);
    }

    #[test]
    fn test_fast_cooldown_uses_batch_mode() {
        let mut state = with_credits(0);
        state.autoroll.enabled = true;
        state.autoroll.level = 30;
        state.autoroll.cooldown = 0.02;
        let mut s = session(state);
        assert_eq!(s.mode(), AutorollMode::Batch);

        let report = s.tick(200);
        assert_eq!(report.outcomes.len(), 10);
        assert_eq!(s.state().stats.total_rolls, 10);

        assert!(s.apply(200, |st| set_dynamic_batch(st, false)));
        assert_eq!(s.mode(), AutorollMode::Single);
    }

    #[test]
    fn test_autosave_interval() {
        let mut s = session(GameState::new(0));
        assert!(!s.tick(1_000).saved);
        assert!(s.tick(30_000).saved);
        assert_eq!(s.storage().writes(), 1);
        assert_eq!(s.state().last_save_timestamp, 30_000);
    }

    #[test]
    fn test_load_applies_offline_progress() {
        let mut state = GameState::new(0);
        state.autoroll.enabled = true;
        state.autoroll.level = 1;
        let mut storage = MemoryStorage::new();
        storage.save(SAVE_KEY, &state);

        let (s, report) = GameSession::load(
            EconomyConfig::default(),
            ScriptedFaces::new(vec![4]),
            storage,
            10_000,
        );
        assert_eq!(report.rolls_performed, 5);
        assert_eq!(s.state().stats.total_rolls, 5);
        assert_eq!(s.state().last_save_timestamp, 10_000);
    }

    #[test]
    fn test_import_failure_keeps_game() {
        let mut s = session(with_credits(77));
        assert!(s.import_share_string("garbage", 0).is_err());
        assert_eq!(s.state().credits, Credits::from(77u64));

        let share = export_share_string(&with_credits(5)).unwrap();
        s.import_share_string(&share, 9).unwrap();
        assert_eq!(s.state().credits, Credits::from(5u64));
    }

    #[test]
    fn test_shutdown_saves() {
        let mut s = session(GameState::new(0));
        s.roll();
        let (state, storage) = s.shutdown(500);
        assert_eq!(state.last_save_timestamp, 500);
        let stored: GameState = storage.load(SAVE_KEY, GameState::new(0));
        assert_eq!(stored.stats.total_rolls, 1);
    }
}
