//! Time-to-roll conversion for autoroll.
//!
//! [`AutorollScheduler`] coalesces elapsed time into whole rolls: elapsed
//! milliseconds feed an accumulator, each tick processes
//! `min(floor(acc / cooldown), max_rolls_per_tick)` rolls and keeps the
//! remainder queued. [`SingleRollTimer`] is the plain one-roll-per-period
//! alternative used for slow cooldowns.

use super::logic::cooldown_ms;
use super::types::AutorollConfig;
use crate::core::config::EconomyConfig;
use crate::core::constants::{DEFAULT_MAX_ROLLS_PER_TICK, DEFAULT_SCHEDULER_INTERVAL_MS};
use crate::core::game_state::GameState;
use crate::core::rng::FaceSource;
use crate::roll::{resolve_roll, ResolvedRoll, RollOutcome};
use tracing::{debug, warn};

/// How autoroll should be driven for a config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutorollMode {
    /// Locked, disabled or unusable cooldown.
    Off,
    /// Many rolls per tick through [`AutorollScheduler`].
    Batch,
    /// One roll per cooldown through [`SingleRollTimer`].
    Single,
}

impl AutorollMode {
    pub fn select(config: &AutorollConfig) -> AutorollMode {
        if !config.is_active() {
            return AutorollMode::Off;
        }
        let Some(ms) = cooldown_ms(config) else {
            return AutorollMode::Off;
        };
        if config.dynamic_batch && ms < config.batch_threshold_ms {
            AutorollMode::Batch
        } else {
            AutorollMode::Single
        }
    }
}

/// Every outcome of one scheduler tick plus the folded state.
#[derive(Debug, Clone)]
pub struct RollBatch {
    pub outcomes: Vec<RollOutcome>,
    pub state: GameState,
    pub processed: u32,
    /// Whole rolls still queued in the accumulator.
    pub pending_rolls: u64,
}

impl RollBatch {
    /// The last `budget` outcomes, the ones worth animating.
    pub fn animated(&self, budget: u32) -> &[RollOutcome] {
        let start = self.outcomes.len().saturating_sub(budget as usize);
        &self.outcomes[start..]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SchedulerState {
    Idle,
    Running {
        accumulator_ms: f64,
        /// Wall-clock ms of the last poll that fired.
        last_fire_ms: i64,
    },
}

#[derive(Debug, Clone)]
pub struct AutorollScheduler {
    state: SchedulerState,
    max_rolls_per_tick: u32,
    min_interval_ms: f64,
}

impl Default for AutorollScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ROLLS_PER_TICK, DEFAULT_SCHEDULER_INTERVAL_MS)
    }
}

impl AutorollScheduler {
    pub fn new(max_rolls_per_tick: u32, min_interval_ms: f64) -> Self {
        Self {
            state: SchedulerState::Idle,
            max_rolls_per_tick,
            min_interval_ms: sanitize_interval(min_interval_ms),
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, SchedulerState::Running { .. })
    }

    /// Queued fractional time; zero while idle.
    pub fn accumulator_ms(&self) -> f64 {
        match self.state {
            SchedulerState::Idle => 0.0,
            SchedulerState::Running { accumulator_ms, .. } => accumulator_ms,
        }
    }

    pub fn max_rolls_per_tick(&self) -> u32 {
        self.max_rolls_per_tick
    }

    pub fn min_interval_ms(&self) -> f64 {
        self.min_interval_ms
    }

    /// Starts ticking from `now_ms` with an empty accumulator.
    pub fn start(&mut self, now_ms: i64) {
        self.state = SchedulerState::Running {
            accumulator_ms: 0.0,
            last_fire_ms: now_ms,
        };
    }

    /// Stops and drops any partial progress in the accumulator.
    pub fn stop(&mut self) {
        if self.is_running() {
            debug!(
                dropped_ms = self.accumulator_ms(),
                "autoroll scheduler stopped"
            );
        }
        self.state = SchedulerState::Idle;
    }

    /// Changes the limits and restarts the timer at `now_ms`, keeping the
    /// accumulator and folding in time elapsed since the last fire.
    pub fn reconfigure(&mut self, max_rolls_per_tick: u32, min_interval_ms: f64, now_ms: i64) {
        self.max_rolls_per_tick = max_rolls_per_tick;
        self.min_interval_ms = sanitize_interval(min_interval_ms);
        if let SchedulerState::Running {
            accumulator_ms,
            last_fire_ms,
        } = self.state
        {
            let pending = (now_ms - last_fire_ms).max(0) as f64;
            self.state = SchedulerState::Running {
                accumulator_ms: accumulator_ms + pending,
                last_fire_ms: now_ms,
            };
        }
    }

    /// Wall-clock driver. Fires once at least `min_interval_ms` has passed
    /// since the last fire.
    pub fn poll<S: FaceSource + ?Sized>(
        &mut self,
        now_ms: i64,
        state: &GameState,
        economy: &EconomyConfig,
        source: &mut S,
    ) -> Option<RollBatch> {
        let SchedulerState::Running {
            accumulator_ms,
            last_fire_ms,
        } = self.state
        else {
            return None;
        };
        let elapsed = (now_ms - last_fire_ms) as f64;
        if elapsed < self.min_interval_ms {
            return None;
        }
        self.state = SchedulerState::Running {
            accumulator_ms,
            last_fire_ms: now_ms,
        };
        self.advance(elapsed, state, economy, source)
    }

    /// Deterministic driver: fires with an injected elapsed time.
    pub fn tick_with_delta<S: FaceSource + ?Sized>(
        &mut self,
        delta_ms: f64,
        state: &GameState,
        economy: &EconomyConfig,
        source: &mut S,
    ) -> Option<RollBatch> {
        if !self.is_running() {
            return None;
        }
        self.advance(delta_ms, state, economy, source)
    }

    fn advance<S: FaceSource + ?Sized>(
        &mut self,
        delta_ms: f64,
        state: &GameState,
        economy: &EconomyConfig,
        source: &mut S,
    ) -> Option<RollBatch> {
        let SchedulerState::Running {
            accumulator_ms,
            last_fire_ms,
        } = self.state
        else {
            return None;
        };

        let Some(cooldown) = cooldown_ms(&state.autoroll) else {
            warn!(
                cooldown = state.autoroll.cooldown,
                "autoroll cooldown is not positive, skipping tick"
            );
            return None;
        };

        let delta = if delta_ms.is_finite() { delta_ms.max(0.0) } else { 0.0 };
        let accumulated = accumulator_ms + delta;
        let due = (accumulated / cooldown).floor() as u64;
        let processed = due.min(self.max_rolls_per_tick as u64);
        let remaining = (accumulated - processed as f64 * cooldown).max(0.0);
        self.state = SchedulerState::Running {
            accumulator_ms: remaining,
            last_fire_ms,
        };

        if processed == 0 {
            return None;
        }

        let mut current = state.clone();
        let mut outcomes = Vec::with_capacity(processed as usize);
        for _ in 0..processed {
            let ResolvedRoll { state: next, outcome } = resolve_roll(&current, economy, source);
            current = next;
            outcomes.push(outcome);
        }

        let pending_rolls = (remaining / cooldown).floor() as u64;
        if pending_rolls > 0 {
            debug!(processed, pending_rolls, "autoroll backlog carried over");
        }

        Some(RollBatch {
            outcomes,
            state: current,
            processed: processed as u32,
            pending_rolls,
        })
    }
}

fn sanitize_interval(min_interval_ms: f64) -> f64 {
    if min_interval_ms.is_finite() && min_interval_ms >= 0.0 {
        min_interval_ms
    } else {
        DEFAULT_SCHEDULER_INTERVAL_MS
    }
}

/// Fires at most one roll per cooldown period.
#[derive(Debug, Clone, Default)]
pub struct SingleRollTimer {
    running: bool,
    elapsed_ms: f64,
    last_poll_ms: Option<i64>,
}

impl SingleRollTimer {
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self, now_ms: i64) {
        self.running = true;
        self.elapsed_ms = 0.0;
        self.last_poll_ms = Some(now_ms);
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.elapsed_ms = 0.0;
        self.last_poll_ms = None;
    }

    pub fn poll<S: FaceSource + ?Sized>(
        &mut self,
        now_ms: i64,
        state: &GameState,
        economy: &EconomyConfig,
        source: &mut S,
    ) -> Option<ResolvedRoll> {
        let last = self.last_poll_ms.replace(now_ms)?;
        self.tick_with_delta((now_ms - last).max(0) as f64, state, economy, source)
    }

    /// Time past the cooldown is discarded once the roll fires.
    pub fn tick_with_delta<S: FaceSource + ?Sized>(
        &mut self,
        delta_ms: f64,
        state: &GameState,
        economy: &EconomyConfig,
        source: &mut S,
    ) -> Option<ResolvedRoll> {
        if !self.running {
            return None;
        }
        let Some(cooldown) = cooldown_ms(&state.autoroll) else {
            warn!(
                cooldown = state.autoroll.cooldown,
                "autoroll cooldown is not positive, skipping tick"
            );
            return None;
        };
        if delta_ms.is_finite() && delta_ms > 0.0 {
            self.elapsed_ms += delta_ms;
        }
        if self.elapsed_ms < cooldown {
            return None;
        }
        self.elapsed_ms = 0.0;
        Some(resolve_roll(state, economy, source))
    }
}
