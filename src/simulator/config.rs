//! Simulation configuration.

use crate::core::config::EconomyConfig;

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of simulated playthroughs
    pub num_runs: u32,

    /// Base seed; run `i` uses `seed + i` (None = entropy)
    pub seed: Option<u64>,

    /// Simulated wall-clock time per run
    pub duration_seconds: u64,

    /// Fixed step between session ticks
    pub tick_ms: u64,

    /// Manual rolls the simulated player makes each tick
    pub manual_rolls_per_tick: u32,

    /// Prestige as soon as a reset would award luck
    pub simulate_prestige: bool,

    pub economy: EconomyConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 10,
            seed: None,
            duration_seconds: 3_600,
            tick_ms: 100,
            manual_rolls_per_tick: 1,
            simulate_prestige: false,
            economy: EconomyConfig::default(),
        }
    }
}

impl SimConfig {
    /// Ticks per run, at least one.
    pub fn total_ticks(&self) -> u64 {
        let tick_ms = self.tick_ms.max(1);
        (self.duration_seconds.saturating_mul(1000) / tick_ms).max(1)
    }

    /// Quick config for idle-only balance (no clicking)
    pub fn idle_only(duration_seconds: u64) -> Self {
        Self {
            duration_seconds,
            manual_rolls_per_tick: 0,
            ..Default::default()
        }
    }

    /// Quick config for long prestige loops
    pub fn prestige_loop(num_runs: u32, duration_seconds: u64) -> Self {
        Self {
            num_runs,
            duration_seconds,
            simulate_prestige: true,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_ticks() {
        let config = SimConfig {
            duration_seconds: 10,
            tick_ms: 250,
            ..Default::default()
        };
        assert_eq!(config.total_ticks(), 40);

        let degenerate = SimConfig {
            duration_seconds: 0,
            tick_ms: 0,
            ..Default::default()
        };
        assert_eq!(degenerate.total_ticks(), 1);
    }

    #[test]
    fn test_presets() {
        let idle = SimConfig::idle_only(30);
        assert_eq!(idle.manual_rolls_per_tick, 0);
        assert_eq!(idle.total_ticks(), 300);

        let looped = SimConfig::prestige_loop(3, 7_200);
        assert!(looped.simulate_prestige);
        assert_eq!(looped.num_runs, 3);
        assert_eq!(looped.manual_rolls_per_tick, 1);
    }
}
