//! Simulation report generation.

use super::run_stats::RunStats;
use crate::numeric::{format_credits, Credits, NumberFormat};
use serde::Serialize;

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub simulated_seconds: u64,

    // Rolling
    pub avg_total_rolls: f64,
    pub avg_manual_rolls: f64,
    pub avg_auto_rolls: f64,
    pub avg_combos: f64,
    pub avg_combo_rate: f64,
    pub avg_critical_rolls: f64,
    pub avg_best_chain: f64,
    pub max_best_chain: u32,

    // Economy
    pub avg_total_earned: Credits,
    pub best_total_earned: Credits,
    pub avg_final_credits: Credits,
    pub avg_purchases: f64,
    pub avg_dice_unlocked: f64,
    pub avg_autoroll_level: f64,

    // Meta progression
    pub avg_prestiges: f64,
    pub avg_luck_gained: f64,
    pub avg_achievements: f64,

    // Individual run stats for detailed analysis
    pub run_stats: Vec<RunStats>,
}

fn average<F>(runs: &[RunStats], field: F) -> f64
where
    F: Fn(&RunStats) -> f64,
{
    if runs.is_empty() {
        return 0.0;
    }
    runs.iter().map(field).sum::<f64>() / runs.len() as f64
}

fn average_credits<F>(runs: &[RunStats], field: F) -> Credits
where
    F: Fn(&RunStats) -> Credits,
{
    let total: Credits = runs.iter().map(field).sum();
    total
        .checked_div(Credits::from(runs.len() as u64))
        .unwrap_or(Credits::ZERO)
}

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(runs: Vec<RunStats>, simulated_seconds: u64) -> Self {
        Self {
            num_runs: runs.len() as u32,
            simulated_seconds,
            avg_total_rolls: average(&runs, |r| r.total_rolls as f64),
            avg_manual_rolls: average(&runs, |r| r.manual_rolls as f64),
            avg_auto_rolls: average(&runs, |r| r.auto_rolls as f64),
            avg_combos: average(&runs, |r| r.combos as f64),
            avg_combo_rate: average(&runs, RunStats::combo_rate),
            avg_critical_rolls: average(&runs, |r| r.critical_rolls as f64),
            avg_best_chain: average(&runs, |r| r.best_chain as f64),
            max_best_chain: runs.iter().map(|r| r.best_chain).max().unwrap_or(0),
            avg_total_earned: average_credits(&runs, |r| r.total_earned),
            best_total_earned: runs
                .iter()
                .map(|r| r.total_earned)
                .max()
                .unwrap_or(Credits::ZERO),
            avg_final_credits: average_credits(&runs, |r| r.final_credits),
            avg_purchases: average(&runs, |r| r.purchases as f64),
            avg_dice_unlocked: average(&runs, |r| r.dice_unlocked as f64),
            avg_autoroll_level: average(&runs, |r| r.autoroll_level as f64),
            avg_prestiges: average(&runs, |r| r.prestiges as f64),
            avg_luck_gained: average(&runs, |r| r.luck_gained as f64),
            avg_achievements: average(&runs, |r| r.achievements_unlocked as f64),
            run_stats: runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let credits = |value: &Credits| format_credits(value, NumberFormat::Suffix);
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {}, {}s simulated each\n\n",
            self.num_runs, self.simulated_seconds
        ));

        report.push_str("── ROLLING ──────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Avg Total Rolls:     {:.0} ({:.0} manual, {:.0} auto)\n",
            self.avg_total_rolls, self.avg_manual_rolls, self.avg_auto_rolls
        ));
        report.push_str(&format!(
            "  Avg Combos:          {:.0} ({:.1}% of rolls)\n",
            self.avg_combos,
            self.avg_combo_rate * 100.0
        ));
        report.push_str(&format!(
            "  Avg Critical Rolls:  {:.1}\n",
            self.avg_critical_rolls
        ));
        report.push_str(&format!(
            "  Best Chain:          {:.1} avg, {} max\n\n",
            self.avg_best_chain, self.max_best_chain
        ));

        report.push_str("── ECONOMY ──────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Avg Total Earned:    {}\n",
            credits(&self.avg_total_earned)
        ));
        report.push_str(&format!(
            "  Best Total Earned:   {}\n",
            credits(&self.best_total_earned)
        ));
        report.push_str(&format!(
            "  Avg Final Credits:   {}\n",
            credits(&self.avg_final_credits)
        ));
        report.push_str(&format!("  Avg Purchases:       {:.0}\n", self.avg_purchases));
        report.push_str(&format!(
            "  Avg Dice Unlocked:   {:.1}\n",
            self.avg_dice_unlocked
        ));
        report.push_str(&format!(
            "  Avg Autoroll Level:  {:.1}\n\n",
            self.avg_autoroll_level
        ));

        report.push_str("── META PROGRESSION ─────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Prestiges:       {:.2}\n", self.avg_prestiges));
        report.push_str(&format!("  Avg Luck Gained:     {:.1}\n", self.avg_luck_gained));
        report.push_str(&format!(
            "  Avg Achievements:    {:.1}\n",
            self.avg_achievements
        ));

        if self.avg_autoroll_level < 1.0 && self.num_runs > 0 {
            report.push_str("  ⚠️  Autoroll rarely unlocked - early costs too high?\n");
        }
        if self.avg_dice_unlocked < 2.0 && self.num_runs > 0 {
            report.push_str("  ⚠️  Most runs stuck on one die - unlock costs too high?\n");
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(rolls: u64, combos: u64, earned: u64, chain: u32) -> RunStats {
        RunStats {
            total_rolls: rolls,
            manual_rolls: rolls,
            combos,
            best_chain: chain,
            total_earned: Credits::from(earned),
            dice_unlocked: 2,
            autoroll_level: 1,
            ..Default::default()
        }
    }

    #[test]
    fn test_report_generation() {
        let report = SimReport::from_runs(vec![run(100, 10, 1_000, 3), run(300, 30, 3_000, 5)], 60);
        assert_eq!(report.num_runs, 2);
        assert!((report.avg_total_rolls - 200.0).abs() < 1e-9);
        assert!((report.avg_combo_rate - 0.1).abs() < 1e-9);
        assert_eq!(report.max_best_chain, 5);
        assert_eq!(report.avg_total_earned, Credits::from(2_000u64));
        assert_eq!(report.best_total_earned, Credits::from(3_000u64));

        let text = report.to_text();
        assert!(text.contains("SIMULATION REPORT"));
        assert!(text.contains("2.00K"));
    }

    #[test]
    fn test_empty_report_has_no_nan() {
        let report = SimReport::from_runs(Vec::new(), 10);
        assert_eq!(report.avg_total_rolls, 0.0);
        assert_eq!(report.avg_total_earned, Credits::ZERO);
        assert!(!report.to_text().contains("NaN"));
    }

    #[test]
    fn test_json_report() {
        let report = SimReport::from_runs(vec![run(10, 1, 50, 1)], 5);
        let value: serde_json::Value = serde_json::from_str(&report.to_json()).unwrap();
        assert_eq!(value["num_runs"], 1);
        assert_eq!(value["avg_total_earned"], "50");
        assert_eq!(value["run_stats"][0]["total_rolls"], 10);
    }
}
