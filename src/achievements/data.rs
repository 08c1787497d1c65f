//! Static achievement definitions.

use super::types::{
    AchievementCategory, AchievementContext, AchievementDef, AchievementError, AchievementId,
    AchievementReward,
};
use crate::combo::ComboKind;
use crate::numeric::Credits;

/// All achievement definitions in display order.
pub static ALL_ACHIEVEMENTS: &[AchievementDef] = &[
    // ═══════════════════════════════════════════════════════════════
    // ROLLING
    // ═══════════════════════════════════════════════════════════════
    AchievementDef {
        id: AchievementId::FirstRoll,
        name: "First Roll",
        description: "Roll the dice for the first time",
        category: AchievementCategory::Rolling,
        reward: AchievementReward::Credits(10),
        check: |ctx| Ok(ctx.state.stats.total_rolls >= 1),
    },
    AchievementDef {
        id: AchievementId::RollerI,
        name: "Roller I",
        description: "Roll 100 times",
        category: AchievementCategory::Rolling,
        reward: AchievementReward::Credits(100),
        check: |ctx| Ok(ctx.state.stats.total_rolls >= 100),
    },
    AchievementDef {
        id: AchievementId::RollerII,
        name: "Roller II",
        description: "Roll 1,000 times",
        category: AchievementCategory::Rolling,
        reward: AchievementReward::Credits(1_000),
        check: |ctx| Ok(ctx.state.stats.total_rolls >= 1_000),
    },
    AchievementDef {
        id: AchievementId::RollerIII,
        name: "Roller III",
        description: "Roll 10,000 times",
        category: AchievementCategory::Rolling,
        reward: AchievementReward::Multiplier(1.05),
        check: |ctx| Ok(ctx.state.stats.total_rolls >= 10_000),
    },
    AchievementDef {
        id: AchievementId::RollerIV,
        name: "Roller IV",
        description: "Roll 100,000 times",
        category: AchievementCategory::Rolling,
        reward: AchievementReward::Multiplier(1.10),
        check: |ctx| Ok(ctx.state.stats.total_rolls >= 100_000),
    },
    AchievementDef {
        id: AchievementId::LuckyStrike,
        name: "Lucky Strike",
        description: "Land a critical roll",
        category: AchievementCategory::Rolling,
        reward: AchievementReward::None,
        check: |ctx| Ok(ctx.state.stats.critical_rolls >= 1),
    },
    AchievementDef {
        id: AchievementId::CriticalMass,
        name: "Critical Mass",
        description: "Land 100 critical rolls",
        category: AchievementCategory::Rolling,
        reward: AchievementReward::Multiplier(1.05),
        check: |ctx| Ok(ctx.state.stats.critical_rolls >= 100),
    },
    AchievementDef {
        id: AchievementId::HighRoller,
        name: "High Roller",
        description: "Average 1,000 credits per roll",
        category: AchievementCategory::Rolling,
        reward: AchievementReward::Credits(5_000),
        check: check_high_roller,
    },
    // ═══════════════════════════════════════════════════════════════
    // COMBOS
    // ═══════════════════════════════════════════════════════════════
    AchievementDef {
        id: AchievementId::FirstCombo,
        name: "First Combo",
        description: "Roll any combo",
        category: AchievementCategory::Combos,
        reward: AchievementReward::Credits(25),
        check: |ctx| Ok(ctx.combo.is_some() || ctx.state.stats.total_combos >= 1),
    },
    AchievementDef {
        id: AchievementId::TripleThreat,
        name: "Triple Threat",
        description: "Roll three of a kind",
        category: AchievementCategory::Combos,
        reward: AchievementReward::Credits(100),
        check: |ctx| Ok(ctx.state.stats.combo_count(ComboKind::Triple) >= 1),
    },
    AchievementDef {
        id: AchievementId::FourOfAKind,
        name: "Four of a Kind",
        description: "Roll four of a kind",
        category: AchievementCategory::Combos,
        reward: AchievementReward::Credits(1_000),
        check: |ctx| Ok(ctx.state.stats.combo_count(ComboKind::FourKind) >= 1),
    },
    AchievementDef {
        id: AchievementId::FiveOfAKind,
        name: "Five of a Kind",
        description: "Roll five of a kind",
        category: AchievementCategory::Combos,
        reward: AchievementReward::Multiplier(1.05),
        check: |ctx| Ok(ctx.state.stats.combo_count(ComboKind::FiveKind) >= 1),
    },
    AchievementDef {
        id: AchievementId::SixOfAKind,
        name: "Six of a Kind",
        description: "Roll six of a kind",
        category: AchievementCategory::Combos,
        reward: AchievementReward::Multiplier(1.10),
        check: |ctx| Ok(ctx.state.stats.combo_count(ComboKind::SixKind) >= 1),
    },
    AchievementDef {
        id: AchievementId::PerfectFlush,
        name: "Perfect Flush",
        description: "Roll every face once",
        category: AchievementCategory::Combos,
        reward: AchievementReward::Multiplier(1.25),
        check: |ctx| Ok(ctx.state.stats.combo_count(ComboKind::Flush) >= 1),
    },
    AchievementDef {
        id: AchievementId::DoubleTrouble,
        name: "Double Trouble",
        description: "Roll a multi-combo",
        category: AchievementCategory::Combos,
        reward: AchievementReward::Credits(500),
        check: |ctx| Ok(ctx.combo.is_some_and(|c| c.is_multi_combo)),
    },
    AchievementDef {
        id: AchievementId::ChainV,
        name: "Chain V",
        description: "Reach a 5-combo chain",
        category: AchievementCategory::Combos,
        reward: AchievementReward::Credits(1_000),
        check: |ctx| Ok(ctx.state.stats.combo_chain.best >= 5),
    },
    AchievementDef {
        id: AchievementId::ChainX,
        name: "Chain X",
        description: "Reach a 10-combo chain",
        category: AchievementCategory::Combos,
        reward: AchievementReward::Multiplier(1.10),
        check: |ctx| Ok(ctx.state.stats.combo_chain.best >= 10),
    },
    AchievementDef {
        id: AchievementId::ComboCollectorI,
        name: "Combo Collector I",
        description: "Roll 100 combos",
        category: AchievementCategory::Combos,
        reward: AchievementReward::Credits(2_500),
        check: |ctx| Ok(ctx.state.stats.total_combos >= 100),
    },
    AchievementDef {
        id: AchievementId::ComboCollectorII,
        name: "Combo Collector II",
        description: "Roll 1,000 combos",
        category: AchievementCategory::Combos,
        reward: AchievementReward::Multiplier(1.05),
        check: |ctx| Ok(ctx.state.stats.total_combos >= 1_000),
    },
    // ═══════════════════════════════════════════════════════════════
    // WEALTH
    // ═══════════════════════════════════════════════════════════════
    AchievementDef {
        id: AchievementId::Thousandaire,
        name: "Thousandaire",
        description: "Earn 1,000 credits",
        category: AchievementCategory::Wealth,
        reward: AchievementReward::Credits(100),
        check: |ctx| Ok(ctx.state.stats.total_earned >= Credits::from(1_000u64)),
    },
    AchievementDef {
        id: AchievementId::Millionaire,
        name: "Millionaire",
        description: "Earn 1M credits",
        category: AchievementCategory::Wealth,
        reward: AchievementReward::Multiplier(1.05),
        check: |ctx| Ok(ctx.state.stats.total_earned >= Credits::from(1_000_000u64)),
    },
    AchievementDef {
        id: AchievementId::Billionaire,
        name: "Billionaire",
        description: "Earn 1B credits",
        category: AchievementCategory::Wealth,
        reward: AchievementReward::Multiplier(1.10),
        check: |ctx| Ok(ctx.state.stats.total_earned >= Credits::from(1_000_000_000u64)),
    },
    AchievementDef {
        id: AchievementId::Trillionaire,
        name: "Trillionaire",
        description: "Earn 1T credits",
        category: AchievementCategory::Wealth,
        reward: AchievementReward::Multiplier(1.25),
        check: |ctx| Ok(ctx.state.stats.total_earned >= Credits::from(1_000_000_000_000u64)),
    },
    AchievementDef {
        id: AchievementId::BigWin,
        name: "Big Win",
        description: "Earn 1M credits in a single roll",
        category: AchievementCategory::Wealth,
        reward: AchievementReward::None,
        check: |ctx| Ok(ctx.final_credits >= Credits::from(1_000_000u64)),
    },
    // ═══════════════════════════════════════════════════════════════
    // PROGRESSION
    // ═══════════════════════════════════════════════════════════════
    AchievementDef {
        id: AchievementId::FullSet,
        name: "Full Set",
        description: "Unlock every die",
        category: AchievementCategory::Progression,
        reward: AchievementReward::Credits(10_000),
        check: |ctx| Ok(ctx.state.dice.iter().all(|d| d.unlocked)),
    },
    AchievementDef {
        id: AchievementId::AutoPilot,
        name: "Auto Pilot",
        description: "Unlock autoroll",
        category: AchievementCategory::Progression,
        reward: AchievementReward::None,
        check: |ctx| Ok(ctx.state.autoroll.level >= 1),
    },
    AchievementDef {
        id: AchievementId::FirstPrestige,
        name: "First Prestige",
        description: "Prestige for the first time",
        category: AchievementCategory::Progression,
        reward: AchievementReward::None,
        check: |ctx| Ok(ctx.state.prestige.total_prestiges >= 1),
    },
    AchievementDef {
        id: AchievementId::PrestigeV,
        name: "Prestige V",
        description: "Prestige 5 times",
        category: AchievementCategory::Progression,
        reward: AchievementReward::Multiplier(1.10),
        check: |ctx| Ok(ctx.state.prestige.total_prestiges >= 5),
    },
    AchievementDef {
        id: AchievementId::PrestigeXX,
        name: "Prestige XX",
        description: "Prestige 20 times",
        category: AchievementCategory::Progression,
        reward: AchievementReward::Multiplier(1.25),
        check: |ctx| Ok(ctx.state.prestige.total_prestiges >= 20),
    },
    AchievementDef {
        id: AchievementId::Ascended,
        name: "Ascended",
        description: "Unlock ascension",
        category: AchievementCategory::Progression,
        reward: AchievementReward::Multiplier(1.5),
        check: |ctx| Ok(ctx.state.ascension.unlocked),
    },
];

/// Average credits per roll, undefined before the first roll.
fn check_high_roller(ctx: &AchievementContext<'_>) -> Result<bool, AchievementError> {
    let stats = &ctx.state.stats;
    let average = stats
        .total_earned
        .checked_div(Credits::from(stats.total_rolls))
        .ok_or(AchievementError::Undefined("average roll before any roll"))?;
    Ok(average >= Credits::from(1_000u64))
}

/// Get an achievement definition by ID.
pub fn get_achievement_def(id: AchievementId) -> Option<&'static AchievementDef> {
    ALL_ACHIEVEMENTS.iter().find(|a| a.id == id)
}

/// Get all achievements in a category.
pub fn get_achievements_by_category(category: AchievementCategory) -> Vec<&'static AchievementDef> {
    ALL_ACHIEVEMENTS
        .iter()
        .filter(|a| a.category == category)
        .collect()
}
