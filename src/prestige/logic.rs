use super::types::*;
use crate::core::constants::*;
use crate::core::game_state::GameState;
use tracing::info;

/// The prestige shop catalogue.
pub static SHOP_ITEMS: [ShopItem; 4] = [
    ShopItem {
        key: CREDIT_BOOST,
        name: "Credit Boost",
        description: "+5% credits per roll per level",
        base_cost: 1.0,
        growth: 1.5,
        max_level: -1,
        kind: ShopItemKind::Upgrade,
    },
    ShopItem {
        key: LUCK_FABRICATOR,
        name: "Luck Fabricator",
        description: "+10% luck gained on prestige per level",
        base_cost: 5.0,
        growth: 2.0,
        max_level: 10,
        kind: ShopItemKind::Upgrade,
    },
    ShopItem {
        key: CRITICAL_INSIGHT,
        name: "Critical Insight",
        description: "+1% critical roll chance per level",
        base_cost: 2.0,
        growth: 1.8,
        max_level: 20,
        kind: ShopItemKind::Upgrade,
    },
    ShopItem {
        key: REROLL_TOKENS,
        name: "Reroll Tokens",
        description: "Three extra rolls on demand",
        base_cost: 1.0,
        growth: 1.0,
        max_level: -1,
        kind: ShopItemKind::Consumable {
            grants: REROLL_TOKENS_PER_PURCHASE,
        },
    },
];

const LUCK_TIERS: [(u64, &str); 10] = [
    (0, "Unlucky"),
    (10, "Lucky"),
    (50, "Charmed"),
    (200, "Blessed"),
    (1_000, "Fortunate"),
    (5_000, "Favoured"),
    (25_000, "Destined"),
    (100_000, "Providential"),
    (500_000, "Mythic"),
    (2_500_000, "Eternal"),
];

pub fn shop_item(key: &str) -> Option<&'static ShopItem> {
    SHOP_ITEMS.iter().find(|item| item.key == key)
}

/// Luck point price of `item` at `level`: `floor(base × growth^level)`.
pub fn item_cost(item: &ShopItem, level: u32) -> u64 {
    let cost = (item.base_cost * item.growth.powi(level as i32)).floor();
    if cost.is_finite() {
        cost as u64
    } else {
        u64::MAX
    }
}

/// False exactly when the item is unknown, maxed or unaffordable.
pub fn can_buy_prestige_upgrade(prestige: &PrestigeState, key: &str) -> bool {
    let Some(item) = shop_item(key) else {
        return false;
    };
    let level = prestige.shop_level(key);
    !item.is_maxed(level) && prestige.luck_points >= item_cost(item, level)
}

/// Buys one level (or one consumable pack) of `key` with luck points.
pub fn buy_prestige_upgrade(state: &GameState, key: &str) -> Option<GameState> {
    if !can_buy_prestige_upgrade(&state.prestige, key) {
        return None;
    }
    let item = shop_item(key)?;
    let level = state.prestige.shop_level(key);

    let mut next = state.clone();
    let prestige = &mut next.prestige;
    prestige.luck_points -= item_cost(item, level);
    match item.kind {
        ShopItemKind::Upgrade => {
            prestige.shop.insert(key.to_string(), level + 1);
        }
        ShopItemKind::Consumable { grants } => {
            if key == REROLL_TOKENS {
                prestige.consumables.reroll_tokens += grants;
            }
        }
    }
    prestige.luck_tier = get_luck_tier(prestige.luck_points).rank;
    Some(next)
}

/// Luck points a reset would award right now.
///
/// `floor(max(log10(credits) − 6, 0) × 3 × (1 + 0.10 × fabricator))`; zero
/// credits give zero.
pub fn luck_gain(state: &GameState) -> u64 {
    let Some(log) = state.credits.log10() else {
        return 0;
    };
    let fabricator = state.prestige.shop_level(LUCK_FABRICATOR) as f64;
    let gain = (log - LUCK_GAIN_LOG_OFFSET).max(0.0)
        * LUCK_GAIN_RATE
        * (1.0 + LUCK_FABRICATOR_BONUS * fabricator);
    if gain.is_finite() {
        gain.floor() as u64
    } else {
        0
    }
}

pub fn can_prestige(state: &GameState) -> bool {
    luck_gain(state) > 0
}

/// Soft reset: a fresh run that keeps luck, shop, consumables, settings,
/// achievements and the ascension block. `total_prestiges` only advances
/// when the reset actually awarded luck.
pub fn perform_prestige_reset(state: &GameState, now_ms: i64) -> GameState {
    let gain = luck_gain(state);

    let mut next = GameState::new(now_ms);
    next.prestige = state.prestige.clone();
    next.prestige.luck_points = next.prestige.luck_points.saturating_add(gain);
    if gain > 0 {
        next.prestige.total_prestiges += 1;
    }
    next.prestige.luck_tier = get_luck_tier(next.prestige.luck_points).rank;
    next.settings = state.settings.clone();
    next.achievements = state.achievements.clone();
    next.achievements.newly_unlocked.clear();
    next.ascension = state.ascension.clone();

    info!(
        gain,
        luck = next.prestige.luck_points,
        prestiges = next.prestige.total_prestiges,
        "prestige reset"
    );
    next
}

/// `min(1 + luck × 0.02, 10)`.
pub fn luck_multiplier(luck_points: u64) -> f64 {
    (1.0 + luck_points as f64 * LUCK_MULT_PER_POINT).min(LUCK_MULT_CAP)
}

/// `1 + credit_boost × 0.05`.
pub fn shop_multiplier(prestige: &PrestigeState) -> f64 {
    1.0 + prestige.shop_level(CREDIT_BOOST) as f64 * SHOP_MULT_PER_LEVEL
}

/// Highest tier whose threshold `luck_points` meets.
pub fn get_luck_tier(luck_points: u64) -> LuckTier {
    let rank = LUCK_TIERS
        .iter()
        .rposition(|&(threshold, _)| luck_points >= threshold)
        .unwrap_or(0);
    let (threshold, name) = LUCK_TIERS[rank];
    LuckTier {
        rank: rank as u32,
        name,
        threshold,
    }
}

/// The tier after `rank`, or `None` at the top.
pub fn get_next_luck_tier(rank: u32) -> Option<LuckTier> {
    let next = rank as usize + 1;
    LUCK_TIERS.get(next).map(|&(threshold, name)| LuckTier {
        rank: next as u32,
        name,
        threshold,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::achievements::AchievementId;
    use crate::numeric::Credits;

    fn with_credits(credits: Credits) -> GameState {
        let mut state = GameState::new(0);
        state.credits = credits;
        state
    }

    #[test]
    fn test_item_cost_growth() {
        let boost = shop_item(CREDIT_BOOST).unwrap();
        assert_eq!(item_cost(boost, 0), 1);
        assert_eq!(item_cost(boost, 1), 1);
        assert_eq!(item_cost(boost, 2), 2);
        let fabricator = shop_item(LUCK_FABRICATOR).unwrap();
        assert_eq!(item_cost(fabricator, 3), 40);
    }

    #[test]
    fn test_can_buy_requires_luck() {
        let mut prestige = PrestigeState::default();
        assert!(!can_buy_prestige_upgrade(&prestige, CREDIT_BOOST));
        prestige.luck_points = 1;
        assert!(can_buy_prestige_upgrade(&prestige, CREDIT_BOOST));
        assert!(!can_buy_prestige_upgrade(&prestige, LUCK_FABRICATOR));
        assert!(!can_buy_prestige_upgrade(&prestige, "unknown"));
    }

    #[test]
    fn test_can_buy_false_at_max_level() {
        let mut prestige = PrestigeState {
            luck_points: u64::MAX,
            ..Default::default()
        };
        prestige.shop.insert(LUCK_FABRICATOR.to_string(), 10);
        assert!(!can_buy_prestige_upgrade(&prestige, LUCK_FABRICATOR));
        prestige.shop.insert(LUCK_FABRICATOR.to_string(), 9);
        assert!(can_buy_prestige_upgrade(&prestige, LUCK_FABRICATOR));
    }

    #[test]
    fn test_buy_upgrade_spends_luck() {
        let mut state = GameState::new(0);
        state.prestige.luck_points = 10;
        let next = buy_prestige_upgrade(&state, CRITICAL_INSIGHT).unwrap();
        assert_eq!(next.prestige.luck_points, 8);
        assert_eq!(next.prestige.shop_level(CRITICAL_INSIGHT), 1);
        assert_eq!(state.prestige.shop_level(CRITICAL_INSIGHT), 0);
    }

    #[test]
    fn test_buy_reroll_tokens_grants_consumables() {
        let mut state = GameState::new(0);
        state.prestige.luck_points = 2;
        let next = buy_prestige_upgrade(&state, REROLL_TOKENS).unwrap();
        let next = buy_prestige_upgrade(&next, REROLL_TOKENS).unwrap();
        assert_eq!(next.prestige.consumables.reroll_tokens, 6);
        assert_eq!(next.prestige.shop_level(REROLL_TOKENS), 0);
        assert_eq!(next.prestige.luck_points, 0);
        assert!(buy_prestige_upgrade(&next, REROLL_TOKENS).is_none());
    }

    #[test]
    fn test_luck_gain() {
        assert_eq!(luck_gain(&with_credits(Credits::ZERO)), 0);
        assert_eq!(luck_gain(&with_credits(Credits::from(999_999u64))), 0);
        // log10(1e9) − 6 = 3 → 9
        assert_eq!(luck_gain(&with_credits(Credits::from(1_000_000_000u64))), 9);

        let mut state = with_credits(Credits::from(1_000_000_000u64));
        state.prestige.shop.insert(LUCK_FABRICATOR.to_string(), 5);
        // 9 × 1.5
        assert_eq!(luck_gain(&state), 13);
    }

    #[test]
    fn test_prestige_reset_with_gain() {
        let mut state = with_credits(Credits::from(1_000_000_000u64));
        state.prestige.luck_points = 4;
        state.prestige.shop.insert(CREDIT_BOOST.to_string(), 3);
        state.prestige.consumables.reroll_tokens = 2;
        state.achievements.unlocked.insert(AchievementId::FirstRoll);
        state.settings.confirm_prestige = false;
        state.ascension.unlocked = true;
        state.stats.total_rolls = 500;
        state.autoroll.level = 5;
        state.dice[1].unlock();

        let next = perform_prestige_reset(&state, 99);
        assert_eq!(next.prestige.luck_points, 13);
        assert_eq!(next.prestige.total_prestiges, 1);
        assert_eq!(next.prestige.luck_tier, 1);
        assert_eq!(next.prestige.shop_level(CREDIT_BOOST), 3);
        assert_eq!(next.prestige.consumables.reroll_tokens, 2);
        assert!(next.achievements.is_unlocked(AchievementId::FirstRoll));
        assert!(!next.settings.confirm_prestige);
        assert!(next.ascension.unlocked);

        assert_eq!(next.credits, Credits::ZERO);
        assert_eq!(next.stats.total_rolls, 0);
        assert_eq!(next.autoroll.level, 0);
        assert_eq!(next.unlocked_dice_count(), 1);
        assert_eq!(next.last_save_timestamp, 99);
    }

    #[test]
    fn test_prestige_reset_without_gain_keeps_count() {
        let mut state = with_credits(Credits::from(500u64));
        state.prestige.total_prestiges = 3;
        let next = perform_prestige_reset(&state, 0);
        assert_eq!(next.prestige.total_prestiges, 3);
        assert_eq!(next.prestige.luck_points, 0);
        assert_eq!(next.credits, Credits::ZERO);
        assert!(!can_prestige(&state));
    }

    #[test]
    fn test_luck_multiplier_caps() {
        assert_eq!(luck_multiplier(0), 1.0);
        assert_eq!(luck_multiplier(50), 2.0);
        assert_eq!(luck_multiplier(10_000), LUCK_MULT_CAP);
    }

    #[test]
    fn test_luck_tiers() {
        assert_eq!(get_luck_tier(0).name, "Unlucky");
        assert_eq!(get_luck_tier(9).name, "Unlucky");
        assert_eq!(get_luck_tier(10).name, "Lucky");
        assert_eq!(get_luck_tier(3_000_000).name, "Eternal");
        assert_eq!(get_next_luck_tier(0).unwrap().threshold, 10);
        assert!(get_next_luck_tier(9).is_none());
    }
}
