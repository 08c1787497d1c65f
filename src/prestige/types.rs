use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const CREDIT_BOOST: &str = "credit_boost";
pub const LUCK_FABRICATOR: &str = "luck_fabricator";
pub const CRITICAL_INSIGHT: &str = "critical_insight";
pub const REROLL_TOKENS: &str = "reroll_tokens";

/// Single-use items bought in the prestige shop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Consumables {
    pub reroll_tokens: u32,
}

/// Meta-progression that survives a prestige reset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrestigeState {
    /// Unspent luck points; drive the luck multiplier and pay for the shop.
    pub luck_points: u64,
    pub luck_tier: u32,
    pub total_prestiges: u64,
    /// Shop item key → purchased level.
    pub shop: BTreeMap<String, u32>,
    pub consumables: Consumables,
}

impl PrestigeState {
    pub fn shop_level(&self, key: &str) -> u32 {
        self.shop.get(key).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopItemKind {
    /// Levels up on purchase.
    Upgrade,
    /// Grants a quantity of a consumable; never gains levels.
    Consumable { grants: u32 },
}

/// Static prestige shop entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShopItem {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub base_cost: f64,
    pub growth: f64,
    /// Negative means unbounded.
    pub max_level: i32,
    pub kind: ShopItemKind,
}

impl ShopItem {
    pub fn is_maxed(&self, level: u32) -> bool {
        self.max_level >= 0 && level as i64 >= self.max_level as i64
    }
}

/// Luck tier with its display name and the luck needed to reach it.
#[derive(Debug, Clone, PartialEq)]
pub struct LuckTier {
    pub rank: u32,
    pub name: &'static str,
    pub threshold: u64,
}
