// Dice
pub const DICE_COUNT: usize = 6;
pub const DIE_FACES: u8 = 6;
pub const DIE_UNLOCK_COSTS: [u64; DICE_COUNT] = [0, 50, 500, 5_000, 50_000, 500_000];
pub const DIE_LEVEL_BASE_COST: f64 = 10.0;
pub const DIE_LEVEL_COST_GROWTH: f64 = 1.15;
pub const DIE_LEVEL_MULT_STEP: f64 = 0.5;
pub const DIE_MILESTONE_LEVELS: u32 = 25;
pub const DIE_ANIMATION_BASE_COST: u64 = 100;
pub const DIE_ANIMATION_MAX_LEVEL: u32 = 3;

// Combos
pub const PAIR_MULTIPLIER: f64 = 1.5;
pub const TRIPLE_MULTIPLIER: f64 = 2.5;
pub const FOUR_KIND_MULTIPLIER: f64 = 5.0;
pub const FIVE_KIND_MULTIPLIER: f64 = 10.0;
pub const SIX_KIND_MULTIPLIER: f64 = 25.0;
pub const FLUSH_MULTIPLIER: f64 = 50.0;
pub const MULTI_COMBO_BONUS: f64 = 1.5;
pub const CHAIN_BONUS_PER_LINK: f64 = 0.10;
pub const COMBO_HISTORY_LEN: usize = 10;

// Stats
pub const RECENT_ROLLS_LEN: usize = 25;

// Prestige multipliers
pub const LUCK_MULT_PER_POINT: f64 = 0.02;
pub const LUCK_MULT_CAP: f64 = 10.0;
pub const SHOP_MULT_PER_LEVEL: f64 = 0.05;
pub const CRIT_CHANCE_PER_LEVEL: f64 = 0.01;

// Prestige luck gain: floor(max(log10(credits) - OFFSET, 0) * RATE * (1 + 0.10 * fabricator))
pub const LUCK_GAIN_LOG_OFFSET: f64 = 6.0;
pub const LUCK_GAIN_RATE: f64 = 3.0;
pub const LUCK_FABRICATOR_BONUS: f64 = 0.10;
pub const REROLL_TOKENS_PER_PURCHASE: u32 = 3;

// Autoroll
pub const AUTOROLL_UNLOCK_COST: u64 = 100;
pub const AUTOROLL_UPGRADE_BASE_COST: f64 = 250.0;
pub const AUTOROLL_UPGRADE_GROWTH: f64 = 1.6;
pub const AUTOROLL_BASE_COOLDOWN: f64 = 2.0;
pub const AUTOROLL_COOLDOWN_DECAY: f64 = 0.85;
pub const AUTOROLL_MIN_COOLDOWN: f64 = 0.01;
pub const AUTOROLL_MAX_LEVEL: u32 = 40;
pub const DEFAULT_BATCH_THRESHOLD_MS: f64 = 100.0;
pub const DEFAULT_MAX_ROLLS_PER_TICK: u32 = 1000;
pub const DEFAULT_ANIMATION_BUDGET: u32 = 8;
pub const DEFAULT_SCHEDULER_INTERVAL_MS: f64 = 50.0;

// Ascension
pub const ASCENSION_PRESTIGE_THRESHOLD: u64 = 5;
pub const ASCENSION_DICE_COUNT: usize = 4;
pub const ASCENSION_UNLOCK_COSTS: [u64; ASCENSION_DICE_COUNT] = [0, 100, 1_000, 10_000];
pub const ASCENSION_TIER_BASE_COST: f64 = 50.0;
pub const ASCENSION_TIER_COST_GROWTH: f64 = 2.5;
pub const ASCENSION_MAX_TIER: u32 = 10;
pub const ASCENSION_BASE_RATE: f64 = 1.0;
pub const ASCENSION_TIER_GROWTH: f64 = 0.25;
pub const ASCENSION_SYNERGY_PER_LUCK: f64 = 0.01;
pub const ASCENSION_SYNERGY_PER_PRESTIGE: f64 = 0.02;
pub const RESONANCE_SHARE: f64 = 0.4;
pub const RESONANCE_YIELD: f64 = 0.1;
pub const RESONANCE_MULT_PER_POINT: f64 = 0.02;
pub const RESONANCE_MULT_CAP: f64 = 10.0;

// Timing and persistence
pub const MIN_ASCENSION_TICK_MS: u64 = 250;
pub const MAX_OFFLINE_SECONDS: u64 = 7 * 24 * 60 * 60;
pub const AUTOSAVE_INTERVAL_SECONDS: u64 = 30;
pub const SAVE_SCHEMA_VERSION: u32 = 1;
pub const SAVE_VERSION_MAGIC: u64 = 0x4C55_434B_524F_4C4C; // "LUCKROLL"
pub const SAVE_KEY: &str = "save";
