use crate::achievements::AchievementState;
use crate::ascension::AscensionState;
use crate::autoroll::AutorollConfig;
use crate::core::constants::{DICE_COUNT, SAVE_SCHEMA_VERSION};
use crate::dice::Die;
use crate::numeric::{Credits, NumberFormat};
use crate::prestige::PrestigeState;
use crate::roll::GameStats;
use serde::{Deserialize, Serialize};

/// Player-facing preferences. Survive prestige.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub number_format: NumberFormat,
    pub animations_enabled: bool,
    pub confirm_prestige: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            number_format: NumberFormat::Suffix,
            animations_enabled: true,
            confirm_prestige: true,
        }
    }
}

/// Complete game state. Every transition takes a `&GameState` and returns
/// a new value; nothing mutates a state another holder can observe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameState {
    /// Snapshot schema version.
    pub version: u32,
    pub credits: Credits,
    pub dice: Vec<Die>,
    pub autoroll: AutorollConfig,
    pub stats: GameStats,
    pub achievements: AchievementState,
    pub prestige: PrestigeState,
    pub ascension: AscensionState,
    pub settings: Settings,
    /// Wall-clock milliseconds of the last save (offline replay anchor).
    pub last_save_timestamp: i64,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(0)
    }
}

impl GameState {
    /// Fresh run: die 1 unlocked, no credits, autoroll locked.
    pub fn new(now_ms: i64) -> Self {
        let dice = (1..=DICE_COUNT as u8)
            .map(|id| if id == 1 { Die::starter(id) } else { Die::locked(id) })
            .collect();

        Self {
            version: SAVE_SCHEMA_VERSION,
            credits: Credits::ZERO,
            dice,
            autoroll: AutorollConfig::default(),
            stats: GameStats::default(),
            achievements: AchievementState::default(),
            prestige: PrestigeState::default(),
            ascension: AscensionState::default(),
            settings: Settings::default(),
            last_save_timestamp: now_ms,
        }
    }

    pub fn die(&self, id: u8) -> Option<&Die> {
        self.dice.iter().find(|d| d.id == id)
    }

    pub fn die_mut(&mut self, id: u8) -> Option<&mut Die> {
        self.dice.iter_mut().find(|d| d.id == id)
    }

    pub fn unlocked_dice(&self) -> impl Iterator<Item = &Die> {
        self.dice.iter().filter(|d| d.unlocked)
    }

    pub fn unlocked_dice_count(&self) -> usize {
        self.unlocked_dice().count()
    }

    /// Deducts `cost` if affordable.
    pub fn try_spend(&mut self, cost: Credits) -> bool {
        if self.credits < cost {
            return false;
        }
        self.credits -= cost;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(1_234_567);

        assert_eq!(state.version, SAVE_SCHEMA_VERSION);
        assert_eq!(state.credits, Credits::ZERO);
        assert_eq!(state.dice.len(), DICE_COUNT);
        assert_eq!(state.last_save_timestamp, 1_234_567);
        assert_eq!(state.unlocked_dice_count(), 1);
        assert!(state.die(1).unwrap().unlocked);
        assert_eq!(state.die(1).unwrap().level, 1);
        assert!(!state.autoroll.enabled);
        assert_eq!(state.autoroll.level, 0);
    }

    #[test]
    fn test_dice_ids_are_sequential() {
        let state = GameState::new(0);
        let ids: Vec<u8> = state.dice.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_try_spend() {
        let mut state = GameState::new(0);
        state.credits = Credits::from(100u64);
        assert!(!state.try_spend(Credits::from(101u64)));
        assert_eq!(state.credits, Credits::from(100u64));
        assert!(state.try_spend(Credits::from(40u64)));
        assert_eq!(state.credits, Credits::from(60u64));
    }

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();
        assert_eq!(settings.number_format, NumberFormat::Suffix);
        assert!(settings.animations_enabled);
    }
}
