//! Luckroll - Incremental Dice Economy Engine
//!
//! Players roll a set of upgradeable six-sided dice to earn credits. Matching
//! faces form combos, consecutive combos build chains, and every payout flows
//! through luck, shop, resonance, achievement and critical multipliers. The
//! crate exposes the pure state transitions, the session driver that owns
//! the authoritative game state, persistence and a headless simulator.

pub mod achievements;
pub mod ascension;
pub mod autoroll;
pub mod combo;
pub mod core;
pub mod dice;
pub mod numeric;
pub mod prestige;
pub mod roll;
pub mod save;
pub mod simulator;

pub use crate::core::config::{ConfigError, EconomyConfig};
pub use crate::core::game_state::{GameState, Settings};
pub use crate::core::offline::{process_offline_progress, OfflineReport};
pub use crate::core::rng::{FaceSource, RandomFaces, ScriptedFaces};
pub use crate::core::session::{GameSession, TickReport};
pub use numeric::{format_credits, Credits, NumberFormat, ParseCreditsError};
pub use roll::{resolve_roll, RollOutcome};
pub use save::{SaveError, Storage};
