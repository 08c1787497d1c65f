//! Core game state, tunables and the session driver.

pub mod config;
pub mod constants;
pub mod game_state;
pub mod offline;
pub mod rng;
pub mod session;

pub use config::{ConfigError, EconomyConfig};
pub use game_state::{GameState, Settings};
pub use offline::{offline_roll_count, process_offline_progress, OfflineReport};
pub use rng::{FaceSource, RandomFaces, ScriptedFaces};
pub use session::{now_ms, GameSession, TickReport};
