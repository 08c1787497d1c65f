//! Snapshot encoding, lenient loading and strict share-string import.

use crate::autoroll::cooldown_for_level;
use crate::ascension::{AscensionDie, AscensionState};
use crate::core::constants::*;
use crate::core::game_state::GameState;
use crate::dice::Die;
use crate::prestige::get_luck_tier;
use sha2::{Digest, Sha256};
use std::fmt::Write as _;
use thiserror::Error;
use tracing::warn;

/// Prefix of an exported share string.
pub const SHARE_PREFIX: &str = "LR1";
const SHARE_CHECKSUM_LEN: usize = 16;

#[derive(Error, Debug)]
pub enum SaveError {
    #[error("share string does not start with LR1")]
    BadPrefix,

    #[error("share string is malformed")]
    Malformed,

    #[error("checksum verification failed")]
    ChecksumMismatch,

    #[error("invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("snapshot is missing field `{0}`")]
    MissingField(&'static str),

    #[error("unsupported snapshot version {found}, expected at most {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("snapshot failed validation: {0}")]
    Invalid(String),

    #[error("save file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("save file framing: {0}")]
    Framing(String),
}

/// Serializes a state to its JSON snapshot.
pub fn to_json(state: &GameState) -> Result<String, SaveError> {
    Ok(serde_json::to_string(state)?)
}

/// Lenient load: missing fields take defaults, anything unparseable yields
/// a fresh state. The result is always sanitized, and timestamps that are
/// negative or later than `now_ms` are pulled back to `now_ms`.
pub fn load_state(json: &str, now_ms: i64) -> GameState {
    match serde_json::from_str::<GameState>(json) {
        Ok(state) => clamp_timestamps(sanitize(state), now_ms),
        Err(e) => {
            warn!(error = %e, "malformed save, starting a fresh game");
            GameState::new(now_ms)
        }
    }
}

fn clamp_timestamps(mut state: GameState, now_ms: i64) -> GameState {
    let valid = 0..=now_ms.max(0);
    if !valid.contains(&state.last_save_timestamp) {
        warn!(
            saved = state.last_save_timestamp,
            now_ms, "save timestamp out of range, resetting"
        );
        state.last_save_timestamp = now_ms;
    }
    if !valid.contains(&state.ascension.last_tick) {
        state.ascension.last_tick = now_ms;
    }
    state
}

/// Repairs derived and out-of-range fields so every invariant holds.
pub fn sanitize(mut state: GameState) -> GameState {
    state.version = SAVE_SCHEMA_VERSION;

    let mut dice: Vec<Die> = (1..=DICE_COUNT as u8)
        .map(|id| {
            state
                .dice
                .iter()
                .find(|d| d.id == id)
                .cloned()
                .unwrap_or_else(|| Die::locked(id))
        })
        .collect();
    for die in &mut dice {
        if die.id == 1 && !die.unlocked {
            die.unlocked = true;
        }
        let level = match (die.unlocked, die.level) {
            (false, _) => 0,
            (true, 0) => 1,
            (true, level) => level,
        };
        die.set_level(level);
        die.animation_level = die.animation_level.min(DIE_ANIMATION_MAX_LEVEL);
        die.current_face = die.current_face.clamp(1, DIE_FACES);
        die.is_rolling = false;
    }
    state.dice = dice;

    let autoroll = &mut state.autoroll;
    autoroll.level = autoroll.level.min(AUTOROLL_MAX_LEVEL);
    autoroll.cooldown = cooldown_for_level(autoroll.level);
    if autoroll.level == 0 {
        autoroll.enabled = false;
    }
    if autoroll.max_rolls_per_tick == 0 {
        autoroll.max_rolls_per_tick = DEFAULT_MAX_ROLLS_PER_TICK;
    }
    if !autoroll.batch_threshold_ms.is_finite() || autoroll.batch_threshold_ms < 0.0 {
        autoroll.batch_threshold_ms = DEFAULT_BATCH_THRESHOLD_MS;
    }

    state.prestige.luck_tier = get_luck_tier(state.prestige.luck_points).rank;
    state.ascension = sanitize_ascension(state.ascension);
    state.achievements.newly_unlocked.clear();
    state
}

fn sanitize_ascension(mut ascension: AscensionState) -> AscensionState {
    ascension.dice = (1..=ASCENSION_DICE_COUNT as u8)
        .map(|id| {
            let mut die = ascension
                .dice
                .iter()
                .find(|d| d.id == id)
                .cloned()
                .unwrap_or_else(|| AscensionDie::locked(id));
            die.tier = die.tier.min(ASCENSION_MAX_TIER);
            die
        })
        .collect();
    if ascension.unlocked {
        if let Some(first) = ascension.die_mut(1) {
            first.unlocked = true;
        }
    }
    ascension
}

/// Strict invariant check used before accepting an import.
pub fn validate(state: &GameState) -> Result<(), SaveError> {
    if state.version > SAVE_SCHEMA_VERSION {
        return Err(SaveError::UnsupportedVersion {
            found: state.version,
            supported: SAVE_SCHEMA_VERSION,
        });
    }
    if state.dice.len() != DICE_COUNT {
        return Err(SaveError::Invalid(format!(
            "expected {DICE_COUNT} dice, found {}",
            state.dice.len()
        )));
    }
    for (index, die) in state.dice.iter().enumerate() {
        if die.id as usize != index + 1 {
            return Err(SaveError::Invalid(format!(
                "die at position {} has id {}",
                index + 1,
                die.id
            )));
        }
        if !(1..=DIE_FACES).contains(&die.current_face) {
            return Err(SaveError::Invalid(format!(
                "die {} shows face {}",
                die.id, die.current_face
            )));
        }
        if die.unlocked && die.level == 0 {
            return Err(SaveError::Invalid(format!("die {} unlocked at level 0", die.id)));
        }
    }
    if !state.dice[0].unlocked {
        return Err(SaveError::Invalid("die 1 must be unlocked".to_string()));
    }
    let autoroll = &state.autoroll;
    if autoroll.enabled && !(autoroll.cooldown.is_finite() && autoroll.cooldown > 0.0) {
        return Err(SaveError::Invalid(format!(
            "autoroll enabled with cooldown {}",
            autoroll.cooldown
        )));
    }
    if autoroll.level > AUTOROLL_MAX_LEVEL {
        return Err(SaveError::Invalid(format!(
            "autoroll level {} above max",
            autoroll.level
        )));
    }
    if state.ascension.dice.len() != ASCENSION_DICE_COUNT
        || state
            .ascension
            .dice
            .iter()
            .any(|d| d.tier > ASCENSION_MAX_TIER)
    {
        return Err(SaveError::Invalid("ascension dice out of range".to_string()));
    }
    Ok(())
}

fn checksum(json: &str) -> String {
    let digest = Sha256::digest(json.as_bytes());
    let mut hex = String::with_capacity(SHARE_CHECKSUM_LEN);
    for byte in digest.iter().take(SHARE_CHECKSUM_LEN / 2) {
        let _ = write!(hex, "{byte:02x}");
    }
    hex
}

/// `LR1.<checksum>.<json>`.
pub fn export_share_string(state: &GameState) -> Result<String, SaveError> {
    let json = to_json(state)?;
    Ok(format!("{SHARE_PREFIX}.{}.{json}", checksum(&json)))
}

/// Decodes and validates a share string. Never partially applies anything;
/// on error the caller keeps its current state.
pub fn import_share_string(share: &str) -> Result<GameState, SaveError> {
    let rest = share
        .trim()
        .strip_prefix(SHARE_PREFIX)
        .and_then(|r| r.strip_prefix('.'))
        .ok_or(SaveError::BadPrefix)?;
    let (sum, json) = rest.split_once('.').ok_or(SaveError::Malformed)?;
    if sum.len() != SHARE_CHECKSUM_LEN {
        return Err(SaveError::Malformed);
    }
    if checksum(json) != sum {
        return Err(SaveError::ChecksumMismatch);
    }

    let value: serde_json::Value = serde_json::from_str(json)?;
    let object = value.as_object().ok_or(SaveError::Malformed)?;
    for field in ["version", "credits", "dice", "autoroll", "prestige"] {
        if !object.contains_key(field) {
            return Err(SaveError::MissingField(field));
        }
    }
    let state: GameState = serde_json::from_value(value)?;
    validate(&state)?;
    Ok(sanitize(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::Credits;

    fn sample() -> GameState {
        let mut state = GameState::new(42);
        state.credits = "123456789012345678.5".parse().unwrap();
        state.prestige.luck_points = 60;
        state.stats.total_earned = "1.25e300".parse().unwrap();
        state
    }

    #[test]
    fn test_round_trip_preserves_currency_strings() {
        let state = sample();
        let json = to_json(&state).unwrap();
        let loaded = load_state(&json, 0);
        assert_eq!(
            loaded.credits.to_canonical_string(),
            state.credits.to_canonical_string()
        );
        assert_eq!(
            loaded.stats.total_earned.to_canonical_string(),
            "1.25e300"
        );
        assert_eq!(loaded.prestige.luck_tier, 2);
    }

    #[test]
    fn test_load_garbage_gives_fresh_state() {
        let loaded = load_state("{not json", 77);
        assert_eq!(loaded, GameState::new(77));
        let wrong_type = load_state(r#"{"credits": [1, 2]}"#, 5);
        assert_eq!(wrong_type.credits, Credits::ZERO);
        assert_eq!(wrong_type.last_save_timestamp, 5);
    }

    #[test]
    fn test_partial_payload_fills_defaults() {
        let loaded = load_state(r#"{"credits": "500", "last_save_timestamp": 9}"#, 100);
        assert_eq!(loaded.credits, Credits::from(500u64));
        assert_eq!(loaded.dice.len(), DICE_COUNT);
        assert!(loaded.die(1).unwrap().unlocked);
        assert_eq!(loaded.last_save_timestamp, 9);
    }

    #[test]
    fn test_load_rejects_out_of_range_exponents() {
        for credits in ["99e9223372036854775807", "1e9223372036854775807", "1e-9223372036854775808"] {
            let mut value = serde_json::to_value(GameState::new(3)).unwrap();
            value["credits"] = serde_json::Value::from(credits);
            let json = value.to_string();
            assert_eq!(load_state(&json, 50), GameState::new(50));

            let share = format!("LR1.{}.{json}", checksum(&json));
            assert!(matches!(import_share_string(&share), Err(SaveError::Json(_))));
        }
    }

    #[test]
    fn test_load_at_exponent_bound_keeps_arithmetic_safe() {
        let max = crate::numeric::credits::MAX_EXPONENT;
        let loaded = load_state(&format!(r#"{{"credits":"9e{max}"}}"#), 0);
        let grown = loaded.credits * Credits::from(10u64) * loaded.credits;
        assert_eq!(grown.exponent(), max);

        let saved = to_json(&GameState { credits: grown, ..loaded }).unwrap();
        assert_eq!(load_state(&saved, 0).credits, grown);
    }

    #[test]
    fn test_load_clamps_timestamps() {
        let json = r#"{"last_save_timestamp":-9223372036854775808,"ascension":{"last_tick":9223372036854775807}}"#;
        let loaded = load_state(json, 1_000);
        assert_eq!(loaded.last_save_timestamp, 1_000);
        assert_eq!(loaded.ascension.last_tick, 1_000);

        let future = load_state(r#"{"last_save_timestamp":5000}"#, 1_000);
        assert_eq!(future.last_save_timestamp, 1_000);
        let past = load_state(r#"{"last_save_timestamp":400}"#, 1_000);
        assert_eq!(past.last_save_timestamp, 400);
    }

    #[test]
    fn test_sanitize_repairs_dice_and_cooldown() {
        let mut state = GameState::new(0);
        state.dice.remove(3);
        state.dice[0].unlocked = false;
        state.dice[1].current_face = 9;
        state.autoroll.level = 3;
        state.autoroll.cooldown = -1.0;
        state.autoroll.enabled = true;

        let fixed = sanitize(state);
        assert_eq!(fixed.dice.len(), DICE_COUNT);
        assert_eq!(fixed.dice[3].id, 4);
        assert!(fixed.dice[0].unlocked);
        assert_eq!(fixed.dice[1].current_face, DIE_FACES);
        assert_eq!(fixed.autoroll.cooldown, cooldown_for_level(3));
        assert!(validate(&fixed).is_ok());
    }

    #[test]
    fn test_share_string_round_trip() {
        let state = sample();
        let share = export_share_string(&state).unwrap();
        assert!(share.starts_with("LR1."));
        let imported = import_share_string(&share).unwrap();
        assert_eq!(imported.credits, state.credits);
        assert_eq!(imported.prestige, state.prestige);
    }

    #[test]
    fn test_import_rejects_bad_input() {
        assert!(matches!(
            import_share_string("hello"),
            Err(SaveError::BadPrefix)
        ));
        assert!(matches!(
            import_share_string("LR1.nodots"),
            Err(SaveError::Malformed)
        ));

        let share = export_share_string(&sample()).unwrap();
        let tampered = share.replacen("\"luck_points\":60", "\"luck_points\":99", 1);
        assert!(matches!(
            import_share_string(&tampered),
            Err(SaveError::ChecksumMismatch)
        ));
    }

    #[test]
    fn test_import_rejects_missing_fields_and_bad_invariants() {
        let json = r#"{"credits":"1"}"#;
        let share = format!("LR1.{}.{json}", checksum(json));
        assert!(matches!(
            import_share_string(&share),
            Err(SaveError::MissingField(_))
        ));

        let mut state = GameState::new(0);
        state.dice[2].current_face = 0;
        let json = to_json(&state).unwrap();
        let share = format!("LR1.{}.{json}", checksum(&json));
        assert!(matches!(
            import_share_string(&share),
            Err(SaveError::Invalid(_))
        ));

        let mut future = GameState::new(0);
        future.version = SAVE_SCHEMA_VERSION + 1;
        let json = to_json(&future).unwrap();
        let share = format!("LR1.{}.{json}", checksum(&json));
        assert!(matches!(
            import_share_string(&share),
            Err(SaveError::UnsupportedVersion { .. })
        ));
    }
}
