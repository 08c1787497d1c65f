//! Combo classification and chain tracking types.

use crate::core::constants::*;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Combo classes, ordered from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComboKind {
    Pair,
    Triple,
    FourKind,
    FiveKind,
    SixKind,
    Flush,
}

impl ComboKind {
    pub const ALL: [ComboKind; 6] = [
        ComboKind::Pair,
        ComboKind::Triple,
        ComboKind::FourKind,
        ComboKind::FiveKind,
        ComboKind::SixKind,
        ComboKind::Flush,
    ];

    /// Same-face grouping for a face count; `None` below two.
    pub fn for_count(count: u8) -> Option<ComboKind> {
        match count {
            0 | 1 => None,
            2 => Some(ComboKind::Pair),
            3 => Some(ComboKind::Triple),
            4 => Some(ComboKind::FourKind),
            5 => Some(ComboKind::FiveKind),
            _ => Some(ComboKind::SixKind),
        }
    }

    /// Fixed base payout multiplier.
    pub fn base_multiplier(&self) -> f64 {
        match self {
            ComboKind::Pair => PAIR_MULTIPLIER,
            ComboKind::Triple => TRIPLE_MULTIPLIER,
            ComboKind::FourKind => FOUR_KIND_MULTIPLIER,
            ComboKind::FiveKind => FIVE_KIND_MULTIPLIER,
            ComboKind::SixKind => SIX_KIND_MULTIPLIER,
            ComboKind::Flush => FLUSH_MULTIPLIER,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ComboKind::Pair => "Pair",
            ComboKind::Triple => "Triple",
            ComboKind::FourKind => "Four of a Kind",
            ComboKind::FiveKind => "Five of a Kind",
            ComboKind::SixKind => "Six of a Kind",
            ComboKind::Flush => "Flush",
        }
    }
}

/// Secondary grouping found among the dice the primary combo left over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecondaryCombo {
    pub kind: ComboKind,
    pub count: u8,
    pub face: u8,
}

/// Classification of one roll's faces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboResult {
    pub kind: ComboKind,
    /// Dice in the primary grouping (all dice for a flush).
    pub count: u8,
    /// Grouped face; `None` for a flush.
    pub face: Option<u8>,
    /// Sorted faces of a flush; `None` for groupings.
    pub faces: Option<Vec<u8>>,
    pub is_multi_combo: bool,
    pub multi_combo: Option<SecondaryCombo>,
}

/// One entry of the combo history ring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboHistoryEntry {
    pub roll: u64,
    pub kind: ComboKind,
    pub chain: u32,
}

/// Consecutive-combo chain state. Continuity is keyed on roll index.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ComboChainStats {
    pub current: u32,
    pub best: u32,
    /// Roll index of the most recent combo (0 = none yet).
    pub last_combo_roll: u64,
    /// Most-recent-first, bounded to `COMBO_HISTORY_LEN`.
    #[serde(default)]
    pub history: VecDeque<ComboHistoryEntry>,
}
