//! Combo detection over one roll's faces.

use super::types::{ComboKind, ComboResult, SecondaryCombo};
use crate::core::constants::{DIE_FACES, MULTI_COMBO_BONUS};

/// Per-face occurrence counts, indexed by face value (index 0 unused).
/// Counts saturate at `u8::MAX`.
fn face_counts(faces: &[u8]) -> [u8; DIE_FACES as usize + 1] {
    let mut counts = [0u8; DIE_FACES as usize + 1];
    for &face in faces {
        if (1..=DIE_FACES).contains(&face) {
            counts[face as usize] = counts[face as usize].saturating_add(1);
        }
    }
    counts
}

/// Face with the highest count. Faces are scanned in ascending order and
/// only a strictly higher count replaces the leader, so ties go to the
/// lowest face.
fn leading_face(counts: &[u8]) -> Option<(u8, u8)> {
    let mut best: Option<(u8, u8)> = None;
    for face in 1..=DIE_FACES {
        let count = counts[face as usize];
        if count == 0 {
            continue;
        }
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((face, count)),
        }
    }
    best
}

/// A flush is every face of the die exactly once.
fn is_flush(faces: &[u8]) -> bool {
    if faces.len() != DIE_FACES as usize {
        return false;
    }
    let mut sorted = faces.to_vec();
    sorted.sort_unstable();
    sorted.iter().copied().eq(1..=DIE_FACES)
}

/// Classifies a roll. Returns `None` when nothing repeats and the faces are
/// not a flush.
pub fn detect_combo(faces: &[u8]) -> Option<ComboResult> {
    if is_flush(faces) {
        let mut sorted = faces.to_vec();
        sorted.sort_unstable();
        return Some(ComboResult {
            kind: ComboKind::Flush,
            count: DIE_FACES,
            face: None,
            faces: Some(sorted),
            is_multi_combo: false,
            multi_combo: None,
        });
    }

    let mut counts = face_counts(faces);
    let (face, count) = leading_face(&counts)?;
    let kind = ComboKind::for_count(count)?;

    // Consume the primary group, then look for a second one.
    counts[face as usize] = 0;
    let multi_combo = leading_face(&counts).and_then(|(second_face, second_count)| {
        ComboKind::for_count(second_count).map(|second_kind| SecondaryCombo {
            kind: second_kind,
            count: second_count,
            face: second_face,
        })
    });

    Some(ComboResult {
        kind,
        count,
        face: Some(face),
        faces: None,
        is_multi_combo: multi_combo.is_some(),
        multi_combo,
    })
}

/// Payout multiplier of a combo: primary × (secondary × bonus) for a
/// multi-combo.
pub fn combo_multiplier(combo: &ComboResult) -> f64 {
    let primary = combo.kind.base_multiplier();
    match &combo.multi_combo {
        Some(secondary) => primary * secondary.kind.base_multiplier() * MULTI_COMBO_BONUS,
        None => primary,
    }
}
