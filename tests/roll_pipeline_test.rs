//! Integration test: roll resolution pipeline
//!
//! Drives full rolls through the public API and checks how payouts compose:
//! base production, combo, chain, achievement and critical factors.

use luckroll::achievements::{achievement_multiplier, AchievementId};
use luckroll::ascension::resonance_multiplier;
use luckroll::combo::{chain_multiplier, combo_multiplier, detect_combo, ComboKind};
use luckroll::core::constants::DICE_COUNT;
use luckroll::dice::{die_multiplier, unlock_die};
use luckroll::prestige::{luck_multiplier, shop_multiplier, CREDIT_BOOST};
use luckroll::{resolve_roll, Credits, EconomyConfig, GameState, ScriptedFaces};
use proptest::prelude::*;

fn all_dice() -> GameState {
    let mut state = GameState::new(0);
    for die in &mut state.dice {
        if !die.unlocked {
            die.unlock();
        }
    }
    state
}

fn credits(s: &str) -> Credits {
    s.parse().unwrap()
}

/// Payout recomputed from the factor functions:
/// `Σ(multiplier × face × id) × combo × chain × luck × shop × resonance × achievement`.
fn expected_payout(state: &GameState, faces: &[u8], chain: u32) -> Credits {
    let base: Credits = state
        .dice
        .iter()
        .zip(faces)
        .map(|(die, &face)| {
            die_multiplier(die.level) * Credits::from(face as u64) * Credits::from(die.id as u64)
        })
        .sum();
    let mut payout = base;
    if let Some(combo) = detect_combo(faces) {
        payout = payout
            .mul_f64(combo_multiplier(&combo))
            .mul_f64(chain_multiplier(chain));
    }
    payout
        .mul_f64(luck_multiplier(state.prestige.luck_points))
        .mul_f64(shop_multiplier(&state.prestige))
        .mul_f64(resonance_multiplier(&state.ascension))
        .mul_f64(achievement_multiplier(&state.achievements))
}

#[test]
fn test_flush_pays_fifty_times_base() {
    let state = all_dice();
    let mut source = ScriptedFaces::new(vec![1, 2, 3, 4, 5, 6]);
    let resolved = resolve_roll(&state, &EconomyConfig::default(), &mut source);
    let outcome = &resolved.outcome;

    // Σ face × id = 1 + 4 + 9 + 16 + 25 + 36
    assert_eq!(outcome.base_credits, Credits::from(91u64));
    assert_eq!(
        outcome.combo.as_ref().map(|c| c.kind),
        Some(ComboKind::Flush)
    );
    assert_eq!(outcome.credits_earned, Credits::from(4_550u64));
    assert!(outcome.new_achievements.contains(&AchievementId::PerfectFlush));
    assert!(outcome.new_achievements.contains(&AchievementId::FullSet));
    assert_eq!(
        resolved.state.credits,
        outcome.credits_earned + outcome.reward_credits
    );
}

#[test]
fn test_achievement_multiplier_applies_from_next_roll() {
    let economy = EconomyConfig::default();
    let mut source = ScriptedFaces::new(vec![1, 2, 3, 4, 5, 6]);
    let first = resolve_roll(&all_dice(), &economy, &mut source);
    let second = resolve_roll(&first.state, &economy, &mut source);

    // 4550 × chain 1.1 × PerfectFlush 1.25
    assert_eq!(second.outcome.chain, 2);
    assert_eq!(second.outcome.credits_earned, credits("6256.25"));
    assert!(second.outcome.new_achievements.is_empty());
}

#[test]
fn test_consecutive_pairs_build_a_chain() {
    let mut state = GameState::new(0);
    state.credits = Credits::from(50u64);
    let mut state = unlock_die(&state, 2).unwrap();
    let economy = EconomyConfig::default();
    let mut source = ScriptedFaces::new(vec![1]);

    // base 1×1 + 1×2 = 3, pair ×1.5 = 4.5, then +10% per link
    let expected = ["4.5", "4.95", "5.4"];
    for (i, want) in expected.iter().enumerate() {
        let resolved = resolve_roll(&state, &economy, &mut source);
        assert_eq!(resolved.outcome.chain, i as u32 + 1);
        assert_eq!(resolved.outcome.credits_earned, credits(want));
        state = resolved.state;
    }
    assert_eq!(state.stats.combo_chain.best, 3);
    assert_eq!(state.stats.combo_count(ComboKind::Pair), 3);
}

#[test]
fn test_miss_breaks_the_chain() {
    let mut state = GameState::new(0);
    state.credits = Credits::from(50u64);
    let mut state = unlock_die(&state, 2).unwrap();
    let economy = EconomyConfig::default();
    let mut source = ScriptedFaces::new(vec![4, 4, 4, 4, 1, 2, 6, 6]);

    let chains: Vec<u32> = (0..4)
        .map(|_| {
            let resolved = resolve_roll(&state, &economy, &mut source);
            state = resolved.state;
            resolved.outcome.chain
        })
        .collect();
    assert_eq!(chains, vec![1, 2, 0, 1]);
    assert_eq!(state.stats.combo_chain.best, 2);
}

#[test]
fn test_critical_roll_uses_configured_multiplier() {
    let economy = EconomyConfig {
        critical_chance: 0.6,
        critical_multiplier: 3.0,
        ..EconomyConfig::default()
    };
    let state = GameState::new(0);
    let mut source = ScriptedFaces::new(vec![4]).with_chances(vec![0.5, 0.7]);

    let crit = resolve_roll(&state, &economy, &mut source);
    assert!(crit.outcome.is_critical);
    assert_eq!(crit.outcome.credits_earned, Credits::from(12u64));
    assert_eq!(crit.state.stats.critical_rolls, 1);

    let plain = resolve_roll(&crit.state, &economy, &mut source);
    assert!(!plain.outcome.is_critical);
    assert_eq!(plain.outcome.credits_earned, Credits::from(4u64));
}

#[test]
fn test_recent_rolls_are_most_recent_first() {
    let economy = EconomyConfig::default();
    let mut state = GameState::new(0);
    let mut source = ScriptedFaces::new(vec![1, 2, 3, 4, 5, 6]);
    for _ in 0..30 {
        state = resolve_roll(&state, &economy, &mut source).state;
    }
    assert_eq!(state.stats.recent_rolls.len(), 25);
    assert_eq!(state.stats.recent_rolls[0].roll, 30);
    assert_eq!(state.stats.recent_rolls[24].roll, 6);
    assert_eq!(state.stats.best_roll, Credits::from(6u64));
}

proptest! {
    #[test]
    fn test_roll_accounting_holds_for_any_faces(
        faces in proptest::collection::vec(1u8..=6, DICE_COUNT)
    ) {
        let state = all_dice();
        let mut source = ScriptedFaces::new(faces.clone());
        let resolved = resolve_roll(&state, &EconomyConfig::default(), &mut source);
        let outcome = &resolved.outcome;

        prop_assert_eq!(&outcome.faces, &faces);
        prop_assert!(outcome.credits_earned >= outcome.base_credits);
        prop_assert_eq!(resolved.state.stats.total_rolls, 1);
        prop_assert_eq!(
            resolved.state.credits,
            outcome.credits_earned + outcome.reward_credits
        );
        prop_assert_eq!(state.credits, Credits::ZERO);
        for (die, face) in resolved.state.dice.iter().zip(&faces) {
            prop_assert_eq!(die.current_face, *face);
        }
    }

    #[test]
    fn test_payout_matches_formula_across_two_rolls(
        levels in proptest::collection::vec(1u32..=60, DICE_COUNT),
        luck_points in 0u64..200_000,
        boost in 0u32..=20,
        first in proptest::collection::vec(1u8..=6, DICE_COUNT),
        second in proptest::collection::vec(1u8..=6, DICE_COUNT),
    ) {
        let mut state = all_dice();
        for (die, level) in state.dice.iter_mut().zip(&levels) {
            die.set_level(*level);
        }
        state.prestige.luck_points = luck_points;
        state.prestige.shop.insert(CREDIT_BOOST.to_string(), boost);

        let economy = EconomyConfig::default();
        let mut faces = first.clone();
        faces.extend(&second);
        let mut source = ScriptedFaces::new(faces);

        let rolled_first = resolve_roll(&state, &economy, &mut source);
        let first_chain = u32::from(detect_combo(&first).is_some());
        prop_assert_eq!(rolled_first.outcome.chain, first_chain);
        prop_assert!(!rolled_first.outcome.is_critical);
        prop_assert_eq!(
            rolled_first.outcome.credits_earned,
            expected_payout(&state, &first, first_chain)
        );

        let rolled_second = resolve_roll(&rolled_first.state, &economy, &mut source);
        let second_chain = match detect_combo(&second) {
            Some(_) => first_chain + 1,
            None => 0,
        };
        prop_assert_eq!(rolled_second.outcome.chain, second_chain);
        prop_assert_eq!(
            rolled_second.outcome.credits_earned,
            expected_payout(&rolled_first.state, &second, second_chain)
        );
    }

    #[test]
    fn test_combo_kind_ignores_die_order(
        mut faces in proptest::collection::vec(1u8..=6, DICE_COUNT)
    ) {
        let economy = EconomyConfig::default();
        let state = all_dice();
        let forward = resolve_roll(&state, &economy, &mut ScriptedFaces::new(faces.clone()));
        faces.reverse();
        let reversed = resolve_roll(&state, &economy, &mut ScriptedFaces::new(faces));
        prop_assert_eq!(
            forward.outcome.combo.map(|c| c.kind),
            reversed.outcome.combo.map(|c| c.kind)
        );
    }
}
