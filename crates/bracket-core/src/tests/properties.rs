//! Property tests over roster sizes and result sequences.

use std::collections::BTreeSet;

use proptest::prelude::*;

use crate::bracket::{BracketSide, SlotIndex};
use crate::config::{Format, MatchFormat, TournamentConfig};
use crate::seeding::{BracketSizing, SeedingStrategy};
use crate::tournament::{LifecycleController, TournamentStatus};

use super::helpers::{play_out, played_pairs, setup, setup_with};

/// Picks winners from a fixed bit pattern, cycling through it.
fn from_bits(bits: Vec<bool>) -> impl FnMut(&crate::bracket::Match) -> SlotIndex {
    let mut i = 0;
    move |_| {
        let bit = bits[i % bits.len()];
        i += 1;
        if bit {
            SlotIndex::First
        } else {
            SlotIndex::Second
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn single_elimination_counts(n in 4usize..=40) {
        let mut t = setup(Format::SingleElimination, n);
        LifecycleController::new().activate(&mut t).unwrap();
        let sizing = BracketSizing::for_format(n, Format::SingleElimination);

        prop_assert_eq!(t.graph().len(), sizing.total_slots - 1);
        let walkovers = t.graph().matches().iter().filter(|m| m.is_walkover()).count();
        prop_assert_eq!(walkovers, sizing.total_slots - n);
        prop_assert!(t
            .graph()
            .matches()
            .iter()
            .filter(|m| m.is_walkover())
            .all(|m| m.round() == 1));
    }

    #[test]
    fn round_robin_covers_every_pair(n in 3usize..=20) {
        let mut t = setup(Format::RoundRobin, n);
        LifecycleController::new().activate(&mut t).unwrap();

        let pairs = played_pairs(&t);
        let unique: BTreeSet<_> = pairs.iter().copied().collect();
        prop_assert_eq!(pairs.len(), n * (n - 1) / 2);
        prop_assert_eq!(unique.len(), pairs.len());
    }

    #[test]
    fn elimination_always_finishes(
        n in 4usize..=24,
        double in any::<bool>(),
        seed in any::<u64>(),
        bits in prop::collection::vec(any::<bool>(), 1..64),
    ) {
        let format = if double { Format::DoubleElimination } else { Format::SingleElimination };
        let config = TournamentConfig::new("Prop Cup", format)
            .with_seeding(SeedingStrategy::Random { seed });
        let mut t = setup_with(config, n);
        let mut controller = LifecycleController::new();
        controller.activate(&mut t).unwrap();
        play_out(&mut controller, &mut t, from_bits(bits));

        prop_assert_eq!(t.status(), TournamentStatus::Completed);
        let champion = t.champion();
        prop_assert!(champion.is_some());

        let max_losses = if double { 2 } else { 1 };
        for record in t.leaderboard() {
            prop_assert!(record.losses <= max_losses);
            if Some(record.competitor) != champion {
                prop_assert_eq!(record.losses, max_losses);
            }
        }

        if double {
            let resets = t.graph().round(BracketSide::GrandFinal, 2).len();
            prop_assert!(resets <= 1);
        }
    }

    #[test]
    fn swiss_repeats_only_in_flagged_rounds(
        n in 6usize..=16,
        bits in prop::collection::vec(any::<bool>(), 1..64),
    ) {
        let mut t = setup(Format::Swiss, n);
        let mut controller = LifecycleController::new();
        controller.activate(&mut t).unwrap();
        play_out(&mut controller, &mut t, from_bits(bits));
        prop_assert_eq!(t.status(), TournamentStatus::Completed);

        let state = t.graph().swiss().unwrap();
        let expected_rounds = BracketSizing::for_format(n, Format::Swiss).swiss_rounds();
        prop_assert_eq!(state.total_rounds(), expected_rounds);
        prop_assert_eq!(state.rounds().len(), expected_rounds as usize);

        let mut seen = BTreeSet::new();
        for round in state.rounds() {
            let mut in_round = BTreeSet::new();
            let mut repeats = 0;
            for &id in &round.matches {
                let [a, b] = t.get_match(id).unwrap().slots();
                let (a, b) = (a.competitor().unwrap(), b.competitor().unwrap());
                prop_assert!(in_round.insert(a) && in_round.insert(b));
                if !seen.insert((a.min(b), a.max(b))) {
                    repeats += 1;
                }
            }
            prop_assert_eq!(round.bye.is_some(), n % 2 == 1);
            prop_assert_eq!(in_round.len() + usize::from(round.bye.is_some()), n);
            if !round.repeat_fallback {
                prop_assert_eq!(repeats, 0);
            }
        }
    }

    #[test]
    fn best_of_three_decides_only_clean_wins(a in 0u32..6, b in 0u32..6) {
        let decided = MatchFormat::BestOf3.decide(a, b);
        let first = a == 2 && b < 2;
        let second = b == 2 && a < 2;
        prop_assert_eq!(decided.is_some(), first || second);
        if first {
            prop_assert_eq!(decided, Some(SlotIndex::First));
        }
    }
}
