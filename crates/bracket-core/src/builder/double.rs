//! Double elimination.
//!
//! The winners bracket is a plain knockout tree. Losers drop into a losers
//! bracket that alternates two kinds of round:
//!
//! - **major**: survivors of the previous losers round (slot 1) each meet a
//!   fresh drop-in from the winners bracket (slot 2)
//! - **minor**: losers-bracket survivors play each other, halving the field
//!
//! Losers round 1 is special: it pairs the losers of consecutive
//! winners-round-1 matches. Drop-in order is reversed on every other major
//! round, starting with the first, so that players who met in the winners
//! bracket are sent to opposite halves instead of meeting again at once.
//!
//! ```text
//! k = log2(total_slots)
//! losers rounds: 1 (W1 drops) + (k-1) major + (k-2) minor = 2k - 2
//! grand final:   winners champion (slot 1) vs losers champion (slot 2)
//! ```

use crate::bracket::{
    BracketGraph, BracketSide, DoubleLayout, Layout, MatchId, Propagation, Slot, SlotIndex,
    SlotRef,
};
use crate::seeding::SeededSlots;

use super::single::build_tree;

/// Builds winners bracket, losers bracket and grand final.
#[must_use]
pub fn build(seeded: &SeededSlots) -> BracketGraph {
    let mut graph = BracketGraph::new(seeded.order.clone());
    let winners = build_tree(&mut graph, &seeded.slots, BracketSide::Winners);
    let losers = build_losers(&mut graph, &winners);

    let grand_final = graph.spawn(BracketSide::GrandFinal, 1, 1, [Slot::Empty; 2]);
    if let Some(&champion_match) = winners.last().and_then(|r| r.first()) {
        graph.link_winner(champion_match, SlotRef::new(grand_final, SlotIndex::First));
    }
    if let Some(&losers_final) = losers.last().and_then(|r| r.first()) {
        graph.link_winner(losers_final, SlotRef::new(grand_final, SlotIndex::Second));
    }

    let first = winners.first().cloned().unwrap_or_default();
    graph.set_layout(Layout::DoubleElimination(DoubleLayout {
        winners,
        losers,
        grand_final,
        reset: None,
    }));
    graph.settle(first, &mut Propagation::default());
    graph
}

fn build_losers(graph: &mut BracketGraph, winners: &[Vec<MatchId>]) -> Vec<Vec<MatchId>> {
    let Some(first) = winners.first() else {
        return Vec::new();
    };

    let opening: Vec<MatchId> = (1u32..)
        .zip(first.chunks_exact(2))
        .map(|(position, pair)| {
            let id = graph.spawn(BracketSide::Losers, 1, position, [Slot::Empty; 2]);
            graph.link_loser(pair[0], SlotRef::new(id, SlotIndex::First));
            graph.link_loser(pair[1], SlotRef::new(id, SlotIndex::Second));
            id
        })
        .collect();

    let mut rounds = vec![opening];
    let mut round = 2;
    for (i, drops) in winners.iter().enumerate().skip(1) {
        let survivors = rounds.last().cloned().unwrap_or_default();
        let mut drops = drops.clone();
        if i % 2 == 1 {
            drops.reverse();
        }

        let major: Vec<MatchId> = (1u32..)
            .zip(survivors.iter().zip(&drops))
            .map(|(position, (&survivor, &drop))| {
                let id = graph.spawn(BracketSide::Losers, round, position, [Slot::Empty; 2]);
                graph.link_winner(survivor, SlotRef::new(id, SlotIndex::First));
                graph.link_loser(drop, SlotRef::new(id, SlotIndex::Second));
                id
            })
            .collect();
        rounds.push(major.clone());
        round += 1;

        if i + 1 < winners.len() {
            let minor: Vec<MatchId> = (1u32..)
                .zip(major.chunks_exact(2))
                .map(|(position, pair)| {
                    let id = graph.spawn(BracketSide::Losers, round, position, [Slot::Empty; 2]);
                    graph.link_winner(pair[0], SlotRef::new(id, SlotIndex::First));
                    graph.link_winner(pair[1], SlotRef::new(id, SlotIndex::Second));
                    id
                })
                .collect();
            rounds.push(minor);
            round += 1;
        }
    }
    rounds
}
