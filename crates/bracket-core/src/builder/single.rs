//! Single elimination.

use crate::bracket::{BracketGraph, BracketSide, Layout, MatchId, Propagation, Slot, SlotIndex, SlotRef};
use crate::seeding::SeededSlots;

/// Builds a knockout tree over `seeded.slots`.
#[must_use]
pub fn build(seeded: &SeededSlots) -> BracketGraph {
    let mut graph = BracketGraph::new(seeded.order.clone());
    let rounds = build_tree(&mut graph, &seeded.slots, BracketSide::Winners);
    let first = rounds.first().cloned().unwrap_or_default();
    graph.set_layout(Layout::SingleElimination { rounds });
    graph.settle(first, &mut Propagation::default());
    graph
}

/// Spawns a linked knockout tree and returns its rounds, first to final.
///
/// Round one pairs consecutive slots; each later round pairs consecutive
/// matches of the round before. Nothing is settled here.
pub(crate) fn build_tree(
    graph: &mut BracketGraph,
    slots: &[Slot],
    side: BracketSide,
) -> Vec<Vec<MatchId>> {
    let first: Vec<MatchId> = (1u32..)
        .zip(slots.chunks_exact(2))
        .map(|(position, pair)| graph.spawn(side, 1, position, [pair[0], pair[1]]))
        .collect();

    let mut rounds = vec![first];
    let mut round = 2;
    while let Some(prev) = rounds.last().filter(|r| r.len() > 1).cloned() {
        let next: Vec<MatchId> = (1u32..)
            .zip(prev.chunks_exact(2))
            .map(|(position, pair)| {
                let id = graph.spawn(side, round, position, [Slot::Empty; 2]);
                graph.link_winner(pair[0], SlotRef::new(id, SlotIndex::First));
                graph.link_winner(pair[1], SlotRef::new(id, SlotIndex::Second));
                id
            })
            .collect();
        rounds.push(next);
        round += 1;
    }
    rounds
}
