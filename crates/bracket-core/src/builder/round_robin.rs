//! Round robin: one match per unordered pair, all playable at once.

use crate::bracket::{BracketGraph, BracketSide, Layout, MatchId, Propagation, Slot};
use crate::seeding::SeededSlots;

/// Builds `n * (n - 1) / 2` matches in `(i, j)`, `i < j` order over the seeds.
#[must_use]
pub fn build(seeded: &SeededSlots) -> BracketGraph {
    let mut graph = BracketGraph::new(seeded.order.clone());
    let order = &seeded.order;

    let mut matches: Vec<MatchId> = Vec::with_capacity(order.len() * order.len().saturating_sub(1) / 2);
    let mut position = 1;
    for (i, &first) in order.iter().enumerate() {
        for &second in &order[i + 1..] {
            matches.push(graph.spawn(
                BracketSide::RoundRobin,
                1,
                position,
                [Slot::Competitor(first), Slot::Competitor(second)],
            ));
            position += 1;
        }
    }

    graph.set_layout(Layout::RoundRobin {
        matches: matches.clone(),
    });
    graph.settle(matches, &mut Propagation::default());
    graph
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::competitor::{CompetitorId, Roster};
    use crate::config::Format;
    use crate::seeding::SeedingEngine;

    #[test]
    fn every_pair_exactly_once() {
        let roster = Roster::from_names(&["Ana", "Bo", "Cy", "Di", "Ed"]).unwrap();
        let seeded = SeedingEngine::default()
            .seed(&roster, Format::RoundRobin)
            .unwrap();
        let graph = build(&seeded);

        assert_eq!(graph.len(), 10);
        assert_eq!(graph.active().count(), 10);

        let pairs: BTreeSet<(CompetitorId, CompetitorId)> = graph
            .matches()
            .iter()
            .filter_map(|m| {
                let [a, b] = m.slots();
                let (a, b) = (a.competitor()?, b.competitor()?);
                Some((a.min(b), a.max(b)))
            })
            .collect();
        assert_eq!(pairs.len(), 10);
    }

    #[test]
    fn numbering_follows_seed_pairs() {
        let roster = Roster::from_names(&["Ana", "Bo", "Cy"]).unwrap();
        let seeded = SeedingEngine::default()
            .seed(&roster, Format::RoundRobin)
            .unwrap();
        let graph = build(&seeded);

        let c = |n| Slot::Competitor(CompetitorId::new(n));
        let slots: Vec<[Slot; 2]> = graph.matches().iter().map(|m| m.slots()).collect();
        assert_eq!(slots, vec![[c(1), c(2)], [c(1), c(3)], [c(2), c(3)]]);
        let positions: Vec<u32> = graph.matches().iter().map(|m| m.position()).collect();
        assert_eq!(positions, vec![1, 2, 3]);
    }
}
