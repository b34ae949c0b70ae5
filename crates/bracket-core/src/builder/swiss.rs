//! Swiss system: a fixed number of rounds, each paired from the standings.
//!
//! Round 1 is paired at activation; every later round is paired by an
//! explicit [`pair_next_round`] once the previous round is fully reported.
//!
//! # Pairing
//!
//! 1. Rank by points (desc), fewer byes, then seed.
//! 2. With an odd field, the lowest-ranked competitor among those with the
//!    fewest byes sits out and scores a point. No match is created.
//! 3. Pair top-down, never repeating an earlier pairing, backtracking as
//!    needed. The search gives up after `pairing_search_limit` candidate
//!    checks.
//! 4. If no repeat-free pairing was found, pair greedily while the top
//!    competitor still has a fresh opponent, then pair the rest in seed
//!    order. Repeats are counted and reported as
//!    [`BracketWarning::UnpairableRound`].

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::bracket::{BracketGraph, BracketSide, Layout, Match, MatchId, Propagation, Slot};
use crate::competitor::CompetitorId;
use crate::config::{Format, SwissConfig};
use crate::error::{BracketError, BracketWarning, Result};
use crate::seeding::SeededSlots;
use crate::standings::Standings;

/// One paired Swiss round.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SwissRound {
    /// Round number, 1-based
    pub number: u32,
    /// Matches of this round
    pub matches: Vec<MatchId>,
    /// Competitor sitting out with a bye
    pub bye: Option<CompetitorId>,
    /// True if some pairs repeat an earlier round
    pub repeat_fallback: bool,
}

/// Swiss layout state: rounds so far plus the standings table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SwissState {
    total_rounds: u32,
    rounds: Vec<SwissRound>,
    standings: Standings,
    pairing_search_limit: usize,
}

impl SwissState {
    /// Fresh state for competitors in seed order.
    #[must_use]
    pub fn new(order: &[CompetitorId], total_rounds: u32, pairing_search_limit: usize) -> Self {
        Self {
            total_rounds,
            rounds: Vec::new(),
            standings: Standings::new(order),
            pairing_search_limit,
        }
    }

    /// Fixed number of rounds.
    #[must_use]
    pub const fn total_rounds(&self) -> u32 {
        self.total_rounds
    }

    /// Rounds paired so far.
    #[must_use]
    pub fn rounds(&self) -> &[SwissRound] {
        &self.rounds
    }

    /// Number of rounds paired so far.
    #[must_use]
    pub fn rounds_paired(&self) -> u32 {
        self.rounds.last().map_or(0, |r| r.number)
    }

    /// Current standings.
    #[must_use]
    pub const fn standings(&self) -> &Standings {
        &self.standings
    }

    pub(crate) fn standings_mut(&mut self) -> &mut Standings {
        &mut self.standings
    }
}

/// Result of pairing one round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundPairing {
    /// Round number
    pub round: u32,
    /// New matches, all active
    pub matches: Vec<MatchId>,
    /// Bye recipient, if the field is odd
    pub bye: Option<CompetitorId>,
    /// Set when the round had to repeat pairings
    pub warning: Option<BracketWarning>,
}

/// Builds the Swiss state and pairs round 1.
#[must_use]
pub fn build(seeded: &SeededSlots, config: &SwissConfig) -> BracketGraph {
    let total_rounds = config
        .rounds
        .unwrap_or_else(|| seeded.sizing.swiss_rounds());
    let mut graph = BracketGraph::new(seeded.order.clone());
    let mut state = SwissState::new(&seeded.order, total_rounds, config.pairing_search_limit);
    pair_round(&mut graph, &mut state);
    graph.set_layout(Layout::Swiss(state));
    graph
}

/// Pairs the next Swiss round.
///
/// # Errors
///
/// - [`BracketError::NotActivated`] if the graph has not been built
/// - [`BracketError::FormatMismatch`] if it is not a Swiss graph
/// - [`BracketError::RoundInProgress`] while the current round has
///   unfinished matches
/// - [`BracketError::NoRoundsRemaining`] once every round is paired
pub fn pair_next_round(graph: &mut BracketGraph) -> Result<RoundPairing> {
    let state = match graph.layout() {
        Layout::Swiss(state) => state,
        Layout::Unbuilt => return Err(BracketError::NotActivated),
        other => {
            return Err(BracketError::FormatMismatch {
                expected: Format::Swiss,
                actual: other.format().unwrap_or_default(),
            })
        }
    };

    if let Some(current) = state.rounds.last() {
        let finished = current
            .matches
            .iter()
            .all(|&id| graph.get(id).is_some_and(Match::is_completed));
        if !finished {
            return Err(BracketError::RoundInProgress {
                round: current.number,
            });
        }
    }
    if state.rounds_paired() >= state.total_rounds {
        return Err(BracketError::NoRoundsRemaining {
            total: state.total_rounds,
        });
    }

    graph
        .with_swiss(pair_round)
        .ok_or(BracketError::NotActivated)
}

fn pair_round(graph: &mut BracketGraph, state: &mut SwissState) -> RoundPairing {
    let number = state.rounds_paired() + 1;
    let mut pool: Vec<CompetitorId> = state
        .standings
        .ranking()
        .iter()
        .map(|e| e.competitor)
        .collect();

    let bye = if pool.len() % 2 == 1 {
        let pick = pool
            .iter()
            .rev()
            .min_by_key(|&&c| state.standings.get(c).map_or(0, |e| e.byes))
            .copied();
        if let Some(c) = pick {
            pool.retain(|&x| x != c);
            state.standings.award_bye(c);
        }
        pick
    } else {
        None
    };

    let (pairs, repeated) = match search(&pool, &state.standings, state.pairing_search_limit) {
        Some(pairs) => (pairs, 0),
        None => fallback(&pool, &state.standings),
    };

    let matches: Vec<MatchId> = (1u32..)
        .zip(&pairs)
        .map(|(position, &(a, b))| {
            graph.spawn(
                BracketSide::Swiss,
                number,
                position,
                [Slot::Competitor(a), Slot::Competitor(b)],
            )
        })
        .collect();
    graph.settle(matches.clone(), &mut Propagation::default());

    let warning = (repeated > 0).then_some(BracketWarning::UnpairableRound {
        round: number,
        repeated_pairs: repeated,
    });
    if warning.is_some() {
        warn!(round = number, repeated_pairs = repeated, "swiss round repeats earlier pairings");
    } else {
        debug!(round = number, matches = matches.len(), bye = ?bye, "swiss round paired");
    }

    state.rounds.push(SwissRound {
        number,
        matches: matches.clone(),
        bye,
        repeat_fallback: repeated > 0,
    });

    RoundPairing {
        round: number,
        matches,
        bye,
        warning,
    }
}

type Pair = (CompetitorId, CompetitorId);

/// Depth-first search for a repeat-free pairing of `pool` (ranked order).
fn search(pool: &[CompetitorId], standings: &Standings, limit: usize) -> Option<Vec<Pair>> {
    let mut used = vec![false; pool.len()];
    let mut pairs = Vec::with_capacity(pool.len() / 2);
    let mut budget = limit;
    extend(pool, standings, &mut used, &mut pairs, &mut budget).then_some(pairs)
}

fn extend(
    pool: &[CompetitorId],
    standings: &Standings,
    used: &mut [bool],
    pairs: &mut Vec<Pair>,
    budget: &mut usize,
) -> bool {
    let Some(top) = used.iter().position(|u| !u) else {
        return true;
    };
    used[top] = true;
    for other in top + 1..pool.len() {
        if used[other] {
            continue;
        }
        if *budget == 0 {
            break;
        }
        *budget -= 1;
        if standings.have_met(pool[top], pool[other]) {
            continue;
        }
        used[other] = true;
        pairs.push((pool[top], pool[other]));
        if extend(pool, standings, used, pairs, budget) {
            return true;
        }
        pairs.pop();
        used[other] = false;
    }
    used[top] = false;
    false
}

/// Greedy top-down pairing, then seed order for whoever is left.
fn fallback(pool: &[CompetitorId], standings: &Standings) -> (Vec<Pair>, usize) {
    let mut remaining = pool.to_vec();
    let mut pairs = Vec::with_capacity(pool.len() / 2);

    while let Some(&top) = remaining.first() {
        let fresh = remaining
            .iter()
            .skip(1)
            .position(|&c| !standings.have_met(top, c));
        let Some(offset) = fresh else {
            break;
        };
        let opponent = remaining.remove(offset + 1);
        remaining.remove(0);
        pairs.push((top, opponent));
    }

    remaining.sort_by_key(|&c| standings.get(c).map_or(usize::MAX, |e| e.seed));
    let mut repeated = 0;
    for pair in remaining.chunks_exact(2) {
        if standings.have_met(pair[0], pair[1]) {
            repeated += 1;
        }
        pairs.push((pair[0], pair[1]));
    }
    (pairs, repeated)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u64) -> CompetitorId {
        CompetitorId::new(n)
    }

    #[test]
    fn search_backtracks_around_a_repeat() {
        let mut standings = Standings::new(&[id(1), id(2), id(3), id(4)]);
        standings.record_result(id(1), id(2));
        // Ranked order 1, 2, 3, 4 with 1-2 already played.
        let pairs = search(&[id(1), id(2), id(3), id(4)], &standings, 100).unwrap();
        assert_eq!(pairs, vec![(id(1), id(3)), (id(2), id(4))]);
    }

    #[test]
    fn search_gives_up_when_everyone_has_met() {
        let mut standings = Standings::new(&[id(1), id(2), id(3), id(4)]);
        standings.record_result(id(1), id(2));
        standings.record_result(id(1), id(3));
        standings.record_result(id(1), id(4));
        assert_eq!(search(&[id(1), id(2), id(3), id(4)], &standings, 100), None);
    }

    #[test]
    fn zero_budget_finds_nothing() {
        let standings = Standings::new(&[id(1), id(2)]);
        assert_eq!(search(&[id(1), id(2)], &standings, 0), None);
    }

    #[test]
    fn fallback_counts_repeats() {
        let mut standings = Standings::new(&[id(1), id(2), id(3), id(4)]);
        standings.record_result(id(1), id(2));
        standings.record_result(id(1), id(3));
        standings.record_result(id(1), id(4));
        let (pairs, repeated) = fallback(&[id(1), id(2), id(3), id(4)], &standings);
        assert_eq!(pairs, vec![(id(1), id(2)), (id(3), id(4))]);
        assert_eq!(repeated, 1);
    }
}
