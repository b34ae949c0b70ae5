//! Standings and win/loss records.
//!
//! [`Standings`] is the running Swiss table: points, match record, opponent
//! history and byes per competitor. It is mutated only by the progression
//! engine (results) and the Swiss pairing step (byes).
//!
//! [`CompetitorRecord`] is a format-independent win/loss tally derived from
//! completed matches, used for leaderboards.

use serde::{Deserialize, Serialize};

use crate::bracket::BracketGraph;
use crate::competitor::CompetitorId;

/// One row of the Swiss table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StandingEntry {
    /// Competitor
    pub competitor: CompetitorId,
    /// 1-based seed, the final tiebreak
    pub seed: usize,
    /// Match wins plus byes
    pub points: u32,
    /// Matches won
    pub wins: u32,
    /// Matches lost
    pub losses: u32,
    /// Opponents faced, in order
    pub opponents: Vec<CompetitorId>,
    /// Byes received
    pub byes: u32,
}

impl StandingEntry {
    fn new(competitor: CompetitorId, seed: usize) -> Self {
        Self {
            competitor,
            seed,
            points: 0,
            wins: 0,
            losses: 0,
            opponents: Vec::new(),
            byes: 0,
        }
    }
}

/// Running Swiss table, stored in seed order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Standings {
    entries: Vec<StandingEntry>,
}

impl Standings {
    /// Zeroed table for competitors in seed order.
    #[must_use]
    pub fn new(order: &[CompetitorId]) -> Self {
        Self {
            entries: order
                .iter()
                .enumerate()
                .map(|(i, &c)| StandingEntry::new(c, i + 1))
                .collect(),
        }
    }

    /// Entries in seed order.
    #[must_use]
    pub fn entries(&self) -> &[StandingEntry] {
        &self.entries
    }

    /// Entry for `competitor`.
    #[must_use]
    pub fn get(&self, competitor: CompetitorId) -> Option<&StandingEntry> {
        self.entries.iter().find(|e| e.competitor == competitor)
    }

    fn get_mut(&mut self, competitor: CompetitorId) -> Option<&mut StandingEntry> {
        self.entries.iter_mut().find(|e| e.competitor == competitor)
    }

    /// Entries ranked by points (desc), then fewer byes, then seed.
    #[must_use]
    pub fn ranking(&self) -> Vec<&StandingEntry> {
        let mut ranked: Vec<&StandingEntry> = self.entries.iter().collect();
        ranked.sort_by(|a, b| {
            b.points
                .cmp(&a.points)
                .then(a.byes.cmp(&b.byes))
                .then(a.seed.cmp(&b.seed))
        });
        ranked
    }

    /// Returns true if `a` and `b` have already played each other.
    #[must_use]
    pub fn have_met(&self, a: CompetitorId, b: CompetitorId) -> bool {
        self.get(a).is_some_and(|e| e.opponents.contains(&b))
    }

    /// Applies a completed match.
    pub(crate) fn record_result(&mut self, winner: CompetitorId, loser: CompetitorId) {
        if let Some(entry) = self.get_mut(winner) {
            entry.points += 1;
            entry.wins += 1;
            entry.opponents.push(loser);
        }
        if let Some(entry) = self.get_mut(loser) {
            entry.losses += 1;
            entry.opponents.push(winner);
        }
    }

    /// Grants a bye, worth one point.
    pub(crate) fn award_bye(&mut self, competitor: CompetitorId) {
        if let Some(entry) = self.get_mut(competitor) {
            entry.points += 1;
            entry.byes += 1;
        }
    }
}

/// Win/loss tally for one competitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompetitorRecord {
    /// Competitor
    pub competitor: CompetitorId,
    /// Matches won (byes excluded)
    pub wins: u32,
    /// Matches lost
    pub losses: u32,
}

impl CompetitorRecord {
    /// Win percentage rounded to the nearest integer; 0 with no matches.
    ///
    /// ```
    /// use bracket_core::competitor::CompetitorId;
    /// use bracket_core::standings::CompetitorRecord;
    ///
    /// let record = CompetitorRecord { competitor: CompetitorId::new(1), wins: 2, losses: 1 };
    /// assert_eq!(record.win_rate(), 67);
    /// ```
    #[must_use]
    pub const fn win_rate(&self) -> u32 {
        let played = self.wins + self.losses;
        if played == 0 {
            0
        } else {
            (self.wins * 200 + played) / (2 * played)
        }
    }
}

/// Tallies played matches for every seeded competitor.
///
/// Sorted by wins (desc), losses (asc), then seed. Walkovers do not count.
#[must_use]
pub fn tally(graph: &BracketGraph) -> Vec<CompetitorRecord> {
    let mut records: Vec<CompetitorRecord> = graph
        .seeding()
        .iter()
        .map(|&competitor| CompetitorRecord {
            competitor,
            wins: 0,
            losses: 0,
        })
        .collect();

    for m in graph.matches().iter().filter(|m| m.is_completed()) {
        let (Some(winner), Some(loser)) = (m.winner(), m.loser()) else {
            continue;
        };
        for record in &mut records {
            if record.competitor == winner {
                record.wins += 1;
            } else if record.competitor == loser {
                record.losses += 1;
            }
        }
    }

    // Records were built in seed order, so a stable sort keeps seed as the last tiebreak.
    records.sort_by(|a, b| b.wins.cmp(&a.wins).then(a.losses.cmp(&b.losses)));
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u64) -> CompetitorId {
        CompetitorId::new(n)
    }

    #[test]
    fn ranking_breaks_ties_by_byes_then_seed() {
        let mut standings = Standings::new(&[id(1), id(2), id(3), id(4)]);
        standings.record_result(id(4), id(1));
        standings.award_bye(id(2));
        standings.record_result(id(3), id(2));
        // 2: bye point + loss; 3: win; 4: win
        let order: Vec<CompetitorId> = standings.ranking().iter().map(|e| e.competitor).collect();
        assert_eq!(order, vec![id(3), id(4), id(2), id(1)]);
    }

    #[test]
    fn history_is_symmetric() {
        let mut standings = Standings::new(&[id(1), id(2), id(3)]);
        standings.record_result(id(2), id(3));
        assert!(standings.have_met(id(2), id(3)));
        assert!(standings.have_met(id(3), id(2)));
        assert!(!standings.have_met(id(1), id(2)));

        let winner = standings.get(id(2)).unwrap();
        assert_eq!((winner.points, winner.wins, winner.losses), (1, 1, 0));
        let loser = standings.get(id(3)).unwrap();
        assert_eq!((loser.points, loser.wins, loser.losses), (0, 0, 1));
    }

    #[test]
    fn win_rate_rounds_and_handles_zero() {
        let rec = |wins, losses| CompetitorRecord {
            competitor: id(1),
            wins,
            losses,
        };
        assert_eq!(rec(0, 0).win_rate(), 0);
        assert_eq!(rec(1, 2).win_rate(), 33);
        assert_eq!(rec(1, 1).win_rate(), 50);
        assert_eq!(rec(5, 0).win_rate(), 100);
    }
}
