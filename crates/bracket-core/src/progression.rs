//! Result reporting and propagation.
//!
//! [`MatchProgressionEngine::report`] is the only way a match completes by
//! play. It validates everything up front and then applies the result in
//! one step: score, status, winner, and the downstream effects.
//!
//! | Side          | Effect of a result                                   |
//! |---------------|------------------------------------------------------|
//! | Winners       | winner advances; in double elim the loser drops      |
//! | Losers        | winner advances; loser is out                        |
//! | Grand final   | slot 2 winning spawns the reset                      |
//! | Round robin   | none                                                 |
//! | Swiss         | standings updated; next round paired separately      |

use tracing::{debug, info};

use crate::bracket::{
    BracketGraph, BracketSide, MatchId, MatchStatus, Propagation, SlotIndex, SlotRef,
};
use crate::competitor::CompetitorId;
use crate::config::MatchFormat;
use crate::error::{BracketError, Result};

/// Everything a successful report changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOutcome {
    /// The completed match
    pub match_id: MatchId,
    /// Its winner
    pub winner: CompetitorId,
    /// Its loser
    pub loser: CompetitorId,
    /// Downstream slots written, in order
    pub placed: Vec<SlotRef>,
    /// Matches that became active
    pub activated: Vec<MatchId>,
    /// Matches resolved by a bye during propagation
    pub walkovers: Vec<MatchId>,
    /// Grand final reset, if this result created one
    pub reset_spawned: Option<MatchId>,
}

/// Validates and applies match results under one match format.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchProgressionEngine {
    match_format: MatchFormat,
}

impl MatchProgressionEngine {
    /// Creates an engine enforcing `match_format`.
    #[must_use]
    pub const fn new(match_format: MatchFormat) -> Self {
        Self { match_format }
    }

    /// The enforced match format.
    #[must_use]
    pub const fn match_format(&self) -> MatchFormat {
        self.match_format
    }

    /// Checks a result without applying it and returns the winning slot.
    ///
    /// # Errors
    ///
    /// - [`BracketError::MatchNotFound`] if `match_id` is unknown
    /// - [`BracketError::MatchNotActive`] if the match is pending or completed
    /// - [`BracketError::InvalidScore`] if the score does not decide the match
    pub fn validate(
        &self,
        graph: &BracketGraph,
        match_id: MatchId,
        first: u32,
        second: u32,
    ) -> Result<SlotIndex> {
        let m = graph
            .get(match_id)
            .ok_or(BracketError::MatchNotFound(match_id))?;
        if m.status() != MatchStatus::Active {
            return Err(BracketError::MatchNotActive {
                match_id,
                status: m.status(),
            });
        }
        self.match_format
            .decide(first, second)
            .ok_or(BracketError::InvalidScore {
                first,
                second,
                format: self.match_format,
            })
    }

    /// Reports a result for an active match and propagates it.
    ///
    /// On error nothing is modified.
    ///
    /// # Errors
    ///
    /// Same as [`validate`](Self::validate).
    pub fn report(
        &self,
        graph: &mut BracketGraph,
        match_id: MatchId,
        first: u32,
        second: u32,
    ) -> Result<ReportOutcome> {
        let winner_slot = self.validate(graph, match_id, first, second)?;

        let m = graph
            .get_mut(match_id)
            .ok_or(BracketError::MatchNotFound(match_id))?;
        let [Some(first_id), Some(second_id)] = m.slots().map(|s| s.competitor()) else {
            return Err(BracketError::MatchNotActive {
                match_id,
                status: m.status(),
            });
        };
        let (winner, loser) = match winner_slot {
            SlotIndex::First => (first_id, second_id),
            SlotIndex::Second => (second_id, first_id),
        };
        let (side, round) = (m.side(), m.round());
        m.complete(winner_slot, [first, second]);
        debug!(match_id = %match_id, %winner, %loser, first, second, "match completed");

        let mut prop = Propagation::default();
        let mut reset_spawned = None;
        match side {
            BracketSide::Swiss => {
                if let Some(state) = graph.swiss_mut() {
                    state.standings_mut().record_result(winner, loser);
                }
            }
            BracketSide::RoundRobin => {}
            BracketSide::Winners | BracketSide::Losers => {
                graph.advance(match_id, winner_slot, &mut prop);
            }
            BracketSide::GrandFinal => {
                if round == 1 && winner_slot == SlotIndex::Second {
                    reset_spawned = graph.spawn_reset(&mut prop);
                    if let Some(reset) = reset_spawned {
                        info!(match_id = %reset, "losers champion took the grand final, reset spawned");
                    }
                }
            }
        }

        Ok(ReportOutcome {
            match_id,
            winner,
            loser,
            placed: prop.placed,
            activated: prop.activated,
            walkovers: prop.walkovers,
            reset_spawned,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bracket::Slot;
    use crate::builder::BracketBuilder;
    use crate::competitor::Roster;
    use crate::config::{Format, SwissConfig};
    use crate::seeding::SeedingEngine;

    fn graph_for(format: Format, names: &[&str]) -> BracketGraph {
        let roster = Roster::from_names(names).unwrap();
        let seeded = SeedingEngine::default().seed(&roster, format).unwrap();
        BracketBuilder::from(format).build(&seeded, &SwissConfig::default())
    }

    #[test]
    fn rejects_unknown_pending_and_bad_scores() {
        let mut graph = graph_for(Format::SingleElimination, &["Ana", "Bo", "Cy", "Di"]);
        let engine = MatchProgressionEngine::new(MatchFormat::BestOf3);
        let final_id = graph.round(BracketSide::Winners, 2)[0].id();
        let semi = graph.round(BracketSide::Winners, 1)[0].id();

        assert_eq!(
            engine.report(&mut graph, MatchId::new(99), 2, 0),
            Err(BracketError::MatchNotFound(MatchId::new(99)))
        );
        assert_eq!(
            engine.report(&mut graph, final_id, 2, 0),
            Err(BracketError::MatchNotActive {
                match_id: final_id,
                status: MatchStatus::Pending
            })
        );
        let before = graph.clone();
        assert!(matches!(
            engine.report(&mut graph, semi, 2, 2),
            Err(BracketError::InvalidScore { .. })
        ));
        assert_eq!(graph, before);
    }

    #[test]
    fn result_fills_exactly_one_downstream_slot() {
        let mut graph = graph_for(Format::SingleElimination, &["Ana", "Bo", "Cy", "Di"]);
        let engine = MatchProgressionEngine::default();
        let semi = graph.round(BracketSide::Winners, 1)[0].id();
        let final_id = graph.round(BracketSide::Winners, 2)[0].id();

        let outcome = engine.report(&mut graph, semi, 2, 1).unwrap();
        assert_eq!(outcome.winner, CompetitorId::new(1));
        assert_eq!(outcome.loser, CompetitorId::new(2));
        assert_eq!(outcome.placed, vec![SlotRef::new(final_id, SlotIndex::First)]);
        assert!(outcome.activated.is_empty());
        assert_eq!(
            graph.get(final_id).map(|m| m.slots()),
            Some([Slot::Competitor(CompetitorId::new(1)), Slot::Empty])
        );

        assert!(matches!(
            engine.report(&mut graph, semi, 2, 0),
            Err(BracketError::MatchNotActive {
                status: MatchStatus::Completed,
                ..
            })
        ));
    }

    #[test]
    fn swiss_result_updates_standings() {
        let mut graph = graph_for(
            Format::Swiss,
            &["Ana", "Bo", "Cy", "Di", "Ed", "Fay"],
        );
        let engine = MatchProgressionEngine::default();
        let first = graph.round(BracketSide::Swiss, 1)[0].id();

        let outcome = engine.report(&mut graph, first, 0, 2).unwrap();
        assert!(outcome.placed.is_empty());

        let standings = graph.swiss().unwrap().standings();
        assert_eq!(standings.get(outcome.winner).map(|e| e.points), Some(1));
        assert_eq!(standings.get(outcome.loser).map(|e| e.losses), Some(1));
        assert!(standings.have_met(outcome.winner, outcome.loser));
    }
}
