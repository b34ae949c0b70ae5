//! State hashing for determinism checks.
//!
//! Two tournaments built from the same roster, config and seed, and fed the
//! same results, produce the same hash.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::bracket::{Layout, Match};
use crate::tournament::Tournament;

/// Compute a deterministic hash of tournament state.
///
/// This hash includes:
/// - Id, format and status
/// - Every match (slots, scores, status, winner, links)
/// - Round structure and, for Swiss, the standings table
#[must_use]
pub fn hash_tournament(tournament: &Tournament) -> u64 {
    let mut hasher = DefaultHasher::new();

    tournament.id().hash(&mut hasher);
    tournament.format().hash(&mut hasher);
    tournament.status().hash(&mut hasher);
    tournament.graph().seeding().hash(&mut hasher);

    tournament.graph().len().hash(&mut hasher);
    for m in tournament.graph().matches() {
        hash_match(m, &mut hasher);
    }

    hash_layout(tournament.graph().layout(), &mut hasher);
    tournament.warnings().hash(&mut hasher);

    hasher.finish()
}

fn hash_match<H: Hasher>(m: &Match, hasher: &mut H) {
    m.id().hash(hasher);
    m.side().hash(hasher);
    m.round().hash(hasher);
    m.position().hash(hasher);
    m.slots().hash(hasher);
    m.scores().hash(hasher);
    m.status().hash(hasher);
    m.winner().hash(hasher);
    m.winner_to().hash(hasher);
    m.loser_to().hash(hasher);
}

fn hash_layout<H: Hasher>(layout: &Layout, hasher: &mut H) {
    match layout {
        Layout::Unbuilt => {
            0u8.hash(hasher);
        }
        Layout::SingleElimination { rounds } => {
            1u8.hash(hasher);
            rounds.hash(hasher);
        }
        Layout::DoubleElimination(double) => {
            2u8.hash(hasher);
            double.hash(hasher);
        }
        Layout::RoundRobin { matches } => {
            3u8.hash(hasher);
            matches.hash(hasher);
        }
        Layout::Swiss(state) => {
            4u8.hash(hasher);
            state.total_rounds().hash(hasher);
            state.rounds().hash(hasher);
            state.standings().hash(hasher);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::competitor::Roster;
    use crate::config::{Format, TournamentConfig};
    use crate::tournament::LifecycleController;

    fn fresh(format: Format) -> Tournament {
        let roster = Roster::from_names(&["Ana", "Bo", "Cy", "Di", "Ed", "Fay"]).unwrap();
        Tournament::new(1, TournamentConfig::new("Hash Cup", format), roster).unwrap()
    }

    #[test]
    fn identical_tournaments_hash_equal() {
        let a = fresh(Format::Swiss);
        let b = fresh(Format::Swiss);
        assert_eq!(hash_tournament(&a), hash_tournament(&b));
    }

    #[test]
    fn hash_changes_with_state() {
        let mut t = fresh(Format::RoundRobin);
        let before = hash_tournament(&t);

        let mut controller = LifecycleController::new();
        controller.activate(&mut t).unwrap();
        let activated = hash_tournament(&t);
        assert_ne!(before, activated);

        let id = t.active_match_ids()[0];
        controller.report(&mut t, id, 2, 1).unwrap();
        assert_ne!(activated, hash_tournament(&t));
    }

    #[test]
    fn hash_differs_by_format() {
        assert_ne!(
            hash_tournament(&fresh(Format::SingleElimination)),
            hash_tournament(&fresh(Format::DoubleElimination))
        );
    }
}
