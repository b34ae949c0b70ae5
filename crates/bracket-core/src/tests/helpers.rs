//! Test helper functions for setting up tournaments and playing them out.

use std::collections::BTreeSet;

use crate::bracket::{Match, SlotIndex};
use crate::competitor::{CompetitorId, Roster};
use crate::config::{Format, TournamentConfig};
use crate::observer::LifecycleObserver;
use crate::tournament::{LifecycleController, Tournament, TournamentStatus};

// =============================================================================
// Setup
// =============================================================================

/// Installs a fmt subscriber writing through the test harness.
///
/// Safe to call from every test; only the first call installs.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// A roster of `n` players named `Player 1..=n`, ids `1..=n`.
pub fn roster_of(n: usize) -> Roster {
    let names: Vec<String> = (1..=n).map(|i| format!("Player {i}")).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    Roster::from_names(&refs).expect("generated names are valid")
}

/// A tournament in setup with default options for `format`.
pub fn setup(format: Format, n: usize) -> Tournament {
    Tournament::new(1, TournamentConfig::new("Test Cup", format), roster_of(n))
        .expect("default config is valid")
}

/// A tournament in setup with a custom config.
pub fn setup_with(config: TournamentConfig, n: usize) -> Tournament {
    Tournament::new(1, config, roster_of(n)).expect("config is valid")
}

/// Shorthand for a competitor id.
pub fn cid(n: u64) -> CompetitorId {
    CompetitorId::new(n)
}

// =============================================================================
// Play-out
// =============================================================================

/// Reports every active match until the tournament completes, advancing
/// Swiss rounds as they finish. `pick` chooses each match's winning slot.
///
/// Winners score the format threshold, losers zero. Returns the number of
/// results reported.
pub fn play_out<O: LifecycleObserver>(
    controller: &mut LifecycleController<O>,
    tournament: &mut Tournament,
    mut pick: impl FnMut(&Match) -> SlotIndex,
) -> usize {
    let target = tournament.config().match_format.wins_required();
    let mut reported = 0;
    loop {
        let Some(&id) = tournament.active_match_ids().first() else {
            if tournament.format() == Format::Swiss
                && tournament.status() == TournamentStatus::Active
                && controller.advance_round(tournament).is_ok()
            {
                continue;
            }
            break;
        };
        let m = tournament.get_match(id).expect("active match exists");
        let scores = match pick(m) {
            SlotIndex::First => (target, 0),
            SlotIndex::Second => (0, target),
        };
        controller
            .report(tournament, id, scores.0, scores.1)
            .expect("valid result on active match");
        reported += 1;
    }
    reported
}

/// The first slot always wins.
pub fn first_wins(_: &Match) -> SlotIndex {
    SlotIndex::First
}

/// Unordered pairs of every played match, in match order.
pub fn played_pairs(tournament: &Tournament) -> Vec<(CompetitorId, CompetitorId)> {
    tournament
        .graph()
        .matches()
        .iter()
        .filter_map(|m| {
            let [a, b] = m.slots();
            let (a, b) = (a.competitor()?, b.competitor()?);
            Some((a.min(b), a.max(b)))
        })
        .collect()
}

/// Distinct competitors across `pairs`.
pub fn distinct(pairs: &[(CompetitorId, CompetitorId)]) -> BTreeSet<CompetitorId> {
    pairs.iter().flat_map(|&(a, b)| [a, b]).collect()
}
