//! Tournaments and their lifecycle.
//!
//! A [`Tournament`] owns its configuration, roster and bracket graph. It is
//! created in `setup` with an empty graph. The [`LifecycleController`]
//! builds the graph exactly once at activation and then routes every
//! result through the [`MatchProgressionEngine`].
//!
//! ```text
//! setup ──activate──▶ active ──(last deciding result)──▶ completed
//! ```
//!
//! # Example
//!
//! ```
//! use bracket_core::competitor::Roster;
//! use bracket_core::config::{Format, TournamentConfig};
//! use bracket_core::tournament::{LifecycleController, Tournament, TournamentStatus};
//!
//! let roster = Roster::from_names(&["Ana", "Bo", "Cy", "Di"]).unwrap();
//! let config = TournamentConfig::new("Club Night", Format::SingleElimination);
//! let mut tournament = Tournament::new(1, config, roster).unwrap();
//!
//! let mut controller = LifecycleController::new();
//! controller.activate(&mut tournament).unwrap();
//!
//! while let Some(&id) = tournament.active_match_ids().first() {
//!     controller.report(&mut tournament, id, 2, 0).unwrap();
//! }
//!
//! assert_eq!(tournament.status(), TournamentStatus::Completed);
//! assert_eq!(tournament.champion().map(u64::from), Some(1));
//! ```

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::bracket::{BracketGraph, Match, MatchId};
use crate::builder::swiss::{self, RoundPairing};
use crate::builder::BracketBuilder;
use crate::competitor::{CompetitorId, Roster};
use crate::config::{Format, TournamentConfig};
use crate::error::{BracketError, BracketWarning, Result};
use crate::hash::hash_tournament;
use crate::observer::{LifecycleObserver, NoopObserver};
use crate::progression::{MatchProgressionEngine, ReportOutcome};
use crate::seeding::{SeededSlots, SeedingEngine};
use crate::standings::{tally, CompetitorRecord, Standings};

/// Unique identifier for a tournament.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TournamentId(u64);

impl TournamentId {
    /// Creates a new `TournamentId` from a raw `u64` value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw `u64` value of this identifier.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for TournamentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TournamentId({})", self.0)
    }
}

impl fmt::Display for TournamentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TournamentId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

/// Tournament lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    /// Roster and config set, no bracket yet.
    #[default]
    Setup,
    /// Bracket built; accepting results.
    Active,
    /// Finished. Terminal.
    Completed,
}

impl fmt::Display for TournamentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Setup => write!(f, "setup"),
            Self::Active => write!(f, "active"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

/// A tournament: configuration, roster, bracket and status.
///
/// Everything is serializable, so a snapshot restores an identical
/// tournament (see [`to_json`](Self::to_json)).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tournament {
    id: TournamentId,
    config: TournamentConfig,
    roster: Roster,
    graph: BracketGraph,
    status: TournamentStatus,
    warnings: Vec<BracketWarning>,
}

impl Tournament {
    /// Creates a tournament in setup.
    ///
    /// # Errors
    ///
    /// Returns any error from [`TournamentConfig::validate`]. Roster size is
    /// checked against the format at activation.
    pub fn new(
        id: impl Into<TournamentId>,
        config: TournamentConfig,
        roster: Roster,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            id: id.into(),
            config,
            roster,
            graph: BracketGraph::default(),
            status: TournamentStatus::Setup,
            warnings: Vec::new(),
        })
    }

    /// Tournament id.
    #[must_use]
    pub const fn id(&self) -> TournamentId {
        self.id
    }

    /// Configuration.
    #[must_use]
    pub const fn config(&self) -> &TournamentConfig {
        &self.config
    }

    /// Format tag.
    #[must_use]
    pub const fn format(&self) -> Format {
        self.config.format
    }

    /// Roster.
    #[must_use]
    pub const fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Bracket graph; empty until activation.
    #[must_use]
    pub const fn graph(&self) -> &BracketGraph {
        &self.graph
    }

    /// Lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TournamentStatus {
        self.status
    }

    /// Pairing warnings recorded so far.
    #[must_use]
    pub fn warnings(&self) -> &[BracketWarning] {
        &self.warnings
    }

    /// Looks up a match.
    #[must_use]
    pub fn get_match(&self, id: MatchId) -> Option<&Match> {
        self.graph.get(id)
    }

    /// Matches currently accepting a result, in creation order.
    #[must_use]
    pub fn active_matches(&self) -> Vec<&Match> {
        self.graph.active().collect()
    }

    /// Ids of matches currently accepting a result, in creation order.
    #[must_use]
    pub fn active_match_ids(&self) -> Vec<MatchId> {
        self.graph.active().map(Match::id).collect()
    }

    /// Swiss standings, for Swiss tournaments past setup.
    #[must_use]
    pub fn standings(&self) -> Option<&Standings> {
        self.graph.swiss().map(swiss::SwissState::standings)
    }

    /// Win/loss leaderboard.
    ///
    /// Swiss follows the standings order; other formats sort by wins, then
    /// losses, then seed.
    #[must_use]
    pub fn leaderboard(&self) -> Vec<CompetitorRecord> {
        match self.standings() {
            Some(standings) => standings
                .ranking()
                .into_iter()
                .map(|e| CompetitorRecord {
                    competitor: e.competitor,
                    wins: e.wins,
                    losses: e.losses,
                })
                .collect(),
            None => tally(&self.graph),
        }
    }

    /// The winner, once the tournament is completed.
    #[must_use]
    pub fn champion(&self) -> Option<CompetitorId> {
        if self.status != TournamentStatus::Completed {
            return None;
        }
        if self.config.format.is_elimination() {
            self.graph.deciding_match().and_then(Match::winner)
        } else {
            self.leaderboard().first().map(|r| r.competitor)
        }
    }

    /// Deterministic hash of the full tournament state.
    #[must_use]
    pub fn state_hash(&self) -> u64 {
        hash_tournament(self)
    }

    /// Serializes a snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`BracketError::Snapshot`] if encoding fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| BracketError::Snapshot(e.to_string()))
    }

    /// Restores a tournament from a snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`BracketError::Snapshot`] if the JSON does not describe a
    /// tournament.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| BracketError::Snapshot(e.to_string()))
    }
}

/// Drives tournaments through `setup → active → completed`.
///
/// Holds no tournament state of its own; one controller can serve many
/// tournaments. `O` receives the activation and completion notifications.
#[derive(Debug, Default)]
pub struct LifecycleController<O = NoopObserver> {
    observer: O,
}

impl LifecycleController {
    /// Creates a controller without an observer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            observer: NoopObserver,
        }
    }
}

impl<O: LifecycleObserver> LifecycleController<O> {
    /// Creates a controller notifying `observer`.
    pub const fn with_observer(observer: O) -> Self {
        Self { observer }
    }

    /// The observer.
    pub const fn observer(&self) -> &O {
        &self.observer
    }

    /// The observer, mutably.
    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Consumes the controller, returning the observer.
    pub fn into_observer(self) -> O {
        self.observer
    }

    /// Seeds the roster with the configured strategy, builds the bracket and
    /// activates the tournament.
    ///
    /// # Errors
    ///
    /// - [`BracketError::AlreadyActive`] / [`BracketError::AlreadyCompleted`]
    ///   unless the tournament is in setup
    /// - [`BracketError::InsufficientCompetitors`] if the roster is too small
    pub fn activate(&mut self, tournament: &mut Tournament) -> Result<()> {
        ensure_setup(tournament)?;
        let seeded = SeedingEngine::new(tournament.config.seeding)
            .seed(&tournament.roster, tournament.config.format)?;
        self.install(tournament, &seeded);
        Ok(())
    }

    /// Like [`activate`](Self::activate), but shuffles with `rng` regardless
    /// of the configured seeding strategy.
    ///
    /// # Errors
    ///
    /// Same as [`activate`](Self::activate).
    pub fn activate_with_rng<R: Rng + ?Sized>(
        &mut self,
        tournament: &mut Tournament,
        rng: &mut R,
    ) -> Result<()> {
        ensure_setup(tournament)?;
        let seeded = SeedingEngine::new(tournament.config.seeding).seed_with_rng(
            &tournament.roster,
            tournament.config.format,
            rng,
        )?;
        self.install(tournament, &seeded);
        Ok(())
    }

    fn install(&mut self, tournament: &mut Tournament, seeded: &SeededSlots) {
        let builder = BracketBuilder::from(tournament.config.format);
        tournament.graph = builder.build(seeded, &tournament.config.swiss);
        tournament.status = TournamentStatus::Active;
        info!(
            tournament = %tournament.id,
            format = %tournament.config.format,
            competitors = tournament.roster.len(),
            matches = tournament.graph.len(),
            "tournament activated"
        );
        self.observer.tournament_activated(tournament);
    }

    /// Reports a match result, then checks for completion.
    ///
    /// # Errors
    ///
    /// - [`BracketError::NotActivated`] in setup
    /// - [`BracketError::AlreadyCompleted`] once completed
    /// - any error from [`MatchProgressionEngine::report`]
    pub fn report(
        &mut self,
        tournament: &mut Tournament,
        match_id: MatchId,
        first: u32,
        second: u32,
    ) -> Result<ReportOutcome> {
        ensure_active(tournament)?;
        let engine = MatchProgressionEngine::new(tournament.config.match_format);
        let outcome = engine.report(&mut tournament.graph, match_id, first, second)?;
        self.check_completion(tournament);
        Ok(outcome)
    }

    /// Pairs the next Swiss round.
    ///
    /// # Errors
    ///
    /// - [`BracketError::FormatMismatch`] for non-Swiss tournaments
    /// - [`BracketError::NotActivated`] / [`BracketError::AlreadyCompleted`]
    ///   outside the active state
    /// - [`BracketError::RoundInProgress`] / [`BracketError::NoRoundsRemaining`]
    pub fn advance_round(&mut self, tournament: &mut Tournament) -> Result<RoundPairing> {
        if tournament.config.format != Format::Swiss {
            return Err(BracketError::FormatMismatch {
                expected: Format::Swiss,
                actual: tournament.config.format,
            });
        }
        ensure_active(tournament)?;
        let pairing = swiss::pair_next_round(&mut tournament.graph)?;
        if let Some(warning) = &pairing.warning {
            tournament.warnings.push(warning.clone());
        }
        Ok(pairing)
    }

    /// Marks the tournament completed if nothing is left to decide.
    ///
    /// Returns whether the tournament is completed. Safe to call any number
    /// of times; the completion notification fires once.
    pub fn check_completion(&mut self, tournament: &mut Tournament) -> bool {
        if tournament.status == TournamentStatus::Active && tournament.graph.is_finished() {
            tournament.status = TournamentStatus::Completed;
            info!(
                tournament = %tournament.id,
                champion = ?tournament.champion(),
                "tournament completed"
            );
            self.observer.tournament_completed(tournament);
        }
        tournament.status == TournamentStatus::Completed
    }
}

fn ensure_setup(tournament: &Tournament) -> Result<()> {
    match tournament.status {
        TournamentStatus::Setup => Ok(()),
        TournamentStatus::Active => Err(BracketError::AlreadyActive),
        TournamentStatus::Completed => Err(BracketError::AlreadyCompleted),
    }
}

fn ensure_active(tournament: &Tournament) -> Result<()> {
    match tournament.status {
        TournamentStatus::Active => Ok(()),
        TournamentStatus::Setup => Err(BracketError::NotActivated),
        TournamentStatus::Completed => Err(BracketError::AlreadyCompleted),
    }
}
