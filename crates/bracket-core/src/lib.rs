//! # Bracket Core
//!
//! Bracket generation and match progression for tournaments.
//!
//! A fixed roster is seeded into one of four formats, and results are
//! reported match by match until a champion is decided:
//!
//! - **Single elimination**: one loss and you are out
//! - **Double elimination**: winners and losers brackets, grand final and reset
//! - **Round robin**: everyone plays everyone once
//! - **Swiss**: a fixed number of rounds, each paired from the standings
//!
//! ## Architecture
//!
//! ```text
//! Roster ─▶ SeedingEngine ─▶ BracketBuilder ─▶ BracketGraph
//!                                                  │
//!              LifecycleController ─report─▶ MatchProgressionEngine
//! ```
//!
//! Every operation is synchronous and either succeeds completely or fails
//! with a [`BracketError`] before touching any state. A tournament is owned
//! by one caller at a time; different tournaments are fully independent.
//!
//! ## Usage
//!
//! ```
//! use bracket_core::{
//!     Format, LifecycleController, MatchFormat, Roster, SeedingStrategy, Tournament,
//!     TournamentConfig, TournamentStatus,
//! };
//!
//! let roster = Roster::from_names(&["Ana", "Bo", "Cy", "Di", "Ed"]).unwrap();
//! let config = TournamentConfig::new("Spring Open", Format::DoubleElimination)
//!     .with_match_format(MatchFormat::BestOf5)
//!     .with_seeding(SeedingStrategy::Random { seed: 2024 });
//!
//! let mut tournament = Tournament::new(1, config, roster).unwrap();
//! let mut controller = LifecycleController::new();
//! controller.activate(&mut tournament).unwrap();
//!
//! // The first listed competitor wins every match 3-1.
//! while let Some(&id) = tournament.active_match_ids().first() {
//!     controller.report(&mut tournament, id, 3, 1).unwrap();
//! }
//!
//! assert_eq!(tournament.status(), TournamentStatus::Completed);
//! assert!(tournament.champion().is_some());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod bracket;
pub mod builder;
pub mod competitor;
pub mod config;
pub mod error;
pub mod hash;
pub mod observer;
pub mod progression;
pub mod seeding;
pub mod standings;
pub mod tournament;

// Re-exports for convenience
pub use bracket::{BracketGraph, BracketSide, Match, MatchId, MatchStatus, Slot, SlotIndex};
pub use builder::BracketBuilder;
pub use competitor::{Competitor, CompetitorId, Roster, TeamMode};
pub use config::{Format, MatchFormat, SwissConfig, TournamentConfig};
pub use error::{BracketError, BracketWarning, Result};
pub use hash::hash_tournament;
pub use observer::{EventLog, LifecycleEvent, LifecycleObserver, NoopObserver};
pub use progression::{MatchProgressionEngine, ReportOutcome};
pub use seeding::{BracketSizing, SeedingEngine, SeedingStrategy};
pub use standings::{CompetitorRecord, StandingEntry, Standings};
pub use tournament::{LifecycleController, Tournament, TournamentId, TournamentStatus};

#[cfg(test)]
mod tests;
