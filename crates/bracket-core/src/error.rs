//! Error and warning types for bracket construction and match progression.
//!
//! Every fallible operation returns [`Result`]. Validation always runs before
//! any mutation, so an `Err` means the tournament is exactly as it was before
//! the call.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bracket::{MatchId, MatchStatus};
use crate::competitor::CompetitorId;
use crate::config::{Format, MatchFormat};

/// Errors returned by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BracketError {
    /// The roster is smaller than the format allows.
    #[error("at least {minimum} competitors are required, got {actual}")]
    InsufficientCompetitors {
        /// Smallest roster the format accepts.
        minimum: usize,
        /// Roster size supplied.
        actual: usize,
    },

    /// No match with this id exists in the bracket.
    #[error("match {0} does not exist")]
    MatchNotFound(MatchId),

    /// The match is not accepting results.
    #[error("match {match_id} is {status}, not active")]
    MatchNotActive {
        /// The match the result was reported against.
        match_id: MatchId,
        /// Its current status.
        status: MatchStatus,
    },

    /// The reported score does not satisfy the win condition.
    #[error("score {first}-{second} is not a valid {format} result")]
    InvalidScore {
        /// Score reported for the first slot.
        first: u32,
        /// Score reported for the second slot.
        second: u32,
        /// The configured match format.
        format: MatchFormat,
    },

    /// `activate` was called on an active tournament.
    #[error("tournament is already active")]
    AlreadyActive,

    /// The tournament has already finished.
    #[error("tournament is already completed")]
    AlreadyCompleted,

    /// The operation needs an active tournament but it is still in setup.
    #[error("tournament has not been activated")]
    NotActivated,

    /// The current Swiss round still has unfinished matches.
    #[error("round {round} still has unfinished matches")]
    RoundInProgress {
        /// The unfinished round.
        round: u32,
    },

    /// Every Swiss round has already been paired.
    #[error("all {total} rounds have already been paired")]
    NoRoundsRemaining {
        /// The fixed round count.
        total: u32,
    },

    /// The operation only applies to another format.
    #[error("operation requires {expected}, tournament is {actual}")]
    FormatMismatch {
        /// Format the operation supports.
        expected: Format,
        /// Format of the tournament.
        actual: Format,
    },

    /// Two roster entries share an id.
    #[error("competitor {0} appears more than once")]
    DuplicateCompetitor(CompetitorId),

    /// A player, team or tournament name failed validation.
    #[error("invalid name {name:?}: {reason}")]
    InvalidName {
        /// The rejected name.
        name: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The configuration could not be parsed or is inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A snapshot could not be encoded or decoded.
    #[error("snapshot error: {0}")]
    Snapshot(String),
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, BracketError>;

/// Non-fatal conditions recorded while running a tournament.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BracketWarning {
    /// No repeat-free Swiss pairing existed, so some pairs were repeated.
    UnpairableRound {
        /// The round that was paired with repeats.
        round: u32,
        /// How many of its pairs had already met.
        repeated_pairs: usize,
    },
}

impl std::fmt::Display for BracketWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnpairableRound {
                round,
                repeated_pairs,
            } => write!(
                f,
                "round {round} repeats {repeated_pairs} earlier pairing(s)"
            ),
        }
    }
}
