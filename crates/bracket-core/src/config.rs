//! Tournament configuration.
//!
//! [`TournamentConfig`] bundles everything a tournament is set up with:
//! the format tag, the match format (win condition), the seeding strategy
//! and Swiss options. It is plain serde data, so callers can keep it in
//! whatever settings store they use and load it with
//! [`TournamentConfig::from_json`].
//!
//! # Example
//!
//! ```
//! use bracket_core::config::{Format, MatchFormat, TournamentConfig};
//!
//! let config = TournamentConfig::from_json(
//!     r#"{ "name": "Friday Cup", "format": "double_elimination", "match_format": "bo5" }"#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.format, Format::DoubleElimination);
//! assert_eq!(config.match_format, MatchFormat::BestOf5);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::bracket::SlotIndex;
use crate::competitor::validate_name;
use crate::error::{BracketError, Result};
use crate::seeding::SeedingStrategy;

/// Shortest accepted tournament name, in characters, after trimming.
pub const MIN_TOURNAMENT_NAME_LEN: usize = 3;

/// Longest accepted tournament name, in characters, after trimming.
pub const MAX_TOURNAMENT_NAME_LEN: usize = 50;

/// Default cap on candidate checks during a Swiss pairing search.
pub const DEFAULT_PAIRING_SEARCH_LIMIT: usize = 10_000;

/// Tournament format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    /// One loss eliminates.
    #[default]
    SingleElimination,
    /// Winners and losers brackets; two losses eliminate.
    DoubleElimination,
    /// Everyone plays everyone once.
    RoundRobin,
    /// Fixed number of rounds paired by standings.
    Swiss,
}

impl Format {
    /// All formats.
    pub const ALL: [Self; 4] = [
        Self::SingleElimination,
        Self::DoubleElimination,
        Self::RoundRobin,
        Self::Swiss,
    ];

    /// Smallest roster this format accepts.
    #[must_use]
    pub const fn minimum_competitors(self) -> usize {
        match self {
            Self::SingleElimination | Self::DoubleElimination => 4,
            Self::RoundRobin => 3,
            Self::Swiss => 6,
        }
    }

    /// Returns true for the bracket (knockout) formats.
    #[must_use]
    pub const fn is_elimination(self) -> bool {
        matches!(self, Self::SingleElimination | Self::DoubleElimination)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SingleElimination => write!(f, "Single Elimination"),
            Self::DoubleElimination => write!(f, "Double Elimination"),
            Self::RoundRobin => write!(f, "Round Robin"),
            Self::Swiss => write!(f, "Swiss"),
        }
    }
}

/// Win condition for a single match.
///
/// A result is valid when exactly one side reaches
/// [`wins_required`](Self::wins_required) and the other stays strictly below it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchFormat {
    /// First to two game wins.
    #[default]
    #[serde(rename = "bo3")]
    BestOf3,
    /// First to three game wins.
    #[serde(rename = "bo5")]
    BestOf5,
    /// First to the given number of points.
    #[serde(rename = "first_to")]
    FirstTo(u32),
}

impl MatchFormat {
    /// Score the winning side must reach.
    #[must_use]
    pub const fn wins_required(self) -> u32 {
        match self {
            Self::BestOf3 => 2,
            Self::BestOf5 => 3,
            Self::FirstTo(points) => points,
        }
    }

    /// Returns the winning slot for a reported score, or `None` if the score
    /// does not satisfy the win condition.
    ///
    /// ```
    /// use bracket_core::bracket::SlotIndex;
    /// use bracket_core::config::MatchFormat;
    ///
    /// assert_eq!(MatchFormat::BestOf3.decide(2, 1), Some(SlotIndex::First));
    /// assert_eq!(MatchFormat::BestOf3.decide(0, 2), Some(SlotIndex::Second));
    /// assert_eq!(MatchFormat::BestOf3.decide(2, 2), None);
    /// assert_eq!(MatchFormat::BestOf3.decide(3, 0), None);
    /// ```
    #[must_use]
    pub const fn decide(self, first: u32, second: u32) -> Option<SlotIndex> {
        let target = self.wins_required();
        if target == 0 {
            return None;
        }
        if first == target && second < target {
            Some(SlotIndex::First)
        } else if second == target && first < target {
            Some(SlotIndex::Second)
        } else {
            None
        }
    }
}

impl fmt::Display for MatchFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BestOf3 => write!(f, "best-of-3"),
            Self::BestOf5 => write!(f, "best-of-5"),
            Self::FirstTo(points) => write!(f, "first-to-{points}"),
        }
    }
}

/// Swiss-specific options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwissConfig {
    /// Fixed round count; `None` means `ceil(log2(n))`.
    pub rounds: Option<u32>,
    /// Cap on candidate checks before the pairing search gives up and
    /// falls back to repeat pairings.
    pub pairing_search_limit: usize,
}

impl Default for SwissConfig {
    fn default() -> Self {
        Self {
            rounds: None,
            pairing_search_limit: DEFAULT_PAIRING_SEARCH_LIMIT,
        }
    }
}

/// Configuration for a tournament.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    /// Display name
    pub name: String,
    /// Bracket format
    pub format: Format,
    /// Per-match win condition
    pub match_format: MatchFormat,
    /// How the roster is ordered into slots
    pub seeding: SeedingStrategy,
    /// Swiss options (ignored by other formats)
    pub swiss: SwissConfig,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            name: "Tournament".to_string(),
            format: Format::default(),
            match_format: MatchFormat::default(),
            seeding: SeedingStrategy::default(),
            swiss: SwissConfig::default(),
        }
    }
}

impl TournamentConfig {
    /// Create a config with the given name and format, defaults elsewhere.
    #[must_use]
    pub fn new(name: impl Into<String>, format: Format) -> Self {
        Self {
            name: name.into(),
            format,
            ..Default::default()
        }
    }

    /// Set the match format.
    #[must_use]
    pub fn with_match_format(mut self, match_format: MatchFormat) -> Self {
        self.match_format = match_format;
        self
    }

    /// Set the seeding strategy.
    #[must_use]
    pub fn with_seeding(mut self, seeding: SeedingStrategy) -> Self {
        self.seeding = seeding;
        self
    }

    /// Fix the Swiss round count.
    #[must_use]
    pub fn with_swiss_rounds(mut self, rounds: u32) -> Self {
        self.swiss.rounds = Some(rounds);
        self
    }

    /// Check the config for values the engine cannot run with.
    ///
    /// # Errors
    ///
    /// - [`BracketError::InvalidName`] for a bad tournament name
    /// - [`BracketError::InvalidConfig`] for a zero win threshold, zero
    ///   Swiss rounds or a zero pairing search limit
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name, MIN_TOURNAMENT_NAME_LEN, MAX_TOURNAMENT_NAME_LEN)?;
        if self.match_format.wins_required() == 0 {
            return Err(BracketError::InvalidConfig(
                "first_to needs at least one point".to_string(),
            ));
        }
        if self.swiss.rounds == Some(0) {
            return Err(BracketError::InvalidConfig(
                "swiss rounds must be at least 1".to_string(),
            ));
        }
        if self.swiss.pairing_search_limit == 0 {
            return Err(BracketError::InvalidConfig(
                "pairing_search_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON config. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`BracketError::InvalidConfig`] on malformed JSON, or any
    /// error from [`validate`](Self::validate).
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| BracketError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimums_per_format() {
        assert_eq!(Format::SingleElimination.minimum_competitors(), 4);
        assert_eq!(Format::DoubleElimination.minimum_competitors(), 4);
        assert_eq!(Format::RoundRobin.minimum_competitors(), 3);
        assert_eq!(Format::Swiss.minimum_competitors(), 6);
    }

    #[test]
    fn best_of_five_thresholds() {
        let bo5 = MatchFormat::BestOf5;
        assert_eq!(bo5.decide(3, 2), Some(SlotIndex::First));
        assert_eq!(bo5.decide(1, 3), Some(SlotIndex::Second));
        assert_eq!(bo5.decide(2, 1), None);
        assert_eq!(bo5.decide(3, 3), None);
        assert_eq!(bo5.decide(4, 0), None);
    }

    #[test]
    fn first_to_uses_configured_points() {
        let fmt = MatchFormat::FirstTo(11);
        assert_eq!(fmt.decide(11, 9), Some(SlotIndex::First));
        assert_eq!(fmt.decide(10, 9), None);
        assert_eq!(MatchFormat::FirstTo(0).decide(0, 0), None);
    }

    #[test]
    fn json_defaults_fill_missing_fields() {
        let config = TournamentConfig::from_json(r#"{ "name": "Weekend Open" }"#).unwrap();
        assert_eq!(config.format, Format::SingleElimination);
        assert_eq!(config.match_format, MatchFormat::BestOf3);
        assert_eq!(config.seeding, SeedingStrategy::AsGiven);
        assert_eq!(config.swiss, SwissConfig::default());
    }

    #[test]
    fn json_reads_tagged_values() {
        let config = TournamentConfig::from_json(
            r#"{
                "name": "Swiss Night",
                "format": "swiss",
                "match_format": { "first_to": 7 },
                "seeding": { "kind": "random", "seed": 42 },
                "swiss": { "rounds": 5 }
            }"#,
        )
        .unwrap();
        assert_eq!(config.format, Format::Swiss);
        assert_eq!(config.match_format, MatchFormat::FirstTo(7));
        assert_eq!(config.seeding, SeedingStrategy::Random { seed: 42 });
        assert_eq!(config.swiss.rounds, Some(5));
        assert_eq!(config.swiss.pairing_search_limit, DEFAULT_PAIRING_SEARCH_LIMIT);
    }

    #[test]
    fn validation_rejects_unusable_values() {
        assert!(matches!(
            TournamentConfig::new("ab", Format::Swiss).validate(),
            Err(BracketError::InvalidName { .. })
        ));
        assert!(matches!(
            TournamentConfig::new("Cup", Format::RoundRobin)
                .with_match_format(MatchFormat::FirstTo(0))
                .validate(),
            Err(BracketError::InvalidConfig(_))
        ));
        assert!(matches!(
            TournamentConfig::new("Cup", Format::Swiss)
                .with_swiss_rounds(0)
                .validate(),
            Err(BracketError::InvalidConfig(_))
        ));
        assert!(matches!(
            TournamentConfig::from_json("{ not json"),
            Err(BracketError::InvalidConfig(_))
        ));
    }
}
