//! Bracket construction, one strategy per format.
//!
//! [`BracketBuilder`] is a closed set of strategies chosen from the
//! tournament [`Format`] once, at activation. Each strategy consumes
//! [`SeededSlots`] and returns a fully linked [`BracketGraph`] whose first
//! round is already settled: byes are resolved and playable matches are
//! active.
//!
//! # Example
//!
//! ```
//! use bracket_core::builder::BracketBuilder;
//! use bracket_core::competitor::Roster;
//! use bracket_core::config::{Format, SwissConfig};
//! use bracket_core::seeding::SeedingEngine;
//!
//! let roster = Roster::from_names(&["Ana", "Bo", "Cy", "Di"]).unwrap();
//! let seeded = SeedingEngine::default()
//!     .seed(&roster, Format::RoundRobin)
//!     .unwrap();
//!
//! let graph = BracketBuilder::from(Format::RoundRobin).build(&seeded, &SwissConfig::default());
//! assert_eq!(graph.len(), 6);
//! ```

pub mod double;
pub mod round_robin;
pub mod single;
pub mod swiss;

use tracing::debug;

use crate::bracket::BracketGraph;
use crate::config::{Format, SwissConfig};
use crate::seeding::SeededSlots;

/// Construction strategy for one format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketBuilder {
    /// Knockout tree
    SingleElimination,
    /// Winners tree, losers bracket and grand final
    DoubleElimination,
    /// All pairings
    RoundRobin,
    /// Standings-paired rounds
    Swiss,
}

impl From<Format> for BracketBuilder {
    fn from(format: Format) -> Self {
        match format {
            Format::SingleElimination => Self::SingleElimination,
            Format::DoubleElimination => Self::DoubleElimination,
            Format::RoundRobin => Self::RoundRobin,
            Format::Swiss => Self::Swiss,
        }
    }
}

impl BracketBuilder {
    /// Builds the initial match graph.
    ///
    /// `swiss` is only read by the Swiss strategy.
    #[must_use]
    pub fn build(self, seeded: &SeededSlots, swiss: &SwissConfig) -> BracketGraph {
        let graph = match self {
            Self::SingleElimination => single::build(seeded),
            Self::DoubleElimination => double::build(seeded),
            Self::RoundRobin => round_robin::build(seeded),
            Self::Swiss => swiss::build(seeded, swiss),
        };
        debug!(
            builder = ?self,
            matches = graph.len(),
            active = graph.active().count(),
            "bracket built"
        );
        graph
    }
}
