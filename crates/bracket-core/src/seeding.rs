//! Seeding and bracket sizing.
//!
//! The [`SeedingEngine`] turns a [`Roster`] into the ordered slot sequence a
//! builder consumes. Competitor order is either kept as given or shuffled
//! with a seeded `ChaCha8Rng`; bye placement never depends on the shuffle.
//!
//! # Example
//!
//! ```
//! use bracket_core::bracket::Slot;
//! use bracket_core::competitor::Roster;
//! use bracket_core::config::Format;
//! use bracket_core::seeding::{SeedingEngine, SeedingStrategy};
//!
//! let roster = Roster::from_names(&["Ana", "Bo", "Cy", "Di", "Ed"]).unwrap();
//! let seeded = SeedingEngine::new(SeedingStrategy::AsGiven)
//!     .seed(&roster, Format::SingleElimination)
//!     .unwrap();
//!
//! assert_eq!(seeded.sizing.total_slots, 8);
//! assert_eq!(seeded.sizing.byes, 3);
//! assert_eq!(seeded.slots[7], Slot::Bye);
//! ```

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bracket::Slot;
use crate::competitor::{CompetitorId, Roster};
use crate::config::Format;
use crate::error::{BracketError, Result};

/// How competitors are ordered before slot assignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SeedingStrategy {
    /// Keep roster order.
    #[default]
    AsGiven,
    /// Shuffle with a `ChaCha8Rng` seeded from `seed`.
    Random {
        /// RNG seed; the same seed always yields the same order.
        seed: u64,
    },
}

/// Slot counts for a roster under a given format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BracketSizing {
    /// Number of real competitors.
    pub competitors: usize,
    /// Slots in the first round (power of two for elimination formats).
    pub total_slots: usize,
    /// Slots filled with byes.
    pub byes: usize,
}

impl BracketSizing {
    /// Computes sizing for `competitors` entrants under `format`.
    #[must_use]
    pub fn for_format(competitors: usize, format: Format) -> Self {
        let total_slots = if format.is_elimination() {
            competitors.next_power_of_two()
        } else {
            competitors
        };
        Self {
            competitors,
            total_slots,
            byes: total_slots - competitors,
        }
    }

    /// Rounds in a single-elimination tree over these slots.
    #[must_use]
    pub const fn winners_rounds(&self) -> u32 {
        self.total_slots.trailing_zeros()
    }

    /// Round indices on the losers side of a double-elimination bracket,
    /// counting the grand final as the last one.
    #[must_use]
    pub const fn losers_rounds(&self) -> u32 {
        let k = self.winners_rounds();
        if k == 0 {
            0
        } else {
            2 * k - 1
        }
    }

    /// Default Swiss round count, `ceil(log2(n))`.
    #[must_use]
    pub const fn swiss_rounds(&self) -> u32 {
        self.competitors.next_power_of_two().trailing_zeros()
    }

    /// Matches in the first elimination round.
    #[must_use]
    pub const fn first_round_matches(&self) -> usize {
        self.total_slots / 2
    }
}

/// Output of seeding: sizing, seed order and the first-round slot layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededSlots {
    /// Slot counts
    pub sizing: BracketSizing,
    /// Competitors in seed order (seed 1 first)
    pub order: Vec<CompetitorId>,
    /// `total_slots` entries; consecutive pairs form round-one matches
    pub slots: Vec<Slot>,
}

/// Orders a roster into bracket slots.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeedingEngine {
    strategy: SeedingStrategy,
}

impl SeedingEngine {
    /// Creates an engine using `strategy`.
    #[must_use]
    pub const fn new(strategy: SeedingStrategy) -> Self {
        Self { strategy }
    }

    /// Seeds `roster` for `format` using the configured strategy.
    ///
    /// # Errors
    ///
    /// Returns [`BracketError::InsufficientCompetitors`] when the roster is
    /// smaller than [`Format::minimum_competitors`].
    pub fn seed(&self, roster: &Roster, format: Format) -> Result<SeededSlots> {
        match self.strategy {
            SeedingStrategy::AsGiven => {
                check_minimum(roster, format)?;
                Ok(layout(roster.ids().collect(), format))
            }
            SeedingStrategy::Random { seed } => {
                self.seed_with_rng(roster, format, &mut ChaCha8Rng::seed_from_u64(seed))
            }
        }
    }

    /// Seeds `roster` with an injected randomness source, always shuffling.
    ///
    /// # Errors
    ///
    /// Same as [`seed`](Self::seed).
    pub fn seed_with_rng<R: Rng + ?Sized>(
        &self,
        roster: &Roster,
        format: Format,
        rng: &mut R,
    ) -> Result<SeededSlots> {
        check_minimum(roster, format)?;
        let mut order: Vec<CompetitorId> = roster.ids().collect();
        order.shuffle(rng);
        Ok(layout(order, format))
    }
}

fn check_minimum(roster: &Roster, format: Format) -> Result<()> {
    let minimum = format.minimum_competitors();
    if roster.len() < minimum {
        return Err(BracketError::InsufficientCompetitors {
            minimum,
            actual: roster.len(),
        });
    }
    Ok(())
}

/// Lays out slots: full pairs first, then one `[competitor, Bye]` pair per bye.
fn layout(order: Vec<CompetitorId>, format: Format) -> SeededSlots {
    let sizing = BracketSizing::for_format(order.len(), format);
    let full = 2 * (sizing.first_round_matches() - sizing.byes);

    let mut slots: Vec<Slot> = order[..full]
        .iter()
        .copied()
        .map(Slot::Competitor)
        .collect();
    if format.is_elimination() {
        for id in &order[full..] {
            slots.push(Slot::Competitor(*id));
            slots.push(Slot::Bye);
        }
    } else {
        slots.extend(order[full..].iter().copied().map(Slot::Competitor));
    }

    debug!(
        competitors = sizing.competitors,
        total_slots = sizing.total_slots,
        byes = sizing.byes,
        "seeded roster"
    );

    SeededSlots {
        sizing,
        order,
        slots,
    }
}
