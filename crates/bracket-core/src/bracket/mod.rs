//! Match records and the bracket graph they live in.
//!
//! A [`Match`] holds two [`Slot`]s, their scores and a [`MatchStatus`].
//! Elimination matches also carry links: where the winner goes
//! (`winner_to`), where the loser goes in double elimination (`loser_to`)
//! and which matches feed each slot (`sources`). Links are [`MatchId`]s into
//! the owning [`BracketGraph`] arena, never references.
//!
//! # Match lifecycle
//!
//! ```text
//! pending ──(both slots hold competitors)──▶ active ──(valid result)──▶ completed
//!    │
//!    └──(a slot holds a bye)──▶ completed (walkover, no score)
//! ```

mod graph;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::competitor::CompetitorId;

pub use graph::{BracketGraph, DoubleLayout, Layout, Propagation};

/// Stable identifier of a match inside one [`BracketGraph`].
///
/// Ids are assigned in creation order starting at 0 and never reused.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MatchId(u64);

impl MatchId {
    /// Creates a new `MatchId` from a raw `u64` value.
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

impl fmt::Debug for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MatchId({})", self.0)
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for MatchId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

/// One of the two sides of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotIndex {
    /// Slot 1
    First,
    /// Slot 2
    Second,
}

impl SlotIndex {
    /// Array index of this slot (0 or 1).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }

    /// The opposite slot.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }
}

/// Contents of a match slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    /// Waiting for an upstream match.
    #[default]
    Empty,
    /// A competitor is assigned.
    Competitor(CompetitorId),
    /// No opponent will ever arrive.
    Bye,
}

impl Slot {
    /// Returns the competitor, if one is assigned.
    #[must_use]
    pub const fn competitor(self) -> Option<CompetitorId> {
        match self {
            Self::Competitor(id) => Some(id),
            Self::Empty | Self::Bye => None,
        }
    }

    /// Returns true once the slot is no longer waiting.
    #[must_use]
    pub const fn is_resolved(self) -> bool {
        !matches!(self, Self::Empty)
    }
}

/// Match state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// At least one slot is still empty.
    Pending,
    /// Both competitors known; accepting a result.
    Active,
    /// Result recorded (or resolved by bye). Terminal.
    Completed,
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Active => write!(f, "active"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

/// Which part of the bracket a match belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketSide {
    /// Single elimination, or the winners bracket of double elimination
    Winners,
    /// Double elimination losers bracket
    Losers,
    /// Grand final (round 1) and its reset (round 2)
    GrandFinal,
    /// Round robin pool
    RoundRobin,
    /// Swiss round
    Swiss,
}

/// A specific slot of a specific match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotRef {
    /// Target match
    pub match_id: MatchId,
    /// Target slot
    pub slot: SlotIndex,
}

impl SlotRef {
    /// Creates a reference to `slot` of `match_id`.
    #[must_use]
    pub const fn new(match_id: MatchId, slot: SlotIndex) -> Self {
        Self { match_id, slot }
    }
}

/// A single match in the bracket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Match {
    pub(crate) id: MatchId,
    pub(crate) side: BracketSide,
    pub(crate) round: u32,
    pub(crate) position: u32,
    pub(crate) slots: [Slot; 2],
    pub(crate) scores: [u32; 2],
    pub(crate) status: MatchStatus,
    pub(crate) winner: Option<CompetitorId>,
    pub(crate) sources: [Option<MatchId>; 2],
    pub(crate) winner_to: Option<SlotRef>,
    pub(crate) loser_to: Option<SlotRef>,
}

/// What happened when a pending match was checked after a slot changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Resolution {
    /// Still waiting on a slot (or not pending).
    Waiting,
    /// Both competitors present; now active.
    Activated,
    /// Completed without play. `advance` moves on, `eliminated` drops to the
    /// loser target.
    Walkover { advance: Slot, eliminated: Slot },
}

impl Match {
    pub(crate) fn new(
        id: MatchId,
        side: BracketSide,
        round: u32,
        position: u32,
        slots: [Slot; 2],
    ) -> Self {
        Self {
            id,
            side,
            round,
            position,
            slots,
            scores: [0, 0],
            status: MatchStatus::Pending,
            winner: None,
            sources: [None, None],
            winner_to: None,
            loser_to: None,
        }
    }

    /// Match id.
    #[must_use]
    pub const fn id(&self) -> MatchId {
        self.id
    }

    /// Bracket side.
    #[must_use]
    pub const fn side(&self) -> BracketSide {
        self.side
    }

    /// Round number, 1-based within its side.
    #[must_use]
    pub const fn round(&self) -> u32 {
        self.round
    }

    /// Position within the round, 1-based.
    #[must_use]
    pub const fn position(&self) -> u32 {
        self.position
    }

    /// Both slots.
    #[must_use]
    pub const fn slots(&self) -> [Slot; 2] {
        self.slots
    }

    /// One slot.
    #[must_use]
    pub const fn slot(&self, index: SlotIndex) -> Slot {
        self.slots[index.index()]
    }

    /// Reported scores; `[0, 0]` until completed by a result.
    #[must_use]
    pub const fn scores(&self) -> [u32; 2] {
        self.scores
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> MatchStatus {
        self.status
    }

    /// Winner, once completed with a real competitor advancing.
    #[must_use]
    pub const fn winner(&self) -> Option<CompetitorId> {
        self.winner
    }

    /// The competitor that lost, if the match was played or a walkover
    /// against a real competitor occurred.
    #[must_use]
    pub fn loser(&self) -> Option<CompetitorId> {
        let winner = self.winner?;
        self.slots
            .iter()
            .filter_map(|s| s.competitor())
            .find(|&c| c != winner)
    }

    /// Upstream matches feeding each slot.
    #[must_use]
    pub const fn sources(&self) -> [Option<MatchId>; 2] {
        self.sources
    }

    /// Where the winner advances.
    #[must_use]
    pub const fn winner_to(&self) -> Option<SlotRef> {
        self.winner_to
    }

    /// Where the loser drops (double elimination only).
    #[must_use]
    pub const fn loser_to(&self) -> Option<SlotRef> {
        self.loser_to
    }

    /// Returns true once the match has a final outcome.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == MatchStatus::Completed
    }

    /// Returns true if the match was completed by a bye rather than played.
    #[must_use]
    pub fn is_walkover(&self) -> bool {
        self.is_completed() && self.slots.contains(&Slot::Bye)
    }

    /// Returns true if `competitor` occupies either slot.
    #[must_use]
    pub fn involves(&self, competitor: CompetitorId) -> bool {
        self.slots.contains(&Slot::Competitor(competitor))
    }

    /// Re-evaluates a pending match after one of its slots changed.
    pub(crate) fn resolve(&mut self) -> Resolution {
        if self.status != MatchStatus::Pending {
            return Resolution::Waiting;
        }
        match self.slots {
            [Slot::Empty, _] | [_, Slot::Empty] => Resolution::Waiting,
            [Slot::Competitor(_), Slot::Competitor(_)] => {
                self.status = MatchStatus::Active;
                Resolution::Activated
            }
            [Slot::Competitor(id), Slot::Bye] | [Slot::Bye, Slot::Competitor(id)] => {
                self.status = MatchStatus::Completed;
                self.winner = Some(id);
                Resolution::Walkover {
                    advance: Slot::Competitor(id),
                    eliminated: Slot::Bye,
                }
            }
            [Slot::Bye, Slot::Bye] => {
                self.status = MatchStatus::Completed;
                Resolution::Walkover {
                    advance: Slot::Bye,
                    eliminated: Slot::Bye,
                }
            }
        }
    }

    /// Records a played result. Caller has validated the score.
    pub(crate) fn complete(&mut self, winner: SlotIndex, scores: [u32; 2]) {
        self.scores = scores;
        self.status = MatchStatus::Completed;
        self.winner = self.slot(winner).competitor();
    }
}
