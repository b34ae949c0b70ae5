//! Arena of matches plus the per-format layout over them.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{BracketSide, Match, MatchId, MatchStatus, Resolution, Slot, SlotIndex, SlotRef};
use crate::builder::swiss::SwissState;
use crate::competitor::CompetitorId;
use crate::config::Format;

/// Double elimination round structure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DoubleLayout {
    /// Winners bracket rounds, first to final.
    pub winners: Vec<Vec<MatchId>>,
    /// Losers bracket rounds (minor and major interleaved).
    pub losers: Vec<Vec<MatchId>>,
    /// Winners champion vs losers champion.
    pub grand_final: MatchId,
    /// Spawned when the losers champion wins the grand final.
    pub reset: Option<MatchId>,
}

/// How the matches of a graph are organized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Layout {
    /// Tournament still in setup.
    #[default]
    Unbuilt,
    /// Rounds of a knockout tree, first to final.
    SingleElimination {
        /// Match ids per round
        rounds: Vec<Vec<MatchId>>,
    },
    /// Winners and losers brackets plus grand final.
    DoubleElimination(DoubleLayout),
    /// Every pairing once, in creation order.
    RoundRobin {
        /// Match ids
        matches: Vec<MatchId>,
    },
    /// Swiss rounds and standings.
    Swiss(SwissState),
}

impl Layout {
    /// The format this layout was built for, `None` before activation.
    #[must_use]
    pub const fn format(&self) -> Option<Format> {
        match self {
            Self::Unbuilt => None,
            Self::SingleElimination { .. } => Some(Format::SingleElimination),
            Self::DoubleElimination(_) => Some(Format::DoubleElimination),
            Self::RoundRobin { .. } => Some(Format::RoundRobin),
            Self::Swiss(_) => Some(Format::Swiss),
        }
    }
}

/// Everything a single propagation pass touched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Propagation {
    /// Slots written, in order.
    pub placed: Vec<SlotRef>,
    /// Matches that became active.
    pub activated: Vec<MatchId>,
    /// Matches completed by a bye.
    pub walkovers: Vec<MatchId>,
}

/// All matches of one tournament, addressed by [`MatchId`].
///
/// Ids equal their index in the arena, so lookups are O(1) and iteration
/// order is creation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketGraph {
    matches: Vec<Match>,
    layout: Layout,
    seeding: Vec<CompetitorId>,
}

impl BracketGraph {
    /// Creates an empty graph for competitors in `seeding` order.
    #[must_use]
    pub fn new(seeding: Vec<CompetitorId>) -> Self {
        Self {
            matches: Vec::new(),
            layout: Layout::Unbuilt,
            seeding,
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Looks up a match.
    #[must_use]
    pub fn get(&self, id: MatchId) -> Option<&Match> {
        let index = usize::try_from(id.as_u64()).ok()?;
        self.matches.get(index)
    }

    pub(crate) fn get_mut(&mut self, id: MatchId) -> Option<&mut Match> {
        let index = usize::try_from(id.as_u64()).ok()?;
        self.matches.get_mut(index)
    }

    /// All matches in creation order.
    #[must_use]
    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    /// Number of matches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Returns true before the bracket is built.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Round structure.
    #[must_use]
    pub const fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Competitors in seed order.
    #[must_use]
    pub fn seeding(&self) -> &[CompetitorId] {
        &self.seeding
    }

    /// 1-based seed of `competitor`.
    #[must_use]
    pub fn seed_of(&self, competitor: CompetitorId) -> Option<usize> {
        self.seeding
            .iter()
            .position(|&c| c == competitor)
            .map(|i| i + 1)
    }

    /// Matches of one round on one side, ordered by position.
    #[must_use]
    pub fn round(&self, side: BracketSide, round: u32) -> Vec<&Match> {
        let mut found: Vec<&Match> = self
            .matches
            .iter()
            .filter(|m| m.side == side && m.round == round)
            .collect();
        found.sort_by_key(|m| m.position);
        found
    }

    /// Matches currently accepting a result.
    pub fn active(&self) -> impl Iterator<Item = &Match> + '_ {
        self.matches
            .iter()
            .filter(|m| m.status == MatchStatus::Active)
    }

    /// Double elimination layout, if this is a double elimination bracket.
    #[must_use]
    pub const fn double(&self) -> Option<&DoubleLayout> {
        match &self.layout {
            Layout::DoubleElimination(layout) => Some(layout),
            _ => None,
        }
    }

    /// Swiss state, if this is a Swiss bracket.
    #[must_use]
    pub const fn swiss(&self) -> Option<&SwissState> {
        match &self.layout {
            Layout::Swiss(state) => Some(state),
            _ => None,
        }
    }

    pub(crate) fn swiss_mut(&mut self) -> Option<&mut SwissState> {
        match &mut self.layout {
            Layout::Swiss(state) => Some(state),
            _ => None,
        }
    }

    /// The match whose winner takes the tournament: the final, or the grand
    /// final reset when one was played.
    #[must_use]
    pub fn deciding_match(&self) -> Option<&Match> {
        match &self.layout {
            Layout::SingleElimination { rounds } => {
                rounds.last().and_then(|r| r.first()).and_then(|&id| self.get(id))
            }
            Layout::DoubleElimination(layout) => {
                self.get(layout.reset.unwrap_or(layout.grand_final))
            }
            Layout::Unbuilt | Layout::RoundRobin { .. } | Layout::Swiss(_) => None,
        }
    }

    /// Returns true when no further results can be reported.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        match &self.layout {
            Layout::Unbuilt => false,
            Layout::SingleElimination { .. } | Layout::DoubleElimination(_) => {
                self.deciding_match().is_some_and(Match::is_completed)
            }
            Layout::RoundRobin { .. } => self.matches.iter().all(Match::is_completed),
            Layout::Swiss(state) => {
                state.rounds_paired() == state.total_rounds()
                    && self.matches.iter().all(Match::is_completed)
            }
        }
    }

    // =========================================================================
    // Construction
    // =========================================================================

    pub(crate) fn set_layout(&mut self, layout: Layout) {
        self.layout = layout;
    }

    /// Runs `f` with the Swiss state detached from the graph, so it can
    /// spawn matches while updating the state.
    pub(crate) fn with_swiss<T>(
        &mut self,
        f: impl FnOnce(&mut Self, &mut SwissState) -> T,
    ) -> Option<T> {
        match std::mem::take(&mut self.layout) {
            Layout::Swiss(mut state) => {
                let out = f(self, &mut state);
                self.layout = Layout::Swiss(state);
                Some(out)
            }
            other => {
                self.layout = other;
                None
            }
        }
    }

    pub(crate) fn spawn(
        &mut self,
        side: BracketSide,
        round: u32,
        position: u32,
        slots: [Slot; 2],
    ) -> MatchId {
        let id = MatchId::new(self.matches.len() as u64);
        self.matches
            .push(Match::new(id, side, round, position, slots));
        id
    }

    /// Routes the winner of `from` into `to`.
    pub(crate) fn link_winner(&mut self, from: MatchId, to: SlotRef) {
        if let Some(m) = self.get_mut(from) {
            m.winner_to = Some(to);
        }
        if let Some(m) = self.get_mut(to.match_id) {
            m.sources[to.slot.index()] = Some(from);
        }
    }

    /// Routes the loser of `from` into `to`.
    pub(crate) fn link_loser(&mut self, from: MatchId, to: SlotRef) {
        if let Some(m) = self.get_mut(from) {
            m.loser_to = Some(to);
        }
        if let Some(m) = self.get_mut(to.match_id) {
            m.sources[to.slot.index()] = Some(from);
        }
    }

    // =========================================================================
    // Propagation
    // =========================================================================

    /// Re-evaluates `ids` and everything their walkovers feed into.
    pub(crate) fn settle(&mut self, ids: impl IntoIterator<Item = MatchId>, prop: &mut Propagation) {
        let mut queue: VecDeque<MatchId> = ids.into_iter().collect();
        while let Some(id) = queue.pop_front() {
            let Some(m) = self.get_mut(id) else {
                continue;
            };
            match m.resolve() {
                Resolution::Waiting => {}
                Resolution::Activated => {
                    debug!(match_id = %id, "match active");
                    prop.activated.push(id);
                }
                Resolution::Walkover {
                    advance,
                    eliminated,
                } => {
                    debug!(match_id = %id, "match resolved by bye");
                    prop.walkovers.push(id);
                    let (winner_to, loser_to) = (m.winner_to, m.loser_to);
                    self.forward(winner_to, loser_to, advance, eliminated, prop, &mut queue);
                }
            }
        }
    }

    /// Sends the outcome of a just-completed match downstream and settles
    /// whatever it reached.
    pub(crate) fn advance(&mut self, from: MatchId, winner: SlotIndex, prop: &mut Propagation) {
        let Some(m) = self.get(from) else {
            return;
        };
        let (winner_to, loser_to) = (m.winner_to, m.loser_to);
        let (advance, eliminated) = (m.slot(winner), m.slot(winner.other()));
        let mut queue = VecDeque::new();
        self.forward(winner_to, loser_to, advance, eliminated, prop, &mut queue);
        self.settle(queue, prop);
    }

    fn forward(
        &mut self,
        winner_to: Option<SlotRef>,
        loser_to: Option<SlotRef>,
        advance: Slot,
        eliminated: Slot,
        prop: &mut Propagation,
        queue: &mut VecDeque<MatchId>,
    ) {
        for (target, slot) in [(winner_to, advance), (loser_to, eliminated)] {
            let Some(target) = target else {
                continue;
            };
            if let Some(m) = self.get_mut(target.match_id) {
                m.slots[target.slot.index()] = slot;
                prop.placed.push(target);
                queue.push_back(target.match_id);
            }
        }
    }

    /// Spawns the grand final reset with the same slot order and activates it.
    pub(crate) fn spawn_reset(&mut self, prop: &mut Propagation) -> Option<MatchId> {
        let grand_final = self.double()?.grand_final;
        let slots = self.get(grand_final)?.slots;
        let reset = self.spawn(BracketSide::GrandFinal, 2, 1, slots);
        if let Some(m) = self.get_mut(reset) {
            m.sources = [Some(grand_final), Some(grand_final)];
        }
        if let Layout::DoubleElimination(layout) = &mut self.layout {
            layout.reset = Some(reset);
        }
        self.settle([reset], prop);
        Some(reset)
    }
}
