//! Lifecycle notifications.
//!
//! The lifecycle controller calls a [`LifecycleObserver`] at exactly two
//! points: after a tournament becomes active and after it completes. Calls
//! are fire-and-forget; the engine never reads anything back.
//!
//! - [`NoopObserver`]: Ignores everything (the default)
//! - [`EventLog`]: Records events in order, for tests and audit trails

use serde::{Deserialize, Serialize};

use crate::tournament::{Tournament, TournamentId};

/// Receives lifecycle notifications.
///
/// Both hooks default to doing nothing.
///
/// # Example
///
/// ```
/// use bracket_core::observer::LifecycleObserver;
/// use bracket_core::tournament::Tournament;
///
/// #[derive(Default)]
/// struct Announcer {
///     lines: Vec<String>,
/// }
///
/// impl LifecycleObserver for Announcer {
///     fn tournament_completed(&mut self, tournament: &Tournament) {
///         self.lines.push(format!("{} is over", tournament.config().name));
///     }
/// }
/// ```
pub trait LifecycleObserver {
    /// Called once the bracket is built and the tournament is active.
    fn tournament_activated(&mut self, _tournament: &Tournament) {}

    /// Called once, when the tournament transitions to completed.
    fn tournament_completed(&mut self, _tournament: &Tournament) {}
}

/// Observer that ignores all notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl LifecycleObserver for NoopObserver {}

/// A recorded lifecycle notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LifecycleEvent {
    /// Tournament became active
    Activated(TournamentId),
    /// Tournament completed
    Completed(TournamentId),
}

/// Observer that records every notification in order.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<LifecycleEvent>,
}

impl EventLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded events, oldest first.
    #[must_use]
    pub fn events(&self) -> &[LifecycleEvent] {
        &self.events
    }

    /// Drains and returns all recorded events.
    pub fn take_events(&mut self) -> Vec<LifecycleEvent> {
        std::mem::take(&mut self.events)
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl LifecycleObserver for EventLog {
    fn tournament_activated(&mut self, tournament: &Tournament) {
        self.events.push(LifecycleEvent::Activated(tournament.id()));
    }

    fn tournament_completed(&mut self, tournament: &Tournament) {
        self.events.push(LifecycleEvent::Completed(tournament.id()));
    }
}
