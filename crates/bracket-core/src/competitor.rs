//! Competitors and the roster they are drawn from.
//!
//! - [`CompetitorId`]: Opaque identifier referenced by match slots
//! - [`Competitor`]: A player or team with a display name
//! - [`Roster`]: The validated, immutable list a tournament is built from
//!
//! Matches never own competitors. They hold [`CompetitorId`]s that resolve
//! against the tournament's [`Roster`].
//!
//! # Example
//!
//! ```
//! use bracket_core::competitor::Roster;
//!
//! let roster = Roster::from_names(&["Ana", "Bo", "Cy", "Di"]).unwrap();
//! assert_eq!(roster.len(), 4);
//! assert_eq!(roster.competitors()[0].name(), "Ana");
//! ```

use std::collections::BTreeSet;
use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{BracketError, Result};

/// Shortest accepted player name, in characters, after trimming.
pub const MIN_NAME_LEN: usize = 2;

/// Longest accepted player name, in characters, after trimming.
pub const MAX_NAME_LEN: usize = 30;

/// Unique identifier for a competitor.
///
/// `CompetitorId` is a newtype wrapper around `u64`. Ids must be unique
/// within a roster; their numeric order carries no meaning for seeding.
///
/// # Example
///
/// ```
/// use bracket_core::competitor::CompetitorId;
///
/// let id = CompetitorId::new(7);
/// assert_eq!(id.as_u64(), 7);
/// assert_eq!(id.to_string(), "7");
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CompetitorId(u64);

impl CompetitorId {
    /// Creates a new `CompetitorId` from a raw `u64` value.
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

impl fmt::Debug for CompetitorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CompetitorId({})", self.0)
    }
}

impl fmt::Display for CompetitorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for CompetitorId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

impl From<CompetitorId> for u64 {
    fn from(id: CompetitorId) -> Self {
        id.0
    }
}

/// Trims `name` and checks its length against `min..=max` characters.
///
/// # Errors
///
/// Returns [`BracketError::InvalidName`] when the trimmed name is too short
/// or too long.
pub fn validate_name(name: &str, min: usize, max: usize) -> Result<String> {
    let trimmed = name.trim();
    let len = trimmed.chars().count();
    if len < min || len > max {
        return Err(BracketError::InvalidName {
            name: name.to_string(),
            reason: format!("must be {min} to {max} characters"),
        });
    }
    Ok(trimmed.to_string())
}

/// How players are grouped into competitors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamMode {
    /// Every player competes alone.
    #[default]
    Singles,
    /// Players are paired into two-member teams.
    Doubles,
}

/// A player or team taking part in a tournament.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Competitor {
    id: CompetitorId,
    name: String,
    members: Vec<String>,
}

impl Competitor {
    /// Creates a single-player competitor.
    ///
    /// # Errors
    ///
    /// Returns [`BracketError::InvalidName`] if the name is not
    /// [`MIN_NAME_LEN`]..=[`MAX_NAME_LEN`] characters after trimming.
    pub fn new(id: impl Into<CompetitorId>, name: &str) -> Result<Self> {
        let name = validate_name(name, MIN_NAME_LEN, MAX_NAME_LEN)?;
        Ok(Self {
            id: id.into(),
            members: vec![name.clone()],
            name,
        })
    }

    /// Creates a team competitor; its display name joins the members with `" & "`.
    ///
    /// # Errors
    ///
    /// Returns [`BracketError::InvalidName`] if any member name is invalid
    /// or the team has no members.
    pub fn team(id: impl Into<CompetitorId>, members: &[&str]) -> Result<Self> {
        if members.is_empty() {
            return Err(BracketError::InvalidName {
                name: String::new(),
                reason: "a team needs at least one member".to_string(),
            });
        }
        let members = members
            .iter()
            .map(|m| validate_name(m, MIN_NAME_LEN, MAX_NAME_LEN))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            id: id.into(),
            name: members.join(" & "),
            members,
        })
    }

    /// Returns the competitor's id.
    #[must_use]
    pub const fn id(&self) -> CompetitorId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the member names (one entry for a single player).
    #[must_use]
    pub fn members(&self) -> &[String] {
        &self.members
    }
}

/// The validated, ordered list of competitors for one tournament.
///
/// The order is the "as given" seed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    competitors: Vec<Competitor>,
}

impl Roster {
    /// Creates a roster, checking it is non-empty and ids are unique.
    ///
    /// # Errors
    ///
    /// - [`BracketError::InsufficientCompetitors`] for an empty list
    /// - [`BracketError::DuplicateCompetitor`] when an id repeats
    pub fn new(competitors: Vec<Competitor>) -> Result<Self> {
        if competitors.is_empty() {
            return Err(BracketError::InsufficientCompetitors {
                minimum: 1,
                actual: 0,
            });
        }
        let mut seen = BTreeSet::new();
        for competitor in &competitors {
            if !seen.insert(competitor.id) {
                return Err(BracketError::DuplicateCompetitor(competitor.id));
            }
        }
        Ok(Self { competitors })
    }

    /// Builds a singles roster from names, assigning ids `1..=n` in order.
    ///
    /// # Errors
    ///
    /// Fails like [`Competitor::new`] and [`Roster::new`].
    pub fn from_names(names: &[&str]) -> Result<Self> {
        let competitors = (1u64..)
            .zip(names)
            .map(|(id, name)| Competitor::new(id, name))
            .collect::<Result<Vec<_>>>()?;
        Self::new(competitors)
    }

    /// Shuffles players and groups them into teams.
    ///
    /// In [`TeamMode::Doubles`] consecutive shuffled players form a team; an
    /// odd player out becomes a one-member team. Ids are `1..=teams`.
    ///
    /// # Errors
    ///
    /// Fails like [`Competitor::team`] and [`Roster::new`].
    pub fn form_teams<R: Rng + ?Sized>(
        players: &[&str],
        mode: TeamMode,
        rng: &mut R,
    ) -> Result<Self> {
        let mut shuffled = players.to_vec();
        shuffled.shuffle(rng);
        let size = match mode {
            TeamMode::Singles => 1,
            TeamMode::Doubles => 2,
        };
        let competitors = (1u64..)
            .zip(shuffled.chunks(size))
            .map(|(id, members)| Competitor::team(id, members))
            .collect::<Result<Vec<_>>>()?;
        Self::new(competitors)
    }

    /// Returns the competitors in roster order.
    #[must_use]
    pub fn competitors(&self) -> &[Competitor] {
        &self.competitors
    }

    /// Returns the competitor ids in roster order.
    pub fn ids(&self) -> impl Iterator<Item = CompetitorId> + '_ {
        self.competitors.iter().map(Competitor::id)
    }

    /// Looks up a competitor by id.
    #[must_use]
    pub fn get(&self, id: CompetitorId) -> Option<&Competitor> {
        self.competitors.iter().find(|c| c.id == id)
    }

    /// Returns the display name for `id`, if it is on the roster.
    #[must_use]
    pub fn name_of(&self, id: CompetitorId) -> Option<&str> {
        self.get(id).map(Competitor::name)
    }

    /// Returns the number of competitors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.competitors.len()
    }

    /// Always false: a roster holds at least one competitor.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.competitors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn name_is_trimmed_and_bounded() {
        assert_eq!(validate_name("  Ana ", 2, 30).unwrap(), "Ana");
        assert!(validate_name("A", 2, 30).is_err());
        assert!(validate_name(&"x".repeat(31), 2, 30).is_err());
        assert!(validate_name("   ", 2, 30).is_err());
    }

    #[test]
    fn roster_rejects_duplicates() {
        let a = Competitor::new(1, "Ana").unwrap();
        let b = Competitor::new(1, "Bo").unwrap();
        assert_eq!(
            Roster::new(vec![a, b]),
            Err(BracketError::DuplicateCompetitor(CompetitorId::new(1)))
        );
    }

    #[test]
    fn roster_rejects_empty() {
        assert!(matches!(
            Roster::new(Vec::new()),
            Err(BracketError::InsufficientCompetitors { actual: 0, .. })
        ));
    }

    #[test]
    fn from_names_assigns_sequential_ids() {
        let roster = Roster::from_names(&["Ana", "Bo", "Cy"]).unwrap();
        let ids: Vec<u64> = roster.ids().map(u64::from).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(roster.name_of(CompetitorId::new(2)), Some("Bo"));
        assert_eq!(roster.name_of(CompetitorId::new(9)), None);
    }

    #[test]
    fn doubles_pairs_players_and_keeps_odd_one_out() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let players = ["Ana", "Bo", "Cy", "Di", "Ed"];
        let roster = Roster::form_teams(&players, TeamMode::Doubles, &mut rng).unwrap();

        assert_eq!(roster.len(), 3);
        let sizes: Vec<usize> = roster.competitors().iter().map(|c| c.members().len()).collect();
        assert_eq!(sizes, vec![2, 2, 1]);

        let mut everyone: Vec<&str> = roster
            .competitors()
            .iter()
            .flat_map(|c| c.members().iter().map(String::as_str))
            .collect();
        everyone.sort_unstable();
        assert_eq!(everyone, players.to_vec());

        let first = &roster.competitors()[0];
        assert_eq!(first.name(), first.members().join(" & "));
    }

    #[test]
    fn team_formation_is_reproducible_from_seed() {
        let players = ["Ana", "Bo", "Cy", "Di", "Ed", "Fay"];
        let a = Roster::form_teams(&players, TeamMode::Singles, &mut ChaCha8Rng::seed_from_u64(9))
            .unwrap();
        let b = Roster::form_teams(&players, TeamMode::Singles, &mut ChaCha8Rng::seed_from_u64(9))
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 6);
    }
}
