//! # league-schedule-core
//!
//! This crate contains the scheduling core of the league manager: fixture generation and the
//! bookkeeping built on top of recorded matches.
//!
//! Important types:
//! - [`RoundRobin`]: The round-robin schedule generator. Produces [`Round`]s of [`Fixture`]s.
//! - [`CalendarAdjustment`]: The per-team activity analysis and the resulting recommendation
//! on whether the current schedule should be regenerated.
//! - [`Standings`]: The league table computed from finished matches.
//! - [`Teams`]: A wrapper around `Vec<Team>` holding the participating teams.
//! - [`MatchRecord`]: A scheduled or played match as recorded by the application.
//!
//! All operations are pure functions over their inputs: they read the given teams and matches
//! and allocate new output structures. Nothing in this crate does I/O or keeps shared state.
//!
//! ## Feature Flags
//!
//! `serde`: Adds `Serialize` and `Deserialize` impls to all public data types.
//!
pub mod activity;
pub mod calendar;
pub mod schedule;
pub mod standings;

pub use activity::{ActivityOptions, CalendarAdjustment, InactiveReason, TeamActivity, Verdict};
pub use schedule::{Fixture, Round, RoundRobin, ScheduleOptions};
pub use standings::{Standings, StandingsEntry};

use std::fmt::{self, Display, Formatter};
use std::ops::{Deref, DerefMut};
use std::result;
use std::str::FromStr;
use std::vec::IntoIter;

use chrono::{DateTime, Utc};
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An `Result<T>` using [`enum@Error`] as an error type.
pub type Result<T> = result::Result<T, Error>;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("not enough teams: a schedule requires at least 2, found {found}")]
    NotEnoughTeams { found: usize },
    #[error("duplicate team id: {0}")]
    DuplicateTeam(TeamId),
    #[error("match refers to team {0} which is not in the team list")]
    UnknownTeam(TeamId),
}

/// A unique identifier of a [`Team`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TeamId(pub u64);

impl Display for TeamId {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl AsRef<u64> for TeamId {
    #[inline]
    fn as_ref(&self) -> &u64 {
        &self.0
    }
}

impl PartialEq<u64> for TeamId {
    #[inline]
    fn eq(&self, other: &u64) -> bool {
        self.0 == *other
    }
}

impl From<u64> for TeamId {
    #[inline]
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl FromStr for TeamId {
    type Err = <u64 as FromStr>::Err;

    #[inline]
    fn from_str(s: &str) -> result::Result<Self, Self::Err> {
        Ok(Self(s.parse::<u64>()?))
    }
}

/// A participating team.
///
/// Teams are immutable inputs to the operations in this crate. Their lifecycle, including the
/// `approved` flag, is owned by the application layer.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    /// Whether an administrator has approved the team for play.
    pub approved: bool,
}

impl Team {
    /// Creates a new approved `Team` with the given `id` and `name`.
    pub fn new<I, S>(id: I, name: S) -> Self
    where
        I: Into<TeamId>,
        S: ToString,
    {
        Self {
            id: id.into(),
            name: name.to_string(),
            approved: true,
        }
    }
}

/// A wrapper around a `Vec<Team>` holding the teams of a league.
///
/// This is a wrapper around a `Vec<Team>` and has the same layout as a `Vec<Team>`.
#[derive(Clone, Debug, Default)]
#[repr(transparent)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Teams {
    teams: Vec<Team>,
}

impl Teams {
    /// Creates a new empty `Teams` list.
    #[inline]
    pub fn new() -> Self {
        Self { teams: Vec::new() }
    }

    /// Creates a new empty `Teams` list with the specified capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            teams: Vec::with_capacity(capacity),
        }
    }

    /// Returns the [`Team`] with the given `id`, or `None` if no such team exists.
    pub fn get_by_id(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|team| team.id == id)
    }

    #[inline]
    pub fn contains_id(&self, id: TeamId) -> bool {
        self.get_by_id(id).is_some()
    }
}

impl FromIterator<Team> for Teams {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Team>,
    {
        let teams = iter.into_iter().collect();

        Self { teams }
    }
}

impl IntoIterator for Teams {
    type Item = Team;
    type IntoIter = IntoIter<Team>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.teams.into_iter()
    }
}

impl Deref for Teams {
    type Target = Vec<Team>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.teams
    }
}

impl DerefMut for Teams {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.teams
    }
}

impl<U> PartialEq<U> for Teams
where
    U: AsRef<[Team]>,
{
    #[inline]
    fn eq(&self, other: &U) -> bool {
        self.teams == other.as_ref()
    }
}

impl From<Vec<Team>> for Teams {
    #[inline]
    fn from(teams: Vec<Team>) -> Self {
        Self { teams }
    }
}

/// The lifecycle state of a [`MatchRecord`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MatchStatus {
    Scheduled,
    InProgress,
    Finished,
    Cancelled,
}

impl MatchStatus {
    #[inline]
    pub fn to_u8(self) -> u8 {
        match self {
            Self::Scheduled => 0,
            Self::InProgress => 1,
            Self::Finished => 2,
            Self::Cancelled => 3,
        }
    }

    #[inline]
    pub fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::Scheduled),
            1 => Some(Self::InProgress),
            2 => Some(Self::Finished),
            3 => Some(Self::Cancelled),
            _ => None,
        }
    }
}

impl Display for MatchStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Scheduled => "Scheduled",
                Self::InProgress => "In Progress",
                Self::Finished => "Finished",
                Self::Cancelled => "Cancelled",
            }
        )
    }
}

/// A match as recorded by the application.
///
/// Matches are produced as plain [`Fixture`]s by the generator and persisted by the caller;
/// a `MatchRecord` is the persisted form handed back into the analysis operations. Scores are
/// only present once the match finished and results were entered.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MatchRecord {
    pub home: TeamId,
    pub away: TeamId,
    pub status: MatchStatus,
    /// RFC3339
    pub date: DateTime<Utc>,
    pub round: Option<usize>,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
}

impl MatchRecord {
    /// Creates a new `MatchRecord` without a round assignment or scores.
    pub fn new(home: TeamId, away: TeamId, status: MatchStatus, date: DateTime<Utc>) -> Self {
        Self {
            home,
            away,
            status,
            date,
            round: None,
            home_score: None,
            away_score: None,
        }
    }

    /// Returns `true` if the team with the given `id` plays on either side of this match.
    #[inline]
    pub fn involves(&self, id: TeamId) -> bool {
        self.home == id || self.away == id
    }

    /// Returns the opponent of the team with the given `id`, or `None` if the team does not
    /// play in this match.
    pub fn opponent_of(&self, id: TeamId) -> Option<TeamId> {
        if self.home == id {
            Some(self.away)
        } else if self.away == id {
            Some(self.home)
        } else {
            None
        }
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.status == MatchStatus::Finished
    }

    /// Returns the recorded result as `(home, away)`, or `None` unless both scores are present.
    pub fn score(&self) -> Option<(u32, u32)> {
        match (self.home_score, self.away_score) {
            (Some(home), Some(away)) => Some((home, away)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{MatchRecord, MatchStatus, TeamId};

    use chrono::{TimeZone, Utc};

    #[macro_export]
    macro_rules! teams {
        ($($id:expr),*$(,)?) => {
            vec![$($crate::Team::new($id as u64, format!("Team {}", $id))),*].into_iter()
        };
    }

    #[test]
    fn test_team_id() {
        let id = TeamId(3);

        assert_eq!(id.to_string(), "3");
        assert_eq!("3".parse::<TeamId>().unwrap(), id);
        assert_eq!(id, 3);
    }

    #[test]
    fn test_match_status() {
        for status in [
            MatchStatus::Scheduled,
            MatchStatus::InProgress,
            MatchStatus::Finished,
            MatchStatus::Cancelled,
        ] {
            assert_eq!(MatchStatus::from_u8(status.to_u8()), Some(status));
        }

        assert_eq!(MatchStatus::from_u8(4), None);
    }

    #[test]
    fn test_match_record() {
        let date = Utc.with_ymd_and_hms(2023, 4, 12, 19, 30, 0).unwrap();
        let mut record = MatchRecord::new(TeamId(1), TeamId(2), MatchStatus::Scheduled, date);

        assert!(record.involves(TeamId(1)));
        assert!(record.involves(TeamId(2)));
        assert!(!record.involves(TeamId(3)));

        assert_eq!(record.opponent_of(TeamId(1)), Some(TeamId(2)));
        assert_eq!(record.opponent_of(TeamId(2)), Some(TeamId(1)));
        assert_eq!(record.opponent_of(TeamId(3)), None);

        assert_eq!(record.score(), None);

        record.status = MatchStatus::Finished;
        record.home_score = Some(2);
        record.away_score = Some(1);

        assert!(record.is_finished());
        assert_eq!(record.score(), Some((2, 1)));
    }
}
