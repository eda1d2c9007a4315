//! League standings computed from finished matches.

use std::cmp::Reverse;
use std::iter::FusedIterator;

use crate::{Error, MatchRecord, Result, TeamId, Teams};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single row of the league table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StandingsEntry {
    pub team: TeamId,
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub points: u32,
}

impl StandingsEntry {
    fn new(team: TeamId) -> Self {
        Self {
            team,
            ..Default::default()
        }
    }

    /// Goals scored minus goals conceded.
    #[inline]
    pub fn goal_difference(&self) -> i64 {
        i64::from(self.goals_for) - i64::from(self.goals_against)
    }

    fn record(&mut self, scored: u32, conceded: u32) {
        self.played += 1;
        self.goals_for += scored;
        self.goals_against += conceded;

        if scored > conceded {
            self.wins += 1;
            self.points += 3;
        } else if scored == conceded {
            self.draws += 1;
            self.points += 1;
        } else {
            self.losses += 1;
        }
    }
}

/// The league table over a set of teams.
///
/// Entries are ordered by points, then goal difference, then goals scored. Remaining ties
/// keep team id order so the table is deterministic.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Standings {
    entries: Vec<StandingsEntry>,
}

impl Standings {
    /// Computes the standings of `teams` from the recorded `matches`.
    ///
    /// Only finished matches with both scores recorded count toward the table; a finished
    /// match without a score is skipped. Every team appears in the table, with an all-zero
    /// row if it never played.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTeam`] if a match refers to a team id that is not present
    /// in `teams`.
    pub fn from_matches(teams: &Teams, matches: &[MatchRecord]) -> Result<Self> {
        log::debug!(
            "Computing standings for {} teams over {} matches",
            teams.len(),
            matches.len()
        );

        let mut entries: Vec<StandingsEntry> = teams
            .iter()
            .map(|team| StandingsEntry::new(team.id))
            .collect();

        for record in matches {
            let home = Self::index_of(teams, record.home)?;
            let away = Self::index_of(teams, record.away)?;

            if !record.is_finished() {
                continue;
            }

            let (home_score, away_score) = match record.score() {
                Some(score) => score,
                None => {
                    log::warn!(
                        "Skipping finished match {} vs {} without a recorded score",
                        record.home,
                        record.away
                    );
                    continue;
                }
            };

            entries[home].record(home_score, away_score);
            entries[away].record(away_score, home_score);
        }

        entries.sort_by_key(|entry| {
            (
                Reverse(entry.points),
                Reverse(entry.goal_difference()),
                Reverse(entry.goals_for),
                entry.team,
            )
        });

        Ok(Self { entries })
    }

    fn index_of(teams: &Teams, id: TeamId) -> Result<usize> {
        teams
            .iter()
            .position(|team| team.id == id)
            .ok_or(Error::UnknownTeam(id))
    }

    /// Returns the rows of the table in order.
    #[inline]
    pub fn entries(&self) -> &[StandingsEntry] {
        &self.entries
    }

    /// Returns the row currently leading the table.
    #[inline]
    pub fn leader(&self) -> Option<&StandingsEntry> {
        self.entries.first()
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self,
            next: 0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Iter<'a> {
    inner: &'a Standings,
    next: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a StandingsEntry;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.inner.entries.get(self.next)?;
        self.next += 1;
        Some(entry)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len(), Some(self.len()))
    }
}

impl<'a> ExactSizeIterator for Iter<'a> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.entries.len() - self.next
    }
}

impl<'a> FusedIterator for Iter<'a> {}
