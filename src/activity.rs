//! # Team activity analysis
//!
//! Classifies every team as active or inactive based on its participation record and the
//! administrative `approved` flag, and recommends whether the current schedule should be
//! regenerated. The verdict is advisory: the application surfaces it to an administrator
//! and never acts on it without explicit confirmation.

use std::fmt::{self, Display, Formatter};

use chrono::{DateTime, Utc};

use crate::{Error, MatchRecord, MatchStatus, Result, Team, TeamId, Teams};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Why a team is considered inactive.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum InactiveReason {
    /// The team was never approved, or was deactivated by an administrator.
    NotApproved,
    /// The team has no played and no upcoming matches.
    NoMatches,
}

impl Display for InactiveReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::NotApproved => "not approved / deactivated",
                Self::NoMatches => "no matches assigned",
            }
        )
    }
}

/// A derived, read-only activity summary of a single team.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TeamActivity {
    pub team: TeamId,
    /// All matches the team takes part in, including cancelled ones.
    pub total_matches: usize,
    pub finished: usize,
    /// Upcoming matches: scheduled or currently in progress.
    pub scheduled: usize,
    /// The date of the most recent finished match.
    pub last_match_date: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub inactive_reason: Option<InactiveReason>,
}

impl TeamActivity {
    fn analyze(team: &Team, matches: &[MatchRecord]) -> Self {
        let mut total_matches = 0;
        let mut finished = 0;
        let mut scheduled = 0;
        let mut last_match_date: Option<DateTime<Utc>> = None;

        for record in matches.iter().filter(|record| record.involves(team.id)) {
            total_matches += 1;

            match record.status {
                MatchStatus::Finished => {
                    finished += 1;

                    if last_match_date.map_or(true, |date| record.date > date) {
                        last_match_date = Some(record.date);
                    }
                }
                MatchStatus::Scheduled | MatchStatus::InProgress => scheduled += 1,
                MatchStatus::Cancelled => {}
            }
        }

        let is_active = team.approved && (finished > 0 || scheduled > 0);

        // An unapproved team is inactive no matter its match history.
        let inactive_reason = if is_active {
            None
        } else if !team.approved {
            Some(InactiveReason::NotApproved)
        } else {
            Some(InactiveReason::NoMatches)
        };

        Self {
            team: team.id,
            total_matches,
            finished,
            scheduled,
            last_match_date,
            is_active,
            inactive_reason,
        }
    }
}

/// The analyzer's recommendation on the current schedule.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Verdict {
    /// Inactive teams were found; the schedule should be regenerated.
    Regenerate,
    /// All teams are active, but the odd team count leaves one team resting per round.
    Warning,
    /// All teams are active and the schedule remains valid.
    KeepCurrent,
}

impl Display for Verdict {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Regenerate => "regenerate",
                Self::Warning => "warning",
                Self::KeepCurrent => "keep current",
            }
        )
    }
}

/// Options accepted by [`CalendarAdjustment::analyze`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ActivityOptions {
    /// Reserved for a missed-rounds rule. The analyzer currently only distinguishes
    /// zero from non-zero match counts.
    pub inactivity_threshold: u32,
}

impl ActivityOptions {
    #[inline]
    pub const fn new() -> Self {
        Self {
            inactivity_threshold: 0,
        }
    }
}

/// The result of analyzing team activity against the recorded matches.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalendarAdjustment {
    pub verdict: Verdict,
    pub active: Vec<TeamActivity>,
    pub inactive: Vec<TeamActivity>,
    /// A human readable summary for the administrator.
    pub message: String,
}

impl CalendarAdjustment {
    /// Analyzes the activity of all `teams` over the recorded `matches`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTeam`] if a match refers to a team id that is not present in
    /// `teams`. A verdict computed from an inconsistent view of the league could recommend
    /// regenerating a valid schedule, so the analysis fails fast instead.
    pub fn analyze(
        teams: &Teams,
        matches: &[MatchRecord],
        options: ActivityOptions,
    ) -> Result<Self> {
        log::debug!(
            "Analyzing activity of {} teams over {} matches (inactivity threshold {})",
            teams.len(),
            matches.len(),
            options.inactivity_threshold
        );

        for record in matches {
            for id in [record.home, record.away] {
                if !teams.contains_id(id) {
                    return Err(Error::UnknownTeam(id));
                }
            }
        }

        let mut active = Vec::new();
        let mut inactive = Vec::new();

        for team in teams.iter() {
            let activity = TeamActivity::analyze(team, matches);

            if activity.is_active {
                active.push(activity);
            } else {
                inactive.push(activity);
            }
        }

        let (verdict, message) = if !inactive.is_empty() {
            let mut message = format!(
                "{} inactive team(s) found; regenerating the schedule with the {} active team(s) is recommended",
                inactive.len(),
                active.len()
            );

            if active.len() % 2 == 1 {
                message.push_str(" (odd team count, one team will rest each round)");
            }

            (Verdict::Regenerate, message)
        } else if active.len() % 2 == 1 {
            let message = format!(
                "{} active teams is an odd count, one team will rest each round",
                active.len()
            );

            (Verdict::Warning, message)
        } else {
            let message = String::from("all teams are active, the current schedule remains valid");

            (Verdict::KeepCurrent, message)
        };

        log::debug!(
            "Activity verdict: {} ({} active, {} inactive)",
            verdict,
            active.len(),
            inactive.len()
        );

        Ok(Self {
            verdict,
            active,
            inactive,
            message,
        })
    }
}
