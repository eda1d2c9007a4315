use std::collections::HashSet;

use crate::{Error, Result, Team, TeamId, Teams};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A generated pairing of two teams.
///
/// Fixtures are plain data: the caller persists them as match rows and assigns dates.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Fixture {
    pub home: TeamId,
    pub away: TeamId,
}

impl Fixture {
    #[inline]
    pub fn new(home: TeamId, away: TeamId) -> Self {
        Self { home, away }
    }

    /// Returns the same pairing with home and away swapped.
    #[inline]
    pub fn reversed(&self) -> Self {
        Self {
            home: self.away,
            away: self.home,
        }
    }
}

/// An ordered group of fixtures played together.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Round {
    pub index: usize,
    pub fixtures: Vec<Fixture>,
    /// The team resting this round. Only present when the team count is odd.
    pub bye: Option<TeamId>,
}

/// Options accepted by [`RoundRobin`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScheduleOptions {
    /// Mirror the schedule into a second half with home and away swapped.
    pub double_round: bool,
}

impl ScheduleOptions {
    /// Creates the default options: a single round-robin.
    #[inline]
    pub const fn new() -> Self {
        Self {
            double_round: false,
        }
    }

    #[inline]
    pub const fn double_round(mut self, double_round: bool) -> Self {
        self.double_round = double_round;
        self
    }
}

/// A round-robin schedule over a list of teams.
///
/// Every team meets every other team exactly once, or exactly twice with swapped home
/// advantage when [`ScheduleOptions::double_round`] is set. The generator is deterministic:
/// the same teams in the same order always produce the same rounds.
#[derive(Clone, Debug)]
pub struct RoundRobin {
    teams: Teams,
    rounds: Vec<Round>,
}

impl RoundRobin {
    /// Creates a new single round-robin schedule with the given `teams`.
    ///
    /// # Errors
    ///
    /// Returns an [`enum@Error`] if fewer than 2 teams are given or a team id occurs twice.
    pub fn new<I>(teams: I) -> Result<Self>
    where
        I: Iterator<Item = Team>,
    {
        Self::new_with_options(teams, ScheduleOptions::new())
    }

    /// Creates a new schedule with the given `teams` and using the given `options`.
    ///
    /// If you don't need to specify the options consider using [`new`].
    ///
    /// # Errors
    ///
    /// Returns an [`enum@Error`] if fewer than 2 teams are given or a team id occurs twice.
    ///
    /// [`new`]: Self::new
    pub fn new_with_options<I>(teams: I, options: ScheduleOptions) -> Result<Self>
    where
        I: Iterator<Item = Team>,
    {
        let teams: Teams = teams.collect();

        log::debug!(
            "Creating new RoundRobin schedule with {} teams",
            teams.len()
        );

        if teams.len() < 2 {
            return Err(Error::NotEnoughTeams { found: teams.len() });
        }

        let mut seen = HashSet::with_capacity(teams.len());
        for team in teams.iter() {
            if !seen.insert(team.id) {
                return Err(Error::DuplicateTeam(team.id));
            }
        }

        // Pad the working set to an even size. The extra slot never surfaces as an
        // opponent: the team paired against it rests that round.
        let padded = if teams.len() % 2 == 0 {
            teams.len()
        } else {
            teams.len() + 1
        };

        let num_rounds = padded - 1;
        let slots = padded / 2;

        let mut rounds = Vec::with_capacity(if options.double_round {
            num_rounds * 2
        } else {
            num_rounds
        });

        for round in 0..num_rounds {
            let mut fixtures = Vec::with_capacity(slots);
            let mut bye = None;

            for slot in 0..slots {
                let (home, away) = Self::circle_pair(padded, round, slot);

                // Only the fixed slot 0 opponent can be the padding slot, and only when the
                // real team count is odd.
                if away >= teams.len() {
                    bye = Some(teams[home].id);
                } else {
                    fixtures.push(Fixture::new(teams[home].id, teams[away].id));
                }
            }

            rounds.push(Round {
                index: round,
                fixtures,
                bye,
            });
        }

        if options.double_round {
            for index in 0..num_rounds {
                let fixtures = rounds[index].fixtures.iter().map(Fixture::reversed).collect();
                let bye = rounds[index].bye;

                rounds.push(Round {
                    index: index + num_rounds,
                    fixtures,
                    bye,
                });
            }
        }

        log::debug!(
            "Created new RoundRobin schedule with {} rounds",
            rounds.len()
        );

        Ok(Self { teams, rounds })
    }

    /// Returns a reference to the teams in the schedule.
    #[inline]
    pub fn teams(&self) -> &Teams {
        &self.teams
    }

    /// Returns the rounds of the schedule.
    #[inline]
    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    /// Consumes the `RoundRobin`, returning the rounds of the schedule.
    #[inline]
    pub fn into_rounds(self) -> Vec<Round> {
        self.rounds
    }

    #[inline]
    pub fn num_rounds(&self) -> usize {
        self.rounds.len()
    }

    /// Returns the home and away indexes paired at `slot` of `round` in a circle of
    /// size `n`. Index 0 rotates through the circle while index `n - 1` stays fixed as
    /// the slot 0 opponent.
    #[inline]
    fn circle_pair(n: usize, round: usize, slot: usize) -> (usize, usize) {
        debug_assert!(n % 2 == 0);

        let home = (round + slot) % (n - 1);
        let away = if slot == 0 {
            n - 1
        } else {
            (n - 1 - slot + round) % (n - 1)
        };

        (home, away)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::{teams, Error, TeamId};

    use super::{Fixture, Round, RoundRobin, ScheduleOptions};

    #[test]
    fn test_circle_pair() {
        let n = 4;
        let mut round = 0;

        macro_rules! test {
            ($n:expr, $round:expr, $($slot:expr => $out:expr),*,) => {
                $(
                    assert_eq!(RoundRobin::circle_pair($n, $round, $slot), $out);
                )*
            };
        }

        test! {
            n, round,
            0 => (0, 3),
            1 => (1, 2),
        }

        round = 1;

        test! {
            n, round,
            0 => (1, 3),
            1 => (2, 0),
        }

        round = 2;

        test! {
            n, round,
            0 => (2, 3),
            1 => (0, 1),
        }

        let n = 6;
        let round = 1;

        test! {
            n, round,
            0 => (1, 5),
            1 => (2, 0),
            2 => (3, 4),
        }
    }

    #[test]
    fn test_round_robin_two_teams() {
        let schedule = RoundRobin::new(teams![1, 2]).unwrap();

        assert_eq!(
            schedule.rounds(),
            [Round {
                index: 0,
                fixtures: vec![Fixture::new(TeamId(1), TeamId(2))],
                bye: None,
            }]
        );
    }

    #[test]
    fn test_round_robin_even() {
        let schedule = RoundRobin::new(teams![1, 2, 3, 4]).unwrap();

        assert_eq!(
            schedule.rounds(),
            [
                Round {
                    index: 0,
                    fixtures: vec![
                        Fixture::new(TeamId(1), TeamId(4)),
                        Fixture::new(TeamId(2), TeamId(3)),
                    ],
                    bye: None,
                },
                Round {
                    index: 1,
                    fixtures: vec![
                        Fixture::new(TeamId(2), TeamId(4)),
                        Fixture::new(TeamId(3), TeamId(1)),
                    ],
                    bye: None,
                },
                Round {
                    index: 2,
                    fixtures: vec![
                        Fixture::new(TeamId(3), TeamId(4)),
                        Fixture::new(TeamId(1), TeamId(2)),
                    ],
                    bye: None,
                },
            ]
        );
    }

    #[test]
    fn test_round_robin_odd() {
        let schedule = RoundRobin::new(teams![1, 2, 3]).unwrap();

        assert_eq!(
            schedule.rounds(),
            [
                Round {
                    index: 0,
                    fixtures: vec![Fixture::new(TeamId(2), TeamId(3))],
                    bye: Some(TeamId(1)),
                },
                Round {
                    index: 1,
                    fixtures: vec![Fixture::new(TeamId(3), TeamId(1))],
                    bye: Some(TeamId(2)),
                },
                Round {
                    index: 2,
                    fixtures: vec![Fixture::new(TeamId(1), TeamId(2))],
                    bye: Some(TeamId(3)),
                },
            ]
        );
    }

    #[test]
    fn test_round_robin_coverage() {
        let schedule = RoundRobin::new(teams![1, 2, 3, 4, 5, 6]).unwrap();

        let mut pairs = HashSet::new();
        for round in schedule.rounds() {
            let mut seen_this_round = HashSet::new();

            for fixture in &round.fixtures {
                assert_ne!(fixture.home, fixture.away);
                assert!(seen_this_round.insert(fixture.home));
                assert!(seen_this_round.insert(fixture.away));

                let pair = if fixture.home < fixture.away {
                    (fixture.home, fixture.away)
                } else {
                    (fixture.away, fixture.home)
                };
                assert!(pairs.insert(pair), "pair {:?} scheduled twice", pair);
            }
        }

        // 6 teams meet pairwise in 15 matches.
        assert_eq!(pairs.len(), 15);
    }

    #[test]
    fn test_round_robin_odd_byes() {
        let schedule = RoundRobin::new(teams![1, 2, 3, 4, 5]).unwrap();

        assert_eq!(schedule.num_rounds(), 5);

        let mut byes = HashSet::new();
        for round in schedule.rounds() {
            assert_eq!(round.fixtures.len(), 2);

            let bye = round.bye.expect("round without a bye");
            assert!(byes.insert(bye), "team {} rests twice", bye);

            // The resting team plays no fixture this round.
            for fixture in &round.fixtures {
                assert_ne!(fixture.home, bye);
                assert_ne!(fixture.away, bye);
            }
        }

        assert_eq!(byes.len(), 5);
    }

    #[test]
    fn test_double_round() {
        let options = ScheduleOptions::new().double_round(true);
        let schedule = RoundRobin::new_with_options(teams![1, 2, 3, 4], options).unwrap();

        assert_eq!(schedule.num_rounds(), 6);

        // The second half mirrors the first, fixture by fixture.
        for index in 0..3 {
            let first = &schedule.rounds()[index];
            let second = &schedule.rounds()[index + 3];

            assert_eq!(second.index, index + 3);
            assert_eq!(second.fixtures.len(), first.fixtures.len());

            for (a, b) in first.fixtures.iter().zip(&second.fixtures) {
                assert_eq!(a.reversed(), *b);
            }
        }

        let total: usize = schedule
            .rounds()
            .iter()
            .map(|round| round.fixtures.len())
            .sum();
        assert_eq!(total, 12);
    }

    #[test]
    fn test_double_round_keeps_byes() {
        let options = ScheduleOptions::new().double_round(true);
        let schedule = RoundRobin::new_with_options(teams![1, 2, 3], options).unwrap();

        assert_eq!(schedule.num_rounds(), 6);

        for index in 0..3 {
            assert_eq!(
                schedule.rounds()[index].bye,
                schedule.rounds()[index + 3].bye
            );
        }
    }

    #[test]
    fn test_round_robin_deterministic() {
        let first = RoundRobin::new(teams![1, 2, 3, 4, 5]).unwrap();
        let second = RoundRobin::new(teams![1, 2, 3, 4, 5]).unwrap();

        assert_eq!(first.rounds(), second.rounds());
    }

    #[test]
    fn test_round_robin_not_enough_teams() {
        assert_eq!(
            RoundRobin::new(teams![]).unwrap_err(),
            Error::NotEnoughTeams { found: 0 }
        );

        assert_eq!(
            RoundRobin::new(teams![1]).unwrap_err(),
            Error::NotEnoughTeams { found: 1 }
        );
    }

    #[test]
    fn test_round_robin_duplicate_team() {
        assert_eq!(
            RoundRobin::new(teams![1, 2, 2]).unwrap_err(),
            Error::DuplicateTeam(TeamId(2))
        );
    }
}
