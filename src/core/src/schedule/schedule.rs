use crate::error::SimulationError;
use crate::league::League;
use crate::schedule::matchups::{PlannedMatchup, build_matchup_set};
use crate::schedule::solver::{ExactCover, SolveOutcome};
use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashMap;

pub const REGULAR_SEASON_WEEKS: u8 = 18;
pub const GAMES_PER_TEAM: u8 = 17;
pub const BYE_FIRST_WEEK: u8 = 6;
pub const BYE_LAST_WEEK: u8 = 13;
pub const BYES_PER_WEEK: usize = 4;

const SOLVER_NODE_BUDGET: u64 = 200_000;
const SOLVER_RETRIES: u32 = 40;

/// A season's regular-season slate: matchups grouped by week plus each
/// team's bye week.
#[derive(Debug)]
pub struct Schedule {
    pub weeks: Vec<Vec<PlannedMatchup>>,
    pub byes: HashMap<u32, u8>,
}

impl Schedule {
    pub fn week(&self, week_number: u8) -> &[PlannedMatchup] {
        &self.weeks[week_number as usize - 1]
    }

    /// Checks the hard scheduling rules: 17 games and one bye per team,
    /// byes inside the window with 4 per week, nobody booked twice in a
    /// week.
    pub fn validate(&self, league: &League) -> Result<(), SimulationError> {
        let invalid = |reason: String| SimulationError::InvalidSchedule { reason };

        if self.weeks.len() != REGULAR_SEASON_WEEKS as usize {
            return Err(invalid(format!("{} weeks generated", self.weeks.len())));
        }

        let mut games: HashMap<u32, u8> = HashMap::new();

        for (index, week) in self.weeks.iter().enumerate() {
            let week_number = index as u8 + 1;
            let mut booked: Vec<u32> = Vec::with_capacity(32);

            for matchup in week {
                for team_id in [matchup.home_team_id, matchup.away_team_id] {
                    if booked.contains(&team_id) {
                        return Err(invalid(format!(
                            "team {} booked twice in week {}",
                            team_id, week_number
                        )));
                    }
                    booked.push(team_id);
                    *games.entry(team_id).or_insert(0) += 1;
                }
            }

            let byes_this_week = self
                .byes
                .values()
                .filter(|&&week| week == week_number)
                .count();
            let in_window =
                (BYE_FIRST_WEEK..=BYE_LAST_WEEK).contains(&week_number);

            if in_window && byes_this_week != BYES_PER_WEEK {
                return Err(invalid(format!(
                    "week {} has {} byes",
                    week_number, byes_this_week
                )));
            }
            if !in_window && byes_this_week != 0 {
                return Err(invalid(format!(
                    "bye outside the window in week {}",
                    week_number
                )));
            }
            if week.len() + if in_window { 2 } else { 0 } != 16 {
                return Err(invalid(format!(
                    "week {} has {} matchups",
                    week_number,
                    week.len()
                )));
            }
        }

        for team in &league.teams {
            if games.get(&team.id).copied().unwrap_or(0) != GAMES_PER_TEAM {
                return Err(invalid(format!(
                    "team {} plays {} games",
                    team.abbreviation,
                    games.get(&team.id).copied().unwrap_or(0)
                )));
            }
            match self.byes.get(&team.id) {
                Some(week) if (BYE_FIRST_WEEK..=BYE_LAST_WEEK).contains(week) => {}
                Some(week) => {
                    return Err(invalid(format!(
                        "team {} has a bye in week {}",
                        team.abbreviation, week
                    )));
                }
                None => {
                    return Err(invalid(format!(
                        "team {} has no bye",
                        team.abbreviation
                    )));
                }
            }
        }

        Ok(())
    }
}

#[derive(Clone, Copy)]
enum Assignment {
    Game { matchup: usize, week: u8 },
    Bye { team: u32, week: u8 },
}

/// Generates a season schedule by modeling week assignment as an exact
/// cover and retrying the search with reshuffled row order until it
/// lands.
pub struct ScheduleGenerator;

impl ScheduleGenerator {
    pub fn generate(
        league: &League,
        rng: &mut impl Rng,
    ) -> Result<Schedule, SimulationError> {
        let matchups = build_matchup_set(league, rng);
        let schedule = Self::assign_weeks(league, matchups, rng)?;
        schedule.validate(league)?;

        Ok(schedule)
    }

    fn assign_weeks(
        league: &League,
        matchups: Vec<PlannedMatchup>,
        rng: &mut impl Rng,
    ) -> Result<Schedule, SimulationError> {
        // One contiguous column space:
        //  - per matchup: the matchup has occurred
        //  - per team x week: the team has appeared in the week
        //  - per team: the team has a bye
        //  - per bye-window week x slot: the week's i-th bye is taken
        let team_index: HashMap<u32, usize> = league
            .teams
            .iter()
            .enumerate()
            .map(|(index, team)| (team.id, index))
            .collect();

        let weeks = REGULAR_SEASON_WEEKS as usize;
        let team_week_base = matchups.len();
        let team_bye_base = team_week_base + league.teams.len() * weeks;
        let week_slot_base = team_bye_base + league.teams.len();
        let bye_weeks = (BYE_FIRST_WEEK..=BYE_LAST_WEEK).count();
        let total_columns = week_slot_base + bye_weeks * BYES_PER_WEEK;

        let team_week_col = |team_id: u32, week: u8| {
            team_week_base + team_index[&team_id] * weeks + week as usize - 1
        };

        let mut rows: Vec<(Vec<usize>, Assignment)> = Vec::new();

        for (index, matchup) in matchups.iter().enumerate() {
            for week in 1..=REGULAR_SEASON_WEEKS {
                rows.push((
                    vec![
                        index,
                        team_week_col(matchup.home_team_id, week),
                        team_week_col(matchup.away_team_id, week),
                    ],
                    Assignment::Game {
                        matchup: index,
                        week,
                    },
                ));
            }
        }

        for team in &league.teams {
            for week in BYE_FIRST_WEEK..=BYE_LAST_WEEK {
                for slot in 0..BYES_PER_WEEK {
                    let slot_col = week_slot_base
                        + (week - BYE_FIRST_WEEK) as usize * BYES_PER_WEEK
                        + slot;
                    rows.push((
                        vec![
                            team_week_col(team.id, week),
                            team_bye_base + team_index[&team.id],
                            slot_col,
                        ],
                        Assignment::Bye {
                            team: team.id,
                            week,
                        },
                    ));
                }
            }
        }

        for attempt in 1..=SOLVER_RETRIES {
            rows.shuffle(rng);

            let mut solver = ExactCover::new(total_columns);
            for (columns, _) in &rows {
                solver.add_row(columns);
            }

            match solver.solve(SOLVER_NODE_BUDGET) {
                SolveOutcome::Solution(selected) => {
                    debug!("📅 exact cover found on attempt {}", attempt);

                    let mut week_matchups = vec![Vec::new(); weeks];
                    let mut byes = HashMap::new();

                    for row_id in selected {
                        match rows[row_id].1 {
                            Assignment::Game { matchup, week } => {
                                week_matchups[week as usize - 1]
                                    .push(matchups[matchup].clone());
                            }
                            Assignment::Bye { team, week } => {
                                byes.insert(team, week);
                            }
                        }
                    }

                    return Ok(Schedule {
                        weeks: week_matchups,
                        byes,
                    });
                }
                SolveOutcome::Exhausted | SolveOutcome::BudgetExceeded => {
                    debug!(
                        "schedule attempt {} ended without a cover, reshuffling",
                        attempt
                    );
                }
            }
        }

        Err(SimulationError::SchedulingInfeasible {
            retries: SOLVER_RETRIES,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::league::LeagueGenerator;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_generated_schedule_is_valid() {
        let mut rng = StdRng::seed_from_u64(31);
        let league = LeagueGenerator::generate(1, &mut rng);

        let schedule = ScheduleGenerator::generate(&league, &mut rng).unwrap();
        schedule.validate(&league).unwrap();

        // Spot-check the validation independently.
        for team in &league.teams {
            let games: usize = schedule
                .weeks
                .iter()
                .map(|week| {
                    week.iter()
                        .filter(|m| {
                            m.home_team_id == team.id || m.away_team_id == team.id
                        })
                        .count()
                })
                .sum();

            assert_eq!(games, GAMES_PER_TEAM as usize);

            let bye = schedule.byes[&team.id];
            assert!((BYE_FIRST_WEEK..=BYE_LAST_WEEK).contains(&bye));
            assert!(
                !schedule
                    .week(bye)
                    .iter()
                    .any(|m| m.home_team_id == team.id || m.away_team_id == team.id)
            );
        }
    }

    #[test]
    fn test_repeated_generation_stays_valid() {
        let mut rng = StdRng::seed_from_u64(32);
        let league = LeagueGenerator::generate(1, &mut rng);

        for _ in 0..2 {
            let schedule = ScheduleGenerator::generate(&league, &mut rng).unwrap();
            schedule.validate(&league).unwrap();
        }
    }
}
