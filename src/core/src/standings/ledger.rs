use crate::error::SimulationError;
use crate::league::League;
use crate::matchup::{Matchup, MatchupStorage};
use crate::schedule::REGULAR_SEASON_WEEKS;
use crate::standings::TeamStanding;
use log::debug;
use std::collections::HashMap;

enum GameResult {
    Win,
    Loss,
    Tie,
}

/// Append-only store of weekly standing snapshots, keyed by
/// (team, week).
#[derive(Debug, Default)]
pub struct StandingsLedger {
    rows: HashMap<(u32, u8), TeamStanding>,
}

impl StandingsLedger {
    pub fn new() -> Self {
        StandingsLedger::default()
    }

    /// Zeroed week-1 rows for every team, written at season creation.
    pub fn initialize_week_one(&mut self, league: &League) {
        for team in &league.teams {
            self.rows
                .insert((team.id, 1), TeamStanding::new(team.id, 1));
        }
    }

    pub fn insert(&mut self, standing: TeamStanding) -> Result<(), SimulationError> {
        let key = (standing.team_id, standing.week_number);

        if self.rows.contains_key(&key) {
            return Err(SimulationError::DuplicateStanding {
                team_id: standing.team_id,
                week_number: standing.week_number,
            });
        }

        self.rows.insert(key, standing);
        Ok(())
    }

    pub fn get(&self, team_id: u32, week_number: u8) -> Result<&TeamStanding, SimulationError> {
        self.rows
            .get(&(team_id, week_number))
            .ok_or(SimulationError::MissingStanding {
                team_id,
                week_number,
            })
    }

    pub fn find(&self, team_id: u32, week_number: u8) -> Option<&TeamStanding> {
        self.rows.get(&(team_id, week_number))
    }

    pub fn week_snapshots(&self, week_number: u8) -> Vec<&TeamStanding> {
        self.rows
            .values()
            .filter(|standing| standing.week_number == week_number)
            .collect()
    }

    /// Writes every team's week+1 snapshot from the given week's final
    /// matchups. Teams on a bye carry forward unchanged.
    pub fn advance_week(
        &mut self,
        league: &League,
        matchups: &MatchupStorage,
        week_number: u8,
    ) -> Result<(), SimulationError> {
        for team_id in matchups.bye_teams(league, week_number) {
            debug!("team {} is on a bye in week {}", team_id, week_number);
            let next = self.get(team_id, week_number)?.carry_forward();
            self.insert(next)?;
        }

        let week_matchups: Vec<Matchup> =
            matchups.week(week_number).cloned().collect();

        for matchup in &week_matchups {
            let Some(score) = matchup.score else { continue };
            let winner = matchup.winner();

            for (team_id, own, opponent, is_home) in [
                (matchup.home_team_id, score.home, score.away, true),
                (matchup.away_team_id, score.away, score.home, false),
            ] {
                let result = match winner {
                    None => GameResult::Tie,
                    Some(id) if id == team_id => GameResult::Win,
                    Some(_) => GameResult::Loss,
                };

                let next = self.updated_standing(
                    matchups, matchup, team_id, result, own, opponent, is_home,
                )?;
                self.insert(next)?;
            }
        }

        Ok(())
    }

    fn updated_standing(
        &self,
        matchups: &MatchupStorage,
        matchup: &Matchup,
        team_id: u32,
        result: GameResult,
        own_score: u8,
        opponent_score: u8,
        is_home: bool,
    ) -> Result<TeamStanding, SimulationError> {
        let week_number = matchup.week_number;
        let mut next = self.get(team_id, week_number)?.carry_forward();

        next.points_for += own_score as u32;
        next.points_against += opponent_score as u32;

        match result {
            GameResult::Win => {
                next.wins += 1;
                next.streak = if next.streak > 0 { next.streak + 1 } else { 1 };

                if is_home {
                    next.home_wins += 1;
                } else {
                    next.away_wins += 1;
                }

                if matchup.is_divisional {
                    next.div_wins += 1;
                } else if matchup.is_conference {
                    next.conf_wins += 1;
                } else {
                    next.non_conf_wins += 1;
                }
            }
            GameResult::Loss => {
                next.losses += 1;
                next.streak = if next.streak < 0 { next.streak - 1 } else { -1 };

                if is_home {
                    next.home_losses += 1;
                } else {
                    next.away_losses += 1;
                }

                if matchup.is_divisional {
                    next.div_losses += 1;
                } else if matchup.is_conference {
                    next.conf_losses += 1;
                } else {
                    next.non_conf_losses += 1;
                }
            }
            GameResult::Tie => {
                next.ties += 1;
                next.streak = 0;

                if is_home {
                    next.home_ties += 1;
                } else {
                    next.away_ties += 1;
                }

                if matchup.is_divisional {
                    next.div_ties += 1;
                } else if matchup.is_conference {
                    next.conf_ties += 1;
                } else {
                    next.non_conf_ties += 1;
                }
            }
        }

        // Trailing-5 split: diff against the snapshot five weeks back,
        // pushed one week further if the bye falls inside the window.
        let mut reference_week = if week_number > 4 { week_number - 4 } else { 1 };
        if let Some(bye_week) = matchups.bye_week_of(team_id, REGULAR_SEASON_WEEKS) {
            if reference_week > 1 && reference_week <= bye_week && bye_week <= week_number {
                reference_week -= 1;
            }
        }

        let reference = self.get(team_id, reference_week)?;
        next.last_5_wins = next.wins - reference.wins;
        next.last_5_losses = next.losses - reference.losses;
        next.last_5_ties = next.ties - reference.ties;

        Ok(next)
    }
}
