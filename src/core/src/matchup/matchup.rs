use crate::league::League;
use chrono::NaiveDate;
use rand::{Rng, RngExt};
use serde::{Deserialize, Serialize};

pub const MAX_GAME_SCORE: u8 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub home: u8,
    pub away: u8,
}

impl Score {
    pub fn is_tie(&self) -> bool {
        self.home == self.away
    }
}

/// A single game between two teams, regular season or postseason.
///
/// A matchup is final once it carries a score; simulating it again is a
/// no-op.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Matchup {
    pub id: u32,
    pub home_team_id: u32,
    pub away_team_id: u32,
    pub week_number: u8,
    pub date: NaiveDate,
    pub is_divisional: bool,
    pub is_conference: bool,
    pub is_postseason: bool,
    pub score: Option<Score>,
}

impl Matchup {
    pub fn is_final(&self) -> bool {
        self.score.is_some()
    }

    /// Rolls both scores uniformly from 0..=50. Ties are legal in the
    /// regular season; postseason ties go to overtime.
    pub fn simulate(&mut self, rng: &mut impl Rng) -> Score {
        if let Some(score) = self.score {
            return score;
        }

        let home = rng.random_range(0..=MAX_GAME_SCORE);
        let away = rng.random_range(0..=MAX_GAME_SCORE);

        let score = if self.is_postseason && home == away {
            overtime_break(home, away, rng)
        } else {
            Score { home, away }
        };

        self.score = Some(score);
        score
    }

    /// The winning team id, or `None` for a tie or an unplayed game.
    pub fn winner(&self) -> Option<u32> {
        self.score.and_then(|score| {
            if score.home > score.away {
                Some(self.home_team_id)
            } else if score.away > score.home {
                Some(self.away_team_id)
            } else {
                None
            }
        })
    }

    pub fn involves(&self, team_id: u32) -> bool {
        self.home_team_id == team_id || self.away_team_id == team_id
    }
}

/// Overtime awards a 3..=7 bonus to one side. The side is chosen by an
/// explicit coin flip over home/away so that equal score values cannot
/// bias the pick.
fn overtime_break(home: u8, away: u8, rng: &mut impl Rng) -> Score {
    let bonus = rng.random_range(3..=7);

    if rng.random_bool(0.5) {
        Score {
            home: home + bonus,
            away,
        }
    } else {
        Score {
            home,
            away: away + bonus,
        }
    }
}

/// All of a season's matchups, regular season and postseason.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct MatchupStorage {
    items: Vec<Matchup>,
    next_id: u32,
}

impl MatchupStorage {
    pub fn new() -> Self {
        MatchupStorage {
            items: Vec::new(),
            next_id: 1,
        }
    }

    pub fn add(
        &mut self,
        league: &League,
        home_team_id: u32,
        away_team_id: u32,
        week_number: u8,
        date: NaiveDate,
        is_postseason: bool,
    ) -> u32 {
        let id = self.next_id;
        self.next_id += 1;

        self.items.push(Matchup {
            id,
            home_team_id,
            away_team_id,
            week_number,
            date,
            is_divisional: league.same_division(home_team_id, away_team_id),
            is_conference: league.same_conference(home_team_id, away_team_id),
            is_postseason,
            score: None,
        });

        id
    }

    pub fn all(&self) -> &[Matchup] {
        &self.items
    }

    pub fn week(&self, week_number: u8) -> impl Iterator<Item = &Matchup> {
        self.items
            .iter()
            .filter(move |m| m.week_number == week_number)
    }

    pub fn week_mut(&mut self, week_number: u8) -> impl Iterator<Item = &mut Matchup> {
        self.items
            .iter_mut()
            .filter(move |m| m.week_number == week_number)
    }

    /// Teams without a matchup in the given week.
    pub fn bye_teams(&self, league: &League, week_number: u8) -> Vec<u32> {
        league
            .teams
            .iter()
            .map(|t| t.id)
            .filter(|&team_id| {
                !self
                    .week(week_number)
                    .any(|matchup| matchup.involves(team_id))
            })
            .collect()
    }

    /// The regular-season week in which a team has no game, if any.
    pub fn bye_week_of(&self, team_id: u32, regular_season_weeks: u8) -> Option<u8> {
        (1..=regular_season_weeks).find(|&week| {
            !self
                .week(week)
                .any(|matchup| !matchup.is_postseason && matchup.involves(team_id))
        })
    }
}
