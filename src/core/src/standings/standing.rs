use crate::schedule::GAMES_PER_TEAM;
use serde::{Deserialize, Serialize};

/// A team's cumulative record as of one week.
///
/// Snapshots are immutable once written; every weekly advance appends a
/// new row instead of touching the previous one, which is what makes
/// the trailing-5 split computable by subtracting two snapshots.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamStanding {
    pub team_id: u32,
    pub week_number: u8,

    pub wins: u8,
    pub losses: u8,
    pub ties: u8,

    /// Positive for a win streak, negative for a losing streak, zero
    /// after a tie or at season start.
    pub streak: i16,

    pub points_for: u32,
    pub points_against: u32,

    pub home_wins: u8,
    pub home_losses: u8,
    pub home_ties: u8,
    pub away_wins: u8,
    pub away_losses: u8,
    pub away_ties: u8,

    pub div_wins: u8,
    pub div_losses: u8,
    pub div_ties: u8,
    pub conf_wins: u8,
    pub conf_losses: u8,
    pub conf_ties: u8,
    pub non_conf_wins: u8,
    pub non_conf_losses: u8,
    pub non_conf_ties: u8,

    pub last_5_wins: u8,
    pub last_5_losses: u8,
    pub last_5_ties: u8,
}

impl TeamStanding {
    pub fn new(team_id: u32, week_number: u8) -> Self {
        TeamStanding {
            team_id,
            week_number,
            ..TeamStanding::default()
        }
    }

    pub fn games_played(&self) -> u8 {
        self.wins + self.losses + self.ties
    }

    pub fn games_left(&self) -> u8 {
        GAMES_PER_TEAM.saturating_sub(self.games_played())
    }

    /// Wins plus half a win per tie, the unit of games-back arithmetic.
    pub fn win_equivalents(&self) -> f32 {
        self.wins as f32 + 0.5 * self.ties as f32
    }

    /// An unchanged copy for the following week, used for bye weeks.
    pub fn carry_forward(&self) -> Self {
        let mut next = self.clone();
        next.week_number += 1;
        next
    }
}
