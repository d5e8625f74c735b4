use crate::league::League;
use crate::matchup::MatchupStorage;
use crate::schedule::{REGULAR_SEASON_WEEKS, Schedule};
use crate::standings::{RankingStorage, StandingsLedger};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The parts of the year a season can be in. Only the last three
/// participate in progression; the first three are declared for
/// completeness and advancing during them is a warning no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeasonPhase {
    ReSigning,
    FreeAgency,
    Draft,
    RegularSeason,
    Playoffs,
    Offseason,
}

impl fmt::Display for SeasonPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SeasonPhase::ReSigning => "Re-signing",
            SeasonPhase::FreeAgency => "Free Agent Signing",
            SeasonPhase::Draft => "Draft",
            SeasonPhase::RegularSeason => "Regular Season",
            SeasonPhase::Playoffs => "Playoffs",
            SeasonPhase::Offseason => "Offseason",
        };
        write!(f, "{}", name)
    }
}

/// One year of a league. Exactly one season per league is current at
/// any time; phase and week move only through the progression
/// controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Season {
    pub league_id: u32,
    pub season_number: u16,
    pub phase: SeasonPhase,
    pub week_number: u8,
    pub start_date: NaiveDate,
    pub current_date: NaiveDate,
    pub is_current: bool,
}

impl Season {
    pub fn new(league_id: u32, season_number: u16, start_date: NaiveDate) -> Self {
        Season {
            league_id,
            season_number,
            phase: SeasonPhase::RegularSeason,
            week_number: 1,
            start_date,
            current_date: start_date,
            is_current: true,
        }
    }
}

/// A season plus everything it owns: matchups, the standings ledger and
/// the ranking rows.
#[derive(Debug)]
pub struct SeasonData {
    pub season: Season,
    pub matchups: MatchupStorage,
    pub standings: StandingsLedger,
    pub rankings: RankingStorage,
}

impl SeasonData {
    /// Materializes a generated schedule into matchup rows and writes
    /// the zeroed week-1 standings for every team.
    pub fn create(league: &League, season: Season, schedule: &Schedule) -> Self {
        let mut matchups = MatchupStorage::new();

        for week_number in 1..=REGULAR_SEASON_WEEKS {
            let date = season.start_date + Duration::days(7 * week_number as i64);

            for planned in schedule.week(week_number) {
                matchups.add(
                    league,
                    planned.home_team_id,
                    planned.away_team_id,
                    week_number,
                    date,
                    false,
                );
            }
        }

        let mut standings = StandingsLedger::new();
        standings.initialize_week_one(league);

        SeasonData {
            season,
            matchups,
            standings,
            rankings: RankingStorage::new(),
        }
    }
}
