pub mod simulator;
pub use simulator::*;

pub mod league;
pub mod matchup;
pub mod playoffs;
pub mod schedule;
pub mod season;
pub mod standings;

pub mod error;
pub mod utils;

// Re-export league items
pub use league::{Conference, Division, League, LeagueGenerator, Team};

// Re-export matchup items
pub use matchup::{Matchup, MatchupStorage, Score};

// Re-export schedule items
pub use schedule::{PlannedMatchup, Schedule, ScheduleGenerator};

// Re-export season items
pub use season::{AdvanceOutcome, MessageSeverity, Season, SeasonData, SeasonPhase};

// Re-export standings items
pub use standings::{
    ClinchStatus, RankingStorage, StandingsLedger, TeamRanking, TeamStanding,
};

// Re-export playoff items
pub use playoffs::PlayoffRound;

pub use error::SimulationError;
pub use utils::*;
