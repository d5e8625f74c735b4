use thiserror::Error;

/// Failures surfaced by the season-simulation engine.
///
/// A missing or duplicated snapshot means the append-only ledger
/// invariant was broken by an earlier bug; callers must treat those as
/// fatal rather than patching around them.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("no feasible schedule found after {retries} attempts")]
    SchedulingInfeasible { retries: u32 },

    #[error("generated schedule failed validation: {reason}")]
    InvalidSchedule { reason: String },

    #[error("missing standings snapshot for team {team_id} in week {week_number}")]
    MissingStanding { team_id: u32, week_number: u8 },

    #[error("standings snapshot already exists for team {team_id} in week {week_number}")]
    DuplicateStanding { team_id: u32, week_number: u8 },

    #[error("missing ranking for team {team_id} in week {week_number}")]
    MissingRanking { team_id: u32, week_number: u8 },
}
