use crate::error::SimulationError;
use crate::league::{League, Team};
use crate::standings::{StandingsLedger, TeamStanding};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// What a team has locked in, ordered so that `upgrade` never
/// downgrades: an elimination is terminal and only ever replaces
/// `None`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum ClinchStatus {
    Out,
    None,
    Berth,
    Division,
    Bye,
}

impl ClinchStatus {
    pub fn upgrade(&mut self, to: ClinchStatus) {
        if to > *self {
            *self = to;
        }
    }

    pub fn is_playoff_bound(&self) -> bool {
        matches!(
            self,
            ClinchStatus::Berth | ClinchStatus::Division | ClinchStatus::Bye
        )
    }
}

/// Division, conference and league ranks for one standing snapshot,
/// plus the postseason flags stamped onto the final (week 19) row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamRanking {
    pub team_id: u32,
    pub week_number: u8,
    pub division_ranking: u8,
    pub conference_ranking: u8,
    pub power_ranking: u8,
    pub clinch: ClinchStatus,
    pub won_wildcard: bool,
    pub won_divisional: bool,
    pub won_conference: bool,
    pub won_championship: bool,
}

impl TeamRanking {
    fn new(team_id: u32, week_number: u8, clinch: ClinchStatus) -> Self {
        TeamRanking {
            team_id,
            week_number,
            division_ranking: 0,
            conference_ranking: 0,
            power_ranking: 0,
            clinch,
            won_wildcard: false,
            won_divisional: false,
            won_conference: false,
            won_championship: false,
        }
    }
}

/// Ranking rows keyed 1:1 to standing snapshots.
#[derive(Debug, Default)]
pub struct RankingStorage {
    rows: HashMap<(u32, u8), TeamRanking>,
}

impl RankingStorage {
    pub fn new() -> Self {
        RankingStorage::default()
    }

    pub fn get(&self, team_id: u32, week_number: u8) -> Result<&TeamRanking, SimulationError> {
        self.rows
            .get(&(team_id, week_number))
            .ok_or(SimulationError::MissingRanking {
                team_id,
                week_number,
            })
    }

    pub fn get_mut(
        &mut self,
        team_id: u32,
        week_number: u8,
    ) -> Result<&mut TeamRanking, SimulationError> {
        self.rows
            .get_mut(&(team_id, week_number))
            .ok_or(SimulationError::MissingRanking {
                team_id,
                week_number,
            })
    }

    pub fn find(&self, team_id: u32, week_number: u8) -> Option<&TeamRanking> {
        self.rows.get(&(team_id, week_number))
    }

    /// Ranks every team's snapshot for the target week: a division
    /// pass, a conference pass that seats the four division leaders
    /// first, and a league-wide power pass. New rows carry the previous
    /// week's clinch status forward.
    pub fn update(
        &mut self,
        league: &League,
        ledger: &StandingsLedger,
        target_week: u8,
    ) -> Result<(), SimulationError> {
        let mut rows: HashMap<u32, TeamRanking> = league
            .teams
            .iter()
            .map(|team| {
                let carried = self
                    .find(team.id, target_week - 1)
                    .map(|prior| prior.clinch)
                    .unwrap_or(ClinchStatus::None);
                (team.id, TeamRanking::new(team.id, target_week, carried))
            })
            .collect();

        // Division pass.
        for division in &league.divisions {
            let mut entries = self.collect(league, ledger, division.id, target_week)?;
            entries.sort_by(|a, b| standings_order(a, b));

            for (entry, rank) in entries
                .iter()
                .zip(dense_ranks(&entries, standings_order))
            {
                rows.get_mut(&entry.0.id).unwrap().division_ranking = rank;
            }
        }

        // Conference pass: division leaders take 1-4, the rest are
        // ranked among themselves and offset past them.
        for conference in &league.conferences {
            let mut leaders = Vec::new();
            let mut rest = Vec::new();

            for division in league.conference_divisions(conference.id) {
                for entry in self.collect(league, ledger, division.id, target_week)? {
                    if rows[&entry.0.id].division_ranking == 1 {
                        leaders.push(entry);
                    } else {
                        rest.push(entry);
                    }
                }
            }

            leaders.sort_by(|a, b| standings_order(a, b));
            rest.sort_by(|a, b| standings_order(a, b));

            let leader_count = leaders.len() as u8;
            for (entry, rank) in leaders
                .iter()
                .zip(dense_ranks(&leaders, standings_order))
            {
                rows.get_mut(&entry.0.id).unwrap().conference_ranking = rank;
            }
            for (entry, rank) in rest.iter().zip(dense_ranks(&rest, standings_order)) {
                rows.get_mut(&entry.0.id).unwrap().conference_ranking =
                    rank + leader_count;
            }
        }

        // Power pass over the whole league.
        let mut entries: Vec<(&Team, &TeamStanding)> = Vec::with_capacity(32);
        for team in &league.teams {
            entries.push((team, ledger.get(team.id, target_week)?));
        }
        entries.sort_by(|a, b| power_order(a, b));

        for (entry, rank) in entries.iter().zip(dense_ranks(&entries, power_order)) {
            rows.get_mut(&entry.0.id).unwrap().power_ranking = rank;
        }

        for (team_id, row) in rows {
            self.rows.insert((team_id, target_week), row);
        }

        Ok(())
    }

    fn collect<'a>(
        &self,
        league: &'a League,
        ledger: &'a StandingsLedger,
        division_id: u32,
        week_number: u8,
    ) -> Result<Vec<(&'a Team, &'a TeamStanding)>, SimulationError> {
        let mut entries = Vec::with_capacity(4);

        for team in league.division_teams(division_id) {
            entries.push((team, ledger.get(team.id, week_number)?));
        }

        Ok(entries)
    }
}

/// The division/conference ordering: record first, then points, with
/// the location name as the deterministic last word.
fn standings_order(a: &(&Team, &TeamStanding), b: &(&Team, &TeamStanding)) -> Ordering {
    b.1.wins
        .cmp(&a.1.wins)
        .then(a.1.losses.cmp(&b.1.losses))
        .then(b.1.points_for.cmp(&a.1.points_for))
        .then(a.1.points_against.cmp(&b.1.points_against))
        .then(a.0.location.cmp(&b.0.location))
}

fn power_order(a: &(&Team, &TeamStanding), b: &(&Team, &TeamStanding)) -> Ordering {
    b.1.wins
        .cmp(&a.1.wins)
        .then(a.1.losses.cmp(&b.1.losses))
        .then(a.0.overall_rating.cmp(&b.0.overall_rating))
        .then(b.1.streak.cmp(&a.1.streak))
        .then(b.1.points_for.cmp(&a.1.points_for))
        .then(a.1.points_against.cmp(&b.1.points_against))
        .then(a.0.location.cmp(&b.0.location))
}

/// 1-based dense ranks over an already sorted slice: equal entries
/// share a rank and the next distinct entry takes the following one.
fn dense_ranks<T>(sorted: &[T], cmp: impl Fn(&T, &T) -> Ordering) -> Vec<u8> {
    let mut ranks = Vec::with_capacity(sorted.len());
    let mut rank = 0u8;

    for (index, item) in sorted.iter().enumerate() {
        if index == 0 || cmp(&sorted[index - 1], item) != Ordering::Equal {
            rank += 1;
        }
        ranks.push(rank);
    }

    ranks
}
