use crate::error::SimulationError;
use crate::league::League;
use crate::standings::{ClinchStatus, RankingStorage, StandingsLedger, TeamStanding};
use log::debug;

/// No team can clinch or be eliminated before 8 games of a 17-game
/// season have been played.
pub const CLINCH_START_WEEK: u8 = 8;

/// How many win-equivalents the trailing side is behind.
pub fn games_back(leader: &TeamStanding, rival: &TeamStanding) -> f32 {
    leader.win_equivalents() - rival.win_equivalents()
}

/// A lead is decisive once the rival cannot make it up with the games
/// it has left.
pub fn is_out_of_reach(leader: &TeamStanding, rival: &TeamStanding) -> bool {
    games_back(leader, rival) > rival.games_left() as f32
}

/// Re-evaluates division titles, conference byes, wildcard berths and
/// eliminations against the target week's snapshots.
pub fn update_running_clinches(
    league: &League,
    ledger: &StandingsLedger,
    rankings: &mut RankingStorage,
    target_week: u8,
) -> Result<(), SimulationError> {
    // Division titles: rank 1 against rank 2 in the same division.
    for division in &league.divisions {
        let teams: Vec<u32> = league
            .division_teams(division.id)
            .iter()
            .map(|t| t.id)
            .collect();

        let leader = team_with_rank(&teams, rankings, target_week, 1, RankScope::Division)?;
        let runner_up = team_with_rank(&teams, rankings, target_week, 2, RankScope::Division)?;

        let (Some(leader), Some(runner_up)) = (leader, runner_up) else {
            continue;
        };

        if rankings.get(leader, target_week)?.clinch >= ClinchStatus::Division {
            continue;
        }

        if is_out_of_reach(ledger.get(leader, target_week)?, ledger.get(runner_up, target_week)?) {
            debug!("team {} clinched its division", leader);
            rankings
                .get_mut(leader, target_week)?
                .clinch
                .upgrade(ClinchStatus::Division);
        }
    }

    // Conference byes: rank 1 against rank 2 in the same conference.
    for conference in &league.conferences {
        let teams: Vec<u32> = league
            .conference_teams(conference.id)
            .iter()
            .map(|t| t.id)
            .collect();

        let leader = team_with_rank(&teams, rankings, target_week, 1, RankScope::Conference)?;
        let second = team_with_rank(&teams, rankings, target_week, 2, RankScope::Conference)?;

        let (Some(leader), Some(second)) = (leader, second) else {
            continue;
        };

        if rankings.get(leader, target_week)?.clinch < ClinchStatus::Bye
            && is_out_of_reach(ledger.get(leader, target_week)?, ledger.get(second, target_week)?)
        {
            debug!("team {} clinched the conference bye", leader);
            rankings
                .get_mut(leader, target_week)?
                .clinch
                .upgrade(ClinchStatus::Bye);
        }
    }

    // Wildcard berths and eliminations: the top seven measure against
    // rank 8, everyone below measures against rank 7.
    for conference in &league.conferences {
        let teams: Vec<u32> = league
            .conference_teams(conference.id)
            .iter()
            .map(|t| t.id)
            .collect();

        let rank_7 = team_with_rank(&teams, rankings, target_week, 7, RankScope::Conference)?;
        let rank_8 = team_with_rank(&teams, rankings, target_week, 8, RankScope::Conference)?;

        let (Some(rank_7), Some(rank_8)) = (rank_7, rank_8) else {
            continue;
        };

        for &team_id in &teams {
            let row = rankings.get(team_id, target_week)?;

            if row.conference_ranking <= 7 && row.clinch == ClinchStatus::None {
                if is_out_of_reach(
                    ledger.get(team_id, target_week)?,
                    ledger.get(rank_8, target_week)?,
                ) {
                    debug!("team {} clinched a playoff berth", team_id);
                    rankings
                        .get_mut(team_id, target_week)?
                        .clinch
                        .upgrade(ClinchStatus::Berth);
                }
            } else if row.conference_ranking >= 8 && row.clinch == ClinchStatus::None {
                if is_out_of_reach(
                    ledger.get(rank_7, target_week)?,
                    ledger.get(team_id, target_week)?,
                ) {
                    debug!("team {} is eliminated", team_id);
                    rankings.get_mut(team_id, target_week)?.clinch = ClinchStatus::Out;
                }
            }
        }
    }

    Ok(())
}

/// End-of-season pass over the final snapshot week: every team lands in
/// exactly one category by rank, superseding the running values.
pub fn finalize_clinches(
    league: &League,
    rankings: &mut RankingStorage,
    final_week: u8,
) -> Result<(), SimulationError> {
    for team in &league.teams {
        let row = rankings.get_mut(team.id, final_week)?;

        row.clinch = if row.conference_ranking == 1 {
            ClinchStatus::Bye
        } else if row.division_ranking == 1 {
            ClinchStatus::Division
        } else if row.conference_ranking <= 7 {
            ClinchStatus::Berth
        } else {
            ClinchStatus::Out
        };
    }

    Ok(())
}

enum RankScope {
    Division,
    Conference,
}

fn team_with_rank(
    teams: &[u32],
    rankings: &RankingStorage,
    week_number: u8,
    rank: u8,
    scope: RankScope,
) -> Result<Option<u32>, SimulationError> {
    for &team_id in teams {
        let row = rankings.get(team_id, week_number)?;
        let matches = match scope {
            RankScope::Division => row.division_ranking == rank,
            RankScope::Conference => row.conference_ranking == rank,
        };
        if matches {
            return Ok(Some(team_id));
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::league::LeagueGenerator;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_games_back_arithmetic() {
        let mut leader = TeamStanding::new(1, 11);
        leader.wins = 10;

        let mut rival = TeamStanding::new(2, 11);
        rival.wins = 2;
        rival.losses = 8;

        // 8 back with 7 to play: over.
        assert_eq!(games_back(&leader, &rival), 8.0);
        assert_eq!(rival.games_left(), 7);
        assert!(is_out_of_reach(&leader, &rival));
    }

    #[test]
    fn test_ties_count_as_half_wins() {
        let mut leader = TeamStanding::new(1, 11);
        leader.wins = 7;
        leader.ties = 2;
        leader.losses = 1;

        let mut rival = TeamStanding::new(2, 11);
        rival.wins = 5;
        rival.losses = 5;

        assert_eq!(games_back(&leader, &rival), 3.0);
        assert!(!is_out_of_reach(&leader, &rival));
    }

    fn crafted_league_state(
        league: &League,
    ) -> (StandingsLedger, RankingStorage) {
        let mut ledger = StandingsLedger::new();

        // Division 1 holds the 10-0 runaway and its 2-8 chaser; every
        // other division leads with 2-8 over 1-9 teams so the runaway
        // also laps the conference.
        for (division_index, division) in league.divisions.iter().enumerate() {
            let records: [(u8, u8); 4] = if division_index == 0 {
                [(10, 0), (2, 8), (2, 8), (1, 9)]
            } else {
                [(2, 8), (1, 9), (1, 9), (1, 9)]
            };

            for (team, (wins, losses)) in
                league.division_teams(division.id).iter().zip(records)
            {
                let mut standing = TeamStanding::new(team.id, 11);
                standing.wins = wins;
                standing.losses = losses;
                standing.points_for = 300 - team.id;
                standing.points_against = 200;
                ledger.insert(standing).unwrap();
            }
        }

        let mut rankings = RankingStorage::new();
        rankings.update(league, &ledger, 11).unwrap();

        (ledger, rankings)
    }

    #[test]
    fn test_runaway_leader_clinches_division_and_bye() {
        let mut rng = StdRng::seed_from_u64(61);
        let league = LeagueGenerator::generate(1, &mut rng);
        let (ledger, mut rankings) = crafted_league_state(&league);

        update_running_clinches(&league, &ledger, &mut rankings, 11).unwrap();

        let leader = league.division_teams(league.divisions[0].id)[0].id;
        assert_eq!(
            rankings.get(leader, 11).unwrap().clinch,
            ClinchStatus::Bye
        );

        // The 2-8 second place has clinched nothing.
        let chaser = league.division_teams(league.divisions[0].id)[1].id;
        assert_eq!(
            rankings.get(chaser, 11).unwrap().clinch,
            ClinchStatus::None
        );
    }

    #[test]
    fn test_final_clinches_partition_the_league() {
        let mut rng = StdRng::seed_from_u64(62);
        let league = LeagueGenerator::generate(1, &mut rng);
        let (_, mut rankings) = crafted_league_state(&league);

        finalize_clinches(&league, &mut rankings, 11).unwrap();

        for conference in &league.conferences {
            let teams = league.conference_teams(conference.id);

            let byes = teams
                .iter()
                .filter(|t| {
                    rankings.get(t.id, 11).unwrap().clinch == ClinchStatus::Bye
                })
                .count();
            let playoff_bound = teams
                .iter()
                .filter(|t| rankings.get(t.id, 11).unwrap().clinch.is_playoff_bound())
                .count();
            let out = teams
                .iter()
                .filter(|t| {
                    rankings.get(t.id, 11).unwrap().clinch == ClinchStatus::Out
                })
                .count();

            assert_eq!(byes, 1);
            assert_eq!(playoff_bound, 7);
            assert_eq!(out, 9);
        }
    }
}
