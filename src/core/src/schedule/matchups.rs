use crate::league::League;
use itertools::Itertools;
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashMap;

/// A matchup with a decided home site, not yet assigned to a week.
#[derive(Debug, Clone)]
pub struct PlannedMatchup {
    pub home_team_id: u32,
    pub away_team_id: u32,
}

/// Builds the full 272-game multiset for one season:
/// 6 divisional games, 6 intra-conference cross-division games and
/// 5 inter-conference games per team, 17 in total.
pub fn build_matchup_set(league: &League, rng: &mut impl Rng) -> Vec<PlannedMatchup> {
    let mut matchups = Vec::with_capacity(272);
    let mut balance = OrientationBalancer::default();

    divisional_round_robin(league, &mut matchups);

    for conference in &league.conferences {
        intra_conference_games(league, conference.id, &mut matchups, &mut balance, rng);
    }

    cross_conference_games(league, &mut matchups, &mut balance, rng);

    matchups
}

/// Every pair of division rivals plays home and home.
fn divisional_round_robin(league: &League, matchups: &mut Vec<PlannedMatchup>) {
    for division in &league.divisions {
        let teams = league.division_teams(division.id);

        for (a, b) in teams.iter().tuple_combinations() {
            matchups.push(PlannedMatchup {
                home_team_id: a.id,
                away_team_id: b.id,
            });
            matchups.push(PlannedMatchup {
                home_team_id: b.id,
                away_team_id: a.id,
            });
        }
    }
}

/// The conference's divisions are shuffled into two pairs. Each team
/// plays its paired division in full, plus one index-matched game
/// against each division of the other pair.
fn intra_conference_games(
    league: &League,
    conference_id: u32,
    matchups: &mut Vec<PlannedMatchup>,
    balance: &mut OrientationBalancer,
    rng: &mut impl Rng,
) {
    let mut divisions = league.conference_divisions(conference_id);
    divisions.shuffle(rng);

    let (pair_a, pair_b) = divisions.split_at(2);

    for pair in [pair_a, pair_b] {
        cross_division_round(league, pair[0].id, pair[1].id, matchups);
    }

    for division_a in pair_a {
        for division_b in pair_b {
            zipped_games(league, division_a.id, division_b.id, matchups, balance);
        }
    }
}

/// Both conferences' division lists are shuffled and zipped into four
/// full cross-division rounds, then the zip is rotated by one division
/// for the seventeenth game.
fn cross_conference_games(
    league: &League,
    matchups: &mut Vec<PlannedMatchup>,
    balance: &mut OrientationBalancer,
    rng: &mut impl Rng,
) {
    let mut divisions_a = league.conference_divisions(league.conferences[0].id);
    let mut divisions_b = league.conference_divisions(league.conferences[1].id);
    divisions_a.shuffle(rng);
    divisions_b.shuffle(rng);

    for (division_a, division_b) in divisions_a.iter().zip(divisions_b.iter()) {
        cross_division_round(league, division_a.id, division_b.id, matchups);
    }

    for (i, division_a) in divisions_a.iter().enumerate() {
        let division_b = divisions_b[(i + 1) % divisions_b.len()];
        zipped_games(league, division_a.id, division_b.id, matchups, balance);
    }
}

/// Full 4x4 round between two divisions, home sites alternating on the
/// row/column parity of the pairing so every team gets 2 home and
/// 2 away games.
fn cross_division_round(
    league: &League,
    division_a: u32,
    division_b: u32,
    matchups: &mut Vec<PlannedMatchup>,
) {
    let teams_a = league.division_teams(division_a);
    let teams_b = league.division_teams(division_b);

    let mut team_counter = 1;
    for team in &teams_a {
        let mut opp_counter = 1;
        for opponent in &teams_b {
            let mut pair = if team_counter % 2 == 0 {
                (team.id, opponent.id)
            } else {
                (opponent.id, team.id)
            };

            if opp_counter % 2 != 0 {
                pair = (pair.1, pair.0);
            }

            matchups.push(PlannedMatchup {
                home_team_id: pair.0,
                away_team_id: pair.1,
            });

            opp_counter += 1;
        }
        team_counter += 1;
    }
}

/// One game per team between two divisions, matching teams index by
/// index; the balance counter decides the home site.
fn zipped_games(
    league: &League,
    division_a: u32,
    division_b: u32,
    matchups: &mut Vec<PlannedMatchup>,
    balance: &mut OrientationBalancer,
) {
    let teams_a = league.division_teams(division_a);
    let teams_b = league.division_teams(division_b);

    for (team, opponent) in teams_a.iter().zip(teams_b.iter()) {
        let (home_team_id, away_team_id) = balance.orient(team.id, opponent.id);

        matchups.push(PlannedMatchup {
            home_team_id,
            away_team_id,
        });
    }
}

/// Running home/away counter for pairings that recombine teams outside
/// a fixed grid; the side that has hosted more so far travels.
#[derive(Default)]
struct OrientationBalancer {
    bias: HashMap<u32, i32>,
}

impl OrientationBalancer {
    fn orient(&mut self, a: u32, b: u32) -> (u32, u32) {
        let bias_a = self.bias.get(&a).copied().unwrap_or(0);
        let bias_b = self.bias.get(&b).copied().unwrap_or(0);

        let (home, away) = if bias_a > bias_b { (b, a) } else { (a, b) };

        *self.bias.entry(home).or_insert(0) += 1;
        *self.bias.entry(away).or_insert(0) -= 1;

        (home, away)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::league::LeagueGenerator;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;

    #[test]
    fn test_every_team_plays_seventeen_games() {
        let mut rng = StdRng::seed_from_u64(21);
        let league = LeagueGenerator::generate(1, &mut rng);
        let matchups = build_matchup_set(&league, &mut rng);

        assert_eq!(matchups.len(), 272);

        let mut games: HashMap<u32, u32> = HashMap::new();
        for matchup in &matchups {
            *games.entry(matchup.home_team_id).or_insert(0) += 1;
            *games.entry(matchup.away_team_id).or_insert(0) += 1;
        }

        assert_eq!(games.len(), 32);
        for (_, count) in games {
            assert_eq!(count, 17);
        }
    }

    #[test]
    fn test_game_type_split_per_team() {
        let mut rng = StdRng::seed_from_u64(22);
        let league = LeagueGenerator::generate(1, &mut rng);
        let matchups = build_matchup_set(&league, &mut rng);

        for team in &league.teams {
            let mut divisional = 0;
            let mut conference = 0;
            let mut non_conference = 0;

            for matchup in &matchups {
                if matchup.home_team_id != team.id && matchup.away_team_id != team.id {
                    continue;
                }
                let opponent = if matchup.home_team_id == team.id {
                    matchup.away_team_id
                } else {
                    matchup.home_team_id
                };

                if league.same_division(team.id, opponent) {
                    divisional += 1;
                } else if league.same_conference(team.id, opponent) {
                    conference += 1;
                } else {
                    non_conference += 1;
                }
            }

            assert_eq!(divisional, 6);
            assert_eq!(conference, 6);
            assert_eq!(non_conference, 5);
        }
    }

    #[test]
    fn test_division_rivals_split_home_sites() {
        let mut rng = StdRng::seed_from_u64(23);
        let league = LeagueGenerator::generate(1, &mut rng);
        let matchups = build_matchup_set(&league, &mut rng);

        for division in &league.divisions {
            let teams = league.division_teams(division.id);

            for (a, b) in teams.iter().tuple_combinations() {
                let a_hosts = matchups
                    .iter()
                    .filter(|m| m.home_team_id == a.id && m.away_team_id == b.id)
                    .count();
                let b_hosts = matchups
                    .iter()
                    .filter(|m| m.home_team_id == b.id && m.away_team_id == a.id)
                    .count();

                assert_eq!(a_hosts, 1);
                assert_eq!(b_hosts, 1);
            }
        }
    }

    #[test]
    fn test_home_sites_are_balanced() {
        let mut rng = StdRng::seed_from_u64(24);
        let league = LeagueGenerator::generate(1, &mut rng);
        let matchups = build_matchup_set(&league, &mut rng);

        let mut home_games: HashMap<u32, u32> = HashMap::new();
        for matchup in &matchups {
            *home_games.entry(matchup.home_team_id).or_insert(0) += 1;
        }

        for team in &league.teams {
            let home = home_games.get(&team.id).copied().unwrap_or(0);
            assert!(
                (7..=10).contains(&home),
                "team {} hosts {} of 17 games",
                team.abbreviation,
                home
            );
        }
    }
}
