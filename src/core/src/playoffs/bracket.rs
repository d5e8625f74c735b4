use crate::error::SimulationError;
use crate::league::League;
use crate::matchup::MatchupStorage;
use crate::season::Season;
use crate::standings::{ClinchStatus, RankingStorage};
use log::info;
use rand::Rng;
use std::fmt;

/// The week whose snapshot holds the final regular-season standings;
/// playoff results are stamped onto its ranking rows.
pub const FINAL_STANDINGS_WEEK: u8 = 19;

pub const WILDCARD_WEEK: u8 = 19;
pub const CHAMPIONSHIP_WEEK: u8 = 22;

pub const PLAYOFF_SEEDS_PER_CONFERENCE: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayoffRound {
    Wildcard,
    Divisional,
    Conference,
    Championship,
}

impl PlayoffRound {
    pub fn for_week(week_number: u8) -> Option<Self> {
        match week_number {
            19 => Some(PlayoffRound::Wildcard),
            20 => Some(PlayoffRound::Divisional),
            21 => Some(PlayoffRound::Conference),
            22 => Some(PlayoffRound::Championship),
            _ => None,
        }
    }

    pub fn week_number(&self) -> u8 {
        match self {
            PlayoffRound::Wildcard => 19,
            PlayoffRound::Divisional => 20,
            PlayoffRound::Conference => 21,
            PlayoffRound::Championship => 22,
        }
    }
}

impl fmt::Display for PlayoffRound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlayoffRound::Wildcard => "wildcard",
            PlayoffRound::Divisional => "divisional",
            PlayoffRound::Conference => "conference",
            PlayoffRound::Championship => "championship",
        };
        write!(f, "{}", name)
    }
}

/// Per conference, the playoff field ordered by final conference
/// ranking.
pub fn playoff_seeds(
    league: &League,
    rankings: &RankingStorage,
) -> Result<Vec<Vec<u32>>, SimulationError> {
    let mut seeds = Vec::with_capacity(2);

    for conference in &league.conferences {
        let mut field: Vec<(u8, u32)> = Vec::with_capacity(PLAYOFF_SEEDS_PER_CONFERENCE);

        for team in league.conference_teams(conference.id) {
            let row = rankings.get(team.id, FINAL_STANDINGS_WEEK)?;
            if row.clinch != ClinchStatus::Out {
                field.push((row.conference_ranking, team.id));
            }
        }

        field.sort();
        debug_assert_eq!(field.len(), PLAYOFF_SEEDS_PER_CONFERENCE);

        seeds.push(field.into_iter().map(|(_, team_id)| team_id).collect());
    }

    Ok(seeds)
}

/// Wildcard round: seed 1 rests; 2 hosts 7, 3 hosts 6, 4 hosts 5.
pub fn generate_wildcard_round(
    league: &League,
    season: &Season,
    matchups: &mut MatchupStorage,
    rankings: &RankingStorage,
) -> Result<(), SimulationError> {
    let week_number = season.week_number + 1;

    for seeds in playoff_seeds(league, rankings)? {
        for (host, visitor) in [(1, 6), (2, 5), (3, 4)] {
            matchups.add(
                league,
                seeds[host],
                seeds[visitor],
                week_number,
                season.current_date,
                true,
            );
        }
    }

    Ok(())
}

/// Simulates the current round's matchups and stamps the winners'
/// round flag on their final-standings ranking row.
pub fn simulate_round(
    matchups: &mut MatchupStorage,
    rankings: &mut RankingStorage,
    round: PlayoffRound,
    rng: &mut impl Rng,
) -> Result<Vec<u32>, SimulationError> {
    let week_number = round.week_number();
    let mut winners = Vec::new();

    for matchup in matchups.week_mut(week_number) {
        matchup.simulate(rng);
        // Overtime rules guarantee a postseason winner.
        winners.push(matchup.winner().unwrap());
    }

    for &winner in &winners {
        let row = rankings.get_mut(winner, FINAL_STANDINGS_WEEK)?;
        match round {
            PlayoffRound::Wildcard => row.won_wildcard = true,
            PlayoffRound::Divisional => row.won_divisional = true,
            PlayoffRound::Conference => row.won_conference = true,
            PlayoffRound::Championship => row.won_championship = true,
        }
    }

    Ok(winners)
}

/// Generates the round following the one just played, seeding
/// survivors by conference ranking.
pub fn generate_next_round(
    league: &League,
    season: &Season,
    matchups: &mut MatchupStorage,
    rankings: &RankingStorage,
    round_played: PlayoffRound,
    winners: &[u32],
) -> Result<(), SimulationError> {
    let week_number = season.week_number + 1;

    match round_played {
        PlayoffRound::Wildcard => {
            // Seed 1 returns; best remaining hosts the worst, the
            // middle two meet.
            for seeds in playoff_seeds(league, rankings)? {
                let survivors: Vec<u32> = seeds
                    .iter()
                    .copied()
                    .filter(|team_id| *team_id == seeds[0] || winners.contains(team_id))
                    .collect();
                debug_assert_eq!(survivors.len(), 4);

                info!(
                    "🏆 divisional round set for {}",
                    league.conference_of(survivors[0]).unwrap().name
                );

                matchups.add(
                    league,
                    survivors[0],
                    survivors[3],
                    week_number,
                    season.current_date,
                    true,
                );
                matchups.add(
                    league,
                    survivors[1],
                    survivors[2],
                    week_number,
                    season.current_date,
                    true,
                );
            }
        }
        PlayoffRound::Divisional => {
            for seeds in playoff_seeds(league, rankings)? {
                let survivors: Vec<u32> = seeds
                    .iter()
                    .copied()
                    .filter(|team_id| winners.contains(team_id))
                    .collect();
                debug_assert_eq!(survivors.len(), 2);

                matchups.add(
                    league,
                    survivors[0],
                    survivors[1],
                    week_number,
                    season.current_date,
                    true,
                );
            }
        }
        PlayoffRound::Conference => {
            // The two conference champions; the first conference's
            // champion hosts.
            debug_assert_eq!(winners.len(), 2);

            matchups.add(
                league,
                winners[0],
                winners[1],
                week_number,
                season.current_date,
                true,
            );
        }
        PlayoffRound::Championship => {}
    }

    Ok(())
}
