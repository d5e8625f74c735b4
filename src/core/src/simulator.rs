use crate::error::SimulationError;
use crate::league::League;
use crate::schedule::ScheduleGenerator;
use crate::season::{AdvanceOutcome, Season, SeasonData, advance_by_weeks};
use chrono::NaiveDate;
use log::info;
use rand::Rng;

/// Root of everything the engine owns: the league graph and every
/// season simulated so far.
#[derive(Debug)]
pub struct SimulatorData {
    pub league: League,
    pub seasons: Vec<SeasonData>,
}

impl SimulatorData {
    pub fn current_season(&self) -> Option<&SeasonData> {
        self.seasons.iter().find(|s| s.season.is_current)
    }

    pub fn current_season_mut(&mut self) -> Option<&mut SeasonData> {
        self.seasons.iter_mut().find(|s| s.season.is_current)
    }

    pub fn season(&self, season_number: u16) -> Option<&SeasonData> {
        self.seasons
            .iter()
            .find(|s| s.season.season_number == season_number)
    }
}

/// The two operations the engine exposes to its collaborators:
/// starting a league (which generates the first schedule) and
/// advancing the current season.
pub struct LeagueSimulator;

impl LeagueSimulator {
    pub fn start(
        league: League,
        start_date: NaiveDate,
        rng: &mut impl Rng,
    ) -> Result<SimulatorData, SimulationError> {
        info!("🏟️ Starting league: {}", league.name);

        let schedule = ScheduleGenerator::generate(&league, rng)?;
        let season = Season::new(league.id, 1, start_date);
        let data = SeasonData::create(&league, season, &schedule);

        Ok(SimulatorData {
            league,
            seasons: vec![data],
        })
    }

    /// Advances the current season by up to `requested_weeks` weeks
    /// (`0` = to the end of the phase). The caller is expected to
    /// serialize calls per league; weeks are processed strictly in
    /// order within a call.
    pub fn advance(
        data: &mut SimulatorData,
        requested_weeks: u8,
        rng: &mut impl Rng,
    ) -> Result<AdvanceOutcome, SimulationError> {
        let SimulatorData { league, seasons } = data;

        advance_by_weeks(league, seasons, requested_weeks, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::league::LeagueGenerator;
    use crate::matchup::Matchup;
    use crate::playoffs::{FINAL_STANDINGS_WEEK, WILDCARD_WEEK, playoff_seeds};
    use crate::schedule::REGULAR_SEASON_WEEKS;
    use crate::season::{MessageSeverity, SeasonPhase};
    use crate::standings::ClinchStatus;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn started_league(seed: u64) -> (SimulatorData, StdRng) {
        let mut rng = StdRng::seed_from_u64(seed);
        let league = LeagueGenerator::generate(1, &mut rng);
        let data = LeagueSimulator::start(
            league,
            NaiveDate::from_ymd_opt(2026, 8, 29).unwrap(),
            &mut rng,
        )
        .unwrap();

        (data, rng)
    }

    #[test]
    fn test_single_week_advance_updates_everything() {
        let (mut data, mut rng) = started_league(101);

        let outcome = LeagueSimulator::advance(&mut data, 1, &mut rng).unwrap();

        assert_eq!(outcome.weeks_advanced, 1);
        assert_eq!(outcome.severity, MessageSeverity::Success);
        assert_eq!(outcome.message, "Advanced regular season by 1 week(s).");

        let season_data = data.current_season().unwrap();
        assert_eq!(season_data.season.week_number, 2);
        assert_eq!(
            season_data.season.current_date,
            NaiveDate::from_ymd_opt(2026, 9, 5).unwrap()
        );

        // Every week-1 matchup is final and every team has a week-2
        // snapshot with a ranking.
        assert!(season_data.matchups.week(1).all(|m| m.is_final()));
        for team in &data.league.teams {
            let standing = season_data.standings.get(team.id, 2).unwrap();
            assert!(standing.games_played() <= 1);
            season_data.rankings.get(team.id, 2).unwrap();
        }
    }

    #[test]
    fn test_weekly_totals_are_conserved() {
        let (mut data, mut rng) = started_league(102);

        LeagueSimulator::advance(&mut data, 1, &mut rng).unwrap();

        let season_data = data.current_season().unwrap();
        let snapshots = season_data.standings.week_snapshots(2);

        let wins: u32 = snapshots.iter().map(|s| s.wins as u32).sum();
        let losses: u32 = snapshots.iter().map(|s| s.losses as u32).sum();
        let ties: u32 = snapshots.iter().map(|s| s.ties as u32).sum();
        let points_for: u32 = snapshots.iter().map(|s| s.points_for).sum();
        let points_against: u32 = snapshots.iter().map(|s| s.points_against).sum();

        assert_eq!(wins, losses);
        assert_eq!(ties % 2, 0);
        assert_eq!(points_for, points_against);
    }

    #[test]
    fn test_trailing_five_spans_five_games_mid_season() {
        let (mut data, mut rng) = started_league(103);

        LeagueSimulator::advance(&mut data, 11, &mut rng).unwrap();

        let season_data = data.current_season().unwrap();
        for team in &data.league.teams {
            let standing = season_data.standings.get(team.id, 12).unwrap();
            let span = standing.last_5_wins + standing.last_5_losses + standing.last_5_ties;
            assert_eq!(span, 5, "team {} trailing split covers {}", team.id, span);
        }
    }

    #[test]
    fn test_regular_season_rolls_into_playoffs() {
        let (mut data, mut rng) = started_league(104);

        let outcome = LeagueSimulator::advance(&mut data, 0, &mut rng).unwrap();

        assert_eq!(outcome.weeks_advanced, REGULAR_SEASON_WEEKS);
        assert!(outcome.message.contains("postseason has begun"));

        let season_data = data.current_season().unwrap();
        assert_eq!(season_data.season.phase, SeasonPhase::Playoffs);
        assert_eq!(season_data.season.week_number, 19);

        // Three wildcard matchups per conference, none involving a top
        // seed.
        let wildcard: Vec<&Matchup> = season_data.matchups.week(WILDCARD_WEEK).collect();
        assert_eq!(wildcard.len(), 6);
        assert!(wildcard.iter().all(|m| m.is_postseason));

        let seeds = playoff_seeds(&data.league, &season_data.rankings).unwrap();
        for conference_seeds in &seeds {
            assert_eq!(conference_seeds.len(), 7);
            assert!(!wildcard.iter().any(|m| m.involves(conference_seeds[0])));
        }

        // Final clinches partition the league.
        for team in &data.league.teams {
            let row = season_data
                .rankings
                .get(team.id, FINAL_STANDINGS_WEEK)
                .unwrap();
            assert_ne!(row.clinch, ClinchStatus::None);
        }
    }

    #[test]
    fn test_playoffs_produce_one_champion() {
        let (mut data, mut rng) = started_league(105);

        LeagueSimulator::advance(&mut data, 0, &mut rng).unwrap();
        let outcome = LeagueSimulator::advance(&mut data, 0, &mut rng).unwrap();

        assert_eq!(outcome.weeks_advanced, 4);
        assert!(outcome.message.contains("entered the offseason"));

        let season_data = data.current_season().unwrap();
        assert_eq!(season_data.season.phase, SeasonPhase::Offseason);
        assert_eq!(season_data.season.week_number, 23);

        // Bracket sizes per round, and exactly one champion stamped.
        assert_eq!(season_data.matchups.week(20).count(), 4);
        assert_eq!(season_data.matchups.week(21).count(), 2);
        assert_eq!(season_data.matchups.week(22).count(), 1);

        let champions: Vec<u32> = data
            .league
            .teams
            .iter()
            .filter(|team| {
                season_data
                    .rankings
                    .get(team.id, FINAL_STANDINGS_WEEK)
                    .unwrap()
                    .won_championship
            })
            .map(|team| team.id)
            .collect();
        assert_eq!(champions.len(), 1);

        // The champion won the final.
        let final_game = season_data.matchups.week(22).next().unwrap();
        assert_eq!(final_game.winner().unwrap(), champions[0]);
    }

    #[test]
    fn test_offseason_rolls_over_to_a_new_season() {
        let (mut data, mut rng) = started_league(106);

        LeagueSimulator::advance(&mut data, 0, &mut rng).unwrap();
        LeagueSimulator::advance(&mut data, 0, &mut rng).unwrap();
        let outcome = LeagueSimulator::advance(&mut data, 1, &mut rng).unwrap();

        assert_eq!(outcome.weeks_advanced, 1);
        assert_eq!(outcome.message, "A new season has begun.");

        assert_eq!(data.seasons.len(), 2);

        let retired = data.season(1).unwrap();
        assert!(!retired.season.is_current);

        let successor = data.current_season().unwrap();
        assert_eq!(successor.season.season_number, 2);
        assert_eq!(successor.season.phase, SeasonPhase::RegularSeason);
        assert_eq!(successor.season.week_number, 1);
        assert_eq!(successor.matchups.all().len(), 272);
        assert_eq!(
            successor.season.start_date,
            retired.season.start_date + chrono::Duration::days(365)
        );

        for team in &data.league.teams {
            assert_eq!(
                successor.standings.get(team.id, 1).unwrap().games_played(),
                0
            );
        }
    }

    #[test]
    fn test_unsupported_phase_is_a_warning_no_op() {
        let (mut data, mut rng) = started_league(107);

        data.current_season_mut().unwrap().season.phase = SeasonPhase::Draft;

        let outcome = LeagueSimulator::advance(&mut data, 3, &mut rng).unwrap();

        assert_eq!(outcome.weeks_advanced, 0);
        assert_eq!(outcome.severity, MessageSeverity::Warning);
        assert_eq!(
            outcome.message,
            "Sorry, we aren't in the right part of the season for that!"
        );

        // Nothing moved.
        let season_data = data.current_season().unwrap();
        assert_eq!(season_data.season.week_number, 1);
        assert!(season_data.matchups.week(1).all(|m| !m.is_final()));
    }

    #[test]
    fn test_requested_weeks_clamp_to_phase_end() {
        let (mut data, mut rng) = started_league(108);

        let outcome = LeagueSimulator::advance(&mut data, 50, &mut rng).unwrap();

        assert_eq!(outcome.weeks_advanced, REGULAR_SEASON_WEEKS);
        assert_eq!(
            data.current_season().unwrap().season.phase,
            SeasonPhase::Playoffs
        );
    }
}
