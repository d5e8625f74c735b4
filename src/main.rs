use chrono::NaiveDate;
use core::utils::TimeEstimation;
use core::{LeagueGenerator, LeagueSimulator, SeasonData, SeasonPhase};
use env_logger::Env;
use log::info;

fn main() {
    color_eyre::install().unwrap();

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let mut rng = rand::rng();

    let league = LeagueGenerator::generate(1, &mut rng);
    let start_date = NaiveDate::from_ymd_opt(2026, 8, 29).unwrap();

    let (data, estimated) =
        TimeEstimation::estimate(|| LeagueSimulator::start(league, start_date, &mut rng));
    let mut data = data.unwrap();

    info!("first schedule generated: {} ms", estimated);

    const SEASONS: usize = 3;

    while data.seasons.len() <= SEASONS {
        let outcome = LeagueSimulator::advance(&mut data, 0, &mut rng).unwrap();
        info!("{}", outcome.message);

        if let Some(season_data) = data.current_season() {
            if season_data.season.phase == SeasonPhase::Playoffs {
                print_standings(&data, season_data);
            }
        }
    }
}

fn print_standings(data: &core::SimulatorData, season_data: &SeasonData) {
    let final_week = season_data.season.week_number;

    println!(
        "\nSeason {} final standings",
        season_data.season.season_number
    );

    for division in &data.league.divisions {
        println!("\n  {}", division.name);

        let mut rows: Vec<_> = data
            .league
            .division_teams(division.id)
            .into_iter()
            .map(|team| {
                let standing = season_data.standings.get(team.id, final_week).unwrap();
                let ranking = season_data.rankings.get(team.id, final_week).unwrap();
                (ranking.division_ranking, team, standing)
            })
            .collect();
        rows.sort_by_key(|(rank, _, _)| *rank);

        for (_, team, standing) in rows {
            println!(
                "    {:<24} {:>2}-{:>2}-{:>2}  PF {:>3}  PA {:>3}",
                team.name(),
                standing.wins,
                standing.losses,
                standing.ties,
                standing.points_for,
                standing.points_against
            );
        }
    }

    println!();
}
