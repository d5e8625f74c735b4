use crate::error::SimulationError;
use crate::league::League;
use crate::playoffs::{
    CHAMPIONSHIP_WEEK, PlayoffRound, generate_next_round, generate_wildcard_round,
    simulate_round,
};
use crate::schedule::{REGULAR_SEASON_WEEKS, ScheduleGenerator};
use crate::season::{AdvanceOutcome, Season, SeasonData, SeasonPhase};
use crate::standings::{CLINCH_START_WEEK, finalize_clinches, update_running_clinches};
use chrono::Duration;
use log::{debug, info};
use rand::Rng;

/// Advances the league's current season by up to `requested_weeks`
/// weeks; `0` means to the end of the current phase. Weeks run strictly
/// in order and each one is fully applied before the week counter
/// moves, so an error leaves the season at the last completed week.
pub fn advance_by_weeks(
    league: &League,
    seasons: &mut Vec<SeasonData>,
    requested_weeks: u8,
    rng: &mut impl Rng,
) -> Result<AdvanceOutcome, SimulationError> {
    let Some(data) = seasons.iter_mut().find(|s| s.season.is_current) else {
        return Ok(AdvanceOutcome::warning(
            "There is no active season to advance.",
        ));
    };

    let phase = data.season.phase;
    let current_week = data.season.week_number;

    let week_limit = match phase {
        SeasonPhase::RegularSeason => REGULAR_SEASON_WEEKS + 1 - current_week,
        SeasonPhase::Playoffs => CHAMPIONSHIP_WEEK + 1 - current_week,
        SeasonPhase::Offseason => 1,
        _ => {
            return Ok(AdvanceOutcome::warning(
                "Sorry, we aren't in the right part of the season for that!",
            ));
        }
    };

    let weeks = if requested_weeks == 0 || requested_weeks > week_limit {
        week_limit
    } else {
        requested_weeks
    };

    info!(
        "🏈 Advancing season {} ({}) by {} week(s)",
        data.season.season_number, phase, weeks
    );

    let mut message = match phase {
        SeasonPhase::RegularSeason => {
            format!("Advanced regular season by {} week(s).", weeks)
        }
        SeasonPhase::Playoffs => format!("Advanced playoffs by {} week(s).", weeks),
        _ => String::from("A new season has begun."),
    };

    let mut next_season = None;

    for week_number in current_week..current_week + weeks {
        match phase {
            SeasonPhase::RegularSeason => {
                process_regular_week(league, data, week_number, rng)?;

                if week_number == REGULAR_SEASON_WEEKS {
                    message.push_str(" The first week of the postseason has begun.");
                }
            }
            SeasonPhase::Playoffs => {
                process_playoff_week(league, data, week_number, rng)?;

                if week_number == CHAMPIONSHIP_WEEK {
                    message.push_str(
                        " You've entered the offseason. \
                         Advance at least one week to start a new season.",
                    );
                }
            }
            SeasonPhase::Offseason => {
                next_season = Some(rollover_season(league, data, rng)?);
            }
            _ => unreachable!("phases without advance logic are rejected above"),
        }

        data.season.current_date = data.season.current_date + Duration::days(7);
        data.season.week_number += 1;
    }

    if let Some(season_data) = next_season {
        seasons.push(season_data);
    }

    Ok(AdvanceOutcome::success(weeks, message))
}

/// One regular-season week: play the games, roll the ledger forward,
/// re-rank, track clinches, and open the playoffs after week 18.
fn process_regular_week(
    league: &League,
    data: &mut SeasonData,
    week_number: u8,
    rng: &mut impl Rng,
) -> Result<(), SimulationError> {
    debug!("simulating week {} matchups", week_number);

    for matchup in data.matchups.week_mut(week_number) {
        matchup.simulate(rng);
    }

    data.standings
        .advance_week(league, &data.matchups, week_number)?;

    let target_week = week_number + 1;
    data.rankings.update(league, &data.standings, target_week)?;

    if week_number >= CLINCH_START_WEEK {
        update_running_clinches(league, &data.standings, &mut data.rankings, target_week)?;
    }

    if week_number == REGULAR_SEASON_WEEKS {
        info!("🏆 Regular season complete, seeding the wildcard round");

        data.season.phase = SeasonPhase::Playoffs;
        finalize_clinches(league, &mut data.rankings, target_week)?;
        generate_wildcard_round(league, &data.season, &mut data.matchups, &data.rankings)?;
    }

    Ok(())
}

/// One playoff week: play the round matching the week number, then set
/// up the next one (or close the season after the championship).
fn process_playoff_week(
    league: &League,
    data: &mut SeasonData,
    week_number: u8,
    rng: &mut impl Rng,
) -> Result<(), SimulationError> {
    let round = PlayoffRound::for_week(week_number).unwrap();

    info!("🏆 Simulating the {} round", round);

    let winners = simulate_round(&mut data.matchups, &mut data.rankings, round, rng)?;

    if round == PlayoffRound::Championship {
        data.season.phase = SeasonPhase::Offseason;

        if let Some(&champion) = winners.first() {
            info!(
                "🥇 The {} win the championship",
                league.team(champion).unwrap().name()
            );
        }
    } else {
        generate_next_round(
            league,
            &data.season,
            &mut data.matchups,
            &data.rankings,
            round,
            &winners,
        )?;
    }

    Ok(())
}

/// Retires the current season and builds its successor a year later,
/// schedule and all. The schedule is generated before any state is
/// touched so a solver failure leaves the old season intact.
fn rollover_season(
    league: &League,
    data: &mut SeasonData,
    rng: &mut impl Rng,
) -> Result<SeasonData, SimulationError> {
    let schedule = ScheduleGenerator::generate(league, rng)?;

    let start_date = data.season.start_date + Duration::days(365);
    let season = Season::new(
        league.id,
        data.season.season_number + 1,
        start_date,
    );

    info!(
        "🔁 Season {} begins on {}",
        season.season_number, season.start_date
    );

    data.season.is_current = false;

    Ok(SeasonData::create(league, season, &schedule))
}
