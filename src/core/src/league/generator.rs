use crate::league::{Conference, Division, League, Team};
use rand::{Rng, RngExt};

const CONFERENCES: [&str; 2] = ["Atlantic", "Pacific"];

const DIVISIONS: [&str; 4] = ["North", "South", "East", "West"];

const TEAMS: [[(&str, &str, &str); 4]; 8] = [
    // Atlantic North
    [
        ("Boston", "Minutemen", "BOS"),
        ("Albany", "Aviators", "ALB"),
        ("Hartford", "Harpoons", "HFD"),
        ("Buffalo", "Blizzard", "BUF"),
    ],
    // Atlantic South
    [
        ("Charlotte", "Copperheads", "CLT"),
        ("Memphis", "Monarchs", "MEM"),
        ("Orlando", "Otters", "ORL"),
        ("Atlanta", "Firebirds", "ATL"),
    ],
    // Atlantic East
    [
        ("Brooklyn", "Barons", "BKN"),
        ("Philadelphia", "Founders", "PHI"),
        ("Baltimore", "Admirals", "BAL"),
        ("Richmond", "Raptors", "RIC"),
    ],
    // Atlantic West
    [
        ("Pittsburgh", "Forgemen", "PIT"),
        ("Cleveland", "Mastodons", "CLE"),
        ("Detroit", "Dynamos", "DET"),
        ("Columbus", "Cannons", "CLB"),
    ],
    // Pacific North
    [
        ("Seattle", "Cascades", "SEA"),
        ("Spokane", "Stampede", "SPK"),
        ("Boise", "Broncs", "BOI"),
        ("Anchorage", "Aurora", "ANC"),
    ],
    // Pacific South
    [
        ("Phoenix", "Scorpions", "PHX"),
        ("San Diego", "Swells", "SD"),
        ("Las Vegas", "Jackals", "LV"),
        ("Tucson", "Thunderbirds", "TUC"),
    ],
    // Pacific East
    [
        ("Denver", "Summit", "DEN"),
        ("Salt Lake", "Cutthroats", "SLC"),
        ("Omaha", "Outlaws", "OMA"),
        ("Kansas City", "Crows", "KC"),
    ],
    // Pacific West
    [
        ("Los Angeles", "Comets", "LA"),
        ("San Francisco", "Fog", "SF"),
        ("Sacramento", "Sentries", "SAC"),
        ("Portland", "Pioneers", "POR"),
    ],
];

/// Builds a fully populated 32-team league so the driver and tests have
/// a realistic structure to simulate against.
pub struct LeagueGenerator;

impl LeagueGenerator {
    pub fn generate(league_id: u32, rng: &mut impl Rng) -> League {
        let mut league = League::new(
            league_id,
            String::from("Continental Gridiron League"),
            String::from("continental-gridiron-league"),
        );

        let mut division_id = 0;
        let mut team_id = 0;

        for (conference_idx, conference_name) in CONFERENCES.iter().enumerate() {
            let conference_id = conference_idx as u32 + 1;

            league.conferences.push(Conference {
                id: conference_id,
                name: String::from(*conference_name),
            });

            for division_name in DIVISIONS.iter() {
                division_id += 1;

                league.divisions.push(Division {
                    id: division_id,
                    name: format!("{} {}", conference_name, division_name),
                    conference_id,
                });

                for (location, nickname, abbreviation) in
                    TEAMS[division_id as usize - 1].iter()
                {
                    team_id += 1;

                    league.teams.push(Team {
                        id: team_id,
                        location: String::from(*location),
                        nickname: String::from(*nickname),
                        abbreviation: String::from(*abbreviation),
                        division_id,
                        overall_rating: rng.random_range(60..=90),
                    });
                }
            }
        }

        league
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_team_identities_are_unique() {
        let mut rng = StdRng::seed_from_u64(3);
        let league = LeagueGenerator::generate(1, &mut rng);

        let mut abbreviations: Vec<&str> =
            league.teams.iter().map(|t| t.abbreviation.as_str()).collect();
        abbreviations.sort();
        abbreviations.dedup();

        assert_eq!(abbreviations.len(), 32);
    }

    #[test]
    fn test_ratings_within_bounds() {
        let mut rng = StdRng::seed_from_u64(3);
        let league = LeagueGenerator::generate(1, &mut rng);

        for team in &league.teams {
            assert!((60..=90).contains(&team.overall_rating));
        }
    }
}
