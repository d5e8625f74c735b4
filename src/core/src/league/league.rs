use serde::{Deserialize, Serialize};

/// One of the two top-level groupings of a league.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conference {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Division {
    pub id: u32,
    pub name: String,
    pub conference_id: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: u32,
    pub location: String,
    pub nickname: String,
    pub abbreviation: String,
    pub division_id: u32,
    pub overall_rating: u8,
}

impl Team {
    pub fn name(&self) -> String {
        format!("{} {}", self.location, self.nickname)
    }
}

/// The full team/division/conference graph.
///
/// The schedule solver's column layout assumes the fixed cardinality of
/// 2 conferences x 4 divisions x 4 teams.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct League {
    pub id: u32,
    pub name: String,
    pub slug: String,
    pub conferences: Vec<Conference>,
    pub divisions: Vec<Division>,
    pub teams: Vec<Team>,
}

impl League {
    pub fn new(id: u32, name: String, slug: String) -> Self {
        League {
            id,
            name,
            slug,
            conferences: Vec::new(),
            divisions: Vec::new(),
            teams: Vec::new(),
        }
    }

    pub fn team(&self, team_id: u32) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == team_id)
    }

    pub fn division(&self, division_id: u32) -> Option<&Division> {
        self.divisions.iter().find(|d| d.id == division_id)
    }

    pub fn conference(&self, conference_id: u32) -> Option<&Conference> {
        self.conferences.iter().find(|c| c.id == conference_id)
    }

    pub fn division_of(&self, team_id: u32) -> Option<&Division> {
        self.team(team_id)
            .and_then(|team| self.division(team.division_id))
    }

    /// Conference membership is derived through the division.
    pub fn conference_of(&self, team_id: u32) -> Option<&Conference> {
        self.division_of(team_id)
            .and_then(|division| self.conference(division.conference_id))
    }

    pub fn division_teams(&self, division_id: u32) -> Vec<&Team> {
        self.teams
            .iter()
            .filter(|t| t.division_id == division_id)
            .collect()
    }

    pub fn conference_divisions(&self, conference_id: u32) -> Vec<&Division> {
        self.divisions
            .iter()
            .filter(|d| d.conference_id == conference_id)
            .collect()
    }

    pub fn conference_teams(&self, conference_id: u32) -> Vec<&Team> {
        self.conference_divisions(conference_id)
            .iter()
            .flat_map(|d| self.division_teams(d.id))
            .collect()
    }

    pub fn same_division(&self, team_a: u32, team_b: u32) -> bool {
        match (self.team(team_a), self.team(team_b)) {
            (Some(a), Some(b)) => a.division_id == b.division_id,
            _ => false,
        }
    }

    pub fn same_conference(&self, team_a: u32, team_b: u32) -> bool {
        match (self.division_of(team_a), self.division_of(team_b)) {
            (Some(a), Some(b)) => a.conference_id == b.conference_id,
            _ => false,
        }
    }
}
