//! The scripted fixture: teams, squads and final totals

use crate::model::{HomeAway, MatchStats, Role, Side, Team};

/// A squad member before a trajectory is attached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub id: String,
    pub name: String,
    pub number: u8,
    pub role: Role,
}

impl RosterEntry {
    pub fn new(id: &str, name: &str, number: u8, role: Role) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            number,
            role,
        }
    }
}

/// Everything about a match except the generated movement
#[derive(Debug, Clone)]
pub struct Fixture {
    pub home: Team,
    pub away: Team,
    pub home_roster: Vec<RosterEntry>,
    pub away_roster: Vec<RosterEntry>,
    /// Final totals the live statistics grow towards
    pub baseline: MatchStats,
}

impl Fixture {
    pub fn team(&self, side: Side) -> &Team {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    pub fn roster(&self, side: Side) -> &[RosterEntry] {
        match side {
            Side::Home => &self.home_roster,
            Side::Away => &self.away_roster,
        }
    }

    /// PSG (home) against Arsenal (away), finishing 2-4
    pub fn psg_arsenal() -> Self {
        use Role::{Defender as DEF, Forward as FWD, Goalkeeper as GK, Midfielder as MID};

        let home = Team {
            id: "team1".to_string(),
            name: "PSG".to_string(),
            short_name: "PSG".to_string(),
            color: "blue".to_string(),
        };
        let away = Team {
            id: "team2".to_string(),
            name: "Arsenal".to_string(),
            short_name: "ARS".to_string(),
            color: "red".to_string(),
        };

        let home_roster = vec![
            RosterEntry::new("h1", "Donnarumma", 1, GK),
            RosterEntry::new("h2", "Hakimi", 2, DEF),
            RosterEntry::new("h3", "Marquinhos", 5, DEF),
            RosterEntry::new("h4", "Skriniar", 37, DEF),
            RosterEntry::new("h5", "Mendes", 25, DEF),
            RosterEntry::new("h6", "Vitinha", 17, MID),
            RosterEntry::new("h7", "Zaire-Emery", 33, MID),
            RosterEntry::new("h8", "Ruiz", 8, MID),
            RosterEntry::new("h9", "Dembélé", 10, FWD),
            RosterEntry::new("h10", "Mbappé", 7, FWD),
            RosterEntry::new("h11", "Asensio", 11, FWD),
        ];
        let away_roster = vec![
            RosterEntry::new("a1", "Raya", 1, GK),
            RosterEntry::new("a2", "White", 4, DEF),
            RosterEntry::new("a3", "Saliba", 2, DEF),
            RosterEntry::new("a4", "Gabriel", 6, DEF),
            RosterEntry::new("a5", "Timber", 12, DEF),
            RosterEntry::new("a6", "Partey", 5, MID),
            RosterEntry::new("a7", "Rice", 41, MID),
            RosterEntry::new("a8", "Ødegaard", 8, MID),
            RosterEntry::new("a9", "Saka", 7, FWD),
            RosterEntry::new("a10", "Havertz", 29, FWD),
            RosterEntry::new("a11", "Martinelli", 11, FWD),
        ];

        let baseline = MatchStats {
            possession: HomeAway::new(55, 45),
            shots: HomeAway::new(12, 15),
            shots_on_target: HomeAway::new(5, 9),
            corners: HomeAway::new(6, 7),
            fouls: HomeAway::new(14, 8),
            yellow_cards: HomeAway::new(3, 1),
            red_cards: HomeAway::new(1, 0),
            offsides: HomeAway::new(2, 3),
            score: HomeAway::new(2, 4),
        };

        Self {
            home,
            away,
            home_roster,
            away_roster,
            baseline,
        }
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::psg_arsenal()
    }
}
