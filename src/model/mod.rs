//! Match data model shared by the generators, the engine and the view layer

use serde::{Deserialize, Serialize};

/// A point on the normalized pitch, in percent of pitch length (`x`) and width (`y`)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const CENTER: Point = Point { x: 50.0, y: 50.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Mirror across the halfway line (sides swap at half time)
    pub fn mirrored(self) -> Self {
        Self {
            x: 100.0 - self.x,
            y: self.y,
        }
    }
}

/// Which end of the fixture a team is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Home,
    Away,
}

/// A team taking part in the match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub short_name: String,
    /// Color tag used by the pitch renderer
    pub color: String,
}

/// Playing role, drives where a player's trajectory is anchored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl Role {
    /// Short code shown on the pitch
    pub fn code(self) -> &'static str {
        match self {
            Role::Goalkeeper => "GK",
            Role::Defender => "DEF",
            Role::Midfielder => "MID",
            Role::Forward => "FWD",
        }
    }
}

/// A player with the full sampled trajectory for the match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub number: u8,
    pub role: Role,
    /// Owning team, by id
    pub team_id: String,
    /// One point per sampling tick
    pub trajectory: Vec<Point>,
}

/// Kinds of discrete match events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Goal,
    YellowCard,
    RedCard,
    Substitution,
    Foul,
    Other,
}

impl EventKind {
    /// Display label for the timeline and overlay
    pub fn label(self) -> &'static str {
        match self {
            EventKind::Goal => "Goal",
            EventKind::YellowCard => "Yellow Card",
            EventKind::RedCard => "Red Card",
            EventKind::Substitution => "Substitution",
            EventKind::Foul => "Foul",
            EventKind::Other => "Event",
        }
    }
}

/// A time-stamped match event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchEvent {
    pub id: String,
    pub kind: EventKind,
    /// Fractional match minute
    pub time: f64,
    pub player_id: String,
    pub player_name: String,
    pub team_id: String,
    /// Missing names mean "no team label", not an error
    pub team_name: Option<String>,
    pub description: String,
}

impl MatchEvent {
    pub fn is_goal(&self) -> bool {
        self.kind == EventKind::Goal
    }
}

/// A home/away pair of values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HomeAway<T> {
    pub home: T,
    pub away: T,
}

impl<T> HomeAway<T> {
    pub fn new(home: T, away: T) -> Self {
        Self { home, away }
    }

    pub fn get(&self, side: Side) -> &T {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    pub fn get_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::Home => &mut self.home,
            Side::Away => &mut self.away,
        }
    }

    pub fn map<U, F: FnMut(T) -> U>(self, mut f: F) -> HomeAway<U> {
        HomeAway {
            home: f(self.home),
            away: f(self.away),
        }
    }
}

/// Match statistics, either final totals or values derived at a cursor time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatchStats {
    /// Percent of possession
    pub possession: HomeAway<u32>,
    pub shots: HomeAway<u32>,
    pub shots_on_target: HomeAway<u32>,
    pub corners: HomeAway<u32>,
    pub fouls: HomeAway<u32>,
    pub yellow_cards: HomeAway<u32>,
    pub red_cards: HomeAway<u32>,
    pub offsides: HomeAway<u32>,
    pub score: HomeAway<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mirroring_keeps_points_on_pitch() {
        let p = Point::new(5.0, 40.0).mirrored();
        assert_eq!(p, Point::new(95.0, 40.0));
        assert_eq!(p.mirrored(), Point::new(5.0, 40.0));
    }

    #[test]
    fn event_kind_serializes_snake_case() {
        let json = serde_json::to_string(&EventKind::YellowCard).unwrap();
        assert_eq!(json, "\"yellow_card\"");
    }

    #[test]
    fn home_away_side_access() {
        let mut pair = HomeAway::new(1u32, 2u32);
        *pair.get_mut(Side::Away) += 3;
        assert_eq!(*pair.get(Side::Home), 1);
        assert_eq!(*pair.get(Side::Away), 5);
        assert_eq!(pair.map(|v| v * 10), HomeAway::new(10, 50));
    }
}
