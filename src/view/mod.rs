//! Read-only projections for the presentation layer

pub mod timeline;

pub use timeline::{build_timeline, Timeline, TimelineEntry, TimelineSection};

use serde::Serialize;

use crate::game::{MatchPhase, MatchSnapshot};
use crate::model::{HomeAway, MatchStats, Player};

/// Label shown next to the match clock
pub fn period_label(phase: MatchPhase) -> &'static str {
    match phase {
        MatchPhase::FirstHalf => "1st Half",
        MatchPhase::HalfTime => "Half Time",
        MatchPhase::SecondHalf => "2nd Half",
        MatchPhase::FullTime => "Full Time",
    }
}

/// Score card for the half-time and full-time overlays
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultSummary {
    pub home_team: String,
    pub away_team: String,
    pub score: HomeAway<u32>,
    /// `None` on a draw
    pub winner: Option<String>,
}

pub fn result_summary(snapshot: &MatchSnapshot, stats: &MatchStats) -> ResultSummary {
    let score = stats.score;
    let winner = if score.home > score.away {
        Some(snapshot.home_team.name.clone())
    } else if score.away > score.home {
        Some(snapshot.away_team.name.clone())
    } else {
        None
    };

    ResultSummary {
        home_team: snapshot.home_team.name.clone(),
        away_team: snapshot.away_team.name.clone(),
        score,
        winner,
    }
}

/// Details card for a player picked on the pitch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerCard {
    pub name: String,
    pub number: u8,
    pub role: &'static str,
    pub team: String,
}

pub fn player_card(snapshot: &MatchSnapshot, player_id: &str) -> Option<PlayerCard> {
    let player: &Player = snapshot.player(player_id)?;
    let side = snapshot.side_of(&player.team_id);
    Some(PlayerCard {
        name: player.name.clone(),
        number: player.number,
        role: player.role.code(),
        team: snapshot.team(side).name.clone(),
    })
}
