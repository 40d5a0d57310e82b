//! Match snapshot assembly

use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::generator::{
    generate_ball_trajectory, generate_player_trajectory, EventSource, Fixture, ScriptedEvents,
};
use crate::model::{MatchEvent, MatchStats, Player, Point, Side, Team};
use crate::util::time::{MATCH_DURATION_MINUTES, SAMPLE_COUNT};

/// Immutable bundle of everything generated for one match load
#[derive(Debug, Clone, Serialize)]
pub struct MatchSnapshot {
    pub id: Uuid,
    /// Seed the generators ran with
    pub seed: u64,
    pub loaded_at: DateTime<Utc>,
    pub home_team: Team,
    pub away_team: Team,
    /// Home squad first, then away
    pub players: Vec<Player>,
    /// In source order; the trigger scan picks the first match in this order
    pub events: Vec<MatchEvent>,
    pub ball: Vec<Point>,
    /// Final totals
    pub baseline: MatchStats,
}

impl MatchSnapshot {
    /// Side a team id belongs to. Anything that is not the home team counts as away.
    pub fn side_of(&self, team_id: &str) -> Side {
        if team_id == self.home_team.id {
            Side::Home
        } else {
            Side::Away
        }
    }

    pub fn team(&self, side: Side) -> &Team {
        match side {
            Side::Home => &self.home_team,
            Side::Away => &self.away_team,
        }
    }

    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn event(&self, id: &str) -> Option<&MatchEvent> {
        self.events.iter().find(|e| e.id == id)
    }
}

/// Errors from a pluggable event source producing unusable events
#[derive(Debug, thiserror::Error)]
pub enum AssembleError {
    #[error("Event {id} at minute {time} is outside the match")]
    EventOutOfRange { id: String, time: f64 },

    #[error("Event {id} names unknown team {team_id}")]
    UnknownTeam { id: String, team_id: String },
}

fn validate_events(fixture: &Fixture, events: &[MatchEvent]) -> Result<(), AssembleError> {
    for event in events {
        if !(0.0..=MATCH_DURATION_MINUTES).contains(&event.time) {
            return Err(AssembleError::EventOutOfRange {
                id: event.id.clone(),
                time: event.time,
            });
        }
        if event.team_id != fixture.home.id && event.team_id != fixture.away.id {
            return Err(AssembleError::UnknownTeam {
                id: event.id.clone(),
                team_id: event.team_id.clone(),
            });
        }
    }
    Ok(())
}

/// Build a snapshot from a fixture and an event source
pub fn assemble<S: EventSource + ?Sized>(
    fixture: &Fixture,
    source: &S,
    seed: u64,
) -> Result<MatchSnapshot, AssembleError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let events = source.events(fixture);
    validate_events(fixture, &events)?;

    let mut players = Vec::with_capacity(fixture.home_roster.len() + fixture.away_roster.len());
    for side in [Side::Home, Side::Away] {
        let team = fixture.team(side);
        for entry in fixture.roster(side) {
            players.push(Player {
                id: entry.id.clone(),
                name: entry.name.clone(),
                number: entry.number,
                role: entry.role,
                team_id: team.id.clone(),
                trajectory: generate_player_trajectory(side, entry.role, SAMPLE_COUNT, &mut rng),
            });
        }
    }

    let ball = generate_ball_trajectory(&events, &fixture.home.id, SAMPLE_COUNT, &mut rng);

    let snapshot = MatchSnapshot {
        id: Uuid::new_v4(),
        seed,
        loaded_at: Utc::now(),
        home_team: fixture.home.clone(),
        away_team: fixture.away.clone(),
        players,
        events,
        ball,
        baseline: fixture.baseline,
    };

    debug!(
        match_id = %snapshot.id,
        players = snapshot.players.len(),
        events = snapshot.events.len(),
        "Snapshot assembled"
    );

    Ok(snapshot)
}

/// Load the scripted match. `None` draws a fresh seed, so every load differs.
pub fn load_match(seed: Option<u64>) -> Result<MatchSnapshot, AssembleError> {
    let seed = seed.unwrap_or_else(rand::random);
    let snapshot = assemble(&Fixture::default(), &ScriptedEvents, seed)?;

    info!(
        match_id = %snapshot.id,
        seed,
        home = %snapshot.home_team.name,
        away = %snapshot.away_team.name,
        "Match loaded"
    );

    Ok(snapshot)
}
