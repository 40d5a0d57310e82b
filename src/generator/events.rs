//! Match event sources

use crate::model::{EventKind, MatchEvent, Team};

use super::fixture::Fixture;

/// Supplies the event list for a fixture.
///
/// Sources should return events in chronological order. The list is kept as
/// returned: when several events share a playback minute, the first one in
/// this order is the one surfaced.
pub trait EventSource {
    fn events(&self, fixture: &Fixture) -> Vec<MatchEvent>;
}

/// Hand-authored events for [`Fixture::psg_arsenal`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptedEvents;

fn event(
    id: &str,
    kind: EventKind,
    time: f64,
    player_id: &str,
    player_name: &str,
    team: &Team,
    description: &str,
) -> MatchEvent {
    MatchEvent {
        id: id.to_string(),
        kind,
        time,
        player_id: player_id.to_string(),
        player_name: player_name.to_string(),
        team_id: team.id.clone(),
        team_name: Some(team.name.clone()),
        description: description.to_string(),
    }
}

impl EventSource for ScriptedEvents {
    fn events(&self, fixture: &Fixture) -> Vec<MatchEvent> {
        let home = &fixture.home;
        let away = &fixture.away;

        vec![
            event("e1", EventKind::Goal, 18.5, "a9", "Saka", away, "GOAL! Saka scores for Arsenal!"),
            event("e2", EventKind::YellowCard, 27.2, "h6", "Vitinha", home, "Yellow Card"),
            event("e3", EventKind::Goal, 35.1, "h10", "Mbappé", home, "GOAL! Mbappé equalizes for PSG!"),
            event("e4", EventKind::Goal, 42.3, "a7", "Rice", away, "GOAL! Rice puts Arsenal ahead!"),
            event("e5", EventKind::Substitution, 46.0, "h8", "Ruiz → Lee", home, "Substitution"),
            event("e6", EventKind::Goal, 58.7, "h9", "Dembélé", home, "GOAL! Dembélé equalizes again for PSG!"),
            event("e7", EventKind::Goal, 67.4, "a9", "Saka", away, "GOAL! Saka scores his second!"),
            event("e8", EventKind::RedCard, 75.5, "h4", "Skriniar", home, "Red Card"),
            event("e9", EventKind::Goal, 84.2, "a11", "Martinelli", away, "GOAL! Martinelli seals it for Arsenal!"),
        ]
    }
}

/// A fixed list of events, for callers bringing their own script
#[derive(Debug, Clone, Default)]
pub struct StaticEvents(pub Vec<MatchEvent>);

impl EventSource for StaticEvents {
    fn events(&self, _fixture: &Fixture) -> Vec<MatchEvent> {
        self.0.clone()
    }
}
