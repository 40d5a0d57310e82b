//! Derived match state: a pure projection of a snapshot at a cursor time

use serde::Serialize;

use crate::model::{EventKind, MatchEvent, MatchStats, Point, Role, Side};
use crate::util::time::{clamp_minute, format_match_time, sample_index, MATCH_DURATION_MINUTES};

use super::playback::{MatchPhase, PlaybackSpeed, PlaybackState};
use super::snapshot::MatchSnapshot;

/// Possession never leaves this band
const POSSESSION_BAND: (f64, f64) = (40.0, 60.0);
/// Peak possession swing around the baseline, in percent
const POSSESSION_SWING: f64 = 5.0;
/// Minutes per radian of the possession swing
const POSSESSION_PERIOD: f64 = 15.0;

/// Where a player is drawn at the cursor time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerPosition {
    pub player_id: String,
    pub team_id: String,
    pub number: u8,
    pub role: Role,
    pub position: Point,
}

/// Everything the presentation layer renders for one cursor time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedState {
    pub cursor: f64,
    /// `MM:SS`
    pub clock: String,
    pub phase: MatchPhase,
    pub playing: bool,
    pub speed: PlaybackSpeed,
    pub positions: Vec<PlayerPosition>,
    pub ball: Point,
    pub stats: MatchStats,
    pub triggered_event: Option<MatchEvent>,
    pub overlay_visible: bool,
}

/// Sample of a trajectory at `cursor`, mirrored once sides have swapped
pub fn position_at(trajectory: &[Point], cursor: f64, mirrored: bool) -> Point {
    let Some(point) = trajectory.get(sample_index(cursor, trajectory.len())) else {
        return Point::CENTER;
    };
    if mirrored {
        point.mirrored()
    } else {
        *point
    }
}

fn scale(total: u32, progress: f64) -> u32 {
    (f64::from(total) * progress).round() as u32
}

/// Statistics at `cursor`.
///
/// Score and cards are a full re-count of the events up to and including the
/// cursor. Possession swings around the baseline, each side clamped on its
/// own, so the two values need not add up to 100. Volume stats grow linearly
/// towards the baseline; shots on target never drop below goals and never
/// exceed shots.
pub fn derive_stats(snapshot: &MatchSnapshot, cursor: f64) -> MatchStats {
    let cursor = clamp_minute(cursor);
    let baseline = &snapshot.baseline;
    let mut stats = *baseline;

    stats.score = Default::default();
    stats.yellow_cards = Default::default();
    stats.red_cards = Default::default();

    for event in snapshot.events.iter().filter(|e| e.time <= cursor) {
        let side = snapshot.side_of(&event.team_id);
        let tally = match event.kind {
            EventKind::Goal => &mut stats.score,
            EventKind::YellowCard => &mut stats.yellow_cards,
            EventKind::RedCard => &mut stats.red_cards,
            _ => continue,
        };
        *tally.get_mut(side) += 1;
    }

    let swing = (cursor / POSSESSION_PERIOD).sin() * POSSESSION_SWING;
    let possession = |base: u32, offset: f64| {
        (f64::from(base) + offset)
            .round()
            .clamp(POSSESSION_BAND.0, POSSESSION_BAND.1) as u32
    };
    stats.possession.home = possession(baseline.possession.home, swing);
    stats.possession.away = possession(baseline.possession.away, -swing);

    let progress = (cursor / MATCH_DURATION_MINUTES).clamp(0.0, 1.0);
    for side in [Side::Home, Side::Away] {
        let goals = *stats.score.get(side);
        let shots = scale(*baseline.shots.get(side), progress);
        let on_target = scale(*baseline.shots_on_target.get(side), progress)
            .min(shots)
            .max(goals);

        *stats.shots.get_mut(side) = shots.max(on_target);
        *stats.shots_on_target.get_mut(side) = on_target;
        *stats.corners.get_mut(side) = scale(*baseline.corners.get(side), progress);
        *stats.fouls.get_mut(side) = scale(*baseline.fouls.get(side), progress);
    }

    stats
}

/// Project a snapshot and playback state into what is drawn
pub fn derive_state(snapshot: &MatchSnapshot, state: &PlaybackState) -> DerivedState {
    let cursor = clamp_minute(state.cursor());
    let mirrored = state.is_second_half();

    let positions = snapshot
        .players
        .iter()
        .map(|p| PlayerPosition {
            player_id: p.id.clone(),
            team_id: p.team_id.clone(),
            number: p.number,
            role: p.role,
            position: position_at(&p.trajectory, cursor, mirrored),
        })
        .collect();

    DerivedState {
        cursor,
        clock: format_match_time(cursor),
        phase: state.phase(),
        playing: state.is_playing(),
        speed: state.speed(),
        positions,
        ball: position_at(&snapshot.ball, cursor, mirrored),
        stats: derive_stats(snapshot, cursor),
        triggered_event: state.triggered_event().cloned(),
        overlay_visible: state.overlay_visible(),
    }
}
