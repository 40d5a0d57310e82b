//! Playback state machine: cursor, play/pause, speed and the half/full time gates

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::model::MatchEvent;
use crate::util::time::{
    clamp_minute, HALF_TIME_MINUTE, HALF_TIME_WINDOW_END, MATCH_DURATION_MINUTES, MINUTES_PER_TICK,
};

use super::derive::{derive_state, DerivedState};
use super::snapshot::MatchSnapshot;

/// Match phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPhase {
    FirstHalf,
    /// Waiting for "continue"; playback controls locked
    HalfTime,
    SecondHalf,
    /// Terminal for the session
    FullTime,
}

/// Supported playback speeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlaybackSpeed {
    #[default]
    #[serde(rename = "1x")]
    X1,
    #[serde(rename = "2x")]
    X2,
    #[serde(rename = "4x")]
    X4,
}

impl PlaybackSpeed {
    pub fn from_multiplier(multiplier: u32) -> Option<Self> {
        match multiplier {
            1 => Some(Self::X1),
            2 => Some(Self::X2),
            4 => Some(Self::X4),
            _ => None,
        }
    }

    pub fn multiplier(self) -> f64 {
        match self {
            Self::X1 => 1.0,
            Self::X2 => 2.0,
            Self::X4 => 4.0,
        }
    }

    /// 1x -> 2x -> 4x -> 1x
    pub fn next(self) -> Self {
        match self {
            Self::X1 => Self::X2,
            Self::X2 => Self::X4,
            Self::X4 => Self::X1,
        }
    }
}

/// Mutable playback state owned by the engine
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    cursor: f64,
    playing: bool,
    speed: PlaybackSpeed,
    half_time: bool,
    full_time: bool,
    /// Sides have swapped; positions are mirrored
    second_half: bool,
    triggered_event: Option<MatchEvent>,
    overlay_visible: bool,
}

impl PlaybackState {
    pub fn new(speed: PlaybackSpeed) -> Self {
        Self {
            cursor: 0.0,
            playing: false,
            speed,
            half_time: false,
            full_time: false,
            second_half: false,
            triggered_event: None,
            overlay_visible: false,
        }
    }

    pub fn cursor(&self) -> f64 {
        self.cursor
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn speed(&self) -> PlaybackSpeed {
        self.speed
    }

    pub fn is_half_time(&self) -> bool {
        self.half_time
    }

    pub fn is_full_time(&self) -> bool {
        self.full_time
    }

    pub fn is_second_half(&self) -> bool {
        self.second_half
    }

    pub fn triggered_event(&self) -> Option<&MatchEvent> {
        self.triggered_event.as_ref()
    }

    pub fn overlay_visible(&self) -> bool {
        self.overlay_visible
    }

    pub fn phase(&self) -> MatchPhase {
        if self.full_time {
            MatchPhase::FullTime
        } else if self.half_time {
            MatchPhase::HalfTime
        } else if self.second_half {
            MatchPhase::SecondHalf
        } else {
            MatchPhase::FirstHalf
        }
    }

    /// Time and playback controls are disabled at half time and full time
    pub fn controls_locked(&self) -> bool {
        self.half_time || self.full_time
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new(PlaybackSpeed::X1)
    }
}

/// What a single playback tick did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Cursor moved
    pub advanced: bool,
    /// Event surfaced on the overlay by this tick
    pub triggered: Option<MatchEvent>,
    /// Phase entered by this tick
    pub entered: Option<MatchPhase>,
}

/// Drives a [`PlaybackState`] over one snapshot.
///
/// Every operation is total: out-of-range times are clamped and controls
/// that are disabled in the current phase return `false` without effect.
pub struct PlaybackEngine {
    snapshot: Arc<MatchSnapshot>,
    state: PlaybackState,
}

impl PlaybackEngine {
    pub fn new(snapshot: Arc<MatchSnapshot>, speed: PlaybackSpeed) -> Self {
        Self {
            snapshot,
            state: PlaybackState::new(speed),
        }
    }

    pub fn snapshot(&self) -> &Arc<MatchSnapshot> {
        &self.snapshot
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn phase(&self) -> MatchPhase {
        self.state.phase()
    }

    /// Project the current state for the presentation layer
    pub fn derived(&self) -> DerivedState {
        derive_state(&self.snapshot, &self.state)
    }

    fn reject(&self, control: &'static str) -> bool {
        debug!(
            match_id = %self.snapshot.id,
            control,
            phase = ?self.state.phase(),
            "Control ignored in current phase"
        );
        false
    }

    pub fn play(&mut self) -> bool {
        if self.state.controls_locked() {
            return self.reject("play");
        }
        self.state.playing = true;
        true
    }

    pub fn pause(&mut self) -> bool {
        if self.state.controls_locked() {
            return self.reject("pause");
        }
        self.state.playing = false;
        true
    }

    pub fn toggle_play(&mut self) -> bool {
        if self.state.playing {
            self.pause()
        } else {
            self.play()
        }
    }

    pub fn set_speed(&mut self, speed: PlaybackSpeed) -> bool {
        if self.state.controls_locked() {
            return self.reject("set_speed");
        }
        self.state.speed = speed;
        true
    }

    pub fn cycle_speed(&mut self) -> bool {
        let next = self.state.speed.next();
        self.set_speed(next)
    }

    /// Scrub the cursor (slider, skip buttons).
    ///
    /// Landing in the half-time window during the first half stops at the
    /// half-time gate. Landing past it swaps sides directly, and landing
    /// before minute 45 puts the match back in the first half.
    pub fn set_cursor(&mut self, time: f64) -> bool {
        if self.state.controls_locked() {
            return self.reject("set_cursor");
        }
        let target = clamp_minute(time);
        if target < HALF_TIME_MINUTE {
            self.state.second_half = false;
        } else if target >= HALF_TIME_WINDOW_END {
            self.state.second_half = true;
        }
        self.state.cursor = target;
        self.check_phase();
        true
    }

    /// Move the cursor by `minutes` (negative rewinds)
    pub fn skip(&mut self, minutes: f64) -> bool {
        let target = self.state.cursor + minutes;
        self.set_cursor(target)
    }

    /// Jump to a time from the event list. Pauses playback and bypasses the
    /// half-time gate.
    pub fn jump_to(&mut self, time: f64) -> bool {
        if self.state.full_time {
            return self.reject("jump_to");
        }
        let target = clamp_minute(time);
        self.state.playing = false;
        self.state.half_time = false;
        self.state.second_half = target >= HALF_TIME_MINUTE;
        self.state.cursor = target;
        self.check_phase();
        true
    }

    pub fn jump_to_event(&mut self, event_id: &str) -> bool {
        let Some(time) = self.snapshot.event(event_id).map(|e| e.time) else {
            debug!(match_id = %self.snapshot.id, event_id, "Unknown event");
            return false;
        };
        self.jump_to(time)
    }

    /// Leave half time: cursor back to exactly 45, sides swapped, playing
    pub fn continue_to_second_half(&mut self) -> bool {
        if !self.state.half_time || self.state.full_time {
            return self.reject("continue_to_second_half");
        }
        self.state.half_time = false;
        self.state.second_half = true;
        self.state.cursor = HALF_TIME_MINUTE;
        self.state.playing = true;
        info!(match_id = %self.snapshot.id, "Second half started");
        true
    }

    /// Hide the event overlay (its display timer ran out)
    pub fn hide_overlay(&mut self) {
        self.state.overlay_visible = false;
    }

    /// Advance one playback tick of `speed` match minutes
    pub fn tick(&mut self) -> TickReport {
        let mut report = TickReport::default();
        if !self.state.playing || self.state.controls_locked() {
            return report;
        }

        let previous = self.state.cursor;
        let mut next = previous + MINUTES_PER_TICK * self.state.speed.multiplier();

        // Fast playback must not step over the half-time window
        if !self.state.second_half && previous < HALF_TIME_MINUTE && next >= HALF_TIME_WINDOW_END {
            next = HALF_TIME_MINUTE;
        }

        report.advanced = true;

        if next >= MATCH_DURATION_MINUTES {
            self.state.cursor = MATCH_DURATION_MINUTES;
            report.entered = self.check_phase();
            return report;
        }

        let minute = next.floor();
        if let Some(event) = self
            .snapshot
            .events
            .iter()
            .find(|e| e.time.floor() == minute)
        {
            debug!(
                match_id = %self.snapshot.id,
                event_id = %event.id,
                kind = ?event.kind,
                minute,
                "Event triggered"
            );
            self.state.triggered_event = Some(event.clone());
            self.state.overlay_visible = true;
            report.triggered = Some(event.clone());
        }

        self.state.cursor = next;
        report.entered = self.check_phase();
        report
    }

    /// Apply the half-time and full-time gates to the current cursor
    fn check_phase(&mut self) -> Option<MatchPhase> {
        if self.state.full_time {
            return None;
        }

        if self.state.cursor >= MATCH_DURATION_MINUTES {
            self.state.cursor = MATCH_DURATION_MINUTES;
            self.state.full_time = true;
            self.state.half_time = false;
            self.state.playing = false;
            info!(match_id = %self.snapshot.id, "Full time");
            return Some(MatchPhase::FullTime);
        }

        let in_window = (HALF_TIME_MINUTE..HALF_TIME_WINDOW_END).contains(&self.state.cursor);
        if in_window && !self.state.half_time && !self.state.second_half {
            self.state.half_time = true;
            self.state.playing = false;
            info!(match_id = %self.snapshot.id, cursor = self.state.cursor, "Half time");
            return Some(MatchPhase::HalfTime);
        }

        None
    }
}
