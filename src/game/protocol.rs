//! Messages between the replay loop and the presentation layer

use serde::{Deserialize, Serialize};

use crate::model::{HomeAway, MatchEvent};

use super::derive::DerivedState;
use super::playback::PlaybackSpeed;

/// Controls sent to a running replay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ControlMsg {
    Play,
    Pause,
    TogglePlay,
    SetSpeed {
        speed: PlaybackSpeed,
    },
    /// 1x -> 2x -> 4x -> 1x
    CycleSpeed,
    /// Slider position in match minutes
    Seek {
        time: f64,
    },
    /// Relative move in match minutes (skip buttons)
    Skip {
        minutes: f64,
    },
    /// Jump from the event list
    JumpToEvent {
        event_id: String,
    },
    ContinueSecondHalf,
    /// Stop the replay loop
    Shutdown,
}

/// Updates broadcast by a running replay
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReplayUpdate {
    /// Sent after every change of cursor or playback state
    State(DerivedState),

    /// An event reached the overlay
    EventTriggered { event: MatchEvent },

    /// The overlay display time ran out
    OverlayHidden,

    /// Playback paused at the half-time gate
    HalfTime { score: HomeAway<u32> },

    /// Final whistle; the replay loop stops after this
    FullTime {
        score: HomeAway<u32>,
        /// Winning team name, `None` on a draw
        winner: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_messages_parse_from_json() {
        let msg: ControlMsg = serde_json::from_str(r#"{"type":"seek","time":12.5}"#).unwrap();
        assert_eq!(msg, ControlMsg::Seek { time: 12.5 });

        let msg: ControlMsg =
            serde_json::from_str(r#"{"type":"set_speed","speed":"4x"}"#).unwrap();
        assert_eq!(msg, ControlMsg::SetSpeed { speed: PlaybackSpeed::X4 });

        let msg: ControlMsg = serde_json::from_str(r#"{"type":"continue_second_half"}"#).unwrap();
        assert_eq!(msg, ControlMsg::ContinueSecondHalf);
    }

    #[test]
    fn updates_serialize_with_type_tag() {
        let json = serde_json::to_value(ReplayUpdate::FullTime {
            score: HomeAway::new(2, 4),
            winner: Some("Arsenal".to_string()),
        })
        .unwrap();
        assert_eq!(json["type"], "full_time");
        assert_eq!(json["score"]["away"], 4);
        assert_eq!(json["winner"], "Arsenal");
    }
}
