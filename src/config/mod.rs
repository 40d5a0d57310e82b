//! Configuration module - environment variable parsing

use std::env;
use std::time::Duration;

use crate::game::PlaybackSpeed;
use crate::util::time::{DEFAULT_OVERLAY_DURATION, DEFAULT_TICK_INTERVAL};

/// Replay configuration loaded from environment variables
#[derive(Clone, Debug)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Seed for the match generators. `None` draws a fresh seed per load.
    pub seed: Option<u64>,
    /// Playback speed the replay starts at
    pub initial_speed: PlaybackSpeed,
    /// Real-time interval between playback ticks
    pub tick_interval: Duration,
    /// How long a triggered event stays on the overlay
    pub overlay_duration: Duration,

    /// Headless runner presses "continue" when half time is reached
    pub auto_continue: bool,
    /// Headless runner writes every update to stdout as a JSON line
    pub emit_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            seed: None,
            initial_speed: PlaybackSpeed::X1,
            tick_interval: DEFAULT_TICK_INTERVAL,
            overlay_duration: DEFAULT_OVERLAY_DURATION,
            auto_continue: true,
            emit_json: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let seed = match lookup("REPLAY_SEED") {
            Some(raw) => Some(
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::Invalid("REPLAY_SEED", raw))?,
            ),
            None => None,
        };

        let initial_speed = match lookup("REPLAY_SPEED") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .and_then(PlaybackSpeed::from_multiplier)
                .ok_or(ConfigError::Invalid("REPLAY_SPEED", raw))?,
            None => defaults.initial_speed,
        };

        Ok(Self {
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
            seed,
            initial_speed,
            tick_interval: parse_millis(&lookup, "REPLAY_TICK_MS")?
                .unwrap_or(defaults.tick_interval),
            overlay_duration: parse_millis(&lookup, "REPLAY_OVERLAY_MS")?
                .unwrap_or(defaults.overlay_duration),
            auto_continue: parse_flag(&lookup, "REPLAY_AUTO_CONTINUE")?
                .unwrap_or(defaults.auto_continue),
            emit_json: parse_flag(&lookup, "REPLAY_EMIT_JSON")?.unwrap_or(defaults.emit_json),
        })
    }
}

fn parse_millis<F>(lookup: &F, key: &'static str) -> Result<Option<Duration>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    match raw.trim().parse::<u64>() {
        Ok(ms) if ms > 0 => Ok(Some(Duration::from_millis(ms))),
        _ => Err(ConfigError::Invalid(key, raw)),
    }
}

fn parse_flag<F>(lookup: &F, key: &'static str) -> Result<Option<bool>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(Some(true)),
        "0" | "false" | "no" | "off" => Ok(Some(false)),
        _ => Err(ConfigError::Invalid(key, raw)),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1:?}")]
    Invalid(&'static str, String),
}
