//! Match clock constants and formatting

use std::time::Duration;

/// Scheduled match length in minutes
pub const MATCH_DURATION_MINUTES: f64 = 90.0;
/// Trajectory samples recorded per match minute (one every 30 seconds)
pub const SAMPLES_PER_MINUTE: f64 = 2.0;
/// Samples in every player and ball trajectory
pub const SAMPLE_COUNT: usize = (MATCH_DURATION_MINUTES * SAMPLES_PER_MINUTE) as usize;

/// Minute at which the first half ends
pub const HALF_TIME_MINUTE: f64 = 45.0;
/// End (exclusive) of the window in which the half-time gate fires
pub const HALF_TIME_WINDOW_END: f64 = 46.0;

/// Default real-time interval between playback ticks
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(1000);
/// Default time the "just triggered" event overlay stays visible
pub const DEFAULT_OVERLAY_DURATION: Duration = Duration::from_millis(3000);

/// Match minutes advanced per tick at 1x speed
pub const MINUTES_PER_TICK: f64 = 1.0;

/// Clamp a match time into the scheduled duration
pub fn clamp_minute(time: f64) -> f64 {
    if time.is_nan() {
        return 0.0;
    }
    time.clamp(0.0, MATCH_DURATION_MINUTES)
}

/// Trajectory sample index for a match time, clamped to the last sample
pub fn sample_index(time: f64, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let raw = (clamp_minute(time) * SAMPLES_PER_MINUTE).floor() as usize;
    raw.min(len - 1)
}

/// Format fractional match minutes as `MM:SS`
pub fn format_match_time(time: f64) -> String {
    let time = time.max(0.0);
    let minutes = time.floor();
    let seconds = ((time - minutes) * 60.0).floor();
    format!("{:02}:{:02}", minutes as u32, seconds as u32)
}
