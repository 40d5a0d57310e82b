//! Ball trajectory generation, with scripted approach paths around goals

use std::collections::HashMap;

use rand::Rng;

use crate::model::{MatchEvent, Point};
use crate::util::time::SAMPLES_PER_MINUTE;

use super::positions::clamp_to_pitch;

/// Largest per-tick ball step along x
pub const BALL_MAX_STEP_X: f32 = 8.0;
/// Largest per-tick ball step along y
pub const BALL_MAX_STEP_Y: f32 = 6.0;

/// Slots consumed by a goal: near goal, goal mouth, goal line, kickoff
pub const GOAL_APPROACH_LEN: usize = 4;

/// Band the goal-mouth y is drawn from
const GOAL_MOUTH_Y: (f32, f32) = (40.0, 60.0);
/// Band the approach y is drawn from
const APPROACH_Y: (f32, f32) = (35.0, 65.0);

/// Sample slot a goal scored at `time` starts its approach in
pub fn goal_sample_index(time: f64) -> usize {
    (time.max(0.0) * SAMPLES_PER_MINUTE).floor() as usize
}

/// Deterministic-shape run at goal. A home goal finishes at the right-hand line.
pub fn goal_approach_path<R: Rng + ?Sized>(
    attacks_right: bool,
    rng: &mut R,
) -> [Point; GOAL_APPROACH_LEN] {
    let (near_x, mouth_x, line_x) = if attacks_right {
        (90.0, 95.0, 99.0)
    } else {
        (10.0, 5.0, 1.0)
    };
    let goal_y = rng.gen_range(GOAL_MOUTH_Y.0..GOAL_MOUTH_Y.1);
    let approach_y = rng.gen_range(APPROACH_Y.0..APPROACH_Y.1);

    [
        Point::new(near_x, approach_y),
        Point::new(mouth_x, goal_y),
        Point::new(line_x, goal_y),
        Point::CENTER,
    ]
}

/// Generate `samples` ball positions.
///
/// The ball random-walks from the center spot. At each goal's sample slot the
/// walk is replaced by [`goal_approach_path`] and resumes from the center spot
/// afterwards. A later goal starting inside an earlier goal's window takes the
/// remaining slots over; a window running past the end is cut off.
pub fn generate_ball_trajectory<R: Rng + ?Sized>(
    events: &[MatchEvent],
    home_team_id: &str,
    samples: usize,
    rng: &mut R,
) -> Vec<Point> {
    let mut goal_starts: HashMap<usize, bool> = HashMap::new();
    for event in events.iter().filter(|e| e.is_goal()) {
        goal_starts.insert(goal_sample_index(event.time), event.team_id == home_team_id);
    }

    let mut trajectory = Vec::with_capacity(samples);
    let mut current = Point::CENTER;
    let mut window: Option<([Point; GOAL_APPROACH_LEN], usize)> = None;

    for i in 0..samples {
        if let Some(&attacks_right) = goal_starts.get(&i) {
            window = Some((goal_approach_path(attacks_right, rng), 0));
        }

        match window.as_mut() {
            Some((path, next)) => {
                trajectory.push(path[*next]);
                *next += 1;
                if *next == GOAL_APPROACH_LEN {
                    window = None;
                    current = Point::CENTER;
                }
            }
            None => {
                let dx = rng.gen_range(-BALL_MAX_STEP_X..=BALL_MAX_STEP_X);
                let dy = rng.gen_range(-BALL_MAX_STEP_Y..=BALL_MAX_STEP_Y);
                current = clamp_to_pitch(Point::new(current.x + dx, current.y + dy));
                trajectory.push(current);
            }
        }
    }

    trajectory
}
