//! Player trajectory generation - a clamped random walk anchored by role

use rand::Rng;

use crate::model::{Point, Role, Side};

/// Lowest coordinate an entity may occupy on either axis
pub const PITCH_MIN: f32 = 1.0;
/// Highest coordinate an entity may occupy on either axis
pub const PITCH_MAX: f32 = 99.0;

/// Goalkeepers stay inside this many percent of their own goal line
pub const KEEPER_BOX_DEPTH: f32 = 10.0;
/// Vertical band goalkeepers are held in
pub const KEEPER_Y_BAND: (f32, f32) = (25.0, 75.0);

/// Movement constants per role
#[derive(Debug, Clone, Copy)]
pub struct MovementProfile {
    /// Starting x for the home side; the away side mirrors it
    pub home_base_x: f32,
    /// Band the starting y is drawn from. `None` starts on the center line.
    pub base_y_band: Option<(f32, f32)>,
    /// Largest per-tick step along x
    pub max_step_x: f32,
    /// Largest per-tick step along y
    pub max_step_y: f32,
}

impl MovementProfile {
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Goalkeeper => Self {
                home_base_x: 5.0,
                base_y_band: None,
                max_step_x: 2.0,
                max_step_y: 8.0,
            },
            Role::Defender => Self {
                home_base_x: 20.0,
                base_y_band: Some((20.0, 80.0)),
                max_step_x: 5.0,
                max_step_y: 5.0,
            },
            Role::Midfielder => Self {
                home_base_x: 40.0,
                base_y_band: Some((30.0, 70.0)),
                max_step_x: 5.0,
                max_step_y: 5.0,
            },
            Role::Forward => Self {
                home_base_x: 60.0,
                base_y_band: Some((20.0, 80.0)),
                max_step_x: 5.0,
                max_step_y: 5.0,
            },
        }
    }

    /// Starting x for a side (home attacks to the right)
    pub fn base_x(&self, side: Side) -> f32 {
        match side {
            Side::Home => self.home_base_x,
            Side::Away => 100.0 - self.home_base_x,
        }
    }
}

/// Clamp a point onto the pitch
pub fn clamp_to_pitch(point: Point) -> Point {
    Point {
        x: point.x.clamp(PITCH_MIN, PITCH_MAX),
        y: point.y.clamp(PITCH_MIN, PITCH_MAX),
    }
}

/// Keep a goalkeeper near their own goal line, overriding the pitch clamp
fn clamp_keeper(side: Side, point: Point) -> Point {
    let (min_x, max_x) = match side {
        Side::Home => (PITCH_MIN, KEEPER_BOX_DEPTH),
        Side::Away => (100.0 - KEEPER_BOX_DEPTH, PITCH_MAX),
    };
    Point {
        x: point.x.clamp(min_x, max_x),
        y: point.y.clamp(KEEPER_Y_BAND.0, KEEPER_Y_BAND.1),
    }
}

/// Role and side dependent starting point
pub fn base_position<R: Rng + ?Sized>(side: Side, role: Role, rng: &mut R) -> Point {
    let profile = MovementProfile::for_role(role);
    let y = match profile.base_y_band {
        Some((lo, hi)) => rng.gen_range(lo..hi),
        None => 50.0,
    };
    Point::new(profile.base_x(side), y)
}

/// Generate `samples` points for a player.
///
/// Each sample perturbs the previous one (not the base), so consecutive
/// samples never move further than the role's maximum step.
pub fn generate_player_trajectory<R: Rng + ?Sized>(
    side: Side,
    role: Role,
    samples: usize,
    rng: &mut R,
) -> Vec<Point> {
    let profile = MovementProfile::for_role(role);
    let mut current = base_position(side, role, rng);
    let mut trajectory = Vec::with_capacity(samples);

    for _ in 0..samples {
        let dx = rng.gen_range(-profile.max_step_x..=profile.max_step_x);
        let dy = rng.gen_range(-profile.max_step_y..=profile.max_step_y);

        let mut next = clamp_to_pitch(Point::new(current.x + dx, current.y + dy));
        if role == Role::Goalkeeper {
            next = clamp_keeper(side, next);
        }

        trajectory.push(next);
        current = next;
    }

    trajectory
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::time::SAMPLE_COUNT;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const ROLES: [Role; 4] = [
        Role::Goalkeeper,
        Role::Defender,
        Role::Midfielder,
        Role::Forward,
    ];

    fn assert_walk_invariants(side: Side, role: Role, trajectory: &[Point]) {
        let profile = MovementProfile::for_role(role);
        assert_eq!(trajectory.len(), SAMPLE_COUNT);
        for p in trajectory {
            assert!((PITCH_MIN..=PITCH_MAX).contains(&p.x), "x out of bounds: {p:?}");
            assert!((PITCH_MIN..=PITCH_MAX).contains(&p.y), "y out of bounds: {p:?}");
        }
        for pair in trajectory.windows(2) {
            assert!((pair[1].x - pair[0].x).abs() <= profile.max_step_x + 1e-4);
            assert!((pair[1].y - pair[0].y).abs() <= profile.max_step_y + 1e-4);
        }
        if role == Role::Goalkeeper {
            for p in trajectory {
                match side {
                    Side::Home => assert!(p.x <= KEEPER_BOX_DEPTH),
                    Side::Away => assert!(p.x >= 100.0 - KEEPER_BOX_DEPTH),
                }
                assert!(p.y >= KEEPER_Y_BAND.0 && p.y <= KEEPER_Y_BAND.1);
            }
        }
    }

    #[test]
    fn every_role_and_side_walks_within_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for side in [Side::Home, Side::Away] {
            for role in ROLES {
                let trajectory = generate_player_trajectory(side, role, SAMPLE_COUNT, &mut rng);
                assert_walk_invariants(side, role, &trajectory);
            }
        }
    }

    #[test]
    fn base_positions_follow_role_and_side() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(base_position(Side::Home, Role::Goalkeeper, &mut rng), Point::new(5.0, 50.0));
        assert_eq!(base_position(Side::Away, Role::Goalkeeper, &mut rng).x, 95.0);
        assert_eq!(base_position(Side::Home, Role::Forward, &mut rng).x, 60.0);
        assert_eq!(base_position(Side::Away, Role::Forward, &mut rng).x, 40.0);

        for _ in 0..50 {
            let mid = base_position(Side::Home, Role::Midfielder, &mut rng);
            assert!(mid.y >= 30.0 && mid.y < 70.0);
            let def = base_position(Side::Away, Role::Defender, &mut rng);
            assert!(def.y >= 20.0 && def.y < 80.0);
        }
    }

    #[test]
    fn first_sample_stays_close_to_base() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let trajectory = generate_player_trajectory(Side::Home, Role::Goalkeeper, 1, &mut rng);
        assert_eq!(trajectory.len(), 1);
        assert!((trajectory[0].x - 5.0).abs() <= 2.0 + 1e-4);
        assert!((trajectory[0].y - 50.0).abs() <= 8.0 + 1e-4);
    }

    #[test]
    fn zero_samples_is_empty() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert!(generate_player_trajectory(Side::Away, Role::Defender, 0, &mut rng).is_empty());
    }

    proptest! {
        #[test]
        fn prop_trajectory_invariants_hold_for_any_seed(seed in any::<u64>(), role_idx in 0usize..4, home in any::<bool>()) {
            let side = if home { Side::Home } else { Side::Away };
            let role = ROLES[role_idx];
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let trajectory = generate_player_trajectory(side, role, SAMPLE_COUNT, &mut rng);
            assert_walk_invariants(side, role, &trajectory);
        }
    }
}
