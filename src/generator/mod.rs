//! Synthetic match data: fixture, events, player and ball movement

pub mod ball;
pub mod events;
pub mod fixture;
pub mod positions;

pub use ball::generate_ball_trajectory;
pub use events::{EventSource, ScriptedEvents, StaticEvents};
pub use fixture::{Fixture, RosterEntry};
pub use positions::generate_player_trajectory;
