//! Match Replay - simulation and timeline engine for a match visualization dashboard
//!
//! Data flows one way:
//! - `generator` synthesizes player and ball movement plus the event script
//! - `game::snapshot` assembles them into an immutable [`game::MatchSnapshot`]
//! - `game::playback` owns the scrubbable cursor and the half/full time gates
//! - `game::derive` projects snapshot + cursor into what gets drawn
//! - `game::replay` drives the engine in real time on a tokio task

pub mod config;
pub mod game;
pub mod generator;
pub mod model;
pub mod util;
pub mod view;
