//! Match assembly, playback engine and replay loop

pub mod derive;
pub mod playback;
pub mod protocol;
pub mod replay;
pub mod snapshot;

pub use derive::{derive_state, derive_stats, DerivedState, PlayerPosition};
pub use playback::{MatchPhase, PlaybackEngine, PlaybackSpeed, PlaybackState, TickReport};
pub use protocol::{ControlMsg, ReplayUpdate};
pub use replay::{MatchReplay, ReplayHandle};
pub use snapshot::{assemble, load_match, AssembleError, MatchSnapshot};
