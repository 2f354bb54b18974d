//! Game driver around the search.
//!
//! Picks a depth for each decision from the clock, applies the opponent's
//! moves from a [`MoveSource`] and reports ours to a [`MoveSink`].

mod controller;
mod error;
pub mod protocol;
pub mod time;

pub use controller::{EngineConfig, GameSession, DEFAULT_TT_MB};
pub use error::SessionError;
pub use protocol::{LineSink, LineSource, MoveSink, MoveSource, TurnInfo};
pub use time::{DepthRequest, LastDecision, TimeConfig};
