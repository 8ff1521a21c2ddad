//! Gameplay sessions.
//!
//! This module contains:
//! - `SessionState` - READY, PLAYING, PAUSED, COMPLETED
//! - `GameSession` - drives one beatmap through externally supplied time
//! - `PlayRecord` - the persisted summary of a finished session

mod game_session;
mod record;
mod state;

pub use game_session::*;
pub use record::*;
pub use state::*;
