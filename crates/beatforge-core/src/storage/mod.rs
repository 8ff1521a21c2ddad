//! Persistence seams.
//!
//! This module contains:
//! - `BeatmapStore`, `SessionStore` - the storage traits the engine depends on
//! - `MemoryBeatmapStore`, `MemorySessionStore` - in-process implementations
//! - `JsonBeatmapStore` - one pretty-printed JSON file per beatmap
//! - `RecordLog` - append-only JSON log of finished plays

mod json;
mod memory;
mod record_log;

pub use json::*;
pub use memory::*;
pub use record_log::*;

use crate::beatmap::Beatmap;
use crate::error::Result;
use crate::session::GameSession;

/// Keyed beatmap storage
pub trait BeatmapStore {
    /// Fails with `Error::BeatmapNotFound` when no beatmap has this id
    fn get_by_id(&self, id: &str) -> Result<Beatmap>;

    fn get_all(&self) -> Result<Vec<Beatmap>>;

    /// Insert or replace by id
    fn save(&mut self, beatmap: &Beatmap) -> Result<()>;
}

/// Session storage with a notion of the session currently being played
pub trait SessionStore {
    /// Store the session and make it current
    fn save(&mut self, session: GameSession) -> Result<()>;

    fn current(&self) -> Option<&GameSession>;

    fn current_mut(&mut self) -> Option<&mut GameSession>;

    /// Fails with `Error::SessionNotFound` when no session has this id
    fn get_by_id(&self, id: &str) -> Result<&GameSession>;
}
