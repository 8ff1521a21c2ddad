use std::collections::HashMap;

use crate::beatmap::Beatmap;
use crate::error::{Error, Result};
use crate::session::GameSession;
use crate::storage::{BeatmapStore, SessionStore};

#[derive(Debug, Clone, Default)]
pub struct MemoryBeatmapStore {
    beatmaps: HashMap<String, Beatmap>,
}

impl MemoryBeatmapStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.beatmaps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beatmaps.is_empty()
    }
}

impl BeatmapStore for MemoryBeatmapStore {
    fn get_by_id(&self, id: &str) -> Result<Beatmap> {
        self.beatmaps
            .get(id)
            .cloned()
            .ok_or_else(|| Error::BeatmapNotFound(id.to_string()))
    }

    /// Sorted by id so listings are stable
    fn get_all(&self) -> Result<Vec<Beatmap>> {
        let mut all: Vec<Beatmap> = self.beatmaps.values().cloned().collect();
        all.sort_by(|a, b| a.id().cmp(b.id()));
        Ok(all)
    }

    fn save(&mut self, beatmap: &Beatmap) -> Result<()> {
        self.beatmaps.insert(beatmap.id().to_string(), beatmap.clone());
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    sessions: HashMap<String, GameSession>,
    current_id: Option<String>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget which session is current without dropping any
    pub fn clear_current(&mut self) {
        self.current_id = None;
    }
}

impl SessionStore for MemorySessionStore {
    fn save(&mut self, session: GameSession) -> Result<()> {
        let id = session.id().to_string();
        self.sessions.insert(id.clone(), session);
        self.current_id = Some(id);
        Ok(())
    }

    fn current(&self) -> Option<&GameSession> {
        self.current_id
            .as_ref()
            .and_then(|id| self.sessions.get(id))
    }

    fn current_mut(&mut self) -> Option<&mut GameSession> {
        let id = self.current_id.as_ref()?;
        self.sessions.get_mut(id)
    }

    fn get_by_id(&self, id: &str) -> Result<&GameSession> {
        self.sessions
            .get(id)
            .ok_or_else(|| Error::SessionNotFound(id.to_string()))
    }
}
