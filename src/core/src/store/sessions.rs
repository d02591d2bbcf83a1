use crate::live::LiveSession;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Live sessions of matches that are not finalized yet.
pub trait SessionStore: Send + Sync {
    fn insert(&self, session: LiveSession);

    fn get(&self, match_id: u32) -> Option<LiveSession>;

    /// Replaces a stored session. Returns `false` when the session is gone,
    /// a removed session is never brought back.
    fn update(&self, session: &LiveSession) -> bool;

    fn remove(&self, match_id: u32) -> Option<LiveSession>;

    fn all(&self) -> Vec<LiveSession>;
}

#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<u32, LiveSession>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn insert(&self, session: LiveSession) {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        sessions.insert(session.match_id, session);
    }

    fn get(&self, match_id: u32) -> Option<LiveSession> {
        let sessions = self.sessions.read().unwrap_or_else(PoisonError::into_inner);
        sessions.get(&match_id).cloned()
    }

    fn update(&self, session: &LiveSession) -> bool {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);

        match sessions.get_mut(&session.match_id) {
            Some(stored) => {
                *stored = session.clone();
                true
            }
            None => false,
        }
    }

    fn remove(&self, match_id: u32) -> Option<LiveSession> {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        sessions.remove(&match_id)
    }

    fn all(&self) -> Vec<LiveSession> {
        let sessions = self.sessions.read().unwrap_or_else(PoisonError::into_inner);

        let mut result: Vec<LiveSession> = sessions.values().cloned().collect();
        result.sort_by_key(|s| s.match_id);
        result
    }
}
