use std::collections::HashMap;
use std::sync::Mutex;

use tracing::debug;

use super::{SessionId, SessionState};

/// Keyed table of live session records.
///
/// One instance per host process, shared via `Arc<SessionStore>` between
/// the event hooks and the tools. Every read-modify-write runs inside
/// [`with_session`](Self::with_session) under the table lock, so a host
/// that dispatches two events for one session concurrently cannot
/// interleave their updates.
pub struct SessionStore {
    sessions: Mutex<HashMap<SessionId, SessionState>>,
}

impl SessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    fn table(&self) -> std::sync::MutexGuard<'_, HashMap<SessionId, SessionState>> {
        self.sessions.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Install a fresh default record for `id`, replacing any existing one.
    pub fn create(&self, id: &SessionId) {
        if self
            .table()
            .insert(id.clone(), SessionState::default())
            .is_some()
        {
            debug!(session = %id, "session re-created; previous record discarded");
        }
    }

    /// Drop the record for `id`.
    pub fn remove(&self, id: &SessionId) -> Option<SessionState> {
        self.table().remove(id)
    }

    /// Run `f` against the record for `id`, creating a default one first if
    /// the session is unknown.
    pub fn with_session<R>(&self, id: &SessionId, f: impl FnOnce(&mut SessionState) -> R) -> R {
        let mut table = self.table();
        let state = table.entry(id.clone()).or_insert_with(|| {
            debug!(session = %id, "no record for session; starting from defaults");
            SessionState::default()
        });
        f(state)
    }

    /// Copy of the record for `id` (get-or-default).
    pub fn snapshot(&self, id: &SessionId) -> SessionState {
        self.with_session(id, |s| s.clone())
    }

    /// Copy of the record for `id`, without creating one.
    pub fn get(&self, id: &SessionId) -> Option<SessionState> {
        self.table().get(id).cloned()
    }

    pub fn contains(&self, id: &SessionId) -> bool {
        self.table().contains_key(id)
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.table().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phase::TddPhase;
    use std::sync::Arc;

    fn id(s: &str) -> SessionId {
        SessionId::new(s).unwrap()
    }

    #[test]
    fn new_store_is_empty() {
        let store = SessionStore::new();
        assert!(store.is_empty());
        assert!(store.get(&id("a")).is_none());
    }

    #[test]
    fn create_installs_defaults_and_replaces() {
        let store = SessionStore::new();
        store.create(&id("a"));
        store.with_session(&id("a"), |s| {
            s.apply_phase(TddPhase::Red);
        });
        assert_eq!(store.snapshot(&id("a")).phase(), TddPhase::Red);

        store.create(&id("a"));
        assert_eq!(store.snapshot(&id("a")), SessionState::default());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn with_session_defaults_unknown_ids() {
        let store = SessionStore::new();
        let phase = store.with_session(&id("ghost"), |s| s.phase());
        assert_eq!(phase, TddPhase::None);
        assert!(store.contains(&id("ghost")));
    }

    #[test]
    fn remove_discards_record() {
        let store = SessionStore::new();
        store.create(&id("a"));
        assert!(store.remove(&id("a")).is_some());
        assert!(!store.contains(&id("a")));
        assert!(store.remove(&id("a")).is_none());
    }

    #[test]
    fn sessions_are_isolated() {
        let store = SessionStore::new();
        store.with_session(&id("a"), |s| {
            s.apply_phase(TddPhase::Green);
        });
        assert_eq!(store.snapshot(&id("b")).phase(), TddPhase::None);
        assert_eq!(store.snapshot(&id("a")).phase(), TddPhase::Green);
    }

    #[test]
    fn concurrent_updates_do_not_interleave() {
        let store = Arc::new(SessionStore::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        store.with_session(&id("shared"), |s| s.record_commit());
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(store.snapshot(&id("shared")).commits_since_review, 800);
    }
}
