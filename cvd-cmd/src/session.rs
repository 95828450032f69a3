//! Per-session selection storage.

use cvd_views::selection::Selection;
use log::debug;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use uuid::Uuid;

/// Sessions untouched for this long are dropped.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

struct Session {
    selection: Arc<Mutex<Selection>>,
    last_used: Instant,
}

/// Isolated [`Selection`] state for each dashboard session.
///
/// Each session's selection sits behind its own mutex: holding it while an
/// event is applied and the views resolved keeps one session's events in
/// arrival order without blocking other sessions. Sessions idle for longer
/// than the store's timeout are evicted on [`create`](Self::create) and by
/// [`evict_idle`](Self::evict_idle).
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Session>>,
    idle_timeout: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_idle_timeout(DEFAULT_IDLE_TIMEOUT)
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_idle_timeout(idle_timeout: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_timeout,
        }
    }

    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }

    /// Open a session with the default selection.
    pub async fn create(&self) -> (Uuid, Arc<Mutex<Selection>>) {
        let id = Uuid::new_v4();
        let selection = Arc::new(Mutex::new(Selection::default()));
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        Self::retain_active(&mut sessions, now, self.idle_timeout);
        sessions.insert(
            id,
            Session {
                selection: selection.clone(),
                last_used: now,
            },
        );
        (id, selection)
    }

    /// Look up a live session and mark it as used.
    pub async fn get(&self, id: &Uuid) -> Option<Arc<Mutex<Selection>>> {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(id)?;
        if now.duration_since(session.last_used) > self.idle_timeout {
            sessions.remove(id);
            debug!("session: {} expired", id);
            return None;
        }
        session.last_used = now;
        Some(session.selection.clone())
    }

    /// Close a session. Returns `false` for unknown ids.
    pub async fn remove(&self, id: &Uuid) -> bool {
        self.sessions.write().await.remove(id).is_some()
    }

    /// Drop every idle session; returns how many were removed.
    pub async fn evict_idle(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        Self::retain_active(&mut sessions, Instant::now(), self.idle_timeout)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    fn retain_active(
        sessions: &mut HashMap<Uuid, Session>,
        now: Instant,
        idle_timeout: Duration,
    ) -> usize {
        let before = sessions.len();
        sessions.retain(|_, s| now.duration_since(s.last_used) <= idle_timeout);
        let evicted = before - sessions.len();
        if evicted > 0 {
            debug!("session: evicted {} idle sessions", evicted);
        }
        evicted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cvd_views::selection::UiEvent;
    use cvd_worldometer::DateIndex;

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = SessionStore::new();
        let (first, first_selection) = store.create().await;
        let (second, _) = store.create().await;
        assert_ne!(first, second);
        assert_eq!(store.len().await, 2);

        first_selection.lock().await.apply(
            UiEvent::Country1Changed {
                country: Some("Japan".to_string()),
            },
            &DateIndex::default(),
        );

        let second_selection = store.get(&second).await.unwrap();
        assert_eq!(second_selection.lock().await.country1.as_deref(), Some("China"));
        let first_again = store.get(&first).await.unwrap();
        assert_eq!(first_again.lock().await.country1.as_deref(), Some("Japan"));
    }

    #[tokio::test]
    async fn test_remove_session() {
        let store = SessionStore::new();
        let (id, _) = store.create().await;
        assert!(store.remove(&id).await);
        assert!(!store.remove(&id).await);
        assert!(store.get(&id).await.is_none());
    }

    #[tokio::test]
    async fn test_idle_sessions_are_evicted() {
        tokio::time::pause();
        let store = SessionStore::with_idle_timeout(Duration::from_secs(60));
        let (idle, _) = store.create().await;
        let (active, _) = store.create().await;

        tokio::time::advance(Duration::from_secs(45)).await;
        assert!(store.get(&active).await.is_some());

        tokio::time::advance(Duration::from_secs(30)).await;
        assert_eq!(store.evict_idle().await, 1);
        assert!(store.get(&idle).await.is_none());
        assert!(store.get(&active).await.is_some());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_create_sweeps_idle_sessions() {
        tokio::time::pause();
        let store = SessionStore::with_idle_timeout(Duration::from_secs(60));
        let (stale, _) = store.create().await;

        tokio::time::advance(Duration::from_secs(61)).await;
        let (fresh, _) = store.create().await;
        assert_eq!(store.len().await, 1);
        assert!(store.get(&stale).await.is_none());
        assert!(store.get(&fresh).await.is_some());
    }
}
