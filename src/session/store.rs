use crate::error::DashboardError;
use crate::session::state::Session;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Identifies one dashboard session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[derive(Debug)]
struct Entry {
    session: Session,
    /// Milliseconds since the store's epoch at the last access.
    last_used: AtomicU64,
}

/// All live sessions, keyed by [`SessionId`].
///
/// Each operation takes the lock for the duration of one state transition
/// or read; long-running work (enrichment) happens outside of it and only
/// its result is handed in. Every access marks the session as used, and
/// [`SessionStore::evict_idle`] drops sessions that have not been used for a while.
#[derive(Debug)]
pub struct SessionStore {
    epoch: Instant,
    sessions: RwLock<HashMap<SessionId, Entry>>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self {
            epoch: Instant::now(),
            sessions: RwLock::new(HashMap::new()),
        }
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn now(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }

    /// Registers a new, empty session.
    pub async fn create(&self) -> SessionId {
        let id = SessionId::new();
        let entry = Entry {
            session: Session::new(),
            last_used: AtomicU64::new(self.now()),
        };
        self.sessions.write().await.insert(id, entry);
        id
    }

    /// Removes every session unused for at least `max_idle` and returns how
    /// many were removed.
    pub async fn evict_idle(&self, max_idle: Duration) -> usize {
        let now = self.now();
        let max_idle = max_idle.as_millis() as u64;
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| {
            now.saturating_sub(entry.last_used.load(Ordering::Relaxed)) < max_idle
        });
        before - sessions.len()
    }

    pub async fn contains(&self, id: SessionId) -> bool {
        self.sessions.read().await.contains_key(&id)
    }

    pub async fn remove(&self, id: SessionId) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Runs `f` on the session with exclusive access.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::UnknownSession`] if `id` is not registered,
    /// otherwise whatever `f` returns.
    pub async fn update<T>(
        &self,
        id: SessionId,
        f: impl FnOnce(&mut Session) -> Result<T, DashboardError>,
    ) -> Result<T, DashboardError> {
        let mut sessions = self.sessions.write().await;
        let entry = sessions
            .get_mut(&id)
            .ok_or(DashboardError::UnknownSession(id))?;
        entry.last_used.store(self.now(), Ordering::Relaxed);
        f(&mut entry.session)
    }

    /// Runs `f` on the session with shared access.
    pub async fn read<T>(
        &self,
        id: SessionId,
        f: impl FnOnce(&Session) -> Result<T, DashboardError>,
    ) -> Result<T, DashboardError> {
        let sessions = self.sessions.read().await;
        let entry = sessions
            .get(&id)
            .ok_or(DashboardError::UnknownSession(id))?;
        entry.last_used.store(self.now(), Ordering::Relaxed);
        f(&entry.session)
    }
}
