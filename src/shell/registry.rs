//! Live page sessions, keyed by the id embedded in each rendered page.

use super::state::PresentationShell;
use super::ticker::ClockSubscription;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use uuid::Uuid;

struct Session {
    shell: PresentationShell,
    created: Instant,
    connected: bool,
}

pub struct ShellRegistry {
    sessions: RwLock<HashMap<Uuid, Session>>,
    ttl: Duration,
}

impl ShellRegistry {
    /// `ttl` bounds how long a rendered page may wait before opening its
    /// clock stream.
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub async fn insert(&self, id: Uuid, shell: PresentationShell) {
        self.sessions.write().await.insert(
            id,
            Session {
                shell,
                created: Instant::now(),
                connected: false,
            },
        );
    }

    /// Start the session's clock and hand back its time feed. `None` when the
    /// session is unknown, was never ready, or already has a stream open.
    pub async fn connect(&self, id: Uuid, period: Duration) -> Option<ClockSubscription> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id)?;
        // One stream per session: its guard owns the teardown
        if session.connected {
            tracing::warn!(session = %id, "clock stream already open, refusing another");
            return None;
        }
        match session.shell.start_clock(period) {
            Ok(rx) => {
                session.connected = true;
                tracing::debug!(session = %id, "clock stream connected");
                Some(rx)
            }
            Err(e) => {
                tracing::warn!(session = %id, error = %e, "clock stream refused");
                None
            }
        }
    }

    pub async fn teardown(&self, id: Uuid) -> bool {
        match self.sessions.write().await.remove(&id) {
            Some(mut session) => {
                session.shell.teardown();
                tracing::debug!(session = %id, "session torn down");
                true
            }
            None => false,
        }
    }

    /// Drop sessions whose page never opened its clock stream in time.
    pub async fn sweep(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        let ttl = self.ttl;
        sessions.retain(|_, s| s.connected || s.created.elapsed() < ttl);
        let removed = before - sessions.len();
        if removed > 0 {
            tracing::info!(removed, "swept stale sessions");
        }
        removed
    }

    pub fn spawn_sweeper(self: &Arc<Self>, every: Duration) -> tokio::task::JoinHandle<()> {
        let registry = Arc::clone(self);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            interval.tick().await;
            loop {
                interval.tick().await;
                registry.sweep().await;
            }
        })
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn contains(&self, id: Uuid) -> bool {
        self.sessions.read().await.contains_key(&id)
    }

    /// Tears the session down when dropped, e.g. when the client disconnects.
    pub fn guard(self: &Arc<Self>, id: Uuid) -> SessionGuard {
        SessionGuard {
            registry: Arc::clone(self),
            id,
        }
    }
}

pub struct SessionGuard {
    registry: Arc<ShellRegistry>,
    id: Uuid,
}

impl SessionGuard {
    pub fn id(&self) -> Uuid {
        self.id
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        let registry = Arc::clone(&self.registry);
        let id = self.id;
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    registry.teardown(id).await;
                });
            }
            Err(_) => tracing::warn!(session = %id, "no runtime to tear down session"),
        }
    }
}
