//! Session state, change notification, and the dashboard route guard.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data::SnapshotStore;

/// Store key under which the signed-in session is persisted.
pub const SESSION_KEY: &str = "session";

/// Authenticated identity.
///
/// Opaque to everything but the auth service; the guard only consults its
/// presence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub email: String,
    pub token: String,
}

/// Listener invoked on every session change with the new state.
pub type SessionListener = Box<dyn FnMut(Option<&Session>) + Send>;

/// Process-wide session state.
///
/// One mutable slot plus registered listeners, initialized once at process
/// start. Registering a listener immediately delivers the current state,
/// so observers never act on a stale pre-registration view.
#[derive(Default)]
pub struct SessionContext {
    current: Option<Session>,
    listeners: Vec<SessionListener>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current session, if any.
    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    /// Replace the session and notify every registered listener.
    pub fn set(&mut self, session: Option<Session>) {
        self.current = session;
        for listener in &mut self.listeners {
            listener(self.current.as_ref());
        }
    }

    /// Register a listener and immediately deliver the current state.
    pub fn observe(&mut self, mut listener: SessionListener) {
        listener(self.current.as_ref());
        self.listeners.push(listener);
    }

    /// Restore a persisted session from the store, if one exists.
    ///
    /// Called before the first frame so the guard sees a resolved auth
    /// state on startup. An unparseable snapshot means no session.
    pub fn restore(&mut self, store: &dyn SnapshotStore) {
        let restored = store
            .get(SESSION_KEY)
            .and_then(|raw| serde_json::from_str::<Session>(&raw).ok());
        if let Some(ref session) = restored {
            debug!("Restored session for {}", session.email);
        }
        self.set(restored);
    }

    /// Persist the current session (or clear the persisted one).
    pub fn persist(&self, store: &mut dyn SnapshotStore) {
        match &self.current {
            Some(session) => {
                if let Ok(json) = serde_json::to_string(session) {
                    store.set(SESSION_KEY, &json);
                }
            }
            None => store.remove(SESSION_KEY),
        }
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("current", &self.current)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Gate for the dashboard route.
///
/// The dashboard renders only when a session is present at evaluation
/// time; otherwise the caller must redirect to the login screen.
pub struct SessionGuard;

impl SessionGuard {
    pub fn allows(ctx: &SessionContext) -> bool {
        ctx.current().is_some()
    }
}
