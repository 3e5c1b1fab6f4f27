//! Durable session ownership.

use std::sync::Arc;

use tokio::sync::RwLock;

use scout_core::Result;
use scout_core::gateway::{RegisterAck, SchoolGateway};
use scout_core::session::Session;
use scout_core::storage::KeyValueStore;

/// Storage key for the persisted session record. This store is its sole
/// writer.
pub const SESSION_STORAGE_KEY: &str = "user";

/// Owns the authenticated user's identity across screens and restarts.
///
/// Holds `Option<Session>`; the in-memory state is authoritative for the
/// running process and the persisted record under [`SESSION_STORAGE_KEY`]
/// rehydrates it on the next start.
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
    gateway: Arc<dyn SchoolGateway>,
    session: RwLock<Option<Session>>,
}

impl SessionStore {
    /// Creates a store with no session loaded; call [`load`](Self::load)
    /// before rendering anything that depends on identity.
    pub fn new(store: Arc<dyn KeyValueStore>, gateway: Arc<dyn SchoolGateway>) -> Self {
        Self {
            store,
            gateway,
            session: RwLock::new(None),
        }
    }

    /// Hydrates the in-memory session from storage.
    ///
    /// An absent or unreadable record leaves the store signed out; load
    /// failures are logged rather than surfaced since the client can
    /// always fall back to a fresh login.
    pub async fn load(&self) {
        match self.store.get(SESSION_STORAGE_KEY).await {
            Ok(Some(json)) => match serde_json::from_str::<Session>(&json) {
                Ok(session) => {
                    tracing::debug!("Restored session for user {}", session.user_id);
                    *self.session.write().await = Some(session);
                }
                Err(e) => tracing::warn!("Discarding unreadable session record: {}", e),
            },
            Ok(None) => {}
            Err(e) => tracing::warn!("Failed to load persisted session: {}", e),
        }
    }

    /// The current session, if any.
    pub async fn current(&self) -> Option<Session> {
        self.session.read().await.clone()
    }

    /// Authenticates against the remote service and holds the resulting
    /// session.
    ///
    /// # Errors
    ///
    /// `Auth` and `Validation` errors propagate without mutating state. A
    /// storage failure after a successful login also propagates, with the
    /// in-memory session already established (see
    /// [`set_session`](Self::set_session)).
    pub async fn login(&self, username: &str, password: &str) -> Result<Session> {
        let session = self.gateway.login(username, password).await?;
        tracing::info!("Logged in as {} ({})", session.username, session.user_id);
        self.set_session(Some(session.clone())).await?;
        Ok(session)
    }

    /// Creates an account on the remote service.
    ///
    /// Registration does not establish a session; the caller logs in (or
    /// calls [`set_session`](Self::set_session)) afterwards.
    pub async fn register(&self, username: &str, password: &str, name: &str) -> Result<RegisterAck> {
        let ack = self.gateway.register(username, password, name).await?;
        tracing::info!("Registered user {}", username);
        Ok(ack)
    }

    /// Replaces the held session, persisting or removing the record.
    ///
    /// The in-memory state is updated before the storage write, so a
    /// storage failure leaves the process usable.
    ///
    /// # Errors
    ///
    /// A storage failure is surfaced so the caller knows persistence did
    /// not occur even though the in-memory state changed.
    pub async fn set_session(&self, session: Option<Session>) -> Result<()> {
        *self.session.write().await = session.clone();
        match session {
            Some(session) => {
                let json = serde_json::to_string(&session)?;
                self.store.set(SESSION_STORAGE_KEY, json).await
            }
            None => self.store.remove(SESSION_STORAGE_KEY).await,
        }
    }

    /// Signs out unconditionally.
    ///
    /// The in-memory session is always cleared; a storage removal failure
    /// is logged and swallowed so logout cannot be blocked by storage.
    pub async fn logout(&self) {
        *self.session.write().await = None;
        if let Err(e) = self.store.remove(SESSION_STORAGE_KEY).await {
            tracing::warn!("Failed to remove persisted session: {}", e);
        }
        tracing::info!("Logged out");
    }
}
