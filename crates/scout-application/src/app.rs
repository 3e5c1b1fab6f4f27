//! Service container wiring the client core together.

use std::sync::{Arc, Mutex};

use scout_core::Result;
use scout_core::config::ClientConfig;
use scout_core::gateway::SchoolGateway;
use scout_core::interaction::InteractionKind;
use scout_core::navigation::{NavigationController, NavigationState, Screen, ScreenParams};
use scout_core::storage::KeyValueStore;
use scout_infrastructure::{HttpSchoolGateway, JsonFileStore};

use crate::favorites_store::FavoritesStore;
use crate::interaction_reporter::InteractionReporter;
use crate::retry::RetryPolicy;
use crate::session_store::SessionStore;

/// The client core, constructed once at startup.
///
/// Owns every service object and hands them to the rendering layer by
/// reference; nothing in the core is reached through ambient or global
/// lookup. Navigation lives here in memory only, so a restart always
/// returns to the initial screen.
pub struct ScoutApp {
    config: ClientConfig,
    gateway: Arc<dyn SchoolGateway>,
    reporter: Arc<InteractionReporter>,
    sessions: Arc<SessionStore>,
    favorites: Arc<FavoritesStore>,
    navigation: Mutex<NavigationController>,
}

impl ScoutApp {
    /// Builds the app against the real infrastructure: file-backed
    /// storage at the configured (or default) data directory and the HTTP
    /// gateway at the configured base URL.
    ///
    /// # Errors
    ///
    /// Fails with a storage error if the data directory cannot be
    /// resolved or created.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let data_dir = match &config.data_dir {
            Some(dir) => dir.clone(),
            None => scout_infrastructure::paths::default_data_dir()?,
        };
        let store: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::new(data_dir)?);
        let gateway: Arc<dyn SchoolGateway> = Arc::new(HttpSchoolGateway::new(&config));
        Ok(Self::with_parts(config, store, gateway))
    }

    /// Builds the app over explicit storage and gateway implementations.
    pub fn with_parts(
        config: ClientConfig,
        store: Arc<dyn KeyValueStore>,
        gateway: Arc<dyn SchoolGateway>,
    ) -> Self {
        let policy = RetryPolicy::from_config(&config);
        let reporter = Arc::new(InteractionReporter::new(Arc::clone(&gateway), policy));
        let sessions = Arc::new(SessionStore::new(Arc::clone(&store), Arc::clone(&gateway)));
        let favorites = Arc::new(FavoritesStore::new(
            store,
            Arc::clone(&sessions),
            Arc::clone(&reporter),
        ));

        Self {
            config,
            gateway,
            reporter,
            sessions,
            favorites,
            navigation: Mutex::new(NavigationController::new()),
        }
    }

    /// Hydrates both stores from persisted state. Call before the first
    /// render of any screen that depends on identity or favorites.
    pub async fn bootstrap(&self) {
        self.sessions.load().await;
        self.favorites.load().await;
        tracing::debug!("Client core bootstrapped");
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The gateway, for screens that fetch the catalog or
    /// recommendations directly.
    pub fn gateway(&self) -> &Arc<dyn SchoolGateway> {
        &self.gateway
    }

    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    pub fn favorites(&self) -> &Arc<FavoritesStore> {
        &self.favorites
    }

    /// Reports a `view` interaction for a school on a detached task.
    ///
    /// Best-effort: called when the user opens a school's details, and
    /// never blocks or fails the navigation that triggered it. Without an
    /// active session there is nothing to attribute the view to, so it is
    /// skipped.
    pub async fn record_school_view(&self, school_name: &str) {
        match self.sessions.current().await {
            Some(session) => {
                let _ = self.reporter.record_detached(
                    session.user_id,
                    school_name.to_string(),
                    InteractionKind::View,
                );
            }
            None => tracing::debug!("No active session; skipping view interaction report"),
        }
    }

    /// The currently active screen and its parameters.
    pub fn current_screen(&self) -> NavigationState {
        self.navigation.lock().unwrap().current().clone()
    }

    /// Replaces the live navigation state.
    pub fn navigate(&self, screen: Screen, params: Option<ScreenParams>) {
        self.navigation.lock().unwrap().transition(screen, params);
    }

    /// Replaces the live navigation state from a screen name as sent by
    /// the rendering layer.
    ///
    /// # Errors
    ///
    /// Fails with `InvalidScreen` for an unknown name, leaving the prior
    /// state unchanged.
    pub fn navigate_named(
        &self,
        name: &str,
        params: Option<ScreenParams>,
    ) -> Result<NavigationState> {
        let mut navigation = self.navigation.lock().unwrap();
        navigation
            .transition_named(name, params)
            .map(|state| state.clone())
    }
}
