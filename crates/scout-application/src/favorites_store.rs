//! Durable favorites ownership.

use std::sync::Arc;

use tokio::sync::RwLock;

use scout_core::Result;
use scout_core::interaction::InteractionKind;
use scout_core::school::School;
use scout_core::storage::KeyValueStore;

use crate::interaction_reporter::InteractionReporter;
use crate::session_store::SessionStore;

/// Storage key for the persisted favorites collection. This store is its
/// sole writer.
pub const FAVORITES_STORAGE_KEY: &str = "favorites";

/// Owns the user's favorite-school set.
///
/// An ordered collection unique by school id; insertion order is the
/// display order. Entries are snapshots taken at add-time and never
/// mutated in place. Reads never touch the network.
pub struct FavoritesStore {
    store: Arc<dyn KeyValueStore>,
    sessions: Arc<SessionStore>,
    reporter: Arc<InteractionReporter>,
    favorites: RwLock<Vec<School>>,
}

impl FavoritesStore {
    /// Creates a store with no favorites loaded; call
    /// [`load`](Self::load) before first render.
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        sessions: Arc<SessionStore>,
        reporter: Arc<InteractionReporter>,
    ) -> Self {
        Self {
            store,
            sessions,
            reporter,
            favorites: RwLock::new(Vec::new()),
        }
    }

    /// Hydrates the collection from storage.
    ///
    /// An absent or unreadable record leaves the collection empty; load
    /// failures are logged rather than surfaced.
    pub async fn load(&self) {
        match self.store.get(FAVORITES_STORAGE_KEY).await {
            Ok(Some(json)) => match serde_json::from_str::<Vec<School>>(&json) {
                Ok(favorites) => {
                    tracing::debug!("Restored {} favorites", favorites.len());
                    *self.favorites.write().await = favorites;
                }
                Err(e) => tracing::warn!("Discarding unreadable favorites record: {}", e),
            },
            Ok(None) => {}
            Err(e) => tracing::warn!("Failed to load persisted favorites: {}", e),
        }
    }

    /// The favorites in display order.
    pub async fn list(&self) -> Vec<School> {
        self.favorites.read().await.clone()
    }

    /// Whether a school id is already favorited.
    pub async fn is_favorite(&self, school_id: &str) -> bool {
        self.favorites
            .read()
            .await
            .iter()
            .any(|school| school.id == school_id)
    }

    /// Adds a school snapshot to the favorites.
    ///
    /// Returns `false` without error if the school is already a favorite
    /// (idempotent); the caller should treat that as "already a favorite".
    /// On a new entry the whole collection is persisted and a `favorite`
    /// interaction is reported on a detached task, without awaiting its
    /// outcome.
    ///
    /// # Errors
    ///
    /// A storage failure is surfaced so the caller knows persistence did
    /// not occur even though the in-memory collection changed.
    pub async fn add_favorite(&self, school: School) -> Result<bool> {
        let snapshot = {
            let mut favorites = self.favorites.write().await;
            if favorites.iter().any(|f| f.id == school.id) {
                tracing::debug!("School {} is already a favorite", school.id);
                return Ok(false);
            }
            favorites.push(school.clone());
            favorites.clone()
        };

        self.persist(&snapshot).await?;

        match self.sessions.current().await {
            Some(session) => {
                let _ = self.reporter.record_detached(
                    session.user_id,
                    school.name.clone(),
                    InteractionKind::Favorite,
                );
            }
            None => tracing::debug!("No active session; skipping favorite interaction report"),
        }

        Ok(true)
    }

    /// Removes a school from the favorites by id.
    ///
    /// Returns `false` without error if the school was not a favorite.
    /// Follows the same persistence contract as
    /// [`add_favorite`](Self::add_favorite).
    pub async fn remove_favorite(&self, school_id: &str) -> Result<bool> {
        let snapshot = {
            let mut favorites = self.favorites.write().await;
            let before = favorites.len();
            favorites.retain(|f| f.id != school_id);
            if favorites.len() == before {
                return Ok(false);
            }
            favorites.clone()
        };

        self.persist(&snapshot).await?;
        Ok(true)
    }

    async fn persist(&self, favorites: &[School]) -> Result<()> {
        let json = serde_json::to_string(favorites)?;
        self.store.set(FAVORITES_STORAGE_KEY, json).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retry::RetryPolicy;
    use crate::test_support::{MockGateway, MockStore, sample_school, wait_for_reports};

    struct Fixture {
        store: Arc<MockStore>,
        gateway: Arc<MockGateway>,
        sessions: Arc<SessionStore>,
        favorites: FavoritesStore,
    }

    fn make_fixture() -> Fixture {
        let store = Arc::new(MockStore::new());
        let gateway = Arc::new(MockGateway::new());
        let sessions = Arc::new(SessionStore::new(store.clone(), gateway.clone()));
        let reporter = Arc::new(InteractionReporter::new(
            gateway.clone(),
            RetryPolicy::default(),
        ));
        let favorites = FavoritesStore::new(store.clone(), sessions.clone(), reporter);
        Fixture {
            store,
            gateway,
            sessions,
            favorites,
        }
    }

    #[tokio::test]
    async fn test_add_favorite_is_idempotent() {
        let fx = make_fixture();
        let school = sample_school("s1");

        assert!(fx.favorites.add_favorite(school.clone()).await.unwrap());
        assert!(!fx.favorites.add_favorite(school.clone()).await.unwrap());

        let list = fx.favorites.list().await;
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, "s1");
    }

    #[tokio::test]
    async fn test_insertion_order_survives_restart() {
        let fx = make_fixture();
        for id in ["s3", "s1", "s2"] {
            fx.favorites.add_favorite(sample_school(id)).await.unwrap();
        }

        let reopened = FavoritesStore::new(
            fx.store.clone(),
            fx.sessions.clone(),
            Arc::new(InteractionReporter::new(
                fx.gateway.clone(),
                RetryPolicy::default(),
            )),
        );
        reopened.load().await;

        let ids: Vec<String> = reopened
            .list()
            .await
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, ["s3", "s1", "s2"]);
    }

    #[tokio::test]
    async fn test_add_reports_exactly_one_favorite_interaction() {
        let fx = make_fixture();
        fx.sessions.login("admin", "admin").await.unwrap();

        fx.favorites
            .add_favorite(sample_school("s1"))
            .await
            .unwrap();
        wait_for_reports(&fx.gateway, 1).await;

        // The duplicate add is a no-op and must not report again
        fx.favorites
            .add_favorite(sample_school("s1"))
            .await
            .unwrap();
        tokio::task::yield_now().await;

        let events = fx.gateway.interactions();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].user_id, "u1");
        assert_eq!(events[0].school_name, "School s1");
        assert_eq!(events[0].kind, InteractionKind::Favorite);
    }

    #[tokio::test]
    async fn test_add_without_session_skips_reporting() {
        let fx = make_fixture();
        fx.favorites
            .add_favorite(sample_school("s1"))
            .await
            .unwrap();

        tokio::task::yield_now().await;
        assert_eq!(fx.gateway.interaction_count(), 0);
        assert_eq!(fx.favorites.list().await.len(), 1);
    }

    #[tokio::test]
    async fn test_add_succeeds_locally_when_reporting_fails() {
        let fx = make_fixture();
        fx.sessions.login("admin", "admin").await.unwrap();
        fx.gateway.fail_first_reports(u32::MAX);

        // Local favoriting must not block or fail on analytics
        assert!(
            fx.favorites
                .add_favorite(sample_school("s1"))
                .await
                .unwrap()
        );
        assert!(fx.favorites.is_favorite("s1").await);
    }

    #[tokio::test]
    async fn test_storage_failure_surfaced_on_add() {
        let fx = make_fixture();
        fx.store.fail_writes(true);

        let err = fx
            .favorites
            .add_favorite(sample_school("s1"))
            .await
            .unwrap_err();
        assert!(err.is_storage());
        // The in-memory change already happened; the error reports the
        // divergence
        assert!(fx.favorites.is_favorite("s1").await);
    }

    #[tokio::test]
    async fn test_unreadable_record_leaves_collection_empty() {
        let fx = make_fixture();
        fx.store
            .set(FAVORITES_STORAGE_KEY, "not json".to_string())
            .await
            .unwrap();

        fx.favorites.load().await;
        assert!(fx.favorites.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_remove_favorite_persists_and_is_idempotent() {
        let fx = make_fixture();
        fx.favorites
            .add_favorite(sample_school("s1"))
            .await
            .unwrap();
        fx.favorites
            .add_favorite(sample_school("s2"))
            .await
            .unwrap();

        assert!(fx.favorites.remove_favorite("s1").await.unwrap());
        assert!(!fx.favorites.remove_favorite("s1").await.unwrap());

        let persisted: Vec<School> =
            serde_json::from_str(&fx.store.raw(FAVORITES_STORAGE_KEY).unwrap()).unwrap();
        assert_eq!(persisted.len(), 1);
        assert_eq!(persisted[0].id, "s2");
    }
}
