//! Typed seam over the remote school-discovery API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::interaction::InteractionEvent;
use crate::school::{RecommendedSchool, School};
use crate::session::Session;

/// Acknowledgment returned by a successful registration.
///
/// Registration does not log the user in; the remote service only confirms
/// the account was created and the caller authenticates separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterAck {
    pub message: String,
}

/// Typed client for the remote school-discovery service.
///
/// Implementations translate every transport-level failure (timeout,
/// non-success status, malformed body) into one of the typed error variants
/// `Validation`, `Auth`, or `Network`; no raw transport error crosses this
/// boundary. Field-shape normalization to the canonical [`School`] record
/// also happens entirely behind this trait.
#[async_trait]
pub trait SchoolGateway: Send + Sync {
    /// Authenticates and returns the established session.
    ///
    /// Fails with `Auth` on rejected credentials and `Validation` on empty
    /// input, before any network call is made.
    async fn login(&self, username: &str, password: &str) -> Result<Session>;

    /// Creates an account and returns the confirmation.
    ///
    /// Fails with `Validation` when the input is malformed or the username
    /// is already taken.
    async fn register(&self, username: &str, password: &str, name: &str) -> Result<RegisterAck>;

    /// Returns the full ordered school catalog.
    async fn list_schools(&self) -> Result<Vec<School>>;

    /// Returns personalized recommendations for a user.
    ///
    /// An empty result means "no recommendations available yet", not an
    /// error.
    async fn get_recommendations(&self, user_id: &str) -> Result<Vec<RecommendedSchool>>;

    /// Reports a view/favorite interaction event.
    async fn report_interaction(&self, event: &InteractionEvent) -> Result<()>;
}
