//! The authenticated identity held by the client.

use serde::{Deserialize, Serialize};

/// An authenticated session.
///
/// At most one session exists at any time, and it is never partially
/// populated: either all fields are present or there is no session at all.
/// Created on a successful login acknowledgment, destroyed on logout,
/// persisted as a single record under the `"user"` storage key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub name: String,
    pub username: String,
}
