//! Best-effort interaction analytics records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What the user did with a school.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
    View,
    Favorite,
}

impl InteractionKind {
    /// The wire name of this kind, as the analytics endpoint expects it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Favorite => "favorite",
        }
    }
}

impl std::fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An analytics record of a user viewing or favoriting a school.
///
/// Ephemeral: constructed, sent, then discarded. Never persisted locally.
/// At-most-once delivery is not guaranteed; retries may duplicate the event
/// on the remote side, which is acceptable because interaction logs are
/// append-only analytics rather than authoritative state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionEvent {
    pub user_id: String,
    pub school_name: String,
    pub kind: InteractionKind,
    pub occurred_at: DateTime<Utc>,
}

impl InteractionEvent {
    /// Builds an event stamped with the current time.
    pub fn now(
        user_id: impl Into<String>,
        school_name: impl Into<String>,
        kind: InteractionKind,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            school_name: school_name.into(),
            kind,
            occurred_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_wire_names() {
        assert_eq!(InteractionKind::View.as_str(), "view");
        assert_eq!(InteractionKind::Favorite.as_str(), "favorite");
        assert_eq!(
            serde_json::to_string(&InteractionKind::Favorite).unwrap(),
            "\"favorite\""
        );
    }
}
