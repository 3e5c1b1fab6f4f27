//! Application layer for Scout.
//!
//! Owns the durable client state (session, favorites), the best-effort
//! interaction reporting pipeline, and the service container that wires
//! the core together at startup.

pub mod app;
pub mod favorites_store;
pub mod interaction_reporter;
pub mod retry;
pub mod session_store;

#[cfg(test)]
mod test_support;

pub use app::ScoutApp;
pub use favorites_store::FavoritesStore;
pub use interaction_reporter::InteractionReporter;
pub use retry::RetryPolicy;
pub use session_store::SessionStore;
