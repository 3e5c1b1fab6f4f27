//! Domain layer for the Scout school-discovery client.
//!
//! Holds the canonical data model, the error taxonomy, the trait seams the
//! infrastructure layer implements ([`storage::KeyValueStore`],
//! [`gateway::SchoolGateway`]), and the navigation state machine.

pub mod config;
pub mod error;
pub mod gateway;
pub mod interaction;
pub mod navigation;
pub mod school;
pub mod session;
pub mod storage;

// Re-export common error type
pub use error::{Result, ScoutError};
