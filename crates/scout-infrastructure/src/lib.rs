//! Infrastructure layer for Scout.
//!
//! Concrete implementations of the core trait seams: file-backed durable
//! storage and the reqwest-backed school gateway.

pub mod http_gateway;
pub mod json_store;
pub mod paths;

pub use crate::http_gateway::HttpSchoolGateway;
pub use crate::json_store::JsonFileStore;
