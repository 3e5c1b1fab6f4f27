//! Storage path resolution.

use std::path::PathBuf;

use scout_core::{Result, ScoutError};

/// Returns the default durable-storage directory (`~/.scout`).
///
/// # Errors
///
/// Fails with a storage error if the home directory cannot be determined.
pub fn default_data_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| ScoutError::storage("Failed to determine home directory"))?;
    Ok(home.join(".scout"))
}
