//! Shared helper functions for CLI commands
//!
//! - `open_service()` - Opens the auth config service from the `--config`
//!   flag or the standard per-user location

use std::path::Path;

use miette::Result;
use tokenvault_core::{AuthConfigService, ConfigStore};

/// Open the auth config service.
///
/// This is the canonical way commands get at the config: an explicit
/// `--config` path wins, otherwise the standard per-user location is used.
pub fn open_service(config_path: Option<&Path>) -> Result<AuthConfigService> {
    let store = match config_path {
        Some(path) => ConfigStore::new(path),
        None => ConfigStore::from_standard_location(),
    };
    tracing::debug!(path = %store.path().display(), "opening auth config");
    Ok(AuthConfigService::load(store)?)
}
