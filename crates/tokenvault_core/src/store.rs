//! Durable storage for the auth configuration
//!
//! The discipline here is whole-file read, whole-file overwrite: the config
//! is loaded wholesale at the start of a command and written back wholesale
//! on save. Saves go through a temp file in the target directory followed by
//! an atomic rename, so a crash mid-write never leaves a corrupt config.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::config::AuthConfig;
use crate::error::{AuthError, Result, StoreError};

/// Default location of the auth config file, under the user's config
/// directory (e.g. `~/.config/tokenvault/auth.toml`).
pub fn default_store_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tokenvault")
        .join("auth.toml")
}

/// Loads and persists [`AuthConfig`] at a fixed path.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Store backed by an explicit path. Used by tests and the `--config`
    /// flag; most callers want [`ConfigStore::from_standard_location`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store backed by the standard per-user config location.
    pub fn from_standard_location() -> Self {
        Self::new(default_store_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the config from disk.
    ///
    /// A missing file is the empty-store bootstrap case and yields a valid,
    /// zero-server config rather than an error.
    pub fn load(&self) -> Result<AuthConfig> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no auth config on disk, starting empty");
            return Ok(AuthConfig::default());
        }

        let content = std::fs::read_to_string(&self.path).map_err(|e| AuthError::StoreRead {
            path: self.path.display().to_string(),
            cause: StoreError::Io(e.to_string()),
        })?;

        let config: AuthConfig = toml::from_str(&content).map_err(|e| AuthError::StoreRead {
            path: self.path.display().to_string(),
            cause: StoreError::TomlParse(e.to_string()),
        })?;

        tracing::debug!(
            path = %self.path.display(),
            servers = config.servers.len(),
            "loaded auth config"
        );
        Ok(config)
    }

    /// Serialize the full config and replace the file on disk.
    ///
    /// Writes to a temp file in the same directory and renames it over the
    /// target, so readers only ever observe the old or the new content.
    pub fn save(&self, config: &AuthConfig) -> Result<()> {
        let write_err = |cause: StoreError| AuthError::StoreWrite {
            path: self.path.display().to_string(),
            cause,
        };

        let content = toml::to_string_pretty(config)
            .map_err(|e| write_err(StoreError::TomlSerialize(e.to_string())))?;

        let parent = self.path.parent().unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent).map_err(|e| write_err(StoreError::Io(e.to_string())))?;

        let mut tmp =
            NamedTempFile::new_in(parent).map_err(|e| write_err(StoreError::Io(e.to_string())))?;
        tmp.write_all(content.as_bytes())
            .map_err(|e| write_err(StoreError::Io(e.to_string())))?;
        tmp.persist(&self.path)
            .map_err(|e| write_err(StoreError::Io(e.error.to_string())))?;

        tracing::debug!(
            path = %self.path.display(),
            servers = config.servers.len(),
            "saved auth config"
        );
        Ok(())
    }
}
