//! Auth config service
//!
//! The facade the CLI layer calls: owns the loaded config for one command
//! invocation and sequences the read-modify-write transactions over it.

use crate::config::AuthConfig;
use crate::error::Result;
use crate::resolver::{ServerQuery, ServerResolver};
use crate::store::ConfigStore;

/// Identity of the server an operation touched, for caller-facing reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerHandle {
    pub name: String,
    pub url: String,
}

/// Owns a [`ConfigStore`] plus the config loaded from it.
///
/// Nothing written by the mutation operations reaches disk until their final
/// save step; any earlier failure leaves the persisted config untouched.
pub struct AuthConfigService {
    store: ConfigStore,
    config: AuthConfig,
}

impl AuthConfigService {
    /// Load the config from the store and take ownership of it.
    pub fn load(store: ConfigStore) -> Result<Self> {
        let config = store.load()?;
        Ok(Self { store, config })
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut AuthConfig {
        &mut self.config
    }

    /// Persist the owned config wholesale.
    pub fn save(&self) -> Result<()> {
        self.store.save(&self.config)
    }

    /// Delete the API tokens of `usernames` on the resolved server and save.
    ///
    /// Usernames are processed in caller order and the batch stops at the
    /// first failure: later names are not touched and no save happens, so on
    /// any error the config on disk is exactly what it was before the call.
    pub fn delete_user_tokens(
        &mut self,
        resolver: &ServerResolver,
        query: &ServerQuery,
        usernames: &[String],
    ) -> Result<ServerHandle> {
        let idx = resolver.resolve_index(&self.config, query)?;
        let server = &mut self.config.servers[idx];
        for username in usernames {
            server.delete_user(username)?;
        }
        let handle = ServerHandle {
            name: server.name.clone(),
            url: server.url.clone(),
        };
        self.save()?;
        tracing::info!(
            server = %handle.name,
            users = usernames.len(),
            "deleted API tokens"
        );
        Ok(handle)
    }

    /// Register an API token for `username`, creating the server entry on
    /// first reference, and save.
    pub fn create_user_token(
        &mut self,
        name: &str,
        url: &str,
        kind: &str,
        username: &str,
        api_token: &str,
    ) -> Result<ServerHandle> {
        let server = self.config.get_or_create_server(name, url, kind);
        server.add_or_update_user(username, api_token);
        let handle = ServerHandle {
            name: server.name.clone(),
            url: server.url.clone(),
        };
        self.save()?;
        tracing::info!(server = %handle.name, username, "stored API token");
        Ok(handle)
    }
}
