//! Auth configuration model for tokenvault
//!
//! This module provides the in-memory representation of addon servers and
//! their per-user API tokens. Operations here are pure: loading and saving
//! live in [`crate::store`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AuthError, Result};

/// Root aggregate: every addon server known locally, in insertion order.
///
/// Server names are unique within the sequence. Insertion order is preserved
/// so output and kind-based resolution stay deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Registered addon servers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<AuthServer>,

    /// Name of the server treated as current/default, if one has been set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_server: Option<String>,
}

/// One addon endpoint and the users holding tokens for it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthServer {
    /// Unique key within the config.
    pub name: String,
    pub url: String,
    /// Addon type tag, e.g. "anchore".
    pub kind: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<UserAuth>,
}

/// One credential entry on a server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserAuth {
    pub username: String,
    /// Opaque secret; never logged.
    pub api_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl AuthConfig {
    /// Exact-match lookup by unique server name.
    pub fn find_server(&self, name: &str) -> Option<&AuthServer> {
        self.servers.iter().find(|s| s.name == name)
    }

    /// Mutable exact-match lookup by unique server name.
    pub fn find_server_mut(&mut self, name: &str) -> Option<&mut AuthServer> {
        self.servers.iter_mut().find(|s| s.name == name)
    }

    /// First server whose kind matches, in insertion order.
    ///
    /// With multiple servers of one kind this is deliberately first-wins;
    /// callers that need a specific one must look up by exact name.
    pub fn find_server_by_kind(&self, kind: &str) -> Option<&AuthServer> {
        self.servers.iter().find(|s| s.kind == kind)
    }

    /// The server named by `current_server`, if set and still present.
    pub fn current_server(&self) -> Option<&AuthServer> {
        self.current_server
            .as_deref()
            .and_then(|name| self.find_server(name))
    }

    /// Returns the existing server with this name, or appends a new
    /// zero-user entry. Never produces a duplicate name.
    pub fn get_or_create_server(&mut self, name: &str, url: &str, kind: &str) -> &mut AuthServer {
        let idx = match self.servers.iter().position(|s| s.name == name) {
            Some(idx) => idx,
            None => {
                tracing::debug!(server = name, kind, "registering new addon server");
                self.servers.push(AuthServer {
                    name: name.to_string(),
                    url: url.to_string(),
                    kind: kind.to_string(),
                    users: Vec::new(),
                });
                self.servers.len() - 1
            }
        };
        &mut self.servers[idx]
    }

    /// Names of all registered servers, for error reporting.
    pub fn server_names(&self) -> Vec<String> {
        self.servers.iter().map(|s| s.name.clone()).collect()
    }
}

impl AuthServer {
    pub fn find_user(&self, username: &str) -> Option<&UserAuth> {
        self.users.iter().find(|u| u.username == username)
    }

    /// Inserts a new credential or overwrites the token of an existing one,
    /// preserving its position and creation timestamp.
    pub fn add_or_update_user(&mut self, username: &str, api_token: &str) {
        match self.users.iter_mut().find(|u| u.username == username) {
            Some(user) => {
                user.api_token = api_token.to_string();
                tracing::debug!(server = %self.name, username, "updated API token");
            }
            None => {
                self.users.push(UserAuth {
                    username: username.to_string(),
                    api_token: api_token.to_string(),
                    created_at: Some(Utc::now()),
                });
                tracing::debug!(server = %self.name, username, "added API token");
            }
        }
    }

    /// Removes the credential for `username`.
    ///
    /// Deleting an absent user is an error, not a no-op: callers batching
    /// deletions rely on the failure to abort before anything is persisted.
    pub fn delete_user(&mut self, username: &str) -> Result<()> {
        match self.users.iter().position(|u| u.username == username) {
            Some(idx) => {
                self.users.remove(idx);
                tracing::debug!(server = %self.name, username, "deleted API token");
                Ok(())
            }
            None => Err(AuthError::UserNotFound {
                username: username.to_string(),
                server: self.name.clone(),
                known_users: self.users.iter().map(|u| u.username.clone()).collect(),
            }),
        }
    }
}
