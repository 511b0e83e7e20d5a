use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Storage-layer failure causes
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
#[non_exhaustive]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(String),
}

#[derive(Error, Diagnostic, Debug)]
pub enum AuthError {
    #[error("Failed to read auth config from {path}")]
    #[diagnostic(
        code(tokenvault_core::store_read),
        help("Check that the file exists, is readable, and contains valid TOML")
    )]
    StoreRead {
        path: String,
        #[source]
        cause: StoreError,
    },

    #[error("Failed to write auth config to {path}")]
    #[diagnostic(
        code(tokenvault_core::store_write),
        help("Check that the config directory exists and is writable")
    )]
    StoreWrite {
        path: String,
        #[source]
        cause: StoreError,
    },

    #[error("No addon server found for {query}")]
    #[diagnostic(
        code(tokenvault_core::server_not_found),
        help("Registered servers: {}", known_servers.join(", "))
    )]
    ServerNotFound {
        query: String,
        known_servers: Vec<String>,
    },

    #[error("No API token for user {username} on server {server}")]
    #[diagnostic(
        code(tokenvault_core::user_not_found),
        help("Users with tokens on {server}: {}", known_users.join(", "))
    )]
    UserNotFound {
        username: String,
        server: String,
        known_users: Vec<String>,
    },
}

pub type Result<T> = std::result::Result<T, AuthError>;
