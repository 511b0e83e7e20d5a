//! Server resolution
//!
//! Translates what the caller asked for on the command line (an explicit
//! server name and/or an addon kind) into one concrete server from a loaded
//! config. Resolution is strictly read-only; creating servers is a separate,
//! explicitly-invoked path on the service.

use crate::config::{AuthConfig, AuthServer};
use crate::error::{AuthError, Result};

/// What the caller supplied to identify a server.
///
/// Passed explicitly into [`ServerResolver::resolve`] rather than held as
/// process-wide state, so the core stays testable without a CLI.
#[derive(Debug, Clone, Default)]
pub struct ServerQuery {
    /// Explicit server name; takes precedence over everything else.
    pub server_name: Option<String>,
    /// Addon kind to match when no explicit name was given.
    pub kind: Option<String>,
}

impl ServerQuery {
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            server_name: Some(name.into()),
            kind: None,
        }
    }

    pub fn by_kind(kind: impl Into<String>) -> Self {
        Self {
            server_name: None,
            kind: Some(kind.into()),
        }
    }

    fn describe(&self) -> String {
        match (&self.server_name, &self.kind) {
            (Some(name), _) => format!("server name {:?}", name),
            (None, Some(kind)) => format!("kind {:?}", kind),
            (None, None) => "an empty query".to_string(),
        }
    }
}

/// Resolves a [`ServerQuery`] against a loaded config.
///
/// The fallback kind applied when a query carries neither a name nor a kind
/// is an explicit option here, configured by the caller; the core has no
/// built-in notion of a default addon kind.
#[derive(Debug, Clone, Default)]
pub struct ServerResolver {
    default_kind: Option<String>,
}

impl ServerResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver that falls back to this kind for queries that name nothing.
    /// Gives deterministic behavior for single-addon setups.
    pub fn with_default_kind(kind: impl Into<String>) -> Self {
        Self {
            default_kind: Some(kind.into()),
        }
    }

    /// Find the server the query refers to.
    ///
    /// Precedence: explicit name (exact match), then explicit kind (first in
    /// insertion order), then the configured default kind. Anything that does
    /// not match is [`AuthError::ServerNotFound`]; this never creates entries.
    pub fn resolve<'a>(&self, config: &'a AuthConfig, query: &ServerQuery) -> Result<&'a AuthServer> {
        self.resolve_index(config, query).map(|idx| &config.servers[idx])
    }

    /// Like [`ServerResolver::resolve`] but returns the position of the match,
    /// for callers that need to mutate the server afterwards.
    pub fn resolve_index(&self, config: &AuthConfig, query: &ServerQuery) -> Result<usize> {
        if let Some(name) = query.server_name.as_deref() {
            return config
                .servers
                .iter()
                .position(|s| s.name == name)
                .ok_or_else(|| self.not_found(config, query));
        }

        let kind = query.kind.as_deref().or(self.default_kind.as_deref());
        if let Some(kind) = kind {
            let matches = config.servers.iter().filter(|s| s.kind == kind).count();
            if matches > 1 {
                tracing::debug!(
                    kind,
                    matches,
                    "multiple servers match kind, using first by insertion order"
                );
            }
            return config
                .servers
                .iter()
                .position(|s| s.kind == kind)
                .ok_or_else(|| self.not_found(config, query));
        }

        Err(self.not_found(config, query))
    }

    fn not_found(&self, config: &AuthConfig, query: &ServerQuery) -> AuthError {
        let query = match (&query.server_name, &query.kind, &self.default_kind) {
            (None, None, Some(kind)) => format!("default kind {:?}", kind),
            _ => query.describe(),
        };
        AuthError::ServerNotFound {
            query,
            known_servers: config.server_names(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn two_anchore_servers() -> AuthConfig {
        let mut config = AuthConfig::default();
        config.get_or_create_server("a", "https://a.example.com", "anchore");
        config.get_or_create_server("b", "https://b.example.com", "anchore");
        config
    }

    #[test]
    fn test_kind_resolution_is_first_by_insertion_order() {
        let config = two_anchore_servers();
        let resolver = ServerResolver::new();

        let server = resolver.resolve(&config, &ServerQuery::by_kind("anchore")).unwrap();
        assert_eq!(server.name, "a");
    }

    #[test]
    fn test_explicit_name_beats_kind_order() {
        let config = two_anchore_servers();
        let resolver = ServerResolver::new();

        let server = resolver.resolve(&config, &ServerQuery::by_name("b")).unwrap();
        assert_eq!(server.name, "b");
    }

    #[test]
    fn test_name_takes_precedence_over_kind_in_one_query() {
        let mut config = two_anchore_servers();
        config.get_or_create_server("jira", "https://jira.example.com", "jira");
        let resolver = ServerResolver::new();

        let query = ServerQuery {
            server_name: Some("jira".to_string()),
            kind: Some("anchore".to_string()),
        };
        assert_eq!(resolver.resolve(&config, &query).unwrap().name, "jira");
    }

    #[test]
    fn test_default_kind_applies_to_empty_query() {
        let mut config = AuthConfig::default();
        config.get_or_create_server("tracker", "https://tracker.example.com", "addon");
        let resolver = ServerResolver::with_default_kind("addon");

        let server = resolver.resolve(&config, &ServerQuery::default()).unwrap();
        assert_eq!(server.name, "tracker");
    }

    #[test]
    fn test_empty_query_without_default_kind_fails() {
        let config = two_anchore_servers();
        let resolver = ServerResolver::new();

        let err = resolver.resolve(&config, &ServerQuery::default()).unwrap_err();
        assert!(matches!(err, AuthError::ServerNotFound { .. }));
    }

    #[test]
    fn test_unknown_name_lists_known_servers() {
        let config = two_anchore_servers();
        let resolver = ServerResolver::new();

        let err = resolver
            .resolve(&config, &ServerQuery::by_name("missing"))
            .unwrap_err();
        match err {
            AuthError::ServerNotFound { known_servers, .. } => {
                assert_eq!(known_servers, vec!["a".to_string(), "b".to_string()]);
            }
            other => panic!("expected ServerNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_resolution_never_creates_servers() {
        let config = AuthConfig::default();
        let resolver = ServerResolver::with_default_kind("addon");

        assert!(resolver.resolve(&config, &ServerQuery::by_kind("anchore")).is_err());
        assert!(config.servers.is_empty());
    }
}
