//! Addon token management commands
//!
//! This module provides commands for creating, listing, and deleting the
//! API tokens stored for addon servers in the local auth config.

use std::path::Path;

use comfy_table::{Table, presets::UTF8_FULL};
use miette::{IntoDiagnostic, Result};
use owo_colors::OwoColorize;
use tokenvault_core::{ServerQuery, ServerResolver};

use crate::helpers::open_service;
use crate::output::Output;

/// Fallback addon kind when neither a server name nor a kind flag is given.
/// A policy of this CLI, handed explicitly to the resolver so single-addon
/// setups resolve deterministically.
pub const DEFAULT_ADDON_KIND: &str = "addon";

// =============================================================================
// Token Deletion
// =============================================================================

/// Delete one or more users' API tokens on an addon server.
///
/// All requested usernames must exist; on the first miss nothing is
/// persisted and the command fails.
pub fn delete(
    config_path: Option<&Path>,
    server: Option<String>,
    kind: Option<String>,
    usernames: &[String],
) -> Result<()> {
    let output = Output::new();
    let mut service = open_service(config_path)?;

    let resolver = ServerResolver::with_default_kind(DEFAULT_ADDON_KIND);
    let query = ServerQuery {
        server_name: server,
        kind,
    };
    let handle = service.delete_user_tokens(&resolver, &query, usernames)?;

    output.success(&format!(
        "Deleted API tokens for users: {} for addon server {} at {} from local settings",
        usernames.join(", ").bright_cyan(),
        handle.name.bright_cyan(),
        handle.url.bright_cyan()
    ));
    Ok(())
}

// =============================================================================
// Token Creation
// =============================================================================

/// Store an API token for a user on an addon server, creating the server
/// entry on first reference.
pub fn create(
    config_path: Option<&Path>,
    server: Option<String>,
    url: Option<String>,
    kind: Option<String>,
    username: &str,
    api_token: Option<String>,
) -> Result<()> {
    let output = Output::new();
    let mut service = open_service(config_path)?;

    let kind = kind.unwrap_or_else(|| DEFAULT_ADDON_KIND.to_string());
    // Like the rest of the tool, an unnamed server falls back to its kind.
    let name = server.unwrap_or_else(|| kind.clone());

    let url = match url {
        Some(url) => url,
        None => match service.config().find_server(&name) {
            Some(existing) => existing.url.clone(),
            None => {
                return Err(miette::miette!(
                    "No URL known for new addon server '{}'. Pass one with --url",
                    name
                ));
            }
        },
    };

    let api_token = match api_token {
        Some(token) => token,
        None => rpassword::prompt_password(format!("API token for {} on {}: ", username, name))
            .into_diagnostic()?,
    };

    let replacing = service
        .config()
        .find_server(&name)
        .and_then(|s| s.find_user(username))
        .is_some();
    if replacing {
        output.warning(&format!(
            "Replacing the existing API token for {} on {}",
            username, name
        ));
    }

    let handle = service.create_user_token(&name, &url, &kind, username, &api_token)?;

    output.success(&format!(
        "Stored API token for user {} on addon server {} at {}",
        username.bright_cyan(),
        handle.name.bright_cyan(),
        handle.url.bright_cyan()
    ));
    Ok(())
}

// =============================================================================
// Token Listing
// =============================================================================

/// List the addon servers and which users hold tokens on each.
/// Tokens themselves are never printed.
pub fn list(config_path: Option<&Path>) -> Result<()> {
    let output = Output::new();
    let service = open_service(config_path)?;
    let config = service.config();

    if config.servers.is_empty() {
        output.info(
            "No addon servers configured",
            "Store a token with: tokenvault token create <username> --url <url>",
        );
        return Ok(());
    }

    output.section("Addon Servers");
    output.status(&format!("Found {} server(s):", config.servers.len()));

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Server", "URL", "Kind", "Users"]);
    for server in &config.servers {
        let users: Vec<&str> = server.users.iter().map(|u| u.username.as_str()).collect();
        let users = users.join(", ");
        table.add_row(vec![
            server.name.as_str(),
            server.url.as_str(),
            server.kind.as_str(),
            users.as_str(),
        ]);
    }
    println!("{table}");

    if let Some(current) = config.current_server() {
        output.kv("Current server", &current.name);
    }
    Ok(())
}
