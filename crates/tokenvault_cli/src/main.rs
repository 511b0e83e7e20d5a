mod commands;
mod helpers;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::Result;

#[derive(Parser)]
#[command(name = "tokenvault")]
#[command(about = "Local registry of API tokens for addon servers")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Auth config file path (defaults to the standard per-user location)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Addon API token management
    Token {
        #[command(subcommand)]
        cmd: TokenCommands,
    },
}

#[derive(Subcommand)]
enum TokenCommands {
    /// Delete one or more users' API tokens for an addon server
    Delete {
        /// Usernames whose tokens should be removed
        #[arg(required = true)]
        usernames: Vec<String>,

        /// Addon server name
        #[arg(long, short = 's')]
        server: Option<String>,

        /// The kind of addon, e.g. "anchore"
        #[arg(long, short = 'k')]
        kind: Option<String>,
    },
    /// Store an API token for a user on an addon server
    Create {
        /// Username the token belongs to
        username: String,

        /// Addon server name (defaults to the kind)
        #[arg(long, short = 's')]
        server: Option<String>,

        /// Addon server URL (required when the server is new)
        #[arg(long, short = 'u')]
        url: Option<String>,

        /// The kind of addon, e.g. "anchore"
        #[arg(long, short = 'k')]
        kind: Option<String>,

        /// The token value; prompted for interactively when omitted
        #[arg(long)]
        api_token: Option<String>,
    },
    /// List addon servers and the users holding tokens on them
    List,
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .with_cause_chain()
                .color(true)
                .build(),
        )
    }))?;
    miette::set_panic_hook();
    let cli = Cli::parse();

    init_tracing(cli.debug);

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Token { cmd } => match cmd {
            TokenCommands::Delete {
                usernames,
                server,
                kind,
            } => commands::token::delete(config_path, server, kind, &usernames),
            TokenCommands::Create {
                username,
                server,
                url,
                kind,
                api_token,
            } => commands::token::create(config_path, server, url, kind, &username, api_token),
            TokenCommands::List => commands::token::list(config_path),
        },
    }
}

fn init_tracing(debug: bool) {
    use tracing_subscriber::EnvFilter;

    let env_filter = if debug {
        EnvFilter::new("tokenvault_core=debug,tokenvault_cli=debug,info")
    } else {
        EnvFilter::new("tokenvault_core=warn,tokenvault_cli=warn,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
