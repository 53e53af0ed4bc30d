// Copyright (c) 2026 Portfolio Playground Contributors
// SPDX-License-Identifier: AGPL-3.0

//! # Portfolio CLI
//!
//! The `portfolio` binary runs the profile service and talks to a running
//! instance over HTTP.
//!
//! ## Commands
//!
//! - `portfolio serve` - Run the HTTP service in the foreground
//! - `portfolio config show|validate|generate` - Configuration management
//! - `portfolio profile show|import|delete` - Profile document
//! - `portfolio projects list|add|remove` - Project collection
//! - `portfolio skills list|top` - Skill listing and ranking
//! - `portfolio search <QUERY>` - Substring search

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use portfolio_cli::commands::{
    self, ClientContext, ConfigCommand, ProfileCommand, ProjectsCommand, SearchArgs,
    SkillsCommand,
};
use portfolio_cli::logging::{init_logging, resolve_log_level};
use portfolio_cli::server;

/// Portfolio - single-profile portfolio service
#[derive(Parser)]
#[command(name = "portfolio")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file (overrides discovery)
    #[arg(
        short,
        long,
        global = true,
        env = "PORTFOLIO_CONFIG_PATH",
        value_name = "FILE"
    )]
    config: Option<PathBuf>,

    /// HTTP host to bind (serve) or connect to (default: from configuration)
    #[arg(long, global = true, env = "PORTFOLIO_HOST")]
    host: Option<String>,

    /// HTTP port to bind (serve) or connect to (default: from configuration)
    #[arg(long, global = true, env = "PORTFOLIO_PORT")]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error) [default: from configuration, else info]
    #[arg(long, global = true, env = "PORTFOLIO_LOG_LEVEL")]
    log_level: Option<String>,

    /// Username for write commands
    #[arg(long, global = true, env = "PORTFOLIO_USERNAME", default_value = "admin")]
    username: String,

    /// Password for write commands
    #[arg(long, global = true, env = "PORTFOLIO_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP service in the foreground
    #[command(name = "serve")]
    Serve,

    /// Configuration management
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Profile document operations
    #[command(name = "profile")]
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },

    /// Project operations
    #[command(name = "projects")]
    Projects {
        #[command(subcommand)]
        command: ProjectsCommand,
    },

    /// Skill listing and ranking
    #[command(name = "skills")]
    Skills {
        #[command(subcommand)]
        command: SkillsCommand,
    },

    /// Search skills, projects and work history
    #[command(name = "search")]
    Search(SearchArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before clap reads environment defaults
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    init_logging(&resolve_log_level(cli.log_level.clone(), cli.config.clone()))?;

    let client_context = || {
        ClientContext::resolve(
            cli.config.clone(),
            cli.host.clone(),
            cli.port,
            &cli.username,
            cli.password.clone(),
        )
    };

    match cli.command {
        Some(Commands::Serve) => server::serve(cli.config.clone(), cli.host.clone(), cli.port).await,
        Some(Commands::Config { command }) => {
            commands::config::handle_command(command, cli.config.clone()).await
        }
        Some(Commands::Profile { command }) => {
            commands::profile::handle_command(command, &client_context()?).await
        }
        Some(Commands::Projects { command }) => {
            commands::projects::handle_command(command, &client_context()?).await
        }
        Some(Commands::Skills { command }) => {
            commands::skills::handle_command(command, &client_context()?).await
        }
        Some(Commands::Search(args)) => commands::search::handle_command(args, &client_context()?).await,
        None => {
            eprintln!("{}", "No command specified. Use --help for usage.".yellow());
            std::process::exit(1);
        }
    }
}
