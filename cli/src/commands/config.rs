// Copyright (c) 2026 Portfolio Playground Contributors
// SPDX-License-Identifier: AGPL-3.0

//! Configuration management commands
//!
//! Commands: show, validate, generate

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use std::path::PathBuf;

use portfolio_core::domain::service_config::{ServiceConfigManifest, StorageKind, CONFIG_PATH_ENV};

const MINIMAL_TEMPLATE: &str = include_str!("../../templates/config-minimal.yaml");
const EXAMPLES_TEMPLATE: &str = include_str!("../../templates/config-with-examples.yaml");

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Show config file paths checked
        #[arg(long)]
        paths: bool,
    },

    /// Validate configuration file
    Validate {
        /// Path to config file (default: discover)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Generate sample configuration
    Generate {
        /// Output path (default: ./portfolio-config.yaml)
        #[arg(short, long, default_value = "./portfolio-config.yaml")]
        output: PathBuf,

        /// Include examples and comments
        #[arg(long)]
        examples: bool,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

pub async fn handle_command(command: ConfigCommand, config_override: Option<PathBuf>) -> Result<()> {
    match command {
        ConfigCommand::Show { paths } => show(config_override, paths).await,
        ConfigCommand::Validate { file } => validate(file.or(config_override)).await,
        ConfigCommand::Generate {
            output,
            examples,
            force,
        } => generate(output, examples, force).await,
    }
}

async fn show(config_override: Option<PathBuf>, show_paths: bool) -> Result<()> {
    let config = ServiceConfigManifest::load_or_default(config_override.clone())
        .context("Failed to load configuration")?;

    if show_paths {
        println!("{}", "Configuration discovery paths:".bold());
        if let Some(path) = &config_override {
            println!("  1. --config flag: {}", path.display());
        } else {
            println!("  1. --config flag: {}", "(not set)".dimmed());
        }
        println!(
            "  2. {}: {}",
            CONFIG_PATH_ENV,
            std::env::var(CONFIG_PATH_ENV)
                .unwrap_or_else(|_| "(not set)".to_string())
                .dimmed()
        );
        println!("  3. ./portfolio-config.yaml");
        println!("  4. ~/.portfolio/config.yaml");
        println!("  5. /etc/portfolio/config.yaml");
        println!();
    }

    println!("{}", "Current configuration:".bold());
    println!();

    println!("{}", "Instance:".bold());
    println!("  Name: {}", config.metadata.name);
    println!(
        "  Listen: {}:{}",
        config.spec.server.bind_address, config.spec.server.port
    );
    println!();

    println!("{}", "Auth:".bold());
    println!("  Username: {}", config.spec.auth.username);
    let password = if config.spec.auth.password.is_empty() {
        "(not set)".red().to_string()
    } else if config.spec.auth.password.starts_with("env:") {
        config.spec.auth.password.clone()
    } else {
        "(set)".to_string()
    };
    println!("  Password: {}", password);
    println!();

    println!("{}", "Storage:".bold());
    match config.spec.storage.backend {
        StorageKind::Memory => println!("  Backend: memory"),
        StorageKind::File => println!(
            "  Backend: file ({})",
            config
                .spec
                .storage
                .path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "path not set".to_string())
        ),
        StorageKind::Postgres => println!("  Backend: postgres"),
    }
    println!();

    let query = &config.spec.query;
    println!("{}", "Query Limits:".bold());
    println!(
        "  Projects page size: {} (max {})",
        query.default_page_size, query.max_page_size
    );
    println!(
        "  Top skills: {} (max {})",
        query.default_top_skills, query.max_top_skills
    );
    println!(
        "  Search page size: {} (max {})",
        query.default_search_page_size, query.max_search_page_size
    );
    println!();

    println!("{}", "Rate Limiting:".bold());
    match &config.spec.rate_limit {
        Some(rate_limit) => println!("  {} requests/minute per client", rate_limit.requests_per_minute),
        None => println!("  {}", "(disabled)".dimmed()),
    }
    println!();

    Ok(())
}

async fn validate(config_path: Option<PathBuf>) -> Result<()> {
    println!("Validating configuration...");

    let config = ServiceConfigManifest::load_or_default(config_path)
        .context("Failed to load configuration")?;

    config
        .validate()
        .context("Configuration validation failed")?;

    println!("{}", "✓ Configuration is valid".green());

    Ok(())
}

async fn generate(output: PathBuf, with_examples: bool, force: bool) -> Result<()> {
    if output.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite",
            output.display()
        );
    }

    let sample = if with_examples {
        EXAMPLES_TEMPLATE
    } else {
        MINIMAL_TEMPLATE
    };

    std::fs::write(&output, sample)
        .with_context(|| format!("Failed to write config to {:?}", output))?;

    println!(
        "{}",
        format!("✓ Configuration generated: {}", output.display()).green()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_parse() {
        for template in [MINIMAL_TEMPLATE, EXAMPLES_TEMPLATE] {
            let mut manifest = ServiceConfigManifest::from_yaml_str(template).unwrap();
            assert_eq!(manifest.kind, "ServiceConfig");

            // Templates reference the password through the environment
            assert!(manifest.spec.auth.password.starts_with("env:"));
            manifest.spec.auth.password = "test-password".to_string();
            assert_eq!(manifest.spec.storage.backend, StorageKind::File);
            manifest.validate().unwrap();
        }
    }

    #[tokio::test]
    async fn test_generate_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("portfolio-config.yaml");

        generate(output.clone(), false, false).await.unwrap();
        assert!(generate(output.clone(), true, false).await.is_err());
        generate(output.clone(), true, true).await.unwrap();

        let written = std::fs::read_to_string(&output).unwrap();
        assert_eq!(written, EXAMPLES_TEMPLATE);
    }
}
