// Copyright (c) 2026 Portfolio Playground Contributors
// SPDX-License-Identifier: AGPL-3.0

//! Skill commands
//!
//! Commands: list, top

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;

use super::ClientContext;

#[derive(Subcommand)]
pub enum SkillsCommand {
    /// List the profile's skills
    List,

    /// Rank skills by how often they occur across the profile and its projects
    Top {
        /// Number of skills to show (default: server setting)
        #[arg(short = 'n', long)]
        limit: Option<u32>,
    },
}

pub async fn handle_command(command: SkillsCommand, context: &ClientContext) -> Result<()> {
    match command {
        SkillsCommand::List => list(context).await,
        SkillsCommand::Top { limit } => top(context, limit).await,
    }
}

async fn list(context: &ClientContext) -> Result<()> {
    let response = context
        .client()
        .list_skills()
        .await
        .context("Failed to list skills")?;

    println!("{}", format!("Skills ({}):", response.count).bold());
    for skill in &response.skills {
        println!("  {}", skill);
    }
    Ok(())
}

async fn top(context: &ClientContext, limit: Option<u32>) -> Result<()> {
    let ranked = context
        .client()
        .top_skills(limit)
        .await
        .context("Failed to rank skills")?;

    if ranked.is_empty() {
        println!("{}", "No skills recorded".yellow());
        return Ok(());
    }

    let width = ranked.iter().map(|s| s.skill.chars().count()).max().unwrap_or(0);
    for (rank, entry) in ranked.iter().enumerate() {
        println!(
            "  {:>2}. {:<width$}  {}",
            rank + 1,
            entry.skill,
            entry.count.to_string().cyan(),
            width = width
        );
    }
    Ok(())
}
