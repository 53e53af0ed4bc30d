// Copyright (c) 2026 Portfolio Playground Contributors
// SPDX-License-Identifier: AGPL-3.0

//! Project commands
//!
//! Commands: list, add, remove

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use std::path::PathBuf;

use portfolio_sdk::{Project, ProjectQuery, ProjectsResponse};

use super::{read_document, ClientContext};

#[derive(Subcommand)]
pub enum ProjectsCommand {
    /// List projects, optionally filtered by skill
    List {
        /// Only projects with a tag containing this text (case-insensitive)
        #[arg(short, long)]
        skill: Option<String>,

        /// Page number, starting at 1
        #[arg(long)]
        page: Option<u32>,

        /// Projects per page
        #[arg(long)]
        page_size: Option<u32>,
    },

    /// Append a project from a YAML or JSON file
    Add {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Remove the project at a zero-based position
    Remove {
        #[arg(value_name = "INDEX")]
        index: usize,
    },
}

pub async fn handle_command(command: ProjectsCommand, context: &ClientContext) -> Result<()> {
    match command {
        ProjectsCommand::List {
            skill,
            page,
            page_size,
        } => {
            let query = ProjectQuery {
                skill,
                page,
                page_size,
            };
            list(context, &query).await
        }
        ProjectsCommand::Add { file } => add(context, file).await,
        ProjectsCommand::Remove { index } => remove(context, index).await,
    }
}

async fn list(context: &ClientContext, query: &ProjectQuery) -> Result<()> {
    let response = context
        .client()
        .list_projects(query)
        .await
        .context("Failed to list projects")?;

    print_projects(&response);
    Ok(())
}

async fn add(context: &ClientContext, file: PathBuf) -> Result<()> {
    let project: Project = read_document(&file)?;
    let title = project.title.clone();

    let profile = context
        .writer()?
        .add_project(&project)
        .await
        .context("Failed to add project")?;

    println!(
        "{}",
        format!(
            "✓ Project added at index {}: {}",
            profile.projects.len().saturating_sub(1),
            title
        )
        .green()
    );
    Ok(())
}

async fn remove(context: &ClientContext, index: usize) -> Result<()> {
    let profile = context
        .writer()?
        .delete_project(index)
        .await
        .with_context(|| format!("Failed to remove project {}", index))?;

    println!(
        "{}",
        format!(
            "✓ Project {} removed ({} remaining)",
            index,
            profile.projects.len()
        )
        .green()
    );
    Ok(())
}

fn print_projects(response: &ProjectsResponse) {
    if response.projects.is_empty() {
        println!("{}", "No projects found".yellow());
    }

    for project in &response.projects {
        println!("{}", project.title.bold());
        println!("  {}", project.description);
        if !project.skills.is_empty() {
            println!("  Skills: {}", project.skills.join(", "));
        }
        for link in &project.links {
            println!("  {}", link.dimmed());
        }
        println!();
    }

    println!(
        "{}",
        format!(
            "Page {}/{} ({} of {} projects)",
            response.page,
            response.total_pages.max(1),
            response.count,
            response.total
        )
        .dimmed()
    );
}
