// Copyright (c) 2026 Portfolio Playground Contributors
// SPDX-License-Identifier: AGPL-3.0

//! Search command

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use portfolio_sdk::{SearchQuery, SearchResponse};

use super::ClientContext;

#[derive(Args)]
pub struct SearchArgs {
    /// Text to look for (case-insensitive substring)
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Page of project matches, starting at 1
    #[arg(long)]
    pub page: Option<u32>,

    /// Project matches per page
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Print the raw JSON response
    #[arg(long)]
    pub json: bool,
}

pub async fn handle_command(args: SearchArgs, context: &ClientContext) -> Result<()> {
    let query = SearchQuery {
        q: args.query,
        page: args.page,
        page_size: args.page_size,
    };

    let response = context
        .client()
        .search(&query)
        .await
        .context("Search failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print_results(&response);
    }
    Ok(())
}

fn print_results(response: &SearchResponse) {
    let matches = &response.matches;
    if matches.is_empty() {
        println!("{}", format!("No matches for '{}'", response.query).yellow());
        return;
    }

    if matches.name {
        println!("{}", "Name matches".bold());
        println!();
    }

    if !matches.skills.is_empty() {
        println!("{}", "Skills:".bold());
        println!("  {}", matches.skills.join(", "));
        println!();
    }

    if !matches.projects.is_empty() || response.total_project_matches > 0 {
        println!(
            "{}",
            format!("Projects ({}):", response.total_project_matches).bold()
        );
        for project in &matches.projects {
            println!("  {}", project.title);
        }
        if response.has_more_projects {
            println!("  {}", "more results on the next page".dimmed());
        }
        println!();
    }

    if !matches.work.is_empty() {
        println!("{}", "Work:".bold());
        for work in &matches.work {
            println!("  {} @ {}", work.title, work.company);
        }
    }
}
