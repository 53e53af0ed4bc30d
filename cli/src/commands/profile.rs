// Copyright (c) 2026 Portfolio Playground Contributors
// SPDX-License-Identifier: AGPL-3.0

//! Profile commands
//!
//! Commands: show, import, delete

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use std::path::PathBuf;

use portfolio_sdk::{NewProfile, Profile, ProfilePatch};

use super::{read_document, ClientContext};

#[derive(Subcommand)]
pub enum ProfileCommand {
    /// Show the profile
    Show {
        /// Print the raw JSON document
        #[arg(long)]
        json: bool,
    },

    /// Create the profile from a YAML or JSON file
    Import {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Replace the existing profile instead of failing
        #[arg(long)]
        replace: bool,
    },

    /// Delete the profile
    Delete {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },
}

pub async fn handle_command(command: ProfileCommand, context: &ClientContext) -> Result<()> {
    match command {
        ProfileCommand::Show { json } => show(context, json).await,
        ProfileCommand::Import { file, replace } => import(context, file, replace).await,
        ProfileCommand::Delete { yes } => delete(context, yes).await,
    }
}

async fn show(context: &ClientContext, json: bool) -> Result<()> {
    let profile = context
        .client()
        .get_profile()
        .await
        .context("Failed to fetch profile")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&profile)?);
        return Ok(());
    }

    print_profile(&profile);
    Ok(())
}

async fn import(context: &ClientContext, file: PathBuf, replace: bool) -> Result<()> {
    let document: NewProfile = read_document(&file)?;
    let client = context.writer()?;

    let profile = match client.create_profile(&document).await {
        Ok(profile) => profile,
        Err(e) if replace && e.status() == Some(409) => client
            .update_profile(&replacement_patch(document))
            .await
            .context("Failed to replace profile")?,
        Err(e) => return Err(e).context("Failed to import profile"),
    };

    println!(
        "{}",
        format!("✓ Profile imported: {} <{}>", profile.name, profile.email).green()
    );
    Ok(())
}

async fn delete(context: &ClientContext, yes: bool) -> Result<()> {
    if !yes {
        anyhow::bail!("Refusing to delete the profile without --yes");
    }

    context
        .writer()?
        .delete_profile()
        .await
        .context("Failed to delete profile")?;

    println!("{}", "✓ Profile deleted".green());
    Ok(())
}

/// Patch that overwrites every top-level field with the imported document.
fn replacement_patch(document: NewProfile) -> ProfilePatch {
    ProfilePatch {
        name: Some(document.name),
        email: Some(document.email),
        skills: Some(document.skills),
        links: Some(document.links),
        education: Some(document.education),
        work: Some(document.work),
        projects: Some(document.projects),
    }
}

fn print_profile(profile: &Profile) {
    println!("{}", profile.name.bold());
    println!("  {}", profile.email);

    let links = [
        ("GitHub", &profile.links.github),
        ("LinkedIn", &profile.links.linkedin),
        ("Portfolio", &profile.links.portfolio),
    ];
    for (label, link) in links {
        if let Some(link) = link {
            println!("  {}: {}", label, link);
        }
    }
    println!();

    println!("{}", "Skills:".bold());
    if profile.skills.is_empty() {
        println!("  {}", "(none)".dimmed());
    } else {
        println!("  {}", profile.skills.join(", "));
    }
    println!();

    if !profile.work.is_empty() {
        println!("{}", "Work:".bold());
        for work in &profile.work {
            println!("  {} @ {} ({})", work.title, work.company, work.duration.dimmed());
        }
        println!();
    }

    if !profile.education.is_empty() {
        println!("{}", "Education:".bold());
        for education in &profile.education {
            println!(
                "  {}, {} ({})",
                education.degree, education.institution, education.year
            );
        }
        println!();
    }

    println!("{}", format!("Projects ({}):", profile.projects.len()).bold());
    for (index, project) in profile.projects.iter().enumerate() {
        println!("  [{}] {}", index, project.title.bold());
        if !project.skills.is_empty() {
            println!("      {}", project.skills.join(", ").dimmed());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replacement_patch_sets_every_field() {
        let document: NewProfile = serde_json::from_str(
            r#"{"name": "Ada", "email": "ada@example.com", "skills": ["Rust"]}"#,
        )
        .unwrap();
        let patch = replacement_patch(document);

        assert!(!patch.is_empty());
        assert_eq!(patch.skills, Some(vec!["Rust".to_string()]));
        assert_eq!(patch.projects, Some(vec![]));
        assert!(patch.validate().is_ok());
    }
}
