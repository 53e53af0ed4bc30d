// Copyright (c) 2026 Portfolio Playground Contributors
// SPDX-License-Identifier: AGPL-3.0
//! # Profile Aggregate
//!
//! The single aggregate root of the system: one profile document with its
//! skills, links, education, work history and projects nested inside it.
//!
//! Projects have no identity of their own. They are addressed by their
//! position in `projects`, so a delete-by-index racing with another write can
//! remove a different project than the caller saw. That is a property of the
//! positional model; switching to stable identifiers means changing this type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::error::ProfileError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProfileId(pub Uuid);

impl ProfileId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for ProfileId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ProfileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    pub year: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkExperience {
    pub title: String,
    pub company: String,
    pub duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub links: Vec<String>,
}

/// Named contact channels. Any other key is rejected on the way in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Links {
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub portfolio: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub links: Links,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub work: Vec<WorkExperience>,
    #[serde(default)]
    pub projects: Vec<Project>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating the profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProfile {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub links: Links,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub work: Vec<WorkExperience>,
    #[serde(default)]
    pub projects: Vec<Project>,
}

/// Partial update. Only supplied keys are applied; supplied collections
/// replace the stored ones wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfilePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<Vec<Education>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work: Option<Vec<WorkExperience>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<Project>>,
}

impl ProfilePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.skills.is_none()
            && self.links.is_none()
            && self.education.is_none()
            && self.work.is_none()
            && self.projects.is_none()
    }

    pub fn validate(&self) -> Result<(), ProfileError> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        if let Some(projects) = &self.projects {
            projects.iter().try_for_each(Project::validate)?;
        }
        Ok(())
    }
}

impl NewProfile {
    pub fn validate(&self) -> Result<(), ProfileError> {
        validate_name(&self.name)?;
        validate_email(&self.email)?;
        self.projects.iter().try_for_each(Project::validate)
    }
}

impl Project {
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.title.trim().is_empty() {
            return Err(ProfileError::InvalidArgument(
                "project title cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Profile {
    /// Build the aggregate from a validated create payload.
    pub fn create(new: NewProfile) -> Result<Self, ProfileError> {
        new.validate()?;
        let now = Utc::now();
        Ok(Self {
            id: ProfileId::new(),
            name: new.name,
            email: new.email,
            skills: new.skills,
            links: new.links,
            education: new.education,
            work: new.work,
            projects: new.projects,
            created_at: now,
            updated_at: now,
        })
    }

    /// Merge a patch into the profile. Nothing is changed if the patch is invalid.
    pub fn apply(&mut self, patch: ProfilePatch) -> Result<(), ProfileError> {
        patch.validate()?;
        if patch.is_empty() {
            return Ok(());
        }

        let ProfilePatch { name, email, skills, links, education, work, projects } = patch;
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(email) = email {
            self.email = email;
        }
        if let Some(skills) = skills {
            self.skills = skills;
        }
        if let Some(links) = links {
            self.links = links;
        }
        if let Some(education) = education {
            self.education = education;
        }
        if let Some(work) = work {
            self.work = work;
        }
        if let Some(projects) = projects {
            self.projects = projects;
        }
        self.touch();
        Ok(())
    }

    /// Copy of the project collection with `project` appended.
    pub fn with_project_appended(&self, project: Project) -> Result<Vec<Project>, ProfileError> {
        project.validate()?;
        let mut projects = self.projects.clone();
        projects.push(project);
        Ok(projects)
    }

    /// Copy of the project collection without the entry at `index`, plus the
    /// removed project.
    pub fn without_project_at(&self, index: usize) -> Result<(Vec<Project>, Project), ProfileError> {
        if index >= self.projects.len() {
            return Err(ProfileError::NotFound(format!(
                "project index {} out of range ({} projects)",
                index,
                self.projects.len()
            )));
        }
        let mut projects = self.projects.clone();
        let removed = projects.remove(index);
        Ok((projects, removed))
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

fn validate_name(name: &str) -> Result<(), ProfileError> {
    if name.trim().is_empty() {
        return Err(ProfileError::InvalidArgument("name cannot be empty".to_string()));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), ProfileError> {
    let valid = match email.trim().split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.split('.').count() >= 2
                && domain.split('.').all(|label| !label.is_empty())
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(ProfileError::InvalidArgument(format!("invalid email address: '{}'", email)))
    }
}
