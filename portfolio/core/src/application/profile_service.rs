// Copyright (c) 2026 Portfolio Playground Contributors
// SPDX-License-Identifier: AGPL-3.0
//! # Profile Application Service
//!
//! Reads and writes of the profile aggregate. Every write passes the
//! [`AuthGate`] before the stored document is loaded, so a rejected write
//! never touches the repository.
//!
//! Updates are read-modify-write against the latest snapshot. With no
//! concurrency token, concurrent writers resolve as last-write-wins. Project
//! add and delete are whole-collection replacements through the same update
//! path.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info};

use crate::domain::auth::{AuthGate, Credentials};
use crate::domain::error::ProfileError;
use crate::domain::profile::{NewProfile, Profile, ProfilePatch, Project};
use crate::domain::repository::{ProfileRepository, RepositoryError};

#[async_trait]
pub trait ProfileService: Send + Sync {
    /// Check write credentials without touching the repository.
    fn authorize(&self, operation: &'static str, credentials: Option<&Credentials>) -> Result<(), ProfileError>;

    async fn get_profile(&self) -> Result<Profile, ProfileError>;
    async fn create_profile(&self, credentials: Option<&Credentials>, profile: NewProfile) -> Result<Profile, ProfileError>;
    async fn update_profile(&self, credentials: Option<&Credentials>, patch: ProfilePatch) -> Result<Profile, ProfileError>;
    async fn delete_profile(&self, credentials: Option<&Credentials>) -> Result<(), ProfileError>;
    async fn add_project(&self, credentials: Option<&Credentials>, project: Project) -> Result<Profile, ProfileError>;
    async fn delete_project(&self, credentials: Option<&Credentials>, index: usize) -> Result<Profile, ProfileError>;
}

pub struct StandardProfileService {
    repository: Arc<dyn ProfileRepository>,
    auth: Arc<dyn AuthGate>,
}

impl StandardProfileService {
    pub fn new(repository: Arc<dyn ProfileRepository>, auth: Arc<dyn AuthGate>) -> Self {
        Self { repository, auth }
    }

    async fn load_existing(&self) -> Result<Profile, ProfileError> {
        self.repository
            .load()
            .await
            .map_err(store_failure)?
            .ok_or_else(ProfileError::profile_not_found)
    }

    async fn persist(&self, profile: &Profile) -> Result<(), ProfileError> {
        self.repository.save(profile).await.map_err(store_failure)
    }
}

fn store_failure(err: RepositoryError) -> ProfileError {
    error!("Profile store failure: {}", err);
    ProfileError::Store(err)
}

#[async_trait]
impl ProfileService for StandardProfileService {
    fn authorize(&self, operation: &'static str, credentials: Option<&Credentials>) -> Result<(), ProfileError> {
        let outcome = self.auth.require(credentials);
        let label = if outcome.is_ok() { "allowed" } else { "denied" };
        metrics::counter!("portfolio_write_auth_total", "operation" => operation, "outcome" => label)
            .increment(1);
        outcome
    }

    async fn get_profile(&self) -> Result<Profile, ProfileError> {
        self.load_existing().await
    }

    async fn create_profile(&self, credentials: Option<&Credentials>, profile: NewProfile) -> Result<Profile, ProfileError> {
        self.authorize("create_profile", credentials)?;

        if self.repository.load().await.map_err(store_failure)?.is_some() {
            return Err(ProfileError::AlreadyExists);
        }

        let profile = Profile::create(profile)?;
        self.persist(&profile).await?;
        info!(profile_id = %profile.id, "Profile created");
        Ok(profile)
    }

    async fn update_profile(&self, credentials: Option<&Credentials>, patch: ProfilePatch) -> Result<Profile, ProfileError> {
        self.authorize("update_profile", credentials)?;

        let mut profile = self.load_existing().await?;
        if patch.is_empty() {
            return Ok(profile);
        }

        profile.apply(patch)?;
        self.persist(&profile).await?;
        info!(profile_id = %profile.id, "Profile updated");
        Ok(profile)
    }

    async fn delete_profile(&self, credentials: Option<&Credentials>) -> Result<(), ProfileError> {
        self.authorize("delete_profile", credentials)?;

        if !self.repository.delete().await.map_err(store_failure)? {
            return Err(ProfileError::profile_not_found());
        }
        info!("Profile deleted");
        Ok(())
    }

    async fn add_project(&self, credentials: Option<&Credentials>, project: Project) -> Result<Profile, ProfileError> {
        self.authorize("add_project", credentials)?;

        let mut profile = self.load_existing().await?;
        let title = project.title.clone();
        let projects = profile.with_project_appended(project)?;
        profile.apply(ProfilePatch { projects: Some(projects), ..Default::default() })?;
        self.persist(&profile).await?;
        info!(profile_id = %profile.id, title = %title, "Project added");
        Ok(profile)
    }

    async fn delete_project(&self, credentials: Option<&Credentials>, index: usize) -> Result<Profile, ProfileError> {
        self.authorize("delete_project", credentials)?;

        let mut profile = self.load_existing().await?;
        let (projects, removed) = profile.without_project_at(index)?;
        profile.apply(ProfilePatch { projects: Some(projects), ..Default::default() })?;
        self.persist(&profile).await?;
        info!(profile_id = %profile.id, index, title = %removed.title, "Project removed");
        Ok(profile)
    }
}
