// Copyright (c) 2026 Portfolio Playground Contributors
// SPDX-License-Identifier: AGPL-3.0
//! # Query Application Service
//!
//! Read-side entry points. Each call loads the current profile from the
//! repository and evaluates one pure projection over it; nothing is cached
//! between calls.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, error};

use crate::domain::error::ProfileError;
use crate::domain::profile::{Profile, Project};
use crate::domain::projects::{self, Page, PageRequest};
use crate::domain::repository::ProfileRepository;
use crate::domain::search::{self, SearchResults};
use crate::domain::skills::{self, SkillCount};

#[async_trait]
pub trait QueryService: Send + Sync {
    async fn list_projects(&self, skill: Option<&str>, page: PageRequest) -> Result<Page<Project>, ProfileError>;
    async fn list_skills(&self) -> Result<Vec<String>, ProfileError>;
    async fn top_skills(&self, limit: usize) -> Result<Vec<SkillCount>, ProfileError>;
    async fn search(&self, query: &str) -> Result<SearchResults, ProfileError>;
}

pub struct StandardQueryService {
    repository: Arc<dyn ProfileRepository>,
}

impl StandardQueryService {
    pub fn new(repository: Arc<dyn ProfileRepository>) -> Self {
        Self { repository }
    }

    async fn snapshot(&self, operation: &'static str) -> Result<Profile, ProfileError> {
        metrics::counter!("portfolio_queries_total", "operation" => operation).increment(1);
        match self.repository.load().await {
            Ok(Some(profile)) => Ok(profile),
            Ok(None) => Err(ProfileError::profile_not_found()),
            Err(e) => {
                error!("Profile store failure during {}: {}", operation, e);
                Err(ProfileError::Store(e))
            }
        }
    }
}

#[async_trait]
impl QueryService for StandardQueryService {
    async fn list_projects(&self, skill: Option<&str>, page: PageRequest) -> Result<Page<Project>, ProfileError> {
        let profile = self.snapshot("list_projects").await?;
        let result = projects::list_projects(&profile, skill, page);
        debug!(skill = ?skill, page = page.page(), total = result.total, "Listed projects");
        Ok(result)
    }

    async fn list_skills(&self) -> Result<Vec<String>, ProfileError> {
        let profile = self.snapshot("list_skills").await?;
        Ok(profile.skills)
    }

    async fn top_skills(&self, limit: usize) -> Result<Vec<SkillCount>, ProfileError> {
        let profile = self.snapshot("top_skills").await?;
        skills::top_skills(&profile, limit)
    }

    async fn search(&self, query: &str) -> Result<SearchResults, ProfileError> {
        let profile = self.snapshot("search").await?;
        let results = search::search(&profile, query);
        debug!(
            query = %results.query,
            skills = results.matches.skills.len(),
            projects = results.matches.projects.len(),
            work = results.matches.work.len(),
            "Search evaluated"
        );
        Ok(results)
    }
}
