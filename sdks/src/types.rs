// Copyright (c) 2026 Portfolio Playground Contributors
// SPDX-License-Identifier: AGPL-3.0
//! Wire types
//!
//! Request and response bodies shared with the service, plus the query
//! parameter sets the client sends.

use serde::Serialize;

pub use portfolio_core::domain::auth::Credentials;
pub use portfolio_core::domain::profile::{
    Education, Links, NewProfile, Profile, ProfilePatch, Project, WorkExperience,
};
pub use portfolio_core::domain::search::SearchMatches;
pub use portfolio_core::domain::skills::SkillCount;
pub use portfolio_core::presentation::api::{
    HealthResponse, ProjectsResponse, SearchResponse, ServiceInfo, SkillsResponse,
    TopSkillsResponse,
};
pub use portfolio_core::presentation::error::ErrorBody;

/// Parameters for `GET /projects`. Unset fields use the server defaults.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProjectQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

/// Parameters for `GET /search`. Leaving both page fields unset returns the
/// full match set.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchQuery {
    pub q: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl SearchQuery {
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct TopSkillsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}
