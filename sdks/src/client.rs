// Copyright (c) 2026 Portfolio Playground Contributors
// SPDX-License-Identifier: AGPL-3.0

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::types::{
    Credentials, ErrorBody, HealthResponse, NewProfile, Profile, ProfilePatch, Project,
    ProjectQuery, ProjectsResponse, SearchQuery, SearchResponse, SkillCount, SkillsResponse,
    TopSkillsQuery, TopSkillsResponse,
};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-2xx status
    #[error("API error ({status}): {detail}")]
    Api { status: u16, detail: String },
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Client for the portfolio profile API.
///
/// Credentials are only attached to write calls.
pub struct PortfolioClient {
    base_url: String,
    client: Client,
    credentials: Option<Credentials>,
}

impl PortfolioClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
            credentials: None,
        }
    }

    /// Set the Basic credentials sent with writes.
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.credentials {
            Some(c) => request.basic_auth(&c.username, Some(&c.password)),
            None => request,
        }
    }

    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let response = self.client.get(self.url("/health")).send().await?;
        decode(response).await
    }

    pub async fn get_profile(&self) -> Result<Profile, ClientError> {
        let response = self.client.get(self.url("/profile")).send().await?;
        decode(response).await
    }

    pub async fn create_profile(&self, profile: &NewProfile) -> Result<Profile, ClientError> {
        let request = self.client.post(self.url("/profile")).json(profile);
        decode(self.authorized(request).send().await?).await
    }

    pub async fn update_profile(&self, patch: &ProfilePatch) -> Result<Profile, ClientError> {
        let request = self.client.put(self.url("/profile")).json(patch);
        decode(self.authorized(request).send().await?).await
    }

    pub async fn delete_profile(&self) -> Result<(), ClientError> {
        let request = self.client.delete(self.url("/profile"));
        check(self.authorized(request).send().await?).await?;
        Ok(())
    }

    /// Append a project; returns the updated profile.
    pub async fn add_project(&self, project: &Project) -> Result<Profile, ClientError> {
        let request = self.client.post(self.url("/projects")).json(project);
        decode(self.authorized(request).send().await?).await
    }

    /// Remove the project at a zero-based position; returns the updated profile.
    pub async fn delete_project(&self, index: usize) -> Result<Profile, ClientError> {
        let request = self.client.delete(self.url(&format!("/projects/{}", index)));
        decode(self.authorized(request).send().await?).await
    }

    pub async fn list_projects(&self, query: &ProjectQuery) -> Result<ProjectsResponse, ClientError> {
        let response = self.client.get(self.url("/projects")).query(query).send().await?;
        decode(response).await
    }

    pub async fn list_skills(&self) -> Result<SkillsResponse, ClientError> {
        let response = self.client.get(self.url("/skills")).send().await?;
        decode(response).await
    }

    /// Most frequent skills. `None` uses the server's default limit.
    pub async fn top_skills(&self, limit: Option<u32>) -> Result<Vec<SkillCount>, ClientError> {
        let response = self
            .client
            .get(self.url("/skills/top"))
            .query(&TopSkillsQuery { limit })
            .send()
            .await?;
        let body: TopSkillsResponse = decode(response).await?;
        Ok(body.top_skills)
    }

    pub async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, ClientError> {
        let response = self.client.get(self.url("/search")).query(query).send().await?;
        decode(response).await
    }
}

async fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let detail = match serde_json::from_str::<ErrorBody>(&body) {
        Ok(error) => error.detail,
        Err(_) if body.trim().is_empty() => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
        Err(_) => body,
    };
    Err(ClientError::Api {
        status: status.as_u16(),
        detail,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let response = check(response).await?;
    Ok(response.json().await?)
}
