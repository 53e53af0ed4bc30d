// Copyright (c) 2026 Portfolio Playground Contributors
// SPDX-License-Identifier: AGPL-3.0
//! # HTTP API
//!
//! Axum router over the profile and query services. Reads are public; writes
//! carry HTTP Basic credentials that are checked by the profile service.
//!
//! Response bodies are plain serde types so the SDK can deserialize them
//! without a separate schema.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    extract::{ConnectInfo, Path, Query, Request, State},
    http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::application::{ProfileService, QueryService};
use crate::domain::auth::Credentials;
use crate::domain::error::ProfileError;
use crate::domain::profile::{NewProfile, Profile, ProfilePatch, Project};
use crate::domain::projects::{paginate, PageRequest};
use crate::domain::search::SearchMatches;
use crate::domain::service_config::{CorsConfig, QueryConfig, ServiceConfigSpec};
use crate::domain::skills::SkillCount;
use crate::infrastructure::rate_limit::{ClientRateLimiter, RateDecision, RETRY_AFTER_SECS};
use crate::presentation::auth::credentials_from_headers;
use crate::presentation::error::ApiError;

pub const RATE_LIMIT_LIMIT: &str = "x-ratelimit-limit";
pub const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";

pub struct AppState {
    pub profiles: Arc<dyn ProfileService>,
    pub queries: Arc<dyn QueryService>,
    pub query: QueryConfig,
    pub started_at: Instant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub message: String,
    pub health: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectsResponse {
    pub projects: Vec<Project>,
    /// Projects on this page
    pub count: usize,
    /// Projects matching the filter across all pages
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillsResponse {
    pub skills: Vec<String>,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopSkillsResponse {
    pub top_skills: Vec<SkillCount>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub matches: SearchMatches,
    /// Matching projects before pagination
    pub total_project_matches: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,
    pub has_more_projects: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProjectsParams {
    pub skill: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TopSkillsParams {
    pub limit: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

pub fn app(
    profiles: Arc<dyn ProfileService>,
    queries: Arc<dyn QueryService>,
    spec: &ServiceConfigSpec,
) -> Router {
    let state = Arc::new(AppState {
        profiles,
        queries,
        query: spec.query.clone(),
        started_at: Instant::now(),
    });

    let mut router = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route(
            "/profile",
            get(get_profile)
                .post(create_profile)
                .put(update_profile)
                .delete(delete_profile),
        )
        .route("/projects", get(list_projects).post(add_project))
        .route("/projects/{index}", delete(delete_project))
        .route("/skills", get(list_skills))
        .route("/skills/top", get(top_skills))
        .route("/search", get(search))
        .with_state(state);

    if let Some(rate_limit) = &spec.rate_limit {
        let per_minute = NonZeroU32::new(rate_limit.requests_per_minute).unwrap_or(NonZeroU32::MIN);
        let limiter = Arc::new(ClientRateLimiter::per_minute(per_minute));
        router = router.layer(middleware::from_fn_with_state(limiter, enforce_rate_limit));
    }

    router
        .layer(cors_layer(&spec.cors))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    if config.allowed_origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}

async fn enforce_rate_limit(
    State(limiter): State<Arc<ClientRateLimiter>>,
    request: Request,
    next: Next,
) -> Response {
    if request.uri().path() == "/health" {
        return next.run(request).await;
    }

    let client = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let (mut response, remaining) = match limiter.check(&client) {
        RateDecision::Allowed { remaining } => (next.run(request).await, remaining),
        RateDecision::Limited => {
            let mut response = ApiError::RateLimited.into_response();
            response
                .headers_mut()
                .insert(axum::http::header::RETRY_AFTER, HeaderValue::from(RETRY_AFTER_SECS));
            (response, 0)
        }
    };

    let headers = response.headers_mut();
    headers.insert(HeaderName::from_static(RATE_LIMIT_LIMIT), HeaderValue::from(limiter.limit()));
    headers.insert(HeaderName::from_static(RATE_LIMIT_REMAINING), HeaderValue::from(remaining));
    response
}

async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "Welcome to the Portfolio Profile API".to_string(),
        health: "/health".to_string(),
    })
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
    })
}

async fn get_profile(State(state): State<Arc<AppState>>) -> Result<Json<Profile>, ApiError> {
    Ok(Json(state.profiles.get_profile().await?))
}

async fn create_profile(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<NewProfile>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let credentials = credentials_from_headers(&headers);
    let Json(payload) = authorized(&state, "create_profile", credentials.as_ref(), payload.map_err(json_rejection))?;
    let profile = state.profiles.create_profile(credentials.as_ref(), payload).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

async fn update_profile(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<ProfilePatch>, JsonRejection>,
) -> Result<Json<Profile>, ApiError> {
    let credentials = credentials_from_headers(&headers);
    let Json(patch) = authorized(&state, "update_profile", credentials.as_ref(), payload.map_err(json_rejection))?;
    Ok(Json(state.profiles.update_profile(credentials.as_ref(), patch).await?))
}

async fn delete_profile(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let credentials = credentials_from_headers(&headers);
    state.profiles.delete_profile(credentials.as_ref()).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn add_project(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<Project>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let credentials = credentials_from_headers(&headers);
    let Json(project) = authorized(&state, "add_project", credentials.as_ref(), payload.map_err(json_rejection))?;
    let profile = state.profiles.add_project(credentials.as_ref(), project).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

async fn delete_project(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    index: Result<Path<usize>, PathRejection>,
) -> Result<Json<Profile>, ApiError> {
    let credentials = credentials_from_headers(&headers);
    let Path(index) = authorized(
        &state,
        "delete_project",
        credentials.as_ref(),
        index.map_err(|e| ApiError::BadRequest(e.body_text())),
    )?;
    Ok(Json(state.profiles.delete_project(credentials.as_ref(), index).await?))
}

async fn list_projects(
    State(state): State<Arc<AppState>>,
    params: Result<Query<ProjectsParams>, QueryRejection>,
) -> Result<Json<ProjectsResponse>, ApiError> {
    let Query(params) = params.map_err(query_rejection)?;
    let request = page_request(
        params.page,
        params.page_size,
        state.query.default_page_size,
        state.query.max_page_size,
    )?;

    let page = state.queries.list_projects(params.skill.as_deref(), request).await?;
    Ok(Json(ProjectsResponse {
        count: page.items.len(),
        total: page.total,
        page: page.page,
        page_size: page.page_size,
        total_pages: page.total_pages(),
        has_next: page.has_next(),
        has_prev: page.has_prev(),
        projects: page.items,
    }))
}

async fn list_skills(State(state): State<Arc<AppState>>) -> Result<Json<SkillsResponse>, ApiError> {
    let skills = state.queries.list_skills().await?;
    Ok(Json(SkillsResponse {
        count: skills.len(),
        skills,
    }))
}

async fn top_skills(
    State(state): State<Arc<AppState>>,
    params: Result<Query<TopSkillsParams>, QueryRejection>,
) -> Result<Json<TopSkillsResponse>, ApiError> {
    let Query(params) = params.map_err(query_rejection)?;
    let max = i64::from(state.query.max_top_skills);
    let limit = params.limit.unwrap_or(i64::from(state.query.default_top_skills));
    if !(1..=max).contains(&limit) {
        return Err(ProfileError::InvalidArgument(format!(
            "limit must be between 1 and {}, got {}",
            max, limit
        ))
        .into());
    }

    let limit = usize::try_from(limit)
        .map_err(|_| ProfileError::InvalidArgument("limit is too large".to_string()))?;
    let top_skills = state.queries.top_skills(limit).await?;
    Ok(Json(TopSkillsResponse { top_skills }))
}

async fn search(
    State(state): State<Arc<AppState>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Query(params) = params.map_err(query_rejection)?;
    let paginated = params.page.is_some() || params.page_size.is_some();
    let request = if paginated {
        Some(page_request(
            params.page,
            params.page_size,
            state.query.default_search_page_size,
            state.query.max_search_page_size,
        )?)
    } else {
        None
    };

    let results = state.queries.search(params.q.as_deref().unwrap_or("")).await?;
    let mut matches = results.matches;
    let total_project_matches = matches.projects.len();

    let Some(request) = request else {
        return Ok(Json(SearchResponse {
            query: results.query,
            matches,
            total_project_matches,
            page: None,
            page_size: None,
            has_more_projects: false,
        }));
    };

    let page = paginate(&matches.projects, request);
    let has_more_projects = page.has_next();
    matches.projects = page.items;
    Ok(Json(SearchResponse {
        query: results.query,
        matches,
        total_project_matches,
        page: Some(page.page),
        page_size: Some(page.page_size),
        has_more_projects,
    }))
}

/// Page request with the size defaulted and clamped to `max`.
fn page_request(page: Option<i64>, page_size: Option<i64>, default: u32, max: u32) -> Result<PageRequest, ProfileError> {
    let page_size = page_size.unwrap_or(i64::from(default)).min(i64::from(max));
    PageRequest::new(page.unwrap_or(1), page_size)
}

/// A malformed write without valid credentials is reported as unauthorized.
/// Well-formed requests are authorized by the service call that follows.
fn authorized<T>(
    state: &AppState,
    operation: &'static str,
    credentials: Option<&Credentials>,
    extracted: Result<T, ApiError>,
) -> Result<T, ApiError> {
    extracted.map_err(|rejection| match state.profiles.authorize(operation, credentials) {
        Ok(()) => rejection,
        Err(denied) => denied.into(),
    })
}

fn json_rejection(rejection: JsonRejection) -> ApiError {
    ApiError::BadRequest(rejection.body_text())
}

fn query_rejection(rejection: QueryRejection) -> ApiError {
    ApiError::BadRequest(rejection.body_text())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_defaults_and_clamps() {
        let request = page_request(None, None, 10, 100).unwrap();
        assert_eq!((request.page(), request.page_size()), (1, 10));

        let request = page_request(Some(3), Some(500), 10, 100).unwrap();
        assert_eq!((request.page(), request.page_size()), (3, 100));

        assert!(page_request(Some(0), None, 10, 100).is_err());
        assert!(page_request(None, Some(0), 10, 100).is_err());
    }

    #[test]
    fn test_wildcard_cors_builds() {
        let _ = cors_layer(&CorsConfig::default());
        let _ = cors_layer(&CorsConfig {
            allowed_origins: vec!["http://localhost:3000".to_string(), "bad\norigin".to_string()],
        });
    }
}
