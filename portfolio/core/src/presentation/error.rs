// Copyright (c) 2026 Portfolio Playground Contributors
// SPDX-License-Identifier: AGPL-3.0
//! Mapping of domain failures onto HTTP responses with `{"detail": ...}` bodies.

use axum::http::header::{HeaderValue, WWW_AUTHENTICATE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::domain::error::ProfileError;

pub const BASIC_REALM: &str = "Basic realm=\"portfolio\"";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

#[derive(Debug)]
pub enum ApiError {
    Domain(ProfileError),
    /// Malformed path, query string or body
    BadRequest(String),
    RateLimited,
}

impl From<ProfileError> for ApiError {
    fn from(err: ProfileError) -> Self {
        ApiError::Domain(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Domain(ProfileError::InvalidArgument(_)) | ApiError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Domain(ProfileError::Unauthorized) => StatusCode::UNAUTHORIZED,
            ApiError::Domain(ProfileError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Domain(ProfileError::AlreadyExists) => StatusCode::CONFLICT,
            ApiError::Domain(ProfileError::Store(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        }
    }

    fn detail(&self) -> String {
        match self {
            ApiError::Domain(ProfileError::InvalidArgument(msg)) => msg.clone(),
            ApiError::Domain(ProfileError::NotFound(msg)) => msg.clone(),
            ApiError::Domain(ProfileError::Store(_)) => "Internal storage error".to_string(),
            ApiError::Domain(other) => other.to_string(),
            ApiError::BadRequest(msg) => msg.clone(),
            ApiError::RateLimited => "Rate limit exceeded. Please try again later.".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Domain(ProfileError::Store(e)) = &self {
            error!("Request failed with store error: {}", e);
        }

        let status = self.status();
        let mut response = (status, Json(ErrorBody { detail: self.detail() })).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static(BASIC_REALM));
        }
        response
    }
}
