// Copyright (c) 2026 Portfolio Playground Contributors
// SPDX-License-Identifier: AGPL-3.0

use crate::domain::repository::RepositoryError;

/// Failure conditions surfaced by every profile operation.
///
/// None of these are recovered from inside the core; callers receive them as-is.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid credentials")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Profile already exists. Use PUT to update.")]
    AlreadyExists,

    #[error("Store error: {0}")]
    Store(#[from] RepositoryError),
}

impl ProfileError {
    pub fn profile_not_found() -> Self {
        ProfileError::NotFound("Profile not found".to_string())
    }
}
