// Copyright (c) 2026 Portfolio Playground Contributors
// SPDX-License-Identifier: AGPL-3.0
//! # Profile Repository Interface
//!
//! Persistence contract for the profile aggregate. The interface lives in the
//! domain layer; implementations live in `crate::infrastructure::repositories`.
//!
//! | Backend | Implementation |
//! |---------|----------------|
//! | `InMemory` | `InMemoryProfileRepository` |
//! | `File` | `JsonFileProfileRepository` |
//! | `PostgreSQL` | `PostgresProfileRepository` |
//!
//! The store owns durability and is trusted to return the latest committed
//! document. Writes are last-write-wins; there is no concurrency token.

use async_trait::async_trait;
use std::path::PathBuf;

use crate::domain::profile::Profile;

/// Storage backend enum for pluggable persistence
#[derive(Debug, Clone)]
pub enum StorageBackend {
    InMemory,
    File(PathBuf),
    PostgreSQL(PostgresConfig),
}

#[derive(Debug, Clone)]
pub struct PostgresConfig {
    pub connection_string: String,
}

/// Repository interface for the single Profile aggregate
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Load the current profile, if one exists
    async fn load(&self) -> Result<Option<Profile>, RepositoryError>;

    /// Save profile (create or replace)
    async fn save(&self, profile: &Profile) -> Result<(), RepositoryError>;

    /// Delete the profile. Returns false when there was nothing to delete.
    async fn delete(&self) -> Result<bool, RepositoryError>;
}

/// Repository errors
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => RepositoryError::NotFound("Row not found".to_string()),
            _ => RepositoryError::Database(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for RepositoryError {
    fn from(err: std::io::Error) -> Self {
        RepositoryError::Io(err.to_string())
    }
}
