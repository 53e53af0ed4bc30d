// Copyright (c) 2026 Portfolio Playground Contributors
// SPDX-License-Identifier: AGPL-3.0

//! Repository Implementations
//!
//! Infrastructure implementations of [`ProfileRepository`], selected at
//! startup from the configured [`StorageBackend`].
//!
//! - **InMemoryProfileRepository** - process-local, lost on restart
//! - **JsonFileProfileRepository** - one JSON document on disk
//! - **PostgresProfileRepository** - JSONB document row in PostgreSQL

pub mod file;
pub mod postgres;

use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::info;

use crate::domain::profile::Profile;
use crate::domain::repository::{ProfileRepository, RepositoryError, StorageBackend};
use crate::infrastructure::db::Database;

pub use file::JsonFileProfileRepository;
pub use postgres::PostgresProfileRepository;

#[derive(Clone, Default)]
pub struct InMemoryProfileRepository {
    profile: Arc<RwLock<Option<Profile>>>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-seeded with a profile.
    pub fn with_profile(profile: Profile) -> Self {
        Self {
            profile: Arc::new(RwLock::new(Some(profile))),
        }
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn load(&self) -> Result<Option<Profile>, RepositoryError> {
        Ok(self.profile.read().clone())
    }

    async fn save(&self, profile: &Profile) -> Result<(), RepositoryError> {
        *self.profile.write() = Some(profile.clone());
        Ok(())
    }

    async fn delete(&self) -> Result<bool, RepositoryError> {
        Ok(self.profile.write().take().is_some())
    }
}

/// Build the repository for a storage backend. The PostgreSQL backend
/// connects and creates its table before returning.
pub async fn build_repository(backend: &StorageBackend) -> anyhow::Result<Arc<dyn ProfileRepository>> {
    match backend {
        StorageBackend::InMemory => {
            info!("Using in-memory profile storage");
            Ok(Arc::new(InMemoryProfileRepository::new()))
        }
        StorageBackend::File(path) => {
            info!("Using file profile storage at {:?}", path);
            Ok(Arc::new(JsonFileProfileRepository::new(path.clone())))
        }
        StorageBackend::PostgreSQL(config) => {
            info!("Using PostgreSQL profile storage");
            let db = Database::new(&config.connection_string).await?;
            let repository = PostgresProfileRepository::new(db.get_pool().clone());
            repository.ensure_schema().await?;
            Ok(Arc::new(repository))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile::NewProfile;

    fn profile(name: &str) -> Profile {
        Profile::create(NewProfile {
            name: name.to_string(),
            email: "ada@example.com".to_string(),
            skills: vec!["Rust".to_string()],
            links: Default::default(),
            education: vec![],
            work: vec![],
            projects: vec![],
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_in_memory_lifecycle() {
        let repo = InMemoryProfileRepository::new();
        assert!(repo.load().await.unwrap().is_none());
        assert!(!repo.delete().await.unwrap());

        repo.save(&profile("Ada")).await.unwrap();
        repo.save(&profile("Grace")).await.unwrap();
        assert_eq!(repo.load().await.unwrap().unwrap().name, "Grace");

        assert!(repo.delete().await.unwrap());
        assert!(repo.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let repo = InMemoryProfileRepository::new();
        let other = repo.clone();
        repo.save(&profile("Ada")).await.unwrap();
        assert!(other.load().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_factory_builds_memory_backend() {
        let repo = build_repository(&StorageBackend::InMemory).await.unwrap();
        assert!(repo.load().await.unwrap().is_none());
    }
}
