// Copyright (c) 2026 Portfolio Playground Contributors
// SPDX-License-Identifier: AGPL-3.0
//! # JSON File Profile Repository
//!
//! Stores the profile as a single pretty-printed JSON document. Saves write a
//! sibling temp file and rename it over the target, so a crash mid-write
//! leaves the previous document intact. Writers within one process are
//! serialized; separate processes sharing a file are last-write-wins.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::profile::Profile;
use crate::domain::repository::{ProfileRepository, RepositoryError};

pub struct JsonFileProfileRepository {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileProfileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "profile.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl ProfileRepository for JsonFileProfileRepository {
    async fn load(&self) -> Result<Option<Profile>, RepositoryError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(None);
        }

        let profile = serde_json::from_str(&content).map_err(|e| {
            RepositoryError::Serialization(format!("Failed to parse {:?}: {}", self.path, e))
        })?;
        Ok(Some(profile))
    }

    async fn save(&self, profile: &Profile) -> Result<(), RepositoryError> {
        let json = serde_json::to_vec_pretty(profile)?;
        let _guard = self.write_lock.lock().await;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let temp = self.temp_path();
        tokio::fs::write(&temp, json).await?;
        tokio::fs::rename(&temp, &self.path).await?;
        debug!("Profile written to {:?}", self.path);
        Ok(())
    }

    async fn delete(&self) -> Result<bool, RepositoryError> {
        let _guard = self.write_lock.lock().await;
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
