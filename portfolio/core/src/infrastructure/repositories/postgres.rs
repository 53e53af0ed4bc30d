// Copyright (c) 2026 Portfolio Playground Contributors
// SPDX-License-Identifier: AGPL-3.0
//! # PostgreSQL Profile Repository
//!
//! `ProfileRepository` backed by the `profiles` table. The aggregate is stored
//! whole as a JSONB document next to its id and timestamps; at most one row
//! exists at a time.

use async_trait::async_trait;
use sqlx::postgres::PgPool;
use sqlx::Row;

use crate::domain::profile::Profile;
use crate::domain::repository::{ProfileRepository, RepositoryError};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS profiles (
    id UUID PRIMARY KEY,
    document JSONB NOT NULL,
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
)
"#;

pub struct PostgresProfileRepository {
    pool: PgPool,
}

impl PostgresProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn ensure_schema(&self) -> Result<(), RepositoryError> {
        sqlx::query(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(format!("Failed to create profiles table: {}", e)))?;
        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn load(&self) -> Result<Option<Profile>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT document
            FROM profiles
            ORDER BY updated_at DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        match row {
            Some(row) => {
                let document: serde_json::Value = row.get("document");
                let profile = serde_json::from_value(document).map_err(|e| {
                    RepositoryError::Serialization(format!("Failed to deserialize profile: {}", e))
                })?;
                Ok(Some(profile))
            }
            None => Ok(None),
        }
    }

    async fn save(&self, profile: &Profile) -> Result<(), RepositoryError> {
        let document = serde_json::to_value(profile)?;
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM profiles WHERE id <> $1")
            .bind(profile.id.0)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            INSERT INTO profiles (id, document, created_at, updated_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE SET
                document = EXCLUDED.document,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(profile.id.0)
        .bind(document)
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| RepositoryError::Database(format!("Failed to save profile: {}", e)))?;

        tx.commit().await?;
        Ok(())
    }

    async fn delete(&self) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM profiles")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
