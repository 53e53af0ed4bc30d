// Copyright (c) 2026 Portfolio Playground Contributors
// SPDX-License-Identifier: AGPL-3.0
//! # Write Authorization Gate
//!
//! Every mutating operation presents a username/password pair that is checked
//! against one configured pair. The check is stateless: no sessions, tokens or
//! expiry, so each write re-authenticates on its own.
//!
//! The configured pair comes from the service configuration (optionally
//! resolved from the environment); nothing is embedded in the binary.

use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

use crate::domain::error::ProfileError;

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

pub trait AuthGate: Send + Sync {
    /// True only for the exact configured pair.
    fn authorize(&self, provided: &Credentials) -> bool;

    /// Fails with `Unauthorized` unless credentials are present and accepted.
    fn require(&self, provided: Option<&Credentials>) -> Result<(), ProfileError> {
        match provided {
            Some(credentials) if self.authorize(credentials) => Ok(()),
            Some(credentials) => {
                tracing::warn!(username = %credentials.username, "Rejected write credentials");
                Err(ProfileError::Unauthorized)
            }
            None => {
                tracing::warn!("Write attempted without credentials");
                Err(ProfileError::Unauthorized)
            }
        }
    }
}

/// Gate backed by a single configured credential pair.
pub struct StaticCredentialGate {
    expected: Credentials,
}

impl StaticCredentialGate {
    pub fn new(expected: Credentials) -> Self {
        Self { expected }
    }
}

impl AuthGate for StaticCredentialGate {
    fn authorize(&self, provided: &Credentials) -> bool {
        // Both comparisons always run so timing does not reveal which field differed.
        let username_ok = provided
            .username
            .as_bytes()
            .ct_eq(self.expected.username.as_bytes());
        let password_ok = provided
            .password
            .as_bytes()
            .ct_eq(self.expected.password.as_bytes());
        (username_ok & password_ok).into()
    }
}
