// Copyright (c) 2026 Portfolio Playground Contributors
// SPDX-License-Identifier: AGPL-3.0
//! Domain layer
//!
//! The profile aggregate and the pure projections computed from it. Nothing in
//! here performs I/O; persistence is reached only through `repository`.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer

pub mod auth;
pub mod error;
pub mod matching;
pub mod profile;
pub mod projects;
pub mod repository;
pub mod search;
pub mod service_config;
pub mod skills;
