// Copyright (c) 2026 Portfolio Playground Contributors
// SPDX-License-Identifier: AGPL-3.0
//! Portfolio core
//!
//! Profile aggregate, skill ranking, search, project listing and the write
//! authorization gate, plus the repository adapters and the HTTP surface that
//! exposes them.
//!
//! # Architecture
//!
//! - **Layer:** Core System
//! - **Purpose:** Single-profile query and mutation service

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
