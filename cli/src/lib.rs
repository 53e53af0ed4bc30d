// Copyright (c) 2026 Portfolio Playground Contributors
// SPDX-License-Identifier: AGPL-3.0
//! Portfolio CLI library - exposes testable components
//!
//! # Architecture
//!
//! - **Layer:** Interface / Presentation Layer
//! - **Purpose:** Service bootstrap and command handlers for the `portfolio` binary

pub mod commands;
pub mod logging;
pub mod server;
