// Copyright (c) 2026 Portfolio Playground Contributors
// SPDX-License-Identifier: AGPL-3.0
/// Portfolio Rust SDK
///
/// Typed async client for the portfolio profile API.

pub mod client;
pub mod types;

pub use client::{ClientError, PortfolioClient};
pub use types::*;
