// Copyright (c) 2026 Portfolio Playground Contributors
// SPDX-License-Identifier: AGPL-3.0

pub mod profile_service;
pub mod query_service;

// Re-export services for convenience
pub use profile_service::{ProfileService, StandardProfileService};
pub use query_service::{QueryService, StandardQueryService};
