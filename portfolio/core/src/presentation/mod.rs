// Copyright (c) 2026 Portfolio Playground Contributors
// SPDX-License-Identifier: AGPL-3.0

pub mod api;
pub mod auth;
pub mod error;
