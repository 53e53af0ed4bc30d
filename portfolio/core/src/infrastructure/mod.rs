// Copyright (c) 2026 Portfolio Playground Contributors
// SPDX-License-Identifier: AGPL-3.0

pub mod db;
pub mod rate_limit;
pub mod repositories;
