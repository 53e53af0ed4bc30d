// Copyright (c) 2026 Portfolio Playground Contributors
// SPDX-License-Identifier: AGPL-3.0
//! Log level selection and tracing subscriber setup

use anyhow::{Context, Result};
use std::path::PathBuf;

use portfolio_core::domain::service_config::ServiceConfigManifest;

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// `--log-level` wins; otherwise `spec.observability.log_level` from the
/// configuration, otherwise `info`. An unreadable configuration falls back to
/// the default here and is reported by the command that needs it.
pub fn resolve_log_level(flag: Option<String>, config_path: Option<PathBuf>) -> String {
    if let Some(level) = flag {
        return level;
    }

    ServiceConfigManifest::load_or_default(config_path)
        .ok()
        .and_then(|config| config.spec.observability)
        .map(|observability| observability.log_level)
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
}

/// Initialize tracing subscriber for logging
pub fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("Failed to create log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    Ok(())
}
