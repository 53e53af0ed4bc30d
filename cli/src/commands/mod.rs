// Copyright (c) 2026 Portfolio Playground Contributors
// SPDX-License-Identifier: AGPL-3.0

//! Command implementations for the portfolio CLI

pub mod config;
pub mod profile;
pub mod projects;
pub mod search;
pub mod skills;

pub use self::config::ConfigCommand;
pub use self::profile::ProfileCommand;
pub use self::projects::ProjectsCommand;
pub use self::search::SearchArgs;
pub use self::skills::SkillsCommand;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

use portfolio_core::domain::service_config::ServiceConfigManifest;
use portfolio_sdk::{Credentials, PortfolioClient};

/// Where client commands connect and what they authenticate writes with.
#[derive(Debug, Clone)]
pub struct ClientContext {
    pub base_url: String,
    pub credentials: Option<Credentials>,
}

impl ClientContext {
    /// Host and port come from the flags when given, otherwise from the
    /// service configuration.
    pub fn resolve(
        config_path: Option<PathBuf>,
        host: Option<String>,
        port: Option<u16>,
        username: &str,
        password: Option<String>,
    ) -> Result<Self> {
        let (host, port) = match (host, port) {
            (Some(host), Some(port)) => (host, port),
            (host, port) => {
                let config = ServiceConfigManifest::load_or_default(config_path)
                    .context("Failed to load configuration")?;
                (
                    host.unwrap_or(config.spec.server.bind_address),
                    port.unwrap_or(config.spec.server.port),
                )
            }
        };

        Ok(Self {
            base_url: base_url(&host, port),
            credentials: password.map(|password| Credentials::new(username, password)),
        })
    }

    /// Client for read-only calls.
    pub fn client(&self) -> PortfolioClient {
        PortfolioClient::new(&self.base_url)
    }

    /// Client for write calls. Fails early when no password was supplied.
    pub fn writer(&self) -> Result<PortfolioClient> {
        let credentials = self.credentials.clone().context(
            "This command modifies the profile. Supply --password or set PORTFOLIO_PASSWORD",
        )?;
        Ok(PortfolioClient::new(&self.base_url).with_credentials(credentials))
    }
}

fn base_url(host: &str, port: u16) -> String {
    // A wildcard bind address is not routable as a destination
    let host = match host {
        "0.0.0.0" | "::" | "[::]" => "127.0.0.1",
        other => other,
    };
    if host.contains(':') && !host.starts_with('[') {
        format!("http://[{}]:{}", host, port)
    } else {
        format!("http://{}:{}", host, port)
    }
}

/// Read a YAML or JSON document. `.json` files are parsed as JSON; anything
/// else as YAML.
pub fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    if is_json {
        serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path.display()))
    } else {
        serde_yaml::from_str(&content).with_context(|| format!("Invalid YAML in {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portfolio_sdk::Project;

    #[test]
    fn test_base_url() {
        assert_eq!(base_url("localhost", 8000), "http://localhost:8000");
        assert_eq!(base_url("0.0.0.0", 9000), "http://127.0.0.1:9000");
        assert_eq!(base_url("::1", 8000), "http://[::1]:8000");
    }

    #[test]
    fn test_explicit_host_and_port_skip_configuration() {
        let context = ClientContext::resolve(
            Some(PathBuf::from("/nonexistent/portfolio-config.yaml")),
            Some("example.internal".to_string()),
            Some(8080),
            "admin",
            None,
        )
        .unwrap();
        assert_eq!(context.base_url, "http://example.internal:8080");
        assert!(context.writer().is_err());
    }

    #[test]
    fn test_read_document_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let json = dir.path().join("project.json");
        std::fs::write(&json, r#"{"title": "Engine", "description": "Notes", "skills": ["Rust"]}"#).unwrap();
        let project: Project = read_document(&json).unwrap();
        assert_eq!(project.skills, vec!["Rust"]);

        let yaml = dir.path().join("project.yaml");
        std::fs::write(&yaml, "title: Loom\ndescription: Weaving\n").unwrap();
        let project: Project = read_document(&yaml).unwrap();
        assert_eq!(project.title, "Loom");
        assert!(project.skills.is_empty());

        assert!(read_document::<Project>(&dir.path().join("missing.yaml")).is_err());
    }
}
