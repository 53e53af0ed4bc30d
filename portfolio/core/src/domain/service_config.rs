// Copyright (c) 2026 Portfolio Playground Contributors
// SPDX-License-Identifier: AGPL-3.0

// Service Configuration Types
//
// Defines the configuration manifest for a portfolio service instance:
// - Kubernetes-style manifest format (apiVersion/kind/metadata/spec)
// - HTTP bind settings
// - Write credentials (literal or "env:VAR_NAME")
// - Storage backend selection
// - Query defaults and limits
// - Rate limiting, CORS and observability settings

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::domain::auth::Credentials;
use crate::domain::repository::{PostgresConfig, StorageBackend};

pub const API_VERSION: &str = "portfolio/v1";
pub const KIND: &str = "ServiceConfig";
pub const CONFIG_PATH_ENV: &str = "PORTFOLIO_CONFIG_PATH";

/// Top-level Kubernetes-style service configuration manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfigManifest {
    /// API version (must be "portfolio/v1")
    #[serde(rename = "apiVersion")]
    pub api_version: String,

    /// Resource kind (must be "ServiceConfig")
    pub kind: String,

    pub metadata: ManifestMetadata,

    pub spec: ServiceConfigSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestMetadata {
    /// Human-readable instance name
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfigSpec {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub query: QueryConfig,

    /// Omit to disable rate limiting
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limit: Option<RateLimitConfig>,

    #[serde(default)]
    pub cors: CorsConfig,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub observability: Option<ObservabilityConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    #[serde(default = "default_api_port")]
    pub port: u16,
}

/// Write credentials. Either field may be "env:VAR_NAME".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_admin_username")]
    pub username: String,

    /// No default: a password must be configured before writes are possible
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    Memory,
    File,
    Postgres,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_storage_kind")]
    pub backend: StorageKind,

    /// Document path for the `file` backend
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Connection string for the `postgres` backend (supports "env:VAR_NAME")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_string: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,

    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,

    #[serde(default = "default_top_skills")]
    pub default_top_skills: u32,

    #[serde(default = "default_max_top_skills")]
    pub max_top_skills: u32,

    #[serde(default = "default_page_size")]
    pub default_search_page_size: u32,

    #[serde(default = "default_max_search_page_size")]
    pub max_search_page_size: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_minute")]
    pub requests_per_minute: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// "*" allows any origin
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Prometheus exporter port. Omit to disable the exporter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics_port: Option<u16>,
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_api_port() -> u16 {
    8000
}

fn default_admin_username() -> String {
    "admin".to_string()
}

fn default_storage_kind() -> StorageKind {
    StorageKind::Memory
}

fn default_page_size() -> u32 {
    10
}

fn default_max_page_size() -> u32 {
    100
}

fn default_top_skills() -> u32 {
    5
}

fn default_max_top_skills() -> u32 {
    20
}

fn default_max_search_page_size() -> u32 {
    50
}

fn default_requests_per_minute() -> u32 {
    60
}

fn default_allowed_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_api_port(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username: default_admin_username(),
            password: String::new(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_storage_kind(),
            path: None,
            connection_string: None,
        }
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            default_top_skills: default_top_skills(),
            max_top_skills: default_max_top_skills(),
            default_search_page_size: default_page_size(),
            max_search_page_size: default_max_search_page_size(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_minute: default_requests_per_minute(),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

impl Default for ServiceConfigManifest {
    fn default() -> Self {
        Self {
            api_version: API_VERSION.to_string(),
            kind: KIND.to_string(),
            metadata: ManifestMetadata {
                name: "portfolio".to_string(),
                labels: None,
            },
            spec: ServiceConfigSpec::default(),
        }
    }
}

impl AuthConfig {
    /// Resolve "env:VAR" references into concrete credentials.
    pub fn resolve(&self) -> anyhow::Result<Credentials> {
        Ok(Credentials::new(
            resolve_value(&self.username)?,
            resolve_value(&self.password)?,
        ))
    }
}

impl StorageConfig {
    pub fn backend(&self) -> anyhow::Result<StorageBackend> {
        match self.backend {
            StorageKind::Memory => Ok(StorageBackend::InMemory),
            StorageKind::File => {
                let path = self
                    .path
                    .clone()
                    .ok_or_else(|| anyhow::anyhow!("storage.path is required for the file backend"))?;
                Ok(StorageBackend::File(path))
            }
            StorageKind::Postgres => {
                let raw = self.connection_string.as_deref().ok_or_else(|| {
                    anyhow::anyhow!("storage.connection_string is required for the postgres backend")
                })?;
                Ok(StorageBackend::PostgreSQL(PostgresConfig {
                    connection_string: resolve_value(raw)?,
                }))
            }
        }
    }
}

/// Expand "env:VAR_NAME" to the variable's value; other strings pass through.
pub fn resolve_value(raw: &str) -> anyhow::Result<String> {
    match raw.strip_prefix("env:") {
        Some(var) => std::env::var(var)
            .map_err(|_| anyhow::anyhow!("environment variable '{}' is not set", var)),
        None => Ok(raw.to_string()),
    }
}

impl ServiceConfigManifest {
    /// Load configuration from YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to YAML file
    pub fn to_yaml_file(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Parse configuration from YAML string
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        let config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Discover configuration file using precedence order
    /// 1. PORTFOLIO_CONFIG_PATH environment variable
    /// 2. ./portfolio-config.yaml (working directory)
    /// 3. ~/.portfolio/config.yaml (user home)
    /// 4. /etc/portfolio/config.yaml (system, Unix) or C:\ProgramData\Portfolio\config.yaml (Windows)
    pub fn discover_config() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        let cwd = PathBuf::from("./portfolio-config.yaml");
        if cwd.exists() {
            return Some(cwd);
        }

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".portfolio").join("config.yaml");
            if user_config.exists() {
                return Some(user_config);
            }
        }

        #[cfg(unix)]
        let system_config = PathBuf::from("/etc/portfolio/config.yaml");
        #[cfg(windows)]
        let system_config = PathBuf::from("C:\\ProgramData\\Portfolio\\config.yaml");

        if system_config.exists() {
            return Some(system_config);
        }

        None
    }

    /// Load configuration with discovery, fallback to default
    pub fn load_or_default(cli_path: Option<PathBuf>) -> anyhow::Result<Self> {
        // Explicit CLI path must exist and parse
        if let Some(path) = cli_path {
            tracing::info!("Loading configuration from explicit path: {:?}", path);
            let mut config = Self::from_yaml_file(&path).map_err(|e| {
                anyhow::anyhow!("Failed to load config at {:?}: {}", path, e)
            })?;
            config.apply_env_overrides();
            return Ok(config);
        }

        if let Some(config_path) = Self::discover_config() {
            tracing::info!("Loading configuration from discovered path: {:?}", config_path);
            let mut config = Self::from_yaml_file(config_path)?;
            config.apply_env_overrides();
            Ok(config)
        } else {
            tracing::warn!("No configuration file found in standard locations. Using defaults.");
            let mut config = Self::default();
            config.apply_env_overrides();
            Ok(config)
        }
    }

    /// Apply environment variable overrides to configuration
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("PORTFOLIO_ADMIN_USERNAME") {
            tracing::info!("Environment override: PORTFOLIO_ADMIN_USERNAME");
            self.spec.auth.username = val;
        }

        if let Ok(val) = std::env::var("PORTFOLIO_ADMIN_PASSWORD") {
            tracing::info!("Environment override: PORTFOLIO_ADMIN_PASSWORD");
            self.spec.auth.password = val;
        }

        if let Ok(val) = std::env::var("PORTFOLIO_DATABASE_URL") {
            tracing::info!("Environment override: PORTFOLIO_DATABASE_URL (storage backend set to postgres)");
            self.spec.storage.backend = StorageKind::Postgres;
            self.spec.storage.connection_string = Some(val);
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_version != API_VERSION {
            anyhow::bail!(
                "Invalid apiVersion: '{}'. Must be '{}'",
                self.api_version,
                API_VERSION
            );
        }

        if self.kind != KIND {
            anyhow::bail!("Invalid kind: '{}'. Must be '{}'", self.kind, KIND);
        }

        if self.metadata.name.is_empty() {
            anyhow::bail!("metadata.name cannot be empty");
        }

        let credentials = self.spec.auth.resolve()?;
        if credentials.username.is_empty() {
            anyhow::bail!("spec.auth.username cannot be empty");
        }
        if credentials.password.is_empty() {
            anyhow::bail!(
                "spec.auth.password is not set. Configure it in the manifest, via \"env:VAR\", or with PORTFOLIO_ADMIN_PASSWORD"
            );
        }

        self.spec.storage.backend()?;

        let query = &self.spec.query;
        for (field, value) in [
            ("default_page_size", query.default_page_size),
            ("max_page_size", query.max_page_size),
            ("default_top_skills", query.default_top_skills),
            ("max_top_skills", query.max_top_skills),
            ("default_search_page_size", query.default_search_page_size),
            ("max_search_page_size", query.max_search_page_size),
        ] {
            if value == 0 {
                anyhow::bail!("spec.query.{} must be at least 1", field);
            }
        }
        if query.default_page_size > query.max_page_size {
            anyhow::bail!("spec.query.default_page_size exceeds max_page_size");
        }
        if query.default_top_skills > query.max_top_skills {
            anyhow::bail!("spec.query.default_top_skills exceeds max_top_skills");
        }
        if query.default_search_page_size > query.max_search_page_size {
            anyhow::bail!("spec.query.default_search_page_size exceeds max_search_page_size");
        }

        if let Some(rate_limit) = &self.spec.rate_limit {
            if rate_limit.requests_per_minute == 0 {
                anyhow::bail!("spec.rate_limit.requests_per_minute must be at least 1");
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_manifest() {
        let manifest = ServiceConfigManifest::default();
        assert_eq!(manifest.api_version, API_VERSION);
        assert_eq!(manifest.kind, KIND);
        assert_eq!(manifest.spec.server.port, 8000);
        assert_eq!(manifest.spec.storage.backend, StorageKind::Memory);
        assert_eq!(manifest.spec.query.default_page_size, 10);
        assert_eq!(manifest.spec.query.max_top_skills, 20);
        assert!(manifest.spec.rate_limit.is_none());
    }

    #[test]
    fn test_default_manifest_has_no_password() {
        let manifest = ServiceConfigManifest::default();
        assert!(manifest.spec.auth.password.is_empty());
        assert!(manifest.validate().is_err());
    }

    #[test]
    fn test_minimal_yaml_fills_defaults() {
        let yaml = r#"
apiVersion: portfolio/v1
kind: ServiceConfig
metadata:
  name: test
spec:
  auth:
    password: hunter2
  storage:
    backend: file
    path: /tmp/profile.json
  rate_limit: {}
"#;
        let manifest = ServiceConfigManifest::from_yaml_str(yaml).unwrap();
        assert_eq!(manifest.spec.auth.username, "admin");
        assert_eq!(manifest.spec.server.bind_address, "127.0.0.1");
        assert_eq!(manifest.spec.rate_limit.as_ref().unwrap().requests_per_minute, 60);
        assert!(matches!(
            manifest.spec.storage.backend().unwrap(),
            StorageBackend::File(p) if p == PathBuf::from("/tmp/profile.json")
        ));
        assert!(manifest.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let mut manifest = ServiceConfigManifest::default();
        manifest.spec.auth.password = "pw".to_string();
        assert!(manifest.validate().is_ok());

        manifest.api_version = "wrong/v1".to_string();
        assert!(manifest.validate().is_err());
        manifest.api_version = API_VERSION.to_string();

        manifest.kind = "WrongKind".to_string();
        assert!(manifest.validate().is_err());
        manifest.kind = KIND.to_string();

        manifest.spec.query.max_page_size = 5;
        assert!(manifest.validate().is_err());
        manifest.spec.query.max_page_size = 100;

        manifest.spec.storage.backend = StorageKind::Postgres;
        assert!(manifest.validate().is_err());
        manifest.spec.storage.backend = StorageKind::Memory;

        manifest.spec.rate_limit = Some(RateLimitConfig { requests_per_minute: 0 });
        assert!(manifest.validate().is_err());
    }

    #[test]
    fn test_env_reference_resolution() {
        std::env::set_var("PORTFOLIO_TEST_RESOLVE_SECRET", "from-env");
        assert_eq!(resolve_value("env:PORTFOLIO_TEST_RESOLVE_SECRET").unwrap(), "from-env");
        assert_eq!(resolve_value("literal").unwrap(), "literal");
        assert!(resolve_value("env:PORTFOLIO_TEST_UNSET_VARIABLE_XYZ").is_err());
    }
}
