// Copyright (c) 2026 Portfolio Playground Contributors
// SPDX-License-Identifier: AGPL-3.0
//! Foreground HTTP server
//!
//! Loads and validates the service configuration, wires the repository,
//! auth gate and services together, then serves the API until Ctrl+C or
//! SIGTERM.

use anyhow::{Context, Result};
use axum::Router;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};

use portfolio_core::{
    application::{StandardProfileService, StandardQueryService},
    domain::auth::StaticCredentialGate,
    domain::service_config::ServiceConfigManifest,
    infrastructure::repositories::build_repository,
    presentation::api::app,
};

/// Build the API router for a validated configuration.
pub async fn build_app(config: &ServiceConfigManifest) -> Result<Router> {
    let credentials = config
        .spec
        .auth
        .resolve()
        .context("Failed to resolve write credentials")?;
    let backend = config
        .spec
        .storage
        .backend()
        .context("Invalid storage configuration")?;

    let repository = build_repository(&backend)
        .await
        .context("Failed to initialize profile storage")?;
    let gate = Arc::new(StaticCredentialGate::new(credentials));

    let profiles = Arc::new(StandardProfileService::new(repository.clone(), gate));
    let queries = Arc::new(StandardQueryService::new(repository));

    Ok(app(profiles, queries, &config.spec))
}

pub async fn serve(config_path: Option<PathBuf>, host: Option<String>, port: Option<u16>) -> Result<()> {
    let mut config = ServiceConfigManifest::load_or_default(config_path)
        .context("Failed to load configuration")?;

    if let Some(host) = host {
        config.spec.server.bind_address = host;
    }
    if let Some(port) = port {
        config.spec.server.port = port;
    }

    config
        .validate()
        .context("Configuration validation failed")?;

    info!("Configuration loaded: instance={}", config.metadata.name);

    if let Some(metrics_port) = config
        .spec
        .observability
        .as_ref()
        .and_then(|o| o.metrics_port)
    {
        PrometheusBuilder::new()
            .with_http_listener(([0, 0, 0, 0], metrics_port))
            .install()
            .context("Failed to install Prometheus exporter")?;
        info!("Prometheus metrics exposed on port {}", metrics_port);
    }

    let app = build_app(&config).await?;

    let addr = format!("{}:{}", config.spec.server.bind_address, config.spec.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Portfolio API listening on {}", addr);

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Portfolio API shutting down");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
