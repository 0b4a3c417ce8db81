// ABOUTME: HTTP server assembly and serve loop with graceful shutdown
// ABOUTME: Wraps the API router in the global layers and serves it until SIGINT or SIGTERM
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog Contributors

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::http::Uri;
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};

use crate::errors::AppError;
use crate::middleware::with_http_layers;
use crate::resources::ServerResources;
use crate::routes::api_router;

/// The Ironlog HTTP server
pub struct IronlogServer {
    resources: Arc<ServerResources>,
}

impl IronlogServer {
    /// Create a server over shared resources
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Complete application router, including global layers and the 404 fallback
    #[must_use]
    pub fn router(&self) -> Router {
        let router = api_router(&self.resources).fallback(handle_unknown_route);
        with_http_layers(router, &self.resources.config.http)
    }

    /// Bind `port` on all interfaces and serve until a shutdown signal arrives
    ///
    /// # Errors
    ///
    /// Returns an error if the port cannot be bound or the server fails
    pub async fn run(&self, port: u16) -> Result<()> {
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let listener = TcpListener::bind(addr).await?;
        info!(%addr, "HTTP server listening");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("HTTP server stopped");
        Ok(())
    }
}

async fn handle_unknown_route(uri: Uri) -> AppError {
    AppError::not_found(format!("Route {}", uri.path()))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {e}");
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
                error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down gracefully"),
        () = terminate => info!("Received SIGTERM, shutting down gracefully"),
    }
}
