// ABOUTME: Authenticated dashboard greeting
// ABOUTME: Confirms a token is valid and echoes the caller's username from its claims
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog Contributors

use std::sync::Arc;

use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::{Json, Router};

use super::MessageResponse;
use crate::middleware::{require_auth, AuthenticatedUser};
use crate::resources::ServerResources;

/// Dashboard routes implementation
pub struct DashboardRoutes;

impl DashboardRoutes {
    /// Create the dashboard route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/dashboard", get(Self::handle_dashboard))
            .route_layer(from_fn_with_state(resources, require_auth))
    }

    /// Handle GET /dashboard
    async fn handle_dashboard(user: AuthenticatedUser) -> Json<MessageResponse> {
        Json(MessageResponse::new(format!(
            "Welcome to the dashboard, {}",
            user.username
        )))
    }
}
