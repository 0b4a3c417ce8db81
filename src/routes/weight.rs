// ABOUTME: Weight log route handlers
// ABOUTME: Logging a weight also mirrors it onto the user's profile
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog Contributors

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware::from_fn_with_state;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use ironlog_core::models::WeightEntry;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::JsonBody;
use crate::constants::limits;
use crate::errors::{AppError, AppResult};
use crate::middleware::{require_auth, AuthenticatedUser};
use crate::resources::ServerResources;

/// Body of `POST /weight`
#[derive(Debug, Default, Deserialize)]
pub struct LogWeightRequest {
    /// Weight in kilograms
    pub weight_kg: Option<f64>,
}

/// `{ "weight": [...] }`
#[derive(Debug, Serialize)]
pub struct WeightHistoryResponse {
    /// Entries, newest first
    pub weight: Vec<WeightEntry>,
}

/// `{ "weight": {...} }`
#[derive(Debug, Serialize)]
pub struct WeightEntryResponse {
    /// The stored entry
    pub weight: WeightEntry,
}

/// Check a weight value is a plausible body weight
pub(crate) fn validate_weight(weight_kg: f64) -> AppResult<f64> {
    if !weight_kg.is_finite() || weight_kg <= 0.0 || weight_kg > limits::MAX_WEIGHT_KG {
        return Err(AppError::invalid_input(format!(
            "weight_kg must be greater than 0 and at most {}",
            limits::MAX_WEIGHT_KG
        )));
    }
    Ok(weight_kg)
}

/// Weight routes implementation
pub struct WeightRoutes;

impl WeightRoutes {
    /// Create the weight routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/weight", post(Self::handle_log))
            .route("/weight/history", get(Self::handle_history))
            .route_layer(from_fn_with_state(Arc::clone(&resources), require_auth))
            .with_state(resources)
    }

    /// Handle GET /weight/history - List entries, newest first
    async fn handle_history(
        State(resources): State<Arc<ServerResources>>,
        user: AuthenticatedUser,
    ) -> Result<Response, AppError> {
        let weight = resources.database.weight().history(user.user_id).await?;
        Ok((StatusCode::OK, Json(WeightHistoryResponse { weight })).into_response())
    }

    /// Handle POST /weight - Log a weight
    async fn handle_log(
        State(resources): State<Arc<ServerResources>>,
        user: AuthenticatedUser,
        JsonBody(body): JsonBody<LogWeightRequest>,
    ) -> Result<Response, AppError> {
        let weight_kg = body
            .weight_kg
            .ok_or_else(|| AppError::missing_field("weight_kg is required"))
            .and_then(validate_weight)?;

        let weight = resources
            .database
            .weight()
            .log(user.user_id, weight_kg)
            .await?;
        info!(user_id = user.user_id, weight_kg, "Weight logged");
        Ok((StatusCode::CREATED, Json(WeightEntryResponse { weight })).into_response())
    }
}
