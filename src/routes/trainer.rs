// ABOUTME: Trainer chat route: answers fitness questions through the LLM provider
// ABOUTME: Requests pass authentication, then the per-user rate limit, then question validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog Contributors

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;

use super::JsonBody;
use crate::errors::AppError;
use crate::middleware::{
    require_auth, trainer_rate_limit, validate_trainer_question, AuthenticatedUser,
};
use crate::resources::ServerResources;
use crate::services::trainer::ask_trainer;

/// Body of `POST /trainer/ask`
#[derive(Debug, Deserialize)]
pub struct AskTrainerRequest {
    /// The user's question
    pub question: String,
}

/// Reply of `POST /trainer/ask`
#[derive(Debug, Serialize, Deserialize)]
pub struct AskTrainerResponse {
    /// The trainer's answer
    pub answer: String,
}

/// Trainer routes implementation
pub struct TrainerRoutes;

impl TrainerRoutes {
    /// Create the trainer route with its interceptor chain
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        let pipeline = ServiceBuilder::new()
            .layer(from_fn_with_state(Arc::clone(&resources), require_auth))
            .layer(from_fn_with_state(Arc::clone(&resources), trainer_rate_limit))
            .layer(from_fn(validate_trainer_question));

        Router::new()
            .route("/trainer/ask", post(Self::handle_ask))
            .route_layer(pipeline)
            .with_state(resources)
    }

    /// Handle POST /trainer/ask
    async fn handle_ask(
        State(resources): State<Arc<ServerResources>>,
        user: AuthenticatedUser,
        JsonBody(body): JsonBody<AskTrainerRequest>,
    ) -> Result<Response, AppError> {
        let answer = ask_trainer(
            resources.llm_provider.as_ref(),
            user.user_id,
            &body.question,
        )
        .await?;
        Ok((StatusCode::OK, Json(AskTrainerResponse { answer })).into_response())
    }
}
