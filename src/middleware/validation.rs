// ABOUTME: Trainer question validation middleware
// ABOUTME: Rejects missing bodies and blank questions before any LLM call is made
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog Contributors

use axum::body::{to_bytes, Body};
use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde_json::Value;

use crate::constants::{limits, messages};
use crate::errors::{AppError, AppResult};

/// Check a raw trainer request body
///
/// # Errors
///
/// Returns `InvalidInput` with the client-facing message for the first failed check
pub fn check_trainer_body(body: &[u8]) -> AppResult<()> {
    let parsed: Option<Value> = serde_json::from_slice(body).ok();
    let Some(Value::Object(fields)) = parsed else {
        return Err(AppError::invalid_input(messages::TRAINER_BODY_REQUIRED));
    };

    let question = fields
        .get("question")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::invalid_input(messages::TRAINER_QUESTION_REQUIRED))?;

    if question.chars().count() > limits::MAX_TRAINER_QUESTION_LENGTH {
        return Err(AppError::invalid_input(format!(
            "Question must be at most {} characters long",
            limits::MAX_TRAINER_QUESTION_LENGTH
        )));
    }
    Ok(())
}

/// Validate the trainer question, then hand the buffered body on unchanged
pub async fn validate_trainer_question(req: Request, next: Next) -> Response {
    let (parts, body) = req.into_parts();
    // The global body limit layer already bounds the size
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            return AppError::invalid_input(format!("Failed to read request body: {e}"))
                .into_response()
        }
    };

    if let Err(e) = check_trainer_body(&bytes) {
        return e.into_response();
    }

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}
