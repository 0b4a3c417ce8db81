// ABOUTME: Trainer chat: wraps a user question in the trainer persona and asks the LLM
// ABOUTME: Provider-agnostic so tests can drive it with an in-process mock
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog Contributors

use std::time::Instant;

use tracing::{info, warn};

use crate::constants::trainer::SYSTEM_PROMPT;
use crate::errors::AppResult;
use crate::llm::{ChatMessage, ChatRequest, LlmProvider};

/// Build the chat request for a trainer question
#[must_use]
pub fn build_trainer_request(question: &str) -> ChatRequest {
    ChatRequest::new(vec![
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(question.trim()),
    ])
}

/// Ask the trainer a question and return the answer text
///
/// # Errors
///
/// Returns `ExternalServiceError` if the provider call fails
pub async fn ask_trainer(
    provider: &dyn LlmProvider,
    user_id: i64,
    question: &str,
) -> AppResult<String> {
    let request = build_trainer_request(question);
    let started = Instant::now();

    match provider.complete(&request).await {
        Ok(response) => {
            info!(
                user_id,
                provider = provider.name(),
                model = %response.model,
                elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
                total_tokens = response.usage.as_ref().map(|u| u.total_tokens),
                "Trainer question answered"
            );
            Ok(response.content)
        }
        Err(e) => {
            warn!(user_id, provider = provider.name(), error = %e, "Trainer question failed");
            Err(e)
        }
    }
}
