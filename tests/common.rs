// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides database, resources, mock LLM, and user/token helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog Contributors
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `ironlog_server`
//!
//! This module provides common test setup functions to reduce duplication
//! across integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};

use anyhow::Result;
use async_trait::async_trait;
use axum::Router;
use ironlog_server::{
    auth::AuthManager,
    config::ServerConfig,
    database::{Database, NewUser},
    errors::AppError,
    llm::{ChatRequest, ChatResponse, LlmProvider},
    models::{NewExercise, NewWorkout, NewWorkoutExercise},
    resources::ServerResources,
    server::IronlogServer,
};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup (in-memory, single connection)
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    Database::new("sqlite::memory:").await
}

/// LLM provider that answers from memory and counts calls
pub struct MockLlmProvider {
    answer: String,
    fail: bool,
    calls: AtomicUsize,
}

impl MockLlmProvider {
    /// Provider that always answers `answer`
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: answer.to_owned(),
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// Provider whose every call fails like an unreachable upstream
    pub fn failing() -> Self {
        Self {
            answer: String::new(),
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of completions requested so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmProvider for MockLlmProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn default_model(&self) -> &str {
        "mock-model"
    }

    async fn complete(&self, _request: &ChatRequest) -> Result<ChatResponse, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(AppError::external_service("LLM", "connection refused"));
        }
        Ok(ChatResponse {
            content: self.answer.clone(),
            model: "mock-model".to_owned(),
            usage: None,
            finish_reason: Some("stop".to_owned()),
        })
    }

    async fn health_check(&self) -> Result<bool, AppError> {
        Ok(!self.fail)
    }
}

/// Test configuration: default limits, fixed secret
pub fn test_config() -> ServerConfig {
    let mut config = ServerConfig::default();
    config.auth.jwt_secret = "integration-test-secret-integration-test-secret".to_owned();
    config
}

/// Resources over a fresh in-memory database with the given config and provider
pub async fn create_test_resources_with(
    config: ServerConfig,
    provider: Arc<dyn LlmProvider>,
) -> Result<Arc<ServerResources>> {
    let database = create_test_database().await?;
    let auth_manager = AuthManager::new(
        config.auth.jwt_secret.as_bytes(),
        config.auth.jwt_expiry_hours,
    )
    .with_bcrypt_cost(4);
    Ok(Arc::new(ServerResources::new(
        database,
        auth_manager,
        Arc::new(config),
        provider,
    )))
}

/// Resources with the default test config and a mock trainer
pub async fn create_test_resources() -> Result<Arc<ServerResources>> {
    create_test_resources_with(
        test_config(),
        Arc::new(MockLlmProvider::answering("Rest two days a week.")),
    )
    .await
}

/// Full application router, global layers included
pub fn app(resources: &Arc<ServerResources>) -> Router {
    IronlogServer::new(Arc::clone(resources)).router()
}

/// Insert a user directly and return `(user_id, bearer token)`
pub async fn create_test_user(
    resources: &ServerResources,
    email: &str,
    username: &str,
) -> Result<(i64, String)> {
    let password_hash = resources.auth_manager.hash_password("password123").await?;
    let user = resources
        .database
        .users()
        .create(&NewUser {
            email: email.to_owned(),
            username: username.to_owned(),
            password_hash,
        })
        .await?;
    let token = resources
        .auth_manager
        .generate_token(user.id, &user.email, &user.username)?;
    Ok((user.id, token))
}

/// Create an exercise owned by `owner_id` and return its id
pub async fn create_test_exercise(
    database: &Database,
    owner_id: i64,
    name: &str,
    is_private: bool,
) -> Result<i64> {
    let exercise = database
        .exercises()
        .create(
            owner_id,
            &NewExercise {
                name: Some(name.to_owned()),
                category: Some("strength".to_owned()),
                is_private: Some(is_private),
                ..NewExercise::default()
            },
        )
        .await?;
    Ok(exercise.id)
}

/// Entry payload with sets and reps
pub fn entry(exercise_id: i64, sets: i64, reps: i64) -> NewWorkoutExercise {
    NewWorkoutExercise {
        exercise_id,
        sets: Some(sets),
        reps: Some(reps),
        ..NewWorkoutExercise::default()
    }
}

/// Workout payload
pub fn new_workout(name: &str, is_private: bool, exercises: Vec<NewWorkoutExercise>) -> NewWorkout {
    NewWorkout {
        name: Some(name.to_owned()),
        description: None,
        is_private: Some(is_private),
        exercises,
    }
}
