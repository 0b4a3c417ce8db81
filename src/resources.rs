// ABOUTME: Centralized resource container shared by every route and middleware
// ABOUTME: Holds the database, auth manager, configuration, LLM provider, and trainer limiter
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog Contributors

use std::sync::Arc;

use crate::auth::AuthManager;
use crate::config::ServerConfig;
use crate::database::Database;
use crate::llm::LlmProvider;
use crate::middleware::rate_limiting::TrainerRateLimiter;

/// Centralized resource container for dependency injection
///
/// Built once at startup and shared as `Arc<ServerResources>` router state.
#[derive(Clone)]
pub struct ServerResources {
    /// Repositories
    pub database: Arc<Database>,
    /// Token issuing and password hashing
    pub auth_manager: Arc<AuthManager>,
    /// Startup configuration
    pub config: Arc<ServerConfig>,
    /// Trainer chat backend
    pub llm_provider: Arc<dyn LlmProvider>,
    /// Per-user trainer request budget
    pub trainer_limiter: TrainerRateLimiter,
}

impl ServerResources {
    /// Assemble resources from their parts
    #[must_use]
    pub fn new(
        database: Database,
        auth_manager: AuthManager,
        config: Arc<ServerConfig>,
        llm_provider: Arc<dyn LlmProvider>,
    ) -> Self {
        let trainer_limiter = TrainerRateLimiter::from_config(&config.trainer);
        Self {
            database: Arc::new(database),
            auth_manager: Arc::new(auth_manager),
            config,
            llm_provider,
            trainer_limiter,
        }
    }
}
