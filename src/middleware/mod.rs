// ABOUTME: HTTP middleware for authentication, request tracing, and the trainer pipeline
// ABOUTME: Exposes the interceptors applied globally and per route group
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog Contributors

/// Bearer token authentication
pub mod auth;
/// CORS configuration
pub mod cors;
/// Per-user trainer request budget
pub mod rate_limiting;
/// Request ids, spans, and global HTTP layers
pub mod tracing;
/// Trainer question validation
pub mod validation;

pub use auth::{require_auth, AuthenticatedUser};
pub use cors::setup_cors;
pub use rate_limiting::{trainer_rate_limit, RateLimitStatus, TrainerRateLimiter};
pub use tracing::{create_request_span, request_id_header, with_http_layers};
pub use validation::{check_trainer_body, validate_trainer_question};
