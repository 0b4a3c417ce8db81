// ABOUTME: Per-user fixed-window rate limiting for the trainer chat endpoint
// ABOUTME: Tracks request counts in a sharded DashMap and rejects with 429 plus Retry-After
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog Contributors

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use dashmap::DashMap;
use tracing::debug;

use super::auth::AuthenticatedUser;
use crate::config::TrainerConfig;
use crate::constants::messages;
use crate::errors::AppError;
use crate::logging::AppLogger;
use crate::resources::ServerResources;

/// Map size above which expired windows are swept
const CLEANUP_THRESHOLD: usize = 10_000;

/// Outcome of a rate limit check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitStatus {
    /// Request was rejected
    pub is_limited: bool,
    /// Requests allowed per window
    pub limit: u32,
    /// Requests left in the current window after this one
    pub remaining: u32,
    /// Whole seconds until the window resets (at least 1)
    pub retry_after_secs: u64,
}

/// Per-user request counter with fixed windows
///
/// State is user id -> (`request_count`, `window_start`). `DashMap` shards the map so
/// concurrent users do not contend on a single lock.
#[derive(Clone)]
pub struct TrainerRateLimiter {
    state: Arc<DashMap<i64, (u32, Instant)>>,
    limit: u32,
    window: Duration,
}

impl TrainerRateLimiter {
    /// Create a limiter allowing `limit` requests per `window`
    #[must_use]
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            state: Arc::new(DashMap::new()),
            limit,
            window,
        }
    }

    /// Create a limiter from trainer configuration
    #[must_use]
    pub fn from_config(config: &TrainerConfig) -> Self {
        Self::new(
            config.rate_limit_requests,
            Duration::from_secs(config.rate_limit_window_secs),
        )
    }

    /// Count a request for `user_id` and report whether it is allowed
    #[must_use]
    pub fn check(&self, user_id: i64) -> RateLimitStatus {
        let now = Instant::now();

        // Entry API keeps read-modify-write atomic per shard
        let mut entry = self.state.entry(user_id).or_insert((0, now));
        let (count, window_start) = entry.value_mut();

        if now.duration_since(*window_start) >= self.window {
            *count = 0;
            *window_start = now;
        }

        let is_limited = *count >= self.limit;
        if !is_limited {
            *count += 1;
        }
        let remaining = self.limit.saturating_sub(*count);
        let elapsed = now.duration_since(*window_start);
        drop(entry);

        if self.state.len() > CLEANUP_THRESHOLD {
            self.cleanup_expired(now);
        }

        let until_reset = self.window.saturating_sub(elapsed);
        let retry_after_secs = until_reset
            .as_secs()
            .saturating_add(u64::from(until_reset.subsec_nanos() > 0))
            .max(1);

        RateLimitStatus {
            is_limited,
            limit: self.limit,
            remaining,
            retry_after_secs,
        }
    }

    fn cleanup_expired(&self, now: Instant) {
        self.state
            .retain(|_, (_, start)| now.duration_since(*start) < self.window);
    }
}

/// Reject trainer requests beyond the per-user budget
///
/// Must run after [`super::auth::require_auth`]; an unauthenticated request is
/// rejected with 401 rather than counted.
pub async fn trainer_rate_limit(
    State(resources): State<Arc<ServerResources>>,
    req: Request,
    next: Next,
) -> Response {
    let Some(user) = req.extensions().get::<AuthenticatedUser>() else {
        return AppError::auth_required().into_response();
    };
    let user_id = user.user_id;

    let status = resources.trainer_limiter.check(user_id);
    if status.is_limited {
        AppLogger::log_security_event("trainer_rate_limited", "trainer request budget exhausted", Some(user_id));
        return AppError::rate_limited(messages::TRAINER_RATE_LIMITED, status.retry_after_secs)
            .into_response();
    }

    debug!(user_id, remaining = status.remaining, "Trainer request admitted");
    next.run(req).await
}
