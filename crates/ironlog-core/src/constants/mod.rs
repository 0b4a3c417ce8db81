// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants (limits, messages, defaults) for the Ironlog API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog Contributors

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single large file.

/// Client-facing messages shared between handlers and tests
pub mod messages;

/// Service identification
pub mod service_names {
    /// Service name used in logs and the health endpoint
    pub const IRONLOG_SERVER: &str = "ironlog-server";
}

/// Network ports
pub mod ports {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 8081;
}

/// API endpoints
pub mod endpoints {
    /// Health check endpoint
    pub const HEALTH_CHECK: &str = "/health";
}

/// Validation limits
pub mod limits {
    /// Minimum username length (characters)
    pub const MIN_USERNAME_LENGTH: usize = 3;
    /// Minimum password length (characters)
    pub const MIN_PASSWORD_LENGTH: usize = 6;
    /// Maximum accepted trainer question length (characters)
    pub const MAX_TRAINER_QUESTION_LENGTH: usize = 2000;
    /// Upper bound for a logged body weight in kilograms
    pub const MAX_WEIGHT_KG: f64 = 1000.0;
    /// Default JWT lifetime
    pub const DEFAULT_JWT_EXPIRY_HOURS: i64 = 24;
    /// Default trainer requests per window
    pub const DEFAULT_TRAINER_RATE_LIMIT_REQUESTS: u32 = 5;
    /// Default trainer rate limit window
    pub const DEFAULT_TRAINER_RATE_LIMIT_WINDOW_SECS: u64 = 60;
    /// Default request timeout
    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
    /// Default maximum request body size (1 MiB)
    pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;
}

/// Trainer chat defaults
pub mod trainer {
    /// System prompt sent ahead of every question
    pub const SYSTEM_PROMPT: &str = "You are a professional fitness trainer.";
    /// Default model for the OpenAI-compatible API
    pub const DEFAULT_MODEL: &str = "gpt-4.1-nano";
    /// Default base URL for the OpenAI-compatible API
    pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
}

/// Favorites CSV export
pub mod export {
    /// Attachment filename
    pub const FAVORITES_CSV_FILENAME: &str = "favorite_workouts.csv";
    /// Column headers in output order
    pub const FAVORITES_CSV_HEADERS: [&str; 6] = [
        "Workout Name",
        "Workout Description",
        "Exercise Name",
        "Sets",
        "Reps",
        "Duration",
    ];
    /// Placeholder for absent numeric values
    pub const MISSING_VALUE: &str = "-";
}
