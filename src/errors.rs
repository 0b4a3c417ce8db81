// ABOUTME: Unified error types re-exported from ironlog-core
// ABOUTME: AppError, ErrorCode and the JSON error body used by every route
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog Contributors

pub use ironlog_core::errors::*;
