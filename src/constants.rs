// ABOUTME: Application constants re-exported from ironlog-core
// ABOUTME: Limits, defaults, user-facing messages and export settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog Contributors

pub use ironlog_core::constants::*;
