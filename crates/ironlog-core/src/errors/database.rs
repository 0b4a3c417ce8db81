// ABOUTME: Conversions from sqlx errors into AppError
// ABOUTME: Classifies constraint violations so repositories can map them to client errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog Contributors

use super::{AppError, ErrorCode};

/// Constraint class of a failed statement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintViolation {
    /// UNIQUE constraint failed
    Unique,
    /// FOREIGN KEY constraint failed
    ForeignKey,
}

/// Inspect a `sqlx::Error` for a constraint violation
#[must_use]
pub fn constraint_violation(error: &sqlx::Error) -> Option<ConstraintViolation> {
    let db_error = error.as_database_error()?;
    if db_error.is_unique_violation() {
        Some(ConstraintViolation::Unique)
    } else if db_error.is_foreign_key_violation() {
        Some(ConstraintViolation::ForeignKey)
    } else {
        None
    }
}

impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::RowNotFound => Self::new(ErrorCode::ResourceNotFound, "Record not found"),
            other => Self::database(format!("Database operation failed: {other}")).with_source(other),
        }
    }
}
