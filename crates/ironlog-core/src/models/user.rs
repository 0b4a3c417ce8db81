// ABOUTME: User account and profile models
// ABOUTME: Includes the partial profile update payload and age derivation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog Contributors

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Registered user account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Primary key
    pub id: i64,
    /// Lowercased, trimmed email address
    pub email: String,
    /// Unique display name
    pub username: String,
    /// bcrypt hash, never serialized
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// When the account was created (ISO 8601)
    pub created_at: String,
}

/// Profile view of a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// User ID
    pub id: i64,
    /// Display name
    pub username: String,
    /// Email address
    pub email: String,
    /// Current weight, mirrored from the latest weight log entry
    pub weight_kg: Option<f64>,
    /// Height in centimetres
    pub height_cm: Option<f64>,
    /// Goal weight
    pub target_weight_kg: Option<f64>,
    /// Free-form fitness level (beginner, intermediate, ...)
    pub fitness_level: Option<String>,
    /// Target workouts per week
    pub weekly_goal: Option<i64>,
    /// Date of birth (YYYY-MM-DD)
    pub date_of_birth: Option<NaiveDate>,
    /// Age in whole years, derived from `date_of_birth`
    pub age: Option<u32>,
    /// When the account was created (ISO 8601)
    pub created_at: String,
}

/// Partial profile update
///
/// Absent and `null` fields both keep the stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    /// New display name
    pub username: Option<String>,
    /// New weight
    pub weight_kg: Option<f64>,
    /// New height
    pub height_cm: Option<f64>,
    /// New goal weight
    pub target_weight_kg: Option<f64>,
    /// New fitness level
    pub fitness_level: Option<String>,
    /// New weekly goal
    pub weekly_goal: Option<i64>,
    /// New date of birth
    pub date_of_birth: Option<NaiveDate>,
}

/// Whole years between `date_of_birth` and `today`
///
/// Returns `None` for a birth date in the future.
#[must_use]
pub fn calculate_age(date_of_birth: NaiveDate, today: NaiveDate) -> Option<u32> {
    let mut years = today.year() - date_of_birth.year();
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        years -= 1;
    }
    u32::try_from(years).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_age_before_and_after_birthday() {
        assert_eq!(calculate_age(date(1990, 6, 15), date(2025, 6, 14)), Some(34));
        assert_eq!(calculate_age(date(1990, 6, 15), date(2025, 6, 15)), Some(35));
    }

    #[test]
    fn test_age_future_birth_date() {
        assert_eq!(calculate_age(date(2030, 1, 1), date(2025, 1, 1)), None);
    }
}
