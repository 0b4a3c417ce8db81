// ABOUTME: Progress summary over a date window: completed workouts and weight trend
// ABOUTME: Resolves the window from the caller's query and computes the weight delta
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog Contributors

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, Utc};
use ironlog_core::models::{WeightEntry, WorkoutHistoryRecord};
use serde::{Deserialize, Serialize};

use crate::config::ProgressWindow;
use crate::database::{format_timestamp, HistoryManager, WeightManager};
use crate::errors::{AppError, AppResult};

/// Inclusive time range a summary covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// Lower bound
    pub start: DateTime<Utc>,
    /// Upper bound
    pub end: DateTime<Utc>,
}

/// Progress summary response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    /// Number of completions in the window
    pub completed_workouts: usize,
    /// Completions, newest first
    pub list_of_completed_workouts: Vec<WorkoutHistoryRecord>,
    /// Weight entries, oldest first
    pub weight: Vec<WeightEntry>,
    /// Last minus first weight; `None` with fewer than two entries
    pub weight_change: Option<f64>,
    /// Resolved lower bound (RFC 3339)
    pub start_date: String,
    /// Resolved upper bound (RFC 3339)
    pub end_date: String,
}

/// Resolve the summary window
///
/// The preset supplies both bounds; `start_date` and `end_date` override either one.
/// Dates are `YYYY-MM-DD` or RFC 3339. A date-only `end_date` covers the whole day.
///
/// # Errors
///
/// Returns `InvalidInput` for an unparseable date or a start after the end
pub fn resolve_window(
    window: ProgressWindow,
    start_date: Option<&str>,
    end_date: Option<&str>,
    now: DateTime<Utc>,
) -> AppResult<DateRange> {
    let preset_start = match window {
        ProgressWindow::All => DateTime::<Utc>::UNIX_EPOCH,
        ProgressWindow::Week => start_of_week(now),
    };

    let start = match non_blank(start_date) {
        Some(value) => parse_bound(value, "startDate", false)?,
        None => preset_start,
    };
    let end = match non_blank(end_date) {
        Some(value) => parse_bound(value, "endDate", true)?,
        None => now,
    };

    if start > end {
        return Err(AppError::invalid_input(
            "startDate must not be after endDate",
        ));
    }
    Ok(DateRange { start, end })
}

/// Weight change across a chronologically ordered series
#[must_use]
pub fn weight_change(entries: &[WeightEntry]) -> Option<f64> {
    match entries {
        [first, .., last] => Some(last.weight_kg - first.weight_kg),
        _ => None,
    }
}

/// Build the summary for `user_id` over `range`
///
/// # Errors
///
/// Returns a database error if either log cannot be read
pub async fn summarize(
    history: &HistoryManager,
    weight: &WeightManager,
    user_id: i64,
    range: DateRange,
) -> AppResult<ProgressSummary> {
    let start = format_timestamp(&range.start);
    let end = format_timestamp(&range.end);

    let completed = history.list_in_window(user_id, &start, &end).await?;
    let weights = weight.in_window(user_id, &start, &end).await?;

    Ok(ProgressSummary {
        completed_workouts: completed.len(),
        list_of_completed_workouts: completed,
        weight_change: weight_change(&weights),
        weight: weights,
        start_date: start,
        end_date: end,
    })
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn start_of_week(now: DateTime<Utc>) -> DateTime<Utc> {
    let today = now.date_naive();
    let monday = today
        .checked_sub_days(Days::new(u64::from(today.weekday().num_days_from_monday())))
        .unwrap_or(today);
    monday.and_time(NaiveTime::MIN).and_utc()
}

fn parse_bound(value: &str, field: &str, end_of_day: bool) -> AppResult<DateTime<Utc>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        AppError::invalid_input(format!(
            "Invalid {field}: expected YYYY-MM-DD or an RFC 3339 timestamp"
        ))
    })?;

    let time = if end_of_day {
        NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN)
    } else {
        NaiveTime::MIN
    };
    Ok(date.and_time(time).and_utc())
}
