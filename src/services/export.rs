// ABOUTME: CSV export of a user's favorite workouts
// ABOUTME: One row group per workout, entries in stored order, separated by empty rows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog Contributors

use ironlog_core::models::{FavoritedWorkout, WorkoutExerciseEntry};
use tracing::debug;

use crate::constants::export::{FAVORITES_CSV_HEADERS, MISSING_VALUE};
use crate::database::{FavoriteManager, WorkoutManager};
use crate::errors::AppResult;

/// A favorited workout together with its entries
#[derive(Debug, Clone)]
pub struct FavoriteBlock {
    /// The favorited workout
    pub workout: FavoritedWorkout,
    /// Its entries in stored order
    pub entries: Vec<WorkoutExerciseEntry>,
}

/// Load the caller's favorites and render them as CSV
///
/// # Errors
///
/// Returns a database error if favorites or entries cannot be read
pub async fn export_favorites(
    favorites: &FavoriteManager,
    workouts: &WorkoutManager,
    user_id: i64,
) -> AppResult<String> {
    let favorited = favorites.list(user_id).await?;

    let mut blocks = Vec::with_capacity(favorited.len());
    for workout in favorited {
        let entries = workouts.entries(workout.id).await?;
        blocks.push(FavoriteBlock { workout, entries });
    }

    debug!(user_id, workouts = blocks.len(), "Exporting favorite workouts");
    Ok(render_favorites_csv(&blocks))
}

/// Render favorite blocks as CSV text
///
/// The workout name and description appear on a block's first row only. Each
/// block is followed by a row of empty fields.
#[must_use]
pub fn render_favorites_csv(blocks: &[FavoriteBlock]) -> String {
    let mut csv = String::new();
    push_row(&mut csv, &FAVORITES_CSV_HEADERS);

    let separator = [""; FAVORITES_CSV_HEADERS.len()];
    for block in blocks {
        for (index, entry) in block.entries.iter().enumerate() {
            let (name, description) = if index == 0 {
                (
                    block.workout.name.as_str(),
                    block.workout.description.as_deref().unwrap_or_default(),
                )
            } else {
                ("", "")
            };

            let sets = number_or_missing(entry.sets);
            let reps = number_or_missing(entry.reps);
            let duration = number_or_missing(entry.duration_minutes);
            push_row(
                &mut csv,
                &[
                    name,
                    description,
                    entry.exercise_name.as_deref().unwrap_or_default(),
                    sets.as_str(),
                    reps.as_str(),
                    duration.as_str(),
                ],
            );
        }
        push_row(&mut csv, &separator);
    }

    csv
}

/// Quote a field when it contains a separator, quote, or line break
#[must_use]
pub fn escape_csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_owned()
    }
}

fn number_or_missing(value: Option<i64>) -> String {
    value.map_or_else(|| MISSING_VALUE.to_owned(), |v| v.to_string())
}

fn push_row(csv: &mut String, fields: &[&str]) {
    for (index, field) in fields.iter().enumerate() {
        if index > 0 {
            csv.push(',');
        }
        csv.push_str(&escape_csv_field(field));
    }
    csv.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workout(id: i64, name: &str, description: Option<&str>) -> FavoritedWorkout {
        FavoritedWorkout {
            id,
            created_by: 1,
            name: name.to_owned(),
            description: description.map(str::to_owned),
            is_private: true,
            favorited_at: "2025-01-01T00:00:00.000Z".to_owned(),
        }
    }

    fn entry(name: &str, sets: Option<i64>, reps: Option<i64>, duration: Option<i64>) -> WorkoutExerciseEntry {
        WorkoutExerciseEntry {
            exercise_id: 1,
            exercise_name: Some(name.to_owned()),
            sets,
            reps,
            duration_minutes: duration,
            notes: None,
        }
    }

    #[test]
    fn test_escape_csv_field() {
        assert_eq!(escape_csv_field("plain"), "plain");
        assert_eq!(escape_csv_field("a,b"), "\"a,b\"");
        assert_eq!(escape_csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_csv_field("line1\nline2"), "\"line1\nline2\"");
    }

    #[test]
    fn test_empty_export_is_header_only() {
        assert_eq!(
            render_favorites_csv(&[]),
            "Workout Name,Workout Description,Exercise Name,Sets,Reps,Duration\n"
        );
    }

    #[test]
    fn test_row_groups_and_placeholders() {
        let blocks = vec![
            FavoriteBlock {
                workout: workout(1, "Leg Day", Some("Heavy, slow")),
                entries: vec![
                    entry("Squat", Some(5), Some(5), None),
                    entry("Lunge", Some(3), Some(12), None),
                ],
            },
            FavoriteBlock {
                workout: workout(2, "Cardio", None),
                entries: vec![entry("Run", None, None, Some(30))],
            },
        ];

        let csv = render_favorites_csv(&blocks);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Workout Name,Workout Description,Exercise Name,Sets,Reps,Duration",
                "Leg Day,\"Heavy, slow\",Squat,5,5,-",
                ",,Lunge,3,12,-",
                ",,,,,",
                "Cardio,,Run,-,-,30",
                ",,,,,",
            ]
        );
    }

    #[test]
    fn test_workout_without_entries_emits_separator_only() {
        let blocks = vec![FavoriteBlock {
            workout: workout(1, "Empty", None),
            entries: Vec::new(),
        }];
        let csv = render_favorites_csv(&blocks);
        assert_eq!(csv.lines().nth(1), Some(",,,,,"));
        assert_eq!(csv.lines().count(), 2);
    }
}
