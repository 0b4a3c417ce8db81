// ABOUTME: Workout aggregate models and their write payloads
// ABOUTME: A workout owns an ordered list of exercise entries with no identity of their own
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ironlog Contributors

use serde::{Deserialize, Serialize};

/// Workout aggregate: the workout row plus its ordered entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    /// Primary key
    pub id: i64,
    /// Owning user
    pub created_by: i64,
    /// Workout name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Hidden from public listings when true
    pub is_private: bool,
    /// When the workout was created (ISO 8601)
    pub created_at: String,
    /// Entries in their stored order
    pub exercises: Vec<WorkoutExerciseEntry>,
}

/// One exercise entry inside a workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutExerciseEntry {
    /// Referenced exercise
    pub exercise_id: i64,
    /// Name of the referenced exercise
    pub exercise_name: Option<String>,
    /// Number of sets
    pub sets: Option<i64>,
    /// Repetitions per set
    pub reps: Option<i64>,
    /// Duration in minutes
    pub duration_minutes: Option<i64>,
    /// Free-text notes
    pub notes: Option<String>,
}

/// Entry payload for workout create/update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewWorkoutExercise {
    /// Referenced exercise (must exist)
    pub exercise_id: i64,
    /// Number of sets
    pub sets: Option<i64>,
    /// Repetitions per set
    pub reps: Option<i64>,
    /// Duration in minutes
    pub duration_minutes: Option<i64>,
    /// Free-text notes
    pub notes: Option<String>,
}

/// Payload for creating a workout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewWorkout {
    /// Workout name (required)
    pub name: Option<String>,
    /// Optional description
    pub description: Option<String>,
    /// Visibility, private unless stated otherwise
    pub is_private: Option<bool>,
    /// Entries in the order they should be stored
    #[serde(default)]
    pub exercises: Vec<NewWorkoutExercise>,
}

/// Partial workout update
///
/// Scalar `None` keeps the stored value. `exercises` replaces the whole entry list
/// only when it is present and non-empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkoutUpdate {
    /// New name
    pub name: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New visibility
    pub is_private: Option<bool>,
    /// Replacement entry list
    pub exercises: Option<Vec<NewWorkoutExercise>>,
}

impl WorkoutUpdate {
    /// Entries to install, if this update replaces the entry list
    #[must_use]
    pub fn replacement_entries(&self) -> Option<&[NewWorkoutExercise]> {
        self.exercises
            .as_deref()
            .filter(|entries| !entries.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_entry_list_is_not_a_replacement() {
        let update = WorkoutUpdate {
            exercises: Some(Vec::new()),
            ..WorkoutUpdate::default()
        };
        assert!(update.replacement_entries().is_none());
        assert!(WorkoutUpdate::default().replacement_entries().is_none());
    }

    #[test]
    fn test_non_empty_entry_list_replaces() {
        let update: WorkoutUpdate =
            serde_json::from_str(r#"{"exercises":[{"exercise_id":4,"sets":3}]}"#).unwrap();
        let entries = update.replacement_entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].exercise_id, 4);
        assert_eq!(entries[0].sets, Some(3));
        assert_eq!(entries[0].reps, None);
    }
}
