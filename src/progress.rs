//! Completion tracking - per-exercise done flags and day progress

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::WorkoutDay;

/// Persisted set of exercise-complete flags, keyed `{dayId}-{exerciseName}`.
/// The day id namespaces the key so equally-named exercises on different
/// days track independently.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct CompletionMap(HashMap<String, bool>);

impl CompletionMap {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(day_id: i64, exercise_name: &str) -> String {
        format!("{day_id}-{exercise_name}")
    }

    pub fn is_done(&self, day_id: i64, exercise_name: &str) -> bool {
        self.0
            .get(&Self::key(day_id, exercise_name))
            .copied()
            .unwrap_or(false)
    }

    /// Flip the done flag for one exercise.
    pub fn toggle(&mut self, day_id: i64, exercise_name: &str) {
        let entry = self.0.entry(Self::key(day_id, exercise_name)).or_insert(false);
        *entry = !*entry;
    }

    /// Wipe every flag, across all days. Bound to the explicit
    /// "reset session" action once a day hits 100%.
    pub fn reset_all(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Percent of the day's exercises marked done, rounded. A day with no
/// exercises reads 0, not 100.
pub fn compute_progress(day: &WorkoutDay, completed: &CompletionMap) -> u8 {
    let total = day.exercise_count();
    if total == 0 {
        return 0;
    }
    let done = day
        .exercises()
        .filter(|ex| completed.is_done(day.id, &ex.name))
        .count();
    (done as f64 / total as f64 * 100.0).round() as u8
}
