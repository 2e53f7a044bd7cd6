use serde::Serialize;

use super::volume::Volume;
use crate::models::{WorkoutExercise, WorkoutSession};

/// Completed vs. total set counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SetStats {
    pub completed: usize,
    pub total: usize,
}

pub fn set_stats(exercises: &[WorkoutExercise]) -> SetStats {
    let mut stats = SetStats {
        completed: 0,
        total: 0,
    };
    for set in exercises.iter().flat_map(|e| &e.sets) {
        stats.total += 1;
        if set.completed {
            stats.completed += 1;
        }
    }
    stats
}

/// Share of completed sets in `[0, 1]`, 0 when there are no sets.
pub fn progress_percentage(exercises: &[WorkoutExercise]) -> f64 {
    let stats = set_stats(exercises);
    if stats.total == 0 {
        return 0.0;
    }
    stats.completed as f64 / stats.total as f64
}

pub fn total_volume(session: &WorkoutSession) -> f64 {
    session.exercises.volume()
}

pub fn average_volume_per_exercise(session: &WorkoutSession) -> f64 {
    if session.exercises.is_empty() {
        return 0.0;
    }
    total_volume(session) / session.exercises.len() as f64
}

/// Reps across all sets, completed or not.
pub fn total_reps(exercises: &[WorkoutExercise]) -> u32 {
    exercises
        .iter()
        .flat_map(|e| &e.sets)
        .map(|s| s.reps)
        .sum()
}

pub fn average_reps_per_set(exercises: &[WorkoutExercise]) -> f64 {
    let total = set_stats(exercises).total;
    if total == 0 {
        return 0.0;
    }
    total_reps(exercises) as f64 / total as f64
}

/// Every aggregate for one session, computed in one go for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub completed_sets: usize,
    pub total_sets: usize,
    pub progress: f64,
    pub total_volume: f64,
    pub average_volume_per_exercise: f64,
    pub total_reps: u32,
    pub average_reps_per_set: f64,
}

impl SessionSummary {
    pub fn of(session: &WorkoutSession) -> Self {
        let stats = set_stats(&session.exercises);
        Self {
            completed_sets: stats.completed,
            total_sets: stats.total,
            progress: progress_percentage(&session.exercises),
            total_volume: total_volume(session),
            average_volume_per_exercise: average_volume_per_exercise(session),
            total_reps: total_reps(&session.exercises),
            average_reps_per_set: average_reps_per_set(&session.exercises),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_approx_eq;
    use crate::test_utils::{exercise, session_with, set};

    /// 10 sets, 4 of them completed.
    fn ten_sets_four_done() -> Vec<WorkoutExercise> {
        vec![
            exercise(
                "bench",
                vec![
                    set(1, 60.0, 8, true),
                    set(2, 60.0, 8, true),
                    set(3, 60.0, 6, false),
                ],
            ),
            exercise(
                "row",
                vec![
                    set(1, 50.0, 10, true),
                    set(2, 50.0, 10, false),
                    set(3, 50.0, 10, false),
                    set(4, 50.0, 10, false),
                ],
            ),
            exercise(
                "curl",
                vec![
                    set(1, 15.0, 12, true),
                    set(2, 15.0, 12, false),
                    set(3, 15.0, 12, false),
                ],
            ),
        ]
    }

    #[test]
    fn test_set_stats_counts_all_and_completed() {
        let stats = set_stats(&ten_sets_four_done());
        assert_eq!(stats, SetStats { completed: 4, total: 10 });
        assert_approx_eq!(progress_percentage(&ten_sets_four_done()), 0.4, 1e-9);
    }

    #[test]
    fn test_empty_input_yields_zero() {
        assert_eq!(set_stats(&[]), SetStats { completed: 0, total: 0 });
        assert_eq!(progress_percentage(&[]), 0.0);
        assert_eq!(total_reps(&[]), 0);
        assert_eq!(average_reps_per_set(&[]), 0.0);

        let empty = session_with(Vec::new(), true);
        assert_eq!(total_volume(&empty), 0.0);
        assert_eq!(average_volume_per_exercise(&empty), 0.0);
    }

    #[test]
    fn test_exercises_without_sets_have_zero_progress() {
        let exercises = vec![exercise("bench", vec![]), exercise("row", vec![])];
        assert_eq!(progress_percentage(&exercises), 0.0);
        assert_eq!(average_reps_per_set(&exercises), 0.0);
    }

    #[test]
    fn test_progress_stays_in_unit_interval() {
        let all_done = vec![exercise("bench", vec![set(1, 60.0, 8, true), set(2, 60.0, 8, true)])];
        assert_eq!(progress_percentage(&all_done), 1.0);

        let none_done = vec![exercise("bench", vec![set(1, 60.0, 8, false)])];
        assert_eq!(progress_percentage(&none_done), 0.0);
    }

    #[test]
    fn test_reps_totals_ignore_completion() {
        let exercises = ten_sets_four_done();
        // 8 + 8 + 6 + 4 * 10 + 3 * 12
        assert_eq!(total_reps(&exercises), 98);
        assert_approx_eq!(average_reps_per_set(&exercises), 9.8, 1e-9);
    }

    #[test]
    fn test_session_volume_average() {
        let session = session_with(
            vec![
                exercise("bench", vec![set(1, 60.0, 8, true), set(2, 60.0, 8, true)]),
                exercise("row", vec![set(1, 50.0, 8, true)]),
            ],
            true,
        );
        assert_eq!(total_volume(&session), 1360.0);
        assert_eq!(average_volume_per_exercise(&session), 680.0);
    }

    #[test]
    fn test_summary_matches_individual_functions() {
        let session = session_with(ten_sets_four_done(), false);
        let summary = SessionSummary::of(&session);

        assert_eq!(summary.completed_sets, 4);
        assert_eq!(summary.total_sets, 10);
        assert_eq!(summary.total_volume, total_volume(&session));
        assert_eq!(summary.total_reps, 98);
        assert_eq!(summary, SessionSummary::of(&session));
    }
}
