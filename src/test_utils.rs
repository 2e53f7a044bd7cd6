//! Test fixtures: value factories, an in-memory database, float assertions.

use chrono::{DateTime, Duration, Utc};
use sqlx::SqlitePool;

use crate::models::{
    ExerciseSet, ExerciseTemplate, Program, TrainingDay, WorkoutExercise, WorkoutSession,
};

/// In-memory SQLite with migrations applied.
///
/// One connection only: every extra pooled connection to `sqlite::memory:`
/// would open its own empty database.
pub async fn setup_test_db() -> SqlitePool {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

pub async fn teardown_test_db(pool: SqlitePool) {
    pool.close().await;
}

pub fn set(set_number: u32, weight: f64, reps: u32, completed: bool) -> ExerciseSet {
    ExerciseSet::new(set_number, weight, reps, completed)
}

/// A workout exercise whose name doubles as its template id.
pub fn exercise(template_id: &str, sets: Vec<ExerciseSet>) -> WorkoutExercise {
    WorkoutExercise {
        id: format!("we-{}", template_id),
        exercise_template_id: template_id.to_string(),
        name: template_id.to_string(),
        sets,
        notes: None,
        progress_direction: None,
        difficulty: None,
    }
}

pub fn template(id: &str, sets: u32, reps_min: u32, reps_max: u32) -> ExerciseTemplate {
    ExerciseTemplate {
        id: id.to_string(),
        name: id.to_string(),
        target_sets: sets,
        target_reps_min: reps_min,
        target_reps_max: reps_max,
        notes: None,
    }
}

pub fn day_with(exercises: Vec<ExerciseTemplate>) -> TrainingDay {
    TrainingDay {
        id: "push".to_string(),
        name: "Push".to_string(),
        exercises,
    }
}

pub fn program_with(days: Vec<TrainingDay>) -> Program {
    Program {
        id: "ppl".to_string(),
        name: "Push Pull Legs".to_string(),
        description: None,
        created_at: datetime_days_ago(30),
        training_days: days,
    }
}

/// A `ppl`/`push` session dated yesterday.
pub fn session_with(exercises: Vec<WorkoutExercise>, completed: bool) -> WorkoutSession {
    WorkoutSession {
        id: "last".to_string(),
        program_id: "ppl".to_string(),
        program_name: "Push Pull Legs".to_string(),
        training_day_id: "push".to_string(),
        training_day_name: "Push".to_string(),
        date: datetime_days_ago(1),
        duration: 60,
        exercises,
        body_weight: None,
        waist_circumference: None,
        completed,
    }
}

pub fn session_on(
    id: &str,
    program_id: &str,
    training_day_id: &str,
    days_ago: i64,
    completed: bool,
) -> WorkoutSession {
    WorkoutSession {
        id: id.to_string(),
        program_id: program_id.to_string(),
        program_name: program_id.to_uppercase(),
        training_day_id: training_day_id.to_string(),
        training_day_name: training_day_id.to_string(),
        date: datetime_days_ago(days_ago),
        duration: 45,
        exercises: Vec::new(),
        body_weight: None,
        waist_circumference: None,
        completed,
    }
}

pub fn datetime_days_ago(days: i64) -> DateTime<Utc> {
    Utc::now() - Duration::days(days)
}

/// Assert two floats are approximately equal within a tolerance
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $tolerance:expr) => {
        let diff = ($left - $right).abs();
        assert!(
            diff < $tolerance,
            "Values not approximately equal: {} vs {} (diff: {}, tolerance: {})",
            $left,
            $right,
            diff,
            $tolerance
        );
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_setup_db_creates_schema() {
        let pool = setup_test_db().await;

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type='table' AND name IN \
             ('programs', 'training_days', 'exercise_templates', 'workout_sessions', \
              'workout_exercises', 'exercise_sets', 'active_workout')",
        )
        .fetch_all(&pool)
        .await
        .expect("Failed to query tables");

        assert_eq!(tables.len(), 7, "got tables: {:?}", tables);

        teardown_test_db(pool).await;
    }
}
