use std::collections::HashMap;

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};

use super::{ProgramStore, SessionStore};
use crate::engine::history::sort_by_date_descending;
use crate::models::{
    ExerciseSet, ExerciseTemplate, Program, TrainingDay, WorkoutExercise, WorkoutSession,
};
use crate::workflow::ActiveWorkout;

/// SQLite-backed store. Schema lives in `migrations/`.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

fn parse_ts(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("bad timestamp in database: `{}`", raw))
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Sessions with their exercises and sets, optionally narrowed to one id.
    async fn load_sessions(&self, only: Option<&str>) -> Result<Vec<WorkoutSession>> {
        let session_rows = sqlx::query(
            r#"
            SELECT id, program_id, program_name, training_day_id, training_day_name,
                   date, duration, body_weight, waist_circumference, completed
            FROM   workout_sessions
            WHERE  ?1 IS NULL OR id = ?1
            "#,
        )
        .bind(only)
        .fetch_all(&self.pool)
        .await?;

        let exercise_rows = sqlx::query(
            r#"
            SELECT we.id, we.session_id, we.exercise_template_id, we.name, we.notes,
                   we.progress_direction, we.difficulty
            FROM   workout_exercises we
            WHERE  ?1 IS NULL OR we.session_id = ?1
            ORDER  BY we.session_id, we.order_index
            "#,
        )
        .bind(only)
        .fetch_all(&self.pool)
        .await?;

        let set_rows = sqlx::query(
            r#"
            SELECT es.workout_exercise_id, es.set_number, es.weight, es.reps, es.completed
            FROM   exercise_sets es
            JOIN   workout_exercises we ON we.id = es.workout_exercise_id
            WHERE  ?1 IS NULL OR we.session_id = ?1
            ORDER  BY es.workout_exercise_id, es.set_number
            "#,
        )
        .bind(only)
        .fetch_all(&self.pool)
        .await?;

        let mut sets_by_exercise: HashMap<String, Vec<ExerciseSet>> = HashMap::new();
        for r in set_rows {
            sets_by_exercise
                .entry(r.get("workout_exercise_id"))
                .or_default()
                .push(ExerciseSet {
                    set_number: r.get::<i64, _>("set_number") as u32,
                    weight: r.get("weight"),
                    reps: r.get::<i64, _>("reps") as u32,
                    completed: r.get("completed"),
                });
        }

        let mut exercises_by_session: HashMap<String, Vec<WorkoutExercise>> = HashMap::new();
        for r in exercise_rows {
            let id: String = r.get("id");
            let direction: Option<String> = r.get("progress_direction");
            let difficulty: Option<String> = r.get("difficulty");
            exercises_by_session
                .entry(r.get("session_id"))
                .or_default()
                .push(WorkoutExercise {
                    sets: sets_by_exercise.remove(&id).unwrap_or_default(),
                    id,
                    exercise_template_id: r.get("exercise_template_id"),
                    name: r.get("name"),
                    notes: r.get("notes"),
                    progress_direction: direction.and_then(|d| d.parse().ok()),
                    difficulty: difficulty.and_then(|d| d.parse().ok()),
                });
        }

        let mut sessions = Vec::with_capacity(session_rows.len());
        for r in session_rows {
            let id: String = r.get("id");
            let date: String = r.get("date");
            sessions.push(WorkoutSession {
                exercises: exercises_by_session.remove(&id).unwrap_or_default(),
                id,
                program_id: r.get("program_id"),
                program_name: r.get("program_name"),
                training_day_id: r.get("training_day_id"),
                training_day_name: r.get("training_day_name"),
                date: parse_ts(&date)?,
                duration: r.get::<i64, _>("duration") as u32,
                body_weight: r.get("body_weight"),
                waist_circumference: r.get("waist_circumference"),
                completed: r.get("completed"),
            });
        }

        Ok(sessions)
    }

    /// The workout currently being tracked, if any.
    pub async fn active_workout(&self) -> Result<Option<ActiveWorkout>> {
        let row = sqlx::query("SELECT session_id, started_at, manual FROM active_workout")
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let session_id: String = row.get("session_id");
        let started_at: String = row.get("started_at");
        let session = self
            .load_sessions(Some(&session_id))
            .await?
            .pop()
            .ok_or_else(|| anyhow!("active session {} is missing", session_id))?;

        Ok(Some(ActiveWorkout {
            session,
            started_at: parse_ts(&started_at)?,
            manual: row.get("manual"),
        }))
    }

    /// Persist `active` and mark it as the tracked workout.
    pub async fn save_active(&self, active: &ActiveWorkout) -> Result<()> {
        SessionStore::save(self, &active.session).await?;

        sqlx::query(
            r#"
            INSERT INTO active_workout (singleton, session_id, started_at, manual)
            VALUES (1, ?1, ?2, ?3)
            ON CONFLICT(singleton) DO UPDATE SET
                session_id = excluded.session_id,
                started_at = excluded.started_at,
                manual     = excluded.manual
            "#,
        )
        .bind(&active.session.id)
        .bind(active.started_at.to_rfc3339())
        .bind(active.manual)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn clear_active(&self) -> Result<()> {
        sqlx::query("DELETE FROM active_workout")
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

impl SessionStore for SqliteStore {
    async fn fetch_all_sessions(&self, descending: bool) -> Result<Vec<WorkoutSession>> {
        let mut sessions = self.load_sessions(None).await?;
        sort_by_date_descending(&mut sessions);
        if !descending {
            sessions.reverse();
        }
        Ok(sessions)
    }

    async fn save(&self, session: &WorkoutSession) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO workout_sessions
                (id, program_id, program_name, training_day_id, training_day_name,
                 date, duration, body_weight, waist_circumference, completed)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            ON CONFLICT(id) DO UPDATE SET
                program_id          = excluded.program_id,
                program_name        = excluded.program_name,
                training_day_id     = excluded.training_day_id,
                training_day_name   = excluded.training_day_name,
                date                = excluded.date,
                duration            = excluded.duration,
                body_weight         = excluded.body_weight,
                waist_circumference = excluded.waist_circumference,
                completed           = excluded.completed
            "#,
        )
        .bind(&session.id)
        .bind(&session.program_id)
        .bind(&session.program_name)
        .bind(&session.training_day_id)
        .bind(&session.training_day_name)
        .bind(session.date.to_rfc3339())
        .bind(session.duration as i64)
        .bind(session.body_weight)
        .bind(session.waist_circumference)
        .bind(session.completed)
        .execute(&mut *tx)
        .await?;

        // Children are rewritten wholesale.
        sqlx::query(
            "DELETE FROM exercise_sets WHERE workout_exercise_id IN \
             (SELECT id FROM workout_exercises WHERE session_id = ?)",
        )
        .bind(&session.id)
        .execute(&mut *tx)
        .await?;
        sqlx::query("DELETE FROM workout_exercises WHERE session_id = ?")
            .bind(&session.id)
            .execute(&mut *tx)
            .await?;

        for (order_idx, ex) in session.exercises.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO workout_exercises
                    (id, session_id, exercise_template_id, name, notes,
                     progress_direction, difficulty, order_index)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                "#,
            )
            .bind(&ex.id)
            .bind(&session.id)
            .bind(&ex.exercise_template_id)
            .bind(&ex.name)
            .bind(ex.notes.as_deref())
            .bind(ex.progress_direction.map(|d| d.to_string()))
            .bind(ex.difficulty.map(|d| d.to_string()))
            .bind(order_idx as i64)
            .execute(&mut *tx)
            .await?;

            for set in &ex.sets {
                sqlx::query(
                    r#"
                    INSERT INTO exercise_sets
                        (workout_exercise_id, set_number, weight, reps, completed)
                    VALUES (?1, ?2, ?3, ?4, ?5)
                    "#,
                )
                .bind(&ex.id)
                .bind(set.set_number as i64)
                .bind(set.weight)
                .bind(set.reps as i64)
                .bind(set.completed)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        tracing::debug!(session = %session.id, completed = session.completed, "session saved");
        Ok(())
    }

    async fn delete(&self, session_id: &str) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM active_workout WHERE session_id = ?")
            .bind(session_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query(
            "DELETE FROM exercise_sets WHERE workout_exercise_id IN \
             (SELECT id FROM workout_exercises WHERE session_id = ?)",
        )
        .bind(session_id)
        .execute(&mut *tx)
        .await?;
        sqlx::query("DELETE FROM workout_exercises WHERE session_id = ?")
            .bind(session_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM workout_sessions WHERE id = ?")
            .bind(session_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::debug!(session = %session_id, "session deleted");
        Ok(())
    }
}

impl ProgramStore for SqliteStore {
    async fn fetch_all(&self) -> Result<Vec<Program>> {
        let program_rows = sqlx::query(
            "SELECT id, name, description, created_at FROM programs ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        let day_rows = sqlx::query(
            "SELECT id, program_id, name FROM training_days ORDER BY program_id, order_index",
        )
        .fetch_all(&self.pool)
        .await?;

        let template_rows = sqlx::query(
            r#"
            SELECT id, training_day_id, name, target_sets, target_reps_min,
                   target_reps_max, notes
            FROM   exercise_templates
            ORDER  BY training_day_id, order_index
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut templates_by_day: HashMap<String, Vec<ExerciseTemplate>> = HashMap::new();
        for r in template_rows {
            templates_by_day
                .entry(r.get("training_day_id"))
                .or_default()
                .push(ExerciseTemplate {
                    id: r.get("id"),
                    name: r.get("name"),
                    target_sets: r.get::<i64, _>("target_sets") as u32,
                    target_reps_min: r.get::<i64, _>("target_reps_min") as u32,
                    target_reps_max: r.get::<i64, _>("target_reps_max") as u32,
                    notes: r.get("notes"),
                });
        }

        let mut days_by_program: HashMap<String, Vec<TrainingDay>> = HashMap::new();
        for r in day_rows {
            let id: String = r.get("id");
            days_by_program
                .entry(r.get("program_id"))
                .or_default()
                .push(TrainingDay {
                    exercises: templates_by_day.remove(&id).unwrap_or_default(),
                    id,
                    name: r.get("name"),
                });
        }

        let mut programs = Vec::with_capacity(program_rows.len());
        for r in program_rows {
            let id: String = r.get("id");
            let created_at: String = r.get("created_at");
            programs.push(Program {
                training_days: days_by_program.remove(&id).unwrap_or_default(),
                id,
                name: r.get("name"),
                description: r.get("description"),
                created_at: parse_ts(&created_at)?,
            });
        }

        Ok(programs)
    }

    async fn save(&self, program: &Program) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO programs (id, name, description, created_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(id) DO UPDATE SET
                name        = excluded.name,
                description = excluded.description
            "#,
        )
        .bind(&program.id)
        .bind(&program.name)
        .bind(program.description.as_deref())
        .bind(program.created_at.to_rfc3339())
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "DELETE FROM exercise_templates WHERE training_day_id IN \
             (SELECT id FROM training_days WHERE program_id = ?)",
        )
        .bind(&program.id)
        .execute(&mut *tx)
        .await?;
        sqlx::query("DELETE FROM training_days WHERE program_id = ?")
            .bind(&program.id)
            .execute(&mut *tx)
            .await?;

        for (day_idx, day) in program.training_days.iter().enumerate() {
            sqlx::query(
                "INSERT INTO training_days (id, program_id, name, order_index) VALUES (?1, ?2, ?3, ?4)",
            )
            .bind(&day.id)
            .bind(&program.id)
            .bind(&day.name)
            .bind(day_idx as i64)
            .execute(&mut *tx)
            .await?;

            for (ex_idx, t) in day.exercises.iter().enumerate() {
                sqlx::query(
                    r#"
                    INSERT INTO exercise_templates
                        (id, training_day_id, name, target_sets, target_reps_min,
                         target_reps_max, notes, order_index)
                    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                    "#,
                )
                .bind(&t.id)
                .bind(&day.id)
                .bind(&t.name)
                .bind(t.target_sets as i64)
                .bind(t.target_reps_min as i64)
                .bind(t.target_reps_max as i64)
                .bind(t.notes.as_deref())
                .bind(ex_idx as i64)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        tracing::debug!(program = %program.name, "program saved");
        Ok(())
    }

    async fn delete(&self, program_id: &str) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "DELETE FROM exercise_templates WHERE training_day_id IN \
             (SELECT id FROM training_days WHERE program_id = ?)",
        )
        .bind(program_id)
        .execute(&mut *tx)
        .await?;
        sqlx::query("DELETE FROM training_days WHERE program_id = ?")
            .bind(program_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM programs WHERE id = ?")
            .bind(program_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}
