//! The caller side of the engine: start a workout, edit it, finish it.
//!
//! Owns the I/O the engine stays out of. History comes from a `SessionStore`
//! snapshot; the finished session goes back through the same store.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info};

use crate::engine::stats::set_stats;
use crate::engine::{
    SessionSummary, create_manual_session, last_completed_before, new_session, resolve_all,
};
use crate::error::WorkflowError;
use crate::models::{
    Difficulty, ExerciseSet, Program, TrainingDay, WorkoutExercise, WorkoutSession,
};
use crate::store::SessionStore;

/// An in-progress session plus the bookkeeping needed to finish it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveWorkout {
    pub session: WorkoutSession,
    pub started_at: DateTime<Utc>,
    /// Logged after the fact; no clock runs.
    pub manual: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BodyMetrics {
    pub body_weight: Option<f64>,
    pub waist_circumference: Option<f64>,
}

/// Latest completed session of `training_day_id` dated before `before`.
pub async fn previous_session<S: SessionStore>(
    store: &S,
    training_day_id: &str,
    before: DateTime<Utc>,
) -> Result<Option<WorkoutSession>> {
    let sessions = store.fetch_all_sessions(true).await?;
    Ok(last_completed_before(&sessions, training_day_id, before).cloned())
}

/// Begin a live workout of `day`, pre-filled from its last completed session.
pub async fn start_workout<S: SessionStore>(
    store: &S,
    program: &Program,
    day: &TrainingDay,
    now: DateTime<Utc>,
) -> Result<ActiveWorkout> {
    let last = previous_session(store, &day.id, now).await?;
    let session = new_session(program, day, now, last.as_ref());

    info!(
        session = %session.id,
        program = %program.name,
        day = %day.name,
        carried_from = last.as_ref().map(|s| s.id.as_str()).unwrap_or("-"),
        "workout started"
    );

    Ok(ActiveWorkout {
        session,
        started_at: now,
        manual: false,
    })
}

/// Begin logging a past workout of `day` dated `date`.
pub async fn start_manual_workout<S: SessionStore>(
    store: &S,
    program: &Program,
    day: &TrainingDay,
    date: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<ActiveWorkout> {
    let last = previous_session(store, &day.id, date).await?;
    let session = create_manual_session(program, day, date, last.as_ref());

    info!(session = %session.id, day = %day.name, %date, "manual workout started");

    Ok(ActiveWorkout {
        session,
        started_at: now,
        manual: true,
    })
}

impl ActiveWorkout {
    /// 1-based lookup, matching what `session show` prints.
    pub fn exercise_mut(&mut self, exercise: usize) -> Result<&mut WorkoutExercise, WorkflowError> {
        exercise
            .checked_sub(1)
            .and_then(|i| self.session.exercises.get_mut(i))
            .ok_or(WorkflowError::NoSuchExercise(exercise))
    }

    fn set_mut(&mut self, exercise: usize, set: usize) -> Result<&mut ExerciseSet, WorkflowError> {
        self.exercise_mut(exercise)?
            .sets
            .iter_mut()
            .find(|s| s.set_number as usize == set)
            .ok_or(WorkflowError::NoSuchSet { exercise, set })
    }

    pub fn log_set(
        &mut self,
        exercise: usize,
        set: usize,
        weight: f64,
        reps: u32,
    ) -> Result<(), WorkflowError> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(WorkflowError::InvalidWeight(weight.to_string()));
        }
        let s = self.set_mut(exercise, set)?;
        s.weight = weight;
        s.reps = reps;
        Ok(())
    }

    pub fn set_completed(
        &mut self,
        exercise: usize,
        set: usize,
        completed: bool,
    ) -> Result<(), WorkflowError> {
        self.set_mut(exercise, set)?.completed = completed;
        Ok(())
    }

    /// Append a set after the last one, copying its weight and reps.
    /// Returns the new set number.
    pub fn add_set(&mut self, exercise: usize) -> Result<u32, WorkflowError> {
        let ex = self.exercise_mut(exercise)?;
        let set_number = ex.sets.len() as u32 + 1;
        let (weight, reps) = ex.sets.last().map(|s| (s.weight, s.reps)).unwrap_or((0.0, 0));
        ex.sets.push(ExerciseSet::new(set_number, weight, reps, false));
        Ok(set_number)
    }

    pub fn rate(&mut self, exercise: usize, difficulty: Difficulty) -> Result<(), WorkflowError> {
        self.exercise_mut(exercise)?.difficulty = Some(difficulty);
        Ok(())
    }

    pub fn note(&mut self, exercise: usize, note: String) -> Result<(), WorkflowError> {
        self.exercise_mut(exercise)?.notes = Some(note);
        Ok(())
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary::of(&self.session)
    }

    pub fn elapsed_minutes(&self, now: DateTime<Utc>) -> u32 {
        (now - self.started_at).num_minutes().max(0) as u32
    }
}

/// Finalize `active` and save it.
///
/// Progress directions are resolved against the latest completed session of
/// the same training day dated before this one. Live workouts are redated to
/// `now`. Duration is `duration` when given, otherwise 0 for manual workouts
/// and the elapsed minutes for live ones. A manual workout needs at least
/// one completed set.
pub async fn finish_workout<S: SessionStore>(
    store: &S,
    active: ActiveWorkout,
    metrics: BodyMetrics,
    duration: Option<u32>,
    now: DateTime<Utc>,
) -> Result<WorkoutSession> {
    if active.session.completed {
        return Err(WorkflowError::AlreadyFinalized(active.session.id).into());
    }

    if active.manual && set_stats(&active.session.exercises).completed == 0 {
        return Err(WorkflowError::NothingLogged.into());
    }

    let previous = previous_session(
        store,
        &active.session.training_day_id,
        active.session.date,
    )
    .await?;
    let elapsed = active.elapsed_minutes(now);

    let mut session = active.session;
    session.exercises = resolve_all(
        session.exercises,
        previous.as_ref().map(|p| p.exercises.as_slice()),
    );
    if !active.manual {
        session.date = now;
    }
    session.duration = match duration {
        Some(minutes) => minutes,
        None if active.manual => 0,
        None => elapsed,
    };
    session.body_weight = metrics.body_weight;
    session.waist_circumference = metrics.waist_circumference;
    session.completed = true;

    if let Err(e) = store.save(&session).await {
        error!(session = %session.id, error = %e, "failed to save workout session");
        return Err(e.context("Failed to save workout session"));
    }

    info!(
        session = %session.id,
        duration = session.duration,
        baseline = previous.as_ref().map(|p| p.id.as_str()).unwrap_or("-"),
        "workout finished"
    );
    Ok(session)
}
