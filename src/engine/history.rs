use chrono::{DateTime, Utc};

use crate::models::WorkoutSession;

/// Most recent completed session of a training day.
///
/// Expects `sessions` newest first, the order `SessionStore::fetch_all_sessions(true)`
/// returns; the first completed match is taken as the latest.
pub fn last_completed_for_training_day<'a>(
    sessions: &'a [WorkoutSession],
    training_day_id: &str,
) -> Option<&'a WorkoutSession> {
    sessions
        .iter()
        .find(|s| s.completed && s.training_day_id == training_day_id)
}

/// Most recent completed session of a training day dated strictly before `before`.
///
/// Same ordering contract as [`last_completed_for_training_day`]. Back-dated
/// sessions use this so they never carry forward from, or compare against,
/// a later workout.
pub fn last_completed_before<'a>(
    sessions: &'a [WorkoutSession],
    training_day_id: &str,
    before: DateTime<Utc>,
) -> Option<&'a WorkoutSession> {
    sessions
        .iter()
        .find(|s| s.completed && s.training_day_id == training_day_id && s.date < before)
}

/// Most recent completed session of any training day in a program.
pub fn last_completed_for_program<'a>(
    sessions: &'a [WorkoutSession],
    program_id: &str,
) -> Option<&'a WorkoutSession> {
    sessions
        .iter()
        .find(|s| s.completed && s.program_id == program_id)
}

/// Newest first. Stable, so same-instant sessions keep their relative order.
pub fn sort_by_date_descending(sessions: &mut [WorkoutSession]) {
    sessions.sort_by(|a, b| b.date.cmp(&a.date));
}
