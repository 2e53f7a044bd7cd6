use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{
    ExerciseSet, ExerciseTemplate, Program, TrainingDay, WorkoutExercise, WorkoutSession,
};

/// Build the working exercise list for a new session of `day`.
///
/// Carry-forward policy, per template in order:
/// - the previous exercise is the one in `last_session` with the same template id
/// - exactly `target_sets` sets are produced, numbered from 1
/// - weight and reps come from the previous set with the same number,
///   otherwise weight 0 and `target_reps_min`
/// - nothing starts completed
pub fn initialize(day: &TrainingDay, last_session: Option<&WorkoutSession>) -> Vec<WorkoutExercise> {
    day.exercises
        .iter()
        .map(|template| {
            let last_exercise =
                last_session.and_then(|s| s.exercise_for_template(&template.id));
            workout_exercise(template, last_exercise)
        })
        .collect()
}

fn workout_exercise(
    template: &ExerciseTemplate,
    last_exercise: Option<&WorkoutExercise>,
) -> WorkoutExercise {
    let sets = (1..=template.target_sets)
        .map(|set_number| {
            let last_set = last_exercise
                .and_then(|e| e.sets.iter().find(|s| s.set_number == set_number));
            match last_set {
                Some(prev) => ExerciseSet::new(set_number, prev.weight, prev.reps, false),
                None => ExerciseSet::new(set_number, 0.0, template.target_reps_min, false),
            }
        })
        .collect();

    WorkoutExercise {
        id: Uuid::new_v4().to_string(),
        exercise_template_id: template.id.clone(),
        name: template.name.clone(),
        sets,
        notes: template.notes.clone(),
        progress_direction: None,
        difficulty: None,
    }
}

/// A fresh in-progress session of `day` dated `date`: zero duration, no body
/// metrics, exercises from [`initialize`].
pub fn new_session(
    program: &Program,
    day: &TrainingDay,
    date: DateTime<Utc>,
    last_session: Option<&WorkoutSession>,
) -> WorkoutSession {
    WorkoutSession {
        id: Uuid::new_v4().to_string(),
        program_id: program.id.clone(),
        program_name: program.name.clone(),
        training_day_id: day.id.clone(),
        training_day_name: day.name.clone(),
        date,
        duration: 0,
        exercises: initialize(day, last_session),
        body_weight: None,
        waist_circumference: None,
        completed: false,
    }
}

/// An in-progress session shell for logging a workout after the fact.
pub fn create_manual_session(
    program: &Program,
    day: &TrainingDay,
    date: DateTime<Utc>,
    last_session: Option<&WorkoutSession>,
) -> WorkoutSession {
    new_session(program, day, date, last_session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{day_with, exercise, program_with, session_with, set, template};

    fn tuples(e: &WorkoutExercise) -> Vec<(u32, f64, u32, bool)> {
        e.sets
            .iter()
            .map(|s| (s.set_number, s.weight, s.reps, s.completed))
            .collect()
    }

    #[test]
    fn test_fresh_day_uses_template_defaults() {
        let day = day_with(vec![template("bench", 3, 6, 8)]);

        let exercises = initialize(&day, None);

        assert_eq!(exercises.len(), 1);
        assert_eq!(
            tuples(&exercises[0]),
            vec![(1, 0.0, 6, false), (2, 0.0, 6, false), (3, 0.0, 6, false)]
        );
        assert_eq!(exercises[0].exercise_template_id, "bench");
        assert_eq!(exercises[0].progress_direction, None);
        assert_eq!(exercises[0].difficulty, None);
    }

    #[test]
    fn test_carries_forward_matching_sets_and_defaults_the_rest() {
        let day = day_with(vec![template("bench", 3, 6, 8)]);
        let last = session_with(
            vec![exercise("bench", vec![set(1, 60.0, 8, true), set(2, 60.0, 8, true)])],
            true,
        );

        let exercises = initialize(&day, Some(&last));

        assert_eq!(
            tuples(&exercises[0]),
            vec![(1, 60.0, 8, false), (2, 60.0, 8, false), (3, 0.0, 6, false)]
        );
    }

    #[test]
    fn test_fewer_target_sets_drop_extra_history() {
        let day = day_with(vec![template("row", 2, 10, 12)]);
        let last = session_with(
            vec![exercise(
                "row",
                vec![set(1, 50.0, 12, true), set(2, 50.0, 11, true), set(3, 50.0, 9, false)],
            )],
            true,
        );

        let exercises = initialize(&day, Some(&last));

        assert_eq!(
            tuples(&exercises[0]),
            vec![(1, 50.0, 12, false), (2, 50.0, 11, false)]
        );
    }

    #[test]
    fn test_sets_matched_by_number_not_position() {
        let day = day_with(vec![template("squat", 2, 5, 5)]);
        let last = session_with(
            vec![exercise("squat", vec![set(2, 110.0, 4, true), set(1, 100.0, 5, true)])],
            true,
        );

        let exercises = initialize(&day, Some(&last));

        assert_eq!(
            tuples(&exercises[0]),
            vec![(1, 100.0, 5, false), (2, 110.0, 4, false)]
        );
    }

    #[test]
    fn test_template_added_since_last_session_uses_defaults() {
        let day = day_with(vec![template("bench", 2, 6, 8), template("dips", 2, 10, 15)]);
        let last = session_with(vec![exercise("bench", vec![set(1, 70.0, 6, true)])], true);

        let exercises = initialize(&day, Some(&last));

        assert_eq!(exercises[0].sets[0].weight, 70.0);
        assert_eq!(tuples(&exercises[1]), vec![(1, 0.0, 10, false), (2, 0.0, 10, false)]);
    }

    #[test]
    fn test_matching_ignores_renamed_exercises() {
        let mut day = day_with(vec![template("bench", 1, 6, 8)]);
        day.exercises[0].name = "Barbell Bench".to_string();
        let mut previous = exercise("bench", vec![set(1, 80.0, 7, true)]);
        previous.name = "Bench".to_string();
        let last = session_with(vec![previous], true);

        let exercises = initialize(&day, Some(&last));

        assert_eq!(exercises[0].name, "Barbell Bench");
        assert_eq!(tuples(&exercises[0]), vec![(1, 80.0, 7, false)]);
    }

    #[test]
    fn test_order_notes_and_fresh_ids() {
        let mut bench = template("bench", 1, 6, 8);
        bench.notes = Some("pause first rep".to_string());
        let day = day_with(vec![template("squat", 1, 5, 5), bench]);

        let a = initialize(&day, None);
        let b = initialize(&day, None);

        assert_eq!(a[0].exercise_template_id, "squat");
        assert_eq!(a[1].exercise_template_id, "bench");
        assert_eq!(a[1].notes.as_deref(), Some("pause first rep"));
        assert_ne!(a[0].id, a[1].id);
        assert_ne!(a[0].id, b[0].id);
    }

    #[test]
    fn test_manual_session_shell() {
        let day = day_with(vec![template("bench", 3, 6, 8)]);
        let program = program_with(vec![day.clone()]);
        let date = crate::test_utils::datetime_days_ago(3);

        let session = create_manual_session(&program, &day, date, None);

        assert!(!session.completed);
        assert_eq!(session.duration, 0);
        assert_eq!(session.date, date);
        assert_eq!(session.body_weight, None);
        assert_eq!(session.waist_circumference, None);
        assert_eq!(session.program_id, program.id);
        assert_eq!(session.training_day_name, day.name);
        assert_eq!(session.exercises.len(), 1);
        assert_eq!(session.exercises[0].sets.len(), 3);
    }
}
