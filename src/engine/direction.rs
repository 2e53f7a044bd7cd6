use super::volume::Volume;
use crate::models::{ProgressDirection, WorkoutExercise};

/// Classify `current` against `previous` by volume.
///
/// No previous exercise means no baseline, which reads as `Same`.
pub fn resolve(current: &WorkoutExercise, previous: Option<&WorkoutExercise>) -> ProgressDirection {
    let Some(previous) = previous else {
        return ProgressDirection::Same;
    };

    let current_volume = current.volume();
    let previous_volume = previous.volume();
    if current_volume > previous_volume {
        ProgressDirection::Up
    } else if current_volume < previous_volume {
        ProgressDirection::Down
    } else {
        ProgressDirection::Same
    }
}

/// Stamp `progress_direction` on every current exercise.
///
/// Each exercise is paired with the first previous exercise sharing its
/// `exercise_template_id`; names are never compared. Without a previous list
/// at all the exercises come back untouched, directions left unset.
pub fn resolve_all(
    current: Vec<WorkoutExercise>,
    previous: Option<&[WorkoutExercise]>,
) -> Vec<WorkoutExercise> {
    let Some(previous) = previous else {
        return current;
    };

    current
        .into_iter()
        .map(|mut exercise| {
            let matching = previous
                .iter()
                .find(|p| p.exercise_template_id == exercise.exercise_template_id);
            exercise.progress_direction = Some(resolve(&exercise, matching));
            exercise
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{exercise, set};

    #[test]
    fn test_no_previous_is_same() {
        let current = exercise("bench", vec![set(1, 60.0, 8, true)]);
        assert_eq!(resolve(&current, None), ProgressDirection::Same);

        let empty = exercise("bench", vec![]);
        assert_eq!(resolve(&empty, None), ProgressDirection::Same);
    }

    #[test]
    fn test_higher_volume_is_up() {
        let current = exercise("bench", vec![set(1, 60.0, 8, true), set(2, 60.0, 8, true)]);
        let previous = exercise("bench", vec![set(1, 55.0, 8, true), set(2, 55.0, 8, true)]);
        assert_eq!(resolve(&current, Some(&previous)), ProgressDirection::Up);
    }

    #[test]
    fn test_lower_volume_is_down() {
        let current = exercise("bench", vec![set(1, 55.0, 8, true)]);
        let previous = exercise("bench", vec![set(1, 60.0, 8, true)]);
        assert_eq!(resolve(&current, Some(&previous)), ProgressDirection::Down);
    }

    #[test]
    fn test_equal_volume_is_same() {
        // Different shape, identical volume: 100x4 vs 80x5.
        let current = exercise("bench", vec![set(1, 100.0, 4, true)]);
        let previous = exercise("bench", vec![set(1, 80.0, 5, true)]);
        assert_eq!(resolve(&current, Some(&previous)), ProgressDirection::Same);
    }

    #[test]
    fn test_resolve_all_without_baseline_leaves_directions_unset() {
        let current = vec![
            exercise("bench", vec![set(1, 60.0, 8, true)]),
            exercise("row", vec![set(1, 50.0, 10, true)]),
        ];
        let resolved = resolve_all(current.clone(), None);
        assert_eq!(resolved, current);
        assert!(resolved.iter().all(|e| e.progress_direction.is_none()));
    }

    #[test]
    fn test_resolve_all_matches_by_template_id_not_name() {
        let mut current = exercise("bench", vec![set(1, 60.0, 8, true)]);
        current.name = "Flat Bench (renamed)".to_string();
        let mut decoy = exercise("other", vec![set(1, 200.0, 8, true)]);
        decoy.name = "Flat Bench (renamed)".to_string();
        let previous = vec![decoy, exercise("bench", vec![set(1, 50.0, 8, true)])];

        let resolved = resolve_all(vec![current], Some(&previous));
        assert_eq!(resolved[0].progress_direction, Some(ProgressDirection::Up));
    }

    #[test]
    fn test_resolve_all_stamps_same_for_unmatched() {
        let current = vec![
            exercise("bench", vec![set(1, 60.0, 8, true)]),
            exercise("new-lift", vec![set(1, 20.0, 10, true)]),
        ];
        let previous = vec![exercise("bench", vec![set(1, 70.0, 8, true)])];

        let resolved = resolve_all(current, Some(&previous));
        assert_eq!(resolved[0].progress_direction, Some(ProgressDirection::Down));
        assert_eq!(resolved[1].progress_direction, Some(ProgressDirection::Same));
    }

    #[test]
    fn test_resolve_all_with_empty_previous_list_stamps_same() {
        let current = vec![exercise("bench", vec![set(1, 60.0, 8, true)])];
        let resolved = resolve_all(current, Some(&[]));
        assert_eq!(resolved[0].progress_direction, Some(ProgressDirection::Same));
    }

    #[test]
    fn test_resolve_all_preserves_order_and_other_fields() {
        let mut first = exercise("squat", vec![set(1, 100.0, 5, true)]);
        first.notes = Some("belt".to_string());
        let second = exercise("bench", vec![set(1, 60.0, 8, false)]);
        let previous = vec![
            exercise("bench", vec![set(1, 60.0, 8, true)]),
            exercise("squat", vec![set(1, 90.0, 5, true)]),
        ];

        let resolved = resolve_all(vec![first, second], Some(&previous));
        assert_eq!(resolved[0].exercise_template_id, "squat");
        assert_eq!(resolved[0].notes.as_deref(), Some("belt"));
        assert_eq!(resolved[0].progress_direction, Some(ProgressDirection::Up));
        assert_eq!(resolved[1].progress_direction, Some(ProgressDirection::Same));
    }
}
