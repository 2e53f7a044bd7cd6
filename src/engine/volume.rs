use crate::models::{ExerciseSet, WorkoutExercise, WorkoutSession};

/// Training volume: weight × reps, summed.
///
/// Every set counts regardless of its `completed` flag. Volume reflects what
/// was logged, completion is only a tracking marker.
pub trait Volume {
    fn volume(&self) -> f64;
}

impl Volume for ExerciseSet {
    fn volume(&self) -> f64 {
        self.weight * self.reps as f64
    }
}

impl Volume for [ExerciseSet] {
    fn volume(&self) -> f64 {
        self.iter().map(Volume::volume).sum()
    }
}

impl Volume for WorkoutExercise {
    fn volume(&self) -> f64 {
        self.sets.volume()
    }
}

impl Volume for [WorkoutExercise] {
    fn volume(&self) -> f64 {
        self.iter().map(Volume::volume).sum()
    }
}

impl Volume for WorkoutSession {
    fn volume(&self) -> f64 {
        self.exercises.volume()
    }
}

pub fn volume(sets: &[ExerciseSet]) -> f64 {
    sets.volume()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{exercise, set};

    #[test]
    fn test_empty_sets_have_zero_volume() {
        assert_eq!(volume(&[]), 0.0);
        assert_eq!(exercise("bench", vec![]).volume(), 0.0);
        let none: [WorkoutExercise; 0] = [];
        assert_eq!(none.volume(), 0.0);
    }

    #[test]
    fn test_volume_sums_weight_times_reps() {
        let sets = [set(1, 60.0, 8, true), set(2, 60.0, 8, true)];
        assert_eq!(volume(&sets), 960.0);
    }

    #[test]
    fn test_incomplete_sets_still_count() {
        let sets = [set(1, 100.0, 5, true), set(2, 100.0, 5, false)];
        assert_eq!(volume(&sets), 1000.0);
    }

    #[test]
    fn test_exercise_list_volume_is_sum_of_exercises() {
        let squat = exercise("squat", vec![set(1, 100.0, 5, true)]);
        let row = exercise("row", vec![set(1, 50.0, 10, false), set(2, 52.5, 8, true)]);
        let list = vec![squat.clone(), row.clone()];

        assert_eq!(squat.volume(), 500.0);
        assert_eq!(row.volume(), 920.0);
        assert_eq!(list.volume(), 1420.0);
    }

    #[test]
    fn test_volume_is_repeatable() {
        let sets = [set(1, 42.5, 7, false), set(2, 40.0, 9, true)];
        assert_eq!(volume(&sets), volume(&sets));
    }
}
