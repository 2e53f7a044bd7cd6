use thiserror::Error;

/// Authoring errors for program definitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("exercise name must not be empty")]
    EmptyName,

    #[error("`{0}` needs at least one target set")]
    NoSets(String),

    #[error("`{0}` needs a minimum of at least one rep")]
    ZeroReps(String),

    #[error("`{exercise}` has rep range {min}-{max} (max below min)")]
    RepRange { exercise: String, min: u32, max: u32 },

    #[error("training day `{0}` has no exercises")]
    EmptyDay(String),

    #[error("training day `{day}` lists `{exercise}` twice")]
    DuplicateExercise { day: String, exercise: String },
}

/// Errors raised while editing or finishing an active workout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("no exercise at index {0}")]
    NoSuchExercise(usize),

    #[error("exercise {exercise} has no set {set}")]
    NoSuchSet { exercise: usize, set: usize },

    #[error("session {0} is already finished")]
    AlreadyFinalized(String),

    #[error("weight must be a finite number, zero or more, got {0}")]
    InvalidWeight(String),

    #[error("mark at least one set as done before finishing a logged workout")]
    NothingLogged,
}
