use std::fmt::Display;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A named training program. Owns its training days top-down; children never
/// point back at their parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub training_days: Vec<TrainingDay>,
}

impl Program {
    pub fn training_day(&self, day_id: &str) -> Option<&TrainingDay> {
        self.training_days.iter().find(|d| d.id == day_id)
    }
}

/// One workout template within a program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingDay {
    pub id: String,
    pub name: String,
    pub exercises: Vec<ExerciseTemplate>,
}

/// Intended structure of one exercise within a training day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseTemplate {
    pub id: String,
    pub name: String,
    pub target_sets: u32,
    pub target_reps_min: u32,
    pub target_reps_max: u32,
    pub notes: Option<String>,
}

impl ExerciseTemplate {
    /// Checks the authoring invariants: at least one set, `1 <= min <= max` reps.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.target_sets == 0 {
            return Err(ValidationError::NoSets(self.name.clone()));
        }
        if self.target_reps_min == 0 {
            return Err(ValidationError::ZeroReps(self.name.clone()));
        }
        if self.target_reps_max < self.target_reps_min {
            return Err(ValidationError::RepRange {
                exercise: self.name.clone(),
                min: self.target_reps_min,
                max: self.target_reps_max,
            });
        }
        Ok(())
    }

    /// Display form of the rep target, `8` or `6-8`.
    pub fn rep_range(&self) -> String {
        if self.target_reps_min == self.target_reps_max {
            self.target_reps_min.to_string()
        } else {
            format!("{}-{}", self.target_reps_min, self.target_reps_max)
        }
    }
}

/// The atomic unit of logged performance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSet {
    pub set_number: u32,
    pub weight: f64,
    pub reps: u32,
    pub completed: bool,
}

impl ExerciseSet {
    pub fn new(set_number: u32, weight: f64, reps: u32, completed: bool) -> Self {
        Self {
            set_number,
            weight,
            reps,
            completed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressDirection {
    Up,
    Down,
    Same,
}

impl Display for ProgressDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Same => "same",
        };

        write!(f, "{}", s)
    }
}

impl FromStr for ProgressDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "same" => Ok(Self::Same),
            _ => Err(format!("Unknown progress direction: {}", s)),
        }
    }
}

/// Subjective rating of how an exercise felt. Entered by the user, never computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum Difficulty {
    TooEasy,
    Ok,
    TooHard,
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::TooEasy => "too_easy",
            Self::Ok => "ok",
            Self::TooHard => "too_hard",
        };

        write!(f, "{}", s)
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "too_easy" => Ok(Self::TooEasy),
            "ok" => Ok(Self::Ok),
            "too_hard" => Ok(Self::TooHard),
            _ => Err(format!("Unknown difficulty: {}", s)),
        }
    }
}

/// One exercise as performed within a session.
///
/// `exercise_template_id` is the join key across sessions. `name` is a copy
/// taken at session start and may drift from the template after a rename.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutExercise {
    pub id: String,
    pub exercise_template_id: String,
    pub name: String,
    pub sets: Vec<ExerciseSet>,
    pub notes: Option<String>,
    pub progress_direction: Option<ProgressDirection>,
    pub difficulty: Option<Difficulty>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    InProgress,
    Finalized,
}

/// One dated occurrence of a training day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSession {
    pub id: String,
    pub program_id: String,
    pub program_name: String,
    pub training_day_id: String,
    pub training_day_name: String,
    pub date: DateTime<Utc>,
    /// Minutes.
    pub duration: u32,
    pub exercises: Vec<WorkoutExercise>,
    pub body_weight: Option<f64>,
    pub waist_circumference: Option<f64>,
    pub completed: bool,
}

impl WorkoutSession {
    pub fn state(&self) -> SessionState {
        if self.completed {
            SessionState::Finalized
        } else {
            SessionState::InProgress
        }
    }

    /// The exercise spawned from `template_id`, first match wins.
    pub fn exercise_for_template(&self, template_id: &str) -> Option<&WorkoutExercise> {
        self.exercises
            .iter()
            .find(|e| e.exercise_template_id == template_id)
    }
}
