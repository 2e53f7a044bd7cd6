use clap::{Args, Parser, Subcommand};

use crate::models::Difficulty;
use crate::utils::parse_duration;

#[derive(Parser)]
#[command(name = "setcoach", version, about = "CLI workout tracker")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Emit machine-readable JSON instead of colorful text.
    #[arg(global = true, long)]
    pub json: bool,

    /// More log output on stderr (-v info, -vv debug, -vvv trace).
    #[arg(global = true, short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Session-scoped commands
    #[command(subcommand, visible_alias = "s")]
    Session(SessionCmd),

    /// Program management
    #[command(subcommand, visible_alias = "p")]
    Program(ProgramCmd),

    /// Completed workouts
    #[command(subcommand, visible_alias = "h")]
    History(HistoryCmd),

    /// View or edit setcoach config
    #[command(subcommand)]
    Config(ConfigCmd),
}

//
// Commands
//

#[derive(Subcommand)]
pub enum SessionCmd {
    /// Start a live workout of a training day
    #[command(visible_alias = "s")]
    Start(StartArgs),

    /// Log a past workout of a training day
    #[command(visible_alias = "l")]
    Log {
        #[command(flatten)]
        target: StartArgs,

        /// Date in YYYY-MM-DD format
        #[arg(short, long)]
        date: String,
    },

    /// Show current session details
    #[command(visible_alias = "i")]
    Show,

    /// Set weight and reps of a set - Usage: session set EXERCISE SET WEIGHT REPS
    #[command(visible_alias = "e")]
    #[command(override_usage = "session set <EXERCISE> <SET> <WEIGHT> <REPS>")]
    Set {
        /// Exercise index
        #[arg(value_name = "EXERCISE")]
        exercise: usize,

        /// Set number
        #[arg(value_name = "SET")]
        set: usize,

        /// Weight in kg (0 for bodyweight)
        #[arg(value_name = "WEIGHT")]
        weight: f64,

        /// Number of reps
        #[arg(value_name = "REPS")]
        reps: u32,

        /// Also mark the set as done
        #[arg(long, short = 'd')]
        done: bool,
    },

    /// Mark a set as done
    #[command(visible_alias = "d")]
    Done {
        #[arg(value_name = "EXERCISE")]
        exercise: usize,

        #[arg(value_name = "SET")]
        set: usize,

        /// Mark as not done instead
        #[arg(long, short = 'u')]
        undo: bool,
    },

    /// Append a set to an exercise
    AddSet {
        #[arg(value_name = "EXERCISE")]
        exercise: usize,
    },

    /// Rate how an exercise felt
    Rate {
        #[arg(value_name = "EXERCISE")]
        exercise: usize,

        #[arg(value_enum, value_name = "DIFFICULTY")]
        difficulty: Difficulty,
    },

    #[command(visible_alias = "n")]
    #[command(override_usage = "session note <EX_IDX> <NOTE_STRING>")]
    Note {
        /// 1-based index of the exercise (same order shown in `session show`)
        #[arg(value_name = "EX_IDX")]
        exercise: usize,

        /// Free-form text
        #[arg(value_name = "NOTE_STRING")]
        note: String,
    },

    /// Finish the current session
    #[command(visible_alias = "f")]
    Finish {
        /// Body weight in kg (defaults to `default_body_weight` config)
        #[arg(long)]
        body_weight: Option<f64>,

        /// Waist circumference in cm (defaults to `default_waist` config)
        #[arg(long)]
        waist: Option<f64>,

        /// Duration as minutes or h:mm (defaults to elapsed time, 0 for logged workouts)
        #[arg(long, value_parser = parse_duration)]
        duration: Option<u32>,
    },

    /// Cancel the current session
    #[command(visible_alias = "c")]
    Cancel,
}

#[derive(Args)]
pub struct StartArgs {
    /// Program index (from `p list`) or exact name
    pub program: String,

    /// Training day index (from `p show`) or exact name
    pub day: String,
}

#[derive(Subcommand)]
pub enum ProgramCmd {
    /// Import one or more programs
    #[command(visible_alias = "i")]
    Import { files: Vec<String> },

    /// List programs
    #[command(visible_alias = "l")]
    List,

    /// Show a single program in detail
    #[command(visible_alias = "s")]
    Show {
        /// Program index (from `p list`) or exact name
        program: String,
    },

    /// Delete a program
    #[command(visible_alias = "d")]
    Delete {
        /// Program index (from `p list`) or exact name
        program: String,
    },
}

#[derive(Subcommand)]
pub enum HistoryCmd {
    /// List completed workouts, newest first
    #[command(visible_alias = "l")]
    List {
        /// Only workouts of this program (index or exact name)
        #[arg(short, long)]
        program: Option<String>,

        /// Number of workouts to show
        #[arg(short = 'n', long, default_value = "10")]
        limit: usize,
    },

    /// Show one completed workout (1 = most recent)
    #[command(visible_alias = "s")]
    Show { index: usize },
}

#[derive(Subcommand)]
pub enum ConfigCmd {
    /// Show all config keys
    List,

    /// Get the value of a key
    Get { key: String },

    /// Set or override a key
    Set { key: String, val: String },

    /// Remove a key
    Unset { key: String },
}
