//! SetCoach: a workout tracker that pre-fills each session from the last
//! completed one and marks every exercise as progressed, regressed or flat.
//!
//! The pure rules live in [`engine`]; [`workflow`] drives them against a
//! [`store`]; the binary wraps everything in a CLI.

pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod engine;
pub mod error;
pub mod models;
pub mod store;
pub mod types;
pub mod utils;
pub mod workflow;

#[cfg(test)]
mod test_utils;
