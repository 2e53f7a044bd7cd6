//! Session progression engine.
//!
//! Pure functions over already-fetched values:
//! - `volume`: weight × reps totals
//! - `stats`: completion counts and rep/volume averages
//! - `direction`: up/down/same against the previous matching session
//! - `init`: carry-forward set initialization from a training day
//! - `history`: picking the latest completed session out of a snapshot
//!
//! Nothing here logs, performs I/O or fails. Degenerate input yields zeroes,
//! `Same`, or template defaults.

pub mod direction;
pub mod history;
pub mod init;
pub mod stats;
pub mod volume;

pub use direction::{resolve, resolve_all};
pub use history::{
    last_completed_before, last_completed_for_program, last_completed_for_training_day,
};
pub use init::{create_manual_session, initialize, new_session};
pub use stats::SessionSummary;
pub use volume::{Volume, volume};
