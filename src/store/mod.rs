//! Persistence seams.
//!
//! The engine never touches a store; callers fetch a snapshot, hand it to the
//! engine, and save what comes back. `MemoryStore` and `SqliteStore` are
//! interchangeable behind these traits.

use anyhow::Result;

use crate::models::{Program, WorkoutSession};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

#[allow(async_fn_in_trait)]
pub trait SessionStore {
    /// Every session, completed or not, ordered by date.
    async fn fetch_all_sessions(&self, descending: bool) -> Result<Vec<WorkoutSession>>;

    /// Insert or replace by id, exercises and sets included.
    async fn save(&self, session: &WorkoutSession) -> Result<()>;

    async fn delete(&self, session_id: &str) -> Result<()>;
}

#[allow(async_fn_in_trait)]
pub trait ProgramStore {
    /// All programs, ordered by name.
    async fn fetch_all(&self) -> Result<Vec<Program>>;

    async fn save(&self, program: &Program) -> Result<()>;

    async fn delete(&self, program_id: &str) -> Result<()>;
}
