use anyhow::Result;
use tokio::sync::Mutex;

use super::{ProgramStore, SessionStore};
use crate::engine::history::sort_by_date_descending;
use crate::models::{Program, WorkoutSession};

/// Keeps everything in process memory. Used by tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    sessions: Mutex<Vec<WorkoutSession>>,
    programs: Mutex<Vec<Program>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sessions(sessions: Vec<WorkoutSession>) -> Self {
        Self {
            sessions: Mutex::new(sessions),
            programs: Mutex::default(),
        }
    }
}

impl SessionStore for MemoryStore {
    async fn fetch_all_sessions(&self, descending: bool) -> Result<Vec<WorkoutSession>> {
        let mut sessions = self.sessions.lock().await.clone();
        sort_by_date_descending(&mut sessions);
        if !descending {
            sessions.reverse();
        }
        Ok(sessions)
    }

    async fn save(&self, session: &WorkoutSession) -> Result<()> {
        let mut sessions = self.sessions.lock().await;
        match sessions.iter_mut().find(|s| s.id == session.id) {
            Some(existing) => *existing = session.clone(),
            None => sessions.push(session.clone()),
        }
        Ok(())
    }

    async fn delete(&self, session_id: &str) -> Result<()> {
        self.sessions.lock().await.retain(|s| s.id != session_id);
        Ok(())
    }
}

impl ProgramStore for MemoryStore {
    async fn fetch_all(&self) -> Result<Vec<Program>> {
        let mut programs = self.programs.lock().await.clone();
        programs.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(programs)
    }

    async fn save(&self, program: &Program) -> Result<()> {
        let mut programs = self.programs.lock().await;
        match programs.iter_mut().find(|p| p.id == program.id) {
            Some(existing) => *existing = program.clone(),
            None => programs.push(program.clone()),
        }
        Ok(())
    }

    async fn delete(&self, program_id: &str) -> Result<()> {
        self.programs.lock().await.retain(|p| p.id != program_id);
        Ok(())
    }
}
