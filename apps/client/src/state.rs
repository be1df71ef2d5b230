use thiserror::Error;

use crate::models::job_description::{JdId, JobDescription};
use crate::models::session::SessionId;

#[derive(Debug, Error, PartialEq)]
pub enum StateError {
    #[error("Session already established as {0}")]
    SessionAlreadySet(SessionId),
}

/// Page-level state shared by all views: the session and the JD library.
/// Owned by the shell and lent to one view at a time.
#[derive(Debug, Default)]
pub struct AppState {
    session: Option<SessionId>,
    pub jds: JdLibrary,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> Option<&SessionId> {
        self.session.as_ref()
    }

    /// Sets the session id. It is write-once for the lifetime of the process.
    pub fn adopt_session(&mut self, session: SessionId) -> Result<(), StateError> {
        if let Some(existing) = &self.session {
            return Err(StateError::SessionAlreadySet(existing.clone()));
        }
        self.session = Some(session);
        Ok(())
    }
}

/// Job descriptions, newest first, unique by id.
#[derive(Debug, Default, Clone)]
pub struct JdLibrary {
    entries: Vec<JobDescription>,
}

impl JdLibrary {
    /// Builds the library from the backend's oldest-first listing.
    pub fn from_oldest_first(jds: Vec<JobDescription>) -> Self {
        let mut library = Self::default();
        for jd in jds {
            library.prepend(jd);
        }
        library
    }

    /// Inserts at the front. An entry with the same id is replaced, not duplicated.
    pub fn prepend(&mut self, jd: JobDescription) {
        self.entries.retain(|existing| existing.id != jd.id);
        self.entries.insert(0, jd);
    }

    pub fn remove(&mut self, id: &JdId) -> Option<JobDescription> {
        let index = self.entries.iter().position(|jd| &jd.id == id)?;
        Some(self.entries.remove(index))
    }

    pub fn get(&self, id: &JdId) -> Option<&JobDescription> {
        self.entries.iter().find(|jd| &jd.id == id)
    }

    pub fn contains(&self, id: &JdId) -> bool {
        self.get(id).is_some()
    }

    /// Looks an entry up by the id as the user typed it.
    pub fn find_by_label(&self, label: &str) -> Option<&JobDescription> {
        let label = label.trim();
        self.entries.iter().find(|jd| jd.id.to_string() == label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &JobDescription> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
