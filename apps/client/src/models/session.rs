use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque session identifier issued by `POST /api/session`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body of `POST /api/session`. `session_id` is absent when `success` is false.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionResponse {
    pub success: bool,
    #[serde(default)]
    pub session_id: Option<String>,
}

impl SessionResponse {
    /// The issued id, only when the backend reported success and sent a non-empty id.
    pub fn into_session(self) -> Option<SessionId> {
        match (self.success, self.session_id) {
            (true, Some(id)) if !id.is_empty() => Some(SessionId(id)),
            _ => None,
        }
    }
}
