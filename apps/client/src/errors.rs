#![allow(dead_code)]

use std::path::PathBuf;

use thiserror::Error;

use crate::models::chat::ChatMode;

/// Every failure the request client can produce.
/// The client never swallows one of these; each view decides how to surface it.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(
        "Network Error: Failed to connect to the backend at {base_url}. \
         Please ensure the server is running and reachable."
    )]
    Connectivity {
        base_url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Non-success status. `message` is the backend's `detail` when it sent one.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Backend returned no JSON body for {path}")]
    EmptyBody { path: String },

    #[error("Could not read {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Cannot build a request path for id '{0}'")]
    InvalidPath(String),

    #[error("Chat mode '{}' is not available yet", .0.wire_name())]
    UnsupportedMode(ChatMode),
}

impl ClientError {
    /// True when the backend could not be reached at all, as opposed to answering with an error.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, ClientError::Connectivity { .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
