//! Session bootstrap: acquires a session, then loads the JD library. Runs once.

use thiserror::Error;
use tracing::{error, info};

use crate::api_client::ApiClient;
use crate::errors::ClientError;
use crate::models::session::SessionId;
use crate::state::JdLibrary;

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("Session creation failed.")]
    SessionRejected,

    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Gate for the whole UI. Only `Ready` renders the tabs.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum BootState {
    #[default]
    Initializing,
    Ready,
    Failed(String),
}

#[derive(Debug)]
pub struct Bootstrapped {
    pub session: SessionId,
    pub jds: JdLibrary,
}

/// Two sequential calls: create the session, then list JDs (reversed to newest first).
/// The JD fetch never happens when session creation fails.
pub async fn bootstrap(client: &ApiClient) -> Result<Bootstrapped, BootstrapError> {
    let result = run(client).await;
    if let Err(e) = &result {
        error!("Initialization failed: {e}");
    }
    result
}

async fn run(client: &ApiClient) -> Result<Bootstrapped, BootstrapError> {
    let session = client
        .create_session()
        .await?
        .into_session()
        .ok_or(BootstrapError::SessionRejected)?;
    info!("Session established: {session}");

    let jds = JdLibrary::from_oldest_first(client.list_jds().await?);
    info!("Loaded {} job descriptions", jds.len());

    Ok(Bootstrapped { session, jds })
}
