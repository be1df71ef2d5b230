//! Typed wrappers for every backend endpoint the client consumes.

use reqwest::multipart::Form;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::api_client::{ApiClient, RequestBody};
use crate::errors::ClientError;
use crate::models::analysis::AnalysisResult;
use crate::models::chat::{ChatAnswer, ChatMode, ChatRequest};
use crate::models::job_description::{JdId, JobDescription, TextJdRequest, UrlJdRequest};
use crate::models::session::{SessionId, SessionResponse};
use crate::upload::SelectedFile;

pub const SESSION: &str = "/api/session";
pub const JDS: &str = "/api/jds";
pub const JDS_TEXT: &str = "/api/jds/text";
pub const JDS_URL: &str = "/api/jds/url";
pub const JDS_FILE: &str = "/api/jds/file";
pub const ANALYZE_RESUME: &str = "/api/analyze/resume-to-jds";
pub const CHAT: &str = "/api/chat";

/// Throwaway origin for `Url`'s path-segment encoder; only the path is kept.
const PATH_ORIGIN: &str = "http://backend.invalid";

/// `/api/jds/{id}` with the id percent-encoded as a single path segment.
pub fn jd_path(id: &JdId) -> Result<String, ClientError> {
    let invalid = || ClientError::InvalidPath(id.to_string());

    let mut url = Url::parse(PATH_ORIGIN).map_err(|_| invalid())?;
    url.path_segments_mut()
        .map_err(|_| invalid())?
        .pop_if_empty()
        .extend(JDS.split('/').filter(|s| !s.is_empty()))
        .push(&id.to_string());

    Ok(url.path().to_string())
}

impl ApiClient {
    /// POST /api/session
    pub async fn create_session(&self) -> Result<SessionResponse, ClientError> {
        let body = self.post(SESSION, RequestBody::Empty).await?;
        decode(SESSION, body)
    }

    /// GET /api/jds: oldest first, exactly as the backend stores them.
    pub async fn list_jds(&self) -> Result<Vec<JobDescription>, ClientError> {
        let body = self.get(JDS).await?;
        decode(JDS, body)
    }

    /// POST /api/jds/text
    pub async fn add_text_jd(&self, title: &str, content: &str) -> Result<JobDescription, ClientError> {
        let body = self
            .post(JDS_TEXT, json_body(&TextJdRequest { title, content })?)
            .await?;
        decode(JDS_TEXT, body)
    }

    /// POST /api/jds/url: the backend fetches and extracts the page.
    pub async fn add_url_jd(&self, title: &str, url: &str) -> Result<JobDescription, ClientError> {
        let body = self
            .post(JDS_URL, json_body(&UrlJdRequest { title, url })?)
            .await?;
        decode(JDS_URL, body)
    }

    /// POST /api/jds/file: multipart `{file, title?}`.
    pub async fn add_file_jd(
        &self,
        file: &SelectedFile,
        title: Option<&str>,
    ) -> Result<JobDescription, ClientError> {
        let mut form = Form::new().part("file", file.to_part()?);
        if let Some(title) = title.filter(|t| !t.is_empty()) {
            form = form.text("title", title.to_string());
        }

        let body = self.post(JDS_FILE, RequestBody::Multipart(form)).await?;
        decode(JDS_FILE, body)
    }

    /// DELETE /api/jds/{id}
    pub async fn delete_jd(&self, id: &JdId) -> Result<(), ClientError> {
        self.delete(&jd_path(id)?).await?;
        Ok(())
    }

    /// POST /api/analyze/resume-to-jds: multipart `{session_id, resume, jd_ids}`,
    /// where `jd_ids` is a JSON array encoded as a string field.
    pub async fn analyze_resume(
        &self,
        session: &SessionId,
        resume: &SelectedFile,
        jd_ids: &[JdId],
    ) -> Result<AnalysisResult, ClientError> {
        let form = Form::new()
            .text("session_id", session.as_str().to_string())
            .part("resume", resume.to_part()?)
            .text("jd_ids", serde_json::to_string(jd_ids)?);

        let body = self
            .post(ANALYZE_RESUME, RequestBody::Multipart(form))
            .await?;
        decode(ANALYZE_RESUME, body)
    }

    /// POST /api/chat
    pub async fn chat(
        &self,
        session: &SessionId,
        question: &str,
        mode: ChatMode,
    ) -> Result<ChatAnswer, ClientError> {
        if !mode.is_implemented() {
            return Err(ClientError::UnsupportedMode(mode));
        }

        let request = ChatRequest {
            session_id: session.as_str(),
            question,
            mode: mode.wire_name(),
        };
        let body = self.post(CHAT, json_body(&request)?).await?;
        decode(CHAT, body)
    }
}

fn json_body<T: Serialize>(payload: &T) -> Result<RequestBody, ClientError> {
    Ok(RequestBody::Json(serde_json::to_value(payload)?))
}

fn decode<T: DeserializeOwned>(path: &str, body: Option<Value>) -> Result<T, ClientError> {
    let value = body.ok_or_else(|| ClientError::EmptyBody {
        path: path.to_string(),
    })?;
    Ok(serde_json::from_value(value)?)
}
