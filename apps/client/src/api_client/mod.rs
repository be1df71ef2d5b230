//! API Client: the single point of entry for all backend calls in TalentSync.
//!
//! ARCHITECTURAL RULE: views never touch `reqwest` directly.
//! Every request goes through `ApiClient::request`, which owns status handling,
//! error-body parsing and the connectivity diagnosis.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::multipart::Form;
use reqwest::{Client, Method, Response};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, Instrument};
use uuid::Uuid;

use crate::errors::ClientError;

pub mod endpoints;

/// Outgoing body of a POST.
pub enum RequestBody {
    Empty,
    Json(Value),
    /// Sent without an explicit content type so the transport writes the boundary.
    Multipart(Form),
}

/// Error body shape the backend uses for non-success responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<Value>,
}

/// HTTP client bound to one backend base URL. Cheap to clone.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: crate::config::normalize_base_url(base_url),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get(&self, path: &str) -> Result<Option<Value>, ClientError> {
        self.request(Method::GET, path, RequestBody::Empty).await
    }

    pub async fn post(&self, path: &str, body: RequestBody) -> Result<Option<Value>, ClientError> {
        self.request(Method::POST, path, body).await
    }

    pub async fn delete(&self, path: &str) -> Result<Option<Value>, ClientError> {
        self.request(Method::DELETE, path, RequestBody::Empty).await
    }

    /// Performs one call. No retries: the caller decides what a failure means.
    ///
    /// Returns `Ok(None)` for a success whose body is not JSON (or is empty).
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
    ) -> Result<Option<Value>, ClientError> {
        let span = tracing::debug_span!("api_request", request_id = %Uuid::new_v4(), %method, path);
        let result = self.send(method.clone(), path, body).instrument(span).await;

        if let Err(e) = &result {
            error!("API client error on {method} {path}: {e}");
        }
        result
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
    ) -> Result<Option<Value>, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.client.request(method, &url);

        let builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(serde_json::to_vec(&value)?),
            RequestBody::Multipart(form) => builder.multipart(form),
        };

        let response = builder
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        debug!("Backend answered {status}");

        if !status.is_success() {
            return Err(error_from_response(response).await);
        }

        if !is_json(&response) {
            return Ok(None);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    /// Refused, dropped or timed-out connections all mean the backend is unreachable.
    fn transport_error(&self, e: reqwest::Error) -> ClientError {
        if e.is_connect() || e.is_timeout() || e.is_request() {
            ClientError::Connectivity {
                base_url: self.base_url.clone(),
                source: e,
            }
        } else {
            ClientError::Http(e)
        }
    }
}

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.contains("application/json"))
        .unwrap_or(false)
}

/// Builds an `Api` error, preferring the backend's `detail` over the bare status line.
async fn error_from_response(response: Response) -> ClientError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    let message = parse_detail(&body).unwrap_or_else(|| {
        format!(
            "HTTP error! status: {} {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or_default()
        )
        .trim_end()
        .to_string()
    });

    ClientError::Api {
        status: status.as_u16(),
        message,
    }
}

/// Extracts `detail` from an error body. Non-string details (e.g. validation lists)
/// are rendered as compact JSON.
fn parse_detail(body: &str) -> Option<String> {
    let detail = serde_json::from_str::<ErrorBody>(body).ok()?.detail?;
    match detail {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::String(_) | Value::Null => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{spawn_backend, MockConfig};

    #[test]
    fn test_parse_detail_string() {
        assert_eq!(
            parse_detail(r#"{"detail": "JD not found"}"#),
            Some("JD not found".to_string())
        );
    }

    #[test]
    fn test_parse_detail_structured() {
        let detail = parse_detail(r#"{"detail": [{"loc": ["body", "title"], "msg": "field required"}]}"#)
            .unwrap();
        assert!(detail.contains("field required"));
    }

    #[test]
    fn test_parse_detail_missing_or_not_json() {
        assert_eq!(parse_detail(r#"{"error": "nope"}"#), None);
        assert_eq!(parse_detail(r#"{"detail": ""}"#), None);
        assert_eq!(parse_detail("<html>Bad Gateway</html>"), None);
        assert_eq!(parse_detail(""), None);
    }

    #[tokio::test]
    async fn test_get_returns_parsed_json() {
        let (client, _backend) = spawn_backend(MockConfig::default()).await;
        let value = client.get("/api/jds").await.unwrap();
        assert_eq!(value, Some(serde_json::json!([])));
    }

    #[tokio::test]
    async fn test_non_json_success_is_none() {
        let (client, _backend) = spawn_backend(MockConfig::default()).await;
        assert_eq!(client.get("/api/plain").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_no_content_success_is_none() {
        let (client, _backend) = spawn_backend(MockConfig::default()).await;
        client
            .post("/api/jds/text", RequestBody::Json(serde_json::json!({"title": "t", "content": "c"})))
            .await
            .unwrap();
        assert_eq!(client.delete("/api/jds/1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_error_detail_is_surfaced() {
        let (client, _backend) = spawn_backend(MockConfig::default()).await;
        let err = client.delete("/api/jds/999").await.unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "JD 999 not found");
    }

    #[tokio::test]
    async fn test_error_without_detail_falls_back_to_status_text() {
        let (client, _backend) = spawn_backend(MockConfig::default()).await;
        let err = client.get("/api/broken").await.unwrap_err();
        assert_eq!(err.status(), Some(502));
        assert_eq!(err.to_string(), "HTTP error! status: 502 Bad Gateway");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_connectivity_error() {
        // Bind then drop to get a port nothing listens on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ApiClient::new(&format!("http://{addr}"), Duration::from_secs(5)).unwrap();
        let err = client.get("/api/jds").await.unwrap_err();

        assert!(err.is_connectivity());
        assert!(err.to_string().contains("Failed to connect to the backend"));
        assert!(err.to_string().contains(&addr.to_string()));
    }

    #[tokio::test]
    async fn test_dropped_connection_is_connectivity_error() {
        // Accepts every connection and closes it before answering.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            while let Ok((socket, _)) = listener.accept().await {
                drop(socket);
            }
        });

        let client = ApiClient::new(&format!("http://{addr}"), Duration::from_secs(5)).unwrap();
        let err = client.get("/api/jds").await.unwrap_err();

        assert!(err.is_connectivity());
        assert!(err.to_string().contains("Failed to connect to the backend"));
    }

    #[tokio::test]
    async fn test_timeout_is_connectivity_error() {
        let (client, _backend) = spawn_backend(MockConfig::default()).await;
        let impatient = ApiClient::new(client.base_url(), Duration::from_millis(200)).unwrap();

        let err = impatient.get("/api/slow").await.unwrap_err();

        assert!(err.is_connectivity());
        assert_eq!(err.status(), None);
    }

    #[tokio::test]
    async fn test_json_post_sets_content_type() {
        let (client, backend) = spawn_backend(MockConfig::default()).await;
        client
            .post("/api/chat", RequestBody::Json(serde_json::json!({
                "session_id": "s", "question": "q", "mode": "multi-candidate"
            })))
            .await
            .unwrap();
        assert_eq!(
            backend.last_content_type().as_deref(),
            Some("application/json")
        );
    }

    #[tokio::test]
    async fn test_multipart_post_lets_transport_set_boundary() {
        let (client, backend) = spawn_backend(MockConfig::default()).await;
        let form = Form::new()
            .text("title", "Platform Eng")
            .part("file", reqwest::multipart::Part::bytes(b"Kubernetes".to_vec()).file_name("jd.txt"));
        client
            .post("/api/jds/file", RequestBody::Multipart(form))
            .await
            .unwrap();

        let content_type = backend.last_content_type().unwrap();
        assert!(content_type.starts_with("multipart/form-data; boundary="));
    }

    #[test]
    fn test_base_url_is_normalized() {
        let client = ApiClient::new("http://localhost:8000/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
    }
}
