//! In-process stand-in for the TalentSync backend, plus a scripted prompter.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::extract::{Multipart, Path, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::api_client::ApiClient;
use crate::prompter::Prompter;

#[derive(Debug, Clone)]
pub struct MockConfig {
    pub session_success: bool,
    pub fail_jd_listing: bool,
    pub reject_jd_writes: bool,
    pub fail_analysis: bool,
    pub fail_chat: bool,
    /// Seeded JD titles, oldest first. Ids are 1..=n.
    pub seed_titles: Vec<String>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            session_success: true,
            fail_jd_listing: false,
            reject_jd_writes: false,
            fail_analysis: false,
            fail_chat: false,
            seed_titles: Vec::new(),
        }
    }
}

impl MockConfig {
    pub fn with_jds(mut self, titles: &[&str]) -> Self {
        self.seed_titles = titles.iter().map(|t| t.to_string()).collect();
        self
    }
}

#[derive(Debug, Clone)]
pub struct FormField {
    pub name: String,
    pub file_name: Option<String>,
    pub text: String,
}

pub struct MockBackend {
    config: MockConfig,
    jds: Mutex<Vec<Value>>,
    next_id: AtomicI64,
    hits: AtomicUsize,
    paths: Mutex<Vec<String>>,
    content_type: Mutex<Option<String>>,
    last_form: Mutex<Vec<FormField>>,
    last_json: Mutex<Option<Value>>,
}

impl MockBackend {
    fn new(config: MockConfig) -> Self {
        let jds: Vec<Value> = config
            .seed_titles
            .iter()
            .enumerate()
            .map(|(i, title)| {
                json!({
                    "id": i as i64 + 1,
                    "title": title,
                    "content": format!("{title} description"),
                    "source": "text",
                })
            })
            .collect();
        let next_id = jds.len() as i64 + 1;

        Self {
            config,
            jds: Mutex::new(jds),
            next_id: AtomicI64::new(next_id),
            hits: AtomicUsize::new(0),
            paths: Mutex::new(Vec::new()),
            content_type: Mutex::new(None),
            last_form: Mutex::new(Vec::new()),
            last_json: Mutex::new(None),
        }
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// `"METHOD /path"` for every request received, in order.
    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }

    pub fn last_content_type(&self) -> Option<String> {
        self.content_type.lock().unwrap().clone()
    }

    pub fn last_form(&self) -> Vec<FormField> {
        self.last_form.lock().unwrap().clone()
    }

    pub fn last_json(&self) -> Option<Value> {
        self.last_json.lock().unwrap().clone()
    }

    fn store_jd(&self, title: &str, content: &str, source: &str) -> Value {
        let jd = json!({
            "id": self.next_id.fetch_add(1, Ordering::SeqCst),
            "title": title,
            "content": content,
            "source": source,
        });
        self.jds.lock().unwrap().push(jd.clone());
        jd
    }

    fn title_of(&self, id: &Value) -> String {
        self.jds
            .lock()
            .unwrap()
            .iter()
            .find(|jd| &jd["id"] == id)
            .and_then(|jd| jd["title"].as_str().map(String::from))
            .unwrap_or_default()
    }
}

type Shared = Arc<MockBackend>;

/// Starts a mock backend on an ephemeral port and returns a client pointed at it.
pub async fn spawn_backend(config: MockConfig) -> (ApiClient, Shared) {
    let backend = Arc::new(MockBackend::new(config));

    let app = Router::new()
        .route("/api/session", post(create_session))
        .route("/api/jds", get(list_jds))
        .route("/api/jds/text", post(add_text_jd))
        .route("/api/jds/url", post(add_url_jd))
        .route("/api/jds/file", post(add_file_jd))
        .route("/api/jds/:id", delete(delete_jd))
        .route("/api/analyze/resume-to-jds", post(analyze))
        .route("/api/chat", post(chat))
        .route("/api/plain", get(|| async { "ok" }))
        .route("/api/broken", get(broken))
        .route("/api/slow", get(slow))
        .layer(middleware::from_fn_with_state(backend.clone(), record))
        .with_state(backend.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = ApiClient::new(&format!("http://{addr}"), Duration::from_secs(5)).unwrap();
    (client, backend)
}

async fn record(State(backend): State<Shared>, request: Request, next: Next) -> Response {
    backend.hits.fetch_add(1, Ordering::SeqCst);
    backend
        .paths
        .lock()
        .unwrap()
        .push(format!("{} {}", request.method(), request.uri().path()));
    *backend.content_type.lock().unwrap() = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    next.run(request).await
}

fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "detail": message }))).into_response()
}

async fn create_session(State(backend): State<Shared>) -> Json<Value> {
    if backend.config.session_success {
        Json(json!({ "success": true, "session_id": "sess-123" }))
    } else {
        Json(json!({ "success": false }))
    }
}

async fn list_jds(State(backend): State<Shared>) -> Response {
    if backend.config.fail_jd_listing {
        return detail(StatusCode::SERVICE_UNAVAILABLE, "JD store unavailable");
    }
    let jds = backend.jds.lock().unwrap().clone();
    Json(Value::Array(jds)).into_response()
}

async fn add_text_jd(State(backend): State<Shared>, Json(body): Json<Value>) -> Response {
    *backend.last_json.lock().unwrap() = Some(body.clone());
    if backend.config.reject_jd_writes {
        return detail(StatusCode::UNPROCESSABLE_ENTITY, "content must not be empty");
    }
    let title = body["title"].as_str().unwrap_or_default();
    let content = body["content"].as_str().unwrap_or_default();
    Json(backend.store_jd(title, content, "text")).into_response()
}

async fn add_url_jd(State(backend): State<Shared>, Json(body): Json<Value>) -> Response {
    *backend.last_json.lock().unwrap() = Some(body.clone());
    if backend.config.reject_jd_writes {
        return detail(StatusCode::UNPROCESSABLE_ENTITY, "content must not be empty");
    }
    let title = body["title"].as_str().unwrap_or_default();
    let url = body["url"].as_str().unwrap_or_default();
    Json(backend.store_jd(title, &format!("Extracted from {url}"), "url")).into_response()
}

async fn read_form(backend: &MockBackend, mut multipart: Multipart) -> Vec<FormField> {
    let mut fields = Vec::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(String::from);
        let bytes = field.bytes().await.unwrap();
        fields.push(FormField {
            name,
            file_name,
            text: String::from_utf8_lossy(&bytes).into_owned(),
        });
    }
    *backend.last_form.lock().unwrap() = fields.clone();
    fields
}

async fn add_file_jd(State(backend): State<Shared>, multipart: Multipart) -> Response {
    let fields = read_form(&backend, multipart).await;
    if backend.config.reject_jd_writes {
        return detail(StatusCode::UNPROCESSABLE_ENTITY, "content must not be empty");
    }
    let Some(file) = fields.iter().find(|f| f.name == "file") else {
        return detail(StatusCode::BAD_REQUEST, "file is required");
    };
    let title = fields
        .iter()
        .find(|f| f.name == "title")
        .map(|f| f.text.clone())
        .or_else(|| file.file_name.clone())
        .unwrap_or_default();
    Json(backend.store_jd(&title, &file.text, "file")).into_response()
}

async fn delete_jd(State(backend): State<Shared>, Path(id): Path<String>) -> Response {
    let mut jds = backend.jds.lock().unwrap();
    match jds.iter().position(|jd| jd["id"].to_string() == id) {
        Some(index) => {
            jds.remove(index);
            StatusCode::NO_CONTENT.into_response()
        }
        None => detail(StatusCode::NOT_FOUND, &format!("JD {id} not found")),
    }
}

async fn analyze(State(backend): State<Shared>, multipart: Multipart) -> Response {
    let fields = read_form(&backend, multipart).await;
    if backend.config.fail_analysis {
        return detail(StatusCode::BAD_REQUEST, "Could not parse resume");
    }

    let filename = fields
        .iter()
        .find(|f| f.name == "resume")
        .and_then(|f| f.file_name.clone())
        .unwrap_or_default();
    let ids: Vec<Value> = fields
        .iter()
        .find(|f| f.name == "jd_ids")
        .and_then(|f| serde_json::from_str(&f.text).ok())
        .unwrap_or_default();

    let matches: Vec<Value> = ids
        .iter()
        .map(|id| {
            json!({
                "jd_id": id,
                "jd_title": backend.title_of(id),
                "similarity_score": 0.87,
                "recommendation": "Strong match",
            })
        })
        .collect();

    Json(json!({
        "resume_info": { "Name": "Jane Doe", "Filename": filename },
        "matches": matches,
    }))
    .into_response()
}

async fn chat(State(backend): State<Shared>, Json(body): Json<Value>) -> Response {
    *backend.last_json.lock().unwrap() = Some(body.clone());
    if backend.config.fail_chat {
        return detail(StatusCode::INTERNAL_SERVER_ERROR, "LLM unavailable");
    }
    let question = body["question"].as_str().unwrap_or_default();
    Json(json!({ "answer": format!("Echo: {question}") })).into_response()
}

async fn slow() -> Json<Value> {
    tokio::time::sleep(Duration::from_secs(2)).await;
    Json(json!([]))
}

async fn broken() -> Response {
    (StatusCode::BAD_GATEWAY, "<html>Bad Gateway</html>").into_response()
}

/// Records alerts and confirmations; answers confirmations from a script (default: no).
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<bool>,
    pub alerts: Vec<String>,
    pub confirms: Vec<String>,
}

impl ScriptedPrompter {
    pub fn answering(answers: &[bool]) -> Self {
        Self {
            answers: answers.iter().copied().collect(),
            ..Self::default()
        }
    }
}

#[async_trait]
impl Prompter for ScriptedPrompter {
    async fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    async fn confirm(&mut self, message: &str) -> bool {
        self.confirms.push(message.to_string());
        self.answers.pop_front().unwrap_or(false)
    }
}
