use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of content characters shown in the library listing.
pub const PREVIEW_CHARS: usize = 400;

/// Backend-issued JD identifier. Kept in whatever JSON shape the backend used
/// so it round-trips unchanged in `jd_ids` and delete paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JdId {
    Number(i64),
    Text(String),
}

impl fmt::Display for JdId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JdId::Number(n) => write!(f, "{n}"),
            JdId::Text(s) => f.write_str(s),
        }
    }
}

/// How a JD was ingested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JdSource {
    Text,
    File,
    Url,
}

impl JdSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            JdSource::Text => "text",
            JdSource::File => "file",
            JdSource::Url => "url",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDescription {
    pub id: JdId,
    pub title: String,
    pub content: String,
    pub source: JdSource,
}

impl JobDescription {
    /// First `PREVIEW_CHARS` characters of the content followed by `...`.
    pub fn preview(&self) -> String {
        let head: String = self.content.chars().take(PREVIEW_CHARS).collect();
        format!("{head}...")
    }
}

/// `POST /api/jds/text`
#[derive(Debug, Serialize)]
pub struct TextJdRequest<'a> {
    pub title: &'a str,
    pub content: &'a str,
}

/// `POST /api/jds/url`
#[derive(Debug, Serialize)]
pub struct UrlJdRequest<'a> {
    pub title: &'a str,
    pub url: &'a str,
}
