use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::job_description::JdId;

/// Response of `POST /api/analyze/resume-to-jds`. Replaced wholesale on every run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub resume_info: ResumeInfo,
    #[serde(default)]
    pub matches: Vec<JdMatch>,
}

/// Candidate metadata extracted server side. The backend capitalises these keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeInfo {
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Filename", default)]
    pub filename: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JdMatch {
    pub jd_id: JdId,
    pub jd_title: String,
    pub similarity_score: Score,
    #[serde(default)]
    pub recommendation: String,
}

/// Similarity score as sent by the backend: a number, or preformatted text such as `"87%"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Score {
    Number(f64),
    Text(String),
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Number(n) => write!(f, "{n}"),
            Score::Text(s) => f.write_str(s),
        }
    }
}
