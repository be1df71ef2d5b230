//! Résumé → JDs analysis: one résumé against a hand-picked set of job descriptions.

use tracing::{error, info, warn};

use crate::api_client::ApiClient;
use crate::models::analysis::AnalysisResult;
use crate::models::job_description::JdId;
use crate::models::session::SessionId;
use crate::prompter::Prompter;
use crate::state::JdLibrary;
use crate::upload::{SelectedFile, RESUME_EXTENSIONS};
use crate::views::Outcome;

#[derive(Debug, Default)]
pub struct ResumeAnalysis {
    resume: Option<SelectedFile>,
    selected: Vec<JdId>,
    results: Option<AnalysisResult>,
    loading: bool,
}

impl ResumeAnalysis {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_resume(&mut self, file: SelectedFile) {
        if !file.has_extension(RESUME_EXTENSIONS) {
            warn!("{} is not one of {:?}; submitting anyway", file.name, RESUME_EXTENSIONS);
        }
        self.resume = Some(file);
    }

    /// Adds `id` if absent, removes it if present. Selection order is kept.
    pub fn toggle(&mut self, id: JdId) {
        if let Some(index) = self.selected.iter().position(|s| *s == id) {
            self.selected.remove(index);
        } else {
            self.selected.push(id);
        }
    }

    pub fn selected(&self) -> &[JdId] {
        &self.selected
    }

    pub fn is_selected(&self, id: &JdId) -> bool {
        self.selected.contains(id)
    }

    /// Drops selections whose JD no longer exists in the library.
    pub fn retain_known(&mut self, library: &JdLibrary) {
        self.selected.retain(|id| library.contains(id));
    }

    pub fn results(&self) -> Option<&AnalysisResult> {
        self.results.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn can_analyze(&self, session: Option<&SessionId>) -> bool {
        !self.loading && self.resume.is_some() && !self.selected.is_empty() && session.is_some()
    }

    /// Runs the analysis. Previous results are cleared first and only replaced on success.
    pub async fn analyze(
        &mut self,
        client: &ApiClient,
        session: Option<&SessionId>,
        prompter: &mut dyn Prompter,
    ) -> Outcome {
        if !self.can_analyze(session) {
            return Outcome::Skipped;
        }
        let (Some(session), Some(resume)) = (session, self.resume.as_ref()) else {
            return Outcome::Skipped;
        };

        self.loading = true;
        self.results = None;

        let result = client
            .analyze_resume(session, resume, &self.selected)
            .await;
        self.loading = false;

        match result {
            Ok(results) => {
                info!(
                    "Analysis finished: {} matches for {}",
                    results.matches.len(),
                    results.resume_info.filename
                );
                self.results = Some(results);
                Outcome::Done
            }
            Err(e) => {
                error!("Analysis failed: {e}");
                prompter.alert(&format!("Analysis Error: {e}")).await;
                Outcome::Failed
            }
        }
    }

    pub fn action_label(&self) -> String {
        if self.loading {
            "Analyzing...".to_string()
        } else {
            format!("Analyze Resume vs {} JDs", self.selected.len())
        }
    }

    pub fn render(&self, library: &JdLibrary, session: Option<&SessionId>) -> String {
        let mut lines = vec!["== 1. Upload Resume ==".to_string()];
        lines.push(match &self.resume {
            Some(file) => format!("  {}", file.name),
            None => "  Upload a PDF or DOCX file  (resume <path>)".to_string(),
        });

        lines.push(String::new());
        lines.push("== 2. Select Job Descriptions ==  (select <id>)".to_string());
        for jd in library.iter() {
            let mark = if self.is_selected(&jd.id) { "x" } else { " " };
            lines.push(format!("  [{mark}] #{} {}", jd.id, jd.title));
        }

        lines.push(String::new());
        let prefix = if self.can_analyze(session) { ">" } else { " " };
        lines.push(format!("{prefix} analyze  ({})", self.action_label()));

        lines.push(String::new());
        lines.push("== Analysis Results ==".to_string());
        if self.is_loading() {
            lines.push("  Analyzing... please wait.".to_string());
        } else if let Some(results) = &self.results {
            lines.push(format!("  Candidate: {}", results.resume_info.name));
            lines.push(format!("  {}", results.resume_info.filename));
            lines.push("  Matching Jobs:".to_string());
            for m in &results.matches {
                lines.push(format!("    {}  {}", m.jd_title, m.similarity_score));
                lines.push(format!("      {}", m.recommendation));
            }
        } else {
            lines.push("  Results will be displayed here after analysis.".to_string());
        }

        lines.join("\n")
    }
}
