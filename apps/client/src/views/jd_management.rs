//! JD Management: add job descriptions from text, file, or URL, and delete them.

use tracing::{error, info, warn};

use crate::api_client::ApiClient;
use crate::models::job_description::JdId;
use crate::prompter::Prompter;
use crate::state::JdLibrary;
use crate::upload::{SelectedFile, JD_EXTENSIONS};
use crate::views::Outcome;

pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this JD?";

/// Which ingestion form is active. Exactly one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Text,
    File,
    Url,
}

impl InputMode {
    pub fn parse(input: &str) -> Option<InputMode> {
        match input.trim() {
            "text" => Some(InputMode::Text),
            "file" => Some(InputMode::File),
            "url" => Some(InputMode::Url),
            _ => None,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            InputMode::Text => "📝 Paste Text",
            InputMode::File => "📄 Upload File",
            InputMode::Url => "🔗 From URL",
        }
    }
}

#[derive(Debug, Default)]
pub struct JdManagement {
    pub mode: InputMode,
    pub title: String,
    pub content: String,
    pub url: String,
    pub file: Option<SelectedFile>,
    in_flight: bool,
}

impl JdManagement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_file(&mut self, file: SelectedFile) {
        if !file.has_extension(JD_EXTENSIONS) {
            warn!("{} is not one of {:?}; submitting anyway", file.name, JD_EXTENSIONS);
        }
        self.file = Some(file);
    }

    /// File mode needs a selected file; the other modes defer validation to the backend.
    pub fn can_save(&self) -> bool {
        !self.in_flight && (self.mode != InputMode::File || self.file.is_some())
    }

    /// Submits the active form. On success the new JD goes to the front of the
    /// library and every input is cleared.
    pub async fn save(
        &mut self,
        client: &ApiClient,
        library: &mut JdLibrary,
        prompter: &mut dyn Prompter,
    ) -> Outcome {
        if !self.can_save() {
            return Outcome::Skipped;
        }

        self.in_flight = true;
        let result = match self.mode {
            InputMode::Text => client.add_text_jd(&self.title, &self.content).await,
            InputMode::Url => client.add_url_jd(&self.title, &self.url).await,
            InputMode::File => match &self.file {
                Some(file) => client.add_file_jd(file, Some(&self.title)).await,
                None => {
                    self.in_flight = false;
                    return Outcome::Skipped;
                }
            },
        };
        self.in_flight = false;

        match result {
            Ok(jd) => {
                info!("Added JD {} ({})", jd.id, jd.source.as_str());
                library.prepend(jd);
                self.clear_inputs();
                Outcome::Done
            }
            Err(e) => {
                error!("Failed to add JD: {e}");
                prompter.alert(&format!("Error: {e}")).await;
                Outcome::Failed
            }
        }
    }

    /// Deletes after the user confirms. The entry is removed locally only once
    /// the backend accepted the deletion.
    pub async fn delete(
        &mut self,
        id: &JdId,
        client: &ApiClient,
        library: &mut JdLibrary,
        prompter: &mut dyn Prompter,
    ) -> Outcome {
        if self.in_flight || !prompter.confirm(DELETE_CONFIRMATION).await {
            return Outcome::Skipped;
        }

        self.in_flight = true;
        let result = client.delete_jd(id).await;
        self.in_flight = false;

        match result {
            Ok(()) => {
                library.remove(id);
                info!("Deleted JD {id}");
                Outcome::Done
            }
            Err(e) => {
                error!("Failed to delete JD: {e}");
                prompter.alert(&format!("Error: {e}")).await;
                Outcome::Failed
            }
        }
    }

    fn clear_inputs(&mut self) {
        self.title.clear();
        self.content.clear();
        self.url.clear();
        self.file = None;
    }

    pub fn render(&self, library: &JdLibrary) -> String {
        let mut lines = vec!["== Add Job Description ==".to_string()];

        let modes = [InputMode::Text, InputMode::File, InputMode::Url]
            .iter()
            .map(|m| {
                if *m == self.mode {
                    format!("[{}]", m.label())
                } else {
                    format!(" {} ", m.label())
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        lines.push(modes);
        lines.push(format!("Title:   {}", field_or_hint(&self.title, "Job Title (e.g., Senior Python Developer)")));

        match self.mode {
            InputMode::Text => {
                lines.push(format!("Content: {}", field_or_hint(&self.content, "Paste the full job description here...")));
                lines.push("> save  (Save JD)".to_string());
            }
            InputMode::File => {
                let file = self.file.as_ref().map(|f| f.name.as_str());
                lines.push(format!("File:    {}", file.unwrap_or("(none; accepts .pdf, .docx, .txt)")));
                if self.can_save() {
                    lines.push("> save  (Upload & Save JD)".to_string());
                } else {
                    lines.push("  save  (Upload & Save JD: select a file first)".to_string());
                }
            }
            InputMode::Url => {
                lines.push(format!("URL:     {}", field_or_hint(&self.url, "https://linkedin.com/jobs/view/...")));
                lines.push("> save  (Extract & Save JD)".to_string());
            }
        }

        lines.push(String::new());
        lines.push(format!("== Job Description Library ({}) ==", library.len()));
        for jd in library.iter() {
            lines.push(format!("#{} {} [{}]", jd.id, jd.title, jd.source.as_str()));
            lines.push(format!("    {}", jd.preview().replace('\n', "\n    ")));
        }

        lines.join("\n")
    }
}

fn field_or_hint(value: &str, hint: &str) -> String {
    if value.is_empty() {
        format!("({hint})")
    } else {
        value.to_string()
    }
}
