//! Local files picked for upload (JD documents and résumés).

use std::path::Path;

use bytes::Bytes;
use reqwest::multipart::Part;

use crate::errors::ClientError;

/// Extensions the JD upload form advertises.
pub const JD_EXTENSIONS: &[&str] = &["pdf", "docx", "txt"];
/// Extensions the résumé picker advertises.
pub const RESUME_EXTENSIONS: &[&str] = &["pdf", "docx"];

/// A file selected by the user, read fully into memory.
/// Stays selected across submissions, so the contents are shared rather than re-read.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    pub mime: String,
    pub bytes: Bytes,
}

impl SelectedFile {
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let path = path.as_ref();
        let contents = tokio::fs::read(path)
            .await
            .map_err(|source| ClientError::File {
                path: path.to_path_buf(),
                source,
            })?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        Ok(Self::from_bytes(name, contents))
    }

    pub fn from_bytes(name: impl Into<String>, contents: impl Into<Bytes>) -> Self {
        let name = name.into();
        let mime = mime_guess::from_path(&name)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Self {
            name,
            mime,
            bytes: contents.into(),
        }
    }

    pub fn extension(&self) -> Option<String> {
        Path::new(&self.name)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
    }

    /// Whether the extension is one of `allowed` (case-insensitive).
    pub fn has_extension(&self, allowed: &[&str]) -> bool {
        self.extension()
            .map(|ext| allowed.iter().any(|a| *a == ext))
            .unwrap_or(false)
    }

    pub(crate) fn to_part(&self) -> Result<Part, ClientError> {
        Ok(Part::bytes(self.bytes.to_vec())
            .file_name(self.name.clone())
            .mime_str(&self.mime)?)
    }
}
