// PDF artifacts.
//
// Two independent documents are produced:
// - `user_report`: the registration report (title, table, footer)
// - `summary`: the name/date sheet behind DownloadPdf
//
// Both are written to a temporary file, read back and the file removed
// before the bytes are handed to the caller.

pub mod layout;
mod pdf;
pub mod summary;
pub mod user_report;

use chrono::{DateTime, Local};
use std::io::Write;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

use crate::types::UserEvent;
use layout::Layout;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Report I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF encoding error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("Report task failed: {0}")]
    Task(String),
}

/// A rendered document ready to be sent as a download
#[derive(Debug, Clone)]
pub struct Artifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Renders report layouts through a temporary file
#[derive(Debug, Clone)]
pub struct ReportGenerator {
    temp_dir: PathBuf,
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new(std::env::temp_dir())
    }
}

impl ReportGenerator {
    pub fn new(temp_dir: impl Into<PathBuf>) -> Self {
        Self {
            temp_dir: temp_dir.into(),
        }
    }

    /// Registration report for a persisted user
    pub fn user_report(&self, event: &UserEvent) -> Result<Artifact, ArtifactError> {
        let now = Local::now();
        self.render(&user_report::layout(event, now), now)
    }

    /// Name/date sheet for DownloadPdf
    pub fn download_summary(&self, username: &str) -> Result<Artifact, ArtifactError> {
        let now = Local::now();
        self.render(&summary::layout(username, now), now)
    }

    fn render(&self, layout: &Layout, now: DateTime<Local>) -> Result<Artifact, ArtifactError> {
        let mut doc = pdf::render(layout, now)?;

        let mut temp = tempfile::Builder::new()
            .prefix("user_data_")
            .suffix(".pdf")
            .tempfile_in(&self.temp_dir)?;
        debug!("Writing report to {}", temp.path().display());

        doc.save_to(temp.as_file_mut())?;
        temp.as_file_mut().flush()?;

        let bytes = std::fs::read(temp.path());
        // The file is gone after this line whether or not the read worked
        temp.close()?;

        Ok(Artifact {
            file_name: file_name(now),
            bytes: bytes?,
        })
    }
}

/// `user_data_<yyyyMMddHHmmss>.pdf`
pub fn file_name(at: DateTime<Local>) -> String {
    format!("user_data_{}.pdf", at.format("%Y%m%d%H%M%S"))
}
