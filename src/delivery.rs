//! Handing export artifacts to the user.
//!
//! In-app browsers (Instagram, WeChat, ...) cannot trigger file downloads from
//! a data URI, so those agents get the image in a modal for manual saving.
//! Everything else gets an automatic download.

use std::path::{Path, PathBuf};

use crate::error::DeliveryError;
use crate::export::ExportArtifact;

/// User-agent substrings (lowercase) that get modal delivery.
pub const DEFAULT_MODAL_AGENTS: &[&str] = &[
    "instagram",
    "fban",
    "fbav",
    "twitter",
    "line",
    "micromessenger",
    "weibo",
    "qq/",
    "linkedinapp",
    "snapchat",
];

/// How an artifact reaches the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMode {
    /// Show the image in a modal for manual saving.
    Modal,
    /// Trigger a file download.
    Download,
}

impl DeliveryMode {
    /// Picks modal delivery if the lowercased user agent contains any of
    /// `modal_agents`.
    pub fn for_user_agent<S: AsRef<str>>(user_agent: &str, modal_agents: &[S]) -> Self {
        let user_agent = user_agent.to_lowercase();
        let in_app = modal_agents
            .iter()
            .any(|agent| user_agent.contains(&agent.as_ref().to_lowercase()));
        if in_app { Self::Modal } else { Self::Download }
    }
}

/// Receives artifacts on one of the two delivery paths.
pub trait DeliverySink {
    /// Presents the artifact for manual saving.
    fn show_modal(&mut self, artifact: &ExportArtifact) -> Result<(), DeliveryError>;

    /// Saves the artifact under [`ExportArtifact::file_name`].
    fn trigger_download(&mut self, artifact: &ExportArtifact) -> Result<(), DeliveryError>;
}

// ============================================================================
// FileSink
// ============================================================================

/// Name of the page [`FileSink`] writes for modal delivery.
pub const MODAL_PAGE: &str = "download-modal.html";

/// Delivers artifacts into a directory.
///
/// Downloads are decoded and written as image files. Modal delivery writes a
/// small HTML page that embeds the data URI.
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Files written so far, oldest first.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn write(&mut self, name: &str, bytes: &[u8]) -> Result<(), DeliveryError> {
        let path = self.dir.join(name);
        std::fs::write(&path, bytes).map_err(|source| DeliveryError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path.display(), "wrote avatar");
        self.written.push(path);
        Ok(())
    }
}

impl DeliverySink for FileSink {
    fn show_modal(&mut self, artifact: &ExportArtifact) -> Result<(), DeliveryError> {
        let page = format!(
            "<!doctype html>\n<html><body style=\"text-align:center\">\n<p>Long press or right click the image to save it.</p>\n<img src=\"{}\" alt=\"avatar\" width=\"288\" height=\"288\">\n</body></html>\n",
            artifact.data_uri
        );
        self.write(MODAL_PAGE, page.as_bytes())
    }

    fn trigger_download(&mut self, artifact: &ExportArtifact) -> Result<(), DeliveryError> {
        let bytes = artifact.decode()?;
        self.write(&artifact.file_name, &bytes)
    }
}
