//! Opening and saving documents.
//!
//! Files are read as UTF-8. Line breaks are normalized to LF in the buffer
//! and the detected ending is written back on save.

use std::path::Path;

use anyhow::{Context, Result};

use super::{Document, UNTITLED};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    /// CRLF if the first line break in `text` is CRLF, LF otherwise.
    pub fn detect(text: &str) -> Self {
        match text.find('\n') {
            Some(idx) if idx > 0 && text.as_bytes()[idx - 1] == b'\r' => LineEnding::CrLf,
            _ => LineEnding::Lf,
        }
    }

    fn apply(self, text: &str) -> String {
        match self {
            LineEnding::Lf => text.to_string(),
            LineEnding::CrLf => text.replace('\n', "\r\n"),
        }
    }
}

impl std::fmt::Display for LineEnding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LineEnding::Lf => write!(f, "LF"),
            LineEnding::CrLf => write!(f, "CRLF"),
        }
    }
}

fn title_for(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| UNTITLED.to_string())
}

impl Document {
    /// Opens a document from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid UTF-8.
    pub fn open(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read file: {}", path.display()))?;
        let line_ending = LineEnding::detect(&raw);

        let mut doc = Self::from_text(&raw);
        doc.file_path = Some(path.to_path_buf());
        doc.title = title_for(path);
        doc.line_ending = line_ending;
        tracing::debug!(
            "Opened {} ({} blocks, {:?})",
            path.display(),
            doc.block_count(),
            line_ending
        );
        Ok(doc)
    }

    /// Saves the document to its file path.
    ///
    /// # Errors
    ///
    /// Returns an error if no path is set or the file cannot be written.
    pub fn save(&mut self) -> Result<()> {
        let path = self
            .file_path
            .clone()
            .context("no file path set for this document")?;
        self.save_to(&path)
    }

    /// Saves the document to `path` and adopts it as the document's path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&mut self, path: &Path) -> Result<()> {
        let text = self.line_ending.apply(&self.buffer.to_string());
        std::fs::write(path, text)
            .with_context(|| format!("failed to write file: {}", path.display()))?;

        self.file_path = Some(path.to_path_buf());
        self.title = title_for(path);
        self.modified = false;
        Ok(())
    }
}
