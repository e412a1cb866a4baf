//! Filesystem document sink: one markdown file per repository.

use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::contract::{DocumentSink, SinkError};

/// Writes documents under a content directory, one `<repo_name>.md` each.
pub struct FsSink {
    content_dir: PathBuf,
}

impl FsSink {
    pub fn new(content_dir: impl Into<PathBuf>) -> Self {
        Self {
            content_dir: content_dir.into(),
        }
    }

    /// Deterministic output path for a repository's document.
    pub fn document_path(&self, repo_name: &str) -> PathBuf {
        self.content_dir.join(format!("{repo_name}.md"))
    }
}

impl DocumentSink for FsSink {
    fn write_document(&self, repo_name: &str, contents: &str) -> Result<(), SinkError> {
        fs::create_dir_all(&self.content_dir)?;
        let path = self.document_path(repo_name);
        fs::write(&path, contents)?;
        debug!(path = %path.display(), bytes = contents.len(), "Wrote content document");
        Ok(())
    }
}
