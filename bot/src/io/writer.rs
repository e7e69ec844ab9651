//! Response writer: turns completion text into an artifact on disk.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::info;

use crate::core::classifier::classify;
use crate::core::fence::strip_fences;
use crate::core::naming::artifact_file_name;
use crate::error::{BotError, Result};
use crate::io::journal::Journal;

/// Writes artifacts into dated folders below a project directory.
#[derive(Debug, Clone)]
pub struct ResponseWriter<'a> {
    project_dir: PathBuf,
    journal: &'a Journal,
}

impl<'a> ResponseWriter<'a> {
    pub fn new(project_dir: impl Into<PathBuf>, journal: &'a Journal) -> Self {
        Self {
            project_dir: project_dir.into(),
            journal,
        }
    }

    /// Dated folder for `at`: `<project_dir>/<YYYY-MM-DD>`.
    pub fn dated_dir(&self, at: NaiveDateTime) -> PathBuf {
        self.project_dir.join(at.format("%Y-%m-%d").to_string())
    }

    /// Classify, clean, and write `text` as `<dated_dir>/<slug(name_hint)><ext>`.
    ///
    /// Existing files at the destination are overwritten. The saved path is
    /// recorded in the journal before it is returned.
    pub fn write(&self, text: &str, name_hint: &str, at: NaiveDateTime) -> Result<PathBuf> {
        let extension = classify(text);
        let dir = self.dated_dir(at);
        fs::create_dir_all(&dir).map_err(|err| BotError::write(&dir, err))?;

        let path = dir.join(artifact_file_name(name_hint, extension));
        write_artifact(&path, &strip_fences(text))?;
        info!(path = %path.display(), %extension, "artifact saved");
        self.journal
            .append(at, &format!("Artifact saved: {}", path.display()))?;
        Ok(path)
    }
}

fn write_artifact(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|err| BotError::write(path, err))
}
