//! Daily operator journal under `logs/`.
//!
//! One append-only file per calendar day (`YYYY-MM-DD.log`), one line per
//! event: `[HH:MM:SS] <message>`. Unlike `tracing` output this is a product
//! artifact and is always written.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::error::{BotError, Result};

#[derive(Debug, Clone)]
pub struct Journal {
    dir: PathBuf,
}

impl Journal {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Journal file for the day of `at`.
    pub fn path_for(&self, at: NaiveDateTime) -> PathBuf {
        self.dir.join(format!("{}.log", at.format("%Y-%m-%d")))
    }

    /// Append one timestamped line.
    pub fn append(&self, at: NaiveDateTime, message: &str) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|err| BotError::write(&self.dir, err))?;
        let path = self.path_for(at);
        append_line(&path, &format_line(at, message))
    }
}

/// Render a journal line (including the trailing newline).
pub fn format_line(at: NaiveDateTime, message: &str) -> String {
    format!("[{}] {message}\n", at.format("%H:%M:%S"))
}

fn append_line(path: &Path, line: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|err| BotError::write(path, err))?;
    file.write_all(line.as_bytes())
        .map_err(|err| BotError::write(path, err))
}
