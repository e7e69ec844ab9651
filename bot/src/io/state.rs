//! Cycle state storage (`state.json`).

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{BotError, Result};

/// Persisted resume position and history of produced artifacts.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BotState {
    /// Index of the next prompt to run. Never decreases.
    pub next_prompt_index: usize,
    /// Artifact paths in the order they were written.
    pub produced_file_paths: Vec<String>,
}

impl BotState {
    /// Record a written artifact and move to the next prompt.
    pub fn advance(&mut self, artifact_path: String) {
        self.produced_file_paths.push(artifact_path);
        self.next_prompt_index += 1;
    }
}

/// Load state from disk.
///
/// A missing file yields `BotState::default()`. A file that exists but cannot
/// be read or parsed is a `CorruptState` error; progress is never reset.
pub fn load_state(path: &Path) -> Result<BotState> {
    debug!(path = %path.display(), "loading state");
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!("state file missing, starting from defaults");
            return Ok(BotState::default());
        }
        Err(err) => {
            return Err(BotError::CorruptState {
                path: path.to_path_buf(),
                message: err.to_string(),
            });
        }
    };
    let state: BotState =
        serde_json::from_str(&contents).map_err(|err| BotError::CorruptState {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
    debug!(
        next_prompt_index = state.next_prompt_index,
        produced = state.produced_file_paths.len(),
        "state loaded"
    );
    Ok(state)
}

/// Atomically write state to disk (temp file + rename).
pub fn save_state(path: &Path, state: &BotState) -> Result<()> {
    debug!(path = %path.display(), next_prompt_index = state.next_prompt_index, "writing state");
    let mut buf = serde_json::to_string_pretty(state)
        .map_err(|err| BotError::write(path, err.into()))?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| BotError::write(parent, err))?;
    }
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, contents).map_err(|err| BotError::write(&tmp_path, err))?;
    fs::rename(&tmp_path, path).map_err(|err| BotError::write(path, err))?;
    Ok(())
}
