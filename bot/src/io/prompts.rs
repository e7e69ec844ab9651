//! Prompt source (`prompts.txt`): one prompt per line.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;

use crate::error::{BotError, Result};

/// Read prompts from `path`.
///
/// Blank and whitespace-only lines are dropped; remaining lines are trimmed
/// and returned in file order.
pub fn read_prompts(path: &Path) -> Result<Vec<String>> {
    let contents = fs::read_to_string(path).map_err(|err| match err.kind() {
        ErrorKind::NotFound => BotError::SourceMissing {
            path: path.to_path_buf(),
        },
        _ => BotError::Read {
            path: path.to_path_buf(),
            source: err,
        },
    })?;
    let prompts = parse_prompts(&contents);
    debug!(path = %path.display(), count = prompts.len(), "prompts loaded");
    Ok(prompts)
}

/// Split prompt file contents into non-empty trimmed lines.
pub fn parse_prompts(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
