//! Canonical file layout of a bot working directory.

use std::path::PathBuf;

/// All canonical paths within a working directory.
#[derive(Debug, Clone)]
pub struct BotPaths {
    pub root: PathBuf,
    pub config_path: PathBuf,
    pub prompts_path: PathBuf,
    pub state_path: PathBuf,
    pub log_dir: PathBuf,
}

impl BotPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            root: root.clone(),
            config_path: root.join("config.toml"),
            prompts_path: root.join("prompts.txt"),
            state_path: root.join("state.json"),
            log_dir: root.join("logs"),
        }
    }
}
