//! Test-only helpers: scripted collaborators and a temporary working directory.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use tempfile::TempDir;

use crate::error::{ApiError, BotError, Result};
use crate::io::clock::Clock;
use crate::io::completion::Completion;
use crate::io::config::{BotConfig, DEFAULT_API_BASE_URL, DEFAULT_API_KEY_ENV};
use crate::io::confirm::ConfirmationGate;
use crate::io::journal::Journal;
use crate::io::paths::BotPaths;
use crate::io::state::{BotState, load_state, save_state};

/// One scripted completion result.
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    Text(String),
    /// Fails with a 503 `ApiError::Status` carrying this message.
    Fail(String),
}

/// Completion that replays queued replies and records every prompt it sees.
#[derive(Debug, Default)]
pub struct ScriptedCompletion {
    replies: RefCell<VecDeque<ScriptedReply>>,
    calls: RefCell<Vec<String>>,
}

impl ScriptedCompletion {
    pub fn new(replies: Vec<ScriptedReply>) -> Self {
        Self {
            replies: RefCell::new(replies.into()),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            texts
                .into_iter()
                .map(|t| ScriptedReply::Text(t.into()))
                .collect(),
        )
    }

    pub fn failures<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            messages
                .into_iter()
                .map(|m| ScriptedReply::Fail(m.into()))
                .collect(),
        )
    }

    /// Prompts received so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl Completion for ScriptedCompletion {
    fn complete(&self, prompt: &str) -> Result<String, ApiError> {
        self.calls.borrow_mut().push(prompt.to_string());
        match self.replies.borrow_mut().pop_front() {
            Some(ScriptedReply::Text(text)) => Ok(text),
            Some(ScriptedReply::Fail(message)) => Err(ApiError::Status {
                status: 503,
                message,
            }),
            None => Err(ApiError::Malformed("no scripted reply left".to_string())),
        }
    }
}

/// Gate that confirms immediately, optionally only a limited number of times.
#[derive(Debug, Default)]
pub struct ScriptedGate {
    limit: Option<usize>,
    confirmations: usize,
}

impl ScriptedGate {
    pub fn unlimited() -> Self {
        Self::default()
    }

    /// Confirm `limit` times, then report closed input.
    pub fn limited(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            confirmations: 0,
        }
    }

    pub fn confirmations(&self) -> usize {
        self.confirmations
    }
}

impl ConfirmationGate for ScriptedGate {
    fn wait(&mut self) -> Result<()> {
        if self.limit.is_some_and(|limit| self.confirmations >= limit) {
            return Err(BotError::InputClosed);
        }
        self.confirmations += 1;
        Ok(())
    }
}

/// Clock pinned to a single instant (2026-10-19 14:30:00 by default).
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Default for FixedClock {
    fn default() -> Self {
        let at = NaiveDate::from_ymd_opt(2026, 10, 19)
            .and_then(|d| d.and_hms_opt(14, 30, 0))
            .expect("valid fixed datetime");
        Self(at)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Temporary working directory with the standard bot layout.
pub struct TestWorkspace {
    _temp: TempDir,
    paths: BotPaths,
}

impl TestWorkspace {
    pub fn new() -> io::Result<Self> {
        let temp = tempfile::tempdir()?;
        let paths = BotPaths::new(temp.path());
        Ok(Self { _temp: temp, paths })
    }

    pub fn root(&self) -> &Path {
        &self.paths.root
    }

    pub fn paths(&self) -> &BotPaths {
        &self.paths
    }

    /// Config writing artifacts to `<root>/out/demo`.
    pub fn config(&self) -> BotConfig {
        BotConfig {
            output_root: PathBuf::from("out"),
            project_name: "demo".to_string(),
            model_identifier: "test-model".to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            request_timeout_secs: 5,
        }
    }

    pub fn write_config(&self, contents: &str) -> io::Result<()> {
        fs::write(&self.paths.config_path, contents)
    }

    pub fn write_prompts(&self, contents: &str) -> io::Result<()> {
        fs::write(&self.paths.prompts_path, contents)
    }

    pub fn write_state(&self, state: &BotState) -> Result<()> {
        save_state(&self.paths.state_path, state)
    }

    pub fn read_state(&self) -> Result<BotState> {
        load_state(&self.paths.state_path)
    }

    /// Journal contents for the clock's day.
    pub fn read_journal(&self, clock: &impl Clock) -> io::Result<String> {
        fs::read_to_string(Journal::new(&self.paths.log_dir).path_for(clock.now()))
    }

    /// Dated artifact folder for the clock's day under the default config.
    pub fn artifact_dir(&self, clock: &impl Clock) -> PathBuf {
        self.config()
            .project_dir(self.root())
            .join(clock.now().format("%Y-%m-%d").to_string())
    }
}
