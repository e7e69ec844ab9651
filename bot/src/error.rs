//! Error taxonomy for the prompt cycle.
//!
//! Every failure either stops the process before the cycle starts (`Config`,
//! `SourceMissing`, `CorruptState`) or aborts the current iteration without
//! advancing persisted state (`Api`, `Write`).

use std::io;
use std::path::PathBuf;

/// Top-level error for bot operations.
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    /// Configuration file missing, unparseable, or incomplete.
    #[error("configuration error in {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// Prompt file does not exist.
    #[error("prompt file not found: {path}")]
    SourceMissing { path: PathBuf },

    /// Prompt file exists but cannot be read.
    #[error("read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// State file exists but cannot be read or parsed. Progress is never reset.
    #[error("state file {path} is corrupt: {message}")]
    CorruptState { path: PathBuf, message: String },

    /// Completion service failure.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Filesystem failure while writing an artifact, the journal, or state.
    #[error("write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Operator input closed while awaiting confirmation.
    #[error("operator input closed while awaiting confirmation")]
    InputClosed,
}

impl BotError {
    pub(crate) fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}

/// Failures talking to the chat-completion service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("missing API credential: environment variable {var} is not set")]
    MissingCredential { var: String },

    #[error("completion service rejected the credential (HTTP {status}): {message}")]
    Unauthorized { status: u16, message: String },

    #[error("completion request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("completion service returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("malformed completion response: {0}")]
    Malformed(String),
}

pub type Result<T, E = BotError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display_is_transparent() {
        let err = BotError::from(ApiError::MissingCredential {
            var: "OPENAI_API_KEY".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "missing API credential: environment variable OPENAI_API_KEY is not set"
        );
    }

    #[test]
    fn write_error_names_path() {
        let err = BotError::write(
            "out/a.txt",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "write out/a.txt: denied");
    }
}
