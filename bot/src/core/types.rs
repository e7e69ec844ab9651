//! Shared deterministic types for the bot core.
//!
//! These types define stable contracts between core components. They should not
//! depend on external state or I/O and must remain deterministic across runs.

use std::fmt;

/// File extension chosen for an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extension {
    /// Scripting source (`.py`).
    Script,
    /// Markup (`.html`).
    Markup,
    /// Document (`.md`).
    Document,
    /// Plain text (`.txt`).
    Text,
}

impl Extension {
    /// Extension including the leading dot.
    pub fn as_str(self) -> &'static str {
        match self {
            Extension::Script => ".py",
            Extension::Markup => ".html",
            Extension::Document => ".md",
            Extension::Text => ".txt",
        }
    }
}

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Phase of the cycle controller.
///
/// `Idle` loads inputs, `Running` executes one prompt, `AwaitingConfirmation`
/// blocks on the operator, `Done` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CyclePhase {
    Idle,
    Running,
    AwaitingConfirmation,
    Done,
}
