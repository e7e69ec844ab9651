//! I/O adapters for the prompt cycle.

pub mod clock;
pub mod completion;
pub mod config;
pub mod confirm;
pub mod journal;
pub mod paths;
pub mod prompts;
pub mod state;
pub mod writer;
