//! Operator-gated prompt automation loop.
//!
//! Reads prompts from `prompts.txt`, sends each to a chat-completion service,
//! saves the reply as an artifact under a dated project folder, records
//! progress in `state.json`, and waits for the operator before moving on.
//!
//! - **[`core`]**: Pure, deterministic logic (classification, fence stripping,
//!   naming). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting adapters (files, HTTP, stdin, clock), behind
//!   traits where tests need to substitute them.
//!
//! [`cycle`] coordinates the two to run the loop.

pub mod core;
pub mod cycle;
pub mod error;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
