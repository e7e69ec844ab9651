//! Artifact file-name derivation.

use crate::core::types::Extension;

/// Derive an artifact file name from a prompt: spaces become underscores, the
/// result is lowercased, and `extension` is appended.
///
/// No other characters are rewritten.
pub fn artifact_file_name(name_hint: &str, extension: Extension) -> String {
    let mut name = name_hint.replace(' ', "_").to_lowercase();
    name.push_str(extension.as_str());
    name
}
