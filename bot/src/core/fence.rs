//! Fence-marker stripping for artifact content.

use crate::core::classifier::FENCE;

/// Remove a leading and a trailing fence line from `text`.
///
/// The text is trimmed and split into lines. If the first line starts with the
/// fence marker it is dropped; then, if the (new) last line starts with the
/// fence marker, it is dropped too. At most one line goes from each end: fences
/// inside the body are left alone. Remaining lines are joined with `\n`.
///
/// When neither end carries a fence the input is returned unchanged.
pub fn strip_fences(text: &str) -> String {
    let mut lines: Vec<&str> = text.trim().lines().collect();
    let opens = lines.first().is_some_and(|line| line.starts_with(FENCE));
    let closes = lines.last().is_some_and(|line| line.starts_with(FENCE));
    if !opens && !closes {
        return text.to_string();
    }

    if opens {
        lines.remove(0);
    }
    if lines.last().is_some_and(|line| line.starts_with(FENCE)) {
        lines.pop();
    }
    lines.join("\n")
}
