//! Heuristic extension classification of completion text.

use crate::core::types::Extension;

/// Marker that opens or closes a fenced block.
pub const FENCE: &str = "```";

/// A single classification rule: the first rule whose predicate matches wins.
struct Rule {
    matches: fn(&str) -> bool,
    extension: Extension,
}

const RULES: &[Rule] = &[
    Rule {
        matches: |text| text.contains("```python"),
        extension: Extension::Script,
    },
    Rule {
        matches: |text| text.contains("```html"),
        extension: Extension::Markup,
    },
    Rule {
        matches: |text| text.contains(FENCE),
        extension: Extension::Text,
    },
    Rule {
        // `##` is covered by `#`.
        matches: |text| text.trim().starts_with('#'),
        extension: Extension::Document,
    },
];

/// Classify `text` into a file extension.
///
/// Rules are evaluated top-down:
/// - a `python`-tagged fence → [`Extension::Script`]
/// - an `html`-tagged fence → [`Extension::Markup`]
/// - any other fence → [`Extension::Text`]
/// - a leading heading marker → [`Extension::Document`]
/// - otherwise [`Extension::Text`]
pub fn classify(text: &str) -> Extension {
    RULES
        .iter()
        .find(|rule| (rule.matches)(text))
        .map_or(Extension::Text, |rule| rule.extension)
}
