// src/model/rich_text.rs

use serde::{Deserialize, Serialize};

/// Style flags on a rich-text run. Each flag is independent; the markup
/// converter decides how they nest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub code: bool,
    pub strikethrough: bool,
}

/// A styled text fragment with independent formatting flags and an
/// optional hyperlink target. Mentions and equations collapse to their
/// plain-text rendering at parse time, so every run carries usable text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichTextRun {
    pub text: String,
    pub annotations: Annotations,
    pub href: Option<String>,
}

impl RichTextRun {
    /// Create a plain unstyled run — the most common variant, and the
    /// vocabulary for building rich text in fixtures and builders.
    #[allow(dead_code)]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            annotations: Annotations::default(),
            href: None,
        }
    }

    /// Concatenated plain text of a run sequence, styling ignored.
    pub fn plain_text_of(runs: &[RichTextRun]) -> String {
        runs.iter().map(|r| r.text.as_str()).collect()
    }
}
