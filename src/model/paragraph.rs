//! Paragraph type produced by the stream normalizer.

use serde::{Deserialize, Serialize};

/// A paragraph of help text together with the style tag it carried in the
/// source markup.
///
/// The style tag is opaque (`p1`, `p4`, ...). What it means is decided by
/// the style tables of the document kind being extracted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Paragraph text, trimmed. May contain embedded newlines where the
    /// source used line breaks.
    pub text: String,

    /// Style tag (first class name of the source element, or empty)
    pub style: String,
}

impl Paragraph {
    /// Create a new paragraph.
    pub fn new(text: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: style.into(),
        }
    }

    /// Create a paragraph without a style tag.
    pub fn unstyled(text: impl Into<String>) -> Self {
        Self::new(text, "")
    }

    /// Check if the paragraph has no visible text.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Iterate over the logical lines of the paragraph, trimmed, skipping
    /// blank ones.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n').map(str::trim).filter(|l| !l.is_empty())
    }
}

impl From<(&str, &str)> for Paragraph {
    fn from((text, style): (&str, &str)) -> Self {
        Self::new(text, style)
    }
}
