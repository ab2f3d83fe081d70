//! Extraction diagnostics and statistics.

use crate::model::DocKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest paragraph excerpt kept in a diagnostic.
const EXCERPT_CHARS: usize = 60;

/// A recoverable condition met while walking the paragraph stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A heading-styled paragraph matched none of the patterns
    UnmatchedHeading {
        heading: String,
        style: String,
        text: String,
    },

    /// Description text arrived while no entry was open
    OrphanDescription { style: String, text: String },

    /// Description text inside a properties subsection with no open
    /// property
    OrphanPropertyDescription {
        class: String,
        last_property: Option<String>,
        text: String,
    },
}

impl Diagnostic {
    pub(crate) fn unmatched(heading: &str, style: &str, text: &str) -> Self {
        Diagnostic::UnmatchedHeading {
            heading: heading.to_string(),
            style: style.to_string(),
            text: excerpt(text),
        }
    }

    pub(crate) fn orphan(style: &str, text: &str) -> Self {
        Diagnostic::OrphanDescription {
            style: style.to_string(),
            text: excerpt(text),
        }
    }

    pub(crate) fn orphan_property(class: &str, last_property: Option<&str>, text: &str) -> Self {
        Diagnostic::OrphanPropertyDescription {
            class: class.to_string(),
            last_property: last_property.map(str::to_string),
            text: excerpt(text),
        }
    }

    /// Whether this diagnostic is surfaced as a warning (the others are
    /// informational).
    pub fn is_warning(&self) -> bool {
        matches!(self, Diagnostic::OrphanPropertyDescription { .. })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnmatchedHeading {
                heading,
                style,
                text,
            } => write!(f, "no {heading} pattern matched [{style}] {text:?}"),
            Diagnostic::OrphanDescription { style, text } => {
                write!(f, "description with no open entry [{style}] {text:?}")
            }
            Diagnostic::OrphanPropertyDescription {
                class,
                last_property: Some(property),
                ..
            } => write!(
                f,
                "tried to add a description to non-existent property '{property}' in class '{class}'"
            ),
            Diagnostic::OrphanPropertyDescription {
                class,
                last_property: None,
                ..
            } => write!(
                f,
                "tried to add a description to a property in class '{class}' before any property was declared"
            ),
        }
    }
}

fn excerpt(text: &str) -> String {
    let first_line = text.lines().next().unwrap_or_default();
    if first_line.chars().count() > EXCERPT_CHARS {
        let cut: String = first_line.chars().take(EXCERPT_CHARS).collect();
        format!("{cut}...")
    } else {
        first_line.to_string()
    }
}

/// Statistics and diagnostics for one extraction run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionReport {
    /// Document kind extracted
    pub kind: DocKind,

    /// Paragraphs consumed
    pub paragraph_count: u32,

    /// Owner headings matched (classes or sections, duplicates included)
    pub owner_count: u32,

    /// Declarations recorded (each function overload counts)
    pub declaration_count: u32,

    /// Paragraphs appended to a description
    pub description_count: u32,

    /// Paragraphs with no meaning for this kind
    pub skipped_count: u32,

    /// Recoverable problems, in stream order
    pub diagnostics: Vec<Diagnostic>,
}

impl ExtractionReport {
    /// Create an empty report.
    pub fn new(kind: DocKind) -> Self {
        Self {
            kind,
            paragraph_count: 0,
            owner_count: 0,
            declaration_count: 0,
            description_count: 0,
            skipped_count: 0,
            diagnostics: Vec::new(),
        }
    }

    /// Number of warnings (orphan property descriptions).
    pub fn warning_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_warning()).count()
    }

    /// Number of heading candidates that matched no pattern.
    pub fn unmatched_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d, Diagnostic::UnmatchedHeading { .. }))
            .count()
    }

    /// Check if no diagnostics were recorded.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}
