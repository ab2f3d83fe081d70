//! Single-level pages: operators, types and callbacks.
//!
//! These kinds share one shape: an `ITEM:` heading opens an entry and the
//! paragraphs after it describe that entry.

use super::KindRules;
use crate::model::{DocKind, Paragraph, Separator};
use crate::parser::context::{Declaration, ParseContext, Step};
use crate::parser::matcher::Matcher;
use crate::parser::options::EntryStyles;

/// Marker every operator heading carries.
const ITEM_MARKER: &str = "ITEM: ";

/// Rules for operator, type and callback pages.
#[derive(Debug, Clone)]
pub struct EntryRules {
    kind: DocKind,
    styles: EntryStyles,
}

impl EntryRules {
    pub fn operators(styles: EntryStyles) -> Self {
        Self {
            kind: DocKind::Operators,
            styles,
        }
    }

    pub fn types(styles: EntryStyles) -> Self {
        Self {
            kind: DocKind::Types,
            styles,
        }
    }

    pub fn callbacks(styles: EntryStyles) -> Self {
        Self {
            kind: DocKind::Callbacks,
            styles,
        }
    }

    /// Operator headings can use any style, so only paragraphs carrying
    /// the item marker are candidates.
    fn is_heading_candidate(&self, paragraph: &Paragraph) -> bool {
        if !self.styles.declaration.contains(&paragraph.style) {
            return false;
        }
        self.kind != DocKind::Operators || paragraph.text.contains(ITEM_MARKER)
    }

    fn heading(&self, text: &str, matcher: &Matcher) -> Step {
        let declaration = match self.kind {
            DocKind::Operators => matcher
                .operator(text)
                .map(|found| Declaration::Operator {
                    key: found.name,
                    signature: found.signature,
                }),
            DocKind::Types => matcher
                .type_heading(text)
                .map(|name| Declaration::Type { name }),
            DocKind::Callbacks => {
                matcher
                    .callback_heading(text)
                    .map(|found| Declaration::Callback {
                        key: found.name,
                        signature: found.signature,
                    })
            }
            DocKind::Classes | DocKind::Functions => None,
        };

        match declaration {
            Some(decl) => Step::Declare(vec![decl]),
            None => Step::Unmatched {
                heading: self.heading_name(),
            },
        }
    }

    fn heading_name(&self) -> &'static str {
        match self.kind {
            DocKind::Operators => "operator",
            DocKind::Types => "type",
            DocKind::Callbacks => "callback",
            DocKind::Classes => "class",
            DocKind::Functions => "function",
        }
    }
}

impl KindRules for EntryRules {
    fn kind(&self) -> DocKind {
        self.kind
    }

    fn classify(&self, paragraph: &Paragraph, _ctx: &ParseContext, matcher: &Matcher) -> Step {
        if self.is_heading_candidate(paragraph) {
            return self.heading(&paragraph.text, matcher);
        }

        if self.styles.description.contains(&paragraph.style) {
            return Step::Describe {
                text: paragraph.text.clone(),
                separator: Separator::Space,
            };
        }

        if self.styles.close_on_other {
            Step::Close
        } else {
            Step::Skip
        }
    }
}
