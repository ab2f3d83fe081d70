//! Per-kind paragraph classifiers.
//!
//! Each document kind has its own style table and pattern vocabulary but
//! drives the same [`ContextTracker`](super::ContextTracker). A classifier
//! turns one paragraph into one [`Step`], looking at the current context
//! only to resolve style tags whose meaning depends on it.

mod classes;
mod entries;
mod functions;

pub use classes::ClassRules;
pub use entries::EntryRules;
pub use functions::FunctionRules;

use super::context::{ParseContext, Step};
use super::matcher::Matcher;
use super::options::StyleTables;
use crate::model::{DocKind, Paragraph};

/// Classification rules for one document kind.
pub trait KindRules: Send + Sync {
    /// Kind of document these rules extract.
    fn kind(&self) -> DocKind;

    /// Decide what a paragraph means in the given context.
    fn classify(&self, paragraph: &Paragraph, ctx: &ParseContext, matcher: &Matcher) -> Step;
}

/// Build the rules for a kind from the style tables.
pub fn rules_for(kind: DocKind, styles: &StyleTables) -> Box<dyn KindRules> {
    match kind {
        DocKind::Classes => Box::new(ClassRules::new(styles.classes.clone())),
        DocKind::Functions => Box::new(FunctionRules::new(styles.functions.clone())),
        DocKind::Operators => Box::new(EntryRules::operators(styles.operators.clone())),
        DocKind::Types => Box::new(EntryRules::types(styles.types.clone())),
        DocKind::Callbacks => Box::new(EntryRules::callbacks(styles.callbacks.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_for_every_kind() {
        let styles = StyleTables::default();
        for kind in DocKind::ALL {
            assert_eq!(rules_for(kind, &styles).kind(), kind);
        }
    }
}
