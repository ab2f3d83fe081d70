//! Function pages: numbered sections → overloaded function signatures.

use super::KindRules;
use crate::model::{DocKind, Paragraph, Separator};
use crate::parser::context::{Declaration, ParseContext, Step};
use crate::parser::matcher::Matcher;
use crate::parser::options::FunctionStyles;

/// Rules for function pages.
#[derive(Debug, Clone)]
pub struct FunctionRules {
    styles: FunctionStyles,
}

impl FunctionRules {
    pub fn new(styles: FunctionStyles) -> Self {
        Self { styles }
    }

    /// A signature block may hold several overloads, one per line.
    fn signatures(&self, section: &str, paragraph: &Paragraph, matcher: &Matcher) -> Step {
        let mut declarations = Vec::new();
        for line in paragraph.lines() {
            match matcher.function(line) {
                Some(found) => declarations.push(Declaration::Function {
                    section: section.to_string(),
                    name: found.name,
                    signature: found.signature,
                }),
                None => log::debug!("No function signature in line {:?}", line),
            }
        }

        if declarations.is_empty() {
            Step::Unmatched {
                heading: "function",
            }
        } else {
            Step::Declare(declarations)
        }
    }
}

impl KindRules for FunctionRules {
    fn kind(&self) -> DocKind {
        DocKind::Functions
    }

    fn classify(&self, paragraph: &Paragraph, ctx: &ParseContext, matcher: &Matcher) -> Step {
        let style = paragraph.style.as_str();

        if self.styles.owner.contains(style) {
            return match matcher.section_heading(&paragraph.text) {
                Some(section) => Step::Owner(section),
                None => Step::Unmatched { heading: "section" },
            };
        }

        if self.styles.declaration.contains(style) {
            return match ctx.owner() {
                Some(section) => self.signatures(section, paragraph, matcher),
                None => Step::Skip,
            };
        }

        if self.styles.description.contains(style) {
            return Step::Describe {
                text: paragraph.text.clone(),
                separator: Separator::Space,
            };
        }

        Step::Skip
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::options::DEFAULT_PROPERTY_SEPARATORS;

    fn setup() -> (FunctionRules, Matcher, ParseContext) {
        let mut ctx = ParseContext::new();
        ctx.enter_owner("Math functions");
        (
            FunctionRules::new(FunctionStyles::default()),
            Matcher::new(DEFAULT_PROPERTY_SEPARATORS).unwrap(),
            ctx,
        )
    }

    #[test]
    fn test_section_heading() {
        let (rules, matcher, _) = setup();
        let step = rules.classify(
            &Paragraph::new("3.1. Math functions", "p1"),
            &ParseContext::new(),
            &matcher,
        );
        assert_eq!(step, Step::Owner("Math functions".to_string()));

        let step = rules.classify(
            &Paragraph::new("Math functions", "p1"),
            &ParseContext::new(),
            &matcher,
        );
        assert_eq!(step, Step::Unmatched { heading: "section" });
    }

    #[test]
    fn test_multiline_signature_block() {
        let (rules, matcher, ctx) = setup();
        let p = Paragraph::new("(float)abs(float x)\n(integer)abs(integer x)", "p2");
        match rules.classify(&p, &ctx, &matcher) {
            Step::Declare(decls) => {
                assert_eq!(decls.len(), 2);
                assert_eq!(
                    decls[1],
                    Declaration::Function {
                        section: "Math functions".to_string(),
                        name: "abs".to_string(),
                        signature: "(integer)abs(integer x)".to_string(),
                    }
                );
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_bad_lines_are_dropped() {
        let (rules, matcher, ctx) = setup();
        let p = Paragraph::new("(float)sqrt(float x)\nsee also: exp", "p4");
        match rules.classify(&p, &ctx, &matcher) {
            Step::Declare(decls) => assert_eq!(decls.len(), 1),
            other => panic!("unexpected {other:?}"),
        }

        let p = Paragraph::new("no signatures here", "p4");
        assert_eq!(
            rules.classify(&p, &ctx, &matcher),
            Step::Unmatched {
                heading: "function"
            }
        );
    }

    #[test]
    fn test_signature_before_section_is_skipped() {
        let (rules, matcher, _) = setup();
        let p = Paragraph::new("(float)abs(float x)", "p2");
        assert_eq!(
            rules.classify(&p, &ParseContext::new(), &matcher),
            Step::Skip
        );
    }
}
