//! Class pages: `Class X` → constructor, properties and methods.

use super::KindRules;
use crate::model::{DocKind, Paragraph, Separator};
use crate::parser::context::{Declaration, ParseContext, Step, Subsection};
use crate::parser::matcher::Matcher;
use crate::parser::options::ClassStyles;

/// Rules for class pages.
#[derive(Debug, Clone)]
pub struct ClassRules {
    styles: ClassStyles,
}

impl ClassRules {
    pub fn new(styles: ClassStyles) -> Self {
        Self { styles }
    }

    fn subsection(text: &str) -> Option<Subsection> {
        let lower = text.to_lowercase();
        if lower.contains("properties") {
            Some(Subsection::Properties)
        } else if lower.contains("methods") {
            Some(Subsection::Methods)
        } else {
            None
        }
    }

    fn declaration(
        &self,
        paragraph: &Paragraph,
        ctx: &ParseContext,
        class: &str,
        matcher: &Matcher,
    ) -> Option<Step> {
        let style = paragraph.style.as_str();
        let text = paragraph.text.as_str();

        if self.styles.constructor.contains(style) {
            if let Some(signature) = matcher.constructor(class, text) {
                return Some(Step::Declare(vec![Declaration::Constructor {
                    class: class.to_string(),
                    signature,
                }]));
            }
        }

        match ctx.subsection() {
            Subsection::Properties if self.styles.property.contains(style) => {
                Some(match matcher.property(text) {
                    Some(found) => Step::Declare(vec![Declaration::Property {
                        class: class.to_string(),
                        name: found.name,
                        type_name: found.type_name,
                    }]),
                    None => Step::Unmatched {
                        heading: "property",
                    },
                })
            }
            Subsection::Methods if self.styles.method.contains(style) => {
                Some(match matcher.method(text) {
                    Some(found) => Step::Declare(vec![Declaration::Method {
                        class: class.to_string(),
                        name: found.name,
                        signature: found.signature,
                    }]),
                    None => Step::Unmatched { heading: "method" },
                })
            }
            _ => None,
        }
    }
}

impl KindRules for ClassRules {
    fn kind(&self) -> DocKind {
        DocKind::Classes
    }

    fn classify(&self, paragraph: &Paragraph, ctx: &ParseContext, matcher: &Matcher) -> Step {
        let style = paragraph.style.as_str();

        if self.styles.owner.contains(style) {
            return match matcher.class_heading(&paragraph.text) {
                Some(name) => Step::Owner(name),
                None => Step::Unmatched { heading: "class" },
            };
        }

        if self.styles.subsection.contains(style) {
            return match Self::subsection(&paragraph.text) {
                Some(kind) => Step::Subsection(kind),
                None => Step::Unmatched {
                    heading: "subsection",
                },
            };
        }

        let Some(class) = ctx.owner() else {
            return Step::Skip;
        };

        if let Some(step) = self.declaration(paragraph, ctx, class, matcher) {
            return step;
        }

        if self.styles.description.contains(style) {
            return Step::Describe {
                text: paragraph.text.clone(),
                separator: Separator::Space,
            };
        }

        // Example code only belongs to methods.
        if self.styles.example.contains(style) && ctx.subsection() == Subsection::Methods {
            return Step::Describe {
                text: paragraph.text.clone(),
                separator: Separator::Newline,
            };
        }

        Step::Skip
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::context::EntryHandle;
    use crate::parser::options::{ClassPreset, DEFAULT_PROPERTY_SEPARATORS};

    fn setup(preset: ClassPreset) -> (ClassRules, Matcher) {
        (
            ClassRules::new(ClassStyles::preset(preset)),
            Matcher::new(DEFAULT_PROPERTY_SEPARATORS).unwrap(),
        )
    }

    fn in_class(subsection: Subsection) -> ParseContext {
        let mut ctx = ParseContext::new();
        ctx.enter_owner("Foo");
        ctx.enter_subsection(subsection);
        ctx
    }

    #[test]
    fn test_class_heading_and_subsections() {
        let (rules, matcher) = setup(ClassPreset::Eidos);
        let ctx = ParseContext::new();

        let step = rules.classify(&Paragraph::new("Class Foo", "p1"), &ctx, &matcher);
        assert_eq!(step, Step::Owner("Foo".to_string()));

        let step = rules.classify(&Paragraph::new("Foo properties", "p2"), &ctx, &matcher);
        assert_eq!(step, Step::Subsection(Subsection::Properties));

        let step = rules.classify(&Paragraph::new("Foo METHODS", "p11"), &ctx, &matcher);
        assert_eq!(step, Step::Subsection(Subsection::Methods));

        let step = rules.classify(&Paragraph::new("Overview", "p9"), &ctx, &matcher);
        assert!(matches!(step, Step::Unmatched { .. }));
    }

    #[test]
    fn test_paragraphs_before_first_class_are_skipped() {
        let (rules, matcher) = setup(ClassPreset::Eidos);
        let step = rules.classify(
            &Paragraph::new("(void)bar(void)", "p3"),
            &ParseContext::new(),
            &matcher,
        );
        assert_eq!(step, Step::Skip);
    }

    #[test]
    fn test_constructor_wins_over_subsection() {
        let (rules, matcher) = setup(ClassPreset::Eidos);
        let ctx = in_class(Subsection::Methods);
        let step = rules.classify(
            &Paragraph::new("(object<Foo>$)Foo(void)", "p3"),
            &ctx,
            &matcher,
        );
        assert!(matches!(
            step,
            Step::Declare(ref decls) if matches!(decls[0], Declaration::Constructor { .. })
        ));
    }

    #[test]
    fn test_property_declaration_requires_properties_subsection() {
        let (rules, matcher) = setup(ClassPreset::Eidos);
        let p = Paragraph::new("tag <–> (integer$)", "p3");

        let step = rules.classify(&p, &in_class(Subsection::Properties), &matcher);
        assert_eq!(
            step,
            Step::Declare(vec![Declaration::Property {
                class: "Foo".to_string(),
                name: "tag".to_string(),
                type_name: "integer$".to_string(),
            }])
        );

        let step = rules.classify(&p, &in_class(Subsection::None), &matcher);
        assert_eq!(step, Step::Skip);
    }

    #[test]
    fn test_eidos_p5_is_example_inside_methods() {
        let (rules, matcher) = setup(ClassPreset::Eidos);
        let mut ctx = in_class(Subsection::Methods);
        ctx.open(EntryHandle::Method {
            class: "Foo".to_string(),
            name: "bar".to_string(),
        });
        let step = rules.classify(&Paragraph::new("x = bar();", "p5"), &ctx, &matcher);
        assert_eq!(
            step,
            Step::Describe {
                text: "x = bar();".to_string(),
                separator: Separator::Newline,
            }
        );
    }

    #[test]
    fn test_slim_p5_is_method_declaration() {
        let (rules, matcher) = setup(ClassPreset::Slim);
        let ctx = in_class(Subsection::Methods);
        let step = rules.classify(&Paragraph::new("– (void)bar(void)", "p5"), &ctx, &matcher);
        assert!(matches!(step, Step::Declare(_)));
    }

    #[test]
    fn test_unmatched_method_candidate() {
        let (rules, matcher) = setup(ClassPreset::Eidos);
        let step = rules.classify(
            &Paragraph::new("not a signature", "p3"),
            &in_class(Subsection::Methods),
            &matcher,
        );
        assert_eq!(step, Step::Unmatched { heading: "method" });
    }
}
