//! Context tracker: drives one document kind over a paragraph stream.

use super::context::{ParseContext, Step, Subsection};
use super::kinds::{rules_for, KindRules};
use super::matcher::Matcher;
use super::options::ParseOptions;
use super::report::{Diagnostic, ExtractionReport};
use super::store::RecordStore;
use crate::error::Result;
use crate::model::{DocKind, HelpDocument, Paragraph, Separator};

/// Single-pass state machine that turns paragraphs into records.
///
/// The tracker owns its context and store. Paragraphs are fed in document
/// order; each one is classified by the kind's rules and the resulting
/// [`Step`] is applied.
pub struct ContextTracker {
    rules: Box<dyn KindRules>,
    matcher: Matcher,
    ctx: ParseContext,
    store: RecordStore,
    report: ExtractionReport,
    skip_empty: bool,
}

impl ContextTracker {
    /// Create a tracker for one document kind.
    pub fn new(kind: DocKind, options: &ParseOptions) -> Result<Self> {
        Ok(Self {
            rules: rules_for(kind, &options.styles),
            matcher: Matcher::new(options.property_separators.as_slice())?,
            ctx: ParseContext::new(),
            store: RecordStore::new(kind),
            report: ExtractionReport::new(kind),
            skip_empty: options.skip_empty,
        })
    }

    pub fn kind(&self) -> DocKind {
        self.rules.kind()
    }

    /// Current parse context.
    pub fn context(&self) -> &ParseContext {
        &self.ctx
    }

    /// Records built so far.
    pub fn document(&self) -> &HelpDocument {
        self.store.document()
    }

    pub fn report(&self) -> &ExtractionReport {
        &self.report
    }

    /// Consume one paragraph.
    pub fn feed(&mut self, paragraph: &Paragraph) {
        self.report.paragraph_count += 1;

        let step = self.rules.classify(paragraph, &self.ctx, &self.matcher);

        // An empty spacer may still close the open entry, but never adds
        // text or reports a failed heading.
        if self.skip_empty && paragraph.is_empty() {
            if step == Step::Close {
                self.ctx.close();
            }
            self.report.skipped_count += 1;
            return;
        }

        match step {
            Step::Owner(name) => {
                if self.store.open_owner(&name) {
                    log::debug!("New {} owner {:?}", self.kind(), name);
                } else {
                    log::debug!("Re-entering {} owner {:?}", self.kind(), name);
                }
                self.ctx.enter_owner(name);
                self.report.owner_count += 1;
            }
            Step::Subsection(subsection) => {
                self.ctx.enter_subsection(subsection);
            }
            Step::Declare(declarations) => {
                for declaration in declarations {
                    if let Some(handle) = self.store.declare(declaration) {
                        self.ctx.open(handle);
                        self.report.declaration_count += 1;
                    }
                }
            }
            Step::Describe { text, separator } => {
                self.describe(paragraph, &text, separator);
            }
            Step::Close => {
                self.ctx.close();
                self.report.skipped_count += 1;
            }
            Step::Unmatched { heading } => {
                log::debug!(
                    "No {} pattern matched [{}] {:?}",
                    heading,
                    paragraph.style,
                    paragraph.text
                );
                self.report.diagnostics.push(Diagnostic::unmatched(
                    heading,
                    &paragraph.style,
                    &paragraph.text,
                ));
            }
            Step::Skip => {
                self.report.skipped_count += 1;
            }
        }
    }

    /// Consume every paragraph of a stream.
    pub fn feed_all<I>(&mut self, paragraphs: I)
    where
        I: IntoIterator<Item = Paragraph>,
    {
        for paragraph in paragraphs {
            self.feed(&paragraph);
        }
    }

    fn describe(&mut self, paragraph: &Paragraph, text: &str, separator: Separator) {
        if let Some(handle) = self.ctx.open_entry() {
            if self.store.append(handle, text, separator) {
                self.report.description_count += 1;
            } else {
                log::warn!("Open entry {:?} is missing from the store", handle);
            }
            return;
        }

        let diagnostic = match (self.kind(), self.ctx.subsection(), self.ctx.owner()) {
            (DocKind::Classes, Subsection::Properties, Some(class)) => {
                let diagnostic =
                    Diagnostic::orphan_property(class, self.ctx.last_property(), text);
                log::warn!("{}", diagnostic);
                diagnostic
            }
            _ => {
                let diagnostic = Diagnostic::orphan(&paragraph.style, text);
                log::debug!("{}", diagnostic);
                diagnostic
            }
        };
        self.report.diagnostics.push(diagnostic);
    }

    /// Finish the stream and hand back the records and the report.
    pub fn finish(self) -> (HelpDocument, ExtractionReport) {
        let report = self.report;
        log::info!(
            "Extracted {} {} entries from {} paragraphs ({} diagnostics)",
            self.store.document().entry_count(),
            report.kind,
            report.paragraph_count,
            report.diagnostics.len()
        );
        (self.store.into_document(), report)
    }
}
