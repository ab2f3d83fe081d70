//! # slimhelp
//!
//! Extract structured reference records from SLiM and Eidos HTML help
//! pages.
//!
//! A help page is a flat sequence of styled `<p>` paragraphs. This library
//! walks that sequence once, tracking which class, section or entry is
//! currently open, and produces a nested mapping of classes, functions,
//! operators, types or callbacks that serializes to JSON.
//!
//! ## Quick Start
//!
//! ```no_run
//! use slimhelp::{parse_file, DocKind, JsonFormat};
//!
//! fn main() -> slimhelp::Result<()> {
//!     let extraction = parse_file("EidosHelpClasses.html", DocKind::Classes)?;
//!     println!("{}", extraction.to_json(JsonFormat::Pretty)?);
//!
//!     for diagnostic in &extraction.report.diagnostics {
//!         eprintln!("{}", diagnostic);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Five document kinds**: classes, functions, operators, types, callbacks
//! - **Configurable style tables**: restyled exports only need a new table
//! - **Deterministic output**: records are kept in ordered maps
//! - **Diagnostics**: unmatched headings and orphan descriptions are reported
//! - **Batch conversion**: every help page in a directory, in parallel

pub mod convert;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use convert::{run_batch, BatchJob, ConvertOptions, ConvertResult};
pub use detect::{detect_kind_from_path, detect_page_from_path, HelpPage, Product};
pub use error::{Error, Result};
pub use model::{
    CallbackRecord, ClassRecord, ConstructorRecord, DocKind, FunctionRecord, HelpDocument,
    MethodRecord, OperatorRecord, Paragraph, PropertyRecord, TypeRecord,
};
pub use parser::{
    ClassPreset, ContextTracker, Diagnostic, ExtractionReport, HtmlSource, ParseOptions,
    StyleTables,
};
pub use render::JsonFormat;

use std::path::Path;

/// Extract records of one kind from an HTML string.
///
/// # Example
///
/// ```
/// use slimhelp::{parse_str, DocKind, ParseOptions};
///
/// let html = r#"
///     <p class="p1">Class Foo</p>
///     <p class="p2">Foo methods</p>
///     <p class="p3">(void)bar(int x)</p>
///     <p class="p4">Does bar.</p>
/// "#;
/// let extraction = parse_str(html, DocKind::Classes, &ParseOptions::default()).unwrap();
/// let classes = extraction.document.classes().unwrap();
/// assert_eq!(classes["Foo"].methods["bar"].description, "Does bar.");
/// ```
pub fn parse_str(html: &str, kind: DocKind, options: &ParseOptions) -> Result<Extraction> {
    let source = HtmlSource::parse(html).with_unicode_normalization(options.normalize_unicode);
    parse_paragraphs(source.paragraphs(), kind, options)
}

/// Extract records of one kind from an already normalized paragraph
/// stream.
pub fn parse_paragraphs<I>(paragraphs: I, kind: DocKind, options: &ParseOptions) -> Result<Extraction>
where
    I: IntoIterator<Item = Paragraph>,
{
    let mut tracker = ContextTracker::new(kind, options)?;
    tracker.feed_all(paragraphs);
    let (document, report) = tracker.finish();
    Ok(Extraction { document, report })
}

/// Extract records of one kind from an HTML file with default options.
pub fn parse_file<P: AsRef<Path>>(path: P, kind: DocKind) -> Result<Extraction> {
    parse_file_with_options(path, kind, &ParseOptions::default())
}

/// Extract records of one kind from an HTML file with custom options.
///
/// # Example
///
/// ```no_run
/// use slimhelp::{parse_file_with_options, ClassPreset, DocKind, ParseOptions};
///
/// let options = ParseOptions::new().with_class_preset(ClassPreset::Slim);
/// let extraction =
///     parse_file_with_options("SLiMHelpClasses.html", DocKind::Classes, &options).unwrap();
/// println!("{} classes", extraction.document.len());
/// ```
pub fn parse_file_with_options<P: AsRef<Path>>(
    path: P,
    kind: DocKind,
    options: &ParseOptions,
) -> Result<Extraction> {
    let path = path.as_ref();
    log::debug!("Reading {} help page {}", kind, path.display());
    let html = std::fs::read_to_string(path)?;
    parse_str(&html, kind, options)
}

/// Builder for extracting help pages.
///
/// # Example
///
/// ```no_run
/// use slimhelp::{ClassPreset, DocKind, Extractor, JsonFormat};
///
/// let json = Extractor::new(DocKind::Classes)
///     .with_preset(ClassPreset::Slim)
///     .with_separators(["<–>", "=>"])
///     .parse("SLiMHelpClasses.html")?
///     .to_json(JsonFormat::Pretty)?;
/// # Ok::<(), slimhelp::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Extractor {
    kind: DocKind,
    options: ParseOptions,
}

impl Extractor {
    /// Create a new extractor for one document kind.
    pub fn new(kind: DocKind) -> Self {
        Self {
            kind,
            options: ParseOptions::default(),
        }
    }

    /// Create an extractor whose kind and class preset are detected from
    /// the file name.
    pub fn for_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let (kind, preset) = detect_kind_from_path(path)?;
        Ok(Self::new(kind).with_preset(preset))
    }

    /// Use a class style preset.
    pub fn with_preset(mut self, preset: ClassPreset) -> Self {
        self.options = self.options.with_class_preset(preset);
        self
    }

    /// Replace all style tables.
    pub fn with_styles(mut self, styles: StyleTables) -> Self {
        self.options = self.options.with_styles(styles);
        self
    }

    /// Replace the accepted property separators.
    pub fn with_separators<I, S>(mut self, separators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = self.options.with_property_separators(separators);
        self
    }

    /// Enable or disable NFC normalization.
    pub fn with_unicode_normalization(mut self, normalize: bool) -> Self {
        self.options = self.options.with_unicode_normalization(normalize);
        self
    }

    /// Keep empty paragraphs in descriptions.
    pub fn keep_empty(mut self) -> Self {
        self.options = self.options.keep_empty();
        self
    }

    pub fn kind(&self) -> DocKind {
        self.kind
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Extract an HTML file.
    pub fn parse<P: AsRef<Path>>(&self, path: P) -> Result<Extraction> {
        parse_file_with_options(path, self.kind, &self.options)
    }

    /// Extract an HTML string.
    pub fn parse_str(&self, html: &str) -> Result<Extraction> {
        parse_str(html, self.kind, &self.options)
    }
}

/// Result of extracting one help page.
#[derive(Debug, Clone)]
pub struct Extraction {
    /// The extracted records
    pub document: HelpDocument,
    /// Statistics and diagnostics
    pub report: ExtractionReport,
}

impl Extraction {
    /// Convert the records to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Convert the report to JSON.
    pub fn report_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.report, format)
    }

    pub fn kind(&self) -> DocKind {
        self.document.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extractor_builder() {
        let extractor = Extractor::new(DocKind::Classes)
            .with_preset(ClassPreset::Slim)
            .with_separators(["=>"])
            .keep_empty();

        assert_eq!(extractor.kind(), DocKind::Classes);
        assert_eq!(
            extractor.options().styles.classes,
            parser::ClassStyles::preset(ClassPreset::Slim)
        );
        assert_eq!(extractor.options().property_separators, vec!["=>"]);
        assert!(!extractor.options().skip_empty);
    }

    #[test]
    fn test_extractor_for_path() {
        let extractor = Extractor::for_path("SLiMHelpClasses.html").unwrap();
        assert_eq!(extractor.kind(), DocKind::Classes);
        assert_eq!(
            extractor.options().styles.classes,
            parser::ClassStyles::preset(ClassPreset::Slim)
        );

        assert!(Extractor::for_path("notes.html").is_err());
    }

    #[test]
    fn test_parse_file_missing() {
        let result = parse_file("does/not/exist.html", DocKind::Types);
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_empty_input_gives_empty_mapping() {
        for kind in DocKind::ALL {
            let extraction = parse_str("", kind, &ParseOptions::default()).unwrap();
            assert!(extraction.document.is_empty());
            assert_eq!(extraction.kind(), kind);
            assert_eq!(extraction.to_json(JsonFormat::Compact).unwrap(), "{}");
        }
    }

    #[test]
    fn test_extractor_parse_str() {
        let extraction = Extractor::new(DocKind::Types)
            .parse_str(r#"<p class="p1">ITEM: 1. type integer</p><p class="p2">Whole.</p>"#)
            .unwrap();
        let types = extraction.document.types().unwrap();
        assert_eq!(types["integer"].description, "Whole.");

        let report = extraction.report_json(JsonFormat::Compact).unwrap();
        assert!(report.contains("\"paragraph_count\":2"));
    }
}
