//! Help page parsing module.
//!
//! A page is read as a stream of styled paragraphs ([`HtmlSource`]) and
//! fed to a [`ContextTracker`], which classifies each paragraph with the
//! rules for one document kind and builds the records.

mod context;
mod html;
pub mod kinds;
mod matcher;
mod options;
mod report;
mod store;
mod tracker;

pub use context::{Declaration, EntryHandle, ParseContext, Step, Subsection};
pub use html::HtmlSource;
pub use kinds::{rules_for, KindRules};
pub use matcher::{Matcher, PropertyMatch, SignatureMatch, UNKNOWN_TYPE};
pub use options::{
    ClassPreset, ClassStyles, EntryStyles, FunctionStyles, ParseOptions, StyleSet, StyleTables,
    ANY_STYLE, DEFAULT_PROPERTY_SEPARATORS,
};
pub use report::{Diagnostic, ExtractionReport};
pub use store::RecordStore;
pub use tracker::ContextTracker;
