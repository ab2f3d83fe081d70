//! Data model for extracted help documentation.
//!
//! [`Paragraph`] is the input unit consumed by the parser; the record types
//! and [`HelpDocument`] are the structured output.

mod document;
mod paragraph;
mod record;

pub use document::{DocKind, FunctionSections, HelpDocument};
pub use paragraph::Paragraph;
pub use record::{
    append_description, CallbackRecord, ClassRecord, ConstructorRecord, FunctionRecord,
    MethodRecord, OperatorRecord, PropertyRecord, Separator, TypeRecord,
};
