//! Document-level types.

use super::{CallbackRecord, ClassRecord, FunctionRecord, OperatorRecord, TypeRecord};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Functions grouped by the section that declares them.
pub type FunctionSections = BTreeMap<String, BTreeMap<String, FunctionRecord>>;

/// The kind of help page being extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocKind {
    /// Classes with constructors, methods and properties
    Classes,
    /// Free functions grouped in sections
    Functions,
    /// Operators
    Operators,
    /// Built-in types
    Types,
    /// Callbacks and events
    Callbacks,
}

impl DocKind {
    /// All kinds, in the order the batch driver processes them.
    pub const ALL: [DocKind; 5] = [
        DocKind::Classes,
        DocKind::Functions,
        DocKind::Operators,
        DocKind::Types,
        DocKind::Callbacks,
    ];

    /// Lowercase name, as used on the command line and in output file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocKind::Classes => "classes",
            DocKind::Functions => "functions",
            DocKind::Operators => "operators",
            DocKind::Types => "types",
            DocKind::Callbacks => "callbacks",
        }
    }
}

impl fmt::Display for DocKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "classes" | "class" => Ok(DocKind::Classes),
            "functions" | "function" => Ok(DocKind::Functions),
            "operators" | "operator" => Ok(DocKind::Operators),
            "types" | "type" => Ok(DocKind::Types),
            "callbacks" | "callback" | "events" => Ok(DocKind::Callbacks),
            other => Err(Error::UnknownKind(other.to_string())),
        }
    }
}

/// The structured output of one extraction run.
///
/// Serializes as the bare top-level mapping (no variant tag), keyed by
/// class, section, operator, type or callback name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum HelpDocument {
    Classes(BTreeMap<String, ClassRecord>),
    Functions(FunctionSections),
    Operators(BTreeMap<String, OperatorRecord>),
    Types(BTreeMap<String, TypeRecord>),
    Callbacks(BTreeMap<String, CallbackRecord>),
}

impl HelpDocument {
    /// Create an empty document of the given kind.
    pub fn new(kind: DocKind) -> Self {
        match kind {
            DocKind::Classes => HelpDocument::Classes(BTreeMap::new()),
            DocKind::Functions => HelpDocument::Functions(BTreeMap::new()),
            DocKind::Operators => HelpDocument::Operators(BTreeMap::new()),
            DocKind::Types => HelpDocument::Types(BTreeMap::new()),
            DocKind::Callbacks => HelpDocument::Callbacks(BTreeMap::new()),
        }
    }

    /// Get the document kind.
    pub fn kind(&self) -> DocKind {
        match self {
            HelpDocument::Classes(_) => DocKind::Classes,
            HelpDocument::Functions(_) => DocKind::Functions,
            HelpDocument::Operators(_) => DocKind::Operators,
            HelpDocument::Types(_) => DocKind::Types,
            HelpDocument::Callbacks(_) => DocKind::Callbacks,
        }
    }

    /// Number of top-level keys.
    pub fn len(&self) -> usize {
        match self {
            HelpDocument::Classes(m) => m.len(),
            HelpDocument::Functions(m) => m.len(),
            HelpDocument::Operators(m) => m.len(),
            HelpDocument::Types(m) => m.len(),
            HelpDocument::Callbacks(m) => m.len(),
        }
    }

    /// Check if no top-level entry was extracted.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Top-level keys in sorted order.
    pub fn keys(&self) -> Vec<&str> {
        match self {
            HelpDocument::Classes(m) => m.keys().map(String::as_str).collect(),
            HelpDocument::Functions(m) => m.keys().map(String::as_str).collect(),
            HelpDocument::Operators(m) => m.keys().map(String::as_str).collect(),
            HelpDocument::Types(m) => m.keys().map(String::as_str).collect(),
            HelpDocument::Callbacks(m) => m.keys().map(String::as_str).collect(),
        }
    }

    /// Total number of leaf entries (methods, properties and constructors
    /// count individually for classes).
    pub fn entry_count(&self) -> usize {
        match self {
            HelpDocument::Classes(m) => m
                .values()
                .map(|c| {
                    c.methods.len() + c.properties.len() + usize::from(!c.constructor.is_empty())
                })
                .sum(),
            HelpDocument::Functions(m) => m.values().map(BTreeMap::len).sum(),
            _ => self.len(),
        }
    }

    pub fn classes(&self) -> Option<&BTreeMap<String, ClassRecord>> {
        match self {
            HelpDocument::Classes(m) => Some(m),
            _ => None,
        }
    }

    pub fn functions(&self) -> Option<&FunctionSections> {
        match self {
            HelpDocument::Functions(m) => Some(m),
            _ => None,
        }
    }

    pub fn operators(&self) -> Option<&BTreeMap<String, OperatorRecord>> {
        match self {
            HelpDocument::Operators(m) => Some(m),
            _ => None,
        }
    }

    pub fn types(&self) -> Option<&BTreeMap<String, TypeRecord>> {
        match self {
            HelpDocument::Types(m) => Some(m),
            _ => None,
        }
    }

    pub fn callbacks(&self) -> Option<&BTreeMap<String, CallbackRecord>> {
        match self {
            HelpDocument::Callbacks(m) => Some(m),
            _ => None,
        }
    }
}
