//! Parsing options and per-kind style tables.
//!
//! Which style tag marks a heading and which marks description text is not
//! derivable from the markup. These tables record the convention of the
//! Eidos/SLiM help exports and can be overridden from JSON when a source
//! document is restyled.

use crate::error::{Error, Result};
use crate::model::DocKind;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Style tag that matches every paragraph.
pub const ANY_STYLE: &str = "*";

/// A set of style tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleSet(Vec<String>);

impl StyleSet {
    /// Create a set from style tags.
    pub fn of(styles: &[&str]) -> Self {
        Self(styles.iter().map(|s| s.to_string()).collect())
    }

    /// A set matching any style.
    pub fn any() -> Self {
        Self::of(&[ANY_STYLE])
    }

    /// An empty set matching nothing.
    pub fn none() -> Self {
        Self::default()
    }

    /// Check whether `style` belongs to the set.
    pub fn contains(&self, style: &str) -> bool {
        self.0.iter().any(|s| s == ANY_STYLE || s == style)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Which class-page convention to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassPreset {
    /// Eidos class pages: `p5` is example code inside methods
    #[default]
    Eidos,
    /// SLiM class pages: `p5` is a declaration everywhere
    Slim,
}

/// Style table for class pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassStyles {
    /// `Class X` headings
    pub owner: StyleSet,
    /// `X properties` / `X methods` headers
    pub subsection: StyleSet,
    /// Constructor declaration candidates
    pub constructor: StyleSet,
    /// Property declaration candidates (inside a properties subsection)
    pub property: StyleSet,
    /// Method declaration candidates (inside a methods subsection)
    pub method: StyleSet,
    /// Description text
    pub description: StyleSet,
    /// Example code, appended to methods on a new line
    pub example: StyleSet,
}

impl ClassStyles {
    /// Table for the given preset.
    pub fn preset(preset: ClassPreset) -> Self {
        match preset {
            ClassPreset::Eidos => Self {
                owner: StyleSet::of(&["p1", "p10"]),
                subsection: StyleSet::of(&["p2", "p9", "p11"]),
                constructor: StyleSet::of(&["p3"]),
                property: StyleSet::of(&["p3", "p5"]),
                method: StyleSet::of(&["p3"]),
                description: StyleSet::of(&["p4", "p6"]),
                example: StyleSet::of(&["p5"]),
            },
            ClassPreset::Slim => Self {
                owner: StyleSet::of(&["p1", "p10"]),
                subsection: StyleSet::of(&["p2", "p9", "p11"]),
                constructor: StyleSet::of(&["p3", "p5"]),
                property: StyleSet::of(&["p3", "p5"]),
                method: StyleSet::of(&["p3", "p5"]),
                description: StyleSet::of(&["p4", "p6"]),
                example: StyleSet::none(),
            },
        }
    }
}

impl Default for ClassStyles {
    fn default() -> Self {
        Self::preset(ClassPreset::default())
    }
}

/// Style table for function pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionStyles {
    /// Numbered section headings (`3.1. Math functions`)
    pub owner: StyleSet,
    /// Signature blocks
    pub declaration: StyleSet,
    pub description: StyleSet,
}

impl Default for FunctionStyles {
    fn default() -> Self {
        Self {
            owner: StyleSet::of(&["p1"]),
            declaration: StyleSet::of(&["p2", "p4"]),
            description: StyleSet::of(&["p3", "p5"]),
        }
    }
}

/// Style table for single-level pages (operators, types, callbacks).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryStyles {
    /// `ITEM:` headings
    pub declaration: StyleSet,
    pub description: StyleSet,
    /// Close the open entry on any paragraph that is neither a heading
    /// nor description text
    #[serde(default)]
    pub close_on_other: bool,
}

impl EntryStyles {
    pub fn operators() -> Self {
        Self {
            declaration: StyleSet::any(),
            description: StyleSet::of(&["p2", "p3", "p4", "p5", "p6"]),
            close_on_other: true,
        }
    }

    pub fn types() -> Self {
        Self {
            declaration: StyleSet::of(&["p1"]),
            description: StyleSet::of(&["p2", "p3"]),
            close_on_other: false,
        }
    }

    pub fn callbacks() -> Self {
        Self {
            declaration: StyleSet::of(&["p1"]),
            description: StyleSet::any(),
            close_on_other: false,
        }
    }
}

/// Style tables for every document kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleTables {
    #[serde(default)]
    pub classes: ClassStyles,
    #[serde(default)]
    pub functions: FunctionStyles,
    #[serde(default = "EntryStyles::operators")]
    pub operators: EntryStyles,
    #[serde(default = "EntryStyles::types")]
    pub types: EntryStyles,
    #[serde(default = "EntryStyles::callbacks")]
    pub callbacks: EntryStyles,
}

impl StyleTables {
    /// Load tables from a JSON file. Missing kinds keep their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    /// Load tables from a JSON string. Missing kinds keep their defaults.
    pub fn from_json(data: &str) -> Result<Self> {
        serde_json::from_str(data).map_err(|e| Error::InvalidStyleTable(e.to_string()))
    }

    /// Load tables from a JSON file, using `preset` for the class table when
    /// the file does not define one.
    pub fn from_json_file_with_preset<P: AsRef<Path>>(path: P, preset: ClassPreset) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json_with_preset(&data, preset)
    }

    /// Load tables from a JSON string, using `preset` for the class table
    /// when the string does not define one.
    pub fn from_json_with_preset(data: &str, preset: ClassPreset) -> Result<Self> {
        let value: serde_json::Value =
            serde_json::from_str(data).map_err(|e| Error::InvalidStyleTable(e.to_string()))?;
        let has_classes = value.get("classes").is_some();

        let mut tables: Self =
            serde_json::from_value(value).map_err(|e| Error::InvalidStyleTable(e.to_string()))?;
        if !has_classes {
            tables.classes = ClassStyles::preset(preset);
        }
        Ok(tables)
    }

    /// Render the table for one kind (or all kinds) as pretty JSON.
    pub fn to_json(&self, kind: Option<DocKind>) -> Result<String> {
        let result = match kind {
            None => serde_json::to_string_pretty(self),
            Some(DocKind::Classes) => serde_json::to_string_pretty(&self.classes),
            Some(DocKind::Functions) => serde_json::to_string_pretty(&self.functions),
            Some(DocKind::Operators) => serde_json::to_string_pretty(&self.operators),
            Some(DocKind::Types) => serde_json::to_string_pretty(&self.types),
            Some(DocKind::Callbacks) => serde_json::to_string_pretty(&self.callbacks),
        };
        result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
    }
}

impl Default for StyleTables {
    fn default() -> Self {
        Self {
            classes: ClassStyles::default(),
            functions: FunctionStyles::default(),
            operators: EntryStyles::operators(),
            types: EntryStyles::types(),
            callbacks: EntryStyles::callbacks(),
        }
    }
}

/// Spellings accepted between a property name and its type.
pub const DEFAULT_PROPERTY_SEPARATORS: &[&str] = &["<–>", "&lt;–&gt;", "<->", "=>"];

/// Options for extracting a help page.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Style tables for every kind
    pub styles: StyleTables,

    /// Equivalent separator tokens between property name and type
    pub property_separators: Vec<String>,

    /// NFC-normalize paragraph text
    pub normalize_unicode: bool,

    /// Do not append empty paragraphs to descriptions
    pub skip_empty: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the style tables.
    pub fn with_styles(mut self, styles: StyleTables) -> Self {
        self.styles = styles;
        self
    }

    /// Switch the class table to a preset.
    pub fn with_class_preset(mut self, preset: ClassPreset) -> Self {
        self.styles.classes = ClassStyles::preset(preset);
        self
    }

    /// Replace the accepted property separators.
    pub fn with_property_separators<I, S>(mut self, separators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.property_separators = separators.into_iter().map(Into::into).collect();
        self
    }

    /// Enable or disable NFC normalization.
    pub fn with_unicode_normalization(mut self, normalize: bool) -> Self {
        self.normalize_unicode = normalize;
        self
    }

    /// Keep empty paragraphs when accumulating descriptions.
    pub fn keep_empty(mut self) -> Self {
        self.skip_empty = false;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            styles: StyleTables::default(),
            property_separators: DEFAULT_PROPERTY_SEPARATORS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            normalize_unicode: true,
            skip_empty: true,
        }
    }
}
