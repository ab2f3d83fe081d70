//! Signature and heading patterns.
//!
//! Every matcher is a pure function of the paragraph text. A `None` result
//! is not an error: the paragraph is simply not a heading of that kind.

use crate::error::Result;
use regex::Regex;

/// A matched declaration: the key under which the entry is stored and the
/// signature text recorded for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureMatch {
    pub name: String,
    pub signature: String,
}

impl SignatureMatch {
    fn new(name: impl Into<String>, signature: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            signature: signature.into(),
        }
    }
}

/// A matched property declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyMatch {
    pub name: String,
    pub type_name: String,
}

/// Type recorded for a property declared without a parenthesized type.
pub const UNKNOWN_TYPE: &str = "unknown";

/// Compiled pattern library shared by all document kinds.
#[derive(Debug, Clone)]
pub struct Matcher {
    class_heading: Regex,
    method: Regex,
    property: Regex,
    property_untyped: Option<Regex>,
    section_heading: Regex,
    function: Regex,
    operator_multi: Regex,
    operator_pair: Regex,
    operator_single: Regex,
    type_heading: Regex,
    callback_heading: Regex,
}

impl Matcher {
    /// Compile the pattern library. `separators` are literal spellings of
    /// the arrow between a property name and its type; they are treated as
    /// equivalent.
    pub fn new<S: AsRef<str>>(separators: &[S]) -> Result<Self> {
        let alternation = separators
            .iter()
            .map(|s| regex::escape(s.as_ref()))
            .collect::<Vec<_>>()
            .join("|");

        let property = if alternation.is_empty() {
            Regex::new(r"^(\w+)\s*\(([^)]+)\)")?
        } else {
            Regex::new(&format!(r"^(\w+)\s*(?:{})?\s*\(([^)]+)\)", alternation))?
        };
        let property_untyped = if alternation.is_empty() {
            None
        } else {
            Some(Regex::new(&format!(r"^(\w+)\s*(?:{})", alternation))?)
        };

        Ok(Self {
            class_heading: Regex::new(r"\bClass\s+([A-Z]\w*)")?,
            method: Regex::new(r"^(?:[–+\-]\s*)?\((.*?)\)\s*(\w+)\s*\((.*)\)")?,
            property,
            property_untyped,
            section_heading: Regex::new(r"^\d+\.\d+\.\s+(.*\S)")?,
            function: Regex::new(r"^\((.*?)\)\s*(\w+)\s*\(")?,
            operator_multi: Regex::new(r"^.*?ITEM:\s+\d+\.\s+(.*operators?):\s+(.+)")?,
            operator_pair: Regex::new(
                r"^.*?ITEM:\s+\d+\.\s+(.*):\s+operator\s+(\S+)\s+and\s+operator\s+(\S+)",
            )?,
            operator_single: Regex::new(r"^.*?ITEM:\s+\d+\.\s+(.*operator)\s+(\S+)")?,
            type_heading: Regex::new(r"^(?:[\d.]+\s+)?ITEM:\s+\d+\.\s+type\s+(\w+)")?,
            callback_heading: Regex::new(r"ITEM:\s+\d+\.\s+(.*?)\s+(callbacks|events)\b")?,
        })
    }

    /// `Class Foo` → `Foo`.
    pub fn class_heading(&self, text: &str) -> Option<String> {
        self.class_heading
            .captures(text)
            .map(|caps| caps[1].to_string())
    }

    /// `(object<Foo>$)Foo(...)` → the whole text as signature.
    ///
    /// The constructor shape depends on the owning class, so it is checked
    /// literally instead of through a compiled pattern.
    pub fn constructor(&self, owner: &str, text: &str) -> Option<String> {
        let prefix = format!("(object<{owner}>$){owner}(");
        let rest = text.strip_prefix(&prefix)?;
        let first_line = rest.split('\n').next().unwrap_or_default();
        first_line.contains(')').then(|| text.to_string())
    }

    /// `– (void)bar(integer x)` → `bar`, `(void)bar(integer x)`.
    ///
    /// The leading sign marker is optional; the recorded signature never
    /// carries it.
    pub fn method(&self, text: &str) -> Option<SignatureMatch> {
        let caps = self.method.captures(text)?;
        let name = caps[2].trim();
        let signature = format!("({}){}({})", &caps[1], name, &caps[3]);
        Some(SignatureMatch::new(name, signature))
    }

    /// `tag <–> (integer$)` → `tag`, `integer$`. A declaration carrying a
    /// separator but no parenthesized type gets [`UNKNOWN_TYPE`].
    pub fn property(&self, text: &str) -> Option<PropertyMatch> {
        if let Some(caps) = self.property.captures(text) {
            return Some(PropertyMatch {
                name: caps[1].trim().to_string(),
                type_name: caps[2].trim().to_string(),
            });
        }
        let caps = self.property_untyped.as_ref()?.captures(text)?;
        Some(PropertyMatch {
            name: caps[1].trim().to_string(),
            type_name: UNKNOWN_TYPE.to_string(),
        })
    }

    /// `3.1. Math functions` → `Math functions`.
    pub fn section_heading(&self, text: &str) -> Option<String> {
        self.section_heading
            .captures(text)
            .map(|caps| caps[1].trim().to_string())
    }

    /// One signature line `(float)abs(numeric x)` → `abs` with the line
    /// kept verbatim.
    pub fn function(&self, line: &str) -> Option<SignatureMatch> {
        let line = line.trim();
        let caps = self.function.captures(line)?;
        Some(SignatureMatch::new(&caps[2], line))
    }

    /// `ITEM: 5. addition operators: + and +=` → key
    /// `addition operators + and +=`, signature `+ and +=`.
    ///
    /// Shapes are tried in order: named operator group with symbols, the
    /// `operator X and operator Y` conjunction, then a single operator.
    pub fn operator(&self, text: &str) -> Option<SignatureMatch> {
        if let Some(caps) = self.operator_multi.captures(text) {
            let name = caps[1].trim();
            let symbols = caps[2].trim();
            return Some(SignatureMatch::new(format!("{name} {symbols}"), symbols));
        }
        if let Some(caps) = self.operator_pair.captures(text) {
            let name = caps[1].trim();
            let symbols = format!("{} and {}", caps[2].trim(), caps[3].trim());
            return Some(SignatureMatch::new(format!("{name} {symbols}"), symbols));
        }
        let caps = self.operator_single.captures(text)?;
        let name = caps[1].trim();
        let symbol = caps[2].trim();
        Some(SignatureMatch::new(format!("{name} {symbol}"), symbol))
    }

    /// `2.1.1 ITEM: 1. type integer` → `integer`.
    pub fn type_heading(&self, text: &str) -> Option<String> {
        self.type_heading
            .captures(text)
            .map(|caps| caps[1].to_string())
    }

    /// `ITEM: 1. initialize() callbacks` → key `initialize() callbacks`,
    /// signature `initialize()`.
    pub fn callback_heading(&self, text: &str) -> Option<SignatureMatch> {
        let caps = self.callback_heading.captures(text)?;
        let name = caps[1].trim();
        Some(SignatureMatch::new(format!("{} {}", name, &caps[2]), name))
    }
}
