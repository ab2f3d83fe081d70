//! Record types for extracted API entries.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How a description paragraph is joined onto the text already collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Separator {
    /// Prose paragraphs are joined with a single space
    #[default]
    Space,
    /// Example-code paragraphs start on a new line
    Newline,
}

impl Separator {
    /// The literal joining text.
    pub fn as_str(&self) -> &'static str {
        match self {
            Separator::Space => " ",
            Separator::Newline => "\n",
        }
    }
}

/// Append `text` to `description`, joining with `sep` unless the
/// description is still empty.
pub fn append_description(description: &mut String, text: &str, sep: Separator) {
    if !description.is_empty() {
        description.push_str(sep.as_str());
    }
    description.push_str(text);
}

/// A documented class.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassRecord {
    /// Constructor, serialized as `{}` when the class has none
    pub constructor: ConstructorRecord,

    /// Methods by name
    pub methods: BTreeMap<String, MethodRecord>,

    /// Properties by name
    pub properties: BTreeMap<String, PropertyRecord>,
}

impl ClassRecord {
    /// Create an empty class record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if nothing has been recorded for this class yet.
    pub fn is_empty(&self) -> bool {
        self.constructor.is_empty() && self.methods.is_empty() && self.properties.is_empty()
    }
}

/// Class constructor. Both fields are absent until a constructor
/// declaration is seen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConstructorRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ConstructorRecord {
    /// Create a declared constructor with an empty description.
    pub fn declared(signature: impl Into<String>) -> Self {
        Self {
            signature: Some(signature.into()),
            description: Some(String::new()),
        }
    }

    /// Check if no constructor has been declared.
    pub fn is_empty(&self) -> bool {
        self.signature.is_none()
    }
}

/// A class method.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MethodRecord {
    pub signature: String,
    pub description: String,
}

impl MethodRecord {
    pub fn new(signature: impl Into<String>) -> Self {
        Self {
            signature: signature.into(),
            description: String::new(),
        }
    }
}

/// A class property.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyRecord {
    /// Declared type token, `"unknown"` when the declaration had none
    #[serde(rename = "type")]
    pub type_name: String,

    pub description: String,
}

impl PropertyRecord {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            description: String::new(),
        }
    }
}

/// A free function. Overloads are kept in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionRecord {
    pub signatures: Vec<String>,
    pub description: String,
}

/// An operator entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperatorRecord {
    /// Operator symbol(s), e.g. `+ and +=`
    pub signature: String,
    pub description: String,
}

/// A built-in type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeRecord {
    pub description: String,
}

/// A callback or event family.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallbackRecord {
    /// Callback name without the `callbacks`/`events` suffix
    pub signature: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_description_separators() {
        let mut desc = String::new();
        append_description(&mut desc, "Returns a value.", Separator::Space);
        append_description(&mut desc, "See also x().", Separator::Space);
        append_description(&mut desc, "a = f(1);", Separator::Newline);
        assert_eq!(desc, "Returns a value. See also x().\na = f(1);");
    }

    #[test]
    fn test_empty_constructor_serializes_as_empty_object() {
        let json = serde_json::to_string(&ConstructorRecord::default()).unwrap();
        assert_eq!(json, "{}");

        let json = serde_json::to_string(&ConstructorRecord::declared("(object<A>$)A(void)")).unwrap();
        assert_eq!(json, r#"{"signature":"(object<A>$)A(void)","description":""}"#);
    }

    #[test]
    fn test_property_type_field_name() {
        let json = serde_json::to_value(PropertyRecord::new("integer$")).unwrap();
        assert_eq!(json["type"], "integer$");
        assert_eq!(json["description"], "");
    }

    #[test]
    fn test_class_record_is_empty() {
        let mut class = ClassRecord::new();
        assert!(class.is_empty());
        class
            .methods
            .insert("bar".to_string(), MethodRecord::new("(void)bar(void)"));
        assert!(!class.is_empty());
    }
}
