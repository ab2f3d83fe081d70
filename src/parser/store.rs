//! Record store: the nested mapping being built.
//!
//! Entries are addressed through explicit [`EntryHandle`]s, never through
//! map iteration order.

use super::context::{Declaration, EntryHandle};
use crate::model::{
    append_description, CallbackRecord, ConstructorRecord, DocKind, HelpDocument, MethodRecord,
    OperatorRecord, PropertyRecord, Separator, TypeRecord,
};

/// Mutable store for one document kind.
#[derive(Debug, Clone)]
pub struct RecordStore {
    document: HelpDocument,
}

impl RecordStore {
    /// Create an empty store.
    pub fn new(kind: DocKind) -> Self {
        Self {
            document: HelpDocument::new(kind),
        }
    }

    pub fn kind(&self) -> DocKind {
        self.document.kind()
    }

    /// Make sure an owner (class or section) exists. Existing owners are
    /// left untouched. Returns `true` when the owner was created.
    pub fn open_owner(&mut self, name: &str) -> bool {
        match &mut self.document {
            HelpDocument::Classes(classes) => {
                if classes.contains_key(name) {
                    return false;
                }
                classes.insert(name.to_string(), Default::default());
                true
            }
            HelpDocument::Functions(sections) => {
                if sections.contains_key(name) {
                    return false;
                }
                sections.insert(name.to_string(), Default::default());
                true
            }
            _ => false,
        }
    }

    /// Record a declaration and return the handle of the opened entry.
    ///
    /// Re-declaring a method, property, operator, type or callback replaces
    /// the earlier entry; re-declaring a function appends an overload.
    pub fn declare(&mut self, decl: Declaration) -> Option<EntryHandle> {
        let handle = decl.handle();
        match (&mut self.document, decl) {
            (HelpDocument::Classes(classes), Declaration::Constructor { class, signature }) => {
                classes.entry(class).or_default().constructor =
                    ConstructorRecord::declared(signature);
            }
            (
                HelpDocument::Classes(classes),
                Declaration::Method {
                    class,
                    name,
                    signature,
                },
            ) => {
                classes
                    .entry(class)
                    .or_default()
                    .methods
                    .insert(name, MethodRecord::new(signature));
            }
            (
                HelpDocument::Classes(classes),
                Declaration::Property {
                    class,
                    name,
                    type_name,
                },
            ) => {
                classes
                    .entry(class)
                    .or_default()
                    .properties
                    .insert(name, PropertyRecord::new(type_name));
            }
            (
                HelpDocument::Functions(sections),
                Declaration::Function {
                    section,
                    name,
                    signature,
                },
            ) => {
                sections
                    .entry(section)
                    .or_default()
                    .entry(name)
                    .or_default()
                    .signatures
                    .push(signature);
            }
            (HelpDocument::Operators(operators), Declaration::Operator { key, signature }) => {
                operators.insert(
                    key,
                    OperatorRecord {
                        signature,
                        description: String::new(),
                    },
                );
            }
            (HelpDocument::Types(types), Declaration::Type { name }) => {
                types.insert(name, TypeRecord::default());
            }
            (HelpDocument::Callbacks(callbacks), Declaration::Callback { key, signature }) => {
                callbacks.insert(
                    key,
                    CallbackRecord {
                        signature,
                        description: String::new(),
                    },
                );
            }
            (document, decl) => {
                log::warn!(
                    "Ignoring {:?} in a {} document",
                    decl,
                    document.kind()
                );
                return None;
            }
        }
        Some(handle)
    }

    /// Append description text to an entry. Returns `false` when the entry
    /// does not exist.
    pub fn append(&mut self, handle: &EntryHandle, text: &str, separator: Separator) -> bool {
        match self.description_mut(handle) {
            Some(description) => {
                append_description(description, text, separator);
                true
            }
            None => false,
        }
    }

    /// Current description of an entry.
    pub fn description(&self, handle: &EntryHandle) -> Option<&str> {
        match (&self.document, handle) {
            (HelpDocument::Classes(c), EntryHandle::Constructor { class }) => {
                c.get(class)?.constructor.description.as_deref()
            }
            (HelpDocument::Classes(c), EntryHandle::Method { class, name }) => {
                Some(c.get(class)?.methods.get(name)?.description.as_str())
            }
            (HelpDocument::Classes(c), EntryHandle::Property { class, name }) => {
                Some(c.get(class)?.properties.get(name)?.description.as_str())
            }
            (HelpDocument::Functions(s), EntryHandle::Function { section, name }) => {
                Some(s.get(section)?.get(name)?.description.as_str())
            }
            (HelpDocument::Operators(o), EntryHandle::Operator { key }) => {
                Some(o.get(key)?.description.as_str())
            }
            (HelpDocument::Types(t), EntryHandle::Type { name }) => {
                Some(t.get(name)?.description.as_str())
            }
            (HelpDocument::Callbacks(c), EntryHandle::Callback { key }) => {
                Some(c.get(key)?.description.as_str())
            }
            _ => None,
        }
    }

    fn description_mut(&mut self, handle: &EntryHandle) -> Option<&mut String> {
        match (&mut self.document, handle) {
            (HelpDocument::Classes(c), EntryHandle::Constructor { class }) => {
                c.get_mut(class)?.constructor.description.as_mut()
            }
            (HelpDocument::Classes(c), EntryHandle::Method { class, name }) => {
                Some(&mut c.get_mut(class)?.methods.get_mut(name)?.description)
            }
            (HelpDocument::Classes(c), EntryHandle::Property { class, name }) => {
                Some(&mut c.get_mut(class)?.properties.get_mut(name)?.description)
            }
            (HelpDocument::Functions(s), EntryHandle::Function { section, name }) => {
                Some(&mut s.get_mut(section)?.get_mut(name)?.description)
            }
            (HelpDocument::Operators(o), EntryHandle::Operator { key }) => {
                Some(&mut o.get_mut(key)?.description)
            }
            (HelpDocument::Types(t), EntryHandle::Type { name }) => {
                Some(&mut t.get_mut(name)?.description)
            }
            (HelpDocument::Callbacks(c), EntryHandle::Callback { key }) => {
                Some(&mut c.get_mut(key)?.description)
            }
            _ => None,
        }
    }

    /// Borrow the document built so far.
    pub fn document(&self) -> &HelpDocument {
        &self.document
    }

    /// Finish and return the document.
    pub fn into_document(self) -> HelpDocument {
        self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn method(name: &str, signature: &str) -> Declaration {
        Declaration::Method {
            class: "Foo".to_string(),
            name: name.to_string(),
            signature: signature.to_string(),
        }
    }

    #[test]
    fn test_open_owner_is_idempotent() {
        let mut store = RecordStore::new(DocKind::Classes);
        assert!(store.open_owner("Foo"));
        store.declare(method("bar", "(void)bar(void)"));
        assert!(!store.open_owner("Foo"));

        let classes = store.document().classes().unwrap();
        assert_eq!(classes.len(), 1);
        assert!(classes["Foo"].methods.contains_key("bar"));
    }

    #[test]
    fn test_method_redeclaration_overwrites() {
        let mut store = RecordStore::new(DocKind::Classes);
        store.open_owner("Foo");
        let first = store.declare(method("bar", "(void)bar(void)")).unwrap();
        store.append(&first, "Old text.", Separator::Space);
        let second = store.declare(method("bar", "(integer)bar(integer x)")).unwrap();
        assert_eq!(first, second);
        assert_eq!(store.description(&second), Some(""));

        let classes = store.document().classes().unwrap();
        assert_eq!(classes["Foo"].methods["bar"].signature, "(integer)bar(integer x)");
    }

    #[test]
    fn test_function_redeclaration_appends_overload() {
        let mut store = RecordStore::new(DocKind::Functions);
        store.open_owner("Math functions");
        for signature in ["(float)abs(float x)", "(integer)abs(integer x)"] {
            store.declare(Declaration::Function {
                section: "Math functions".to_string(),
                name: "abs".to_string(),
                signature: signature.to_string(),
            });
        }
        let sections = store.document().functions().unwrap();
        assert_eq!(
            sections["Math functions"]["abs"].signatures,
            vec!["(float)abs(float x)", "(integer)abs(integer x)"]
        );
    }

    #[test]
    fn test_constructor_description() {
        let mut store = RecordStore::new(DocKind::Classes);
        store.open_owner("Foo");
        let handle = store
            .declare(Declaration::Constructor {
                class: "Foo".to_string(),
                signature: "(object<Foo>$)Foo(void)".to_string(),
            })
            .unwrap();
        assert!(store.append(&handle, "Creates a Foo.", Separator::Space));
        assert_eq!(store.description(&handle), Some("Creates a Foo."));
    }

    #[test]
    fn test_append_to_missing_entry() {
        let mut store = RecordStore::new(DocKind::Types);
        let handle = EntryHandle::Type {
            name: "integer".to_string(),
        };
        assert!(!store.append(&handle, "text", Separator::Space));
    }

    #[test]
    fn test_mismatched_declaration_ignored() {
        let mut store = RecordStore::new(DocKind::Types);
        let handle = store.declare(Declaration::Operator {
            key: "x".to_string(),
            signature: "x".to_string(),
        });
        assert!(handle.is_none());
        assert!(store.document().is_empty());
    }
}
