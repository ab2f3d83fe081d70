//! Parse context and the classified steps that drive it.

use crate::model::Separator;

/// Which subsection of a class is being read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Subsection {
    #[default]
    None,
    Methods,
    Properties,
}

/// Explicit address of an entry in the record store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntryHandle {
    Constructor { class: String },
    Method { class: String, name: String },
    Property { class: String, name: String },
    Function { section: String, name: String },
    Operator { key: String },
    Type { name: String },
    Callback { key: String },
}

impl EntryHandle {
    /// The entry's own name (the class name for constructors).
    pub fn name(&self) -> &str {
        match self {
            EntryHandle::Constructor { class } => class,
            EntryHandle::Method { name, .. }
            | EntryHandle::Property { name, .. }
            | EntryHandle::Function { name, .. }
            | EntryHandle::Type { name } => name,
            EntryHandle::Operator { key } | EntryHandle::Callback { key } => key,
        }
    }

    pub fn is_method(&self) -> bool {
        matches!(self, EntryHandle::Method { .. })
    }
}

/// A recognized declaration, ready to be written to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    Constructor { class: String, signature: String },
    Method { class: String, name: String, signature: String },
    Property { class: String, name: String, type_name: String },
    Function { section: String, name: String, signature: String },
    Operator { key: String, signature: String },
    Type { name: String },
    Callback { key: String, signature: String },
}

impl Declaration {
    /// Handle of the entry this declaration opens.
    pub fn handle(&self) -> EntryHandle {
        match self {
            Declaration::Constructor { class, .. } => EntryHandle::Constructor {
                class: class.clone(),
            },
            Declaration::Method { class, name, .. } => EntryHandle::Method {
                class: class.clone(),
                name: name.clone(),
            },
            Declaration::Property { class, name, .. } => EntryHandle::Property {
                class: class.clone(),
                name: name.clone(),
            },
            Declaration::Function { section, name, .. } => EntryHandle::Function {
                section: section.clone(),
                name: name.clone(),
            },
            Declaration::Operator { key, .. } => EntryHandle::Operator { key: key.clone() },
            Declaration::Type { name } => EntryHandle::Type { name: name.clone() },
            Declaration::Callback { key, .. } => EntryHandle::Callback { key: key.clone() },
        }
    }
}

/// What a single paragraph means, given the current context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// A new class or section begins
    Owner(String),
    /// A methods/properties header inside a class
    Subsection(Subsection),
    /// One or more entries are declared; the last one stays open
    Declare(Vec<Declaration>),
    /// Text for the open entry
    Describe { text: String, separator: Separator },
    /// Close the open entry without opening another
    Close,
    /// A heading-styled paragraph that matched no pattern
    Unmatched { heading: &'static str },
    /// Not relevant to this document kind
    Skip,
}

/// Explicit parse state threaded through every paragraph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseContext {
    owner: Option<String>,
    subsection: Subsection,
    open: Option<EntryHandle>,
    last_property: Option<String>,
}

impl ParseContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current class or section.
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    pub fn subsection(&self) -> Subsection {
        self.subsection
    }

    /// Entry currently receiving description text.
    pub fn open_entry(&self) -> Option<&EntryHandle> {
        self.open.as_ref()
    }

    /// Whether the owner's constructor is receiving description text.
    pub fn constructor_pending(&self) -> bool {
        matches!(self.open, Some(EntryHandle::Constructor { .. }))
    }

    /// Name of the property most recently declared under the current
    /// class. Survives subsection headers so orphan text can be reported
    /// against it.
    pub fn last_property(&self) -> Option<&str> {
        self.last_property.as_deref()
    }

    /// Enter a new owner: everything below it is reset.
    pub fn enter_owner(&mut self, name: impl Into<String>) {
        self.owner = Some(name.into());
        self.subsection = Subsection::None;
        self.open = None;
        self.last_property = None;
    }

    /// Enter a subsection. The open entry (including a pending
    /// constructor) is closed.
    pub fn enter_subsection(&mut self, subsection: Subsection) {
        self.subsection = subsection;
        self.open = None;
    }

    /// Open an entry, implicitly closing the previous one.
    pub fn open(&mut self, handle: EntryHandle) {
        if let EntryHandle::Property { name, .. } = &handle {
            self.last_property = Some(name.clone());
        }
        self.open = Some(handle);
    }

    pub fn close(&mut self) {
        self.open = None;
    }
}
