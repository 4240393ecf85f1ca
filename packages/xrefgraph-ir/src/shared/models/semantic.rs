//! Resolved semantic symbols
//!
//! The provider hands out symbols as an arena indexed by `SymbolRef`.
//! Symbols reference each other (containing type, original definition,
//! parameter types) by `SymbolRef`, never by pointer.

use serde::{Deserialize, Serialize};

/// Index of a symbol in the provider's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolRef(pub u32);

impl SymbolRef {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accessibility {
    #[default]
    NotApplicable,
    Private,
    ProtectedAndInternal,
    Protected,
    Internal,
    ProtectedOrInternal,
    Public,
}

impl Accessibility {
    /// Source keyword(s), empty for `NotApplicable`
    pub fn keyword(&self) -> &'static str {
        match self {
            Accessibility::NotApplicable => "",
            Accessibility::Private => "private",
            Accessibility::ProtectedAndInternal => "private protected",
            Accessibility::Protected => "protected",
            Accessibility::Internal => "internal",
            Accessibility::ProtectedOrInternal => "protected internal",
            Accessibility::Public => "public",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Class,
    Struct,
    Interface,
    Enum,
    Delegate,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodKind {
    #[default]
    Ordinary,
    Constructor,
    /// Extension method called with instance syntax
    ReducedExtension,
    Other,
}

/// Interface member → implementing member of a concrete type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InterfaceImplementation {
    pub interface_member: SymbolRef,
    pub implementation: SymbolRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum SemanticKind {
    Namespace,
    NamedType {
        type_kind: TypeKind,
        #[serde(default)]
        is_generic: bool,
        #[serde(default)]
        is_anonymous: bool,
        /// Directly and transitively implemented interfaces
        #[serde(default)]
        all_interfaces: Vec<SymbolRef>,
        #[serde(default)]
        implementations: Vec<InterfaceImplementation>,
    },
    Array {
        element: SymbolRef,
    },
    TypeParameter,
    /// Type the provider failed to bind
    Error,
    Method {
        #[serde(default)]
        method_kind: MethodKind,
        return_type: Option<SymbolRef>,
        #[serde(default)]
        parameters: Vec<SymbolRef>,
        #[serde(default)]
        is_extension: bool,
        reduced_from: Option<SymbolRef>,
    },
    Property {
        ty: SymbolRef,
    },
    Field {
        ty: SymbolRef,
    },
    Event {
        ty: SymbolRef,
    },
    Parameter {
        ty: SymbolRef,
    },
    Local {
        ty: SymbolRef,
    },
}

/// A declared or referenced entity as the provider resolved it.
///
/// `qualified_name` is the dotted display name including generic arguments
/// (`N.List<T>`, `N.C.M<T>`) but never a parameter list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemanticSymbol {
    pub name: String,
    pub qualified_name: String,
    #[serde(default)]
    pub accessibility: Accessibility,
    /// Declaring assembly; `None` for symbols without one (arrays, errors)
    pub assembly: Option<String>,
    pub containing_type: Option<SymbolRef>,
    /// Unbound definition of a constructed generic symbol
    pub original_definition: Option<SymbolRef>,
    #[serde(flatten)]
    pub kind: SemanticKind,
}

impl SemanticSymbol {
    pub fn new(name: impl Into<String>, qualified_name: impl Into<String>, kind: SemanticKind) -> Self {
        Self {
            name: name.into(),
            qualified_name: qualified_name.into(),
            accessibility: Accessibility::NotApplicable,
            assembly: None,
            containing_type: None,
            original_definition: None,
            kind,
        }
    }

    pub fn is_type(&self) -> bool {
        matches!(
            self.kind,
            SemanticKind::NamedType { .. }
                | SemanticKind::Array { .. }
                | SemanticKind::TypeParameter
                | SemanticKind::Error
        )
    }

    pub fn is_member(&self) -> bool {
        matches!(
            self.kind,
            SemanticKind::Method { .. }
                | SemanticKind::Property { .. }
                | SemanticKind::Field { .. }
                | SemanticKind::Event { .. }
        )
    }

    pub fn is_method(&self) -> bool {
        matches!(self.kind, SemanticKind::Method { .. })
    }

    pub fn type_kind(&self) -> Option<TypeKind> {
        match self.kind {
            SemanticKind::NamedType { type_kind, .. } => Some(type_kind),
            _ => None,
        }
    }

    pub fn is_anonymous_type(&self) -> bool {
        matches!(self.kind, SemanticKind::NamedType { is_anonymous: true, .. })
    }

    pub fn is_interface(&self) -> bool {
        self.type_kind() == Some(TypeKind::Interface)
    }

    /// Declared type of a property, field, event, parameter or local
    pub fn value_type(&self) -> Option<SymbolRef> {
        match self.kind {
            SemanticKind::Property { ty }
            | SemanticKind::Field { ty }
            | SemanticKind::Event { ty }
            | SemanticKind::Parameter { ty }
            | SemanticKind::Local { ty } => Some(ty),
            _ => None,
        }
    }
}
