//! Graph store domain models
//!
//! Everything the indexer persists: symbols keyed by their serialized name,
//! files keyed by path, typed references between symbol ids, and 1-based
//! source ranges attached to either.

use serde::{Deserialize, Serialize};

use crate::{Result, StorageError};

pub type SymbolId = i64;
pub type FileId = i64;
pub type ReferenceId = i64;

// ═══════════════════════════════════════════════════════════════════════════
// Kinds
// ═══════════════════════════════════════════════════════════════════════════

/// Kind recorded for a symbol.
///
/// Fields, properties and events all map to `Field`; delegates map to
/// `Function`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    Namespace,
    Class,
    Struct,
    Interface,
    Enum,
    EnumConstant,
    Method,
    Field,
    Function,
    TypeParameter,
}

impl SymbolKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SymbolKind::Namespace => "namespace",
            SymbolKind::Class => "class",
            SymbolKind::Struct => "struct",
            SymbolKind::Interface => "interface",
            SymbolKind::Enum => "enum",
            SymbolKind::EnumConstant => "enum_constant",
            SymbolKind::Method => "method",
            SymbolKind::Field => "field",
            SymbolKind::Function => "function",
            SymbolKind::TypeParameter => "type_parameter",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefinitionKind {
    Explicit,
}

impl DefinitionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DefinitionKind::Explicit => "explicit",
        }
    }
}

/// Edge kind of a reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    Usage,
    TypeUsage,
    Call,
    Inheritance,
    AnnotationUsage,
    TypeArgument,
}

impl ReferenceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReferenceKind::Usage => "usage",
            ReferenceKind::TypeUsage => "type_usage",
            ReferenceKind::Call => "call",
            ReferenceKind::Inheritance => "inheritance",
            ReferenceKind::AnnotationUsage => "annotation_usage",
            ReferenceKind::TypeArgument => "type_argument",
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Serialized names
// ═══════════════════════════════════════════════════════════════════════════

/// One dotted segment of a symbol name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NameElement {
    pub prefix: String,
    pub name: String,
    pub postfix: String,
}

impl NameElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Structured symbol name as stored by the graph store.
///
/// Serializes to
/// `{"name_delimiter":".","name_elements":[{"prefix":..,"name":..,"postfix":..}]}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SerializedName {
    pub name_delimiter: String,
    pub name_elements: Vec<NameElement>,
}

impl SerializedName {
    pub const DELIMITER: &'static str = ".";

    pub fn new(name_elements: Vec<NameElement>) -> Self {
        Self {
            name_delimiter: Self::DELIMITER.to_string(),
            name_elements,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let name: Self = serde_json::from_str(text)?;
        if name.name_elements.is_empty() {
            return Err(StorageError::serialization("name has no elements"));
        }
        Ok(name)
    }

    /// Element names joined by the delimiter, without prefix/postfix.
    pub fn qualified_name(&self) -> String {
        self.name_elements
            .iter()
            .map(|e| e.name.as_str())
            .collect::<Vec<_>>()
            .join(&self.name_delimiter)
    }

    pub fn last(&self) -> Option<&NameElement> {
        self.name_elements.last()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Locations
// ═══════════════════════════════════════════════════════════════════════════

/// 1-based source range in a registered file (end column inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceRange {
    pub file_id: FileId,
    pub start_line: u32,
    pub start_col: u32,
    pub end_line: u32,
    pub end_col: u32,
}

impl SourceRange {
    pub fn new(file_id: FileId, start_line: u32, start_col: u32, end_line: u32, end_col: u32) -> Self {
        Self {
            file_id,
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }
}

/// What a stored location is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "id")]
pub enum LocationOwner {
    Symbol(SymbolId),
    Signature(SymbolId),
    Qualifier(SymbolId),
    Reference(ReferenceId),
}

impl LocationOwner {
    pub fn kind_str(&self) -> &'static str {
        match self {
            LocationOwner::Symbol(_) => "symbol",
            LocationOwner::Signature(_) => "signature",
            LocationOwner::Qualifier(_) => "qualifier",
            LocationOwner::Reference(_) => "reference",
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Read-back records
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSymbol {
    pub id: SymbolId,
    pub name: SerializedName,
    pub kind: Option<SymbolKind>,
    pub definition_kind: Option<DefinitionKind>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub id: FileId,
    pub path: String,
    pub language: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoredReference {
    pub id: ReferenceId,
    pub source: SymbolId,
    pub target: SymbolId,
    pub kind: ReferenceKind,
    pub ambiguous: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoredLocation {
    pub owner: LocationOwner,
    pub range: SourceRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredError {
    pub message: String,
    pub fatal: bool,
    pub range: Option<SourceRange>,
}

/// Row counts of a store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreCounts {
    pub symbols: u64,
    pub files: u64,
    pub references: u64,
    pub locations: u64,
    pub errors: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_serialized_name_json_shape() {
        let name = SerializedName::new(vec![
            NameElement::new("System"),
            NameElement {
                prefix: "public int".to_string(),
                name: "Count".to_string(),
                postfix: String::new(),
            },
        ]);

        assert_eq!(
            name.to_json().unwrap(),
            r#"{"name_delimiter":".","name_elements":[{"prefix":"","name":"System","postfix":""},{"prefix":"public int","name":"Count","postfix":""}]}"#
        );
    }

    #[test]
    fn test_serialized_name_from_json() {
        let text = r#"{"name_delimiter":".","name_elements":[{"prefix":"","name":"A","postfix":""},{"prefix":"","name":"B","postfix":"()"}]}"#;
        let name = SerializedName::from_json(text).unwrap();
        assert_eq!(name.qualified_name(), "A.B");
        assert_eq!(name.last().unwrap().postfix, "()");
    }

    #[test]
    fn test_serialized_name_rejects_empty() {
        let err = SerializedName::from_json(r#"{"name_delimiter":".","name_elements":[]}"#)
            .unwrap_err();
        assert_eq!(err.kind, crate::ErrorKind::Serialization);
    }

    #[test]
    fn test_kind_strings() {
        assert_eq!(SymbolKind::EnumConstant.as_str(), "enum_constant");
        assert_eq!(ReferenceKind::TypeUsage.as_str(), "type_usage");
        assert_eq!(ReferenceKind::AnnotationUsage.as_str(), "annotation_usage");
        assert_eq!(DefinitionKind::Explicit.as_str(), "explicit");
        assert_eq!(LocationOwner::Qualifier(3).kind_str(), "qualifier");
    }
}
