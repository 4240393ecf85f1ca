//! Resolved syntax tree
//!
//! A tagged-union node representation. Declarations carry their declared
//! symbol, expressions carry the provider's resolution (symbol or overload
//! candidates), type mentions carry the bound type.

use serde::{Deserialize, Serialize};

use super::semantic::SymbolRef;
use super::span::Span;

/// One source file with its top-level nodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilationUnit {
    pub path: String,
    #[serde(default)]
    pub nodes: Vec<SyntaxNode>,
}

impl CompilationUnit {
    pub fn new(path: impl Into<String>, nodes: Vec<SyntaxNode>) -> Self {
        Self {
            path: path.into(),
            nodes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxNode {
    pub span: Span,
    pub kind: SyntaxKind,
    #[serde(default)]
    pub children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    pub fn new(span: Span, kind: SyntaxKind) -> Self {
        Self {
            span,
            kind,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<SyntaxNode>) -> Self {
        self.children = children;
        self
    }
}

/// Type mention in source (`List<int>` in `List<int> x;`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRefSyntax {
    pub span: Span,
    /// Bound type; `None` when the provider has no type information
    pub resolved: Option<SymbolRef>,
}

impl TypeRefSyntax {
    pub fn new(span: Span, resolved: Option<SymbolRef>) -> Self {
        Self { span, resolved }
    }
}

/// Provider resolution for an expression
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolInfo {
    pub symbol: Option<SymbolRef>,
    /// Overload candidates when `symbol` could not be bound
    #[serde(default)]
    pub candidates: Vec<SymbolRef>,
    /// Source text, used in diagnostics
    #[serde(default)]
    pub text: String,
}

impl SymbolInfo {
    pub fn resolved(symbol: SymbolRef, text: impl Into<String>) -> Self {
        Self {
            symbol: Some(symbol),
            candidates: Vec::new(),
            text: text.into(),
        }
    }

    pub fn ambiguous(candidates: Vec<SymbolRef>, text: impl Into<String>) -> Self {
        Self {
            symbol: None,
            candidates,
            text: text.into(),
        }
    }

    pub fn unresolved(text: impl Into<String>) -> Self {
        Self {
            symbol: None,
            candidates: Vec::new(),
            text: text.into(),
        }
    }

    pub fn is_ambiguous(&self) -> bool {
        self.symbol.is_none() && !self.candidates.is_empty()
    }

    /// The bound symbol, or every candidate
    pub fn targets(&self) -> Vec<SymbolRef> {
        match self.symbol {
            Some(symbol) => vec![symbol],
            None => self.candidates.clone(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Declarations
// ═══════════════════════════════════════════════════════════════════════════

/// Class, struct or interface declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDecl {
    pub symbol: SymbolRef,
    pub identifier: Span,
    #[serde(default)]
    pub base_list: Vec<TypeRefSyntax>,
    /// Types named in `where` constraints
    #[serde(default)]
    pub type_constraints: Vec<TypeRefSyntax>,
    #[serde(default)]
    pub attributes: Vec<TypeRefSyntax>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumMemberDecl {
    pub symbol: SymbolRef,
    pub identifier: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumDecl {
    pub symbol: SymbolRef,
    pub identifier: Span,
    #[serde(default)]
    pub members: Vec<EnumMemberDecl>,
    #[serde(default)]
    pub base_list: Vec<TypeRefSyntax>,
    #[serde(default)]
    pub attributes: Vec<TypeRefSyntax>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegateDecl {
    pub symbol: SymbolRef,
    pub identifier: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDecl {
    pub symbol: SymbolRef,
    pub identifier: Span,
    /// Span from the name through the closing parenthesis
    pub signature: Option<Span>,
    pub return_type: Option<TypeRefSyntax>,
    /// One entry per parameter; the span covers the whole parameter
    #[serde(default)]
    pub parameters: Vec<TypeRefSyntax>,
    #[serde(default)]
    pub type_constraints: Vec<TypeRefSyntax>,
    #[serde(default)]
    pub attributes: Vec<TypeRefSyntax>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructorDecl {
    pub symbol: SymbolRef,
    pub identifier: Span,
    pub signature: Option<Span>,
    #[serde(default)]
    pub parameters: Vec<TypeRefSyntax>,
    #[serde(default)]
    pub attributes: Vec<TypeRefSyntax>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDecl {
    pub symbol: SymbolRef,
    pub identifier: Span,
    pub ty: TypeRefSyntax,
    #[serde(default)]
    pub attributes: Vec<TypeRefSyntax>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableDecl {
    pub symbol: SymbolRef,
    pub identifier: Span,
}

/// `int a, b;` declares two fields sharing one type mention
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDecl {
    pub ty: TypeRefSyntax,
    pub variables: Vec<VariableDecl>,
    #[serde(default)]
    pub attributes: Vec<TypeRefSyntax>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDecl {
    pub symbol: SymbolRef,
    pub identifier: Span,
    pub ty: TypeRefSyntax,
    #[serde(default)]
    pub attributes: Vec<TypeRefSyntax>,
}

// ═══════════════════════════════════════════════════════════════════════════
// Expressions
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectCreationExpr {
    pub ty: TypeRefSyntax,
    pub constructor: SymbolInfo,
}

/// Node category. Children of an `Invocation` start with the callee;
/// children of a `MemberAccess` are its receiver expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyntaxKind {
    Namespace { name: String },
    Class(TypeDecl),
    Struct(TypeDecl),
    Interface(TypeDecl),
    Enum(EnumDecl),
    Delegate(DelegateDecl),
    Method(MethodDecl),
    Constructor(ConstructorDecl),
    Property(PropertyDecl),
    Field(FieldDecl),
    Event(EventDecl),
    IdentifierName(SymbolInfo),
    MemberAccess(SymbolInfo),
    Invocation(SymbolInfo),
    ObjectCreation(ObjectCreationExpr),
    /// Any node without indexing semantics (blocks, statements, literals)
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_info_targets() {
        let resolved = SymbolInfo::resolved(SymbolRef(4), "Foo");
        assert_eq!(resolved.targets(), vec![SymbolRef(4)]);
        assert!(!resolved.is_ambiguous());

        let ambiguous = SymbolInfo::ambiguous(vec![SymbolRef(1), SymbolRef(2)], "Bar(x)");
        assert_eq!(ambiguous.targets().len(), 2);
        assert!(ambiguous.is_ambiguous());

        let unresolved = SymbolInfo::unresolved("baz");
        assert!(unresolved.targets().is_empty());
        assert!(!unresolved.is_ambiguous());
    }

    #[test]
    fn test_node_json_shape() {
        let json = r#"{
            "span": {"start_line": 3, "start_col": 8, "end_line": 3, "end_col": 11},
            "kind": {"identifier_name": {"symbol": 5, "text": "Foo"}},
            "children": []
        }"#;
        let node: SyntaxNode = serde_json::from_str(json).unwrap();
        assert_eq!(
            node.kind,
            SyntaxKind::IdentifierName(SymbolInfo::resolved(SymbolRef(5), "Foo"))
        );

        let other: SyntaxNode = serde_json::from_str(
            r#"{"span": {"start_line": 0, "start_col": 0, "end_line": 0, "end_col": 1}, "kind": "other"}"#,
        )
        .unwrap();
        assert_eq!(other.kind, SyntaxKind::Other);
        assert!(other.children.is_empty());
    }
}
