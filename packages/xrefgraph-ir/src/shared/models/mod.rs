//! Shared models
//!
//! The resolved-AST vocabulary every feature works on.

pub mod semantic;
pub mod span;
pub mod syntax;

pub use semantic::{
    Accessibility, InterfaceImplementation, MethodKind, SemanticKind, SemanticSymbol, SymbolRef,
    TypeKind,
};
pub use span::Span;
pub use syntax::{
    CompilationUnit, ConstructorDecl, DelegateDecl, EnumDecl, EnumMemberDecl, EventDecl,
    FieldDecl, MethodDecl, ObjectCreationExpr, PropertyDecl, SymbolInfo, SyntaxKind, SyntaxNode,
    TypeDecl, TypeRefSyntax, VariableDecl,
};
