//! Phase A: namespace and type declarations
//!
//! Mints every declared type, records its definition location and its
//! inheritance, constraint and attribute references, and fills the interface
//! index read by the member phase.

use xrefgraph_storage::{GraphStore, ReferenceKind, SymbolKind};

use crate::errors::Result;
use crate::features::indexing::session::{IndexSession, WalkContext};
use crate::features::resolved_ast::ResolvedAstProvider;
use crate::shared::models::{DelegateDecl, EnumDecl, SyntaxKind, SyntaxNode, TypeDecl};

pub(crate) fn visit_namespace<P, S>(
    session: &IndexSession<'_, P, S>,
    path: &str,
    name: &str,
) -> Result<()>
where
    P: ResolvedAstProvider + ?Sized,
    S: GraphStore,
{
    session.sink.resolve_file(path, session.sink.file_language())?;
    if name.trim().is_empty() {
        return Ok(());
    }
    session
        .sink
        .resolve_symbol(name, SymbolKind::Namespace, "", "")?;
    Ok(())
}

/// Class, struct or interface
pub(crate) fn visit_type<P, S>(
    session: &IndexSession<'_, P, S>,
    path: &str,
    decl: &TypeDecl,
) -> Result<()>
where
    P: ResolvedAstProvider + ?Sized,
    S: GraphStore,
{
    let Some(type_id) = session.mint(decl.symbol)? else {
        return Ok(());
    };
    session
        .sink
        .attach_symbol_location(type_id, path, decl.identifier)?;

    if let Some(symbol) = session.symbol(decl.symbol) {
        session.interfaces.register(decl.symbol, symbol);
    }

    session.type_references(type_id, &decl.base_list, ReferenceKind::Inheritance, path)?;
    session.type_references(
        type_id,
        &decl.type_constraints,
        ReferenceKind::TypeArgument,
        path,
    )?;
    session.type_references(type_id, &decl.attributes, ReferenceKind::AnnotationUsage, path)
}

pub(crate) fn visit_enum<P, S>(
    session: &IndexSession<'_, P, S>,
    path: &str,
    decl: &EnumDecl,
) -> Result<()>
where
    P: ResolvedAstProvider + ?Sized,
    S: GraphStore,
{
    let Some(enum_id) = session.mint(decl.symbol)? else {
        return Ok(());
    };
    session
        .sink
        .attach_symbol_location(enum_id, path, decl.identifier)?;

    for member in &decl.members {
        if let Some(member_id) = session.mint(member.symbol)? {
            session
                .sink
                .attach_symbol_location(member_id, path, member.identifier)?;
        }
    }

    session.type_references(enum_id, &decl.base_list, ReferenceKind::Inheritance, path)?;
    session.type_references(enum_id, &decl.attributes, ReferenceKind::AnnotationUsage, path)
}

pub(crate) fn visit_delegate<P, S>(
    session: &IndexSession<'_, P, S>,
    path: &str,
    decl: &DelegateDecl,
) -> Result<()>
where
    P: ResolvedAstProvider + ?Sized,
    S: GraphStore,
{
    if let Some(delegate_id) = session.mint(decl.symbol)? {
        session
            .sink
            .attach_symbol_location(delegate_id, path, decl.identifier)?;
    }
    Ok(())
}

/// Phase B view of a type declaration: only moves the type cursor.
pub(crate) fn enter_type<P, S>(
    session: &IndexSession<'_, P, S>,
    node: &SyntaxNode,
    ctx: WalkContext,
) -> Result<WalkContext>
where
    P: ResolvedAstProvider + ?Sized,
    S: GraphStore,
{
    let symbol = match &node.kind {
        SyntaxKind::Class(decl) | SyntaxKind::Struct(decl) | SyntaxKind::Interface(decl) => {
            decl.symbol
        }
        SyntaxKind::Enum(decl) => decl.symbol,
        _ => return Ok(ctx),
    };
    Ok(match session.mint(symbol)? {
        Some(type_id) => ctx.enter_type(type_id),
        None => ctx,
    })
}
