//! Phase B: expressions
//!
//! Every reference is sourced from the enclosing member; outside a member
//! nothing is recorded. Candidate lists yield one ambiguous reference per
//! candidate. References to interface methods, properties and events are
//! mirrored onto each known implementation.

use xrefgraph_storage::{GraphStore, ReferenceKind, SymbolId};

use crate::errors::Result;
use crate::features::indexing::session::{IndexSession, WalkContext};
use crate::features::resolved_ast::ResolvedAstProvider;
use crate::shared::models::{
    MethodKind, ObjectCreationExpr, SemanticKind, SemanticSymbol, Span, SymbolInfo, SymbolRef,
};

/// Identifier or member-access name
pub(crate) fn visit_name<P, S>(
    session: &IndexSession<'_, P, S>,
    path: &str,
    span: Span,
    info: &SymbolInfo,
    ctx: WalkContext,
) -> Result<()>
where
    P: ResolvedAstProvider + ?Sized,
    S: GraphStore,
{
    let Some(source) = ctx.member_id else {
        return Ok(());
    };
    // the invocation records the call (or the diagnostic)
    if ctx.in_callee && names_method(session, info) {
        return Ok(());
    }

    let targets = info.targets();
    if targets.is_empty() {
        return unresolved(session, path, span, info);
    }
    let ambiguous = info.is_ambiguous();
    for target in targets {
        name_reference(session, path, span, source, target, ambiguous)?;
    }
    Ok(())
}

pub(crate) fn visit_invocation<P, S>(
    session: &IndexSession<'_, P, S>,
    path: &str,
    span: Span,
    info: &SymbolInfo,
    ctx: WalkContext,
) -> Result<()>
where
    P: ResolvedAstProvider + ?Sized,
    S: GraphStore,
{
    let Some(source) = ctx.member_id else {
        return Ok(());
    };

    let targets = info.targets();
    if targets.is_empty() {
        return unresolved(session, path, span, info);
    }
    let ambiguous = info.is_ambiguous();
    for target in targets {
        let callee = unreduced(session, target);
        member_reference(session, path, span, source, callee, ReferenceKind::Call, ambiguous)?;
    }
    Ok(())
}

/// `new T(..)`: TypeUsage of `T` plus a Call to the constructor
pub(crate) fn visit_object_creation<P, S>(
    session: &IndexSession<'_, P, S>,
    path: &str,
    span: Span,
    expr: &ObjectCreationExpr,
    ctx: WalkContext,
) -> Result<()>
where
    P: ResolvedAstProvider + ?Sized,
    S: GraphStore,
{
    let Some(source) = ctx.member_id else {
        return Ok(());
    };
    let created = expr.ty.resolved.and_then(|ty| session.symbol(ty));
    if created.is_some_and(SemanticSymbol::is_anonymous_type) {
        return Ok(());
    }

    session.type_reference(source, &expr.ty, ReferenceKind::TypeUsage, path)?;

    let targets = expr.constructor.targets();
    if targets.is_empty() {
        return unresolved(session, path, span, &expr.constructor);
    }
    let ambiguous = expr.constructor.is_ambiguous();
    for target in targets {
        member_reference(session, path, span, source, target, ReferenceKind::Call, ambiguous)?;
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════
// Helpers
// ═══════════════════════════════════════════════════════════════════════════

fn names_method<P, S>(session: &IndexSession<'_, P, S>, info: &SymbolInfo) -> bool
where
    P: ResolvedAstProvider + ?Sized,
    S: GraphStore,
{
    let targets = info.targets();
    targets.is_empty()
        || targets
            .iter()
            .any(|t| session.symbol(*t).is_some_and(SemanticSymbol::is_method))
}

fn name_reference<P, S>(
    session: &IndexSession<'_, P, S>,
    path: &str,
    span: Span,
    source: SymbolId,
    target: SymbolRef,
    ambiguous: bool,
) -> Result<()>
where
    P: ResolvedAstProvider + ?Sized,
    S: GraphStore,
{
    let Some(symbol) = session.symbol(target) else {
        return Ok(());
    };
    match &symbol.kind {
        SemanticKind::Method { .. }
        | SemanticKind::Property { .. }
        | SemanticKind::Field { .. }
        | SemanticKind::Event { .. } => {
            member_reference(session, path, span, source, target, ReferenceKind::Usage, ambiguous)
        }
        SemanticKind::NamedType { .. } | SemanticKind::Array { .. } => {
            type_usage(session, path, span, source, target, ambiguous)
        }
        SemanticKind::Parameter { ty } | SemanticKind::Local { ty } => {
            type_usage(session, path, span, source, *ty, ambiguous)
        }
        SemanticKind::Namespace | SemanticKind::TypeParameter | SemanticKind::Error => Ok(()),
    }
}

fn type_usage<P, S>(
    session: &IndexSession<'_, P, S>,
    path: &str,
    span: Span,
    source: SymbolId,
    ty: SymbolRef,
    ambiguous: bool,
) -> Result<()>
where
    P: ResolvedAstProvider + ?Sized,
    S: GraphStore,
{
    let Some(type_id) = session.mint(session.element_type(ty))? else {
        return Ok(());
    };
    session.sink.attach_qualifier_location(type_id, path, span)?;
    session.reference(source, type_id, ReferenceKind::TypeUsage, path, span, ambiguous)?;
    Ok(())
}

/// Reference to a member, plus one per implementation when the member is
/// declared on an interface.
fn member_reference<P, S>(
    session: &IndexSession<'_, P, S>,
    path: &str,
    span: Span,
    source: SymbolId,
    target: SymbolRef,
    kind: ReferenceKind,
    ambiguous: bool,
) -> Result<()>
where
    P: ResolvedAstProvider + ?Sized,
    S: GraphStore,
{
    let Some(target_id) = session.mint(target)? else {
        return Ok(());
    };
    session.reference(source, target_id, kind, path, span, ambiguous)?;

    for implementation in implementations_of(session, target) {
        if let Some(implementation_id) = session.mint(implementation)? {
            session.reference(source, implementation_id, kind, path, span, ambiguous)?;
        }
    }
    Ok(())
}

/// Implementing members of an interface method, property or event
fn implementations_of<P, S>(session: &IndexSession<'_, P, S>, member: SymbolRef) -> Vec<SymbolRef>
where
    P: ResolvedAstProvider + ?Sized,
    S: GraphStore,
{
    let Some(symbol) = session.symbol(member) else {
        return Vec::new();
    };
    if !matches!(
        symbol.kind,
        SemanticKind::Method { .. } | SemanticKind::Property { .. } | SemanticKind::Event { .. }
    ) {
        return Vec::new();
    }
    let Some(interface) = symbol
        .containing_type
        .filter(|t| session.symbol(*t).is_some_and(SemanticSymbol::is_interface))
    else {
        return Vec::new();
    };

    session
        .interfaces
        .implementors_of(interface)
        .into_iter()
        .filter_map(|implementor| {
            session
                .provider
                .find_implementation(implementor, member)
                .or_else(|| {
                    symbol
                        .original_definition
                        .and_then(|def| session.provider.find_implementation(implementor, def))
                })
        })
        .collect()
}

/// Extension method called with instance syntax → its declaration
fn unreduced<P, S>(session: &IndexSession<'_, P, S>, target: SymbolRef) -> SymbolRef
where
    P: ResolvedAstProvider + ?Sized,
    S: GraphStore,
{
    match session.symbol(target).map(|s| &s.kind) {
        Some(SemanticKind::Method {
            method_kind: MethodKind::ReducedExtension,
            reduced_from: Some(definition),
            ..
        }) => *definition,
        _ => target,
    }
}

fn unresolved<P, S>(
    session: &IndexSession<'_, P, S>,
    path: &str,
    span: Span,
    info: &SymbolInfo,
) -> Result<()>
where
    P: ResolvedAstProvider + ?Sized,
    S: GraphStore,
{
    let message = format!("Unable to determine type-information for '{}'", info.text);
    session
        .sink
        .record_diagnostic(&message, false, Some(path), span)
}
