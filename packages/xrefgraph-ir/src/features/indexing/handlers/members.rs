//! Phase B: member declarations
//!
//! Each handler mints the member, records its definition location and the
//! type mentions in its signature, and returns the cursor its body is walked
//! with. A member whose name is suppressed clears the member cursor so its
//! body records nothing.

use xrefgraph_storage::{GraphStore, ReferenceKind, SymbolId};

use crate::errors::Result;
use crate::features::indexing::session::{IndexSession, WalkContext};
use crate::features::resolved_ast::ResolvedAstProvider;
use crate::shared::models::{ConstructorDecl, EventDecl, FieldDecl, MethodDecl, PropertyDecl};

pub(crate) fn visit_method<P, S>(
    session: &IndexSession<'_, P, S>,
    path: &str,
    decl: &MethodDecl,
    ctx: WalkContext,
) -> Result<WalkContext>
where
    P: ResolvedAstProvider + ?Sized,
    S: GraphStore,
{
    let Some(method_id) = session.mint(decl.symbol)? else {
        return Ok(ctx.enter_member(None));
    };
    session
        .sink
        .attach_symbol_location(method_id, path, decl.identifier)?;
    if let Some(signature) = decl.signature {
        session
            .sink
            .attach_symbol_signature_location(method_id, path, signature)?;
    }

    if let Some(return_type) = &decl.return_type {
        session.type_reference(method_id, return_type, ReferenceKind::TypeUsage, path)?;
    }
    session.type_references(method_id, &decl.parameters, ReferenceKind::TypeUsage, path)?;
    session.type_references(
        method_id,
        &decl.type_constraints,
        ReferenceKind::TypeArgument,
        path,
    )?;
    session.type_references(method_id, &decl.attributes, ReferenceKind::AnnotationUsage, path)?;

    Ok(ctx.enter_member(Some(method_id)))
}

pub(crate) fn visit_constructor<P, S>(
    session: &IndexSession<'_, P, S>,
    path: &str,
    decl: &ConstructorDecl,
    ctx: WalkContext,
) -> Result<WalkContext>
where
    P: ResolvedAstProvider + ?Sized,
    S: GraphStore,
{
    let Some(ctor_id) = session.mint(decl.symbol)? else {
        return Ok(ctx.enter_member(None));
    };
    session
        .sink
        .attach_symbol_location(ctor_id, path, decl.identifier)?;
    if let Some(signature) = decl.signature {
        session
            .sink
            .attach_symbol_signature_location(ctor_id, path, signature)?;
    }

    session.type_references(ctor_id, &decl.parameters, ReferenceKind::TypeUsage, path)?;
    session.type_references(ctor_id, &decl.attributes, ReferenceKind::AnnotationUsage, path)?;

    Ok(ctx.enter_member(Some(ctor_id)))
}

pub(crate) fn visit_property<P, S>(
    session: &IndexSession<'_, P, S>,
    path: &str,
    decl: &PropertyDecl,
    ctx: WalkContext,
) -> Result<WalkContext>
where
    P: ResolvedAstProvider + ?Sized,
    S: GraphStore,
{
    let Some(property_id) = session.mint(decl.symbol)? else {
        return Ok(ctx.enter_member(None));
    };
    session
        .sink
        .attach_symbol_location(property_id, path, decl.identifier)?;
    session.type_reference(property_id, &decl.ty, ReferenceKind::TypeUsage, path)?;
    session.type_references(
        property_id,
        &decl.attributes,
        ReferenceKind::AnnotationUsage,
        path,
    )?;

    Ok(ctx.enter_member(Some(property_id)))
}

pub(crate) fn visit_event<P, S>(
    session: &IndexSession<'_, P, S>,
    path: &str,
    decl: &EventDecl,
    ctx: WalkContext,
) -> Result<WalkContext>
where
    P: ResolvedAstProvider + ?Sized,
    S: GraphStore,
{
    let Some(event_id) = session.mint(decl.symbol)? else {
        return Ok(ctx.enter_member(None));
    };
    session
        .sink
        .attach_symbol_location(event_id, path, decl.identifier)?;
    session.type_reference(event_id, &decl.ty, ReferenceKind::TypeUsage, path)?;
    session.type_references(event_id, &decl.attributes, ReferenceKind::AnnotationUsage, path)?;

    Ok(ctx.enter_member(Some(event_id)))
}

/// `int a, b;`: one qualifier location on the shared type mention, one field
/// symbol and one TypeUsage per variable. Initializers are walked with the
/// last variable as member cursor.
pub(crate) fn visit_field<P, S>(
    session: &IndexSession<'_, P, S>,
    path: &str,
    decl: &FieldDecl,
    ctx: WalkContext,
) -> Result<WalkContext>
where
    P: ResolvedAstProvider + ?Sized,
    S: GraphStore,
{
    let type_id = session.mint_type(&decl.ty)?;
    if let Some(type_id) = type_id {
        session
            .sink
            .attach_qualifier_location(type_id, path, decl.ty.span)?;
    }

    let mut field_ids: Vec<SymbolId> = Vec::with_capacity(decl.variables.len());
    for variable in &decl.variables {
        let Some(field_id) = session.mint(variable.symbol)? else {
            continue;
        };
        session
            .sink
            .attach_symbol_location(field_id, path, variable.identifier)?;
        if let Some(type_id) = type_id {
            session.reference(
                field_id,
                type_id,
                ReferenceKind::TypeUsage,
                path,
                decl.ty.span,
                false,
            )?;
        }
        field_ids.push(field_id);
    }

    if let Some(attribute_source) = field_ids.first().copied().or(type_id) {
        session.type_references(
            attribute_source,
            &decl.attributes,
            ReferenceKind::AnnotationUsage,
            path,
        )?;
    }

    Ok(ctx.enter_member(field_ids.last().copied()))
}
