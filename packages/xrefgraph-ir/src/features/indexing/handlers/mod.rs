//! Node handlers
//!
//! `dispatch` routes a node to exactly one handler for the current phase and
//! returns the context its children are walked with.

mod declarations;
mod expressions;
mod members;

use xrefgraph_storage::GraphStore;

use super::session::{IndexSession, WalkContext, WalkPhase};
use crate::errors::Result;
use crate::features::resolved_ast::ResolvedAstProvider;
use crate::shared::models::{SyntaxKind, SyntaxNode};

pub(crate) fn dispatch<P, S>(
    session: &IndexSession<'_, P, S>,
    path: &str,
    node: &SyntaxNode,
    ctx: WalkContext,
    phase: WalkPhase,
) -> Result<WalkContext>
where
    P: ResolvedAstProvider + ?Sized,
    S: GraphStore,
{
    match phase {
        WalkPhase::Declarations => dispatch_declaration(session, path, node, ctx),
        WalkPhase::Members => dispatch_member(session, path, node, ctx),
    }
}

fn dispatch_declaration<P, S>(
    session: &IndexSession<'_, P, S>,
    path: &str,
    node: &SyntaxNode,
    ctx: WalkContext,
) -> Result<WalkContext>
where
    P: ResolvedAstProvider + ?Sized,
    S: GraphStore,
{
    match &node.kind {
        SyntaxKind::Namespace { name } => declarations::visit_namespace(session, path, name)?,
        SyntaxKind::Class(decl) | SyntaxKind::Struct(decl) | SyntaxKind::Interface(decl) => {
            declarations::visit_type(session, path, decl)?
        }
        SyntaxKind::Enum(decl) => declarations::visit_enum(session, path, decl)?,
        SyntaxKind::Delegate(decl) => declarations::visit_delegate(session, path, decl)?,
        SyntaxKind::Method(_)
        | SyntaxKind::Constructor(_)
        | SyntaxKind::Property(_)
        | SyntaxKind::Field(_)
        | SyntaxKind::Event(_)
        | SyntaxKind::IdentifierName(_)
        | SyntaxKind::MemberAccess(_)
        | SyntaxKind::Invocation(_)
        | SyntaxKind::ObjectCreation(_)
        | SyntaxKind::Other => {}
    }
    Ok(ctx)
}

fn dispatch_member<P, S>(
    session: &IndexSession<'_, P, S>,
    path: &str,
    node: &SyntaxNode,
    ctx: WalkContext,
) -> Result<WalkContext>
where
    P: ResolvedAstProvider + ?Sized,
    S: GraphStore,
{
    match &node.kind {
        SyntaxKind::Class(_) | SyntaxKind::Struct(_) | SyntaxKind::Interface(_) | SyntaxKind::Enum(_) => {
            declarations::enter_type(session, node, ctx)
        }
        SyntaxKind::Method(decl) => members::visit_method(session, path, decl, ctx),
        SyntaxKind::Constructor(decl) => members::visit_constructor(session, path, decl, ctx),
        SyntaxKind::Property(decl) => members::visit_property(session, path, decl, ctx),
        SyntaxKind::Field(decl) => members::visit_field(session, path, decl, ctx),
        SyntaxKind::Event(decl) => members::visit_event(session, path, decl, ctx),
        SyntaxKind::IdentifierName(info) | SyntaxKind::MemberAccess(info) => {
            expressions::visit_name(session, path, node.span, info, ctx)?;
            Ok(ctx.callee(false))
        }
        SyntaxKind::Invocation(info) => {
            expressions::visit_invocation(session, path, node.span, info, ctx)?;
            Ok(ctx.callee(false))
        }
        SyntaxKind::ObjectCreation(expr) => {
            expressions::visit_object_creation(session, path, node.span, expr, ctx)?;
            Ok(ctx.callee(false))
        }
        SyntaxKind::Namespace { .. } | SyntaxKind::Delegate(_) | SyntaxKind::Other => {
            Ok(ctx.callee(false))
        }
    }
}
