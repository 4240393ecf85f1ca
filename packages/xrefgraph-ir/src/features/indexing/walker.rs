//! Pre-order walk of one compilation unit
//!
//! Iterative, with an explicit stack of `(node, context)` pairs so deeply
//! nested expressions cannot exhaust the worker's stack.

use tracing::debug;
use xrefgraph_storage::GraphStore;

use super::handlers;
use super::session::{IndexSession, WalkContext, WalkPhase};
use crate::errors::Result;
use crate::features::resolved_ast::ResolvedAstProvider;
use crate::shared::models::{CompilationUnit, SyntaxKind, SyntaxNode};

pub fn walk_unit<P, S>(
    session: &IndexSession<'_, P, S>,
    unit: &CompilationUnit,
    phase: WalkPhase,
) -> Result<()>
where
    P: ResolvedAstProvider + ?Sized,
    S: GraphStore,
{
    debug!("Walking {} ({})", unit.path, phase.as_str());

    let mut stack: Vec<(&SyntaxNode, WalkContext)> = unit
        .nodes
        .iter()
        .rev()
        .map(|node| (node, WalkContext::default()))
        .collect();
    let mut visited = 0usize;

    while let Some((node, ctx)) = stack.pop() {
        visited += 1;
        let child_ctx = handlers::dispatch(session, &unit.path, node, ctx, phase)?;

        // first child of an invocation is its callee
        let is_invocation = matches!(node.kind, SyntaxKind::Invocation(_));
        for (idx, child) in node.children.iter().enumerate().rev() {
            stack.push((child, child_ctx.callee(is_invocation && idx == 0)));
        }
    }

    debug!("Walked {} ({} nodes)", unit.path, visited);
    Ok(())
}
