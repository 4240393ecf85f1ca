//! Indexing session and traversal context
//!
//! One `IndexSession` exists per run and is shared by reference with every
//! walker thread. `WalkContext` is the per-traversal cursor: it is copied into
//! each child visit, so leaving a declaration's subtree restores the outer
//! cursor automatically.

use xrefgraph_storage::{GraphStore, ReferenceId, ReferenceKind, SymbolId, SymbolKind};

use crate::errors::Result;
use crate::features::graph_sink::GraphSink;
use crate::features::interface_index::InterfaceIndex;
use crate::features::name_encoding::NameEncoder;
use crate::features::resolved_ast::ResolvedAstProvider;
use crate::shared::models::{
    SemanticKind, SemanticSymbol, Span, SymbolRef, TypeKind, TypeRefSyntax,
};

const MAX_ARRAY_RANK: usize = 32;

/// Walk phase. Declarations must finish for every file before members start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkPhase {
    Declarations,
    Members,
}

impl WalkPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            WalkPhase::Declarations => "declarations",
            WalkPhase::Members => "members",
        }
    }
}

/// Innermost enclosing declarations of the node being visited
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkContext {
    pub type_id: Option<SymbolId>,
    pub member_id: Option<SymbolId>,
    /// Node is the callee of the enclosing invocation
    pub in_callee: bool,
}

impl WalkContext {
    pub fn enter_type(self, type_id: SymbolId) -> Self {
        Self {
            type_id: Some(type_id),
            member_id: None,
            in_callee: false,
        }
    }

    pub fn enter_member(self, member_id: Option<SymbolId>) -> Self {
        Self {
            member_id,
            in_callee: false,
            ..self
        }
    }

    pub fn callee(self, in_callee: bool) -> Self {
        Self { in_callee, ..self }
    }
}

pub struct IndexSession<'a, P: ResolvedAstProvider + ?Sized, S: GraphStore> {
    pub provider: &'a P,
    pub encoder: NameEncoder<'a, P>,
    pub interfaces: InterfaceIndex,
    pub sink: GraphSink<S>,
}

impl<'a, P: ResolvedAstProvider + ?Sized, S: GraphStore> IndexSession<'a, P, S> {
    pub fn new(provider: &'a P, sink: GraphSink<S>, omit_externals: bool) -> Self {
        Self {
            provider,
            encoder: NameEncoder::new(provider, omit_externals),
            interfaces: InterfaceIndex::new(),
            sink,
        }
    }

    pub fn symbol(&self, id: SymbolRef) -> Option<&'a SemanticSymbol> {
        self.provider.symbol(id)
    }

    /// Store id for `id`, or `None` when its name is suppressed.
    pub fn mint(&self, id: SymbolRef) -> Result<Option<SymbolId>> {
        let encoded = self.encoder.encode(id);
        if encoded.is_suppressed() {
            return Ok(None);
        }
        let kind = self.symbol_kind(id);
        self.sink
            .resolve_symbol(&encoded.name, kind, &encoded.prefix, &encoded.postfix)
            .map(Some)
    }

    /// Store id for the element type of a type mention
    pub fn mint_type(&self, ty: &TypeRefSyntax) -> Result<Option<SymbolId>> {
        match ty.resolved {
            Some(resolved) => self.mint(self.element_type(resolved)),
            None => Ok(None),
        }
    }

    /// Array element type (recursively), or `id` itself
    pub fn element_type(&self, id: SymbolRef) -> SymbolRef {
        let mut current = id;
        for _ in 0..MAX_ARRAY_RANK {
            match self.symbol(current).map(|s| &s.kind) {
                Some(SemanticKind::Array { element }) => current = *element,
                _ => break,
            }
        }
        current
    }

    /// Record a reference with its location, flagged ambiguous if asked.
    pub fn reference(
        &self,
        source: SymbolId,
        target: SymbolId,
        kind: ReferenceKind,
        path: &str,
        span: Span,
        ambiguous: bool,
    ) -> Result<ReferenceId> {
        let reference_id = self.sink.record_reference(source, target, kind)?;
        self.sink.attach_reference_location(reference_id, path, span)?;
        if ambiguous {
            self.sink.mark_ambiguous(reference_id)?;
        }
        Ok(reference_id)
    }

    /// Reference from `source` to the type mentioned at `ty`, with a
    /// qualifier location on the type. Unbound and suppressed types are skipped.
    pub fn type_reference(
        &self,
        source: SymbolId,
        ty: &TypeRefSyntax,
        kind: ReferenceKind,
        path: &str,
    ) -> Result<()> {
        let Some(target) = self.mint_type(ty)? else {
            return Ok(());
        };
        self.sink.attach_qualifier_location(target, path, ty.span)?;
        self.reference(source, target, kind, path, ty.span, false)?;
        Ok(())
    }

    pub fn type_references(
        &self,
        source: SymbolId,
        types: &[TypeRefSyntax],
        kind: ReferenceKind,
        path: &str,
    ) -> Result<()> {
        types
            .iter()
            .try_for_each(|ty| self.type_reference(source, ty, kind, path))
    }

    /// Stored kind for a provider symbol
    pub fn symbol_kind(&self, id: SymbolRef) -> SymbolKind {
        let Some(symbol) = self.symbol(self.element_type(id)) else {
            return SymbolKind::Class;
        };
        match &symbol.kind {
            SemanticKind::Namespace => SymbolKind::Namespace,
            SemanticKind::NamedType { type_kind, .. } => match type_kind {
                TypeKind::Class => SymbolKind::Class,
                TypeKind::Struct => SymbolKind::Struct,
                TypeKind::Interface => SymbolKind::Interface,
                TypeKind::Enum => SymbolKind::Enum,
                TypeKind::Delegate => SymbolKind::Function,
            },
            SemanticKind::TypeParameter => SymbolKind::TypeParameter,
            SemanticKind::Method { .. } => SymbolKind::Method,
            SemanticKind::Field { .. } if self.is_enum_member(symbol) => SymbolKind::EnumConstant,
            SemanticKind::Property { .. }
            | SemanticKind::Field { .. }
            | SemanticKind::Event { .. }
            | SemanticKind::Parameter { .. }
            | SemanticKind::Local { .. } => SymbolKind::Field,
            SemanticKind::Array { .. } | SemanticKind::Error => SymbolKind::Class,
        }
    }

    fn is_enum_member(&self, symbol: &SemanticSymbol) -> bool {
        symbol
            .containing_type
            .and_then(|t| self.symbol(t))
            .and_then(SemanticSymbol::type_kind)
            == Some(TypeKind::Enum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IndexerConfig;
    use crate::features::resolved_ast::ProjectBuilder;
    use xrefgraph_storage::InMemoryGraphStore;

    #[test]
    fn test_context_scoping() {
        let root = WalkContext::default();
        let in_type = root.enter_type(3);
        let in_member = in_type.enter_member(Some(7)).callee(true);

        assert_eq!(in_member.type_id, Some(3));
        assert_eq!(in_member.member_id, Some(7));
        assert!(in_member.in_callee);

        let nested = in_member.enter_type(9);
        assert_eq!(nested.member_id, None);
        assert!(!nested.in_callee);
        assert_eq!(root, WalkContext::default());
    }

    #[test]
    fn test_symbol_kinds() {
        let mut b = ProjectBuilder::new("App");
        let color = b.named_type("N.Color", TypeKind::Enum);
        let red = b.enum_member(color, "Red");
        let handler = b.named_type("N.Handler", TypeKind::Delegate);
        let c = b.class("N.C");
        let p = b.property(c, "P", color);
        let arr = b.array_of(c);
        let project = b.build();

        let store = InMemoryGraphStore::new();
        let sink = GraphSink::open(store, &IndexerConfig::new("unused.db")).unwrap();
        let session = IndexSession::new(&project, sink, false);

        assert_eq!(session.symbol_kind(red), SymbolKind::EnumConstant);
        assert_eq!(session.symbol_kind(handler), SymbolKind::Function);
        assert_eq!(session.symbol_kind(p), SymbolKind::Field);
        assert_eq!(session.symbol_kind(arr), SymbolKind::Class);
        assert_eq!(session.element_type(arr), c);
    }

    #[test]
    fn test_type_reference_skips_unbound() {
        let mut b = ProjectBuilder::new("App");
        let c = b.class("N.C");
        let t = b.type_parameter("T");
        let project = b.build();

        let store = InMemoryGraphStore::new();
        let sink = GraphSink::open(store.clone(), &IndexerConfig::new("unused.db")).unwrap();
        let session = IndexSession::new(&project, sink, false);
        let source = session.mint(c).unwrap().unwrap();

        let span = Span::new(0, 0, 0, 1);
        for ty in [TypeRefSyntax::new(span, None), TypeRefSyntax::new(span, Some(t))] {
            session
                .type_reference(source, &ty, ReferenceKind::TypeUsage, "/a.cs")
                .unwrap();
        }
        assert!(store.references().is_empty());

        let bound = TypeRefSyntax::new(span, Some(c));
        session
            .type_reference(source, &bound, ReferenceKind::TypeUsage, "/a.cs")
            .unwrap();
        assert_eq!(store.references().len(), 1);
    }
}
