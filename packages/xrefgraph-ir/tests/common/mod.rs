//! Shared fixtures for the indexing integration tests
#![allow(dead_code)]

use xrefgraph_ir::shared::models::{
    ConstructorDecl, FieldDecl, MethodDecl, ObjectCreationExpr, Span, SymbolInfo, SymbolRef,
    SyntaxKind, SyntaxNode, TypeDecl, TypeKind, TypeRefSyntax, VariableDecl,
};
use xrefgraph_ir::{IndexStats, Indexer, IndexerConfig, ParallelConfig, ProjectBuilder, ResolvedProject};
use xrefgraph_storage::{InMemoryGraphStore, ReferenceKind, StoredReference, SymbolId};

// ═══════════════════════════════════════════════════════════════════════════
// Running
// ═══════════════════════════════════════════════════════════════════════════

pub fn config() -> IndexerConfig {
    IndexerConfig::new("unused.sqlite")
}

pub fn sequential() -> IndexerConfig {
    config().parallel(ParallelConfig::sequential())
}

pub fn index(project: &ResolvedProject) -> (InMemoryGraphStore, IndexStats) {
    index_with(project, config())
}

pub fn index_with(project: &ResolvedProject, config: IndexerConfig) -> (InMemoryGraphStore, IndexStats) {
    let store = InMemoryGraphStore::new();
    let stats = Indexer::new(config)
        .index(project, store.clone())
        .expect("indexing failed");
    (store, stats)
}

pub fn references_of(store: &InMemoryGraphStore, kind: ReferenceKind) -> Vec<StoredReference> {
    store
        .references()
        .into_iter()
        .filter(|r| r.kind == kind)
        .collect()
}

pub fn id_of(store: &InMemoryGraphStore, qualified_name: &str) -> SymbolId {
    store
        .find_symbol(qualified_name)
        .unwrap_or_else(|| panic!("symbol {} not stored", qualified_name))
        .id
}

// ═══════════════════════════════════════════════════════════════════════════
// Syntax
// ═══════════════════════════════════════════════════════════════════════════

pub fn sp(line: u32, start: u32, end: u32) -> Span {
    Span::new(line, start, line, end)
}

pub fn ty(line: u32, start: u32, end: u32, resolved: SymbolRef) -> TypeRefSyntax {
    TypeRefSyntax::new(sp(line, start, end), Some(resolved))
}

pub fn namespace(name: &str, children: Vec<SyntaxNode>) -> SyntaxNode {
    SyntaxNode::new(
        Span::new(0, 0, 100, 1),
        SyntaxKind::Namespace {
            name: name.to_string(),
        },
    )
    .with_children(children)
}

fn type_decl(symbol: SymbolRef, line: u32, base_list: Vec<TypeRefSyntax>) -> TypeDecl {
    TypeDecl {
        symbol,
        identifier: sp(line, 10, 11),
        base_list,
        type_constraints: Vec::new(),
        attributes: Vec::new(),
    }
}

pub fn class(
    symbol: SymbolRef,
    line: u32,
    base_list: Vec<TypeRefSyntax>,
    members: Vec<SyntaxNode>,
) -> SyntaxNode {
    SyntaxNode::new(
        sp(line, 4, 40),
        SyntaxKind::Class(type_decl(symbol, line, base_list)),
    )
    .with_children(members)
}

pub fn structure(
    symbol: SymbolRef,
    line: u32,
    base_list: Vec<TypeRefSyntax>,
    members: Vec<SyntaxNode>,
) -> SyntaxNode {
    SyntaxNode::new(
        sp(line, 4, 40),
        SyntaxKind::Struct(type_decl(symbol, line, base_list)),
    )
    .with_children(members)
}

pub fn interface(symbol: SymbolRef, line: u32, members: Vec<SyntaxNode>) -> SyntaxNode {
    SyntaxNode::new(
        sp(line, 4, 40),
        SyntaxKind::Interface(type_decl(symbol, line, Vec::new())),
    )
    .with_children(members)
}

pub fn method(
    symbol: SymbolRef,
    line: u32,
    parameters: Vec<TypeRefSyntax>,
    body: Vec<SyntaxNode>,
) -> SyntaxNode {
    SyntaxNode::new(
        sp(line, 8, 60),
        SyntaxKind::Method(MethodDecl {
            symbol,
            identifier: sp(line, 20, 23),
            signature: Some(sp(line, 20, 30)),
            return_type: None,
            parameters,
            type_constraints: Vec::new(),
            attributes: Vec::new(),
        }),
    )
    .with_children(body)
}

pub fn constructor(symbol: SymbolRef, line: u32, body: Vec<SyntaxNode>) -> SyntaxNode {
    SyntaxNode::new(
        sp(line, 8, 60),
        SyntaxKind::Constructor(ConstructorDecl {
            symbol,
            identifier: sp(line, 15, 20),
            signature: None,
            parameters: Vec::new(),
            attributes: Vec::new(),
        }),
    )
    .with_children(body)
}

pub fn field(field_type: TypeRefSyntax, line: u32, variables: &[SymbolRef]) -> SyntaxNode {
    let variables = variables
        .iter()
        .enumerate()
        .map(|(n, symbol)| VariableDecl {
            symbol: *symbol,
            identifier: sp(line, 30 + 4 * n as u32, 32 + 4 * n as u32),
        })
        .collect();
    SyntaxNode::new(
        sp(line, 8, 60),
        SyntaxKind::Field(FieldDecl {
            ty: field_type,
            variables,
            attributes: Vec::new(),
        }),
    )
}

pub fn ident(line: u32, info: SymbolInfo) -> SyntaxNode {
    SyntaxNode::new(sp(line, 12, 13), SyntaxKind::IdentifierName(info))
}

pub fn member_access(line: u32, info: SymbolInfo, receiver: SyntaxNode) -> SyntaxNode {
    SyntaxNode::new(sp(line, 12, 15), SyntaxKind::MemberAccess(info)).with_children(vec![receiver])
}

pub fn invocation(line: u32, info: SymbolInfo, callee: SyntaxNode, args: Vec<SyntaxNode>) -> SyntaxNode {
    let mut children = vec![callee];
    children.extend(args);
    SyntaxNode::new(sp(line, 12, 20), SyntaxKind::Invocation(info)).with_children(children)
}

pub fn object_creation(line: u32, created: TypeRefSyntax, constructor: SymbolInfo) -> SyntaxNode {
    SyntaxNode::new(
        sp(line, 12, 30),
        SyntaxKind::ObjectCreation(ObjectCreationExpr {
            ty: created,
            constructor,
        }),
    )
}

// ═══════════════════════════════════════════════════════════════════════════
// Projects
// ═══════════════════════════════════════════════════════════════════════════

/// ```csharp
/// namespace N {
///     interface I { void M(); }
///     class C : I { public void M() {} }
///     class Caller { void Run(I i) { i.M(); } }
/// }
/// ```
pub fn interface_call() -> ResolvedProject {
    let mut b = ProjectBuilder::new("App");
    let void = b.external_type("void", TypeKind::Struct);
    let i = b.interface("N.I");
    let im = b.method(i, "M", void, &[]);
    let c = b.class("N.C");
    let cm = b.method(c, "M", void, &[]);
    b.implements(c, i).implement_member(c, im, cm);
    let caller = b.class("N.Caller");
    let run = b.method(caller, "Run", void, &[("i", i)]);
    let param = b.parameter("i", i);

    let call = invocation(
        9,
        SymbolInfo::resolved(im, "i.M()"),
        member_access(
            9,
            SymbolInfo::resolved(im, "i.M"),
            ident(9, SymbolInfo::resolved(param, "i")),
        ),
        vec![],
    );

    b.unit(
        "/src/Interfaces.cs",
        vec![namespace(
            "N",
            vec![
                interface(i, 1, vec![method(im, 2, vec![], vec![])]),
                class(c, 4, vec![ty(4, 14, 15, i)], vec![method(cm, 5, vec![], vec![])]),
            ],
        )],
    );
    b.unit(
        "/src/Caller.cs",
        vec![namespace(
            "N",
            vec![class(
                caller,
                7,
                vec![],
                vec![method(run, 8, vec![ty(8, 24, 27, i)], vec![call])],
            )],
        )],
    );
    b.build()
}
