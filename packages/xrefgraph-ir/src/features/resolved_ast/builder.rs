//! Fluent construction of provider snapshots
//!
//! Test fixtures: provider snapshots built in code instead of loaded from
//! JSON. Compiled for unit tests and behind the `test-fixtures` feature.

use super::project::ResolvedProject;
use crate::shared::models::{
    Accessibility, CompilationUnit, InterfaceImplementation, MethodKind, SemanticKind,
    SemanticSymbol, SymbolRef, SyntaxNode, TypeKind,
};

/// Assembly name given to `external_*` symbols
pub const EXTERNAL_ASSEMBLY: &str = "mscorlib";

#[derive(Debug, Clone)]
pub struct ProjectBuilder {
    project: ResolvedProject,
}

impl ProjectBuilder {
    pub fn new(assembly: impl Into<String>) -> Self {
        Self {
            project: ResolvedProject::new(assembly),
        }
    }

    pub fn build(self) -> ResolvedProject {
        self.project
    }

    /// Add a symbol verbatim
    pub fn add(&mut self, symbol: SemanticSymbol) -> SymbolRef {
        let id = SymbolRef(self.project.symbols.len() as u32);
        self.project.symbols.push(symbol);
        id
    }

    pub fn unit(&mut self, path: impl Into<String>, nodes: Vec<SyntaxNode>) -> &mut Self {
        self.project.units.push(CompilationUnit::new(path, nodes));
        self
    }

    pub fn symbol(&self, id: SymbolRef) -> &SemanticSymbol {
        &self.project.symbols[id.index()]
    }

    fn symbol_mut(&mut self, id: SymbolRef) -> &mut SemanticSymbol {
        &mut self.project.symbols[id.index()]
    }

    fn local(&self, name: &str, qualified: &str, kind: SemanticKind) -> SemanticSymbol {
        let mut symbol = SemanticSymbol::new(name, qualified, kind);
        symbol.assembly = Some(self.project.assembly.clone());
        symbol
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // Types
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    pub fn namespace(&mut self, qualified: &str) -> SymbolRef {
        let symbol = self.local(last_segment(qualified), qualified, SemanticKind::Namespace);
        self.add(symbol)
    }

    pub fn named_type(&mut self, qualified: &str, type_kind: TypeKind) -> SymbolRef {
        let mut symbol = self.local(last_segment(qualified), qualified, named(type_kind, false));
        symbol.accessibility = Accessibility::Public;
        self.add(symbol)
    }

    pub fn class(&mut self, qualified: &str) -> SymbolRef {
        self.named_type(qualified, TypeKind::Class)
    }

    pub fn interface(&mut self, qualified: &str) -> SymbolRef {
        self.named_type(qualified, TypeKind::Interface)
    }

    /// Type from a referenced assembly
    pub fn external_type(&mut self, qualified: &str, type_kind: TypeKind) -> SymbolRef {
        let id = self.named_type(qualified, type_kind);
        self.symbol_mut(id).assembly = Some(EXTERNAL_ASSEMBLY.to_string());
        id
    }

    /// Unbound generic definition, e.g. `N.Box<T>`
    pub fn generic_type(&mut self, qualified: &str, type_kind: TypeKind) -> SymbolRef {
        let id = self.named_type(qualified, type_kind);
        self.symbol_mut(id).kind = named(type_kind, true);
        id
    }

    /// Closed instantiation of `definition`, e.g. `N.Box<int>`
    pub fn construct(&mut self, definition: SymbolRef, qualified: &str) -> SymbolRef {
        let mut symbol = self.symbol(definition).clone();
        symbol.qualified_name = qualified.to_string();
        symbol.original_definition = Some(definition);
        self.add(symbol)
    }

    pub fn array_of(&mut self, element: SymbolRef) -> SymbolRef {
        let element_symbol = self.symbol(element);
        let name = format!("{}[]", element_symbol.name);
        let qualified = format!("{}[]", element_symbol.qualified_name);
        self.add(SemanticSymbol::new(
            name,
            qualified,
            SemanticKind::Array { element },
        ))
    }

    pub fn type_parameter(&mut self, name: &str) -> SymbolRef {
        let symbol = self.local(name, name, SemanticKind::TypeParameter);
        self.add(symbol)
    }

    pub fn error_type(&mut self, name: &str) -> SymbolRef {
        self.add(SemanticSymbol::new(name, name, SemanticKind::Error))
    }

    pub fn anonymous_type(&mut self) -> SymbolRef {
        let symbol = self.local(
            "",
            "<anonymous type>",
            SemanticKind::NamedType {
                type_kind: TypeKind::Class,
                is_generic: false,
                is_anonymous: true,
                all_interfaces: vec![],
                implementations: vec![],
            },
        );
        self.add(symbol)
    }

    /// Record that `class` implements `interface` (and its base interfaces)
    pub fn implements(&mut self, class: SymbolRef, interface: SymbolRef) -> &mut Self {
        let inherited = match &self.symbol(interface).kind {
            SemanticKind::NamedType { all_interfaces, .. } => all_interfaces.clone(),
            _ => Vec::new(),
        };
        if let SemanticKind::NamedType { all_interfaces, .. } = &mut self.symbol_mut(class).kind {
            for iface in std::iter::once(interface).chain(inherited) {
                if !all_interfaces.contains(&iface) {
                    all_interfaces.push(iface);
                }
            }
        }
        self
    }

    /// Record that `implementation` (a member of `class`) implements `interface_member`
    pub fn implement_member(
        &mut self,
        class: SymbolRef,
        interface_member: SymbolRef,
        implementation: SymbolRef,
    ) -> &mut Self {
        if let SemanticKind::NamedType {
            implementations, ..
        } = &mut self.symbol_mut(class).kind
        {
            implementations.push(InterfaceImplementation {
                interface_member,
                implementation,
            });
        }
        self
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // Members
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    fn member(&mut self, containing: SymbolRef, name: &str, kind: SemanticKind) -> SymbolRef {
        let container = self.symbol(containing);
        let qualified = format!("{}.{}", container.qualified_name, name);
        let mut symbol = SemanticSymbol::new(name, qualified, kind);
        symbol.assembly = container.assembly.clone();
        symbol.accessibility = Accessibility::Public;
        symbol.containing_type = Some(containing);
        self.add(symbol)
    }

    fn parameters(&mut self, params: &[(&str, SymbolRef)]) -> Vec<SymbolRef> {
        params
            .iter()
            .map(|(name, ty)| {
                let symbol = self.local(name, name, SemanticKind::Parameter { ty: *ty });
                self.add(symbol)
            })
            .collect()
    }

    pub fn method(
        &mut self,
        containing: SymbolRef,
        name: &str,
        return_type: SymbolRef,
        params: &[(&str, SymbolRef)],
    ) -> SymbolRef {
        let parameters = self.parameters(params);
        self.member(
            containing,
            name,
            SemanticKind::Method {
                method_kind: MethodKind::Ordinary,
                return_type: Some(return_type),
                parameters,
                is_extension: false,
                reduced_from: None,
            },
        )
    }

    pub fn constructor(&mut self, containing: SymbolRef, params: &[(&str, SymbolRef)]) -> SymbolRef {
        let parameters = self.parameters(params);
        let type_name = self.symbol(containing).name.clone();
        let id = self.member(
            containing,
            &type_name,
            SemanticKind::Method {
                method_kind: MethodKind::Constructor,
                return_type: None,
                parameters,
                is_extension: false,
                reduced_from: None,
            },
        );
        self.symbol_mut(id).name = ".ctor".to_string();
        id
    }

    /// Instance-syntax view of an extension method declared as `definition`
    pub fn reduced_extension(&mut self, definition: SymbolRef) -> SymbolRef {
        let mut symbol = self.symbol(definition).clone();
        if let SemanticKind::Method {
            method_kind,
            is_extension,
            reduced_from,
            parameters,
            ..
        } = &mut symbol.kind
        {
            *method_kind = MethodKind::ReducedExtension;
            *is_extension = true;
            *reduced_from = Some(definition);
            if !parameters.is_empty() {
                parameters.remove(0);
            }
        }
        self.add(symbol)
    }

    /// Member of a closed generic type (or closed generic method) bound to `definition`
    pub fn construct_member(&mut self, definition: SymbolRef, qualified: &str) -> SymbolRef {
        let mut symbol = self.symbol(definition).clone();
        symbol.qualified_name = qualified.to_string();
        symbol.original_definition = Some(definition);
        self.add(symbol)
    }

    pub fn property(&mut self, containing: SymbolRef, name: &str, ty: SymbolRef) -> SymbolRef {
        self.member(containing, name, SemanticKind::Property { ty })
    }

    pub fn field(&mut self, containing: SymbolRef, name: &str, ty: SymbolRef) -> SymbolRef {
        self.member(containing, name, SemanticKind::Field { ty })
    }

    pub fn event(&mut self, containing: SymbolRef, name: &str, ty: SymbolRef) -> SymbolRef {
        self.member(containing, name, SemanticKind::Event { ty })
    }

    pub fn enum_member(&mut self, containing: SymbolRef, name: &str) -> SymbolRef {
        let id = self.member(containing, name, SemanticKind::Field { ty: containing });
        self.symbol_mut(id).accessibility = Accessibility::Public;
        id
    }

    pub fn local_variable(&mut self, name: &str, ty: SymbolRef) -> SymbolRef {
        let symbol = self.local(name, name, SemanticKind::Local { ty });
        self.add(symbol)
    }

    pub fn parameter(&mut self, name: &str, ty: SymbolRef) -> SymbolRef {
        let symbol = self.local(name, name, SemanticKind::Parameter { ty });
        self.add(symbol)
    }

    pub fn set_accessibility(&mut self, id: SymbolRef, accessibility: Accessibility) -> &mut Self {
        self.symbol_mut(id).accessibility = accessibility;
        self
    }
}

fn named(type_kind: TypeKind, is_generic: bool) -> SemanticKind {
    SemanticKind::NamedType {
        type_kind,
        is_generic,
        is_anonymous: false,
        all_interfaces: vec![],
        implementations: vec![],
    }
}

/// `N.List<T>` → `List<T>`; dots inside generic arguments are ignored
fn last_segment(qualified: &str) -> &str {
    let mut depth = 0usize;
    let mut start = 0usize;
    for (idx, ch) in qualified.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            '.' if depth == 0 => start = idx + 1,
            _ => {}
        }
    }
    &qualified[start..]
}
