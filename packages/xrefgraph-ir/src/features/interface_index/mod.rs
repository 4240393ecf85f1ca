//! Interface Implementation Index
//!
//! Concurrent class ↔ interface map filled during the declaration phase and
//! read during the member phase, where a reference to an interface member
//! fans out to every implementor.
//!
//! Keys are the provider's `SymbolRef`s as they appear in each type's
//! `all_interfaces` list.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::shared::models::{SemanticKind, SemanticSymbol, SymbolRef, TypeKind};

#[derive(Debug, Default)]
pub struct InterfaceIndex {
    /// Concrete type → all implemented interfaces
    type_interfaces: DashMap<SymbolRef, Vec<SymbolRef>>,

    /// Interface → concrete types implementing it
    implementors: DashMap<SymbolRef, Vec<SymbolRef>>,
}

impl InterfaceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a declared type. Returns `true` the first time a class with at
    /// least one interface is registered; structs, interfaces, enums and
    /// types without interfaces are ignored.
    pub fn register(&self, id: SymbolRef, symbol: &SemanticSymbol) -> bool {
        let interfaces = match &symbol.kind {
            SemanticKind::NamedType {
                type_kind: TypeKind::Class,
                all_interfaces,
                ..
            } if !all_interfaces.is_empty() => all_interfaces.clone(),
            _ => return false,
        };

        match self.type_interfaces.entry(id) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(interfaces.clone());
                for interface in interfaces {
                    self.implementors
                        .entry(interface)
                        .or_insert_with(Vec::new)
                        .push(id);
                }
                true
            }
        }
    }

    /// Types implementing `interface`, ordered by symbol
    pub fn implementors_of(&self, interface: SymbolRef) -> Vec<SymbolRef> {
        let mut types = self
            .implementors
            .get(&interface)
            .map(|entry| entry.value().clone())
            .unwrap_or_default();
        types.sort();
        types
    }

    pub fn interfaces_of(&self, id: SymbolRef) -> Vec<SymbolRef> {
        self.type_interfaces
            .get(&id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    /// Number of registered implementing types
    pub fn len(&self) -> usize {
        self.type_interfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.type_interfaces.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::resolved_ast::{ProjectBuilder, ResolvedAstProvider};
    use rayon::prelude::*;

    #[test]
    fn test_register_and_lookup() {
        let mut b = ProjectBuilder::new("App");
        let i = b.interface("N.I");
        let j = b.interface("N.J");
        let c = b.class("N.C");
        let d = b.class("N.D");
        b.implements(c, i).implements(c, j).implements(d, i);
        let project = b.build();

        let index = InterfaceIndex::new();
        assert!(index.register(c, project.symbol(c).unwrap()));
        assert!(index.register(d, project.symbol(d).unwrap()));

        assert_eq!(index.implementors_of(i), vec![c, d]);
        assert_eq!(index.implementors_of(j), vec![c]);
        assert_eq!(index.interfaces_of(c), vec![i, j]);
        assert!(index.implementors_of(SymbolRef(42)).is_empty());
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut b = ProjectBuilder::new("App");
        let i = b.interface("N.I");
        let c = b.class("N.C");
        b.implements(c, i);
        let project = b.build();
        let symbol = project.symbol(c).unwrap();

        let index = InterfaceIndex::new();
        assert!(index.register(c, symbol));
        assert!(!index.register(c, symbol));
        assert_eq!(index.implementors_of(i), vec![c]);
    }

    #[test]
    fn test_interfaces_and_plain_types_ignored() {
        let mut b = ProjectBuilder::new("App");
        let base = b.interface("N.IBase");
        let derived = b.interface("N.IDerived");
        b.implements(derived, base);
        let plain = b.class("N.Plain");
        let project = b.build();

        let index = InterfaceIndex::new();
        assert!(!index.register(derived, project.symbol(derived).unwrap()));
        assert!(!index.register(plain, project.symbol(plain).unwrap()));
        assert!(index.is_empty());
    }

    #[test]
    fn test_structs_not_registered() {
        let mut b = ProjectBuilder::new("App");
        let i = b.interface("N.I");
        let s = b.named_type("N.S", TypeKind::Struct);
        b.implements(s, i);
        let project = b.build();

        let index = InterfaceIndex::new();
        assert!(!index.register(s, project.symbol(s).unwrap()));
        assert!(index.implementors_of(i).is_empty());
    }

    #[test]
    fn test_concurrent_registration() {
        let mut b = ProjectBuilder::new("App");
        let i = b.interface("N.I");
        let classes: Vec<_> = (0..64)
            .map(|n| {
                let c = b.class(&format!("N.C{}", n));
                b.implements(c, i);
                c
            })
            .collect();
        let project = b.build();

        let index = InterfaceIndex::new();
        // every class registered from several threads at once
        let newly: usize = (0..4)
            .into_par_iter()
            .map(|_| {
                classes
                    .par_iter()
                    .filter(|c| index.register(**c, project.symbol(**c).unwrap()))
                    .count()
            })
            .sum();

        assert_eq!(newly, 64);
        assert_eq!(index.implementors_of(i).len(), 64);
    }
}
