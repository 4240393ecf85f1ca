//! In-memory provider snapshot
//!
//! A serializable dump of everything the indexer needs from the binder:
//! the symbol arena, the compilation units, and the analyzed assembly name.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::provider::ResolvedAstProvider;
use crate::errors::{IndexError, Result};
use crate::shared::models::{CompilationUnit, SemanticKind, SemanticSymbol, SymbolRef};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedProject {
    pub assembly: String,
    #[serde(default)]
    pub symbols: Vec<SemanticSymbol>,
    #[serde(default)]
    pub units: Vec<CompilationUnit>,
}

impl ResolvedProject {
    pub fn new(assembly: impl Into<String>) -> Self {
        Self {
            assembly: assembly.into(),
            ..Default::default()
        }
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let project: Self = serde_json::from_str(text)?;
        project.check_references()?;
        Ok(project)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Every `SymbolRef` inside the arena must point into the arena.
    fn check_references(&self) -> Result<()> {
        let len = self.symbols.len();
        let check = |owner: usize, r: SymbolRef| {
            if r.index() < len {
                Ok(())
            } else {
                Err(IndexError::provider(format!(
                    "symbol {} references missing symbol {}",
                    owner, r.0
                )))
            }
        };

        for (idx, symbol) in self.symbols.iter().enumerate() {
            for r in symbol
                .containing_type
                .iter()
                .chain(symbol.original_definition.iter())
            {
                check(idx, *r)?;
            }
            match &symbol.kind {
                SemanticKind::NamedType {
                    all_interfaces,
                    implementations,
                    ..
                } => {
                    for r in all_interfaces {
                        check(idx, *r)?;
                    }
                    for imp in implementations {
                        check(idx, imp.interface_member)?;
                        check(idx, imp.implementation)?;
                    }
                }
                SemanticKind::Array { element } => check(idx, *element)?,
                SemanticKind::Method {
                    return_type,
                    parameters,
                    reduced_from,
                    ..
                } => {
                    for r in return_type.iter().chain(parameters).chain(reduced_from.iter()) {
                        check(idx, *r)?;
                    }
                }
                _ => {
                    if let Some(ty) = symbol.value_type() {
                        check(idx, ty)?;
                    }
                }
            }
        }
        Ok(())
    }
}

impl ResolvedAstProvider for ResolvedProject {
    fn units(&self) -> &[CompilationUnit] {
        &self.units
    }

    fn symbol(&self, id: SymbolRef) -> Option<&SemanticSymbol> {
        self.symbols.get(id.index())
    }

    fn analyzed_assembly(&self) -> &str {
        &self.assembly
    }

    fn find_implementation(
        &self,
        implementor: SymbolRef,
        interface_member: SymbolRef,
    ) -> Option<SymbolRef> {
        match &self.symbol(implementor)?.kind {
            SemanticKind::NamedType {
                implementations, ..
            } => implementations
                .iter()
                .find(|imp| imp.interface_member == interface_member)
                .map(|imp| imp.implementation),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::{Accessibility, TypeKind};

    fn class(name: &str) -> SemanticSymbol {
        let mut s = SemanticSymbol::new(
            name,
            name,
            SemanticKind::NamedType {
                type_kind: TypeKind::Class,
                is_generic: false,
                is_anonymous: false,
                all_interfaces: vec![],
                implementations: vec![],
            },
        );
        s.assembly = Some("App".to_string());
        s.accessibility = Accessibility::Public;
        s
    }

    #[test]
    fn test_json_roundtrip_preserves_project() {
        let mut project = ResolvedProject::new("App");
        project.symbols.push(class("A"));
        project.units.push(CompilationUnit::new("/src/a.cs", vec![]));

        let text = project.to_json().unwrap();
        let loaded = ResolvedProject::from_json_str(&text).unwrap();
        assert_eq!(loaded, project);
    }

    #[test]
    fn test_dangling_reference_rejected() {
        let mut project = ResolvedProject::new("App");
        let mut a = class("A");
        a.containing_type = Some(SymbolRef(9));
        project.symbols.push(a);

        let err = ResolvedProject::from_json_str(&project.to_json().unwrap()).unwrap_err();
        assert!(matches!(err, IndexError::Provider(_)));
    }

    #[test]
    fn test_is_external() {
        let mut project = ResolvedProject::new("App");
        project.symbols.push(class("A"));
        let mut ext = class("B");
        ext.assembly = Some("mscorlib".to_string());
        project.symbols.push(ext);

        assert!(!project.is_external(SymbolRef(0)));
        assert!(project.is_external(SymbolRef(1)));
        assert!(project.is_external(SymbolRef(7)));
    }
}
