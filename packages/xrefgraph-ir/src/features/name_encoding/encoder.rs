//! Canonical symbol names
//!
//! Rules:
//! - base name is the dotted qualified name of the unbound definition, so
//!   `Box<int>` and `Box<string>` both encode as `N.Box<T>`
//! - arrays encode as their element with a `[]` postfix
//! - type parameters, error types, anonymous types and their members encode
//!   empty
//! - members get an accessibility prefix; methods add their return type to
//!   the prefix and `(Type name, ...)` as postfix; properties, fields and
//!   events add their declared type to the prefix (enum members excepted)
//! - with `omit_externals`, symbols from other assemblies encode empty
//!
//! An empty name means "do not emit"; callers skip.

use crate::features::resolved_ast::ResolvedAstProvider;
use crate::shared::models::{MethodKind, SemanticKind, SemanticSymbol, SymbolRef, TypeKind};

const MAX_DEPTH: usize = 32;

/// Result of encoding one symbol
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodedName {
    pub name: String,
    pub prefix: String,
    pub postfix: String,
}

impl EncodedName {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn is_suppressed(&self) -> bool {
        self.name.trim().is_empty()
    }

    /// Identity key: prefix + name + postfix
    pub fn identity(&self) -> String {
        format!("{}{}{}", self.prefix, self.name, self.postfix)
    }

    /// Name as it appears inside another symbol's prefix or postfix
    pub fn rendered(&self) -> String {
        format!("{}{}", self.name, self.postfix)
    }
}

pub struct NameEncoder<'a, P: ResolvedAstProvider + ?Sized> {
    provider: &'a P,
    omit_externals: bool,
}

impl<'a, P: ResolvedAstProvider + ?Sized> NameEncoder<'a, P> {
    pub fn new(provider: &'a P, omit_externals: bool) -> Self {
        Self {
            provider,
            omit_externals,
        }
    }

    pub fn encode(&self, id: SymbolRef) -> EncodedName {
        self.encode_at(id, 0)
    }

    fn encode_at(&self, id: SymbolRef, depth: usize) -> EncodedName {
        if depth > MAX_DEPTH {
            return EncodedName::default();
        }
        let Some(symbol) = self.provider.symbol(id) else {
            return EncodedName::default();
        };

        if let SemanticKind::Array { element } = symbol.kind {
            let inner = self.encode_at(element, depth + 1);
            if inner.is_suppressed() {
                return EncodedName::default();
            }
            return EncodedName {
                name: inner.name,
                prefix: String::new(),
                postfix: format!("{}[]", inner.postfix),
            };
        }

        if self.omit_externals && self.provider.is_external(id) {
            return EncodedName::default();
        }

        let symbol = self.canonical(symbol);
        if symbol.is_member() && self.in_anonymous_type(symbol) {
            return EncodedName::default();
        }
        match &symbol.kind {
            SemanticKind::Namespace => EncodedName::new(&symbol.qualified_name),
            SemanticKind::NamedType { is_anonymous, .. } => {
                if *is_anonymous {
                    EncodedName::default()
                } else {
                    EncodedName::new(&symbol.qualified_name)
                }
            }
            SemanticKind::TypeParameter | SemanticKind::Error | SemanticKind::Array { .. } => {
                EncodedName::default()
            }
            SemanticKind::Method {
                method_kind,
                return_type,
                parameters,
                ..
            } => {
                let return_part = match (method_kind, return_type) {
                    (MethodKind::Ordinary, Some(ret)) => self.render_type(*ret, depth + 1),
                    _ => String::new(),
                };
                let params = parameters
                    .iter()
                    .map(|p| self.render_parameter(*p, depth + 1))
                    .collect::<Vec<_>>()
                    .join(", ");
                EncodedName {
                    name: symbol.qualified_name.clone(),
                    prefix: join_prefix(symbol.accessibility.keyword(), &return_part),
                    postfix: format!("({})", params),
                }
            }
            SemanticKind::Property { ty } | SemanticKind::Event { ty } => EncodedName {
                name: symbol.qualified_name.clone(),
                prefix: join_prefix(
                    symbol.accessibility.keyword(),
                    &self.render_type(*ty, depth + 1),
                ),
                postfix: String::new(),
            },
            SemanticKind::Field { ty } => {
                let prefix = if self.is_enum_member(symbol) {
                    String::new()
                } else {
                    join_prefix(
                        symbol.accessibility.keyword(),
                        &self.render_type(*ty, depth + 1),
                    )
                };
                EncodedName {
                    name: symbol.qualified_name.clone(),
                    prefix,
                    postfix: String::new(),
                }
            }
            SemanticKind::Parameter { .. } | SemanticKind::Local { .. } => {
                EncodedName::new(&symbol.name)
            }
        }
    }

    /// Constructed generic symbols collapse onto their definition
    fn canonical<'s>(&'s self, symbol: &'s SemanticSymbol) -> &'s SemanticSymbol {
        symbol
            .original_definition
            .and_then(|def| self.provider.symbol(def))
            .unwrap_or(symbol)
    }

    fn in_anonymous_type(&self, symbol: &SemanticSymbol) -> bool {
        symbol
            .containing_type
            .and_then(|t| self.provider.symbol(t))
            .is_some_and(SemanticSymbol::is_anonymous_type)
    }

    fn is_enum_member(&self, symbol: &SemanticSymbol) -> bool {
        symbol
            .containing_type
            .and_then(|t| self.provider.symbol(t))
            .and_then(|t| t.type_kind())
            == Some(TypeKind::Enum)
    }

    fn render_type(&self, id: SymbolRef, depth: usize) -> String {
        let encoded = self.encode_at(id, depth);
        if encoded.is_suppressed() {
            self.short_name(id, depth)
        } else {
            encoded.rendered()
        }
    }

    fn render_parameter(&self, id: SymbolRef, depth: usize) -> String {
        match self.provider.symbol(id) {
            Some(param) => match param.value_type() {
                Some(ty) => format!("{} {}", self.render_type(ty, depth), param.name),
                None => param.name.clone(),
            },
            None => String::new(),
        }
    }

    fn short_name(&self, id: SymbolRef, depth: usize) -> String {
        if depth > MAX_DEPTH {
            return String::new();
        }
        match self.provider.symbol(id) {
            Some(SemanticSymbol {
                kind: SemanticKind::Array { element },
                ..
            }) => format!("{}[]", self.short_name(*element, depth + 1)),
            Some(symbol) => symbol.name.clone(),
            None => String::new(),
        }
    }
}

fn join_prefix(accessibility: &str, rendered_type: &str) -> String {
    match (accessibility.is_empty(), rendered_type.is_empty()) {
        (true, _) => rendered_type.to_string(),
        (false, true) => accessibility.to_string(),
        (false, false) => format!("{} {}", accessibility, rendered_type),
    }
}
