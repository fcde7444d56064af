//! The universal semantic entity.

use sv_common::location::SourceLocation;
use sv_types::TypeId;

use crate::ids::ScopeId;

/// The closed set of symbol kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Root,
    CompilationUnit,
    Package,
    Definition,
    Instance,
    Variable,
    Parameter,
    Subroutine,
    Net,
    ScalarType,
    PredefinedIntegerType,
    FloatingType,
    StringType,
    CHandleType,
    VoidType,
    NullType,
    EventType,
    ErrorType,
    PackedArrayType,
    NetType,
    WildcardImport,
}

impl SymbolKind {
    /// Whether this kind of symbol is itself a scope (has members of its own).
    #[must_use]
    pub const fn is_scope(self) -> bool {
        matches!(
            self,
            SymbolKind::Root
                | SymbolKind::CompilationUnit
                | SymbolKind::Package
                | SymbolKind::Definition
                | SymbolKind::Instance
        )
    }
}

/// A semantic entity: a kind tag, a (possibly empty) name, a source
/// location, a parent scope, and kind-specific payload.
#[derive(Clone, Debug)]
pub struct Symbol {
    pub kind: SymbolKind,
    pub name: String,
    pub location: SourceLocation,
    /// `ScopeId::NONE` for the Root symbol only.
    pub parent_scope: ScopeId,
    /// This symbol's own scope, if [`SymbolKind::is_scope`] — `ScopeId::NONE` otherwise.
    pub own_scope: ScopeId,
    /// Position among the parent scope's members, in declaration order.
    /// Used for positional-visibility checks during lookup.
    pub declaration_order: u32,
    /// The resolved value/net type, for kinds that carry one
    /// (`Variable`, `Parameter`, `Net`).
    pub type_id: Option<TypeId>,
}

impl Symbol {
    #[must_use]
    pub fn new(kind: SymbolKind, name: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            kind,
            name: name.into(),
            location,
            parent_scope: ScopeId::NONE,
            own_scope: ScopeId::NONE,
            declaration_order: 0,
            type_id: None,
        }
    }

    #[must_use]
    pub fn with_type(mut self, type_id: TypeId) -> Self {
        self.type_id = Some(type_id);
        self
    }
}
