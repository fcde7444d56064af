//! Scopes and their side-band deferred-member and import data.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use sv_common::location::SourceLocation;

use crate::ids::{DeferredMemberIndex, ImportDataIndex, ScopeId, SymbolId};
use crate::symbol::SymbolKind;

/// A scope: an ordered member list, a name map, and optional side-band
/// deferred-member / import data addressed by opaque indices. Keeping
/// these optional and side-banded (rather than inline `Option` fields on
/// every scope) keeps the common leaf scope small.
#[derive(Clone, Debug)]
pub struct Scope {
    pub owner: SymbolId,
    pub parent: ScopeId,
    pub members: Vec<SymbolId>,
    pub name_map: FxHashMap<String, SymbolId>,
    pub deferred: DeferredMemberIndex,
    pub imports: ImportDataIndex,
}

impl Scope {
    #[must_use]
    pub fn new(owner: SymbolId, parent: ScopeId) -> Self {
        Self {
            owner,
            parent,
            members: Vec::new(),
            name_map: FxHashMap::default(),
            deferred: DeferredMemberIndex::NONE,
            imports: ImportDataIndex::NONE,
        }
    }
}

/// A syntax construct awaiting materialization into a real member symbol
/// (port lists, generate blocks, parameter overrides — modeled generically
/// here since the full grammar for each is out of scope).
#[derive(Clone, Debug)]
pub struct PendingMember {
    pub kind: SymbolKind,
    pub name: String,
    pub location: SourceLocation,
}

/// Side-band data for a scope whose members can't all be resolved until
/// siblings are known. Consumed exactly once, when the scope is first
/// fully materialized.
#[derive(Clone, Debug, Default)]
pub struct DeferredMemberData {
    pub pending: Vec<PendingMember>,
    consumed: bool,
}

impl DeferredMemberData {
    #[must_use]
    pub fn is_consumed(&self) -> bool {
        self.consumed
    }

    /// Takes the pending members, marking this slot consumed.
    ///
    /// # Panics
    ///
    /// Panics if called more than once — deferred data is materialized
    /// exactly once per scope.
    pub fn take(&mut self) -> Vec<PendingMember> {
        assert!(!self.consumed, "deferred member data already materialized");
        self.consumed = true;
        std::mem::take(&mut self.pending)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct WildcardImport {
    pub package: SymbolId,
    pub location: SourceLocation,
}

/// Side-band data holding a scope's `import pkg::*;` directives, in
/// declaration order.
#[derive(Clone, Debug, Default)]
pub struct ImportData {
    pub imports: SmallVec<[WildcardImport; 4]>,
}
