//! The symbol/scope arena and its operations: member materialization,
//! wildcard-import tracking, and name lookup.

use sv_common::arena::Arena;
use sv_common::limits::MAX_SCOPE_WALK_ITERATIONS;
use sv_common::location::SourceLocation;
use tracing::trace;

use crate::ids::{DeferredMemberIndex, ImportDataIndex, ScopeId, SymbolId};
use crate::lookup::LookupResult;
use crate::scope::{DeferredMemberData, ImportData, PendingMember, Scope, WildcardImport};
use crate::symbol::{Symbol, SymbolKind};

/// Owns every symbol and scope allocated during elaboration, plus their
/// side-band deferred-member and import tables.
#[derive(Default)]
pub struct SymbolTable {
    symbols: Arena<Symbol, SymbolId>,
    scopes: Arena<Scope, ScopeId>,
    deferred: Arena<DeferredMemberData, DeferredMemberIndex>,
    imports: Arena<ImportData, ImportDataIndex>,
}

impl SymbolTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn symbol(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id)
    }

    #[must_use]
    pub fn symbol_mut(&mut self, id: SymbolId) -> Option<&mut Symbol> {
        self.symbols.get_mut(id)
    }

    #[must_use]
    pub fn scope(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes.get(id)
    }

    /// Re-parents a scope, e.g. linking a compilation unit's scope under
    /// the root scope once the root is constructed. Compilation units are
    /// allocated (and populated) before the root exists, so their scope's
    /// parent starts as `ScopeId::NONE` and is fixed up here at root
    /// construction time.
    pub fn set_scope_parent(&mut self, scope: ScopeId, parent: ScopeId) {
        if let Some(scope) = self.scopes.get_mut(scope) {
            scope.parent = parent;
        }
    }

    /// Allocates a new symbol. If `kind.is_scope()`, also allocates its
    /// backing [`Scope`] and links the two together.
    pub fn alloc_symbol(
        &mut self,
        kind: SymbolKind,
        name: impl Into<String>,
        location: SourceLocation,
        parent_scope: ScopeId,
    ) -> SymbolId {
        let mut symbol = Symbol::new(kind, name, location);
        symbol.parent_scope = parent_scope;
        let id = self.symbols.alloc(symbol);
        if kind.is_scope() {
            let scope_id = self.scopes.alloc(Scope::new(id, parent_scope));
            if let Some(symbol) = self.symbols.get_mut(id) {
                symbol.own_scope = scope_id;
            }
        }
        id
    }

    /// Adds `member` to `scope`'s ordered member list and name map (if it
    /// has a non-empty name). Sets the member's `declaration_order`.
    pub fn add_member(&mut self, scope: ScopeId, member: SymbolId) {
        let order = self
            .scopes
            .get(scope)
            .map_or(0, |s| s.members.len() as u32);
        if let Some(symbol) = self.symbols.get_mut(member) {
            symbol.declaration_order = order;
        }
        let Some(scope) = self.scopes.get_mut(scope) else {
            return;
        };
        scope.members.push(member);
        if let Some(symbol) = self.symbols.get(member) {
            if !symbol.name.is_empty() {
                scope.name_map.insert(symbol.name.clone(), member);
            }
        }
    }

    /// Returns the scope's deferred-member data, lazily allocating it on
    /// first access.
    pub fn get_or_add_deferred_data(&mut self, scope: ScopeId) -> DeferredMemberIndex {
        if let Some(existing) = self.scopes.get(scope).map(|s| s.deferred) {
            if !existing.is_none() {
                return existing;
            }
        }
        let index = self.deferred.alloc(DeferredMemberData::default());
        if let Some(scope) = self.scopes.get_mut(scope) {
            scope.deferred = index;
        }
        index
    }

    pub fn queue_deferred_member(&mut self, scope: ScopeId, pending: PendingMember) {
        let index = self.get_or_add_deferred_data(scope);
        if let Some(data) = self.deferred.get_mut(index) {
            data.pending.push(pending);
        }
    }

    /// Converts a scope's queued deferred syntax into real member symbols,
    /// in declaration order, clearing the deferred slot. A no-op if the
    /// scope never accumulated any deferred data.
    pub fn materialize_deferred(&mut self, scope: ScopeId) {
        let index = self.scopes.get(scope).map(|s| s.deferred);
        let Some(index) = index else { return };
        if index.is_none() {
            return;
        }
        let Some(data) = self.deferred.get_mut(index) else {
            return;
        };
        if data.is_consumed() {
            return;
        }
        let pending = data.take();
        trace!(count = pending.len(), "materializing deferred members");
        for item in pending {
            let symbol = self.alloc_symbol(item.kind, item.name, item.location, scope);
            self.add_member(scope, symbol);
        }
    }

    /// Appends a wildcard import to `scope`'s import data, in declaration order.
    pub fn track_import(&mut self, scope: ScopeId, import: WildcardImport) {
        let existing = self.scopes.get(scope).map(|s| s.imports);
        let index = match existing {
            Some(index) if !index.is_none() => index,
            _ => {
                let index = self.imports.alloc(ImportData::default());
                if let Some(scope) = self.scopes.get_mut(scope) {
                    scope.imports = index;
                }
                index
            }
        };
        if let Some(data) = self.imports.get_mut(index) {
            data.imports.push(import);
        }
    }

    /// The current snapshot of `scope`'s wildcard imports, in declaration order.
    #[must_use]
    pub fn query_imports(&self, scope: ScopeId) -> &[WildcardImport] {
        self.scopes
            .get(scope)
            .filter(|s| !s.imports.is_none())
            .and_then(|s| self.imports.get(s.imports))
            .map_or(&[], |data| data.imports.as_slice())
    }

    /// Resolves `name` starting from `scope` at member position
    /// `position` (`u32::MAX` for "no positional restriction", used once
    /// the walk leaves the originating scope — outer-scope members are
    /// already fully declared by the time an inner scope can reference
    /// them).
    ///
    /// Implements the four-step lookup: local positional visibility,
    /// then wildcard imports, then recursion into the parent scope. The
    /// caller is responsible for the final compilation-unit-globals /
    /// Root fallback tier, since that requires knowledge the symbol
    /// engine alone doesn't have (the Definition/Package registries).
    #[must_use]
    pub fn lookup(&self, name: &str, scope: ScopeId, position: u32) -> LookupResult {
        let mut current = scope;
        let mut current_position = position;
        for _ in 0..MAX_SCOPE_WALK_ITERATIONS {
            if current.is_none() {
                return LookupResult::NotFound;
            }
            let Some(scope_data) = self.scopes.get(current) else {
                return LookupResult::NotFound;
            };

            if let Some(&member) = scope_data.name_map.get(name) {
                let visible = self
                    .symbols
                    .get(member)
                    .is_some_and(|s| s.declaration_order <= current_position);
                if visible {
                    return LookupResult::Found(member);
                }
            }

            match self.lookup_in_imports(current, name) {
                LookupResult::NotFound => {}
                other => return other,
            }

            current = scope_data.parent;
            current_position = u32::MAX;
        }
        LookupResult::NotFound
    }

    fn lookup_in_imports(&self, scope: ScopeId, name: &str) -> LookupResult {
        let mut found: Option<SymbolId> = None;
        let mut ambiguous = Vec::new();
        for import in self.query_imports(scope) {
            let Some(package_scope) = self.symbols.get(import.package).map(|s| s.own_scope)
            else {
                continue;
            };
            let Some(candidate) = self
                .scopes
                .get(package_scope)
                .and_then(|s| s.name_map.get(name))
                .copied()
            else {
                continue;
            };
            match found {
                None => found = Some(candidate),
                Some(existing) if existing == candidate => {}
                Some(existing) => {
                    if ambiguous.is_empty() {
                        ambiguous.push(existing);
                    }
                    ambiguous.push(candidate);
                }
            }
        }
        if !ambiguous.is_empty() {
            LookupResult::Ambiguous(ambiguous)
        } else {
            found.map_or(LookupResult::NotFound, LookupResult::Found)
        }
    }
}
