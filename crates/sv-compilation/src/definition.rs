//! The definition registry: modules/interfaces/programs and packages,
//! keyed by name plus the scope they were declared in.

use rustc_hash::FxHashMap;
use sv_common::arena::{Arena, ArenaId};
use sv_common::diagnostics::{DiagCode, Diagnostic, DiagnosticPhase};
use sv_common::location::SourceLocation;
use sv_symbols::{ScopeId, SymbolId};

/// A typed index into a [`DefinitionRegistry`]'s arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DefinitionId(u32);

impl DefinitionId {
    pub const NONE: DefinitionId = DefinitionId(u32::MAX);

    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }
}

impl ArenaId for DefinitionId {
    fn from_index(index: u32) -> Self {
        DefinitionId(index)
    }

    fn index(self) -> u32 {
        self.0
    }
}

/// What kind of top-level design element a definition names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DefinitionKind {
    Module,
    Interface,
    Program,
}

#[derive(Clone, Debug)]
pub struct Definition {
    pub kind: DefinitionKind,
    pub name: String,
    /// `None` for a definition declared directly in the compilation unit
    /// (eligible for the global fallback lookup tier); `Some(scope)` for
    /// one nested inside a package or another definition.
    pub declaring_scope: Option<ScopeId>,
    pub symbol: SymbolId,
    pub location: SourceLocation,
    /// Set the first time an instantiation expression references this
    /// definition. Definitions that reach finalization still
    /// uninstantiated (and with no port list requiring a binding) become
    /// implicit top-level instances.
    pub instantiated: bool,
}

#[derive(Clone, Debug)]
pub struct Package {
    pub name: String,
    pub symbol: SymbolId,
    pub location: SourceLocation,
}

/// Modules/interfaces/programs and packages, in their own flat namespaces.
///
/// Definitions are keyed by `(name, declaring_scope)`: the same name may
/// be declared once per distinct declaring scope (e.g. once at the
/// compilation-unit level and again nested in a package) without
/// colliding. Packages are a single flat namespace with no scope
/// qualifier, since nested packages aren't legal.
#[derive(Default)]
pub struct DefinitionRegistry {
    definitions: Arena<Definition, DefinitionId>,
    by_key: FxHashMap<(String, Option<ScopeId>), DefinitionId>,
    packages: FxHashMap<String, Package>,
}

impl DefinitionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a definition. If `(name, declaring_scope)` is already
    /// taken, the existing definition is left in place and a
    /// `DuplicateDefinitionName` diagnostic is returned alongside its id
    /// — matching the "first wins, duplicate reported" rule used
    /// throughout this registry rather than overwriting silently.
    pub fn add_definition(
        &mut self,
        kind: DefinitionKind,
        name: impl Into<String>,
        declaring_scope: Option<ScopeId>,
        symbol: SymbolId,
        location: SourceLocation,
    ) -> (DefinitionId, Option<Diagnostic>) {
        let name = name.into();
        let key = (name.clone(), declaring_scope);
        if let Some(&existing) = self.by_key.get(&key) {
            let diag = Diagnostic::new(
                DiagCode::DuplicateDefinitionName,
                DiagnosticPhase::Semantic,
                location,
                format!("definition '{name}' is already declared in this scope"),
            );
            return (existing, Some(diag));
        }
        let id = self.definitions.alloc(Definition {
            kind,
            name,
            declaring_scope,
            symbol,
            location,
            instantiated: false,
        });
        self.by_key.insert(key, id);
        (id, None)
    }

    /// Registers a package. Packages are a single flat namespace; a
    /// duplicate name is reported but the first registration wins.
    pub fn add_package(
        &mut self,
        name: impl Into<String>,
        symbol: SymbolId,
        location: SourceLocation,
    ) -> Option<Diagnostic> {
        let name = name.into();
        if self.packages.contains_key(&name) {
            return Some(Diagnostic::new(
                DiagCode::DuplicatePackageName,
                DiagnosticPhase::Semantic,
                location,
                format!("package '{name}' is already declared"),
            ));
        }
        self.packages.insert(
            name.clone(),
            Package {
                name,
                symbol,
                location,
            },
        );
        None
    }

    #[must_use]
    pub fn definition(&self, id: DefinitionId) -> Option<&Definition> {
        self.definitions.get(id)
    }

    #[must_use]
    pub fn package(&self, name: &str) -> Option<&Package> {
        self.packages.get(name)
    }

    /// Looks up `name` in `declaring_scope` directly, without walking
    /// enclosing scopes. Used by [`Self::get_definition_in_chain`].
    #[must_use]
    pub fn get_definition(&self, name: &str, declaring_scope: Option<ScopeId>) -> Option<DefinitionId> {
        self.by_key
            .get(&(name.to_string(), declaring_scope))
            .copied()
    }

    /// Resolves `name` against each scope in `chain` (nearest enclosing
    /// first), falling back to the global `(name, None)` tier if no
    /// scope in the chain declares it.
    #[must_use]
    pub fn get_definition_in_chain(
        &self,
        name: &str,
        chain: impl IntoIterator<Item = ScopeId>,
    ) -> Option<DefinitionId> {
        for scope in chain {
            if let Some(id) = self.get_definition(name, Some(scope)) {
                return Some(id);
            }
        }
        self.get_definition(name, None)
    }

    /// Marks `id` as instantiated — called the first time an
    /// instantiation expression references this definition.
    pub fn mark_instantiated(&mut self, id: DefinitionId) {
        if let Some(def) = self.definitions.get_mut(id) {
            def.instantiated = true;
        }
    }

    /// Definitions declared directly at the compilation-unit level
    /// (`declaring_scope: None`) that were never instantiated — these
    /// become implicit top-level instances during root elaboration.
    pub fn uninstantiated_top_level_eligible(&self) -> impl Iterator<Item = DefinitionId> + '_ {
        self.by_key.iter().filter_map(|((_, scope), &id)| {
            if scope.is_some() {
                return None;
            }
            let def = self.definitions.get(id)?;
            (!def.instantiated).then_some(id)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc() -> SourceLocation {
        SourceLocation::new(0, 0)
    }

    fn dummy_symbol() -> SymbolId {
        let mut table = sv_symbols::SymbolTable::new();
        table.alloc_symbol(
            sv_symbols::SymbolKind::Definition,
            "top",
            loc(),
            ScopeId::NONE,
        )
    }

    #[test]
    fn duplicate_definition_in_same_scope_is_reported_but_first_wins() {
        let mut registry = DefinitionRegistry::new();
        let sym = dummy_symbol();
        let (first, diag) =
            registry.add_definition(DefinitionKind::Module, "top", None, sym, loc());
        assert!(diag.is_none());
        let (second, diag) =
            registry.add_definition(DefinitionKind::Module, "top", None, sym, loc());
        assert_eq!(first, second);
        assert!(diag.is_some());
        assert_eq!(diag.unwrap().code, DiagCode::DuplicateDefinitionName);
    }

    #[test]
    fn same_name_in_different_declaring_scopes_does_not_collide() {
        let mut registry = DefinitionRegistry::new();
        let sym = dummy_symbol();
        let outer = ScopeId::from_index(0);
        let inner = ScopeId::from_index(1);
        let (id_a, diag_a) =
            registry.add_definition(DefinitionKind::Module, "leaf", Some(outer), sym, loc());
        let (id_b, diag_b) =
            registry.add_definition(DefinitionKind::Module, "leaf", Some(inner), sym, loc());
        assert!(diag_a.is_none());
        assert!(diag_b.is_none());
        assert_ne!(id_a, id_b);
    }

    #[test]
    fn lookup_in_chain_falls_back_to_global_tier() {
        let mut registry = DefinitionRegistry::new();
        let sym = dummy_symbol();
        let (global_id, _) =
            registry.add_definition(DefinitionKind::Module, "shared", None, sym, loc());
        let unrelated_scope = ScopeId::from_index(7);
        let resolved =
            registry.get_definition_in_chain("shared", [unrelated_scope]);
        assert_eq!(resolved, Some(global_id));
    }

    #[test]
    fn duplicate_package_name_is_reported() {
        let mut registry = DefinitionRegistry::new();
        let sym = dummy_symbol();
        assert!(registry.add_package("pkg", sym, loc()).is_none());
        let diag = registry.add_package("pkg", sym, loc());
        assert_eq!(diag.unwrap().code, DiagCode::DuplicatePackageName);
    }

    #[test]
    fn marking_instantiated_excludes_from_top_level_sweep() {
        let mut registry = DefinitionRegistry::new();
        let sym = dummy_symbol();
        let (id, _) = registry.add_definition(DefinitionKind::Module, "top", None, sym, loc());
        assert_eq!(registry.uninstantiated_top_level_eligible().count(), 1);
        registry.mark_instantiated(id);
        assert_eq!(registry.uninstantiated_top_level_eligible().count(), 0);
    }
}
