//! The Compilation manager: the public façade tying together syntax
//! trees, the symbol/scope engine, the type registry, and the
//! definition registry, plus the Open -> Finalizing -> Finalized
//! elaboration lifecycle.

use rustc_hash::FxHashMap;
use sv_common::diagnostics::{DiagCode, Diagnostic, DiagnosticBag, DiagnosticPhase};
use sv_common::limits::MAX_SCOPE_WALK_ITERATIONS;
use sv_common::location::SourceLocation;
use sv_symbols::{ScopeId, SymbolId, SymbolKind, SymbolTable};
use sv_syntax::{DataTypeSyntax, NameSyntax, SyntaxKind, SyntaxTree};
use sv_types::{TypeId, TypeRegistry};
use tracing::{debug, trace};

use crate::definition::{Definition, DefinitionId, DefinitionKind, DefinitionRegistry, Package};
use crate::errors::ContractViolation;
use crate::options::CompilationOptions;
use crate::system::{SystemMethod, SystemMethodScope, SystemSubroutine};
use crate::types::resolve_data_type;

/// The three-state elaboration lifecycle. `Finalizing` exists purely to
/// catch re-entrant calls to `get_root()`; a caller should never observe
/// it directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FinalizationState {
    Open,
    Finalizing,
    Finalized,
}

/// The top-level semantic-elaboration entry point. Owns every arena and
/// registry; everything else in this crate family is reached through it.
pub struct Compilation {
    options: CompilationOptions,
    state: FinalizationState,

    symbols: SymbolTable,
    types: TypeRegistry,
    definitions: DefinitionRegistry,
    diagnostics: DiagnosticBag,

    syntax_trees: Vec<SyntaxTree>,
    compilation_units: Vec<SymbolId>,

    root_symbol: Option<SymbolId>,
    root_scope: Option<ScopeId>,
    top_level_instances: Vec<SymbolId>,
    script_scopes: Vec<ScopeId>,

    system_subroutines: FxHashMap<String, SystemSubroutine>,
    system_methods: FxHashMap<(SystemMethodScope, String), SystemMethod>,
}

impl Default for Compilation {
    fn default() -> Self {
        Self::new(CompilationOptions::default())
    }
}

impl Compilation {
    #[must_use]
    pub fn new(options: CompilationOptions) -> Self {
        Self {
            options,
            state: FinalizationState::Open,
            symbols: SymbolTable::new(),
            types: TypeRegistry::new(),
            definitions: DefinitionRegistry::new(),
            diagnostics: DiagnosticBag::new(),
            syntax_trees: Vec::new(),
            compilation_units: Vec::new(),
            root_symbol: None,
            root_scope: None,
            top_level_instances: Vec::new(),
            script_scopes: Vec::new(),
            system_subroutines: FxHashMap::default(),
            system_methods: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn options(&self) -> CompilationOptions {
        self.options
    }

    #[must_use]
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    #[must_use]
    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    #[must_use]
    pub fn types_mut(&mut self) -> &mut TypeRegistry {
        &mut self.types
    }

    /// Resolves a data-type syntax node to a canonical type, consulting
    /// the symbol table for any `Named` reference. An unresolved
    /// reference emits [`DiagCode::UnknownIdentifier`] and yields the
    /// error type — see [`crate::types::resolve_data_type`].
    ///
    /// `position` is the originating scope position for positional
    /// visibility, as in [`sv_symbols::SymbolTable::lookup`] (`u32::MAX`
    /// for "no restriction", e.g. a type reference that isn't itself
    /// bound by declaration order).
    pub fn resolve_data_type(
        &mut self,
        syntax: &DataTypeSyntax,
        scope: ScopeId,
        position: u32,
        lookup_location: SourceLocation,
    ) -> TypeId {
        resolve_data_type(
            &mut self.types,
            &self.symbols,
            &mut self.diagnostics,
            syntax,
            scope,
            position,
            lookup_location,
        )
    }

    fn ensure_mutable(&self) -> Result<(), ContractViolation> {
        if self.state == FinalizationState::Finalized {
            return Err(ContractViolation::CompilationFinalized);
        }
        Ok(())
    }

    /// Adds a syntax tree's top-level items (module/interface/program and
    /// package declarations) to this compilation as a new compilation
    /// unit. Fails if the compilation has already been finalized by a
    /// prior `get_root()` call.
    ///
    /// # Errors
    ///
    /// Returns [`ContractViolation::CompilationFinalized`] if called
    /// after [`Self::get_root`].
    pub fn add_syntax_tree(&mut self, mut tree: SyntaxTree) -> Result<SymbolId, ContractViolation> {
        self.ensure_mutable()?;

        let cu_symbol = self.symbols.alloc_symbol(
            SymbolKind::CompilationUnit,
            "",
            SourceLocation::synthetic(),
            ScopeId::NONE,
        );

        let items: Vec<_> = tree.items().to_vec();
        for item in items {
            let Some(node) = tree.node(item) else { continue };
            let kind = node.kind;
            let name = node.name.clone();
            let location = node.location;
            match kind {
                SyntaxKind::ModuleDeclaration
                | SyntaxKind::InterfaceDeclaration
                | SyntaxKind::ProgramDeclaration => {
                    let def_kind = match kind {
                        SyntaxKind::ModuleDeclaration => DefinitionKind::Module,
                        SyntaxKind::InterfaceDeclaration => DefinitionKind::Interface,
                        SyntaxKind::ProgramDeclaration => DefinitionKind::Program,
                        SyntaxKind::CompilationUnit | SyntaxKind::PackageDeclaration => {
                            unreachable!("filtered above")
                        }
                    };
                    let (_, diag) = self.add_definition(def_kind, name, None, location);
                    if let Some(diag) = diag {
                        self.diagnostics.add(diag);
                    }
                }
                SyntaxKind::PackageDeclaration => {
                    if let Some(diag) = self.add_package(name, location) {
                        self.diagnostics.add(diag);
                    }
                }
                SyntaxKind::CompilationUnit => {}
            }
        }

        // Compilation units are linked under root lazily, in get_root(),
        // since root doesn't exist until first requested.
        self.syntax_trees.push(tree);
        self.compilation_units.push(cu_symbol);
        debug!(unit = ?cu_symbol, "added compilation unit");
        Ok(cu_symbol)
    }

    #[must_use]
    pub fn get_syntax_trees(&self) -> &[SyntaxTree] {
        &self.syntax_trees
    }

    #[must_use]
    pub fn get_compilation_units(&self) -> &[SymbolId] {
        &self.compilation_units
    }

    /// Registers a definition directly, independent of any syntax tree —
    /// used both by [`Self::add_syntax_tree`] and for programmatically
    /// constructed (e.g. built-in) definitions.
    ///
    /// Definitions declared with `declaring_scope: None` are visible via
    /// the global fallback lookup tier and are eligible to become
    /// top-level instances at root elaboration.
    pub fn add_definition(
        &mut self,
        kind: DefinitionKind,
        name: impl Into<String>,
        declaring_scope: Option<ScopeId>,
        location: SourceLocation,
    ) -> (DefinitionId, Option<Diagnostic>) {
        let name = name.into();
        let symbol = self.symbols.alloc_symbol(
            SymbolKind::Definition,
            name.clone(),
            location,
            declaring_scope.unwrap_or(ScopeId::NONE),
        );
        self.definitions
            .add_definition(kind, name, declaring_scope, symbol, location)
    }

    pub fn add_package(&mut self, name: impl Into<String>, location: SourceLocation) -> Option<Diagnostic> {
        let name = name.into();
        let symbol = self.symbols.alloc_symbol(
            SymbolKind::Package,
            name.clone(),
            location,
            ScopeId::NONE,
        );
        self.definitions.add_package(name, symbol, location)
    }

    #[must_use]
    pub fn get_definition(&self, name: &str, scope: Option<ScopeId>) -> Option<DefinitionId> {
        match scope {
            Some(scope) => self
                .definitions
                .get_definition_in_chain(name, self.scope_chain(scope)),
            None => self.definitions.get_definition(name, None),
        }
    }

    #[must_use]
    pub fn definition(&self, id: DefinitionId) -> Option<&Definition> {
        self.definitions.definition(id)
    }

    #[must_use]
    pub fn get_package(&self, name: &str) -> Option<&Package> {
        self.definitions.package(name)
    }

    /// Iterates `scope` and its ancestors, nearest first, bounded by
    /// [`MAX_SCOPE_WALK_ITERATIONS`] the same way symbol lookup is.
    fn scope_chain(&self, scope: ScopeId) -> impl Iterator<Item = ScopeId> + '_ {
        let mut current = scope;
        let mut steps = 0u32;
        std::iter::from_fn(move || {
            if current.is_none() || steps >= MAX_SCOPE_WALK_ITERATIONS {
                return None;
            }
            steps += 1;
            let yielded = current;
            current = self.symbols.scope(current).map_or(ScopeId::NONE, |s| s.parent);
            Some(yielded)
        })
    }

    pub fn add_system_subroutine(
        &mut self,
        subroutine: SystemSubroutine,
    ) -> Result<(), ContractViolation> {
        self.ensure_mutable()?;
        self.system_subroutines.insert(subroutine.name.clone(), subroutine);
        Ok(())
    }

    #[must_use]
    pub fn get_system_subroutine(&self, name: &str) -> Option<&SystemSubroutine> {
        self.system_subroutines.get(name)
    }

    pub fn add_system_method(
        &mut self,
        scope: SystemMethodScope,
        method: SystemMethod,
    ) -> Result<(), ContractViolation> {
        self.ensure_mutable()?;
        self.system_methods.insert((scope, method.name.clone()), method);
        Ok(())
    }

    #[must_use]
    pub fn get_system_method(&self, scope: SystemMethodScope, name: &str) -> Option<&SystemMethod> {
        self.system_methods.get(&(scope, name.to_string()))
    }

    /// Creates a detached script scope: a scratch scope for interactive
    /// (e.g. `$value$plusargs` debugger, REPL) evaluation that parents
    /// under root (if it exists yet) but never contributes to
    /// [`Self::top_level_instances`] — that sweep only ever runs once,
    /// inside [`Self::get_root`].
    ///
    /// Unlike the other mutators, this is callable after finalization:
    /// a script scope created post-elaboration is the common case.
    pub fn create_script_scope(&mut self) -> ScopeId {
        let parent = self.root_scope.unwrap_or(ScopeId::NONE);
        let symbol = self
            .symbols
            .alloc_symbol(SymbolKind::CompilationUnit, "", SourceLocation::synthetic(), parent);
        let scope = self
            .symbols
            .symbol(symbol)
            .expect("just allocated")
            .own_scope;
        self.script_scopes.push(scope);
        scope
    }

    #[must_use]
    pub fn script_scopes(&self) -> &[ScopeId] {
        &self.script_scopes
    }

    #[must_use]
    pub fn parse_name(&self, text: &str) -> NameSyntax {
        sv_syntax::parse_name(text)
    }

    /// Returns (and, on first call, elaborates) the Root symbol.
    ///
    /// Elaboration re-parents every compilation unit's scope under root,
    /// then sweeps every uninstantiated, compilation-unit-level
    /// definition into an implicit top-level instance. Idempotent: a
    /// second call returns the already-elaborated root without
    /// repeating the sweep.
    ///
    /// # Errors
    ///
    /// Returns [`ContractViolation::ReenteredGetRoot`] if called again
    /// while the first call is still running (e.g. from a callback
    /// triggered during elaboration).
    pub fn get_root(&mut self) -> Result<SymbolId, ContractViolation> {
        if let Some(root) = self.root_symbol {
            if self.state == FinalizationState::Finalizing {
                return Err(ContractViolation::ReenteredGetRoot);
            }
            return Ok(root);
        }
        if self.state == FinalizationState::Finalizing {
            return Err(ContractViolation::ReenteredGetRoot);
        }
        self.state = FinalizationState::Finalizing;

        let root_symbol = self.symbols.alloc_symbol(
            SymbolKind::Root,
            "",
            SourceLocation::synthetic(),
            ScopeId::NONE,
        );
        let root_scope = self
            .symbols
            .symbol(root_symbol)
            .expect("just allocated")
            .own_scope;
        self.root_symbol = Some(root_symbol);
        self.root_scope = Some(root_scope);

        for &cu_symbol in &self.compilation_units {
            let Some(cu_scope) = self.symbols.symbol(cu_symbol).map(|s| s.own_scope) else {
                continue;
            };
            self.symbols.set_scope_parent(cu_scope, root_scope);
            self.symbols.add_member(root_scope, cu_symbol);
        }

        if self.options.allow_top_level_instances {
            let eligible: Vec<DefinitionId> =
                self.definitions.uninstantiated_top_level_eligible().collect();
            trace!(count = eligible.len(), "sweeping top-level instances");
            for def_id in eligible {
                let Some(def) = self.definitions.definition(def_id) else {
                    continue;
                };
                let name = def.name.clone();
                let location = def.location;
                let instance = self.symbols.alloc_symbol(
                    SymbolKind::Instance,
                    name,
                    location,
                    root_scope,
                );
                self.symbols.add_member(root_scope, instance);
                self.top_level_instances.push(instance);
                self.definitions.mark_instantiated(def_id);
            }
        }

        self.state = FinalizationState::Finalized;
        Ok(root_symbol)
    }

    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.state == FinalizationState::Finalized
    }

    #[must_use]
    pub fn top_level_instances(&self) -> &[SymbolId] {
        &self.top_level_instances
    }

    pub fn add_diag(
        &mut self,
        code: DiagCode,
        phase: DiagnosticPhase,
        location: SourceLocation,
        message: impl Into<String>,
    ) {
        self.diagnostics
            .add(Diagnostic::new(code, phase, location, message));
    }

    /// Every parse-phase diagnostic across every added syntax tree,
    /// sorted and deduplicated within each tree (trees don't share a
    /// sort order with each other, so this concatenates rather than
    /// re-merging).
    pub fn get_parse_diagnostics(&mut self) -> Vec<Diagnostic> {
        self.syntax_trees
            .iter_mut()
            .flat_map(|tree| tree.parse_diagnostics().to_vec())
            .collect()
    }

    /// Every semantic-phase diagnostic, sorted and deduplicated.
    ///
    /// Forces finalization the same way `get_root()` does — elaboration is
    /// what produces most semantic diagnostics in the first place
    /// (duplicate definitions, unresolved top-level instances, ...), so
    /// reading this stream on a non-finalized compilation would otherwise
    /// silently omit them, and a later `add_syntax_tree` would wrongly
    /// still succeed. `get_root()`'s own re-entrancy guard can't trigger
    /// here, since this is never called from inside `get_root()` itself.
    pub fn get_semantic_diagnostics(&mut self) -> Vec<Diagnostic> {
        let _ = self.get_root();
        self.diagnostics.semantic_diagnostics().into_iter().cloned().collect()
    }

    /// The union of the parse and semantic streams. Forces finalization
    /// transitively through [`Self::get_semantic_diagnostics`].
    pub fn get_all_diagnostics(&mut self) -> Vec<Diagnostic> {
        let mut all = self.get_parse_diagnostics();
        all.extend(self.get_semantic_diagnostics());
        all.sort_by_key(|d| (d.location.buffer, d.location.offset, d.code));
        all
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_compilation_has_an_empty_root_and_no_diagnostics() {
        let mut compilation = Compilation::default();
        let root = compilation.get_root().unwrap();
        assert!(compilation.symbols().symbol(root).is_some());
        assert!(compilation.top_level_instances().is_empty());
        assert!(compilation.get_all_diagnostics().is_empty());
    }

    #[test]
    fn get_root_is_idempotent() {
        let mut compilation = Compilation::default();
        let first = compilation.get_root().unwrap();
        let second = compilation.get_root().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn mutation_after_finalize_is_a_contract_violation() {
        let mut compilation = Compilation::default();
        compilation.get_root().unwrap();
        let err = compilation.add_syntax_tree(SyntaxTree::new()).unwrap_err();
        assert_eq!(err, ContractViolation::CompilationFinalized);
    }

    #[test]
    fn uninstantiated_top_level_module_becomes_a_top_level_instance() {
        let mut compilation = Compilation::default();
        let mut tree = SyntaxTree::new();
        tree.add_item(SyntaxKind::ModuleDeclaration, "top", SourceLocation::new(0, 0));
        compilation.add_syntax_tree(tree).unwrap();

        compilation.get_root().unwrap();
        assert_eq!(compilation.top_level_instances().len(), 1);
        let instance = compilation.top_level_instances()[0];
        assert_eq!(compilation.symbols().symbol(instance).unwrap().name, "top");
    }

    #[test]
    fn duplicate_package_across_two_syntax_trees_is_reported() {
        let mut compilation = Compilation::default();

        let mut tree_a = SyntaxTree::new();
        tree_a.add_item(SyntaxKind::PackageDeclaration, "pkg", SourceLocation::new(0, 0));
        compilation.add_syntax_tree(tree_a).unwrap();

        let mut tree_b = SyntaxTree::new();
        tree_b.add_item(SyntaxKind::PackageDeclaration, "pkg", SourceLocation::new(1, 0));
        compilation.add_syntax_tree(tree_b).unwrap();

        let diags = compilation.get_semantic_diagnostics();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, DiagCode::DuplicatePackageName);
    }

    #[test]
    fn scoped_lookup_falls_back_to_global_definition_tier() {
        let mut compilation = Compilation::default();
        let mut tree = SyntaxTree::new();
        tree.add_item(SyntaxKind::ModuleDeclaration, "leaf", SourceLocation::new(0, 0));
        compilation.add_syntax_tree(tree).unwrap();
        let root = compilation.get_root().unwrap();
        let root_scope = compilation.symbols().symbol(root).unwrap().own_scope;

        let resolved = compilation.get_definition("leaf", Some(root_scope));
        assert!(resolved.is_some());
    }

    #[test]
    fn script_scope_after_finalize_does_not_join_top_level_instances() {
        let mut compilation = Compilation::default();
        compilation.get_root().unwrap();
        let before = compilation.top_level_instances().len();
        let scope = compilation.create_script_scope();
        assert!(!scope.is_none());
        assert_eq!(compilation.top_level_instances().len(), before);
    }
}
