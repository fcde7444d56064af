//! The scope-aware half of data-type resolution: the pieces that need a
//! symbol lookup, layered on top of
//! [`sv_types::TypeRegistry::from_syntax_with`]. This lives here, not in
//! `sv-types`, because `sv-types` doesn't depend on `sv-symbols` — see
//! `DESIGN.md`.

use sv_common::diagnostics::{DiagCode, Diagnostic, DiagnosticBag, DiagnosticPhase};
use sv_common::location::SourceLocation;
use sv_symbols::{LookupResult, ScopeId, SymbolTable};
use sv_syntax::DataTypeSyntax;
use sv_types::{TypeId, TypeRegistry};

/// Resolves `syntax` to a canonical [`TypeId`], consulting `symbols` for
/// any `Named` reference it contains. An unresolved reference — the name
/// doesn't exist in `scope`'s lookup chain, or it resolves to a symbol
/// that doesn't carry a type — emits [`DiagCode::UnknownIdentifier`] into
/// `diagnostics` and yields the error type.
///
/// `position` is the originating scope position for positional
/// visibility, as in [`SymbolTable::lookup`] (`u32::MAX` for "no
/// restriction").
pub fn resolve_data_type(
    types: &mut TypeRegistry,
    symbols: &SymbolTable,
    diagnostics: &mut DiagnosticBag,
    syntax: &DataTypeSyntax,
    scope: ScopeId,
    position: u32,
    lookup_location: SourceLocation,
) -> TypeId {
    let mut resolve_named = |name: &sv_syntax::NameSyntax| -> Option<TypeId> {
        let text = name.to_string();
        let type_id = match symbols.lookup(&text, scope, position) {
            LookupResult::Found(symbol) => symbols.symbol(symbol).and_then(|s| s.type_id),
            LookupResult::NotFound | LookupResult::Ambiguous(_) => None,
        };
        if type_id.is_none() {
            diagnostics.add(Diagnostic::new(
                DiagCode::UnknownIdentifier,
                DiagnosticPhase::Semantic,
                lookup_location,
                format!("unknown type '{text}'"),
            ));
        }
        type_id
    };
    types.from_syntax_with(syntax, &mut resolve_named)
}
