//! Reads source files, extracts their top-level item declarations, and
//! drives a [`Compilation`] through elaboration.
//!
//! `sv-syntax` models only the item-tree shape the Compilation manager's
//! contract consumes (see its module docs) rather than a full
//! preprocessor/lexer/parser pipeline, so this driver recovers that
//! shape with a keyword scan good enough to exercise real elaboration on
//! real-looking source, rather than a full grammar.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use sv_common::diagnostics::{Diagnostic, DiagnosticSeverity};
use sv_common::location::SourceLocation;
use sv_compilation::Compilation;
use sv_syntax::{SyntaxKind, SyntaxTree};
use tracing::info;

/// Scans `text` for `module`/`interface`/`program`/`package` declarations
/// of the form `<keyword> <name>`, returning a tree with one item per
/// match, in source order.
fn scan_into_tree(buffer: u32, text: &str) -> SyntaxTree {
    let mut tree = SyntaxTree::new();
    let mut offset: u32 = 0;
    let mut words = text.split_whitespace().peekable();
    while let Some(word) = words.next() {
        let kind = match word {
            "module" => Some(SyntaxKind::ModuleDeclaration),
            "interface" => Some(SyntaxKind::InterfaceDeclaration),
            "program" => Some(SyntaxKind::ProgramDeclaration),
            "package" => Some(SyntaxKind::PackageDeclaration),
            _ => None,
        };
        offset += word.len() as u32 + 1;
        if let Some(kind) = kind {
            if let Some(&name) = words.peek() {
                let name = name.trim_end_matches(';').trim_end_matches('#');
                tree.add_item(kind, name, SourceLocation::new(buffer, offset));
            }
        }
    }
    tree
}

/// Adds each file in `paths` to `compilation` as its own compilation
/// unit, in argument order.
pub fn add_sources(compilation: &mut Compilation, paths: &[impl AsRef<Path>]) -> Result<()> {
    for (buffer, path) in paths.iter().enumerate() {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading source file {}", path.display()))?;
        let tree = scan_into_tree(buffer as u32, &text);
        info!(file = %path.display(), "added compilation unit");
        compilation
            .add_syntax_tree(tree)
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("adding {}", path.display()))?;
    }
    Ok(())
}

/// Renders a diagnostic (and its `NoteInCallTo` chain, if any) as a
/// single human-readable block.
pub fn format_diagnostic(diagnostic: &Diagnostic) -> String {
    let mut out = format!(
        "{:?} [{:?}] ({}:{}): {}",
        diagnostic.severity,
        diagnostic.code,
        diagnostic.location.buffer,
        diagnostic.location.offset,
        diagnostic.message
    );
    for note in &diagnostic.notes {
        out.push_str(&format!("\n    note: {}", note.message));
    }
    out
}

#[must_use]
pub fn should_report(diagnostic: &Diagnostic, errors_only: bool) -> bool {
    !errors_only || diagnostic.severity == DiagnosticSeverity::Error
}

#[cfg(test)]
mod tests {
    use super::*;
    use sv_common::diagnostics::{DiagCode, DiagnosticPhase};

    #[test]
    fn scan_finds_every_declaration_kind_in_order() {
        let tree = scan_into_tree(0, "module top; package pkg; interface bus; program test;");
        let items = tree.items();
        assert_eq!(items.len(), 4);
        assert_eq!(tree.node(items[0]).unwrap().kind, SyntaxKind::ModuleDeclaration);
        assert_eq!(tree.node(items[0]).unwrap().name, "top");
        assert_eq!(tree.node(items[1]).unwrap().kind, SyntaxKind::PackageDeclaration);
        assert_eq!(tree.node(items[2]).unwrap().kind, SyntaxKind::InterfaceDeclaration);
        assert_eq!(tree.node(items[3]).unwrap().kind, SyntaxKind::ProgramDeclaration);
    }

    #[test]
    fn scan_ignores_unrelated_keywords() {
        let tree = scan_into_tree(0, "logic foo; wire bar;");
        assert!(tree.items().is_empty());
    }

    #[test]
    fn should_report_filters_non_errors_when_errors_only() {
        let note = Diagnostic::new(
            DiagCode::NoteInCallTo,
            DiagnosticPhase::Semantic,
            SourceLocation::new(0, 0),
            "note",
        );
        assert!(should_report(&note, false));
        assert!(!should_report(&note, true));
    }
}
