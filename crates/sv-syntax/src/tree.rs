//! A minimal, arena-backed syntax tree standing in for a real parse tree.
//!
//! Only what the Compilation manager's contract actually consumes is
//! modeled: a root compilation-unit node and its immediate module-family
//! item declarations. Statement and expression bodies are out of scope
//! (see [`crate::expr`] for the one expression construct exercised by the
//! recursion-limit contract).

use smallvec::SmallVec;
use sv_common::arena::{Arena, ArenaId};
use sv_common::diagnostics::DiagnosticBag;
use sv_common::location::SourceLocation;

/// A closed set of syntax node kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    CompilationUnit,
    ModuleDeclaration,
    InterfaceDeclaration,
    ProgramDeclaration,
    PackageDeclaration,
}

/// A typed index into a [`SyntaxTree`]'s node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeIndex(u32);

impl NodeIndex {
    pub const NONE: NodeIndex = NodeIndex(u32::MAX);

    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }
}

impl ArenaId for NodeIndex {
    fn from_index(index: u32) -> Self {
        NodeIndex(index)
    }

    fn index(self) -> u32 {
        self.0
    }
}

#[derive(Clone, Debug)]
pub struct SyntaxNode {
    pub kind: SyntaxKind,
    /// Empty for the compilation-unit root; the declared name otherwise.
    pub name: String,
    pub location: SourceLocation,
    pub children: SmallVec<[NodeIndex; 4]>,
}

/// An arena-backed syntax tree plus the parse diagnostics produced while
/// building it, mirroring the contract that a real syntax tree exposes a
/// root node, its own parse diagnostics, and (elsewhere) a source manager.
#[derive(Debug)]
pub struct SyntaxTree {
    nodes: Arena<SyntaxNode, NodeIndex>,
    root: NodeIndex,
    parse_diagnostics: DiagnosticBag,
}

impl Default for SyntaxTree {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxTree {
    #[must_use]
    pub fn new() -> Self {
        let mut nodes = Arena::new();
        let root = nodes.alloc(SyntaxNode {
            kind: SyntaxKind::CompilationUnit,
            name: String::new(),
            location: SourceLocation::synthetic(),
            children: SmallVec::new(),
        });
        Self {
            nodes,
            root,
            parse_diagnostics: DiagnosticBag::new(),
        }
    }

    #[must_use]
    pub fn root(&self) -> NodeIndex {
        self.root
    }

    #[must_use]
    pub fn node(&self, index: NodeIndex) -> Option<&SyntaxNode> {
        self.nodes.get(index)
    }

    pub fn parse_diagnostics(&mut self) -> &[sv_common::diagnostics::Diagnostic] {
        self.parse_diagnostics.all()
    }

    /// Appends a top-level item of the given kind to the compilation-unit
    /// root, returning the new node's index.
    pub fn add_item(
        &mut self,
        kind: SyntaxKind,
        name: impl Into<String>,
        location: SourceLocation,
    ) -> NodeIndex {
        debug_assert_ne!(
            kind,
            SyntaxKind::CompilationUnit,
            "compilation units are only ever the tree root"
        );
        let child = self.nodes.alloc(SyntaxNode {
            kind,
            name: name.into(),
            location,
            children: SmallVec::new(),
        });
        if let Some(root_node) = self.nodes.get_mut(self.root) {
            root_node.children.push(child);
        }
        child
    }

    /// The immediate children of the compilation-unit root, in declaration order.
    #[must_use]
    pub fn items(&self) -> &[NodeIndex] {
        self.nodes
            .get(self.root)
            .map_or(&[], |node| node.children.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_tree_has_an_empty_compilation_unit_root() {
        let tree = SyntaxTree::new();
        let root = tree.node(tree.root()).expect("root node must exist");
        assert_eq!(root.kind, SyntaxKind::CompilationUnit);
        assert!(tree.items().is_empty());
    }

    #[test]
    fn add_item_appends_to_root_in_declaration_order() {
        let mut tree = SyntaxTree::new();
        let m1 = tree.add_item(SyntaxKind::ModuleDeclaration, "top", SourceLocation::new(0, 0));
        let m2 = tree.add_item(SyntaxKind::PackageDeclaration, "pkg", SourceLocation::new(0, 20));
        assert_eq!(tree.items(), &[m1, m2]);
        assert_eq!(tree.node(m1).unwrap().name, "top");
        assert_eq!(tree.node(m2).unwrap().kind, SyntaxKind::PackageDeclaration);
    }
}
