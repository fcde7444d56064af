//! A closed-enumeration syntax representation standing in for the real
//! preprocessor/lexer/parser front end.
//!
//! This crate models only the contracts the semantic core actually
//! depends on: a minimal arena-backed item tree, name syntax (the one
//! parsing operation `Compilation::parseName` names directly), a small
//! data-type syntax subset for the type registry's `getType(syntax, ...)`,
//! and a recursion-limited expression parser used to exercise the
//! `maxRecursionDepth` contract.

pub mod data_type;
pub mod expr;
pub mod name;
pub mod tree;

pub use data_type::{DataTypeSyntax, KeywordType, NetKeyword, PackedDimensionSyntax, Signing};
pub use expr::{parse_expression, ExpressionSyntax};
pub use name::{parse_name, HierarchicalName, HierarchicalRoot, NameSyntax, ScopedName, ScopedRoot};
pub use tree::{NodeIndex, SyntaxKind, SyntaxNode, SyntaxTree};
