//! Contract violations: programmer errors, reported as a typed `Result`
//! rather than a panic so an embedding application (like `sv-cli`) can
//! decide how loud to be, without an unwinding panic.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContractViolation {
    /// A structural mutation was attempted after `getRoot()` finalized the compilation.
    CompilationFinalized,
    /// `getRoot()` was re-entered while already elaborating (e.g. a binder
    /// that itself calls `getRoot()`).
    ReenteredGetRoot,
    /// `getCompilationUnit` (or similar) was asked about a syntax tree
    /// never added to this compilation.
    UnknownSyntaxTree,
}

impl fmt::Display for ContractViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractViolation::CompilationFinalized => {
                write!(f, "cannot mutate a finalized compilation")
            }
            ContractViolation::ReenteredGetRoot => {
                write!(f, "getRoot() was re-entered during elaboration")
            }
            ContractViolation::UnknownSyntaxTree => {
                write!(f, "syntax tree was never added to this compilation")
            }
        }
    }
}

impl std::error::Error for ContractViolation {}
