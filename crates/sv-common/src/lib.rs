//! Foundational types for the sv-elab semantic elaboration core.
//!
//! This crate provides:
//! - `SourceLocation` / `SourceRange` - source position tracking
//! - `Arena<T>` - append-only index arena used by every long-lived semantic object
//! - Diagnostic codes, categories, and the ordered/deduplicated `DiagnosticBag`
//! - Compiler limits (recursion depth, scope-walk bounds)

pub mod arena;
pub mod diagnostics;
pub mod limits;
pub mod location;

pub use arena::{Arena, ArenaId};
pub use diagnostics::{Diagnostic, DiagnosticBag, DiagnosticSeverity, DiagCode};
pub use location::{SourceLocation, SourceRange};
