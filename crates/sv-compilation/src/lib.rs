//! The Compilation manager: the public entry point composing the
//! symbol/scope engine, type registry, definition registry, and constant
//! evaluator into one elaboration pipeline.

pub mod compilation;
pub mod definition;
pub mod errors;
pub mod options;
pub mod system;
pub mod types;

pub use compilation::Compilation;
pub use definition::{Definition, DefinitionId, DefinitionKind, DefinitionRegistry, Package};
pub use errors::ContractViolation;
pub use options::CompilationOptions;
pub use system::{SystemMethod, SystemMethodScope, SystemSubroutine};
pub use types::resolve_data_type;
