//! The symbol/scope engine: nested scopes with lazy member
//! materialization, wildcard imports, and hierarchical/scoped lookup.

pub mod ids;
pub mod lookup;
pub mod scope;
pub mod symbol;
pub mod table;

pub use ids::{DeferredMemberIndex, ImportDataIndex, ScopeId, SymbolId};
pub use lookup::LookupResult;
pub use scope::{DeferredMemberData, ImportData, PendingMember, Scope, WildcardImport};
pub use symbol::{Symbol, SymbolKind};
pub use table::SymbolTable;
