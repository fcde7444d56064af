use crate::ids::SymbolId;

/// The result of a name lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LookupResult {
    Found(SymbolId),
    NotFound,
    /// The name resolved to two or more distinct symbols through
    /// different wildcard imports.
    Ambiguous(Vec<SymbolId>),
}

impl LookupResult {
    #[must_use]
    pub fn symbol(&self) -> Option<SymbolId> {
        match self {
            LookupResult::Found(id) => Some(*id),
            _ => None,
        }
    }
}
