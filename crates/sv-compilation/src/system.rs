//! Minimal registries for system tasks/functions (`$display`, `$clog2`,
//! ...) and built-in methods on array/string/event types
//! (`arr.size()`, `q.push_back()`, ...). Only the lookup surface the
//! Compilation manager's contract exposes is modeled; the subroutines
//! themselves don't carry executable bodies here.

#[derive(Clone, Debug)]
pub struct SystemSubroutine {
    pub name: String,
}

impl SystemSubroutine {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Which built-in type family a system method is registered against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SystemMethodScope {
    Array,
    String,
    Event,
}

#[derive(Clone, Debug)]
pub struct SystemMethod {
    pub name: String,
}

impl SystemMethod {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
