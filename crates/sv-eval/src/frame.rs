//! Call frames for constant-expression evaluation.

use rustc_hash::FxHashMap;
use sv_common::location::SourceLocation;
use sv_symbols::SymbolId;

use crate::value::ConstantValue;

/// Identifies a frame's position on the call stack at the moment it was
/// pushed. Not used to address storage (frames are popped in order, so a
/// plain `Vec` suffices) — kept as a typed handle for callers that want to
/// refer back to "the frame active when X happened" in diagnostics or tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameId(u32);

impl FrameId {
    #[must_use]
    pub(crate) const fn new(index: u32) -> Self {
        Self(index)
    }
}

/// The call-site information for a non-global frame: the subroutine's
/// display name and its arguments, stringified as of the call, so
/// call-stack diagnostics don't need to re-evaluate anything.
#[derive(Clone, Debug)]
pub struct SubroutineCall {
    pub name: String,
    pub args_display: Vec<String>,
    /// The symbol bound to the subroutine's return value, if any (a void
    /// function/task has none).
    pub return_slot: Option<SymbolId>,
}

/// One level of the constant-evaluation call stack.
#[derive(Clone, Debug)]
pub struct Frame {
    /// `None` for the global (bottom) frame.
    pub call: Option<SubroutineCall>,
    pub locals: FxHashMap<SymbolId, ConstantValue>,
    pub call_location: SourceLocation,
    pub lookup_location: SourceLocation,
    pub has_returned: bool,
}

impl Frame {
    #[must_use]
    pub fn global() -> Self {
        Self {
            call: None,
            locals: FxHashMap::default(),
            call_location: SourceLocation::synthetic(),
            lookup_location: SourceLocation::synthetic(),
            has_returned: false,
        }
    }

    #[must_use]
    pub fn for_call(
        call: SubroutineCall,
        call_location: SourceLocation,
        lookup_location: SourceLocation,
    ) -> Self {
        Self {
            call: Some(call),
            locals: FxHashMap::default(),
            call_location,
            lookup_location,
            has_returned: false,
        }
    }
}
