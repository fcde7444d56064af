//! `EvalContext`: the call-stack-of-frames machine behind constant
//! expression evaluation.

use sv_common::diagnostics::{DiagCode, Diagnostic};
use sv_common::limits::MAX_CONST_EVAL_CALL_DEPTH;
use sv_common::location::SourceLocation;
use sv_symbols::SymbolId;
use tracing::trace;

use crate::frame::{Frame, FrameId, SubroutineCall};
use crate::value::ConstantValue;

/// A contract violation raised by [`EvalContext`] itself, as distinct from
/// a diagnostic about the source being evaluated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalContractViolation {
    /// `create_local` was called twice for the same symbol in the same frame.
    LocalAlreadyBound,
    /// A call pushed past [`MAX_CONST_EVAL_CALL_DEPTH`].
    CallStackTooDeep,
    /// `pop_frame` was called with only the global frame remaining.
    PoppedGlobalFrame,
}

/// The frame stack driving constant-expression evaluation.
///
/// The stack always holds at least the global frame (`subroutine: None`),
/// pushed at construction and never popped.
pub struct EvalContext {
    stack: Vec<Frame>,
    /// One-shot per evaluation, not per frame: the first diagnostic
    /// emitted during this evaluation gets the full call-stack note
    /// chain; subsequent diagnostics in the same evaluation don't repeat it.
    reported_callstack: bool,
    is_script_eval: bool,
}

impl Default for EvalContext {
    fn default() -> Self {
        Self::new(false)
    }
}

impl EvalContext {
    #[must_use]
    pub fn new(is_script_eval: bool) -> Self {
        Self {
            stack: vec![Frame::global()],
            reported_callstack: false,
            is_script_eval,
        }
    }

    #[must_use]
    pub fn is_script_eval(&self) -> bool {
        self.is_script_eval
    }

    #[must_use]
    pub fn depth(&self) -> u32 {
        // The global frame doesn't count toward call depth.
        (self.stack.len() - 1) as u32
    }

    fn current_frame(&self) -> &Frame {
        self.stack.last().expect("frame stack is never empty")
    }

    fn current_frame_mut(&mut self) -> &mut Frame {
        self.stack.last_mut().expect("frame stack is never empty")
    }

    /// Binds `symbol` to `initial` in the current frame, falling back to
    /// `default` (the bound symbol's type's default value) when `initial`
    /// is `None`. `default` is a thunk rather than a plain value so a
    /// caller that always has an initial value never pays to compute one
    /// — `EvalContext` has no [`sv_types::TypeRegistry`] of its own, so
    /// the default has to come from a caller that does.
    ///
    /// # Errors
    ///
    /// Returns [`EvalContractViolation::LocalAlreadyBound`] if `symbol` is
    /// already bound in this frame — re-binding is a programmer error in
    /// the caller, not a condition script-mode evaluation can trigger, so
    /// it's a contract violation rather than a diagnostic in either mode.
    pub fn create_local(
        &mut self,
        symbol: SymbolId,
        initial: Option<ConstantValue>,
        default: impl FnOnce() -> ConstantValue,
    ) -> Result<(), EvalContractViolation> {
        let frame = self.current_frame_mut();
        if frame.locals.contains_key(&symbol) {
            return Err(EvalContractViolation::LocalAlreadyBound);
        }
        frame.locals.insert(symbol, initial.unwrap_or_else(default));
        Ok(())
    }

    #[must_use]
    pub fn find_local(&self, symbol: SymbolId) -> Option<&ConstantValue> {
        self.current_frame().locals.get(&symbol)
    }

    /// Pushes a new frame for a subroutine call.
    ///
    /// # Errors
    ///
    /// Returns [`EvalContractViolation::CallStackTooDeep`] past
    /// [`MAX_CONST_EVAL_CALL_DEPTH`] nested calls, guarding against
    /// self-recursive constant functions with no base case.
    pub fn push_frame(
        &mut self,
        call: SubroutineCall,
        call_location: SourceLocation,
        lookup_location: SourceLocation,
    ) -> Result<FrameId, EvalContractViolation> {
        if self.depth() >= MAX_CONST_EVAL_CALL_DEPTH {
            return Err(EvalContractViolation::CallStackTooDeep);
        }
        trace!(name = %call.name, depth = self.depth() + 1, "pushing const-eval frame");
        self.stack
            .push(Frame::for_call(call, call_location, lookup_location));
        Ok(FrameId::new(self.depth()))
    }

    /// Pops the top frame, returning the value bound to its subroutine's
    /// return slot (if it had a subroutine and a return slot was bound).
    ///
    /// # Errors
    ///
    /// Returns [`EvalContractViolation::PoppedGlobalFrame`] if only the
    /// global frame remains.
    pub fn pop_frame(&mut self) -> Result<Option<ConstantValue>, EvalContractViolation> {
        if self.stack.len() <= 1 {
            return Err(EvalContractViolation::PoppedGlobalFrame);
        }
        let frame = self.stack.pop().expect("checked len > 1 above");
        let return_value = frame.call.as_ref().and_then(|call| {
            call.return_slot
                .and_then(|slot| frame.locals.get(&slot).cloned())
        });
        Ok(return_value)
    }

    /// Marks the current frame as returned and stores `value` in its
    /// subroutine's return slot.
    pub fn set_returned(&mut self, value: ConstantValue) {
        let frame = self.current_frame_mut();
        frame.has_returned = true;
        if let Some(call) = &frame.call {
            if let Some(slot) = call.return_slot {
                frame.locals.insert(slot, value);
            }
        }
    }

    #[must_use]
    pub fn has_returned(&self) -> bool {
        self.current_frame().has_returned
    }

    /// A debug stringification of every frame's locals, bottom to top.
    #[must_use]
    pub fn dump_stack(&self) -> String {
        let mut out = String::new();
        for (depth, frame) in self.stack.iter().enumerate() {
            let header = match &frame.call {
                None => "global".to_string(),
                Some(call) => format!("{}({})", call.name, call.args_display.join(", ")),
            };
            out.push_str(&format!("#{depth} {header}\n"));
            for (symbol, value) in &frame.locals {
                out.push_str(&format!("    {symbol:?} = {}\n", value.display()));
            }
        }
        out
    }

    /// Attaches `NoteInCallTo` notes to `diagnostic`, one per non-global
    /// frame on the stack, outer-to-inner (the frame that made the
    /// outermost call first). A no-op past the first call within a given
    /// evaluation: `reported_callstack` is a one-shot latch per
    /// `EvalContext`, not per frame.
    pub fn attach_call_stack_notes(&mut self, mut diagnostic: Diagnostic) -> Diagnostic {
        if self.reported_callstack {
            return diagnostic;
        }
        self.reported_callstack = true;
        let phase = diagnostic.phase;
        for frame in &self.stack[1..] {
            let Some(call) = &frame.call else { continue };
            let message = format!("{}({})", call.name, call.args_display.join(", "));
            diagnostic = diagnostic.with_note(Diagnostic::new(
                DiagCode::NoteInCallTo,
                phase,
                frame.call_location,
                message,
            ));
        }
        diagnostic
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sv_common::diagnostics::DiagnosticPhase;

    fn symbol(n: u32) -> SymbolId {
        // Tests only need distinct, stable handles; SymbolId's internals
        // are private to sv-symbols so we go through its own arena.
        let mut table = sv_symbols::SymbolTable::new();
        for _ in 0..n {
            table.alloc_symbol(
                sv_symbols::SymbolKind::Variable,
                "",
                SourceLocation::synthetic(),
                sv_symbols::ScopeId::NONE,
            );
        }
        table.alloc_symbol(
            sv_symbols::SymbolKind::Variable,
            "",
            SourceLocation::synthetic(),
            sv_symbols::ScopeId::NONE,
        )
    }

    #[test]
    fn global_frame_always_present() {
        let ctx = EvalContext::new(false);
        assert_eq!(ctx.depth(), 0);
    }

    #[test]
    fn create_local_rejects_double_binding() {
        let mut ctx = EvalContext::new(false);
        let sym = symbol(1);
        ctx.create_local(sym, Some(ConstantValue::Null), || ConstantValue::Null)
            .unwrap();
        assert_eq!(
            ctx.create_local(sym, Some(ConstantValue::Null), || ConstantValue::Null),
            Err(EvalContractViolation::LocalAlreadyBound)
        );
    }

    #[test]
    fn create_local_falls_back_to_the_supplied_default_when_initial_is_absent() {
        let mut ctx = EvalContext::new(false);
        let sym = symbol(1);
        ctx.create_local(sym, None, || ConstantValue::Integer(
            crate::value::ConstantInteger::known(32, false, 0),
        ))
        .unwrap();
        assert_eq!(
            ctx.find_local(sym),
            Some(&ConstantValue::Integer(
                crate::value::ConstantInteger::known(32, false, 0)
            ))
        );
    }

    #[test]
    fn pop_frame_returns_return_slot_value() {
        let mut ctx = EvalContext::new(false);
        let return_slot = symbol(1);
        ctx.push_frame(
            SubroutineCall {
                name: "f".to_string(),
                args_display: vec![],
                return_slot: Some(return_slot),
            },
            SourceLocation::new(0, 0),
            SourceLocation::new(0, 0),
        )
        .unwrap();
        ctx.set_returned(ConstantValue::Integer(crate::value::ConstantInteger::known(
            32, false, 7,
        )));
        let result = ctx.pop_frame().unwrap();
        assert_eq!(
            result,
            Some(ConstantValue::Integer(
                crate::value::ConstantInteger::known(32, false, 7)
            ))
        );
    }

    #[test]
    fn popping_the_global_frame_is_a_contract_violation() {
        let mut ctx = EvalContext::new(false);
        assert_eq!(
            ctx.pop_frame(),
            Err(EvalContractViolation::PoppedGlobalFrame)
        );
    }

    #[test]
    fn call_stack_notes_are_ordered_outer_to_inner() {
        let mut ctx = EvalContext::new(false);
        ctx.push_frame(
            SubroutineCall {
                name: "a".to_string(),
                args_display: vec!["1".to_string()],
                return_slot: None,
            },
            SourceLocation::new(0, 10),
            SourceLocation::new(0, 10),
        )
        .unwrap();
        ctx.push_frame(
            SubroutineCall {
                name: "b".to_string(),
                args_display: vec!["2".to_string()],
                return_slot: None,
            },
            SourceLocation::new(0, 20),
            SourceLocation::new(0, 20),
        )
        .unwrap();

        let diag = Diagnostic::new(
            DiagCode::NotAConstant,
            DiagnosticPhase::Semantic,
            SourceLocation::new(0, 30),
            "not a constant",
        );
        let diag = ctx.attach_call_stack_notes(diag);
        assert_eq!(diag.notes.len(), 2);
        assert_eq!(diag.notes[0].message, "a(1)");
        assert_eq!(diag.notes[1].message, "b(2)");
    }

    #[test]
    fn call_stack_notes_attach_only_once_per_evaluation() {
        let mut ctx = EvalContext::new(false);
        ctx.push_frame(
            SubroutineCall {
                name: "a".to_string(),
                args_display: vec![],
                return_slot: None,
            },
            SourceLocation::new(0, 10),
            SourceLocation::new(0, 10),
        )
        .unwrap();

        let first = Diagnostic::new(
            DiagCode::NotAConstant,
            DiagnosticPhase::Semantic,
            SourceLocation::new(0, 30),
            "first",
        );
        let first = ctx.attach_call_stack_notes(first);
        assert_eq!(first.notes.len(), 1);

        let second = Diagnostic::new(
            DiagCode::NotAConstant,
            DiagnosticPhase::Semantic,
            SourceLocation::new(0, 31),
            "second",
        );
        let second = ctx.attach_call_stack_notes(second);
        assert!(second.notes.is_empty());
    }

    #[test]
    fn call_stack_too_deep_is_rejected() {
        let mut ctx = EvalContext::new(false);
        for _ in 0..MAX_CONST_EVAL_CALL_DEPTH {
            ctx.push_frame(
                SubroutineCall {
                    name: "f".to_string(),
                    args_display: vec![],
                    return_slot: None,
                },
                SourceLocation::new(0, 0),
                SourceLocation::new(0, 0),
            )
            .unwrap();
        }
        let result = ctx.push_frame(
            SubroutineCall {
                name: "f".to_string(),
                args_display: vec![],
                return_slot: None,
            },
            SourceLocation::new(0, 0),
            SourceLocation::new(0, 0),
        );
        assert_eq!(result, Err(EvalContractViolation::CallStackTooDeep));
    }
}
