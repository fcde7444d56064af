//! Diagnostic codes and the ordered, deduplicated diagnostic sink.

use crate::location::{SourceLocation, SourceRange};

/// The closed set of diagnostics the elaboration core can emit.
///
/// Closed rather than open-ended (a plain `u32` + message table, as in
/// some front ends) because every code here is actually tested against in
/// `sv-compilation`'s integration tests; an open code space would let a
/// typo'd code silently fail to match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DiagCode {
    /// A name could not be resolved in any enclosing scope.
    UnknownIdentifier,
    /// An unqualified import (`import pkg::*;`) made a name ambiguous
    /// between two or more packages.
    AmbiguousWildcardImport,
    /// Two packages were registered under the same name.
    DuplicatePackageName,
    /// Two definitions (module/interface/program) were registered under
    /// the same name in the same declaring scope.
    DuplicateDefinitionName,
    /// A name was looked up that refers to a package, not a value or type.
    NameIsPackage,
    /// An expression nested past [`crate::limits::MAX_EXPRESSION_RECURSION_DEPTH`].
    ExpressionTooDeeplyNested,
    /// An instance chain nested past [`crate::limits::MAX_INSTANCE_DEPTH`].
    InstanceTooDeeplyNested,
    /// A constant function call chain nested past
    /// [`crate::limits::MAX_CONST_EVAL_CALL_DEPTH`].
    ConstEvalTooDeeplyNested,
    /// A constant expression referenced something that isn't a compile-time constant.
    NotAConstant,
    /// Attached as a related note to a constant-evaluation diagnostic,
    /// once per call frame on the active call stack, identifying the call
    /// site that led to the failure.
    NoteInCallTo,
}

impl DiagCode {
    /// The default severity for this code absent any user configuration
    /// (e.g. `-Werror`, a future `DiagnosticOptions`).
    #[must_use]
    pub const fn default_severity(self) -> DiagnosticSeverity {
        match self {
            DiagCode::NoteInCallTo => DiagnosticSeverity::Note,
            _ => DiagnosticSeverity::Error,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DiagnosticSeverity {
    Note,
    Warning,
    Error,
}

/// Which pass produced a diagnostic, used to split the three reporting
/// streams (`parse`, `semantic`, `all`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DiagnosticPhase {
    Parse,
    Semantic,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub code: DiagCode,
    pub severity: DiagnosticSeverity,
    pub phase: DiagnosticPhase,
    pub location: SourceLocation,
    pub range: Option<SourceRange>,
    pub message: String,
    /// Related notes attached to this diagnostic, e.g. the `NoteInCallTo`
    /// chain attached to a failed constant evaluation.
    pub notes: Vec<Diagnostic>,
}

impl Diagnostic {
    #[must_use]
    pub fn new(
        code: DiagCode,
        phase: DiagnosticPhase,
        location: SourceLocation,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code,
            severity: code.default_severity(),
            phase,
            location,
            range: None,
            message: message.into(),
            notes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_range(mut self, range: SourceRange) -> Self {
        self.range = Some(range);
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: Diagnostic) -> Self {
        self.notes.push(note);
        self
    }

    fn sort_key(&self) -> (u32, u32, DiagCode) {
        (self.location.buffer, self.location.offset, self.code)
    }
}

/// An ordered, deduplicated collection of diagnostics.
///
/// Diagnostics are appended as they're discovered (in whatever order
/// elaboration happens to visit things) and sorted lazily on read, so
/// emission order never has to match report order. The sorted-and-deduped
/// view is cached until the next `add`.
#[derive(Debug, Default)]
pub struct DiagnosticBag {
    diagnostics: Vec<Diagnostic>,
    dirty: bool,
}

impl DiagnosticBag {
    #[must_use]
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
            dirty: false,
        }
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
        self.dirty = true;
    }

    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        let before = self.diagnostics.len();
        self.diagnostics.extend(diagnostics);
        if self.diagnostics.len() != before {
            self.dirty = true;
        }
    }

    /// Returns every diagnostic, sorted by `(buffer, offset, code)` and
    /// deduplicated on `(code, location, message)`.
    #[must_use]
    pub fn all(&mut self) -> &[Diagnostic] {
        self.normalize();
        &self.diagnostics
    }

    #[must_use]
    pub fn parse_diagnostics(&mut self) -> Vec<&Diagnostic> {
        self.normalize();
        self.diagnostics
            .iter()
            .filter(|d| d.phase == DiagnosticPhase::Parse)
            .collect()
    }

    #[must_use]
    pub fn semantic_diagnostics(&mut self) -> Vec<&Diagnostic> {
        self.normalize();
        self.diagnostics
            .iter()
            .filter(|d| d.phase == DiagnosticPhase::Semantic)
            .collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    fn normalize(&mut self) {
        if !self.dirty {
            return;
        }
        self.diagnostics.sort_by_key(Diagnostic::sort_key);
        self.diagnostics.dedup_by(|a, b| {
            a.code == b.code && a.location == b.location && a.message == b.message
        });
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diag(code: DiagCode, buffer: u32, offset: u32) -> Diagnostic {
        Diagnostic::new(
            code,
            DiagnosticPhase::Semantic,
            SourceLocation::new(buffer, offset),
            "test message",
        )
    }

    #[test]
    fn sorts_by_buffer_then_offset_then_code() {
        let mut bag = DiagnosticBag::new();
        bag.add(diag(DiagCode::UnknownIdentifier, 0, 50));
        bag.add(diag(DiagCode::UnknownIdentifier, 0, 10));
        bag.add(diag(DiagCode::UnknownIdentifier, 1, 0));
        let all = bag.all();
        assert_eq!(all[0].location.offset, 10);
        assert_eq!(all[1].location.offset, 50);
        assert_eq!(all[2].location.buffer, 1);
    }

    #[test]
    fn deduplicates_identical_diagnostics() {
        let mut bag = DiagnosticBag::new();
        bag.add(diag(DiagCode::UnknownIdentifier, 0, 10));
        bag.add(diag(DiagCode::UnknownIdentifier, 0, 10));
        assert_eq!(bag.all().len(), 1);
    }

    #[test]
    fn parse_and_semantic_streams_are_disjoint() {
        let mut bag = DiagnosticBag::new();
        bag.add(Diagnostic::new(
            DiagCode::ExpressionTooDeeplyNested,
            DiagnosticPhase::Parse,
            SourceLocation::new(0, 0),
            "nested too deep",
        ));
        bag.add(diag(DiagCode::UnknownIdentifier, 0, 1));
        assert_eq!(bag.parse_diagnostics().len(), 1);
        assert_eq!(bag.semantic_diagnostics().len(), 1);
        assert_eq!(bag.all().len(), 2);
    }

    #[test]
    fn note_in_call_to_is_a_note_severity_by_default() {
        assert_eq!(
            DiagCode::NoteInCallTo.default_severity(),
            DiagnosticSeverity::Note
        );
        assert_eq!(
            DiagCode::UnknownIdentifier.default_severity(),
            DiagnosticSeverity::Error
        );
    }
}
