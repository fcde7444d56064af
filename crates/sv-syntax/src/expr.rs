//! A minimal parenthesized-expression parser used solely to exercise the
//! `maxRecursionDepth` contract (see `original_source`'s
//! `ExpressionParsingTests.cpp`: "language constructs are too deeply
//! nested"). The full expression grammar is explicitly out of scope.

use std::iter::Peekable;
use std::str::CharIndices;

use sv_common::diagnostics::{DiagCode, Diagnostic, DiagnosticBag, DiagnosticPhase};
use sv_common::location::SourceLocation;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExpressionSyntax {
    Literal(i64),
    Parenthesized(Box<ExpressionSyntax>),
    /// Produced at the node where recursion was truncated, or when no
    /// valid expression could be parsed at all.
    Error,
}

/// Parses `text` as a (possibly deeply parenthesized) integer literal
/// expression, never recursing past `max_depth` levels of `(...)`
/// nesting.
///
/// On exceeding `max_depth`, emits exactly one
/// [`DiagCode::ExpressionTooDeeplyNested`] diagnostic at the offending
/// open-paren and recovers by consuming the remainder of that group
/// iteratively (not recursively), so a pathological input can't overflow
/// this parser's own call stack. The returned tree is always a
/// best-effort tree, never absent.
pub fn parse_expression(text: &str, max_depth: u32) -> (ExpressionSyntax, DiagnosticBag) {
    let mut chars = text.char_indices().peekable();
    let mut diagnostics = DiagnosticBag::new();
    let mut reported = false;
    let expr = parse_inner(&mut chars, 0, max_depth, &mut diagnostics, &mut reported);
    (expr, diagnostics)
}

fn skip_whitespace(chars: &mut Peekable<CharIndices<'_>>) {
    while matches!(chars.peek(), Some((_, c)) if c.is_whitespace()) {
        chars.next();
    }
}

/// Consumes a balanced `(...)` group iteratively, without recursing.
/// Assumes the opening `(` has not yet been consumed.
fn skip_balanced_group(chars: &mut Peekable<CharIndices<'_>>) {
    let Some((_, '(')) = chars.next() else {
        return;
    };
    let mut depth: u32 = 1;
    while depth > 0 {
        match chars.next() {
            Some((_, '(')) => depth += 1,
            Some((_, ')')) => depth -= 1,
            Some(_) => {}
            None => break,
        }
    }
}

fn parse_inner(
    chars: &mut Peekable<CharIndices<'_>>,
    depth: u32,
    max_depth: u32,
    diagnostics: &mut DiagnosticBag,
    reported: &mut bool,
) -> ExpressionSyntax {
    skip_whitespace(chars);
    match chars.peek().copied() {
        Some((offset, '(')) => {
            if depth >= max_depth {
                if !*reported {
                    diagnostics.add(Diagnostic::new(
                        DiagCode::ExpressionTooDeeplyNested,
                        DiagnosticPhase::Parse,
                        SourceLocation::new(0, offset as u32),
                        "language constructs are too deeply nested",
                    ));
                    *reported = true;
                }
                skip_balanced_group(chars);
                ExpressionSyntax::Error
            } else {
                chars.next();
                let inner = parse_inner(chars, depth + 1, max_depth, diagnostics, reported);
                skip_whitespace(chars);
                if let Some((_, ')')) = chars.peek() {
                    chars.next();
                }
                ExpressionSyntax::Parenthesized(Box::new(inner))
            }
        }
        Some((_, c)) if c.is_ascii_digit() => {
            let mut value: i64 = 0;
            while let Some((_, c)) = chars.peek().copied() {
                if let Some(digit) = c.to_digit(10) {
                    value = value * 10 + i64::from(digit);
                    chars.next();
                } else {
                    break;
                }
            }
            ExpressionSyntax::Literal(value)
        }
        _ => ExpressionSyntax::Error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_bare_literal() {
        let (expr, mut diags) = parse_expression("42", 10);
        assert_eq!(expr, ExpressionSyntax::Literal(42));
        assert!(diags.all().is_empty());
    }

    #[test]
    fn parses_nested_parens_within_the_limit() {
        let (expr, mut diags) = parse_expression("((1))", 10);
        assert_eq!(
            expr,
            ExpressionSyntax::Parenthesized(Box::new(ExpressionSyntax::Parenthesized(Box::new(
                ExpressionSyntax::Literal(1)
            ))))
        );
        assert!(diags.all().is_empty());
    }

    #[test]
    fn exceeding_max_depth_reports_exactly_one_diagnostic_and_recovers() {
        let max_depth = 4;
        // N+1 = 5 nested parens around a literal.
        let text = "(((((1)))))";
        let (expr, mut diags) = parse_expression(text, max_depth);
        let all = diags.all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].code, DiagCode::ExpressionTooDeeplyNested);
        // The tree is a best-effort tree, not absent: the outer (within-limit)
        // layers still wrap the truncated inner group.
        let mut depth = 0;
        let mut cursor = &expr;
        while let ExpressionSyntax::Parenthesized(inner) = cursor {
            depth += 1;
            cursor = inner;
        }
        assert_eq!(depth, max_depth);
        assert_eq!(*cursor, ExpressionSyntax::Error);
    }

    #[test]
    fn only_the_first_violation_is_reported() {
        let (_, mut diags) = parse_expression("(((((((((((1)))))))))))", 2);
        assert_eq!(diags.all().len(), 1);
    }
}
