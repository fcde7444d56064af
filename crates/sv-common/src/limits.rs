//! Centralized limits and thresholds for the semantic elaboration core.
//!
//! Centralizing these values documents the rationale for each one and
//! keeps native and embedded-host builds using the same numbers unless a
//! constant explicitly says otherwise.
//!
//! # Categories
//!
//! - **Recursion depths**: bound stack usage in recursive algorithms
//!   (expression parsing, constant-expression evaluation, instance
//!   elaboration).
//! - **Iteration counts**: bound work in loop-based algorithms (scope
//!   chain walks).

// =============================================================================
// Recursion depth limits
// =============================================================================

/// Maximum nesting depth for parenthesized/unary expression parsing.
///
/// Each layer of parentheses or unary prefix operator recurses one level
/// deeper into the expression grammar. Past this depth the parser reports
/// `DiagCode::ExpressionTooDeeplyNested` at the offending token and stops
/// descending rather than overflowing the call stack.
///
/// ```text
/// a = ((((((((((1))))))))));   // 10 levels, well under the limit
/// a = (((((((((( ... 512 levels ... ))))))))));  // rejected
/// ```
pub const MAX_EXPRESSION_RECURSION_DEPTH: u32 = 512;

/// Maximum depth of the constant-expression evaluation call stack.
///
/// Each nested constant function call pushes one [`crate::arena`]-free
/// `Frame` (see `sv-eval`). A self-recursive `function` with no base case
/// would otherwise grow this stack without bound.
///
/// ```text
/// function int fact(int n);
///   return n <= 1 ? 1 : n * fact(n - 1);  // one frame per call
/// endfunction
/// localparam int x = fact(2000);  // exceeds the limit, reported as a diagnostic
/// ```
pub const MAX_CONST_EVAL_CALL_DEPTH: u32 = 256;

/// Maximum recursion depth when elaborating nested module instances.
///
/// A module that instantiates itself (directly or through a cycle of
/// instantiations) would otherwise recurse without bound while the
/// elaborator walks the instance tree.
///
/// ```text
/// module m;
///   m inner();   // self-instantiation, caught at this depth
/// endmodule
/// ```
pub const MAX_INSTANCE_DEPTH: u32 = 512;

// =============================================================================
// Iteration count limits
// =============================================================================

/// Maximum number of parent-scope hops during unqualified name lookup.
///
/// Lookup walks from the innermost scope outward through enclosing scopes
/// until it reaches the compilation unit / root tier. Scope nesting in
/// real designs is always shallow (module -> generate block -> block
/// statement, a handful of levels); this is a safety valve against a
/// corrupted or cyclic parent chain rather than a realistic ceiling.
pub const MAX_SCOPE_WALK_ITERATIONS: u32 = 10_000;
