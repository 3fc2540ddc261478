/*
MIT License

Copyright (c) 2026 Raja Lehtihet and Wael El Oraiby

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

//! Math-input solving core for OCR and hand-typed expressions.
//!
//! This crate provides:
//! - OCR text normalization via an ordered, operator-extensible correction
//!   table.
//! - Natural-language question preprocessing (`"What is 2+3?"` -> `"2+3"`).
//! - Boundary-aware label substitution (points/sides/angles to values).
//! - Structural expression validation with stable failure kinds.
//! - A solving orchestrator over a pluggable [`SymbolicBackend`], with a
//!   default numeric backend (linear elimination + damped Newton).
//! - A static geometric formula registry with per-shape parameter validation.
//!
//! # Pipeline
//!
//! 1. Extract the candidate expression from the question, if any.
//! 2. Normalize OCR noise and whitespace.
//! 3. Validate and substitute labels.
//! 4. Validate expression structure (fail fast, cheapest checks first).
//! 5. Parse unevaluated, classify (evaluation / equation / system), solve.
//!
//! Both subsystems are stateless per request; requests may run concurrently
//! with no shared mutable state.
//!
//! # Example
//!
//! ```
//! use mathscrawl::{SolveRequest, SolveResult, SolvedValue, Solver};
//!
//! let solver = Solver::new();
//! let result = solver.solve(&SolveRequest::expression("2+3*4"));
//! assert_eq!(result, SolveResult::Value(SolvedValue::Number(14.0)));
//! ```

mod ast;
mod backend;
mod config;
mod diagnostics;
mod errors;
mod labels;
mod normalize;
mod parser;
mod question;
mod shapes;
mod solver;
mod validate;

pub use ast::{
    Ast, BinOp, Equation, Expr, ExprKind, Function, NamedConstant, SourceSpan, Statement,
    is_reserved_word,
};
pub use backend::{BackendError, NumericBackend, SymbolicBackend};
pub use config::PipelineConfig;
pub use diagnostics::ParseError;
pub use errors::{ErrorKind, Failure};
pub use labels::{Label, Substitution, check_labels, substitute};
pub use normalize::{Correction, CorrectionGuard, CorrectionTable};
pub use question::{extract_expression, standard_lead_ins};
pub use shapes::{
    CalcKind, CalcRequest, CalcResponse, CalcSpec, ShapeKind, ShapeListing, ShapeSpec, calculate,
    list_shapes, shape_listing,
};
pub use solver::{
    ResponseStatus, ResponseValue, SolveRequest, SolveResponse, SolveResult, SolvedValue, Solver,
};
pub use validate::validate;

/// Solves one request with the default configuration and backend.
pub fn solve(request: &SolveRequest) -> SolveResult {
    Solver::new().solve(request)
}

/// Solves raw expression text with the default configuration and backend.
pub fn solve_expression(text: &str) -> SolveResult {
    solve(&SolveRequest::expression(text))
}

/// Solves a natural-language question with the default configuration and
/// backend.
pub fn solve_question(text: &str) -> SolveResult {
    solve(&SolveRequest::question(text))
}

#[cfg(test)]
mod tests;
