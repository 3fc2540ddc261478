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

//! Solving orchestrator.
//!
//! Drives the full pipeline: question preprocessing, OCR normalization,
//! label substitution, structural validation, backend parse, problem-shape
//! classification, and backend dispatch. Each stage runs once, in order, and
//! the first failure wins; backend faults are caught here and mapped to
//! typed failures, never propagated as panics.

mod result;

use crate::ast::{Ast, Equation, Expr, ExprKind, Statement};
use crate::backend::{BackendError, NumericBackend, SymbolicBackend};
use crate::config::PipelineConfig;
use crate::errors::{ErrorKind, Failure};
use crate::labels::{Label, check_labels, substitute};
use crate::question::extract_expression;
use crate::validate::validate;
use log::debug;
use serde::{Deserialize, Serialize};

pub use result::{ResponseStatus, ResponseValue, SolveResponse, SolveResult, SolvedValue};

/// One solve request, as received from the caller.
///
/// Exactly one of `question`/`expression` should be provided; when both are
/// present, `expression` takes precedence and `question` is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SolveRequest {
    /// Natural-language question wrapping an expression.
    pub question: Option<String>,
    /// Raw expression text (OCR output or typed input).
    pub expression: Option<String>,
    /// Labels to substitute before solving.
    pub labels: Vec<Label>,
}

impl SolveRequest {
    /// Creates a request from raw expression text.
    pub fn expression(text: impl Into<String>) -> Self {
        Self {
            expression: Some(text.into()),
            ..Self::default()
        }
    }

    /// Creates a request from a natural-language question.
    pub fn question(text: impl Into<String>) -> Self {
        Self {
            question: Some(text.into()),
            ..Self::default()
        }
    }

    /// Attaches labels to the request.
    pub fn with_labels(mut self, labels: Vec<Label>) -> Self {
        self.labels = labels;
        self
    }
}

/// Pipeline driver over a pluggable symbolic backend.
///
/// Stateless per request: `solve` takes `&self`, builds no shared scratch
/// state, and may be called concurrently.
#[derive(Debug, Clone)]
pub struct Solver<B = NumericBackend> {
    config: PipelineConfig,
    backend: B,
}

impl Solver<NumericBackend> {
    /// Creates a solver with default configuration and backend.
    pub fn new() -> Self {
        Self {
            config: PipelineConfig::default(),
            backend: NumericBackend::default(),
        }
    }
}

impl Default for Solver<NumericBackend> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: SymbolicBackend> Solver<B> {
    /// Creates a solver from explicit configuration and backend.
    pub fn with_backend(config: PipelineConfig, backend: B) -> Self {
        Self { config, backend }
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Runs the full pipeline for one request.
    pub fn solve(&self, request: &SolveRequest) -> SolveResult {
        match self.run(request) {
            Ok(result) => result,
            Err(failure) => {
                debug!("solve failed: {failure}");
                SolveResult::Failure(failure)
            }
        }
    }

    fn run(&self, request: &SolveRequest) -> Result<SolveResult, Failure> {
        // Stage 1: choose the candidate text.
        let candidate = match (&request.expression, &request.question) {
            (Some(expression), _) => expression.clone(),
            (None, Some(question)) => extract_expression(question, &self.config.lead_ins),
            (None, None) => String::new(),
        };
        debug!("candidate text: {candidate:?}");

        // Stage 2: OCR normalization.
        let normalized = self.config.corrections.normalize(&candidate);
        debug!("normalized: {normalized:?}");

        // Stage 3: label checks, then substitution.
        check_labels(&request.labels)?;
        let substitution = substitute(&normalized, &request.labels);
        if !substitution.used.is_empty() {
            debug!(
                "substituted labels {:?}: {:?}",
                substitution.used, substitution.text
            );
        }

        // Stage 4: structural validation, before the backend sees anything.
        validate(&substitution.text)?;

        // Stage 5: unevaluated parse.
        let ast = self
            .backend
            .parse(&substitution.text)
            .map_err(backend_failure)?;

        // Stages 6-8: classify, dispatch, normalize the backend's output.
        match classify(&ast)? {
            Classification::Evaluation(expr) => self.evaluate(&expr),
            Classification::Equations(equations) => self.solve_equations(&equations),
        }
    }

    fn evaluate(&self, expr: &Expr) -> Result<SolveResult, Failure> {
        let mut free = Vec::new();
        expr.collect_free_variables(&mut free);
        if !free.is_empty() {
            return Err(Failure::new(
                ErrorKind::UnresolvedVariable,
                format!(
                    "expression still contains unresolved variable{}: {}",
                    if free.len() == 1 { "" } else { "s" },
                    free.join(", ")
                ),
            ));
        }

        // A bare named constant is reported symbolically, not as a float.
        if let ExprKind::Constant(constant) = &expr.kind {
            return Ok(SolveResult::Value(SolvedValue::Constant(constant.name())));
        }

        let value = self.backend.evaluate(expr).map_err(backend_failure)?;
        debug!("evaluated {expr} = {value}");
        Ok(SolveResult::Value(SolvedValue::Number(value)))
    }

    fn solve_equations(&self, equations: &[Equation]) -> Result<SolveResult, Failure> {
        // Unknowns keep first-appearance order; the assignment map inherits it.
        let mut unknowns = Vec::new();
        for equation in equations {
            equation.lhs.collect_free_variables(&mut unknowns);
            equation.rhs.collect_free_variables(&mut unknowns);
        }
        if unknowns.is_empty() {
            return Err(Failure::new(
                ErrorKind::SolveBackendError,
                "equation contains no unknown variable to solve for",
            ));
        }
        debug!(
            "solving {} equation(s) for {:?}",
            equations.len(),
            unknowns
        );

        let solved = self
            .backend
            .solve(equations, &unknowns)
            .map_err(backend_failure)?;
        Ok(SolveResult::Assignments(solved.into_iter().collect()))
    }
}

/// Problem shape derived from the parsed statements.
enum Classification {
    /// A single bare expression to evaluate.
    Evaluation(Expr),
    /// One or more distinct equations to solve.
    Equations(Vec<Equation>),
}

/// Classifies parsed statements into a problem shape.
///
/// Duplicate equations collapse before counting, so `x=1, x=1` is a single
/// equation rather than an overdetermined system.
fn classify(ast: &Ast) -> Result<Classification, Failure> {
    let mut expressions = Vec::new();
    let mut equations: Vec<Equation> = Vec::new();

    for statement in &ast.statements {
        match statement {
            Statement::Expr(expr) => expressions.push(expr.clone()),
            Statement::Equation(equation) => {
                let rendered = equation.to_string();
                if !equations.iter().any(|seen| seen.to_string() == rendered) {
                    equations.push(equation.clone());
                }
            }
        }
    }

    match (expressions.len(), equations.len()) {
        (1, 0) => Ok(Classification::Evaluation(
            expressions.into_iter().next().unwrap(),
        )),
        (0, n) if n > 0 => Ok(Classification::Equations(equations)),
        (0, 0) => Err(Failure::new(
            ErrorKind::SolveBackendError,
            "input contains no statements",
        )),
        (_, 0) => Err(Failure::new(
            ErrorKind::SolveBackendError,
            "input contains multiple expressions; provide one expression per request",
        )),
        _ => Err(Failure::new(
            ErrorKind::SolveBackendError,
            "input mixes equations and bare expressions",
        )),
    }
}

/// Maps backend faults onto the pipeline failure vocabulary.
fn backend_failure(err: BackendError) -> Failure {
    match err {
        BackendError::Parse(parse) => Failure::new(ErrorKind::SolveBackendError, parse.summary()),
        BackendError::Unsolvable(message) => Failure::new(ErrorKind::SolveBackendError, message),
        BackendError::BudgetExhausted => Failure::new(
            ErrorKind::BackendUnavailable,
            "symbolic backend exceeded its operation budget",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solver() -> Solver<NumericBackend> {
        Solver::new()
    }

    fn value_of(result: SolveResult) -> f64 {
        match result {
            SolveResult::Value(SolvedValue::Number(v)) => v,
            other => panic!("expected numeric value, got {other:?}"),
        }
    }

    #[test]
    fn evaluates_plain_arithmetic() {
        let result = solver().solve(&SolveRequest::expression("2+3*4"));
        assert_eq!(value_of(result), 14.0);
    }

    #[test]
    fn solves_single_equation() {
        let result = solver().solve(&SolveRequest::expression("x+2=5"));
        match result {
            SolveResult::Assignments(assignments) => {
                assert_eq!(assignments.get("x"), Some(&3.0));
            }
            other => panic!("expected assignments, got {other:?}"),
        }
    }

    #[test]
    fn solves_system_in_first_appearance_order() {
        let result = solver().solve(&SolveRequest::expression("y+x=3, y-x=1"));
        match result {
            SolveResult::Assignments(assignments) => {
                let names: Vec<&String> = assignments.keys().collect();
                assert_eq!(names, ["y", "x"]);
                assert!((assignments["y"] - 2.0).abs() < 1e-9);
                assert!((assignments["x"] - 1.0).abs() < 1e-9);
            }
            other => panic!("expected assignments, got {other:?}"),
        }
    }

    #[test]
    fn question_path_strips_wrapping() {
        let result = solver().solve(&SolveRequest::question("What is 2+3?"));
        assert_eq!(value_of(result), 5.0);
    }

    #[test]
    fn expression_takes_precedence_over_question() {
        let request = SolveRequest {
            question: Some("What is 1+1?".to_string()),
            expression: Some("10*10".to_string()),
            labels: Vec::new(),
        };
        assert_eq!(value_of(solver().solve(&request)), 100.0);
    }

    #[test]
    fn labels_resolve_before_validation() {
        let request =
            SolveRequest::expression("l*w").with_labels(vec![Label::new("l", 5.0), Label::new("w", 3.0)]);
        assert_eq!(value_of(solver().solve(&request)), 15.0);
    }

    #[test]
    fn unresolved_variable_fails_evaluation() {
        let result = solver().solve(&SolveRequest::expression("x+1"));
        let failure = result.as_failure().expect("must fail");
        assert_eq!(failure.kind, ErrorKind::UnresolvedVariable);
        assert!(failure.message.contains('x'));
    }

    #[test]
    fn conflicting_labels_fail_before_substitution() {
        let request = SolveRequest::expression("a+1")
            .with_labels(vec![Label::new("a", 1.0), Label::new("a", 1.0)]);
        let result = solver().solve(&request);
        assert_eq!(result.as_failure().expect("must fail").kind, ErrorKind::ConflictingLabel);
    }

    #[test]
    fn validation_failures_short_circuit() {
        let result = solver().solve(&SolveRequest::expression("(2+3"));
        assert_eq!(
            result.as_failure().expect("must fail").kind,
            ErrorKind::UnbalancedParentheses
        );
    }

    #[test]
    fn bare_constant_reports_symbolically() {
        let result = solver().solve(&SolveRequest::expression("pi"));
        assert_eq!(result, SolveResult::Value(SolvedValue::Constant("pi")));
    }

    #[test]
    fn duplicate_equations_collapse_to_one() {
        let result = solver().solve(&SolveRequest::expression("x=4, x=4"));
        match result {
            SolveResult::Assignments(assignments) => {
                assert_eq!(assignments.get("x"), Some(&4.0));
            }
            other => panic!("expected assignments, got {other:?}"),
        }
    }

    #[test]
    fn mixed_statements_are_rejected() {
        let result = solver().solve(&SolveRequest::expression("x=4, 2+2"));
        let failure = result.as_failure().expect("must fail");
        assert_eq!(failure.kind, ErrorKind::SolveBackendError);
        assert!(failure.message.contains("mixes"));
    }

    #[test]
    fn equation_without_unknowns_is_a_backend_error() {
        let result = solver().solve(&SolveRequest::expression("2+2=4"));
        let failure = result.as_failure().expect("must fail");
        assert_eq!(failure.kind, ErrorKind::SolveBackendError);
        assert!(failure.message.contains("no unknown"));
    }

    #[test]
    fn empty_request_reports_empty_expression() {
        let result = solver().solve(&SolveRequest::default());
        assert_eq!(
            result.as_failure().expect("must fail").kind,
            ErrorKind::EmptyExpression
        );
    }

    #[test]
    fn ocr_noise_normalizes_before_solving() {
        // Unicode operators plus a digit-adjacent misread.
        let result = solver().solve(&SolveRequest::expression("2l × 3 − 1"));
        assert_eq!(value_of(result), 62.0);
    }
}
