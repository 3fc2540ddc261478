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

//! Symbolic-algebra backend capability boundary.
//!
//! The orchestrator depends on [`SymbolicBackend`] only; the shipped
//! [`NumericBackend`] covers unevaluated parsing, closed-form evaluation,
//! exact linear elimination, and damped Newton iteration for the non-linear
//! cases. Every backend call is bounded by an operation budget so a
//! pathological input cannot hang the pipeline; exhaustion surfaces as
//! [`BackendError::BudgetExhausted`].

mod eval;
mod linear;
mod newton;

use crate::ast::{Ast, Equation, Expr};
use crate::diagnostics::ParseError;
use crate::parser::parse_input;
use std::collections::HashMap;
use std::fmt;

pub(crate) use eval::{EvalEnv, apply_function, eval_expr};
use linear::{linearize, solve_linear_system};
use newton::solve_newton;

/// Errors surfaced by backend operations.
#[derive(Debug)]
pub enum BackendError {
    /// The input text could not be parsed.
    Parse(ParseError),
    /// The backend understood the problem but could not solve it.
    Unsolvable(String),
    /// The per-call operation budget ran out before a result was found.
    BudgetExhausted,
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Parse(err) => write!(f, "{err}"),
            BackendError::Unsolvable(message) => write!(f, "{message}"),
            BackendError::BudgetExhausted => {
                write!(f, "backend exhausted its operation budget")
            }
        }
    }
}

impl std::error::Error for BackendError {}

impl From<ParseError> for BackendError {
    fn from(value: ParseError) -> Self {
        BackendError::Parse(value)
    }
}

/// Capability interface for the symbolic-algebra backend.
///
/// Implementations must be pure per call: `&self` receivers, no shared
/// mutable scratch state, so concurrent solves cannot interfere.
pub trait SymbolicBackend {
    /// Parses validated text into an unevaluated [`Ast`].
    fn parse(&self, text: &str) -> Result<Ast, BackendError>;

    /// Evaluates a variable-free expression to a finite number.
    fn evaluate(&self, expr: &Expr) -> Result<f64, BackendError>;

    /// Solves `equations` for `unknowns`.
    ///
    /// Returns one value per unknown, in the order the unknowns were given.
    fn solve(
        &self,
        equations: &[Equation],
        unknowns: &[String],
    ) -> Result<Vec<(String, f64)>, BackendError>;
}

/// Default backend: exact linear elimination plus damped Newton iteration.
#[derive(Debug, Clone)]
pub struct NumericBackend {
    /// Evaluate forward trig in degrees and report inverse trig in degrees.
    pub degree_trig: bool,
    /// Newton iteration cap per starting seed.
    pub max_iterations: usize,
    /// Operation budget per backend call (expression-node visits).
    pub op_budget: u64,
}

impl Default for NumericBackend {
    fn default() -> Self {
        Self {
            degree_trig: true,
            max_iterations: 100,
            op_budget: 500_000,
        }
    }
}

impl NumericBackend {
    /// Creates a backend with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a radian-mode backend.
    pub fn radians() -> Self {
        Self {
            degree_trig: false,
            ..Self::default()
        }
    }
}

impl SymbolicBackend for NumericBackend {
    fn parse(&self, text: &str) -> Result<Ast, BackendError> {
        Ok(parse_input(text)?)
    }

    fn evaluate(&self, expr: &Expr) -> Result<f64, BackendError> {
        let values = HashMap::new();
        let env = EvalEnv {
            values: &values,
            degree_trig: self.degree_trig,
        };
        let mut budget = self.op_budget;
        let value = eval_expr(expr, &env, &mut budget)?;
        if !value.is_finite() {
            return Err(BackendError::Unsolvable(
                "expression does not evaluate to a finite number".to_string(),
            ));
        }
        Ok(value)
    }

    fn solve(
        &self,
        equations: &[Equation],
        unknowns: &[String],
    ) -> Result<Vec<(String, f64)>, BackendError> {
        if equations.is_empty() || unknowns.is_empty() {
            return Err(BackendError::Unsolvable(
                "nothing to solve: no equations or no unknowns".to_string(),
            ));
        }
        if equations.len() != unknowns.len() {
            return Err(BackendError::Unsolvable(format!(
                "cannot solve {} equation{} for {} unknown{}",
                equations.len(),
                if equations.len() == 1 { "" } else { "s" },
                unknowns.len(),
                if unknowns.len() == 1 { "" } else { "s" },
            )));
        }

        let mut budget = self.op_budget;
        let values = self.solve_values(equations, unknowns, &mut budget)?;

        if values.iter().any(|v| !v.is_finite()) {
            return Err(BackendError::Unsolvable(
                "solution contains a non-finite value".to_string(),
            ));
        }

        Ok(unknowns.iter().cloned().zip(values).collect())
    }
}

impl NumericBackend {
    /// Solves for raw values, preferring exact elimination over iteration.
    fn solve_values(
        &self,
        equations: &[Equation],
        unknowns: &[String],
        budget: &mut u64,
    ) -> Result<Vec<f64>, BackendError> {
        // Fully linear systems are solved exactly; this also covers the
        // common single linear equation case without iteration noise.
        if let Some((matrix, rhs)) = self.linear_rows(equations, unknowns, budget)? {
            return match solve_linear_system(matrix, rhs) {
                Some(values) => Ok(values),
                None => Err(BackendError::Unsolvable(
                    "linear system is singular or inconsistent".to_string(),
                )),
            };
        }

        solve_newton(
            equations,
            unknowns,
            self.degree_trig,
            self.max_iterations,
            budget,
        )
    }

    /// Extracts `coeffs . x = rhs` rows when every equation is linear.
    fn linear_rows(
        &self,
        equations: &[Equation],
        unknowns: &[String],
        budget: &mut u64,
    ) -> Result<Option<(Vec<Vec<f64>>, Vec<f64>)>, BackendError> {
        let mut matrix = Vec::with_capacity(equations.len());
        let mut rhs = Vec::with_capacity(equations.len());

        for equation in equations {
            let Some(lhs) = linearize(&equation.lhs, unknowns, self.degree_trig, budget)? else {
                return Ok(None);
            };
            let Some(rhs_form) = linearize(&equation.rhs, unknowns, self.degree_trig, budget)?
            else {
                return Ok(None);
            };

            // Move everything onto the left: (lhs - rhs) . x = rhs_c - lhs_c.
            let row: Vec<f64> = lhs
                .coeffs
                .iter()
                .zip(rhs_form.coeffs.iter())
                .map(|(a, b)| a - b)
                .collect();
            matrix.push(row);
            rhs.push(rhs_form.constant - lhs.constant);
        }

        Ok(Some((matrix, rhs)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Statement;

    fn backend() -> NumericBackend {
        NumericBackend::new()
    }

    fn parse_expr(text: &str) -> Expr {
        let ast = backend().parse(text).expect("parse should succeed");
        match ast.statements.into_iter().next().unwrap() {
            Statement::Expr(expr) => expr,
            Statement::Equation(eq) => panic!("expected expression, got {eq}"),
        }
    }

    fn parse_equations(text: &str) -> Vec<Equation> {
        let ast = backend().parse(text).expect("parse should succeed");
        ast.statements
            .into_iter()
            .map(|stmt| match stmt {
                Statement::Equation(eq) => eq,
                Statement::Expr(expr) => panic!("expected equation, got {expr}"),
            })
            .collect()
    }

    #[test]
    fn evaluates_arithmetic() {
        let value = backend().evaluate(&parse_expr("2+3*4")).expect("evaluate");
        assert_eq!(value, 14.0);
    }

    #[test]
    fn evaluates_degree_mode_trig() {
        let value = backend().evaluate(&parse_expr("sin(30)")).expect("evaluate");
        assert!((value - 0.5).abs() < 1e-12);
    }

    #[test]
    fn evaluates_radian_mode_trig() {
        let value = NumericBackend::radians()
            .evaluate(&parse_expr("cos(0)"))
            .expect("evaluate");
        assert!((value - 1.0).abs() < 1e-12);
    }

    #[test]
    fn rejects_non_finite_evaluation() {
        let err = backend().evaluate(&parse_expr("1/0")).expect_err("evaluate should fail");
        assert!(matches!(err, BackendError::Unsolvable(_)));
    }

    #[test]
    fn solves_single_linear_equation_exactly() {
        let equations = parse_equations("x+2=5");
        let solved = backend()
            .solve(&equations, &["x".to_string()])
            .expect("solve");
        assert_eq!(solved, vec![("x".to_string(), 3.0)]);
    }

    #[test]
    fn solves_two_by_two_linear_system() {
        let equations = parse_equations("x+y=3, x-y=1");
        let solved = backend()
            .solve(&equations, &["x".to_string(), "y".to_string()])
            .expect("solve");
        assert!((solved[0].1 - 2.0).abs() < 1e-9);
        assert!((solved[1].1 - 1.0).abs() < 1e-9);
    }

    #[test]
    fn solves_nonlinear_equation_with_newton() {
        let equations = parse_equations("x^2=9");
        let solved = backend()
            .solve(&equations, &["x".to_string()])
            .expect("solve");
        assert!((solved[0].1.abs() - 3.0).abs() < 1e-6);
    }

    #[test]
    fn reports_singular_linear_system() {
        let equations = parse_equations("x+y=1, x+y=2");
        let err = backend()
            .solve(&equations, &["x".to_string(), "y".to_string()])
            .expect_err("solve should fail");
        assert!(matches!(err, BackendError::Unsolvable(_)));
    }

    #[test]
    fn reports_equation_unknown_count_mismatch() {
        let equations = parse_equations("x+y=1");
        let err = backend()
            .solve(&equations, &["x".to_string(), "y".to_string()])
            .expect_err("solve should fail");
        let message = err.to_string();
        assert!(message.contains("1 equation"), "message: {message}");
        assert!(message.contains("2 unknowns"), "message: {message}");
    }

    #[test]
    fn budget_exhaustion_is_reported() {
        let tight = NumericBackend {
            op_budget: 4,
            ..NumericBackend::default()
        };
        let equations = parse_equations("sin(x)+x^3-2*x=exp(x)-4");
        let err = tight
            .solve(&equations, &["x".to_string()])
            .expect_err("solve should fail");
        assert!(matches!(err, BackendError::BudgetExhausted));
    }
}
