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

//! Recursive expression evaluation.

use crate::ast::{BinOp, Expr, ExprKind, Function};
use std::collections::HashMap;

use super::BackendError;

/// Evaluation environment: variable bindings plus trig mode.
pub(crate) struct EvalEnv<'a> {
    /// Values for free variables (empty for variable-free evaluation).
    pub values: &'a HashMap<String, f64>,
    /// Degree-mode trigonometry toggle.
    pub degree_trig: bool,
}

/// Charges one operation against the budget.
fn charge(budget: &mut u64) -> Result<(), BackendError> {
    if *budget == 0 {
        return Err(BackendError::BudgetExhausted);
    }
    *budget -= 1;
    Ok(())
}

/// Evaluates an expression tree under `env`.
///
/// Non-finite intermediate values propagate as IEEE semantics dictate; the
/// caller decides whether a non-finite final value is an error.
pub(crate) fn eval_expr(
    expr: &Expr,
    env: &EvalEnv<'_>,
    budget: &mut u64,
) -> Result<f64, BackendError> {
    charge(budget)?;
    match &expr.kind {
        ExprKind::Number(v) => Ok(*v),
        ExprKind::Constant(c) => Ok(c.value()),
        ExprKind::Ident(name) => env.values.get(name).copied().ok_or_else(|| {
            BackendError::Unsolvable(format!("no value bound for variable '{name}'"))
        }),
        ExprKind::UnaryNeg(inner) => Ok(-eval_expr(inner, env, budget)?),
        ExprKind::Binary { op, left, right } => {
            let l = eval_expr(left, env, budget)?;
            let r = eval_expr(right, env, budget)?;
            Ok(match op {
                BinOp::Add => l + r,
                BinOp::Sub => l - r,
                BinOp::Mul => l * r,
                BinOp::Div => l / r,
                BinOp::Pow => l.powf(r),
            })
        }
        ExprKind::Call { name, args } => {
            let function = Function::from_name(name).ok_or_else(|| {
                BackendError::Unsolvable(format!("unknown function '{name}'"))
            })?;
            let mut values = Vec::with_capacity(args.len());
            for arg in args {
                values.push(eval_expr(arg, env, budget)?);
            }
            Ok(apply_function(function, &values, env.degree_trig))
        }
    }
}

/// Applies a built-in function to already-evaluated arguments.
///
/// In degree mode, forward trig converts inputs from degrees and inverse
/// trig converts outputs to degrees.
pub(crate) fn apply_function(function: Function, args: &[f64], degree_trig: bool) -> f64 {
    let unary = |idx: usize| args.get(idx).copied().unwrap_or(f64::NAN);
    match function {
        Function::Sin => forward_trig(unary(0), degree_trig).sin(),
        Function::Cos => forward_trig(unary(0), degree_trig).cos(),
        Function::Tan => forward_trig(unary(0), degree_trig).tan(),
        Function::Asin => inverse_trig(unary(0).asin(), degree_trig),
        Function::Acos => inverse_trig(unary(0).acos(), degree_trig),
        Function::Atan => inverse_trig(unary(0).atan(), degree_trig),
        Function::Sqrt => unary(0).sqrt(),
        Function::Log | Function::Ln => unary(0).ln(),
        Function::Exp => unary(0).exp(),
        Function::Abs => unary(0).abs(),
        Function::Min => unary(0).min(unary(1)),
        Function::Max => unary(0).max(unary(1)),
    }
}

fn forward_trig(value: f64, degree_trig: bool) -> f64 {
    if degree_trig { value.to_radians() } else { value }
}

fn inverse_trig(value: f64, degree_trig: bool) -> f64 {
    if degree_trig { value.to_degrees() } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Statement;
    use crate::parser::parse_input;

    fn expr_of(text: &str) -> Expr {
        match parse_input(text)
            .expect("parse should succeed")
            .statements
            .into_iter()
            .next()
            .unwrap()
        {
            Statement::Expr(expr) => expr,
            Statement::Equation(eq) => panic!("expected expression, got {eq}"),
        }
    }

    fn eval(text: &str, values: &HashMap<String, f64>) -> f64 {
        let env = EvalEnv {
            values,
            degree_trig: true,
        };
        let mut budget = 10_000;
        eval_expr(&expr_of(text), &env, &mut budget).expect("evaluation should succeed")
    }

    #[test]
    fn evaluates_with_variable_bindings() {
        let mut values = HashMap::new();
        values.insert("x".to_string(), 4.0);
        assert_eq!(eval("x^2 - 6", &values), 10.0);
    }

    #[test]
    fn inverse_trig_reports_degrees_in_degree_mode() {
        let values = HashMap::new();
        assert!((eval("asin(1)", &values) - 90.0).abs() < 1e-9);
    }

    #[test]
    fn min_and_max_take_two_arguments() {
        let values = HashMap::new();
        assert_eq!(eval("min(3, 7) + max(3, 7)", &values), 10.0);
    }

    #[test]
    fn unbound_variable_is_an_error() {
        let values = HashMap::new();
        let env = EvalEnv {
            values: &values,
            degree_trig: true,
        };
        let mut budget = 100;
        let err = eval_expr(&expr_of("q+1"), &env, &mut budget).expect_err("should fail");
        assert!(err.to_string().contains("'q'"));
    }

    #[test]
    fn budget_runs_out_on_deep_input() {
        let values = HashMap::new();
        let env = EvalEnv {
            values: &values,
            degree_trig: true,
        };
        let mut budget = 2;
        let err = eval_expr(&expr_of("1+2+3+4"), &env, &mut budget).expect_err("should fail");
        assert!(matches!(err, BackendError::BudgetExhausted));
    }
}
