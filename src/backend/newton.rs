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

//! Damped Newton iteration for non-linear equations and systems.

use crate::ast::Equation;
use std::collections::HashMap;

use super::linear::solve_linear_system;
use super::{BackendError, EvalEnv, eval_expr};

/// Base starting seeds tried in order. Coordinates are offset per unknown so
/// symmetric systems do not start on a singular Jacobian.
const SEEDS: [f64; 5] = [0.0, 1.0, -1.0, 0.5, 2.0];

const TOLERANCE: f64 = 1e-9;
const MAX_DAMPING_STEPS: u32 = 8;

/// Solves `equations` for `unknowns` via damped Newton with a numeric
/// Jacobian. Seeds are retried until one converges.
pub(crate) fn solve_newton(
    equations: &[Equation],
    unknowns: &[String],
    degree_trig: bool,
    max_iterations: usize,
    budget: &mut u64,
) -> Result<Vec<f64>, BackendError> {
    for seed in SEEDS {
        let start: Vec<f64> = (0..unknowns.len())
            .map(|idx| seed + 0.1 * idx as f64)
            .collect();
        if let Some(solution) = iterate_from(
            start,
            equations,
            unknowns,
            degree_trig,
            max_iterations,
            budget,
        )? {
            return Ok(solution);
        }
    }

    Err(BackendError::Unsolvable(
        "iterative solver did not converge from any starting point".to_string(),
    ))
}

/// Runs one Newton descent. `Ok(None)` means this seed failed; budget
/// exhaustion propagates as an error.
fn iterate_from(
    mut x: Vec<f64>,
    equations: &[Equation],
    unknowns: &[String],
    degree_trig: bool,
    max_iterations: usize,
    budget: &mut u64,
) -> Result<Option<Vec<f64>>, BackendError> {
    let n = unknowns.len();

    let mut residuals = match residuals_at(&x, equations, unknowns, degree_trig, budget)? {
        Some(r) => r,
        None => return Ok(None),
    };

    for _ in 0..max_iterations {
        let norm = inf_norm(&residuals);
        if norm < TOLERANCE {
            return Ok(Some(x));
        }

        // Numeric Jacobian by central differences, column per unknown.
        let mut jacobian = vec![vec![0.0; n]; n];
        for col in 0..n {
            let h = 1e-6 * (1.0 + x[col].abs());
            let mut forward = x.clone();
            forward[col] += h;
            let mut backward = x.clone();
            backward[col] -= h;

            let f_plus = match residuals_at(&forward, equations, unknowns, degree_trig, budget)? {
                Some(r) => r,
                None => return Ok(None),
            };
            let f_minus = match residuals_at(&backward, equations, unknowns, degree_trig, budget)? {
                Some(r) => r,
                None => return Ok(None),
            };
            for row in 0..n {
                jacobian[row][col] = (f_plus[row] - f_minus[row]) / (2.0 * h);
            }
        }

        let negated: Vec<f64> = residuals.iter().map(|r| -r).collect();
        let Some(step) = solve_linear_system(jacobian, negated) else {
            // Singular Jacobian at this point; give the next seed a chance.
            return Ok(None);
        };

        // Damp the step until the residual norm actually decreases.
        let mut accepted = false;
        let mut scale = 1.0;
        for _ in 0..MAX_DAMPING_STEPS {
            let candidate: Vec<f64> = x
                .iter()
                .zip(step.iter())
                .map(|(xi, di)| xi + scale * di)
                .collect();
            if let Some(r) = residuals_at(&candidate, equations, unknowns, degree_trig, budget)? {
                if inf_norm(&r) < norm {
                    x = candidate;
                    residuals = r;
                    accepted = true;
                    break;
                }
            }
            scale *= 0.5;
        }
        if !accepted {
            return Ok(None);
        }
    }

    Ok(None)
}

/// Evaluates all residuals `lhs - rhs` at `point`.
///
/// `Ok(None)` marks a non-finite residual (the descent left the domain).
fn residuals_at(
    point: &[f64],
    equations: &[Equation],
    unknowns: &[String],
    degree_trig: bool,
    budget: &mut u64,
) -> Result<Option<Vec<f64>>, BackendError> {
    let values: HashMap<String, f64> = unknowns
        .iter()
        .cloned()
        .zip(point.iter().copied())
        .collect();
    let env = EvalEnv {
        values: &values,
        degree_trig,
    };

    let mut residuals = Vec::with_capacity(equations.len());
    for equation in equations {
        let lhs = eval_expr(&equation.lhs, &env, budget)?;
        let rhs = eval_expr(&equation.rhs, &env, budget)?;
        let residual = lhs - rhs;
        if !residual.is_finite() {
            return Ok(None);
        }
        residuals.push(residual);
    }
    Ok(Some(residuals))
}

fn inf_norm(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |acc, v| acc.max(v.abs()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Statement;
    use crate::parser::parse_input;

    fn equations_of(text: &str) -> Vec<Equation> {
        parse_input(text)
            .expect("parse should succeed")
            .statements
            .into_iter()
            .map(|stmt| match stmt {
                Statement::Equation(eq) => eq,
                Statement::Expr(expr) => panic!("expected equation, got {expr}"),
            })
            .collect()
    }

    fn solve(text: &str, unknowns: &[&str]) -> Vec<f64> {
        let unknowns: Vec<String> = unknowns.iter().map(|s| s.to_string()).collect();
        let mut budget = 1_000_000;
        solve_newton(&equations_of(text), &unknowns, false, 100, &mut budget)
            .expect("newton should converge")
    }

    #[test]
    fn finds_square_root() {
        let solution = solve("x^2=9", &["x"]);
        assert!((solution[0].abs() - 3.0).abs() < 1e-6);
    }

    #[test]
    fn solves_exponential_equation() {
        let solution = solve("exp(x)=5", &["x"]);
        assert!((solution[0] - 5f64.ln()).abs() < 1e-6);
    }

    #[test]
    fn solves_coupled_nonlinear_system() {
        // x*y = 6, x + y = 5 has (2, 3) and (3, 2).
        let solution = solve("x*y=6, x+y=5", &["x", "y"]);
        let (x, y) = (solution[0], solution[1]);
        assert!((x * y - 6.0).abs() < 1e-6);
        assert!((x + y - 5.0).abs() < 1e-6);
    }

    #[test]
    fn unsolvable_equation_fails_cleanly() {
        let unknowns = vec!["x".to_string()];
        let mut budget = 1_000_000;
        let err = solve_newton(&equations_of("x^2=-1"), &unknowns, false, 50, &mut budget)
            .expect_err("no real solution exists");
        assert!(matches!(err, BackendError::Unsolvable(_)));
    }
}
