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

//! Linear-coefficient extraction and Gaussian elimination.

use crate::ast::{BinOp, Expr, ExprKind, Function};

use super::{BackendError, apply_function};

const PIVOT_EPSILON: f64 = 1e-12;

/// `coeffs . x + constant` over a fixed unknown ordering.
#[derive(Debug, Clone)]
pub(crate) struct LinearForm {
    pub coeffs: Vec<f64>,
    pub constant: f64,
}

impl LinearForm {
    fn constant_value(n: usize, value: f64) -> Self {
        Self {
            coeffs: vec![0.0; n],
            constant: value,
        }
    }

    fn is_constant(&self) -> bool {
        self.coeffs.iter().all(|c| *c == 0.0)
    }
}

/// Extracts the linear form of `expr` over `unknowns`.
///
/// Returns `Ok(None)` when the expression is not linear in the unknowns;
/// the caller then falls back to iterative solving.
pub(crate) fn linearize(
    expr: &Expr,
    unknowns: &[String],
    degree_trig: bool,
    budget: &mut u64,
) -> Result<Option<LinearForm>, BackendError> {
    if *budget == 0 {
        return Err(BackendError::BudgetExhausted);
    }
    *budget -= 1;

    let n = unknowns.len();
    let form = match &expr.kind {
        ExprKind::Number(v) => Some(LinearForm::constant_value(n, *v)),
        ExprKind::Constant(c) => Some(LinearForm::constant_value(n, c.value())),
        ExprKind::Ident(name) => unknowns.iter().position(|u| u == name).map(|idx| {
            let mut coeffs = vec![0.0; n];
            coeffs[idx] = 1.0;
            LinearForm {
                coeffs,
                constant: 0.0,
            }
        }),
        ExprKind::UnaryNeg(inner) => {
            linearize(inner, unknowns, degree_trig, budget)?.map(|mut form| {
                for c in &mut form.coeffs {
                    *c = -*c;
                }
                form.constant = -form.constant;
                form
            })
        }
        ExprKind::Binary { op, left, right } => {
            let Some(l) = linearize(left, unknowns, degree_trig, budget)? else {
                return Ok(None);
            };
            let Some(r) = linearize(right, unknowns, degree_trig, budget)? else {
                return Ok(None);
            };
            combine(*op, l, r)
        }
        ExprKind::Call { name, args } => {
            // A call stays linear only when every argument folds to a constant.
            let Some(function) = Function::from_name(name) else {
                return Ok(None);
            };
            let mut values = Vec::with_capacity(args.len());
            for arg in args {
                match linearize(arg, unknowns, degree_trig, budget)? {
                    Some(form) if form.is_constant() => values.push(form.constant),
                    _ => return Ok(None),
                }
            }
            Some(LinearForm::constant_value(
                n,
                apply_function(function, &values, degree_trig),
            ))
        }
    };

    Ok(form)
}

/// Combines two linear forms under a binary operator, if linearity survives.
fn combine(op: BinOp, l: LinearForm, r: LinearForm) -> Option<LinearForm> {
    match op {
        BinOp::Add => Some(LinearForm {
            coeffs: l
                .coeffs
                .iter()
                .zip(r.coeffs.iter())
                .map(|(a, b)| a + b)
                .collect(),
            constant: l.constant + r.constant,
        }),
        BinOp::Sub => Some(LinearForm {
            coeffs: l
                .coeffs
                .iter()
                .zip(r.coeffs.iter())
                .map(|(a, b)| a - b)
                .collect(),
            constant: l.constant - r.constant,
        }),
        BinOp::Mul => {
            // Scaling by a constant preserves linearity; anything else does not.
            if l.is_constant() {
                Some(scale(r, l.constant))
            } else if r.is_constant() {
                Some(scale(l, r.constant))
            } else {
                None
            }
        }
        BinOp::Div => {
            if r.is_constant() && r.constant != 0.0 {
                Some(scale(l, 1.0 / r.constant))
            } else {
                None
            }
        }
        BinOp::Pow => {
            if l.is_constant() && r.is_constant() {
                Some(LinearForm::constant_value(
                    l.coeffs.len(),
                    l.constant.powf(r.constant),
                ))
            } else {
                None
            }
        }
    }
}

fn scale(mut form: LinearForm, factor: f64) -> LinearForm {
    for c in &mut form.coeffs {
        *c *= factor;
    }
    form.constant *= factor;
    form
}

/// Solves `matrix . x = rhs` by Gaussian elimination with partial pivoting.
///
/// Returns `None` when the matrix is singular (or numerically so).
pub(crate) fn solve_linear_system(
    mut matrix: Vec<Vec<f64>>,
    mut rhs: Vec<f64>,
) -> Option<Vec<f64>> {
    let n = rhs.len();

    for col in 0..n {
        // Pick the largest remaining pivot to keep elimination stable.
        let pivot_row = (col..n).max_by(|a, b| {
            matrix[*a][col]
                .abs()
                .total_cmp(&matrix[*b][col].abs())
        })?;
        if matrix[pivot_row][col].abs() < PIVOT_EPSILON {
            return None;
        }
        matrix.swap(col, pivot_row);
        rhs.swap(col, pivot_row);

        for row in (col + 1)..n {
            let factor = matrix[row][col] / matrix[col][col];
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                matrix[row][k] -= factor * matrix[col][k];
            }
            rhs[row] -= factor * rhs[col];
        }
    }

    // Back substitution.
    let mut solution = vec![0.0; n];
    for row in (0..n).rev() {
        let mut acc = rhs[row];
        for col in (row + 1)..n {
            acc -= matrix[row][col] * solution[col];
        }
        solution[row] = acc / matrix[row][row];
    }

    solution.iter().all(|v| v.is_finite()).then_some(solution)
}
