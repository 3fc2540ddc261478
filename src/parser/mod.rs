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

//! `nom` parser for normalized math input.
//!
//! The grammar supports:
//! - one or more statements separated by top-level commas
//! - statements as bare expressions or `lhs = rhs` equations
//!
//! Expressions support:
//! - numeric literals, identifiers, and named constants (`pi`, `e`)
//! - unary negation
//! - binary `+ - * /` and right-associative `^`
//! - function calls (`sin`, `sqrt`, `min`, ...)
//!
//! Parsing is structural only: nothing is evaluated or simplified here, so
//! the orchestrator can classify the problem shape from the raw tree.

mod expr;
mod utils;

use crate::ast::{Ast, Equation, Expr, ExprKind, Function, SourceSpan, Span, Statement};
use crate::diagnostics::ParseError;
use nom::{
    IResult,
    combinator::{all_consuming, opt},
    error::{VerboseError, VerboseErrorKind},
    multi::separated_list1,
    sequence::delimited,
};
use nom::Parser;

use self::expr::expr as expression;
use self::utils::{ws0, ws_char};

type PResult<'a, O> = IResult<Span<'a>, O, VerboseError<Span<'a>>>;

/// Parses normalized input into a spanned, unevaluated [`Ast`].
pub fn parse_input(source: &str) -> Result<Ast, ParseError> {
    let input = Span::new(source);
    // `all_consuming` ensures trailing garbage is treated as syntax error.
    let (_, statements) =
        match all_consuming(delimited(ws0, separated_list1(ws_char(','), statement), ws0))(input) {
            Ok(v) => v,
            Err(err) => return Err(parse_error_to_diagnostic(err, source)),
        };

    let ast = Ast { statements };
    check_vocabulary(&ast, source)?;
    Ok(ast)
}

/// Parses one top-level statement: an expression or an equation.
fn statement(input: Span<'_>) -> PResult<'_, Statement> {
    let (input, lhs) = expression(input)?;
    let (input, eq) = opt(ws_char('=')).parse(input)?;
    if eq.is_none() {
        return Ok((input, Statement::Expr(lhs)));
    }

    let (input, rhs) = expression(input)?;
    Ok((input, Statement::Equation(Equation { lhs, rhs })))
}

/// Converts a `nom` verbose error to crate-level diagnostics.
fn parse_error_to_diagnostic(err: nom::Err<VerboseError<Span<'_>>>, source: &str) -> ParseError {
    match err {
        nom::Err::Incomplete(_) => ParseError::message_only("Incomplete input"),
        nom::Err::Error(e) | nom::Err::Failure(e) => {
            // Use the deepest recorded parser error as the diagnostic anchor.
            if let Some((span, kind)) = e.errors.last() {
                let span = SourceSpan::from_bounds(*span, *span);
                let detail = match kind {
                    VerboseErrorKind::Context(ctx) => format!("Syntax error: expected {ctx}"),
                    VerboseErrorKind::Char(c) => format!("Syntax error: expected '{c}'"),
                    VerboseErrorKind::Nom(kind) => format!("Syntax error near {kind:?}"),
                };
                ParseError::from_span(detail, source, &span)
            } else {
                ParseError::message_only("Syntax error")
            }
        }
    }
}

/// Rejects unknown functions, wrong arities, and bare function names.
///
/// These are vocabulary errors rather than syntax errors, so they are checked
/// on the finished tree where spans give precise diagnostics.
fn check_vocabulary(ast: &Ast, source: &str) -> Result<(), ParseError> {
    for stmt in &ast.statements {
        match stmt {
            Statement::Expr(expr) => check_expr_vocabulary(expr, source)?,
            Statement::Equation(eq) => {
                check_expr_vocabulary(&eq.lhs, source)?;
                check_expr_vocabulary(&eq.rhs, source)?;
            }
        }
    }
    Ok(())
}

fn check_expr_vocabulary(expr: &Expr, source: &str) -> Result<(), ParseError> {
    match &expr.kind {
        ExprKind::Number(_) | ExprKind::Constant(_) => Ok(()),
        ExprKind::Ident(name) => {
            if Function::from_name(name).is_some() {
                return Err(ParseError::from_span(
                    format!("Function '{name}' requires call arguments"),
                    source,
                    &expr.span,
                ));
            }
            Ok(())
        }
        ExprKind::UnaryNeg(inner) => check_expr_vocabulary(inner, source),
        ExprKind::Binary { left, right, .. } => {
            check_expr_vocabulary(left, source)?;
            check_expr_vocabulary(right, source)
        }
        ExprKind::Call { name, args } => {
            let Some(function) = Function::from_name(name) else {
                return Err(ParseError::from_span(
                    format!("Unknown function '{name}'"),
                    source,
                    &expr.span,
                ));
            };
            if args.len() != function.arity() {
                return Err(ParseError::from_span(
                    format!(
                        "Function '{}' expects {} argument{}, found {}",
                        function.name(),
                        function.arity(),
                        if function.arity() == 1 { "" } else { "s" },
                        args.len()
                    ),
                    source,
                    &expr.span,
                ));
            }
            for arg in args {
                check_expr_vocabulary(arg, source)?;
            }
            Ok(())
        }
    }
}
