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

//! Expression parser.

use crate::ast::{BinOp, Expr, ExprKind, NamedConstant, SourceSpan, Span};
use nom::Parser;
use nom::{
    branch::alt,
    combinator::{map_res, opt},
    error::context,
    multi::separated_list0,
    number::complete::recognize_float,
    sequence::delimited,
};

use super::PResult;
use super::utils::{identifier, ws, ws_char};

/// Top-level expression parser.
pub(super) fn expr(input: Span<'_>) -> PResult<'_, Expr> {
    parse_add_sub(input)
}

/// Parses left-associative `+`/`-`.
fn parse_add_sub(input: Span<'_>) -> PResult<'_, Expr> {
    let (mut input, mut left) = parse_mul_div(input)?;
    loop {
        let (next, op) = opt(alt((ws_char('+'), ws_char('-')))).parse(input)?;
        let Some(op_char) = op else {
            break;
        };

        // Left-associative fold: `a-b-c` becomes `(a-b)-c`.
        let (next, right) = parse_mul_div(next)?;
        let op = if op_char == '+' {
            BinOp::Add
        } else {
            BinOp::Sub
        };
        let span = left.span.merge(&right.span);
        left = Expr {
            kind: ExprKind::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
            span,
        };
        input = next;
    }
    Ok((input, left))
}

/// Parses left-associative `*`/`/`.
fn parse_mul_div(input: Span<'_>) -> PResult<'_, Expr> {
    let (mut input, mut left) = parse_unary(input)?;
    loop {
        let (next, op) = opt(alt((ws_char('*'), ws_char('/')))).parse(input)?;
        let Some(op_char) = op else {
            break;
        };

        // Left-associative fold: `a/b/c` becomes `(a/b)/c`.
        let (next, right) = parse_unary(next)?;
        let op = if op_char == '*' {
            BinOp::Mul
        } else {
            BinOp::Div
        };
        let span = left.span.merge(&right.span);
        left = Expr {
            kind: ExprKind::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
            span,
        };
        input = next;
    }
    Ok((input, left))
}

/// Parses unary operators.
///
/// Negation binds looser than `^`, so `-2^2` reads as `-(2^2)`.
fn parse_unary(input: Span<'_>) -> PResult<'_, Expr> {
    let start = input;
    // Unary minus is parsed recursively to support chains like `--x`.
    if let Ok((input, _)) = ws_char('-').parse(input) {
        let (input, inner) = parse_unary(input)?;
        let span = SourceSpan::from_bounds(start, input);
        return Ok((
            input,
            Expr {
                kind: ExprKind::UnaryNeg(Box::new(inner)),
                span,
            },
        ));
    }
    parse_power(input)
}

/// Parses right-associative `^`.
fn parse_power(input: Span<'_>) -> PResult<'_, Expr> {
    let (input, base) = parse_primary(input)?;
    let (input, caret) = opt(ws_char('^')).parse(input)?;
    let Some(_) = caret else {
        return Ok((input, base));
    };

    // The exponent re-enters the unary level so `2^-3` parses.
    let (input, exponent) = parse_unary(input)?;
    let span = base.span.merge(&exponent.span);
    Ok((
        input,
        Expr {
            kind: ExprKind::Binary {
                op: BinOp::Pow,
                left: Box::new(base),
                right: Box::new(exponent),
            },
            span,
        },
    ))
}

/// Parses expression atoms.
fn parse_primary(input: Span<'_>) -> PResult<'_, Expr> {
    alt((parse_parenthesized, parse_number, parse_ident_or_call)).parse(input)
}

/// Parses parenthesized expressions.
fn parse_parenthesized(input: Span<'_>) -> PResult<'_, Expr> {
    let start = input;
    let (input, inner) = delimited(ws_char('('), expr, context("')'", ws_char(')'))).parse(input)?;
    let mut inner = inner;
    // Preserve outer range for better diagnostics around parenthesized terms.
    inner.span = SourceSpan::from_bounds(start, input);
    Ok((input, inner))
}

/// Parses numeric literal expressions.
fn parse_number(input: Span<'_>) -> PResult<'_, Expr> {
    let start = input;
    let (input, n) = ws(map_res(recognize_float, |s: Span<'_>| {
        s.fragment().parse::<f64>()
    }))
    .parse(input)?;
    let span = SourceSpan::from_bounds(start, input);
    Ok((
        input,
        Expr {
            kind: ExprKind::Number(n),
            span,
        },
    ))
}

/// Parses an identifier, a named constant, or a function call.
fn parse_ident_or_call(input: Span<'_>) -> PResult<'_, Expr> {
    let start = input;
    let (input, name) = ws(identifier).parse(input)?;
    let (input, args) = opt(delimited(
        ws_char('('),
        separated_list0(ws_char(','), expr),
        context("')'", ws_char(')')),
    ))
    .parse(input)?;

    let span = SourceSpan::from_bounds(start, input);
    // A name followed by `(...)` is parsed as call; bare names resolve to a
    // constant when recognized, otherwise stay free variables.
    let kind = if let Some(args) = args {
        ExprKind::Call { name, args }
    } else if let Some(constant) = NamedConstant::from_name(&name) {
        ExprKind::Constant(constant)
    } else {
        ExprKind::Ident(name)
    };

    Ok((input, Expr { kind, span }))
}
