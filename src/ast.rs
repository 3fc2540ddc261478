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

//! AST for parsed math input with precise source spans.
//!
//! The parser produces this AST in an unevaluated form. The orchestrator
//! inspects it to classify the problem shape (evaluation, single equation,
//! system) before the backend performs any numeric work.

use nom_locate::LocatedSpan;
use std::fmt;

/// Parser input span type carrying byte offsets and line/column info.
pub type Span<'a> = LocatedSpan<&'a str>;

/// Source range and anchor position for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSpan {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
    /// 1-based line number.
    pub line: usize,
    /// 1-based UTF-8 column.
    pub column: usize,
}

impl SourceSpan {
    /// Creates a source span from parser start/end positions.
    pub fn from_bounds(start: Span<'_>, end: Span<'_>) -> Self {
        Self {
            start: start.location_offset(),
            end: end.location_offset(),
            line: start.location_line() as usize,
            column: start.get_utf8_column(),
        }
    }

    /// Returns span length in bytes.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns whether the span covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a span that starts at `self` and ends at `other`.
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            start: self.start,
            end: other.end,
            line: self.line,
            column: self.column,
        }
    }
}

/// Binary arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    /// Addition (`+`).
    Add,
    /// Subtraction (`-`).
    Sub,
    /// Multiplication (`*`).
    Mul,
    /// Division (`/`).
    Div,
    /// Exponentiation (`^`), right-associative.
    Pow,
}

impl BinOp {
    /// Returns the operator's surface syntax.
    pub fn symbol(self) -> char {
        match self {
            BinOp::Add => '+',
            BinOp::Sub => '-',
            BinOp::Mul => '*',
            BinOp::Div => '/',
            BinOp::Pow => '^',
        }
    }
}

/// Named mathematical constants recognized by the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedConstant {
    /// The circle constant.
    Pi,
    /// Euler's number.
    E,
}

impl NamedConstant {
    /// Returns the constant's identifier as it appears in source text.
    pub fn name(self) -> &'static str {
        match self {
            NamedConstant::Pi => "pi",
            NamedConstant::E => "e",
        }
    }

    /// Returns the constant's numeric value.
    pub fn value(self) -> f64 {
        match self {
            NamedConstant::Pi => std::f64::consts::PI,
            NamedConstant::E => std::f64::consts::E,
        }
    }

    /// Looks up a constant by source identifier.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pi" => Some(NamedConstant::Pi),
            "e" => Some(NamedConstant::E),
            _ => None,
        }
    }
}

/// Built-in functions callable from expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sqrt,
    Log,
    Ln,
    Exp,
    Abs,
    Min,
    Max,
}

impl Function {
    /// Looks up a function by source identifier.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "sin" => Function::Sin,
            "cos" => Function::Cos,
            "tan" => Function::Tan,
            "asin" => Function::Asin,
            "acos" => Function::Acos,
            "atan" => Function::Atan,
            "sqrt" => Function::Sqrt,
            "log" => Function::Log,
            "ln" => Function::Ln,
            "exp" => Function::Exp,
            "abs" => Function::Abs,
            "min" => Function::Min,
            "max" => Function::Max,
            _ => return None,
        })
    }

    /// Returns the function's identifier as it appears in source text.
    pub fn name(self) -> &'static str {
        match self {
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
            Function::Asin => "asin",
            Function::Acos => "acos",
            Function::Atan => "atan",
            Function::Sqrt => "sqrt",
            Function::Log => "log",
            Function::Ln => "ln",
            Function::Exp => "exp",
            Function::Abs => "abs",
            Function::Min => "min",
            Function::Max => "max",
        }
    }

    /// Returns the required argument count.
    pub fn arity(self) -> usize {
        match self {
            Function::Min | Function::Max => 2,
            _ => 1,
        }
    }
}

/// Returns whether `name` is reserved grammar vocabulary.
///
/// Reserved names are never treated as substitutable variables.
pub fn is_reserved_word(name: &str) -> bool {
    Function::from_name(name).is_some() || NamedConstant::from_name(name).is_some()
}

/// Expression node variants.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// Numeric literal.
    Number(f64),
    /// Named constant (`pi`, `e`).
    Constant(NamedConstant),
    /// Free variable reference.
    Ident(String),
    /// Unary negation.
    UnaryNeg(Box<Expr>),
    /// Binary operation.
    Binary {
        /// Operator kind.
        op: BinOp,
        /// Left operand.
        left: Box<Expr>,
        /// Right operand.
        right: Box<Expr>,
    },
    /// Function call.
    Call {
        /// Function name as written; resolved against [`Function`] after parse.
        name: String,
        /// Call arguments.
        args: Vec<Expr>,
    },
}

/// Spanned expression node.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    /// Expression payload.
    pub kind: ExprKind,
    /// Source location for diagnostics.
    pub span: SourceSpan,
}

impl Expr {
    /// Appends free variable names in first-appearance order.
    ///
    /// Constants and function names are not variables.
    pub fn collect_free_variables(&self, out: &mut Vec<String>) {
        match &self.kind {
            ExprKind::Number(_) | ExprKind::Constant(_) => {}
            ExprKind::Ident(name) => {
                if !out.iter().any(|existing| existing == name) {
                    out.push(name.clone());
                }
            }
            ExprKind::UnaryNeg(inner) => inner.collect_free_variables(out),
            ExprKind::Binary { left, right, .. } => {
                left.collect_free_variables(out);
                right.collect_free_variables(out);
            }
            ExprKind::Call { args, .. } => {
                for arg in args {
                    arg.collect_free_variables(out);
                }
            }
        }
    }
}

impl fmt::Display for Expr {
    /// Renders a canonical, fully-parenthesized form.
    ///
    /// The rendering is span-insensitive; it backs duplicate-equation
    /// detection and pipeline logging.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Number(v) => write!(f, "{v}"),
            ExprKind::Constant(c) => write!(f, "{}", c.name()),
            ExprKind::Ident(name) => write!(f, "{name}"),
            ExprKind::UnaryNeg(inner) => write!(f, "(-{inner})"),
            ExprKind::Binary { op, left, right } => {
                write!(f, "({} {} {})", left, op.symbol(), right)
            }
            ExprKind::Call { name, args } => {
                write!(f, "{name}(")?;
                for (idx, arg) in args.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// One `lhs = rhs` equation.
#[derive(Debug, Clone, PartialEq)]
pub struct Equation {
    /// Left-hand side.
    pub lhs: Expr,
    /// Right-hand side.
    pub rhs: Expr,
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.lhs, self.rhs)
    }
}

/// One comma-separated top-level statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// A bare expression to evaluate.
    Expr(Expr),
    /// An equation to solve.
    Equation(Equation),
}

/// Full parsed input: one or more top-level statements.
#[derive(Debug, Clone, PartialEq)]
pub struct Ast {
    /// Statements in source order.
    pub statements: Vec<Statement>,
}

impl Ast {
    /// Returns free variable names across all statements, ordered by first
    /// appearance in the source.
    pub fn free_variables(&self) -> Vec<String> {
        let mut vars = Vec::new();
        for statement in &self.statements {
            match statement {
                Statement::Expr(expr) => expr.collect_free_variables(&mut vars),
                Statement::Equation(eq) => {
                    eq.lhs.collect_free_variables(&mut vars);
                    eq.rhs.collect_free_variables(&mut vars);
                }
            }
        }
        vars
    }
}
