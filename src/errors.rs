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

//! Failure vocabulary shared by the solving pipeline and the formula registry.
//!
//! Every failure carries a stable [`ErrorKind`] identifier plus a
//! human-readable message; callers serialize the kind verbatim, so variants
//! are append-only.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable failure classification exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    /// Input was empty after trimming.
    EmptyExpression,
    /// Input contains a character outside the allowed set.
    InvalidCharacter,
    /// Parenthesis depth went negative or did not return to zero.
    UnbalancedParentheses,
    /// Adjacent binary operators, or an operator in a position where no
    /// operand can follow.
    MalformedOperatorSequence,
    /// An empty `()` group.
    EmptyGroup,
    /// A label with an empty or malformed name, or a non-finite value.
    InvalidLabel,
    /// Two labels share the same name.
    ConflictingLabel,
    /// Evaluation was requested but free variables remain.
    UnresolvedVariable,
    /// Shape name is not in the catalog.
    UnknownShape,
    /// The shape does not support the requested calculation.
    UnsupportedCalculation,
    /// A required shape parameter is absent.
    MissingParameter,
    /// A shape parameter is present but out of range.
    InvalidParameter,
    /// The symbolic backend reported a parse or solve failure.
    SolveBackendError,
    /// The symbolic backend exhausted its time or operation budget.
    BackendUnavailable,
}

impl ErrorKind {
    /// Returns the stable wire identifier for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::EmptyExpression => "emptyExpression",
            ErrorKind::InvalidCharacter => "invalidCharacter",
            ErrorKind::UnbalancedParentheses => "unbalancedParentheses",
            ErrorKind::MalformedOperatorSequence => "malformedOperatorSequence",
            ErrorKind::EmptyGroup => "emptyGroup",
            ErrorKind::InvalidLabel => "invalidLabel",
            ErrorKind::ConflictingLabel => "conflictingLabel",
            ErrorKind::UnresolvedVariable => "unresolvedVariable",
            ErrorKind::UnknownShape => "unknownShape",
            ErrorKind::UnsupportedCalculation => "unsupportedCalculation",
            ErrorKind::MissingParameter => "missingParameter",
            ErrorKind::InvalidParameter => "invalidParameter",
            ErrorKind::SolveBackendError => "solveBackendError",
            ErrorKind::BackendUnavailable => "backendUnavailable",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified failure with a human-readable message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Failure {
    /// Stable failure classification.
    pub kind: ErrorKind,
    /// Human-readable detail for the caller.
    pub message: String,
}

impl Failure {
    /// Creates a failure from a kind and message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for Failure {}
