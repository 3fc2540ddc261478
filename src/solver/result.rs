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

//! Solve results and their caller-facing response shape.

use crate::errors::{ErrorKind, Failure};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single evaluated value.
#[derive(Debug, Clone, PartialEq)]
pub enum SolvedValue {
    /// A finite numeric result.
    Number(f64),
    /// The input reduced to a recognized named constant.
    Constant(&'static str),
}

/// Outcome of one solve call. Immutable; the only value returned to callers.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveResult {
    /// Arithmetic evaluation result.
    Value(SolvedValue),
    /// Solved unknowns, keyed by variable, in first-appearance order.
    Assignments(IndexMap<String, f64>),
    /// Classified failure with a human-readable message.
    Failure(Failure),
}

impl SolveResult {
    /// Creates a failure result.
    pub fn failure(kind: ErrorKind, message: impl Into<String>) -> Self {
        SolveResult::Failure(Failure::new(kind, message))
    }

    /// Returns whether the result is a success.
    pub fn is_ok(&self) -> bool {
        !matches!(self, SolveResult::Failure(_))
    }

    /// Returns the failure payload, when present.
    pub fn as_failure(&self) -> Option<&Failure> {
        match self {
            SolveResult::Failure(failure) => Some(failure),
            _ => None,
        }
    }

    /// Converts into the serializable response shape for the HTTP layer.
    pub fn into_response(self) -> SolveResponse {
        match self {
            SolveResult::Value(SolvedValue::Number(value)) => SolveResponse {
                status: ResponseStatus::Ok,
                result: Some(ResponseValue::Number(value)),
                error_kind: None,
                message: None,
            },
            SolveResult::Value(SolvedValue::Constant(name)) => SolveResponse {
                status: ResponseStatus::Ok,
                result: Some(ResponseValue::Constant(name.to_string())),
                error_kind: None,
                message: None,
            },
            SolveResult::Assignments(assignments) => SolveResponse {
                status: ResponseStatus::Ok,
                result: Some(ResponseValue::Assignments(assignments)),
                error_kind: None,
                message: None,
            },
            SolveResult::Failure(failure) => SolveResponse {
                status: ResponseStatus::Error,
                result: None,
                error_kind: Some(failure.kind),
                message: Some(failure.message),
            },
        }
    }
}

/// Wire-level status flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Ok,
    Error,
}

/// Wire-level result payload: a number, a constant name, or an assignment
/// map that preserves solve order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseValue {
    Number(f64),
    Constant(String),
    Assignments(IndexMap<String, f64>),
}

/// Serializable solve outcome consumed by the HTTP layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveResponse {
    /// `"ok"` or `"error"`; never partially successful.
    pub status: ResponseStatus,
    /// Present on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ResponseValue>,
    /// Present on failure; stable identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
    /// Present on failure; human-readable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_response_serializes_flat_number() {
        let response = SolveResult::Value(SolvedValue::Number(14.0)).into_response();
        let json = serde_json::to_value(&response).expect("serialize");
        assert_eq!(json["status"], "ok");
        assert_eq!(json["result"], 14.0);
        assert!(json.get("errorKind").is_none());
    }

    #[test]
    fn assignments_preserve_order_in_json() {
        let mut assignments = IndexMap::new();
        assignments.insert("y".to_string(), 2.0);
        assignments.insert("x".to_string(), 1.0);
        let response = SolveResult::Assignments(assignments).into_response();
        let json = serde_json::to_string(&response).expect("serialize");
        let y_pos = json.find("\"y\"").expect("y present");
        let x_pos = json.find("\"x\"").expect("x present");
        assert!(y_pos < x_pos, "solve order must survive serialization: {json}");
    }

    #[test]
    fn failure_response_carries_kind_and_message() {
        let response =
            SolveResult::failure(ErrorKind::EmptyGroup, "empty parenthesis group").into_response();
        let json = serde_json::to_value(&response).expect("serialize");
        assert_eq!(json["status"], "error");
        assert_eq!(json["errorKind"], "emptyGroup");
        assert_eq!(json["message"], "empty parenthesis group");
        assert!(json.get("result").is_none());
    }
}
