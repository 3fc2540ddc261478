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

//! Structural expression validation.
//!
//! Five ordered checks run before any text reaches the backend parser; the
//! first failure wins. Validation looks at structure only and never at
//! label-bound values, so it is deterministic and idempotent.

use crate::errors::{ErrorKind, Failure};

/// Binary operators recognized by the adjacency rules. `=` counts.
fn is_operator(c: char) -> bool {
    matches!(c, '+' | '-' | '*' | '/' | '^' | '=')
}

/// Character whitelist for normalized expressions.
fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || c.is_whitespace()
        || matches!(c, '+' | '-' | '*' | '/' | '^' | '(' | ')' | '.' | '=' | ',' | '_')
}

/// Validates a normalized expression's structure.
pub fn validate(expr: &str) -> Result<(), Failure> {
    // 1. Non-empty after trimming.
    if expr.trim().is_empty() {
        return Err(Failure::new(
            ErrorKind::EmptyExpression,
            "expression is empty",
        ));
    }

    // 2. Character whitelist.
    if let Some(c) = expr.chars().find(|c| !is_allowed(*c)) {
        return Err(Failure::new(
            ErrorKind::InvalidCharacter,
            format!("expression contains unsupported character '{c}'"),
        ));
    }

    // 3. Parenthesis balance via a running depth counter.
    let mut depth: i64 = 0;
    for c in expr.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return Err(Failure::new(
                        ErrorKind::UnbalancedParentheses,
                        "closing parenthesis without a matching opening one",
                    ));
                }
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(Failure::new(
            ErrorKind::UnbalancedParentheses,
            "unclosed opening parenthesis",
        ));
    }

    // 4. Operator adjacency. Unary minus is permitted at expression start,
    //    after `(`, after `,`, or after another operator; nothing else is.
    let mut prev: Option<char> = None;
    for c in expr.chars().filter(|c| !c.is_whitespace()) {
        if is_operator(c) {
            let unary_position = match prev {
                None => true,
                Some(p) => p == '(' || p == ',' || is_operator(p),
            };
            if unary_position && c != '-' {
                return Err(Failure::new(
                    ErrorKind::MalformedOperatorSequence,
                    format!("operator '{c}' has no left operand"),
                ));
            }
        }
        if (c == ')' || c == ',') && prev.is_some_and(is_operator) {
            return Err(Failure::new(
                ErrorKind::MalformedOperatorSequence,
                format!(
                    "operator '{}' has no right operand",
                    prev.unwrap_or_default()
                ),
            ));
        }
        prev = Some(c);
    }
    if prev.is_some_and(is_operator) {
        return Err(Failure::new(
            ErrorKind::MalformedOperatorSequence,
            "expression ends with an operator",
        ));
    }

    // 5. Empty parenthesis groups.
    let mut prev: Option<char> = None;
    for c in expr.chars().filter(|c| !c.is_whitespace()) {
        if c == ')' && prev == Some('(') {
            return Err(Failure::new(
                ErrorKind::EmptyGroup,
                "empty parenthesis group",
            ));
        }
        prev = Some(c);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_of(expr: &str) -> ErrorKind {
        validate(expr).expect_err("validation should fail").kind
    }

    #[test]
    fn accepts_plain_arithmetic() {
        validate("2 + 3*4 - (1/2)^2").expect("should be valid");
    }

    #[test]
    fn accepts_equations_and_calls() {
        validate("x + 2 = 5").expect("should be valid");
        validate("max(2, -3) + sin(30)").expect("should be valid");
    }

    #[test]
    fn rejects_empty_input() {
        assert_eq!(kind_of(""), ErrorKind::EmptyExpression);
        assert_eq!(kind_of("   "), ErrorKind::EmptyExpression);
    }

    #[test]
    fn rejects_unlisted_characters() {
        assert_eq!(kind_of("2 + 3 # 4"), ErrorKind::InvalidCharacter);
        assert_eq!(kind_of("2 × 3"), ErrorKind::InvalidCharacter);
    }

    #[test]
    fn rejects_unbalanced_parentheses() {
        assert_eq!(kind_of("(2+3"), ErrorKind::UnbalancedParentheses);
        assert_eq!(kind_of("2+3)"), ErrorKind::UnbalancedParentheses);
        // Depth dips below zero even though counts match.
        assert_eq!(kind_of(")2+3("), ErrorKind::UnbalancedParentheses);
    }

    #[test]
    fn rejects_adjacent_operators() {
        assert_eq!(kind_of("2++3"), ErrorKind::MalformedOperatorSequence);
        assert_eq!(kind_of("2**3"), ErrorKind::MalformedOperatorSequence);
        assert_eq!(kind_of("x==3"), ErrorKind::MalformedOperatorSequence);
    }

    #[test]
    fn rejects_operator_before_closer_or_at_end() {
        assert_eq!(kind_of("(2+)"), ErrorKind::MalformedOperatorSequence);
        assert_eq!(kind_of("2+3="), ErrorKind::MalformedOperatorSequence);
        assert_eq!(kind_of("min(2-, 3)"), ErrorKind::MalformedOperatorSequence);
    }

    #[test]
    fn rejects_leading_binary_operator() {
        assert_eq!(kind_of("*2"), ErrorKind::MalformedOperatorSequence);
        assert_eq!(kind_of("=3"), ErrorKind::MalformedOperatorSequence);
    }

    #[test]
    fn permits_unary_minus_positions() {
        validate("-2 + 3").expect("leading minus is unary");
        validate("2 * (-3)").expect("minus after '(' is unary");
        validate("2 + -3").expect("minus after operator is unary");
        validate("max(2, -3)").expect("minus after ',' is unary");
    }

    #[test]
    fn rejects_empty_groups() {
        assert_eq!(kind_of("()"), ErrorKind::EmptyGroup);
        assert_eq!(kind_of("2 + ( )"), ErrorKind::EmptyGroup);
    }

    #[test]
    fn is_idempotent() {
        let expr = "2 + 3*4";
        validate(expr).expect("valid");
        validate(expr).expect("still valid");
    }
}
