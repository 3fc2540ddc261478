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

//! Label substitution: resolves user-declared names (points, sides, angles)
//! to numeric values inside an expression.

use crate::ast::is_reserved_word;
use crate::errors::{ErrorKind, Failure};
use serde::{Deserialize, Serialize};

/// A user-declared name/value pair to substitute into the expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    /// Identifier-shaped label name.
    pub name: String,
    /// Finite numeric value.
    pub value: f64,
}

impl Label {
    /// Creates a label.
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Result of one substitution pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Substitution {
    /// Expression text with matched labels replaced by `(value)` groups.
    pub text: String,
    /// Names of labels that matched at least one token, in label order.
    pub used: Vec<String>,
}

/// Validates label shape before substitution runs.
///
/// Duplicate names are ambiguous even when the values agree and are
/// rejected; malformed names and non-finite values never reach the
/// expression text.
pub fn check_labels(labels: &[Label]) -> Result<(), Failure> {
    for (idx, label) in labels.iter().enumerate() {
        if !is_identifier(&label.name) {
            return Err(Failure::new(
                ErrorKind::InvalidLabel,
                format!("label name '{}' is not a valid identifier", label.name),
            ));
        }
        if !label.value.is_finite() {
            return Err(Failure::new(
                ErrorKind::InvalidLabel,
                format!("label '{}' has a non-finite value", label.name),
            ));
        }
        if labels[..idx].iter().any(|prev| prev.name == label.name) {
            return Err(Failure::new(
                ErrorKind::ConflictingLabel,
                format!("label '{}' is declared more than once", label.name),
            ));
        }
    }
    Ok(())
}

/// Substitutes label values into `expr` at token boundaries.
///
/// A label named `a` replaces `a` as a standalone token only, never inside
/// `max` or `area`, and never when glued to a digit (`2a`). Values are
/// parenthesized so a negative replacement cannot merge with an adjacent
/// operator. Tokens without a label stay free for the solver; labels without
/// a token are recorded as unused, which is not an error.
pub fn substitute(expr: &str, labels: &[Label]) -> Substitution {
    let chars: Vec<char> = expr.chars().collect();
    let mut out = String::with_capacity(expr.len());
    let mut used: Vec<&str> = Vec::new();
    let mut idx = 0;

    while idx < chars.len() {
        let c = chars[idx];
        if !is_token_start(c) || (idx > 0 && is_token_char(chars[idx - 1])) {
            out.push(c);
            idx += 1;
            continue;
        }

        // Maximal identifier token; adjacency to the previous character was
        // ruled out above, and taking the full run rules out the next.
        let mut end = idx + 1;
        while end < chars.len() && is_token_char(chars[end]) {
            end += 1;
        }
        let token: String = chars[idx..end].iter().collect();

        let matched = (!is_reserved_word(&token))
            .then(|| labels.iter().find(|label| label.name == token))
            .flatten();
        match matched {
            Some(label) => {
                out.push_str(&format!("({})", label.value));
                if !used.contains(&label.name.as_str()) {
                    used.push(&label.name);
                }
            }
            None => out.push_str(&token),
        }
        idx = end;
    }

    // Report used labels in declaration order.
    let used = labels
        .iter()
        .filter(|label| used.contains(&label.name.as_str()))
        .map(|label| label.name.clone())
        .collect();

    Substitution { text: out, used }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn is_token_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(pairs: &[(&str, f64)]) -> Vec<Label> {
        pairs.iter().map(|(n, v)| Label::new(*n, *v)).collect()
    }

    #[test]
    fn replaces_standalone_tokens_only() {
        let result = substitute("a + max(a, area)", &labels(&[("a", 2.0)]));
        assert_eq!(result.text, "(2) + max((2), area)");
        assert_eq!(result.used, vec!["a"]);
    }

    #[test]
    fn digit_prefix_blocks_a_match() {
        let result = substitute("2a + a", &labels(&[("a", 3.0)]));
        assert_eq!(result.text, "2a + (3)");
    }

    #[test]
    fn parenthesizes_negative_values() {
        let result = substitute("5 - b", &labels(&[("b", -2.0)]));
        assert_eq!(result.text, "5 - (-2)");
    }

    #[test]
    fn multi_character_labels_match_whole_tokens() {
        let result = substitute("side + s", &labels(&[("side", 4.0), ("s", 1.5)]));
        assert_eq!(result.text, "(4) + (1.5)");
        assert_eq!(result.used, vec!["side", "s"]);
    }

    #[test]
    fn unused_labels_are_not_an_error() {
        let result = substitute("x + 1", &labels(&[("y", 9.0)]));
        assert_eq!(result.text, "x + 1");
        assert!(result.used.is_empty());
    }

    #[test]
    fn reserved_words_are_never_substituted() {
        let result = substitute("sqrt(s)", &labels(&[("sqrt", 2.0), ("s", 9.0)]));
        assert_eq!(result.text, "sqrt((9))");
        assert_eq!(result.used, vec!["s"]);
    }

    #[test]
    fn duplicate_names_conflict_even_with_equal_values() {
        let err = check_labels(&labels(&[("a", 1.0), ("a", 1.0)])).expect_err("must conflict");
        assert_eq!(err.kind, ErrorKind::ConflictingLabel);
    }

    #[test]
    fn malformed_name_is_invalid() {
        let err = check_labels(&labels(&[("2a", 1.0)])).expect_err("must be invalid");
        assert_eq!(err.kind, ErrorKind::InvalidLabel);
    }

    #[test]
    fn non_finite_value_is_invalid() {
        let err =
            check_labels(&labels(&[("a", f64::INFINITY)])).expect_err("must be invalid");
        assert_eq!(err.kind, ErrorKind::InvalidLabel);
    }
}
