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

//! Question preprocessing: strips natural-language wrapping from a user
//! question to expose the embedded expression.
//!
//! Only recognized lead-in phrases at the very start are removed; the same
//! words mid-string are part of the expression's context and stay put. This
//! component never judges validity: an all-wrapper question yields an empty
//! candidate for the validator to reject.

/// Returns the built-in lead-in phrase set.
pub fn standard_lead_ins() -> Vec<String> {
    ["what is", "calculate", "solve", "find", "compute", "evaluate"]
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Extracts the expression candidate from a natural-language question.
///
/// Lead-ins are matched case-insensitively at the start, repeatedly, and
/// only at word boundaries; trailing `?`, `.`, `!` punctuation is dropped,
/// as is an `=` left dangling at the end (`2+3=?`).
pub fn extract_expression(question: &str, lead_ins: &[String]) -> String {
    let mut rest = question.trim();

    // Strip stacked lead-ins ("solve what is ...").
    loop {
        let before = rest;
        for lead in lead_ins {
            if let Some(stripped) = strip_lead_in(rest, lead) {
                rest = stripped.trim_start();
            }
        }
        if rest == before {
            break;
        }
    }

    let mut rest = rest.trim_end_matches(|c: char| c == '?' || c == '.' || c == '!' || c.is_whitespace());

    // A dangling `=` is question syntax ("2+3=?"), not part of the math.
    rest = rest.trim_end();
    if let Some(stripped) = rest.strip_suffix('=') {
        rest = stripped.trim_end();
    }

    rest.to_string()
}

/// Strips one lead-in phrase from the start, requiring a word boundary.
fn strip_lead_in<'a>(text: &'a str, lead: &str) -> Option<&'a str> {
    if text.len() < lead.len() || !text.is_char_boundary(lead.len()) {
        return None;
    }
    let (head, tail) = text.split_at(lead.len());
    if !head.eq_ignore_ascii_case(lead) {
        return None;
    }
    // "solvex" must not lose its prefix; require a non-identifier follower.
    match tail.chars().next() {
        Some(c) if c.is_ascii_alphanumeric() || c == '_' => None,
        _ => Some(tail),
    }
}
