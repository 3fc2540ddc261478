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

//! OCR text normalization.
//!
//! Raw OCR output arrives with the usual misreads: Unicode math operators,
//! bracket variants, and letters confused with digits. Normalization applies
//! an ordered correction table in a single left-to-right scan over the
//! original text (replacement output is never re-scanned, so corrections
//! cannot cascade) and collapses redundant whitespace.

/// Condition under which a correction entry applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorrectionGuard {
    /// Applies wherever the pattern occurs.
    Always,
    /// Applies only when the match touches an ASCII digit on either side.
    ///
    /// Letter/digit confusions (`l` vs `1`, `O` vs `0`) are only plausible
    /// misreads inside a digit run; guarding them keeps identifiers,
    /// function names, and user labels intact.
    DigitAdjacent,
}

/// One ordered correction entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Correction {
    /// Text to match in the raw input.
    pub from: String,
    /// Replacement emitted into the normalized output.
    pub to: String,
    /// Match condition.
    pub guard: CorrectionGuard,
}

impl Correction {
    /// Creates an unconditional correction.
    pub fn always(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            guard: CorrectionGuard::Always,
        }
    }

    /// Creates a digit-adjacent correction.
    pub fn digit_adjacent(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            guard: CorrectionGuard::DigitAdjacent,
        }
    }
}

/// Ordered, operator-extensible table of OCR corrections.
///
/// Entry order matters: at each input position the first matching entry
/// wins. The table is immutable while the pipeline runs; operators extend it
/// at configuration time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectionTable {
    entries: Vec<Correction>,
}

impl CorrectionTable {
    /// Creates an empty table.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Returns the built-in correction table.
    pub fn standard() -> Self {
        Self {
            entries: vec![
                // Unicode operators to ASCII.
                Correction::always("×", "*"),
                Correction::always("÷", "/"),
                Correction::always("−", "-"),
                Correction::always("–", "-"),
                Correction::always("²", "^2"),
                Correction::always("³", "^3"),
                Correction::always("√", "sqrt"),
                Correction::always("π", "pi"),
                // Bracket variants.
                Correction::always("[", "("),
                Correction::always("{", "("),
                Correction::always("]", ")"),
                Correction::always("}", ")"),
                // Letter/digit misreads, guarded so identifiers survive.
                Correction::digit_adjacent("l", "1"),
                Correction::digit_adjacent("I", "1"),
                Correction::digit_adjacent("O", "0"),
                Correction::digit_adjacent("o", "0"),
            ],
        }
    }

    /// Appends an entry; later entries lose ties against earlier ones.
    pub fn push(&mut self, correction: Correction) {
        self.entries.push(correction);
    }

    /// Returns the entries in application order.
    pub fn entries(&self) -> &[Correction] {
        &self.entries
    }

    /// Normalizes raw OCR text.
    ///
    /// Pure and total: an empty input yields an empty output, never an error.
    pub fn normalize(&self, raw: &str) -> String {
        let chars: Vec<char> = raw.chars().collect();
        let mut out = String::with_capacity(raw.len());
        let mut idx = 0;

        while idx < chars.len() {
            match self.match_at(&chars, idx) {
                Some(entry) => {
                    out.push_str(&entry.to);
                    idx += entry.from.chars().count();
                }
                None => {
                    out.push(chars[idx]);
                    idx += 1;
                }
            }
        }

        // Collapse redundant whitespace and trim the ends.
        out.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Returns the first entry matching at `idx`, honoring guards.
    fn match_at(&self, chars: &[char], idx: usize) -> Option<&Correction> {
        self.entries.iter().find(|entry| {
            let pattern: Vec<char> = entry.from.chars().collect();
            if pattern.is_empty() || idx + pattern.len() > chars.len() {
                return false;
            }
            if chars[idx..idx + pattern.len()] != pattern[..] {
                return false;
            }
            match entry.guard {
                CorrectionGuard::Always => true,
                CorrectionGuard::DigitAdjacent => {
                    let before = idx.checked_sub(1).map(|i| chars[i]);
                    let after = chars.get(idx + pattern.len()).copied();
                    before.is_some_and(|c| c.is_ascii_digit())
                        || after.is_some_and(|c| c.is_ascii_digit())
                }
            }
        })
    }
}

impl Default for CorrectionTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(raw: &str) -> String {
        CorrectionTable::standard().normalize(raw)
    }

    #[test]
    fn maps_unicode_operators() {
        assert_eq!(normalize("3 × 4 ÷ 2 − 1"), "3 * 4 / 2 - 1");
    }

    #[test]
    fn expands_superscripts_and_radicals() {
        assert_eq!(normalize("r² + √9"), "r^2 + sqrt9");
    }

    #[test]
    fn normalizes_bracket_variants() {
        assert_eq!(normalize("[2+3] * {4}"), "(2+3) * (4)");
    }

    #[test]
    fn fixes_letter_digit_misreads_next_to_digits() {
        assert_eq!(normalize("1l + 2O"), "11 + 20");
    }

    #[test]
    fn leaves_identifiers_and_function_names_alone() {
        assert_eq!(normalize("sin(x) + log(y) + l*w"), "sin(x) + log(y) + l*w");
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(normalize("  2 +\t 3\n\n* 4 "), "2 + 3 * 4");
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn replacements_are_not_rescanned() {
        // `π` expands to `pi`; the emitted `i` must not be rewritten even if
        // an operator adds an `i -> 1` entry after it.
        let mut table = CorrectionTable::standard();
        table.push(Correction::always("i", "1"));
        assert_eq!(table.normalize("π"), "pi");
    }

    #[test]
    fn entry_order_decides_ties() {
        let mut table = CorrectionTable::empty();
        table.push(Correction::always("ab", "X"));
        table.push(Correction::always("a", "Y"));
        assert_eq!(table.normalize("ab a"), "X Y");
    }

    #[test]
    fn is_deterministic() {
        let raw = "2 × l3 − √4";
        assert_eq!(normalize(raw), normalize(raw));
    }
}
