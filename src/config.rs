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

//! Pipeline configuration.
//!
//! The correction table and lead-in phrase set are process-wide immutable
//! configuration: built once at startup and passed explicitly into the
//! pipeline rather than referenced as ambient state. Operators extend the
//! tables here without touching pipeline control flow.

use crate::normalize::CorrectionTable;
use crate::question::standard_lead_ins;

/// Immutable configuration for one [`crate::Solver`].
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Ordered OCR correction table (see [`CorrectionTable`]).
    pub corrections: CorrectionTable,
    /// Lead-in phrases stripped from the start of questions.
    pub lead_ins: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            corrections: CorrectionTable::standard(),
            lead_ins: standard_lead_ins(),
        }
    }
}

impl PipelineConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }
}
