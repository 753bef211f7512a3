// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Configuration errors raised while building a benefit matrix or
//! labelling an assignment.
//!
//! All variants describe malformed input. They are reported before any
//! search starts; the solver itself never sees an invalid matrix.

use crate::index::{ChoiceIndex, LevelIndex};

/// The error type for benefit matrix construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    /// A row does not have as many entries as there are rows.
    NotSquare {
        /// The offending row (level).
        row: usize,
        /// The expected row length, equal to the number of rows.
        expected: usize,
        /// The actual row length.
        found: usize,
    },
    /// A flat buffer does not hold exactly `n * n` entries.
    FlatLengthMismatch { expected: usize, found: usize },
    /// A benefit is negative.
    NegativeBenefit {
        level: LevelIndex,
        choice: ChoiceIndex,
    },
    /// The sum of the per-choice maxima does not fit the benefit type, so
    /// some assignment may be worth more than the type can hold.
    BenefitOverflow {
        /// The first choice whose maximum no longer fits the running sum.
        choice: ChoiceIndex,
    },
}

impl std::fmt::Display for MatrixError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotSquare {
                row,
                expected,
                found,
            } => write!(
                f,
                "Benefit matrix is not square: row {} has {} entries but {} were expected",
                row, found, expected
            ),
            Self::FlatLengthMismatch { expected, found } => write!(
                f,
                "Benefit buffer has {} entries but a square matrix needs {}",
                found, expected
            ),
            Self::NegativeBenefit { level, choice } => write!(
                f,
                "Negative benefit at level {} for choice {}",
                level.get(),
                choice.get()
            ),
            Self::BenefitOverflow { choice } => write!(
                f,
                "Benefit sum overflows the benefit type at choice {}",
                choice.get()
            ),
        }
    }
}

impl std::error::Error for MatrixError {}

/// The error type for attaching display names to an assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelError {
    /// The number of choice names differs from the assignment size.
    ChoiceCountMismatch { expected: usize, found: usize },
    /// The number of level names differs from the assignment size.
    LevelCountMismatch { expected: usize, found: usize },
}

impl std::fmt::Display for LabelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ChoiceCountMismatch { expected, found } => write!(
                f,
                "Expected {} choice labels but {} were given",
                expected, found
            ),
            Self::LevelCountMismatch { expected, found } => write!(
                f,
                "Expected {} level labels but {} were given",
                expected, found
            ),
        }
    }
}

impl std::error::Error for LabelError {}
