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

//! # Pairing Model
//!
//! **The domain model for the pairing assignment solver.**
//!
//! An instance pairs `N` choices with `N` levels, one choice per level. Each
//! pairing earns a non-negative benefit and the goal is a one-to-one
//! assignment of maximum total benefit. This crate holds the data exchanged
//! between the caller and the search engine (`pairing_bnb`).
//!
//! ## Architecture
//!
//! * **`index`**: `LevelIndex` and `ChoiceIndex`, so the two axes of the matrix cannot be mixed up.
//! * **`matrix`**: the immutable `BenefitMatrix` with its suffix maxima, and `BenefitMatrixBuilder`.
//! * **`assignment`**: the `Assignment` result, with verification helpers and labelled display.
//! * **`loading`**: `MatrixLoader`, a plain text reader for benefit matrices.
//! * **`error`**: configuration errors reported before any search runs.
//!
//! ## Design Philosophy
//!
//! 1.  **Fail-Fast**: non-square or negative input is rejected at construction time, never during search.
//! 2.  **Flat Storage**: benefits live in one row-major vector, `level * N + choice`.
//! 3.  **Read-Only Sharing**: a built matrix is never mutated, so concurrent searches borrow it freely.

pub mod assignment;
pub mod error;
pub mod index;
pub mod loading;
pub mod matrix;
