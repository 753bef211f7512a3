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

//! The benefit matrix of an assignment instance.
//!
//! `BenefitMatrix<T>` is the immutable optimisation input: `N` levels, `N`
//! choices and a non-negative benefit for every `(level, choice)` pair. It is
//! built once, validated eagerly, and only read afterwards, so a single
//! instance can be shared by reference across any number of searches.
//!
//! Next to the raw benefits the matrix keeps a table of suffix maxima,
//! `max_benefit_from(level, choice)`, the best benefit a choice can still
//! earn on any level `>= level`. Bound estimators read it in O(1) instead of
//! rescanning the remaining levels on every bind.

use crate::{
    error::MatrixError,
    index::{ChoiceIndex, LevelIndex},
};
use pairing_core::num::BenefitNumeric;

#[inline(always)]
fn flatten_index(n: usize, level: usize, choice: usize) -> usize {
    level * n + choice
}

/// The size of the full assignment search tree, stored as `log10`.
///
/// A tree for `N` choices has `N! / (N - k)!` nodes on depth `k`, so the
/// total node count is `sum_{k=0..=N} N! / (N - k)!`. That overflows every
/// integer type for moderate `N`, hence the logarithmic representation.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, PartialOrd)]
pub struct Complexity {
    log_val: f64,
}

impl Complexity {
    /// Computes the search tree size for `n` levels and choices.
    pub fn new(n: usize) -> Self {
        let log10_add = |a: f64, b: f64| -> f64 {
            let max = a.max(b);
            let min = a.min(b);
            max + (1.0 + 10.0_f64.powf(min - max)).log10()
        };

        // Depth 0 holds the root only.
        let mut level_log = 0.0;
        let mut total_log = 0.0;
        for k in 1..=n {
            let remaining = (n - k + 1) as f64;
            level_log += remaining.log10();
            total_log = log10_add(total_log, level_log);
        }

        Self { log_val: total_log }
    }

    /// Returns the percentage of the tree covered by `nodes_explored` nodes,
    /// or `Some(0.0)` when the tree is too large for the ratio to matter.
    pub fn coverage(&self, nodes_explored: u64) -> Option<f64> {
        if self.log_val > 15.0 {
            return Some(0.0);
        }
        let total = 10.0_f64.powf(self.log_val);
        if total == 0.0 {
            return None;
        }
        Some((nodes_explored as f64 / total) * 100.0)
    }

    /// Returns the order of magnitude.
    #[inline]
    pub fn exponent(&self) -> u64 {
        self.log_val.floor() as u64
    }

    /// Returns the mantissa in `[1, 10)`.
    #[inline]
    pub fn mantissa(&self) -> f64 {
        10.0_f64.powf(self.log_val - self.log_val.floor())
    }

    /// Returns the raw `log10` value.
    #[inline]
    pub fn raw(&self) -> f64 {
        self.log_val
    }
}

impl std::fmt::Display for Complexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} × 10^{}", self.mantissa(), self.exponent())
    }
}

impl std::fmt::Debug for Complexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Complexity(log10={:.4})", self.log_val)
    }
}

/// An immutable, square, non-negative benefit matrix.
///
/// Layout:
/// - `benefits[level * n + choice]`: the benefit of binding `choice` to `level`.
/// - `remaining_max[level * n + choice]`: `max_{l >= level} benefit(l, choice)`,
///   with an extra all-zero row for `level == n`.
///
/// Construction goes through `BenefitMatrixBuilder`, `BenefitMatrix::from_rows`
/// or `BenefitMatrix::from_flat`, all of which reject negative entries and
/// matrices whose column maxima do not sum within `T`. Every assignment and
/// every bound is at most that sum, so benefit arithmetic on a built matrix
/// never overflows.
#[derive(Clone, PartialEq, Eq)]
pub struct BenefitMatrix<T> {
    n: usize,
    benefits: Vec<T>,      // len = n * n
    remaining_max: Vec<T>, // len = (n + 1) * n
}

impl<T> BenefitMatrix<T>
where
    T: BenefitNumeric,
{
    /// Builds a matrix from rows, where row `i` holds the benefits of level `i`.
    ///
    /// # Errors
    ///
    /// Returns `MatrixError::NotSquare` if any row length differs from the
    /// number of rows, `MatrixError::NegativeBenefit` for negative entries and
    /// `MatrixError::BenefitOverflow` if the column maxima overflow `T`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use pairing_model::matrix::BenefitMatrix;
    /// let m = BenefitMatrix::from_rows(vec![vec![1i64, 2], vec![3, 4]]).unwrap();
    /// assert_eq!(m.dimension(), 2);
    /// assert!(BenefitMatrix::from_rows(vec![vec![1i64, 2], vec![3]]).is_err());
    /// ```
    pub fn from_rows<R>(rows: R) -> Result<Self, MatrixError>
    where
        R: IntoIterator,
        R::Item: AsRef<[T]>,
    {
        let rows: Vec<R::Item> = rows.into_iter().collect();
        let n = rows.len();
        let mut flat = Vec::with_capacity(n * n);
        for (row_index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != n {
                return Err(MatrixError::NotSquare {
                    row: row_index,
                    expected: n,
                    found: row.len(),
                });
            }
            flat.extend_from_slice(row);
        }
        Self::from_flat(n, flat)
    }

    /// Builds a matrix from a row-major buffer of `n * n` entries.
    ///
    /// # Errors
    ///
    /// Returns `MatrixError::FlatLengthMismatch` if the buffer has the wrong
    /// length, `MatrixError::NegativeBenefit` for negative entries and
    /// `MatrixError::BenefitOverflow` if the column maxima overflow `T`.
    pub fn from_flat(n: usize, benefits: Vec<T>) -> Result<Self, MatrixError> {
        let expected = n.checked_mul(n).ok_or(MatrixError::FlatLengthMismatch {
            expected: usize::MAX,
            found: benefits.len(),
        })?;
        if benefits.len() != expected {
            return Err(MatrixError::FlatLengthMismatch {
                expected,
                found: benefits.len(),
            });
        }
        if let Some(pos) = benefits.iter().position(|b| b.is_negative()) {
            return Err(MatrixError::NegativeBenefit {
                level: LevelIndex::new(pos / n),
                choice: ChoiceIndex::new(pos % n),
            });
        }
        Self::from_validated(n, benefits)
    }

    /// Assembles the matrix and its suffix maxima from non-negative data.
    ///
    /// The sum of the column maxima bounds every assignment from above, so it
    /// is the one sum that has to fit `T`.
    fn from_validated(n: usize, benefits: Vec<T>) -> Result<Self, MatrixError> {
        debug_assert_eq!(benefits.len(), n * n);
        debug_assert!(benefits.iter().all(|b| !b.is_negative()));

        let mut remaining_max = vec![T::ZERO; (n + 1) * n];
        for level in (0..n).rev() {
            for choice in 0..n {
                let here = benefits[flatten_index(n, level, choice)];
                let below = remaining_max[flatten_index(n, level + 1, choice)];
                remaining_max[flatten_index(n, level, choice)] = here.max(below);
            }
        }

        let mut total = T::ZERO;
        for (choice, &column_max) in remaining_max[..n].iter().enumerate() {
            total = total
                .checked_add(&column_max)
                .ok_or(MatrixError::BenefitOverflow {
                    choice: ChoiceIndex::new(choice),
                })?;
        }

        Ok(Self {
            n,
            benefits,
            remaining_max,
        })
    }

    /// Returns `N`, the number of levels and of choices.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.n
    }

    /// Returns `true` for the degenerate `0 x 0` matrix.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Returns the benefit of binding `choice` to `level`.
    ///
    /// # Panics
    ///
    /// Panics if either index is not in `0..dimension()`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use pairing_model::matrix::BenefitMatrix;
    /// # use pairing_model::index::{ChoiceIndex, LevelIndex};
    /// let m = BenefitMatrix::from_rows(vec![vec![1i64, 2], vec![3, 4]]).unwrap();
    /// assert_eq!(m.benefit(LevelIndex::new(1), ChoiceIndex::new(0)), 3);
    /// ```
    #[inline]
    pub fn benefit(&self, level: LevelIndex, choice: ChoiceIndex) -> T {
        assert!(
            level.get() < self.n,
            "called `BenefitMatrix::benefit` with level index out of bounds: the len is {} but the index is {}",
            self.n,
            level.get()
        );
        assert!(
            choice.get() < self.n,
            "called `BenefitMatrix::benefit` with choice index out of bounds: the len is {} but the index is {}",
            self.n,
            choice.get()
        );
        self.benefits[flatten_index(self.n, level.get(), choice.get())]
    }

    /// Returns the benefit of binding `choice` to `level` without bounds checking.
    ///
    /// # Safety
    ///
    /// The caller must ensure both indices are in `0..dimension()`.
    #[inline]
    pub unsafe fn benefit_unchecked(&self, level: LevelIndex, choice: ChoiceIndex) -> T {
        debug_assert!(
            level.get() < self.n && choice.get() < self.n,
            "called `BenefitMatrix::benefit_unchecked` with index out of bounds: the len is {} but the indices are ({}, {})",
            self.n,
            level.get(),
            choice.get()
        );
        unsafe {
            *self
                .benefits
                .get_unchecked(flatten_index(self.n, level.get(), choice.get()))
        }
    }

    /// Returns the best benefit `choice` can earn on any level in `from..N`.
    /// For `from == N` this is zero.
    ///
    /// # Panics
    ///
    /// Panics if `from > dimension()` or `choice` is out of range.
    #[inline]
    pub fn max_benefit_from(&self, from: usize, choice: ChoiceIndex) -> T {
        assert!(
            from <= self.n,
            "called `BenefitMatrix::max_benefit_from` with level out of bounds: the max is {} but the level is {}",
            self.n,
            from
        );
        assert!(
            choice.get() < self.n,
            "called `BenefitMatrix::max_benefit_from` with choice index out of bounds: the len is {} but the index is {}",
            self.n,
            choice.get()
        );
        self.remaining_max[flatten_index(self.n, from, choice.get())]
    }

    /// Returns the benefits of one level, indexed by choice.
    ///
    /// # Panics
    ///
    /// Panics if `level` is out of range.
    #[inline]
    pub fn level_benefits(&self, level: LevelIndex) -> &[T] {
        let start = flatten_index(self.n, level.get(), 0);
        &self.benefits[start..start + self.n]
    }

    /// Returns all benefits in row-major order.
    #[inline]
    pub fn benefits(&self) -> &[T] {
        &self.benefits
    }

    /// Returns the benefit of the identity assignment (choice `i` on level `i`).
    #[inline]
    pub fn diagonal_sum(&self) -> T {
        (0..self.n).fold(T::ZERO, |acc, i| {
            acc.saturating_add_val(self.benefits[flatten_index(self.n, i, i)])
        })
    }

    /// Returns the size of the full search tree for this matrix.
    #[inline]
    pub fn complexity(&self) -> Complexity {
        Complexity::new(self.n)
    }
}

impl<T> std::fmt::Debug for BenefitMatrix<T>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BenefitMatrix")
            .field("n", &self.n)
            .field("benefits", &self.benefits)
            .finish()
    }
}

impl<T> std::fmt::Display for BenefitMatrix<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "BenefitMatrix({}x{})", self.n, self.n)?;
        for level in 0..self.n {
            write!(f, "   L{:<4}|", level)?;
            for choice in 0..self.n {
                write!(f, " {:>6}", self.benefits[flatten_index(self.n, level, choice)])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// A mutable builder for `BenefitMatrix`.
///
/// All entries start at zero. Setters reject negative entries eagerly; the
/// overflow check needs the whole matrix and runs in `build`.
#[derive(Clone, Debug)]
pub struct BenefitMatrixBuilder<T> {
    n: usize,
    benefits: Vec<T>,
}

impl<T> BenefitMatrixBuilder<T>
where
    T: BenefitNumeric,
{
    /// Creates a builder for an `n x n` matrix filled with zeros.
    pub fn new(n: usize) -> Self {
        Self {
            n,
            benefits: vec![T::ZERO; n * n],
        }
    }

    /// Returns the dimension of the matrix under construction.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.n
    }

    /// Sets one benefit.
    ///
    /// # Panics
    ///
    /// Panics if an index is out of range or `benefit` is negative.
    pub fn set_benefit(&mut self, level: LevelIndex, choice: ChoiceIndex, benefit: T) -> &mut Self {
        if let Err(e) = self.try_set_benefit(level, choice, benefit) {
            panic!("called `BenefitMatrixBuilder::set_benefit` with invalid input: {}", e);
        }
        self
    }

    /// Sets one benefit, rejecting negative values.
    ///
    /// # Panics
    ///
    /// Panics if an index is out of range.
    pub fn try_set_benefit(
        &mut self,
        level: LevelIndex,
        choice: ChoiceIndex,
        benefit: T,
    ) -> Result<&mut Self, MatrixError> {
        assert!(
            level.get() < self.n && choice.get() < self.n,
            "called `BenefitMatrixBuilder::try_set_benefit` with index out of bounds: the len is {} but the indices are ({}, {})",
            self.n,
            level.get(),
            choice.get()
        );
        if benefit.is_negative() {
            return Err(MatrixError::NegativeBenefit { level, choice });
        }
        self.benefits[flatten_index(self.n, level.get(), choice.get())] = benefit;
        Ok(self)
    }

    /// Sets all benefits of one level.
    ///
    /// # Errors
    ///
    /// Returns `MatrixError::NotSquare` if `row` has the wrong length and
    /// `MatrixError::NegativeBenefit` for negative entries. On error the
    /// builder is left unchanged.
    pub fn set_level(&mut self, level: LevelIndex, row: &[T]) -> Result<&mut Self, MatrixError> {
        if row.len() != self.n {
            return Err(MatrixError::NotSquare {
                row: level.get(),
                expected: self.n,
                found: row.len(),
            });
        }
        if let Some(choice) = row.iter().position(|b| b.is_negative()) {
            return Err(MatrixError::NegativeBenefit {
                level,
                choice: ChoiceIndex::new(choice),
            });
        }
        let start = flatten_index(self.n, level.get(), 0);
        self.benefits[start..start + self.n].copy_from_slice(row);
        Ok(self)
    }

    /// Consumes the builder and returns the finished matrix.
    ///
    /// # Errors
    ///
    /// Returns `MatrixError::BenefitOverflow` if the column maxima overflow `T`.
    pub fn build(self) -> Result<BenefitMatrix<T>, MatrixError> {
        BenefitMatrix::from_validated(self.n, self.benefits)
    }
}
