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

use crate::{
    error::LabelError,
    index::{ChoiceIndex, LevelIndex},
    matrix::BenefitMatrix,
};
use pairing_core::num::BenefitNumeric;

/// A complete assignment of choices to levels.
///
/// This struct uses a Structure of Arrays (SoA) layout indexed by
/// `ChoiceIndex`: `levels[c]` is the level choice `c` was bound to and
/// `benefits[c]` the benefit that pairing earned.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Assignment<T> {
    /// The total benefit of this assignment.
    benefit: T,

    /// `levels[c]` is the level assigned to choice `c`.
    levels: Vec<LevelIndex>,

    /// `benefits[c]` is the benefit choice `c` earns on its level.
    benefits: Vec<T>,
}

impl<T> Assignment<T>
where
    T: BenefitNumeric,
{
    /// Constructs a new `Assignment`.
    ///
    /// # Panics
    ///
    /// Panics if `levels` and `benefits` have different lengths.
    pub fn new(benefit: T, levels: Vec<LevelIndex>, benefits: Vec<T>) -> Self {
        assert_eq!(
            levels.len(),
            benefits.len(),
            "called `Assignment::new` with inconsistent vector lengths: levels.len() = {}, benefits.len() = {}",
            levels.len(),
            benefits.len()
        );

        Self {
            benefit,
            levels,
            benefits,
        }
    }

    /// Builds an assignment from `levels[c]`, reading benefits from `matrix`.
    ///
    /// # Panics
    ///
    /// Panics if `levels.len()` differs from the matrix dimension, a level
    /// is out of range, or two choices share a level.
    pub fn from_levels(matrix: &BenefitMatrix<T>, levels: Vec<LevelIndex>) -> Self {
        assert_eq!(
            levels.len(),
            matrix.dimension(),
            "called `Assignment::from_levels` with {} levels for a matrix of dimension {}",
            levels.len(),
            matrix.dimension()
        );

        let benefits: Vec<T> = levels
            .iter()
            .enumerate()
            .map(|(c, &level)| matrix.benefit(level, ChoiceIndex::new(c)))
            .collect();
        let benefit = benefits
            .iter()
            .fold(T::ZERO, |acc, &b| acc.saturating_add_val(b));

        let assignment = Self {
            benefit,
            levels,
            benefits,
        };
        assert!(
            assignment.is_bijection(),
            "called `Assignment::from_levels` with levels that are not a permutation: {:?}",
            assignment.levels
        );
        assignment
    }

    /// The identity assignment: choice `i` on level `i`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use pairing_model::{assignment::Assignment, matrix::BenefitMatrix};
    /// let m = BenefitMatrix::from_rows(vec![vec![1i64, 9], vec![9, 2]]).unwrap();
    /// assert_eq!(Assignment::identity(&m).benefit(), 3);
    /// ```
    pub fn identity(matrix: &BenefitMatrix<T>) -> Self {
        Self::from_levels(matrix, LevelIndex::range(matrix.dimension()).collect())
    }

    /// The empty assignment for `N = 0`.
    #[inline]
    pub fn empty() -> Self {
        Self {
            benefit: T::ZERO,
            levels: Vec::new(),
            benefits: Vec::new(),
        }
    }

    /// Returns the total benefit.
    #[inline]
    pub fn benefit(&self) -> T {
        self.benefit
    }

    /// Returns the number of choices covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Returns `true` if the assignment covers no choices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Returns the level assigned to `choice`.
    ///
    /// # Panics
    ///
    /// Panics if `choice` is out of bounds.
    #[inline]
    pub fn level_for_choice(&self, choice: ChoiceIndex) -> LevelIndex {
        let index = choice.get();
        assert!(
            index < self.len(),
            "called `Assignment::level_for_choice` with choice index out of bounds: the len is {} but the index is {}",
            self.len(),
            index
        );
        self.levels[index]
    }

    /// Returns the benefit `choice` earns on its level.
    ///
    /// # Panics
    ///
    /// Panics if `choice` is out of bounds.
    #[inline]
    pub fn benefit_for_choice(&self, choice: ChoiceIndex) -> T {
        let index = choice.get();
        assert!(
            index < self.len(),
            "called `Assignment::benefit_for_choice` with choice index out of bounds: the len is {} but the index is {}",
            self.len(),
            index
        );
        self.benefits[index]
    }

    /// Returns the choice bound to `level`, if any.
    pub fn choice_for_level(&self, level: LevelIndex) -> Option<ChoiceIndex> {
        self.levels
            .iter()
            .position(|&l| l == level)
            .map(ChoiceIndex::new)
    }

    /// Returns `true` if every level in `0..len()` is used by exactly one choice.
    pub fn is_bijection(&self) -> bool {
        let n = self.len();
        let mut seen = vec![false; n];
        for level in &self.levels {
            let l = level.get();
            if l >= n || seen[l] {
                return false;
            }
            seen[l] = true;
        }
        true
    }

    /// Iterates over `(choice, level)` pairs in choice order.
    #[inline]
    pub fn pairs(&self) -> impl ExactSizeIterator<Item = (ChoiceIndex, LevelIndex)> + '_ {
        self.levels
            .iter()
            .enumerate()
            .map(|(c, &l)| (ChoiceIndex::new(c), l))
    }

    /// Returns the level of every choice, indexed by choice.
    #[inline]
    pub fn levels(&self) -> &[LevelIndex] {
        &self.levels
    }

    /// Returns the benefit of every choice, indexed by choice.
    #[inline]
    pub fn benefits(&self) -> &[T] {
        &self.benefits
    }

    /// Recomputes the total benefit of this assignment against `matrix`.
    ///
    /// # Panics
    ///
    /// Panics if a level or choice is out of range for `matrix`.
    pub fn evaluate(&self, matrix: &BenefitMatrix<T>) -> T {
        self.pairs().fold(T::ZERO, |acc, (c, l)| {
            acc.saturating_add_val(matrix.benefit(l, c))
        })
    }

    /// Returns a displayable view that prints `choice -> level` with names.
    ///
    /// # Errors
    ///
    /// Returns a `LabelError` if the label counts do not match the assignment.
    pub fn display_with_labels<'a>(
        &'a self,
        labels: &'a Labels,
    ) -> Result<LabelledAssignment<'a, T>, LabelError> {
        if labels.choices.len() != self.len() {
            return Err(LabelError::ChoiceCountMismatch {
                expected: self.len(),
                found: labels.choices.len(),
            });
        }
        if labels.levels.len() != self.len() {
            return Err(LabelError::LevelCountMismatch {
                expected: self.len(),
                found: labels.levels.len(),
            });
        }
        Ok(LabelledAssignment {
            assignment: self,
            labels,
        })
    }
}

impl<T> std::fmt::Display for Assignment<T>
where
    T: BenefitNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Assignment Summary")?;
        writeln!(f, "   Total Benefit: {}", self.benefit)?;
        writeln!(f)?;

        if self.is_empty() {
            writeln!(f, "   (No choices assigned)")?;
            return Ok(());
        }

        writeln!(f, "   {:<10} | {:<10} | {:<10}", "Choice", "Level", "Benefit")?;
        writeln!(f, "   {:-<10}-+-{:-<10}-+-{:-<10}", "", "", "")?;
        for (c, l) in self.pairs() {
            writeln!(
                f,
                "   {:<10} | {:<10} | {:<10}",
                c.get(),
                l.get(),
                self.benefits[c.get()]
            )?;
        }

        Ok(())
    }
}

/// Display names for choices and levels.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Labels {
    choices: Vec<String>,
    levels: Vec<String>,
}

impl Labels {
    /// Creates a label set from choice names and level names.
    pub fn new<C, L>(choices: C, levels: L) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        L: IntoIterator,
        L::Item: Into<String>,
    {
        Self {
            choices: choices.into_iter().map(Into::into).collect(),
            levels: levels.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the name of `choice`.
    #[inline]
    pub fn choice(&self, choice: ChoiceIndex) -> &str {
        &self.choices[choice.get()]
    }

    /// Returns the name of `level`.
    #[inline]
    pub fn level(&self, level: LevelIndex) -> &str {
        &self.levels[level.get()]
    }
}

/// An assignment paired with validated labels, see
/// `Assignment::display_with_labels`.
#[derive(Clone, Copy, Debug)]
pub struct LabelledAssignment<'a, T> {
    assignment: &'a Assignment<T>,
    labels: &'a Labels,
}

impl<T> std::fmt::Display for LabelledAssignment<'_, T>
where
    T: BenefitNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (c, l) in self.assignment.pairs() {
            writeln!(f, "{} -> {}", self.labels.choice(c), self.labels.level(l))?;
        }
        write!(f, "Total benefit: {}", self.assignment.benefit)
    }
}
