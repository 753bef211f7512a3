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

//! Text loader for benefit matrices.
//!
//! The format is a whitespace separated token stream: the dimension `N`
//! followed by `N * N` benefits, row by row, where row `i` holds the benefits
//! of level `i`. Line breaks carry no meaning and `#` starts a comment that
//! runs to the end of the line.
//!
//! ```raw
//! # dimension
//! 2
//! 5 1   # level 0
//! 3 7   # level 1
//! ```
//!
//! Everything read is validated through `BenefitMatrix::from_flat`, so a
//! loaded matrix satisfies the same invariants as one built in code.

use crate::{error::MatrixError, matrix::BenefitMatrix};
use pairing_core::num::BenefitNumeric;
use std::{
    collections::VecDeque,
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
    str::FromStr,
};

/// The error type for matrix loading.
#[derive(Debug)]
pub enum LoaderError {
    /// An I/O error occurred while reading the input stream.
    Io(std::io::Error),
    /// The input ended before `N * N` benefits were read.
    UnexpectedEof,
    /// A token could not be parsed into the expected numeric type.
    Parse(ParseTokenError),
    /// Tokens remain after the last benefit.
    TrailingData { token: String },
    /// The values read do not form a valid benefit matrix.
    Matrix(MatrixError),
}

/// Details about a token that failed to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTokenError {
    /// The offending token.
    pub token: String,
    /// The type the token was parsed into.
    pub type_name: &'static str,
}

impl std::fmt::Display for ParseTokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Could not parse '{}' as {}", self.token, self.type_name)
    }
}

impl std::error::Error for ParseTokenError {}

impl std::fmt::Display for LoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::UnexpectedEof => write!(f, "Unexpected end of input while reading benefits"),
            Self::Parse(e) => write!(f, "Parse error: {e}"),
            Self::TrailingData { token } => {
                write!(f, "Unexpected data after the last benefit: '{token}'")
            }
            Self::Matrix(e) => write!(f, "Invalid matrix: {e}"),
        }
    }
}

impl std::error::Error for LoaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Matrix(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LoaderError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ParseTokenError> for LoaderError {
    fn from(e: ParseTokenError) -> Self {
        Self::Parse(e)
    }
}

impl From<MatrixError> for LoaderError {
    fn from(e: MatrixError) -> Self {
        Self::Matrix(e)
    }
}

/// A configurable loader for benefit matrices.
///
/// # Configuration
/// * `allow_trailing_data`: if `false` (the default), tokens after the last
///   benefit are rejected with `LoaderError::TrailingData`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixLoader<T> {
    allow_trailing_data: bool,
    _marker: std::marker::PhantomData<T>,
}

impl<T> Default for MatrixLoader<T> {
    fn default() -> Self {
        Self {
            allow_trailing_data: false,
            _marker: std::marker::PhantomData,
        }
    }
}

impl<T> MatrixLoader<T>
where
    T: BenefitNumeric + FromStr,
{
    /// Creates a loader with default settings.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures whether tokens after the last benefit are ignored.
    #[inline]
    pub fn allow_trailing_data(mut self, yes: bool) -> Self {
        self.allow_trailing_data = yes;
        self
    }

    /// Loads a matrix from a type implementing `BufRead`.
    pub fn from_bufread<R: BufRead>(&self, rdr: R) -> Result<BenefitMatrix<T>, LoaderError> {
        let mut tokens = Tokens::new(rdr);

        let n: usize = tokens.parse_next()?;
        let len = n.checked_mul(n).ok_or(MatrixError::FlatLengthMismatch {
            expected: usize::MAX,
            found: 0,
        })?;

        let mut benefits = Vec::with_capacity(len.min(1 << 16));
        for _ in 0..len {
            benefits.push(tokens.parse_next::<T>()?);
        }

        if !self.allow_trailing_data
            && let Some(token) = tokens.next_token()?
        {
            return Err(LoaderError::TrailingData { token });
        }

        Ok(BenefitMatrix::from_flat(n, benefits)?)
    }

    /// Loads a matrix from a file path.
    #[inline]
    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<BenefitMatrix<T>, LoaderError> {
        let file = File::open(path)?;
        self.from_bufread(BufReader::new(file))
    }

    /// Loads a matrix from a generic reader.
    #[inline]
    pub fn from_reader<R: Read>(&self, r: R) -> Result<BenefitMatrix<T>, LoaderError> {
        self.from_bufread(BufReader::new(r))
    }

    /// Loads a matrix from a string slice.
    #[inline]
    pub fn from_str(&self, s: &str) -> Result<BenefitMatrix<T>, LoaderError> {
        self.from_reader(s.as_bytes())
    }
}

/// Splits a line oriented reader into tokens, dropping `#` comments.
struct Tokens<R> {
    rdr: R,
    line: String,
    pending: VecDeque<String>,
}

impl<R: BufRead> Tokens<R> {
    #[inline]
    fn new(rdr: R) -> Self {
        Self {
            rdr,
            line: String::new(),
            pending: VecDeque::new(),
        }
    }

    /// Returns the next token, or `None` at end of input.
    fn next_token(&mut self) -> Result<Option<String>, LoaderError> {
        while self.pending.is_empty() {
            self.line.clear();
            if self.rdr.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
            let content = match self.line.find('#') {
                Some(pos) => &self.line[..pos],
                None => self.line.as_str(),
            };
            self.pending
                .extend(content.split_whitespace().map(str::to_owned));
        }
        Ok(self.pending.pop_front())
    }

    /// Reads the next token and parses it into `V`.
    fn parse_next<V: FromStr>(&mut self) -> Result<V, LoaderError> {
        let token = self.next_token()?.ok_or(LoaderError::UnexpectedEof)?;
        token.parse::<V>().map_err(|_| {
            LoaderError::Parse(ParseTokenError {
                token,
                type_name: std::any::type_name::<V>(),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{ChoiceIndex, LevelIndex};

    const TAPAS: &str = r#"
        # Four dishes served in four courses.
        4
        25 40 30 10   # course 0
        40 35  5 50
        15  5 50 40
        10 35 40 30   # course 3
    "#;

    #[test]
    fn test_loads_rows_as_levels() {
        let m: BenefitMatrix<i64> = MatrixLoader::new().from_str(TAPAS).expect("Failed to load");
        assert_eq!(m.dimension(), 4);
        assert_eq!(m.benefit(LevelIndex::new(1), ChoiceIndex::new(3)), 50);
        assert_eq!(m.benefit(LevelIndex::new(3), ChoiceIndex::new(0)), 10);
    }

    #[test]
    fn test_line_breaks_are_irrelevant() {
        let m: BenefitMatrix<i32> = MatrixLoader::new().from_str("2 1 2 3 4").unwrap();
        assert_eq!(m.benefits(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_comment_glued_to_token() {
        let m: BenefitMatrix<i32> = MatrixLoader::new().from_str("1\n9#nine").unwrap();
        assert_eq!(m.benefits(), &[9]);
    }

    #[test]
    fn test_zero_dimension_loads_empty_matrix() {
        let m: BenefitMatrix<i64> = MatrixLoader::new().from_str("0").unwrap();
        assert!(m.is_empty());
    }

    #[test]
    fn test_unexpected_eof() {
        let res = MatrixLoader::<i64>::new().from_str("2 1 2 3");
        assert!(matches!(res, Err(LoaderError::UnexpectedEof)));
    }

    #[test]
    fn test_parse_error_structure() {
        let res = MatrixLoader::<i64>::new().from_str("2 1 x 3 4");
        match res {
            Err(LoaderError::Parse(e)) => {
                assert_eq!(e.token, "x");
                assert!(e.type_name.contains("i64"));
            }
            other => panic!("Expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_dimension_is_a_parse_error() {
        let res = MatrixLoader::<i64>::new().from_str("-2");
        assert!(matches!(res, Err(LoaderError::Parse(_))));
    }

    #[test]
    fn test_trailing_data() {
        let res = MatrixLoader::<i64>::new().from_str("1 5 6");
        match res {
            Err(LoaderError::TrailingData { token }) => assert_eq!(token, "6"),
            other => panic!("Expected TrailingData, got {:?}", other),
        }

        let m = MatrixLoader::<i64>::new()
            .allow_trailing_data(true)
            .from_str("1 5 6")
            .unwrap();
        assert_eq!(m.benefits(), &[5]);
    }

    #[test]
    fn test_negative_benefit_is_a_matrix_error() {
        let res = MatrixLoader::<i64>::new().from_str("2 1 2 -3 4");
        match res {
            Err(LoaderError::Matrix(MatrixError::NegativeBenefit { level, choice })) => {
                assert_eq!(level.get(), 1);
                assert_eq!(choice.get(), 0);
            }
            other => panic!("Expected NegativeBenefit, got {:?}", other),
        }
    }

    #[test]
    fn test_from_path_missing_file_is_io_error() {
        let res = MatrixLoader::<i64>::new().from_path("/definitely/not/here.txt");
        assert!(matches!(res, Err(LoaderError::Io(_))));
    }
}
