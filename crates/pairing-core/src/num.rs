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

//! # Benefit Numerics
//!
//! Numeric building blocks for benefit values: an associated `ZERO` constant,
//! by-value saturating addition and subtraction, and the `BenefitNumeric`
//! alias that bundles every bound the solver needs into one name.
//!
//! Benefits are stored in signed integers so that negative input can be
//! detected and rejected instead of wrapping into a huge unsigned value.
//! Sums saturate: a bound that clamps at `T::MAX` is still an upper bound,
//! whereas a wrapped sum would not be. Clamped benefits are no longer
//! comparable though, which is why a benefit matrix refuses inputs whose
//! best assignment could exceed `T::MAX`.

use num_traits::{FromPrimitive, PrimInt, Signed};
use std::hash::Hash;

/// Integer types with a constant representing 0.
pub trait Zero {
    const ZERO: Self;
}

/// Saturating addition by value.
///
/// ```rust
/// # use pairing_core::num::SaturatingAddVal;
/// assert_eq!(i8::MAX.saturating_add_val(1), i8::MAX);
/// assert_eq!(40i32.saturating_add_val(2), 42);
/// ```
pub trait SaturatingAddVal: Sized {
    fn saturating_add_val(self, v: Self) -> Self;
}

/// Saturating subtraction by value.
///
/// ```rust
/// # use pairing_core::num::SaturatingSubVal;
/// assert_eq!(i8::MIN.saturating_sub_val(1), i8::MIN);
/// assert_eq!(44i64.saturating_sub_val(2), 42);
/// ```
pub trait SaturatingSubVal: Sized {
    fn saturating_sub_val(self, v: Self) -> Self;
}

macro_rules! impl_benefit_primitives {
    ($($t:ty),* $(,)?) => {
        $(
            impl Zero for $t {
                const ZERO: Self = 0;
            }

            impl SaturatingAddVal for $t {
                #[inline(always)]
                fn saturating_add_val(self, v: Self) -> Self {
                    <$t>::saturating_add(self, v)
                }
            }

            impl SaturatingSubVal for $t {
                #[inline(always)]
                fn saturating_sub_val(self, v: Self) -> Self {
                    <$t>::saturating_sub(self, v)
                }
            }
        )*
    };
}

impl_benefit_primitives!(i8, i16, i32, i64, isize, u32, u64, usize);

/// A trait alias for the integer types a benefit matrix can hold.
///
/// In practice these are `i8`, `i16`, `i32` and `i64`. The `i64` round trip
/// is what lets a shared incumbent publish its value through an `AtomicI64`.
pub trait BenefitNumeric:
    PrimInt
    + Signed
    + FromPrimitive
    + TryFrom<i64>
    + Into<i64>
    + Zero
    + SaturatingAddVal
    + SaturatingSubVal
    + std::fmt::Debug
    + std::fmt::Display
    + Hash
    + Send
    + Sync
{
}

impl<T> BenefitNumeric for T where
    T: PrimInt
        + Signed
        + FromPrimitive
        + TryFrom<i64>
        + Into<i64>
        + Zero
        + SaturatingAddVal
        + SaturatingSubVal
        + std::fmt::Debug
        + std::fmt::Display
        + Hash
        + Send
        + Sync
{
}
