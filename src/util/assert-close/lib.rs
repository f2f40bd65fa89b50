/* ************************************************************************ **
** This file is part of geomx, and is licensed under EITHER the MIT license **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! `assert_close!`, for tests that compare floating point results.
//!
//! ```
//! #[macro_use] extern crate geomx_assert_close;
//! # fn main() {
//! assert_close!(0.1 + 0.2, 0.3);
//! assert_close!(abs=1e-6, vec![1.0, 2.0], vec![1.0, 2.0 + 1e-9]);
//! assert_close!(rel=1e-3, abs=0.0, 1000.0, 1000.5, "{} bottles", 99);
//! # }
//! ```

#[macro_use]
extern crate failure;

use std::fmt;

/// Relative tolerance used when an invocation gives none.
pub const DEFAULT_REL_TOL: f64 = 1e-9;

#[macro_export]
macro_rules! assert_close {
    ($($t:tt)*) => {
        $crate::__assert_close_impl!{@parsing [$($t)*] [[@rel $crate::DEFAULT_REL_TOL] [@abs 0.0]]}
    };
}

#[macro_export]
macro_rules! debug_assert_close {
    ($($t:tt)*) => {{
        #[cfg(debug_assertions)] {
            $crate::assert_close!{$($t)*}
        }
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __assert_close_impl {
    (@parsing [rel=$tol:expr, $($rest:tt)*] [$($assignment:tt)*]) => {
        $crate::__assert_close_impl!(@parsing [$($rest)*] [$($assignment)* [@rel $tol]]);
    };
    (@parsing [abs=$tol:expr, $($rest:tt)*] [$($assignment:tt)*]) => {
        $crate::__assert_close_impl!(@parsing [$($rest)*] [$($assignment)* [@abs $tol]]);
    };
    (@parsing [$a:expr, $b:expr $(,)*] $assignments:tt) => {
        $crate::__assert_close_impl!(@expand $assignments [@comp $a, $b] [@fmt "not nearly equal!"])
    };
    (@parsing [$a:expr, $b:expr, $($fmt:tt)+] $assignments:tt) => {
        $crate::__assert_close_impl!(@expand $assignments [@comp $a, $b] [@fmt $($fmt)+])
    };
    (@expand [$($assignment:tt)*] [@comp $a:expr, $b:expr] [@fmt $($fmt:tt)+] ) => {
        #[allow(unused_mut)]
        #[allow(unused_assignments)]
        {
            let a = $a;
            let b = $b;

            let mut abs: f64;
            let mut rel: f64;
            $(
                $crate::__assert_close_impl!{@assign [abs, rel] $assignment}
            )*

            if let Err(e) = $crate::CheckClose::check_close(&a, &b, $crate::Tol { abs, rel }) {
                panic!(
                    "{} (rel={}, abs={})\n left: {:?}\nright: {:?}\n{}",
                    format!($($fmt)*), rel, abs, a, b, e,
                );
            }
        }
    };
    (@assign [$abs:ident, $rel:ident] [@abs $tol:expr]) => { $abs = $tol; };
    (@assign [$abs:ident, $rel:ident] [@rel $tol:expr]) => { $rel = $tol; };
}

/// Absolute and relative tolerance; a pair of values passes if it passes either.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Tol {
    pub abs: f64,
    pub rel: f64,
}

/// Symmetric closeness test, after Python's `math.isclose`.
pub fn is_close(a: f64, b: f64, Tol { abs, rel }: Tol) -> bool
{
    assert!(rel >= 0.0 && abs >= 0.0, "negative tolerance");

    // equal infinities
    if a == b { return true; }
    if a.is_infinite() || b.is_infinite() { return false; }

    // NaN fails this
    (a - b).abs() <= abs.max(rel * a.abs()).max(rel * b.abs())
}

#[derive(Debug, Fail, Clone, PartialEq)]
pub enum CloseError {
    #[fail(display = "{}", _0)]
    Values(Mismatch),

    #[fail(display = "lengths differ: {} vs {}", left, right)]
    Length { left: usize, right: usize },

    #[fail(display = "shapes differ: {:?} vs {:?}", left, right)]
    Shape { left: Vec<usize>, right: Vec<usize> },
}

/// The first pair of elements that failed.
#[derive(Debug, Clone, PartialEq)]
pub struct Mismatch {
    /// Position within a flattened sequence, if the values came from one.
    pub index: Option<usize>,
    pub left: f64,
    pub right: f64,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(index) = self.index {
            write!(f, "first failure at element {}: ", index)?;
        }
        write!(f, "{:e} vs {:e} (difference {:e})", self.left, self.right, (self.left - self.right).abs())
    }
}

pub trait CheckClose<Rhs: ?Sized = Self> {
    /// `Ok` when every value in `self` is close to its partner in `other`.
    fn check_close(&self, other: &Rhs, tol: Tol) -> Result<(), CloseError>;
}

macro_rules! impl_float {
    ($($T:ty)*) => {$(
        impl CheckClose for $T {
            fn check_close(&self, other: &$T, tol: Tol) -> Result<(), CloseError>
            {
                let (left, right) = (*self as f64, *other as f64);
                match is_close(left, right, tol) {
                    true => Ok(()),
                    false => Err(CloseError::Values(Mismatch { index: None, left, right })),
                }
            }
        }
    )*};
}

impl_float!{ f32 f64 }

impl<'a, T: ?Sized + CheckClose> CheckClose for &'a T {
    fn check_close(&self, other: &Self, tol: Tol) -> Result<(), CloseError>
    { (**self).check_close(*other, tol) }
}

impl<T: CheckClose> CheckClose for [T] {
    fn check_close(&self, other: &[T], tol: Tol) -> Result<(), CloseError>
    {
        if self.len() != other.len() {
            return Err(CloseError::Length { left: self.len(), right: other.len() });
        }
        for (i, (a, b)) in self.iter().zip(other).enumerate() {
            match a.check_close(b, tol) {
                Err(CloseError::Values(Mismatch { index: None, left, right })) => {
                    return Err(CloseError::Values(Mismatch { index: Some(i), left, right }));
                },
                r => r?,
            }
        }
        Ok(())
    }
}

impl<T: CheckClose> CheckClose for Vec<T> {
    fn check_close(&self, other: &Vec<T>, tol: Tol) -> Result<(), CloseError>
    { self[..].check_close(&other[..], tol) }
}

impl<T: CheckClose> CheckClose<[T]> for Vec<T> {
    fn check_close(&self, other: &[T], tol: Tol) -> Result<(), CloseError>
    { self[..].check_close(other, tol) }
}

impl<T: CheckClose, const N: usize> CheckClose for [T; N] {
    fn check_close(&self, other: &[T; N], tol: Tol) -> Result<(), CloseError>
    { self[..].check_close(&other[..], tol) }
}
