/* ************************************************************************ **
** This file is part of geomx, and is licensed under EITHER the MIT license **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use super::Matrix;
use crate::tol;
use crate::scalar::Semiring;

use geomx_assert_close::{CheckClose, CloseError, Tol};

impl<T: Semiring> Matrix<T> {
    /// Tolerant comparison.
    ///
    /// Shapes must match exactly. The matrices are then equal if the largest
    /// elementwise difference is below `tolerance`, or, when `self` has an
    /// element larger than 1 in magnitude, if that difference relative to
    /// the largest magnitude is below `tolerance`.
    pub fn equals(&self, other: &Matrix<T>, tolerance: f64) -> bool
    {
        if std::ptr::eq(self, other) {
            return true;
        }
        if self.dims() != other.dims() {
            return false;
        }

        let mut max_diff = 0.0f64;
        let mut max_mag = 0.0f64;
        for (&a, &b) in self.data.iter().zip(&other.data) {
            let (a, b) = (a.to_f64(), b.to_f64());
            max_diff = max_diff.max((a - b).abs());
            max_mag = max_mag.max(a.abs());
        }

        if max_diff < tolerance {
            return true;
        }
        max_mag > 1.0 && max_diff / max_mag < tolerance
    }

    /// Lexicographic "less than" over row-major elements.
    ///
    /// Matrices of different shapes are never less than one another.
    pub fn lex_lt(&self, other: &Matrix<T>) -> bool
    {
        if self.dims() != other.dims() {
            return false;
        }
        for (a, b) in self.data.iter().zip(&other.data) {
            if a < b { return true; }
            if a > b { return false; }
        }
        false
    }

    /// Negation of `lex_lt`, shape mismatches included.
    pub fn lex_ge(&self, other: &Matrix<T>) -> bool
    { !self.lex_lt(other) }
}

/// Equality within `tol::EQUALITY`; see `Matrix::equals`.
impl<T: Semiring> PartialEq for Matrix<T> {
    fn eq(&self, other: &Matrix<T>) -> bool
    { self.equals(other, tol::EQUALITY) }
}

impl<T: Semiring> CheckClose for Matrix<T> {
    fn check_close(&self, other: &Matrix<T>, tol: Tol) -> Result<(), CloseError>
    {
        if self.dims() != other.dims() {
            return Err(CloseError::Shape {
                left: vec![self.rows, self.cols],
                right: vec![other.rows, other.cols],
            });
        }
        let left: Vec<f64> = self.data.iter().map(|x| x.to_f64()).collect();
        let right: Vec<f64> = other.data.iter().map(|x| x.to_f64()).collect();
        left.check_close(&right, tol)
    }
}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;

    #[test]
    fn absolute_then_relative() {
        let a = Matrix::from_rows(&[&[1.0, 0.5], &[0.0, 0.25]]);
        let mut b = a.clone();
        b[(1, 1)] += 1e-9;
        assert!(a.equals(&b, 1e-8));
        assert_eq!(a, b);
        b[(1, 1)] += 1e-7;
        assert!(!a.equals(&b, 1e-8));

        // a large matrix gets relative slack
        let big = Matrix::from_rows(&[&[1e6, 0.0], &[0.0, 1e6]]);
        let mut near = big.clone();
        near[(0, 0)] += 1e-3;
        assert!(big.equals(&near, 1e-8));
        near[(0, 0)] += 1.0;
        assert!(!big.equals(&near, 1e-8));
    }

    #[test]
    fn shape_mismatch_is_unequal() {
        let a = Matrix::<f64>::new(2, 3);
        let b = Matrix::<f64>::new(3, 2);
        assert!(!a.equals(&b, 1.0));
        assert!(a != b);
    }

    #[test]
    fn lexicographic_order() {
        let a = Matrix::from_rows(&[&[1, 2], &[3, 4]]);
        let b = Matrix::from_rows(&[&[1, 2], &[3, 5]]);
        assert!(a.lex_lt(&b));
        assert!(!b.lex_lt(&a));
        assert!(b.lex_ge(&a));
        assert!(!a.lex_lt(&a));
        assert!(a.lex_ge(&a));

        let c = Matrix::from_rows(&[&[0, 0, 0]]);
        assert!(!c.lex_lt(&a));
        assert!(!a.lex_lt(&c));
    }

    #[test]
    fn integer_equality() {
        let a = Matrix::from_rows(&[&[1u32, 5]]);
        let b = Matrix::from_rows(&[&[5u32, 1]]);
        assert!(!a.equals(&b, 1e-8));
        assert_eq!(a, a.clone());
    }

    #[test]
    fn check_close_reports_shape() {
        let a = Matrix::<f64>::new(1, 2);
        let b = Matrix::<f64>::new(2, 1);
        assert!(a.check_close(&b, Tol { abs: 1.0, rel: 1.0 }).is_err());
        assert_close!(abs=1e-12, a, Matrix::<f64>::new(1, 2));
    }
}
