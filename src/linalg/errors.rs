/* ************************************************************************ **
** This file is part of geomx, and is licensed under EITHER the MIT license **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use std::fmt;

/// Shape of a matrix, as `(rows, cols)`.
///
/// Exists mostly so that error messages can say `3x4` instead of `(3, 4)`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Dims(pub usize, pub usize);

impl fmt::Display for Dims {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result
    { write!(f, "{}x{}", self.0, self.1) }
}

impl From<(usize, usize)> for Dims {
    fn from((r, c): (usize, usize)) -> Self { Dims(r, c) }
}

/// Every way in which the matrix engine refuses to do something.
///
/// Precondition failures (shapes, indices, symmetry) indicate a programming
/// error in the caller and are never recovered from inside the engine.
#[derive(Debug, Fail, Clone, PartialEq)]
pub enum MatrixError {
    #[fail(display = "{}: dimension mismatch ({} vs {})", op, left, right)]
    DimensionMismatch {
        op: &'static str,
        left: Dims,
        right: Dims,
    },

    #[fail(display = "{}: index {} out of range (bound {})", op, index, bound)]
    IndexOutOfRange {
        op: &'static str,
        index: usize,
        bound: usize,
    },

    #[fail(display = "{}: matrix is not square ({})", op, dims)]
    NotSquare {
        op: &'static str,
        dims: Dims,
    },

    #[fail(display = "not a square number of elements: {}", len)]
    NotPerfectSquare {
        len: usize,
    },

    #[fail(display = "matrix is not symmetric: |a[{0}][{1}] - a[{1}][{0}]| = {2}", row, col, asymmetry)]
    NotSymmetric {
        row: usize,
        col: usize,
        asymmetry: f64,
    },

    #[fail(display = "{}: matrix is singular", op)]
    Singular {
        op: &'static str,
    },

    #[fail(display = "jacobi eigensolver did not converge after {} sweeps", sweeps)]
    NoConvergence {
        sweeps: u32,
    },

    #[fail(display = "malformed matrix text: {}", reason)]
    Format {
        reason: String,
    },
}

pub type Result<T> = ::std::result::Result<T, MatrixError>;

// shorthands for the common cases
impl MatrixError {
    pub(crate) fn mismatch(op: &'static str, left: (usize, usize), right: (usize, usize)) -> Self
    { MatrixError::DimensionMismatch { op, left: left.into(), right: right.into() } }

    pub(crate) fn not_square(op: &'static str, dims: (usize, usize)) -> Self
    { MatrixError::NotSquare { op, dims: dims.into() } }

    pub(crate) fn format(reason: impl Into<String>) -> Self
    { MatrixError::Format { reason: reason.into() } }
}
