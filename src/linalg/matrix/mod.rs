/* ************************************************************************ **
** This file is part of geomx, and is licensed under EITHER the MIT license **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::{MatrixError, Result};
use crate::scalar::Semiring;

use std::ops::{Index, IndexMut};
use slice_of_array::prelude::*;

mod ops;
mod compare;
mod text;
mod random;


/// Owned dense matrix with C layout.
///
/// Elements live in one contiguous row-major buffer; element `(r, c)` is
/// `data[r * cols + c]`. A matrix with zero rows or zero columns is valid
/// and owns no allocation.
// please resist the urge to go n-dimensional
#[derive(Debug, Clone)]
pub struct Matrix<T = f64> {
    // invariant: rows * cols == data.len()
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

//--------------------------------------------------------
// construction

impl<T: Semiring> Matrix<T> {
    /// Zero-filled matrix.
    pub fn new(rows: usize, cols: usize) -> Self
    { Matrix::new_filled((rows, cols), T::zero()) }

    /// Zero-filled matrix, whose diagonal is set to one if it is square.
    ///
    /// (a non-square matrix comes back all zero)
    pub fn new_identity(rows: usize, cols: usize) -> Self
    {
        let mut out = Matrix::new(rows, cols);
        if rows == cols {
            out.set_identity();
        }
        out
    }

    /// The `n x n` identity.
    pub fn identity(n: usize) -> Self
    { Matrix::new_identity(n, n) }

    pub fn new_filled((rows, cols): (usize, usize), fill: T) -> Self
    {
        let len = rows.checked_mul(cols)
            .unwrap_or_else(|| panic!("{}x{} matrix is too large", rows, cols));
        let data = match len {
            0 => Vec::new(),
            len => vec![fill; len],
        };
        Matrix { data, rows, cols }
    }

    /// Outer product `out[(i, j)] = col[i] * row[j]`.
    ///
    /// The vectors may have different lengths.
    pub fn from_outer(col: &[T], row: &[T]) -> Self
    {
        let mut data = Vec::with_capacity(col.len() * row.len());
        for &a in col {
            data.extend(row.iter().map(|&b| a * b));
        }
        Matrix { data, rows: col.len(), cols: row.len() }
    }

    /// Interpret a flat vector of `n * n` elements as a square matrix, row by row.
    pub fn from_flat_square(data: Vec<T>) -> Result<Self>
    {
        let n = integer_sqrt(data.len());
        if n * n != data.len() {
            return Err(MatrixError::NotPerfectSquare { len: data.len() });
        }
        Ok(Matrix { data, rows: n, cols: n })
    }

    /// Copy of `source` with row `drop_row` and column `drop_col` omitted.
    ///
    /// This is the minor used in cofactor expansions.
    pub fn without_row_col(source: &Matrix<T>, drop_row: usize, drop_col: usize) -> Result<Self>
    {
        if drop_row >= source.rows {
            throw!(MatrixError::IndexOutOfRange { op: "without_row_col", index: drop_row, bound: source.rows });
        }
        if drop_col >= source.cols {
            throw!(MatrixError::IndexOutOfRange { op: "without_row_col", index: drop_col, bound: source.cols });
        }

        let (rows, cols) = (source.rows - 1, source.cols - 1);
        let mut data = Vec::with_capacity(rows * cols);
        for (r, row) in source.rows().enumerate() {
            if r == drop_row { continue; }
            data.extend(row.iter().enumerate().filter(|&(c, _)| c != drop_col).map(|(_, &x)| x));
        }
        Ok(Matrix { data, rows, cols })
    }
}

impl<T> Matrix<T> {
    pub fn from_row_major_data((rows, cols): (usize, usize), data: Vec<T>) -> Result<Self>
    {
        if rows.checked_mul(cols) != Some(data.len()) {
            throw!(MatrixError::mismatch("from_row_major_data", (rows, cols), (data.len(), 1)));
        }
        Ok(Matrix { data, rows, cols })
    }
}

impl<T: Copy> Matrix<T> {
    /// Build from a list of rows.
    ///
    /// # Panics
    ///
    /// Panics on ragged input. Meant for literals in code and tests.
    pub fn from_rows(rows: &[&[T]]) -> Self
    {
        let ncols = rows.first().map_or(0, |r| r.len());
        let mut data = Vec::with_capacity(rows.len() * ncols);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), ncols, "row {} is ragged", i);
            data.extend_from_slice(row);
        }
        Matrix { data, rows: rows.len(), cols: ncols }
    }
}

impl<'a, T: Copy + 'a> From<&'a [[T; 3]]> for Matrix<T> {
    fn from(rows: &'a [[T; 3]]) -> Self
    { Matrix {
        data: rows.flat().to_vec(),
        rows: rows.len(),
        cols: 3,
    }}
}

// floor(sqrt(n)) without trusting float rounding for large n
fn integer_sqrt(n: usize) -> usize
{
    let square = |r: usize| r.checked_mul(r);
    let mut r = (n as f64).sqrt() as usize;
    while square(r).map_or(true, |sq| sq > n) { r -= 1; }
    while square(r + 1).map_or(false, |sq| sq <= n) { r += 1; }
    r
}

//--------------------------------------------------------
// shape and storage

impl<T> Matrix<T> {
    pub fn num_rows(&self) -> usize { self.rows }
    pub fn num_cols(&self) -> usize { self.cols }
    pub fn dims(&self) -> (usize, usize) { (self.rows, self.cols) }
    pub fn is_square(&self) -> bool { self.rows == self.cols }
    pub fn is_empty(&self) -> bool { self.data.is_empty() }
    pub fn size(&self) -> usize { self.data.len() }

    pub fn row_major_data(&self) -> &[T] { &self.data }
    pub fn row_major_data_mut(&mut self) -> &mut [T] { &mut self.data }
    pub fn into_row_major_data(self) -> Vec<T> { self.data }

    /// Every row in order, `num_rows()` of them even when there are no columns.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[T]> + '_
    {
        let cols = self.cols;
        (0..self.rows).map(move |r| &self.data[r * cols..(r + 1) * cols])
    }

    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [T]> + '_
    {
        // chunks_mut() refuses a chunk size of zero
        let empty_rows = if self.cols == 0 { self.rows } else { 0 };
        self.data.chunks_mut(self.cols.max(1))
            .chain(std::iter::repeat_with(Default::default).take(empty_rows))
    }

    pub fn row(&self, r: usize) -> &[T] { &self.data[r * self.cols..(r + 1) * self.cols] }
    pub fn row_mut(&mut self, r: usize) -> &mut [T] { &mut self.data[r * self.cols..(r + 1) * self.cols] }

    #[inline(always)]
    fn flat_index(&self, (r, c): (usize, usize)) -> usize
    {
        debug_assert!(r < self.rows && c < self.cols, "index {:?} out of bounds for {}x{}", (r, c), self.rows, self.cols);
        r * self.cols + c
    }

    pub(crate) fn require_square(&self, op: &'static str) -> Result<usize>
    {
        match self.is_square() {
            true => Ok(self.rows),
            false => Err(MatrixError::not_square(op, self.dims())),
        }
    }
}

impl<T: Semiring> Matrix<T> {
    pub fn col(&self, c: usize) -> Vec<T>
    { self.rows().map(|row| row[c]).collect() }

    /// Change the shape, zero-filling the contents.
    ///
    /// Asking for the current shape keeps the contents. Resizing to an empty
    /// shape releases the buffer.
    pub fn resize(&mut self, rows: usize, cols: usize)
    {
        if (rows, cols) == self.dims() {
            return;
        }
        *self = Matrix::new(rows, cols);
    }

    pub fn set_zero(&mut self)
    {
        for x in &mut self.data {
            *x = T::zero();
        }
    }

    /// Zero everything, then put ones on the leading diagonal.
    ///
    /// For a non-square matrix this fills `min(rows, cols)` diagonal elements.
    pub fn set_identity(&mut self)
    {
        self.set_zero();
        for i in 0..usize::min(self.rows, self.cols) {
            self[(i, i)] = T::one();
        }
    }

    /// Sum of the leading diagonal (over `min(rows, cols)` elements).
    pub fn trace(&self) -> T
    { self.diagonal().into_iter().sum() }

    /// Leading diagonal (of length `min(rows, cols)`).
    pub fn diagonal(&self) -> Vec<T>
    { (0..usize::min(self.rows, self.cols)).map(|i| self[(i, i)]).collect() }

    pub fn to_transpose(&self) -> Self
    {
        let mut data = Vec::with_capacity(self.data.len());
        for c in 0..self.cols {
            for r in 0..self.rows {
                data.push(self[(r, c)]);
            }
        }
        Matrix { data, rows: self.cols, cols: self.rows }
    }

    /// Transpose in place.
    ///
    /// Square matrices are transposed by swapping; others are rebuilt.
    pub fn transpose_in_place(&mut self)
    {
        if self.is_square() {
            let n = self.rows;
            for r in 0..n {
                for c in r + 1..n {
                    self.data.swap(r * n + c, c * n + r);
                }
            }
        } else {
            *self = self.to_transpose();
        }
    }

    pub fn swap_rows(&mut self, a: usize, b: usize) -> Result<()>
    {
        for &i in &[a, b] {
            if i >= self.rows {
                throw!(MatrixError::IndexOutOfRange { op: "swap_rows", index: i, bound: self.rows });
            }
        }
        if a != b {
            let n = self.cols;
            for c in 0..n {
                self.data.swap(a * n + c, b * n + c);
            }
        }
        Ok(())
    }

    pub fn swap_cols(&mut self, a: usize, b: usize) -> Result<()>
    {
        for &i in &[a, b] {
            if i >= self.cols {
                throw!(MatrixError::IndexOutOfRange { op: "swap_cols", index: i, bound: self.cols });
            }
        }
        if a != b {
            for row in self.rows_mut() {
                row.swap(a, b);
            }
        }
        Ok(())
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    #[inline(always)] // inlining should often remove bounds checks
    fn index(&self, index: (usize, usize)) -> &T
    { &self.data[self.flat_index(index)] }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    #[inline(always)]
    fn index_mut(&mut self, index: (usize, usize)) -> &mut T
    {
        let i = self.flat_index(index);
        &mut self.data[i]
    }
}

#[cfg(feature = "serde-support")]
mod serde_impls {
    use super::Matrix;
    use crate::MatrixError;

    #[derive(Serialize)]
    #[serde(rename = "Matrix")]
    struct RawRef<'a, T> {
        rows: usize,
        cols: usize,
        data: &'a [T],
    }

    #[derive(Deserialize)]
    #[serde(rename = "Matrix")]
    struct Raw<T> {
        rows: usize,
        cols: usize,
        data: Vec<T>,
    }

    impl<T: serde::Serialize> serde::Serialize for Matrix<T> {
        fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error>
        {
            RawRef { rows: self.rows, cols: self.cols, data: &self.data }.serialize(serializer)
        }
    }

    impl<'de, T: serde::Deserialize<'de>> serde::Deserialize<'de> for Matrix<T> {
        fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error>
        {
            let Raw { rows, cols, data } = Raw::deserialize(deserializer)?;
            Matrix::from_row_major_data((rows, cols), data)
                .map_err(|e: MatrixError| serde::de::Error::custom(e))
        }
    }

    #[cfg(test)]
    #[deny(unused)]
    mod tests {
        use super::*;

        #[test]
        fn json_round_trip() {
            let m = Matrix::from_rows(&[&[1.0, 2.0, 3.0], &[4.0, 5.5, -6.0]]);
            let json = ::serde_json::to_string(&m).unwrap();
            assert_eq!(json, r#"{"rows":2,"cols":3,"data":[1.0,2.0,3.0,4.0,5.5,-6.0]}"#);

            let back: Matrix<f64> = ::serde_json::from_str(&json).unwrap();
            assert_eq!(back.dims(), (2, 3));
            assert_eq!(back.row_major_data(), m.row_major_data());
        }

        #[test]
        fn length_is_validated() {
            let err = ::serde_json::from_str::<Matrix<i32>>(r#"{"rows":2,"cols":2,"data":[1,2,3]}"#)
                .unwrap_err();
            assert!(err.to_string().contains("dimension mismatch"), "{}", err);

            let empty: Matrix<i32> = ::serde_json::from_str(r#"{"rows":0,"cols":4,"data":[]}"#).unwrap();
            assert_eq!(empty.dims(), (0, 4));
        }
    }
}
