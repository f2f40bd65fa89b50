/* ************************************************************************ **
** This file is part of geomx, and is licensed under EITHER the MIT license **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use super::Matrix;
use crate::{MatrixError, Result};
use crate::scalar::{Semiring, Ring, Field};

use std::ops::{Add, Sub, Mul, Div, Neg, AddAssign, SubAssign, MulAssign, DivAssign};
use itertools::Itertools;

// Addition and subtraction only touch the overlapping top-left block
// `min(rows) x min(cols)`. A shape mismatch is not an error.
impl<'a, T: Semiring> AddAssign<&'a Matrix<T>> for Matrix<T> {
    fn add_assign(&mut self, other: &'a Matrix<T>)
    { zip_overlap(self, other, |a, b| *a += b) }
}

impl<'a, T: Ring> SubAssign<&'a Matrix<T>> for Matrix<T> {
    fn sub_assign(&mut self, other: &'a Matrix<T>)
    { zip_overlap(self, other, |a, b| *a -= b) }
}

fn zip_overlap<T: Copy>(dest: &mut Matrix<T>, src: &Matrix<T>, mut f: impl FnMut(&mut T, T))
{
    let cols = usize::min(dest.cols, src.cols);
    for (dest_row, src_row) in dest.rows_mut().zip(src.rows()) {
        for (a, &b) in dest_row[..cols].iter_mut().zip(&src_row[..cols]) {
            f(a, b);
        }
    }
}

impl<'a, 'b, T: Semiring> Add<&'b Matrix<T>> for &'a Matrix<T> {
    type Output = Matrix<T>;

    fn add(self, other: &'b Matrix<T>) -> Matrix<T>
    {
        let mut out = self.clone();
        out += other;
        out
    }
}

impl<'a, 'b, T: Ring> Sub<&'b Matrix<T>> for &'a Matrix<T> {
    type Output = Matrix<T>;

    fn sub(self, other: &'b Matrix<T>) -> Matrix<T>
    {
        let mut out = self.clone();
        out -= other;
        out
    }
}

impl<T: Ring> Neg for Matrix<T> {
    type Output = Matrix<T>;

    fn neg(mut self) -> Matrix<T>
    {
        for x in &mut self.data {
            *x = -*x;
        }
        self
    }
}

//--------------------------------------------------------
// products

impl<T: Semiring> Matrix<T> {
    /// Matrix product, failing when `self.num_cols() != other.num_rows()`.
    pub fn checked_mul(&self, other: &Matrix<T>) -> Result<Matrix<T>>
    { matmul(self, other) }

    /// Product with a column vector.
    ///
    /// `v` may be longer than `self.num_cols()`; the excess is ignored.
    pub fn mul_vec(&self, v: &[T]) -> Result<Vec<T>>
    {
        if v.len() < self.cols {
            throw!(MatrixError::mismatch("mul_vec", self.dims(), (v.len(), 1)));
        }
        if self.cols == 0 {
            return Ok(vec![T::zero(); self.rows]);
        }
        Ok(self.rows().map(|row| dot(row, &v[..self.cols])).collect())
    }

    /// Product with a 3-vector.
    ///
    /// Requires exactly three columns. Rows beyond the third do not
    /// contribute, and missing rows leave zeros in the output.
    pub fn mul_point(&self, p: [T; 3]) -> Result<[T; 3]>
    {
        if self.cols != 3 {
            throw!(MatrixError::mismatch("mul_point", self.dims(), (3, 1)));
        }
        let mut out = [T::zero(); 3];
        for (o, row) in out.iter_mut().zip(self.rows()) {
            *o = dot(row, &p);
        }
        Ok(out)
    }
}

fn dot<T: Semiring>(a: &[T], b: &[T]) -> T
{ a.iter().zip_eq(b).map(|(&x, &y)| x * y).sum() }

fn matmul<T: Semiring>(a: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>>
{
    if a.cols != b.rows {
        throw!(MatrixError::mismatch("matrix product", a.dims(), b.dims()));
    }

    // this is suboptimal.  who cares.
    let mut out = Matrix::new(a.rows, b.cols);
    if out.is_empty() || a.cols == 0 {
        return Ok(out);
    }
    let b_t = b.to_transpose();
    for (out_row, a_row) in out.rows_mut().zip_eq(a.rows()) {
        for (out, b_col) in out_row.iter_mut().zip_eq(b_t.rows()) {
            *out = dot(a_row, b_col);
        }
    }
    Ok(out)
}

/// # Panics
///
/// Panics on a dimension mismatch; use `checked_mul` to handle it.
impl<'a, 'b, T: Semiring> Mul<&'b Matrix<T>> for &'a Matrix<T> {
    type Output = Matrix<T>;

    fn mul(self, other: &'b Matrix<T>) -> Matrix<T>
    { matmul(self, other).unwrap_or_else(|e| panic!("{}", e)) }
}

impl<'a, T: Semiring> MulAssign<&'a Matrix<T>> for Matrix<T> {
    fn mul_assign(&mut self, other: &'a Matrix<T>)
    { *self = &*self * other; }
}

//--------------------------------------------------------
// scalars

impl<T: Semiring> MulAssign<T> for Matrix<T> {
    fn mul_assign(&mut self, scalar: T)
    {
        for x in &mut self.data {
            *x *= scalar;
        }
    }
}

impl<T: Semiring> Mul<T> for Matrix<T> {
    type Output = Matrix<T>;

    fn mul(mut self, scalar: T) -> Matrix<T>
    {
        self *= scalar;
        self
    }
}

impl<'a, T: Semiring> Mul<T> for &'a Matrix<T> {
    type Output = Matrix<T>;

    fn mul(self, scalar: T) -> Matrix<T>
    { self.clone() * scalar }
}

impl<T: Field> DivAssign<T> for Matrix<T> {
    fn div_assign(&mut self, scalar: T)
    {
        for x in &mut self.data {
            *x /= scalar;
        }
    }
}

impl<T: Field> Div<T> for Matrix<T> {
    type Output = Matrix<T>;

    fn div(mut self, scalar: T) -> Matrix<T>
    {
        self /= scalar;
        self
    }
}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;

    #[test]
    fn add_sub_clip_to_overlap() {
        let mut a = Matrix::from_rows(&[&[1, 2, 3], &[4, 5, 6]]);
        let b = Matrix::from_rows(&[&[10, 20], &[30, 40], &[50, 60]]);
        a += &b;
        assert_eq!(a.dims(), (2, 3));
        assert_eq!(a.row_major_data(), &[11, 22, 3, 34, 45, 6]);

        a -= &b;
        assert_eq!(a.row_major_data(), &[1, 2, 3, 4, 5, 6]);

        let c = &b - &a;
        assert_eq!(c.dims(), (3, 2));
        assert_eq!(c.row_major_data(), &[9, 18, 26, 35, 50, 60]);

        let d = &a + &Matrix::new(0, 0);
        assert_eq!(d.row_major_data(), a.row_major_data());
    }

    #[test]
    fn matrix_products() {
        let a = Matrix::from_rows(&[&[1, 2, 3], &[4, 5, 6]]);
        let b = Matrix::from_rows(&[&[7, 8], &[9, 10], &[11, 12]]);
        let c = &a * &b;
        assert_eq!(c.dims(), (2, 2));
        assert_eq!(c.row_major_data(), &[58, 64, 139, 154]);

        match a.checked_mul(&a) {
            Err(MatrixError::DimensionMismatch { .. }) => {},
            r => panic!("{:?}", r),
        }

        let mut sq = Matrix::from_rows(&[&[1, 1], &[0, 1]]);
        sq *= &Matrix::from_rows(&[&[1, 1], &[0, 1]]);
        assert_eq!(sq.row_major_data(), &[1, 2, 0, 1]);
    }

    #[test]
    #[should_panic(expected = "dimension mismatch")]
    fn operator_panics_on_mismatch() {
        let a = Matrix::<f64>::new(2, 3);
        let _ = &a * &a;
    }

    #[test]
    fn empty_products() {
        let a = Matrix::<f64>::new(3, 0);
        let b = Matrix::<f64>::new(0, 2);
        let c = &a * &b;
        assert_eq!(c.dims(), (3, 2));
        assert!(c.row_major_data().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn vector_products() {
        let a = Matrix::from_rows(&[&[1, 2, 3], &[4, 5, 6]]);
        assert_eq!(a.mul_vec(&[1, 0, 1]).unwrap(), vec![4, 10]);
        // excess elements are ignored
        assert_eq!(a.mul_vec(&[1, 0, 1, 100]).unwrap(), vec![4, 10]);
        assert!(a.mul_vec(&[1, 0]).is_err());

        assert_eq!(a.mul_point([1, 1, 1]).unwrap(), [6, 15, 0]);
        let rot = Matrix::from_rows(&[&[0.0, -1.0, 0.0], &[1.0, 0.0, 0.0], &[0.0, 0.0, 1.0]]);
        assert_eq!(rot.mul_point([1.0, 0.0, 2.0]).unwrap(), [0.0, 1.0, 2.0]);
        assert!(Matrix::<f64>::new(3, 2).mul_point([0.0; 3]).is_err());
    }

    #[test]
    fn scalar_ops() {
        let a = Matrix::from_rows(&[&[1.0, -2.0], &[3.0, 4.0]]);
        assert_eq!((&a * 2.0).row_major_data(), &[2.0, -4.0, 6.0, 8.0]);
        assert_eq!((a.clone() / 2.0).row_major_data(), &[0.5, -1.0, 1.5, 2.0]);
        assert_eq!((-a).row_major_data(), &[-1.0, 2.0, -3.0, -4.0]);

        let mut i = Matrix::from_rows(&[&[1u32, 2]]);
        i *= 3;
        assert_eq!(i.row_major_data(), &[3, 6]);
    }
}
