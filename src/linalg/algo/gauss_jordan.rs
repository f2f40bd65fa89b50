/* ************************************************************************ **
** This file is part of geomx, and is licensed under EITHER the MIT license **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::{Matrix, MatrixError, Result};
use crate::scalar::Field;

impl<T: Field> Matrix<T> {
    /// Solve `self * X = b` by Gauss-Jordan elimination with full pivoting.
    ///
    /// On success `b` is overwritten by `X` and `self` by its own inverse.
    /// On failure both are left in an unspecified state.
    pub fn gauss_jordan(&mut self, b: &mut Matrix<T>) -> Result<()>
    {
        let n = self.require_square("gauss_jordan")?;
        if b.num_rows() != n {
            throw!(MatrixError::mismatch("gauss_jordan", self.dims(), b.dims()));
        }

        // how many times each column has been used as a pivot
        let mut pivoted = vec![0u32; n];
        let mut index_row = vec![0; n];
        let mut index_col = vec![0; n];

        for i in 0..n {
            // biggest element among rows and columns not yet pivoted
            let mut big = T::zero();
            let (mut irow, mut icol) = (0, 0);
            for j in 0..n {
                if pivoted[j] == 1 {
                    continue;
                }
                for k in 0..n {
                    match pivoted[k] {
                        0 => if self[(j, k)].abs() >= big {
                            big = self[(j, k)].abs();
                            irow = j;
                            icol = k;
                        },
                        1 => {},
                        _ => return Err(MatrixError::Singular { op: "gauss_jordan" }),
                    }
                }
            }
            pivoted[icol] += 1;

            if irow != icol {
                self.swap_rows(irow, icol)?;
                b.swap_rows(irow, icol)?;
            }
            index_row[i] = irow;
            index_col[i] = icol;

            let pivot = self[(icol, icol)];
            if pivot == T::zero() {
                error!("gauss_jordan: zero pivot in column {}; matrix is singular", icol);
                throw!(MatrixError::Singular { op: "gauss_jordan" });
            }

            let inv = pivot.recip();
            self[(icol, icol)] = T::one();
            scale_row(self, icol, inv);
            scale_row(b, icol, inv);

            for ll in 0..n {
                if ll == icol {
                    continue;
                }
                let factor = self[(ll, icol)];
                self[(ll, icol)] = T::zero();
                subtract_row_multiple(self, ll, icol, factor);
                subtract_row_multiple(b, ll, icol, factor);
            }
        }

        // unscramble the column interchanges, in reverse order
        for l in (0..n).rev() {
            if index_row[l] != index_col[l] {
                self.swap_cols(index_row[l], index_col[l])?;
            }
        }
        Ok(())
    }
}

fn scale_row<T: Field>(m: &mut Matrix<T>, r: usize, factor: T)
{
    for x in m.row_mut(r) {
        *x *= factor;
    }
}

// row[dest] -= factor * row[src]
fn subtract_row_multiple<T: Field>(m: &mut Matrix<T>, dest: usize, src: usize, factor: T)
{
    for c in 0..m.num_cols() {
        let v = m[(src, c)];
        m[(dest, c)] -= v * factor;
    }
}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;

    #[test]
    fn diagonal_system() {
        let mut a = Matrix::from_rows(&[&[2.0, 0.0], &[0.0, 4.0]]);
        let mut b = Matrix::identity(2);
        a.gauss_jordan(&mut b).unwrap();

        let expected = Matrix::from_rows(&[&[0.5, 0.0], &[0.0, 0.25]]);
        assert_close!(abs=1e-15, b, expected.clone());
        assert_close!(abs=1e-15, a, expected);
    }

    #[test]
    fn solves_and_inverts() {
        use rand::Rng;
        let mut rng = rand::thread_rng();
        for _ in 0..20 {
            let n = rng.gen_range(1, 8);
            let m = rng.gen_range(1, 4);
            let mut a = Matrix::<f64>::new(n, n);
            a.fill_random_with(&mut rng, (-1.0, 1.0));
            for i in 0..n {
                a[(i, i)] += n as f64;
            }
            let mut x = Matrix::<f64>::new(n, m);
            x.fill_random_with(&mut rng, (-5.0, 5.0));

            let mut b = &a * &x;
            let mut inv = a.clone();
            inv.gauss_jordan(&mut b).unwrap();

            assert_close!(abs=1e-9, b, x);
            assert_close!(abs=1e-9, &a * &inv, Matrix::identity(n));
        }
    }

    #[test]
    fn needs_pivoting() {
        let mut a = Matrix::from_rows(&[
            &[0.0, 1.0, 0.0],
            &[0.0, 0.0, 1.0],
            &[1.0, 0.0, 0.0],
        ]);
        let orig = a.clone();
        let mut b = Matrix::from_rows(&[&[1.0], &[2.0], &[3.0]]);
        a.gauss_jordan(&mut b).unwrap();
        assert_close!(abs=1e-15, b.col(0), vec![3.0, 1.0, 2.0]);
        assert_close!(abs=1e-15, &orig * &a, Matrix::identity(3));
    }

    #[test]
    fn singular_fails() {
        let mut a = Matrix::from_rows(&[&[1.0, 2.0], &[2.0, 4.0]]);
        let mut b = Matrix::identity(2);
        match a.gauss_jordan(&mut b) {
            Err(MatrixError::Singular { .. }) => {},
            r => panic!("{:?}", r),
        }
    }

    #[test]
    fn shape_errors() {
        let mut a = Matrix::<f64>::new(2, 3);
        let mut b = Matrix::<f64>::new(2, 1);
        match a.gauss_jordan(&mut b) {
            Err(MatrixError::NotSquare { .. }) => {},
            r => panic!("{:?}", r),
        }

        let mut a = Matrix::<f64>::identity(2);
        let mut b = Matrix::<f64>::new(3, 1);
        match a.gauss_jordan(&mut b) {
            Err(MatrixError::DimensionMismatch { .. }) => {},
            r => panic!("{:?}", r),
        }
    }
}
