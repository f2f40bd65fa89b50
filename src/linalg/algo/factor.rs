/* ************************************************************************ **
** This file is part of geomx, and is licensed under EITHER the MIT license **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::{Matrix, MatrixError, Result, Tolerances};
use crate::scalar::Field;

impl<T: Field> Matrix<T> {
    /// Triangularize in place and return the determinant.
    ///
    /// Uses Gaussian elimination with partial pivoting over columns: for
    /// each row, the largest remaining element of that row is swapped into
    /// the diagonal, flipping the sign of the result.
    ///
    /// If a row's best pivot is smaller than `tol::FACTOR_PIVOT`, the matrix
    /// is singular and zero is returned at once, leaving `self` partially
    /// eliminated.
    pub fn factor(&mut self) -> Result<T>
    { self.factor_with(&Tolerances::default()) }

    pub fn factor_with(&mut self, tol: &Tolerances) -> Result<T>
    {
        let n = self.require_square("factor")?;
        if n == 0 {
            throw!(MatrixError::not_square("factor", self.dims()));
        }

        let mut det = T::one();
        for i in 0..n - 1 {
            let (jmax, pmax) = (i..n)
                .map(|j| (j, self[(i, j)].abs()))
                .fold((i, T::zero()), |best, cur| if cur.1 > best.1 { cur } else { best });

            if pmax.to_f64() < tol.factor_pivot {
                trace!("factor: singular at row {} (pivot {:e})", i, pmax.to_f64());
                return Ok(T::zero());
            }

            if jmax != i {
                self.swap_cols(i, jmax)?;
                det = -det;
            }

            let pivot = self[(i, i)];
            det *= pivot;
            for k in i + 1..n {
                let scale = self[(k, i)] / pivot;
                self[(k, i)] = T::zero();
                for q in i + 1..n {
                    let v = self[(i, q)];
                    self[(k, q)] -= scale * v;
                }
            }
        }
        Ok(det * self[(n - 1, n - 1)])
    }

    /// Determinant, computed by `factor` on a copy.
    pub fn determinant(&self) -> Result<T>
    { self.determinant_with(&Tolerances::default()) }

    pub fn determinant_with(&self, tol: &Tolerances) -> Result<T>
    {
        if !self.is_square() {
            throw!(MatrixError::mismatch("determinant", self.dims(), (self.num_cols(), self.num_rows())));
        }
        self.clone().factor_with(tol)
    }
}
