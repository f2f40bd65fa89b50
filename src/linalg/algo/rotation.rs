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
    /// Is this a proper rotation? (`det == 1` and `M Mᵗ == I`)
    pub fn is_rotation(&self) -> Result<bool>
    { self.is_rotation_with(&Tolerances::default()) }

    pub fn is_rotation_with(&self, tol: &Tolerances) -> Result<bool>
    {
        let det = self.rotation_det("is_rotation", tol)?;
        if (det - 1.0).abs() > tol.rotation_det {
            return Ok(false);
        }
        Ok(self.times_transpose_is_identity(tol.rotation_identity))
    }

    /// Is this orthogonal, reflections included? (`|det| == 1` and `M Mᵗ == I`)
    pub fn is_orthogonal(&self) -> Result<bool>
    { self.is_orthogonal_with(&Tolerances::default()) }

    pub fn is_orthogonal_with(&self, tol: &Tolerances) -> Result<bool>
    {
        let det = self.rotation_det("is_orthogonal", tol)?;
        if (det.abs() - 1.0).abs() > tol.rotation_det {
            return Ok(false);
        }
        Ok(self.times_transpose_is_identity(tol.orthogonal_identity))
    }

    /// Turn a full-rank matrix into a proper rotation in place.
    ///
    /// Columns are orthogonalized left to right by Gram-Schmidt and then
    /// normalized. If the result is a reflection, the first column is
    /// negated. Returns the norm each column was divided by, with the first
    /// one negative if a reflection was undone.
    pub fn to_rotation(&mut self) -> Result<Vec<T>>
    { self.to_rotation_with(&Tolerances::default()) }

    pub fn to_rotation_with(&mut self, tol: &Tolerances) -> Result<Vec<T>>
    {
        let n = self.require_square("to_rotation")?;
        if n == 0 {
            throw!(MatrixError::not_square("to_rotation", self.dims()));
        }
        if self.determinant_with(tol)?.abs().to_f64() < tol.to_rotation_min {
            throw!(MatrixError::Singular { op: "to_rotation" });
        }

        for i in 0..n {
            for j in 0..i {
                let (mut dot, mut norm_sq) = (T::zero(), T::zero());
                for k in 0..n {
                    dot += self[(k, i)] * self[(k, j)];
                    norm_sq += self[(k, j)] * self[(k, j)];
                }
                let factor = dot / norm_sq;
                for k in 0..n {
                    let v = self[(k, j)];
                    self[(k, i)] -= factor * v;
                }
            }
        }

        let mut scales = Vec::with_capacity(n);
        for c in 0..n {
            let norm = self.col(c).iter().map(|&x| x * x).sum::<T>().sqrt();
            if norm.to_f64() < tol.to_rotation_min {
                debug!("to_rotation: column {} collapsed (norm {:e})", c, norm.to_f64());
                throw!(MatrixError::Singular { op: "to_rotation" });
            }
            scales.push(norm);
        }
        for row in self.rows_mut() {
            for (x, &s) in row.iter_mut().zip(&scales) {
                *x /= s;
            }
        }

        if self.determinant_with(tol)? < T::zero() {
            for r in 0..n {
                self[(r, 0)] = -self[(r, 0)];
            }
            scales[0] = -scales[0];
        }
        Ok(scales)
    }

    fn rotation_det(&self, op: &'static str, tol: &Tolerances) -> Result<f64>
    {
        self.require_square(op)?;
        Ok(self.determinant_with(tol)?.to_f64())
    }

    fn times_transpose_is_identity(&self, tolerance: f64) -> bool
    {
        let product = self * &self.to_transpose();
        product.equals(&Matrix::identity(self.num_rows()), tolerance)
    }
}
