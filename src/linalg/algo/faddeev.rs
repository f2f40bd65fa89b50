/* ************************************************************************ **
** This file is part of geomx, and is licensed under EITHER the MIT license **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::{Matrix, MatrixError, Result};
use crate::scalar::Field;

/// Output of the Faddeev-LeVerrier recurrence.
#[derive(Debug, Clone)]
pub struct Faddeev<T: Field = f64> {
    /// Coefficients of `det(λI - A)`, leading coefficient first.
    ///
    /// `coefficients[k]` multiplies `λ^(n-k)`, so `coefficients[0] == 1`
    /// and `coefficients[n] == (-1)^n det(A)`.
    pub coefficients: Vec<T>,
    /// `A⁻¹`, or `None` when the constant coefficient is exactly zero.
    pub inverse: Option<Matrix<T>>,
}

impl<T: Field> Faddeev<T> {
    /// Degree of the characteristic polynomial.
    pub fn degree(&self) -> usize
    { self.coefficients.len() - 1 }

    /// Evaluate the characteristic polynomial at `lambda`.
    pub fn evaluate(&self, lambda: T) -> T
    {
        self.coefficients.iter()
            .fold(T::zero(), |acc, &c| acc * lambda + c)
    }
}

impl<T: Field> Matrix<T> {
    /// Characteristic polynomial and inverse by the Faddeev-LeVerrier
    /// recurrence.
    ///
    /// With `M_0 = 0` and `c_0 = 1`, each step forms `M_k = A M_(k-1) + c_(k-1) I`
    /// and `c_k = -tr(A M_k) / k`. Cayley-Hamilton makes `A M_n + c_n I`
    /// vanish, so `A⁻¹ = -M_n / c_n`.
    ///
    /// This costs `n` matrix products and is far less stable than LU;
    /// prefer `inverse` unless the polynomial itself is wanted.
    pub fn faddeev(&self) -> Result<Faddeev<T>>
    {
        if !self.is_square() {
            throw!(MatrixError::mismatch("faddeev", self.dims(), self.dims()));
        }
        let n = self.num_rows();

        let mut coefficients = Vec::with_capacity(n + 1);
        coefficients.push(T::one());

        // am holds A M_(k-1), which is reused as the start of M_k
        let mut m = Matrix::new(n, n);
        let mut am = Matrix::new(n, n);
        for k in 1..=n {
            // M_k = A M_(k-1) + c_(k-1) I
            m = am;
            let prev = coefficients[k - 1];
            for i in 0..n {
                m[(i, i)] += prev;
            }

            am = self * &m;
            let c = -am.trace() / T::from_usize(k);
            coefficients.push(c);
        }

        let constant = coefficients[n];
        let inverse = match n > 0 && constant != T::zero() {
            true => Some(-m / constant),
            false => None,
        };
        trace!("faddeev: {}x{} done, constant term {}", n, n, constant);
        Ok(Faddeev { coefficients, inverse })
    }
}
