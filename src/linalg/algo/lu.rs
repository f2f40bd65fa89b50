/* ************************************************************************ **
** This file is part of geomx, and is licensed under EITHER the MIT license **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

// Crout LU decomposition with implicit row scaling, in the style of
// Numerical Recipes' ludcmp/lubksb.

use crate::{Matrix, MatrixError, Result, Tolerances};
use crate::scalar::Field;

/// Row pivoting record produced by `Matrix::lu_decompose`.
#[derive(Debug, Clone, PartialEq)]
pub struct LuPivots {
    /// `perm[j]` is the row swapped with row `j` at step `j`.
    pub perm: Vec<usize>,
    /// `+1` or `-1` according to the parity of the row interchanges.
    pub parity: i8,
    /// A row of the input was entirely zero; the decomposition was abandoned.
    pub zero_row: bool,
}

impl<T: Field> Matrix<T> {
    /// Overwrite `self` with its LU decomposition.
    ///
    /// Afterwards the strict lower triangle holds `L` (unit diagonal implied)
    /// and the upper triangle holds `U`, both for the row-permuted input.
    ///
    /// An exactly-zero diagonal element of `U` is replaced by
    /// `tol.lu_zero_pivot` (with a warning) unless `tol.strict_lu` is set.
    /// A row of zeros abandons the decomposition, returning an identity
    /// permutation with `zero_row` set.
    pub fn lu_decompose_with(&mut self, tol: &Tolerances) -> Result<LuPivots>
    {
        let n = self.require_square("lu_decompose")?;
        let mut perm: Vec<usize> = (0..n).collect();
        let mut parity = 1;

        // implicit scaling of each row
        let mut scale = Vec::with_capacity(n);
        for row in self.rows() {
            let big = row.iter().fold(T::zero(), |acc, &x| if x.abs() > acc { x.abs() } else { acc });
            if big == T::zero() {
                return Ok(LuPivots { perm, parity, zero_row: true });
            }
            scale.push(big.recip());
        }

        for j in 0..n {
            for i in 0..j {
                let mut sum = self[(i, j)];
                for k in 0..i {
                    sum -= self[(i, k)] * self[(k, j)];
                }
                self[(i, j)] = sum;
            }

            let mut big = T::zero();
            let mut imax = j;
            for i in j..n {
                let mut sum = self[(i, j)];
                for k in 0..j {
                    sum -= self[(i, k)] * self[(k, j)];
                }
                self[(i, j)] = sum;

                let figure = scale[i] * sum.abs();
                if figure >= big {
                    big = figure;
                    imax = i;
                }
            }

            if j != imax {
                self.swap_rows(imax, j)?;
                parity = -parity;
                scale[imax] = scale[j];
            }
            perm[j] = imax;

            if self[(j, j)] == T::zero() {
                if tol.strict_lu {
                    throw!(MatrixError::Singular { op: "lu_decompose" });
                }
                warn!("lu_decompose: zero pivot in column {}, substituting {:e}", j, tol.lu_zero_pivot);
                self[(j, j)] = T::from_f64(tol.lu_zero_pivot);
            }

            if j + 1 != n {
                let inv = self[(j, j)].recip();
                for i in j + 1..n {
                    self[(i, j)] *= inv;
                }
            }
        }
        Ok(LuPivots { perm, parity, zero_row: false })
    }

    pub fn lu_decompose(&mut self) -> Result<LuPivots>
    { self.lu_decompose_with(&Tolerances::default()) }

    /// Solve `A x = b` in place, where `self` holds the output of
    /// `lu_decompose` for `A`.
    pub fn lu_back_substitute(&self, pivots: &LuPivots, b: &mut [T]) -> Result<()>
    {
        let n = self.require_square("lu_back_substitute")?;
        if b.len() != n || pivots.perm.len() != n {
            throw!(MatrixError::mismatch("lu_back_substitute", self.dims(), (b.len(), 1)));
        }

        substitute(self, pivots, b);
        Ok(())
    }

    /// Invert in place, returning the determinant.
    ///
    /// A non-square or empty matrix is left untouched and zero is returned.
    /// A singular matrix produces huge or non-finite elements (see
    /// `tol::LU_ZERO_PIVOT`) unless it has a row of zeros, in which case it
    /// is left untouched and zero is returned. Use `inverse` to have
    /// singularity reported as an error.
    pub fn invert(&mut self) -> T
    { self.invert_with(&Tolerances::default()) }

    pub fn invert_with(&mut self, tol: &Tolerances) -> T
    {
        let n = self.num_rows();
        if !self.is_square() || n == 0 {
            warn!("invert: refusing to invert a {}x{} matrix", self.num_rows(), self.num_cols());
            return T::zero();
        }
        if n == 1 {
            let det = self[(0, 0)];
            if det != T::zero() {
                self[(0, 0)] = det.recip();
            }
            return det;
        }

        let lu = match LuDecomposition::new_with(self, tol) {
            Ok(lu) => lu,
            Err(e) => {
                warn!("invert: {}", e);
                return T::zero();
            },
        };
        let det = lu.determinant();
        if lu.pivots.zero_row {
            return det;
        }

        *self = lu.assemble_inverse();
        det
    }

    /// The inverse, as a new matrix.
    pub fn inverse(&self) -> Result<Matrix<T>>
    { self.inverse_with(&Tolerances::default()) }

    pub fn inverse_with(&self, tol: &Tolerances) -> Result<Matrix<T>>
    {
        self.require_square("inverse")?;
        let lu = LuDecomposition::new_with(self, tol)?;
        if lu.pivots.zero_row {
            throw!(MatrixError::Singular { op: "inverse" });
        }

        Ok(lu.assemble_inverse())
    }
}

/// An LU decomposition kept around for repeated solves.
#[derive(Debug, Clone)]
pub struct LuDecomposition<T: Field = f64> {
    lu: Matrix<T>,
    pivots: LuPivots,
}

impl<T: Field> LuDecomposition<T> {
    pub fn new(a: &Matrix<T>) -> Result<Self>
    { LuDecomposition::new_with(a, &Tolerances::default()) }

    pub fn new_with(a: &Matrix<T>, tol: &Tolerances) -> Result<Self>
    {
        let mut lu = a.clone();
        let pivots = lu.lu_decompose_with(tol)?;
        Ok(LuDecomposition { lu, pivots })
    }

    /// Packed `L` and `U` factors.
    pub fn factors(&self) -> &Matrix<T> { &self.lu }
    pub fn pivots(&self) -> &LuPivots { &self.pivots }

    /// Product of the diagonal of `U`, with the interchange sign.
    ///
    /// Zero if the input had a row of zeros.
    pub fn determinant(&self) -> T
    {
        if self.pivots.zero_row {
            return T::zero();
        }
        let sign = if self.pivots.parity < 0 { -T::one() } else { T::one() };
        self.lu.diagonal().into_iter().fold(sign, |acc, x| acc * x)
    }

    // one column of the inverse per unit vector
    fn assemble_inverse(&self) -> Matrix<T>
    {
        let n = self.lu.num_rows();
        let mut out = Matrix::new(n, n);
        let mut col = vec![T::zero(); n];
        for j in 0..n {
            for x in &mut col { *x = T::zero(); }
            col[j] = T::one();
            substitute(&self.lu, &self.pivots, &mut col);
            for i in 0..n {
                out[(i, j)] = col[i];
            }
        }
        out
    }

    /// Overwrite `b` with the solution `x` of `A x = b`.
    pub fn solve(&self, b: &mut [T]) -> Result<()>
    {
        if self.pivots.zero_row {
            throw!(MatrixError::Singular { op: "solve" });
        }
        self.lu.lu_back_substitute(&self.pivots, b)
    }
}

// Forward and back substitution for `lu_back_substitute`, which checks shapes.
fn substitute<T: Field>(lu: &Matrix<T>, pivots: &LuPivots, b: &mut [T])
{
    let n = lu.num_rows();
    // forward substitution, skipping the leading zeros of b
    let mut first_nonzero = None;
    for i in 0..n {
        let ip = pivots.perm[i];
        let mut sum = b[ip];
        b[ip] = b[i];
        match first_nonzero {
            Some(start) => {
                for j in start..i {
                    sum -= lu[(i, j)] * b[j];
                }
            },
            None => if sum != T::zero() {
                first_nonzero = Some(i);
            },
        }
        b[i] = sum;
    }

    for i in (0..n).rev() {
        let mut sum = b[i];
        for j in i + 1..n {
            sum -= lu[(i, j)] * b[j];
        }
        b[i] = sum / lu[(i, i)];
    }
}
