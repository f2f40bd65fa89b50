/* ************************************************************************ **
** This file is part of geomx, and is licensed under EITHER the MIT license **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

// Cyclic Jacobi diagonalization of real symmetric matrices, with the
// threshold strategy of Numerical Recipes' `jacobi`.

use crate::{Matrix, MatrixError, Result, Tolerances};
use crate::scalar::Field;

use std::cmp::Ordering;

/// Eigendecomposition of a symmetric matrix.
///
/// `vectors` holds the eigenvectors as columns, and `values` is diagonal,
/// with `values[(k, k)]` belonging to column `k` of `vectors`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct EigenSystem<T: Field = f64> {
    pub vectors: Matrix<T>,
    pub values: Matrix<T>,
}

impl<T: Field> EigenSystem<T> {
    /// The eigenvalues, in column order.
    pub fn eigenvalues(&self) -> Vec<T>
    { self.values.diagonal() }

    /// Reorder so that eigenvalues are non-decreasing.
    ///
    /// Fails if `vectors` and `values` are not square matrices of one size.
    pub fn sorted(mut self) -> Result<Self>
    {
        self.vectors.sort_eigen(&mut self.values)?;
        Ok(self)
    }
}

impl<T: Field> Matrix<T> {
    /// Eigenvalues and eigenvectors of a symmetric matrix.
    ///
    /// Eigenvalues come out in no particular order; see `EigenSystem::sorted`.
    pub fn diagonalise(&self) -> Result<EigenSystem<T>>
    { self.diagonalise_with(&Tolerances::default()) }

    pub fn diagonalise_with(&self, tol: &Tolerances) -> Result<EigenSystem<T>>
    {
        let n = self.require_square("diagonalise")?;
        if n == 0 {
            throw!(MatrixError::not_square("diagonalise", self.dims()));
        }
        self.require_symmetric(tol.symmetry)?;

        let mut a = self.clone();
        let mut v = Matrix::identity(n);
        let mut b = a.diagonal();
        let mut d = b.clone();
        let mut z = vec![T::zero(); n];

        let two = T::from_usize(2);
        let hundred = T::from_usize(100);
        for sweep in 0..tol.max_jacobi_sweeps {
            let mut off = T::zero();
            for p in 0..n {
                for q in p + 1..n {
                    off += a[(p, q)].abs();
                }
            }
            if off == T::zero() {
                trace!("diagonalise: converged after {} sweeps", sweep);
                let mut values = Matrix::new(n, n);
                for (k, &x) in d.iter().enumerate() {
                    values[(k, k)] = x;
                }
                return Ok(EigenSystem { vectors: v, values });
            }

            // the first few sweeps only rotate away the larger elements
            let thresh = match sweep < tol.jacobi_threshold_sweeps {
                true => T::from_f64(0.2) * off / T::from_usize(n * n),
                false => T::zero(),
            };

            for p in 0..n {
                for q in p + 1..n {
                    let apq = a[(p, q)];
                    let g = hundred * apq.abs();

                    // an element negligible next to both diagonals is dropped
                    if sweep > tol.jacobi_threshold_sweeps
                        && negligible(d[p], g)
                        && negligible(d[q], g)
                    {
                        a[(p, q)] = T::zero();
                        continue;
                    }
                    if apq.abs() <= thresh {
                        continue;
                    }

                    let h = d[q] - d[p];
                    let t = match negligible(h, g) {
                        true => apq / h,
                        false => {
                            let theta = h / (two * apq);
                            let t = (theta.abs() + (T::one() + theta * theta).sqrt()).recip();
                            if theta < T::zero() { -t } else { t }
                        },
                    };
                    let c = (T::one() + t * t).sqrt().recip();
                    let s = t * c;
                    let tau = s / (T::one() + c);

                    let h = t * apq;
                    z[p] -= h;
                    z[q] += h;
                    d[p] -= h;
                    d[q] += h;
                    a[(p, q)] = T::zero();

                    let rot = Rotation { s, tau };
                    for j in 0..p {
                        rot.apply(&mut a, (j, p), (j, q));
                    }
                    for j in p + 1..q {
                        rot.apply(&mut a, (p, j), (j, q));
                    }
                    for j in q + 1..n {
                        rot.apply(&mut a, (p, j), (q, j));
                    }
                    for j in 0..n {
                        rot.apply(&mut v, (j, p), (j, q));
                    }
                }
            }

            for k in 0..n {
                b[k] += z[k];
                d[k] = b[k];
                z[k] = T::zero();
            }
        }

        warn!("diagonalise: no convergence after {} sweeps", tol.max_jacobi_sweeps);
        Err(MatrixError::NoConvergence { sweeps: tol.max_jacobi_sweeps })
    }

    /// Reorder the columns of `self` and the diagonal of `diag` together,
    /// so that the diagonal is non-decreasing.
    ///
    /// Ties keep their relative order. Returns the permutation applied:
    /// new column `k` is old column `perm[k]`.
    pub fn sort_eigen(&mut self, diag: &mut Matrix<T>) -> Result<Vec<usize>>
    {
        let n = self.require_square("sort_eigen")?;
        if diag.dims() != self.dims() {
            throw!(MatrixError::mismatch("sort_eigen", self.dims(), diag.dims()));
        }

        let values = diag.diagonal();
        let mut perm: Vec<usize> = (0..n).collect();
        perm.sort_by(|&i, &j| values[i].partial_cmp(&values[j]).unwrap_or(Ordering::Equal));

        let old = self.clone();
        for (new_c, &old_c) in perm.iter().enumerate() {
            diag[(new_c, new_c)] = values[old_c];
            for r in 0..n {
                self[(r, new_c)] = old[(r, old_c)];
            }
        }
        Ok(perm)
    }

    fn require_symmetric(&self, tolerance: f64) -> Result<()>
    {
        let n = self.num_rows();
        for row in 0..n {
            for col in row + 1..n {
                let asymmetry = (self[(row, col)] - self[(col, row)]).abs().to_f64();
                if asymmetry > tolerance {
                    throw!(MatrixError::NotSymmetric { row, col, asymmetry });
                }
            }
        }
        Ok(())
    }
}

// `|x| + g` rounds back to `|x|` at single precision.
fn negligible<T: Field>(x: T, g: T) -> bool
{
    let x = x.abs().to_f64();
    (x + g.to_f64()) as f32 == x as f32
}

struct Rotation<T> { s: T, tau: T }

impl<T: Field> Rotation<T> {
    fn apply(&self, m: &mut Matrix<T>, ij: (usize, usize), kl: (usize, usize))
    {
        let g = m[ij];
        let h = m[kl];
        m[ij] = g - self.s * (h + g * self.tau);
        m[kl] = h + self.s * (g - h * self.tau);
    }
}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;

    fn random_symmetric(n: usize) -> Matrix<f64>
    {
        let mut m = Matrix::new(n, n);
        m.fill_random_with(&mut rand::thread_rng(), (-2.0, 2.0));
        &m + &m.to_transpose()
    }

    fn check_system(m: &Matrix<f64>, sys: &EigenSystem<f64>)
    {
        let n = m.num_rows();
        let v = &sys.vectors;
        assert_close!(abs=1e-9, m * v, v * &sys.values);
        assert_close!(abs=1e-9, &v.to_transpose() * v, Matrix::identity(n));
        for r in 0..n {
            for c in 0..n {
                if r != c {
                    assert_eq!(sys.values[(r, c)], 0.0);
                }
            }
        }
    }

    #[test]
    fn known_values() {
        let m = Matrix::from_rows(&[&[2.0, 1.0], &[1.0, 2.0]]);
        let sys = m.diagonalise().unwrap().sorted().unwrap();
        assert_close!(abs=1e-12, sys.eigenvalues(), vec![1.0, 3.0]);
        check_system(&m, &sys);
    }

    #[test]
    fn already_diagonal() {
        let m = Matrix::from_rows(&[&[3.0, 0.0], &[0.0, -1.0]]);
        let sys = m.diagonalise().unwrap();
        assert_eq!(sys.vectors, Matrix::identity(2));
        assert_eq!(sys.eigenvalues(), vec![3.0, -1.0]);
        assert_eq!(sys.sorted().unwrap().eigenvalues(), vec![-1.0, 3.0]);
    }

    #[test]
    fn random_symmetric_matrices() {
        use rand::Rng;
        let mut rng = rand::thread_rng();
        for _ in 0..20 {
            let n = rng.gen_range(1, 10);
            let m = random_symmetric(n);
            let sys = m.diagonalise().unwrap().sorted().unwrap();
            check_system(&m, &sys);

            let values = sys.eigenvalues();
            for w in values.windows(2) {
                assert!(w[0] <= w[1], "{:?}", values);
            }
            assert_close!(abs=1e-9, values.iter().sum::<f64>(), m.trace());
        }
    }

    #[test]
    fn sort_eigen_moves_columns() {
        let mut vectors = Matrix::from_rows(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0], &[7.0, 8.0, 9.0]]);
        let mut values = Matrix::from_rows(&[&[5.0, 0.0, 0.0], &[0.0, 1.0, 0.0], &[0.0, 0.0, 5.0]]);
        let perm = vectors.sort_eigen(&mut values).unwrap();
        assert_eq!(perm, vec![1, 0, 2]);
        assert_eq!(values.diagonal(), vec![1.0, 5.0, 5.0]);
        assert_eq!(vectors, Matrix::from_rows(&[&[2.0, 1.0, 3.0], &[5.0, 4.0, 6.0], &[8.0, 7.0, 9.0]]));

        let mut wrong = Matrix::<f64>::new(2, 2);
        assert!(vectors.sort_eigen(&mut wrong).is_err());
    }

    #[test]
    fn sorted_reports_mismatched_parts() {
        let sys = EigenSystem {
            vectors: Matrix::<f64>::identity(3),
            values: Matrix::identity(2),
        };
        match sys.sorted() {
            Err(MatrixError::DimensionMismatch { .. }) => {},
            r => panic!("{:?}", r),
        }
    }

    #[cfg(feature = "serde-support")]
    #[test]
    fn serde_keeps_pairing() {
        let m = Matrix::from_rows(&[&[2.0, 1.0], &[1.0, 2.0]]);
        let sys = m.diagonalise().unwrap().sorted().unwrap();
        let json = ::serde_json::to_string(&sys).unwrap();
        let back: EigenSystem<f64> = ::serde_json::from_str(&json).unwrap();
        assert_eq!(back.vectors.row_major_data(), sys.vectors.row_major_data());
        assert_eq!(back.eigenvalues(), sys.eigenvalues());

        let bad = r#"{"vectors":{"rows":2,"cols":2,"data":[1.0]},"values":{"rows":0,"cols":0,"data":[]}}"#;
        assert!(::serde_json::from_str::<EigenSystem<f64>>(bad).is_err());
    }

    #[test]
    fn rejects_bad_input() {
        let m = Matrix::from_rows(&[&[1.0, 2.0], &[0.0, 1.0]]);
        match m.diagonalise() {
            Err(MatrixError::NotSymmetric { row: 0, col: 1, .. }) => {},
            r => panic!("{:?}", r),
        }
        match Matrix::<f64>::new(2, 3).diagonalise() {
            Err(MatrixError::NotSquare { .. }) => {},
            r => panic!("{:?}", r),
        }
        match Matrix::<f64>::new(0, 0).diagonalise() {
            Err(MatrixError::NotSquare { .. }) => {},
            r => panic!("{:?}", r),
        }
    }

    #[test]
    fn too_few_sweeps() {
        let tol = Tolerances { max_jacobi_sweeps: 0, ..Tolerances::default() };
        match random_symmetric(4).diagonalise_with(&tol) {
            Err(MatrixError::NoConvergence { sweeps: 0 }) => {},
            r => panic!("{:?}", r),
        }
    }
}
