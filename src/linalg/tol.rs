/* ************************************************************************ **
** This file is part of geomx, and is licensed under EITHER the MIT license **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Numerical tolerances used by the engine.
//!
//! The defaults reproduce the behavior downstream geometry code has been
//! calibrated against; change them only through [`Tolerances`] at a call
//! site, never by editing these values.

/// Absolute (and, for matrices with entries above 1, relative) tolerance
/// of `Matrix::equals` and of `==`.
pub const EQUALITY: f64 = 1e-8;

/// `factor` declares the matrix singular when the best pivot in a row is
/// smaller than this.
pub const FACTOR_PIVOT: f64 = 1e-8;

/// Value substituted for an exactly-zero diagonal element during LU
/// decomposition.
///
/// This silently trades precision for robustness on near-degenerate
/// transforms; see `Tolerances::strict_lu` for the alternative.
pub const LU_ZERO_PIVOT: f64 = 1e-14;

/// Largest `|a[i][j] - a[j][i]|` accepted by the eigensolver.
pub const SYMMETRY: f64 = 1e-6;

/// `|det - 1|` (or `||det| - 1|`) accepted by the rotation checks.
pub const ROTATION_DET: f64 = 1e-5;

/// Tolerance on `M Mᵗ == I` for `is_rotation`.
pub const ROTATION_IDENTITY: f64 = 1e-5;

/// Tolerance on `M Mᵗ == I` for `is_orthogonal`.
pub const ORTHOGONAL_IDENTITY: f64 = 1e-7;

/// `to_rotation` refuses matrices with a smaller `|det|`, and columns
/// whose orthogonalized norm is smaller than this.
pub const TO_ROTATION_MIN: f64 = 1e-10;

/// Hard cap on Jacobi sweeps.
pub const MAX_JACOBI_SWEEPS: u32 = 100;

/// Number of initial Jacobi sweeps that skip rotations of small off-diagonal
/// elements.
pub const JACOBI_THRESHOLD_SWEEPS: u32 = 6;

/// Every tolerance the engine uses, gathered for call sites that need to
/// deviate from the defaults.
///
/// `Tolerances::default()` reproduces the constants in this module.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-support", serde(default, rename_all = "kebab-case"))]
pub struct Tolerances {
    pub equality: f64,
    pub factor_pivot: f64,
    pub lu_zero_pivot: f64,
    pub symmetry: f64,
    pub rotation_det: f64,
    pub rotation_identity: f64,
    pub orthogonal_identity: f64,
    pub to_rotation_min: f64,
    pub max_jacobi_sweeps: u32,
    pub jacobi_threshold_sweeps: u32,
    /// Report an exactly-zero LU pivot as `MatrixError::Singular` instead of
    /// replacing it with `lu_zero_pivot`.
    pub strict_lu: bool,
}

impl Tolerances {
    pub const DEFAULT: Tolerances = Tolerances {
        equality: EQUALITY,
        factor_pivot: FACTOR_PIVOT,
        lu_zero_pivot: LU_ZERO_PIVOT,
        symmetry: SYMMETRY,
        rotation_det: ROTATION_DET,
        rotation_identity: ROTATION_IDENTITY,
        orthogonal_identity: ORTHOGONAL_IDENTITY,
        to_rotation_min: TO_ROTATION_MIN,
        max_jacobi_sweeps: MAX_JACOBI_SWEEPS,
        jacobi_threshold_sweeps: JACOBI_THRESHOLD_SWEEPS,
        strict_lu: false,
    };

    pub fn strict() -> Tolerances
    { Tolerances { strict_lu: true, ..Tolerances::DEFAULT } }
}

impl Default for Tolerances {
    fn default() -> Self { Tolerances::DEFAULT }
}
