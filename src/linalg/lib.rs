/* ************************************************************************ **
** This file is part of geomx, and is licensed under EITHER the MIT license **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Dense matrix engine for geometric transforms and instrument calibration.
//!
//! Small to moderate matrices only (a few hundred rows at most); there is no
//! blocking, sparsity, or parallelism here. Each `Matrix` owns its buffer, so
//! distinct matrices may be used from different threads freely.
//!
//! Algorithms that overwrite their receiver (`factor`, `gauss_jordan`,
//! `to_rotation`, ...) leave it in an unspecified state when they fail.

#[macro_use] extern crate failure;
#[macro_use] extern crate log;
#[cfg(feature = "serde-support")]
#[macro_use] extern crate serde;
#[cfg_attr(test, macro_use)]
extern crate geomx_assert_close;

// FIXME copied from failure 1.0 prerelease; remove once actually released
macro_rules! throw {
    ($e:expr) => {
        return Err(::std::convert::Into::into($e));
    }
}

pub mod tol;
pub mod scalar;
mod errors;
mod matrix;
mod algo;

pub use crate::errors::{MatrixError, Dims, Result};
pub use crate::matrix::Matrix;
pub use crate::scalar::{Semiring, Ring, Field};
pub use crate::tol::Tolerances;
pub use crate::algo::lu::{LuDecomposition, LuPivots};
pub use crate::algo::eigen::EigenSystem;
pub use crate::algo::faddeev::Faddeev;
