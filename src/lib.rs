/* ************************************************************************ **
** This file is part of geomx, and is licensed under EITHER the MIT license **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Dense matrix engine for coordinate-frame rotations, instrument
//! calibration, and covariance analysis.
//!
//! The numerics live in `geomx-linalg` and are re-exported here. This crate
//! adds what an application embedding the engine needs around it: a global
//! logger and a YAML configuration file carrying the numerical tolerances.

#[macro_use] extern crate failure;
#[macro_use] extern crate log;
#[macro_use] extern crate serde;

pub use geomx_linalg::*;

pub mod logging;
pub mod config;

pub type FailResult<T> = std::result::Result<T, failure::Error>;
