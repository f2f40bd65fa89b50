/* ************************************************************************ **
** This file is part of geomx, and is licensed under EITHER the MIT license **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

// Algorithms on square matrices of floats.
//
// Each lives in an `impl<T: Field> Matrix<T>` block in its own module.

pub(crate) mod factor;
pub(crate) mod lu;
pub(crate) mod gauss_jordan;
pub(crate) mod eigen;
pub(crate) mod faddeev;
pub(crate) mod rotation;
