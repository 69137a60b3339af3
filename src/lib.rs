/* ************************************************************************ **
** This file is part of colmat, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Dense `f64` matrices with column-major storage.
//!
//! ```text
//!         0  1  2  3  4
//!       --             --
//!     0 | *  *  *  *  * |
//!     1 | *  *  *  *  * |      3x5: 3 rows and 5 columns
//!     2 | *  *  *  *  * |
//!       --             --
//! ```
//!
//! Element `(r, c)` of an `R x C` matrix is stored at offset `r + c * R`.
//!
//! All of the linear algebra is delegated to LAPACKe and CBLAS through
//! `colmat-linalg`. The named associated functions of [`Matrix`] (`plus`,
//! `mtimes`, `mldivide`, `pinv`, ...) are the fallible API; the arithmetic
//! operators are sugar over them that panic on bad shapes.

#[macro_use] extern crate log;
#[cfg_attr(test, macro_use)]
extern crate colmat_assert_close;

pub use crate::error::{Error, Result};
mod error;

pub use crate::matrix::Matrix;
#[macro_use]
mod matrix;

mod arith;
mod solve;
mod ops;
mod display;

pub use colmat_linalg::LapackError;

/// Tolerance used by `==` and `!=` on matrices.
pub const DEFAULT_EPSILON: f64 = 1e-12;

/// Singular value cutoff used by [`Matrix::pinv`]. Negative means machine precision.
pub const DEFAULT_RCOND: f64 = -1.0;
