/* ************************************************************************ **
** This file is part of colmat, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Thin, safe(ish) wrappers around the handful of LAPACKe and CBLAS routines
//! that `colmat` drives.
//!
//! Every buffer here is a dense **column-major** matrix whose leading
//! dimension is its row count, unless a function says otherwise.
//! Nothing in this crate knows about `colmat::Matrix`; it only deals in
//! slices, shapes and status codes.

#[macro_use] extern crate log;
extern crate lapack_src;
extern crate blas_src;
extern crate openblas_src;

#[cfg(test)]
#[macro_use]
extern crate colmat_assert_close;

const LAYOUT: ::lapacke::Layout = ::lapacke::Layout::ColumnMajor;

/// A non-zero status code from a LAPACK routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum LapackError {
    /// `info < 0`: argument number `arg` was rejected.
    #[error("argument {arg} to {routine} had an illegal value")]
    IllegalArgument { routine: &'static str, arg: i32 },
    /// `info > 0`: a numerical failure, whose meaning depends on the routine.
    /// (an exactly zero pivot for the LU routines, a rank-deficient triangular
    ///  factor for dgels, non-converging off-diagonal elements for dgelss)
    #[error("{routine} failed with info = {info}")]
    Failed { routine: &'static str, info: i32 },
}

impl LapackError {
    pub fn routine(&self) -> &'static str {
        match *self {
            LapackError::IllegalArgument { routine, .. } => routine,
            LapackError::Failed { routine, .. } => routine,
        }
    }
}

fn check(routine: &'static str, info: i32) -> Result<(), LapackError> {
    match info {
        0 => Ok(()),
        info if info < 0 => {
            error!("bad arg number {} to {}", -info, routine);
            Err(LapackError::IllegalArgument { routine, arg: -info })
        },
        info => Err(LapackError::Failed { routine, info }),
    }
}

/// Convert a dimension into the integer type used by LAPACK.
///
/// # Panics
///
/// Panics if `x` does not fit in an `i32`.
pub fn lapack_int(x: usize) -> i32 {
    assert!(
        x <= i32::max_value() as usize,
        "dimension {} is not representable as a LAPACK integer", x,
    );
    x as i32
}

/// Leading dimension of the right-hand side buffer for the least squares routines.
///
/// `dgels` and `dgelss` write an `n`-row solution into the same buffer that
/// held the `m`-row right-hand side, so it must be tall enough for both.
pub fn least_squares_ldb(m: usize, n: usize) -> usize { usize::max(m, n) }

/// Runs a routine that takes a `work`/`lwork` pair twice: first with `lwork = -1`
/// to learn the optimal workspace size, then for real with that much workspace.
fn with_queried_workspace<F>(routine: &'static str, mut call: F) -> Result<(), LapackError>
where F: FnMut(&mut [f64], i32) -> i32,
{
    let mut query = [0.0];
    check(routine, call(&mut query, -1))?;

    let lwork = usize::max(query[0] as usize, 1);
    trace!("{}: workspace query returned lwork = {}", routine, lwork);

    let mut work = vec![0.0; lwork];
    check(routine, call(&mut work, lapack_int(lwork)))
}

/// Computes `c = a * b` with CBLAS `dgemm`.
///
/// * `a` is `m x k`, `b` is `k x n`, and `c` is `m x n`.
/// * The previous contents of `c` are ignored (`beta = 0`).
///
/// # Panics
///
/// Panics if a buffer length does not match its shape.
pub fn blas_matmul(m: usize, n: usize, k: usize, a: &[f64], b: &[f64], c: &mut [f64]) {
    assert_eq!(a.len(), m * k, "expected {}x{} matrix `a`", m, k);
    assert_eq!(b.len(), k * n, "expected {}x{} matrix `b`", k, n);
    assert_eq!(c.len(), m * n, "expected {}x{} matrix `c`", m, n);
    trace!("dgemm: ({}x{}) * ({}x{})", m, k, k, n);

    let (mi, ni, ki) = (lapack_int(m), lapack_int(n), lapack_int(k));
    unsafe {
        ::cblas::dgemm(
            ::cblas::Layout::ColumnMajor,
            ::cblas::Transpose::None,
            ::cblas::Transpose::None,
            mi, ni, ki,
            1.0, a, mi,
            b, ki,
            0.0, c, mi,
        );
    }
}

/// Solves `square * x = rhs` using LAPACKe's dgesv.
///
/// * `square` is `n x n`. On return it holds the LU factors.
/// * `rhs` is `n x nrhs`. On success it is overwritten with `x`.
pub fn lapacke_linear_solve(
    n: usize,
    nrhs: usize,
    square: &mut [f64],
    rhs: &mut [f64],
) -> Result<(), LapackError> {
    assert_eq!(square.len(), n * n);
    assert_eq!(rhs.len(), n * nrhs);
    trace!("dgesv: n = {}, nrhs = {}", n, nrhs);

    let mut ipiv = vec![0; n];
    let ni = lapack_int(n);
    let info = unsafe {
        ::lapacke::dgesv(LAYOUT, ni, lapack_int(nrhs), square, ni, &mut ipiv, rhs, ni)
    };
    check("dgesv", info)
}

/// Replaces the `n x n` matrix `square` by its inverse, using dgetrf followed by dgetri.
///
/// On failure the contents of `square` are unspecified.
pub fn lapacke_inverse(n: usize, square: &mut [f64]) -> Result<(), LapackError> {
    assert_eq!(square.len(), n * n);
    trace!("dgetrf/dgetri: n = {}", n);

    let ni = lapack_int(n);
    let mut ipiv = vec![0; n];
    check("dgetrf", unsafe { ::lapacke::dgetrf(LAYOUT, ni, ni, square, ni, &mut ipiv) })?;

    with_queried_workspace("dgetri", |work, lwork| unsafe {
        ::lapacke::dgetri_work(LAYOUT, ni, square, ni, &ipiv, work, lwork)
    })
}

/// Minimizes the 2-norm of `matrix * x - rhs` using LAPACKe's dgels (QR or LQ).
///
/// * `matrix` is `m x n` and must have full rank. It is overwritten with factorization details.
/// * `rhs` is `ldb x nrhs` with `ldb = least_squares_ldb(m, n)`. Its leading `m` rows of each
///   column hold the right-hand side on input; on success the leading `n` rows of each
///   column hold the solution.
pub fn lapacke_least_squares_qr(
    m: usize,
    n: usize,
    nrhs: usize,
    matrix: &mut [f64],
    rhs: &mut [f64],
) -> Result<(), LapackError> {
    let ldb = least_squares_ldb(m, n);
    assert_eq!(matrix.len(), m * n);
    assert_eq!(rhs.len(), ldb * nrhs);
    trace!("dgels: m = {}, n = {}, nrhs = {}, ldb = {}", m, n, nrhs, ldb);

    let (mi, ni, nrhsi, ldbi) = (lapack_int(m), lapack_int(n), lapack_int(nrhs), lapack_int(ldb));
    with_queried_workspace("dgels", |work, lwork| unsafe {
        ::lapacke::dgels_work(LAYOUT, b'N', mi, ni, nrhsi, matrix, mi, rhs, ldbi, work, lwork)
    })
}

/// Diagnostics from an SVD-based least squares solve.
#[derive(Debug, Clone)]
pub struct SvdSolve {
    /// Effective rank of the matrix, given the `rcond` cutoff.
    pub rank: usize,
    /// Singular values in decreasing order.
    pub singular_values: Vec<f64>,
}

/// Minimizes the 2-norm of `matrix * x - rhs` using LAPACKe's dgelss, which also
/// minimizes the norm of `x` when `matrix` is rank-deficient.
///
/// Buffer conventions are the same as [`lapacke_least_squares_qr`].
///
/// Singular values `s[i] <= rcond * s[0]` are treated as zero. A negative `rcond`
/// means machine precision.
pub fn lapacke_least_squares_svd(
    m: usize,
    n: usize,
    nrhs: usize,
    matrix: &mut [f64],
    rhs: &mut [f64],
    rcond: f64,
) -> Result<SvdSolve, LapackError> {
    let ldb = least_squares_ldb(m, n);
    assert_eq!(matrix.len(), m * n);
    assert_eq!(rhs.len(), ldb * nrhs);
    trace!("dgelss: m = {}, n = {}, nrhs = {}, ldb = {}, rcond = {}", m, n, nrhs, ldb, rcond);

    let (mi, ni, nrhsi, ldbi) = (lapack_int(m), lapack_int(n), lapack_int(nrhs), lapack_int(ldb));
    let mut s = vec![0f64; usize::min(m, n)];
    let mut rank = 0;
    with_queried_workspace("dgelss", |work, lwork| unsafe {
        ::lapacke::dgelss_work(
            LAYOUT, mi, ni, nrhsi, matrix, mi, rhs, ldbi, &mut s, rcond, &mut rank, work, lwork,
        )
    })?;

    Ok(SvdSolve { rank: rank as usize, singular_values: s })
}
