//! Matrix product, linear solves, inverse and pseudoinverse.
//!
//! Everything here hands a private copy of the inputs to `colmat-linalg`,
//! since the LAPACK routines destroy their arguments.

use crate::{Error, Matrix, Result, DEFAULT_RCOND};
use ::colmat_linalg::{self as linalg, least_squares_ldb};

/// Copies an `rows x columns` column-major buffer into one with leading dimension `ld >= rows`.
/// The extra rows are zero.
fn with_leading_dimension(data: &[f64], rows: usize, columns: usize, ld: usize) -> Vec<f64> {
    debug_assert!(ld >= rows);
    debug_assert_eq!(data.len(), rows * columns);

    let mut out = vec![0.0; ld * columns];
    for (dest, src) in out.chunks_mut(ld).zip(data.chunks(rows)) {
        dest[..rows].copy_from_slice(src);
    }
    out
}

/// Shrinks a column-major buffer with leading dimension `ld` in place, keeping only the
/// leading `rows` entries of each of its `columns` columns.
///
/// The least squares routines leave an `n`-row solution at the top of each column of an
/// `ld`-row buffer. When `ld > n`, the trailing entries of each column hold residual
/// information and are discarded here.
fn compact_leading_rows(buf: &mut Vec<f64>, ld: usize, rows: usize, columns: usize) {
    debug_assert!(rows <= ld);
    debug_assert_eq!(buf.len(), ld * columns);

    if rows < ld {
        // column 0 is already in place; each later column moves towards the front,
        // never past data that has yet to be read.
        for c in 1..columns {
            buf.copy_within(c * ld..c * ld + rows, c * rows);
        }
    }
    buf.truncate(rows * columns);
}

impl Matrix {
    /// Matrix product `A * B`.
    pub fn mtimes(a: &Matrix, b: &Matrix) -> Result<Matrix> {
        if a.columns != b.rows {
            return Err(Error::ShapeMismatch {
                op: "mtimes",
                requirement: "columns of A must match rows of B",
                left: a.shape(),
                right: Some(b.shape()),
            });
        }

        let mut data = vec![0.0; a.rows * b.columns];
        linalg::blas_matmul(a.rows, b.columns, a.columns, &a.data, &b.data, &mut data);
        Ok(Matrix::from_parts(a.rows, b.columns, data))
    }

    /// Solves `A * X = B` for `X`.
    ///
    /// Square `A` is solved by LU decomposition. For any other shape, this finds the
    /// least squares solution when `A` is tall, and the minimum norm solution when `A`
    /// is wide; `A` must have full rank in either case.
    ///
    /// The result is `A.columns x B.columns`.
    pub fn mldivide(a: &Matrix, b: &Matrix) -> Result<Matrix> {
        if a.rows != b.rows {
            return Err(Error::ShapeMismatch {
                op: "mldivide",
                requirement: "A and B must have the same number of rows",
                left: a.shape(),
                right: Some(b.shape()),
            });
        }

        let (m, n, nrhs) = (a.rows, a.columns, b.columns);
        let mut factors = a.data.clone();

        if a.is_square() {
            debug!("mldivide: LU solve of {}x{} system with {} right-hand sides", m, n, nrhs);
            let mut x = b.data.clone();
            linalg::lapacke_linear_solve(n, nrhs, &mut factors, &mut x)
                .map_err(Error::SingularSystem)?;
            Ok(Matrix::from_parts(n, nrhs, x))
        } else {
            debug!("mldivide: least squares solve of {}x{} system with {} right-hand sides", m, n, nrhs);
            let ldb = least_squares_ldb(m, n);
            let mut x = with_leading_dimension(&b.data, m, nrhs, ldb);
            linalg::lapacke_least_squares_qr(m, n, nrhs, &mut factors, &mut x)
                .map_err(Error::SolveFailure)?;

            compact_leading_rows(&mut x, ldb, n, nrhs);
            Ok(Matrix::from_parts(n, nrhs, x))
        }
    }

    /// Inverse of a square matrix.
    ///
    /// Fails with [`Error::SingularMatrix`] rather than falling back to [`Matrix::pinv`].
    pub fn inv(x: &Matrix) -> Result<Matrix> {
        if !x.is_square() {
            return Err(Error::ShapeMismatch {
                op: "inv",
                requirement: "matrix must be square",
                left: x.shape(),
                right: None,
            });
        }

        let mut y = x.data.clone();
        linalg::lapacke_inverse(x.rows, &mut y).map_err(Error::SingularMatrix)?;
        Ok(Matrix::from_parts(x.rows, x.columns, y))
    }

    /// Moore-Penrose pseudoinverse, with the singular value cutoff chosen by LAPACK.
    pub fn pinv(x: &Matrix) -> Result<Matrix> { Matrix::pinv_with_rcond(x, DEFAULT_RCOND) }

    /// Moore-Penrose pseudoinverse.
    ///
    /// Singular values `s[i] <= rcond * s[0]` are treated as zero; a negative `rcond`
    /// means machine precision. The result is `x.columns x x.rows`.
    pub fn pinv_with_rcond(x: &Matrix, rcond: f64) -> Result<Matrix> {
        // Solve `X * W = I_m` in the minimum-norm least squares sense.
        let (m, n) = x.shape();
        let ldb = least_squares_ldb(m, n);

        // I_m, with extra zero rows at the bottom when n > m.
        // (equivalently, the first m columns of I_ldb)
        let mut w = vec![0.0; ldb * m];
        for i in 0..m {
            w[i + i * ldb] = 1.0;
        }

        let mut factors = x.data.clone();
        let svd = linalg::lapacke_least_squares_svd(m, n, m, &mut factors, &mut w, rcond)
            .map_err(Error::PseudoinverseFailure)?;

        debug!("pinv: {}x{} matrix has effective rank {}", m, n, svd.rank);
        if svd.rank < usize::min(m, n) {
            warn!(
                "pinv: {}x{} matrix is rank deficient (rank {}, singular values {:?})",
                m, n, svd.rank, svd.singular_values,
            );
        }

        compact_leading_rows(&mut w, ldb, n, m);
        Ok(Matrix::from_parts(n, m, w))
    }
}
