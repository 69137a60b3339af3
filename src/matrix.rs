use crate::{Error, Result, DEFAULT_EPSILON};
use ::colmat_assert_close::{CheckClose, CheckCloseError, Tolerances};
use ::std::ops::{Index, IndexMut};

/// Owned dense matrix of `f64`, stored column by column.
///
/// Both dimensions are always at least 1. `Clone` is a deep copy, so two
/// live matrices never share storage.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-support", serde(try_from = "RawMatrix"))]
pub struct Matrix {
    // invariant: rows > 0 && columns > 0
    pub(crate) rows: usize,
    pub(crate) columns: usize,
    // column-major.
    // invariant: data.len() == rows * columns
    pub(crate) data: Vec<f64>,
}

/// Builds a [`Matrix`] from row literals, e.g. `matrix![[1.0, 2.0], [3.0, 4.0]]`.
///
/// Evaluates to a `Result<Matrix>`, since rows of differing length are an error.
#[macro_export]
macro_rules! matrix {
    ($([$($x:expr),* $(,)*]),+ $(,)*) => {
        $crate::Matrix::from_rows(&[$(&[$($x as f64),*][..]),+][..])
    };
}

/// Returns the number of elements.
fn check_dims(rows: usize, columns: usize) -> Result<usize> {
    if rows == 0 || columns == 0 {
        return Err(Error::InvalidDimension { rows, columns, reason: "dimensions must be nonzero" });
    }
    rows.checked_mul(columns)
        .ok_or(Error::InvalidDimension { rows, columns, reason: "too many elements" })
}

impl Matrix {
    /// Matrix of zeros.
    pub fn zeros(rows: usize, columns: usize) -> Result<Matrix> {
        let len = check_dims(rows, columns)?;
        Ok(Matrix { data: vec![0.0; len], rows, columns })
    }

    /// Square matrix of zeros.
    pub fn square(n: usize) -> Result<Matrix> { Matrix::zeros(n, n) }

    pub fn identity(n: usize) -> Result<Matrix> {
        let mut out = Matrix::square(n)?;
        for i in 0..n {
            out.data[i + i * n] = 1.0;
        }
        Ok(out)
    }

    /// Takes ownership of data that is already in column-major order.
    pub fn from_column_major_data((rows, columns): (usize, usize), data: Vec<f64>) -> Result<Matrix> {
        if data.len() != check_dims(rows, columns)? {
            return Err(Error::InvalidDimension { rows, columns, reason: "data length does not match shape" });
        }
        Ok(Matrix { data, rows, columns })
    }

    /// Builds a matrix from a list of rows.
    ///
    /// Every row must have the same, nonzero length.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Matrix> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().len());
        let len = check_dims(height, width)?;

        if rows.iter().any(|row| row.as_ref().len() != width) {
            return Err(Error::InvalidDimension {
                rows: height,
                columns: width,
                reason: "rows have differing lengths",
            });
        }

        let mut data = Vec::with_capacity(len);
        for c in 0..width {
            data.extend(rows.iter().map(|row| row.as_ref()[c]));
        }
        Ok(Matrix { data, rows: height, columns: width })
    }

    /// For results produced inside the crate, whose shapes are already known to be valid.
    pub(crate) fn from_parts(rows: usize, columns: usize, data: Vec<f64>) -> Matrix {
        debug_assert!(rows > 0 && columns > 0);
        debug_assert_eq!(data.len(), rows * columns);
        Matrix { data, rows, columns }
    }
}

impl Default for Matrix {
    /// A 1x1 zero matrix.
    fn default() -> Matrix { Matrix { data: vec![0.0], rows: 1, columns: 1 } }
}

impl Matrix {
    pub fn rows(&self) -> usize { self.rows }
    pub fn columns(&self) -> usize { self.columns }
    pub fn shape(&self) -> (usize, usize) { (self.rows, self.columns) }
    pub fn is_square(&self) -> bool { self.rows == self.columns }
    pub fn column_major_data(&self) -> &[f64] { &self.data }
    pub fn into_column_major_data(self) -> Vec<f64> { self.data }

    fn offset(&self, row: usize, column: usize) -> Result<usize> {
        if row >= self.rows || column >= self.columns {
            return Err(Error::OutOfBounds { row, column, rows: self.rows, columns: self.columns });
        }
        Ok(row + column * self.rows)
    }

    pub fn at(&self, row: usize, column: usize) -> Result<&f64> {
        let i = self.offset(row, column)?;
        Ok(&self.data[i])
    }

    pub fn at_mut(&mut self, row: usize, column: usize) -> Result<&mut f64> {
        let i = self.offset(row, column)?;
        Ok(&mut self.data[i])
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (row, column): (usize, usize)) -> &f64 {
        self.at(row, column).unwrap_or_else(|e| panic!("{}", e))
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (row, column): (usize, usize)) -> &mut f64 {
        self.at_mut(row, column).unwrap_or_else(|e| panic!("{}", e))
    }
}

impl Matrix {
    /// Shapes are equal and every pair of elements differs by less than `epsilon`.
    ///
    /// NaN is never equal to anything.
    pub fn equal(a: &Matrix, b: &Matrix, epsilon: f64) -> bool {
        a.shape() == b.shape()
            && a.data.iter().zip(&b.data).all(|(x, y)| (x - y).abs() < epsilon)
    }
}

impl PartialEq for Matrix {
    fn eq(&self, other: &Matrix) -> bool { Matrix::equal(self, other, DEFAULT_EPSILON) }
}

impl CheckClose for Matrix {
    fn check_close(&self, other: &Matrix, tol: Tolerances) -> ::std::result::Result<(), CheckCloseError> {
        if self.shape() != other.shape() {
            return Err(CheckCloseError::Shape(self.shape(), other.shape()));
        }
        self.data.check_close(&other.data, tol)
    }
}

#[cfg(feature = "serde-support")]
#[derive(serde::Deserialize)]
struct RawMatrix {
    rows: usize,
    columns: usize,
    data: Vec<f64>,
}

#[cfg(feature = "serde-support")]
impl ::std::convert::TryFrom<RawMatrix> for Matrix {
    type Error = Error;

    fn try_from(raw: RawMatrix) -> Result<Matrix> {
        Matrix::from_column_major_data((raw.rows, raw.columns), raw.data)
    }
}
