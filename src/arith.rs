//! Elementwise arithmetic and transposition.

use crate::{Error, Matrix, Result};
use ::itertools::zip_eq;

fn check_same_shape(op: &'static str, a: &Matrix, b: &Matrix) -> Result<()> {
    match a.shape() == b.shape() {
        true => Ok(()),
        false => Err(Error::ShapeMismatch {
            op,
            requirement: "operands must have the same shape",
            left: a.shape(),
            right: Some(b.shape()),
        }),
    }
}

fn zip_map<F>(op: &'static str, a: &Matrix, b: &Matrix, f: F) -> Result<Matrix>
where F: Fn(f64, f64) -> f64,
{
    check_same_shape(op, a, b)?;
    let data = zip_eq(&a.data, &b.data).map(|(&x, &y)| f(x, y)).collect();
    Ok(Matrix::from_parts(a.rows, a.columns, data))
}

fn map<F>(x: &Matrix, f: F) -> Matrix
where F: Fn(f64) -> f64,
{ Matrix::from_parts(x.rows, x.columns, x.data.iter().map(|&v| f(v)).collect()) }

impl Matrix {
    /// `A + B`, elementwise.
    pub fn plus(a: &Matrix, b: &Matrix) -> Result<Matrix> { zip_map("plus", a, b, |x, y| x + y) }

    /// `A - B`, elementwise.
    pub fn minus(a: &Matrix, b: &Matrix) -> Result<Matrix> { zip_map("minus", a, b, |x, y| x - y) }

    /// Hadamard product.
    pub fn times(a: &Matrix, b: &Matrix) -> Result<Matrix> { zip_map("times", a, b, |x, y| x * y) }

    /// Adds `n` to every element.
    pub fn plus_scalar(n: f64, x: &Matrix) -> Matrix { map(x, |v| n + v) }

    /// Computes `n - x` for every element `x`. (not `x - n`!)
    pub fn minus_scalar(n: f64, x: &Matrix) -> Matrix { map(x, |v| n - v) }

    /// Scales every element by `n`.
    pub fn times_scalar(n: f64, x: &Matrix) -> Matrix { map(x, |v| n * v) }

    pub fn transpose(x: &Matrix) -> Matrix {
        let (m, n) = x.shape();

        // NOTE: the output has leading dimension n, not m.
        let mut data = Vec::with_capacity(m * n);
        for r in 0..m {
            for c in 0..n {
                data.push(x.data[r + c * m]);
            }
        }
        Matrix::from_parts(n, m, data)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Error, Matrix};

    fn sample() -> Matrix { matrix![[1.0, -2.0, 3.0], [4.0, 5.5, -6.0]].unwrap() }

    #[test]
    fn elementwise() {
        let a = sample();
        let b = matrix![[1, 1, 1], [2, 2, 2]].unwrap();
        assert_eq!(Matrix::plus(&a, &b).unwrap(), matrix![[2.0, -1.0, 4.0], [6.0, 7.5, -4.0]].unwrap());
        assert_eq!(Matrix::minus(&a, &b).unwrap(), matrix![[0.0, -3.0, 2.0], [2.0, 3.5, -8.0]].unwrap());
        assert_eq!(Matrix::times(&a, &b).unwrap(), matrix![[1.0, -2.0, 3.0], [8.0, 11.0, -12.0]].unwrap());
    }

    #[test]
    fn shape_mismatch() {
        let a = sample();
        let b = Matrix::transpose(&a);
        let ops: [(&str, fn(&Matrix, &Matrix) -> crate::Result<Matrix>); 3] = [
            ("plus", Matrix::plus),
            ("minus", Matrix::minus),
            ("times", Matrix::times),
        ];
        for &(op, f) in &ops {
            match f(&a, &b) {
                Err(Error::ShapeMismatch { op: got, left: (2, 3), right: Some((3, 2)), .. }) => assert_eq!(got, op),
                r => panic!("{}: {:?}", op, r),
            }
        }
    }

    #[test]
    fn scalar() {
        let a = sample();
        assert_eq!(Matrix::plus_scalar(1.0, &a), matrix![[2.0, -1.0, 4.0], [5.0, 6.5, -5.0]].unwrap());
        assert_eq!(Matrix::minus_scalar(1.0, &a), matrix![[0.0, 3.0, -2.0], [-3.0, -4.5, 7.0]].unwrap());
        assert_eq!(Matrix::times_scalar(-2.0, &a), matrix![[-2.0, 4.0, -6.0], [-8.0, -11.0, 12.0]].unwrap());
    }

    #[test]
    fn transpose() {
        let a = sample();
        let t = Matrix::transpose(&a);
        assert_eq!(t.shape(), (3, 2));
        for i in 0..2 {
            for j in 0..3 {
                assert_eq!(t[(j, i)], a[(i, j)]);
            }
        }
        assert_eq!(Matrix::transpose(&t), a);

        let row = matrix![[1, 2, 3, 4]].unwrap();
        assert_eq!(Matrix::transpose(&row).column_major_data(), row.column_major_data());
        assert_eq!(Matrix::transpose(&row).shape(), (4, 1));
    }
}
