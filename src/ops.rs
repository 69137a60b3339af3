//! Operator sugar. These panic where the named functions would return an error.

use crate::Matrix;
use ::std::ops::{Add, Mul, Sub};

fn unwrap_or_panic(result: crate::Result<Matrix>) -> Matrix {
    result.unwrap_or_else(|e| panic!("{}", e))
}

// Implements `Trait<Matrix>` for every combination of owned and borrowed operands.
macro_rules! impl_binary_ops {
    ($($Trait:ident::$method:ident => $func:path;)*) => {$(
        impl<'a, 'b> $Trait<&'b Matrix> for &'a Matrix {
            type Output = Matrix;

            fn $method(self, rhs: &'b Matrix) -> Matrix { unwrap_or_panic($func(self, rhs)) }
        }

        impl<'b> $Trait<&'b Matrix> for Matrix {
            type Output = Matrix;

            fn $method(self, rhs: &'b Matrix) -> Matrix { $Trait::$method(&self, rhs) }
        }

        impl<'a> $Trait<Matrix> for &'a Matrix {
            type Output = Matrix;

            fn $method(self, rhs: Matrix) -> Matrix { $Trait::$method(self, &rhs) }
        }

        impl $Trait<Matrix> for Matrix {
            type Output = Matrix;

            fn $method(self, rhs: Matrix) -> Matrix { $Trait::$method(&self, &rhs) }
        }
    )*};
}

// Scalar on the left only, matching the argument order of the named functions.
macro_rules! impl_scalar_ops {
    ($($Trait:ident::$method:ident => $func:path;)*) => {$(
        impl<'a> $Trait<&'a Matrix> for f64 {
            type Output = Matrix;

            fn $method(self, rhs: &'a Matrix) -> Matrix { $func(self, rhs) }
        }

        impl $Trait<Matrix> for f64 {
            type Output = Matrix;

            fn $method(self, rhs: Matrix) -> Matrix { $func(self, &rhs) }
        }
    )*};
}

impl_binary_ops! {
    Add::add => Matrix::plus;
    Sub::sub => Matrix::minus;
    Mul::mul => Matrix::mtimes;
}

impl_scalar_ops! {
    Add::add => Matrix::plus_scalar;
    Sub::sub => Matrix::minus_scalar;
    Mul::mul => Matrix::times_scalar;
}
