use colmat_linalg::LapackError;

pub type Result<T> = ::std::result::Result<T, Error>;

type Shape = (usize, usize);

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid matrix dimensions {rows}x{columns}: {reason}")]
    InvalidDimension { rows: usize, columns: usize, reason: &'static str },

    #[error("index ({row}, {column}) is out of bounds for a {rows}x{columns} matrix")]
    OutOfBounds { row: usize, column: usize, rows: usize, columns: usize },

    /// `right` is `None` for unary operations.
    #[error("{op}: {requirement} (got {})", display_shapes(.left, .right))]
    ShapeMismatch {
        op: &'static str,
        requirement: &'static str,
        left: Shape,
        right: Option<Shape>,
    },

    #[error("mldivide: system is singular")]
    SingularSystem(#[source] LapackError),

    #[error("inv: matrix is singular")]
    SingularMatrix(#[source] LapackError),

    #[error("mldivide: least squares solve failed")]
    SolveFailure(#[source] LapackError),

    #[error("pinv: SVD least squares solve failed")]
    PseudoinverseFailure(#[source] LapackError),
}

fn display_shapes(left: &Shape, right: &Option<Shape>) -> String {
    match right {
        Some(right) => format!("{}x{} and {}x{}", left.0, left.1, right.0, right.1),
        None => format!("{}x{}", left.0, left.1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let e = Error::ShapeMismatch {
            op: "plus",
            requirement: "operands must have the same shape",
            left: (2, 3),
            right: Some((3, 2)),
        };
        assert_eq!(e.to_string(), "plus: operands must have the same shape (got 2x3 and 3x2)");

        let e = Error::ShapeMismatch {
            op: "inv",
            requirement: "matrix must be square",
            left: (2, 3),
            right: None,
        };
        assert_eq!(e.to_string(), "inv: matrix must be square (got 2x3)");
    }

    #[test]
    fn lapack_status_is_the_source() {
        use std::error::Error as _;

        let e = Error::SingularMatrix(LapackError::Failed { routine: "dgetrf", info: 2 });
        let source = e.source().expect("no source");
        assert_eq!(source.to_string(), "dgetrf failed with info = 2");
    }

    #[test]
    fn numerical_failures_keep_their_status() {
        use std::error::Error as _;

        let status = LapackError::Failed { routine: "dgelss", info: 3 };
        let e = Error::PseudoinverseFailure(status);
        assert_eq!(e.to_string(), "pinv: SVD least squares solve failed");
        assert_eq!(e.source().expect("no source").to_string(), "dgelss failed with info = 3");

        let e = Error::PseudoinverseFailure(LapackError::IllegalArgument { routine: "dgelss", arg: 7 });
        assert_eq!(e.source().expect("no source").to_string(), "argument 7 to dgelss had an illegal value");

        let e = Error::SolveFailure(LapackError::Failed { routine: "dgels", info: 2 });
        assert_eq!(e.to_string(), "mldivide: least squares solve failed");
        assert_eq!(e.source().expect("no source").to_string(), "dgels failed with info = 2");
    }
}
