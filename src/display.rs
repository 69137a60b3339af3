use crate::Matrix;
use ::std::fmt;

/// Fixed-width grid with three decimals and explicit signs, then a `(RxC)` footer.
///
/// ```text
///    +1.000    -2.000
///    +0.500    +4.000
/// (2x2)
/// ```
impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for r in 0..self.rows {
            for c in 0..self.columns {
                write!(f, "{:>+9.3} ", self.data[r + c * self.rows])?;
            }
            writeln!(f)?;
        }
        write!(f, "({}x{})", self.rows, self.columns)
    }
}
