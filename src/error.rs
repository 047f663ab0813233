use alloc::string::String;
use core::fmt;

/// Errors reported by matrix, vector, and decomposition operations.
///
/// Vectors are column vectors: an out-of-range vector index `i` is reported
/// as `index: (i, 0)` against `shape: (len, 1)`.
///
/// ```
/// use matrixx::{Error, MatrixXd};
///
/// let m = MatrixXd::zeros(2, 3);
/// assert_eq!(
///     m.get(2, 0).unwrap_err(),
///     Error::IndexOutOfRange { index: (2, 0), shape: (2, 3) },
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Index outside the valid bounds for an element, row, or column access.
    IndexOutOfRange {
        index: (usize, usize),
        shape: (usize, usize),
    },
    /// Operand shapes or lengths are incompatible.
    DimensionMismatch {
        /// Expected `(rows, cols)`.
        expected: (usize, usize),
        /// Got `(rows, cols)`.
        got: (usize, usize),
    },
    /// The decomposition did not converge, or the input held NaN/inf.
    NumericalFailure,
    /// `solve` needs both U and V, but the factorization skipped one of them.
    MissingSingularVectors,
    /// Thin and full singular vectors were both requested for the same side.
    InvalidMode,
    /// Encoding or decoding of the persisted form failed.
    Serialization(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::IndexOutOfRange { index, shape } => write!(
                f,
                "index ({}, {}) out of range for {}x{} shape",
                index.0, index.1, shape.0, shape.1
            ),
            Error::DimensionMismatch { expected, got } => write!(
                f,
                "dimension mismatch: expected {}x{}, got {}x{}",
                expected.0, expected.1, got.0, got.1
            ),
            Error::NumericalFailure => write!(f, "decomposition did not converge"),
            Error::MissingSingularVectors => {
                write!(f, "solve requires both U and V singular vectors")
            }
            Error::InvalidMode => {
                write!(f, "thin and full singular vectors requested for the same side")
            }
            Error::Serialization(msg) => write!(f, "serialization failed: {}", msg),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result type alias using the crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn display() {
        let e = Error::DimensionMismatch {
            expected: (3, 1),
            got: (2, 1),
        };
        assert_eq!(e.to_string(), "dimension mismatch: expected 3x1, got 2x1");

        let e = Error::IndexOutOfRange {
            index: (4, 0),
            shape: (4, 1),
        };
        assert_eq!(e.to_string(), "index (4, 0) out of range for 4x1 shape");

        assert_eq!(
            Error::NumericalFailure.to_string(),
            "decomposition did not converge"
        );
    }
}
