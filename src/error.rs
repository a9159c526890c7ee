use std::error::Error;
use std::fmt;

/// Failure of a single transpose call. None of these are recoverable; the
/// call that produced one has done no further work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransposeError {
    /// A row that the table declares is absent. Raised when the row is
    /// first consumed.
    NullInput { row: usize },
    /// Under `ErrorOnMissing`, `row` ran out at output column `column` while
    /// at least one other row still had an element there.
    InconsistentRowLength { column: usize, row: usize },
    /// Row `row` holds `len` elements where `expected` were required.
    NonRectangularShape { row: usize, len: usize, expected: usize },
}

impl fmt::Display for TransposeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TransposeError::NullInput { row } => write!(f, "Row {} is absent", row),
            TransposeError::InconsistentRowLength { column, row } => write!(
                f,
                "All rows must have the same length: row {} ended before column {}",
                row, column
            ),
            TransposeError::NonRectangularShape { row, len, expected } => write!(
                f,
                "Row {} has {} elements but {} are required",
                row, len, expected
            ),
        }
    }
}

impl Error for TransposeError {}
