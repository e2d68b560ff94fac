//! # Error reporting
//!
//! A collection of enums describing the problems that can be detected at the entry points of the
//! matrix operations and solvers.
//!
//! Only argument problems are reported here. Violating a numerical precondition, such as passing a
//! matrix with a zero diagonal to a triangular solve, is not detected and results in infinite or
//! NaN values instead.
use std::error::Error;
use std::fmt;
use std::fmt::Display;

/// A `MatrixError` is returned when an operation can not be performed with the arguments provided.
///
/// It is the highest error in the hierarchy. Nothing is written to output arguments when it is
/// returned.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum MatrixError {
    /// The shapes of the operands are incompatible with the operation.
    DimensionMismatch {
        /// Name of the operation that was attempted.
        operation: &'static str,
        /// Human readable description of the shapes involved.
        description: String,
    },
    /// A matrix of this many rows and columns can't be addressed with `usize` indices.
    SizeLimit {
        /// Number of rows requested.
        nr_rows: usize,
        /// Number of columns requested.
        nr_columns: usize,
    },
    /// An argument other than a matrix shape is unusable, for example a slice that is too short.
    ///
    /// The contained `String` is a message for the end user.
    InvalidArgument(String),
    /// The internal structure of a sparse matrix is inconsistent.
    Structure(StructureError),
}

impl MatrixError {
    /// Create a new `DimensionMismatch` error.
    ///
    /// # Arguments
    ///
    /// * `operation`: Name of the operation that was attempted.
    /// * `description`: What shapes were provided.
    pub fn dimensions(operation: &'static str, description: impl Into<String>) -> Self {
        MatrixError::DimensionMismatch { operation, description: description.into() }
    }

    /// Create a new `InvalidArgument` error.
    pub fn argument(description: impl Into<String>) -> Self {
        MatrixError::InvalidArgument(description.into())
    }
}

impl Display for MatrixError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MatrixError::DimensionMismatch { operation, description } => {
                write!(f, "DimensionMismatch in {}: {}", operation, description)
            },
            MatrixError::SizeLimit { nr_rows, nr_columns } => {
                write!(f, "SizeLimit: a {} x {} matrix can't be indexed", nr_rows, nr_columns)
            },
            MatrixError::InvalidArgument(description) => write!(f, "InvalidArgument: {}", description),
            MatrixError::Structure(error) => error.fmt(f),
        }
    }
}

impl Error for MatrixError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MatrixError::Structure(error) => Some(error),
            _ => None,
        }
    }
}

impl From<StructureError> for MatrixError {
    fn from(error: StructureError) -> Self {
        MatrixError::Structure(error)
    }
}

/// A `StructureError` describes the first inconsistency found while validating a sparse matrix.
///
/// These are never produced during normal operation; validation is an explicit call.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum StructureError {
    /// The column pointer array does not have `nr_columns + 1` elements.
    ColumnPointerLength {
        /// Number of elements present.
        found: usize,
    },
    /// The first column pointer is not zero.
    ColumnPointerStart,
    /// The last column pointer is not equal to the number of stored values.
    ColumnPointerEnd {
        /// Value of the last column pointer.
        found: usize,
        /// Number of stored values.
        nz_length: usize,
    },
    /// A column ends before it starts.
    DecreasingColumnPointer {
        /// Index of the column.
        column: usize,
    },
    /// A column stores more values than there are rows.
    ColumnTooLong {
        /// Index of the column.
        column: usize,
    },
    /// A stored row index is not smaller than the number of rows.
    RowOutOfBounds {
        /// Index of the column.
        column: usize,
        /// The offending row index.
        row: usize,
    },
    /// Row indices are flagged as sorted but a column is not in increasing order.
    UnsortedIndices {
        /// Index of the column.
        column: usize,
    },
    /// A row index appears more than once in a column.
    DuplicateEntry {
        /// Index of the column.
        column: usize,
        /// The duplicated row index.
        row: usize,
    },
}

impl Display for StructureError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("StructureError: ")?;
        match self {
            StructureError::ColumnPointerLength { found } => {
                write!(f, "column pointer array has {} elements", found)
            },
            StructureError::ColumnPointerStart => f.write_str("first column pointer is not zero"),
            StructureError::ColumnPointerEnd { found, nz_length } => {
                write!(f, "last column pointer is {} while {} values are stored", found, nz_length)
            },
            StructureError::DecreasingColumnPointer { column } => {
                write!(f, "column {} ends before it starts", column)
            },
            StructureError::ColumnTooLong { column } => {
                write!(f, "column {} has more values than there are rows", column)
            },
            StructureError::RowOutOfBounds { column, row } => {
                write!(f, "row index {} in column {} is out of bounds", row, column)
            },
            StructureError::UnsortedIndices { column } => {
                write!(f, "column {} is not sorted while indices are flagged as sorted", column)
            },
            StructureError::DuplicateEntry { column, row } => {
                write!(f, "row index {} appears more than once in column {}", row, column)
            },
        }
    }
}

impl Error for StructureError {}
