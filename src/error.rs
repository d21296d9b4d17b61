use thiserror::Error;

/// Errors raised by column, index and symbol operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Column size mismatch: {left} != {right}")]
    SizeMismatch { left: usize, right: usize },

    #[error("Index out of bounds: index {index}, size {size}")]
    IndexOutOfBounds { index: usize, size: usize },

    #[error("Symbol code range exhausted for namespace {namespace}: at most {limit} categories")]
    CodeRangeOverflow { namespace: String, limit: usize },

    #[error("Row id type cannot address {rows} rows (limit {limit})")]
    RowIdOverflow { rows: usize, limit: usize },

    #[error("Inconsistent row count: expected {expected}, found {found}")]
    InconsistentRowCount { expected: usize, found: usize },

    #[error("Duplicate column name: {0}")]
    DuplicateColumnName(String),

    #[error("Column type mismatch: column {name}, expected {expected}, found {found}")]
    ColumnTypeMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Expected one entry per column ({expected}), got {found}")]
    ArityMismatch { expected: usize, found: usize },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
