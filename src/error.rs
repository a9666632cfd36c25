//! Database error types.

use thiserror::Error;

/// Errors raised by table and database operations.
///
/// All of them are caller-input errors detected before any row is touched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DbError {
    /// A condition, projection or assignment names a column the table does not have.
    #[error("Column '{column}' not found in table '{table}'")]
    UnknownColumn { table: String, column: String },

    /// Insert received a different number of values than the table has columns.
    #[error("Row for table '{table}' has {got} values, expected {expected}")]
    ArityMismatch {
        table: String,
        expected: usize,
        got: usize,
    },

    /// Comparison operator other than `=` or `!=`.
    #[error("Unsupported comparison operator '{0}'")]
    UnsupportedOperator(String),

    /// The same column name was declared twice.
    #[error("Column '{column}' declared more than once in table '{table}'")]
    DuplicateColumn { table: String, column: String },

    #[error("Table '{0}' already exists")]
    TableAlreadyExists(String),

    #[error("Table '{0}' not found")]
    TableNotFound(String),
}

pub type Result<T> = std::result::Result<T, DbError>;
