//! Error types for the transaction data model.

use thiserror::Error;

/// Errors raised by the data model and its builders.
///
/// Type mismatches and builder misconfiguration are programmer errors and
/// abort the operation in progress. They are never collected into a
/// validation report.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A typed accessor was called on the wrong field variant.
    #[error("field holds {actual} data, not {requested}")]
    TypeMismatch {
        requested: &'static str,
        actual: &'static str,
    },

    /// A text field could not be parsed as an integer.
    #[error("field value is not numeric: {value}")]
    NotNumeric { value: String },

    /// A builder was seeded with a record of a different type.
    #[error("record builder declared type {declared} but was given a type {actual} record")]
    RecordTypeMismatch { declared: u32, actual: u32 },

    /// The transaction has no type-1 information record.
    #[error("transaction has no information record")]
    MissingInformationRecord,

    /// The transaction has more than one type-1 information record.
    #[error("transaction has {count} information records, expected exactly one")]
    DuplicateInformationRecord { count: usize },

    /// No record with the requested IDC exists under the given type.
    #[error("no type {record_type} record with IDC {idc}")]
    RecordNotFound { record_type: u32, idc: u32 },

    /// A replacement record's own IDC does not equal the addressed IDC.
    #[error("replacement record IDC {actual:?} does not match target IDC {expected}")]
    IdcMismatch {
        expected: u32,
        actual: Option<String>,
    },

    /// A pre-build hook rejected the builder state.
    #[error("build hook failed: {message}")]
    Hook { message: String },
}

impl ModelError {
    /// Create a Hook error.
    pub fn hook(message: impl Into<String>) -> Self {
        Self::Hook {
            message: message.into(),
        }
    }
}

/// Result type alias for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
