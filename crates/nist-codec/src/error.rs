//! Error types for encode/decode operations.
//!
//! Format errors are fail-fast: they indicate corrupt wire bytes or API
//! misuse, never a normal-path condition, so the operation in progress is
//! aborted with enough context (byte offset or tag) to locate the fault.

use thiserror::Error;

use nist_model::ModelError;

/// Errors that can occur while encoding or decoding a transaction.
#[derive(Debug, Error)]
pub enum CodecError {
    /// A single field exceeds the maximum encodable length.
    #[error("field of {length} bytes exceeds the {max} byte limit")]
    FieldTooLong { length: usize, max: usize },

    /// A read past the end of the input.
    #[error("position out of bounds at offset {offset}")]
    OutOfBounds { offset: usize },

    /// A field tag that does not match `<type>.<field>:`.
    #[error("malformed field tag at offset {offset}: {message}")]
    MalformedTag { offset: usize, message: String },

    /// A tag naming a record type this crate does not know.
    #[error("unknown record type {number} at offset {offset}")]
    UnknownRecordType { number: u32, offset: usize },

    /// A tag naming a different record type than the enclosing record.
    #[error("expected a type {expected} tag at offset {offset}, found type {found}")]
    UnexpectedRecordType {
        expected: u32,
        found: u32,
        offset: usize,
    },

    /// The record's LEN field is not a usable byte count.
    #[error("invalid record length at offset {offset}: {message}")]
    InvalidLength { offset: usize, message: String },

    /// A record slice that does not end with the FS separator.
    #[error("record starting at offset {offset} is not terminated by FS")]
    UnterminatedRecord { offset: usize },

    /// Deprecated pair conversion applied to an odd-length item list.
    #[error("cannot pair an odd-length item list ({len} items)")]
    OddPairList { len: usize },

    /// A subfield that does not hold exactly two items where pairs were
    /// expected.
    #[error("expected a two-item subfield, found {items} items")]
    InvalidPairShape { items: usize },

    /// A malformed transaction control number.
    #[error("invalid TCN {value}: {message}")]
    InvalidTcn { value: String, message: String },

    /// Text that cannot be decoded under the active character set.
    #[error("character set error: {message}")]
    Charset { message: String },

    /// A model-level failure surfaced during decoding.
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl CodecError {
    /// Create a MalformedTag error.
    pub fn malformed_tag(offset: usize, message: impl Into<String>) -> Self {
        Self::MalformedTag {
            offset,
            message: message.into(),
        }
    }

    /// Create an InvalidLength error.
    pub fn invalid_length(offset: usize, message: impl Into<String>) -> Self {
        Self::InvalidLength {
            offset,
            message: message.into(),
        }
    }

    /// Create a Charset error.
    pub fn charset(message: impl Into<String>) -> Self {
        Self::Charset {
            message: message.into(),
        }
    }

    /// Create an InvalidTcn error.
    pub fn invalid_tcn(value: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidTcn {
            value: value.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;
