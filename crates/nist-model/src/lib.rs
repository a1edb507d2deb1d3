//! ANSI/NIST-ITL transaction data model.
//!
//! The model is strictly layered: [`FieldValue`] is the atomic typed payload
//! (text or opaque image bytes), a [`Record`] is a key-ordered map of field
//! number to value tagged with a [`RecordType`], and a [`Transaction`] is a
//! map of record type to record list with a singleton type-1 information
//! record. Built values are immutable; all mutation happens in
//! [`RecordBuilder`]/[`TransactionBuilder`], which deep-copy their state on
//! every `build()`.

pub mod builder;
pub mod error;
pub mod field;
pub mod fields;
pub mod record;
pub mod transaction;

pub use builder::{
    RecordBuilder, RecordPostBuild, RecordPreBuild, TransactionBuilder, TransactionPostBuild,
    TransactionPreBuild,
};
pub use error::{ModelError, Result};
pub use field::FieldValue;
pub use fields::NamedField;
pub use record::{IDC_FIELD, LEN_FIELD, Record, RecordType};
pub use transaction::Transaction;
