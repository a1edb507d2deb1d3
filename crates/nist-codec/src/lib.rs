//! ANSI/NIST-ITL wire codec.
//!
//! The on-wire grammar nests four separator levels: FS bounds records, GS
//! bounds tagged fields, RS bounds repeated subfields, US bounds items
//! within one subfield. This crate encodes/decodes that grammar, switches
//! the text decoder on the in-band DCS directory field, and provides the
//! derived-field calculators (LEN, CNT, TCN check digit) wired into the
//! model's builder hooks.
//!
//! # Example
//!
//! ```
//! use nist_codec::{calc, decode_transaction, encode_transaction};
//! use nist_model::{RecordBuilder, RecordType, TransactionBuilder};
//!
//! let info = RecordBuilder::new(RecordType::TransactionInformation)
//!     .with_text(2, "0400")
//!     .with_pre_build(calc::length_hook())
//!     .build()
//!     .unwrap();
//! let transaction = TransactionBuilder::new()
//!     .with_record(info)
//!     .with_pre_build(calc::content_hook())
//!     .build()
//!     .unwrap();
//!
//! let bytes = encode_transaction(&transaction).unwrap();
//! assert_eq!(decode_transaction(&bytes).unwrap(), transaction);
//! ```

pub mod calc;
pub mod charset;
mod decode;
mod encode;
mod error;
pub mod separators;
pub mod subfield;
pub mod tcn;

pub use charset::CharacterSet;
pub use decode::decode_transaction;
pub use encode::{
    DCS_FIELD, MAX_FIELD_LENGTH, encode_transaction, encoded_record_length,
    encoded_record_length_with, selected_charset,
};
pub use error::{CodecError, Result};
