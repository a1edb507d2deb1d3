//! Standards-aware validation for ANSI/NIST-ITL transactions.
//!
//! A [`Validator`] pinned to one [`nist_standards::Standard`] runs every
//! applicable rule over a transaction in a single pass and returns a flat
//! [`ValidationReport`]. Findings are data, not failures: each
//! [`ValidationError`] carries a machine code, a message, the attempted
//! value and a composite address (`fieldCode|fieldNumber|recordType|idc`)
//! that round-trips through [`ErrorAddress`].
//!
//! # Example
//!
//! ```
//! use nist_model::{RecordBuilder, RecordType, TransactionBuilder};
//! use nist_standards::Standard;
//! use nist_validate::Validator;
//!
//! let info = RecordBuilder::new(RecordType::TransactionInformation)
//!     .with_text(2, "0400")
//!     .build()
//!     .unwrap();
//! let transaction = TransactionBuilder::new().with_record(info).build().unwrap();
//!
//! let report = Validator::for_standard(Standard::AnsiNist2007).validate(&transaction);
//! assert!(!report.is_valid());
//! assert!(report.errors.iter().any(|e| e.code == "TCN_FORMAT"));
//! ```

pub mod engine;
pub mod records;
pub mod report;
pub mod rules;

pub use engine::Validator;
pub use report::{AddressParseError, ErrorAddress, ValidationError, ValidationReport};
pub use rules::{Rule, RuleKind};
