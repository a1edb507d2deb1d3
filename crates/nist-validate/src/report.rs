//! Structured, addressable validation errors.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Where a validation error points: field code and number, record type,
/// and the offending record's IDC when it has one.
///
/// The composite rendering `fieldCode|fieldNumber|recordType|idc` stays
/// representable in flat key-value error-reporting systems and round-trips
/// losslessly through [`FromStr`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorAddress {
    pub field_code: String,
    pub field_number: u32,
    pub record_type: u32,
    pub idc: Option<String>,
}

impl fmt::Display for ErrorAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}|{}|{}",
            self.field_code,
            self.field_number,
            self.record_type,
            self.idc.as_deref().unwrap_or_default()
        )
    }
}

/// Failure to parse a composite error address.
#[derive(Debug, Error)]
#[error("invalid error address {address:?}: {message}")]
pub struct AddressParseError {
    pub address: String,
    pub message: String,
}

impl FromStr for ErrorAddress {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fail = |message: &str| AddressParseError {
            address: s.to_string(),
            message: message.to_string(),
        };

        let parts: Vec<&str> = s.split('|').collect();
        let [field_code, field_number, record_type, idc] = parts.as_slice() else {
            return Err(fail("expected four |-separated parts"));
        };
        Ok(ErrorAddress {
            field_code: (*field_code).to_string(),
            field_number: field_number
                .parse()
                .map_err(|_| fail("field number is not numeric"))?,
            record_type: record_type
                .parse()
                .map_err(|_| fail("record type is not numeric"))?,
            idc: if idc.is_empty() {
                None
            } else {
                Some((*idc).to_string())
            },
        })
    }
}

/// One failed validation rule.
///
/// Created only during validation, never fatal, always aggregated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// Machine code naming the failed rule.
    pub code: &'static str,
    /// Human-readable message.
    pub message: String,
    /// Mnemonic of the offending field.
    pub field_code: String,
    /// Number of the offending field.
    pub field_number: u32,
    /// Numeric type of the offending record.
    pub record_type: u32,
    /// IDC of the offending record, when it carries one.
    pub idc: Option<String>,
    /// The attempted (offending) value, when one was present.
    pub attempted: Option<String>,
}

impl ValidationError {
    /// The error's composite address.
    pub fn address(&self) -> ErrorAddress {
        ErrorAddress {
            field_code: self.field_code.clone(),
            field_number: self.field_number,
            record_type: self.record_type,
            idc: self.idc.clone(),
        }
    }
}

/// A flat, ordered validation report.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn extend(&mut self, errors: impl IntoIterator<Item = ValidationError>) {
        self.errors.extend(errors);
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}
