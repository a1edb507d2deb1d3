//! The validation engine.
//!
//! A [`Validator`] is pinned to one standard revision. Validation walks the
//! whole transaction, runs the file-level checks, then delegates every
//! record of an allowed type to its per-type validator. Findings are never
//! fatal: one pass always returns the complete error list.

use nist_codec::{calc, subfield};
use nist_model::fields::rt1;
use nist_model::{LEN_FIELD, Record, RecordType, Transaction};
use nist_standards::{Standard, forbidden_record_types, is_record_type_allowed};
use tracing::debug;

use crate::records::{rt1 as rt1_checks, rt2, rt3_6, rt13, rt14};
use crate::report::{ValidationError, ValidationReport};
use crate::rules::{error_for, full_match};

/// The literal NSR/NTR value declaring that no fixed-resolution records
/// are present.
const ZERO_RESOLUTION: &str = "00.00";

/// A transaction validator for one standard revision.
#[derive(Debug, Clone, Copy)]
pub struct Validator {
    standard: Standard,
}

impl Validator {
    pub fn for_standard(standard: Standard) -> Self {
        Self { standard }
    }

    pub fn standard(&self) -> Standard {
        self.standard
    }

    /// Validate a whole transaction, returning every finding.
    pub fn validate(&self, transaction: &Transaction) -> ValidationReport {
        debug!(standard = %self.standard, records = transaction.record_count(), "validating transaction");
        let mut errors = Vec::new();

        self.check_forbidden_types(transaction, &mut errors);

        match transaction.information_record() {
            Ok(info) => {
                rt1_checks::validate(info, self.standard, &mut errors);
                check_content_table(transaction, info, &mut errors);
                check_resolution_fields(transaction, info, &mut errors);
            }
            Err(_) => errors.push(information_record_error(transaction)),
        }

        for (record_type, records) in transaction.records() {
            if !is_record_type_allowed(*record_type, self.standard) {
                continue;
            }
            for record in records {
                match record_type {
                    RecordType::DescriptiveText => rt2::validate(record, &mut errors),
                    RecordType::LowResolutionGrayscale
                    | RecordType::HighResolutionGrayscale
                    | RecordType::LowResolutionBinary
                    | RecordType::HighResolutionBinary => {
                        rt3_6::validate(record, self.standard, &mut errors);
                    }
                    RecordType::VariableResolutionLatent => {
                        rt13::validate(record, self.standard, &mut errors);
                    }
                    RecordType::VariableResolutionFingerprint => {
                        rt14::validate(record, self.standard, &mut errors);
                    }
                    _ => {}
                }
            }
        }

        debug!(errors = errors.len(), "validation finished");
        ValidationReport { errors }
    }

    /// Every record of a type outside the revision's interval is flagged,
    /// addressed through its LEN framing field.
    fn check_forbidden_types(&self, transaction: &Transaction, errors: &mut Vec<ValidationError>) {
        for record_type in forbidden_record_types(self.standard) {
            for record in transaction.records_of(record_type) {
                errors.push(ValidationError {
                    code: "RECORD_TYPE_FORBIDDEN",
                    message: format!(
                        "{record_type} records are not defined in {}",
                        self.standard
                    ),
                    field_code: "LEN".to_string(),
                    field_number: LEN_FIELD,
                    record_type: record_type.number(),
                    idc: record.idc().map(str::to_string),
                    attempted: None,
                });
            }
        }
    }
}

fn information_record_error(transaction: &Transaction) -> ValidationError {
    let count = transaction
        .records_of(RecordType::TransactionInformation)
        .len();
    let (code, message) = if count == 0 {
        (
            "INFORMATION_RECORD_MISSING",
            "the transaction carries no type-1 information record".to_string(),
        )
    } else {
        (
            "INFORMATION_RECORD_NOT_SINGLETON",
            format!("the transaction carries {count} type-1 information records"),
        )
    };
    ValidationError {
        code,
        message,
        field_code: "LEN".to_string(),
        field_number: LEN_FIELD,
        record_type: RecordType::TransactionInformation.number(),
        idc: None,
        attempted: None,
    }
}

/// Cross-check the declared CNT table of contents against the records
/// actually present.
///
/// The comparison is order-insensitive across subfields and tolerant of
/// leading zeros within numeric items, so `02<US>00` matches a type-2
/// record with IDC `0`. An absent CNT is already flagged by the field rule.
fn check_content_table(
    transaction: &Transaction,
    info: &Record,
    errors: &mut Vec<ValidationError>,
) {
    let Some(declared_text) = info.named_field(&rt1::CNT).and_then(|v| v.as_text().ok()) else {
        return;
    };
    if declared_text.is_empty() {
        return;
    }

    let mut declared: Vec<Vec<String>> = subfield::decode_list_of_lists(declared_text)
        .iter()
        .map(|items| normalize_items(items))
        .collect();
    let mut computed: Vec<Vec<String>> = calc::content_items(transaction.records())
        .iter()
        .map(|items| normalize_items(items))
        .collect();
    declared.sort();
    computed.sort();

    if declared != computed {
        errors.push(error_for(
            &rt1::CNT,
            info,
            "CNT_MISMATCH",
            "content table does not match the records present".to_string(),
        ));
    }
}

fn normalize_items(items: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|item| {
            if !item.is_empty() && item.bytes().all(|b| b.is_ascii_digit()) {
                let trimmed = item.trim_start_matches('0');
                if trimmed.is_empty() { "0" } else { trimmed }.to_string()
            } else {
                item.clone()
            }
        })
        .collect()
}

/// NSR and NTR must carry a real `DD.DD` resolution when any fixed-
/// resolution image record is present, and the literal zero value
/// otherwise.
fn check_resolution_fields(
    transaction: &Transaction,
    info: &Record,
    errors: &mut Vec<ValidationError>,
) {
    let needs_real = [
        RecordType::LowResolutionGrayscale,
        RecordType::HighResolutionGrayscale,
        RecordType::LowResolutionBinary,
        RecordType::HighResolutionBinary,
    ]
    .iter()
    .any(|t| transaction.has_records_of(*t));

    for (field, code) in [(rt1::NSR, "NSR_FORMAT"), (rt1::NTR, "NTR_FORMAT")] {
        let text = info.named_field(&field).and_then(|v| v.as_text().ok());
        let (ok, message) = if needs_real {
            (
                text.is_some_and(|t| full_match(r"\d{2}\.\d{2}", t) && t != ZERO_RESOLUTION),
                "fixed-resolution records require a real DD.DD scanning resolution",
            )
        } else {
            (
                text == Some(ZERO_RESOLUTION),
                "must be the literal 00.00 when no fixed-resolution records are present",
            )
        };
        if !ok {
            errors.push(error_for(&field, info, code, message.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_strips_leading_zeros_from_numeric_items() {
        let items = vec!["02".to_string(), "00".to_string(), "A01".to_string()];
        assert_eq!(normalize_items(&items), vec!["2", "0", "A01"]);
    }
}
