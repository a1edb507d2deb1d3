//! Transaction encoder.
//!
//! Renders a built transaction to on-wire bytes: records in type order,
//! fields in field-number order, each field as `<type>.<field>:` plus
//! content, fields joined by GS, every record terminated by FS.

use tracing::debug;

use nist_model::{Record, RecordType, Transaction};

use crate::calc::field_tag;
use crate::charset::CharacterSet;
use crate::error::{CodecError, Result};
use crate::separators::{FS, GS};
use crate::subfield;

/// Maximum encoded length of a single field, in bytes.
pub const MAX_FIELD_LENGTH: usize = 300_000;

/// Field number of the type-1 DCS character-set directory field.
pub const DCS_FIELD: u32 = 15;

/// Encode a transaction to wire bytes.
///
/// The type-1 information record is always rendered in the default
/// character set; its DCS directory field selects the encoder for all
/// subsequent text fields.
pub fn encode_transaction(transaction: &Transaction) -> Result<Vec<u8>> {
    let charset = selected_charset(transaction);
    let mut out = Vec::new();

    for records in transaction.records().values() {
        for record in records {
            encode_record(record, charset, &mut out)?;
        }
    }

    debug!(
        records = transaction.record_count(),
        bytes = out.len(),
        "encoded transaction"
    );
    Ok(out)
}

/// The character set the transaction's DCS field selects, or the default.
pub fn selected_charset(transaction: &Transaction) -> CharacterSet {
    transaction
        .information_record()
        .ok()
        .and_then(|info| info.field(DCS_FIELD))
        .and_then(|value| value.as_text().ok())
        .and_then(first_dcs_code)
        .unwrap_or_default()
}

/// The character-set index is the first item of the DCS field's first
/// subfield.
fn first_dcs_code(dcs: &str) -> Option<CharacterSet> {
    let first_subfield = subfield::decode_subfields(dcs).into_iter().next()?;
    let first_item = subfield::decode_items(&first_subfield).into_iter().next()?;
    CharacterSet::from_dcs_code(&first_item)
}

fn encode_record(record: &Record, charset: CharacterSet, out: &mut Vec<u8>) -> Result<()> {
    let record_type = record.record_type();
    let type_number = record_type.number();
    for (index, (field_number, value)) in record.fields().iter().enumerate() {
        if index > 0 {
            out.push(GS);
        }
        out.extend_from_slice(field_tag(type_number, *field_number).as_bytes());

        let content = match value {
            nist_model::FieldValue::Text(text) => {
                charset.for_field(record_type, *field_number).encode(text)
            }
            nist_model::FieldValue::Image(bytes) => bytes.clone(),
        };
        if content.len() > MAX_FIELD_LENGTH {
            return Err(CodecError::FieldTooLong {
                length: content.len(),
                max: MAX_FIELD_LENGTH,
            });
        }
        out.extend_from_slice(&content);
    }
    out.push(FS);
    Ok(())
}

/// Encoded byte length of one record, LEN through trailing FS.
///
/// Useful for asserting LEN self-consistency without encoding the whole
/// transaction.
pub fn encoded_record_length(record: &Record) -> Result<usize> {
    encoded_record_length_with(record, CharacterSet::default())
}

/// Encoded byte length of one record under a specific active character set.
pub fn encoded_record_length_with(record: &Record, charset: CharacterSet) -> Result<usize> {
    let mut out = Vec::new();
    encode_record(record, charset, &mut out)?;
    Ok(out.len())
}

/// True for the record types whose image payload is expected in this field
/// when decoding; the payload consumes the remainder of the record.
pub(crate) fn image_field(record_type: RecordType) -> Option<u32> {
    match record_type.number() {
        3..=6 => Some(9),
        8 | 10 | 13..=17 | 19..=22 => Some(999),
        _ => None,
    }
}
