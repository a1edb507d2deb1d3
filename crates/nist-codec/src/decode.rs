//! Transaction decoder.
//!
//! Structural parsing scans the raw separator bytes; text is decoded only
//! once a field's boundaries are known, so a character-set switch can never
//! corrupt record or field framing. Each record's extent comes from its own
//! LEN field, which lets image payloads contain separator byte values.

use tracing::{debug, trace};

use nist_model::{
    FieldValue, LEN_FIELD, Record, RecordBuilder, RecordType, Transaction, TransactionBuilder,
};

use crate::charset::CharacterSet;
use crate::encode::{DCS_FIELD, MAX_FIELD_LENGTH, image_field};
use crate::error::{CodecError, Result};
use crate::separators::{FS, GS};
use crate::subfield;

/// Decode wire bytes into a transaction.
///
/// The active character set starts at the default, and is re-derived from
/// the type-1 DCS directory field before any subsequent record's text is
/// decoded.
pub fn decode_transaction(data: &[u8]) -> Result<Transaction> {
    let mut builder = TransactionBuilder::new();
    let mut charset = CharacterSet::default();
    let mut offset = 0usize;

    while offset < data.len() {
        let (record, next) = decode_record(data, offset, charset)?;
        trace!(
            record_type = record.record_type().number(),
            bytes = next - offset,
            "decoded record"
        );
        if record.record_type().is_information() {
            charset = charset_from_information(&record).unwrap_or(charset);
        }
        builder.add_record(record);
        offset = next;
    }

    let transaction = builder.build()?;
    debug!(
        records = transaction.record_count(),
        bytes = data.len(),
        "decoded transaction"
    );
    Ok(transaction)
}

fn charset_from_information(record: &Record) -> Option<CharacterSet> {
    let dcs = record.field(DCS_FIELD)?.as_text().ok()?;
    let first_subfield = subfield::decode_subfields(dcs).into_iter().next()?;
    let first_item = subfield::decode_items(&first_subfield).into_iter().next()?;
    CharacterSet::from_dcs_code(&first_item)
}

/// Decode one record starting at `offset`; returns the record and the
/// offset just past its trailing FS.
fn decode_record(data: &[u8], offset: usize, charset: CharacterSet) -> Result<(Record, usize)> {
    // The first field must be LEN; its tag gives us the record type and its
    // value the record extent.
    let tag = parse_tag(data, offset)?;
    if tag.field_number != LEN_FIELD {
        return Err(CodecError::malformed_tag(
            offset,
            format!("record must begin with field 1 (LEN), found {}", tag.field_number),
        ));
    }
    let record_type = RecordType::from_number(tag.type_number).ok_or(
        CodecError::UnknownRecordType {
            number: tag.type_number,
            offset,
        },
    )?;

    let len_end = scan_separator(data, tag.content_start);
    let len_text = ascii_slice(data, tag.content_start, len_end)?;
    let record_len: usize = len_text
        .parse()
        .map_err(|_| CodecError::invalid_length(offset, format!("not a byte count: {len_text}")))?;

    let end = offset
        .checked_add(record_len)
        .ok_or(CodecError::OutOfBounds { offset })?;
    if record_len == 0 || end > data.len() {
        return Err(CodecError::invalid_length(
            offset,
            format!("record length {record_len} exceeds remaining input"),
        ));
    }
    if data[end - 1] != FS {
        return Err(CodecError::UnterminatedRecord { offset });
    }

    let record = decode_fields(&data[offset..end - 1], offset, record_type, charset)?;
    Ok((record, end))
}

/// Decode the GS-joined fields of one record body (trailing FS stripped).
fn decode_fields(
    body: &[u8],
    base_offset: usize,
    record_type: RecordType,
    charset: CharacterSet,
) -> Result<Record> {
    let type_number = record_type.number();
    let image_field = image_field(record_type);
    let mut builder = RecordBuilder::new(record_type);
    let mut pos = 0usize;

    loop {
        let tag = parse_tag(body, pos)?;
        if tag.type_number != type_number {
            return Err(CodecError::UnexpectedRecordType {
                expected: type_number,
                found: tag.type_number,
                offset: base_offset + pos,
            });
        }

        // The image payload is raw bytes and may contain separator values;
        // it consumes the remainder of the record.
        if image_field == Some(tag.field_number) {
            let content = &body[tag.content_start..];
            check_field_length(content.len())?;
            builder.set_field(tag.field_number, FieldValue::image(content.to_vec()));
            break;
        }

        let content_end = scan_separator(body, tag.content_start);
        let content = &body[tag.content_start..content_end];
        check_field_length(content.len())?;

        let text = charset
            .for_field(record_type, tag.field_number)
            .decode(content)?;
        builder.set_field(tag.field_number, FieldValue::text(text));

        if content_end >= body.len() {
            break;
        }
        pos = content_end + 1; // step over the GS
    }

    Ok(builder.build()?)
}

fn check_field_length(length: usize) -> Result<()> {
    if length > MAX_FIELD_LENGTH {
        return Err(CodecError::FieldTooLong {
            length,
            max: MAX_FIELD_LENGTH,
        });
    }
    Ok(())
}

struct Tag {
    type_number: u32,
    field_number: u32,
    content_start: usize,
}

/// Parse a `<type>.<field>:` tag at `offset`.
fn parse_tag(data: &[u8], offset: usize) -> Result<Tag> {
    let (type_number, after_type) = parse_number(data, offset)?;
    if data.get(after_type) != Some(&b'.') {
        return Err(CodecError::malformed_tag(offset, "expected '.' after record type"));
    }
    let (field_number, after_field) = parse_number(data, after_type + 1)?;
    if data.get(after_field) != Some(&b':') {
        return Err(CodecError::malformed_tag(offset, "expected ':' after field number"));
    }
    Ok(Tag {
        type_number,
        field_number,
        content_start: after_field + 1,
    })
}

/// Parse a decimal number; returns the value and the offset past it.
fn parse_number(data: &[u8], offset: usize) -> Result<(u32, usize)> {
    let mut end = offset;
    while data.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    if end == offset {
        return Err(CodecError::malformed_tag(offset, "expected a decimal number"));
    }
    let text = ascii_slice(data, offset, end)?;
    let value = text
        .parse()
        .map_err(|_| CodecError::malformed_tag(offset, format!("number too large: {text}")))?;
    Ok((value, end))
}

/// Offset of the next GS byte, or the end of the slice.
fn scan_separator(data: &[u8], from: usize) -> usize {
    data[from..]
        .iter()
        .position(|&b| b == GS)
        .map_or(data.len(), |i| from + i)
}

fn ascii_slice<'a>(data: &'a [u8], start: usize, end: usize) -> Result<&'a str> {
    let bytes = data
        .get(start..end)
        .ok_or(CodecError::OutOfBounds { offset: start })?;
    std::str::from_utf8(bytes).map_err(|e| CodecError::charset(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_parsing() {
        let tag = parse_tag(b"1.001:57", 0).unwrap();
        assert_eq!(tag.type_number, 1);
        assert_eq!(tag.field_number, 1);
        assert_eq!(tag.content_start, 6);

        let tag = parse_tag(b"xx14.999:", 2).unwrap();
        assert_eq!(tag.type_number, 14);
        assert_eq!(tag.field_number, 999);

        assert!(parse_tag(b"1:001:", 0).is_err());
        assert!(parse_tag(b".001:", 0).is_err());
        assert!(parse_tag(b"1.001", 0).is_err());
    }

    #[test]
    fn truncated_record_is_out_of_bounds_or_invalid() {
        // Claims 99 bytes but the input ends early.
        let data = b"2.001:99\x1d2.002:0\x1c";
        let err = decode_transaction(data).unwrap_err();
        assert!(matches!(err, CodecError::InvalidLength { .. }));
    }

    #[test]
    fn record_must_start_with_len() {
        let data = b"2.002:0\x1c";
        let err = decode_transaction(data).unwrap_err();
        assert!(matches!(err, CodecError::MalformedTag { .. }));
    }

    #[test]
    fn mixed_type_tags_are_rejected() {
        // Record claims type 2 but embeds a type 4 tag.
        let body = b"2.001:17\x1d4.002:0\x1c";
        let err = decode_transaction(body).unwrap_err();
        assert!(matches!(
            err,
            CodecError::UnexpectedRecordType {
                expected: 2,
                found: 4,
                ..
            }
        ));
    }
}
