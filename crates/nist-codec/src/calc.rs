//! Derived-field calculators.
//!
//! These keep a transaction internally consistent: the record length (LEN)
//! field, the transaction content table (CNT), and the hooks that inject
//! them during builds.

use std::collections::BTreeMap;

use nist_model::{
    FieldValue, LEN_FIELD, Record, RecordBuilder, RecordPreBuild, RecordType,
    TransactionBuilder, TransactionPreBuild,
};

use crate::charset::CharacterSet;
use crate::subfield;

/// Field number of the type-1 CNT table-of-contents field.
pub const CNT_FIELD: u32 = 3;

/// Render the `<type>.<field>:` tag for a field. Field numbers are
/// zero-padded to three digits as they appear on the wire.
pub fn field_tag(record_type: u32, field_number: u32) -> String {
    format!("{record_type}.{field_number:03}:")
}

/// Byte overhead of one field: its separator plus its tag.
fn field_overhead(record_type: u32, field_number: u32) -> u64 {
    1 + field_tag(record_type, field_number).len() as u64
}

fn digit_width(mut value: u64) -> u64 {
    let mut digits = 1;
    while value >= 10 {
        value /= 10;
        digits += 1;
    }
    digits
}

/// Total encoded byte length of a tagged record, LEN field included.
///
/// The base length sums every non-LEN field's content plus its
/// `<GS><type>.<field>:` overhead. Adding the LEN field's own digits can
/// carry the total into a wider number; when that happens exactly one extra
/// digit is added. Standard records never need more than this single
/// correction.
pub fn tagged_record_length(record_type: RecordType, fields: &BTreeMap<u32, FieldValue>) -> u64 {
    tagged_record_length_with(record_type, fields, CharacterSet::default())
}

/// Total encoded byte length under a specific active character set.
///
/// Text content counts as its on-wire bytes, so a 16-bit encoding doubles
/// what each character contributes. Framing fields and the type-1 record
/// always count in the wire default.
pub fn tagged_record_length_with(
    record_type: RecordType,
    fields: &BTreeMap<u32, FieldValue>,
    charset: CharacterSet,
) -> u64 {
    let type_number = record_type.number();
    let base: u64 = fields
        .iter()
        .filter(|(number, _)| **number != LEN_FIELD)
        .map(|(number, value)| {
            field_overhead(type_number, *number)
                + content_length(record_type, *number, value, charset)
        })
        .sum();

    let without_len_digits = base + field_overhead(type_number, LEN_FIELD);
    let total = without_len_digits + digit_width(without_len_digits);
    if digit_width(total) > digit_width(without_len_digits) {
        total + 1
    } else {
        total
    }
}

/// On-wire byte count of one field's content.
fn content_length(
    record_type: RecordType,
    field_number: u32,
    value: &FieldValue,
    charset: CharacterSet,
) -> u64 {
    match value {
        FieldValue::Text(text) => charset
            .for_field(record_type, field_number)
            .encode(text)
            .len() as u64,
        FieldValue::Image(bytes) => bytes.len() as u64,
    }
}

/// Total byte length of a fixed-header binary record: constant-width header
/// plus the payload field. No digit-growth correction applies.
pub fn binary_record_length(header_len: u64, payload: &FieldValue) -> u64 {
    header_len + payload.len() as u64
}

/// Pre-build hook that injects the computed LEN into field 1 of a tagged
/// record.
pub fn length_hook() -> RecordPreBuild {
    length_hook_with(CharacterSet::default())
}

/// Pre-build hook that injects LEN computed against a specific active
/// character set. Use for records whose text fields are charset-encoded.
pub fn length_hook_with(charset: CharacterSet) -> RecordPreBuild {
    Box::new(move |builder: &mut RecordBuilder| {
        let total = tagged_record_length_with(builder.record_type(), builder.fields(), charset);
        builder.set_field(LEN_FIELD, FieldValue::text(total.to_string()));
        Ok(())
    })
}

/// Pre-build hook that injects the computed LEN into field 1 of a
/// fixed-header binary record whose payload lives in `payload_field`.
pub fn binary_length_hook(header_len: u64, payload_field: u32) -> RecordPreBuild {
    Box::new(move |builder: &mut RecordBuilder| {
        let payload = builder
            .field(payload_field)
            .map_or(0, |value| value.len() as u64);
        builder.set_field(
            LEN_FIELD,
            FieldValue::text((header_len + payload).to_string()),
        );
        Ok(())
    })
}

/// Build the transaction's table of contents as a list of item lists.
///
/// The first subfield is the information record's own type number and the
/// count of subsequent entries; one `(type, idc)` subfield follows per
/// non-information record, in record-type order.
pub fn content_items(records: &BTreeMap<RecordType, Vec<Record>>) -> Vec<Vec<String>> {
    let mut entries: Vec<Vec<String>> = Vec::new();
    for (record_type, list) in records {
        if record_type.is_information() {
            continue;
        }
        for record in list {
            entries.push(vec![
                record_type.number().to_string(),
                record.idc().unwrap_or_default().to_string(),
            ]);
        }
    }

    let mut items = Vec::with_capacity(entries.len() + 1);
    items.push(vec![
        RecordType::TransactionInformation.number().to_string(),
        entries.len().to_string(),
    ]);
    items.extend(entries);
    items
}

/// Pre-build hook that recomputes the information record's CNT field from
/// the staged records, then refreshes its LEN.
///
/// Requires exactly one staged information record.
pub fn content_hook() -> TransactionPreBuild {
    Box::new(|builder: &mut TransactionBuilder| {
        let items = content_items(builder.records());
        let info = builder.information_record()?;
        let mut rebuild =
            RecordBuilder::from_record(RecordType::TransactionInformation, info)?;
        rebuild.set_field(
            CNT_FIELD,
            FieldValue::text(subfield::encode_list_of_lists(&items)),
        );
        let total = tagged_record_length(RecordType::TransactionInformation, rebuild.fields());
        rebuild.set_field(LEN_FIELD, FieldValue::text(total.to_string()));
        let record = rebuild.build()?;
        builder.replace_information_record(record)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use nist_model::IDC_FIELD;

    fn fields_of(pairs: &[(u32, &str)]) -> BTreeMap<u32, FieldValue> {
        pairs
            .iter()
            .map(|(n, v)| (*n, FieldValue::text(*v)))
            .collect()
    }

    #[test]
    fn tag_zero_pads_the_field_number() {
        assert_eq!(field_tag(1, 1), "1.001:");
        assert_eq!(field_tag(14, 999), "14.999:");
    }

    #[test]
    fn length_counts_overhead_and_content() {
        // One non-LEN field: "2.002:" tag (6) + separator (1) + "0" (1) = 8.
        // LEN overhead: "2.001:" (6) + separator (1) = 7. Base 15, two
        // digits of LEN -> 17.
        let fields = fields_of(&[(2, "0")]);
        assert_eq!(
            tagged_record_length(RecordType::DescriptiveText, &fields),
            17
        );
    }

    #[test]
    fn length_ignores_a_stale_len_field() {
        let with_stale = fields_of(&[(1, "99999"), (2, "0")]);
        let without = fields_of(&[(2, "0")]);
        assert_eq!(
            tagged_record_length(RecordType::DescriptiveText, &with_stale),
            tagged_record_length(RecordType::DescriptiveText, &without)
        );
    }

    #[test]
    fn length_single_digit_correction() {
        // Craft a payload so base + LEN overhead lands at 98: adding the
        // two LEN digits would reach 100, which needs three digits, so one
        // extra unit is added.
        // Field 2 overhead is 7 ("2.002:" + GS); LEN overhead is 7.
        // content = 98 - 7 - 7 = 84 bytes.
        let content = "x".repeat(84);
        let fields = fields_of(&[(2, content.as_str())]);
        let total = tagged_record_length(RecordType::DescriptiveText, &fields);
        assert_eq!(total, 101);
        // The stored LEN's own digit width matches the final total.
        assert_eq!(digit_width(total), 3);
    }

    #[test]
    fn length_counts_charset_encoded_bytes() {
        let fields = fields_of(&[(2, "0"), (3, "Łódź")]);
        // "Łódź" is 7 bytes in UTF-8 and 8 on a 16-bit wire; the IDC and
        // the tags stay single-byte either way.
        assert_eq!(
            tagged_record_length_with(
                RecordType::DescriptiveText,
                &fields,
                CharacterSet::Ascii
            ),
            31
        );
        assert_eq!(
            tagged_record_length_with(
                RecordType::DescriptiveText,
                &fields,
                CharacterSet::Utf16Be
            ),
            32
        );
    }

    #[test]
    fn binary_length_is_header_plus_payload() {
        let payload = FieldValue::image(vec![0u8; 640]);
        assert_eq!(binary_record_length(18, &payload), 658);
    }

    #[test]
    fn content_items_orders_and_counts() {
        let info = RecordBuilder::new(RecordType::TransactionInformation)
            .with_text(2, "0400")
            .build()
            .unwrap();
        let rt2 = RecordBuilder::new(RecordType::DescriptiveText)
            .with_text(IDC_FIELD, "0")
            .build()
            .unwrap();
        let rt14 = RecordBuilder::new(RecordType::VariableResolutionFingerprint)
            .with_text(IDC_FIELD, "1")
            .build()
            .unwrap();

        let mut builder = TransactionBuilder::new()
            .with_record(info)
            .with_record(rt14)
            .with_record(rt2);
        let transaction = builder.build().unwrap();

        let items = content_items(transaction.records());
        assert_eq!(items.len(), 3);
        assert_eq!(items[0], vec!["1".to_string(), "2".to_string()]);
        assert_eq!(items[1], vec!["2".to_string(), "0".to_string()]);
        assert_eq!(items[2], vec!["14".to_string(), "1".to_string()]);
    }

    #[test]
    fn content_hook_rewrites_cnt_and_len() {
        let info = RecordBuilder::new(RecordType::TransactionInformation)
            .with_text(2, "0400")
            .build()
            .unwrap();
        let rt2 = RecordBuilder::new(RecordType::DescriptiveText)
            .with_text(IDC_FIELD, "0")
            .build()
            .unwrap();

        let mut builder = TransactionBuilder::new()
            .with_record(info)
            .with_record(rt2)
            .with_pre_build(content_hook());
        let transaction = builder.build().unwrap();

        let info = transaction.information_record().unwrap();
        let cnt = info.field(CNT_FIELD).unwrap().as_text().unwrap();
        assert_eq!(subfield::decode_list_of_lists(cnt).len(), 2);

        let expected = tagged_record_length(
            RecordType::TransactionInformation,
            info.fields(),
        );
        assert_eq!(
            info.field(LEN_FIELD).unwrap().as_int().unwrap() as u64,
            expected
        );
    }
}
