//! Character-set selection driven by the 1.015 DCS directory field.
//!
//! A "000"-prefixed code selects the legacy 8-bit code page, "002" the
//! 16-bit encoding, "003" the 8-bit variable-width encoding. Any other
//! prefix, or an absent directory field, keeps the current decoder.

use encoding_rs::{UTF_8, UTF_16BE, WINDOWS_1252};

use nist_model::{IDC_FIELD, RecordType};

use crate::error::{CodecError, Result};

/// The active text decoder for field content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CharacterSet {
    /// 7-bit ASCII, the wire default.
    #[default]
    Ascii,
    /// Legacy 8-bit code page (DCS code prefix "000").
    Latin1,
    /// 16-bit encoding, network byte order (DCS code prefix "002").
    Utf16Be,
    /// 8-bit variable-width encoding (DCS code prefix "003").
    Utf8,
}

impl CharacterSet {
    /// Select a decoder from a DCS character-set index code.
    ///
    /// Returns `None` for unrecognized prefixes; the caller keeps the
    /// current decoder in that case.
    pub fn from_dcs_code(code: &str) -> Option<CharacterSet> {
        if code.starts_with("000") {
            Some(CharacterSet::Latin1)
        } else if code.starts_with("002") {
            Some(CharacterSet::Utf16Be)
        } else if code.starts_with("003") {
            Some(CharacterSet::Utf8)
        } else {
            None
        }
    }

    /// The set in effect for one field of a record.
    ///
    /// The type-1 record and the numeric framing fields (LEN, IDC) always
    /// stay in the wire default, so record extents parse before any switch
    /// takes effect.
    pub fn for_field(self, record_type: RecordType, field_number: u32) -> CharacterSet {
        if record_type.is_information() || field_number <= IDC_FIELD {
            CharacterSet::default()
        } else {
            self
        }
    }

    /// Decode field content bytes to text.
    pub fn decode(&self, bytes: &[u8]) -> Result<String> {
        match self {
            CharacterSet::Ascii => String::from_utf8(bytes.to_vec())
                .map_err(|e| CodecError::charset(e.to_string())),
            CharacterSet::Latin1 => {
                let (text, _, _) = WINDOWS_1252.decode(bytes);
                Ok(text.into_owned())
            }
            CharacterSet::Utf16Be => {
                let (text, _, had_errors) = UTF_16BE.decode(bytes);
                if had_errors {
                    return Err(CodecError::charset("malformed UTF-16BE field content"));
                }
                Ok(text.into_owned())
            }
            CharacterSet::Utf8 => {
                let (text, _, had_errors) = UTF_8.decode(bytes);
                if had_errors {
                    return Err(CodecError::charset("malformed UTF-8 field content"));
                }
                Ok(text.into_owned())
            }
        }
    }

    /// Encode text to field content bytes.
    pub fn encode(&self, text: &str) -> Vec<u8> {
        match self {
            // ASCII is a UTF-8 subset; pass bytes through unchanged.
            CharacterSet::Ascii | CharacterSet::Utf8 => text.as_bytes().to_vec(),
            CharacterSet::Latin1 => {
                let (bytes, _, _) = WINDOWS_1252.encode(text);
                bytes.into_owned()
            }
            // encoding_rs does not encode into UTF-16.
            CharacterSet::Utf16Be => text
                .encode_utf16()
                .flat_map(|unit| unit.to_be_bytes())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dcs_code_prefixes() {
        assert_eq!(CharacterSet::from_dcs_code("000"), Some(CharacterSet::Latin1));
        assert_eq!(
            CharacterSet::from_dcs_code("002"),
            Some(CharacterSet::Utf16Be)
        );
        assert_eq!(CharacterSet::from_dcs_code("003"), Some(CharacterSet::Utf8));
        assert_eq!(CharacterSet::from_dcs_code("001"), None);
        assert_eq!(CharacterSet::from_dcs_code(""), None);
    }

    #[test]
    fn framing_fields_stay_in_the_default_set() {
        use nist_model::LEN_FIELD;
        let active = CharacterSet::Utf16Be;
        assert_eq!(
            active.for_field(RecordType::DescriptiveText, LEN_FIELD),
            CharacterSet::Ascii
        );
        assert_eq!(
            active.for_field(RecordType::DescriptiveText, IDC_FIELD),
            CharacterSet::Ascii
        );
        assert_eq!(
            active.for_field(RecordType::DescriptiveText, 3),
            CharacterSet::Utf16Be
        );
        assert_eq!(
            active.for_field(RecordType::TransactionInformation, 4),
            CharacterSet::Ascii
        );
    }

    #[test]
    fn latin1_round_trip() {
        let text = "Müller";
        let bytes = CharacterSet::Latin1.encode(text);
        assert_eq!(bytes.len(), 6);
        assert_eq!(CharacterSet::Latin1.decode(&bytes).unwrap(), text);
    }

    #[test]
    fn utf16be_round_trip() {
        let text = "Łódź";
        let bytes = CharacterSet::Utf16Be.encode(text);
        assert_eq!(bytes.len(), 8);
        assert_eq!(CharacterSet::Utf16Be.decode(&bytes).unwrap(), text);
    }

    #[test]
    fn utf8_round_trip() {
        let text = "指紋";
        let bytes = CharacterSet::Utf8.encode(text);
        assert_eq!(CharacterSet::Utf8.decode(&bytes).unwrap(), text);
    }
}
