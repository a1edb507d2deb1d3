use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::field::FieldValue;
use crate::fields::{self, NamedField};

/// Field number of the record length (LEN) field, first in every record.
pub const LEN_FIELD: u32 = 1;

/// Field number of the image designation character (IDC) field.
///
/// Present in every record type except the type-1 information record.
pub const IDC_FIELD: u32 = 2;

/// Record types defined across the five ANSI/NIST-ITL revisions.
///
/// Variants are declared in type-number order so the derived `Ord` matches
/// the numeric ordering used on the wire and in the CNT table of contents.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordType {
    /// Type-1: transaction information (exactly one per transaction).
    TransactionInformation,
    /// Type-2: user-defined descriptive text.
    DescriptiveText,
    /// Type-3: low-resolution grayscale fingerprint image.
    LowResolutionGrayscale,
    /// Type-4: high-resolution grayscale fingerprint image.
    HighResolutionGrayscale,
    /// Type-5: low-resolution binary fingerprint image.
    LowResolutionBinary,
    /// Type-6: high-resolution binary fingerprint image.
    HighResolutionBinary,
    /// Type-7: user-defined image.
    UserDefinedImage,
    /// Type-8: signature image.
    SignatureImage,
    /// Type-9: minutiae data.
    MinutiaeData,
    /// Type-10: facial and SMT image.
    FacialAndSmtImage,
    /// Type-13: variable-resolution latent friction ridge image.
    VariableResolutionLatent,
    /// Type-14: variable-resolution fingerprint image.
    VariableResolutionFingerprint,
    /// Type-15: variable-resolution palm print image.
    VariableResolutionPalm,
    /// Type-16: user-defined variable-resolution testing image.
    UserDefinedTestingImage,
    /// Type-17: iris image.
    IrisImage,
    /// Type-18: DNA data.
    DnaData,
    /// Type-19: variable-resolution plantar image.
    VariableResolutionPlantar,
    /// Type-20: source representation.
    SourceRepresentation,
    /// Type-21: associated context.
    AssociatedContext,
    /// Type-22: non-photographic imagery.
    NonPhotographicImagery,
    /// Type-98: information assurance.
    InformationAssurance,
    /// Type-99: CBEFF biometric data.
    CbeffBiometricData,
}

impl RecordType {
    /// All record types, in type-number order.
    pub const ALL: [RecordType; 22] = [
        RecordType::TransactionInformation,
        RecordType::DescriptiveText,
        RecordType::LowResolutionGrayscale,
        RecordType::HighResolutionGrayscale,
        RecordType::LowResolutionBinary,
        RecordType::HighResolutionBinary,
        RecordType::UserDefinedImage,
        RecordType::SignatureImage,
        RecordType::MinutiaeData,
        RecordType::FacialAndSmtImage,
        RecordType::VariableResolutionLatent,
        RecordType::VariableResolutionFingerprint,
        RecordType::VariableResolutionPalm,
        RecordType::UserDefinedTestingImage,
        RecordType::IrisImage,
        RecordType::DnaData,
        RecordType::VariableResolutionPlantar,
        RecordType::SourceRepresentation,
        RecordType::AssociatedContext,
        RecordType::NonPhotographicImagery,
        RecordType::InformationAssurance,
        RecordType::CbeffBiometricData,
    ];

    /// The numeric record-type id used on the wire.
    pub fn number(&self) -> u32 {
        match self {
            RecordType::TransactionInformation => 1,
            RecordType::DescriptiveText => 2,
            RecordType::LowResolutionGrayscale => 3,
            RecordType::HighResolutionGrayscale => 4,
            RecordType::LowResolutionBinary => 5,
            RecordType::HighResolutionBinary => 6,
            RecordType::UserDefinedImage => 7,
            RecordType::SignatureImage => 8,
            RecordType::MinutiaeData => 9,
            RecordType::FacialAndSmtImage => 10,
            RecordType::VariableResolutionLatent => 13,
            RecordType::VariableResolutionFingerprint => 14,
            RecordType::VariableResolutionPalm => 15,
            RecordType::UserDefinedTestingImage => 16,
            RecordType::IrisImage => 17,
            RecordType::DnaData => 18,
            RecordType::VariableResolutionPlantar => 19,
            RecordType::SourceRepresentation => 20,
            RecordType::AssociatedContext => 21,
            RecordType::NonPhotographicImagery => 22,
            RecordType::InformationAssurance => 98,
            RecordType::CbeffBiometricData => 99,
        }
    }

    /// Look up a record type by its numeric id.
    pub fn from_number(number: u32) -> Option<RecordType> {
        RecordType::ALL.iter().copied().find(|t| t.number() == number)
    }

    /// The canonical human-readable type name.
    pub fn name(&self) -> &'static str {
        match self {
            RecordType::TransactionInformation => "Transaction information",
            RecordType::DescriptiveText => "User-defined descriptive text",
            RecordType::LowResolutionGrayscale => "Low-resolution grayscale fingerprint image",
            RecordType::HighResolutionGrayscale => "High-resolution grayscale fingerprint image",
            RecordType::LowResolutionBinary => "Low-resolution binary fingerprint image",
            RecordType::HighResolutionBinary => "High-resolution binary fingerprint image",
            RecordType::UserDefinedImage => "User-defined image",
            RecordType::SignatureImage => "Signature image",
            RecordType::MinutiaeData => "Minutiae data",
            RecordType::FacialAndSmtImage => "Facial and SMT image",
            RecordType::VariableResolutionLatent => "Variable-resolution latent image",
            RecordType::VariableResolutionFingerprint => "Variable-resolution fingerprint image",
            RecordType::VariableResolutionPalm => "Variable-resolution palm print image",
            RecordType::UserDefinedTestingImage => "User-defined testing image",
            RecordType::IrisImage => "Iris image",
            RecordType::DnaData => "DNA data",
            RecordType::VariableResolutionPlantar => "Variable-resolution plantar image",
            RecordType::SourceRepresentation => "Source representation",
            RecordType::AssociatedContext => "Associated context",
            RecordType::NonPhotographicImagery => "Non-photographic imagery",
            RecordType::InformationAssurance => "Information assurance",
            RecordType::CbeffBiometricData => "CBEFF biometric data",
        }
    }

    /// True for the singleton type-1 information record type.
    pub fn is_information(&self) -> bool {
        *self == RecordType::TransactionInformation
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Type-{}", self.number())
    }
}

/// One typed group of fields, immutable once built.
///
/// The field map is key-ordered and never aliases builder state: building a
/// record deep-copies the builder's fields, so later builder mutation cannot
/// reach a previously built record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    record_type: RecordType,
    fields: BTreeMap<u32, FieldValue>,
}

impl Record {
    pub(crate) fn new(record_type: RecordType, fields: BTreeMap<u32, FieldValue>) -> Self {
        Self {
            record_type,
            fields,
        }
    }

    /// The record's type.
    pub fn record_type(&self) -> RecordType {
        self.record_type
    }

    /// All fields in field-number order.
    pub fn fields(&self) -> &BTreeMap<u32, FieldValue> {
        &self.fields
    }

    /// Look up a field by number.
    pub fn field(&self, number: u32) -> Option<&FieldValue> {
        self.fields.get(&number)
    }

    /// Look up a field through its symbolic descriptor.
    ///
    /// Returns `None` when the descriptor belongs to another record type.
    pub fn named_field(&self, field: &NamedField) -> Option<&FieldValue> {
        if field.record_type != self.record_type {
            return None;
        }
        self.fields.get(&field.number)
    }

    /// Recover the symbolic descriptor for a raw field number, if one is
    /// defined for this record type. Used for error addressing.
    pub fn find_named_field(&self, number: u32) -> Option<&'static NamedField> {
        fields::find(self.record_type, number)
    }

    /// The record's IDC field as text, when present.
    ///
    /// Always `None` for the type-1 information record: it carries no IDC,
    /// and its field 2 holds the version number instead.
    pub fn idc(&self) -> Option<&str> {
        if self.record_type.is_information() {
            return None;
        }
        self.fields.get(&IDC_FIELD).and_then(|v| v.as_text().ok())
    }

    /// True when the record's IDC equals the canonical decimal rendering of
    /// `idc`. No zero-padding normalization is applied.
    pub fn idc_equals(&self, idc: u32) -> bool {
        self.idc() == Some(idc.to_string().as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_type_numbers_round_trip() {
        for record_type in RecordType::ALL {
            assert_eq!(
                RecordType::from_number(record_type.number()),
                Some(record_type)
            );
        }
        assert_eq!(RecordType::from_number(11), None);
        assert_eq!(RecordType::from_number(0), None);
    }

    #[test]
    fn record_type_ordering_matches_numbers() {
        let numbers: Vec<u32> = RecordType::ALL.iter().map(RecordType::number).collect();
        let mut sorted = numbers.clone();
        sorted.sort_unstable();
        assert_eq!(numbers, sorted);
    }

    #[test]
    fn information_record_field_two_is_not_an_idc() {
        let mut fields = BTreeMap::new();
        fields.insert(IDC_FIELD, FieldValue::text("0400"));
        let record = Record::new(RecordType::TransactionInformation, fields);
        assert_eq!(record.idc(), None);
        assert!(!record.idc_equals(0));
    }

    #[test]
    fn idc_matching_is_literal() {
        let mut fields = BTreeMap::new();
        fields.insert(IDC_FIELD, FieldValue::text("00"));
        let record = Record::new(RecordType::DescriptiveText, fields);
        // "00" is not the canonical rendering of 0
        assert!(!record.idc_equals(0));

        let mut fields = BTreeMap::new();
        fields.insert(IDC_FIELD, FieldValue::text("0"));
        let record = Record::new(RecordType::DescriptiveText, fields);
        assert!(record.idc_equals(0));
    }
}
