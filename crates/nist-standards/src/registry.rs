//! Record-type validity intervals.
//!
//! Each record type carries a created-from revision and an optional
//! deprecated-from revision. A type is legal under standard S when
//! `created <= S` and, if deprecated, `S < deprecated`.

use nist_model::RecordType;

use crate::standard::Standard;

/// Validity interval of one record type.
#[derive(Debug, Clone, Copy)]
pub struct TypeInterval {
    pub record_type: RecordType,
    pub created: Standard,
    pub deprecated: Option<Standard>,
}

const fn interval(
    record_type: RecordType,
    created: Standard,
    deprecated: Option<Standard>,
) -> TypeInterval {
    TypeInterval {
        record_type,
        created,
        deprecated,
    }
}

/// Intervals for every record type, in type-number order.
///
/// Types 3, 5 and 6 (low-resolution and binary fingerprint images) were
/// retired by the 2011 revision; type 17 (iris) arrived with 2007; the 2011
/// revision introduced types 18-21 and 98/99; type 22 arrived with the 2015
/// update.
pub static RECORD_TYPE_INTERVALS: &[TypeInterval] = &[
    interval(RecordType::TransactionInformation, Standard::AnsiNist2000, None),
    interval(RecordType::DescriptiveText, Standard::AnsiNist2000, None),
    interval(
        RecordType::LowResolutionGrayscale,
        Standard::AnsiNist2000,
        Some(Standard::AnsiNist2011),
    ),
    interval(RecordType::HighResolutionGrayscale, Standard::AnsiNist2000, None),
    interval(
        RecordType::LowResolutionBinary,
        Standard::AnsiNist2000,
        Some(Standard::AnsiNist2011),
    ),
    interval(
        RecordType::HighResolutionBinary,
        Standard::AnsiNist2000,
        Some(Standard::AnsiNist2011),
    ),
    interval(RecordType::UserDefinedImage, Standard::AnsiNist2000, None),
    interval(RecordType::SignatureImage, Standard::AnsiNist2000, None),
    interval(RecordType::MinutiaeData, Standard::AnsiNist2000, None),
    interval(RecordType::FacialAndSmtImage, Standard::AnsiNist2000, None),
    interval(RecordType::VariableResolutionLatent, Standard::AnsiNist2000, None),
    interval(
        RecordType::VariableResolutionFingerprint,
        Standard::AnsiNist2000,
        None,
    ),
    interval(RecordType::VariableResolutionPalm, Standard::AnsiNist2000, None),
    interval(RecordType::UserDefinedTestingImage, Standard::AnsiNist2000, None),
    interval(RecordType::IrisImage, Standard::AnsiNist2007, None),
    interval(RecordType::DnaData, Standard::AnsiNist2011, None),
    interval(RecordType::VariableResolutionPlantar, Standard::AnsiNist2011, None),
    interval(RecordType::SourceRepresentation, Standard::AnsiNist2011, None),
    interval(RecordType::AssociatedContext, Standard::AnsiNist2011, None),
    interval(RecordType::NonPhotographicImagery, Standard::AnsiNist2015, None),
    interval(RecordType::InformationAssurance, Standard::AnsiNist2011, None),
    interval(RecordType::CbeffBiometricData, Standard::AnsiNist2011, None),
];

/// The validity interval of one record type.
pub fn interval_of(record_type: RecordType) -> &'static TypeInterval {
    // The table covers every RecordType variant.
    RECORD_TYPE_INTERVALS
        .iter()
        .find(|i| i.record_type == record_type)
        .unwrap_or(&RECORD_TYPE_INTERVALS[0])
}

/// True when `record_type` is legal under `standard`.
pub fn is_record_type_allowed(record_type: RecordType, standard: Standard) -> bool {
    let interval = interval_of(record_type);
    standard.is_between(interval.created, interval.deprecated)
}

/// Every record type whose interval excludes `standard`, in type-number
/// order.
pub fn forbidden_record_types(standard: Standard) -> Vec<RecordType> {
    RECORD_TYPE_INTERVALS
        .iter()
        .filter(|i| !standard.is_between(i.created, i.deprecated))
        .map(|i| i.record_type)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_covers_all_types_in_order() {
        let listed: Vec<RecordType> = RECORD_TYPE_INTERVALS
            .iter()
            .map(|i| i.record_type)
            .collect();
        assert_eq!(listed, RecordType::ALL.to_vec());
    }

    #[test]
    fn iris_forbidden_before_2007() {
        assert!(!is_record_type_allowed(
            RecordType::IrisImage,
            Standard::AnsiNist2000
        ));
        assert!(is_record_type_allowed(
            RecordType::IrisImage,
            Standard::AnsiNist2007
        ));
    }

    #[test]
    fn binary_images_deprecated_from_2011() {
        for record_type in [
            RecordType::LowResolutionGrayscale,
            RecordType::LowResolutionBinary,
            RecordType::HighResolutionBinary,
        ] {
            assert!(is_record_type_allowed(record_type, Standard::AnsiNist2007));
            assert!(!is_record_type_allowed(record_type, Standard::AnsiNist2011));
            assert!(!is_record_type_allowed(record_type, Standard::AnsiNist2015));
        }
    }

    #[test]
    fn forbidden_set_for_2000() {
        let forbidden = forbidden_record_types(Standard::AnsiNist2000);
        // Everything created 2007 or later is forbidden under 2000.
        assert!(forbidden.contains(&RecordType::IrisImage));
        assert!(forbidden.contains(&RecordType::DnaData));
        assert!(forbidden.contains(&RecordType::NonPhotographicImagery));
        assert!(forbidden.contains(&RecordType::CbeffBiometricData));
        // Nothing legal under 2000 appears.
        assert!(!forbidden.contains(&RecordType::TransactionInformation));
        assert!(!forbidden.contains(&RecordType::LowResolutionGrayscale));
        assert!(!forbidden.contains(&RecordType::HighResolutionGrayscale));
        assert_eq!(forbidden.len(), 8);

        // Type-number order.
        let numbers: Vec<u32> = forbidden.iter().map(RecordType::number).collect();
        let mut sorted = numbers.clone();
        sorted.sort_unstable();
        assert_eq!(numbers, sorted);
    }

    #[test]
    fn forbidden_set_for_2015() {
        let forbidden = forbidden_record_types(Standard::AnsiNist2015);
        assert_eq!(
            forbidden,
            vec![
                RecordType::LowResolutionGrayscale,
                RecordType::LowResolutionBinary,
                RecordType::HighResolutionBinary,
            ]
        );
    }
}
