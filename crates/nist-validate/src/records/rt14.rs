//! Type-14 variable-resolution fingerprint image record checks.

use nist_model::Record;
use nist_model::fields::rt14;
use nist_standards::{COMPRESSION_ALGORITHMS, FRICTION_RIDGE_POSITIONS, IMPRESSION_TYPES, Standard};

use crate::report::ValidationError;
use crate::rules::{Rule, RuleKind};

pub fn rules(standard: Standard) -> Vec<Rule> {
    vec![
        Rule::new(
            rt14::LEN,
            "LEN_FORMAT",
            RuleKind::MandatoryRegex { pattern: r"\d{1,8}" },
        ),
        Rule::new(
            rt14::IDC,
            "IDC_FORMAT",
            RuleKind::MandatoryRegex { pattern: r"\d{1,2}" },
        ),
        Rule::new(
            rt14::IMP,
            "IMP_NOT_ALLOWED",
            RuleKind::MandatoryCode {
                table: IMPRESSION_TYPES,
                standard,
            },
        ),
        Rule::new(rt14::SRC, "SRC_MISSING", RuleKind::MandatoryNonEmpty),
        Rule::new(rt14::FCD, "FCD_FORMAT", RuleKind::MandatoryDate),
        Rule::new(
            rt14::HLL,
            "HLL_RANGE",
            RuleKind::MandatoryRange { min: 1, max: 99_999 },
        ),
        Rule::new(
            rt14::VLL,
            "VLL_RANGE",
            RuleKind::MandatoryRange { min: 1, max: 99_999 },
        ),
        Rule::new(
            rt14::SLC,
            "SLC_INVALID",
            RuleKind::MandatoryInSet {
                values: &["0", "1", "2"],
            },
        ),
        Rule::new(
            rt14::THPS,
            "THPS_FORMAT",
            RuleKind::MandatoryRegex { pattern: r"\d{1,5}" },
        ),
        Rule::new(
            rt14::TVPS,
            "TVPS_FORMAT",
            RuleKind::MandatoryRegex { pattern: r"\d{1,5}" },
        ),
        Rule::new(
            rt14::CGA,
            "CGA_NOT_ALLOWED",
            RuleKind::MandatoryCode {
                table: COMPRESSION_ALGORITHMS,
                standard,
            },
        ),
        Rule::new(
            rt14::BPX,
            "BPX_RANGE",
            RuleKind::MandatoryRange { min: 8, max: 99 },
        ),
        // A type-14 record carries exactly one finger position.
        Rule::new(
            rt14::FGP,
            "FGP_NOT_ALLOWED",
            RuleKind::MandatoryCodeList {
                table: FRICTION_RIDGE_POSITIONS,
                standard,
                expected: Some(1),
                allow_filler: false,
            },
        ),
        Rule::new(rt14::DATA, "DATA_MISSING", RuleKind::MandatoryDataPresent),
    ]
}

pub fn validate(record: &Record, standard: Standard, errors: &mut Vec<ValidationError>) {
    for rule in rules(standard) {
        if let Some(error) = rule.evaluate(record) {
            errors.push(error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nist_model::{IDC_FIELD, LEN_FIELD, RecordBuilder, RecordType};

    fn fingerprint_record() -> RecordBuilder {
        RecordBuilder::new(RecordType::VariableResolutionFingerprint)
            .with_text(LEN_FIELD, "2048")
            .with_text(IDC_FIELD, "3")
            .with_text(3, "0")
            .with_text(4, "BOOKING STATION 12")
            .with_text(5, "20260112")
            .with_text(6, "800")
            .with_text(7, "750")
            .with_text(8, "1")
            .with_text(9, "500")
            .with_text(10, "500")
            .with_text(11, "WSQ20")
            .with_text(12, "8")
            .with_text(13, "2")
            .with_image(999, vec![0xEF; 1024])
    }

    #[test]
    fn complete_record_passes() {
        let record = fingerprint_record().build().unwrap();
        let mut errors = Vec::new();
        validate(&record, Standard::AnsiNist2011, &mut errors);
        assert_eq!(errors, Vec::new());
    }

    #[test]
    fn multiple_positions_are_rejected() {
        let record = fingerprint_record()
            .with_text(13, "2\u{1e}3")
            .build()
            .unwrap();
        let mut errors = Vec::new();
        validate(&record, Standard::AnsiNist2011, &mut errors);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, "FGP_NOT_ALLOWED");
    }

    #[test]
    fn contactless_impression_needs_a_recent_revision() {
        let record = fingerprint_record().with_text(3, "28").build().unwrap();
        let mut errors = Vec::new();
        validate(&record, Standard::AnsiNist2007, &mut errors);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, "IMP_NOT_ALLOWED");

        let record = fingerprint_record().with_text(3, "28").build().unwrap();
        let mut errors = Vec::new();
        validate(&record, Standard::AnsiNist2011, &mut errors);
        assert_eq!(errors, Vec::new());
    }
}
