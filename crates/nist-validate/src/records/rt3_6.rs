//! Fixed-resolution fingerprint image records (types 3 through 6).
//!
//! The four types share one field layout; only the compression mnemonic
//! differs (GCA for the grayscale types, BCA for the binary types). All
//! four carry the two-value binary compression code.

use nist_model::fields::{rt3, rt4, rt5, rt6};
use nist_model::{NamedField, Record, RecordType};
use nist_standards::{BINARY_COMPRESSION_CODES, FRICTION_RIDGE_POSITIONS, IMPRESSION_TYPES, Standard};

use crate::report::ValidationError;
use crate::rules::{Rule, RuleKind};

/// Finger position slots carried by the fixed-resolution FGP field.
const FGP_SLOTS: usize = 6;

fn descriptors(record_type: RecordType) -> Option<[NamedField; 9]> {
    Some(match record_type {
        RecordType::LowResolutionGrayscale => [
            rt3::LEN,
            rt3::IDC,
            rt3::IMP,
            rt3::FGP,
            rt3::ISR,
            rt3::HLL,
            rt3::VLL,
            rt3::COMPRESSION,
            rt3::DATA,
        ],
        RecordType::HighResolutionGrayscale => [
            rt4::LEN,
            rt4::IDC,
            rt4::IMP,
            rt4::FGP,
            rt4::ISR,
            rt4::HLL,
            rt4::VLL,
            rt4::COMPRESSION,
            rt4::DATA,
        ],
        RecordType::LowResolutionBinary => [
            rt5::LEN,
            rt5::IDC,
            rt5::IMP,
            rt5::FGP,
            rt5::ISR,
            rt5::HLL,
            rt5::VLL,
            rt5::COMPRESSION,
            rt5::DATA,
        ],
        RecordType::HighResolutionBinary => [
            rt6::LEN,
            rt6::IDC,
            rt6::IMP,
            rt6::FGP,
            rt6::ISR,
            rt6::HLL,
            rt6::VLL,
            rt6::COMPRESSION,
            rt6::DATA,
        ],
        _ => return None,
    })
}

pub fn rules(record_type: RecordType, standard: Standard) -> Vec<Rule> {
    let Some([len, idc, imp, fgp, isr, hll, vll, compression, data]) = descriptors(record_type)
    else {
        return Vec::new();
    };
    let compression_code = if compression.code == "GCA" {
        "GCA_NOT_ALLOWED"
    } else {
        "BCA_NOT_ALLOWED"
    };
    vec![
        Rule::new(
            len,
            "LEN_FORMAT",
            RuleKind::MandatoryRegex { pattern: r"\d{1,8}" },
        ),
        Rule::new(
            idc,
            "IDC_FORMAT",
            RuleKind::MandatoryRegex { pattern: r"\d{1,2}" },
        ),
        Rule::new(
            imp,
            "IMP_NOT_ALLOWED",
            RuleKind::MandatoryCode {
                table: IMPRESSION_TYPES,
                standard,
            },
        ),
        Rule::new(
            fgp,
            "FGP_NOT_ALLOWED",
            RuleKind::MandatoryCodeList {
                table: FRICTION_RIDGE_POSITIONS,
                standard,
                expected: Some(FGP_SLOTS),
                allow_filler: true,
            },
        ),
        Rule::new(
            isr,
            "ISR_INVALID",
            RuleKind::MandatoryInSet {
                values: &["0", "1"],
            },
        ),
        Rule::new(
            hll,
            "HLL_RANGE",
            RuleKind::MandatoryRange { min: 1, max: 99_999 },
        ),
        Rule::new(
            vll,
            "VLL_RANGE",
            RuleKind::MandatoryRange { min: 1, max: 99_999 },
        ),
        Rule::new(
            compression,
            compression_code,
            RuleKind::MandatoryCode {
                table: BINARY_COMPRESSION_CODES,
                standard,
            },
        ),
        Rule::new(data, "DATA_MISSING", RuleKind::MandatoryDataPresent),
    ]
}

pub fn validate(record: &Record, standard: Standard, errors: &mut Vec<ValidationError>) {
    for rule in rules(record.record_type(), standard) {
        if let Some(error) = rule.evaluate(record) {
            errors.push(error);
        }
    }
}
