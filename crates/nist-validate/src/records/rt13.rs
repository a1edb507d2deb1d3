//! Type-13 variable-resolution latent image record checks.

use nist_codec::subfield;
use nist_model::Record;
use nist_model::fields::rt13;
use nist_standards::{
    COMPRESSION_ALGORITHMS, EJI_CODE, FRICTION_RIDGE_POSITIONS, IMPRESSION_TYPES, Standard,
};

use crate::report::ValidationError;
use crate::rules::{Rule, RuleKind};

pub fn rules(standard: Standard) -> Vec<Rule> {
    vec![
        Rule::new(
            rt13::LEN,
            "LEN_FORMAT",
            RuleKind::MandatoryRegex { pattern: r"\d{1,8}" },
        ),
        Rule::new(
            rt13::IDC,
            "IDC_FORMAT",
            RuleKind::MandatoryRegex { pattern: r"\d{1,2}" },
        ),
        Rule::new(
            rt13::IMP,
            "IMP_NOT_ALLOWED",
            RuleKind::MandatoryCode {
                table: IMPRESSION_TYPES,
                standard,
            },
        ),
        Rule::new(rt13::SRC, "SRC_MISSING", RuleKind::MandatoryNonEmpty),
        Rule::new(rt13::LCD, "LCD_FORMAT", RuleKind::MandatoryDate),
        Rule::new(
            rt13::HLL,
            "HLL_RANGE",
            RuleKind::MandatoryRange { min: 1, max: 99_999 },
        ),
        Rule::new(
            rt13::VLL,
            "VLL_RANGE",
            RuleKind::MandatoryRange { min: 1, max: 99_999 },
        ),
        Rule::new(
            rt13::SLC,
            "SLC_INVALID",
            RuleKind::MandatoryInSet {
                values: &["0", "1", "2"],
            },
        ),
        Rule::new(
            rt13::THPS,
            "THPS_FORMAT",
            RuleKind::MandatoryRegex { pattern: r"\d{1,5}" },
        ),
        Rule::new(
            rt13::TVPS,
            "TVPS_FORMAT",
            RuleKind::MandatoryRegex { pattern: r"\d{1,5}" },
        ),
        Rule::new(
            rt13::CGA,
            "CGA_NOT_ALLOWED",
            RuleKind::MandatoryCode {
                table: COMPRESSION_ALGORITHMS,
                standard,
            },
        ),
        Rule::new(
            rt13::BPX,
            "BPX_RANGE",
            RuleKind::MandatoryRange { min: 8, max: 99 },
        ),
        Rule::new(
            rt13::FGP,
            "FGP_NOT_ALLOWED",
            RuleKind::MandatoryCodeList {
                table: FRICTION_RIDGE_POSITIONS,
                standard,
                expected: None,
                allow_filler: false,
            },
        ),
        Rule::new(rt13::DATA, "DATA_MISSING", RuleKind::MandatoryDataPresent),
    ]
}

pub fn validate(record: &Record, standard: Standard, errors: &mut Vec<ValidationError>) {
    for rule in rules(standard) {
        if let Some(error) = rule.evaluate(record) {
            errors.push(error);
        }
    }
    for rule in eji_rules(record) {
        if let Some(error) = rule.evaluate(record) {
            errors.push(error);
        }
    }
}

/// PPD and PPC describe segments of an entire-joint image; they are only
/// legal when the leading FGP position is the EJI code.
fn eji_rules(record: &Record) -> Vec<Rule> {
    let leading = record
        .named_field(&rt13::FGP)
        .and_then(|v| v.as_text().ok())
        .and_then(|text| subfield::decode_subfields(text).into_iter().next());
    if leading.as_deref() == Some(EJI_CODE) {
        return Vec::new();
    }
    vec![
        Rule::new(rt13::PPD, "PPD_NOT_ALLOWED", RuleKind::Absent),
        Rule::new(rt13::PPC, "PPC_NOT_ALLOWED", RuleKind::Absent),
    ]
}
