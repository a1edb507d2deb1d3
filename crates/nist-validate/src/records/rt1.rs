//! Type-1 transaction information record checks.

use nist_codec::{CharacterSet, subfield, tcn};
use nist_model::Record;
use nist_model::fields::rt1;
use nist_standards::Standard;

use crate::report::ValidationError;
use crate::rules::{Rule, RuleKind, error_for, full_match};

/// Field-level rules for the information record under a revision.
pub fn rules(standard: Standard) -> Vec<Rule> {
    vec![
        Rule::new(
            rt1::LEN,
            "LEN_FORMAT",
            RuleKind::MandatoryRegex { pattern: r"\d{1,8}" },
        ),
        Rule::new(
            rt1::VER,
            "VER_UNSUPPORTED",
            RuleKind::MandatoryExact {
                value: standard.code(),
            },
        ),
        Rule::new(rt1::CNT, "CNT_MISSING", RuleKind::MandatoryNonEmpty),
        Rule::new(
            rt1::TOT,
            "TOT_FORMAT",
            RuleKind::MandatoryRegex {
                pattern: "[A-Z]{3,4}",
            },
        ),
        Rule::new(rt1::DAT, "DAT_FORMAT", RuleKind::MandatoryDate),
        Rule::new(
            rt1::PRY,
            "PRY_RANGE",
            RuleKind::AnyOf(vec![
                RuleKind::Absent,
                RuleKind::MandatoryRange { min: 1, max: 9 },
            ]),
        ),
        Rule::new(rt1::DAI, "DAI_MISSING", RuleKind::MandatoryNonEmpty),
        Rule::new(rt1::ORI, "ORI_MISSING", RuleKind::MandatoryNonEmpty),
        Rule::new(
            rt1::TCN,
            "TCN_FORMAT",
            RuleKind::AllOf(vec![
                RuleKind::MandatoryFixedLength { length: 11 },
                RuleKind::MandatoryRegex {
                    pattern: r"\d{10}[A-HJ-NP-RT-Z]",
                },
            ]),
        ),
        // TCR references the TCN of a prior transaction.
        Rule::new(
            rt1::TCR,
            "TCR_FORMAT",
            RuleKind::OptionalRegex {
                pattern: r"\d{10}[A-HJ-NP-RT-Z]",
            },
        ),
        Rule::new(
            rt1::GMT,
            "GMT_FORMAT",
            RuleKind::AnyOf(vec![RuleKind::Absent, RuleKind::MandatoryDateTime]),
        ),
    ]
}

pub fn validate(record: &Record, standard: Standard, errors: &mut Vec<ValidationError>) {
    for rule in rules(standard) {
        if let Some(error) = rule.evaluate(record) {
            errors.push(error);
        }
    }
    check_tcn(record, errors);
    check_dcs(record, errors);
}

/// A shape-correct TCN must recompute to its own check character. Missing
/// or malformed values are already flagged by the TCN_FORMAT rule.
fn check_tcn(record: &Record, errors: &mut Vec<ValidationError>) {
    let Some(text) = record.named_field(&rt1::TCN).and_then(|v| v.as_text().ok()) else {
        return;
    };
    if full_match(r"\d{10}[A-HJ-NP-RT-Z]", text) && !tcn::is_valid(text) {
        errors.push(error_for(
            &rt1::TCN,
            record,
            "TCN_INVALID",
            "transaction control number fails its check character".to_string(),
        ));
    }
}

/// An optional DCS directory must name a supported character set in its
/// first subfield's index item.
fn check_dcs(record: &Record, errors: &mut Vec<ValidationError>) {
    let Some(text) = record.named_field(&rt1::DCS).and_then(|v| v.as_text().ok()) else {
        return;
    };
    if text.is_empty() {
        return;
    }
    let index = subfield::decode_list_of_lists(text)
        .first()
        .and_then(|items| items.first())
        .cloned()
        .unwrap_or_default();
    if CharacterSet::from_dcs_code(&index).is_none() {
        errors.push(error_for(
            &rt1::DCS,
            record,
            "DCS_UNSUPPORTED",
            format!("{index:?} selects no supported character set"),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nist_model::{RecordBuilder, RecordType};

    fn minimal_valid() -> RecordBuilder {
        let check = tcn::calculate_check_digit("26", "00000001").unwrap();
        RecordBuilder::new(RecordType::TransactionInformation)
            .with_text(1, "120")
            .with_text(2, "0400")
            .with_text(3, "1\u{1f}0")
            .with_text(4, "CAR")
            .with_text(5, "20260114")
            .with_text(7, "DAI000001")
            .with_text(8, "MDNISTIMG")
            .with_text(9, format!("2600000001{check}"))
    }

    #[test]
    fn minimal_record_passes() {
        let record = minimal_valid().build().unwrap();
        let mut errors = Vec::new();
        validate(&record, Standard::AnsiNist2007, &mut errors);
        assert_eq!(errors, Vec::new());
    }

    #[test]
    fn version_is_checked_against_the_revision() {
        let record = minimal_valid().build().unwrap();
        let mut errors = Vec::new();
        validate(&record, Standard::AnsiNist2011, &mut errors);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, "VER_UNSUPPORTED");
        assert_eq!(errors[0].attempted.as_deref(), Some("0400"));
    }

    #[test]
    fn bad_check_character_is_flagged() {
        // The correct check character for 2600000001 is 'G'.
        let record = minimal_valid()
            .with_text(9, "2600000001H")
            .build()
            .unwrap();
        let mut errors = Vec::new();
        validate(&record, Standard::AnsiNist2007, &mut errors);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, "TCN_INVALID");
        assert_eq!(errors[0].address().to_string(), "TCN|9|1|");
    }

    #[test]
    fn unknown_dcs_index_is_flagged() {
        let record = minimal_valid()
            .with_text(15, "001\u{1f}EBCDIC")
            .build()
            .unwrap();
        let mut errors = Vec::new();
        validate(&record, Standard::AnsiNist2007, &mut errors);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, "DCS_UNSUPPORTED");
    }

    #[test]
    fn all_violations_are_reported_in_one_pass() {
        let record = RecordBuilder::new(RecordType::TransactionInformation)
            .with_text(2, "9999")
            .with_text(4, "car")
            .with_text(6, "99")
            .build()
            .unwrap();
        let mut errors = Vec::new();
        validate(&record, Standard::AnsiNist2007, &mut errors);
        let codes: Vec<&str> = errors.iter().map(|e| e.code).collect();
        // LEN, VER, CNT, TOT, DAT, PRY, DAI, ORI, TCN all fail; TCR, GMT
        // and DCS are optional and pass by absence.
        assert!(codes.contains(&"LEN_FORMAT"));
        assert!(codes.contains(&"VER_UNSUPPORTED"));
        assert!(codes.contains(&"CNT_MISSING"));
        assert!(codes.contains(&"TOT_FORMAT"));
        assert!(codes.contains(&"DAT_FORMAT"));
        assert!(codes.contains(&"PRY_RANGE"));
        assert!(codes.contains(&"TCN_FORMAT"));
        assert_eq!(errors.len(), 9);
    }
}
