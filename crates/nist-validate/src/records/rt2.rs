//! Type-2 descriptive text record checks.
//!
//! Fields past the IDC are user-defined, so only the framing fields are
//! checked.

use nist_model::Record;
use nist_model::fields::rt2;

use crate::report::ValidationError;
use crate::rules::{Rule, RuleKind};

pub fn rules() -> Vec<Rule> {
    vec![
        Rule::new(
            rt2::LEN,
            "LEN_FORMAT",
            RuleKind::MandatoryRegex { pattern: r"\d{1,8}" },
        ),
        Rule::new(
            rt2::IDC,
            "IDC_FORMAT",
            RuleKind::MandatoryRegex { pattern: r"\d{1,2}" },
        ),
    ]
}

pub fn validate(record: &Record, errors: &mut Vec<ValidationError>) {
    for rule in rules() {
        if let Some(error) = rule.evaluate(record) {
            errors.push(error);
        }
    }
}
