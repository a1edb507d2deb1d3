//! Rule primitives.
//!
//! A [`Rule`] binds one field descriptor to one declarative check. Record
//! validators are plain rule lists; evaluation never short-circuits across
//! fields, so one pass reports every violation in a record.

use std::collections::HashMap;
use std::sync::{LazyLock, Mutex, PoisonError};

use chrono::{NaiveDate, NaiveDateTime};
use nist_codec::subfield;
use nist_model::{FieldValue, NamedField, Record};
use nist_standards::{ReferenceCode, Standard, reference};
use regex::Regex;

use crate::report::ValidationError;

/// Friction-ridge filler code marking an unused position slot.
const UNUSED_POSITION: &str = "255";

/// One declarative field check.
#[derive(Debug, Clone)]
pub enum RuleKind {
    /// Field must exist and carry non-empty text.
    MandatoryNonEmpty,
    /// Field must exist and fully match the pattern.
    MandatoryRegex { pattern: &'static str },
    /// Field may be missing or empty; a present value must fully match.
    OptionalRegex { pattern: &'static str },
    /// Field must exist and equal the value exactly.
    MandatoryExact { value: &'static str },
    /// Field must exist and be a strict `YYYYMMDD` calendar date.
    MandatoryDate,
    /// Field must exist and be a strict `YYYYMMDDHHMMSSZ` UTC timestamp.
    MandatoryDateTime,
    /// Field must exist and name one of the listed values.
    MandatoryInSet { values: &'static [&'static str] },
    /// Field must exist and parse to an integer within the closed range.
    MandatoryRange { min: i64, max: i64 },
    /// Field must exist and hold exactly this many characters.
    MandatoryFixedLength { length: usize },
    /// Field must exist and name a reference code legal under the standard.
    MandatoryCode {
        table: &'static [ReferenceCode],
        standard: Standard,
    },
    /// Field must exist and hold subfields naming reference codes legal
    /// under the standard. `expected` pins the subfield count;
    /// `allow_filler` additionally accepts the unused-position filler.
    MandatoryCodeList {
        table: &'static [ReferenceCode],
        standard: Standard,
        expected: Option<usize>,
        allow_filler: bool,
    },
    /// Field must exist and carry a non-empty binary payload.
    MandatoryDataPresent,
    /// Field must be missing or empty.
    Absent,
    /// Every part must pass; the first failure is reported.
    AllOf(Vec<RuleKind>),
    /// At least one alternative must pass.
    AnyOf(Vec<RuleKind>),
}

/// A field descriptor paired with a check and a machine error code.
#[derive(Debug, Clone)]
pub struct Rule {
    pub field: NamedField,
    pub code: &'static str,
    pub kind: RuleKind,
}

impl Rule {
    pub fn new(field: NamedField, code: &'static str, kind: RuleKind) -> Self {
        Self { field, code, kind }
    }

    /// Run the check against the record; `None` means it passed.
    pub fn evaluate(&self, record: &Record) -> Option<ValidationError> {
        let value = record.field(self.field.number);
        match check(&self.kind, value) {
            Ok(()) => None,
            Err(message) => Some(error_for(&self.field, record, self.code, message)),
        }
    }
}

/// Build an addressed error for a field of a record.
pub(crate) fn error_for(
    field: &NamedField,
    record: &Record,
    code: &'static str,
    message: String,
) -> ValidationError {
    let attempted = record
        .field(field.number)
        .and_then(|v| v.as_text().ok())
        .map(str::to_string);
    ValidationError {
        code,
        message,
        field_code: field.code.to_string(),
        field_number: field.number,
        record_type: field.record_type.number(),
        idc: record.idc().map(str::to_string),
        attempted,
    }
}

fn require_text(value: Option<&FieldValue>) -> Result<&str, String> {
    match value {
        None => Err("field is missing".to_string()),
        Some(v) => v
            .as_text()
            .map_err(|_| "field holds binary data, expected text".to_string()),
    }
}

/// Compiled anchored patterns, keyed by the rule's pattern literal. Rules
/// carry `'static` patterns, so the cache never grows past the rule tables.
static COMPILED_PATTERNS: LazyLock<Mutex<HashMap<&'static str, Option<Regex>>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

pub(crate) fn full_match(pattern: &'static str, text: &str) -> bool {
    let mut cache = COMPILED_PATTERNS
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    cache
        .entry(pattern)
        .or_insert_with(|| Regex::new(&format!("^(?:{pattern})$")).ok())
        .as_ref()
        .is_some_and(|re| re.is_match(text))
}

fn check_date(text: &str) -> Result<(), String> {
    let strict = text.len() == 8 && text.bytes().all(|b| b.is_ascii_digit());
    if strict && NaiveDate::parse_from_str(text, "%Y%m%d").is_ok() {
        Ok(())
    } else {
        Err(format!("{text:?} is not a YYYYMMDD calendar date"))
    }
}

fn check_datetime(text: &str) -> Result<(), String> {
    let strict = text.len() == 15
        && text.ends_with('Z')
        && text.bytes().take(14).all(|b| b.is_ascii_digit());
    if strict && NaiveDateTime::parse_from_str(&text[..14], "%Y%m%d%H%M%S").is_ok() {
        Ok(())
    } else {
        Err(format!("{text:?} is not a YYYYMMDDHHMMSSZ UTC timestamp"))
    }
}

fn check(kind: &RuleKind, value: Option<&FieldValue>) -> Result<(), String> {
    match kind {
        RuleKind::MandatoryNonEmpty => {
            let text = require_text(value)?;
            if text.is_empty() {
                Err("mandatory field is empty".to_string())
            } else {
                Ok(())
            }
        }
        RuleKind::MandatoryRegex { pattern } => {
            let text = require_text(value)?;
            if full_match(*pattern, text) {
                Ok(())
            } else {
                Err(format!("{text:?} does not match {pattern}"))
            }
        }
        RuleKind::OptionalRegex { pattern } => match value {
            None => Ok(()),
            Some(v) if v.is_empty() => Ok(()),
            Some(_) => check(&RuleKind::MandatoryRegex { pattern: *pattern }, value),
        },
        RuleKind::MandatoryExact { value: expected } => {
            let text = require_text(value)?;
            if text == *expected {
                Ok(())
            } else {
                Err(format!("expected {expected:?}, found {text:?}"))
            }
        }
        RuleKind::MandatoryDate => check_date(require_text(value)?),
        RuleKind::MandatoryDateTime => check_datetime(require_text(value)?),
        RuleKind::MandatoryInSet { values } => {
            let text = require_text(value)?;
            if values.contains(&text) {
                Ok(())
            } else {
                Err(format!("{text:?} is not one of {values:?}"))
            }
        }
        RuleKind::MandatoryRange { min, max } => {
            let text = require_text(value)?;
            match text.parse::<i64>() {
                Ok(n) if (*min..=*max).contains(&n) => Ok(()),
                Ok(n) => Err(format!("{n} is outside {min}..={max}")),
                Err(_) => Err(format!("{text:?} is not an integer")),
            }
        }
        RuleKind::MandatoryFixedLength { length } => {
            let text = require_text(value)?;
            let count = text.chars().count();
            if count == *length {
                Ok(())
            } else {
                Err(format!("expected {length} characters, found {count}"))
            }
        }
        RuleKind::MandatoryCode { table, standard } => {
            let text = require_text(value)?;
            if reference::is_code_allowed(table, text, *standard) {
                Ok(())
            } else {
                Err(format!("{text:?} is not a legal code under {standard}"))
            }
        }
        RuleKind::MandatoryCodeList {
            table,
            standard,
            expected,
            allow_filler,
        } => {
            let text = require_text(value)?;
            let subfields = subfield::decode_subfields(text);
            if let Some(expected) = expected
                && subfields.len() != *expected
            {
                return Err(format!(
                    "expected {expected} subfields, found {}",
                    subfields.len()
                ));
            }
            for code in &subfields {
                let filler = *allow_filler && code.as_str() == UNUSED_POSITION;
                if !filler && !reference::is_code_allowed(table, code, *standard) {
                    return Err(format!("{code:?} is not a legal code under {standard}"));
                }
            }
            Ok(())
        }
        RuleKind::MandatoryDataPresent => match value {
            Some(v) if v.is_image() && !v.is_empty() => Ok(()),
            Some(v) if v.is_image() => Err("image payload is empty".to_string()),
            Some(_) => Err("field holds text, expected binary image data".to_string()),
            None => Err("field is missing".to_string()),
        },
        RuleKind::Absent => match value {
            None => Ok(()),
            Some(v) if v.is_empty() => Ok(()),
            Some(_) => Err("field must be absent".to_string()),
        },
        RuleKind::AllOf(parts) => parts.iter().try_for_each(|part| check(part, value)),
        RuleKind::AnyOf(alternatives) => {
            let mut last = "no alternative matched".to_string();
            for alternative in alternatives {
                match check(alternative, value) {
                    Ok(()) => return Ok(()),
                    Err(message) => last = message,
                }
            }
            Err(last)
        }
    }
}
