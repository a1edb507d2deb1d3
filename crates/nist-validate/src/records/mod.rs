//! Per-record-type validators.
//!
//! Each module exposes the rule list for its record type plus the
//! cross-field checks that cannot be expressed as a single-field rule.

pub mod rt1;
pub mod rt2;
pub mod rt3_6;
pub mod rt13;
pub mod rt14;
