//! ANSI/NIST-ITL standard revisions and their gating tables.
//!
//! The five revisions form a total order; record types and reference codes
//! each carry a created-from / deprecated-from interval over that order.
//! Everything here is process-wide immutable data: no loading, no mutable
//! global state.

pub mod error;
pub mod reference;
pub mod registry;
pub mod standard;

pub use error::{Result, StandardsError};
pub use reference::{
    BINARY_COMPRESSION_CODES, COMPRESSION_ALGORITHMS, EJI_CODE, FRICTION_RIDGE_POSITIONS,
    IMPRESSION_TYPES, ReferenceCode, allowed_codes, is_code_allowed,
};
pub use registry::{
    RECORD_TYPE_INTERVALS, TypeInterval, forbidden_record_types, interval_of,
    is_record_type_allowed,
};
pub use standard::Standard;
