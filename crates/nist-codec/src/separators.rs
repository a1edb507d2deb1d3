//! Structural separator bytes.
//!
//! These are fixed ASCII control codes, independent of the active character
//! set: field and record boundaries are always recognized on the raw bytes,
//! so switching the text decoder never corrupts structural parsing.

/// Record boundary (ASCII file separator).
pub const FS: u8 = 0x1C;

/// Field boundary within a record (ASCII group separator).
pub const GS: u8 = 0x1D;

/// Subfield boundary within a field (ASCII record separator).
pub const RS: u8 = 0x1E;

/// Item boundary within a subfield (ASCII unit separator).
pub const US: u8 = 0x1F;

/// Subfield boundary as a char, for text-level splitting.
pub const RS_CHAR: char = RS as char;

/// Item boundary as a char, for text-level splitting.
pub const US_CHAR: char = US as char;
