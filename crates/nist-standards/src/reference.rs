//! Reference code tables.
//!
//! Domain-specific enumerated values (friction-ridge positions, compression
//! algorithms, impression types) each carry their own created-from and
//! optional deprecated-from revision. Tables here are process-wide constant
//! data; the exhaustive published enumerations live with external
//! collaborators and can be swapped in through the same lookup functions.

use crate::standard::Standard;

/// A reference code with its standard-validity interval.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceCode {
    pub code: &'static str,
    pub description: &'static str,
    pub created: Standard,
    pub deprecated: Option<Standard>,
}

const fn code(
    code: &'static str,
    description: &'static str,
    created: Standard,
    deprecated: Option<Standard>,
) -> ReferenceCode {
    ReferenceCode {
        code,
        description,
        created,
        deprecated,
    }
}

/// Friction-ridge position code for the EJI (entire joint image) position.
/// Gates the PPD/PPC fields of type-13 records.
pub const EJI_CODE: &str = "19";

/// Friction-ridge generalized position codes.
pub static FRICTION_RIDGE_POSITIONS: &[ReferenceCode] = &[
    code("0", "Unknown finger", Standard::AnsiNist2000, None),
    code("1", "Right thumb", Standard::AnsiNist2000, None),
    code("2", "Right index finger", Standard::AnsiNist2000, None),
    code("3", "Right middle finger", Standard::AnsiNist2000, None),
    code("4", "Right ring finger", Standard::AnsiNist2000, None),
    code("5", "Right little finger", Standard::AnsiNist2000, None),
    code("6", "Left thumb", Standard::AnsiNist2000, None),
    code("7", "Left index finger", Standard::AnsiNist2000, None),
    code("8", "Left middle finger", Standard::AnsiNist2000, None),
    code("9", "Left ring finger", Standard::AnsiNist2000, None),
    code("10", "Left little finger", Standard::AnsiNist2000, None),
    code("11", "Plain right thumb", Standard::AnsiNist2000, None),
    code("12", "Plain left thumb", Standard::AnsiNist2000, None),
    code("13", "Plain right four fingers", Standard::AnsiNist2000, None),
    code("14", "Plain left four fingers", Standard::AnsiNist2000, None),
    code("15", "Left and right thumbs", Standard::AnsiNist2000, None),
    code("19", "EJI or tip", Standard::AnsiNist2000, None),
    code("20", "Unknown palm", Standard::AnsiNist2007, None),
    code("21", "Right full palm", Standard::AnsiNist2007, None),
    code("22", "Right writer's palm", Standard::AnsiNist2007, None),
    code("23", "Left full palm", Standard::AnsiNist2007, None),
    code("24", "Left writer's palm", Standard::AnsiNist2007, None),
    code("25", "Right lower palm", Standard::AnsiNist2007, None),
    code("26", "Right upper palm", Standard::AnsiNist2007, None),
    code("27", "Left lower palm", Standard::AnsiNist2007, None),
    code("28", "Left upper palm", Standard::AnsiNist2007, None),
];

/// Image compression algorithm codes.
pub static COMPRESSION_ALGORITHMS: &[ReferenceCode] = &[
    code("NONE", "Uncompressed", Standard::AnsiNist2000, None),
    code("WSQ20", "WSQ Gray-scale 2.0", Standard::AnsiNist2000, None),
    code("JPEGB", "JPEG ISO/IEC 10918 (baseline)", Standard::AnsiNist2000, None),
    code("JPEGL", "JPEG ISO/IEC 10918 (lossless)", Standard::AnsiNist2000, None),
    code("JP2", "JPEG 2000 ISO/IEC 15444-1 (lossy)", Standard::AnsiNist2007, None),
    code("JP2L", "JPEG 2000 ISO/IEC 15444-1 (lossless)", Standard::AnsiNist2007, None),
    code("PNG", "Portable Network Graphics", Standard::AnsiNist2007, None),
];

/// Binary-field compression codes used by the fixed-resolution image
/// records (types 3-6): 0 = none, 1 = WSQ.
pub static BINARY_COMPRESSION_CODES: &[ReferenceCode] = &[
    code("0", "Uncompressed", Standard::AnsiNist2000, None),
    code("1", "WSQ Gray-scale", Standard::AnsiNist2000, None),
];

/// Impression type codes.
pub static IMPRESSION_TYPES: &[ReferenceCode] = &[
    code("0", "Live-scan plain", Standard::AnsiNist2000, None),
    code("1", "Live-scan rolled", Standard::AnsiNist2000, None),
    code("2", "Non-live-scan plain", Standard::AnsiNist2000, None),
    code("3", "Non-live-scan rolled", Standard::AnsiNist2000, None),
    code("4", "Latent impression", Standard::AnsiNist2000, None),
    code("5", "Latent tracing", Standard::AnsiNist2000, None),
    code("6", "Latent photo", Standard::AnsiNist2000, None),
    code("7", "Latent lift", Standard::AnsiNist2000, None),
    code("8", "Live-scan vertical swipe", Standard::AnsiNist2000, None),
    code("24", "Live-scan optical contact plain", Standard::AnsiNist2011, None),
    code("25", "Live-scan optical contact rolled", Standard::AnsiNist2011, None),
    code("26", "Live-scan non-optical contact plain", Standard::AnsiNist2011, None),
    code("27", "Live-scan non-optical contact rolled", Standard::AnsiNist2011, None),
    code("28", "Live-scan optical contactless plain", Standard::AnsiNist2011, None),
    code("29", "Live-scan optical contactless rolled", Standard::AnsiNist2011, None),
];

/// True when `value` names a code of `table` that is legal under `standard`.
pub fn is_code_allowed(table: &[ReferenceCode], value: &str, standard: Standard) -> bool {
    table
        .iter()
        .any(|c| c.code == value && standard.is_between(c.created, c.deprecated))
}

/// All codes of `table` legal under `standard`.
pub fn allowed_codes<'a>(
    table: &'a [ReferenceCode],
    standard: Standard,
) -> impl Iterator<Item = &'a ReferenceCode> {
    table
        .iter()
        .filter(move |c| standard.is_between(c.created, c.deprecated))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palm_codes_gated_by_revision() {
        assert!(!is_code_allowed(
            FRICTION_RIDGE_POSITIONS,
            "21",
            Standard::AnsiNist2000
        ));
        assert!(is_code_allowed(
            FRICTION_RIDGE_POSITIONS,
            "21",
            Standard::AnsiNist2007
        ));
        // Finger positions are valid everywhere.
        assert!(is_code_allowed(
            FRICTION_RIDGE_POSITIONS,
            "1",
            Standard::AnsiNist2000
        ));
    }

    #[test]
    fn unknown_code_is_never_allowed() {
        assert!(!is_code_allowed(
            COMPRESSION_ALGORITHMS,
            "BMP",
            Standard::AnsiNist2015
        ));
    }

    #[test]
    fn allowed_code_count_grows_with_revision() {
        let at_2000 = allowed_codes(IMPRESSION_TYPES, Standard::AnsiNist2000).count();
        let at_2011 = allowed_codes(IMPRESSION_TYPES, Standard::AnsiNist2011).count();
        assert_eq!(at_2000, 9);
        assert_eq!(at_2011, 15);
    }
}
