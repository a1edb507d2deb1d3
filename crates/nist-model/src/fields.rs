//! Symbolic field descriptors.
//!
//! Validation errors address fields by mnemonic code and number; these
//! tables map between the two for the record types the validation engine
//! knows about. Field numbers without a descriptor are still legal on the
//! wire (user-defined fields), they just have no mnemonic.

use crate::record::RecordType;

/// A symbolic field descriptor: record type, field number, mnemonic code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedField {
    pub record_type: RecordType,
    pub number: u32,
    pub code: &'static str,
}

impl NamedField {
    const fn new(record_type: RecordType, number: u32, code: &'static str) -> Self {
        Self {
            record_type,
            number,
            code,
        }
    }
}

/// Type-1 transaction information fields.
pub mod rt1 {
    use super::NamedField;
    use crate::record::RecordType;

    const RT: RecordType = RecordType::TransactionInformation;

    pub const LEN: NamedField = NamedField::new(RT, 1, "LEN");
    pub const VER: NamedField = NamedField::new(RT, 2, "VER");
    pub const CNT: NamedField = NamedField::new(RT, 3, "CNT");
    pub const TOT: NamedField = NamedField::new(RT, 4, "TOT");
    pub const DAT: NamedField = NamedField::new(RT, 5, "DAT");
    pub const PRY: NamedField = NamedField::new(RT, 6, "PRY");
    pub const DAI: NamedField = NamedField::new(RT, 7, "DAI");
    pub const ORI: NamedField = NamedField::new(RT, 8, "ORI");
    pub const TCN: NamedField = NamedField::new(RT, 9, "TCN");
    pub const TCR: NamedField = NamedField::new(RT, 10, "TCR");
    pub const NSR: NamedField = NamedField::new(RT, 11, "NSR");
    pub const NTR: NamedField = NamedField::new(RT, 12, "NTR");
    pub const DOM: NamedField = NamedField::new(RT, 13, "DOM");
    pub const GMT: NamedField = NamedField::new(RT, 14, "GMT");
    pub const DCS: NamedField = NamedField::new(RT, 15, "DCS");

    pub(super) const ALL: &[NamedField] = &[
        LEN, VER, CNT, TOT, DAT, PRY, DAI, ORI, TCN, TCR, NSR, NTR, DOM, GMT, DCS,
    ];
}

/// Type-2 descriptive text fields. Fields past the IDC are user-defined.
pub mod rt2 {
    use super::NamedField;
    use crate::record::RecordType;

    const RT: RecordType = RecordType::DescriptiveText;

    pub const LEN: NamedField = NamedField::new(RT, 1, "LEN");
    pub const IDC: NamedField = NamedField::new(RT, 2, "IDC");

    pub(super) const ALL: &[NamedField] = &[LEN, IDC];
}

macro_rules! fixed_resolution_fields {
    ($mod_name:ident, $variant:ident, $compression:literal) => {
        pub mod $mod_name {
            use super::NamedField;
            use crate::record::RecordType;

            const RT: RecordType = RecordType::$variant;

            pub const LEN: NamedField = NamedField::new(RT, 1, "LEN");
            pub const IDC: NamedField = NamedField::new(RT, 2, "IDC");
            pub const IMP: NamedField = NamedField::new(RT, 3, "IMP");
            pub const FGP: NamedField = NamedField::new(RT, 4, "FGP");
            pub const ISR: NamedField = NamedField::new(RT, 5, "ISR");
            pub const HLL: NamedField = NamedField::new(RT, 6, "HLL");
            pub const VLL: NamedField = NamedField::new(RT, 7, "VLL");
            pub const COMPRESSION: NamedField = NamedField::new(RT, 8, $compression);
            pub const DATA: NamedField = NamedField::new(RT, 9, "DATA");

            pub(super) const ALL: &[NamedField] =
                &[LEN, IDC, IMP, FGP, ISR, HLL, VLL, COMPRESSION, DATA];
        }
    };
}

fixed_resolution_fields!(rt3, LowResolutionGrayscale, "GCA");
fixed_resolution_fields!(rt4, HighResolutionGrayscale, "GCA");
fixed_resolution_fields!(rt5, LowResolutionBinary, "BCA");
fixed_resolution_fields!(rt6, HighResolutionBinary, "BCA");

/// Type-13 variable-resolution latent image fields.
pub mod rt13 {
    use super::NamedField;
    use crate::record::RecordType;

    const RT: RecordType = RecordType::VariableResolutionLatent;

    pub const LEN: NamedField = NamedField::new(RT, 1, "LEN");
    pub const IDC: NamedField = NamedField::new(RT, 2, "IDC");
    pub const IMP: NamedField = NamedField::new(RT, 3, "IMP");
    pub const SRC: NamedField = NamedField::new(RT, 4, "SRC");
    pub const LCD: NamedField = NamedField::new(RT, 5, "LCD");
    pub const HLL: NamedField = NamedField::new(RT, 6, "HLL");
    pub const VLL: NamedField = NamedField::new(RT, 7, "VLL");
    pub const SLC: NamedField = NamedField::new(RT, 8, "SLC");
    pub const THPS: NamedField = NamedField::new(RT, 9, "THPS");
    pub const TVPS: NamedField = NamedField::new(RT, 10, "TVPS");
    pub const CGA: NamedField = NamedField::new(RT, 11, "CGA");
    pub const BPX: NamedField = NamedField::new(RT, 12, "BPX");
    pub const FGP: NamedField = NamedField::new(RT, 13, "FGP");
    pub const PPD: NamedField = NamedField::new(RT, 14, "PPD");
    pub const PPC: NamedField = NamedField::new(RT, 15, "PPC");
    pub const DATA: NamedField = NamedField::new(RT, 999, "DATA");

    pub(super) const ALL: &[NamedField] = &[
        LEN, IDC, IMP, SRC, LCD, HLL, VLL, SLC, THPS, TVPS, CGA, BPX, FGP, PPD, PPC, DATA,
    ];
}

/// Type-14 variable-resolution fingerprint image fields.
pub mod rt14 {
    use super::NamedField;
    use crate::record::RecordType;

    const RT: RecordType = RecordType::VariableResolutionFingerprint;

    pub const LEN: NamedField = NamedField::new(RT, 1, "LEN");
    pub const IDC: NamedField = NamedField::new(RT, 2, "IDC");
    pub const IMP: NamedField = NamedField::new(RT, 3, "IMP");
    pub const SRC: NamedField = NamedField::new(RT, 4, "SRC");
    pub const FCD: NamedField = NamedField::new(RT, 5, "FCD");
    pub const HLL: NamedField = NamedField::new(RT, 6, "HLL");
    pub const VLL: NamedField = NamedField::new(RT, 7, "VLL");
    pub const SLC: NamedField = NamedField::new(RT, 8, "SLC");
    pub const THPS: NamedField = NamedField::new(RT, 9, "THPS");
    pub const TVPS: NamedField = NamedField::new(RT, 10, "TVPS");
    pub const CGA: NamedField = NamedField::new(RT, 11, "CGA");
    pub const BPX: NamedField = NamedField::new(RT, 12, "BPX");
    pub const FGP: NamedField = NamedField::new(RT, 13, "FGP");
    pub const DATA: NamedField = NamedField::new(RT, 999, "DATA");

    pub(super) const ALL: &[NamedField] = &[
        LEN, IDC, IMP, SRC, FCD, HLL, VLL, SLC, THPS, TVPS, CGA, BPX, FGP, DATA,
    ];
}

/// All descriptors defined for a record type.
pub fn named_fields(record_type: RecordType) -> &'static [NamedField] {
    match record_type {
        RecordType::TransactionInformation => rt1::ALL,
        RecordType::DescriptiveText => rt2::ALL,
        RecordType::LowResolutionGrayscale => rt3::ALL,
        RecordType::HighResolutionGrayscale => rt4::ALL,
        RecordType::LowResolutionBinary => rt5::ALL,
        RecordType::HighResolutionBinary => rt6::ALL,
        RecordType::VariableResolutionLatent => rt13::ALL,
        RecordType::VariableResolutionFingerprint => rt14::ALL,
        _ => &[],
    }
}

/// Find the descriptor for a raw field number under a record type.
pub fn find(record_type: RecordType, number: u32) -> Option<&'static NamedField> {
    named_fields(record_type).iter().find(|f| f.number == number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_recovers_mnemonics() {
        let field = find(RecordType::TransactionInformation, 9).unwrap();
        assert_eq!(field.code, "TCN");
        assert_eq!(field.number, 9);

        let field = find(RecordType::VariableResolutionLatent, 999).unwrap();
        assert_eq!(field.code, "DATA");

        assert!(find(RecordType::TransactionInformation, 99).is_none());
        assert!(find(RecordType::MinutiaeData, 1).is_none());
    }

    #[test]
    fn binary_and_grayscale_compression_codes_differ() {
        assert_eq!(rt4::COMPRESSION.code, "GCA");
        assert_eq!(rt6::COMPRESSION.code, "BCA");
    }
}
