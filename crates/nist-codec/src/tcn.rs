//! Transaction control number check digit.
//!
//! A TCN is eleven characters: a two-digit year, an eight-digit sequence,
//! and one check character computed as `(year * 10^8 + sequence) mod 23`
//! mapped through a fixed alphabet. I, O and S are omitted from the
//! alphabet to avoid visual ambiguity with 1, 0 and 5.

use crate::error::{CodecError, Result};

/// The 23-symbol check alphabet, indexed by the mod-23 remainder.
pub const CHECK_ALPHABET: [char; 23] = [
    'Z', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'J', 'K', 'L', 'M', 'N', 'P', 'Q', 'R', 'T',
    'U', 'V', 'W', 'X', 'Y',
];

fn parse_digits(value: &str, expected_len: usize, what: &str) -> Result<u64> {
    if value.len() != expected_len || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CodecError::invalid_tcn(
            value,
            format!("{what} must be exactly {expected_len} decimal digits"),
        ));
    }
    value
        .parse()
        .map_err(|_| CodecError::invalid_tcn(value, format!("unparseable {what}")))
}

/// Compute the check character for a two-digit year and eight-digit
/// sequence.
pub fn calculate_check_digit(year: &str, sequence: &str) -> Result<char> {
    let year = parse_digits(year, 2, "year")?;
    let sequence = parse_digits(sequence, 8, "sequence")?;
    let value = year * 100_000_000 + sequence;
    Ok(CHECK_ALPHABET[(value % 23) as usize])
}

/// Validate a full eleven-character TCN by recomputing its check digit.
pub fn is_valid(tcn: &str) -> bool {
    if !tcn.is_ascii() || tcn.len() != 11 {
        return false;
    }
    let (digits, check) = tcn.split_at(10);
    let Some(check) = check.chars().next() else {
        return false;
    };
    calculate_check_digit(&digits[..2], &digits[2..]).is_ok_and(|expected| expected == check)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_maps_to_z() {
        assert_eq!(calculate_check_digit("00", "00000000").unwrap(), 'Z');
    }

    #[test]
    fn known_remainders() {
        // 1 mod 23 = 1 -> 'A'; 22 mod 23 = 22 -> 'Y'; 23 mod 23 = 0 -> 'Z'.
        assert_eq!(calculate_check_digit("00", "00000001").unwrap(), 'A');
        assert_eq!(calculate_check_digit("00", "00000022").unwrap(), 'Y');
        assert_eq!(calculate_check_digit("00", "00000023").unwrap(), 'Z');
        // The year contributes year * 10^8.
        assert_eq!(
            calculate_check_digit("26", "00000000").unwrap(),
            CHECK_ALPHABET[(26u64 * 100_000_000 % 23) as usize]
        );
    }

    #[test]
    fn rejects_malformed_parts() {
        assert!(calculate_check_digit("0", "00000000").is_err());
        assert!(calculate_check_digit("00", "0000000").is_err());
        assert!(calculate_check_digit("XX", "00000000").is_err());
        assert!(calculate_check_digit("00", "0000000a").is_err());
    }

    #[test]
    fn valid_tcn_round_trips() {
        let check = calculate_check_digit("26", "01020304").unwrap();
        let tcn = format!("2601020304{check}");
        assert!(is_valid(&tcn));
    }

    #[test]
    fn mutating_the_check_digit_invalidates() {
        let check = calculate_check_digit("26", "01020304").unwrap();
        for candidate in CHECK_ALPHABET {
            let tcn = format!("2601020304{candidate}");
            assert_eq!(is_valid(&tcn), candidate == check);
        }
    }

    #[test]
    fn rejects_wrong_shapes() {
        assert!(!is_valid(""));
        assert!(!is_valid("2601020304"));
        assert!(!is_valid("26010203045Z"));
        assert!(!is_valid("26O1020304Z"));
    }
}
