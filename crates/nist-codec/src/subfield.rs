//! The hierarchical subfield text grammar.
//!
//! A field's text content nests two separator levels: RS delimits repeated
//! subfields, US delimits items within one subfield. Every encode here is
//! the exact inverse of its decode: `decode(encode(x)) == x` for each
//! supported shape, provided the input strings contain no separator bytes.

use crate::error::{CodecError, Result};
use crate::separators::{RS_CHAR, US_CHAR};

/// Encode a flat item list (single subfield).
pub fn encode_items<S: AsRef<str>>(items: &[S]) -> String {
    join(items, US_CHAR)
}

/// Decode a flat item list.
pub fn decode_items(text: &str) -> Vec<String> {
    text.split(US_CHAR).map(str::to_string).collect()
}

/// Encode a flat subfield list (no items within subfields).
pub fn encode_subfields<S: AsRef<str>>(subfields: &[S]) -> String {
    join(subfields, RS_CHAR)
}

/// Decode a flat subfield list.
pub fn decode_subfields(text: &str) -> Vec<String> {
    text.split(RS_CHAR).map(str::to_string).collect()
}

/// Encode a list of subfields, each holding a list of items.
pub fn encode_list_of_lists<S: AsRef<str>>(subfields: &[Vec<S>]) -> String {
    let encoded: Vec<String> = subfields.iter().map(|items| encode_items(items)).collect();
    encode_subfields(&encoded)
}

/// Decode into a list of subfields, each a list of items. Splitting is RS
/// first, then US within each chunk.
pub fn decode_list_of_lists(text: &str) -> Vec<Vec<String>> {
    text.split(RS_CHAR).map(decode_items).collect()
}

/// Encode a list of two-item subfields.
pub fn encode_pairs<S: AsRef<str>>(pairs: &[(S, S)]) -> String {
    let encoded: Vec<String> = pairs
        .iter()
        .map(|(a, b)| format!("{}{US_CHAR}{}", a.as_ref(), b.as_ref()))
        .collect();
    encode_subfields(&encoded)
}

/// Decode a list of two-item subfields, failing when any subfield does not
/// hold exactly two items.
pub fn decode_pairs(text: &str) -> Result<Vec<(String, String)>> {
    decode_list_of_lists(text)
        .into_iter()
        .map(|items| match <[String; 2]>::try_from(items) {
            Ok([a, b]) => Ok((a, b)),
            Err(items) => Err(CodecError::InvalidPairShape { items: items.len() }),
        })
        .collect()
}

/// Pair up a flat item list into two-item subfields.
///
/// Deprecated pairing shape kept for compatibility: the conversion is not
/// reversible through [`to_list`] for inputs that were not pair-shaped to
/// begin with. An odd-length input is a hard precondition failure.
pub fn from_list<S: AsRef<str>>(items: &[S]) -> Result<String> {
    if items.len() % 2 != 0 {
        return Err(CodecError::OddPairList { len: items.len() });
    }
    let pairs: Vec<(&str, &str)> = items
        .chunks_exact(2)
        .map(|pair| (pair[0].as_ref(), pair[1].as_ref()))
        .collect();
    Ok(encode_pairs(&pairs))
}

/// Flatten encoded subfields back into one item list, discarding the
/// subfield grouping.
pub fn to_list(text: &str) -> Vec<String> {
    text.split([RS_CHAR, US_CHAR]).map(str::to_string).collect()
}

fn join<S: AsRef<str>>(parts: &[S], separator: char) -> String {
    let mut out = String::new();
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            out.push(separator);
        }
        out.push_str(part.as_ref());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn items_round_trip() {
        let items = ["1", "2", "19"];
        let encoded = encode_items(&items);
        assert_eq!(encoded, "1\u{1f}2\u{1f}19");
        assert_eq!(decode_items(&encoded), items);
    }

    #[test]
    fn list_of_lists_round_trip() {
        let lists = vec![
            vec!["1".to_string(), "2".to_string()],
            vec!["4".to_string(), "1".to_string()],
        ];
        let encoded = encode_list_of_lists(&lists);
        assert_eq!(encoded, "1\u{1f}2\u{1e}4\u{1f}1");
        assert_eq!(decode_list_of_lists(&encoded), lists);
    }

    #[test]
    fn splitting_is_rs_first_then_us() {
        let decoded = decode_list_of_lists("a\u{1f}b\u{1e}c");
        assert_eq!(
            decoded,
            vec![
                vec!["a".to_string(), "b".to_string()],
                vec!["c".to_string()]
            ]
        );
    }

    #[test]
    fn pairs_round_trip() {
        let pairs = vec![("2".to_string(), "0".to_string()), ("4".to_string(), "1".to_string())];
        let encoded = encode_pairs(&pairs);
        assert_eq!(decode_pairs(&encoded).unwrap(), pairs);
    }

    #[test]
    fn decode_pairs_rejects_wrong_arity() {
        let err = decode_pairs("a\u{1f}b\u{1f}c").unwrap_err();
        assert!(matches!(err, CodecError::InvalidPairShape { items: 3 }));
    }

    #[test]
    fn from_list_pairs_consecutive_items() {
        let encoded = from_list(&["2", "0", "4", "1"]).unwrap();
        assert_eq!(encoded, "2\u{1f}0\u{1e}4\u{1f}1");
        assert_eq!(to_list(&encoded), vec!["2", "0", "4", "1"]);
    }

    #[test]
    fn from_list_rejects_odd_input() {
        let err = from_list(&["2", "0", "4"]).unwrap_err();
        assert!(matches!(err, CodecError::OddPairList { len: 3 }));
    }
}
