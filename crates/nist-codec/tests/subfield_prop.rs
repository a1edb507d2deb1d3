//! Property tests for the subfield grammar: every supported shape must
//! round-trip losslessly as long as the item strings carry no separator
//! bytes.

use proptest::prelude::*;

use nist_codec::subfield;

/// Item strings free of the US/RS/GS/FS control range.
fn item() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9 .:-]{0,12}").expect("valid regex")
}

proptest! {
    #[test]
    fn items_round_trip(items in proptest::collection::vec(item(), 1..8)) {
        let encoded = subfield::encode_items(&items);
        prop_assert_eq!(subfield::decode_items(&encoded), items);
    }

    #[test]
    fn subfields_round_trip(subfields in proptest::collection::vec(item(), 1..8)) {
        let encoded = subfield::encode_subfields(&subfields);
        prop_assert_eq!(subfield::decode_subfields(&encoded), subfields);
    }

    #[test]
    fn list_of_lists_round_trips(
        lists in proptest::collection::vec(
            proptest::collection::vec(item(), 1..5),
            1..6,
        )
    ) {
        let encoded = subfield::encode_list_of_lists(&lists);
        prop_assert_eq!(subfield::decode_list_of_lists(&encoded), lists);
    }

    #[test]
    fn pairs_round_trip(pairs in proptest::collection::vec((item(), item()), 1..6)) {
        let encoded = subfield::encode_pairs(&pairs);
        prop_assert_eq!(subfield::decode_pairs(&encoded).unwrap(), pairs);
    }

    #[test]
    fn encode_inverts_decode_for_wellformed_text(
        lists in proptest::collection::vec(
            proptest::collection::vec(item(), 1..5),
            1..6,
        )
    ) {
        // Any well-formed encoded string re-encodes to itself.
        let wire = subfield::encode_list_of_lists(&lists);
        let round = subfield::encode_list_of_lists(&subfield::decode_list_of_lists(&wire));
        prop_assert_eq!(round, wire);
    }

    #[test]
    fn from_list_flattens_back(items in proptest::collection::vec(item(), 1..6)) {
        let result = subfield::from_list(&items);
        if items.len() % 2 == 0 {
            let encoded = result.unwrap();
            prop_assert_eq!(subfield::to_list(&encoded), items);
        } else {
            prop_assert!(result.is_err());
        }
    }
}
