//! Property-based tests for the encode/decode round-trip guarantees.

use proptest::prelude::*;
use std::collections::{BTreeMap, HashMap};
use tree_coding::{from_tree, to_tree_value, Decodable, Encodable, Error, Value};

fn roundtrip<T: Encodable + Decodable + PartialEq + std::fmt::Debug>(value: &T) -> bool {
    match to_tree_value(value) {
        Ok(tree) => match from_tree::<T>(&tree) {
            Ok(decoded) => *value == decoded,
            Err(e) => {
                eprintln!("Decode failed: {}", e);
                eprintln!("Tree was: {:?}", tree);
                false
            }
        },
        Err(e) => {
            eprintln!("Encode failed: {}", e);
            false
        }
    }
}

proptest! {
    #[test]
    fn prop_i32(n in any::<i32>()) {
        prop_assert!(roundtrip(&n));
    }

    #[test]
    fn prop_i64(n in any::<i64>()) {
        prop_assert!(roundtrip(&n));
    }

    #[test]
    fn prop_u64(n in any::<u64>()) {
        prop_assert!(roundtrip(&n));
    }

    #[test]
    fn prop_bool(b in any::<bool>()) {
        prop_assert!(roundtrip(&b));
    }

    #[test]
    fn prop_f64_finite(f in any::<f64>().prop_filter("finite", |f| f.is_finite())) {
        prop_assert!(roundtrip(&f));
    }

    #[test]
    fn prop_string(s in ".*") {
        prop_assert!(roundtrip(&s));
    }

    #[test]
    fn prop_vec_i32(v in prop::collection::vec(any::<i32>(), 0..20)) {
        prop_assert!(roundtrip(&v));
    }

    #[test]
    fn prop_option_i32(opt in proptest::option::of(any::<i32>())) {
        prop_assert!(roundtrip(&opt));
    }

    #[test]
    fn prop_nested_vec(v in prop::collection::vec(prop::collection::vec(any::<u16>(), 0..5), 0..5)) {
        prop_assert!(roundtrip(&v));
    }

    #[test]
    fn prop_hash_map(m in prop::collection::hash_map("[a-z]{1,8}", any::<i64>(), 0..10)) {
        prop_assert!(roundtrip(&m));
    }

    #[test]
    fn prop_btree_map_of_options(
        m in prop::collection::btree_map("[a-z]{1,8}", proptest::option::of(".*"), 0..10)
    ) {
        let tree = to_tree_value(&m).unwrap();
        let back: BTreeMap<String, Option<String>> = from_tree(&tree).unwrap();
        prop_assert_eq!(back, m);
    }

    #[test]
    fn prop_u8_narrowing(n in any::<i64>()) {
        let result = from_tree::<u8>(&Value::from(n));
        if (0..=255).contains(&n) {
            prop_assert_eq!(result.unwrap() as i64, n);
        } else {
            prop_assert!(
                matches!(result, Err(Error::DataCorrupted { .. })),
                "expected DataCorrupted for {}",
                n
            );
        }
    }

    #[test]
    fn prop_sequence_index_in_error_path(
        v in prop::collection::vec(any::<i32>(), 0..10),
        bad in 0usize..10,
    ) {
        let mut items: Vec<Value> = v.iter().map(|&n| Value::from(n)).collect();
        let at = bad.min(items.len());
        items.insert(at, Value::from("bad"));
        let err = from_tree::<HashMap<String, Vec<i32>>>(
            &Value::Map([("k".to_string(), Value::Sequence(items))].into_iter().collect()),
        )
        .unwrap_err();
        let path = err.coding_path().unwrap();
        prop_assert_eq!(path.to_string(), format!("k[{}]", at));
    }
}
