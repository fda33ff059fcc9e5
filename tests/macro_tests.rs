use tree_coding::{tree, Map, Number, Value};

#[test]
fn test_tree_macro_null() {
    let value = tree!(null);
    assert_eq!(value, Value::Null);
}

#[test]
fn test_tree_macro_booleans() {
    assert_eq!(tree!(true), Value::Bool(true));
    assert_eq!(tree!(false), Value::Bool(false));
}

#[test]
fn test_tree_macro_numbers() {
    assert_eq!(tree!(42), Value::Number(Number::Integer(42)));
    assert_eq!(tree!(3.5), Value::Number(Number::Float(3.5)));
    assert_eq!(tree!(-123), Value::Number(Number::Integer(-123)));
    assert_eq!(tree!(u64::MAX), Value::Number(Number::Unsigned(u64::MAX)));
}

#[test]
fn test_tree_macro_strings() {
    assert_eq!(tree!("hello world"), Value::String("hello world".to_string()));
    assert_eq!(tree!(""), Value::String(String::new()));
}

#[test]
fn test_tree_macro_sequences() {
    assert_eq!(tree!([]), Value::Sequence(vec![]));

    let mixed = tree!([1, "hello", true, null]);
    assert_eq!(
        mixed,
        Value::Sequence(vec![
            Value::Number(Number::Integer(1)),
            Value::String("hello".to_string()),
            Value::Bool(true),
            Value::Null,
        ])
    );

    let signed = tree!([-1, 0, -2.5]);
    assert_eq!(
        signed,
        Value::Sequence(vec![
            Value::Number(Number::Integer(-1)),
            Value::Number(Number::Integer(0)),
            Value::Number(Number::Float(-2.5)),
        ])
    );

    let nested = tree!([[1, 2], [], [3]]);
    assert_eq!(nested.as_sequence().map(Vec::len), Some(3));
}

#[test]
fn test_tree_macro_maps() {
    assert_eq!(tree!({}), Value::Map(Map::new()));

    let value = tree!({
        "name": "Alice",
        "age": 30,
        "address": { "city": "Paris", "zip": null },
        "scores": [1.5, 2.5],
    });

    let map = value.as_map().unwrap();
    assert_eq!(map.len(), 4);
    assert_eq!(map.get("name"), Some(&Value::from("Alice")));
    assert_eq!(
        map.get("address").and_then(Value::as_map).and_then(|a| a.get("zip")),
        Some(&Value::Null)
    );
}

#[test]
fn test_tree_macro_preserves_key_order() {
    let value = tree!({ "z": 1, "a": 2, "m": 3 });
    let keys: Vec<&str> = value
        .as_map()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys, vec!["z", "a", "m"]);
}

#[test]
fn test_tree_macro_expressions() {
    let name = String::from("Bob");
    let count = 7u8;
    let value = tree!({ "name": name, "count": count });
    assert_eq!(value, tree!({ "name": "Bob", "count": 7 }));
}
