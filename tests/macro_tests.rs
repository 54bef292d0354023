use num_bigint::BigInt;
use serde_bencoding::{bencode, encode, ByteString, Dictionary, Kind, Value};

#[test]
fn test_bencode_macro_integers() {
    assert_eq!(bencode!(42), Value::from(42));
    assert_eq!(bencode!(-123), Value::from(-123));
    assert_eq!(bencode!(u64::MAX), Value::from(u64::MAX));
    assert_eq!(
        bencode!(BigInt::from(7)),
        Value::Integer(BigInt::from(7))
    );
}

#[test]
fn test_bencode_macro_strings() {
    assert_eq!(bencode!("hello world"), Value::from("hello world"));
    assert_eq!(bencode!(""), Value::from(""));
    assert_eq!(bencode!(String::from("owned")), Value::from("owned"));
    assert_eq!(
        bencode!(ByteString::from(vec![0xff_u8])),
        Value::ByteString(ByteString::from(vec![0xff_u8]))
    );
}

#[test]
fn test_bencode_macro_lists() {
    assert_eq!(bencode!([]), Value::List(vec![]));

    let list = bencode!([1, 2, 3]);
    assert_eq!(
        list,
        Value::List(vec![Value::from(1), Value::from(2), Value::from(3)])
    );

    let mixed = bencode!(["a", [], {}, (-1)]);
    let items = mixed.as_list().unwrap();
    assert_eq!(items[0].kind(), Kind::ByteString);
    assert_eq!(items[1].kind(), Kind::List);
    assert_eq!(items[2].kind(), Kind::Dictionary);
    assert_eq!(items[3], Value::from(-1));
}

#[test]
fn test_bencode_macro_dictionaries() {
    assert_eq!(bencode!({}), Value::Dictionary(Dictionary::new()));

    let dict = bencode!({
        "name": "ubuntu.iso",
        "length": 1024,
        "files": [
            { "path": ["a"], "length": 1 },
            { "path": ["b"], "length": 2 }
        ]
    });

    assert_eq!(dict.get(b"name").and_then(Value::as_str), Some("ubuntu.iso"));
    assert_eq!(dict.get(b"length").and_then(Value::as_i64), Some(1024));
    let files = dict.get(b"files").and_then(Value::as_list).unwrap();
    assert_eq!(files.len(), 2);
    assert_eq!(files[1].get(b"length"), Some(&Value::from(2)));
}

#[test]
fn test_bencode_macro_trailing_commas() {
    let list = bencode!([1, 2,]);
    assert_eq!(list.as_list().map(Vec::len), Some(2));

    let dict = bencode!({ "a": 1, });
    assert_eq!(dict.as_dictionary().map(Dictionary::len), Some(1));
}

#[test]
fn test_bencode_macro_encodes_canonically() {
    let value = bencode!({
        "zebra": 1,
        "apple": [2, "x"],
        "Mango": {}
    });
    assert_eq!(encode(&value), b"d5:Mangode5:appleli2e1:xe5:zebrai1ee");
}
