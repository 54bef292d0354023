//! Grammar conformance tests for the decoder and canonical encoder.
//!
//! Organized by value kind, then by the cross-cutting behaviors: canonical
//! re-encoding, truncation, stream positioning and I/O failure.

use num_bigint::BigInt;
use serde_bencoding::{
    bencode, decode, decode_with_options, encode, DecodeOptions, Decoder, Dictionary, Error,
    LengthPrefix, Value,
};
use std::io::{self, Read};

fn parse(input: &[u8]) -> serde_bencoding::Result<Value> {
    decode(input)
}

fn assert_invalid(input: &[u8]) {
    match parse(input) {
        Err(Error::InvalidInput { .. }) => {}
        other => panic!("Expected InvalidInput for {:?}, got {:?}", input, other),
    }
}

// =============================================================================
// Integers
// =============================================================================

#[test]
fn test_integer_zero() {
    assert_eq!(parse(b"i0e").unwrap(), Value::from(0));
}

#[test]
fn test_integer_negative() {
    assert_eq!(parse(b"i-5e").unwrap(), Value::from(-5));
}

#[test]
fn test_integer_leading_zero_rejected() {
    assert_invalid(b"i00e");
    assert_invalid(b"i03e");
}

#[test]
fn test_integer_negative_zero_rejected() {
    assert_invalid(b"i-0e");
    assert_invalid(b"i-01e");
}

#[test]
fn test_integer_bad_terminator() {
    assert_invalid(b"i12x");
    assert_invalid(b"i1.5e");
}

#[test]
fn test_integer_without_digits() {
    assert!(matches!(parse(b"ie"), Err(Error::IntegerConversion(_))));
    assert!(matches!(parse(b"i-e"), Err(Error::IntegerConversion(_))));
    assert!(matches!(parse(b"i1-2e"), Err(Error::IntegerConversion(_))));
}

#[test]
fn test_integer_beyond_64_bits() {
    let text = "123456789012345678901234567890123456789012345";
    let input = format!("i{}e", text);
    let value = parse(input.as_bytes()).unwrap();
    assert_eq!(value, Value::Integer(text.parse::<BigInt>().unwrap()));
    assert_eq!(value.as_i64(), None);
    assert_eq!(encode(&value), input.as_bytes());
}

// =============================================================================
// Byte strings
// =============================================================================

#[test]
fn test_empty_byte_string() {
    assert_eq!(parse(b"0:").unwrap(), Value::from(""));
}

#[test]
fn test_byte_string_leaves_rest_unread() {
    let mut decoder = Decoder::new(&b"4:spamXYZ"[..]);
    assert_eq!(decoder.decode_value().unwrap(), Value::from("spam"));
    assert_eq!(decoder.position(), 6);
    assert_eq!(decoder.buffered(), b"XYZ");
}

#[test]
fn test_byte_string_raw_bytes() {
    let value = parse(b"3:\x00\xff\x80").unwrap();
    assert_eq!(value.as_bytes(), Some(&[0x00, 0xff, 0x80][..]));
    assert_eq!(value.as_str(), None);
}

#[test]
fn test_byte_string_bad_length() {
    assert_invalid(b":abc");
    assert_invalid(b"3x:abc");
    assert_invalid(b"99999999999999999999999999:abc");
}

#[test]
fn test_length_prefix_rules() {
    assert_eq!(parse(b"04:spam").unwrap(), Value::from("spam"));

    let canonical = DecodeOptions::new().with_length_prefix(LengthPrefix::Canonical);
    assert!(matches!(
        decode_with_options(&b"04:spam"[..], canonical.clone()),
        Err(Error::InvalidInput { position: 0, .. })
    ));
    assert_eq!(
        decode_with_options(&b"0:"[..], canonical).unwrap(),
        Value::from("")
    );
}

// =============================================================================
// Lists
// =============================================================================

#[test]
fn test_list_of_strings() {
    assert_eq!(
        parse(b"l4:spam4:eggse").unwrap(),
        Value::List(vec![Value::from("spam"), Value::from("eggs")])
    );
}

#[test]
fn test_nested_lists() {
    assert_eq!(parse(b"lleli1eee").unwrap(), bencode!([[], [1]]));
}

#[test]
fn test_list_with_bad_element() {
    assert_invalid(b"lxe");
}

// =============================================================================
// Dictionaries
// =============================================================================

#[test]
fn test_dictionary() {
    let value = parse(b"d3:cow3:moo4:spam4:eggse").unwrap();
    let dict = value.as_dictionary().unwrap();
    assert_eq!(dict.len(), 2);
    assert_eq!(dict.get(b"cow"), Some(&Value::from("moo")));
    assert_eq!(dict.get(b"spam"), Some(&Value::from("eggs")));
}

#[test]
fn test_dictionary_key_ordering() {
    match parse(b"d4:spam3:egg3:cow3:moae") {
        Err(Error::KeyOrdering {
            position,
            previous,
            key,
        }) => {
            assert_eq!(position, 12);
            assert_eq!(previous.as_bytes(), b"spam");
            assert_eq!(key.as_bytes(), b"cow");
        }
        other => panic!("Expected KeyOrdering, got {:?}", other),
    }
}

#[test]
fn test_dictionary_keys_compare_as_raw_bytes() {
    // 'Z' (0x5a) sorts before 'a' (0x61); 0xff sorts after everything
    assert!(parse(b"d1:Zi1e1:ai2e1:\xffi3ee").is_ok());
    assert!(matches!(
        parse(b"d1:ai1e1:Zi2ee"),
        Err(Error::KeyOrdering { .. })
    ));
}

#[test]
fn test_dictionary_prefix_key_sorts_first() {
    assert!(parse(b"d1:ai1e2:aai2ee").is_ok());
    assert!(matches!(
        parse(b"d2:aai1e1:ai2ee"),
        Err(Error::KeyOrdering { .. })
    ));
}

#[test]
fn test_dictionary_duplicate_key_last_wins() {
    let value = parse(b"d1:ai1e1:ai2ee").unwrap();
    let dict = value.as_dictionary().unwrap();
    assert_eq!(dict.len(), 1);
    assert_eq!(dict.get(b"a"), Some(&Value::from(2)));
}

#[test]
fn test_dictionary_non_string_key() {
    assert_invalid(b"di1ei2ee");
    assert_invalid(b"dlei1ee");
}

// =============================================================================
// Discriminator
// =============================================================================

#[test]
fn test_unknown_prefix() {
    for input in [&b"x"[..], b"e", b"-1", b" i1e"] {
        assert_invalid(input);
    }
}

// =============================================================================
// Canonical encoding
// =============================================================================

#[test]
fn test_reencode_is_byte_identical() {
    let input = b"d3:cow3:moo4:spam4:eggse";
    let encoded = encode(&parse(input).unwrap());
    assert_eq!(encoded.len(), input.len());
    assert_eq!(encoded, input);
}

#[test]
fn test_insertion_order_does_not_matter() {
    let mut forward = Dictionary::new();
    forward.insert("a", Value::from(1));
    forward.insert("b", Value::from(2));
    forward.insert("c", Value::from(3));

    let mut backward = Dictionary::new();
    backward.insert("c", Value::from(3));
    backward.insert("b", Value::from(2));
    backward.insert("a", Value::from(1));

    assert_eq!(forward, backward);
    assert_eq!(
        encode(&Value::from(forward)),
        encode(&Value::from(backward))
    );
}

#[test]
fn test_permissive_length_reencodes_canonically() {
    let value = parse(b"l04:spame").unwrap();
    assert_eq!(encode(&value), b"l4:spame");
}

// =============================================================================
// Truncation
// =============================================================================

#[test]
fn test_every_proper_prefix_is_eof() {
    let samples: [&[u8]; 5] = [
        b"i-42e",
        b"4:spam",
        b"l4:spami42ee",
        b"d3:cow3:moo4:spam4:eggse",
        b"d4:infod6:lengthi1024e4:name3:isoee",
    ];
    for sample in samples {
        for cut in 0..sample.len() {
            let err = parse(&sample[..cut]).unwrap_err();
            assert!(
                err.is_eof(),
                "prefix {:?} gave {:?}",
                String::from_utf8_lossy(&sample[..cut]),
                err
            );
            assert!(err.is_invalid_input());
        }
        assert!(parse(sample).is_ok());
    }
}

// =============================================================================
// Streams
// =============================================================================

#[test]
fn test_concatenated_values() {
    let mut decoder = Decoder::new(&b"i1ed1:ai2ee0:"[..]);
    let mut values = Vec::new();
    while let Some(value) = decoder.decode_next().unwrap() {
        values.push(value);
    }
    assert_eq!(
        values,
        vec![Value::from(1), bencode!({ "a": 2 }), Value::from("")]
    );
}

#[test]
fn test_decode_next_inside_value_is_eof() {
    let mut decoder = Decoder::new(&b"i1el"[..]);
    assert_eq!(decoder.decode_next().unwrap(), Some(Value::from(1)));
    assert!(decoder.decode_next().unwrap_err().is_eof());
}

struct Failing;

impl Read for Failing {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"))
    }
}

#[test]
fn test_reader_errors_propagate() {
    match decode(Failing) {
        Err(Error::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::ConnectionReset),
        other => panic!("Expected Io, got {:?}", other),
    }
}

#[test]
fn test_reader_errors_after_partial_input() {
    let reader = (&b"l4:sp"[..]).chain(Failing);
    match decode(reader) {
        Err(Error::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::ConnectionReset),
        other => panic!("Expected Io, got {:?}", other),
    }
}

#[test]
fn test_depth_limit() {
    let options = DecodeOptions::new().with_max_depth(2);
    assert!(decode_with_options(&b"llee"[..], options.clone()).is_ok());
    assert!(matches!(
        decode_with_options(&b"llleee"[..], options),
        Err(Error::NestingTooDeep { limit: 2, .. })
    ));
}

#[test]
fn test_strict_options() {
    let strict = DecodeOptions::strict();
    assert!(decode_with_options(&b"d3:cow3:mooe"[..], strict.clone()).is_ok());
    assert!(decode_with_options(&b"03:cow"[..], strict).is_err());
}
