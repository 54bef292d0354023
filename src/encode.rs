//! Canonical bencode encoding.
//!
//! The output follows the canonical form:
//! - Integers: `i<number>e`, no leading zeros, no `-0`
//! - Byte strings: `<length>:<data>`
//! - Lists: `l<items>e`
//! - Dictionaries: `d<key><value>...e`, keys ascending by raw bytes
//!
//! Dictionary order is recomputed from the keys on every call, so values that
//! compare equal always encode to the same bytes.

use crate::{ByteString, Result, Value};
use std::io::Write;

/// Encodes a value to a new byte vector.
///
/// # Examples
///
/// ```
/// use serde_bencoding::{encode, Dictionary, Value};
///
/// assert_eq!(encode(&Value::from(42)), b"i42e");
/// assert_eq!(encode(&Value::from("hello")), b"5:hello");
///
/// let list = Value::List(vec![Value::from(1), Value::from("two")]);
/// assert_eq!(encode(&list), b"li1e3:twoe");
///
/// let mut dict = Dictionary::new();
/// dict.insert("b", Value::from(2));
/// dict.insert("a", Value::from(1));
/// assert_eq!(encode(&Value::from(dict)), b"d1:ai1e1:bi2ee");
/// ```
#[must_use]
pub fn encode(value: &Value) -> Vec<u8> {
    let mut buf = Vec::new();
    encode_into(value, &mut buf);
    buf
}

/// Appends the encoding of `value` to `buf`.
pub fn encode_into(value: &Value, buf: &mut Vec<u8>) {
    match value {
        Value::Integer(n) => {
            buf.push(b'i');
            buf.extend_from_slice(n.to_string().as_bytes());
            buf.push(b'e');
        }
        Value::ByteString(s) => write_byte_string(s, buf),
        Value::List(list) => {
            buf.push(b'l');
            for item in list {
                encode_into(item, buf);
            }
            buf.push(b'e');
        }
        Value::Dictionary(dict) => {
            buf.push(b'd');
            for (key, val) in dict.sorted_iter() {
                write_byte_string(key, buf);
                encode_into(val, buf);
            }
            buf.push(b'e');
        }
    }
}

/// Writes the encoding of `value` to `writer`.
///
/// # Errors
///
/// Returns [`crate::Error::Io`] if the writer fails.
pub fn encode_to_writer<W: Write>(mut writer: W, value: &Value) -> Result<()> {
    writer.write_all(&encode(value))?;
    Ok(())
}

fn write_byte_string(s: &ByteString, buf: &mut Vec<u8>) {
    buf.extend_from_slice(s.len().to_string().as_bytes());
    buf.push(b':');
    buf.extend_from_slice(s);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{decode, Dictionary};
    use num_bigint::BigInt;

    #[test]
    fn test_encode_integer() {
        assert_eq!(encode(&Value::from(42)), b"i42e");
        assert_eq!(encode(&Value::from(-42)), b"i-42e");
        assert_eq!(encode(&Value::from(0)), b"i0e");

        let big: BigInt = "-1234567890123456789012345678901234567890".parse().unwrap();
        assert_eq!(
            encode(&Value::Integer(big)),
            b"i-1234567890123456789012345678901234567890e"
        );
    }

    #[test]
    fn test_encode_byte_string() {
        assert_eq!(encode(&Value::from("spam")), b"4:spam");
        assert_eq!(encode(&Value::from("")), b"0:");
        assert_eq!(encode(&Value::from(vec![0xff_u8, 0])), b"2:\xff\x00");
    }

    #[test]
    fn test_encode_list() {
        let list = Value::List(vec![Value::from("spam"), Value::from(42)]);
        assert_eq!(encode(&list), b"l4:spami42ee");
        assert_eq!(encode(&Value::List(vec![])), b"le");
    }

    #[test]
    fn test_encode_dictionary_sorts_keys() {
        let mut dict = Dictionary::new();
        dict.insert("spam", Value::from("eggs"));
        dict.insert("cow", Value::from("moo"));
        assert_eq!(encode(&Value::from(dict)), b"d3:cow3:moo4:spam4:eggse");
    }

    #[test]
    fn test_roundtrip_is_byte_identical() {
        let original = b"d8:announce15:http://test.com4:infod4:name4:test12:piece lengthi16384eee";
        let decoded = decode(&original[..]).unwrap();
        assert_eq!(encode(&decoded), original);
    }

    #[test]
    fn test_duplicate_key_input_reencodes_canonically() {
        let decoded = decode(&b"d1:ai1e1:ai2e1:bi3ee"[..]).unwrap();
        assert_eq!(encode(&decoded), b"d1:ai2e1:bi3ee");
    }

    #[test]
    fn test_encode_to_writer() {
        let mut out = Vec::new();
        encode_to_writer(&mut out, &Value::from("x")).unwrap();
        assert_eq!(out, b"1:x");
    }
}
