//! Serde deserialization out of bencode values.
//!
//! [`ValueDeserializer`] drives any `Deserialize` type from a decoded
//! [`Value`]. The mapping mirrors [`crate::ser`]:
//!
//! - Integers feed every Rust integer type; a value that does not fit is
//!   [`Error::IntegerOutOfRange`]. `bool` accepts `0` and `1`.
//! - Byte strings feed `String` and `&str` targets when they hold UTF-8,
//!   and byte targets always. A `Vec<u8>` field accepts them too.
//! - Lists feed sequences and tuples; dictionaries feed maps and structs.
//! - `Option<T>` present in the input is always `Some`; missing struct
//!   fields become `None` through Serde's usual defaulting.
//! - Enums come from a byte string (unit variant) or a single-entry
//!   dictionary `{variant: payload}`.
//!
//! Map keys holding decimal text also deserialize into integer key types, so
//! a `BTreeMap<u32, _>` survives a round trip.
//!
//! ## Usage
//!
//! ```rust
//! use serde::Deserialize;
//! use serde_bencoding::from_bytes;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Info {
//!     name: String,
//!     #[serde(rename = "piece length")]
//!     piece_length: u32,
//!     private: Option<bool>,
//! }
//!
//! let info: Info = from_bytes(b"d4:name4:test12:piece lengthi16384ee").unwrap();
//! assert_eq!(info.name, "test");
//! assert_eq!(info.piece_length, 16384);
//! assert_eq!(info.private, None);
//! ```

use crate::value::INTEGER_TOKEN;
use crate::{ByteString, Dictionary, Error, Result, Value};
use num_bigint::BigInt;
use serde::de::{self, DeserializeOwned, IntoDeserializer};
use serde::forward_to_deserialize_any;

/// Deserializer that reads from an owned [`Value`].
pub struct ValueDeserializer {
    value: Value,
}

impl ValueDeserializer {
    pub fn new(value: Value) -> Self {
        ValueDeserializer { value }
    }

    fn integer(self) -> Result<BigInt> {
        match self.value {
            Value::Integer(n) => Ok(n),
            other => Err(Error::type_mismatch("integer", other.kind().as_str())),
        }
    }
}

/// Converts a [`Value`] into a `T`.
///
/// # Errors
///
/// Returns [`Error::TypeMismatch`] when the value's shape does not match `T`
/// and [`Error::IntegerOutOfRange`] when an integer does not fit.
///
/// # Examples
///
/// ```rust
/// use serde_bencoding::{bencode, from_value};
///
/// let value = bencode!([1, 2, 3]);
/// let numbers: Vec<u8> = from_value(value).unwrap();
/// assert_eq!(numbers, vec![1, 2, 3]);
/// ```
pub fn from_value<T: DeserializeOwned>(value: Value) -> Result<T> {
    T::deserialize(ValueDeserializer::new(value))
}

fn out_of_range(n: &BigInt) -> Error {
    Error::IntegerOutOfRange(n.to_string())
}

macro_rules! deserialize_integer {
    ($($method:ident => $visit:ident: $ty:ty),* $(,)?) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                let n = self.integer()?;
                let v = <$ty>::try_from(&n).map_err(|_| out_of_range(&n))?;
                visitor.$visit(v)
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Integer(n) => {
                if let Ok(i) = i64::try_from(&n) {
                    visitor.visit_i64(i)
                } else if let Ok(u) = u64::try_from(&n) {
                    visitor.visit_u64(u)
                } else if let Ok(i) = i128::try_from(&n) {
                    visitor.visit_i128(i)
                } else if let Ok(u) = u128::try_from(&n) {
                    visitor.visit_u128(u)
                } else {
                    visitor.visit_map(WideIntegerAccess {
                        text: Some(n.to_string()),
                        key_sent: false,
                    })
                }
            }
            Value::ByteString(s) => visit_byte_string(s, visitor),
            Value::List(list) => visitor.visit_seq(SeqDeserializer::new(list)),
            Value::Dictionary(dict) => visitor.visit_map(MapDeserializer::new(dict)),
        }
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let n = self.integer()?;
        match u8::try_from(&n) {
            Ok(0) => visitor.visit_bool(false),
            Ok(1) => visitor.visit_bool(true),
            _ => Err(Error::type_mismatch("0 or 1", &n.to_string())),
        }
    }

    deserialize_integer! {
        deserialize_i8 => visit_i8: i8,
        deserialize_i16 => visit_i16: i16,
        deserialize_i32 => visit_i32: i32,
        deserialize_i64 => visit_i64: i64,
        deserialize_i128 => visit_i128: i128,
        deserialize_u8 => visit_u8: u8,
        deserialize_u16 => visit_u16: u16,
        deserialize_u32 => visit_u32: u32,
        deserialize_u64 => visit_u64: u64,
        deserialize_u128 => visit_u128: u128,
    }

    fn deserialize_f32<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Error::unsupported_type("f32"))
    }

    fn deserialize_f64<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Error::unsupported_type("f64"))
    }

    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_byte_buf(visitor)
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::ByteString(s) => visitor.visit_byte_buf(s.into_vec()),
            Value::List(list) => visitor.visit_seq(SeqDeserializer::new(list)),
            other => Err(Error::type_mismatch("byte string", other.kind().as_str())),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_unit<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Error::unsupported_type("unit"))
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::List(list) => visitor.visit_seq(SeqDeserializer::new(list)),
            Value::ByteString(s) => {
                let bytes = s.into_vec().into_iter().map(Value::from).collect();
                visitor.visit_seq(SeqDeserializer::new(bytes))
            }
            other => Err(Error::type_mismatch("list", other.kind().as_str())),
        }
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Dictionary(dict) => visitor.visit_map(MapDeserializer::new(dict)),
            other => Err(Error::type_mismatch("dictionary", other.kind().as_str())),
        }
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_map(visitor)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::ByteString(variant) => visitor.visit_enum(EnumDeserializer {
                variant,
                value: None,
            }),
            Value::Dictionary(dict) if dict.len() == 1 => {
                match dict.into_iter().next() {
                    Some((variant, value)) => visitor.visit_enum(EnumDeserializer {
                        variant,
                        value: Some(value),
                    }),
                    None => Err(Error::type_mismatch("enum variant", "empty dictionary")),
                }
            }
            Value::Dictionary(_) => Err(Error::type_mismatch(
                "single-entry dictionary",
                "dictionary",
            )),
            other => Err(Error::type_mismatch("enum variant", other.kind().as_str())),
        }
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }

    forward_to_deserialize_any! {
        char str string identifier
    }
}

fn visit_byte_string<'de, V>(s: ByteString, visitor: V) -> Result<V::Value>
where
    V: de::Visitor<'de>,
{
    match String::from_utf8(s.into_vec()) {
        Ok(text) => visitor.visit_string(text),
        Err(e) => visitor.visit_byte_buf(e.into_bytes()),
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<Value>,
}

impl SeqDeserializer {
    fn new(vec: Vec<Value>) -> Self {
        SeqDeserializer {
            iter: vec.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

/// Presents an integer wider than 128 bits as `{INTEGER_TOKEN: text}`,
/// which the `Value` visitor turns back into an integer.
struct WideIntegerAccess {
    text: Option<String>,
    key_sent: bool,
}

impl<'de> de::MapAccess<'de> for WideIntegerAccess {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        if self.key_sent {
            return Ok(None);
        }
        self.key_sent = true;
        let key: de::value::StrDeserializer<'static, Error> = INTEGER_TOKEN.into_deserializer();
        seed.deserialize(key).map(Some)
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.text.take() {
            Some(text) => {
                let text: de::value::StringDeserializer<Error> = text.into_deserializer();
                seed.deserialize(text)
            }
            None => Err(Error::custom("next_value_seed called twice")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(usize::from(!self.key_sent))
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<ByteString, Value>,
    value: Option<Value>,
}

impl MapDeserializer {
    fn new(dict: Dictionary) -> Self {
        MapDeserializer {
            iter: dict.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(KeyDeserializer { key }).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

/// Deserializes dictionary keys, parsing decimal text for integer targets.
struct KeyDeserializer {
    key: ByteString,
}

impl KeyDeserializer {
    fn parse<T: std::str::FromStr>(&self) -> Result<T> {
        self.key
            .as_str()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| Error::type_mismatch("integer key", &format!("{:?}", self.key)))
    }
}

macro_rules! deserialize_key_integer {
    ($($method:ident => $visit:ident: $ty:ty),* $(,)?) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                visitor.$visit(self.parse::<$ty>()?)
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for KeyDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visit_byte_string(self.key, visitor)
    }

    deserialize_key_integer! {
        deserialize_i8 => visit_i8: i8,
        deserialize_i16 => visit_i16: i16,
        deserialize_i32 => visit_i32: i32,
        deserialize_i64 => visit_i64: i64,
        deserialize_i128 => visit_i128: i128,
        deserialize_u8 => visit_u8: u8,
        deserialize_u16 => visit_u16: u16,
        deserialize_u32 => visit_u32: u32,
        deserialize_u64 => visit_u64: u64,
        deserialize_u128 => visit_u128: u128,
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_enum(EnumDeserializer {
            variant: self.key,
            value: None,
        })
    }

    forward_to_deserialize_any! {
        bool f32 f64 char str string bytes byte_buf option unit
        unit_struct seq tuple tuple_struct map struct identifier ignored_any
    }
}

struct EnumDeserializer {
    variant: ByteString,
    value: Option<Value>,
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(KeyDeserializer { key: self.variant })?;
        let visitor = VariantDeserializer { value: self.value };
        Ok((variant, visitor))
    }
}

struct VariantDeserializer {
    value: Option<Value>,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            None => Ok(()),
            Some(other) => Err(Error::type_mismatch("unit variant", other.kind().as_str())),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.value {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::type_mismatch("newtype variant", "unit variant")),
        }
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(Value::List(list)) => visitor.visit_seq(SeqDeserializer::new(list)),
            Some(other) => Err(Error::type_mismatch("list", other.kind().as_str())),
            None => Err(Error::type_mismatch("tuple variant", "unit variant")),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(Value::Dictionary(dict)) => visitor.visit_map(MapDeserializer::new(dict)),
            Some(other) => Err(Error::type_mismatch("dictionary", other.kind().as_str())),
            None => Err(Error::type_mismatch("struct variant", "unit variant")),
        }
    }
}

impl<'de> IntoDeserializer<'de, Error> for Value {
    type Deserializer = ValueDeserializer;

    fn into_deserializer(self) -> ValueDeserializer {
        ValueDeserializer::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode;
    use serde::Deserialize;
    use std::collections::BTreeMap;

    fn parse<T: DeserializeOwned>(input: &[u8]) -> Result<T> {
        from_value(decode(input)?)
    }

    #[derive(Deserialize, Debug, PartialEq)]
    enum Event {
        Started,
        Progress(u32),
        Moved(String, String),
        Stopped { code: i32 },
    }

    #[test]
    fn test_primitives() {
        assert_eq!(parse::<i32>(b"i-42e").unwrap(), -42);
        assert_eq!(parse::<u64>(b"i18446744073709551615e").unwrap(), u64::MAX);
        assert_eq!(parse::<String>(b"4:spam").unwrap(), "spam");
        assert!(parse::<bool>(b"i1e").unwrap());
        assert!(!parse::<bool>(b"i0e").unwrap());
        assert_eq!(parse::<char>(b"1:x").unwrap(), 'x');
    }

    #[test]
    fn test_integer_out_of_range() {
        assert!(matches!(
            parse::<u8>(b"i256e"),
            Err(Error::IntegerOutOfRange(ref s)) if s == "256"
        ));
        assert!(matches!(
            parse::<u32>(b"i-1e"),
            Err(Error::IntegerOutOfRange(_))
        ));
        assert!(parse::<bool>(b"i2e").is_err());
    }

    #[test]
    fn test_i128_beyond_i64() {
        let v: i128 = parse(b"i-170141183460469231731687303715884105728e").unwrap();
        assert_eq!(v, i128::MIN);
    }

    #[test]
    fn test_type_mismatch() {
        assert!(matches!(
            parse::<Vec<i32>>(b"i1e"),
            Err(Error::TypeMismatch { .. })
        ));
        assert!(matches!(
            parse::<BTreeMap<String, i32>>(b"le"),
            Err(Error::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_bytes_targets() {
        let raw: Vec<u8> = parse(b"3:\x00\x01\xff").unwrap();
        assert_eq!(raw, vec![0, 1, 255]);

        let bytes: ByteString = parse(b"2:\xc3\x28").unwrap();
        assert_eq!(bytes.as_bytes(), &[0xc3, 0x28]);

        assert!(parse::<String>(b"2:\xc3\x28").is_err());
    }

    #[test]
    fn test_option_is_some_when_present() {
        #[derive(Deserialize, Debug, PartialEq)]
        struct Opt {
            a: Option<u8>,
            b: Option<u8>,
        }
        let opt: Opt = parse(b"d1:ai5ee").unwrap();
        assert_eq!(opt, Opt { a: Some(5), b: None });
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        #[derive(Deserialize, Debug, PartialEq)]
        struct Small {
            keep: u8,
        }
        let small: Small =
            parse(b"d4:hugei99999999999999999999999999999999999e4:keepi1ee").unwrap();
        assert_eq!(small, Small { keep: 1 });
    }

    #[test]
    fn test_enums() {
        assert_eq!(parse::<Event>(b"7:Started").unwrap(), Event::Started);
        assert_eq!(
            parse::<Event>(b"d8:Progressi7ee").unwrap(),
            Event::Progress(7)
        );
        assert_eq!(
            parse::<Event>(b"d5:Movedl1:a1:bee").unwrap(),
            Event::Moved("a".into(), "b".into())
        );
        assert_eq!(
            parse::<Event>(b"d7:Stoppedd4:codei-1eee").unwrap(),
            Event::Stopped { code: -1 }
        );
        assert!(parse::<Event>(b"d1:ai1e1:bi2ee").is_err());
    }

    #[test]
    fn test_integer_map_keys() {
        let map: BTreeMap<u32, String> = parse(b"d2:103:ten1:23:twoe").unwrap();
        assert_eq!(map.get(&10).map(String::as_str), Some("ten"));
        assert_eq!(map.get(&2).map(String::as_str), Some("two"));

        assert!(parse::<BTreeMap<u32, String>>(b"d1:x1:ye").is_err());
    }

    #[test]
    fn test_wide_integer_map_keys() {
        let map: BTreeMap<i128, u8> =
            parse(b"d40:-170141183460469231731687303715884105728i1e1:5i2ee").unwrap();
        assert_eq!(map.get(&i128::MIN), Some(&1));
        assert_eq!(map.get(&5), Some(&2));

        let map: BTreeMap<u128, u8> =
            parse(b"d39:340282366920938463463374607431768211455i1ee").unwrap();
        assert_eq!(map.get(&u128::MAX), Some(&1));
    }

    #[test]
    fn test_integer_beyond_128_bits_into_value() {
        let text = "-1234567890123456789012345678901234567890123456789";
        let value = Value::Integer(text.parse().unwrap());
        let copy: Value = from_value(value.clone()).unwrap();
        assert_eq!(copy, value);

        assert!(matches!(
            from_value::<i128>(value),
            Err(Error::IntegerOutOfRange(_))
        ));
    }

    #[test]
    fn test_value_roundtrip_through_deserializer() {
        let original = decode(&b"d1:ali1e2:xye1:bd1:ci-3eee"[..]).unwrap();
        let copy: Value = from_value(original.clone()).unwrap();
        assert_eq!(copy, original);
    }
}
