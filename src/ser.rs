//! Serde serialization into bencode values.
//!
//! [`ValueSerializer`] turns any `Serialize` type into a [`Value`], which the
//! canonical encoder then writes out. Mapping rules:
//!
//! - Integers of every width become [`Value::Integer`]; `bool` becomes `0` or `1`
//! - `char`, `str` and byte slices become [`Value::ByteString`]
//! - Sequences, tuples and tuple structs become [`Value::List`]
//! - Maps and structs become [`Value::Dictionary`]
//! - Unit enum variants become the variant name; other variants become a
//!   single-entry dictionary `{variant: payload}`
//!
//! Bencode has no null and no floating point. A `None` struct field or map
//! value is left out of its dictionary; `None` anywhere else, unit values
//! and floats are [`Error::UnsupportedType`].
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use serde::Serialize;
//! use serde_bencoding::{to_bytes, to_value, Value};
//!
//! #[derive(Serialize)]
//! struct Peer {
//!     ip: String,
//!     port: u16,
//!     id: Option<String>,
//! }
//!
//! let peer = Peer { ip: "10.0.0.1".into(), port: 6881, id: None };
//! assert_eq!(to_bytes(&peer).unwrap(), b"d2:ip8:10.0.0.14:porti6881ee");
//!
//! let value = to_value(&peer).unwrap();
//! assert_eq!(value.get(b"port"), Some(&Value::from(6881)));
//! ```

use crate::value::INTEGER_TOKEN;
use crate::{ByteString, Dictionary, Error, Result, Value};
use num_bigint::BigInt;
use serde::ser::{self, Impossible, Serialize};

/// Serializer whose output is a [`Value`].
pub struct ValueSerializer;

/// Collects list elements, optionally wrapped as an enum variant payload.
pub struct SerializeVec {
    vec: Vec<Value>,
    variant: Option<&'static str>,
}

/// Collects dictionary entries, optionally wrapped as an enum variant payload.
pub struct SerializeMap {
    map: Dictionary,
    current_key: Option<ByteString>,
    variant: Option<&'static str>,
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeVec;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeMap;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::from(u8::from(v)))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i128(self, v: i128) -> Result<Value> {
        Ok(Value::Integer(BigInt::from(v)))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u128(self, v: u128) -> Result<Value> {
        Ok(Value::Integer(BigInt::from(v)))
    }

    fn serialize_f32(self, _v: f32) -> Result<Value> {
        Err(Error::unsupported_type("f32"))
    }

    fn serialize_f64(self, _v: f64) -> Result<Value> {
        Err(Error::unsupported_type("f64"))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        let mut buf = [0; 4];
        Ok(Value::from(&*v.encode_utf8(&mut buf)))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_none(self) -> Result<Value> {
        Err(Error::unsupported_type("none outside a dictionary entry"))
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Err(Error::unsupported_type("unit"))
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<Value> {
        Err(Error::UnsupportedType(format!("unit struct {}", name)))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::from(variant))
    }

    fn serialize_newtype_struct<T>(self, name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        if name == INTEGER_TOKEN {
            return integer_from_text(value.serialize(self)?);
        }
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        let mut dict = Dictionary::with_capacity(1);
        dict.insert(variant, to_value(value)?);
        Ok(Value::Dictionary(dict))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len.unwrap_or(0), None))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, None))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, None))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, Some(variant)))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len.unwrap_or(0), None))
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len, None))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len, Some(variant)))
    }
}

impl SerializeVec {
    fn new(capacity: usize, variant: Option<&'static str>) -> Self {
        SerializeVec {
            vec: Vec::with_capacity(capacity),
            variant,
        }
    }

    fn push<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn finish(self) -> Value {
        wrap_variant(self.variant, Value::List(self.vec))
    }
}

impl SerializeMap {
    fn new(capacity: usize, variant: Option<&'static str>) -> Self {
        SerializeMap {
            map: Dictionary::with_capacity(capacity),
            current_key: None,
            variant,
        }
    }

    fn entry<T: ?Sized + Serialize>(&mut self, key: ByteString, value: &T) -> Result<()> {
        if !is_none(value) {
            self.map.insert(key, to_value(value)?);
        }
        Ok(())
    }

    fn finish(self) -> Value {
        wrap_variant(self.variant, Value::Dictionary(self.map))
    }
}

/// Rebuilds an integer that `Value` serialized as decimal text.
fn integer_from_text(text: Value) -> Result<Value> {
    text.as_str()
        .and_then(|s| s.parse::<BigInt>().ok())
        .map(Value::Integer)
        .ok_or_else(|| Error::custom(format!("invalid integer text {:?}", text)))
}

fn wrap_variant(variant: Option<&'static str>, payload: Value) -> Value {
    match variant {
        Some(name) => {
            let mut dict = Dictionary::with_capacity(1);
            dict.insert(name, payload);
            Value::Dictionary(dict)
        }
        None => payload,
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleVariant for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.current_key = Some(key.serialize(KeySerializer)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.entry(key, value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.entry(ByteString::from(key), value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeStructVariant for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.entry(ByteString::from(key), value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

/// Converts a `T` into a [`Value`].
///
/// # Errors
///
/// Returns [`Error::UnsupportedType`] for floats, unit values and `None`
/// outside a dictionary entry, and [`Error::InvalidKey`] for map keys that
/// have no byte-string form.
///
/// # Examples
///
/// ```rust
/// use serde_bencoding::{to_value, Value};
///
/// assert_eq!(to_value(&true).unwrap(), Value::from(1));
/// assert_eq!(to_value(&vec!["a", "b"]).unwrap().as_list().map(Vec::len), Some(2));
/// assert!(to_value(&1.5_f64).is_err());
/// ```
pub fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    value.serialize(ValueSerializer)
}

/// Serializes map keys to byte strings.
///
/// Strings, bytes and chars are taken as is; integers become their decimal
/// text, matching how JSON-like formats key maps by number.
struct KeySerializer;

impl KeySerializer {
    fn integer(text: String) -> Result<ByteString> {
        Ok(ByteString::from(text))
    }

    fn invalid(kind: &str) -> Error {
        Error::InvalidKey(kind.to_string())
    }
}

impl ser::Serializer for KeySerializer {
    type Ok = ByteString;
    type Error = Error;

    type SerializeSeq = Impossible<ByteString, Error>;
    type SerializeTuple = Impossible<ByteString, Error>;
    type SerializeTupleStruct = Impossible<ByteString, Error>;
    type SerializeTupleVariant = Impossible<ByteString, Error>;
    type SerializeMap = Impossible<ByteString, Error>;
    type SerializeStruct = Impossible<ByteString, Error>;
    type SerializeStructVariant = Impossible<ByteString, Error>;

    fn serialize_bool(self, _v: bool) -> Result<ByteString> {
        Err(Self::invalid("bool"))
    }

    fn serialize_i8(self, v: i8) -> Result<ByteString> {
        Self::integer(v.to_string())
    }

    fn serialize_i16(self, v: i16) -> Result<ByteString> {
        Self::integer(v.to_string())
    }

    fn serialize_i32(self, v: i32) -> Result<ByteString> {
        Self::integer(v.to_string())
    }

    fn serialize_i64(self, v: i64) -> Result<ByteString> {
        Self::integer(v.to_string())
    }

    fn serialize_i128(self, v: i128) -> Result<ByteString> {
        Self::integer(v.to_string())
    }

    fn serialize_u8(self, v: u8) -> Result<ByteString> {
        Self::integer(v.to_string())
    }

    fn serialize_u16(self, v: u16) -> Result<ByteString> {
        Self::integer(v.to_string())
    }

    fn serialize_u32(self, v: u32) -> Result<ByteString> {
        Self::integer(v.to_string())
    }

    fn serialize_u64(self, v: u64) -> Result<ByteString> {
        Self::integer(v.to_string())
    }

    fn serialize_u128(self, v: u128) -> Result<ByteString> {
        Self::integer(v.to_string())
    }

    fn serialize_f32(self, _v: f32) -> Result<ByteString> {
        Err(Self::invalid("f32"))
    }

    fn serialize_f64(self, _v: f64) -> Result<ByteString> {
        Err(Self::invalid("f64"))
    }

    fn serialize_char(self, v: char) -> Result<ByteString> {
        Ok(ByteString::from(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<ByteString> {
        Ok(ByteString::from(v))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<ByteString> {
        Ok(ByteString::from(v))
    }

    fn serialize_none(self) -> Result<ByteString> {
        Err(Self::invalid("none"))
    }

    fn serialize_some<T>(self, _value: &T) -> Result<ByteString>
    where
        T: ?Sized + Serialize,
    {
        Err(Self::invalid("option"))
    }

    fn serialize_unit(self) -> Result<ByteString> {
        Err(Self::invalid("unit"))
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<ByteString> {
        Err(Self::invalid("unit struct"))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<ByteString> {
        Ok(ByteString::from(variant))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<ByteString>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<ByteString>
    where
        T: ?Sized + Serialize,
    {
        Err(Self::invalid("enum variant"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(Self::invalid("sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(Self::invalid("tuple"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(Self::invalid("tuple struct"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Self::invalid("enum variant"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(Self::invalid("map"))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Err(Self::invalid("struct"))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(Self::invalid("enum variant"))
    }
}

/// Reports whether a value serializes as `None`.
///
/// Only the outermost call is inspected, so the probe never walks into
/// compound values.
fn is_none<T: ?Sized + Serialize>(value: &T) -> bool {
    matches!(value.serialize(NoneProbe), Ok(true))
}

struct NoneProbe;

impl NoneProbe {
    fn compound<T>() -> Result<T> {
        Err(Error::custom("compound value"))
    }
}

impl ser::Serializer for NoneProbe {
    type Ok = bool;
    type Error = Error;

    type SerializeSeq = Impossible<bool, Error>;
    type SerializeTuple = Impossible<bool, Error>;
    type SerializeTupleStruct = Impossible<bool, Error>;
    type SerializeTupleVariant = Impossible<bool, Error>;
    type SerializeMap = Impossible<bool, Error>;
    type SerializeStruct = Impossible<bool, Error>;
    type SerializeStructVariant = Impossible<bool, Error>;

    fn serialize_bool(self, _v: bool) -> Result<bool> {
        Ok(false)
    }

    fn serialize_i8(self, _v: i8) -> Result<bool> {
        Ok(false)
    }

    fn serialize_i16(self, _v: i16) -> Result<bool> {
        Ok(false)
    }

    fn serialize_i32(self, _v: i32) -> Result<bool> {
        Ok(false)
    }

    fn serialize_i64(self, _v: i64) -> Result<bool> {
        Ok(false)
    }

    fn serialize_u8(self, _v: u8) -> Result<bool> {
        Ok(false)
    }

    fn serialize_u16(self, _v: u16) -> Result<bool> {
        Ok(false)
    }

    fn serialize_u32(self, _v: u32) -> Result<bool> {
        Ok(false)
    }

    fn serialize_u64(self, _v: u64) -> Result<bool> {
        Ok(false)
    }

    fn serialize_f32(self, _v: f32) -> Result<bool> {
        Ok(false)
    }

    fn serialize_f64(self, _v: f64) -> Result<bool> {
        Ok(false)
    }

    fn serialize_char(self, _v: char) -> Result<bool> {
        Ok(false)
    }

    fn serialize_str(self, _v: &str) -> Result<bool> {
        Ok(false)
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<bool> {
        Ok(false)
    }

    fn serialize_none(self) -> Result<bool> {
        Ok(true)
    }

    fn serialize_some<T>(self, _value: &T) -> Result<bool>
    where
        T: ?Sized + Serialize,
    {
        Ok(false)
    }

    fn serialize_unit(self) -> Result<bool> {
        Ok(false)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<bool> {
        Ok(false)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<bool> {
        Ok(false)
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, _value: &T) -> Result<bool>
    where
        T: ?Sized + Serialize,
    {
        Ok(false)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<bool>
    where
        T: ?Sized + Serialize,
    {
        Ok(false)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Self::compound()
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Self::compound()
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Self::compound()
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Self::compound()
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Self::compound()
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Self::compound()
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Self::compound()
    }
}
