//! Dynamic value representation for bencode data.
//!
//! This module provides the [`Value`] enum, which represents any bencode
//! value, and [`Kind`], the tag naming each of its four variants.
//!
//! ## Usage Patterns
//!
//! ### Creating Values
//!
//! ```rust
//! use serde_bencoding::{bencode, Value};
//!
//! let number = Value::from(42);
//! let text = Value::from("hello");
//! let raw = Value::from(vec![0xde_u8, 0xad]);
//!
//! let dict = bencode!({
//!     "name": "debian.iso",
//!     "length": 1024
//! });
//! assert!(dict.is_dictionary());
//! ```
//!
//! ### Type Checking
//!
//! ```rust
//! use serde_bencoding::{Kind, Value};
//!
//! let value = Value::from(42);
//! assert!(value.is(Kind::Integer));
//! assert_eq!(value.kind(), Kind::Integer);
//! assert!(!value.is_byte_string());
//! ```
//!
//! ### Extracting Values
//!
//! ```rust
//! use serde_bencoding::Value;
//!
//! let value = Value::from(42);
//! let num: i64 = i64::try_from(value).unwrap();
//! assert_eq!(num, 42);
//! ```

use crate::{ByteString, Dictionary, Error};
use num_bigint::BigInt;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// The four kinds of bencode value.
///
/// # Examples
///
/// ```rust
/// use serde_bencoding::Kind;
///
/// assert_eq!(Kind::from_prefix(b'i'), Some(Kind::Integer));
/// assert_eq!(Kind::from_prefix(b'7'), Some(Kind::ByteString));
/// assert_eq!(Kind::from_prefix(b'x'), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Integer,
    ByteString,
    List,
    Dictionary,
}

impl Kind {
    /// Returns the kind of value whose encoding starts with `byte`.
    #[inline]
    #[must_use]
    pub const fn from_prefix(byte: u8) -> Option<Kind> {
        match byte {
            b'0'..=b'9' => Some(Kind::ByteString),
            b'i' => Some(Kind::Integer),
            b'l' => Some(Kind::List),
            b'd' => Some(Kind::Dictionary),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Kind::Integer => "integer",
            Kind::ByteString => "byte string",
            Kind::List => "list",
            Kind::Dictionary => "dictionary",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Any bencode value.
///
/// Values own their children outright; a tree has no sharing and no cycles.
///
/// # Examples
///
/// ```rust
/// use serde_bencoding::{decode, Value};
///
/// let value = decode(&b"l4:spami42ee"[..]).unwrap();
/// let list = value.as_list().unwrap();
/// assert_eq!(list[0].as_str(), Some("spam"));
/// assert_eq!(list[1].as_i64(), Some(42));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    /// An arbitrary-precision signed integer.
    Integer(BigInt),
    /// Raw bytes, not necessarily UTF-8.
    ByteString(ByteString),
    List(Vec<Value>),
    Dictionary(Dictionary),
}

impl Value {
    /// Returns which of the four kinds this value is.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Value::Integer(_) => Kind::Integer,
            Value::ByteString(_) => Kind::ByteString,
            Value::List(_) => Kind::List,
            Value::Dictionary(_) => Kind::Dictionary,
        }
    }

    /// Returns `true` if this value is of the given kind.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_bencoding::{decode, Kind};
    ///
    /// let value = decode(&b"d3:cow3:mooe"[..]).unwrap();
    /// assert!(value.is(Kind::Dictionary));
    /// assert!(!value.is(Kind::List));
    /// ```
    #[inline]
    #[must_use]
    pub fn is(&self, kind: Kind) -> bool {
        self.kind() == kind
    }

    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Value::Integer(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_byte_string(&self) -> bool {
        matches!(self, Value::ByteString(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_dictionary(&self) -> bool {
        matches!(self, Value::Dictionary(_))
    }

    /// If the value is an integer, returns a reference to it.
    #[inline]
    #[must_use]
    pub fn as_integer(&self) -> Option<&BigInt> {
        match self {
            Value::Integer(n) => Some(n),
            _ => None,
        }
    }

    /// If the value is an integer that fits in `i64`, returns it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_bencoding::decode;
    ///
    /// assert_eq!(decode(&b"i-5e"[..]).unwrap().as_i64(), Some(-5));
    /// assert_eq!(decode(&b"i99999999999999999999e"[..]).unwrap().as_i64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        self.as_integer().and_then(|n| i64::try_from(n).ok())
    }

    #[inline]
    #[must_use]
    pub fn as_byte_string(&self) -> Option<&ByteString> {
        match self {
            Value::ByteString(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is a byte string, returns its raw bytes.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        self.as_byte_string().map(ByteString::as_bytes)
    }

    /// If the value is a byte string holding valid UTF-8, returns it as `&str`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_bencoding::Value;
    ///
    /// assert_eq!(Value::from("hello").as_str(), Some("hello"));
    /// assert_eq!(Value::from(vec![0xff_u8]).as_str(), None);
    /// assert_eq!(Value::from(42).as_str(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.as_byte_string().and_then(ByteString::as_str)
    }

    #[inline]
    #[must_use]
    pub fn as_list(&self) -> Option<&Vec<Value>> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_dictionary(&self) -> Option<&Dictionary> {
        match self {
            Value::Dictionary(d) => Some(d),
            _ => None,
        }
    }

    /// Consumes the value and returns the dictionary, if it is one.
    #[must_use]
    pub fn into_dictionary(self) -> Option<Dictionary> {
        match self {
            Value::Dictionary(d) => Some(d),
            _ => None,
        }
    }

    /// Looks up `key` if this value is a dictionary.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_bencoding::decode;
    ///
    /// let value = decode(&b"d3:foo3:bare"[..]).unwrap();
    /// assert_eq!(value.get(b"foo").and_then(|v| v.as_str()), Some("bar"));
    /// assert_eq!(value.get(b"missing"), None);
    /// ```
    #[must_use]
    pub fn get(&self, key: &[u8]) -> Option<&Value> {
        self.as_dictionary()?.get(key)
    }
}

/// Name under which integers wider than 64 bits travel through Serde.
///
/// On the way out the integer is a newtype struct of this name wrapping its
/// decimal text; on the way in it is a one-entry map keyed by this name.
/// Formats that know nothing of it see a plain string or map.
pub(crate) const INTEGER_TOKEN: &str = "$serde_bencoding::private::Integer";

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Integer(n) => {
                if let Ok(i) = i64::try_from(n) {
                    serializer.serialize_i64(i)
                } else if let Ok(u) = u64::try_from(n) {
                    serializer.serialize_u64(u)
                } else {
                    serializer.serialize_newtype_struct(INTEGER_TOKEN, &n.to_string())
                }
            }
            Value::ByteString(s) => s.serialize(serializer),
            Value::List(list) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(list.len()))?;
                for element in list {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Value::Dictionary(dict) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(dict.len()))?;
                for (k, v) in dict.sorted_iter() {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any valid bencode value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Value, E> {
                Ok(Value::from(u8::from(value)))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Value, E> {
                Ok(Value::from(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Value, E> {
                Ok(Value::from(value))
            }

            fn visit_i128<E>(self, value: i128) -> Result<Value, E> {
                Ok(Value::Integer(BigInt::from(value)))
            }

            fn visit_u128<E>(self, value: u128) -> Result<Value, E> {
                Ok(Value::Integer(BigInt::from(value)))
            }

            fn visit_str<E>(self, value: &str) -> Result<Value, E> {
                Ok(Value::from(value))
            }

            fn visit_string<E>(self, value: String) -> Result<Value, E> {
                Ok(Value::from(value))
            }

            fn visit_bytes<E>(self, value: &[u8]) -> Result<Value, E> {
                Ok(Value::ByteString(ByteString::from(value)))
            }

            fn visit_byte_buf<E>(self, value: Vec<u8>) -> Result<Value, E> {
                Ok(Value::from(value))
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_newtype_struct<D>(self, deserializer: D) -> Result<Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut vec = Vec::new();
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                Ok(Value::List(vec))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let first = match map.next_key::<ByteString>()? {
                    Some(key) => key,
                    None => return Ok(Value::Dictionary(Dictionary::new())),
                };
                if first.as_bytes() == INTEGER_TOKEN.as_bytes() {
                    let text: String = map.next_value()?;
                    return text
                        .parse::<BigInt>()
                        .map(Value::Integer)
                        .map_err(|_| de::Error::custom(format!("invalid integer {:?}", text)));
                }

                let mut dict = Dictionary::new();
                dict.insert(first, map.next_value()?);
                while let Some((key, value)) = map.next_entry::<ByteString, Value>()? {
                    dict.insert(key, value);
                }
                Ok(Value::Dictionary(dict))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

impl TryFrom<Value> for BigInt {
    type Error = Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Integer(n) => Ok(n),
            other => Err(Error::type_mismatch("integer", other.kind().as_str())),
        }
    }
}

impl TryFrom<Value> for i64 {
    type Error = Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        let n = BigInt::try_from(value)?;
        i64::try_from(&n).map_err(|_| Error::IntegerOutOfRange(n.to_string()))
    }
}

impl TryFrom<Value> for ByteString {
    type Error = Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::ByteString(s) => Ok(s),
            other => Err(Error::type_mismatch("byte string", other.kind().as_str())),
        }
    }
}

impl TryFrom<Value> for Vec<u8> {
    type Error = Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        ByteString::try_from(value).map(ByteString::into_vec)
    }
}

impl TryFrom<Value> for String {
    type Error = Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        let bytes = Vec::<u8>::try_from(value)?;
        String::from_utf8(bytes).map_err(|e| Error::custom(e.to_string()))
    }
}

impl TryFrom<Value> for Vec<Value> {
    type Error = Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::List(l) => Ok(l),
            other => Err(Error::type_mismatch("list", other.kind().as_str())),
        }
    }
}

impl TryFrom<Value> for Dictionary {
    type Error = Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Dictionary(d) => Ok(d),
            other => Err(Error::type_mismatch("dictionary", other.kind().as_str())),
        }
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Integer(BigInt::from(value))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

impl From<BigInt> for Value {
    fn from(value: BigInt) -> Self {
        Value::Integer(value)
    }
}

impl From<ByteString> for Value {
    fn from(value: ByteString) -> Self {
        Value::ByteString(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::ByteString(ByteString::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::ByteString(ByteString::from(value))
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::ByteString(ByteString::from(value))
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::ByteString(ByteString::from(value))
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

impl From<Dictionary> for Value {
    fn from(value: Dictionary) -> Self {
        Value::Dictionary(value)
    }
}
