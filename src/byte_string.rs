//! Raw byte strings.
//!
//! Bencode strings are length-prefixed byte sequences with no text encoding.
//! [`ByteString`] keeps them as raw bytes, orders them by raw byte value, and
//! only interprets them as UTF-8 on request.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;

/// An owned sequence of raw bytes.
///
/// Ordering is lexicographic over the raw bytes, which is the order bencode
/// requires for dictionary keys.
///
/// # Examples
///
/// ```rust
/// use serde_bencoding::ByteString;
///
/// let a = ByteString::from("cow");
/// let b = ByteString::from(&b"spam"[..]);
/// assert!(a < b);
/// assert_eq!(a.as_str(), Some("cow"));
/// assert_eq!(format!("{:?}", ByteString::from(vec![0x66, 0xff])), "b\"f\\xff\"");
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ByteString(Vec<u8>);

impl ByteString {
    #[must_use]
    pub fn new() -> Self {
        ByteString(Vec::new())
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the bytes as `&str` if they are valid UTF-8.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.0).ok()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

impl fmt::Debug for ByteString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "b\"{}\"", self.0.escape_ascii())
    }
}

impl Deref for ByteString {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for ByteString {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Borrow<[u8]> for ByteString {
    fn borrow(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for ByteString {
    fn from(bytes: Vec<u8>) -> Self {
        ByteString(bytes)
    }
}

impl From<&[u8]> for ByteString {
    fn from(bytes: &[u8]) -> Self {
        ByteString(bytes.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for ByteString {
    fn from(bytes: &[u8; N]) -> Self {
        ByteString(bytes.to_vec())
    }
}

impl From<&str> for ByteString {
    fn from(s: &str) -> Self {
        ByteString(s.as_bytes().to_vec())
    }
}

impl From<String> for ByteString {
    fn from(s: String) -> Self {
        ByteString(s.into_bytes())
    }
}

impl From<ByteString> for Vec<u8> {
    fn from(s: ByteString) -> Self {
        s.0
    }
}

impl Serialize for ByteString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.as_str() {
            Some(s) => serializer.serialize_str(s),
            None => serializer.serialize_bytes(&self.0),
        }
    }
}

impl<'de> Deserialize<'de> for ByteString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ByteStringVisitor;

        impl<'de> Visitor<'de> for ByteStringVisitor {
            type Value = ByteString;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a byte string")
            }

            fn visit_str<E>(self, value: &str) -> Result<ByteString, E> {
                Ok(ByteString::from(value))
            }

            fn visit_string<E>(self, value: String) -> Result<ByteString, E> {
                Ok(ByteString::from(value))
            }

            fn visit_bytes<E>(self, value: &[u8]) -> Result<ByteString, E> {
                Ok(ByteString::from(value))
            }

            fn visit_byte_buf<E>(self, value: Vec<u8>) -> Result<ByteString, E> {
                Ok(ByteString::from(value))
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<ByteString, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut bytes = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(b) = seq.next_element::<u8>()? {
                    bytes.push(b);
                }
                Ok(ByteString(bytes))
            }
        }

        deserializer.deserialize_byte_buf(ByteStringVisitor)
    }
}
