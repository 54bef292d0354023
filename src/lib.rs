//! # serde_bencoding
//!
//! A streaming decoder, value model and canonical encoder for the bencode
//! format, with a Serde bridge on top.
//!
//! ## What is bencode?
//!
//! Bencode is the serialization format of BitTorrent: metainfo (`.torrent`)
//! files, tracker responses and DHT messages all use it. It has exactly four
//! kinds of value (integers, byte strings, lists and dictionaries) and a
//! canonical form, so equal data always encodes to identical bytes. That
//! property is what lets BitTorrent identify a torrent by the hash of its
//! encoded `info` dictionary.
//!
//! ## Key Features
//!
//! - **Streaming**: decodes from any [`std::io::Read`] through a fixed-size
//!   buffer with one byte of lookahead
//! - **Lossless**: arbitrary-precision integers and raw, non-UTF-8 byte strings
//! - **Canonical**: the encoder always sorts dictionary keys by raw bytes, so
//!   decode then encode reproduces canonical input byte for byte
//! - **Strict where it matters**: leading zeros, `-0` and out-of-order keys
//!   are rejected, and truncated input is always an error, never a partial
//!   value
//! - **Serde compatible**: works with `#[derive(Serialize, Deserialize)]`
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_bencoding::{decode, encode, Value};
//!
//! let input = b"d3:cow3:moo4:spam4:eggse";
//! let value = decode(&input[..]).unwrap();
//!
//! assert!(value.is_dictionary());
//! assert_eq!(value.get(b"cow").and_then(Value::as_str), Some("moo"));
//! assert_eq!(encode(&value), input);
//! ```
//!
//! ### Typed data
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_bencoding::{from_bytes, to_bytes, ByteString};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Torrent {
//!     announce: String,
//!     info: Info,
//! }
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Info {
//!     name: String,
//!     #[serde(rename = "piece length")]
//!     piece_length: u32,
//!     pieces: ByteString,
//! }
//!
//! let torrent = Torrent {
//!     announce: "http://tracker.example/announce".into(),
//!     info: Info {
//!         name: "debian.iso".into(),
//!         piece_length: 262144,
//!         pieces: ByteString::from(vec![0xde, 0xad, 0xbe, 0xef]),
//!     },
//! };
//!
//! let bytes = to_bytes(&torrent).unwrap();
//! let back: Torrent = from_bytes(&bytes).unwrap();
//! assert_eq!(torrent, back);
//! ```
//!
//! ### Dynamic values with the `bencode!` macro
//!
//! ```rust
//! use serde_bencoding::{bencode, encode};
//!
//! let value = bencode!({
//!     "spam": ["a", "b"],
//!     "cow": 1
//! });
//! assert_eq!(encode(&value), b"d3:cowi1e4:spaml1:a1:bee");
//! ```
//!
//! ## Decoding options
//!
//! [`DecodeOptions`] sets the read buffer size, how byte-string length
//! prefixes are checked, and an optional nesting limit for untrusted input.
//! See [`decode_with_options`].
//!
//! ## Logging
//!
//! The decoder emits [`tracing`] events: `trace` for each buffer refill and
//! `debug` for duplicate or out-of-order dictionary keys. No subscriber is
//! installed by this crate.
//!
//! ## Format Reference
//!
//! The accepted grammar and the canonical output rules are documented in
//! [`format`].
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - decoding and encoding a torrent-like structure
//! - **`macro.rs`** - building values with the `bencode!` macro
//! - **`inspect.rs`** - decode a file, print it as JSON, re-encode it
//! - **`dynamic_values.rs`** - working with [`Value`] dynamically
//! - **`custom_options.rs`** - buffer size, length prefix rule, depth limit
//!
//! Run any example with: `cargo run --example <name>`

pub mod byte_string;
pub mod de;
pub mod decode;
pub mod encode;
pub mod error;
pub mod format;
pub mod macros;
pub mod map;
pub mod options;
pub mod ser;
pub mod source;
pub mod value;

pub use byte_string::ByteString;
pub use de::{from_value, ValueDeserializer};
pub use decode::Decoder;
pub use encode::{encode, encode_into, encode_to_writer};
pub use error::{Error, Result};
pub use map::Dictionary;
pub use options::{DecodeOptions, LengthPrefix, DEFAULT_BUFFER_CAPACITY, STRICT_MAX_DEPTH};
pub use ser::{to_value, ValueSerializer};
pub use source::ByteSource;
pub use value::{Kind, Value};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;

/// Decodes one value from a reader with default options.
///
/// Reading stops right after the value; whatever follows is not consumed
/// from the decoder's point of view, though it may already sit in the read
/// buffer.
///
/// # Examples
///
/// ```rust
/// use serde_bencoding::{decode, Value};
///
/// let value = decode(&b"l4:spami42ee"[..]).unwrap();
/// assert_eq!(value, Value::List(vec![Value::from("spam"), Value::from(42)]));
///
/// assert!(decode(&b"i-0e"[..]).is_err());
/// assert!(decode(&b"l4:spam"[..]).unwrap_err().is_eof());
/// ```
///
/// # Errors
///
/// Returns an error if the input is not valid bencode, ends early, or the
/// reader fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn decode<R: io::Read>(reader: R) -> Result<Value> {
    decode_with_options(reader, DecodeOptions::default())
}

/// Decodes one value from a reader with custom options.
///
/// # Examples
///
/// ```rust
/// use serde_bencoding::{decode_with_options, DecodeOptions, LengthPrefix};
///
/// let input = &b"04:spam"[..];
/// assert!(decode_with_options(input, DecodeOptions::new()).is_ok());
///
/// let canonical = DecodeOptions::new().with_length_prefix(LengthPrefix::Canonical);
/// assert!(decode_with_options(input, canonical).is_err());
/// ```
///
/// # Errors
///
/// Returns an error if the input is not valid bencode under `options`, ends
/// early, or the reader fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn decode_with_options<R: io::Read>(reader: R, options: DecodeOptions) -> Result<Value> {
    Decoder::with_options(reader, options).decode_value()
}

/// Serializes any `T: Serialize` to canonical bencode bytes.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use serde_bencoding::to_bytes;
///
/// #[derive(Serialize)]
/// struct Point { y: i32, x: i32 }
///
/// assert_eq!(to_bytes(&Point { y: 2, x: 1 }).unwrap(), b"d1:xi1e1:yi2ee");
/// ```
///
/// # Errors
///
/// Returns an error if `T` contains a type bencode cannot represent, such as
/// a float.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_bytes<T>(value: &T) -> Result<Vec<u8>>
where
    T: ?Sized + Serialize,
{
    Ok(encode(&to_value(value)?))
}

/// Serializes any `T: Serialize` to a writer as canonical bencode.
///
/// # Examples
///
/// ```rust
/// use serde_bencoding::to_writer;
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &vec![1, 2]).unwrap();
/// assert_eq!(buffer, b"li1ei2ee");
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    encode_to_writer(writer, &to_value(value)?)
}

/// Deserializes a `T` from a slice holding exactly one bencoded value.
///
/// # Examples
///
/// ```rust
/// use serde_bencoding::{from_bytes, Error};
///
/// let list: Vec<String> = from_bytes(b"l4:spam4:eggse").unwrap();
/// assert_eq!(list, vec!["spam", "eggs"]);
///
/// let err = from_bytes::<i64>(b"i1ei2e").unwrap_err();
/// assert!(matches!(err, Error::TrailingData { position: 3 }));
/// ```
///
/// # Errors
///
/// Returns an error if the bytes are not one valid bencoded value, if bytes
/// remain after it, or if the value does not fit `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_bytes<T>(data: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let mut decoder = Decoder::new(data);
    let value = decoder.decode_value()?;
    let position = decoder.position();
    if position < data.len() as u64 {
        return Err(Error::TrailingData { position });
    }
    from_value(value)
}

/// Deserializes a `T` from the next bencoded value in a reader.
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use serde_bencoding::from_reader;
/// use std::io::Cursor;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Peer { ip: String, port: u16 }
///
/// let cursor = Cursor::new(b"d2:ip9:127.0.0.14:porti6881ee".to_vec());
/// let peer: Peer = from_reader(cursor).unwrap();
/// assert_eq!(peer, Peer { ip: "127.0.0.1".into(), port: 6881 });
/// ```
///
/// # Errors
///
/// Returns an error if reading fails, the input is not valid bencode, or the
/// value does not fit `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    from_value(decode(reader)?)
}
