//! Bencode format reference
//!
//! This module documents the bencode format as this crate reads and writes
//! it. It contains no code.
//!
//! # Grammar
//!
//! A bencoded value is one of four kinds, told apart by its first byte:
//!
//! | First byte | Kind | Syntax | Example |
//! |------------|------|--------|---------|
//! | `i` | Integer | `i` digits `e` | `i42e`, `i-7e` |
//! | `0`-`9` | Byte string | length `:` bytes | `4:spam` |
//! | `l` | List | `l` values `e` | `l4:spami1ee` |
//! | `d` | Dictionary | `d` (key value)* `e` | `d3:cow3:mooe` |
//!
//! Any other first byte is [`InvalidInput`](crate::Error::InvalidInput).
//! There is no whitespace, no separator between values, and no null, boolean
//! or floating-point type.
//!
//! ## Integers
//!
//! An optional `-` followed by decimal digits, terminated by `e`. Integers
//! have no size limit; they decode into [`num_bigint::BigInt`].
//!
//! Rejected forms:
//!
//! - leading zeros: `i00e`, `i03e`
//! - negative zero: `i-0e`
//! - any byte other than a digit or `-` before the `e`
//!
//! `ie`, `i-e` and `i1-2e` pass the digit filter but are not numbers, and
//! fail with [`IntegerConversion`](crate::Error::IntegerConversion).
//!
//! ## Byte strings
//!
//! A decimal length, `:`, then exactly that many raw bytes. The bytes are
//! not required to be UTF-8. `0:` is the empty string.
//!
//! The length prefix is read under a [`LengthPrefix`](crate::LengthPrefix)
//! rule. [`Permissive`](crate::LengthPrefix::Permissive), the default,
//! accepts leading zeros (`04:spam`) as most BitTorrent software does.
//! [`Canonical`](crate::LengthPrefix::Canonical) rejects them. An empty
//! prefix (`:abc`) or one that overflows `usize` is always invalid.
//!
//! ## Lists
//!
//! `l`, zero or more values, `e`. Elements may be of any kind and nest to
//! any depth unless [`DecodeOptions::max_depth`](crate::DecodeOptions) is set.
//!
//! ## Dictionaries
//!
//! `d`, zero or more key/value pairs, `e`. Keys are byte strings and must
//! appear in ascending order of their raw bytes:
//!
//! ```text
//! d3:cow3:moo4:spam4:eggse      accepted
//! d4:spam4:eggs3:cow3:mooe      KeyOrdering: "cow" sorts before "spam"
//! d1:ai1e1:ai2ee                accepted, "a" maps to 2
//! ```
//!
//! Two equal consecutive keys are accepted and the later value wins. A key
//! that is not a byte string is [`InvalidInput`](crate::Error::InvalidInput).
//!
//! # Canonical output
//!
//! [`encode`](crate::encode) always writes:
//!
//! - integers without leading zeros or `-0`
//! - byte-string lengths without leading zeros
//! - dictionary keys sorted by raw bytes, whatever order they were inserted in
//!
//! so two equal [`Value`](crate::Value)s always produce identical bytes, and
//! decoding then re-encoding canonical input reproduces it byte for byte.
//!
//! # End of input
//!
//! Input that stops inside a value fails with
//! [`UnexpectedEof`](crate::Error::UnexpectedEof), never with a partial
//! value. Bytes after a complete value are left unread by
//! [`decode`](crate::decode); [`from_bytes`](crate::from_bytes) rejects them
//! with [`TrailingData`](crate::Error::TrailingData).
