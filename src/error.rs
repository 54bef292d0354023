//! Error types for bencode decoding, encoding and Serde conversion.
//!
//! Every fallible operation in this crate returns [`Result<T>`], whose error
//! side is the single [`Error`] enum below.
//!
//! ## Error Categories
//!
//! - **Grammar errors**: [`Error::InvalidInput`], [`Error::UnexpectedEof`],
//!   [`Error::KeyOrdering`], [`Error::IntegerConversion`],
//!   [`Error::NestingTooDeep`], [`Error::TrailingData`]
//! - **I/O errors**: [`Error::Io`], carrying the reader's or writer's
//!   `std::io::Error` unchanged
//! - **Serde errors**: [`Error::TypeMismatch`], [`Error::IntegerOutOfRange`],
//!   [`Error::UnsupportedType`], [`Error::InvalidKey`], [`Error::Custom`]
//!
//! Grammar errors carry the byte offset at which decoding stopped.
//!
//! ## Examples
//!
//! ```rust
//! use serde_bencoding::{decode, Error};
//!
//! let err = decode(&b"i-0e"[..]).unwrap_err();
//! assert!(matches!(err, Error::InvalidInput { .. }));
//!
//! let err = decode(&b"l4:spam"[..]).unwrap_err();
//! assert!(err.is_eof());
//! assert!(err.is_invalid_input());
//! ```

use crate::ByteString;
use std::fmt;
use std::io;
use thiserror::Error;

/// Represents all possible errors produced by this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Error reported by the underlying reader or writer.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The input violates the bencode grammar.
    #[error("invalid input at byte {position}: {msg}")]
    InvalidInput { position: u64, msg: String },

    /// The input ended before a complete value was read.
    #[error("unexpected end of input at byte {position}, expected {expected}")]
    UnexpectedEof { position: u64, expected: String },

    /// A dictionary key sorts strictly before the key preceding it.
    #[error("dictionary key {key:?} at byte {position} sorts before previous key {previous:?}")]
    KeyOrdering {
        position: u64,
        previous: ByteString,
        key: ByteString,
    },

    /// The digits of an integer could not be converted to a number.
    #[error("integer conversion failed for {0:?}")]
    IntegerConversion(String),

    /// Lists and dictionaries are nested deeper than the configured limit.
    #[error("nesting deeper than {limit} levels at byte {position}")]
    NestingTooDeep { position: u64, limit: usize },

    /// Bytes remain after the value in an input that must hold exactly one.
    #[error("trailing data after value at byte {position}")]
    TrailingData { position: u64 },

    /// An integer does not fit the requested Rust integer type.
    #[error("integer {0} is out of range for the target type")]
    IntegerOutOfRange(String),

    /// A value has a different shape than the deserialization target.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// The Rust type has no bencode representation.
    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    /// A map key that cannot become a byte string.
    #[error("dictionary keys must be byte strings, found {0}")]
    InvalidKey(String),

    /// Custom error raised through Serde.
    #[error("{0}")]
    Custom(String),
}

impl Error {
    /// Creates a grammar error at the given byte offset.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_bencoding::Error;
    ///
    /// let err = Error::invalid_input(7, "expected ':'");
    /// assert!(err.to_string().contains("byte 7"));
    /// ```
    pub fn invalid_input(position: u64, msg: &str) -> Self {
        Error::InvalidInput {
            position,
            msg: msg.to_string(),
        }
    }

    /// Creates an end-of-input error at the given byte offset.
    pub fn unexpected_eof(position: u64, expected: &str) -> Self {
        Error::UnexpectedEof {
            position,
            expected: expected.to_string(),
        }
    }

    /// Creates a type mismatch error for typed deserialization.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_bencoding::Error;
    ///
    /// let err = Error::type_mismatch("list", "integer");
    /// assert!(err.to_string().contains("expected list"));
    /// ```
    pub fn type_mismatch(expected: &str, found: &str) -> Self {
        Error::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates an unsupported type error.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_bencoding::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Returns `true` if the input ended before a complete value was read.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        matches!(self, Error::UnexpectedEof { .. })
    }

    /// Returns `true` for errors caused by malformed input.
    ///
    /// Premature end of input counts as malformed input, so this is `true`
    /// for both [`Error::InvalidInput`] and [`Error::UnexpectedEof`].
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Error::InvalidInput { .. } | Error::UnexpectedEof { .. }
        )
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
