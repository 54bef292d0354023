//! Streaming bencode decoding.
//!
//! [`Decoder`] reads one value at a time from any [`Read`] through a
//! [`ByteSource`], deciding what to parse next from a single byte of
//! lookahead. Most callers use [`crate::decode`] or
//! [`crate::decode_with_options`]; hold a `Decoder` directly to read several
//! concatenated values from one stream.
//!
//! ```rust
//! use serde_bencoding::{Decoder, Value};
//!
//! let mut decoder = Decoder::new(&b"i1e4:spamle"[..]);
//! assert_eq!(decoder.decode_next().unwrap(), Some(Value::from(1)));
//! assert_eq!(decoder.decode_next().unwrap(), Some(Value::from("spam")));
//! assert_eq!(decoder.decode_next().unwrap(), Some(Value::List(vec![])));
//! assert_eq!(decoder.decode_next().unwrap(), None);
//! ```

use crate::options::DecodeOptions;
use crate::{ByteSource, ByteString, Dictionary, Error, Kind, Result, Value};
use num_bigint::BigInt;
use std::io::{self, Read};
use tracing::debug;

/// A recursive-descent bencode decoder over a buffered reader.
pub struct Decoder<R> {
    source: ByteSource<R>,
    options: DecodeOptions,
    depth: usize,
}

impl<R: Read> Decoder<R> {
    /// Creates a decoder with default options.
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, DecodeOptions::default())
    }

    pub fn with_options(reader: R, options: DecodeOptions) -> Self {
        Decoder {
            source: ByteSource::with_capacity(options.buffer_capacity, reader),
            options,
            depth: 0,
        }
    }

    /// Decodes exactly one value starting at the current position.
    ///
    /// On success the decoder is positioned immediately after the value's
    /// last byte; anything after it is left unread.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedEof`] if the input ends before the value is
    /// complete (including an input with no bytes left at all),
    /// [`Error::InvalidInput`] for grammar violations,
    /// [`Error::KeyOrdering`] for out-of-order dictionary keys,
    /// [`Error::IntegerConversion`] for unparseable integer digits, and
    /// [`Error::Io`] for reader failures.
    pub fn decode_value(&mut self) -> Result<Value> {
        self.depth = 0;
        self.value()
    }

    /// Decodes the next value, or returns `None` if the input ends cleanly
    /// before one starts.
    ///
    /// # Errors
    ///
    /// Same as [`Decoder::decode_value`], except for a clean end of input.
    pub fn decode_next(&mut self) -> Result<Option<Value>> {
        match self.source.peek_byte() {
            Ok(_) => self.decode_value().map(Some),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(Error::Io(e)),
        }
    }

    /// Number of bytes consumed since creation or the last reset.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.source.position()
    }

    /// Bytes read ahead from the reader but not yet decoded.
    #[must_use]
    pub fn buffered(&self) -> &[u8] {
        self.source.buffered()
    }

    /// Discards buffered input, e.g. after seeking the reader.
    pub fn reset(&mut self) {
        self.source.reset();
        self.depth = 0;
    }

    pub fn get_ref(&self) -> &R {
        self.source.get_ref()
    }

    pub fn get_mut(&mut self) -> &mut R {
        self.source.get_mut()
    }

    pub fn into_inner(self) -> R {
        self.source.into_inner()
    }

    fn io_error(&self, err: io::Error, expected: &str) -> Error {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Error::unexpected_eof(self.position(), expected)
        } else {
            Error::Io(err)
        }
    }

    fn peek(&mut self, expected: &str) -> Result<u8> {
        match self.source.peek_byte() {
            Ok(b) => Ok(b),
            Err(e) => Err(self.io_error(e, expected)),
        }
    }

    fn bump(&mut self, expected: &str) -> Result<u8> {
        match self.source.next_byte() {
            Ok(b) => Ok(b),
            Err(e) => Err(self.io_error(e, expected)),
        }
    }

    /// Consumes `token`, failing without consuming anything else.
    fn expect(&mut self, token: u8) -> Result<()> {
        let expected = format!("'{}'", token as char);
        let b = self.peek(&expected)?;
        if b != token {
            return Err(Error::invalid_input(
                self.position(),
                &format!("expected {}, found {:?}", expected, b as char),
            ));
        }
        self.bump(&expected)?;
        Ok(())
    }

    fn value(&mut self) -> Result<Value> {
        let b = self.peek("a value")?;
        match Kind::from_prefix(b) {
            Some(Kind::ByteString) => Ok(Value::ByteString(self.byte_string()?)),
            Some(Kind::Integer) => self.integer(),
            Some(Kind::List) => self.list(),
            Some(Kind::Dictionary) => self.dictionary(),
            None => Err(Error::invalid_input(
                self.position(),
                &format!("unexpected byte {:?} at start of value", b as char),
            )),
        }
    }

    fn integer(&mut self) -> Result<Value> {
        self.expect(b'i')?;

        let mut text = String::new();
        let mut prev = 0u8;
        loop {
            let b = self.peek("integer digits or 'e'")?;
            if !b.is_ascii_digit() && b != b'-' {
                break;
            }
            if (text.len() == 1 && prev == b'0') || (b == b'0' && prev == b'-') {
                return Err(Error::invalid_input(
                    self.position(),
                    "integer has a leading zero or negative zero",
                ));
            }
            text.push(b as char);
            prev = b;
            self.bump("integer digits")?;
        }

        self.expect(b'e')?;

        text.parse::<BigInt>()
            .map(Value::Integer)
            .map_err(|_| Error::IntegerConversion(text))
    }

    /// Reads `<len>:` and returns `len`.
    fn length_prefix(&mut self) -> Result<usize> {
        let start = self.position();
        let mut digits = Vec::new();
        let mut len: usize = 0;
        loop {
            let b = self.bump("length digits or ':'")?;
            if b == b':' {
                break;
            }
            if !b.is_ascii_digit() {
                return Err(Error::invalid_input(
                    self.position() - 1,
                    &format!("unexpected byte {:?} in string length", b as char),
                ));
            }
            len = len
                .checked_mul(10)
                .and_then(|n| n.checked_add(usize::from(b - b'0')))
                .ok_or_else(|| Error::invalid_input(start, "string length overflows"))?;
            digits.push(b);
        }

        if digits.is_empty() {
            return Err(Error::invalid_input(start, "empty string length"));
        }
        if !self.options.length_prefix.allows(&digits) {
            return Err(Error::invalid_input(
                start,
                "string length has a leading zero",
            ));
        }
        Ok(len)
    }

    fn byte_string(&mut self) -> Result<ByteString> {
        let len = self.length_prefix()?;
        let mut bytes = Vec::with_capacity(len.min(self.source.capacity()));
        for _ in 0..len {
            bytes.push(self.bump("string bytes")?);
        }
        Ok(ByteString::from(bytes))
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        match self.options.max_depth {
            Some(limit) if self.depth > limit => Err(Error::NestingTooDeep {
                position: self.position(),
                limit,
            }),
            _ => Ok(()),
        }
    }

    fn list(&mut self) -> Result<Value> {
        self.expect(b'l')?;
        self.enter()?;

        let mut list = Vec::new();
        loop {
            if self.peek("list element or 'e'")? == b'e' {
                self.bump("'e'")?;
                break;
            }
            list.push(self.value()?);
        }

        self.depth -= 1;
        Ok(Value::List(list))
    }

    fn dictionary(&mut self) -> Result<Value> {
        self.expect(b'd')?;
        self.enter()?;

        let mut dict = Dictionary::new();
        let mut previous: Option<ByteString> = None;
        loop {
            let b = self.peek("dictionary key or 'e'")?;
            if b == b'e' {
                self.bump("'e'")?;
                break;
            }
            if !b.is_ascii_digit() {
                return Err(Error::invalid_input(
                    self.position(),
                    &format!("dictionary key must be a byte string, found {:?}", b as char),
                ));
            }

            let key_position = self.position();
            let key = self.byte_string()?;
            if let Some(prev) = &previous {
                if key < *prev {
                    debug!(position = key_position, key = ?key, previous = ?prev, "dictionary keys out of order");
                    return Err(Error::KeyOrdering {
                        position: key_position,
                        previous: prev.clone(),
                        key,
                    });
                }
            }

            let value = self.value()?;
            if dict.insert(key.clone(), value).is_some() {
                debug!(position = key_position, key = ?key, "duplicate dictionary key, keeping later value");
            }
            previous = Some(key);
        }

        self.depth -= 1;
        Ok(Value::Dictionary(dict))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LengthPrefix;
    use std::io::{Cursor, Seek, SeekFrom};

    fn decode(input: &[u8]) -> Result<Value> {
        Decoder::new(input).decode_value()
    }

    #[test]
    fn test_decode_integer() {
        assert_eq!(decode(b"i42e").unwrap(), Value::from(42));
        assert_eq!(decode(b"i-42e").unwrap(), Value::from(-42));
        assert_eq!(decode(b"i0e").unwrap(), Value::from(0));
    }

    #[test]
    fn test_decode_integer_invalid() {
        for input in [&b"i-0e"[..], b"i00e", b"i03e", b"i0-e", b"i5-0e"] {
            match decode(input) {
                Err(Error::InvalidInput { .. }) => {}
                other => panic!("{:?}: expected InvalidInput, got {:?}", input, other),
            }
        }
        assert!(matches!(decode(b"i12x"), Err(Error::InvalidInput { .. })));
    }

    #[test]
    fn test_integer_conversion_errors() {
        for input in [&b"ie"[..], b"i-e", b"i1-2e", b"i--1e"] {
            match decode(input) {
                Err(Error::IntegerConversion(_)) => {}
                other => panic!("{:?}: expected IntegerConversion, got {:?}", input, other),
            }
        }
    }

    #[test]
    fn test_decode_byte_string() {
        assert_eq!(decode(b"4:spam").unwrap(), Value::from("spam"));
        assert_eq!(decode(b"0:").unwrap(), Value::from(""));
        assert_eq!(decode(b"3:\x00\xff:").unwrap(), Value::from(vec![0_u8, 0xff, b':']));
    }

    #[test]
    fn test_length_prefix_errors() {
        assert!(matches!(decode(b"4x:spam"), Err(Error::InvalidInput { position: 1, .. })));
        assert!(matches!(
            decode(b"99999999999999999999999:"),
            Err(Error::InvalidInput { .. })
        ));
        assert!(decode(b"5:spam").unwrap_err().is_eof());
    }

    #[test]
    fn test_length_prefix_rules() {
        assert_eq!(decode(b"04:spam").unwrap(), Value::from("spam"));

        let strict = DecodeOptions::new().with_length_prefix(LengthPrefix::Canonical);
        let err = Decoder::with_options(&b"04:spam"[..], strict.clone())
            .decode_value()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput { position: 0, .. }));
        assert_eq!(
            Decoder::with_options(&b"0:"[..], strict).decode_value().unwrap(),
            Value::from("")
        );
    }

    #[test]
    fn test_decode_list() {
        let value = decode(b"l4:spami42ee").unwrap();
        assert_eq!(value, Value::List(vec![Value::from("spam"), Value::from(42)]));
        assert_eq!(decode(b"le").unwrap(), Value::List(vec![]));
    }

    #[test]
    fn test_decode_dictionary() {
        let value = decode(b"d3:cow3:moo4:spam4:eggse").unwrap();
        let dict = value.as_dictionary().unwrap();
        assert_eq!(dict.len(), 2);
        assert_eq!(dict.get(b"cow"), Some(&Value::from("moo")));
        assert_eq!(dict.get(b"spam"), Some(&Value::from("eggs")));
    }

    #[test]
    fn test_key_ordering_error() {
        match decode(b"d4:spam3:egg3:cow3:mooe") {
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
    fn test_duplicate_keys_keep_last_value() {
        let value = decode(b"d1:ai1e1:ai2ee").unwrap();
        let dict = value.as_dictionary().unwrap();
        assert_eq!(dict.len(), 1);
        assert_eq!(dict.get(b"a"), Some(&Value::from(2)));
    }

    #[test]
    fn test_non_string_key_is_invalid() {
        assert!(matches!(decode(b"di1ei2ee"), Err(Error::InvalidInput { .. })));
    }

    #[test]
    fn test_invalid_prefix() {
        match decode(b"x") {
            Err(Error::InvalidInput { position, .. }) => assert_eq!(position, 0),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_input_is_eof() {
        let err = decode(b"").unwrap_err();
        assert!(err.is_eof());
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_position_after_value() {
        let mut decoder = Decoder::with_options(&b"4:spamtrailing"[..], DecodeOptions::new());
        assert_eq!(decoder.decode_value().unwrap(), Value::from("spam"));
        assert_eq!(decoder.position(), 6);
        assert_eq!(decoder.buffered(), b"trailing");
    }

    #[test]
    fn test_max_depth() {
        let options = DecodeOptions::new().with_max_depth(2);
        assert!(Decoder::with_options(&b"llleee"[..], options.clone())
            .decode_value()
            .is_err());
        assert!(Decoder::with_options(&b"ld1:aleee"[..], options.clone())
            .decode_value()
            .is_err());
        assert!(Decoder::with_options(&b"llelee"[..], options)
            .decode_value()
            .is_ok());
    }

    #[test]
    fn test_unbounded_depth_by_default() {
        let mut input = vec![b'l'; 500];
        input.extend(vec![b'e'; 500]);
        assert!(decode(&input).is_ok());
    }

    #[test]
    fn test_small_buffer_matches_large_buffer() {
        let input = b"d4:infod6:lengthi1024e4:name8:file.txte4:listli1ei2eee";
        let expected = decode(input).unwrap();
        for capacity in [1, 2, 3, 7] {
            let options = DecodeOptions::new().with_buffer_capacity(capacity);
            let value = Decoder::with_options(&input[..], options).decode_value().unwrap();
            assert_eq!(value, expected);
        }
    }

    #[test]
    fn test_reset_and_reuse() {
        let mut decoder = Decoder::new(Cursor::new(b"i1ei2e".to_vec()));
        assert_eq!(decoder.decode_value().unwrap(), Value::from(1));
        decoder.get_mut().seek(SeekFrom::Start(0)).unwrap();
        decoder.reset();
        assert_eq!(decoder.decode_value().unwrap(), Value::from(1));
        assert_eq!(decoder.decode_value().unwrap(), Value::from(2));
        assert_eq!(decoder.decode_next().unwrap(), None);
    }
}
