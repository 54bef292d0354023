//! Buffered byte source with single-byte lookahead.
//!
//! [`ByteSource`] wraps any [`Read`] and hands out one byte at a time through
//! [`ByteSource::peek_byte`] and [`ByteSource::next_byte`], refilling a fixed
//! buffer from the reader whenever it runs dry.
//!
//! End of input is reported as an [`io::Error`] of kind
//! [`io::ErrorKind::UnexpectedEof`]; all other reader errors pass through
//! unchanged.
//!
//! ```rust
//! use serde_bencoding::ByteSource;
//!
//! let mut source = ByteSource::with_capacity(2, &b"i42e"[..]);
//! assert_eq!(source.peek_byte().unwrap(), b'i');
//! assert_eq!(source.next_byte().unwrap(), b'i');
//! assert_eq!(source.next_byte().unwrap(), b'4');
//! assert_eq!(source.position(), 2);
//! ```

use crate::options::DEFAULT_BUFFER_CAPACITY;
use std::io::{self, Read};
use tracing::trace;

/// A reader adapter exposing `peek` and `next` over a fixed-size buffer.
///
/// Not synchronized: one decode pass owns one source.
pub struct ByteSource<R> {
    inner: R,
    buf: Box<[u8]>,
    filled: usize,
    pos: usize,
    consumed: u64,
}

impl<R: Read> ByteSource<R> {
    /// Creates a source with the default buffer capacity.
    pub fn new(inner: R) -> Self {
        Self::with_capacity(DEFAULT_BUFFER_CAPACITY, inner)
    }

    /// Creates a source whose buffer holds `capacity` bytes (at least one).
    pub fn with_capacity(capacity: usize, inner: R) -> Self {
        ByteSource {
            inner,
            buf: vec![0; capacity.max(1)].into_boxed_slice(),
            filled: 0,
            pos: 0,
            consumed: 0,
        }
    }

    /// Issues one read on the underlying source if every buffered byte has
    /// been consumed.
    fn fill_if_empty(&mut self) -> io::Result<()> {
        if self.pos < self.filled {
            return Ok(());
        }

        loop {
            match self.inner.read(&mut self.buf) {
                Ok(0) => return Err(io::ErrorKind::UnexpectedEof.into()),
                Ok(n) => {
                    trace!(bytes = n, offset = self.consumed, "refilled byte source");
                    self.filled = n;
                    self.pos = 0;
                    return Ok(());
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    /// Returns the next byte without consuming it.
    ///
    /// Repeated calls return the same byte until [`ByteSource::next_byte`]
    /// is called.
    pub fn peek_byte(&mut self) -> io::Result<u8> {
        self.fill_if_empty()?;
        Ok(self.buf[self.pos])
    }

    /// Consumes and returns the next byte.
    pub fn next_byte(&mut self) -> io::Result<u8> {
        self.fill_if_empty()?;
        let byte = self.buf[self.pos];
        self.pos += 1;
        self.consumed += 1;
        Ok(byte)
    }

    /// Discards buffered bytes and restarts the position count.
    ///
    /// Call after repositioning the underlying reader, e.g. via
    /// [`ByteSource::get_mut`] and `Seek`.
    pub fn reset(&mut self) {
        self.filled = 0;
        self.pos = 0;
        self.consumed = 0;
    }

    /// Number of bytes consumed since creation or the last reset.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.consumed
    }

    /// Bytes already read from the underlying source but not yet consumed.
    #[must_use]
    pub fn buffered(&self) -> &[u8] {
        &self.buf[self.pos..self.filled]
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    /// Unwraps the source. Buffered bytes are lost.
    pub fn into_inner(self) -> R {
        self.inner
    }
}
