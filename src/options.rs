//! Configuration options for bencode decoding.
//!
//! - [`DecodeOptions`]: buffer size, length-prefix rule and nesting limit
//! - [`LengthPrefix`]: whether byte-string lengths may carry leading zeros
//!
//! ## Examples
//!
//! ```rust
//! use serde_bencoding::{decode_with_options, DecodeOptions, LengthPrefix};
//!
//! // Reject `013:`-style length prefixes
//! let options = DecodeOptions::new().with_length_prefix(LengthPrefix::Canonical);
//! assert!(decode_with_options(&b"03:abc"[..], options).is_err());
//!
//! // The default accepts them
//! let value = decode_with_options(&b"03:abc"[..], DecodeOptions::new()).unwrap();
//! assert_eq!(value.as_bytes(), Some(&b"abc"[..]));
//! ```

/// Buffer capacity used when none is configured.
pub const DEFAULT_BUFFER_CAPACITY: usize = 1 << 10;

/// Nesting limit applied by [`DecodeOptions::strict`].
pub const STRICT_MAX_DEPTH: usize = 64;

/// Rule for leading zeros in byte-string length prefixes.
///
/// A length prefix of `0` is valid under both rules.
///
/// # Examples
///
/// ```rust
/// use serde_bencoding::LengthPrefix;
///
/// assert!(LengthPrefix::Permissive.allows(b"013"));
/// assert!(!LengthPrefix::Canonical.allows(b"013"));
/// assert!(LengthPrefix::Canonical.allows(b"0"));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LengthPrefix {
    /// Accepts leading zeros, e.g. `013:` reads 13 bytes.
    #[default]
    Permissive,
    /// Rejects leading zeros, as the canonical form never writes them.
    Canonical,
}

impl LengthPrefix {
    /// Returns `true` if the length digits are acceptable under this rule.
    #[must_use]
    pub fn allows(self, digits: &[u8]) -> bool {
        match self {
            LengthPrefix::Permissive => true,
            LengthPrefix::Canonical => !(digits.len() > 1 && digits[0] == b'0'),
        }
    }
}

/// Configuration options for decoding.
///
/// # Examples
///
/// ```rust
/// use serde_bencoding::{DecodeOptions, LengthPrefix};
///
/// // Defaults: 1 KiB buffer, permissive length prefixes, unbounded nesting
/// let options = DecodeOptions::new();
/// assert_eq!(options.max_depth, None);
///
/// // Hardened preset for untrusted input
/// let options = DecodeOptions::strict();
/// assert_eq!(options.length_prefix, LengthPrefix::Canonical);
///
/// // Custom configuration
/// let options = DecodeOptions::new()
///     .with_buffer_capacity(16 * 1024)
///     .with_max_depth(32);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodeOptions {
    pub buffer_capacity: usize,
    pub length_prefix: LengthPrefix,
    pub max_depth: Option<usize>,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            length_prefix: LengthPrefix::default(),
            max_depth: None,
        }
    }
}

impl DecodeOptions {
    /// Creates default options.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_bencoding::DecodeOptions;
    ///
    /// let options = DecodeOptions::new();
    /// assert_eq!(options.buffer_capacity, 1024);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for untrusted input: canonical length prefixes and a
    /// nesting limit of 64 levels.
    #[must_use]
    pub fn strict() -> Self {
        DecodeOptions {
            length_prefix: LengthPrefix::Canonical,
            max_depth: Some(STRICT_MAX_DEPTH),
            ..Default::default()
        }
    }

    /// Sets the read buffer capacity in bytes.
    ///
    /// Larger buffers mean fewer reads on the underlying source. A capacity
    /// of 0 is treated as 1.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_bencoding::DecodeOptions;
    ///
    /// let options = DecodeOptions::new().with_buffer_capacity(64);
    /// assert_eq!(options.buffer_capacity, 64);
    /// ```
    #[must_use]
    pub fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity;
        self
    }

    /// Sets the rule for leading zeros in byte-string lengths.
    #[must_use]
    pub fn with_length_prefix(mut self, rule: LengthPrefix) -> Self {
        self.length_prefix = rule;
        self
    }

    /// Limits how deeply lists and dictionaries may nest.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_bencoding::{decode_with_options, DecodeOptions};
    ///
    /// let options = DecodeOptions::new().with_max_depth(1);
    /// assert!(decode_with_options(&b"li1ee"[..], options.clone()).is_ok());
    /// assert!(decode_with_options(&b"llee"[..], options).is_err());
    /// ```
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }
}
