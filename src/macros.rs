/// Builds a [`Value`](crate::Value) from a JSON-like literal.
///
/// Lists use `[...]`, dictionaries use `{ "key": value, ... }` with string or
/// byte-string literal keys, and anything else is passed to `Value::from`.
/// Negative numbers inside lists and dictionaries need parentheses.
///
/// ```rust
/// use serde_bencoding::{bencode, encode};
///
/// let value = bencode!({
///     "announce": "http://tracker.example/announce",
///     "info": {
///         "length": 1024,
///         "offset": (-1),
///         b"\xffraw": [1, "two", []]
///     }
/// });
/// assert!(value.get(b"info").is_some());
/// assert!(encode(&value).starts_with(b"d8:announce"));
/// ```
#[macro_export]
macro_rules! bencode {
    ([]) => {
        $crate::Value::List(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::List(vec![$($crate::bencode!($elem)),*])
    };

    ({}) => {
        $crate::Value::Dictionary($crate::Dictionary::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut dict = $crate::Dictionary::new();
        $(
            dict.insert($crate::ByteString::from($key), $crate::bencode!($value));
        )*
        $crate::Value::Dictionary(dict)
    }};

    ($e:expr) => {
        $crate::Value::from($e)
    };
}
