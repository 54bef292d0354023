//! Customizing decoding with DecodeOptions.
//!
//! Run with: cargo run --example custom_options

use serde_bencoding::{decode_with_options, DecodeOptions, Decoder, LengthPrefix};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let padded = b"d4:name04:demoe";

    // Default rules accept a zero-padded length prefix
    println!("Default (permissive):");
    let value = decode_with_options(&padded[..], DecodeOptions::new())?;
    println!("  name = {:?}\n", value.get(b"name").and_then(|v| v.as_str()));

    // Canonical rules reject it
    println!("Canonical length prefixes:");
    let canonical = DecodeOptions::new().with_length_prefix(LengthPrefix::Canonical);
    match decode_with_options(&padded[..], canonical) {
        Ok(value) => println!("  unexpectedly accepted: {:?}\n", value),
        Err(e) => println!("  rejected: {}\n", e),
    }

    // Bound nesting depth for untrusted input
    println!("Nesting limit of 3:");
    let nested = b"lllli1eeee";
    let limited = DecodeOptions::new().with_max_depth(3);
    match decode_with_options(&nested[..], limited) {
        Ok(value) => println!("  unexpectedly accepted: {:?}\n", value),
        Err(e) => println!("  rejected: {}\n", e),
    }

    // Strict combines both
    println!("Strict:");
    let strict = DecodeOptions::strict();
    let value = decode_with_options(&b"d3:cow3:mooe"[..], strict.clone())?;
    println!("  accepted: {:?}", value);
    if let Err(e) = decode_with_options(&b"03:cow"[..], strict) {
        println!("  rejected: {}\n", e);
    }

    // A small buffer for a stream of concatenated values
    println!("Streaming with a 16-byte buffer:");
    let stream = b"i1e4:spamli2ei3eed1:ki4eee";
    let options = DecodeOptions::new().with_buffer_capacity(16);
    let mut decoder = Decoder::with_options(&stream[..], options);
    while let Some(value) = decoder.decode_next()? {
        println!("  @{:>2}: {:?}", decoder.position(), value);
    }

    Ok(())
}
