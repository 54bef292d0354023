//! Decode a bencoded file and print it as JSON.
//!
//! Run with: cargo run --example inspect -- path/to/file.torrent

use serde_bencoding::{decode_with_options, encode, DecodeOptions, Kind};
use std::env;
use std::error::Error;
use std::fs::File;

fn main() -> Result<(), Box<dyn Error>> {
    let path = env::args().nth(1).ok_or("usage: inspect <file>")?;

    let file = File::open(&path)?;
    let options = DecodeOptions::new().with_buffer_capacity(1 << 10);
    let value = decode_with_options(file, options)?;

    println!("{} is a {}", path, value.kind());
    if value.is(Kind::Dictionary) {
        if let Some(dict) = value.as_dictionary() {
            for key in dict.keys() {
                println!("  key: {:?}", key);
            }
        }
    }

    println!("{}", serde_json::to_string_pretty(&value)?);

    let original = std::fs::read(&path)?;
    if encode(&value) == original {
        println!("✓ File is in canonical form");
    } else {
        println!("File is not canonical; re-encoding would change it");
    }

    Ok(())
}
