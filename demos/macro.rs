//! Using the bencode! macro for dynamic value construction.
//!
//! Run with: cargo run --example macro

use serde_bencoding::{bencode, encode, Value};
use std::error::Error;

fn show(value: &Value) -> String {
    String::from_utf8_lossy(&encode(value)).into_owned()
}

fn main() -> Result<(), Box<dyn Error>> {
    let number = bencode!(42);
    let negative = bencode!(-7);
    let text = bencode!("Hello, bencode!");

    println!("Primitives:");
    println!("  number:   {}", show(&number));
    println!("  negative: {}", show(&negative));
    println!("  text:     {}\n", show(&text));

    let numbers = bencode!([1, 2, 3, 4, 5]);
    let mixed = bencode!([1, "two", [3], (-4)]);

    println!("Lists:");
    println!("  Numbers: {}", show(&numbers));
    println!("  Mixed:   {}\n", show(&mixed));

    let info = bencode!({
        "name": "ubuntu.iso",
        "piece length": 262144,
        "length": 4700000000_u64,
        "private": 1
    });

    println!("Dictionaries (keys come out sorted):");
    println!("{}\n", show(&info));

    let files = vec![
        bencode!({"length": 1, "path": ["a.txt"]}),
        bencode!({"length": 2, "path": ["docs", "b.txt"]}),
    ];

    let torrent = bencode!({
        "announce": "http://tracker.example/announce",
        "info": {
            "name": "bundle",
            "files": files
        }
    });

    println!("Dynamic construction:");
    println!("{}\n", show(&torrent));

    if let Some(info) = torrent.get(b"info") {
        if let Some(name) = info.get(b"name").and_then(Value::as_str) {
            println!("Accessing values:");
            println!("  Name: {}", name);
        }

        if let Some(files) = info.get(b"files").and_then(Value::as_list) {
            println!("  Files: {}", files.len());
        }
    }

    Ok(())
}
