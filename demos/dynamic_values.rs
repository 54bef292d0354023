//! Working with Value for runtime flexibility.
//!
//! Run with: cargo run --example dynamic_values

use serde::{Deserialize, Serialize};
use serde_bencoding::{bencode, decode, encode, from_value, to_value, Kind, Value};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize)]
struct Node {
    id: u32,
    host: String,
    tags: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Build a message dynamically with the bencode! macro
    let message = bencode!({
        "t": "aa",
        "y": "q",
        "q": "ping",
        "a": { "id": "abcdefghij0123456789" }
    });

    let bytes = encode(&message);
    println!("KRPC ping:\n{}\n", String::from_utf8_lossy(&bytes));

    // Decode and access values dynamically
    let decoded = decode(&bytes[..])?;
    if let Some(query) = decoded.get(b"q").and_then(Value::as_str) {
        println!("Accessing field 'q': {}", query);
    }
    if let Some(id) = decoded.get(b"a").and_then(|a| a.get(b"id")) {
        println!("Accessing field 'a.id': {} bytes\n", id.as_bytes().map_or(0, <[u8]>::len));
    }

    // Convert existing struct to Value
    let node = Node {
        id: 123,
        host: "router.example".to_string(),
        tags: vec!["bootstrap".to_string(), "stable".to_string()],
    };

    let node_value = to_value(&node)?;
    println!(
        "Node as bencode:\n{}\n",
        String::from_utf8_lossy(&encode(&node_value))
    );

    // Runtime type checking
    println!("Type checks:");
    println!("  kind:          {}", node_value.kind());
    println!("  is dictionary: {}", node_value.is(Kind::Dictionary));
    println!("  is list:       {}", node_value.is(Kind::List));
    println!(
        "  id is integer: {}\n",
        node_value.get(b"id").is_some_and(Value::is_integer)
    );

    // And back into a typed struct
    let node_back: Node = from_value(node_value)?;
    println!("Back to struct: {:?}", node_back);

    Ok(())
}
