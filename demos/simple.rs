//! Basic bencode serialization and deserialization.
//!
//! Run with: cargo run --example simple

use serde::{Deserialize, Serialize};
use serde_bencoding::{from_bytes, to_bytes};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Peer {
    id: u32,
    ip: String,
    port: u16,
}

fn main() -> Result<(), Box<dyn Error>> {
    let peers = vec![
        Peer {
            id: 42,
            ip: "10.0.0.1".to_string(),
            port: 6881,
        },
        Peer {
            id: 43,
            ip: "10.0.0.2".to_string(),
            port: 51413,
        },
    ];

    // Serialize to bencode
    let bytes = to_bytes(&peers)?;
    println!("Bencode output:\n{}\n", String::from_utf8_lossy(&bytes));

    // Deserialize back to struct
    let peers_back: Vec<Peer> = from_bytes(&bytes)?;
    assert_eq!(peers, peers_back);
    println!("✓ Round-trip successful");

    Ok(())
}
