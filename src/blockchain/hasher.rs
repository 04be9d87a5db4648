use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{Formatter, Serializer};
use sha2::{Digest, Sha256};
use std::io::{self, Write};

use super::Block;

/// SHA-256 of a block's canonical JSON text, as lowercase hex.
///
/// The canonical text sorts object keys at every level and separates items
/// with `", "` and keys from values with `": "`. Everything outside printable
/// ASCII is written as `\uXXXX` escapes. Any two blocks with equal field
/// values produce the same text, on this node or on any peer.
pub fn hash_block(block: &Block) -> String {
    // A Block is plain data: strings, integers, finite floats.
    let value = serde_json::to_value(block).expect("block serializes to JSON");
    sha256_hex(canonical_json(&value).as_bytes())
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Render `value` in the canonical text form used for hashing.
///
/// Key order comes from `Value`'s map, which is sorted.
pub fn canonical_json(value: &Value) -> String {
    let mut out = Vec::new();
    value
        .serialize(&mut Serializer::with_formatter(&mut out, CanonicalFormatter))
        .expect("a JSON value serializes into memory");
    String::from_utf8_lossy(&out).into_owned()
}

/// Compact JSON with spaced separators and ASCII-only strings.
struct CanonicalFormatter;

impl Formatter for CanonicalFormatter {
    fn begin_array_value<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_key<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }

    // quotes, backslashes and control characters never reach here
    fn write_string_fragment<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        let mut units = [0u16; 2];
        for c in fragment.chars() {
            if (' '..='~').contains(&c) {
                writer.write_all(&[c as u8])?;
            } else {
                for unit in c.encode_utf16(&mut units) {
                    write!(writer, "\\u{unit:04x}")?;
                }
            }
        }
        Ok(())
    }
}
