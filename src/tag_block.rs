//! NMEA tag-block framing.
//!
//! A tag block prefixes a sentence with source and timestamp metadata:
//! `\s:SK0001,c:1717243200000*5A\`. The checksum is the 8-bit XOR of
//! the tag-block characters between the backslashes, excluding the
//! `*HH` suffix, rendered as two uppercase hex digits.

use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct TagBlockGenerator {
    source: String,
}

impl TagBlockGenerator {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Build the framed prefix for one sentence.
    pub fn prefix(&self, timestamp: DateTime<Utc>) -> String {
        let mut tag_block = String::new();
        tag_block.push_str(&format!("s:{},", self.source));
        tag_block.push_str(&format!("c:{},", timestamp.timestamp_millis()));
        tag_block.pop(); // trailing comma

        format!("\\{}*{}\\", tag_block, hex_checksum(&tag_block))
    }
}

fn hex_checksum(tag_block: &str) -> String {
    let checksum = tag_block.bytes().fold(0u8, |acc, b| acc ^ b);
    format!("{:02X}", checksum)
}
