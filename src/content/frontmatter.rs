//! Front-matter parsing
//!
//! A content file may begin with a YAML metadata block delimited by
//! `---` markers. The split is purely textual: everything between the
//! first and second marker is metadata, everything after the second
//! marker is the body.

use anyhow::{Context, Result};
use serde_yaml::Mapping;

/// The front-matter delimiter.
pub const MARKER: &str = "---";

/// Split raw file text into (metadata block, raw remainder).
///
/// Returns `None` when the text does not start with the marker, or the
/// marker is never closed. The remainder starts immediately after the
/// second marker, unmodified, so the original text can be reassembled
/// byte-for-byte as `---{meta}---{rest}`.
pub fn split(text: &str) -> Option<(&str, &str)> {
    let rest = text.strip_prefix(MARKER)?;
    let end = rest.find(MARKER)?;
    Some((&rest[..end], &rest[end + MARKER.len()..]))
}

/// Parse raw file text into a metadata mapping and the body.
///
/// A missing or unclosed marker is not an error: the whole text becomes
/// the body with empty metadata. A metadata block that parses to null
/// (empty or comments only) also yields an empty mapping. Invalid YAML
/// inside a present block is fatal.
pub fn parse(text: &str) -> Result<(Mapping, &str)> {
    match split(text) {
        Some((block, body)) => {
            let metadata: Option<serde_yaml::Value> =
                serde_yaml::from_str(block).context("invalid YAML front-matter")?;
            let metadata = match metadata {
                Some(serde_yaml::Value::Mapping(map)) => map,
                _ => Mapping::new(),
            };
            Ok((metadata, body.trim()))
        }
        None => Ok((Mapping::new(), text)),
    }
}
