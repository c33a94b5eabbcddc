//! Single-range `Range: bytes=START-END` parsing.
//!
//! A missing start defaults to 0 and a missing end to the last byte, so
//! `bytes=-500` means bytes 0 through 500 rather than a suffix length.
//! Multi-range requests are not supported and are reported as unsatisfiable.

use surgistream_common::{Error, Result};

/// An inclusive byte range within a file of `total` bytes.
///
/// Always satisfies `start <= end < total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    start: u64,
    end: u64,
    total: u64,
}

impl ByteRange {
    /// Build a range, returning `None` if it does not fit inside `total`.
    pub fn new(start: u64, end: u64, total: u64) -> Option<Self> {
        (start <= end && end < total).then_some(Self { start, end, total })
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of bytes covered, `end - start + 1`.
    pub fn length(&self) -> u64 {
        self.end - self.start + 1
    }

    /// Value for the `Content-Range` header of a 206 response.
    pub fn content_range(&self) -> String {
        format!("bytes {}-{}/{}", self.start, self.end, self.total)
    }
}

/// Parse a raw `Range` header value against a file of `size` bytes.
pub fn parse_range_header(value: &str, size: u64) -> Result<ByteRange> {
    let unsatisfiable = || Error::unsatisfiable(value, size);

    let value_trimmed = value.trim();
    let ranges = value_trimmed
        .get(..6)
        .filter(|unit| unit.eq_ignore_ascii_case("bytes="))
        .map(|_| &value_trimmed[6..])
        .ok_or_else(unsatisfiable)?;

    if ranges.contains(',') {
        tracing::debug!(range = value, "Multi-range request rejected");
        return Err(unsatisfiable());
    }

    let (start_str, end_str) = ranges.split_once('-').ok_or_else(unsatisfiable)?;

    let start = parse_bound(start_str)
        .ok_or_else(unsatisfiable)?
        .unwrap_or(0);
    let end = match parse_bound(end_str).ok_or_else(unsatisfiable)? {
        Some(end) => end,
        None => size.checked_sub(1).ok_or_else(unsatisfiable)?,
    };

    if start >= size || end >= size {
        return Err(unsatisfiable());
    }

    ByteRange::new(start, end, size).ok_or_else(unsatisfiable)
}

/// `Some(None)` for an omitted bound, `None` for garbage.
fn parse_bound(raw: &str) -> Option<Option<u64>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(None);
    }
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok().map(Some)
}
