//! Reading the bytes for one media request.
//!
//! Everything here is blocking I/O; the HTTP layer runs it on the blocking
//! pool. Every call re-resolves the identifier and re-reads the file.

use bytes::Bytes;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use surgistream_common::Result;

use super::range::{parse_range_header, ByteRange};
use super::resolver::{PathResolver, ResolvedFile};

/// A single request for media bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRequest {
    pub identifier: String,
    /// Raw `Range` header value, if the client sent one.
    pub range: Option<String>,
}

impl MediaRequest {
    pub fn new(identifier: impl Into<String>, range: Option<String>) -> Self {
        Self {
            identifier: identifier.into(),
            range,
        }
    }
}

/// Whether the body is the whole file or a slice of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    Full,
    Partial(ByteRange),
}

/// Bytes read for a request, plus what is needed to describe them.
#[derive(Debug, Clone)]
pub struct MediaPayload {
    pub file: ResolvedFile,
    pub kind: PayloadKind,
    pub body: Bytes,
}

/// Resolve, validate the range, and read the requested bytes.
///
/// Identifier validation happens before any disk access and the range is
/// checked before the file is opened.
pub fn fetch(resolver: &PathResolver, request: &MediaRequest) -> Result<MediaPayload> {
    let file = resolver.resolve(&request.identifier)?;

    let kind = match request.range.as_deref() {
        Some(header) => PayloadKind::Partial(parse_range_header(header, file.size)?),
        None => PayloadKind::Full,
    };

    let body = match kind {
        PayloadKind::Full => read_slice(&file.path, 0, file.size)?,
        PayloadKind::Partial(range) => read_slice(&file.path, range.start(), range.length())?,
    };

    tracing::debug!(
        path = %file.path.display(),
        bytes = body.len(),
        partial = matches!(kind, PayloadKind::Partial(_)),
        "Read media payload"
    );

    Ok(MediaPayload {
        file,
        kind,
        body: Bytes::from(body),
    })
}

/// Read exactly `length` bytes starting at `offset`.
///
/// A file that shrank since it was resolved surfaces as an I/O error rather
/// than a short body.
pub fn read_slice(path: &Path, offset: u64, length: u64) -> Result<Vec<u8>> {
    let mut file = File::open(path)?;
    if offset > 0 {
        file.seek(SeekFrom::Start(offset))?;
    }

    let mut buf = vec![0u8; length as usize];
    file.read_exact(&mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageConfig;
    use assert_matches::assert_matches;
    use std::fs;
    use surgistream_common::Error;
    use tempfile::TempDir;

    fn demo_site() -> (TempDir, PathResolver, Vec<u8>) {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageConfig::under_site(dir.path());
        for root in &storage.roots {
            fs::create_dir_all(&root.path).unwrap();
        }
        let data: Vec<u8> = (0..1000u32).map(|i| (i % 251) as u8).collect();
        fs::write(storage.roots[0].path.join("demo.mp4"), &data).unwrap();
        (dir, PathResolver::new(storage.roots), data)
    }

    #[test]
    fn full_read_matches_file() {
        let (_dir, resolver, data) = demo_site();
        let payload = fetch(&resolver, &MediaRequest::new("demo.mp4", None)).unwrap();

        assert_eq!(payload.kind, PayloadKind::Full);
        assert_eq!(payload.file.size, 1000);
        assert_eq!(payload.body.as_ref(), data.as_slice());
    }

    #[test]
    fn partial_read_matches_slice() {
        let (_dir, resolver, data) = demo_site();
        let request = MediaRequest::new("demo.mp4", Some("bytes=100-199".into()));
        let payload = fetch(&resolver, &request).unwrap();

        let range = ByteRange::new(100, 199, 1000).unwrap();
        assert_eq!(payload.kind, PayloadKind::Partial(range));
        assert_eq!(payload.body.len(), 100);
        assert_eq!(payload.body.as_ref(), &data[100..=199]);
    }

    #[test]
    fn every_valid_range_returns_its_slice() {
        let (_dir, resolver, data) = demo_site();
        for (start, end) in [(0, 0), (0, 999), (1, 998), (500, 500), (999, 999), (250, 749)] {
            let request = MediaRequest::new("demo.mp4", Some(format!("bytes={start}-{end}")));
            let payload = fetch(&resolver, &request).unwrap();
            assert_eq!(payload.body.len() as u64, end - start + 1);
            assert_eq!(payload.body.as_ref(), &data[start as usize..=end as usize]);
        }
    }

    #[test]
    fn out_of_bounds_range_is_rejected() {
        let (_dir, resolver, _) = demo_site();
        let request = MediaRequest::new("demo.mp4", Some("bytes=900-1200".into()));
        assert_matches!(
            fetch(&resolver, &request),
            Err(Error::UnsatisfiableRange { size: 1000, .. })
        );
    }

    #[test]
    fn invalid_identifier_wins_over_range() {
        let (_dir, resolver, _) = demo_site();
        let request = MediaRequest::new("../../etc/passwd", Some("bytes=0-1".into()));
        assert_matches!(fetch(&resolver, &request), Err(Error::InvalidPath { .. }));
    }

    #[test]
    fn short_file_is_an_io_error() {
        let (dir, _resolver, _) = demo_site();
        let path = dir.path().join("public").join("files").join("demo.mp4");
        assert_matches!(read_slice(&path, 990, 20), Err(Error::Io { .. }));
    }
}
