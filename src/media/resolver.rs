//! Identifier to file resolution across the configured storage roots.
//!
//! An identifier is either prefixed (`/files/lap.mp4`, `private/files/lap.mp4`),
//! in which case only the root owning that prefix is searched, or bare
//! (`lap.mp4`), in which case every root is tried in priority order. The first
//! candidate that is a non-empty regular file wins.

use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use surgistream_common::paths::content_type_for;
use surgistream_common::{Error, Result};

use crate::config::StorageRoot;

/// A file located on disk for a given identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedFile {
    /// Name of the storage root the file was found under.
    pub root: String,
    pub path: PathBuf,
    pub size: u64,
    pub content_type: &'static str,
}

/// One place the resolver will look for a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate<'a> {
    pub root: &'a StorageRoot,
    pub path: PathBuf,
}

/// Maps caller-supplied identifiers onto the storage roots.
#[derive(Debug, Clone)]
pub struct PathResolver {
    roots: Vec<StorageRoot>,
}

impl PathResolver {
    pub fn new(roots: Vec<StorageRoot>) -> Self {
        Self { roots }
    }

    pub fn roots(&self) -> &[StorageRoot] {
        &self.roots
    }

    /// Validate `identifier` and list the paths to probe, in order.
    ///
    /// Touches no file system state, so a rejected identifier never causes
    /// a disk access.
    pub fn candidates(&self, identifier: &str) -> Result<Vec<Candidate<'_>>> {
        validate_identifier(identifier)?;

        if let Some((root, rest)) = self.match_prefix(identifier) {
            let rest = relative_remainder(identifier, rest)?;
            return Ok(vec![Candidate {
                root,
                path: root.path.join(rest),
            }]);
        }

        let relative = relative_remainder(identifier, identifier)?;
        Ok(self
            .roots
            .iter()
            .map(|root| Candidate {
                root,
                path: root.path.join(relative),
            })
            .collect())
    }

    /// Resolve `identifier` to the first usable file.
    pub fn resolve(&self, identifier: &str) -> Result<ResolvedFile> {
        let candidates = self.candidates(identifier)?;

        for candidate in &candidates {
            if let Some(size) = usable_size(&candidate.path) {
                tracing::debug!(
                    identifier,
                    root = %candidate.root.name,
                    path = %candidate.path.display(),
                    size,
                    "Resolved media file"
                );
                return Ok(ResolvedFile {
                    root: candidate.root.name.clone(),
                    content_type: content_type_for(&candidate.path),
                    path: candidate.path.clone(),
                    size,
                });
            }
        }

        let searched: Vec<PathBuf> = candidates.into_iter().map(|c| c.path).collect();
        tracing::debug!(identifier, searched = searched.len(), "Media file not found");
        Err(Error::not_found(identifier, searched))
    }

    /// Longest prefix across all roots wins so that overlapping prefixes
    /// (`private/` vs `private/files/`) strip as much as possible. On a tie
    /// the earlier root keeps priority.
    fn match_prefix<'a, 'b>(&'a self, identifier: &'b str) -> Option<(&'a StorageRoot, &'b str)> {
        self.roots
            .iter()
            .flat_map(|root| root.prefixes.iter().map(move |prefix| (root, prefix)))
            .filter(|(_, prefix)| identifier.starts_with(prefix.as_str()))
            .fold(None, |best: Option<(&StorageRoot, &String)>, (root, prefix)| match best {
                Some((_, current)) if current.len() >= prefix.len() => best,
                _ => Some((root, prefix)),
            })
            .map(|(root, prefix)| (root, &identifier[prefix.len()..]))
    }
}

fn validate_identifier(identifier: &str) -> Result<()> {
    if identifier.trim().is_empty() {
        return Err(Error::invalid_path(identifier, "identifier is empty"));
    }
    if identifier.contains("..") {
        return Err(Error::invalid_path(
            identifier,
            "parent directory traversal is not allowed",
        ));
    }
    if identifier.contains('\0') {
        return Err(Error::invalid_path(identifier, "identifier contains a NUL byte"));
    }
    if identifier.contains('\\') {
        return Err(Error::invalid_path(
            identifier,
            "backslash separators are not allowed",
        ));
    }
    Ok(())
}

/// The part of the identifier joined onto a root must be a plain relative
/// path, otherwise `Path::join` would escape the root.
fn relative_remainder<'a>(identifier: &str, rest: &'a str) -> Result<&'a Path> {
    if rest.is_empty() {
        return Err(Error::invalid_path(identifier, "no filename after prefix"));
    }

    let path = Path::new(rest);
    let plain = path
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if !plain || path.file_name().is_none() {
        return Err(Error::invalid_path(
            identifier,
            "absolute paths outside a known prefix are not allowed",
        ));
    }

    Ok(path)
}

fn usable_size(path: &Path) -> Option<u64> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() && meta.len() > 0 => Some(meta.len()),
        Ok(meta) => {
            tracing::trace!(
                path = %path.display(),
                is_file = meta.is_file(),
                size = meta.len(),
                "Skipping unusable candidate"
            );
            None
        }
        Err(e) if e.kind() == ErrorKind::NotFound => None,
        Err(e) => {
            tracing::debug!(path = %path.display(), "Candidate not readable: {e}");
            None
        }
    }
}
