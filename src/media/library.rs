//! Read-only views over the storage roots: video listing and batch
//! resolution checks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use utoipa::ToSchema;
use walkdir::WalkDir;

use surgistream_common::paths::is_video_file;
use surgistream_common::Error;

use super::resolver::PathResolver;
use crate::config::StorageRoot;

/// A video file found directly inside a storage root.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VideoEntry {
    pub root: String,
    pub filename: String,
    /// Size of the target; `None` for a dangling symlink.
    pub size: Option<u64>,
    pub is_symlink: bool,
    #[schema(value_type = Option<String>)]
    pub target: Option<PathBuf>,
    #[schema(value_type = Option<String>)]
    pub modified: Option<DateTime<Utc>>,
}

/// List the videos in every root, roots in priority order and files sorted
/// by name. Roots that do not exist are skipped.
pub fn list_videos(roots: &[StorageRoot]) -> Vec<VideoEntry> {
    let mut videos = Vec::new();

    for root in roots {
        if !root.path.is_dir() {
            tracing::debug!("Skipping missing storage root '{}'", root.name);
            continue;
        }

        let walker = WalkDir::new(&root.path)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::warn!("Failed to read entry in '{}': {e}", root.name);
                    continue;
                }
            };

            if !is_video_file(entry.path()) {
                continue;
            }

            let is_symlink = entry.path_is_symlink();
            // Follows symlinks, like the size a client would be served.
            let meta = std::fs::metadata(entry.path()).ok();
            if meta.as_ref().is_some_and(|m| !m.is_file()) {
                continue;
            }

            videos.push(VideoEntry {
                root: root.name.clone(),
                filename: entry.file_name().to_string_lossy().into_owned(),
                size: meta.as_ref().map(|m| m.len()),
                is_symlink,
                target: is_symlink
                    .then(|| std::fs::read_link(entry.path()).ok())
                    .flatten(),
                modified: meta
                    .as_ref()
                    .and_then(|m| m.modified().ok())
                    .map(DateTime::<Utc>::from),
            });
        }
    }

    videos
}

/// Resolution outcome for a single identifier.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ResolutionOutcome {
    Found {
        identifier: String,
        root: String,
        #[schema(value_type = String)]
        path: PathBuf,
        size: u64,
    },
    Missing {
        identifier: String,
        #[schema(value_type = Vec<String>)]
        searched: Vec<PathBuf>,
    },
    Invalid {
        identifier: String,
        reason: String,
    },
}

/// Outcome of checking a batch of identifiers.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResolutionReport {
    pub results: Vec<ResolutionOutcome>,
    pub total_found: usize,
    pub total_missing: usize,
    pub total_invalid: usize,
}

/// Resolve every identifier and report which ones would be servable.
pub fn check_identifiers<S: AsRef<str>>(
    resolver: &PathResolver,
    identifiers: &[S],
) -> ResolutionReport {
    let results: Vec<ResolutionOutcome> = identifiers
        .iter()
        .map(|id| {
            let identifier = id.as_ref().to_string();
            match resolver.resolve(&identifier) {
                Ok(file) => ResolutionOutcome::Found {
                    identifier,
                    root: file.root,
                    path: file.path,
                    size: file.size,
                },
                Err(Error::NotFound { searched, .. }) => {
                    ResolutionOutcome::Missing { identifier, searched }
                }
                Err(Error::InvalidPath { reason, .. }) => {
                    ResolutionOutcome::Invalid { identifier, reason }
                }
                Err(other) => ResolutionOutcome::Invalid {
                    identifier,
                    reason: other.to_string(),
                },
            }
        })
        .collect();

    let count = |f: fn(&ResolutionOutcome) -> bool| results.iter().filter(|r| f(r)).count();
    let total_found = count(|r| matches!(r, ResolutionOutcome::Found { .. }));
    let total_missing = count(|r| matches!(r, ResolutionOutcome::Missing { .. }));
    let total_invalid = count(|r| matches!(r, ResolutionOutcome::Invalid { .. }));

    if total_missing > 0 {
        tracing::info!(
            total_missing,
            total = results.len(),
            "Resolution check found missing media"
        );
    }

    ResolutionReport {
        results,
        total_found,
        total_missing,
        total_invalid,
    }
}
