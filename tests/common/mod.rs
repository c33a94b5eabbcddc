//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`] which lays out a site directory with `public` and
//! `private` storage roots inside a temp dir and builds the full
//! [`AppContext`]. The [`TestHarness::with_server`] constructor starts Axum on a random
//! port for HTTP-level testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use surgistream::config::{Config, StorageConfig};
use surgistream::server::{create_router, AppContext};
use tempfile::TempDir;

/// Test harness wrapping an [`AppContext`] whose storage roots live in a
/// temporary directory.
pub struct TestHarness {
    pub ctx: AppContext,
    pub site: TempDir,
}

impl TestHarness {
    /// Create a harness with empty public and private roots.
    pub fn new() -> Self {
        let site = tempfile::tempdir().expect("failed to create temp dir");
        let mut config = Config::default();
        config.storage = StorageConfig::under_site(site.path());
        for root in &config.storage.roots {
            std::fs::create_dir_all(&root.path).expect("failed to create storage root");
        }

        Self {
            ctx: AppContext::new(config),
            site,
        }
    }

    /// Start an Axum server on a random port and return the harness together
    /// with the bound socket address.
    pub async fn with_server() -> (Self, SocketAddr) {
        let harness = Self::new();
        let app = create_router(harness.ctx.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        (harness, addr)
    }

    pub fn public_dir(&self) -> PathBuf {
        self.site.path().join("public").join("files")
    }

    pub fn private_dir(&self) -> PathBuf {
        self.site.path().join("private").join("files")
    }

    /// Write `data` under the public root and return its path.
    pub fn write_public(&self, name: &str, data: &[u8]) -> PathBuf {
        write_file(&self.public_dir(), name, data)
    }

    /// Write `data` under the private root and return its path.
    pub fn write_private(&self, name: &str, data: &[u8]) -> PathBuf {
        write_file(&self.private_dir(), name, data)
    }
}

fn write_file(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("failed to create parent dir");
    }
    std::fs::write(&path, data).expect("failed to write test file");
    path
}

/// Deterministic, non-repeating-looking test payload.
pub fn sample_bytes(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 7 % 251) as u8).collect()
}
