use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// `Cache-Control: max-age` sent with full-file responses
    #[serde(default = "default_cache_max_age")]
    pub cache_max_age_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_cache_max_age() -> u64 {
    3600
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cache_max_age_secs: default_cache_max_age(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Candidate roots, searched in order.
    #[serde(default = "default_roots")]
    pub roots: Vec<StorageRoot>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            roots: default_roots(),
        }
    }
}

impl StorageConfig {
    /// Standard public/private layout below a site directory.
    pub fn under_site(site: &Path) -> Self {
        Self {
            roots: vec![
                StorageRoot {
                    name: "public".to_string(),
                    path: site.join("public").join("files"),
                    prefixes: vec![
                        "/files/".to_string(),
                        "files/".to_string(),
                        "public/files/".to_string(),
                    ],
                },
                StorageRoot {
                    name: "private".to_string(),
                    path: site.join("private").join("files"),
                    prefixes: vec![
                        "/private/files/".to_string(),
                        "private/files/".to_string(),
                        "private/".to_string(),
                    ],
                },
            ],
        }
    }
}

fn default_roots() -> Vec<StorageRoot> {
    StorageConfig::under_site(Path::new("./site")).roots
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct StorageRoot {
    pub name: String,

    pub path: PathBuf,

    /// Identifier prefixes that map straight onto this root
    #[serde(default)]
    pub prefixes: Vec<String>,
}
