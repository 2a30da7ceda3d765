//! Persisted record of previously notified entry identifiers.
//!
//! The cache is a single JSON object mapping feed name to the ordered list
//! of entry ids seen in all prior runs. It is read fully at process start
//! and, on non-dry runs, rewritten wholesale after every feed has been
//! processed. Ids are appended, never removed.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Seen-entry ids per feed, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeenCache {
    feeds: BTreeMap<String, Vec<String>>,
}

impl SeenCache {
    /// Load the cache at `path`. The file must exist; `{}` is a valid
    /// empty cache, and a feed absent from the mapping has seen nothing.
    pub fn load(path: &Path) -> Result<Self, CacheError> {
        let content = fs::read_to_string(path).map_err(|source| CacheError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| CacheError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Rewrite the whole snapshot at `path`.
    pub fn save(&self, path: &Path) -> Result<(), CacheError> {
        let content = serde_json::to_string_pretty(self).map_err(|source| CacheError::Serialize {
            path: path.to_path_buf(),
            source,
        })?;

        fs::write(path, content).map_err(|source| CacheError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Ids already notified for `feed`. Unknown feeds are empty.
    pub fn seen_ids(&self, feed: &str) -> &[String] {
        self.feeds.get(feed).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Append `ids` to `feed`'s list in the given order, creating the
    /// entry if the feed has never been cached.
    pub fn append(&mut self, feed: &str, ids: impl IntoIterator<Item = String>) {
        self.feeds.entry(feed.to_string()).or_default().extend(ids);
    }

    /// Feeds present in the mapping.
    pub fn feed_names(&self) -> impl Iterator<Item = &str> {
        self.feeds.keys().map(String::as_str)
    }
}

/// Cache file errors.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Failed to read/write cache file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse cache file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to serialize cache file at {path}: {source}")]
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },
}
