//! Single polling pass over the configured feeds.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use crate::app::Result;
use crate::cache::SeenCache;
use crate::domain::{FeedEntry, FeedSource};
use crate::fetcher::Fetcher;
use crate::normalizer::Normalizer;

/// Returns the entries whose ids are absent from `seen_ids`, in input order.
pub fn compute_new(entries: &[FeedEntry], seen_ids: &[String]) -> Vec<FeedEntry> {
    let seen: HashSet<&str> = seen_ids.iter().map(String::as_str).collect();

    entries
        .iter()
        .filter(|entry| !seen.contains(entry.id.as_str()))
        .cloned()
        .collect()
}

pub struct Runner {
    feeds: Vec<FeedSource>,
    cache: SeenCache,
    cache_path: PathBuf,
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    normalizer: Normalizer,
}

impl Runner {
    pub fn new(
        feeds: Vec<FeedSource>,
        cache: SeenCache,
        cache_path: PathBuf,
        fetcher: Arc<dyn Fetcher + Send + Sync>,
        normalizer: Normalizer,
    ) -> Self {
        Self {
            feeds,
            cache,
            cache_path,
            fetcher,
            normalizer,
        }
    }

    pub fn feed(&self, name: &str) -> Option<&FeedSource> {
        self.feeds.iter().find(|feed| feed.name == name)
    }

    pub fn cache(&self) -> &SeenCache {
        &self.cache
    }

    /// Polls every feed in configuration order and returns the new entries
    /// per feed, including feeds with nothing new.
    ///
    /// Unless `dry_run` is set, the ids of all returned entries are appended
    /// to the cache and the cache file is rewritten before this returns.
    /// Entries recorded here are never reported by a later run, whether or
    /// not their mail reports go out. A dry run touches neither the in-memory
    /// cache nor the file.
    ///
    /// The first fetch or parse failure aborts the whole pass with the cache
    /// file unchanged.
    pub async fn fetch_all(&mut self, dry_run: bool) -> Result<Vec<(String, Vec<FeedEntry>)>> {
        let mut new_by_feed = Vec::with_capacity(self.feeds.len());

        for feed in &self.feeds {
            let mut entries = Vec::new();
            for url in &feed.urls {
                let body = self.fetcher.fetch(url.as_str()).await?;
                entries.extend(self.normalizer.normalize(url.as_str(), &body)?);
            }
            tracing::debug!("Fetched {} entries from feed {}", entries.len(), feed.name);

            let new_entries = compute_new(&entries, self.cache.seen_ids(&feed.name));
            tracing::info!(
                "Found {} new entries from feed {}",
                new_entries.len(),
                feed.name
            );

            if !dry_run {
                self.cache
                    .append(&feed.name, new_entries.iter().map(|e| e.id.clone()));
            }

            new_by_feed.push((feed.name.clone(), new_entries));
        }

        if !dry_run {
            self.cache.save(&self.cache_path)?;
        }

        Ok(new_by_feed)
    }
}
