use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

const RETENTION_MS: i64 = 30 * 24 * 60 * 60 * 1000;

#[derive(Debug, Serialize, Deserialize, Clone)]
struct SeenEntry {
    url: String,
    /// Milliseconds since epoch when the URL was first reported.
    timestamp: i64,
}

/// Cross-run store of already-reported job URLs, persisted as one JSON array
/// of `{url, timestamp}` entries. Entries older than 30 days are pruned at
/// every load and save, so retention is always relative to "now".
///
/// Storage failures never abort a run: a missing or corrupt file loads as an
/// empty set, and a failed write is logged and dropped. Worst case is a
/// duplicate notification next run.
pub struct SeenCache {
    path: PathBuf,
    seen: HashMap<String, i64>,
}

impl SeenCache {
    pub fn load(path: &Path, now: DateTime<Utc>) -> Self {
        let mut cache = Self {
            path: path.to_path_buf(),
            seen: HashMap::new(),
        };

        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!("⚠️ Failed to read {}: {e}", path.display());
                }
                return cache;
            }
        };

        let entries: Vec<SeenEntry> = match serde_json::from_str(&data) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("⚠️ Failed to parse {}: {e}", path.display());
                return cache;
            }
        };

        let cutoff = now.timestamp_millis() - RETENTION_MS;
        let total = entries.len();
        for entry in entries {
            if entry.timestamp > cutoff {
                cache.seen.insert(entry.url, entry.timestamp);
            }
        }
        info!(
            "📋 Loaded {} previously seen jobs ({} expired and removed)",
            cache.seen.len(),
            total - cache.seen.len()
        );
        cache
    }

    pub fn contains(&self, url: &str) -> bool {
        self.seen.contains_key(url)
    }

    pub fn urls(&self) -> HashSet<String> {
        self.seen.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Merges `new_urls` (timestamped `now`), prunes expired entries and
    /// writes the result back. A URL already present keeps its original
    /// first-seen timestamp.
    pub fn save(&mut self, new_urls: &[String], now: DateTime<Utc>) {
        let now_ms = now.timestamp_millis();
        for url in new_urls {
            self.seen.entry(url.clone()).or_insert(now_ms);
        }

        let cutoff = now_ms - RETENTION_MS;
        self.seen.retain(|_, ts| *ts > cutoff);

        let mut entries: Vec<SeenEntry> = self
            .seen
            .iter()
            .map(|(url, ts)| SeenEntry {
                url: url.clone(),
                timestamp: *ts,
            })
            .collect();
        // Stable file contents regardless of map iteration order.
        entries.sort_by(|a, b| a.url.cmp(&b.url));

        if let Some(parent) = self.path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                warn!("⚠️ Failed to create cache directory {}: {e}", parent.display());
                return;
            }
        }

        let data = match serde_json::to_string_pretty(&entries) {
            Ok(data) => data,
            Err(e) => {
                warn!("⚠️ Failed to serialize seen jobs: {e}");
                return;
            }
        };
        match fs::write(&self.path, data) {
            Ok(()) => info!("💾 Saved {} seen jobs to cache", entries.len()),
            Err(e) => warn!("⚠️ Failed to write {}: {e}", self.path.display()),
        }
    }
}
