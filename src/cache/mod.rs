//! Response cache — memoizes decoded JSON bodies by exact request URL.
//!
//! The cache lives for the whole session and is never evicted. A key, once
//! populated, keeps its first value: a duplicate write (two concurrent misses
//! for the same URL) returns the value already stored instead of replacing it.
//! Only successful fetches whose body decodes as JSON are stored.
//!
//! Concurrent misses are not coalesced; both callers go to the network.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use serde_json::Value;
use tracing::debug;

use crate::http::{FetchError, Fetcher};

/// Aggregate counters reported by [`ResponseCache::stats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Number of stored URLs.
    pub entries: usize,
    /// `fetch_cached` calls answered from memory.
    pub hits: u64,
    /// `fetch_cached` calls that went to the network.
    pub misses: u64,
}

/// URL-keyed, write-once cache of decoded JSON responses.
///
/// Constructed explicitly and shared behind an `Arc`, so every test can use an
/// isolated instance.
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use mealfinder::cache::ResponseCache;
/// use mealfinder::config::Config;
/// use mealfinder::http::HttpFetcher;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let fetcher = HttpFetcher::new(&Config::default())?;
/// let cache = ResponseCache::new(Arc::new(fetcher));
///
/// let url = "https://www.themealdb.com/api/json/v1/1/categories.php";
/// let first = cache.fetch_cached(url).await?;
/// assert_eq!(cache.get(url), Some(first));
/// # Ok(())
/// # }
/// ```
pub struct ResponseCache {
    fetcher: Arc<dyn Fetcher>,
    entries: RwLock<HashMap<String, Arc<Value>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ResponseCache {
    /// Create an empty cache reading through `fetcher`.
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            fetcher,
            entries: RwLock::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Look up a stored response without touching the network or the counters.
    pub fn get(&self, url: &str) -> Option<Arc<Value>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(url)
            .cloned()
    }

    /// Return `true` if `url` has a stored response.
    pub fn contains(&self, url: &str) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(url)
    }

    /// Return the stored response for `url`, fetching and storing it on a miss.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Transport`] — the request could not be completed.
    /// - [`FetchError::Status`] — the server answered with a non-2xx status.
    /// - [`FetchError::Decode`] — the body is not valid JSON.
    ///
    /// Nothing is stored on error; the next call for the same URL fetches again.
    pub async fn fetch_cached(&self, url: &str) -> Result<Arc<Value>, FetchError> {
        if let Some(value) = self.get(url) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!(url, "cache hit");
            return Ok(value);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!(url, "cache miss");

        let response = self.fetcher.fetch(url).await?;
        if !response.is_success() {
            return Err(FetchError::Status {
                url: url.to_owned(),
                status: response.status(),
            });
        }

        let value: Value =
            serde_json::from_slice(response.body()).map_err(|source| FetchError::Decode {
                url: url.to_owned(),
                source,
            })?;

        Ok(self.store(url, value))
    }

    /// Return the number of stored URLs.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Return `true` if nothing has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return hit/miss counters and the entry count.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    // First write wins; later writes for the same key hand back the stored value.
    fn store(&self, url: &str, value: Value) -> Arc<Value> {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            entries
                .entry(url.to_owned())
                .or_insert_with(|| Arc::new(value)),
        )
    }
}

impl std::fmt::Debug for ResponseCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseCache")
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}
