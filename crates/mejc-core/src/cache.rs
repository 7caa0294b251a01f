//! # Dataset Cache
//!
//! Explicit memoization for dataset resources. The cache is an ordinary
//! value owned by its caller; tests construct their own and nothing is
//! shared between instances.
//!
//! Each lookup re-reads the file and hashes it. A matching digest returns
//! the already-parsed dataset; a changed digest reparses and replaces the
//! entry. Parsing, not reading, is the expensive step being avoided.

use std::collections::HashMap;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::dataset::{parse_validated, DataFormat, Validate};
use crate::digest::{sha256_digest, ContentDigest};
use crate::error::PanelError;

/// Hit/miss counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that parsed the resource.
    pub misses: u64,
}

#[derive(Debug)]
struct Entry<T> {
    digest: ContentDigest,
    value: Arc<T>,
}

/// Path-keyed, digest-invalidated dataset cache.
#[derive(Debug)]
pub struct DatasetCache<T> {
    entries: HashMap<PathBuf, Entry<T>>,
    stats: CacheStats,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Default for DatasetCache<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::default(),
            _marker: PhantomData,
        }
    }
}

impl<T> DatasetCache<T>
where
    T: DeserializeOwned + Validate,
{
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the dataset at `path`, parsing it only if it is new or its
    /// content changed since the last lookup.
    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<T>, PanelError> {
        let format = DataFormat::from_path(path)?;
        let bytes = std::fs::read(path)?;
        let digest = sha256_digest(&bytes);

        if let Some(entry) = self.entries.get(path) {
            if entry.digest == digest {
                self.stats.hits += 1;
                tracing::trace!(path = %path.display(), "dataset cache hit");
                return Ok(Arc::clone(&entry.value));
            }
            tracing::debug!(path = %path.display(), %digest, "dataset changed on disk; reloading");
        }

        let value = Arc::new(parse_validated::<T>(format, &bytes)?);
        self.stats.misses += 1;
        self.entries.insert(
            path.to_path_buf(),
            Entry {
                digest,
                value: Arc::clone(&value),
            },
        );
        Ok(value)
    }

    /// Digest of the cached version of `path`, if any.
    pub fn digest_of(&self, path: &Path) -> Option<ContentDigest> {
        self.entries.get(path).map(|e| e.digest)
    }

    /// Drop the entry for `path`. Returns whether one existed.
    pub fn invalidate(&mut self, path: &Path) -> bool {
        self.entries.remove(path).is_some()
    }

    /// Drop every entry and reset the counters.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.stats = CacheStats::default();
    }

    /// Number of cached datasets.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds nothing.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Hit/miss counters since creation or the last [`clear`](Self::clear).
    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}
