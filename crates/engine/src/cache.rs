use dashmap::DashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Raw file bytes keyed by path, shared between reader and analysis workers.
///
/// Entries live until the cache is dropped at the end of a run. Each path is
/// written once by the reader that owns its task; a second `set` replaces the
/// stored bytes.
#[derive(Debug, Default)]
pub struct ContentCache {
    entries: DashMap<PathBuf, Arc<[u8]>>,
}

impl ContentCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: DashMap::with_capacity(capacity),
        }
    }

    /// Cheap clone of the stored buffer, if any.
    pub fn get(&self, path: &Path) -> Option<Arc<[u8]>> {
        self.entries.get(path).map(|entry| Arc::clone(entry.value()))
    }

    pub fn set(&self, path: impl Into<PathBuf>, content: impl Into<Arc<[u8]>>) {
        self.entries.insert(path.into(), content.into());
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
