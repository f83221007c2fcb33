//! Session-scoped cache of post listings.

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::config::SourceConfig;

/// Listing identity: repository, branch and directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub repo: String,
    pub branch: String,
    pub path: String,
}

impl From<&SourceConfig> for CacheKey {
    fn from(source: &SourceConfig) -> Self {
        Self {
            repo: source.repo.clone(),
            branch: source.branch.clone(),
            path: source.path.clone(),
        }
    }
}

/// Post listings fetched during this session.
///
/// Entries live until [`ListingCache::invalidate`] or the end of the process.
#[derive(Debug, Default)]
pub struct ListingCache {
    entries: Mutex<FxHashMap<CacheKey, Vec<String>>>,
}

impl ListingCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &CacheKey) -> Option<Vec<String>> {
        self.entries.lock().get(key).cloned()
    }

    pub fn insert(&self, key: CacheKey, names: Vec<String>) {
        self.entries.lock().insert(key, names);
    }

    /// Drop one listing. Returns whether it was cached.
    pub fn invalidate(&self, key: &CacheKey) -> bool {
        self.entries.lock().remove(key).is_some()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(branch: &str) -> CacheKey {
        CacheKey {
            repo: "a/b".into(),
            branch: branch.into(),
            path: "_posts".into(),
        }
    }

    #[test]
    fn test_insert_get_invalidate() {
        let cache = ListingCache::new();
        assert_eq!(cache.get(&key("main")), None);

        cache.insert(key("main"), vec!["x.md".into()]);
        cache.insert(key("dev"), vec![]);
        assert_eq!(cache.get(&key("main")), Some(vec!["x.md".to_string()]));
        assert_eq!(cache.len(), 2);

        assert!(cache.invalidate(&key("main")));
        assert!(!cache.invalidate(&key("main")));
        assert_eq!(cache.get(&key("dev")), Some(vec![]));
    }

    #[test]
    fn test_key_from_config() {
        let key = CacheKey::from(&SourceConfig::default());
        assert_eq!(key.repo, "ben-mini/ben-mini.github.io");
        assert_eq!(key.branch, "gh-pages");
        assert_eq!(key.path, "_posts");
    }
}
