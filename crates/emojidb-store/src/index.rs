//! Memoized content digests keyed by file name.
//!
//! An entry is valid only while the file's length and modification time match
//! the stamp recorded with it; anything else is a miss and the caller rehashes.
//! New files are recorded by the ingest that wrote them.

use std::collections::HashMap;
use std::fs::Metadata;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::SystemTime;

use emojidb_core::hash::{ContentDigest, HashAlg};
use parking_lot::RwLock;

/// Cheap change detector for a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStamp {
    pub len: u64,
    pub modified: Option<SystemTime>,
}

impl From<&Metadata> for FileStamp {
    fn from(meta: &Metadata) -> Self {
        Self {
            len: meta.len(),
            modified: meta.modified().ok(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    stamp: FileStamp,
    digest: ContentDigest,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexStats {
    pub hits: u64,
    pub misses: u64,
}

#[derive(Debug, Default)]
pub struct DigestIndex {
    entries: RwLock<HashMap<(String, HashAlg), Entry>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl DigestIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached digest of `name` if the file still matches `stamp`.
    pub fn get(&self, name: &str, alg: HashAlg, stamp: FileStamp) -> Option<ContentDigest> {
        let entries = self.entries.read();
        match entries.get(&(name.to_string(), alg)) {
            Some(entry) if entry.stamp == stamp => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(entry.digest)
            }
            _ => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    pub fn insert(&self, name: &str, stamp: FileStamp, digest: ContentDigest) {
        self.entries
            .write()
            .insert((name.to_string(), digest.alg()), Entry { stamp, digest });
    }

    /// Drop every algorithm's entry for `name`.
    pub fn invalidate(&self, name: &str) {
        self.entries.write().retain(|(n, _), _| n != name);
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stamp(len: u64) -> FileStamp {
        FileStamp {
            len,
            modified: Some(SystemTime::UNIX_EPOCH),
        }
    }

    #[test]
    fn hit_requires_matching_stamp() {
        let index = DigestIndex::new();
        let d = ContentDigest::of(HashAlg::Sha256, b"abc");
        index.insert("a.png", stamp(3), d);

        assert_eq!(index.get("a.png", HashAlg::Sha256, stamp(3)), Some(d));
        assert_eq!(index.get("a.png", HashAlg::Sha256, stamp(4)), None);
        assert_eq!(index.get("a.png", HashAlg::Blake3, stamp(3)), None);
        assert_eq!(index.stats(), IndexStats { hits: 1, misses: 2 });
    }

    #[test]
    fn invalidate_drops_all_algorithms() {
        let index = DigestIndex::new();
        index.insert("a.png", stamp(3), ContentDigest::of(HashAlg::Sha256, b"abc"));
        index.insert("a.png", stamp(3), ContentDigest::of(HashAlg::Blake3, b"abc"));
        index.insert("b.png", stamp(3), ContentDigest::of(HashAlg::Sha256, b"xyz"));
        index.invalidate("a.png");
        assert_eq!(index.len(), 1);
    }
}
