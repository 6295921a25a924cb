//! Storage seam between the pure core and a concrete backend.
//!
//! The core performs no filesystem I/O itself. A backend (the flat asset
//! directory in `emojidb-store`, or `MemoryStorage` in tests) lists files,
//! reads and writes them, and may memoize digests.

use std::collections::BTreeMap;

use parking_lot::RwLock;

use crate::catalog::CatalogSnapshot;
use crate::errors::{EmojiError, EmojiResult};
use crate::hash::{ContentDigest, HashAlg};
use crate::model::Asset;

pub trait AssetStorage: Send + Sync {
    /// List the backend and derive a fresh snapshot.
    fn scan(&self) -> EmojiResult<CatalogSnapshot>;

    /// Raw bytes of a stored asset.
    fn read(&self, asset: &Asset) -> EmojiResult<Vec<u8>>;

    /// Store `bytes` as `asset`, replacing any existing file of the same name.
    fn write(&self, asset: &Asset, bytes: &[u8]) -> EmojiResult<()>;

    /// Digest of a stored asset. Backends with a digest index override this.
    fn digest(&self, asset: &Asset, alg: HashAlg) -> EmojiResult<ContentDigest> {
        Ok(ContentDigest::of(alg, &self.read(asset)?))
    }

    /// Tell the backend the digest of a file it just wrote.
    fn record_digest(&self, _asset: &Asset, _digest: ContentDigest) {}

    /// Human-readable location of an asset, for logs and CLI output.
    fn location(&self, asset: &Asset) -> String {
        asset.file_name()
    }
}

impl<T: AssetStorage + ?Sized> AssetStorage for std::sync::Arc<T> {
    fn scan(&self) -> EmojiResult<CatalogSnapshot> {
        (**self).scan()
    }

    fn read(&self, asset: &Asset) -> EmojiResult<Vec<u8>> {
        (**self).read(asset)
    }

    fn write(&self, asset: &Asset, bytes: &[u8]) -> EmojiResult<()> {
        (**self).write(asset, bytes)
    }

    fn digest(&self, asset: &Asset, alg: HashAlg) -> EmojiResult<ContentDigest> {
        (**self).digest(asset, alg)
    }

    fn record_digest(&self, asset: &Asset, digest: ContentDigest) {
        (**self).record_digest(asset, digest)
    }

    fn location(&self, asset: &Asset) -> String {
        (**self).location(asset)
    }
}

/// In-memory backend keyed by file name.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    files: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.files.write().insert(name.into(), bytes.into());
        self
    }

    pub fn file_names(&self) -> Vec<String> {
        self.files.read().keys().cloned().collect()
    }
}

impl AssetStorage for MemoryStorage {
    fn scan(&self) -> EmojiResult<CatalogSnapshot> {
        Ok(CatalogSnapshot::from_file_names(self.files.read().keys()))
    }

    fn read(&self, asset: &Asset) -> EmojiResult<Vec<u8>> {
        let name = asset.file_name();
        self.files.read().get(&name).cloned().ok_or_else(|| {
            EmojiError::io(
                name,
                std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
            )
        })
    }

    fn write(&self, asset: &Asset, bytes: &[u8]) -> EmojiResult<()> {
        self.files.write().insert(asset.file_name(), bytes.to_vec());
        Ok(())
    }

    fn location(&self, asset: &Asset) -> String {
        format!("memory:{}", asset.file_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_round_trips_listing() {
        let store = MemoryStorage::new()
            .with_file("smile.webp", b"w".to_vec())
            .with_file("smile.png", b"p".to_vec());
        let snap = store.scan().unwrap();
        assert_eq!(snap.file_count(), 2);
        assert_eq!(store.read(&Asset::new("smile", "png")).unwrap(), b"p");
    }

    #[test]
    fn missing_file_is_io_error() {
        let store = MemoryStorage::new();
        let e = store.read(&Asset::new("ghost", "png")).unwrap_err();
        assert!(matches!(e, EmojiError::Io { .. }));
    }
}
