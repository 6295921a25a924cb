//! Flat asset directory backend.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use emojidb_core::catalog::{is_catalogable, CatalogSnapshot};
use emojidb_core::errors::{EmojiError, EmojiResult};
use emojidb_core::hash::{ContentDigest, HashAlg};
use emojidb_core::model::Asset;
use emojidb_core::storage::AssetStorage;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::StoreConfig;
use crate::index::{DigestIndex, FileStamp};

/// Prefix of in-progress writes. Hidden names are never catalogued.
const TEMP_PREFIX: &str = ".ingest-";

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

#[derive(Debug)]
pub struct DirStorage {
    root: PathBuf,
    index: DigestIndex,
}

impl DirStorage {
    pub fn open(cfg: StoreConfig) -> EmojiResult<Self> {
        if cfg.create_if_missing {
            fs::create_dir_all(&cfg.root).map_err(|source| EmojiError::DirectoryUnavailable {
                path: cfg.root.clone(),
                source,
            })?;
        }
        Ok(Self {
            root: cfg.root,
            index: DigestIndex::new(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn index(&self) -> &DigestIndex {
        &self.index
    }

    pub fn path_of(&self, asset: &Asset) -> PathBuf {
        self.root.join(asset.file_name())
    }

    fn unavailable(&self, source: io::Error) -> EmojiError {
        EmojiError::DirectoryUnavailable {
            path: self.root.clone(),
            source,
        }
    }

    fn stamp(&self, path: &Path) -> EmojiResult<FileStamp> {
        let meta = fs::metadata(path).map_err(|e| EmojiError::io(path, e))?;
        Ok(FileStamp::from(&meta))
    }
}

impl AssetStorage for DirStorage {
    fn scan(&self) -> EmojiResult<CatalogSnapshot> {
        let meta = fs::metadata(&self.root).map_err(|e| self.unavailable(e))?;
        if !meta.is_dir() {
            return Err(self.unavailable(io::Error::other("not a directory")));
        }

        // Symlinks are followed and catalogued as their target. Hidden names
        // and names ending in `.` are skipped.
        let mut names = Vec::new();
        for entry in WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() > 0 => {
                    warn!(error = %e, "skipping unreadable directory entry");
                    continue;
                }
                Err(e) => return Err(self.unavailable(e.into())),
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str() else {
                warn!(path = %entry.path().display(), "skipping non-UTF-8 file name");
                continue;
            };
            if name.starts_with('.') {
                continue;
            }
            if !is_catalogable(name) {
                warn!(file = %name, "skipping file name with a trailing separator");
                continue;
            }
            names.push(name.to_string());
        }

        debug!(root = %self.root.display(), files = names.len(), "scanned asset directory");
        Ok(CatalogSnapshot::from_file_names(names))
    }

    fn read(&self, asset: &Asset) -> EmojiResult<Vec<u8>> {
        let path = self.path_of(asset);
        fs::read(&path).map_err(|e| EmojiError::io(path, e))
    }

    /// Write to a hidden temporary file, then rename into place so scans never
    /// see a partial file.
    fn write(&self, asset: &Asset, bytes: &[u8]) -> EmojiResult<()> {
        let name = asset.file_name();
        let target = self.root.join(&name);
        let tmp = self.root.join(format!(
            "{TEMP_PREFIX}{}-{}-{name}",
            std::process::id(),
            TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));

        self.index.invalidate(&name);
        fs::write(&tmp, bytes).map_err(|e| EmojiError::io(&tmp, e))?;
        if let Err(e) = fs::rename(&tmp, &target) {
            let _ = fs::remove_file(&tmp);
            return Err(EmojiError::io(target, e));
        }
        Ok(())
    }

    fn digest(&self, asset: &Asset, alg: HashAlg) -> EmojiResult<ContentDigest> {
        let name = asset.file_name();
        let path = self.root.join(&name);
        let stamp = self.stamp(&path)?;
        if let Some(digest) = self.index.get(&name, alg, stamp) {
            return Ok(digest);
        }

        let bytes = fs::read(&path).map_err(|e| EmojiError::io(&path, e))?;
        let digest = ContentDigest::of(alg, &bytes);
        self.index.insert(&name, stamp, digest);
        Ok(digest)
    }

    fn record_digest(&self, asset: &Asset, digest: ContentDigest) {
        let name = asset.file_name();
        match self.stamp(&self.root.join(&name)) {
            Ok(stamp) => self.index.insert(&name, stamp, digest),
            Err(e) => warn!(file = %name, error = %e, "could not index freshly written file"),
        }
    }

    fn location(&self, asset: &Asset) -> String {
        self.path_of(asset).display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    fn storage_with(files: &[(&str, &str)]) -> (tempfile::TempDir, DirStorage) {
        let dir = tempdir().unwrap();
        for (name, bytes) in files {
            fs::write(dir.path().join(name), bytes).unwrap();
        }
        let storage = DirStorage::open(StoreConfig::local(dir.path())).unwrap();
        (dir, storage)
    }

    #[test]
    fn scan_skips_hidden_files_and_directories() {
        let (dir, storage) = storage_with(&[
            ("smile.webp", "w"),
            ("smile.png", "p"),
            (".DS_Store", "junk"),
            (".ingest-1-0-x.png", "partial"),
        ]);
        fs::create_dir(dir.path().join("nested.png")).unwrap();

        let snap = storage.scan().unwrap();
        assert_eq!(snap.len(), 1);
        assert_eq!(
            snap.extensions_for("smile").unwrap(),
            &["png".to_string(), "webp".to_string()]
        );
    }

    #[test]
    fn scan_skips_trailing_separator_names() {
        let (_dir, storage) = storage_with(&[("README", "a"), ("README.", "b"), ("stray.", "c")]);
        let snap = storage.scan().unwrap();
        assert_eq!(snap.file_count(), 1);
        assert!(!snap.contains("stray"));
    }

    #[cfg(unix)]
    #[test]
    fn scan_follows_symlinked_assets() {
        let (dir, storage) = storage_with(&[("smile.png", "png-bytes")]);
        std::os::unix::fs::symlink(dir.path().join("smile.png"), dir.path().join("grin.webp"))
            .unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone.png"), dir.path().join("broken.gif"))
            .unwrap();

        let snap = storage.scan().unwrap();
        assert_eq!(snap.extensions_for("grin").unwrap(), &["webp".to_string()]);
        assert!(!snap.contains("broken"));
        assert_eq!(storage.read(&Asset::new("grin", "webp")).unwrap(), b"png-bytes");
    }

    #[test]
    fn missing_directory_is_unavailable() {
        let dir = tempdir().unwrap();
        let storage = DirStorage::open(StoreConfig::local(dir.path().join("nope"))).unwrap();
        assert_matches!(storage.scan(), Err(EmojiError::DirectoryUnavailable { .. }));
    }

    #[test]
    fn file_as_root_is_unavailable() {
        let (dir, _) = storage_with(&[("a.png", "x")]);
        let storage = DirStorage::open(StoreConfig::local(dir.path().join("a.png"))).unwrap();
        assert_matches!(storage.scan(), Err(EmojiError::DirectoryUnavailable { .. }));
    }

    #[test]
    fn create_if_missing_makes_directory() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("assets").join("img");
        let storage =
            DirStorage::open(StoreConfig::local(&root).create_if_missing(true)).unwrap();
        assert!(storage.scan().unwrap().is_empty());
    }

    #[test]
    fn write_leaves_no_temp_files() {
        let (dir, storage) = storage_with(&[]);
        storage.write(&Asset::new("party", "gif"), b"GIF89a").unwrap();
        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["party.gif"]);
    }

    #[test]
    fn digest_is_memoized_until_file_changes() {
        let (dir, storage) = storage_with(&[("a.png", "one")]);
        let asset = Asset::new("a", "png");

        let first = storage.digest(&asset, HashAlg::Sha256).unwrap();
        let again = storage.digest(&asset, HashAlg::Sha256).unwrap();
        assert_eq!(first, again);
        assert_eq!(storage.index().stats().hits, 1);

        fs::write(dir.path().join("a.png"), b"three").unwrap();
        let changed = storage.digest(&asset, HashAlg::Sha256).unwrap();
        assert_ne!(first, changed);
        assert_eq!(changed, ContentDigest::of(HashAlg::Sha256, b"three"));
    }

    #[test]
    fn recorded_digest_is_served_from_index() {
        let (_dir, storage) = storage_with(&[]);
        let asset = Asset::new("fresh", "png");
        let digest = ContentDigest::of(HashAlg::Sha256, b"fresh");
        storage.write(&asset, b"fresh").unwrap();
        storage.record_digest(&asset, digest);

        assert_eq!(storage.digest(&asset, HashAlg::Sha256).unwrap(), digest);
        assert_eq!(storage.index().stats().misses, 0);
    }
}
