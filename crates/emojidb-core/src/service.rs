//! The façade external callers talk to.
//!
//! Each operation takes a fresh snapshot of the backend unless the caller
//! passes one in through the `*_in` variants. Snapshots are never cached here,
//! so an ingest is visible to the next call without any invalidation step.

use parking_lot::Mutex;
use tracing::{info, warn};

use crate::catalog::CatalogSnapshot;
use crate::config::{validate_config, CoreConfig};
use crate::dedup::ContentDeduplicator;
use crate::errors::{EmojiError, EmojiResult};
use crate::model::{
    Asset, AssetDescription, AuditReport, CanonicalBytes, IngestOutcome, QualifiedFetch,
};
use crate::naming::{validate_extension, validate_identifier};
use crate::resolve::{resolve, resolve_exact, ExactResolution};
use crate::storage::AssetStorage;

pub struct AssetService<S> {
    storage: S,
    config: CoreConfig,
    /// Held across the dedup check and the write of one ingest.
    ingest_lock: Mutex<()>,
}

impl<S: AssetStorage> AssetService<S> {
    pub fn new(storage: S, config: CoreConfig) -> EmojiResult<Self> {
        validate_config(&config)?;
        Ok(Self {
            storage,
            config,
            ingest_lock: Mutex::new(()),
        })
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    pub fn snapshot(&self) -> EmojiResult<CatalogSnapshot> {
        self.storage.scan()
    }

    /// Distinct identifiers, sorted.
    pub fn list_identifiers(&self) -> EmojiResult<Vec<String>> {
        let snapshot = self.snapshot()?;
        Ok(snapshot.identifiers().map(str::to_string).collect())
    }

    pub fn describe(&self, id: &str) -> EmojiResult<AssetDescription> {
        self.describe_in(&self.snapshot()?, id)
    }

    pub fn describe_in(&self, snapshot: &CatalogSnapshot, id: &str) -> EmojiResult<AssetDescription> {
        let extensions = extensions_in(snapshot, id)?;
        Ok(AssetDescription {
            id: id.to_string(),
            extensions: extensions.to_vec(),
            display_size: self.config.display.size(),
        })
    }

    pub fn fetch_canonical_bytes(&self, id: &str) -> EmojiResult<CanonicalBytes> {
        self.fetch_canonical_bytes_in(&self.snapshot()?, id)
    }

    pub fn fetch_canonical_bytes_in(
        &self,
        snapshot: &CatalogSnapshot,
        id: &str,
    ) -> EmojiResult<CanonicalBytes> {
        let extensions = extensions_in(snapshot, id)?;
        let Ok(ext) = resolve(extensions) else {
            warn!(id, extensions = ?extensions, "emoji exists but has no resolvable extension");
            return Err(EmojiError::MisconfiguredAsset {
                id: id.to_string(),
                extensions: extensions.to_vec(),
            });
        };

        let asset = Asset::new(id, ext);
        let bytes = self.storage.read(&asset)?;
        Ok(CanonicalBytes {
            bytes,
            extension: asset.extension,
        })
    }

    pub fn fetch_qualified(&self, id: &str, ext: &str) -> EmojiResult<QualifiedFetch> {
        self.fetch_qualified_in(&self.snapshot()?, id, ext)
    }

    pub fn fetch_qualified_in(
        &self,
        snapshot: &CatalogSnapshot,
        id: &str,
        ext: &str,
    ) -> EmojiResult<QualifiedFetch> {
        let extensions = extensions_in(snapshot, id)?;
        match resolve_exact(id, extensions, ext) {
            ExactResolution::Stored(ext) => {
                Ok(QualifiedFetch::Bytes(self.storage.read(&Asset::new(id, ext))?))
            }
            ExactResolution::Redirect(target) => Ok(QualifiedFetch::RedirectTo(target.to_string())),
        }
    }

    /// Store `bytes` as `proposed_id.ext` unless identical content exists.
    ///
    /// Repeating an ingest with the same bytes returns `DuplicateOf` the first
    /// stored asset and writes nothing.
    pub fn ingest(&self, bytes: &[u8], proposed_id: &str, ext: &str) -> EmojiResult<IngestOutcome> {
        validate_identifier(proposed_id)?;
        validate_extension(ext)?;
        if bytes.is_empty() {
            return Err(EmojiError::invalid_argument("refusing to ingest empty content"));
        }

        let _guard = self.ingest_lock.lock();
        let snapshot = self.snapshot()?;
        let dedup = ContentDeduplicator::new(&self.storage, self.config.hashing.algorithm);
        let digest = dedup.digest_of(bytes);

        if let Some(existing) = dedup.find_by_digest(&snapshot, &digest)? {
            info!(
                proposed = proposed_id,
                existing = %existing.file_name(),
                "duplicate content, nothing written"
            );
            return Ok(IngestOutcome::DuplicateOf { asset: existing });
        }

        let asset = Asset::new(proposed_id, ext);
        if snapshot
            .extensions_for(proposed_id)
            .is_some_and(|exts| exts.iter().any(|e| e == ext))
        {
            warn!(asset = %asset.file_name(), "replacing existing file with new content");
        }
        self.storage.write(&asset, bytes)?;
        self.storage.record_digest(&asset, digest);
        info!(
            asset = %asset.file_name(),
            location = %self.storage.location(&asset),
            bytes = bytes.len(),
            "stored new emoji"
        );

        Ok(IngestOutcome::Stored {
            asset: asset.with_digest(digest),
            bytes: bytes.len() as u64,
        })
    }

    /// Misconfigured identifiers and groups of identical files.
    pub fn audit(&self) -> EmojiResult<AuditReport> {
        let snapshot = self.snapshot()?;
        let misconfigured = snapshot
            .identifiers()
            .filter(|id| {
                snapshot
                    .extensions_for(id)
                    .map_or(false, |exts| resolve(exts).is_err())
            })
            .map(str::to_string)
            .collect();
        let dedup = ContentDeduplicator::new(&self.storage, self.config.hashing.algorithm);

        Ok(AuditReport {
            identifiers: snapshot.len(),
            files: snapshot.file_count(),
            misconfigured,
            duplicate_groups: dedup.duplicate_groups(&snapshot)?,
        })
    }
}

fn extensions_in<'a>(snapshot: &'a CatalogSnapshot, id: &str) -> EmojiResult<&'a [String]> {
    snapshot
        .extensions_for(id)
        .ok_or_else(|| EmojiError::not_found(id))
}
