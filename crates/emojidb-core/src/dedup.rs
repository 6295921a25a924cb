//! Content-based duplicate detection.
//!
//! A candidate is a duplicate when its digest equals the digest of any stored
//! asset, whatever the names involved. Every catalogued file is hashed (or
//! its digest read from the backend's index) on each lookup; the catalog is
//! small and uploads are human-paced.

use std::collections::HashMap;

use tracing::debug;

use crate::catalog::CatalogSnapshot;
use crate::errors::EmojiResult;
use crate::hash::{ContentDigest, HashAlg};
use crate::model::Asset;
use crate::storage::AssetStorage;

pub struct ContentDeduplicator<'a, S: ?Sized> {
    storage: &'a S,
    alg: HashAlg,
}

impl<'a, S: AssetStorage + ?Sized> ContentDeduplicator<'a, S> {
    pub fn new(storage: &'a S, alg: HashAlg) -> Self {
        Self { storage, alg }
    }

    pub fn digest_of(&self, bytes: &[u8]) -> ContentDigest {
        ContentDigest::of(self.alg, bytes)
    }

    /// First stored asset with the same content as `candidate`.
    ///
    /// If several identical files exist, which one is returned is unspecified.
    pub fn find_duplicate(
        &self,
        snapshot: &CatalogSnapshot,
        candidate: &[u8],
    ) -> EmojiResult<Option<Asset>> {
        self.find_by_digest(snapshot, &self.digest_of(candidate))
    }

    pub fn find_by_digest(
        &self,
        snapshot: &CatalogSnapshot,
        candidate: &ContentDigest,
    ) -> EmojiResult<Option<Asset>> {
        for asset in snapshot.assets() {
            let digest = self.storage.digest(&asset, self.alg)?;
            if digest == *candidate {
                debug!(asset = %asset.file_name(), %digest, "content match");
                return Ok(Some(asset.with_digest(digest)));
            }
        }
        Ok(None)
    }

    /// Every set of two or more stored files sharing a digest.
    ///
    /// Groups and their members are sorted by file name.
    pub fn duplicate_groups(&self, snapshot: &CatalogSnapshot) -> EmojiResult<Vec<Vec<Asset>>> {
        let mut by_digest: HashMap<ContentDigest, Vec<Asset>> = HashMap::new();
        for asset in snapshot.assets() {
            let digest = self.storage.digest(&asset, self.alg)?;
            by_digest
                .entry(digest)
                .or_default()
                .push(asset.with_digest(digest));
        }

        let mut groups: Vec<Vec<Asset>> = by_digest
            .into_values()
            .filter(|group| group.len() > 1)
            .map(|mut group| {
                group.sort_by_key(Asset::file_name);
                group
            })
            .collect();
        groups.sort_by_key(|group| group[0].file_name());
        Ok(groups)
    }
}
