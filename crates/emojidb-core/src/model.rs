//! EmojiDB data models.
//!
//! Models are mostly plain data. Policy (resolution, dedup, validation) lives in
//! `resolve`, `dedup` and `service`; I/O lives behind `storage::AssetStorage`.

use serde::{Deserialize, Serialize};

use crate::hash::ContentDigest;

/// One stored file: an identifier plus one of its extensions.
///
/// `(identifier, extension)` is unique within a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Asset {
    pub identifier: String,
    pub extension: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_hash: Option<ContentDigest>,
}

impl Asset {
    pub fn new(identifier: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            extension: extension.into(),
            content_hash: None,
        }
    }

    pub fn with_digest(mut self, digest: ContentDigest) -> Self {
        self.content_hash = Some(digest);
        self
    }

    /// File name inside the asset directory. This is the storage handle.
    pub fn file_name(&self) -> String {
        if self.extension.is_empty() {
            self.identifier.clone()
        } else {
            format!("{}.{}", self.identifier, self.extension)
        }
    }
}

/// Metadata returned by `AssetService::describe`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetDescription {
    pub id: String,
    /// In scan-discovery order, including extensions that never resolve.
    pub extensions: Vec<String>,
    pub display_size: DisplaySize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySize {
    pub width: u32,
    pub height: u32,
}

impl DisplaySize {
    /// Sizes as strings, the way the HTTP metadata route renders them.
    pub fn as_strings(&self) -> [String; 2] {
        [self.width.to_string(), self.height.to_string()]
    }
}

/// Result of an ingest. A duplicate is a successful outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngestOutcome {
    /// New content; the file was written.
    Stored { asset: Asset, bytes: u64 },
    /// Identical content already exists; nothing was written.
    DuplicateOf { asset: Asset },
}

impl IngestOutcome {
    pub fn asset(&self) -> &Asset {
        match self {
            Self::Stored { asset, .. } | Self::DuplicateOf { asset } => asset,
        }
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicateOf { .. })
    }
}

/// Canonical bytes for an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalBytes {
    pub bytes: Vec<u8>,
    pub extension: String,
}

/// Result of a qualified fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QualifiedFetch {
    Bytes(Vec<u8>),
    /// The extension is not stored; go to the unqualified resolution instead.
    RedirectTo(String),
}

/// Operator-facing health report for an asset directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditReport {
    pub identifiers: usize,
    pub files: usize,
    /// Identifiers with no resolvable extension.
    pub misconfigured: Vec<String>,
    /// Groups of two or more files with identical content.
    pub duplicate_groups: Vec<Vec<Asset>>,
}

impl AuditReport {
    pub fn is_clean(&self) -> bool {
        self.misconfigured.is_empty() && self.duplicate_groups.is_empty()
    }
}
