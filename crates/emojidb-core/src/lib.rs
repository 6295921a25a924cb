//! emojidb-core
//!
//! Core primitives for EmojiDB:
//! - Catalog snapshots derived from a flat listing of `{identifier}.{extension}` files
//! - Canonical extension resolution by a fixed priority table
//! - Content digests and duplicate detection independent of file names
//! - The `AssetService` façade used by the HTTP server and the CLI
//!
//! This crate performs no filesystem or network I/O. Backends implement
//! `storage::AssetStorage`.

pub mod catalog;
pub mod config;
pub mod dedup;
pub mod emoji_ref;
pub mod errors;
pub mod format;
pub mod hash;
pub mod model;
pub mod naming;
pub mod resolve;
pub mod service;
pub mod storage;

pub use crate::errors::{EmojiError, EmojiResult};

/// Convenience re-exports.
pub mod prelude {
    pub use crate::catalog::{split_file_name, CatalogSnapshot};
    pub use crate::config::{validate_config, CoreConfig};
    pub use crate::dedup::ContentDeduplicator;
    pub use crate::emoji_ref::EmojiRef;
    pub use crate::hash::{ContentDigest, HashAlg};
    pub use crate::model::{
        Asset, AssetDescription, AuditReport, CanonicalBytes, DisplaySize, IngestOutcome,
        QualifiedFetch,
    };
    pub use crate::resolve::{resolve, resolve_exact, ExactResolution, NotResolvable, EXTENSION_PRIORITY};
    pub use crate::service::AssetService;
    pub use crate::storage::{AssetStorage, MemoryStorage};
    pub use crate::{EmojiError, EmojiResult};
}
