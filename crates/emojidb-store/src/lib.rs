//! emojidb-store
//!
//! The persisted state of EmojiDB is one flat directory in which every asset
//! is a single file named `{identifier}.{extension}`. The directory listing is
//! the catalog; there are no sidecar files.
//!
//! `DirStorage` implements `emojidb_core::storage::AssetStorage` on top of
//! such a directory and keeps an in-memory digest index so repeated dedup
//! checks do not rehash unchanged files.

pub mod config;
pub mod dir;
pub mod index;

pub use config::StoreConfig;
pub use dir::DirStorage;
pub use index::{DigestIndex, IndexStats};

use emojidb_core::config::CoreConfig;
use emojidb_core::service::AssetService;
use emojidb_core::EmojiResult;

/// Open the directory described by `store` and wrap it in a service.
pub fn open_service(store: StoreConfig, core: CoreConfig) -> EmojiResult<AssetService<DirStorage>> {
    AssetService::new(DirStorage::open(store)?, core)
}
