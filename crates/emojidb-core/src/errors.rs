//! Error taxonomy for EmojiDB.
//!
//! Every failure in the core is typed and propagates to the façade boundary.
//! Callers (HTTP, CLI) map variants onto their own surface:
//! - `EmojiNotFound` is expected and user-facing
//! - `MisconfiguredAsset` and `DirectoryUnavailable` are server faults
//! - `UpstreamUnavailable` is reported to whoever started the ingest
//!
//! A duplicate upload is not an error; see `IngestOutcome::DuplicateOf`.

use std::path::PathBuf;

pub type EmojiResult<T> = Result<T, EmojiError>;

#[derive(Debug, thiserror::Error)]
pub enum EmojiError {
    /// The asset directory is missing or cannot be listed.
    #[error("asset directory unavailable: {}: {source}", path.display())]
    DirectoryUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("emoji does not exist: {id}")]
    EmojiNotFound { id: String },

    /// The identifier is catalogued but none of its extensions is resolvable.
    #[error("emoji exists, but is badly configured: {id} (extensions: {})", extensions.join(", "))]
    MisconfiguredAsset { id: String, extensions: Vec<String> },

    #[error("upstream unavailable for {reference}: {reason}")]
    UpstreamUnavailable { reference: String, reason: String },

    #[error("io error for {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl EmojiError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn not_found(id: impl Into<String>) -> Self {
        Self::EmojiNotFound { id: id.into() }
    }

    pub fn upstream(reference: impl Into<String>, reason: impl ToString) -> Self {
        Self::UpstreamUnavailable {
            reference: reference.into(),
            reason: reason.to_string(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True for failures the caller caused (bad id, bad input), as opposed to
    /// faults in the store or upstream.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::EmojiNotFound { .. } | Self::InvalidArgument(_))
    }
}
