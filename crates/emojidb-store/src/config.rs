use std::path::PathBuf;

/// Where the asset directory lives and how to open it.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub root: PathBuf,
    /// Create the directory (and parents) on open instead of failing later
    /// with `DirectoryUnavailable`.
    pub create_if_missing: bool,
}

impl StoreConfig {
    /// Read-mostly configuration for an existing directory.
    pub fn local(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            create_if_missing: false,
        }
    }

    pub fn create_if_missing(mut self, create: bool) -> Self {
        self.create_if_missing = create;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::local(PathBuf::from("assets").join("img"))
    }
}
