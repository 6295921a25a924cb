//! Catalog snapshots derived from a flat listing of file names.
//!
//! A snapshot is an immutable view of the asset directory taken at scan time.
//! It is never kept in sync with the filesystem; callers re-scan when they
//! need fresh state.
//!
//! File names are split on the **last** `.`: `v1.2.png` is identifier `v1.2`
//! with extension `png`. A name without `.` is an identifier with an empty
//! extension. No case folding is applied. Names ending in `.` cannot be
//! rebuilt from their split and are left out of every snapshot.

use std::collections::BTreeMap;

use crate::model::Asset;

pub const EXTENSION_SEPARATOR: char = '.';

/// Split a file name into `(identifier, extension)` on the last separator.
///
/// A leading separator does not count, so `.env` is an identifier with no
/// extension rather than an empty identifier.
pub fn split_file_name(name: &str) -> (&str, &str) {
    match name.rsplit_once(EXTENSION_SEPARATOR) {
        Some((id, ext)) if !id.is_empty() => (id, ext),
        _ => (name, ""),
    }
}

/// Whether `name` is rebuilt unchanged by [`Asset::file_name`] after a split.
///
/// `stray.` splits to `("stray", "")`, which rejoins as `stray`.
pub fn is_catalogable(name: &str) -> bool {
    !name.ends_with(EXTENSION_SEPARATOR)
}

/// identifier -> extensions in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSnapshot {
    entries: BTreeMap<String, Vec<String>>,
    files: usize,
}

impl CatalogSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot from file names in discovery order.
    pub fn from_file_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut snapshot = Self::new();
        for name in names {
            let name = name.as_ref();
            if !is_catalogable(name) {
                continue;
            }
            let (id, ext) = split_file_name(name);
            snapshot.insert(id, ext);
        }
        snapshot
    }

    fn insert(&mut self, id: &str, ext: &str) {
        let exts = self.entries.entry(id.to_string()).or_default();
        if !exts.iter().any(|e| e == ext) {
            exts.push(ext.to_string());
            self.files += 1;
        }
    }

    /// Distinct identifiers. Callers must not rely on the order.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Extensions recorded for `id`, in discovery order (not priority order).
    pub fn extensions_for(&self, id: &str) -> Option<&[String]> {
        self.entries.get(id).map(Vec::as_slice)
    }

    /// Every `(identifier, extension)` pair as an asset without a digest.
    pub fn assets(&self) -> impl Iterator<Item = Asset> + '_ {
        self.entries
            .iter()
            .flat_map(|(id, exts)| exts.iter().map(move |ext| Asset::new(id.clone(), ext.clone())))
    }

    /// Number of distinct identifiers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Number of catalogued files.
    pub fn file_count(&self) -> usize {
        self.files
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_last_separator() {
        assert_eq!(split_file_name("smile.webp"), ("smile", "webp"));
        assert_eq!(split_file_name("v1.2.png"), ("v1.2", "png"));
        assert_eq!(split_file_name("README"), ("README", ""));
        assert_eq!(split_file_name(".env"), (".env", ""));
        assert_eq!(split_file_name("trail."), ("trail", ""));
    }

    #[test]
    fn groups_extensions_in_discovery_order() {
        let snap = CatalogSnapshot::from_file_names(["smile.png", "wave.bmp", "smile.webp"]);
        assert_eq!(snap.len(), 2);
        assert_eq!(snap.file_count(), 3);
        assert_eq!(
            snap.extensions_for("smile").unwrap(),
            &["png".to_string(), "webp".to_string()]
        );
        assert!(snap.extensions_for("ghost").is_none());
    }

    #[test]
    fn identifiers_are_case_sensitive() {
        let snap = CatalogSnapshot::from_file_names(["Smile.png", "smile.png"]);
        assert_eq!(snap.len(), 2);
        assert!(snap.contains("Smile"));
        assert!(snap.contains("smile"));
    }

    #[test]
    fn repeated_names_are_recorded_once() {
        let snap = CatalogSnapshot::from_file_names(["a.png", "a.png"]);
        assert_eq!(snap.file_count(), 1);
        assert_eq!(snap.assets().count(), 1);
    }

    #[test]
    fn trailing_separator_names_are_left_out() {
        let snap = CatalogSnapshot::from_file_names(["README", "README.", "stray.", "a..", "ok.png"]);
        assert_eq!(snap.file_count(), 2);
        assert!(!snap.contains("stray"));
        assert!(!snap.contains("a."));
        assert_eq!(snap.extensions_for("README").unwrap(), &["".to_string()]);
        for asset in snap.assets() {
            assert!(is_catalogable(&asset.file_name()));
        }
    }

    #[test]
    fn extensionless_file_is_catalogued() {
        let snap = CatalogSnapshot::from_file_names(["notes"]);
        assert_eq!(snap.extensions_for("notes").unwrap(), &["".to_string()]);
    }
}
