//! Canonical extension resolution.
//!
//! When one identifier is stored under several extensions, exactly one of them
//! is canonical: the first entry of `EXTENSION_PRIORITY` that is present.
//! Smaller and animatable formats come first. Extensions outside the table are
//! never canonical.

/// Tie-break order for canonical resolution.
pub const EXTENSION_PRIORITY: [&str; 5] = ["webp", "png", "gif", "jpeg", "jpg"];

/// The identifier exists but has no extension from `EXTENSION_PRIORITY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotResolvable;

/// Outcome of a request for a specific extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExactResolution<'a> {
    /// The requested extension is stored; serve it as-is.
    Stored(&'a str),
    /// Not stored. Redirect to the unqualified identifier.
    Redirect(&'a str),
}

/// Position of `ext` in the priority table, if it is resolvable at all.
pub fn priority_rank(ext: &str) -> Option<usize> {
    EXTENSION_PRIORITY.iter().position(|p| *p == ext)
}

/// Pick the canonical extension for an identifier.
pub fn resolve<'a, S: AsRef<str>>(extensions: &'a [S]) -> Result<&'a str, NotResolvable> {
    EXTENSION_PRIORITY
        .iter()
        .find_map(|wanted| {
            extensions
                .iter()
                .map(|ext| ext.as_ref())
                .find(|ext| ext == wanted)
        })
        .ok_or(NotResolvable)
}

/// Serve `requested` if it is stored for `identifier`, otherwise redirect.
///
/// The redirect target is always the bare identifier, which never names an
/// extension, so following it cannot come back here.
pub fn resolve_exact<'a, S: AsRef<str>>(
    identifier: &'a str,
    extensions: &[S],
    requested: &'a str,
) -> ExactResolution<'a> {
    if extensions.iter().any(|ext| ext.as_ref() == requested) {
        ExactResolution::Stored(requested)
    } else {
        ExactResolution::Redirect(identifier)
    }
}
