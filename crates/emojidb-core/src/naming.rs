//! Identifier sanitization and validation.

use crate::errors::{EmojiError, EmojiResult};

pub const DEFAULT_MAX_IDENTIFIER_LEN: usize = 32;

/// Replacement for every character that is not ASCII alphanumeric.
pub const FOLD_CHAR: char = '_';

/// Turn free-form user input into a storable identifier.
///
/// Non-alphanumeric characters become `_`, leading and trailing `_` are
/// trimmed, and the result is capped at `max_len` characters.
pub fn sanitize_identifier(raw: &str, max_len: usize) -> EmojiResult<String> {
    let folded: String = raw
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { FOLD_CHAR })
        .collect();
    let capped: String = folded
        .trim_matches(FOLD_CHAR)
        .chars()
        .take(max_len)
        .collect();
    let capped = capped.trim_end_matches(FOLD_CHAR).to_string();
    if capped.is_empty() {
        return Err(EmojiError::invalid_argument(format!(
            "identifier has no usable characters: {raw:?}"
        )));
    }
    Ok(capped)
}

/// Reject identifiers that cannot name a file in a flat directory.
pub fn validate_identifier(id: &str) -> EmojiResult<()> {
    if id.is_empty() {
        return Err(EmojiError::invalid_argument("identifier must not be empty"));
    }
    if id.starts_with('.') {
        return Err(EmojiError::invalid_argument(format!(
            "identifier must not start with '.': {id}"
        )));
    }
    if id.contains(['/', '\\', '\0']) {
        return Err(EmojiError::invalid_argument(format!(
            "identifier contains a path separator or NUL: {id:?}"
        )));
    }
    Ok(())
}

pub fn validate_extension(ext: &str) -> EmojiResult<()> {
    if ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(EmojiError::invalid_argument(format!(
            "extension must be non-empty ASCII alphanumeric: {ext:?}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_separators() {
        assert_eq!(sanitize_identifier("party-parrot", 32).unwrap(), "party_parrot");
        assert_eq!(sanitize_identifier("--cat face!", 32).unwrap(), "cat_face");
    }

    #[test]
    fn caps_length_without_trailing_fold() {
        assert_eq!(sanitize_identifier("abcd-efgh", 5).unwrap(), "abcd");
        assert_eq!(sanitize_identifier("abcdefgh", 3).unwrap(), "abc");
    }

    #[test]
    fn empty_after_folding_is_rejected() {
        assert!(sanitize_identifier("---", 32).is_err());
        assert!(sanitize_identifier("", 32).is_err());
    }

    #[test]
    fn identifiers_must_be_flat_names() {
        validate_identifier("v1.2").unwrap();
        assert!(validate_identifier("").is_err());
        assert!(validate_identifier(".hidden").is_err());
        assert!(validate_identifier("../etc").is_err());
        assert!(validate_identifier("a\\b").is_err());
    }

    #[test]
    fn extensions_are_alphanumeric() {
        validate_extension("webp").unwrap();
        assert!(validate_extension("").is_err());
        assert!(validate_extension("tar.gz").is_err());
    }
}
