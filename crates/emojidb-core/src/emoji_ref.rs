//! Chat-platform custom emoji references.
//!
//! A reference looks like `<:name:id>` for a static emoji or `<a:name:id>` for
//! an animated one. The CDN serves static emoji as webp and animated ones as
//! gif.

use std::fmt;
use std::str::FromStr;

use crate::errors::{EmojiError, EmojiResult};
use crate::naming::sanitize_identifier;

pub const CDN_BASE: &str = "https://cdn.discordapp.com/emojis";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmojiRef {
    pub animated: bool,
    pub name: String,
    pub id: u64,
}

impl EmojiRef {
    pub fn parse(raw: &str) -> EmojiResult<Self> {
        let raw = raw.trim();
        let inner = raw
            .strip_prefix('<')
            .and_then(|s| s.strip_suffix('>'))
            .ok_or_else(|| EmojiError::invalid_argument(format!("not an emoji reference: {raw}")))?;

        let mut parts = inner.split(':');
        let (Some(flag), Some(name), Some(id), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(EmojiError::invalid_argument(format!(
                "emoji reference must be <[a]:name:id>: {raw}"
            )));
        };

        let animated = match flag {
            "a" => true,
            "" => false,
            other => {
                return Err(EmojiError::invalid_argument(format!(
                    "unknown emoji flag {other:?} in {raw}"
                )))
            }
        };
        if name.is_empty() {
            return Err(EmojiError::invalid_argument(format!("emoji name is empty: {raw}")));
        }
        let id = id
            .parse::<u64>()
            .map_err(|_| EmojiError::invalid_argument(format!("emoji id is not numeric: {raw}")))?;

        Ok(Self {
            animated,
            name: name.to_string(),
            id,
        })
    }

    /// Format the CDN serves this emoji in.
    pub fn extension(&self) -> &'static str {
        if self.animated {
            "gif"
        } else {
            "webp"
        }
    }

    pub fn cdn_url(&self) -> String {
        format!(
            "{CDN_BASE}/{}.{}?size=128&quality=lossless",
            self.id,
            self.extension()
        )
    }

    /// Storable identifier derived from the emoji's name.
    pub fn proposed_identifier(&self, max_len: usize) -> EmojiResult<String> {
        sanitize_identifier(&self.name, max_len)
    }
}

impl FromStr for EmojiRef {
    type Err = EmojiError;

    fn from_str(s: &str) -> EmojiResult<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for EmojiRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flag = if self.animated { "a" } else { "" };
        write!(f, "<{flag}:{}:{}>", self.name, self.id)
    }
}
