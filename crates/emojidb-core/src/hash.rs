//! Content digests for deduplication.
//!
//! Digests are used for equality only, never for integrity or security:
//! two assets with equal digests are treated as the same content.
//!
//! Supported algorithms:
//! - sha256 (default)
//! - blake3
//!
//! Both produce 32-byte digests. A digest remembers which algorithm produced
//! it, and digests from different algorithms never compare equal.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::errors::{EmojiError, EmojiResult};

/// Digest width in bytes.
pub const DIGEST_LEN: usize = 32;

/// Hash algorithm identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlg {
    #[default]
    Sha256,
    Blake3,
}

impl HashAlg {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
            Self::Blake3 => "blake3",
        }
    }
}

impl FromStr for HashAlg {
    type Err = EmojiError;

    fn from_str(s: &str) -> EmojiResult<Self> {
        match s {
            "sha256" => Ok(Self::Sha256),
            "blake3" => Ok(Self::Blake3),
            _ => Err(EmojiError::invalid_argument(format!(
                "unsupported hash algorithm: {s}"
            ))),
        }
    }
}

impl fmt::Display for HashAlg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed-width digest of an asset's raw bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentDigest {
    alg: HashAlg,
    bytes: [u8; DIGEST_LEN],
}

impl ContentDigest {
    /// Hash raw bytes with the selected algorithm.
    pub fn of(alg: HashAlg, data: &[u8]) -> Self {
        let bytes: [u8; DIGEST_LEN] = match alg {
            HashAlg::Sha256 => {
                let mut h = Sha256::new();
                h.update(data);
                let mut out = [0u8; DIGEST_LEN];
                out.copy_from_slice(&h.finalize());
                out
            }
            HashAlg::Blake3 => *blake3::hash(data).as_bytes(),
        };
        Self { alg, bytes }
    }

    pub fn alg(&self) -> HashAlg {
        self.alg
    }

    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.bytes
    }

    /// Lowercase hex of the digest bytes.
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    /// Parse `alg:hex` as produced by `Display`.
    pub fn parse(s: &str) -> EmojiResult<Self> {
        let (alg, hex_part) = s
            .split_once(':')
            .ok_or_else(|| EmojiError::invalid_argument(format!("digest missing algorithm: {s}")))?;
        let alg = alg.parse::<HashAlg>()?;
        let raw = hex::decode(hex_part)
            .map_err(|_| EmojiError::invalid_argument(format!("invalid digest hex: {hex_part}")))?;
        let bytes: [u8; DIGEST_LEN] = raw.try_into().map_err(|_| {
            EmojiError::invalid_argument(format!("digest must be {DIGEST_LEN} bytes"))
        })?;
        Ok(Self { alg, bytes })
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.alg, self.to_hex())
    }
}

impl fmt::Debug for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentDigest({self})")
    }
}

impl Serialize for ContentDigest {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ContentDigest {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
