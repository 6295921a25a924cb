//! Configuration structures for emojidb-core.
//!
//! These objects are explicit and serializable. Higher-level components (CLI,
//! API) build them from flags or environment variables; the core itself never
//! reads the environment.

use serde::{Deserialize, Serialize};

use crate::errors::{EmojiError, EmojiResult};
use crate::hash::HashAlg;
use crate::model::DisplaySize;
use crate::naming::DEFAULT_MAX_IDENTIFIER_LEN;

/// Global configuration container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    pub hashing: HashingConfig,
    pub display: DisplayConfig,
    pub naming: NamingConfig,
}

/// Hashing-related configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HashingConfig {
    pub algorithm: HashAlg,
}

/// Size reported by metadata lookups. All emoji render at one size.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 112,
            height: 112,
        }
    }
}

impl DisplayConfig {
    pub fn size(&self) -> DisplaySize {
        DisplaySize {
            width: self.width,
            height: self.height,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    pub max_identifier_len: usize,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            max_identifier_len: DEFAULT_MAX_IDENTIFIER_LEN,
        }
    }
}

/// Validate a full configuration object.
pub fn validate_config(cfg: &CoreConfig) -> EmojiResult<()> {
    if cfg.display.width == 0 || cfg.display.height == 0 {
        return Err(EmojiError::invalid_argument(
            "display size must be non-zero",
        ));
    }

    if cfg.naming.max_identifier_len == 0 {
        return Err(EmojiError::invalid_argument(
            "max_identifier_len must be greater than zero",
        ));
    }

    Ok(())
}
