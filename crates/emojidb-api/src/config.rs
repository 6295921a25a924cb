use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use emojidb_core::config::{validate_config, CoreConfig};
use emojidb_core::hash::HashAlg;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";
pub const DEFAULT_ASSET_DIR: &str = "assets/img";

/// Server configuration, read from `EMOJIDB_*` environment variables.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub asset_dir: PathBuf,
    pub log_json: bool,
    pub core: CoreConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR
                .parse()
                .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], 5000))),
            asset_dir: PathBuf::from(DEFAULT_ASSET_DIR),
            log_json: false,
            core: CoreConfig::default(),
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut cfg = Self::default();

        if let Some(addr) = lookup("EMOJIDB_BIND_ADDR") {
            cfg.bind_addr = addr
                .parse()
                .map_err(|e| anyhow!("invalid EMOJIDB_BIND_ADDR {addr:?}: {e}"))?;
        }
        if let Some(dir) = lookup("EMOJIDB_ASSET_DIR") {
            cfg.asset_dir = PathBuf::from(dir);
        }
        if let Some(alg) = lookup("EMOJIDB_HASH_ALG") {
            cfg.core.hashing.algorithm = alg.parse::<HashAlg>()?;
        }
        if let Some(flag) = lookup("EMOJIDB_LOG_JSON") {
            cfg.log_json = matches!(flag.as_str(), "1" | "true" | "yes");
        }

        validate_config(&cfg.core)?;
        Ok(cfg)
    }
}
