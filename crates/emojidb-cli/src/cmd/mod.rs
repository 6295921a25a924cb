use std::path::PathBuf;

use anyhow::Result;
use emojidb_core::config::CoreConfig;
use emojidb_core::hash::HashAlg;
use emojidb_core::service::AssetService;
use emojidb_store::{open_service, DirStorage, StoreConfig};

use crate::args::{Cli, Command};

mod audit;
mod describe;
mod fetch;
mod ingest;
mod list;

pub async fn dispatch(cli: Cli) -> Result<()> {
    let ctx = Context::from_cli(&cli)?;
    match cli.command {
        Command::List => list::run(&ctx).await,
        Command::Describe { id } => describe::run(&ctx, &id).await,
        Command::Fetch { id, ext, to } => fetch::run(&ctx, &id, ext.as_deref(), to.as_deref()).await,
        Command::Ingest { input, name, ext } => {
            ingest::run(&ctx, &input, name.as_deref(), ext.as_deref()).await
        }
        Command::Audit => audit::run(&ctx).await,
    }
}

/// Settings shared by every command.
pub struct Context {
    pub asset_dir: PathBuf,
    pub core: CoreConfig,
}

impl Context {
    fn from_cli(cli: &Cli) -> Result<Self> {
        let mut core = CoreConfig::default();
        core.hashing.algorithm = cli.hash_alg.parse::<HashAlg>()?;
        Ok(Self {
            asset_dir: PathBuf::from(&cli.asset_dir),
            core,
        })
    }

    /// Service over the asset directory. Only ingestion creates the directory.
    pub fn service(&self, create: bool) -> Result<AssetService<DirStorage>> {
        let store = StoreConfig::local(&self.asset_dir).create_if_missing(create);
        Ok(open_service(store, self.core.clone())?)
    }
}
