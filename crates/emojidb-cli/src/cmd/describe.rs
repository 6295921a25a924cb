use anyhow::Result;
use emojidb_core::resolve::{priority_rank, resolve};
use serde::Serialize;

use super::Context;
use crate::output;

#[derive(Debug, Serialize)]
pub struct DescribeOut {
    pub id: String,
    /// Discovery order, as stored.
    pub extensions: Vec<String>,
    /// Canonical first; extensions outside the priority table last.
    pub by_priority: Vec<String>,
    pub sizes: [String; 2],
    pub canonical: Option<String>,
}

pub async fn run(ctx: &Context, id: &str) -> Result<()> {
    let meta = ctx.service(false)?.describe(id)?;
    let canonical = resolve(&meta.extensions).ok().map(str::to_string);
    let mut by_priority = meta.extensions.clone();
    by_priority.sort_by_key(|ext| priority_rank(ext).unwrap_or(usize::MAX));
    output::print(&DescribeOut {
        id: meta.id,
        sizes: meta.display_size.as_strings(),
        extensions: meta.extensions,
        by_priority,
        canonical,
    })
}
