use std::fs;

use anyhow::Result;
use emojidb_core::model::QualifiedFetch;
use serde::Serialize;
use termcolor::Color;

use super::Context;
use crate::output;

#[derive(Debug, Serialize)]
pub struct FetchOut {
    pub id: String,
    pub extension: String,
    pub bytes: usize,
    pub redirected: bool,
    pub wrote_to: Option<String>,
}

pub async fn run(ctx: &Context, id: &str, ext: Option<&str>, to: Option<&str>) -> Result<()> {
    let svc = ctx.service(false)?;

    // A qualified miss behaves like the HTTP redirect: fall back to canonical.
    let (bytes, extension, redirected) = match ext {
        Some(ext) => match svc.fetch_qualified(id, ext)? {
            QualifiedFetch::Bytes(bytes) => (bytes, ext.to_string(), false),
            QualifiedFetch::RedirectTo(target) => {
                output::status(&format!("{id}.{ext} is not stored, using {target}"), Color::Yellow);
                let canonical = svc.fetch_canonical_bytes(&target)?;
                (canonical.bytes, canonical.extension, true)
            }
        },
        None => {
            let canonical = svc.fetch_canonical_bytes(id)?;
            (canonical.bytes, canonical.extension, false)
        }
    };

    if let Some(path) = to {
        fs::write(path, &bytes)?;
    }
    output::print(&FetchOut {
        id: id.to_string(),
        extension,
        bytes: bytes.len(),
        redirected,
        wrote_to: to.map(str::to_string),
    })
}
