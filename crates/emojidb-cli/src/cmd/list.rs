use anyhow::Result;
use serde::Serialize;

use super::Context;
use crate::output;

#[derive(Debug, Serialize)]
pub struct ListOut {
    pub data: Vec<String>,
}

pub async fn run(ctx: &Context) -> Result<()> {
    let data = ctx.service(false)?.list_identifiers()?;
    if output::is_json() {
        return output::print(&ListOut { data });
    }
    for id in &data {
        println!("{id}");
    }
    Ok(())
}
