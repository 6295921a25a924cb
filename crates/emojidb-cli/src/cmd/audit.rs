use anyhow::Result;
use termcolor::Color;

use super::Context;
use crate::output;

pub async fn run(ctx: &Context) -> Result<()> {
    let report = ctx.service(false)?.audit()?;
    if report.is_clean() {
        output::status("no problems found", Color::Green);
    } else {
        for id in &report.misconfigured {
            output::status(&format!("misconfigured: {id} has no servable format"), Color::Red);
        }
        for group in &report.duplicate_groups {
            let names: Vec<String> = group.iter().map(|a| a.file_name()).collect();
            output::status(&format!("identical content: {}", names.join(", ")), Color::Yellow);
        }
    }
    output::print(&report)
}
