use anyhow::{anyhow, Result};
use bytesize::ByteSize;
use emojidb_core::model::IngestOutcome;
use emojidb_core::naming::sanitize_identifier;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use termcolor::Color;

use super::Context;
use crate::io::input::{self, Candidate};
use crate::output;

#[derive(Debug, Serialize)]
pub struct IngestOut {
    pub source: String,
    #[serde(flatten)]
    pub outcome: IngestOutcome,
}

pub async fn run(ctx: &Context, input_arg: &str, name: Option<&str>, ext: Option<&str>) -> Result<()> {
    let pb = ProgressBar::new_spinner();
    if output::is_json() {
        pb.set_draw_target(indicatif::ProgressDrawTarget::hidden());
    }
    pb.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    pb.enable_steady_tick(std::time::Duration::from_millis(80));

    pb.set_message("fetching emoji");
    let candidate = match input::resolve_candidate(input_arg).await {
        Ok(c) => c,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    let identifier = proposed_identifier(&candidate, name, ctx.core.naming.max_identifier_len)
        .map_err(|e| {
            pb.finish_and_clear();
            e
        })?;
    let extension = ext
        .map(str::to_ascii_lowercase)
        .or(candidate.extension.clone())
        .ok_or_else(|| anyhow!("cannot detect the format of {input_arg}; pass --ext"))?;

    pb.set_message("checking for duplicates");
    let outcome = ctx
        .service(true)?
        .ingest(&candidate.bytes, &identifier, &extension);
    pb.finish_and_clear();
    let outcome = outcome?;

    match &outcome {
        IngestOutcome::Stored { asset, bytes } => output::status(
            &format!("Saved {} as {}.", ByteSize::b(*bytes), asset.file_name()),
            Color::Green,
        ),
        IngestOutcome::DuplicateOf { asset } => output::status(
            &format!("Emoji already exists under name {}.", asset.identifier),
            Color::Yellow,
        ),
    }

    output::print(&IngestOut {
        source: candidate.source,
        outcome,
    })
}

/// `--name` wins, then the emoji's own name, then the file or URL stem.
fn proposed_identifier(candidate: &Candidate, name: Option<&str>, max_len: usize) -> Result<String> {
    let identifier = match (name, &candidate.emoji, candidate.name_hint.as_deref()) {
        (Some(name), _, _) => sanitize_identifier(name, max_len)?,
        (None, Some(emoji), _) => emoji.proposed_identifier(max_len)?,
        (None, None, Some(hint)) => sanitize_identifier(hint, max_len)?,
        (None, None, None) => {
            return Err(anyhow!("cannot derive a name from {}; pass --name", candidate.source))
        }
    };
    Ok(identifier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use emojidb_core::emoji_ref::EmojiRef;

    fn candidate(hint: Option<&str>, emoji: Option<&str>) -> Candidate {
        Candidate {
            bytes: b"GIF89a".to_vec(),
            name_hint: hint.map(str::to_string),
            extension: Some("gif".to_string()),
            source: "test".to_string(),
            emoji: emoji.map(|raw| EmojiRef::parse(raw).unwrap()),
        }
    }

    #[test]
    fn explicit_name_wins() {
        let c = candidate(Some("file-stem"), Some("<a:party_parrot:123>"));
        assert_eq!(proposed_identifier(&c, Some("my name"), 32).unwrap(), "my_name");
    }

    #[test]
    fn emoji_name_beats_stem() {
        let c = candidate(Some("123"), Some("<a:party-parrot:123>"));
        assert_eq!(proposed_identifier(&c, None, 32).unwrap(), "party_parrot");
    }

    #[test]
    fn stem_is_sanitized() {
        let c = candidate(Some("wave-hello"), None);
        assert_eq!(proposed_identifier(&c, None, 32).unwrap(), "wave_hello");
    }

    #[test]
    fn no_name_source_fails() {
        let c = candidate(None, None);
        assert!(proposed_identifier(&c, None, 32).is_err());
    }
}
