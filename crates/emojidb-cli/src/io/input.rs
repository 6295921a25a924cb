use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{anyhow, Result};
use emojidb_core::emoji_ref::EmojiRef;
use emojidb_core::errors::{EmojiError, EmojiResult};
use emojidb_core::format::sniff_extension;
use url::Url;

const USER_AGENT: &str = concat!("emojidb/", env!("CARGO_PKG_VERSION"));

/// Bytes to ingest plus whatever naming hints the source carried.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub bytes: Vec<u8>,
    pub name_hint: Option<String>,
    pub extension: Option<String>,
    pub source: String,
    /// Set when the bytes came from a chat emoji reference.
    pub emoji: Option<EmojiRef>,
}

pub async fn resolve_candidate(input: &str) -> Result<Candidate> {
    // 1) Chat emoji reference: <a:name:id>
    if input.trim_start().starts_with('<') {
        let emoji = EmojiRef::parse(input)?;
        return Ok(fetch_emoji_ref(&emoji).await?);
    }

    // 2) URL
    if let Some(url) = parse_http_url(input) {
        return Ok(fetch_url(&url).await?);
    }

    // 3) Local file
    read_file(input)
}

pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Candidate> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| anyhow!("cannot read {}: {e}", path.display()))?;
    let extension = sniff_extension(&bytes)
        .map(str::to_string)
        .or_else(|| path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase));
    Ok(Candidate {
        bytes,
        name_hint: path.file_stem().and_then(|s| s.to_str()).map(str::to_string),
        extension,
        source: path.display().to_string(),
        emoji: None,
    })
}

fn parse_http_url(s: &str) -> Option<Url> {
    Url::parse(s)
        .ok()
        .filter(|u| matches!(u.scheme(), "http" | "https"))
}

fn client() -> EmojiResult<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(30))
        .build()
        .map_err(|e| EmojiError::upstream("http client", e))
}

/// Download a chat emoji from the platform CDN.
pub async fn fetch_emoji_ref(emoji: &EmojiRef) -> EmojiResult<Candidate> {
    let bytes = download(&emoji.cdn_url(), &emoji.to_string()).await?;
    Ok(Candidate {
        bytes,
        name_hint: Some(emoji.name.clone()),
        extension: Some(emoji.extension().to_string()),
        source: emoji.cdn_url(),
        emoji: Some(emoji.clone()),
    })
}

async fn fetch_url(url: &Url) -> EmojiResult<Candidate> {
    let bytes = download(url.as_str(), url.as_str()).await?;
    let last = url
        .path_segments()
        .and_then(|mut segs| segs.next_back())
        .filter(|s| !s.is_empty())
        .map(str::to_string);
    let (stem, ext) = match last.as_deref().map(|s| s.rsplit_once('.')) {
        Some(Some((stem, ext))) => (Some(stem.to_string()), Some(ext.to_ascii_lowercase())),
        Some(None) => (last.clone(), None),
        None => (None, None),
    };
    let extension = sniff_extension(&bytes).map(str::to_string).or(ext);
    Ok(Candidate {
        bytes,
        name_hint: stem,
        extension,
        source: url.to_string(),
        emoji: None,
    })
}

async fn download(url: &str, reference: &str) -> EmojiResult<Vec<u8>> {
    let resp = client()?
        .get(url)
        .send()
        .await
        .map_err(|e| EmojiError::upstream(reference, e))?;
    let status = resp.status();
    if !status.is_success() {
        return Err(EmojiError::upstream(reference, format!("http error: {status}")));
    }
    let bytes = resp
        .bytes()
        .await
        .map_err(|e| EmojiError::upstream(reference, e))?;
    if bytes.is_empty() {
        return Err(EmojiError::upstream(reference, "empty response body"));
    }
    Ok(bytes.to_vec())
}
