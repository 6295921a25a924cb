//! Route table.
//!
//! | route                  | operation                          |
//! |------------------------|------------------------------------|
//! | `GET /`                | liveness                           |
//! | `GET /emoji`           | `list_identifiers`                 |
//! | `GET /emoji/meta/{id}` | `describe`                         |
//! | `GET /emoji/{id}`      | `fetch_canonical_bytes`            |
//! | `GET /emoji/{id}.{ext}`| `fetch_qualified` (302 on a miss)  |
//!
//! The last two share one path segment. A segment naming a catalogued
//! identifier is unqualified; anything else is split on its last `.`.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use emojidb_core::format::content_type;
use emojidb_core::model::QualifiedFetch;
use emojidb_core::EmojiResult;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/emoji", get(emoji_index))
        .route("/emoji/meta/{id}", get(emoji_meta))
        .route("/emoji/{file}", get(emoji_file))
}

/// Run a blocking core call off the async executor.
async fn blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> EmojiResult<T> + Send + 'static,
    T: Send + 'static,
{
    Ok(tokio::task::spawn_blocking(f).await??)
}

async fn home() -> Json<Value> {
    Json(json!({ "data": "Hello world!" }))
}

async fn emoji_index(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let svc = state.service.clone();
    let ids = blocking(move || svc.list_identifiers()).await?;
    Ok(Json(json!({ "data": ids })))
}

async fn emoji_meta(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let svc = state.service.clone();
    let meta = blocking(move || svc.describe(&id)).await?;
    Ok(Json(json!({
        "data": {
            "id": meta.id,
            "extensions": meta.extensions,
            "sizes": meta.display_size.as_strings(),
        }
    })))
}

enum EmojiReply {
    Bytes { bytes: Vec<u8>, extension: String },
    Redirect(String),
}

impl IntoResponse for EmojiReply {
    fn into_response(self) -> Response {
        match self {
            Self::Bytes { bytes, extension } => {
                ([(header::CONTENT_TYPE, content_type(&extension))], bytes).into_response()
            }
            Self::Redirect(id) => (
                StatusCode::FOUND,
                [(header::LOCATION, format!("/emoji/{}", encode_segment(&id)))],
            )
                .into_response(),
        }
    }
}

async fn emoji_file(
    State(state): State<AppState>,
    Path(file): Path<String>,
) -> Result<EmojiReply, ApiError> {
    let svc = state.service.clone();
    blocking(move || {
        let snapshot = svc.snapshot()?;
        if snapshot.contains(&file) {
            let canonical = svc.fetch_canonical_bytes_in(&snapshot, &file)?;
            return Ok(EmojiReply::Bytes {
                bytes: canonical.bytes,
                extension: canonical.extension,
            });
        }

        let Some((id, ext)) = file.rsplit_once('.').filter(|(id, _)| !id.is_empty()) else {
            return Err(emojidb_core::EmojiError::not_found(file.as_str()));
        };
        match svc.fetch_qualified_in(&snapshot, id, ext)? {
            QualifiedFetch::Bytes(bytes) => Ok(EmojiReply::Bytes {
                bytes,
                extension: ext.to_string(),
            }),
            QualifiedFetch::RedirectTo(target) => Ok(EmojiReply::Redirect(target)),
        }
    })
    .await
}

/// Percent-encode everything outside the URL unreserved set.
fn encode_segment(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~') {
            out.push(b as char);
        } else {
            out.push_str(&format!("%{b:02X}"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_reserved_characters() {
        assert_eq!(encode_segment("smile"), "smile");
        assert_eq!(encode_segment("v1.2"), "v1.2");
        assert_eq!(encode_segment("a b/c"), "a%20b%2Fc");
    }
}
