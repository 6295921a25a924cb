use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use emojidb_core::EmojiError;
use serde::Serialize;
use tracing::error;

pub const NOT_FOUND_DESCRIPTION: &str = "Emoji does not exist.";
pub const MISCONFIGURED_DESCRIPTION: &str = "Emoji exists, but is badly configured.";

#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    status_code: StatusCode,
    description: String,
}

impl ApiError {
    pub fn new(status_code: StatusCode, description: &str) -> Self {
        Self {
            status_code,
            description: description.to_string(),
        }
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, NOT_FOUND_DESCRIPTION)
    }

    pub fn internal_error_str(description: &str) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, description)
    }

    pub fn status_code(&self) -> StatusCode {
        self.status_code
    }
}

impl From<EmojiError> for ApiError {
    fn from(e: EmojiError) -> Self {
        // Caller mistakes are answered, not logged.
        if !e.is_client_error() {
            error!("{e}");
        }
        match e {
            EmojiError::EmojiNotFound { .. } => Self::not_found(),
            EmojiError::MisconfiguredAsset { .. } => {
                Self::internal_error_str(MISCONFIGURED_DESCRIPTION)
            }
            EmojiError::InvalidArgument(msg) => Self::new(StatusCode::BAD_REQUEST, &msg),
            _ => Self::internal_error_str("Internal server error."),
        }
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(e: tokio::task::JoinError) -> Self {
        error!("blocking task failed: {e}");
        Self::internal_error_str("Internal server error.")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_taxonomy_to_status() {
        assert_eq!(
            ApiError::from(EmojiError::not_found("ghost")).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(EmojiError::MisconfiguredAsset {
                id: "wave".into(),
                extensions: vec!["bmp".into()],
            })
            .status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::from(EmojiError::invalid_argument("bad")).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(EmojiError::upstream("<a:party:1>", "timed out")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn body_carries_description_only() {
        let v = serde_json::to_value(ApiError::not_found()).unwrap();
        assert_eq!(v, serde_json::json!({"description": "Emoji does not exist."}));
    }
}
