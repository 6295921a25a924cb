//! emojidb-api
//!
//! HTTP surface over `AssetService`. Handlers are thin: they run the
//! blocking core call on tokio's blocking pool and map the result or the
//! `EmojiError` onto a response.

pub mod config;
pub mod error;
pub mod routes;
pub mod telemetry;

use std::sync::Arc;

use axum::Router;
use emojidb_core::service::AssetService;
use emojidb_store::DirStorage;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<AssetService<DirStorage>>,
}

impl AppState {
    pub fn new(service: AssetService<DirStorage>) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

pub fn router(state: AppState) -> Router {
    routes::routes()
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}
