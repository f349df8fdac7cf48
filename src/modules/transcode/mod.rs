use crate::state::AppState;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::post;

pub mod command;
pub mod dto;
pub mod error;
pub mod handler;
pub mod service;
pub mod workspace;

pub fn router(state: AppState) -> axum::Router<AppState> {
    Router::new()
        .route("/process", post(handler::process_video))
        // Bodies carry whole video files; the default axum cap is far too
        // small for them.
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes))
}
