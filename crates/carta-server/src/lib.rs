#![forbid(unsafe_code)]

mod config;
mod fake_store;
mod http;
mod save;

pub use config::ServerConfig;
pub use fake_store::FakeStore;
pub use save::{SaveCoordinator, SaveError};

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use carta_imaging::ImagePipeline;
use carta_store::CatalogStore;
use std::sync::Arc;

pub const CRATE_NAME: &str = "carta-server";

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CatalogStore>,
    pub pipeline: Arc<ImagePipeline>,
    pub save: SaveCoordinator,
    pub max_body_bytes: usize,
}

impl AppState {
    #[must_use]
    pub fn new(
        store: Arc<dyn CatalogStore>,
        pipeline: Arc<ImagePipeline>,
        admin_secret: String,
        max_body_bytes: usize,
    ) -> Self {
        let save = SaveCoordinator::new(store.clone(), admin_secret);
        Self {
            store,
            pipeline,
            save,
            max_body_bytes,
        }
    }
}

#[must_use]
pub fn build_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.max_body_bytes);
    Router::new()
        .route("/healthz", get(http::healthz))
        .route("/api/menu", get(http::get_menu).post(http::save_menu))
        .route("/api/upload", post(http::upload_image))
        .layer(body_limit)
        .with_state(state)
}
