pub mod api;
pub mod pages;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, services::ServeDir};

use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let icons = ServeDir::new(state.store.dir());
    let public = ServeDir::new(state.public_dir.as_path());

    Router::new()
        .merge(pages::routes())
        .merge(api::routes())
        // Health check
        .route("/health", get(health))
        // Raw asset passthrough
        .nest_service("/icons", icons)
        // Stylesheet, browser script and anything else under the public root
        .fallback_service(public)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}
