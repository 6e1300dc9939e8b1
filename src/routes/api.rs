use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use crate::models::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/icons", get(list_icons))
        .route("/api/download/{filename}", get(download_icon))
}

/// GET /api/icons - List every icon in the asset directory.
pub async fn list_icons(State(state): State<AppState>) -> Response {
    match state.store.list_assets().await {
        Ok(assets) => Json(assets).into_response(),
        Err(e) => {
            tracing::error!("Error reading icons directory: {}", e);
            ApiError::from(e).into_response()
        }
    }
}

/// GET /api/download/:filename - Download one icon as an attachment.
pub async fn download_icon(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Response {
    match state.store.download(&filename).await {
        Ok(download) => (
            [
                (header::CONTENT_TYPE, download.content_type().to_string()),
                (header::CONTENT_DISPOSITION, download.content_disposition()),
            ],
            download.content,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Error downloading icon {}: {}", filename, e);
            ApiError::from(e).into_response()
        }
    }
}
