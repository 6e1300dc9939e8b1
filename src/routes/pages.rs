use std::str::FromStr;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use lume_core::Variant;

use crate::gallery::{CapturedClipboard, COPY_CONFIRMATION};
use crate::models::{ApiError, CopyResponse, ProgressResponse, SelectVariantRequest, ViewQuery};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/ui/grid", get(grid))
        .route("/ui/progress", get(progress))
        .route("/ui/cards/{base}", get(card))
        .route("/ui/cards/{base}/variant", post(select_variant))
        .route("/ui/cards/{base}/copy", post(copy_markup))
}

/// GET / - Start a new session and render the whole page.
///
/// The listing is read before responding; previews preload in the background
/// while the page shows the loading panel.
async fn index(State(state): State<AppState>, Query(query): Query<ViewQuery>) -> Html<String> {
    state.gallery.set_view(query.into()).await;

    match state.gallery.begin_reload().await {
        Ok(pending) => {
            let gallery = state.gallery.clone();
            tokio::spawn(async move {
                gallery.finish_reload(pending).await;
            });
        }
        Err(e) => tracing::error!("Error loading icons: {}", e),
    }

    Html(state.gallery.render_page().await)
}

/// GET /ui/progress - Preload progress of the current session.
async fn progress(State(state): State<AppState>) -> Json<ProgressResponse> {
    let load = state.gallery.load_state().await;
    Json(ProgressResponse::new(load, state.gallery.progress()))
}

/// GET /ui/grid - Re-filter and render the results panel.
async fn grid(State(state): State<AppState>, Query(query): Query<ViewQuery>) -> Html<String> {
    state.gallery.set_view(query.into()).await;
    Html(state.gallery.render_results().await)
}

/// GET /ui/cards/:base - Render one card.
async fn card(State(state): State<AppState>, Path(base): Path<String>) -> Response {
    match state.gallery.render_card(&base).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// POST /ui/cards/:base/variant - Switch the displayed variant of one card.
async fn select_variant(
    State(state): State<AppState>,
    Path(base): Path<String>,
    Json(req): Json<SelectVariantRequest>,
) -> Response {
    let variant = match Variant::from_str(&req.variant) {
        Ok(v) => v,
        Err(e) => return ApiError::new(StatusCode::BAD_REQUEST, e).into_response(),
    };

    match state.gallery.select_variant(&base, variant).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// POST /ui/cards/:base/copy - Copy the selected variant's markup.
async fn copy_markup(State(state): State<AppState>, Path(base): Path<String>) -> Response {
    let clipboard = CapturedClipboard::new();

    match state.gallery.copy_markup(&base, &clipboard).await {
        Ok(card) => Json(CopyResponse {
            markup: clipboard.take().unwrap_or_default(),
            card,
            confirm_ms: COPY_CONFIRMATION.as_millis() as u64,
        })
        .into_response(),
        Err(e) => {
            tracing::error!("Failed to copy {}: {}", base, e);
            ApiError::from(e).into_response()
        }
    }
}
