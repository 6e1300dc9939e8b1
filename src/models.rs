use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use lume_core::{AssetError, SearchMode, SortKey};

use crate::gallery::{GalleryError, LoadState, Progress, ViewSize, ViewState};

/// JSON error body: `{ "error": "..." }`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// An error on its way to becoming an HTTP response.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<AssetError> for ApiError {
    fn from(e: AssetError) -> Self {
        match e {
            AssetError::Io(_) => ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to read icons directory",
            ),
            AssetError::InvalidRequest(_) => {
                ApiError::new(StatusCode::BAD_REQUEST, "Only SVG files are allowed")
            }
            AssetError::NotFound(_) => ApiError::new(StatusCode::NOT_FOUND, "Icon not found"),
        }
    }
}

impl From<GalleryError> for ApiError {
    fn from(e: GalleryError) -> Self {
        match e {
            GalleryError::Asset(e) => e.into(),
            GalleryError::UnknownGroup(_) | GalleryError::Selection(_) => {
                ApiError::new(StatusCode::NOT_FOUND, e.to_string())
            }
            GalleryError::Clipboard(_) => {
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { error: self.message })).into_response()
    }
}

/// Query parameters for the page and grid endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ViewQuery {
    #[serde(default)]
    pub q: String,
    pub regex: Option<String>,
    pub sort: Option<String>,
    pub view: Option<String>,
}

impl From<ViewQuery> for ViewState {
    fn from(query: ViewQuery) -> Self {
        let regex = matches!(query.regex.as_deref(), Some("true" | "1" | "on"));
        ViewState {
            query: query.q,
            mode: if regex {
                SearchMode::Regex
            } else {
                SearchMode::Plain
            },
            sort: query.sort.as_deref().map(SortKey::from).unwrap_or_default(),
            size: query.view.as_deref().map(ViewSize::from).unwrap_or_default(),
        }
    }
}

/// Request to switch a card's variant.
#[derive(Debug, Deserialize)]
pub struct SelectVariantRequest {
    pub variant: String,
}

/// Preload progress polled by the browser while the loading panel is shown.
#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub state: &'static str,
    pub loaded: usize,
    pub total: usize,
    pub percent: usize,
}

impl ProgressResponse {
    pub fn new(state: LoadState, progress: Progress) -> Self {
        Self {
            state: state.as_str(),
            loaded: progress.loaded,
            total: progress.total,
            percent: progress.percent(),
        }
    }
}

/// Response for the copy endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyResponse {
    pub markup: String,
    pub card: String,
    /// How long the browser should show the confirmation before refreshing the card
    pub confirm_ms: u64,
}
