pub mod config;
pub mod gallery;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;

pub use config::Config;
pub use gallery::{AssetSource, Gallery, GalleryError, ViewState};
pub use models::{ApiError, ErrorBody};
pub use routes::create_router;
pub use state::AppState;
pub use store::{AssetStore, Download};
