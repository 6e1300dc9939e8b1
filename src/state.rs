use std::path::PathBuf;
use std::sync::Arc;

use crate::gallery::Gallery;
use crate::store::AssetStore;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: AssetStore,
    /// One gallery session shared by every connected browser.
    pub gallery: Arc<Gallery<AssetStore>>,
    pub public_dir: Arc<PathBuf>,
}

impl AppState {
    pub fn new(store: AssetStore, public_dir: impl Into<PathBuf>) -> Self {
        let gallery = Gallery::new(Arc::new(store.clone()));
        Self {
            store,
            gallery: Arc::new(gallery),
            public_dir: Arc::new(public_dir.into()),
        }
    }
}
