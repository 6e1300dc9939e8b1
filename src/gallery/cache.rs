use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tokio::sync::OnceCell;

use lume_core::Asset;

use super::preview::{prepare_preview, PLACEHOLDER};
use super::AssetSource;

/// Identifies one revision of a file: a rewrite on disk changes the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct PreviewKey {
    filename: String,
    last_modified: DateTime<Utc>,
    size: u64,
}

impl From<&Asset> for PreviewKey {
    fn from(asset: &Asset) -> Self {
        Self {
            filename: asset.filename.clone(),
            last_modified: asset.last_modified,
            size: asset.size,
        }
    }
}

/// Page-session cache of preview markup, keyed by file revision.
///
/// A cell that exists but is not yet initialized marks a load in flight; callers
/// asking for the same file while it loads wait on that load instead of starting
/// another. [`PreviewCache::retain_current`] drops entries a reload no longer lists.
#[derive(Default)]
pub struct PreviewCache {
    entries: DashMap<PreviewKey, Arc<OnceCell<Arc<str>>>>,
}

impl PreviewCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached preview markup, if this revision of the asset has finished loading.
    pub fn get(&self, asset: &Asset) -> Option<Arc<str>> {
        self.entries
            .get(&PreviewKey::from(asset))
            .and_then(|cell| cell.get().cloned())
    }

    pub fn is_loading(&self, asset: &Asset) -> bool {
        self.entries
            .get(&PreviewKey::from(asset))
            .is_some_and(|cell| !cell.initialized())
    }

    /// Number of files that have finished loading.
    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.value().initialized())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Start a new page session over `assets`.
    ///
    /// Entries for files that are gone or changed on disk are dropped, and so are
    /// placeholders left by failed loads, so the next load fetches them again.
    /// Loads still in flight are kept.
    pub fn retain_current(&self, assets: &[Asset]) {
        let current: HashSet<PreviewKey> = assets.iter().map(PreviewKey::from).collect();
        self.entries.retain(|key, cell| {
            current.contains(key) && cell.get().is_none_or(|preview| &**preview != PLACEHOLDER)
        });
    }

    /// Load a preview through `source` unless it is cached or already loading.
    ///
    /// Failures degrade to the placeholder glyph, which is cached until the next session.
    pub async fn load<S: AssetSource>(&self, source: &S, asset: &Asset) -> Arc<str> {
        let cell = self
            .entries
            .entry(PreviewKey::from(asset))
            .or_default()
            .clone();

        cell.get_or_init(|| async {
            let markup = match source.fetch(asset).await {
                Ok(markup) => markup,
                Err(e) => {
                    tracing::warn!("Error loading preview {}: {}", asset.filename, e);
                    return Arc::from(PLACEHOLDER);
                }
            };

            match prepare_preview(&markup) {
                Ok(preview) => Arc::from(preview),
                Err(e) => {
                    tracing::warn!("Invalid preview markup in {}: {}", asset.filename, e);
                    Arc::from(PLACEHOLDER)
                }
            }
        })
        .await
        .clone()
    }
}
