//! Browser-facing gallery: the per-session view over the asset list.
//!
//! A [`Gallery`] owns everything the page needs between requests: the grouped
//! assets, the current search/sort/view settings, the preview cache and the copy
//! confirmations. Every mutation re-renders the affected fragment synchronously.

mod cache;
mod clipboard;
mod preview;
mod render;
#[cfg(test)]
pub(crate) mod testing;

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::join_all;
use thiserror::Error;
use tokio::sync::RwLock;

use lume_core::{
    filter_groups, group_assets, sort_groups, Asset, AssetError, GroupMap, SearchMode,
    SelectionError, SortKey, Variant,
};

pub use cache::PreviewCache;
pub use clipboard::{CapturedClipboard, ClipboardError, ClipboardWriter};
pub use preview::{prepare_preview, PreviewError, PLACEHOLDER, PREVIEW_SIZE};

/// How long a card shows its "Copied!" confirmation.
pub const COPY_CONFIRMATION: Duration = Duration::from_millis(1500);

/// Where the gallery gets its asset list and raw asset markup from.
pub trait AssetSource: Send + Sync {
    fn list(&self) -> impl Future<Output = Result<Vec<Asset>, AssetError>> + Send;

    fn fetch(&self, asset: &Asset) -> impl Future<Output = Result<String, AssetError>> + Send;
}

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("Icon group not found: {0}")]
    UnknownGroup(String),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
}

/// Grid density.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl ViewSize {
    pub fn as_str(self) -> &'static str {
        match self {
            ViewSize::Small => "small",
            ViewSize::Medium => "medium",
            ViewSize::Large => "large",
        }
    }

    /// Minimum card width in pixels.
    pub fn min_card_width(self) -> u32 {
        match self {
            ViewSize::Small => 150,
            ViewSize::Medium => 200,
            ViewSize::Large => 280,
        }
    }
}

impl From<&str> for ViewSize {
    fn from(s: &str) -> Self {
        match s {
            "small" => ViewSize::Small,
            "large" => ViewSize::Large,
            _ => ViewSize::Medium,
        }
    }
}

/// Search, sort and density settings chosen by the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub query: String,
    pub mode: SearchMode,
    pub sort: SortKey,
    pub size: ViewSize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Pending,
    Ready,
    Failed,
}

impl LoadState {
    pub fn as_str(self) -> &'static str {
        match self {
            LoadState::Pending => "pending",
            LoadState::Ready => "ready",
            LoadState::Failed => "failed",
        }
    }
}

#[derive(Default)]
struct Session {
    asset_count: usize,
    groups: GroupMap,
    view: ViewState,
    /// Base names of the groups passing the current filter, in display order.
    visible: Vec<String>,
    load: LoadState,
    copied: HashMap<String, Instant>,
}

impl Session {
    fn refilter(&mut self) {
        let mut matches = filter_groups(self.groups.values(), &self.view.query, self.view.mode);
        sort_groups(&mut matches, self.view.sort);
        self.visible = matches
            .into_iter()
            .map(|group| group.base_name().to_string())
            .collect();
    }

    fn copied_recently(&self, base_name: &str, now: Instant) -> bool {
        self.copied
            .get(base_name)
            .is_some_and(|at| now.saturating_duration_since(*at) < COPY_CONFIRMATION)
    }
}

#[derive(Default)]
struct LoadProgress {
    loaded: AtomicUsize,
    total: AtomicUsize,
}

/// Snapshot of preview preloading for the current reload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    pub loaded: usize,
    pub total: usize,
}

impl Progress {
    /// Whole percent loaded; an empty reload counts as done.
    pub fn percent(self) -> usize {
        if self.total == 0 {
            return 100;
        }
        (self.loaded * 100 + self.total / 2) / self.total
    }
}

/// A listed asset set waiting for its previews; see [`Gallery::begin_reload`].
pub struct PendingReload {
    generation: u64,
    assets: Vec<Asset>,
}

/// Session-scoped gallery context.
pub struct Gallery<S> {
    source: Arc<S>,
    cache: PreviewCache,
    progress: LoadProgress,
    generation: AtomicU64,
    session: RwLock<Session>,
}

impl<S: AssetSource> Gallery<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            cache: PreviewCache::new(),
            progress: LoadProgress::default(),
            generation: AtomicU64::new(0),
            session: RwLock::new(Session::default()),
        }
    }

    pub fn cache(&self) -> &PreviewCache {
        &self.cache
    }

    /// Previews loaded so far in the current reload, and how many it needs.
    pub fn progress(&self) -> Progress {
        Progress {
            loaded: self.progress.loaded.load(Ordering::Relaxed),
            total: self.progress.total.load(Ordering::Relaxed),
        }
    }

    /// Fetch the asset list, regroup it and preload every preview.
    ///
    /// Returns the number of groups. Variant selections and copy confirmations are reset.
    pub async fn reload(&self) -> Result<usize, GalleryError> {
        let pending = self.begin_reload().await?;
        Ok(self.finish_reload(pending).await)
    }

    /// First half of a reload: list the assets and enter the loading state.
    ///
    /// Cached previews for files that changed since the last session are dropped.
    pub async fn begin_reload(&self) -> Result<PendingReload, GalleryError> {
        let assets = match self.source.list().await {
            Ok(assets) => assets,
            Err(e) => {
                self.session.write().await.load = LoadState::Failed;
                return Err(e.into());
            }
        };

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.cache.retain_current(&assets);
        self.progress.loaded.store(0, Ordering::Relaxed);
        self.progress.total.store(assets.len(), Ordering::Relaxed);
        self.session.write().await.load = LoadState::Pending;

        Ok(PendingReload { generation, assets })
    }

    /// Second half of a reload: preload previews, then publish the new groups.
    ///
    /// A reload overtaken by a newer one preloads but does not publish.
    pub async fn finish_reload(&self, pending: PendingReload) -> usize {
        let PendingReload { generation, assets } = pending;

        let loads: Vec<_> = assets
            .iter()
            .map(|asset| self.preload(asset, generation))
            .collect();
        join_all(loads).await;

        let groups = group_assets(&assets);

        let mut session = self.session.write().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!("Reload {} superseded", generation);
            return groups.len();
        }
        session.asset_count = assets.len();
        session.groups = groups;
        session.load = LoadState::Ready;
        session.copied.clear();
        session.refilter();

        tracing::info!(
            "Loaded {} icons ({} variants)",
            session.groups.len(),
            session.asset_count
        );

        session.groups.len()
    }

    async fn preload(&self, asset: &Asset, generation: u64) {
        self.cache.load(&*self.source, asset).await;
        if self.generation.load(Ordering::SeqCst) == generation {
            self.progress.loaded.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub async fn load_state(&self) -> LoadState {
        self.session.read().await.load
    }

    pub async fn view(&self) -> ViewState {
        self.session.read().await.view.clone()
    }

    /// Apply new search/sort/density settings.
    pub async fn set_view(&self, view: ViewState) {
        let mut session = self.session.write().await;
        session.view = view;
        session.refilter();
    }

    /// Base names of the groups currently shown, in display order.
    pub async fn visible(&self) -> Vec<String> {
        self.session.read().await.visible.clone()
    }

    pub async fn selected_variant(&self, base_name: &str) -> Option<Variant> {
        let session = self.session.read().await;
        session.groups.get(base_name).map(|g| g.selected_variant())
    }

    /// The whole page.
    pub async fn render_page(&self) -> String {
        let session = self.session.read().await;
        render::page(&session, &self.cache, self.progress(), Instant::now())
    }

    /// Stats line plus grid, or the empty/error panel.
    pub async fn render_results(&self) -> String {
        let session = self.session.read().await;
        render::results(&session, &self.cache, self.progress(), Instant::now())
    }

    pub async fn render_card(&self, base_name: &str) -> Result<String, GalleryError> {
        let session = self.session.read().await;
        let group = session
            .groups
            .get(base_name)
            .ok_or_else(|| GalleryError::UnknownGroup(base_name.to_string()))?;
        let copied = session.copied_recently(base_name, Instant::now());
        Ok(render::card(group, &self.cache, copied))
    }

    /// Switch one group's variant and re-render just that card.
    pub async fn select_variant(
        &self,
        base_name: &str,
        variant: Variant,
    ) -> Result<String, GalleryError> {
        let mut session = self.session.write().await;
        let group = session
            .groups
            .get_mut(base_name)
            .ok_or_else(|| GalleryError::UnknownGroup(base_name.to_string()))?;
        group.select(variant)?;

        let group = &session.groups[base_name];
        let copied = session.copied_recently(base_name, Instant::now());
        Ok(render::card(group, &self.cache, copied))
    }

    /// Copy the selected variant's raw markup and re-render the card with its confirmation.
    pub async fn copy_markup<C: ClipboardWriter>(
        &self,
        base_name: &str,
        clipboard: &C,
    ) -> Result<String, GalleryError> {
        let asset = {
            let session = self.session.read().await;
            session
                .groups
                .get(base_name)
                .map(|g| g.selected_asset().clone())
                .ok_or_else(|| GalleryError::UnknownGroup(base_name.to_string()))?
        };

        let markup = self.source.fetch(&asset).await?;
        clipboard.write_text(&markup).await?;

        let mut session = self.session.write().await;
        session.copied.insert(base_name.to_string(), Instant::now());

        let group = session
            .groups
            .get(base_name)
            .ok_or_else(|| GalleryError::UnknownGroup(base_name.to_string()))?;
        Ok(render::card(group, &self.cache, true))
    }
}
