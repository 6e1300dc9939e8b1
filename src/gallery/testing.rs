//! Fakes for the gallery's I/O seams.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use chrono::DateTime;

use lume_core::{dimension_hint, Asset, AssetError};

use super::clipboard::{ClipboardError, ClipboardWriter};
use super::AssetSource;

/// In-memory asset source that counts fetches.
///
/// Each file carries a revision that stands in for its modification time.
pub(crate) struct FakeSource {
    files: Mutex<Vec<(String, String, i64)>>,
    failing: HashSet<String>,
    unlistable: bool,
    delay: Option<Duration>,
    fetches: AtomicUsize,
}

impl FakeSource {
    pub(crate) fn new(files: &[(&str, &str)]) -> Self {
        Self {
            files: Mutex::new(
                files
                    .iter()
                    .map(|(name, markup)| (name.to_string(), markup.to_string(), 0))
                    .collect(),
            ),
            failing: HashSet::new(),
            unlistable: false,
            delay: None,
            fetches: AtomicUsize::new(0),
        }
    }

    pub(crate) fn with_delay_ms(mut self, ms: u64) -> Self {
        self.delay = Some(Duration::from_millis(ms));
        self
    }

    pub(crate) fn failing(mut self, filename: &str) -> Self {
        self.failing.insert(filename.to_string());
        self
    }

    pub(crate) fn unlistable(mut self) -> Self {
        self.unlistable = true;
        self
    }

    /// Replace a file's markup and bump its revision.
    pub(crate) fn rewrite(&self, filename: &str, markup: &str) {
        let mut files = self.files.lock().unwrap();
        let file = files
            .iter_mut()
            .find(|(name, _, _)| name == filename)
            .unwrap();
        file.1 = markup.to_string();
        file.2 += 1;
    }

    pub(crate) fn asset(&self, filename: &str) -> Asset {
        let files = self.files.lock().unwrap();
        let (markup, revision) = files
            .iter()
            .find(|(name, _, _)| name == filename)
            .map(|(_, markup, revision)| (markup.as_str(), *revision))
            .unwrap_or_default();
        Asset::new(
            filename,
            markup.len() as u64,
            DateTime::from_timestamp(revision, 0).unwrap(),
            dimension_hint(markup),
        )
        .unwrap()
    }

    fn filenames(&self) -> Vec<String> {
        let files = self.files.lock().unwrap();
        files.iter().map(|(name, _, _)| name.clone()).collect()
    }

    pub(crate) fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl AssetSource for FakeSource {
    async fn list(&self) -> Result<Vec<Asset>, AssetError> {
        if self.unlistable {
            return Err(AssetError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no such directory",
            )));
        }
        Ok(self
            .filenames()
            .iter()
            .map(|name| self.asset(name))
            .collect())
    }

    async fn fetch(&self, asset: &Asset) -> Result<String, AssetError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing.contains(&asset.filename) {
            return Err(AssetError::NotFound(asset.filename.clone()));
        }
        let files = self.files.lock().unwrap();
        files
            .iter()
            .find(|(name, _, _)| *name == asset.filename)
            .map(|(_, markup, _)| markup.clone())
            .ok_or_else(|| AssetError::NotFound(asset.filename.clone()))
    }
}

/// Clipboard that records every write.
#[derive(Default)]
pub(crate) struct RecordingClipboard {
    pub(crate) writes: Mutex<Vec<String>>,
    pub(crate) broken: bool,
}

impl ClipboardWriter for RecordingClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        if self.broken {
            return Err(ClipboardError::Unavailable("denied".to_string()));
        }
        self.writes.lock().unwrap().push(text.to_string());
        Ok(())
    }
}
