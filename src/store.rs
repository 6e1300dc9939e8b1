use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use futures::future::join_all;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use tokio::fs;

use lume_core::{dimension_hint, is_supported, validate_filename, Asset, AssetError, MIME_TYPE};

use crate::gallery::AssetSource;

/// Raw content of one asset, ready to be sent as an attachment.
#[derive(Debug, Clone)]
pub struct Download {
    pub filename: String,
    pub content: Vec<u8>,
}

impl Download {
    pub fn content_type(&self) -> &'static str {
        MIME_TYPE
    }

    /// `attachment` disposition. Quotes and backslashes are escaped in the quoted
    /// name; names outside printable ASCII also get a UTF-8 `filename*` parameter.
    pub fn content_disposition(&self) -> String {
        let mut quoted = String::with_capacity(self.filename.len());
        let mut plain = true;
        for c in self.filename.chars() {
            match c {
                '"' | '\\' => {
                    quoted.push('\\');
                    quoted.push(c);
                }
                ' '..='~' => quoted.push(c),
                _ => {
                    plain = false;
                    quoted.push('_');
                }
            }
        }

        if plain {
            format!("attachment; filename=\"{quoted}\"")
        } else {
            format!(
                "attachment; filename=\"{quoted}\"; filename*=UTF-8''{}",
                utf8_percent_encode(&self.filename, NON_ALPHANUMERIC)
            )
        }
    }
}

/// Read-only view of the asset directory.
#[derive(Debug, Clone)]
pub struct AssetStore {
    dir: PathBuf,
}

impl AssetStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// List every supported asset in the directory, in no particular order.
    ///
    /// Each file is read concurrently; a file that cannot be read is logged and skipped.
    pub async fn list_assets(&self) -> Result<Vec<Asset>, AssetError> {
        let mut entries = fs::read_dir(&self.dir).await?;
        let mut filenames = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let Ok(filename) = entry.file_name().into_string() else {
                continue;
            };
            if is_supported(&filename) {
                filenames.push(filename);
            }
        }

        let reads: Vec<_> = filenames
            .into_iter()
            .map(|filename| self.read_metadata(filename))
            .collect();
        let results = join_all(reads).await;

        let assets = results
            .into_iter()
            .filter_map(|result| match result {
                Ok(asset) => Some(asset),
                Err(e) => {
                    tracing::warn!("Skipping unreadable asset: {}", e);
                    None
                }
            })
            .collect();

        Ok(assets)
    }

    async fn read_metadata(&self, filename: String) -> Result<Asset, AssetError> {
        let path = self.dir.join(&filename);
        let metadata = fs::metadata(&path).await?;
        if !metadata.is_file() {
            return Err(AssetError::NotFound(filename));
        }

        let content = fs::read(&path).await?;
        let dimensions = dimension_hint(&String::from_utf8_lossy(&content));
        let last_modified: DateTime<Utc> = metadata.modified()?.into();

        Asset::new(filename, metadata.len(), last_modified, dimensions)
    }

    /// Read one asset for download.
    pub async fn download(&self, filename: &str) -> Result<Download, AssetError> {
        validate_filename(filename)?;

        let content = fs::read(self.dir.join(filename)).await.map_err(|e| {
            tracing::debug!("Failed to read {}: {}", filename, e);
            AssetError::NotFound(filename.to_string())
        })?;

        Ok(Download {
            filename: filename.to_string(),
            content,
        })
    }
}

impl AssetSource for AssetStore {
    async fn list(&self) -> Result<Vec<Asset>, AssetError> {
        self.list_assets().await
    }

    async fn fetch(&self, asset: &Asset) -> Result<String, AssetError> {
        let download = self.download(&asset.filename).await?;
        String::from_utf8(download.content)
            .map_err(|_| AssetError::NotFound(asset.filename.clone()))
    }
}
