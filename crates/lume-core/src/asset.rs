use std::path::{Component, Path};
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::AssetError;

/// Extension of the only asset type served (compared case-insensitively).
pub const SUPPORTED_EXTENSION: &str = "svg";

/// Content type sent with downloads.
pub const MIME_TYPE: &str = "image/svg+xml";

/// Dimension hint reported when no usable `viewBox` is declared.
pub const UNKNOWN_DIMENSIONS: &str = "Unknown";

static VIEW_BOX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"viewBox=["']([^"']+)["']"#).expect("valid viewBox pattern"));

/// One vector icon file in the asset directory.
///
/// Built fresh for every listing; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "AssetRecord")]
pub struct Asset {
    /// File name including extension (e.g. "arrow-filled.svg")
    pub filename: String,
    /// File name without extension; carries the base name and variant suffix
    pub name: String,
    /// Size in bytes
    pub size: u64,
    /// "<width>×<height>" from the viewBox, or "Unknown"
    pub dimensions: String,
    pub last_modified: DateTime<Utc>,
    /// Static passthrough URL for the raw file
    pub url: String,
    pub download_url: String,
}

impl Asset {
    /// Build an asset record for a file in the asset directory.
    ///
    /// Fails with `InvalidRequest` when the name does not carry the supported extension.
    pub fn new(
        filename: impl Into<String>,
        size: u64,
        last_modified: DateTime<Utc>,
        dimensions: impl Into<String>,
    ) -> Result<Self, AssetError> {
        let filename = filename.into();
        if !is_supported(&filename) {
            return Err(AssetError::InvalidRequest(filename));
        }

        let name = Path::new(&filename)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();

        Ok(Self {
            url: format!("/icons/{}", filename),
            download_url: format!("/api/download/{}", filename),
            filename,
            name,
            size,
            dimensions: dimensions.into(),
            last_modified,
        })
    }
}

/// Wire shape accepted when decoding assets; re-derives the URLs from the file name.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssetRecord {
    filename: String,
    size: u64,
    #[serde(default = "unknown_dimensions")]
    dimensions: String,
    last_modified: DateTime<Utc>,
}

fn unknown_dimensions() -> String {
    UNKNOWN_DIMENSIONS.to_string()
}

impl TryFrom<AssetRecord> for Asset {
    type Error = AssetError;

    fn try_from(record: AssetRecord) -> Result<Self, Self::Error> {
        Asset::new(
            record.filename,
            record.size,
            record.last_modified,
            record.dimensions,
        )
    }
}

/// Whether a file name carries the supported extension.
pub fn is_supported(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(SUPPORTED_EXTENSION))
}

/// Validate a file name requested for download.
///
/// Only bare names with the supported extension are accepted; anything that could
/// address a path outside the asset directory is rejected.
pub fn validate_filename(filename: &str) -> Result<(), AssetError> {
    let mut components = Path::new(filename).components();
    let bare = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    if !bare || filename.contains(['/', '\\']) {
        return Err(AssetError::InvalidRequest(filename.to_string()));
    }
    if !is_supported(filename) {
        return Err(AssetError::InvalidRequest(filename.to_string()));
    }
    Ok(())
}

/// Extract a "<width>×<height>" hint from the first `viewBox` declaration.
pub fn dimension_hint(content: &str) -> String {
    let Some(caps) = VIEW_BOX.captures(content) else {
        return unknown_dimensions();
    };

    let parts: Vec<&str> = caps[1]
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|p| !p.is_empty())
        .collect();

    if parts.len() >= 4 {
        format!("{}×{}", parts[2], parts[3])
    } else {
        unknown_dimensions()
    }
}
