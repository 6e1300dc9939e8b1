use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::group::AssetGroup;

/// Ordering applied to the filtered groups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SortKey {
    #[default]
    Name,
    NameDesc,
    Size,
    /// Unrecognized key; keeps the input order.
    Unsorted,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::NameDesc => "name-desc",
            SortKey::Size => "size",
            SortKey::Unsorted => "none",
        }
    }
}

impl From<&str> for SortKey {
    fn from(s: &str) -> Self {
        match s {
            "name" => SortKey::Name,
            "name-desc" => SortKey::NameDesc,
            "size" => SortKey::Size,
            _ => SortKey::Unsorted,
        }
    }
}

impl From<String> for SortKey {
    fn from(s: String) -> Self {
        SortKey::from(s.as_str())
    }
}

impl From<SortKey> for String {
    fn from(key: SortKey) -> Self {
        key.as_str().to_string()
    }
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Sort groups in place. The sort is stable, so equal keys keep their input order.
pub fn sort_groups(groups: &mut [&AssetGroup], key: SortKey) {
    match key {
        SortKey::Name => groups.sort_by(|a, b| compare_names(a.base_name(), b.base_name())),
        SortKey::NameDesc => groups.sort_by(|a, b| compare_names(b.base_name(), a.base_name())),
        SortKey::Size => groups.sort_by_key(|g| g.size()),
        SortKey::Unsorted => {}
    }
}
