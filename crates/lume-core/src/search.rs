use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::group::AssetGroup;

/// How a search query is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    #[default]
    Plain,
    Regex,
}

/// Decides whether a group's base name matches a search.
pub trait Matcher {
    fn matches(&self, name: &str) -> bool;
}

/// Case-insensitive substring match.
pub struct SubstringMatcher {
    needle: String,
}

impl SubstringMatcher {
    pub fn new(query: &str) -> Self {
        Self {
            needle: query.to_lowercase(),
        }
    }
}

impl Matcher for SubstringMatcher {
    fn matches(&self, name: &str) -> bool {
        name.to_lowercase().contains(&self.needle)
    }
}

/// Case-insensitive regular expression match.
pub struct PatternMatcher {
    pattern: Regex,
}

impl PatternMatcher {
    pub fn new(query: &str) -> Result<Self, SearchError> {
        let pattern = RegexBuilder::new(query)
            .case_insensitive(true)
            .build()
            .map_err(|e| SearchError::InvalidPattern(e.to_string()))?;
        Ok(Self { pattern })
    }
}

impl Matcher for PatternMatcher {
    fn matches(&self, name: &str) -> bool {
        self.pattern.is_match(name)
    }
}

/// Build the matcher for a query.
///
/// A blank query in regex mode falls back to plain matching on the raw text.
pub fn build_matcher(query: &str, mode: SearchMode) -> Result<Box<dyn Matcher>, SearchError> {
    match mode {
        SearchMode::Regex if !query.trim().is_empty() => Ok(Box::new(PatternMatcher::new(query)?)),
        _ => Ok(Box::new(SubstringMatcher::new(query))),
    }
}

/// Keep the groups whose base name matches `query`, preserving input order.
///
/// An invalid pattern yields no groups rather than an error.
pub fn filter_groups<'a>(
    groups: impl IntoIterator<Item = &'a AssetGroup>,
    query: &str,
    mode: SearchMode,
) -> Vec<&'a AssetGroup> {
    let matcher = match build_matcher(query, mode) {
        Ok(m) => m,
        Err(e) => {
            tracing::debug!("Search yields no results: {}", e);
            return Vec::new();
        }
    };

    groups
        .into_iter()
        .filter(|group| matcher.matches(group.base_name()))
        .collect()
}
