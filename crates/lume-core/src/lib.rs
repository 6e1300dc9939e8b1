//! Asset model and the grouping, search and sort engine for the icon explorer.

pub mod asset;
pub mod error;
pub mod group;
pub mod search;
pub mod sort;
pub mod variant;

pub use asset::{
    dimension_hint, is_supported, validate_filename, Asset, MIME_TYPE, SUPPORTED_EXTENSION,
    UNKNOWN_DIMENSIONS,
};
pub use error::{AssetError, SearchError, SelectionError};
pub use group::{group_assets, AssetGroup, GroupMap};
pub use search::{
    build_matcher, filter_groups, Matcher, PatternMatcher, SearchMode, SubstringMatcher,
};
pub use sort::{sort_groups, SortKey};
pub use variant::{parse_name, Variant};
