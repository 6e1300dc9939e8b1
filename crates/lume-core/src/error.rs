use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("Failed to read asset directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Invalid asset request: {0}")]
    InvalidRequest(String),
}

#[derive(Error, Debug, PartialEq)]
pub enum SearchError {
    #[error("Invalid search pattern: {0}")]
    InvalidPattern(String),
}

#[derive(Error, Debug, PartialEq)]
pub enum SelectionError {
    #[error("Group {group} has no {variant} variant")]
    UnknownVariant { group: String, variant: String },
}
