use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Details lookup failed: {0}")]
    LookupFailed(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

pub type Result<T> = std::result::Result<T, MetadataError>;
