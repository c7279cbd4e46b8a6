use core_library::LibraryError;
use core_lyrics::LyricsError;
use core_metadata::MetadataError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    /// No song with the given id exists in any shard.
    #[error("Song not found: {id}")]
    SongNotFound { id: String },

    /// The external API has no entry for the requested song.
    #[error("No details found for '{title}' by '{group}'")]
    DetailsNotFound { group: String, title: String },

    /// A caller-supplied parameter is invalid; recoverable by re-issuing
    /// the request with corrected parameters.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Library(#[from] LibraryError),

    #[error(transparent)]
    Metadata(#[from] MetadataError),
}

impl From<LyricsError> for ServiceError {
    fn from(err: LyricsError) -> Self {
        match err {
            LyricsError::InvalidArgument { param } => {
                Self::InvalidArgument(format!("{param} must be at least 1"))
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
