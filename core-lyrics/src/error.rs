use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LyricsError {
    #[error("Invalid argument: {param} must be at least 1")]
    InvalidArgument { param: &'static str },
}

pub type Result<T> = std::result::Result<T, LyricsError>;
