//! # Song Metadata Lookup Module
//!
//! Client for the external metadata API that supplies the details of a newly
//! added song: release date, lyrics text, and an external link.
//!
//! ## Overview
//!
//! The lookup is exposed through the [`SongInfoProvider`] trait so the
//! service layer can be tested against a mock. [`HttpSongInfoProvider`] is
//! the production implementation: an HTTP GET against the configured base
//! URL with retry and exponential backoff.
//!
//! The external API's own behavior is treated as opaque; only the client
//! contract lives here.

pub mod details;
pub mod error;
pub mod provider;

pub use details::SongDetails;
pub use error::{MetadataError, Result};
pub use provider::{HttpSongInfoProvider, RetryConfig, SongInfoProvider};
