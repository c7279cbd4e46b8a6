//! # Song Service Module
//!
//! Orchestration layer over the song library: listing, adding, updating,
//! deleting songs, and serving paginated lyrics sections.
//!
//! ## Overview
//!
//! [`SongService`] owns nothing but its injected collaborators: a
//! [`core_library::repositories::SongRepository`] for storage and a
//! [`core_metadata::SongInfoProvider`] for new-song details. There are no
//! process-wide singletons; callers construct the service with the handles
//! they want it to use.

pub mod error;
pub mod song_service;

pub use error::{Result, ServiceError};
pub use song_service::SongService;
