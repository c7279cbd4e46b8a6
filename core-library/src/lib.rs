//! # Song Library Storage Module
//!
//! Owns the song library database and provides repository access to it.
//!
//! ## Overview
//!
//! This module manages:
//! - SQLite schema and embedded migrations
//! - The sharded song repository (`songs_0..songs_3` partitions)
//! - Typed filter and update descriptors for song queries
//! - Pagination types for listing endpoints

pub mod db;
pub mod error;
pub mod models;
pub mod query;
pub mod repositories;

pub use error::{LibraryError, Result};
pub use models::{Song, SongId};
pub use query::{SongFilter, SongUpdate};
