//! Repository traits and SQLite implementations

pub mod pagination;
pub mod song;

pub use pagination::{Page, PageRequest};
pub use song::{SongRepository, SqliteSongRepository, SHARD_COUNT};
