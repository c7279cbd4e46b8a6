//! Domain models for the song library

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a song (a UUID, stored as text)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(transparent)]
pub struct SongId(String);

impl SongId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SongId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SongId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SongId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A song with its group, release metadata, and lyrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Song {
    /// Unique identifier
    pub id: SongId,
    /// Owning group reference
    pub group_id: i64,
    /// Group (artist) name, denormalized for filtering
    pub group_name: String,
    /// Song title
    pub title: String,
    /// Release date, if known
    pub release_date: Option<NaiveDate>,
    /// Full raw lyrics text
    pub lyrics: Option<String>,
    /// External link (e.g. a video URL)
    pub link: Option<String>,

    // Timestamps (unix seconds)
    pub created_at: i64,
    pub updated_at: i64,
}

impl Song {
    /// Create a new song with a fresh id and current timestamps.
    pub fn new(group_id: i64, group_name: impl Into<String>, title: impl Into<String>) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            id: SongId::new(),
            group_id,
            group_name: group_name.into(),
            title: title.into(),
            release_date: None,
            lyrics: None,
            link: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Validate song data before persisting.
    pub fn validate(&self) -> Result<(), String> {
        if self.group_name.trim().is_empty() {
            return Err("Group name cannot be empty".to_string());
        }
        if self.title.trim().is_empty() {
            return Err("Song title cannot be empty".to_string());
        }
        if self.group_id <= 0 {
            return Err("Group id must be positive".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_song_new_sets_id_and_timestamps() {
        let song = Song::new(1, "Muse", "Supermassive Black Hole");
        assert!(SongId::from_string(song.id.as_str()).is_ok());
        assert_eq!(song.created_at, song.updated_at);
        assert!(song.release_date.is_none());
    }

    #[test]
    fn test_song_validate_rejects_blank_fields() {
        let mut song = Song::new(1, "Muse", "Uprising");
        assert!(song.validate().is_ok());

        song.title = "   ".to_string();
        assert!(song.validate().is_err());

        song.title = "Uprising".to_string();
        song.group_name = String::new();
        assert!(song.validate().is_err());
    }

    #[test]
    fn test_song_validate_rejects_nonpositive_group_id() {
        let mut song = Song::new(1, "Muse", "Uprising");
        song.group_id = 0;
        assert!(song.validate().is_err());
    }

    #[test]
    fn test_song_id_roundtrip() {
        let id = SongId::new();
        let parsed = SongId::from_string(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_song_id_rejects_garbage() {
        assert!(SongId::from_string("not-a-uuid").is_err());
    }
}
