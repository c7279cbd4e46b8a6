//! Typed filter and update descriptors for song queries.
//!
//! Filterable and updatable columns are an explicit, enumerated set. Query
//! construction never interpolates caller-supplied field names; values are
//! passed through bind parameters.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Filter options for listing songs.
///
/// String fields match with LIKE-contains semantics; the release date, when
/// present, matches exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SongFilter {
    pub group: Option<String>,
    pub title: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub lyrics: Option<String>,
    pub link: Option<String>,
}

impl SongFilter {
    /// True when no filter criteria are set.
    pub fn is_empty(&self) -> bool {
        self.group.is_none()
            && self.title.is_none()
            && self.release_date.is_none()
            && self.lyrics.is_none()
            && self.link.is_none()
    }
}

/// Partial update descriptor for a song. `None` fields are left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SongUpdate {
    pub group_name: Option<String>,
    pub title: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub lyrics: Option<String>,
    pub link: Option<String>,
}

impl SongUpdate {
    /// True when the update would touch no columns.
    pub fn is_empty(&self) -> bool {
        self.group_name.is_none()
            && self.title.is_none()
            && self.release_date.is_none()
            && self.lyrics.is_none()
            && self.link.is_none()
    }
}
