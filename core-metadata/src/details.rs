//! Song details returned by the external metadata API

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Accepted release date formats, tried in order. The API serves
/// `dd.mm.yyyy`; ISO dates are accepted as a fallback.
const DATE_FORMATS: [&str; 2] = ["%d.%m.%Y", "%Y-%m-%d"];

/// Details the external API knows about a song.
///
/// All fields are optional on the wire; an entry may exist with any subset
/// of them populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongDetails {
    /// Release date as served, e.g. `16.07.2006`
    #[serde(default)]
    pub release_date: Option<String>,
    /// Full lyrics text
    #[serde(default)]
    pub text: Option<String>,
    /// External link (e.g. a video URL)
    #[serde(default)]
    pub link: Option<String>,
}

impl SongDetails {
    /// Parse the wire-format release date, if present and well-formed.
    pub fn parsed_release_date(&self) -> Option<NaiveDate> {
        let raw = self.release_date.as_deref()?.trim();
        DATE_FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
    }
}
