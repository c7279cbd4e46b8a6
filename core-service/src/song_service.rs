//! Song service coordinating storage, lyrics sectioning, and metadata lookup

use crate::error::{Result, ServiceError};
use core_library::models::{Song, SongId};
use core_library::query::{SongFilter, SongUpdate};
use core_library::repositories::{Page, PageRequest, SongRepository};
use core_lyrics::SectionPage;
use core_metadata::SongInfoProvider;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Main song service coordinating all operations.
///
/// Pure orchestration: storage and external lookup are injected, the lyrics
/// sectioning is computed fresh on every request and never cached.
pub struct SongService {
    repository: Arc<dyn SongRepository>,
    provider: Arc<dyn SongInfoProvider>,
}

impl SongService {
    pub fn new(repository: Arc<dyn SongRepository>, provider: Arc<dyn SongInfoProvider>) -> Self {
        Self {
            repository,
            provider,
        }
    }

    /// List songs matching a filter, paginated (0-based page addressing).
    pub async fn list_songs(
        &self,
        filter: &SongFilter,
        page_request: PageRequest,
    ) -> Result<Page<Song>> {
        let page = self.repository.query(filter, page_request).await?;
        info!(
            total = page.total,
            returned = page.items.len(),
            page = page_request.page,
            "Listed songs"
        );
        Ok(page)
    }

    /// Fetch one song by id.
    pub async fn get_song(&self, id: &SongId) -> Result<Song> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::SongNotFound { id: id.to_string() })
    }

    /// Serve one page of a song's lyrics sections.
    ///
    /// `page` is 1-based. A missing song is an error; a stored song whose
    /// lyrics hold no sections on the requested page yields an empty page,
    /// so callers can tell "song not found" from "found, but nothing here".
    pub async fn get_song_text(
        &self,
        id: &SongId,
        page: u32,
        page_size: u32,
    ) -> Result<SectionPage> {
        let lyrics = self
            .repository
            .find_lyrics(id)
            .await?
            .ok_or_else(|| ServiceError::SongNotFound { id: id.to_string() })?;

        let sections = core_lyrics::split(&lyrics);
        debug!(song_id = %id, sections = sections.len(), "Split lyrics into sections");

        let window = core_lyrics::page(&sections, page, page_size)?;
        info!(
            song_id = %id,
            page,
            page_size,
            returned = window.items.len(),
            "Served lyrics page"
        );
        Ok(window)
    }

    /// Add a song, populating its details from the external metadata API.
    pub async fn add_song(&self, group: &str, title: &str) -> Result<Song> {
        if group.trim().is_empty() {
            return Err(ServiceError::InvalidArgument(
                "group must not be empty".to_string(),
            ));
        }
        if title.trim().is_empty() {
            return Err(ServiceError::InvalidArgument(
                "song title must not be empty".to_string(),
            ));
        }

        let details = self.provider.fetch(group, title).await?.ok_or_else(|| {
            ServiceError::DetailsNotFound {
                group: group.to_string(),
                title: title.to_string(),
            }
        })?;

        let release_date = details.parsed_release_date();
        if release_date.is_none() {
            if let Some(raw) = &details.release_date {
                warn!(group, title, raw = %raw, "Unparseable release date from API");
            }
        }

        let group_id = self.repository.ensure_group(group).await?;

        let mut song = Song::new(group_id, group, title);
        song.release_date = release_date;
        song.lyrics = details.text;
        song.link = details.link;
        song.validate().map_err(ServiceError::InvalidArgument)?;

        self.repository.insert(&song).await?;
        info!(song_id = %song.id, group, title, "Song added");
        Ok(song)
    }

    /// Apply a partial update to a song.
    pub async fn update_song(&self, id: &SongId, changes: &SongUpdate) -> Result<()> {
        if changes.is_empty() {
            return Err(ServiceError::InvalidArgument(
                "update touches no fields".to_string(),
            ));
        }

        match self.repository.update(id, changes).await {
            Ok(()) => {
                info!(song_id = %id, "Song updated");
                Ok(())
            }
            Err(core_library::LibraryError::NotFound { .. }) => {
                Err(ServiceError::SongNotFound { id: id.to_string() })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Delete a song.
    pub async fn delete_song(&self, id: &SongId) -> Result<()> {
        if self.repository.delete(id).await? {
            info!(song_id = %id, "Song deleted");
            Ok(())
        } else {
            Err(ServiceError::SongNotFound { id: id.to_string() })
        }
    }
}
