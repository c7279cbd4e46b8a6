//! Song repository trait and sharded SQLite implementation

use crate::error::{LibraryError, Result};
use crate::models::{Song, SongId};
use crate::query::{SongFilter, SongUpdate};
use crate::repositories::{Page, PageRequest};
use sqlx::SqlitePool;
use tracing::debug;

/// Number of shard tables the song set is partitioned across.
///
/// Must match the `songs_N` tables created by the migrations.
pub const SHARD_COUNT: u32 = 4;

/// Song repository interface for data access operations
#[async_trait::async_trait]
pub trait SongRepository: Send + Sync {
    /// Find a song by id, searching every shard.
    async fn find_by_id(&self, id: &SongId) -> Result<Option<Song>>;

    /// Fetch only the stored lyrics for a song.
    ///
    /// # Returns
    /// - `Ok(Some(text))` if the song exists (text may be empty when no
    ///   lyrics are stored)
    /// - `Ok(None)` if no song with this id exists in any shard
    async fn find_lyrics(&self, id: &SongId) -> Result<Option<String>>;

    /// Insert a new song into the shard its group maps to.
    async fn insert(&self, song: &Song) -> Result<()>;

    /// Apply a partial update to a song.
    ///
    /// # Errors
    /// - `InvalidInput` if the update touches no columns
    /// - `NotFound` if no shard holds a song with this id
    async fn update(&self, id: &SongId, changes: &SongUpdate) -> Result<()>;

    /// Delete a song by id.
    ///
    /// # Returns
    /// - `Ok(true)` if a row was deleted
    /// - `Ok(false)` if the song was not found
    async fn delete(&self, id: &SongId) -> Result<bool>;

    /// List songs matching a filter, paginated.
    ///
    /// Results from every shard are concatenated in shard order before the
    /// page window is applied.
    async fn query(&self, filter: &SongFilter, page_request: PageRequest) -> Result<Page<Song>>;

    /// Get the id of the named group, creating it if absent.
    async fn ensure_group(&self, name: &str) -> Result<i64>;
}

/// Sharded SQLite implementation of [`SongRepository`].
///
/// Songs live in a fixed set of partition tables `songs_0..songs_3`. Inserts
/// route by group id; id-addressed operations probe each shard in turn.
pub struct SqliteSongRepository {
    pool: SqlitePool,
}

impl SqliteSongRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Shard a group's songs land in. Deterministic, otherwise arbitrary.
    fn shard_for(group_id: i64) -> u32 {
        (group_id.unsigned_abs() % u64::from(SHARD_COUNT)) as u32
    }

    /// Build the WHERE clause for a filter. Column names come from a fixed
    /// set here; only values travel as bind parameters.
    fn filter_clause(filter: &SongFilter) -> String {
        let mut conditions: Vec<&str> = Vec::new();
        if filter.group.is_some() {
            conditions.push("group_name LIKE ?");
        }
        if filter.title.is_some() {
            conditions.push("title LIKE ?");
        }
        if filter.release_date.is_some() {
            conditions.push("release_date = ?");
        }
        if filter.lyrics.is_some() {
            conditions.push("lyrics LIKE ?");
        }
        if filter.link.is_some() {
            conditions.push("link LIKE ?");
        }

        if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        }
    }

    fn like(value: &str) -> String {
        format!("%{value}%")
    }
}

#[async_trait::async_trait]
impl SongRepository for SqliteSongRepository {
    async fn find_by_id(&self, id: &SongId) -> Result<Option<Song>> {
        for shard in 0..SHARD_COUNT {
            let sql = format!("SELECT * FROM songs_{shard} WHERE id = ?");
            let song = sqlx::query_as::<_, Song>(&sql)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
            if song.is_some() {
                return Ok(song);
            }
        }
        Ok(None)
    }

    async fn find_lyrics(&self, id: &SongId) -> Result<Option<String>> {
        for shard in 0..SHARD_COUNT {
            let sql = format!("SELECT lyrics FROM songs_{shard} WHERE id = ?");
            let row: Option<(Option<String>,)> = sqlx::query_as(&sql)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
            if let Some((lyrics,)) = row {
                return Ok(Some(lyrics.unwrap_or_default()));
            }
        }
        Ok(None)
    }

    async fn insert(&self, song: &Song) -> Result<()> {
        song.validate().map_err(|e| LibraryError::InvalidInput {
            field: "Song".to_string(),
            message: e,
        })?;

        let shard = Self::shard_for(song.group_id);
        debug!(song_id = %song.id, shard, "Inserting song");

        let sql = format!(
            "INSERT INTO songs_{shard} \
             (id, group_id, group_name, title, release_date, lyrics, link, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"
        );
        sqlx::query(&sql)
            .bind(&song.id)
            .bind(song.group_id)
            .bind(&song.group_name)
            .bind(&song.title)
            .bind(song.release_date)
            .bind(&song.lyrics)
            .bind(&song.link)
            .bind(song.created_at)
            .bind(song.updated_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn update(&self, id: &SongId, changes: &SongUpdate) -> Result<()> {
        if changes.is_empty() {
            return Err(LibraryError::InvalidInput {
                field: "SongUpdate".to_string(),
                message: "update touches no columns".to_string(),
            });
        }

        let mut sets: Vec<&str> = Vec::new();
        if changes.group_name.is_some() {
            sets.push("group_name = ?");
        }
        if changes.title.is_some() {
            sets.push("title = ?");
        }
        if changes.release_date.is_some() {
            sets.push("release_date = ?");
        }
        if changes.lyrics.is_some() {
            sets.push("lyrics = ?");
        }
        if changes.link.is_some() {
            sets.push("link = ?");
        }
        sets.push("updated_at = ?");

        let now = chrono::Utc::now().timestamp();

        for shard in 0..SHARD_COUNT {
            let sql = format!("UPDATE songs_{shard} SET {} WHERE id = ?", sets.join(", "));
            let mut query = sqlx::query(&sql);
            if let Some(v) = &changes.group_name {
                query = query.bind(v);
            }
            if let Some(v) = &changes.title {
                query = query.bind(v);
            }
            if let Some(v) = changes.release_date {
                query = query.bind(v);
            }
            if let Some(v) = &changes.lyrics {
                query = query.bind(v);
            }
            if let Some(v) = &changes.link {
                query = query.bind(v);
            }
            let result = query.bind(now).bind(id).execute(&self.pool).await?;

            if result.rows_affected() > 0 {
                debug!(song_id = %id, shard, "Song updated");
                return Ok(());
            }
        }

        Err(LibraryError::NotFound {
            entity_type: "Song".to_string(),
            id: id.to_string(),
        })
    }

    async fn delete(&self, id: &SongId) -> Result<bool> {
        for shard in 0..SHARD_COUNT {
            let sql = format!("DELETE FROM songs_{shard} WHERE id = ?");
            let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
            if result.rows_affected() > 0 {
                debug!(song_id = %id, shard, "Song deleted");
                return Ok(true);
            }
        }
        Ok(false)
    }

    async fn query(&self, filter: &SongFilter, page_request: PageRequest) -> Result<Page<Song>> {
        let clause = Self::filter_clause(filter);
        let mut matched: Vec<Song> = Vec::new();

        for shard in 0..SHARD_COUNT {
            let sql = format!("SELECT * FROM songs_{shard}{clause} ORDER BY created_at, id");
            let mut query = sqlx::query_as::<_, Song>(&sql);
            if let Some(v) = &filter.group {
                query = query.bind(Self::like(v));
            }
            if let Some(v) = &filter.title {
                query = query.bind(Self::like(v));
            }
            if let Some(v) = filter.release_date {
                query = query.bind(v);
            }
            if let Some(v) = &filter.lyrics {
                query = query.bind(Self::like(v));
            }
            if let Some(v) = &filter.link {
                query = query.bind(Self::like(v));
            }
            matched.extend(query.fetch_all(&self.pool).await?);
        }

        let total = matched.len() as u64;
        let start = (page_request.offset() as usize).min(matched.len());
        let end = (start + page_request.limit() as usize).min(matched.len());
        let items = matched[start..end].to_vec();

        debug!(
            total,
            returned = items.len(),
            page = page_request.page,
            "Song query completed"
        );
        Ok(Page::new(items, total, page_request))
    }

    async fn ensure_group(&self, name: &str) -> Result<i64> {
        sqlx::query("INSERT OR IGNORE INTO groups (name) VALUES (?)")
            .bind(name)
            .execute(&self.pool)
            .await?;

        let (id,): (i64,) = sqlx::query_as("SELECT id FROM groups WHERE name = ?")
            .bind(name)
            .fetch_one(&self.pool)
            .await?;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_test_pool;

    async fn setup() -> SqliteSongRepository {
        let pool = create_test_pool().await.unwrap();
        SqliteSongRepository::new(pool)
    }

    async fn insert_song(
        repo: &SqliteSongRepository,
        group: &str,
        title: &str,
        lyrics: Option<&str>,
    ) -> Song {
        let group_id = repo.ensure_group(group).await.unwrap();
        let mut song = Song::new(group_id, group, title);
        song.lyrics = lyrics.map(str::to_string);
        repo.insert(&song).await.unwrap();
        song
    }

    #[tokio::test]
    async fn test_insert_and_find_by_id() {
        let repo = setup().await;
        let song = insert_song(&repo, "Muse", "Supermassive Black Hole", None).await;

        let found = repo.find_by_id(&song.id).await.unwrap().unwrap();
        assert_eq!(found, song);
    }

    #[tokio::test]
    async fn test_find_by_id_missing() {
        let repo = setup().await;
        let found = repo.find_by_id(&SongId::new()).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_insert_rejects_invalid_song() {
        let repo = setup().await;
        let group_id = repo.ensure_group("Muse").await.unwrap();
        let song = Song::new(group_id, "Muse", "   ");
        let result = repo.insert(&song).await;
        assert!(matches!(result, Err(LibraryError::InvalidInput { .. })));
    }

    #[tokio::test]
    async fn test_find_lyrics_distinguishes_missing_song_from_missing_text() {
        let repo = setup().await;
        let with = insert_song(&repo, "Muse", "Uprising", Some("Verse 1:\nParanoia")).await;
        let without = insert_song(&repo, "Muse", "Instrumental", None).await;

        assert_eq!(
            repo.find_lyrics(&with.id).await.unwrap().as_deref(),
            Some("Verse 1:\nParanoia")
        );
        // Song exists with no stored lyrics: Some(""), not None.
        assert_eq!(
            repo.find_lyrics(&without.id).await.unwrap().as_deref(),
            Some("")
        );
        assert!(repo.find_lyrics(&SongId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_song() {
        let repo = setup().await;
        let song = insert_song(&repo, "Muse", "Uprising", None).await;

        let changes = SongUpdate {
            link: Some("https://example.com/uprising".to_string()),
            lyrics: Some("They will not force us".to_string()),
            ..Default::default()
        };
        repo.update(&song.id, &changes).await.unwrap();

        let found = repo.find_by_id(&song.id).await.unwrap().unwrap();
        assert_eq!(found.link.as_deref(), Some("https://example.com/uprising"));
        assert_eq!(found.lyrics.as_deref(), Some("They will not force us"));
        assert_eq!(found.title, "Uprising");
    }

    #[tokio::test]
    async fn test_update_missing_song_is_not_found() {
        let repo = setup().await;
        let changes = SongUpdate {
            title: Some("Renamed".to_string()),
            ..Default::default()
        };
        let result = repo.update(&SongId::new(), &changes).await;
        assert!(matches!(result, Err(LibraryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_empty_update_is_invalid() {
        let repo = setup().await;
        let result = repo.update(&SongId::new(), &SongUpdate::default()).await;
        assert!(matches!(result, Err(LibraryError::InvalidInput { .. })));
    }

    #[tokio::test]
    async fn test_delete_song() {
        let repo = setup().await;
        let song = insert_song(&repo, "Muse", "Uprising", None).await;

        assert!(repo.delete(&song.id).await.unwrap());
        assert!(!repo.delete(&song.id).await.unwrap());
        assert!(repo.find_by_id(&song.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_query_filters_by_group_and_title() {
        let repo = setup().await;
        insert_song(&repo, "Muse", "Supermassive Black Hole", None).await;
        insert_song(&repo, "Muse", "Uprising", None).await;
        insert_song(&repo, "Radiohead", "Creep", None).await;

        let filter = SongFilter {
            group: Some("mus".to_string()),
            ..Default::default()
        };
        let page = repo.query(&filter, PageRequest::default()).await.unwrap();
        assert_eq!(page.total, 2);

        let filter = SongFilter {
            group: Some("Muse".to_string()),
            title: Some("black".to_string()),
            ..Default::default()
        };
        let page = repo.query(&filter, PageRequest::default()).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].title, "Supermassive Black Hole");
    }

    #[tokio::test]
    async fn test_query_binds_every_filter_column_in_order() {
        let repo = setup().await;
        let group_id = repo.ensure_group("Muse").await.unwrap();

        let mut uprising = Song::new(group_id, "Muse", "Uprising");
        uprising.release_date = chrono::NaiveDate::from_ymd_opt(2009, 9, 14);
        uprising.lyrics = Some("Paranoia is in bloom".to_string());
        uprising.link = Some("https://example.com/uprising".to_string());
        repo.insert(&uprising).await.unwrap();

        let mut starlight = Song::new(group_id, "Muse", "Starlight");
        starlight.release_date = chrono::NaiveDate::from_ymd_opt(2006, 9, 4);
        starlight.lyrics = Some("Far away".to_string());
        starlight.link = Some("https://example.com/starlight".to_string());
        repo.insert(&starlight).await.unwrap();

        // Every filterable column at once; each bound value must land on its
        // own column for exactly one song to match.
        let filter = SongFilter {
            group: Some("muse".to_string()),
            title: Some("upri".to_string()),
            release_date: chrono::NaiveDate::from_ymd_opt(2009, 9, 14),
            lyrics: Some("paranoia".to_string()),
            link: Some("example.com/uprising".to_string()),
        };
        let page = repo.query(&filter, PageRequest::default()).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].title, "Uprising");

        // The release date matches exactly, not as a substring.
        let filter = SongFilter {
            release_date: chrono::NaiveDate::from_ymd_opt(2009, 9, 15),
            ..Default::default()
        };
        let page = repo.query(&filter, PageRequest::default()).await.unwrap();
        assert_eq!(page.total, 0);
    }

    #[tokio::test]
    async fn test_update_release_date() {
        let repo = setup().await;
        let song = insert_song(&repo, "Muse", "Uprising", None).await;

        let changes = SongUpdate {
            release_date: chrono::NaiveDate::from_ymd_opt(2009, 9, 14),
            ..Default::default()
        };
        repo.update(&song.id, &changes).await.unwrap();

        let found = repo.find_by_id(&song.id).await.unwrap().unwrap();
        assert_eq!(
            found.release_date,
            chrono::NaiveDate::from_ymd_opt(2009, 9, 14)
        );
        assert_eq!(found.title, "Uprising");
    }

    #[tokio::test]
    async fn test_query_spans_shards() {
        let repo = setup().await;
        // Distinct groups land in distinct shards; an unfiltered query must
        // still see every song.
        for i in 0..8 {
            insert_song(&repo, &format!("Group {i}"), &format!("Song {i}"), None).await;
        }

        let page = repo
            .query(&SongFilter::default(), PageRequest::new(0, 50))
            .await
            .unwrap();
        assert_eq!(page.total, 8);
        assert_eq!(page.items.len(), 8);
    }

    #[tokio::test]
    async fn test_query_pagination_window() {
        let repo = setup().await;
        for i in 0..5 {
            insert_song(&repo, "Muse", &format!("Song {i}"), None).await;
        }

        let first = repo
            .query(&SongFilter::default(), PageRequest::new(0, 2))
            .await
            .unwrap();
        assert_eq!(first.items.len(), 2);
        assert_eq!(first.total, 5);
        assert_eq!(first.total_pages, 3);
        assert!(first.has_next());

        let last = repo
            .query(&SongFilter::default(), PageRequest::new(2, 2))
            .await
            .unwrap();
        assert_eq!(last.items.len(), 1);
        assert!(!last.has_next());

        let past_end = repo
            .query(&SongFilter::default(), PageRequest::new(9, 2))
            .await
            .unwrap();
        assert!(past_end.items.is_empty());
        assert_eq!(past_end.total, 5);
    }

    #[tokio::test]
    async fn test_ensure_group_is_idempotent() {
        let repo = setup().await;
        let first = repo.ensure_group("Muse").await.unwrap();
        let second = repo.ensure_group("Muse").await.unwrap();
        let other = repo.ensure_group("Radiohead").await.unwrap();

        assert_eq!(first, second);
        assert_ne!(first, other);
    }
}
