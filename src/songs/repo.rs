use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::dto::SongPayload;

/// Catalog item in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub id: Uuid,
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    pub image_url: Option<String>,
    pub file_url: Option<String>,
    pub genre: Option<String>,
    pub duration: Option<i32>,
    pub release_year: Option<i32>,
}

const SONG_COLUMNS: &str =
    "id, title, artist, album, image_url, file_url, genre, duration, release_year";

impl Song {
    pub async fn list(db: &PgPool) -> anyhow::Result<Vec<Song>> {
        let rows = sqlx::query_as::<_, Song>(&format!(
            "SELECT {SONG_COLUMNS} FROM songs ORDER BY title"
        ))
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn get(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Song>> {
        let song = sqlx::query_as::<_, Song>(&format!(
            "SELECT {SONG_COLUMNS} FROM songs WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(song)
    }

    pub async fn create(db: &PgPool, payload: &SongPayload) -> anyhow::Result<Song> {
        let song = sqlx::query_as::<_, Song>(&format!(
            "INSERT INTO songs (title, artist, album, image_url, file_url, genre, duration, release_year)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {SONG_COLUMNS}"
        ))
        .bind(&payload.title)
        .bind(&payload.artist)
        .bind(&payload.album)
        .bind(&payload.image_url)
        .bind(&payload.file_url)
        .bind(&payload.genre)
        .bind(payload.duration)
        .bind(payload.release_year)
        .fetch_one(db)
        .await?;
        Ok(song)
    }

    /// Full replace; returns None when the id does not exist.
    pub async fn update(db: &PgPool, id: Uuid, payload: &SongPayload) -> anyhow::Result<Option<Song>> {
        let song = sqlx::query_as::<_, Song>(&format!(
            "UPDATE songs
             SET title = $2, artist = $3, album = $4, image_url = $5,
                 file_url = $6, genre = $7, duration = $8, release_year = $9
             WHERE id = $1
             RETURNING {SONG_COLUMNS}"
        ))
        .bind(id)
        .bind(&payload.title)
        .bind(&payload.artist)
        .bind(&payload.album)
        .bind(&payload.image_url)
        .bind(&payload.file_url)
        .bind(&payload.genre)
        .bind(payload.duration)
        .bind(payload.release_year)
        .fetch_optional(db)
        .await?;
        Ok(song)
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM songs WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn search_by(db: &PgPool, column: &str, query: &str) -> anyhow::Result<Vec<Song>> {
        let rows = sqlx::query_as::<_, Song>(&format!(
            "SELECT {SONG_COLUMNS} FROM songs WHERE {column} ILIKE $1 ORDER BY title"
        ))
        .bind(format!("%{}%", query))
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn search_by_title(db: &PgPool, query: &str) -> anyhow::Result<Vec<Song>> {
        Self::search_by(db, "title", query).await
    }

    pub async fn search_by_artist(db: &PgPool, query: &str) -> anyhow::Result<Vec<Song>> {
        Self::search_by(db, "artist", query).await
    }

    pub async fn search_by_genre(db: &PgPool, query: &str) -> anyhow::Result<Vec<Song>> {
        Self::search_by(db, "genre", query).await
    }
}
