use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{auth::filter::AuthUser, error::ApiError, state::AppState};

use super::dto::{SearchQuery, SongPayload};
use super::repo::Song;

/// Catalog browsing and search; no identity required.
pub fn read_router() -> Router<AppState> {
    Router::new()
        .route("/songs", get(list_songs))
        .route("/songs/:id", get(get_song))
        .route("/songs/search/title", get(search_by_title))
        .route("/songs/search/artist", get(search_by_artist))
        .route("/songs/search/genre", get(search_by_genre))
}

/// Catalog mutations; every route demands an authenticated user.
pub fn write_router() -> Router<AppState> {
    Router::new()
        .route("/songs", post(create_song))
        .route("/songs/:id", put(update_song))
        .route("/songs/:id", delete(delete_song))
}

#[instrument(skip(state))]
pub async fn list_songs(State(state): State<AppState>) -> Result<Json<Vec<Song>>, ApiError> {
    Ok(Json(Song::list(&state.db).await?))
}

#[instrument(skip(state))]
pub async fn get_song(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Song>, ApiError> {
    let song = Song::get(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Song not found".into()))?;
    Ok(Json(song))
}

#[instrument(skip(state, current, payload))]
pub async fn create_song(
    State(state): State<AppState>,
    AuthUser(current): AuthUser,
    Json(payload): Json<SongPayload>,
) -> Result<(StatusCode, Json<Song>), ApiError> {
    let song = Song::create(&state.db, &payload).await?;
    info!(song_id = %song.id, user_id = %current.user.id, "song created");
    Ok((StatusCode::CREATED, Json(song)))
}

#[instrument(skip(state, current, payload))]
pub async fn update_song(
    State(state): State<AppState>,
    AuthUser(current): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<SongPayload>,
) -> Result<Json<Song>, ApiError> {
    let song = Song::update(&state.db, id, &payload)
        .await?
        .ok_or_else(|| ApiError::NotFound("Song not found".into()))?;
    info!(song_id = %song.id, user_id = %current.user.id, "song updated");
    Ok(Json(song))
}

#[instrument(skip(state, current))]
pub async fn delete_song(
    State(state): State<AppState>,
    AuthUser(current): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if !Song::delete(&state.db, id).await? {
        return Err(ApiError::NotFound("Song not found".into()));
    }
    info!(song_id = %id, user_id = %current.user.id, "song deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
pub async fn search_by_title(
    State(state): State<AppState>,
    Query(p): Query<SearchQuery>,
) -> Result<Json<Vec<Song>>, ApiError> {
    Ok(Json(Song::search_by_title(&state.db, &p.query).await?))
}

#[instrument(skip(state))]
pub async fn search_by_artist(
    State(state): State<AppState>,
    Query(p): Query<SearchQuery>,
) -> Result<Json<Vec<Song>>, ApiError> {
    Ok(Json(Song::search_by_artist(&state.db, &p.query).await?))
}

#[instrument(skip(state))]
pub async fn search_by_genre(
    State(state): State<AppState>,
    Query(p): Query<SearchQuery>,
) -> Result<Json<Vec<Song>>, ApiError> {
    Ok(Json(Song::search_by_genre(&state.db, &p.query).await?))
}
