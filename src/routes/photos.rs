use axum::{
    extract::{Multipart, State},
    routing::post,
    Json, Router,
};
use chrono::NaiveDate;
use tracing::{info, warn};

use crate::auth::{AppState, CurrentUser};
use crate::constants::PHOTO_CONTENT_TYPE;
use crate::database::{execute_query, fetch_all, fetch_one, queries, DbConn};
use crate::error::{AppError, AppResult};
use crate::models::{
    DeletePhotoResponse, PhotoDeleteRequest, PhotoEntry, PhotoGetRequest, PhotoKind,
    PhotoListResponse,
};
use crate::processor::images::normalize_photo_blocking;
use crate::storage::catalog::{download_url, forget_object, record_object};
use crate::storage::StorageError;
use crate::utils::datetime::{format_date, now_rfc3339, parse_date, today};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/photos/upload", post(upload_photo))
        .route("/photos/get", post(get_photo))
        .route("/photos/list", post(list_photos))
        .route("/photos/delete", post(delete_photo))
}

pub(crate) fn require_date(value: &str) -> AppResult<NaiveDate> {
    parse_date(value.trim()).ok_or_else(|| {
        AppError::Validation(format!("Invalid date {:?}, expected YYYY-MM-DD", value))
    })
}

fn photo_url(public_url: &str, key: Option<String>, token: Option<String>) -> Option<String> {
    match (key, token) {
        (Some(key), Some(token)) => Some(download_url(public_url, &key, &token)),
        _ => None,
    }
}

fn map_entry_row(row: &rusqlite::Row, public_url: &str) -> rusqlite::Result<PhotoEntry> {
    Ok(PhotoEntry {
        date: row.get(0)?,
        uploaded_at: row.get(1)?,
        front_photo_url: photo_url(public_url, row.get(2)?, row.get(3)?),
        back_photo_url: photo_url(public_url, row.get(4)?, row.get(5)?),
    })
}

/// All entries for `user_id`, newest first.
pub(crate) fn load_entries(
    conn: &DbConn,
    user_id: &str,
    public_url: &str,
) -> AppResult<Vec<PhotoEntry>> {
    fetch_all(conn, queries::entries::SELECT_ALL_FOR_USER, &[&user_id], |row| {
        map_entry_row(row, public_url)
    })
}

pub(crate) fn load_entry(
    conn: &DbConn,
    user_id: &str,
    date: &str,
    public_url: &str,
) -> AppResult<Option<PhotoEntry>> {
    fetch_one(
        conn,
        queries::entries::SELECT_BY_DATE,
        &[&user_id, &date],
        |row| map_entry_row(row, public_url),
    )
}

async fn upload_photo(
    State(state): State<AppState>,
    current_user: CurrentUser,
    mut multipart: Multipart,
) -> AppResult<Json<PhotoEntry>> {
    let mut date_field: Option<String> = None;
    let mut kind_field: Option<String> = None;
    let mut file: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "date" => date_field = Some(field.text().await?),
            "kind" | "type" => kind_field = Some(field.text().await?),
            "file" => file = Some(field.bytes().await?.to_vec()),
            _ => {}
        }
    }

    let kind = kind_field
        .as_deref()
        .map(str::trim)
        .ok_or_else(|| AppError::Validation("Missing photo kind".to_string()))
        .and_then(|value| {
            PhotoKind::parse(value).ok_or_else(|| {
                AppError::Validation(format!("Unknown photo kind {:?}", value))
            })
        })?;

    let file = file
        .filter(|bytes| !bytes.is_empty())
        .ok_or_else(|| AppError::Validation("Missing photo file".to_string()))?;

    let date = match date_field.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => require_date(value)?,
        _ => today(),
    };
    if date > today() {
        return Err(AppError::Validation(
            "Cannot upload photos for future dates".to_string(),
        ));
    }
    let date = format_date(date);

    let jpeg = normalize_photo_blocking(
        file,
        state.config.photos.max_dimension,
        state.config.photos.jpeg_quality,
    )
    .await?;

    let key = kind.object_key(&current_user.id, &date);
    state.store.put(&key, &jpeg).await?;

    let conn = state.pool.get().map_err(AppError::Pool)?;
    record_object(&conn, &key, PHOTO_CONTENT_TYPE, &jpeg)?;

    let upsert = match kind {
        PhotoKind::Front => queries::entries::UPSERT_FRONT,
        PhotoKind::Back => queries::entries::UPSERT_BACK,
    };
    execute_query(
        &conn,
        upsert,
        &[&current_user.id, &date, &key, &now_rfc3339()],
    )?;

    info!(
        "Stored {} photo for {} ({} bytes)",
        kind.as_str(),
        date,
        jpeg.len()
    );

    let entry = load_entry(
        &conn,
        &current_user.id,
        &date,
        &state.config.server.public_url,
    )?
    .ok_or_else(|| AppError::Internal(format!("Entry for {} vanished after upload", date)))?;

    Ok(Json(entry))
}

async fn get_photo(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(request): Json<PhotoGetRequest>,
) -> AppResult<Json<PhotoEntry>> {
    let date = format_date(require_date(&request.date)?);
    let conn = state.pool.get().map_err(AppError::Pool)?;

    let entry = load_entry(
        &conn,
        &current_user.id,
        &date,
        &state.config.server.public_url,
    )?
    .ok_or_else(|| AppError::NotFound(format!("No photos for {}", date)))?;

    Ok(Json(entry))
}

async fn list_photos(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<PhotoListResponse>> {
    let conn = state.pool.get().map_err(AppError::Pool)?;
    let entries = load_entries(&conn, &current_user.id, &state.config.server.public_url)?;

    Ok(Json(PhotoListResponse { entries }))
}

async fn delete_photo(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(request): Json<PhotoDeleteRequest>,
) -> AppResult<Json<DeletePhotoResponse>> {
    let date = format_date(require_date(&request.date)?);

    let removed_keys = {
        let conn = state.pool.get().map_err(AppError::Pool)?;

        let (front_key, back_key) = fetch_one(
            &conn,
            queries::entries::SELECT_KEYS,
            &[&current_user.id, &date],
            |row| Ok((row.get::<_, Option<String>>(0)?, row.get::<_, Option<String>>(1)?)),
        )?
        .ok_or_else(|| AppError::NotFound(format!("No photos for {}", date)))?;

        let keys: Vec<String> = match request.kind {
            Some(PhotoKind::Front) => front_key.into_iter().collect(),
            Some(PhotoKind::Back) => back_key.into_iter().collect(),
            None => front_key.into_iter().chain(back_key).collect(),
        };

        if let (Some(kind), true) = (request.kind, keys.is_empty()) {
            return Err(AppError::NotFound(format!(
                "No {} photo for {}",
                kind.as_str(),
                date
            )));
        }

        for key in &keys {
            forget_object(&conn, key)?;
        }

        let cleanup = match request.kind {
            Some(_) => queries::entries::DELETE_IF_EMPTY,
            None => queries::entries::DELETE,
        };
        execute_query(&conn, cleanup, &[&current_user.id, &date])?;

        keys
    };

    for key in &removed_keys {
        match state.store.delete(key).await {
            Ok(()) | Err(StorageError::NotFound(_)) => {}
            Err(e) => warn!("Failed to delete object {}: {}", key, e),
        }
    }

    let message = match request.kind {
        Some(kind) => format!("{} photo for {} deleted", kind.label(), date),
        None => format!("Photos for {} deleted", date),
    };

    Ok(Json(DeletePhotoResponse { message }))
}
