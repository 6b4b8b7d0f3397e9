use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::auth::AppState;
use crate::database::DbConn;
use crate::error::{AppError, AppResult};
use crate::models::{
    CompareResponse, HeatmapResponse, PhotoKind, PublicShareEntry, PublicShareResponse,
};
use crate::routes::compare::comparison_for;
use crate::routes::heatmap::heatmap_for;
use crate::routes::photos::load_entries;
use crate::routes::share::{find_link_by_token, ShareLink};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/public/share/:token", get(get_shared_content))
        .route("/public/share/:token/heatmap", get(get_shared_heatmap))
        .route("/public/share/:token/compare", get(get_shared_comparison))
}

#[derive(Deserialize)]
struct YearQuery {
    year: Option<i32>,
}

#[derive(Deserialize)]
struct CompareQuery {
    view: Option<String>,
    before: Option<String>,
    after: Option<String>,
}

fn resolve_share(conn: &DbConn, token: &str) -> AppResult<ShareLink> {
    let link = find_link_by_token(conn, token)?
        .ok_or_else(|| AppError::NotFound("Share link not found".to_string()))?;

    if !link.is_active {
        return Err(AppError::Authorization(
            "This share link has been revoked".to_string(),
        ));
    }

    Ok(link)
}

async fn get_shared_content(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> AppResult<Json<PublicShareResponse>> {
    let conn = state.pool.get().map_err(AppError::Pool)?;
    let link = resolve_share(&conn, &token)?;
    let permissions = link.permissions;

    if !permissions.show_graph && !permissions.show_photos {
        return Ok(Json(PublicShareResponse {
            permissions,
            entries: Vec::new(),
        }));
    }

    let entries = load_entries(&conn, &link.user_id, &state.config.server.public_url)?
        .into_iter()
        .map(|entry| {
            let (front_photo_url, back_photo_url) = if permissions.show_photos {
                (entry.front_photo_url, entry.back_photo_url)
            } else {
                (None, None)
            };
            PublicShareEntry {
                date: entry.date,
                front_photo_url,
                back_photo_url,
            }
        })
        .collect();

    Ok(Json(PublicShareResponse {
        permissions,
        entries,
    }))
}

async fn get_shared_heatmap(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Query(query): Query<YearQuery>,
) -> AppResult<Json<HeatmapResponse>> {
    let conn = state.pool.get().map_err(AppError::Pool)?;
    let link = resolve_share(&conn, &token)?;

    if !link.permissions.show_graph {
        return Err(AppError::Authorization(
            "This share link does not include the progress graph".to_string(),
        ));
    }

    let entries = load_entries(&conn, &link.user_id, &state.config.server.public_url)?;
    Ok(Json(heatmap_for(&entries, query.year, false)?))
}

async fn get_shared_comparison(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Query(query): Query<CompareQuery>,
) -> AppResult<Json<CompareResponse>> {
    let view = match query.view.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
        Some(value) => Some(PhotoKind::parse(value).ok_or_else(|| {
            AppError::Validation(format!("Unknown photo kind {:?}", value))
        })?),
        None => None,
    };

    let conn = state.pool.get().map_err(AppError::Pool)?;
    let link = resolve_share(&conn, &token)?;

    if !(link.permissions.show_compare && link.permissions.show_photos) {
        return Err(AppError::Authorization(
            "This share link does not include photo comparison".to_string(),
        ));
    }

    let entries = load_entries(&conn, &link.user_id, &state.config.server.public_url)?;
    Ok(Json(comparison_for(
        &entries,
        view,
        query.before.as_deref(),
        query.after.as_deref(),
    )?))
}
