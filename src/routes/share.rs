use axum::{extract::State, routing::post, Json, Router};
use tracing::info;

use crate::auth::{AppState, CurrentUser};
use crate::config::Config;
use crate::database::{execute_query, fetch_one, queries, DbConn};
use crate::error::{AppError, AppResult};
use crate::models::{ShareLinkResponse, SharePermissions, ShareUpdateRequest};
use crate::utils::datetime::now_rfc3339;
use crate::utils::tokens::random_token;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/share/get", post(get_share_link))
        .route("/share/update", post(update_share_link))
        .route("/share/regenerate", post(regenerate_share_link))
}

/// A stored share link, including its owner.
#[derive(Debug, Clone)]
pub(crate) struct ShareLink {
    pub token: String,
    pub user_id: String,
    pub created_at: String,
    pub permissions: SharePermissions,
    pub is_active: bool,
}

impl From<ShareLink> for ShareLinkResponse {
    fn from(link: ShareLink) -> Self {
        ShareLinkResponse {
            token: link.token,
            created_at: link.created_at,
            permissions: link.permissions,
            is_active: link.is_active,
        }
    }
}

fn map_share_row(row: &rusqlite::Row) -> rusqlite::Result<ShareLink> {
    Ok(ShareLink {
        token: row.get(0)?,
        user_id: row.get(1)?,
        created_at: row.get(2)?,
        permissions: SharePermissions {
            show_graph: row.get(3)?,
            show_photos: row.get(4)?,
            show_compare: row.get(5)?,
        },
        is_active: row.get(6)?,
    })
}

pub(crate) fn find_link_for_user(conn: &DbConn, user_id: &str) -> AppResult<Option<ShareLink>> {
    fetch_one(conn, queries::share_links::SELECT_BY_USER, &[&user_id], map_share_row)
}

pub(crate) fn find_link_by_token(conn: &DbConn, token: &str) -> AppResult<Option<ShareLink>> {
    fetch_one(conn, queries::share_links::SELECT_BY_TOKEN, &[&token], map_share_row)
}

/// Insert a default link unless the user already has one, then return the stored link.
fn create_link(conn: &DbConn, user_id: &str, config: &Config) -> AppResult<ShareLink> {
    let permissions = SharePermissions::default();

    let inserted = execute_query(
        conn,
        queries::share_links::INSERT,
        &[
            &random_token(config.share.token_length),
            &user_id,
            &now_rfc3339(),
            &permissions.show_graph,
            &permissions.show_photos,
            &permissions.show_compare,
        ],
    )?;
    if inserted > 0 {
        info!("Created share link for {}", user_id);
    }

    find_link_for_user(conn, user_id)?
        .ok_or_else(|| AppError::Internal(format!("Share link for {} missing after insert", user_id)))
}

async fn get_share_link(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<ShareLinkResponse>> {
    let conn = state.pool.get().map_err(AppError::Pool)?;

    let link = match find_link_for_user(&conn, &current_user.id)? {
        Some(link) => link,
        None => create_link(&conn, &current_user.id, &state.config)?,
    };

    Ok(Json(link.into()))
}

async fn update_share_link(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(request): Json<ShareUpdateRequest>,
) -> AppResult<Json<ShareLinkResponse>> {
    let conn = state.pool.get().map_err(AppError::Pool)?;

    if find_link_for_user(&conn, &current_user.id)?.is_none() {
        return Err(AppError::NotFound("Share link not found".to_string()));
    }

    if let Some(permissions) = request.permissions {
        execute_query(
            &conn,
            queries::share_links::UPDATE_PERMISSIONS,
            &[
                &permissions.show_graph,
                &permissions.show_photos,
                &permissions.show_compare,
                &current_user.id,
            ],
        )?;
    }

    if let Some(is_active) = request.is_active {
        execute_query(
            &conn,
            queries::share_links::UPDATE_ACTIVE,
            &[&is_active, &current_user.id],
        )?;
    }

    let link = find_link_for_user(&conn, &current_user.id)?
        .ok_or_else(|| AppError::NotFound("Share link not found".to_string()))?;

    Ok(Json(link.into()))
}

async fn regenerate_share_link(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<ShareLinkResponse>> {
    let conn = state.pool.get().map_err(AppError::Pool)?;

    if find_link_for_user(&conn, &current_user.id)?.is_none() {
        let link = create_link(&conn, &current_user.id, &state.config)?;
        return Ok(Json(link.into()));
    }

    execute_query(
        &conn,
        queries::share_links::ROTATE_TOKEN,
        &[
            &random_token(state.config.share.token_length),
            &now_rfc3339(),
            &current_user.id,
        ],
    )?;
    info!("Regenerated share link for {}", current_user.id);

    let link = find_link_for_user(&conn, &current_user.id)?
        .ok_or_else(|| AppError::NotFound("Share link not found".to_string()))?;

    Ok(Json(link.into()))
}
